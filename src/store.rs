//src/store.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString};
use thiserror::Error;
use tracing::{debug, warn};

pub type ExerciseId = u64;
pub type SetId = u32;

const GROUP_COUNT: usize = 6;

/// Fixed training categories exercises are filed under.
/// The discriminant is the stable numeric id shown to the user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    Chest = 1,
    Triceps = 2,
    Shoulders = 3,
    Back = 4,
    Biceps = 5,
    Legs = 6,
}

impl MuscleGroup {
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::iter().find(|group| group.id() == id)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Back => "Back",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Legs => "Legs",
        }
    }

    // Slot in the store's group array
    const fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for MuscleGroup {
    type Error = StoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_id(value).ok_or_else(|| StoreError::UnknownGroup(value.to_string()))
    }
}

/// Parses a muscle group from either its numeric id ("1") or its name ("chest").
pub fn parse_muscle_group(input: &str) -> Result<MuscleGroup, StoreError> {
    let trimmed = input.trim();
    if let Ok(id) = trimmed.parse::<u8>() {
        return MuscleGroup::try_from(id);
    }
    MuscleGroup::from_str(trimmed).map_err(|_| StoreError::UnknownGroup(trimmed.to_string()))
}

/// The editable numeric fields of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Reps,
    Weight,
}

impl fmt::Display for SetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetField::Reps => write!(f, "reps"),
            SetField::Weight => write!(f, "weight"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unknown muscle group: {0}")]
    UnknownGroup(String),
    #[error("No muscle group selected.")]
    NoGroupSelected,
    #[error("Exercise {exercise_id} not found in {group}")]
    ExerciseNotFound {
        group: MuscleGroup,
        exercise_id: ExerciseId,
    },
    #[error("Set {set_id} not found on exercise {exercise_id}")]
    SetNotFound {
        exercise_id: ExerciseId,
        set_id: SetId,
    },
    #[error("Invalid {field} value: '{input}'")]
    InvalidNumber { field: SetField, input: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    pub id: SetId,
    pub reps: u32,
    pub weight: f64,
    pub completed: bool,
}

impl WorkoutSet {
    fn new(id: SetId) -> Self {
        Self {
            id,
            reps: 0,
            weight: 0.0,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub sets: Vec<WorkoutSet>,
}

impl Exercise {
    fn new(id: ExerciseId) -> Self {
        Self {
            id,
            name: String::new(),
            sets: Vec::new(),
        }
    }

    #[must_use]
    pub fn set(&self, set_id: SetId) -> Option<&WorkoutSet> {
        self.sets.iter().find(|set| set.id == set_id)
    }

    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|set| set.completed).count()
    }
}

enum FieldValue {
    Reps(u32),
    Weight(f64),
}

// Whitespace is ignored and an empty field reads as zero, so clearing a
// text box resets the value instead of failing.
fn parse_field_value(field: SetField, raw: &str) -> Result<FieldValue, StoreError> {
    let trimmed = raw.trim();
    let invalid = || StoreError::InvalidNumber {
        field,
        input: raw.to_string(),
    };

    match field {
        SetField::Reps => {
            if trimmed.is_empty() {
                return Ok(FieldValue::Reps(0));
            }
            trimmed.parse::<u32>().map(FieldValue::Reps).map_err(|_| invalid())
        }
        SetField::Weight => {
            if trimmed.is_empty() {
                return Ok(FieldValue::Weight(0.0));
            }
            let value: f64 = trimmed.parse().map_err(|_| invalid())?;
            if !value.is_finite() || value < 0.0 {
                return Err(invalid());
            }
            // "-0" parses to negative zero
            Ok(FieldValue::Weight(if value == 0.0 { 0.0 } else { value }))
        }
    }
}

fn fault(err: StoreError) -> StoreError {
    warn!(error = %err, "Rejected store operation");
    err
}

/// A cheap, immutable view of the store at one version.
///
/// Group lists are shared with the store until the store mutates them, so two
/// snapshots can be compared per group with [`WorkoutSnapshot::shares_group`].
#[derive(Debug, Clone)]
pub struct WorkoutSnapshot {
    groups: [Arc<Vec<Exercise>>; GROUP_COUNT],
    version: u64,
}

impl WorkoutSnapshot {
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn exercises_for(&self, group: Option<MuscleGroup>) -> &[Exercise] {
        match group {
            Some(group) => self.groups[group.index()].as_slice(),
            None => &[],
        }
    }

    /// True when both snapshots hold the very same list for `group`.
    #[must_use]
    pub fn shares_group(&self, other: &Self, group: MuscleGroup) -> bool {
        Arc::ptr_eq(&self.groups[group.index()], &other.groups[group.index()])
    }
}

/// In-memory exercises and sets, organized by muscle group.
///
/// Every group has a list for the lifetime of the store. Mutations copy a
/// group's list only if a snapshot still shares it, and each mutation that
/// changes state bumps [`WorkoutStore::version`].
#[derive(Debug, Clone)]
pub struct WorkoutStore {
    groups: [Arc<Vec<Exercise>>; GROUP_COUNT],
    next_exercise_id: ExerciseId,
    version: u64,
}

impl Default for WorkoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: Default::default(),
            next_exercise_id: 1,
            version: 0,
        }
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// The id the next `add_exercise` call will hand out.
    #[must_use]
    pub const fn next_exercise_id(&self) -> ExerciseId {
        self.next_exercise_id
    }

    #[must_use]
    pub fn snapshot(&self) -> WorkoutSnapshot {
        WorkoutSnapshot {
            groups: self.groups.clone(),
            version: self.version,
        }
    }

    /// Exercises of `group` in insertion order; empty when no group is given.
    #[must_use]
    pub fn exercises_for(&self, group: Option<MuscleGroup>) -> &[Exercise] {
        match group {
            Some(group) => self.groups[group.index()].as_slice(),
            None => &[],
        }
    }

    #[must_use]
    pub fn exercise(&self, group: MuscleGroup, exercise_id: ExerciseId) -> Option<&Exercise> {
        self.groups[group.index()]
            .iter()
            .find(|exercise| exercise.id == exercise_id)
    }

    /// Appends an unnamed exercise without sets to `group` and returns its id.
    /// Ids are never reused, even after removal.
    pub fn add_exercise(&mut self, group: MuscleGroup) -> ExerciseId {
        let id = self.next_exercise_id;
        self.next_exercise_id += 1;
        self.group_mut(group).push(Exercise::new(id));
        self.bump();
        debug!(%group, exercise_id = id, version = self.version, "Added exercise");
        id
    }

    /// Replaces the name as given, empty strings included.
    /// Returns false, changing nothing, if `group` has no such exercise.
    pub fn rename_exercise(
        &mut self,
        group: MuscleGroup,
        exercise_id: ExerciseId,
        name: impl Into<String>,
    ) -> bool {
        let Some(position) = self.exercise_position(group, exercise_id) else {
            debug!(%group, exercise_id, "Rename ignored, exercise not in group");
            return false;
        };
        self.group_mut(group)[position].name = name.into();
        self.bump();
        debug!(%group, exercise_id, version = self.version, "Renamed exercise");
        true
    }

    /// Returns false, changing nothing, if `group` has no such exercise.
    pub fn remove_exercise(&mut self, group: MuscleGroup, exercise_id: ExerciseId) -> bool {
        let Some(position) = self.exercise_position(group, exercise_id) else {
            debug!(%group, exercise_id, "Remove ignored, exercise not in group");
            return false;
        };
        self.group_mut(group).remove(position);
        self.bump();
        debug!(%group, exercise_id, version = self.version, "Removed exercise");
        true
    }

    /// Appends a blank set. Its id is the exercise's set count plus one.
    pub fn add_set(&mut self, group: MuscleGroup, exercise_id: ExerciseId) -> Result<SetId, StoreError> {
        let position = self
            .exercise_position(group, exercise_id)
            .ok_or_else(|| fault(StoreError::ExerciseNotFound { group, exercise_id }))?;

        let exercise = &mut self.group_mut(group)[position];
        let set_id = exercise.sets.len() as SetId + 1;
        exercise.sets.push(WorkoutSet::new(set_id));
        self.bump();
        debug!(%group, exercise_id, set_id, version = self.version, "Added set");
        Ok(set_id)
    }

    /// Overwrites `field` with the number in `raw`.
    ///
    /// # Errors
    /// Lookup faults are reported before the input is parsed. Input that is
    /// not a valid number for the field is rejected and the old value kept.
    pub fn update_set(
        &mut self,
        group: MuscleGroup,
        exercise_id: ExerciseId,
        set_id: SetId,
        field: SetField,
        raw: &str,
    ) -> Result<(), StoreError> {
        let (exercise_pos, set_pos) = self.set_position(group, exercise_id, set_id)?;
        let value = parse_field_value(field, raw).map_err(fault)?;

        let set = &mut self.group_mut(group)[exercise_pos].sets[set_pos];
        match value {
            FieldValue::Reps(reps) => set.reps = reps,
            FieldValue::Weight(weight) => set.weight = weight,
        }
        self.bump();
        debug!(%group, exercise_id, set_id, %field, version = self.version, "Updated set");
        Ok(())
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_complete(
        &mut self,
        group: MuscleGroup,
        exercise_id: ExerciseId,
        set_id: SetId,
    ) -> Result<bool, StoreError> {
        let (exercise_pos, set_pos) = self.set_position(group, exercise_id, set_id)?;

        let set = &mut self.group_mut(group)[exercise_pos].sets[set_pos];
        set.completed = !set.completed;
        let completed = set.completed;
        self.bump();
        debug!(%group, exercise_id, set_id, completed, version = self.version, "Toggled set");
        Ok(completed)
    }

    fn exercise_position(&self, group: MuscleGroup, exercise_id: ExerciseId) -> Option<usize> {
        self.groups[group.index()]
            .iter()
            .position(|exercise| exercise.id == exercise_id)
    }

    fn set_position(
        &self,
        group: MuscleGroup,
        exercise_id: ExerciseId,
        set_id: SetId,
    ) -> Result<(usize, usize), StoreError> {
        let exercise_pos = self
            .exercise_position(group, exercise_id)
            .ok_or_else(|| fault(StoreError::ExerciseNotFound { group, exercise_id }))?;
        let set_pos = self.groups[group.index()][exercise_pos]
            .sets
            .iter()
            .position(|set| set.id == set_id)
            .ok_or_else(|| fault(StoreError::SetNotFound { exercise_id, set_id }))?;
        Ok((exercise_pos, set_pos))
    }

    // Copy-on-write: clones the list only while a snapshot still holds it
    fn group_mut(&mut self, group: MuscleGroup) -> &mut Vec<Exercise> {
        Arc::make_mut(&mut self.groups[group.index()])
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}
