//src/session.rs
use crate::store::{Exercise, ExerciseId, MuscleGroup, SetField, SetId, StoreError, WorkoutStore};
use tracing::{debug, info};

/// What the front-end is looking at: a store, the selected muscle group,
/// and the exercise that was added last (so its name field can take focus).
///
/// Exercise operations here always target the selected group.
#[derive(Debug, Default)]
pub struct WorkoutSession {
    store: WorkoutStore,
    selected: Option<MuscleGroup>,
    last_added: Option<ExerciseId>,
}

impl WorkoutSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_selection(group: Option<MuscleGroup>) -> Self {
        Self {
            selected: group,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn store(&self) -> &WorkoutStore {
        &self.store
    }

    #[must_use]
    pub const fn selected(&self) -> Option<MuscleGroup> {
        self.selected
    }

    #[must_use]
    pub const fn last_added(&self) -> Option<ExerciseId> {
        self.last_added
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.store.version()
    }

    pub fn select(&mut self, group: Option<MuscleGroup>) {
        if self.selected != group {
            match group {
                Some(group) => info!(%group, "Selected muscle group"),
                None => info!("Cleared muscle group selection"),
            }
        }
        self.selected = group;
    }

    /// Adds an exercise to the selected group. Returns `None` when nothing is selected.
    pub fn add_exercise(&mut self) -> Option<ExerciseId> {
        let Some(group) = self.selected else {
            debug!("Add exercise ignored, no muscle group selected");
            return None;
        };
        let id = self.store.add_exercise(group);
        self.last_added = Some(id);
        Some(id)
    }

    pub fn rename_exercise(&mut self, exercise_id: ExerciseId, text: &str) -> bool {
        match self.selected {
            Some(group) => self.store.rename_exercise(group, exercise_id, text),
            None => false,
        }
    }

    pub fn remove_exercise(&mut self, exercise_id: ExerciseId) -> bool {
        let Some(group) = self.selected else {
            return false;
        };
        let removed = self.store.remove_exercise(group, exercise_id);
        if removed && self.last_added == Some(exercise_id) {
            self.last_added = None;
        }
        removed
    }

    pub fn add_set(&mut self, exercise_id: ExerciseId) -> Result<SetId, StoreError> {
        let group = self.require_selection()?;
        self.store.add_set(group, exercise_id)
    }

    pub fn update_set(
        &mut self,
        exercise_id: ExerciseId,
        set_id: SetId,
        field: SetField,
        raw: &str,
    ) -> Result<(), StoreError> {
        let group = self.require_selection()?;
        self.store.update_set(group, exercise_id, set_id, field, raw)
    }

    pub fn toggle_complete(&mut self, exercise_id: ExerciseId, set_id: SetId) -> Result<bool, StoreError> {
        let group = self.require_selection()?;
        self.store.toggle_complete(group, exercise_id, set_id)
    }

    /// Exercises of the selected group, or an empty list when nothing is selected.
    #[must_use]
    pub fn current_exercises(&self) -> &[Exercise] {
        self.store.exercises_for(self.selected)
    }

    fn require_selection(&self) -> Result<MuscleGroup, StoreError> {
        self.selected.ok_or(StoreError::NoGroupSelected)
    }
}
