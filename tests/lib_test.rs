use anyhow::Result;
use strum::IntoEnumIterator;
use workout_store_lib::{
    parse_muscle_group, MuscleGroup, SetField, StoreError, WorkoutSession, WorkoutStore,
};

// Helper: a session with Chest selected, the way the app starts after picking a group
fn chest_session() -> WorkoutSession {
    WorkoutSession::with_selection(Some(MuscleGroup::Chest))
}

#[test]
fn test_muscle_group_ids_and_parsing() -> Result<()> {
    let ids: Vec<u8> = MuscleGroup::iter().map(MuscleGroup::id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(MuscleGroup::from_id(4), Some(MuscleGroup::Back));
    assert_eq!(MuscleGroup::from_id(0), None);
    assert_eq!(MuscleGroup::from_id(7), None);
    assert_eq!(MuscleGroup::Shoulders.to_string(), "Shoulders");

    assert_eq!(parse_muscle_group("chest")?, MuscleGroup::Chest);
    assert_eq!(parse_muscle_group("LEGS")?, MuscleGroup::Legs);
    assert_eq!(parse_muscle_group(" 5 ")?, MuscleGroup::Biceps);
    assert_eq!(
        parse_muscle_group("9"),
        Err(StoreError::UnknownGroup("9".to_string()))
    );
    assert!(parse_muscle_group("calves").is_err());
    assert!(MuscleGroup::try_from(0u8).is_err());

    Ok(())
}

#[test]
fn test_walkthrough_chest_session() -> Result<()> {
    let mut session = chest_session();

    // Add an exercise
    let id = session.add_exercise().expect("Chest is selected");
    assert_eq!(id, 1);
    let exercises = session.current_exercises();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].id, 1);
    assert_eq!(exercises[0].name, "");
    assert!(exercises[0].sets.is_empty());

    // Rename it
    assert!(session.rename_exercise(1, "Bench Press"));
    assert_eq!(session.current_exercises()[0].name, "Bench Press");

    // Two sets
    assert_eq!(session.add_set(1)?, 1);
    let first = &session.current_exercises()[0].sets[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.reps, 0);
    assert_eq!(first.weight, 0.0);
    assert!(!first.completed);
    assert_eq!(session.add_set(1)?, 2);
    assert_eq!(session.current_exercises()[0].sets.len(), 2);

    // Reps are stored as a number
    session.update_set(1, 1, SetField::Reps, "8")?;
    assert_eq!(session.current_exercises()[0].sets[0].reps, 8);

    // Toggle back and forth
    assert!(session.toggle_complete(1, 1)?);
    assert!(session.current_exercises()[0].sets[0].completed);
    assert!(!session.toggle_complete(1, 1)?);
    assert!(!session.current_exercises()[0].sets[0].completed);

    // Remove, then the next exercise gets a fresh id
    assert!(session.remove_exercise(1));
    assert!(session.current_exercises().is_empty());
    assert_eq!(session.add_exercise(), Some(2));

    Ok(())
}

#[test]
fn test_exercise_ids_are_monotonic_across_groups_and_removals() -> Result<()> {
    let mut store = WorkoutStore::new();
    let mut issued = Vec::new();

    for group in MuscleGroup::iter() {
        issued.push(store.add_exercise(group));
        let extra = store.add_exercise(group);
        issued.push(extra);
        assert!(store.remove_exercise(group, extra));
    }
    issued.push(store.add_exercise(MuscleGroup::Legs));

    assert!(issued.windows(2).all(|pair| pair[1] > pair[0]));
    assert_eq!(store.next_exercise_id(), 14);
    Ok(())
}

#[test]
fn test_set_id_is_count_plus_one() -> Result<()> {
    let mut store = WorkoutStore::new();
    let squat = store.add_exercise(MuscleGroup::Legs);
    let lunge = store.add_exercise(MuscleGroup::Legs);

    for expected in 1..=4 {
        assert_eq!(store.add_set(MuscleGroup::Legs, squat)?, expected);
    }
    // Set ids are per exercise, not global
    assert_eq!(store.add_set(MuscleGroup::Legs, lunge)?, 1);

    let exercise = store.exercise(MuscleGroup::Legs, squat).expect("squat exists");
    let ids: Vec<u32> = exercise.sets.iter().map(|set| set.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_update_set_touches_only_the_target() -> Result<()> {
    let mut store = WorkoutStore::new();
    let bench = store.add_exercise(MuscleGroup::Chest);
    let fly = store.add_exercise(MuscleGroup::Chest);
    let curl = store.add_exercise(MuscleGroup::Biceps);
    for exercise in [bench, fly] {
        store.add_set(MuscleGroup::Chest, exercise)?;
        store.add_set(MuscleGroup::Chest, exercise)?;
    }
    store.add_set(MuscleGroup::Biceps, curl)?;

    let before = store.snapshot();
    store.update_set(MuscleGroup::Chest, bench, 2, SetField::Weight, "62.5")?;
    let after = store.snapshot();

    let chest_before = before.exercises_for(Some(MuscleGroup::Chest));
    let chest_after = after.exercises_for(Some(MuscleGroup::Chest));
    assert_eq!(chest_after[0].sets[1].weight, 62.5);
    assert_eq!(chest_after[0].sets[0], chest_before[0].sets[0]);
    assert_eq!(chest_after[0].name, chest_before[0].name);
    assert_eq!(chest_after[1], chest_before[1]);
    assert_eq!(
        after.exercises_for(Some(MuscleGroup::Biceps)),
        before.exercises_for(Some(MuscleGroup::Biceps))
    );
    // The old snapshot still shows the old value
    assert_eq!(chest_before[0].sets[1].weight, 0.0);
    Ok(())
}

#[test]
fn test_add_exercise_leaves_other_groups_shared() -> Result<()> {
    let mut store = WorkoutStore::new();
    store.add_exercise(MuscleGroup::Back);
    store.add_exercise(MuscleGroup::Chest);

    let before = store.snapshot();
    store.add_exercise(MuscleGroup::Chest);
    let after = store.snapshot();

    for group in MuscleGroup::iter() {
        if group == MuscleGroup::Chest {
            assert!(!before.shares_group(&after, group));
        } else {
            assert!(before.shares_group(&after, group), "{group} list was copied");
            assert_eq!(
                before.exercises_for(Some(group)),
                after.exercises_for(Some(group))
            );
        }
    }
    assert_eq!(before.exercises_for(Some(MuscleGroup::Chest)).len(), 1);
    assert_eq!(after.exercises_for(Some(MuscleGroup::Chest)).len(), 2);
    Ok(())
}

#[test]
fn test_order_survives_edits() -> Result<()> {
    let mut store = WorkoutStore::new();
    let group = MuscleGroup::Shoulders;
    let ids: Vec<u64> = (0..3).map(|_| store.add_exercise(group)).collect();
    for &id in &ids {
        store.add_set(group, id)?;
        store.add_set(group, id)?;
        store.add_set(group, id)?;
    }

    store.rename_exercise(group, ids[2], "Lateral Raise");
    store.rename_exercise(group, ids[0], "Overhead Press");
    store.update_set(group, ids[1], 3, SetField::Reps, "12")?;
    store.update_set(group, ids[1], 1, SetField::Weight, "20")?;
    store.toggle_complete(group, ids[0], 2)?;
    store.toggle_complete(group, ids[2], 1)?;

    let listed: Vec<u64> = store.exercises_for(Some(group)).iter().map(|e| e.id).collect();
    assert_eq!(listed, ids);
    for exercise in store.exercises_for(Some(group)) {
        let set_ids: Vec<u32> = exercise.sets.iter().map(|set| set.id).collect();
        assert_eq!(set_ids, vec![1, 2, 3]);
    }

    // Removal is the only thing that changes the order
    store.remove_exercise(group, ids[1]);
    let listed: Vec<u64> = store.exercises_for(Some(group)).iter().map(|e| e.id).collect();
    assert_eq!(listed, vec![ids[0], ids[2]]);
    Ok(())
}

#[test]
fn test_no_selection_is_empty_not_a_fault() -> Result<()> {
    let store = WorkoutStore::new();
    assert!(store.exercises_for(None).is_empty());
    assert!(store.snapshot().exercises_for(None).is_empty());

    let mut session = WorkoutSession::new();
    assert_eq!(session.selected(), None);
    assert!(session.current_exercises().is_empty());
    assert_eq!(session.add_exercise(), None);
    assert!(!session.rename_exercise(1, "Row"));
    assert!(!session.remove_exercise(1));
    assert_eq!(session.add_set(1), Err(StoreError::NoGroupSelected));
    assert_eq!(
        session.update_set(1, 1, SetField::Reps, "5"),
        Err(StoreError::NoGroupSelected)
    );
    assert_eq!(session.toggle_complete(1, 1), Err(StoreError::NoGroupSelected));
    // Nothing happened, so no id was spent
    assert_eq!(session.store().next_exercise_id(), 1);
    assert_eq!(session.version(), 0);
    Ok(())
}

#[test]
fn test_rename_and_remove_only_search_the_given_group() -> Result<()> {
    let mut store = WorkoutStore::new();
    let row = store.add_exercise(MuscleGroup::Back);

    assert!(!store.rename_exercise(MuscleGroup::Chest, row, "Bench"));
    assert!(!store.remove_exercise(MuscleGroup::Chest, row));
    assert_eq!(store.exercise(MuscleGroup::Back, row).map(|e| e.name.as_str()), Some(""));

    // Any text is accepted as-is
    assert!(store.rename_exercise(MuscleGroup::Back, row, "  Barbell Row "));
    assert_eq!(
        store.exercise(MuscleGroup::Back, row).map(|e| e.name.as_str()),
        Some("  Barbell Row ")
    );
    assert!(store.rename_exercise(MuscleGroup::Back, row, ""));
    assert_eq!(store.exercise(MuscleGroup::Back, row).map(|e| e.name.as_str()), Some(""));
    Ok(())
}

#[test]
fn test_session_ignores_exercises_outside_selection() -> Result<()> {
    let mut session = chest_session();
    let bench = session.add_exercise().expect("Chest is selected");

    session.select(Some(MuscleGroup::Triceps));
    assert!(session.current_exercises().is_empty());
    assert!(!session.rename_exercise(bench, "Dips"));
    assert_eq!(
        session.add_set(bench),
        Err(StoreError::ExerciseNotFound {
            group: MuscleGroup::Triceps,
            exercise_id: bench,
        })
    );

    session.select(Some(MuscleGroup::Chest));
    assert_eq!(session.current_exercises().len(), 1);
    Ok(())
}

#[test]
fn test_lookup_faults_leave_store_untouched() -> Result<()> {
    let mut store = WorkoutStore::new();
    let bench = store.add_exercise(MuscleGroup::Chest);
    store.add_set(MuscleGroup::Chest, bench)?;
    let version = store.version();
    let before = store.snapshot();

    assert_eq!(
        store.add_set(MuscleGroup::Chest, 99),
        Err(StoreError::ExerciseNotFound {
            group: MuscleGroup::Chest,
            exercise_id: 99,
        })
    );
    assert_eq!(
        store.update_set(MuscleGroup::Chest, bench, 2, SetField::Reps, "5"),
        Err(StoreError::SetNotFound {
            exercise_id: bench,
            set_id: 2,
        })
    );
    // Lookup is checked before the input
    assert_eq!(
        store.update_set(MuscleGroup::Chest, bench, 2, SetField::Reps, "abc"),
        Err(StoreError::SetNotFound {
            exercise_id: bench,
            set_id: 2,
        })
    );
    assert!(store.toggle_complete(MuscleGroup::Legs, bench, 1).is_err());

    assert_eq!(store.version(), version);
    assert!(before.shares_group(&store.snapshot(), MuscleGroup::Chest));
    Ok(())
}

#[test]
fn test_numeric_input_rules() -> Result<()> {
    let mut store = WorkoutStore::new();
    let group = MuscleGroup::Legs;
    let squat = store.add_exercise(group);
    store.add_set(group, squat)?;

    let set = |store: &WorkoutStore| {
        store
            .exercise(group, squat)
            .and_then(|exercise| exercise.set(1))
            .cloned()
            .expect("set 1 exists")
    };

    store.update_set(group, squat, 1, SetField::Reps, " 10 ")?;
    store.update_set(group, squat, 1, SetField::Weight, "102.5")?;
    assert_eq!(set(&store).reps, 10);
    assert_eq!(set(&store).weight, 102.5);

    // Rejected input keeps the previous value
    for bad in ["abc", "-3", "2.5", "NaN"] {
        assert_eq!(
            store.update_set(group, squat, 1, SetField::Reps, bad),
            Err(StoreError::InvalidNumber {
                field: SetField::Reps,
                input: bad.to_string(),
            })
        );
    }
    for bad in ["heavy", "-1", "NaN", "inf", "1e400"] {
        assert!(store.update_set(group, squat, 1, SetField::Weight, bad).is_err());
    }
    assert_eq!(set(&store).reps, 10);
    assert_eq!(set(&store).weight, 102.5);
    assert!(!set(&store).weight.is_nan());

    // A cleared field reads as zero
    store.update_set(group, squat, 1, SetField::Reps, "")?;
    store.update_set(group, squat, 1, SetField::Weight, "   ")?;
    assert_eq!(set(&store).reps, 0);
    assert_eq!(set(&store).weight, 0.0);

    store.update_set(group, squat, 1, SetField::Weight, "-0")?;
    assert!(set(&store).weight.is_sign_positive());
    Ok(())
}

#[test]
fn test_version_counts_real_changes_only() -> Result<()> {
    let mut store = WorkoutStore::new();
    assert_eq!(store.version(), 0);

    let curl = store.add_exercise(MuscleGroup::Biceps);
    assert_eq!(store.version(), 1);
    store.rename_exercise(MuscleGroup::Biceps, curl, "Curl");
    store.add_set(MuscleGroup::Biceps, curl)?;
    store.update_set(MuscleGroup::Biceps, curl, 1, SetField::Reps, "12")?;
    store.toggle_complete(MuscleGroup::Biceps, curl, 1)?;
    assert_eq!(store.version(), 5);

    store.rename_exercise(MuscleGroup::Back, curl, "Row");
    store.remove_exercise(MuscleGroup::Back, curl);
    let _ = store.update_set(MuscleGroup::Biceps, curl, 1, SetField::Reps, "x");
    assert_eq!(store.version(), 5);
    assert_eq!(store.snapshot().version(), 5);
    Ok(())
}

#[test]
fn test_focus_hint_follows_last_added_exercise() -> Result<()> {
    let mut session = chest_session();
    assert_eq!(session.last_added(), None);

    let first = session.add_exercise().expect("Chest is selected");
    let second = session.add_exercise().expect("Chest is selected");
    assert_eq!(session.last_added(), Some(second));

    // Removing some other exercise keeps the hint
    assert!(session.remove_exercise(first));
    assert_eq!(session.last_added(), Some(second));

    assert!(session.remove_exercise(second));
    assert_eq!(session.last_added(), None);
    Ok(())
}

#[test]
fn test_completed_sets_count() -> Result<()> {
    let mut session = WorkoutSession::with_selection(Some(MuscleGroup::Back));
    let row = session.add_exercise().expect("Back is selected");
    for _ in 0..3 {
        session.add_set(row)?;
    }
    session.toggle_complete(row, 1)?;
    session.toggle_complete(row, 3)?;

    assert_eq!(session.current_exercises()[0].completed_sets(), 2);
    Ok(())
}
