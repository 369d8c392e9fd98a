//! Workout aggregate store.
//!
//! Maintains the Workout → WorkoutExercise → WorkoutSet ownership tree and
//! enforces its structural invariants on every write:
//!
//! - `order` values are pairwise distinct within a workout
//! - `set_number` values form the contiguous range `1..=N` per entry
//! - workout dates are never in the future, durations are positive
//!
//! Every operation takes the acting user id and enforces scoping itself.
//! Writes validate the full nested payload before touching any state, so a
//! failed call leaves the store exactly as it was.

use crate::{
    Catalog, EntryDraft, Error, Result, SetDraft, SetRecord, Workout, WorkoutDraft,
    WorkoutExercise, WorkoutSet, WorkoutUpdate,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// In-memory aggregate store, one entry per workout tree
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkoutStore {
    workouts: HashMap<Uuid, Workout>,
}

impl WorkoutStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of workouts across all users
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// Whether the store holds no workouts at all
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Create a workout with its full nested exercise/set tree
    ///
    /// The entire payload is validated before any state changes; on success
    /// the tree is inserted as one unit with freshly assigned ids.
    pub fn create_workout(
        &mut self,
        catalog: &Catalog,
        user: Uuid,
        today: NaiveDate,
        draft: WorkoutDraft,
    ) -> Result<Workout> {
        validate_workout_fields(draft.date, draft.duration_min, today)?;
        validate_entries(&draft.exercises)?;
        check_exercises_exist(catalog, &draft.exercises)?;

        let workout = Workout {
            id: Uuid::new_v4(),
            user_id: user,
            date: draft.date,
            duration_min: draft.duration_min,
            notes: draft.notes,
            exercises: build_subtree(&draft.exercises),
        };

        tracing::info!(
            "Created workout {} for user {} ({} exercises)",
            workout.id,
            user,
            workout.exercises.len()
        );

        self.workouts.insert(workout.id, workout.clone());
        Ok(workout)
    }

    /// Replace a workout's fields and, when a new `exercises` payload is
    /// supplied, its entire exercise/set subtree
    ///
    /// The old subtree is discarded wholesale and recreated from the payload
    /// with fresh ids; when `update.exercises` is `None` the subtree stays
    /// untouched. Distinguishes `NotFound` (no such workout) from
    /// `Forbidden` (workout owned by another user).
    pub fn replace_workout(
        &mut self,
        catalog: &Catalog,
        user: Uuid,
        workout_id: Uuid,
        today: NaiveDate,
        update: WorkoutUpdate,
    ) -> Result<Workout> {
        let existing = self.workouts.get(&workout_id).ok_or(Error::NotFound {
            entity: "workout",
            id: workout_id.to_string(),
        })?;
        if existing.user_id != user {
            return Err(Error::Forbidden {
                entity: "workout",
                id: workout_id.to_string(),
            });
        }

        validate_workout_fields(update.date, update.duration_min, today)?;
        let new_subtree = match &update.exercises {
            Some(entries) => {
                validate_entries(entries)?;
                check_exercises_exist(catalog, entries)?;
                Some(build_subtree(entries))
            }
            None => None,
        };

        // All checks passed; commit everything at once.
        let workout = self.workouts.get_mut(&workout_id).ok_or(Error::NotFound {
            entity: "workout",
            id: workout_id.to_string(),
        })?;
        workout.date = update.date;
        workout.duration_min = update.duration_min;
        workout.notes = update.notes;
        if let Some(subtree) = new_subtree {
            workout.exercises = subtree;
        }

        tracing::info!("Replaced workout {} for user {}", workout_id, user);
        Ok(workout.clone())
    }

    /// Delete a workout and its whole subtree
    ///
    /// Reports `NotFound` both for absent ids and for workouts owned by
    /// another user, so deletes never reveal foreign rows.
    pub fn delete_workout(&mut self, user: Uuid, workout_id: Uuid) -> Result<()> {
        match self.workouts.get(&workout_id) {
            Some(w) if w.user_id == user => {
                self.workouts.remove(&workout_id);
                tracing::info!("Deleted workout {} for user {}", workout_id, user);
                Ok(())
            }
            _ => Err(Error::NotFound {
                entity: "workout",
                id: workout_id.to_string(),
            }),
        }
    }

    /// Fetch a single workout, scoped to the requesting user
    pub fn get_workout(&self, user: Uuid, workout_id: Uuid) -> Result<&Workout> {
        match self.workouts.get(&workout_id) {
            Some(w) if w.user_id == user => Ok(w),
            _ => Err(Error::NotFound {
                entity: "workout",
                id: workout_id.to_string(),
            }),
        }
    }

    /// List a user's workouts, optionally bounded by inclusive dates,
    /// ordered by date descending
    pub fn list_workouts(
        &self,
        user: Uuid,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Vec<&Workout> {
        let mut found: Vec<&Workout> = self
            .workouts
            .values()
            .filter(|w| w.user_id == user && in_range(w.date, date_from, date_to))
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        found
    }

    /// Flatten a user's sets for the analytics engine and CSV export
    ///
    /// Deterministically ordered by (date, workout id, entry order,
    /// set number) ascending, so downstream tie-breaking is stable.
    pub fn sets_for_user(
        &self,
        user: Uuid,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        exercise: Option<&str>,
    ) -> Vec<SetRecord> {
        let mut workouts: Vec<&Workout> = self
            .workouts
            .values()
            .filter(|w| w.user_id == user && in_range(w.date, date_from, date_to))
            .collect();
        workouts.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        let mut records = Vec::new();
        for workout in workouts {
            for entry in &workout.exercises {
                if let Some(filter) = exercise {
                    if entry.exercise_id != filter {
                        continue;
                    }
                }
                for set in &entry.sets {
                    records.push(SetRecord {
                        date: workout.date,
                        workout_id: workout.id,
                        exercise_id: entry.exercise_id.clone(),
                        set_number: set.set_number,
                        reps: set.reps_completed,
                        weight_kg: set.weight_kg,
                        rpe: set.rpe,
                        rest_sec: set.rest_sec,
                    });
                }
            }
        }
        records
    }

    /// Dates of a user's workouts in range, one entry per workout
    /// (duplicates preserved), sorted ascending
    pub fn workout_dates_for_user(
        &self,
        user: Uuid,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .workouts
            .values()
            .filter(|w| w.user_id == user && in_range(w.date, date_from, date_to))
            .map(|w| w.date)
            .collect();
        dates.sort_unstable();
        dates
    }
}

fn in_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
}

/// Workout-level checks: positive duration, date not in the future
fn validate_workout_fields(date: NaiveDate, duration_min: u32, today: NaiveDate) -> Result<()> {
    if duration_min == 0 {
        return Err(Error::validation("duration_min", "must be positive"));
    }
    if date > today {
        return Err(Error::validation(
            "date",
            format!("{} is in the future (today is {})", date, today),
        ));
    }
    Ok(())
}

/// Structural checks over a full exercises payload, fail-fast
fn validate_entries(entries: &[EntryDraft]) -> Result<()> {
    let mut seen_orders = HashSet::new();
    for (i, entry) in entries.iter().enumerate() {
        if entry.order == 0 {
            return Err(Error::validation(
                format!("exercises[{}].order", i),
                "must be positive",
            ));
        }
        if !seen_orders.insert(entry.order) {
            return Err(Error::validation(
                format!("exercises[{}].order", i),
                format!("duplicate order {} within workout", entry.order),
            ));
        }
    }

    for (i, entry) in entries.iter().enumerate() {
        if entry.target_sets == 0 {
            return Err(Error::validation(
                format!("exercises[{}].target_sets", i),
                "must be positive",
            ));
        }
        if entry.target_reps == 0 {
            return Err(Error::validation(
                format!("exercises[{}].target_reps", i),
                "must be positive",
            ));
        }
        validate_sets(i, &entry.sets)?;
    }
    Ok(())
}

/// Per-entry set checks: value ranges plus the contiguous `1..=N`
/// set-number requirement
fn validate_sets(entry_idx: usize, sets: &[SetDraft]) -> Result<()> {
    for (j, set) in sets.iter().enumerate() {
        if let Some(weight) = set.weight_kg {
            if weight < Decimal::ZERO {
                return Err(Error::validation(
                    format!("exercises[{}].sets[{}].weight_kg", entry_idx, j),
                    "must not be negative",
                ));
            }
        }
        if let Some(rpe) = set.rpe {
            if rpe < Decimal::ONE || rpe > Decimal::from(10) {
                return Err(Error::validation(
                    format!("exercises[{}].sets[{}].rpe", entry_idx, j),
                    "must be between 1 and 10",
                ));
            }
        }
    }

    let numbers: Vec<u32> = sets.iter().map(|s| s.set_number).collect();
    let mut sorted = numbers.clone();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != numbers.len() {
        return Err(Error::validation(
            format!("exercises[{}].sets", entry_idx),
            format!("duplicate set numbers in {:?}", numbers),
        ));
    }
    for (k, n) in sorted.iter().enumerate() {
        if *n != k as u32 + 1 {
            return Err(Error::validation(
                format!("exercises[{}].sets", entry_idx),
                format!("set numbers {:?} must be consecutive starting at 1", numbers),
            ));
        }
    }
    Ok(())
}

/// Every referenced exercise id must exist in the catalog
fn check_exercises_exist(catalog: &Catalog, entries: &[EntryDraft]) -> Result<()> {
    for entry in entries {
        catalog.require(&entry.exercise_id)?;
    }
    Ok(())
}

/// Materialize a validated payload into an owned subtree with fresh ids
///
/// Entries are stored sorted by `order` and sets by `set_number`, so every
/// read of the tree sees the same deterministic ordering.
fn build_subtree(entries: &[EntryDraft]) -> Vec<WorkoutExercise> {
    let mut built: Vec<WorkoutExercise> = entries
        .iter()
        .map(|entry| {
            let mut sets: Vec<WorkoutSet> = entry
                .sets
                .iter()
                .map(|set| WorkoutSet {
                    id: Uuid::new_v4(),
                    set_number: set.set_number,
                    reps_completed: set.reps_completed,
                    weight_kg: set.weight_kg,
                    rpe: set.rpe,
                    rest_sec: set.rest_sec,
                })
                .collect();
            sets.sort_by_key(|s| s.set_number);
            WorkoutExercise {
                id: Uuid::new_v4(),
                exercise_id: entry.exercise_id.clone(),
                order: entry.order,
                target_sets: entry.target_sets,
                target_reps: entry.target_reps,
                sets,
            }
        })
        .collect();
    built.sort_by_key(|e| e.order);
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_catalog;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    fn set(n: u32, reps: u32, weight: Option<Decimal>) -> SetDraft {
        SetDraft {
            set_number: n,
            reps_completed: reps,
            weight_kg: weight,
            rpe: None,
            rest_sec: Some(90),
        }
    }

    fn entry(exercise_id: &str, order: u32, sets: Vec<SetDraft>) -> EntryDraft {
        EntryDraft {
            exercise_id: exercise_id.into(),
            order,
            target_sets: 3,
            target_reps: 8,
            sets,
        }
    }

    fn draft(date: NaiveDate, exercises: Vec<EntryDraft>) -> WorkoutDraft {
        WorkoutDraft {
            date,
            duration_min: 60,
            notes: None,
            exercises,
        }
    }

    fn bench_draft(date: NaiveDate) -> WorkoutDraft {
        draft(
            date,
            vec![entry(
                "barbell_bench_press",
                1,
                vec![
                    set(1, 8, Some(dec!(80))),
                    set(2, 8, Some(dec!(80))),
                    set(3, 6, Some(dec!(85))),
                ],
            )],
        )
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let payload = draft(
            today(),
            vec![
                entry("back_squat", 1, vec![set(1, 5, Some(dec!(100))), set(2, 5, Some(dec!(100)))]),
                entry("pullup", 2, vec![set(1, 10, None)]),
            ],
        );

        let created = store.create_workout(&catalog, user, today(), payload).unwrap();
        let fetched = store.get_workout(user, created.id).unwrap();

        assert_eq!(fetched.exercises.len(), 2);
        let orders: Vec<u32> = fetched.exercises.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2]);
        let numbers: Vec<u32> = fetched.exercises[0].sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_unordered_payload_stored_sorted() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        // Orders and set numbers arrive shuffled; only the multisets matter.
        let payload = draft(
            today(),
            vec![
                entry("deadlift", 2, vec![set(2, 5, Some(dec!(140))), set(1, 5, Some(dec!(140)))]),
                entry("barbell_row", 1, vec![set(1, 10, Some(dec!(60)))]),
            ],
        );

        let created = store.create_workout(&catalog, user, today(), payload).unwrap();
        assert_eq!(created.exercises[0].order, 1);
        assert_eq!(created.exercises[1].order, 2);
        assert_eq!(created.exercises[1].sets[0].set_number, 1);
        assert_eq!(created.exercises[1].sets[1].set_number, 2);
    }

    #[test]
    fn test_duplicate_order_rejected_without_trace() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let payload = draft(
            today(),
            vec![
                entry("back_squat", 1, vec![set(1, 5, Some(dec!(100)))]),
                entry("leg_press", 1, vec![set(1, 12, Some(dec!(180)))]),
            ],
        );

        let err = store.create_workout(&catalog, user, today(), payload).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(store.list_workouts(user, None, None).is_empty());
    }

    #[test]
    fn test_non_consecutive_set_numbers_rejected() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let payload = draft(
            today(),
            vec![entry(
                "back_squat",
                1,
                vec![set(1, 5, Some(dec!(100))), set(3, 5, Some(dec!(100)))],
            )],
        );

        let err = store.create_workout(&catalog, user, today(), payload).unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "exercises[0].sets"),
            other => panic!("Expected Validation, got {:?}", other),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_set_numbers_rejected() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let payload = draft(
            today(),
            vec![entry(
                "back_squat",
                1,
                vec![set(1, 5, Some(dec!(100))), set(1, 5, Some(dec!(100)))],
            )],
        );

        let err = store.create_workout(&catalog, user, today(), payload).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_zero_targets_rejected() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let mut bad = entry("back_squat", 1, vec![set(1, 5, Some(dec!(100)))]);
        bad.target_sets = 0;
        let err = store
            .create_workout(&catalog, user, today(), draft(today(), vec![bad]))
            .unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "exercises[0].target_sets"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_future_date_rejected() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let tomorrow = today().succ_opt().unwrap();
        let err = store
            .create_workout(&catalog, user, today(), bench_draft(tomorrow))
            .unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "date"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_duration_rejected() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let mut payload = bench_draft(today());
        payload.duration_min = 0;
        let err = store.create_workout(&catalog, user, today(), payload).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_unknown_exercise_rejected() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let payload = draft(
            today(),
            vec![entry("zercher_squat", 1, vec![set(1, 5, Some(dec!(60)))])],
        );
        let err = store.create_workout(&catalog, user, today(), payload).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "exercise", .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_rpe_out_of_range_rejected() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let mut s = set(1, 5, Some(dec!(100)));
        s.rpe = Some(dec!(10.5));
        let payload = draft(today(), vec![entry("back_squat", 1, vec![s])]);
        let err = store.create_workout(&catalog, user, today(), payload).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let payload = draft(
            today(),
            vec![entry("back_squat", 1, vec![set(1, 5, Some(dec!(-10)))])],
        );
        let err = store.create_workout(&catalog, user, today(), payload).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_empty_tree_allowed() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let created = store
            .create_workout(&catalog, user, today(), draft(today(), vec![]))
            .unwrap();
        assert!(created.exercises.is_empty());
    }

    #[test]
    fn test_replace_supersedes_subtree() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let created = store
            .create_workout(&catalog, user, today(), bench_draft(today()))
            .unwrap();
        let old_entry_ids: Vec<Uuid> = created.exercises.iter().map(|e| e.id).collect();

        let update = WorkoutUpdate {
            date: today(),
            duration_min: 45,
            notes: Some("deload".into()),
            exercises: Some(vec![entry(
                "overhead_press",
                1,
                vec![set(1, 10, Some(dec!(40)))],
            )]),
        };
        let replaced = store
            .replace_workout(&catalog, user, created.id, today(), update)
            .unwrap();

        assert_eq!(replaced.duration_min, 45);
        assert_eq!(replaced.exercises.len(), 1);
        assert_eq!(replaced.exercises[0].exercise_id, "overhead_press");
        assert!(!old_entry_ids.contains(&replaced.exercises[0].id));
    }

    #[test]
    fn test_replace_without_exercises_keeps_subtree() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let created = store
            .create_workout(&catalog, user, today(), bench_draft(today()))
            .unwrap();
        let entry_id = created.exercises[0].id;

        let update = WorkoutUpdate {
            date: today(),
            duration_min: 90,
            notes: None,
            exercises: None,
        };
        let replaced = store
            .replace_workout(&catalog, user, created.id, today(), update)
            .unwrap();

        assert_eq!(replaced.duration_min, 90);
        assert_eq!(replaced.exercises[0].id, entry_id);
        assert_eq!(replaced.exercises[0].sets.len(), 3);
    }

    #[test]
    fn test_replace_invalid_payload_leaves_original() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let created = store
            .create_workout(&catalog, user, today(), bench_draft(today()))
            .unwrap();

        let update = WorkoutUpdate {
            date: today(),
            duration_min: 45,
            notes: None,
            exercises: Some(vec![entry(
                "back_squat",
                1,
                vec![set(1, 5, Some(dec!(100))), set(5, 5, Some(dec!(100)))],
            )]),
        };
        let err = store
            .replace_workout(&catalog, user, created.id, today(), update)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let unchanged = store.get_workout(user, created.id).unwrap();
        assert_eq!(unchanged.duration_min, 60);
        assert_eq!(unchanged.exercises[0].exercise_id, "barbell_bench_press");
    }

    #[test]
    fn test_replace_distinguishes_missing_and_foreign() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();

        let created = store
            .create_workout(&catalog, owner, today(), bench_draft(today()))
            .unwrap();

        let update = WorkoutUpdate {
            date: today(),
            duration_min: 30,
            notes: None,
            exercises: None,
        };
        let missing = store
            .replace_workout(&catalog, owner, Uuid::new_v4(), today(), update.clone())
            .unwrap_err();
        assert!(matches!(missing, Error::NotFound { .. }));

        let foreign = store
            .replace_workout(&catalog, intruder, created.id, today(), update)
            .unwrap_err();
        assert!(matches!(foreign, Error::Forbidden { .. }));
    }

    #[test]
    fn test_get_and_delete_never_leak_foreign_rows() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();

        let created = store
            .create_workout(&catalog, owner, today(), bench_draft(today()))
            .unwrap();

        let get_err = store.get_workout(intruder, created.id).unwrap_err();
        assert!(matches!(get_err, Error::NotFound { .. }));

        let del_err = store.delete_workout(intruder, created.id).unwrap_err();
        assert!(matches!(del_err, Error::NotFound { .. }));
        assert!(store.get_workout(owner, created.id).is_ok());
    }

    #[test]
    fn test_delete_cascades() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let created = store
            .create_workout(&catalog, user, today(), bench_draft(today()))
            .unwrap();
        store.delete_workout(user, created.id).unwrap();

        assert!(store.is_empty());
        assert!(store.sets_for_user(user, None, None, None).is_empty());
        let err = store.delete_workout(user, created.id).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_list_scoped_filtered_and_sorted() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        let d1 = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 7, 10).unwrap();
        let d3 = NaiveDate::from_ymd_opt(2026, 7, 20).unwrap();
        store.create_workout(&catalog, user, today(), bench_draft(d1)).unwrap();
        store.create_workout(&catalog, user, today(), bench_draft(d3)).unwrap();
        store.create_workout(&catalog, user, today(), bench_draft(d2)).unwrap();
        store.create_workout(&catalog, other, today(), bench_draft(d2)).unwrap();

        let all = store.list_workouts(user, None, None);
        assert_eq!(all.len(), 3);
        let dates: Vec<NaiveDate> = all.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![d3, d2, d1]);

        let bounded = store.list_workouts(user, Some(d2), Some(d3));
        assert_eq!(bounded.len(), 2);
    }

    #[test]
    fn test_sets_for_user_flattens_in_order() {
        let catalog = build_default_catalog();
        let mut store = WorkoutStore::new();
        let user = Uuid::new_v4();

        let d1 = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 7, 2).unwrap();
        store.create_workout(&catalog, user, today(), bench_draft(d2)).unwrap();
        store
            .create_workout(
                &catalog,
                user,
                today(),
                draft(d1, vec![entry("back_squat", 1, vec![set(1, 5, Some(dec!(100)))])]),
            )
            .unwrap();

        let records = store.sets_for_user(user, None, None, None);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].date, d1);
        assert_eq!(records[0].exercise_id, "back_squat");
        assert_eq!(records[1].date, d2);

        let filtered = store.sets_for_user(user, None, None, Some("back_squat"));
        assert_eq!(filtered.len(), 1);

        let bounded = store.sets_for_user(user, Some(d2), None, None);
        assert_eq!(bounded.len(), 3);
    }
}
