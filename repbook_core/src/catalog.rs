//! Built-in exercise catalog.
//!
//! The catalog is read-only to the rest of the system: the workout store
//! only checks that referenced exercise ids exist, and analytics only
//! reads names for reports.

use crate::{Catalog, Difficulty, Equipment, Error, Exercise, MuscleGroup, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Video hosts accepted for exercise reference links
const ALLOWED_VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com"];

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Construct an exercise, forcing the bodyweight flag for bodyweight equipment
fn exercise(
    id: &str,
    name: &str,
    primary_muscle: MuscleGroup,
    secondary_muscles: Vec<MuscleGroup>,
    equipment: Equipment,
    difficulty: Difficulty,
    video_url: Option<&str>,
) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        primary_muscle,
        secondary_muscles,
        equipment,
        difficulty,
        is_bodyweight: equipment == Equipment::Bodyweight,
        video_url: video_url.map(Into::into),
    }
}

/// Builds the default catalog of common strength exercises
pub fn build_default_catalog() -> Catalog {
    let mut exercises = HashMap::new();

    for ex in [
        exercise(
            "barbell_bench_press",
            "Barbell Bench Press",
            MuscleGroup::Chest,
            vec![MuscleGroup::Shoulders, MuscleGroup::Arms],
            Equipment::Barbell,
            Difficulty::Medium,
            Some("https://www.youtube.com/watch?v=rT7DgCr-3pg"),
        ),
        exercise(
            "back_squat",
            "Barbell Back Squat",
            MuscleGroup::Legs,
            vec![MuscleGroup::Back],
            Equipment::Barbell,
            Difficulty::Hard,
            Some("https://www.youtube.com/watch?v=ultWZbUMPL8"),
        ),
        exercise(
            "deadlift",
            "Conventional Deadlift",
            MuscleGroup::Back,
            vec![MuscleGroup::Legs],
            Equipment::Barbell,
            Difficulty::Hard,
            Some("https://www.youtube.com/watch?v=op9kVnSso6Q"),
        ),
        exercise(
            "overhead_press",
            "Standing Overhead Press",
            MuscleGroup::Shoulders,
            vec![MuscleGroup::Arms],
            Equipment::Barbell,
            Difficulty::Medium,
            None,
        ),
        exercise(
            "barbell_row",
            "Barbell Row",
            MuscleGroup::Back,
            vec![MuscleGroup::Arms],
            Equipment::Barbell,
            Difficulty::Medium,
            None,
        ),
        exercise(
            "pullup",
            "Pull-up",
            MuscleGroup::Back,
            vec![MuscleGroup::Arms],
            Equipment::Bodyweight,
            Difficulty::Hard,
            Some("https://www.youtube.com/watch?v=eGo4IYlbE5g"),
        ),
        exercise(
            "pushup",
            "Push-up",
            MuscleGroup::Chest,
            vec![MuscleGroup::Shoulders, MuscleGroup::Arms],
            Equipment::Bodyweight,
            Difficulty::Easy,
            None,
        ),
        exercise(
            "dumbbell_curl",
            "Dumbbell Curl",
            MuscleGroup::Arms,
            vec![],
            Equipment::Dumbbell,
            Difficulty::Easy,
            None,
        ),
        exercise(
            "leg_press",
            "Leg Press",
            MuscleGroup::Legs,
            vec![],
            Equipment::Machine,
            Difficulty::Easy,
            None,
        ),
        exercise(
            "kettlebell_swing",
            "Kettlebell Swing",
            MuscleGroup::Legs,
            vec![MuscleGroup::Back, MuscleGroup::Shoulders],
            Equipment::Kettlebell,
            Difficulty::Medium,
            Some("https://www.youtube.com/watch?v=YSxHifyI6s8"),
        ),
    ] {
        exercises.insert(ex.id.clone(), ex);
    }

    Catalog { exercises }
}

impl Catalog {
    /// Look up an exercise by id
    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.get(id)
    }

    /// Look up an exercise by id, failing with `NotFound` when absent
    pub fn require(&self, id: &str) -> Result<&Exercise> {
        self.exercises.get(id).ok_or_else(|| Error::NotFound {
            entity: "exercise",
            id: id.to_string(),
        })
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (id, ex) in &self.exercises {
            if id.is_empty() || ex.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            }
            if id != &ex.id {
                errors.push(format!(
                    "Exercise key '{}' doesn't match exercise.id '{}'",
                    id, ex.id
                ));
            }
            if ex.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", id));
            }

            // Primary muscle must not repeat in the secondary list
            if ex.secondary_muscles.contains(&ex.primary_muscle) {
                errors.push(format!(
                    "Exercise '{}' lists primary muscle {:?} among its secondary muscles",
                    id, ex.primary_muscle
                ));
            }

            if ex.equipment == Equipment::Bodyweight && !ex.is_bodyweight {
                errors.push(format!(
                    "Exercise '{}' uses bodyweight equipment but is_bodyweight is false",
                    id
                ));
            }

            if let Some(ref url) = ex.video_url {
                if !ALLOWED_VIDEO_HOSTS.iter().any(|host| url.contains(host)) {
                    errors.push(format!(
                        "Exercise '{}' video URL '{}' is not on an allowed host",
                        id, url
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_bodyweight_flag_forced() {
        let catalog = build_default_catalog();
        let pullup = catalog.exercise("pullup").unwrap();
        assert_eq!(pullup.equipment, Equipment::Bodyweight);
        assert!(pullup.is_bodyweight);

        let bench = catalog.exercise("barbell_bench_press").unwrap();
        assert!(!bench.is_bodyweight);
    }

    #[test]
    fn test_primary_in_secondary_rejected() {
        let mut catalog = build_default_catalog();
        let curl = catalog.exercises.get_mut("dumbbell_curl").unwrap();
        curl.secondary_muscles.push(MuscleGroup::Arms);

        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("secondary muscles")));
    }

    #[test]
    fn test_disallowed_video_host_rejected() {
        let mut catalog = build_default_catalog();
        let squat = catalog.exercises.get_mut("back_squat").unwrap();
        squat.video_url = Some("https://example.com/watch?v=abc".into());

        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("allowed host")));
    }

    #[test]
    fn test_require_unknown_exercise() {
        let catalog = build_default_catalog();
        let err = catalog.require("zercher_squat").unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "exercise", .. }));
    }

    #[test]
    fn test_cached_catalog_matches_built() {
        let built = build_default_catalog();
        let cached = get_default_catalog();
        assert_eq!(built.exercises.len(), cached.exercises.len());
    }
}
