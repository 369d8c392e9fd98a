//! Core domain types for the repbook strength-training log.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise catalog entries and their enum-valued attributes
//! - The workout aggregate tree (workout, exercise entries, sets)
//! - Id-less draft payloads used by the write path
//! - Flattened set records exposed to the analytics engine

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Catalog Types
// ============================================================================

/// Muscle group targeted by an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
}

/// Equipment required for an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Dumbbell,
    Barbell,
    Kettlebell,
    Bodyweight,
    Machine,
}

/// Difficulty rating for an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// An exercise definition (e.g., "Barbell Bench Press")
///
/// Owned by the catalog; the store and analytics engine only reference
/// exercises by id and never mutate them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub primary_muscle: MuscleGroup,
    pub secondary_muscles: Vec<MuscleGroup>,
    pub equipment: Equipment,
    pub difficulty: Difficulty,
    pub is_bodyweight: bool,
    pub video_url: Option<String>,
}

/// The complete catalog of known exercises, keyed by exercise id
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub exercises: HashMap<String, Exercise>,
}

// ============================================================================
// Workout Aggregate Types
// ============================================================================

/// A recorded training session owned by a single user
///
/// Owns an ordered collection of [`WorkoutExercise`]; deleting a workout
/// removes the whole subtree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub duration_min: u32,
    pub notes: Option<String>,
    pub exercises: Vec<WorkoutExercise>,
}

/// One exercise slot within a workout
///
/// `order` is unique within the parent workout. Owns an ordered
/// collection of [`WorkoutSet`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: Uuid,
    pub exercise_id: String,
    pub order: u32,
    pub target_sets: u32,
    pub target_reps: u32,
    pub sets: Vec<WorkoutSet>,
}

/// One performed set
///
/// Within a workout exercise the `set_number` values always form the
/// contiguous range `1..=N`. A missing `weight_kg` means the set was
/// bodyweight/unloaded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: Uuid,
    pub set_number: u32,
    pub reps_completed: u32,
    pub weight_kg: Option<Decimal>,
    pub rpe: Option<Decimal>,
    pub rest_sec: Option<u32>,
}

// ============================================================================
// Write Payloads (id-less drafts)
// ============================================================================

/// Payload for creating a workout with its full nested tree
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutDraft {
    pub date: NaiveDate,
    pub duration_min: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<EntryDraft>,
}

/// Payload for one exercise entry inside a draft
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntryDraft {
    pub exercise_id: String,
    pub order: u32,
    pub target_sets: u32,
    pub target_reps: u32,
    #[serde(default)]
    pub sets: Vec<SetDraft>,
}

/// Payload for one set inside a draft
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetDraft {
    pub set_number: u32,
    pub reps_completed: u32,
    #[serde(default)]
    pub weight_kg: Option<Decimal>,
    #[serde(default)]
    pub rpe: Option<Decimal>,
    #[serde(default)]
    pub rest_sec: Option<u32>,
}

/// Payload for a full workout update
///
/// When `exercises` is `None` the existing subtree is kept untouched;
/// when `Some`, the entire subtree is replaced from the payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutUpdate {
    pub date: NaiveDate,
    pub duration_min: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Option<Vec<EntryDraft>>,
}

// ============================================================================
// Read Surface Types
// ============================================================================

/// A single set flattened out of the aggregate tree
///
/// The analytics engine and CSV export consume these instead of walking
/// the tree themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct SetRecord {
    pub date: NaiveDate,
    pub workout_id: Uuid,
    pub exercise_id: String,
    pub set_number: u32,
    pub reps: u32,
    pub weight_kg: Option<Decimal>,
    pub rpe: Option<Decimal>,
    pub rest_sec: Option<u32>,
}
