#![forbid(unsafe_code)]

//! Core domain model and business logic for the repbook strength log.
//!
//! This crate provides:
//! - Domain types (exercises, workouts, exercise entries, sets)
//! - The built-in exercise catalog
//! - The workout aggregate store and its structural invariants
//! - Training analytics (volume, top sets, 1RM trends, consistency)
//! - Snapshot persistence and CSV export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod persist;
pub mod stats;
pub mod csv_export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use store::WorkoutStore;
pub use stats::{
    compute_volume, consistency, estimated_1rm, one_rm_trend, top_sets, ConsistencyReport,
    DailyVolume, OneRmPoint, OneRmTrend, TopSet, VolumeReport,
};
pub use csv_export::export_sets_csv;
