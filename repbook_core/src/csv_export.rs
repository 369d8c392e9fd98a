//! CSV export of a user's set history.
//!
//! Writes one row per recorded set, with derived volume and estimated 1RM
//! columns, fsynced before returning.

use crate::stats::{estimated_1rm, MAX_VOLUME_RANGE_DAYS};
use crate::{Catalog, Error, Result, WorkoutStore};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::Path;
use uuid::Uuid;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    workout_id: String,
    exercise_id: String,
    exercise_name: String,
    set_number: u32,
    reps: u32,
    weight_kg: Option<Decimal>,
    rpe: Option<Decimal>,
    rest_sec: Option<u32>,
    volume: Decimal,
    estimated_1rm: Decimal,
}

/// Export a user's sets in the given range to a CSV file
///
/// Returns the number of rows written. The file is created or truncated,
/// headers are always written, and the output is synced to disk.
pub fn export_sets_csv(
    store: &WorkoutStore,
    catalog: &Catalog,
    user: Uuid,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    path: &Path,
) -> Result<usize> {
    if let (Some(from), Some(to)) = (date_from, date_to) {
        if from > to {
            return Err(Error::validation(
                "date_from",
                format!("{} is after date_to {}", from, to),
            ));
        }
        let days = (to - from).num_days();
        if days > MAX_VOLUME_RANGE_DAYS {
            return Err(Error::Range {
                analytic: "export",
                days,
                max_days: MAX_VOLUME_RANGE_DAYS,
            });
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let records = store.sets_for_user(user, date_from, date_to, None);
    let mut writer = csv::Writer::from_writer(File::create(path)?);

    for record in &records {
        let exercise_name = catalog
            .exercise(&record.exercise_id)
            .map(|e| e.name.clone())
            .unwrap_or_default();
        writer.serialize(CsvRow {
            date: record.date.to_string(),
            workout_id: record.workout_id.to_string(),
            exercise_id: record.exercise_id.clone(),
            exercise_name,
            set_number: record.set_number,
            reps: record.reps,
            weight_kg: record.weight_kg,
            rpe: record.rpe,
            rest_sec: record.rest_sec,
            volume: record
                .weight_kg
                .map(|w| w * Decimal::from(record.reps))
                .unwrap_or(Decimal::ZERO),
            estimated_1rm: estimated_1rm(record.weight_kg, record.reps),
        })?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} sets to {:?}", records.len(), path);
    Ok(records.len())
}
