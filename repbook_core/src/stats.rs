//! Training analytics over a user's historical sets.
//!
//! Stateless computations on the store's read surface: volume aggregation,
//! top-set ranking, Epley 1RM estimation with trend tracking, and
//! consistency/streak statistics. Nothing here mutates stored data, and all
//! weight/volume arithmetic is fixed-point `Decimal`.

use crate::{Catalog, Error, Result, WorkoutStore};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use uuid::Uuid;

/// Widest allowed date span for volume, top-set and export queries
pub const MAX_VOLUME_RANGE_DAYS: i64 = 730;
/// Widest allowed date span for the 1RM trend
pub const MAX_TREND_RANGE_DAYS: i64 = 365;
/// Top-set limit used when the caller does not pass one
pub const DEFAULT_TOP_SET_LIMIT: usize = 10;
const MAX_TOP_SET_LIMIT: usize = 100;

/// Aggregated training volume over a date range
#[derive(Clone, Debug, serde::Serialize)]
pub struct VolumeReport {
    pub total_volume: Decimal,
    pub average_daily_volume: Decimal,
    pub workout_count: usize,
    pub daily_volumes: Vec<DailyVolume>,
}

/// Summed volume for one calendar date
#[derive(Clone, Debug, serde::Serialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub volume: Decimal,
    pub exercise_id: Option<String>,
}

/// One entry in a top-set ranking
#[derive(Clone, Debug, serde::Serialize)]
pub struct TopSet {
    pub date: NaiveDate,
    pub exercise_id: String,
    pub weight_kg: Decimal,
    pub reps: u32,
    pub volume: Decimal,
    pub workout_id: Uuid,
    pub estimated_1rm: Decimal,
}

/// Estimated-1RM progression for one exercise
#[derive(Clone, Debug, serde::Serialize)]
pub struct OneRmTrend {
    pub current_estimated_1rm: Option<Decimal>,
    pub max_estimated_1rm: Option<Decimal>,
    pub improvement: Option<Decimal>,
    pub improvement_percentage: Option<Decimal>,
    pub data_points: Vec<OneRmPoint>,
}

/// One qualifying set in a 1RM trend, chronological
#[derive(Clone, Debug, serde::Serialize)]
pub struct OneRmPoint {
    pub date: NaiveDate,
    pub estimated_1rm: Decimal,
    pub weight_kg: Decimal,
    pub reps: u32,
    pub workout_id: Uuid,
}

/// Training consistency over a trailing window
#[derive(Clone, Debug, serde::Serialize)]
pub struct ConsistencyReport {
    pub total_workouts: usize,
    pub active_days: usize,
    pub consistency_percentage: Decimal,
    pub average_workouts_per_week: Decimal,
    pub longest_streak_days: u32,
    pub current_streak_days: u32,
}

/// Epley estimate: `weight × (1 + reps/30)`
///
/// A single rep is already a measured 1RM, so it returns the weight
/// unchanged. Returns 0 when weight is absent or non-positive, or reps
/// is 0. This is an estimate derived from a higher-rep set, not measured
/// strength.
pub fn estimated_1rm(weight: Option<Decimal>, reps: u32) -> Decimal {
    let weight = match weight {
        Some(w) if w > Decimal::ZERO => w,
        _ => return Decimal::ZERO,
    };
    match reps {
        0 => Decimal::ZERO,
        1 => weight,
        _ => weight * (Decimal::ONE + Decimal::from(reps) / Decimal::from(30)),
    }
}

/// Total and per-day training volume for a user
///
/// Set volume is `weight × reps` when weight is present, 0 otherwise; a
/// weightless set still counts its workout toward `workout_count`.
/// `average_daily_volume` is only defined when both bounds are given.
pub fn compute_volume(
    store: &WorkoutStore,
    catalog: &Catalog,
    user: Uuid,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    exercise: Option<&str>,
) -> Result<VolumeReport> {
    check_range(date_from, date_to, MAX_VOLUME_RANGE_DAYS, "volume")?;
    if let Some(id) = exercise {
        catalog.require(id)?;
    }

    let records = store.sets_for_user(user, date_from, date_to, exercise);

    let mut total = Decimal::ZERO;
    let mut daily: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    let mut workout_ids: HashSet<Uuid> = HashSet::new();

    for record in &records {
        workout_ids.insert(record.workout_id);
        let volume = record
            .weight_kg
            .map(|w| w * Decimal::from(record.reps))
            .unwrap_or(Decimal::ZERO);
        total += volume;
        *daily.entry(record.date).or_insert(Decimal::ZERO) += volume;
    }

    let average_daily_volume = match (date_from, date_to) {
        (Some(from), Some(to)) => {
            let dayspan = (to - from).num_days() + 1;
            total / Decimal::from(dayspan)
        }
        _ => Decimal::ZERO,
    };

    tracing::debug!(
        "Volume for user {}: {} over {} workouts",
        user,
        total,
        workout_ids.len()
    );

    Ok(VolumeReport {
        total_volume: total,
        average_daily_volume,
        workout_count: workout_ids.len(),
        daily_volumes: daily
            .into_iter()
            .map(|(date, volume)| DailyVolume {
                date,
                volume,
                exercise_id: exercise.map(str::to_string),
            })
            .collect(),
    })
}

/// Heaviest sets for a user, ranked by weight then reps descending
///
/// Only sets with a recorded weight and at least one rep qualify. Ties
/// beyond (weight, reps) keep the store's stable chronological order.
/// `limit` defaults to 10 and is clamped to `[1, 100]`.
pub fn top_sets(
    store: &WorkoutStore,
    catalog: &Catalog,
    user: Uuid,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    exercise: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<TopSet>> {
    check_range(date_from, date_to, MAX_VOLUME_RANGE_DAYS, "top sets")?;
    if let Some(id) = exercise {
        catalog.require(id)?;
    }
    let limit = limit
        .unwrap_or(DEFAULT_TOP_SET_LIMIT)
        .clamp(1, MAX_TOP_SET_LIMIT);

    let mut ranked: Vec<TopSet> = store
        .sets_for_user(user, date_from, date_to, exercise)
        .into_iter()
        .filter_map(|record| {
            let weight = record.weight_kg?;
            if record.reps == 0 {
                return None;
            }
            Some(TopSet {
                date: record.date,
                exercise_id: record.exercise_id,
                weight_kg: weight,
                reps: record.reps,
                volume: weight * Decimal::from(record.reps),
                workout_id: record.workout_id,
                estimated_1rm: estimated_1rm(Some(weight), record.reps),
            })
        })
        .collect();

    // Stable sort keeps input order for full ties.
    ranked.sort_by(|a, b| {
        b.weight_kg
            .cmp(&a.weight_kg)
            .then_with(|| b.reps.cmp(&a.reps))
    });
    ranked.truncate(limit);
    Ok(ranked)
}

/// Estimated-1RM trend for one exercise
///
/// `current` is the chronologically latest qualifying set, tracked
/// separately from the running `max`; improvement is measured against the
/// chronologically earliest point.
pub fn one_rm_trend(
    store: &WorkoutStore,
    catalog: &Catalog,
    user: Uuid,
    exercise: &str,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> Result<OneRmTrend> {
    check_range(date_from, date_to, MAX_TREND_RANGE_DAYS, "1RM trend")?;
    catalog.require(exercise)?;

    let data_points: Vec<OneRmPoint> = store
        .sets_for_user(user, date_from, date_to, Some(exercise))
        .into_iter()
        .filter_map(|record| {
            let weight = record.weight_kg?;
            if record.reps == 0 {
                return None;
            }
            Some(OneRmPoint {
                date: record.date,
                estimated_1rm: estimated_1rm(Some(weight), record.reps),
                weight_kg: weight,
                reps: record.reps,
                workout_id: record.workout_id,
            })
        })
        .collect();

    let (first, last) = match (data_points.first(), data_points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Ok(OneRmTrend {
                current_estimated_1rm: None,
                max_estimated_1rm: None,
                improvement: None,
                improvement_percentage: None,
                data_points: Vec::new(),
            })
        }
    };

    let max = data_points
        .iter()
        .map(|p| p.estimated_1rm)
        .fold(Decimal::ZERO, Decimal::max);
    let current = last.estimated_1rm;
    let earliest = first.estimated_1rm;
    let improvement = current - earliest;
    let improvement_percentage = if data_points.len() >= 2 && earliest > Decimal::ZERO {
        Some(improvement / earliest * Decimal::from(100))
    } else {
        None
    };

    Ok(OneRmTrend {
        current_estimated_1rm: Some(current),
        max_estimated_1rm: Some(max),
        improvement: Some(improvement),
        improvement_percentage,
        data_points,
    })
}

/// Workout consistency over the trailing `window_days` ending today
///
/// Streaks are maximal runs of consecutive active calendar dates; the
/// current streak only counts when its final day is `today` itself.
pub fn consistency(
    store: &WorkoutStore,
    user: Uuid,
    today: NaiveDate,
    window_days: u32,
) -> Result<ConsistencyReport> {
    if window_days == 0 {
        return Err(Error::validation("window_days", "must be positive"));
    }

    let from = today - Duration::days(i64::from(window_days));
    let dates = store.workout_dates_for_user(user, Some(from), Some(today));
    let total_workouts = dates.len();
    let active: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let window = Decimal::from(window_days);
    let consistency_percentage =
        (Decimal::from(active.len()) / window * Decimal::from(100)).round_dp(2);
    let average_workouts_per_week =
        (Decimal::from(total_workouts) / window * Decimal::from(7)).round_dp(2);

    // Single walk over the sorted distinct dates: extend the run while the
    // gap is exactly one day, otherwise start over.
    let mut longest: u32 = 0;
    let mut run: u32 = 0;
    let mut prev: Option<NaiveDate> = None;
    for date in &active {
        run = match prev {
            Some(p) if (*date - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(*date);
    }
    let current = if prev == Some(today) { run } else { 0 };

    Ok(ConsistencyReport {
        total_workouts,
        active_days: active.len(),
        consistency_percentage,
        average_workouts_per_week,
        longest_streak_days: longest,
        current_streak_days: current,
    })
}

/// Shared range checks: bounds must be ordered and, when both are present,
/// must not span more than `max_days`
fn check_range(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    max_days: i64,
    analytic: &'static str,
) -> Result<()> {
    if let (Some(from), Some(to)) = (date_from, date_to) {
        if from > to {
            return Err(Error::validation(
                "date_from",
                format!("{} is after date_to {}", from, to),
            ));
        }
        let days = (to - from).num_days();
        if days > max_days {
            return Err(Error::Range {
                analytic,
                days,
                max_days,
            });
        }
    }
    Ok(())
}
