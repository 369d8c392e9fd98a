use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use repbook_core::*;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "repbook")]
#[command(about = "Strength training logbook and analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Act as this user id (overrides the configured identity)
    #[arg(long, global = true)]
    user: Option<Uuid>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a new workout from a JSON payload file
    Log {
        /// Path to a workout draft JSON file
        #[arg(long)]
        file: PathBuf,
    },

    /// Replace a workout from a JSON payload file
    Edit {
        workout_id: Uuid,

        /// Path to a workout update JSON file
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a workout and its whole exercise/set tree
    Rm { workout_id: Uuid },

    /// Show one workout in full
    Show { workout_id: Uuid },

    /// List workouts, newest first
    List {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Training volume report
    Volume {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        /// Restrict to one exercise id
        #[arg(long)]
        exercise: Option<String>,
    },

    /// Heaviest sets, ranked by weight then reps
    TopSets {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long)]
        exercise: Option<String>,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Estimated 1RM trend for one exercise
    OneRm {
        exercise: String,

        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Consistency and streaks over a trailing window
    Consistency {
        /// Window length in days (defaults to the configured value)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Export set history to CSV
    Export {
        #[arg(long)]
        out: PathBuf,

        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// List the exercise catalog
    Exercises,
}

fn main() {
    repbook_core::logging::init();

    if let Err(e) = run() {
        eprintln!("error ({}): {}", e.kind(), e);
        // Distinct exit codes per error kind so scripts can branch on them.
        let code = match e.kind() {
            "validation" => 2,
            "not_found" => 3,
            "forbidden" => 4,
            "range" => 5,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let user = resolve_user(cli.user, &mut config)?;
    let snapshot = data_dir.join("workouts.json");
    tracing::debug!("Acting as user {} with snapshot {:?}", user, snapshot);

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("catalog error: {}", error);
        }
        return Err(Error::Config("Invalid exercise catalog".into()));
    }

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Log { file } => cmd_log(&snapshot, catalog, user, today, &file),
        Commands::Edit { workout_id, file } => {
            cmd_edit(&snapshot, catalog, user, today, workout_id, &file)
        }
        Commands::Rm { workout_id } => cmd_rm(&snapshot, user, workout_id),
        Commands::Show { workout_id } => cmd_show(&snapshot, catalog, user, workout_id),
        Commands::List { from, to } => cmd_list(&snapshot, user, from, to),
        Commands::Volume { from, to, exercise } => {
            cmd_volume(&snapshot, catalog, user, from, to, exercise.as_deref())
        }
        Commands::TopSets {
            from,
            to,
            exercise,
            limit,
        } => {
            let limit = limit.or(Some(config.analytics.top_set_limit));
            cmd_top_sets(&snapshot, catalog, user, from, to, exercise.as_deref(), limit)
        }
        Commands::OneRm { exercise, from, to } => {
            cmd_one_rm(&snapshot, catalog, user, &exercise, from, to)
        }
        Commands::Consistency { days } => {
            let days = days.unwrap_or(config.analytics.consistency_window_days);
            cmd_consistency(&snapshot, user, today, days)
        }
        Commands::Export { out, from, to } => cmd_export(&snapshot, catalog, user, from, to, &out),
        Commands::Exercises => cmd_exercises(catalog),
    }
}

/// Pick the acting user: CLI flag, then config, then a fresh identity
/// persisted to the config file on first run
fn resolve_user(flag: Option<Uuid>, config: &mut Config) -> Result<Uuid> {
    if let Some(user) = flag {
        return Ok(user);
    }
    if let Some(user) = config.user.id {
        return Ok(user);
    }

    let user = Uuid::new_v4();
    config.user.id = Some(user);
    config.save()?;
    println!("Registered new user identity: {}", user);
    Ok(user)
}

fn cmd_log(
    snapshot: &Path,
    catalog: &Catalog,
    user: Uuid,
    today: NaiveDate,
    file: &Path,
) -> Result<()> {
    let contents = std::fs::read_to_string(file)?;
    let draft: WorkoutDraft = serde_json::from_str(&contents)?;

    let workout = WorkoutStore::update(snapshot, |store| {
        store.create_workout(catalog, user, today, draft)
    })?;

    let sets: usize = workout.exercises.iter().map(|e| e.sets.len()).sum();
    println!("✓ Logged workout {}", workout.id);
    println!(
        "  {} | {} min | {} exercises, {} sets",
        workout.date,
        workout.duration_min,
        workout.exercises.len(),
        sets
    );
    Ok(())
}

fn cmd_edit(
    snapshot: &Path,
    catalog: &Catalog,
    user: Uuid,
    today: NaiveDate,
    workout_id: Uuid,
    file: &Path,
) -> Result<()> {
    let contents = std::fs::read_to_string(file)?;
    let update: WorkoutUpdate = serde_json::from_str(&contents)?;
    let replaced_subtree = update.exercises.is_some();

    let workout = WorkoutStore::update(snapshot, |store| {
        store.replace_workout(catalog, user, workout_id, today, update)
    })?;

    println!("✓ Updated workout {}", workout.id);
    if replaced_subtree {
        println!("  Replaced exercise tree ({} exercises)", workout.exercises.len());
    }
    Ok(())
}

fn cmd_rm(snapshot: &Path, user: Uuid, workout_id: Uuid) -> Result<()> {
    WorkoutStore::update(snapshot, |store| store.delete_workout(user, workout_id))?;
    println!("✓ Deleted workout {}", workout_id);
    Ok(())
}

fn cmd_show(snapshot: &Path, catalog: &Catalog, user: Uuid, workout_id: Uuid) -> Result<()> {
    let store = WorkoutStore::load(snapshot)?;
    let workout = store.get_workout(user, workout_id)?;
    display_workout(workout, catalog);
    Ok(())
}

fn cmd_list(
    snapshot: &Path,
    user: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let store = WorkoutStore::load(snapshot)?;
    let workouts = store.list_workouts(user, from, to);

    if workouts.is_empty() {
        println!("No workouts found.");
        return Ok(());
    }

    for workout in workouts {
        let sets: usize = workout.exercises.iter().map(|e| e.sets.len()).sum();
        println!(
            "{}  {}  {:>3} min  {} exercises, {} sets",
            workout.date,
            workout.id,
            workout.duration_min,
            workout.exercises.len(),
            sets
        );
    }
    Ok(())
}

fn cmd_volume(
    snapshot: &Path,
    catalog: &Catalog,
    user: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    exercise: Option<&str>,
) -> Result<()> {
    let store = WorkoutStore::load(snapshot)?;
    let report = compute_volume(&store, catalog, user, from, to, exercise)?;

    println!("Total volume:   {} kg", report.total_volume.round_dp(2));
    println!(
        "Daily average:  {} kg",
        report.average_daily_volume.round_dp(2)
    );
    println!("Workouts:       {}", report.workout_count);
    for day in &report.daily_volumes {
        println!("  {}  {} kg", day.date, day.volume.round_dp(2));
    }
    Ok(())
}

fn cmd_top_sets(
    snapshot: &Path,
    catalog: &Catalog,
    user: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    exercise: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    let store = WorkoutStore::load(snapshot)?;
    let ranked = top_sets(&store, catalog, user, from, to, exercise, limit)?;

    if ranked.is_empty() {
        println!("No weighted sets found.");
        return Ok(());
    }

    for (i, set) in ranked.iter().enumerate() {
        let name = catalog
            .exercise(&set.exercise_id)
            .map(|e| e.name.as_str())
            .unwrap_or(set.exercise_id.as_str());
        println!(
            "{:>3}. {}  {} kg × {}  (e1RM {} kg)  {}",
            i + 1,
            set.date,
            set.weight_kg,
            set.reps,
            set.estimated_1rm.round_dp(2),
            name
        );
    }
    Ok(())
}

fn cmd_one_rm(
    snapshot: &Path,
    catalog: &Catalog,
    user: Uuid,
    exercise: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let store = WorkoutStore::load(snapshot)?;
    let trend = one_rm_trend(&store, catalog, user, exercise, from, to)?;

    let name = catalog
        .exercise(exercise)
        .map(|e| e.name.as_str())
        .unwrap_or(exercise);
    println!("Estimated 1RM trend: {}", name);

    match (trend.current_estimated_1rm, trend.max_estimated_1rm) {
        (Some(current), Some(max)) => {
            println!("  Current: {} kg", current.round_dp(2));
            println!("  Best:    {} kg", max.round_dp(2));
            if let Some(improvement) = trend.improvement {
                match trend.improvement_percentage {
                    Some(pct) => println!(
                        "  Change:  {} kg ({}%)",
                        improvement.round_dp(2),
                        pct.round_dp(2)
                    ),
                    None => println!("  Change:  {} kg", improvement.round_dp(2)),
                }
            }
            for point in &trend.data_points {
                println!(
                    "  {}  {} kg × {}  →  {} kg",
                    point.date,
                    point.weight_kg,
                    point.reps,
                    point.estimated_1rm.round_dp(2)
                );
            }
        }
        _ => println!("  No weighted sets recorded."),
    }
    Ok(())
}

fn cmd_consistency(snapshot: &Path, user: Uuid, today: NaiveDate, days: u32) -> Result<()> {
    let store = WorkoutStore::load(snapshot)?;
    let report = consistency(&store, user, today, days)?;

    println!("Consistency over the last {} days:", days);
    println!("  Workouts:        {}", report.total_workouts);
    println!("  Active days:     {}", report.active_days);
    println!("  Consistency:     {}%", report.consistency_percentage);
    println!("  Per week:        {}", report.average_workouts_per_week);
    println!("  Longest streak:  {} days", report.longest_streak_days);
    println!("  Current streak:  {} days", report.current_streak_days);
    Ok(())
}

fn cmd_export(
    snapshot: &Path,
    catalog: &Catalog,
    user: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    out: &Path,
) -> Result<()> {
    let store = WorkoutStore::load(snapshot)?;
    let count = export_sets_csv(&store, catalog, user, from, to, out)?;
    println!("✓ Exported {} sets to {}", count, out.display());
    Ok(())
}

fn cmd_exercises(catalog: &Catalog) -> Result<()> {
    let mut exercises: Vec<&Exercise> = catalog.exercises.values().collect();
    exercises.sort_by(|a, b| a.id.cmp(&b.id));

    for ex in exercises {
        println!(
            "{:<22} {:<28} {:?} / {:?} / {:?}",
            ex.id, ex.name, ex.primary_muscle, ex.equipment, ex.difficulty
        );
    }
    Ok(())
}

fn display_workout(workout: &Workout, catalog: &Catalog) {
    println!("Workout {}", workout.id);
    println!("  Date:     {}", workout.date);
    println!("  Duration: {} min", workout.duration_min);
    if let Some(ref notes) = workout.notes {
        println!("  Notes:    {}", notes);
    }

    for entry in &workout.exercises {
        let name = catalog
            .exercise(&entry.exercise_id)
            .map(|e| e.name.as_str())
            .unwrap_or(entry.exercise_id.as_str());
        println!(
            "  {}. {} (target {}×{})",
            entry.order, name, entry.target_sets, entry.target_reps
        );
        for set in &entry.sets {
            let weight = set
                .weight_kg
                .map(|w| format!("{} kg", w))
                .unwrap_or_else(|| "bodyweight".into());
            let rpe = set
                .rpe
                .map(|r| format!("  RPE {}", r))
                .unwrap_or_default();
            println!("     set {}: {} × {}{}", set.set_number, weight, set.reps_completed, rpe);
        }
    }
}
