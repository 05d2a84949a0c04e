use anyhow::Context;
use clap::Parser;
use pathway_planner::domain::course::Track;
use pathway_planner::utils::{logger, validation::Validate};
use pathway_planner::{
    CliArgs, Command, LocalSnapshotStore, PlannerConfig, PlannerEngine, PlannerError,
    SnapshotStore,
};
use serde::Serialize;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => PlannerConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => PlannerConfig::default(),
    };

    if args.wants_json_logs(&config) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }
    args.apply_overrides(&mut config);

    tracing::info!("🚀 Starting pathway-planner");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    if let Err(e) = args.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&args.command, config) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }
}

fn run(command: &Command, config: PlannerConfig) -> Result<String, PlannerError> {
    let store = LocalSnapshotStore::new(&config.storage.data_dir);
    let engine = PlannerEngine::new(config)?;

    match command {
        Command::Simulate {
            student_id,
            simulation_type,
            description,
            record,
            ..
        } => {
            let habits = command.study_habits();
            if *record {
                let saved = engine.simulate_and_record(
                    &store,
                    student_id,
                    simulation_type,
                    habits,
                    description,
                )?;
                to_json(&saved)
            } else {
                let snapshot = store.load_snapshot(student_id)?;
                let input = snapshot.simulation_input(simulation_type, habits);
                to_json(&engine.simulate(&input))
            }
        }
        Command::Courses { student, subjects } => {
            let subjects = match student {
                Some(id) => store.load_snapshot(id)?.history_subject_names(),
                None => subjects.clone(),
            };
            to_json(&engine.browse_courses(&subjects))
        }
        Command::Pathway {
            student_id,
            all_records,
        } => {
            let snapshot = store.load_snapshot(student_id)?;
            to_json(&engine.pathway_courses(&snapshot, *all_records))
        }
        Command::Careers { student_id } => {
            let snapshot = store.load_snapshot(student_id)?;
            to_json(&engine.careers(&snapshot))
        }
        Command::Institution { name, ite } => {
            let track = if *ite { Track::Ite } else { Track::Polytechnic };
            to_json(&engine.institution_courses(track, name))
        }
        Command::History { student_id } => to_json(&store.simulation_history(student_id)?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, PlannerError> {
    Ok(serde_json::to_string_pretty(value)?)
}
