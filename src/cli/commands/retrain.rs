//! Retrain command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::RetrainArgs;
use crate::error::Result;
use crate::eval::retrain::{EventLogSource, RetrainOrchestrator, RetrainTargets};
use crate::storage::{ArtifactStore, JsonDirRunHistory};
use crate::tracking::{ExperimentTracker, JsonFileBackend};
use crate::train::TrainEvalStage;

pub fn run_retrain(args: RetrainArgs, level: LogLevel) -> Result<()> {
    let mut config = args.common.resolve()?;
    if let Some(n) = args.n_estimators {
        config.training.forest.n_estimators = n;
    }
    if let Some(seed) = args.seed {
        config.training.forest.random_state = seed;
    }
    config.validate()?;

    let layout = config.layout();
    let events = args.events.unwrap_or_else(|| layout.events());
    log(level, LogLevel::Normal, &format!("Retraining from: {}", events.display()));

    let mut stage = TrainEvalStage::new(config.training.forest.clone(), config.training.test_size)
        .with_columns(&config.columns.id, &config.columns.label);
    if config.tracking.enabled && !args.no_tracking {
        let backend = JsonFileBackend::for_experiment(layout.tracking_dir(), &config.tracking.experiment);
        stage = stage.with_observer(Box::new(ExperimentTracker::new(config.tracking.experiment.clone(), backend)));
    }

    let mut orchestrator = RetrainOrchestrator::new(
        EventLogSource::new(&events),
        JsonDirRunHistory::open(layout.history_dir()),
        ArtifactStore::open(layout.models_dir()),
        stage,
        RetrainTargets { work_dir: layout.work_dir() },
    );

    let outcome = orchestrator.run_with_progress(|stage| {
        log(
            level,
            LogLevel::Normal,
            &format!("Step {}/4: {}...", stage.number(), stage.description()),
        );
    })?;

    log(
        level,
        LogLevel::Verbose,
        &format!("Trained on {} rows, evaluated on {}", outcome.train.n_train, outcome.train.n_test),
    );
    log(level, LogLevel::Normal, &outcome.train.report().to_string());
    if let Some(tracked) = &outcome.train.tracking_run {
        log(level, LogLevel::Verbose, &format!("Tracked as run: {tracked}"));
    }
    log(level, LogLevel::Normal, &format!("✓ Run {} recorded", outcome.run.id));
    log(level, LogLevel::Normal, &format!("✓ Published model version: {}", outcome.version));
    log(level, LogLevel::Verbose, &format!("Dataset: {}", outcome.dataset.display()));
    Ok(())
}
