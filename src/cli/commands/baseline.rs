//! Baseline command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::BaselineArgs;
use crate::data::Table;
use crate::error::Result;
use crate::eval::stats::StatsComputer;
use crate::storage::{ArtifactStore, BaselineStore};

pub fn run_baseline(args: BaselineArgs, level: LogLevel) -> Result<()> {
    let config = args.common.resolve()?;
    let layout = config.layout();
    let dataset_path = match args.dataset {
        Some(path) => path,
        None => ArtifactStore::open(layout.models_dir()).current_dataset_path()?,
    };

    log(level, LogLevel::Normal, &format!("Computing baseline from: {}", dataset_path.display()));

    let table = Table::load(&dataset_path)?;
    let stats = StatsComputer::new(&config.columns.id, &config.columns.label).compute(&table)?;

    let store = BaselineStore::at(layout.baseline());
    store.save(&stats)?;

    for (name, s) in stats.iter() {
        log(
            level,
            LogLevel::Verbose,
            &format!("  {name:<28} mean={:<12.4} std={:<12.4} min={:<10.4} max={:.4}", s.mean, s.std, s.min, s.max),
        );
    }
    log(
        level,
        LogLevel::Normal,
        &format!("✓ Baseline for {} features saved to: {}", stats.len(), store.path().display()),
    );
    Ok(())
}
