use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ribbons_core::TrailEngine;
use ribbons_platform::HeadlessSink;

mod presenter;
mod settings;

use crate::presenter::Presenter;
use crate::settings::{AppConfig, AppError};

fn main() {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(filter)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Ribbons starting");
    if let Err(e) = run_app(std::env::args_os().nth(1).map(PathBuf::from)) {
        eprintln!("Ribbons error: {e}");
        std::process::exit(1);
    }
}

fn run_app(config_path: Option<PathBuf>) -> Result<(), AppError> {
    let config = match &config_path {
        Some(path) => {
            info!("loading config from {}", path.display());
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };

    let mut sink = HeadlessSink::new();
    let mut engine = TrailEngine::new(config.engine.clone());
    engine.populate(&mut sink)?;
    info!(
        "{} ribbons, {} chains, {} vertex floats",
        engine.ribbon_count(),
        engine.chain_count(),
        sink.vertex_float_count()
    );

    let frame_budget = config.frame_budget();
    if frame_budget.is_none() && config.target_fps.is_some() {
        warn!("target_fps {:?} is not a usable rate; running unpaced", config.target_fps);
    }

    let mut presenter = Presenter::spawn(config.present_log_interval);
    for _ in 0..config.frames {
        let started = Instant::now();
        engine.advance(&mut sink);
        presenter.submit(engine.frame(), &sink)?;
        if let Some(budget) = frame_budget {
            if let Some(rest) = budget.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let last = presenter.finish()?;
    info!("Ribbons finished after {} frames", engine.frame());

    if let Some(path) = &config.dump_path {
        match &last {
            Some(snapshot) => {
                let json = serde_json::to_string_pretty(snapshot)?;
                std::fs::write(path, json).map_err(|source| AppError::Io {
                    path: path.clone(),
                    source,
                })?;
                info!("wrote frame {} to {}", snapshot.frame, path.display());
            }
            None => warn!("no frame was presented; skipping dump"),
        }
    }
    Ok(())
}
