use std::path::{Path, PathBuf};
use std::time::Duration;

use ribbons_core::EngineConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("writing frame dump: {0}")]
    Dump(#[from] serde_json::Error),
    #[error("presenter thread exited early")]
    PresenterGone,
    #[error(transparent)]
    Platform(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Frames to simulate before exiting.
    pub frames: u64,
    /// Pace the loop to this rate; run flat out when unset.
    pub target_fps: Option<f32>,
    /// Presenter logs a summary every this many frames.
    pub present_log_interval: u64,
    /// Where to write the final frame as JSON.
    pub dump_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            frames: 600,
            target_fps: Some(60.0),
            present_log_interval: 120,
            dump_path: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let source = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&source).map_err(|source| AppError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Time one frame may take at `target_fps`. `None` runs unpaced, which
    /// includes rates whose frame time does not fit a `Duration`.
    pub fn frame_budget(&self) -> Option<Duration> {
        let fps = self.target_fps.filter(|fps| *fps > 0.0)?;
        Duration::try_from_secs_f32(1.0 / fps).ok()
    }
}
