use thiserror::Error;

/// Construction-time failures. Nothing fails once a trail exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrailError {
    #[error("ribbon needs between {min} and {max} nodes, got {got}")]
    InvalidNodeCount { got: usize, min: usize, max: usize },
    #[error("trail length must be positive, got {0}")]
    InvalidLength(usize),
    #[error("width must be positive and finite, got {0}")]
    InvalidWidth(f32),
    #[error("border width {border} leaves no fill inside width {width}")]
    InvalidBorderWidth { width: f32, border: f32 },
}

pub type Result<T> = std::result::Result<T, TrailError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}
