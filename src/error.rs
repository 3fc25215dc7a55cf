use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvolveError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Invalid fitness for individual {index}: {value}")]
    InvalidFitness { index: usize, value: f64 },

    #[error("Worker failed during evaluation: {0}")]
    WorkerFailed(String),

    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EvolveError>;
