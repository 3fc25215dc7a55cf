use super::traits::ConfigSection;
use crate::error::EvolveError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub generations: usize,
    pub verbose: bool,
    /// Where the binary writes the best-per-generation history as JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            verbose: true,
            history_path: None,
        }
    }
}

impl ConfigSection for RunConfig {
    fn section_name() -> &'static str {
        "run"
    }

    fn validate(&self) -> Result<(), EvolveError> {
        if let Some(path) = &self.history_path {
            if path.as_os_str().is_empty() {
                return Err(EvolveError::Configuration(
                    "History path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
