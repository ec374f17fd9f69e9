/// Session settings: defaults, optional JSON file, then command-line overrides
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::controller::ChantMode;
use crate::core::engine::REVEAL_DELAY;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub reveal_delay_ms: u64,
    /// Seeds the opponent and the caption picker for a reproducible session
    pub seed: Option<u64>,
    pub music: bool,
    pub chant: ChantMode,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reveal_delay_ms: REVEAL_DELAY.as_millis() as u64,
            seed: None,
            music: false,
            chant: ChantMode::Voice,
            log_file: PathBuf::from("jokenpo.log"),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::from_json(&raw).with_context(|| format!("parsing config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}
