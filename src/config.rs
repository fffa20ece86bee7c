use crate::CONFIG_DIRECTORY;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

const CONFIG_FILE: &str = "config.toml";

/// Player settings. Any field missing from the file falls back to its
/// default.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub volume: f32,
    pub volume_step: f32,
    pub poll_interval_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            volume: 0.5,
            volume_step: 0.05,
            poll_interval_ms: 500,
        }
    }
}

impl PlayerConfig {
    /// Load from the platform config directory. A missing or malformed file
    /// yields the defaults rather than an error.
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from_file(&path)) {
            Ok(config) => config,
            Err(e) => {
                debug!("using default player config: {e}");
                PlayerConfig::default()
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str::<PlayerConfig>(&file_str)?;
        Ok(config.normalized())
    }

    fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| anyhow!("no config directory"))?;
        Ok(base.join(CONFIG_DIRECTORY).join(CONFIG_FILE))
    }

    /// Clamp fields into usable ranges.
    pub(crate) fn normalized(mut self) -> Self {
        self.volume = self.volume.clamp(0.0, 1.0);
        self.volume_step = self.volume_step.clamp(0.0, 1.0);
        self.poll_interval_ms = self.poll_interval_ms.max(1);
        self
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
