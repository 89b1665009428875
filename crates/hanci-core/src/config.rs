//! Runtime configuration.
//!
//! Everything has a working default, so a config file is optional. The
//! grading ladder, the dictionary location, and the autosave cadence are
//! the only knobs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scheduler::{default_ladder, Rung};

/// Top-level hanci configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HanciConfig {
    /// Grading ladder, ordered shortest to longest. Rung N is selected by
    /// typing N during review.
    #[serde(default = "default_ladder")]
    pub intervals: Vec<Rung>,
    /// Dictionary file for the in-session lookup command. Absent means
    /// lookups are disabled.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
    /// Save the store after every N grading actions. `0` keeps the
    /// save-on-quit-only behavior.
    #[serde(default)]
    pub autosave_every: usize,
}

impl Default for HanciConfig {
    fn default() -> Self {
        Self {
            intervals: default_ladder(),
            dictionary: None,
            autosave_every: 0,
        }
    }
}

impl HanciConfig {
    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.intervals
                .windows(2)
                .all(|pair| pair[0].seconds <= pair[1].seconds),
            "interval ladder must be ordered shortest to longest"
        );
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `hanci.toml` in the current directory
/// 2. `~/.config/hanci/config.toml`
///
/// Environment variable override: `HANCI_DICTIONARY` replaces the
/// configured dictionary path.
pub fn load_config() -> Result<HanciConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<HanciConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("hanci.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<HanciConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => HanciConfig::default(),
    };

    if let Ok(dict) = std::env::var("HANCI_DICTIONARY") {
        config.dictionary = Some(PathBuf::from(dict));
    }

    if config.intervals.is_empty() {
        tracing::warn!("config has an empty interval ladder, using the default");
        config.intervals = default_ladder();
    }

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("hanci"))
}
