use crate::query::DEFAULT_PARALLEL_THRESHOLD;
use crate::tree::types::{Symbol, TreeConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "fxtree";
const CONFIG_FILE: &str = "config.json";

/// User configuration stored in the config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sentinel appended when a tree is finished. Unset means a reserved
    /// symbol that cannot occur in any input.
    #[serde(default)]
    pub terminator: Option<char>,

    /// Colored terminal output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Query batches at least this large are searched in parallel
    #[serde(default = "default_parallel_search_threshold")]
    pub parallel_search_threshold: usize,
}

fn default_color() -> bool {
    true
}

fn default_parallel_search_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            terminator: None,
            color: default_color(),
            parallel_search_threshold: default_parallel_search_threshold(),
        }
    }
}

impl AppConfig {
    /// Load config from the config directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: AppConfig = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Construction settings derived from this config
    pub fn tree_config(&self) -> TreeConfig {
        match self.terminator {
            Some(terminator) => TreeConfig {
                terminator: terminator as Symbol,
            },
            None => TreeConfig::default(),
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME).join(CONFIG_FILE))
}
