//! Configuration file loading
//!
//! ```toml
//! [telemetry]
//! log_level = "info"
//!
//! [profiles.people]
//! threshold = 0.7
//! fields = ["name", "profile.name", { path = "employee_id", threshold = 0.95 }]
//! limit = 50
//! ```

use anyhow::{anyhow, Context, Result};
use fuzzyrank_search::SearchOptions;
use fuzzyrank_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files searched, in order, when no path is given
const CANDIDATES: &[&str] = &[".fuzzyrank.toml", "fuzzyrank.toml", ".config/fuzzyrank.toml"];

/// Root configuration schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSchema {
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Named search profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, SearchOptions>,
}

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(Path::new(".")),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self { schema, path: config_path })
    }

    /// Look up a search profile, validated
    pub fn profile(&self, name: &str) -> Result<&SearchOptions> {
        let options = self.schema.profiles.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.schema.profiles.keys().map(String::as_str).collect();
            anyhow!("Unknown profile '{}' (available: {})", name, known.join(", "))
        })?;

        options
            .validate()
            .with_context(|| format!("Invalid profile '{}'", name))?;

        Ok(options)
    }
}

/// Find configuration file in standard locations under `root`
fn find_config_file(root: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}
