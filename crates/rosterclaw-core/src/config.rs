//! RosterClaw configuration system.
//!
//! Everything a scheduling run needs arrives through this strongly-typed
//! struct. Templated or attribute-driven inputs are resolved by the caller
//! before a run starts; the scheduler core never looks values up by name.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, RosterError};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Path to the scheduler database.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default)]
    pub autoschedule: AutoscheduleConfig,
}

/// Parameters of one auto-scheduling pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoscheduleConfig {
    /// Group type whose groups are auto-scheduled.
    #[serde(default)]
    pub group_type_id: i64,
    /// How many weeks ahead to materialize occurrences.
    #[serde(default = "default_weeks_out")]
    pub weeks_out: u32,
    /// Max occurrence ids per assignment batch. Kept well under the
    /// backend's query-parameter limit.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Optional boolean group attribute gating eligibility.
    #[serde(default)]
    pub attribute_key: Option<String>,
    /// Person the assignment engine acts as.
    #[serde(default)]
    pub scheduler_person_id: i64,
    /// Webhook URL of the external auto-assignment capability.
    #[serde(default)]
    pub assign_url: Option<String>,
    /// Seconds between daemon runs.
    #[serde(default = "default_run_interval")]
    pub run_interval_secs: u64,
}

fn default_db_path() -> PathBuf {
    RosterConfig::home_dir().join("scheduler.db")
}
fn default_weeks_out() -> u32 {
    2
}
fn default_chunk_size() -> usize {
    10_000
}
fn default_run_interval() -> u64 {
    86_400
}

impl Default for AutoscheduleConfig {
    fn default() -> Self {
        Self {
            group_type_id: 0,
            weeks_out: default_weeks_out(),
            chunk_size: default_chunk_size(),
            attribute_key: None,
            scheduler_person_id: 0,
            assign_url: None,
            run_interval_secs: default_run_interval(),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            autoschedule: AutoscheduleConfig::default(),
        }
    }
}

impl RosterConfig {
    /// Load config from the default path (~/.rosterclaw/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RosterError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| RosterError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| RosterError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// RosterClaw home directory (~/.rosterclaw).
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rosterclaw")
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }
}
