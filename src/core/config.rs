//! Workspace discovery and configuration
//!
//! A workspace is a directory containing `.fdt/config.yaml`; collections live
//! as JSON records under `.fdt/data/`. Discovery walks up from the current
//! directory, so `fdt` works from anywhere inside the workspace.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::provider::{ProviderError, SuggestionClient};

const CONFIG_DIR: &str = ".fdt";
const CONFIG_FILE: &str = "config.yaml";
const DATA_DIR: &str = "data";

/// Suggestion provider settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL; unset means the provider is disabled
    pub base_url: Option<String>,

    /// Bearer token for the provider
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Backup provider settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Upload endpoint; unset means backup is disabled
    pub endpoint: Option<String>,

    /// Opaque credential sent with the upload
    pub token: Option<String>,
}

/// Workspace configuration from `.fdt/config.yaml`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Partner operating this workspace (booking office or hub code)
    pub partner_code: String,

    /// Number of pallets available by default for dispatch
    pub pallet_count: u32,

    pub provider: ProviderConfig,

    pub backup: BackupConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            partner_code: "MAIN".to_string(),
            pallet_count: 6,
            provider: ProviderConfig::default(),
            backup: BackupConfig::default(),
        }
    }
}

impl Config {
    /// Build the suggestion client described by this config
    pub fn suggestion_client(&self) -> Result<SuggestionClient, ProviderError> {
        SuggestionClient::new(
            self.provider.base_url.as_deref(),
            self.provider.api_key.clone(),
            self.provider.timeout_secs.map(Duration::from_secs),
        )
    }

    /// The default pallet number pool, `1..=pallet_count`
    pub fn pallet_pool(&self) -> Vec<u32> {
        (1..=self.pallet_count).collect()
    }
}

/// Errors from workspace discovery and setup
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not inside an fdt workspace (no {CONFIG_DIR}/{CONFIG_FILE} found). Run 'fdt init' first")]
    NotFound,

    #[error("Workspace already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to parse {path}: {message}")]
    BadConfig { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A discovered workspace: root directory plus parsed config
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Walk up from the current directory to find the workspace
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Walk up from the given directory to find the workspace
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = Some(start);
        while let Some(candidate) = dir {
            let config_path = candidate.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                let config =
                    serde_yml::from_str(&contents).map_err(|e| ProjectError::BadConfig {
                        path: config_path,
                        message: e.to_string(),
                    })?;
                return Ok(Self {
                    root: candidate.to_path_buf(),
                    config,
                });
            }
            dir = candidate.parent();
        }
        Err(ProjectError::NotFound)
    }

    /// Scaffold `.fdt/config.yaml` and the data dir in the given directory
    pub fn init(dir: &Path, partner_code: &str) -> Result<Self, ProjectError> {
        let config_dir = dir.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Err(ProjectError::AlreadyInitialized(dir.to_path_buf()));
        }
        std::fs::create_dir_all(config_dir.join(DATA_DIR))?;
        let contents = format!(
            "# fdt workspace configuration\n\
             partner_code: {partner_code}\n\
             \n\
             # Pallets available for dispatch (numbered 1..=pallet_count)\n\
             pallet_count: 6\n\
             \n\
             # Optional suggestion provider (pallet assignment, address lookups)\n\
             # provider:\n\
             #   base_url: https://suggest.example.com/\n\
             #   api_key: \"...\"\n\
             #   timeout_secs: 10\n\
             \n\
             # Optional remote backup target\n\
             # backup:\n\
             #   endpoint: https://backup.example.com/objects/fdt\n\
             #   token: \"...\"\n"
        );
        std::fs::write(&config_path, contents)?;
        Self::discover_from(dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory holding the per-collection JSON records
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR).join(DATA_DIR)
    }
}
