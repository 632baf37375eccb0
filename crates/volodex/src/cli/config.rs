//! Configuration paths and settings for Volodex
//!
//! All files live under ~/.volodex/ unless overridden:
//! - `volodex.json`: the creature catalog
//! - `AtomicCards.json.xz`: the MTGJSON bulk dataset
//! - `config.toml`: optional settings
//! - `logs/`: rolling log files

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use volodex_core::SubtypeReselect;

pub use volodex_logging::{logs_dir, volodex_home};

pub const DEFAULT_DOWNLOAD_URL: &str = "https://mtgjson.com/api/v5/AtomicCards.json.xz";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root of config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolodexConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Catalog store (default: ~/.volodex/volodex.json)
    pub catalog: Option<PathBuf>,
    /// Bulk dataset (default: ~/.volodex/AtomicCards.json.xz)
    pub bulk: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_download_url")]
    pub url: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            url: default_download_url(),
        }
    }
}

fn default_download_url() -> String {
    DEFAULT_DOWNLOAD_URL.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Keep the selected creature type when the type order is toggled
    #[serde(default)]
    pub preserve_subtype_on_sort: bool,
}

impl VolodexConfig {
    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&config_path())
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.paths
            .catalog
            .clone()
            .unwrap_or_else(|| volodex_home().join("volodex.json"))
    }

    pub fn bulk_path(&self) -> PathBuf {
        self.paths
            .bulk
            .clone()
            .unwrap_or_else(|| volodex_home().join("AtomicCards.json.xz"))
    }

    pub fn reselect(&self) -> SubtypeReselect {
        if self.browse.preserve_subtype_on_sort {
            SubtypeReselect::PreserveIfPresent
        } else {
            SubtypeReselect::ResetToFirst
        }
    }
}

/// ~/.volodex/config.toml
pub fn config_path() -> PathBuf {
    volodex_home().join("config.toml")
}

/// Arguments for the config command
#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Show resolved settings in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Run the config command - shows resolved paths and settings
pub fn run(args: ConfigArgs, config: &VolodexConfig, catalog: &Path) -> anyhow::Result<()> {
    let home = volodex_home();
    let config_file = config_path();
    let bulk = config.bulk_path();
    let logs = logs_dir();

    if args.json {
        let resolved = serde_json::json!({
            "home": home.to_string_lossy(),
            "config": {
                "path": config_file.to_string_lossy(),
                "exists": config_file.exists(),
            },
            "catalog": {
                "path": catalog.to_string_lossy(),
                "exists": catalog.exists(),
            },
            "bulk": {
                "path": bulk.to_string_lossy(),
                "exists": bulk.exists(),
            },
            "logs": logs.to_string_lossy(),
            "download_url": config.download.url,
            "preserve_subtype_on_sort": config.browse.preserve_subtype_on_sort,
        });
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        println!("VOLODEX CONFIGURATION");
        println!("=====================");
        println!();
        println!("Home:     {}", home.display());
        println!("Config:   {} ({})", config_file.display(), exists_label(&config_file));
        println!();
        println!("Catalog:  {} ({})", catalog.display(), exists_label(catalog));
        println!("Bulk:     {} ({})", bulk.display(), exists_label(&bulk));
        println!("Logs:     {}", logs.display());
        println!();
        println!("Download URL:             {}", config.download.url);
        println!(
            "Preserve subtype on sort: {}",
            config.browse.preserve_subtype_on_sort
        );
    }

    Ok(())
}

fn exists_label(path: &Path) -> &'static str {
    if path.exists() {
        "exists"
    } else {
        "not found"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = VolodexConfig::load(&temp.path().join("config.toml")).unwrap();

        assert_eq!(config, VolodexConfig::default());
        assert_eq!(config.download.url, DEFAULT_DOWNLOAD_URL);
        assert_eq!(config.reselect(), SubtypeReselect::ResetToFirst);
    }

    #[test]
    fn test_load_partial_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
            [paths]
            catalog = "/data/cards.json"

            [browse]
            preserve_subtype_on_sort = true
            "#,
        )
        .unwrap();

        let config = VolodexConfig::load(&config_path).unwrap();
        assert_eq!(config.catalog_path(), PathBuf::from("/data/cards.json"));
        assert_eq!(config.reselect(), SubtypeReselect::PreserveIfPresent);
        assert_eq!(config.download.url, DEFAULT_DOWNLOAD_URL);
        assert!(config.bulk_path().ends_with("AtomicCards.json.xz"));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(&config_path, "[browse\npreserve_subtype_on_sort = 1").unwrap();

        let err = VolodexConfig::load(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
