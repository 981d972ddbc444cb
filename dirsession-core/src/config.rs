//! src/config.rs
//! ============================================================================
//! # Config: session settings loaded from and saved to TOML
//!
//! The file lives in the platform config directory resolved by
//! [`directories::ProjectDirs`]; a default file is written on first run.
//! Every section is `#[serde(default)]` so older files keep loading.
//!
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save_to(&Config::config_path()?).await?;
//! ```

use crate::fs::entry_record::DEFAULT_DATE_FORMAT;
use anyhow::{Context, bail};
use chrono::format::{Item, StrftimeItems};
use compact_str::CompactString;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "dirsession";
const APPLICATION: &str = "DirSession";

/// Log line layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `[SEQ] LEVEL [file:line module] message`
    #[default]
    Compact,

    /// One JSON object per line.
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub level: CompactString,

    /// Log directory; `None` means the platform data dir + `logs`.
    pub dir: Option<PathBuf>,

    pub file_prefix: CompactString,

    pub format: LogFormat,

    /// Mirror events to stderr. Off by default: stderr shares the terminal
    /// with the session prompt.
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: CompactString::const_new("info"),
            dir: None,
            file_prefix: CompactString::const_new("dirsession"),
            format: LogFormat::Compact,
            stderr: false,
        }
    }
}

impl LoggingConfig {
    /// Directory the file appender writes to.
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }

        project_dirs().map_or_else(
            || PathBuf::from("logs"),
            |dirs| dirs.data_local_dir().join("logs"),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OperationsConfig {
    /// Operations slower than this are logged with a `SLOW_FILE_OPERATION` marker.
    #[serde(with = "humantime_serde")]
    pub slow_operation_threshold: Duration,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            slow_operation_threshold: Duration::from_secs(2),
        }
    }
}

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Initial location; the process working directory when unset.
    pub start_dir: Option<PathBuf>,

    /// Listing filter only; snapshots always hold every child.
    pub show_hidden: bool,

    /// `chrono` strftime pattern for the modified column.
    pub date_format: String,

    /// Program used to open files. Platform default when unset.
    pub opener_cmd: Option<String>,

    pub operations: OperationsConfig,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_dir: None,
            show_hidden: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            opener_cmd: None,
            operations: OperationsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Loads config from the platform config dir, writing defaults if absent.
    pub async fn load() -> anyhow::Result<Self> {
        let path: PathBuf = Self::config_path()?;

        Self::load_from(&path).await
    }

    /// Loads config from `path`, writing defaults there if it does not exist.
    pub async fn load_from(path: &Path) -> anyhow::Result<Self> {
        if TokioFs::try_exists(path).await.unwrap_or(false) {
            info!("Loading config from {}", path.display());

            let text: String = TokioFs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let cfg: Self = toml::from_str(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?;

            cfg.validate()
                .with_context(|| format!("Invalid config file {}", path.display()))?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config: Self = Self::default();
            default_config.save_to(path).await?;

            Ok(default_config)
        }
    }

    pub async fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        let toml_str: String = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str).await?;

        Ok(())
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> anyhow::Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            bail!("date_format {:?} is not a valid strftime pattern", self.date_format);
        }

        Ok(())
    }

    /// `<config dir>/config.toml`
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let proj_dirs: ProjectDirs =
            project_dirs().ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;

        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}
