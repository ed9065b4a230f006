// File: src/config.rs
use crate::bulk::{BulkOptions, DEFAULT_BATCH_LIMIT, DEFAULT_POST_TYPE};
use crate::error::{Result, SlugError};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "persian-slug";
const CONFIG_FILE_NAME: &str = "config.toml";
const STORE_FILE_NAME: &str = "site.bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub bulk: BulkConfig,
}

/// Defaults for bulk runs that don't pass their own options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkConfig {
    pub post_type: String,
    pub limit: usize,
    pub force: bool,
}

impl BulkConfig {
    pub fn options(&self, offset: usize) -> BulkOptions {
        BulkOptions {
            post_type: self.post_type.clone(),
            limit: self.limit,
            offset,
            force: self.force,
        }
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            post_type: DEFAULT_POST_TYPE.to_string(),
            limit: DEFAULT_BATCH_LIMIT,
            force: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            log_level: "info".to_string(),
            bulk: BulkConfig::default(),
        }
    }
}

// On-disk shape; every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    store_path: Option<PathBuf>,
    log_level: Option<String>,
    bulk: Option<BulkFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BulkFile {
    post_type: Option<String>,
    limit: Option<usize>,
    force: Option<bool>,
}

impl Config {
    /// Loads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents, path),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parses TOML text; `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| SlugError::ConfigParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config = Self::default();
        if let Some(store_path) = file.store_path {
            config.store_path = expand_home(&store_path);
        }
        if let Some(log_level) = file.log_level {
            config.log_level = log_level;
        }
        if let Some(bulk) = file.bulk {
            if let Some(post_type) = bulk.post_type {
                config.bulk.post_type = post_type;
            }
            if let Some(limit) = bulk.limit {
                config.bulk.limit = limit;
            }
            if let Some(force) = bulk.force {
                config.bulk.force = force;
            }
        }
        Ok(config)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE_NAME)
}

pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(STORE_FILE_NAME)
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
