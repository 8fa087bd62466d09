//! Config file loading
//!
//! Automation configs are edited as YAML (or JSON) files, one collection per
//! file under a top-level `configs:` key. The loader reads single files or
//! whole directories, indexes configs by name, and rejects duplicates.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::AutomationConfig;
use crate::error::{Result, SdkError};

/// On-disk collection of automation configs
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigCollection {
    #[serde(default)]
    configs: Vec<AutomationConfig>,
}

/// Loads and indexes automation configs from files
#[derive(Debug, Default)]
pub struct ConfigLoader {
    configs: HashMap<String, AutomationConfig>,
    order: Vec<String>,
}

impl ConfigLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configs from a single YAML or JSON file.
    ///
    /// Returns the number of configs loaded from the file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        debug!("Loading automation configs from: {}", path.display());

        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .map(|ext| ext == "json")
            .unwrap_or(false);

        let collection: ConfigCollection = if is_json {
            serde_json::from_str(&content).map_err(|e| SdkError::InvalidConfigFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| SdkError::InvalidConfigFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        };

        let loaded = collection.configs.len();

        for config in collection.configs {
            if self.configs.contains_key(&config.name) {
                return Err(SdkError::DuplicateConfig(config.name));
            }

            self.order.push(config.name.clone());
            self.configs.insert(config.name.clone(), config);
        }

        info!("Loaded {} automation configs from: {}", loaded, path.display());
        Ok(loaded)
    }

    /// Load configs from every `.yaml`, `.yml` and `.json` file in a
    /// directory.
    ///
    /// Files that fail to load are logged and skipped; the count of
    /// successfully loaded files is returned.
    pub fn load_from_directory(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        info!("Loading automation configs from directory: {}", dir.display());

        if !dir.is_dir() {
            return Err(SdkError::ConfigError(format!(
                "not a directory: {}",
                dir.display()
            )));
        }

        let mut loaded_count = 0;
        let mut error_count = 0;

        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .map(|ext| ext == "yaml" || ext == "yml" || ext == "json")
                        .unwrap_or(false)
            })
            .collect();
        paths.sort();

        for path in paths {
            match self.load_from_file(&path) {
                Ok(_) => loaded_count += 1,
                Err(e) => {
                    warn!("Failed to load {}: {}", path.display(), e);
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            warn!(
                "Loaded {} config files with {} errors from: {}",
                loaded_count,
                error_count,
                dir.display()
            );
        } else {
            info!(
                "Successfully loaded {} config files from: {}",
                loaded_count,
                dir.display()
            );
        }

        Ok(loaded_count)
    }

    /// Get a config by name
    pub fn get(&self, name: &str) -> Option<&AutomationConfig> {
        self.configs.get(name)
    }

    /// Iterate configs in load order
    pub fn configs(&self) -> impl Iterator<Item = &AutomationConfig> {
        self.order.iter().filter_map(|name| self.configs.get(name))
    }

    /// Number of loaded configs
    pub fn count(&self) -> usize {
        self.configs.len()
    }

    /// Whether a config with this name was loaded
    pub fn contains(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    /// Drop all loaded configs
    pub fn clear(&mut self) {
        self.configs.clear();
        self.order.clear();
    }
}
