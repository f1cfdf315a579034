use crate::error::{BoardqlError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".boardql.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardqlConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// How the store generates the suffix of new record ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdMode {
    #[default]
    Sequential,
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// JSON snapshot file. Unset keeps everything in memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default)]
    pub id_mode: IdMode,

    #[serde(default = "default_id_length")]
    pub id_length: usize,
}

fn default_id_length() -> usize {
    8
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: None,
            id_mode: IdMode::default(),
            id_length: default_id_length(),
        }
    }
}

impl StorageSettings {
    pub fn snapshot_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.path.as_ref().map(|p| project_root.join(p))
    }
}

impl BoardqlConfig {
    /// Loads the config file found at or above `start_path`. Without one, the
    /// defaults apply and `start_path` becomes the project root.
    pub fn discover(start_path: &Path) -> Result<(Self, PathBuf)> {
        match Self::find_config_file(start_path) {
            Some(config_path) => Self::load(&config_path),
            None => Ok((Self::default(), start_path.to_path_buf())),
        }
    }

    pub fn load(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: BoardqlConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| BoardqlError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        tracing::debug!(path = %config_path.display(), "Loaded config");
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(4..=32).contains(&self.storage.id_length) {
            return Err(BoardqlError::Config(format!(
                "storage.id_length must be between 4 and 32, got {}",
                self.storage.id_length
            )));
        }
        if self.server.host.is_empty() {
            return Err(BoardqlError::Config("server.host cannot be empty".to_string()));
        }
        Ok(())
    }
}
