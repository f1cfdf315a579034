use crate::config::BoardqlConfig;
use crate::graphql::{ForumSchema, build_schema};
use crate::storage::MemoryStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: BoardqlConfig,
    pub root: PathBuf,
    pub store: Arc<MemoryStore>,
}

impl CommandContext {
    /// Resolves the config (explicit file or upward search from `cwd`),
    /// applies the `--data` override and opens the store.
    pub fn load(cwd: &Path, config_path: Option<&Path>, data: Option<&Path>) -> Result<Self> {
        let (mut config, root) = match config_path {
            Some(path) => BoardqlConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => BoardqlConfig::discover(cwd).context("Failed to load config")?,
        };

        if let Some(data) = data {
            config.storage.path = Some(cwd.join(data).to_string_lossy().into_owned());
        }

        let store = MemoryStore::open(&config.storage, &root).context("Failed to open store")?;
        Ok(Self {
            config,
            root,
            store: Arc::new(store),
        })
    }

    pub fn schema(&self) -> ForumSchema {
        build_schema(self.store.clone())
    }
}
