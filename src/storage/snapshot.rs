use super::table::{IdAllocator, Table};
use crate::error::{BoardqlError, Result};
use crate::model::{Article, Board, Comment, User};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const SNAPSHOT_VERSION: u32 = 1;

/// The complete contents of a store: every table plus the id allocator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumState {
    #[serde(default)]
    pub ids: IdAllocator,
    #[serde(default)]
    pub users: Table<User>,
    #[serde(default)]
    pub boards: Table<Board>,
    #[serde(default)]
    pub articles: Table<Article>,
    #[serde(default)]
    pub comments: Table<Comment>,
}

#[derive(Deserialize)]
struct SnapshotFile {
    version: u32,
    #[serde(flatten)]
    state: ForumState,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    #[serde(flatten)]
    state: &'a ForumState,
}

/// JSON file mirroring a store's state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. A missing file is an empty store.
    pub fn load(&self) -> Result<ForumState> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No snapshot found, starting empty");
            return Ok(ForumState::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let file: SnapshotFile = serde_json::from_str(&content)?;
        if file.version != SNAPSHOT_VERSION {
            return Err(BoardqlError::Storage(format!(
                "Unsupported snapshot version {} in {}",
                file.version,
                self.path.display()
            )));
        }

        tracing::debug!(
            path = %self.path.display(),
            users = file.state.users.len(),
            boards = file.state.boards.len(),
            articles = file.state.articles.len(),
            comments = file.state.comments.len(),
            "Loaded snapshot"
        );
        Ok(file.state)
    }

    /// Serializes `state` in the snapshot file format.
    pub fn encode(state: &ForumState) -> Result<String> {
        let file = SnapshotRef {
            version: SNAPSHOT_VERSION,
            state,
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Writes encoded content through a temp file in the target directory and
    /// renames it into place, so readers never observe a partial snapshot.
    pub fn write(&self, content: &str) -> Result<()> {
        let target_dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(target_dir)?;

        let mut temp_file = NamedTempFile::new_in(target_dir)
            .map_err(|e| BoardqlError::Storage(format!("Failed to create temp file: {}", e)))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| BoardqlError::Storage(format!("Failed to write to temp file: {}", e)))?;

        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| BoardqlError::Storage(format!("Failed to sync temp file: {}", e)))?;

        temp_file
            .persist(&self.path)
            .map_err(|e| BoardqlError::Storage(format!("Failed to persist temp file: {}", e)))?;

        tracing::debug!(path = %self.path.display(), "Saved snapshot");
        Ok(())
    }
}
