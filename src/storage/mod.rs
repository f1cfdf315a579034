//! Persistence layer for forum records.
//!
//! Resolvers talk to storage only through the [`ForumStore`] trait, which is
//! handed to the schema at construction time. Every call either returns a
//! record or fails with a not-found or constraint error.
//!
//! ## Referential rules
//!
//! - Articles must reference an existing author and board.
//! - Comments must reference an existing author, board and article, and the
//!   board must be the article's board.
//! - Deleting a user or board is refused while articles or comments still
//!   reference it.
//! - Deleting an article removes its comments in the same write.
//!
//! ## Components
//!
//! - [`ForumStore`]: the store contract
//! - [`MemoryStore`]: in-process tables, optionally mirrored to a [`Snapshot`]
//! - [`ArticleFilter`] / [`CommentFilter`]: predicates for list lookups

mod filter;
mod memory;
mod snapshot;
mod table;

pub use filter::{ArticleFilter, CommentFilter};
pub use memory::MemoryStore;
pub use snapshot::{ForumState, SNAPSHOT_VERSION, Snapshot};
pub use table::{IdAllocator, Record, Table};

use crate::error::Result;
use crate::model::{
    Article, ArticlePatch, Board, Comment, CommentPatch, NewArticle, NewBoard, NewComment,
    NewUser, User, UserPatch,
};
use async_trait::async_trait;

#[async_trait]
pub trait ForumStore: Send + Sync {
    async fn user(&self, id: &str) -> Result<Option<User>>;
    async fn users(&self) -> Result<Vec<User>>;
    async fn create_user(&self, draft: NewUser) -> Result<User>;
    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User>;
    async fn delete_user(&self, id: &str) -> Result<User>;

    async fn board(&self, id: &str) -> Result<Option<Board>>;
    async fn boards(&self) -> Result<Vec<Board>>;
    async fn create_board(&self, draft: NewBoard) -> Result<Board>;
    async fn delete_board(&self, id: &str) -> Result<Board>;

    async fn article(&self, id: &str) -> Result<Option<Article>>;
    async fn articles(&self, filter: ArticleFilter) -> Result<Vec<Article>>;
    async fn create_article(&self, draft: NewArticle) -> Result<Article>;
    async fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Article>;
    /// Removes the article only if both `id` and `author_id` match.
    async fn delete_article(&self, id: &str, author_id: &str) -> Result<Article>;

    async fn comment(&self, id: &str) -> Result<Option<Comment>>;
    async fn comments(&self, filter: CommentFilter) -> Result<Vec<Comment>>;
    async fn create_comment(&self, draft: NewComment) -> Result<Comment>;
    async fn update_comment(&self, id: &str, patch: CommentPatch) -> Result<Comment>;
    /// Removes the comment only if both `id` and `author_id` match.
    async fn delete_comment(&self, id: &str, author_id: &str) -> Result<Comment>;
}
