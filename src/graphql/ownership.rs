//! The single ownership check run before any article or comment is modified
//! or deleted.

use crate::error::{BoardqlError, Result};
use crate::model::{Article, Comment};
use crate::storage::{ForumStore, Record};

/// A record with a recorded author.
pub trait Authored: Record {
    fn author_id(&self) -> &str;
}

impl Authored for Article {
    fn author_id(&self) -> &str {
        &self.author_id
    }
}

impl Authored for Comment {
    fn author_id(&self) -> &str {
        &self.author_id
    }
}

/// Passes `record` through only if it exists and `author_id` wrote it.
///
/// Fails with [`BoardqlError::NotFound`] when the record is absent and
/// [`BoardqlError::Forbidden`] when someone else owns it.
pub fn check_owner<T: Authored>(record: Option<T>, id: &str, author_id: &str) -> Result<T> {
    match record {
        None => Err(BoardqlError::not_found(T::ENTITY, id)),
        Some(r) if r.author_id() != author_id => Err(BoardqlError::forbidden(T::ENTITY, id)),
        Some(r) => Ok(r),
    }
}

pub async fn owned_article(store: &dyn ForumStore, id: &str, author_id: &str) -> Result<Article> {
    check_owner(store.article(id).await?, id, author_id)
}

pub async fn owned_comment(store: &dyn ForumStore, id: &str, author_id: &str) -> Result<Comment> {
    check_owner(store.comment(id).await?, id, author_id)
}
