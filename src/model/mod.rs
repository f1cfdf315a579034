//! Data models for the forum.
//!
//! - [`User`]: an author of articles and comments
//! - [`Board`]: a named container articles are posted to
//! - [`Article`]: a post on a board
//! - [`Comment`]: a reply to an article
//!
//! The `New*` drafts carry everything a create needs except the id, which the
//! store assigns. The `*Patch` structs carry partial updates: a `None` field
//! is left untouched.

mod board;
mod input;
mod post;
mod types;
mod user;

pub use board::Board;
pub use input::{ArticlePatch, CommentPatch, NewArticle, NewBoard, NewComment, NewUser, UserPatch};
pub use post::{Article, Comment};
pub use types::PostType;
pub use user::User;
