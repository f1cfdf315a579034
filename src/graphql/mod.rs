//! GraphQL schema and resolvers for the forum.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server (port from --port, $PORT, or 4000)
//! boardql serve
//!
//! # Execute a query from CLI
//! boardql query '{ boards { id name articles { title author { nickname } } } }'
//!
//! # Execute a mutation from CLI
//! boardql mutate 'createBoard(name: "free")'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `user`, `users`, `board`, `boards`, `article`, `articles`,
//!   `articlesFromUser`, `articlesFromBoard`, `comment`, `comments`,
//!   `commentsFromUser`, `commentsFromArticle`
//! - **Mutations**: `createUser`, `modifyUser`, `deleteUser`, `createBoard`,
//!   `deleteBoard`, `postArticle`, `modifyArticle`, `deleteArticle`,
//!   `postComment`, `modifyComment`, `deleteComment`
//!
//! Nested fields such as `Article.author` or `User.comments` are resolved
//! lazily: the store is only consulted when the field is selected.
//!
//! Delete mutations, `createUser` and `createBoard` report failure as `false`.
//! Every other mutation reports failure as an error carrying an
//! `extensions.code`; modifying someone else's article or comment yields
//! `FORBIDDEN`, a missing one `NOT_FOUND`.

mod ownership;
mod schema;
mod server;
mod types;

pub use ownership::{Authored, check_owner, owned_article, owned_comment};
pub use schema::{AppState, ForumSchema, MutationRoot, QueryRoot, build_schema};
pub use server::{router, run_server};
pub use types::*;
