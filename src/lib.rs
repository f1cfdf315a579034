//! # boardql - a GraphQL forum API
//!
//! Users post articles to boards and comment on them; everything is read and
//! written through one GraphQL schema. Only the author of an article or
//! comment may modify or delete it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve on $PORT (default 4000), keeping data in forum.json
//! boardql serve --data forum.json
//!
//! # Create a board from the command line
//! boardql mutate 'createBoard(name: "free")' --data forum.json
//!
//! # List boards with their articles' authors
//! boardql query '{ boards { id name articles { title author { nickname } } } }' --data forum.json
//! ```
//!
//! ## Embedding
//!
//! The store is injected, so the schema can run against any [`storage::ForumStore`]:
//!
//! ```no_run
//! use std::sync::Arc;
//! use boardql::{graphql::build_schema, storage::MemoryStore};
//!
//! let schema = build_schema(Arc::new(MemoryStore::new()));
//! println!("{}", schema.sdl());
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and HTTP server
//! - [`model`]: Data models (User, Board, Article, Comment)
//! - [`storage`]: The store contract and its in-memory implementation
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.boardql.yml` configuration files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `BoardqlError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
///
/// Provides the async-graphql schema and the axum server exposing it.
pub mod graphql;

/// Tracing setup.
///
/// Console output filtered by `RUST_LOG`, plus optional daily JSON log files.
pub mod logging;

/// Data models for the forum.
pub mod model;

/// Persistence layer.
///
/// The `ForumStore` trait and the `MemoryStore` implementation with optional
/// JSON snapshots.
pub mod storage;

/// Input validation utilities.
///
/// Validates names, titles, content and IDs before they reach the store.
pub mod validation;
