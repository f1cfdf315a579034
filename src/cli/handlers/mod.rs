mod context;
mod mutate;
mod query;
mod schema;
mod serve;

pub use context::CommandContext;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;
