use anyhow::{Result, bail};

use super::CommandContext;

pub fn handle_query(ctx: CommandContext, query: String, variables: Option<String>) -> Result<()> {
    execute(&ctx, query, variables)
}

/// Runs one document against the store and prints the response as JSON.
/// Fails after printing if the response carries errors.
pub(super) fn execute(ctx: &CommandContext, query: String, variables: Option<String>) -> Result<()> {
    let schema = ctx.schema();

    let vars: async_graphql::Variables = if let Some(v) = variables {
        serde_json::from_str(&v)?
    } else {
        async_graphql::Variables::default()
    };

    let request = async_graphql::Request::new(query).variables(vars);
    let response = tokio::runtime::Runtime::new()?.block_on(schema.execute(request));

    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_err() {
        bail!("GraphQL request returned {} error(s)", response.errors.len());
    }
    Ok(())
}
