use anyhow::Result;
use clap::Parser;

use boardql::cli::handlers::{
    CommandContext, handle_mutate, handle_query, handle_schema, handle_serve,
};
use boardql::cli::{Cli, Commands};
use boardql::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    let cwd = std::env::current_dir()?;
    let ctx = CommandContext::load(&cwd, cli.config.as_deref(), cli.data.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => handle_serve(ctx, host, port),
        Commands::Query { query, variables } => handle_query(ctx, query, variables),
        Commands::Mutate {
            mutation,
            variables,
        } => handle_mutate(ctx, mutation, variables),
        Commands::Schema => handle_schema(&ctx),
    }
}
