//! Jot CLI - read and write notes on a Jot notes service from the terminal.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::open_store;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::search::run_search;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jot=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let store = open_store(cli.api_base)?;

    match cli.command {
        Commands::List { json } => run_list(&store, json).await?,
        Commands::Search { query, json } => run_search(&store, &query, json).await?,
        Commands::Add { title, content } => run_add(&store, &title, &content).await?,
        Commands::Edit { id, title, content } => run_edit(&store, &id, title, content).await?,
        Commands::Delete { id } => run_delete(&store, &id).await?,
    }

    Ok(())
}
