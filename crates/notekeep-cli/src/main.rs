//! notekeep CLI - keep short notes from the terminal.

mod cli;
mod commands;
mod error;


use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::AppContext;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::facets::{run_categories, run_tags};
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::commands::toggle::{run_archive, run_duplicate, run_pin};
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "notekeep=info,notekeep_core=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    if let Commands::Completions { shell, output } = &command {
        return run_completions(*shell, output.as_deref());
    }

    let ctx = AppContext::open(cli.db_path, cli.store_key)?;
    if let Some(path) = ctx.service.db_path() {
        tracing::debug!("Using database {}", path.display());
    }

    match command {
        Commands::Add(args) => run_add(&args, &ctx).await?,
        Commands::List(args) => run_list(&args, &ctx).await?,
        Commands::Show { id, json } => run_show(&id, json, &ctx).await?,
        Commands::Edit(args) => run_edit(&args, &ctx).await?,
        Commands::Delete { id } => run_delete(&id, &ctx).await?,
        Commands::Pin { id } => run_pin(&id, &ctx).await?,
        Commands::Archive { id } => run_archive(&id, &ctx).await?,
        Commands::Duplicate { id } => run_duplicate(&id, &ctx).await?,
        Commands::Export { format, output } => {
            run_export(format, output.as_deref(), &ctx).await?;
        }
        Commands::Import { input } => run_import(&input, &ctx).await?,
        Commands::Categories => run_categories(&ctx).await?,
        Commands::Tags => run_tags(&ctx).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
