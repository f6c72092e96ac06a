//! CLI entry point - the composition root.
//!
//! Parses arguments, initializes logging, bootstraps settings and paths, and
//! dispatches to the command handlers.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use taleteller_cli::handlers::narrate::NarrateArgs;
use taleteller_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before parsing so `.env` can supply
    // TALETELLER_CONFIG and TALETELLER_DB
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli)?;
    let ctx = bootstrap(config)?;

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Narrate {
            file,
            story,
            voice,
            speed,
            chunk_chars,
            native_pause,
            wps,
        } => {
            let args = NarrateArgs {
                file,
                story,
                voice,
                speed,
                chunk_chars,
                native_pause,
                wps,
            };
            handlers::narrate::execute(&ctx, args).await?;
        }
        Commands::Chunks { file, chunk_chars } => {
            handlers::chunks::execute(&ctx, &file, chunk_chars)?;
        }
        Commands::Voices => {
            handlers::voices::execute(&ctx)?;
        }
        Commands::Story { command } => {
            handlers::story::execute(&ctx, command).await?;
        }
    }

    Ok(())
}
