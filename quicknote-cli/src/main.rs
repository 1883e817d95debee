use std::process;

use clap::CommandFactory;
use quicknote::Config;
use quicknote_cli::cli::{Cli, Commands};
use quicknote_cli::error::{handle_cli_result, CliError};
use quicknote_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use quicknote_cli::{logging, note, serve};

#[tokio::main]
async fn main() {
    let mut cli = Cli::parse_args();

    // Fast path for help - avoid opening any store
    let Some(command) = cli.command.take() else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Failed to print help: {e}");
            process::exit(EXIT_ERROR);
        }
        process::exit(EXIT_SUCCESS);
    };

    if !Cli::should_use_color() {
        colored::control::set_override(false);
    }

    let config = match load_config(&cli, &command) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            process::exit(e.exit_code);
        }
    };

    let log_level = logging::level_from_flags(cli.quiet, cli.debug, cli.verbose);
    let is_stdio = matches!(command, Commands::Serve { stdio: true, .. });
    if is_stdio {
        // stdout carries the protocol
        logging::init_file_logging(
            log_level,
            &logging::stdio_log_path(&config.storage.data_dir),
        );
    } else {
        logging::init_stderr_logging(log_level);
    }

    let exit_code = match command {
        Commands::Serve { stdio, .. } => {
            tracing::info!("Starting MCP server");
            serve::run_serve(&config, stdio).await
        }
        Commands::Note { subcommand } => {
            tracing::debug!("Running note command");
            handle_cli_result(note::handle_note_command(subcommand, &config, cli.format).await)
        }
    };

    process::exit(exit_code);
}

/// Load configuration, then apply `serve` flag overrides on top
fn load_config(cli: &Cli, command: &Commands) -> Result<Config, CliError> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Commands::Serve { bind, base_url, .. } = command {
        if let Some(bind) = bind {
            config.bind_addr = bind.clone();
        }
        if let Some(base_url) = base_url {
            config.base_url = base_url.clone();
        }
        config.validate()?;
    }

    Ok(config)
}
