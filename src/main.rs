//! radarr-provider - declarative management of Radarr configuration
//!
//! The binary drives the provider's resource lifecycle from the command
//! line: it reads plans and states as JSON files and prints the new state.

use anyhow::Result;
use clap::{Parser, Subcommand};
use radarr_provider::cli::{self, ConfigSubcommand, OutputOptions, commands};
use radarr_provider::resources::listing::GroupName;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

/// Manage Radarr download clients, import lists, indexers, notifications and metadata
#[derive(Parser, Debug)]
#[command(name = "radarr-provider")]
#[command(about = "Declarative provider for Radarr configuration", long_about = None)]
struct Args {
    /// Enable debug logging on stderr
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Write debug logs to a temp file instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    /// Config file to use instead of the default location
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Print sensitive attributes in clear text
    #[arg(long, global = true)]
    show_sensitive: bool,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// List registered resource types
    Resources,
    /// Print the schema of a resource type
    Schema {
        /// Resource type (e.g. "download_client_transmission")
        type_name: String,
    },
    /// Import a remote resource by id and print its state
    Import {
        type_name: String,
        id: String,
    },
    /// Refresh a stored state
    Read {
        type_name: String,
        /// State JSON file
        state: PathBuf,
    },
    /// Create a resource from a plan, or update it when --state is given
    Apply {
        type_name: String,
        /// Plan JSON file
        plan: PathBuf,
        /// Prior state JSON file
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Delete the resource a state describes
    Destroy {
        type_name: String,
        /// State JSON file
        state: PathBuf,
    },
    /// List remote records of a family group
    List {
        /// download-clients, import-lists, indexers, notifications or metadata
        group: GroupName,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::FAILURE,
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one command; `Ok(true)` means error diagnostics were reported
async fn run(args: Args) -> Result<bool> {
    let log_file = cli::init_logging(args.debug, args.log_file)?;
    if let Some(ref log_path) = log_file {
        eprintln!("Debug logging enabled. Logs written to: {}", log_path.display());
    }

    let options = OutputOptions {
        show_sensitive: args.show_sensitive,
    };
    let config_path = args.config.as_deref();

    match args.command {
        Command::Resources => {
            commands::print_resources();
            Ok(false)
        }
        Command::Schema { type_name } => {
            commands::print_schema(&type_name)?;
            Ok(false)
        }
        Command::Config { subcommand } => {
            cli::handle_config_command(subcommand, config_path)?;
            Ok(false)
        }
        Command::Version => {
            cli::display_version();
            Ok(false)
        }
        command => {
            let provider = commands::connect(config_path)?;
            let cancel = cancel_on_ctrl_c();

            let failed = match command {
                Command::Import { type_name, id } => {
                    commands::import(&provider, &type_name, &id, &cancel, options).await?
                }
                Command::Read { type_name, state } => {
                    commands::read(&provider, &type_name, &state, &cancel, options).await?
                }
                Command::Apply {
                    type_name,
                    plan,
                    state,
                } => {
                    commands::apply(
                        &provider,
                        &type_name,
                        &plan,
                        state.as_deref(),
                        &cancel,
                        options,
                    )
                    .await?
                }
                Command::Destroy { type_name, state } => {
                    commands::destroy(&provider, &type_name, &state, &cancel, options).await?
                }
                Command::List { group } => commands::list(&provider, group, &cancel, options).await?,
                Command::Resources
                | Command::Schema { .. }
                | Command::Config { .. }
                | Command::Version => false,
            };

            if cancel.is_cancelled() {
                return Err(anyhow::anyhow!("Interrupted"));
            }
            Ok(failed)
        }
    }
}

/// Token cancelled on the first Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupt received, cancelling");
            token.cancel();
        }
    });
    cancel
}
