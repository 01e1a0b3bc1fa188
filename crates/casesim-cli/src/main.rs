use std::io;

use casesim_cli::catalogue::load_repository;
use casesim_cli::config::{self, CliConfig};
use casesim_cli::play::play;
use casesim_cli::render::{CatalogueDisplay, RenderOptions, StudiesDisplay};
use casesim_core::Difficulty;
use casesim_engine::CaseSession;
use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "casesim")]
#[command(about = "Electrodiagnostic case simulator", version)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cases
    List {
        /// Only show cases at this level
        #[arg(long)]
        difficulty: Option<Level>,
    },
    /// Print the standardized study data for a case
    Studies {
        /// Case ID
        case_id: String,
    },
    /// Work through a case interactively
    Play {
        /// Case ID
        case_id: String,
    },
    /// Inspect or create the user config
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => Difficulty::Beginner,
            Level::Intermediate => Difficulty::Intermediate,
            Level::Expert => Difficulty::Expert,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = config::load_config()?;
    init_tracing(&config.log_filter, cli.json_logs);

    match cli.command {
        Some(Commands::List { difficulty }) => {
            let repository = load_repository(&config)?;
            let summaries = match difficulty {
                Some(level) => repository.by_difficulty(level.into()),
                None => repository.summaries(),
            };
            print!("{}", CatalogueDisplay(&summaries));
        }
        Some(Commands::Studies { case_id }) => {
            let repository = load_repository(&config)?;
            let loaded = repository.load_case(&case_id)?;
            print!(
                "{}",
                StudiesDisplay {
                    ncs: &loaded.case.ncs_studies,
                    emg: &loaded.case.emg_studies,
                    options: RenderOptions::from(&config),
                }
            );
            for warning in &loaded.warnings {
                eprintln!("warning: {warning}");
            }
        }
        Some(Commands::Play { case_id }) => {
            let repository = load_repository(&config)?;
            let mut session = CaseSession::with_case(repository.load_case(&case_id)?);
            let stdin = io::stdin();
            let summary = play(
                &mut session,
                stdin.lock(),
                io::stdout(),
                RenderOptions::from(&config),
            )?;
            match summary {
                Some(summary) => {
                    let correct = summary.final_diagnosis.is_some_and(|r| r.is_correct);
                    tracing::info!(case_id = %summary.case_id, correct, "case finished");
                }
                None => println!("\nCase abandoned."),
            }
        }
        Some(Commands::Config { action }) => run_config(action, &config)?,
        None => {
            println!("Use 'casesim --help' for commands");
        }
    }

    Ok(())
}

fn run_config(action: ConfigAction, current: &CliConfig) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(current)?);
        }
        ConfigAction::Init { force } => {
            let path = config::config_path()?;
            if path.exists() && !force {
                return Err(eyre::eyre!(
                    "config already exists at {} (use --force to overwrite)",
                    path.display()
                ));
            }
            let written = config::save_config(&CliConfig::default())?;
            println!("Wrote {}", written.display());
        }
        ConfigAction::Path => {
            println!("{}", config::config_path()?.display());
        }
    }
    Ok(())
}

fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
