//! board - command-line front end of the board option engine

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use board_config::cmdline::join_args;
use board_config::frontend::BoardHost;
use board_config::startup::{self, BoardEngine};
use board_config::{AppData, ConfigError, EngineConfig, ParseMode};
use clap::{Parser, Subcommand};
use tracing::warn;

#[derive(Parser)]
#[command(name = "board")]
#[command(about = "Read, inspect and save chess board settings")]
struct Cli {
    /// Settings file read at startup and written by `save`
    #[arg(long, global = true)]
    settings: Option<String>,

    /// Fail on unrecognized options instead of skipping them
    #[arg(long, global = true)]
    strict: bool,

    /// Directory substituted for a leading `~~` in option values
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Directory relative settings file names are resolved against
    #[arg(long, global = true)]
    install_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the settings file that would be saved
    Show {
        /// Print the whole program state as JSON instead
        #[arg(long)]
        json: bool,
        /// Board command line
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Start up and write the settings file
    Save {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the value of one option
    Get {
        name: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List every option
    Options,
    /// Replace %name% placeholders with option values
    Expand {
        text: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("Error: {:#}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<ConfigError>()
            .map(ConfigError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("board=warn".parse()?),
        )
        .init();
    Ok(())
}

fn build_engine(cli: &Cli) -> Result<BoardEngine> {
    let install_dir = match &cli.install_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let mut host = BoardHost::new(install_dir);
    if let Some(dir) = &cli.data_dir {
        host = host.with_data_dir(dir.clone());
    }

    let mut config = EngineConfig::default();
    if let Some(settings) = &cli.settings {
        config = config.with_settings_file(settings.clone());
    }

    Ok(startup::board_engine(host, config)?)
}

/// Run the startup sequence over `args`; `None` when `-autoClose` ended it
fn start(engine: &BoardEngine, args: &[String], strict: bool) -> Result<Option<AppData>> {
    let mode = if strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let mut state = AppData::default();
    let started = startup::init_app_data(engine, &mut state, &join_args(args), mode)?;
    for name in &started.report.unrecognized {
        warn!("Dropped unrecognized option {}", name);
    }

    if started.exit_requested {
        return Ok(None);
    }
    Ok(Some(state))
}

fn run(cli: Cli) -> Result<()> {
    let engine = build_engine(&cli)?;

    match &cli.command {
        Commands::Show { json, args } => {
            let Some(state) = start(&engine, args, cli.strict)? else {
                return Ok(());
            };
            let mut out = std::io::stdout().lock();
            if *json {
                serde_json::to_writer_pretty(&mut out, &state)?;
                writeln!(out)?;
            } else {
                engine.write_settings(&startup::settings_snapshot(&state), &mut out)?;
            }
        }
        Commands::Save { args } => {
            let Some(mut state) = start(&engine, args, cli.strict)? else {
                return Ok(());
            };
            let path = startup::save_settings(&engine, &mut state)?;
            println!("Saved settings to {}", path.display());
        }
        Commands::Get { name, args } => {
            let Some(state) = start(&engine, args, cli.strict)? else {
                return Ok(());
            };
            let value = engine
                .value_text(&state, name)
                .with_context(|| format!("Option {} has no text value", name))?;
            println!("{}", value);
        }
        Commands::Options => print!("{}", engine.usage()),
        Commands::Expand { text, args } => {
            let Some(state) = start(&engine, args, cli.strict)? else {
                return Ok(());
            };
            println!("{}", engine.expand_placeholders(&state, text));
        }
    }

    Ok(())
}
