mod commands;
mod paths;
mod render;
mod settings;
mod terminal;

use std::fs;
use std::fs::File;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::commands::Command;
use crate::commands::Console;
use crate::commands::Reported;
use crate::settings::MemoryBackend;
use crate::settings::SettingsProvider;
use crate::settings::SqliteBackend;

/// Administer a ThingsBoard MQTT broker from the terminal.
#[derive(Parser, Debug)]
#[command(name = "mqtt-console", version, about)]
struct Cli {
    /// Broker base URL [default: broker.url, or http://localhost:8083]
    #[arg(long, global = true, env = "MQTT_CONSOLE_URL")]
    url: Option<String>,

    /// JWT to authenticate with instead of the stored one
    #[arg(long, global = true, env = "MQTT_CONSOLE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            if !err.is::<Reported>() {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let console = Console {
        settings: open_settings().await,
        url: cli.url,
        token: cli.token,
        assume_yes: cli.yes,
        width: render::terminal_width(),
    };
    commands::run(cli.cmd, &console).await
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let path = paths::log_file().context("no home directory")?;
    paths::rotate_logs();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }
    let file = File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}

/// The settings database, or in-memory settings when it cannot be opened.
async fn open_settings() -> SettingsProvider {
    let Some(path) = paths::settings_db() else {
        log::warn!("no home directory, settings will not be saved");
        return SettingsProvider::new(MemoryBackend::new());
    };
    match SqliteBackend::open(&path).await {
        Ok(backend) => SettingsProvider::new(backend),
        Err(err) => {
            log::warn!("cannot open {}: {err}, settings will not be saved", path.display());
            SettingsProvider::new(MemoryBackend::new())
        }
    }
}
