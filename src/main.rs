//! Firstrun - first-run onboarding controller

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use firstrun::config::Config;
use firstrun::store::FlagStore;
use firstrun::{Input, NavEvent, Navigator};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// First-run onboarding controller
#[derive(Parser)]
#[command(name = "firstrun")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preferences file holding the completion flag
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether onboarding has been completed
    Status,
    /// Clear the completion flag so onboarding shows again
    Reset {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// List the onboarding pages
    Pages,
    /// Show the effective configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
        /// Write the default configuration to the config file
        #[arg(long, conflicts_with = "path")]
        write_default: bool,
    },
    /// Run onboarding, feeding it inputs (next, back, skip, page=<n>)
    ///
    /// Inputs are read from stdin, one or more per line, when none are given.
    Walk {
        /// Inputs to apply in order
        inputs: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level > 0 {
        let level = match debug_level {
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        };

        let log_path = firstrun::paths::log_path();
        let log_dir = log_path
            .parent()
            .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
        let file_appender = tracing_appender::rolling::never(log_dir, "firstrun.log");
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            eprintln!("error: {e}");
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    if let Some(Commands::Config {
        write_default: true,
        ..
    }) = cli.command
    {
        return cmd_write_default_config(cli.config.as_deref());
    }

    let config = resolve_config(&cli)?;

    match cli.command {
        Some(Commands::Status) => cmd_status(&config),
        Some(Commands::Reset { force }) => cmd_reset(&config, force),
        Some(Commands::Pages) => cmd_pages(&config),
        Some(Commands::Config { path, .. }) => cmd_config(&config, cli.config.as_deref(), path),
        Some(Commands::Walk { inputs }) => cmd_walk(&config, &inputs),
        None => cmd_walk(&config, &[]),
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(path) = std::env::var_os("FIRSTRUN_STORE_PATH") {
        config.store_path = PathBuf::from(path);
    }
    if let Some(path) = &cli.store {
        config.store_path.clone_from(path);
    }
    Ok(config)
}

fn cmd_status(config: &Config) -> Result<()> {
    let store = config.store();
    let completed = store
        .is_completed(&config.flag_key)
        .context("Failed to read onboarding flag")?;
    if completed {
        println!("Onboarding completed ({})", store.path().display());
    } else {
        println!("Onboarding not completed ({})", store.path().display());
    }
    Ok(())
}

fn cmd_reset(config: &Config, force: bool) -> Result<()> {
    let mut store = config.store();
    let completed = store
        .is_completed(&config.flag_key)
        .context("Failed to read onboarding flag")?;
    if !completed {
        println!("Onboarding has not been completed; nothing to reset.");
        return Ok(());
    }

    if !force {
        print!("Show onboarding again on next launch? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    store
        .clear(&config.flag_key)
        .context("Failed to clear onboarding flag")?;
    println!("Reset complete.");
    Ok(())
}

fn cmd_config(config: &Config, config_path: Option<&Path>, path_only: bool) -> Result<()> {
    if path_only {
        let path = config_path.map_or_else(Config::default_path, Path::to_path_buf);
        println!("{}", path.display());
        return Ok(());
    }
    println!(
        "{}",
        serde_json::to_string_pretty(config).context("Failed to serialize config")?
    );
    Ok(())
}

fn cmd_write_default_config(config_path: Option<&Path>) -> Result<()> {
    let path = config_path.map_or_else(Config::default_path, Path::to_path_buf);
    if path.exists() {
        anyhow::bail!("Config file already exists at {}", path.display());
    }
    Config::default().save_to(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_pages(config: &Config) -> Result<()> {
    let catalog = config.catalog()?;
    for (index, page) in catalog.iter().enumerate() {
        println!("{index}: {} [{}]", page.title, page.asset);
        println!("   {}", page.description);
    }
    Ok(())
}

fn cmd_walk(config: &Config, inputs: &[String]) -> Result<()> {
    let catalog = config.catalog()?;
    let (mut navigator, first) =
        Navigator::initialize_with_key(catalog, config.store(), config.flag_key.clone());
    emit(&first)?;
    if first.is_redirect() {
        return Ok(());
    }

    let mut apply = |token: &str| -> Result<bool> {
        let input: Input = token.parse()?;
        let event = navigator
            .dispatch(input)
            .with_context(|| format!("Failed to apply '{input}'"))?;
        match event {
            Some(event) => {
                emit(&event)?;
                Ok(event.is_redirect())
            }
            None => Ok(false),
        }
    };

    if inputs.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            for token in line.split_whitespace() {
                if apply(token)? {
                    return Ok(());
                }
            }
        }
    } else {
        for token in inputs {
            if apply(token)? {
                return Ok(());
            }
        }
    }
    Ok(())
}

fn emit(event: &NavEvent) -> Result<()> {
    let line = serde_json::to_string(event).context("Failed to serialize event")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}
