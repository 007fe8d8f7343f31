mod cli;
mod commands;
mod config;

use clap::error::ErrorKind as ClapErrorKind;
use clap::{CommandFactory, Parser};
use cli::{Cli, Mode};
use colored::Colorize;
use config::Config;
use tracing::debug;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                    std::process::exit(0)
                }
                _ => std::process::exit(1),
            }
        }
    };

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd)?;

    let mode = match cli.resolve(&config, &cwd) {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("{}", Cli::command().render_usage());
            return Err(err.into());
        }
    };
    debug!(?config, ?mode, "Resolved invocation");

    match mode {
        Mode::Batch {
            artifacts,
            output,
            tests,
            options,
            format,
        } => commands::batch(&artifacts, &output, &tests, &options, format),
        Mode::Pair {
            reference,
            actual,
            output,
            options,
        } => commands::pair(&reference, &actual, &output, options),
    }
}
