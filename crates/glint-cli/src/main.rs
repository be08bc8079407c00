//! `glint` CLI - render and validate glint templates from the command line.
//!
//! Thin I/O wrapper around the `glint` engine: reads template and data
//! files, initializes logging/config, and dispatches to a command handler.
//! None of this lives in the `glint` crate itself — `Compile`/`Render`
//! never touch the filesystem or environment on their own.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::check::{CheckArgs, CheckCommand};
use commands::render::{RenderArgs, RenderCommand};
use config::Config;

/// glint - a Liquid/Django-flavored text template engine
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render and validate glint templates", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "GLINT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile and execute a template, printing its rendered output
    Render(RenderCommand_),
    /// Compile a template without executing it, reporting syntax errors
    Check(CheckCommand_),
}

#[derive(Parser, Debug)]
struct RenderCommand_ {
    /// Path to the template source file
    template: PathBuf,

    /// Path to a JSON file supplying the template's data
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Write rendered output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckCommand_ {
    /// Path to the template source file
    template: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render(args) => {
            let render_args = RenderArgs {
                template: args.template,
                data: args.data,
                output: args.output,
                verbose: cli.verbose,
            };
            RenderCommand::new(render_args, config)
                .run()
                .context("rendering template")
        }
        Commands::Check(args) => {
            let check_args = CheckArgs {
                template: args.template,
                verbose: cli.verbose,
            };
            CheckCommand::new(check_args).run().context("checking template")
        }
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .context("failed to initialize logging")
}

fn load_config(config_path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(config)
}
