#![warn(clippy::pedantic)]

//! # widgen - Widget Project Scaffolding CLI
//!
//! The `widgen` command generates new client widget projects from
//! templates and upgrades existing ones in place. A run walks a fixed
//! lifecycle: detect the state of the target directory, prompt for
//! answers, write the file tree, install dependencies, and finish by
//! starting the first build.
//!
//! ## Subcommands
//!
//! - `generate` - Scaffold a new widget project or upgrade an existing one
//! - `version` - Display version information
//!
//! ## Usage Modes
//!
//! ### Interactive Mode (default)
//!
//! In a terminal, `widgen generate` asks for the widget name, version,
//! license, build tool, and test options, with sensible defaults. When the
//! target already holds a widget project, the detected metadata becomes
//! the defaults and the run starts with an upgrade confirmation.
//!
//! ### Headless Mode (`--headless`)
//!
//! With `--headless` (or outside a terminal) nothing is asked: answers
//! come from flags and defaults, and upgrades require `--yes`.
//!
//! ## Examples
//!
//! Scaffold interactively into a new directory:
//! ```bash
//! widgen generate ./my-widget
//! ```
//!
//! Scaffold without prompts:
//! ```bash
//! widgen generate ./my-widget --headless --widget-name BadgeCounter
//! ```
//!
//! Upgrade an existing project non-interactively:
//! ```bash
//! widgen generate ./my-widget --headless --yes --version 2.0.0
//! ```

mod commands;
mod errors;
mod npm;
mod project;
mod prompts;
mod templates;
mod text;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{generate, version};
use errors::WidgenError;

/// Widget project scaffolding CLI.
#[derive(Parser)]
#[command(
    name = "widgen",
    author,
    version,
    about = "Widget project scaffolding CLI",
    long_about = "The 'widgen' command generates new client widget projects from templates \
    and upgrades existing ones in place. Use 'generate' to run the scaffolding lifecycle.",
    after_help = "\
ENVIRONMENT VARIABLES:
    WIDGEN_NO_PROMPT        Disable interactive prompts (same as --headless)
    RUST_LOG                Diagnostic log filter (e.g. widgen=debug)"
)]
pub struct Cli {
    /// Run without interactive prompts.
    ///
    /// Answers come from the generate flags and their defaults; upgrades
    /// of existing projects additionally require --yes.
    #[clap(long = "headless", global = true, action = clap::ArgAction::SetTrue)]
    pub headless: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the widgen CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Scaffold a new widget project or upgrade an existing one.
    ///
    /// Detects whether the target directory is fresh or already holds a
    /// generated widget project, prompts accordingly, and renders the
    /// project tree from templates.
    Generate(generate::GenerateArgs),

    /// Display version information.
    Version(version::VersionArgs),
}

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr and stay out of the prompt flow.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        let exit_code = handle_error(&e);
        std::process::exit(exit_code);
    }
}

/// Handles an error and returns the appropriate exit code.
///
/// For `ProcessExitCode` errors, returns the embedded exit code without
/// printing anything (the subprocess already printed its output). For all
/// other errors, prints the error and returns exit code 1.
fn handle_error(e: &anyhow::Error) -> i32 {
    if let Some(WidgenError::ProcessExitCode { code }) = e.downcast_ref::<WidgenError>() {
        return *code;
    }
    eprintln!("Error: {e}");
    1
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate(args)) => generate::execute(&args, cli.headless).await,
        Some(Commands::Version(args)) => version::execute(&args),
        None => {
            println!("widgen: widget project scaffolding CLI");
            println!();
            println!("Run 'widgen generate' to scaffold a widget project here.");
            println!("Run 'widgen --help' for usage information.");
            Ok(())
        }
    }
}
