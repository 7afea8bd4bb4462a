//! Version command for the widgen CLI.
//!
//! Displays version information. In verbose mode, shows the git commit
//! and platform as well.

use anyhow::Result;
use clap::Args;

/// Arguments for the version command.
#[derive(Args)]
pub struct VersionArgs {
    /// Show detailed version information including commit and platform.
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Executes the version command.
#[allow(clippy::unnecessary_wraps)]
pub fn execute(args: &VersionArgs) -> Result<()> {
    println!("widgen {}", env!("CARGO_PKG_VERSION"));
    if args.verbose {
        println!("  commit:   {}", env!("WIDGEN_GIT_COMMIT"));
        println!(
            "  platform: {}-{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        );
    }
    Ok(())
}
