//! distvars CLI entry point
//!
//! Parses the command line, runs the selected subcommand and turns failures
//! into user-friendly messages on stderr with exit code 1.
//!
//! - `scan` - list the placeholders in a URL
//! - `lock` - apply the version-lock pass
//! - `resolve` - apply both passes and print the fetch URL
//! - `check` - report which placeholders resolve, and from where

use anyhow::Result;
use clap::Parser;
use distvars::cli;
use distvars::core::error::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
