//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all
//! steplint commands, using clap's derive API.
//!
//! ## Commands
//!
//! - `check`: Audit step bindings (unused, banned phrases, invalid patterns,
//!   duplicate step texts)
//! - `init`: Initialize a steplint configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use super::commands::check::CheckRule;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }

    /// Get the report format of the command, defaulting to text.
    pub fn format(&self) -> OutputFormat {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.format,
            Some(Command::Init) | None => OutputFormat::Text,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root scanned for feature files and banlist configs
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Path to the binding discovery feed (overrides config file)
    #[arg(long)]
    pub bindings: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cargo-style colored text
    Text,
    /// Machine-readable JSON report
    Json,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Checks to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Audit step bindings against feature files and banned-phrase rules
    Check(CheckCommand),
    /// Initialize a new .steplintrc.json configuration file
    Init,
}
