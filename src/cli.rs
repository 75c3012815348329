use std::path::PathBuf;

use clap::{Parser, Subcommand, builder::styling};

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser)]
#[command(name = "aicommit-rs")]
#[command(author, version, long_about = None)]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a commit message from the branch, draft message and staged diff
    GenerateMessage {
        /// Draft commit message
        #[arg(short, long, default_value = "")]
        message: String,

        /// Branch name (defaults to the current branch)
        #[arg(short, long)]
        branch: Option<String>,

        /// Diff text (defaults to the staged diff)
        #[arg(short, long)]
        diff: Option<String>,

        /// Write the raw backend response to debug.json
        #[arg(long)]
        debug: bool,

        /// Override the configured model for this run
        #[arg(long)]
        model: Option<String>,
    },

    /// Install the prepare-commit-msg hook
    InstallHook {
        /// Hooks directory (defaults to the repository's hooks directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Replace an existing hook
        #[arg(short = 'o', long = "override")]
        override_existing: bool,
    },

    /// Persist backend URL, API key and model
    SetSettings {
        /// Backend endpoint URL
        #[arg(long)]
        url: Option<String>,

        /// Backend API key
        #[arg(long)]
        key: Option<String>,

        /// Model id
        #[arg(long)]
        model: Option<String>,

        /// Scope: User | Machine
        #[arg(long, default_value = "User")]
        target: String,

        /// Store the API key base64-encoded
        #[arg(long)]
        encrypted: bool,
    },

    /// Persist one environment variable (VAR_NAME=value)
    SetEnv {
        /// Assignment in the form VAR_NAME=value
        assignment: String,

        /// Scope: User | Machine
        #[arg(long, default_value = "User")]
        target: String,
    },
}
