//! Command-line interface definitions for docgate.
//!
//! The CLI stands in for the site's page scripts: every invocation is a
//! "page load" that consults the gate, and the subcommands map onto the
//! gate, theme and search operations.
//!
//! # Example
//!
//! ```bash
//! # Print the digest to put in config.toml
//! docgate digest 'team password'
//!
//! # Log in (prompts on stdin when --password is omitted)
//! docgate login
//!
//! # Search the content index
//! docgate search bim --json
//!
//! # Flip between light and dark
//! docgate theme toggle
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::theme::Theme;

/// Password gate, theme preference and keyword search for a documentation site.
#[derive(Debug, Parser)]
#[command(name = "docgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Store file holding the session and theme (overrides config)
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Enter the site password
    Login(LoginArgs),
    /// Show whether a valid session exists
    Status,
    /// Clear the session
    Logout,
    /// Search the content index (requires a session)
    Search(SearchArgs),
    /// List every page in the content index (requires a session)
    Pages(IndexArgs),
    /// Show or change the theme preference
    Theme(ThemeArgs),
    /// Print the hex digest of a password, for configuration
    Digest(DigestArgs),
}

/// Arguments for `login`.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Password; read from stdin when omitted
    #[arg(long, env = "DOCGATE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Index selection shared by `search` and `pages`.
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Content index file (TOML or JSON); overrides config
    #[arg(long, value_name = "PATH")]
    pub index: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `search`.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for in titles, keywords and descriptions
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    pub query: String,

    #[command(flatten)]
    pub index: IndexArgs,
}

/// Arguments for `theme`.
#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub action: Option<ThemeAction>,
}

/// Theme operations; `show` when omitted.
#[derive(Debug, Clone, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set a specific theme
    Set {
        /// `light` or `dark`
        #[arg(value_name = "THEME")]
        theme: Theme,
    },
}

/// Arguments for `digest`.
#[derive(Debug, Args)]
pub struct DigestArgs {
    /// Text to hash
    #[arg(value_name = "INPUT")]
    pub input: String,
}
