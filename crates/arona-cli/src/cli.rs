//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use arona_core::{API_URL_ENV, DEFAULT_API_URL};

use crate::commands::repos::ReposCommand;

/// Admin dashboard client for the Arona Discord bot.
#[derive(Parser, Debug)]
#[command(name = "arona")]
#[command(author, version = env!("ARONA_VERSION"), about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Backend origin
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Use the legacy cookie session instead of the bearer token
    #[arg(long, global = true)]
    pub cookie_session: bool,

    /// Directory holding the stored token
    #[arg(long, global = true, env = "ARONA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Render the pager for a narrow viewport
    #[arg(long, global = true)]
    pub narrow: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the Discord sign-in URL
    Login,

    /// Complete sign-in from the URL the browser was sent back to
    Callback(CallbackArgs),

    /// Render a dashboard route (/, /dashboard, /owner, /auth-callback)
    Open(OpenArgs),

    /// Display the signed-in user
    Whoami,

    /// Show bot statistics
    Stats,

    /// Manage linked repositories (owner only)
    Repos(ReposCommand),

    /// Sign out
    Logout,
}

#[derive(Args, Debug)]
pub struct CallbackArgs {
    /// Full callback URL, e.g. http://localhost:3000/auth-callback?token=...
    pub url: String,
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Route path, optionally with a query string
    #[arg(default_value = "/")]
    pub path: String,
}
