//! Repository management commands. All of them require the owner view.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::commands::require_owner;
use crate::output;
use crate::session::CliSession;
use crate::views;

#[derive(Args, Debug)]
pub struct ReposCommand {
    #[command(subcommand)]
    pub command: ReposSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ReposSubcommand {
    /// List linked repositories
    List(ListArgs),

    /// Link a repository
    Add(AddArgs),

    /// Remove a linked repository by title (or backend id)
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page to show
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Print the current page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Repository URL (http or https)
    #[arg(long)]
    pub link: String,

    /// Display title
    #[arg(long)]
    pub title: String,

    /// Optional description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Title of the entry, or its id when the backend assigns one
    pub key: String,
}

pub async fn handle(session: &CliSession, cmd: ReposCommand) -> Result<()> {
    let user = require_owner(session).await?;
    debug!(username = user.username(), "Owner access granted");

    match cmd.command {
        ReposSubcommand::List(args) => list(session, args).await,
        ReposSubcommand::Add(args) => add(session, args).await,
        ReposSubcommand::Delete(args) => delete(session, args).await,
    }
}

async fn list(session: &CliSession, args: ListArgs) -> Result<()> {
    let mut repositories = session.repositories();
    if let Err(e) = repositories.list().await.map(|_| ()) {
        views::repositories(&repositories, session.max_visible_pages());
        return Err(e).context("Failed to list repositories");
    }

    repositories.go_to_page(args.page);
    if repositories.pagination().current_page() != args.page {
        output::hint(&format!(
            "Page {} is out of range, showing page {}",
            args.page,
            repositories.pagination().current_page()
        ));
    }

    if args.json {
        return output::json_pretty(&repositories.current_page());
    }

    views::repositories(&repositories, session.max_visible_pages());
    Ok(())
}

async fn add(session: &CliSession, args: AddArgs) -> Result<()> {
    let mut repositories = session.repositories();
    repositories
        .create(&args.link, &args.title, args.description.as_deref())
        .await
        .context("Failed to add repository")?;

    output::success(&format!("Added {}", args.title.bold()));
    output::field(
        "Repositories",
        &repositories.state().entries().len().to_string(),
    );
    Ok(())
}

async fn delete(session: &CliSession, args: DeleteArgs) -> Result<()> {
    let mut repositories = session.repositories();
    repositories
        .delete(&args.key)
        .await
        .context("Failed to delete repository")?;

    output::success(&format!("Deleted {}", args.key.bold()));
    Ok(())
}
