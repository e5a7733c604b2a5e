//! Terminal renderings of the dashboard views.

use colored::Colorize;

use arona_core::repo::{ListState, PageItem};
use arona_core::{BotStats, CallbackError, RepositoryList, UserProfile, View};

use crate::output;

/// Page header: title, user and navigation links.
pub fn header(user: &UserProfile, view: View) {
    let title = match view {
        View::Owner => "Owner Panel",
        _ => "Arona Dashboard",
    };

    let owner = if user.is_owner() {
        format!(" {}", "(Owner)".cyan())
    } else {
        String::new()
    };

    output::heading(title);
    println!("{}{}", user.username(), owner);

    match view {
        View::Dashboard if user.is_owner() => output::hint("Owner Panel: arona open /owner"),
        View::Owner => output::hint("Dashboard: arona open /dashboard"),
        _ => {}
    }
    println!();
}

pub fn login(url: &str) {
    output::heading("Arona Dashboard");
    println!("Sign in with Discord:");
    println!("  {}", url.underline());
    output::hint("After signing in, run: arona callback <url you were sent back to>");
}

pub fn loading() {
    println!("{}", "Loading...".dimmed());
}

pub fn not_found(path: &str) {
    output::error(&format!("404: no page at {}", path));
    output::hint("Return to login: arona open /");
}

pub fn redirected(from: &str, to: &str) {
    output::hint(&format!("{} redirected to {}", from, to));
}

/// Error screen for a failed sign-in. Never moves on by itself.
pub fn callback_error(err: &CallbackError) {
    output::error(&err.to_string());
    output::hint("Return to login: arona open /");
}

pub fn stats(stats: &BotStats) {
    for (label, value) in stats.fields() {
        output::field(label, &value);
    }
}

pub fn stats_unavailable() {
    output::error("Bot statistics are unavailable right now.");
}

pub fn profile(user: &UserProfile) {
    output::field("Username", user.username());
    output::field("Avatar", user.avatar_or_default());
    output::field("Owner", if user.is_owner() { "yes" } else { "no" });
}

/// The current page of the repository list, plus the pager.
pub fn repositories(list: &RepositoryList, max_visible: usize) {
    match list.state() {
        ListState::Loading => {
            println!("{}", "Loading source codes...".dimmed());
            return;
        }
        ListState::Failed(_) => {
            output::error("Failed to load source codes.");
            output::hint("Retry: arona repos list");
            return;
        }
        ListState::Loaded(entries) if entries.is_empty() => {
            println!("{}", "No repositories yet.".dimmed());
            output::hint("Add one: arona repos add --link <url> --title <title>");
            return;
        }
        ListState::Loaded(_) => {}
    }

    for entry in list.current_page() {
        println!("{}", entry.title.bold());
        println!("  {}", entry.link.underline());
        if let Some(description) = &entry.description {
            println!("  {}", description.dimmed());
        }
        if entry.id.is_some() {
            output::hint(&format!("  key: {}", entry.key()));
        }
    }

    if list.shows_pager() {
        println!();
        println!("{}", pager(list, max_visible));
    }
}

fn pager(list: &RepositoryList, max_visible: usize) -> String {
    let current = list.pagination().current_page();
    let items: Vec<String> = list
        .page_numbers(max_visible)
        .into_iter()
        .map(|item| match item {
            PageItem::Number(n) if n == current => format!("[{}]", n).bold().to_string(),
            other => other.to_string(),
        })
        .collect();

    format!(
        "Page {} of {}:  {}",
        current,
        list.total_pages(),
        items.join(" ")
    )
}
