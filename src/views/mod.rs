//! Plain-text renderings of the site's pages.
//!
//! Every page that loads data goes through [`render_state`], so the loading,
//! empty, error and content cases are handled in one place.

pub mod comic;
pub mod gallery;
pub mod home;
pub mod letters;
pub mod story;
pub mod wall;

use crate::models::ViewState;
use crate::routes::NAVIGATION;
use chrono::{DateTime, Utc};

const RULE: &str = "────────────────────────────────────────";

pub fn heading(title: &str, subtitle: &str) -> String {
    let mut out = format!("{}\n{}\n", title, "=".repeat(title.chars().count()));
    if !subtitle.is_empty() {
        out.push_str(subtitle);
        out.push('\n');
    }
    out.push('\n');
    out
}

pub fn rule() -> &'static str {
    RULE
}

pub fn navigation() -> String {
    NAVIGATION
        .iter()
        .map(|(path, label)| format!("{} ({})", label, path))
        .collect::<Vec<_>>()
        .join("  ·  ")
}

pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn long_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Renders whichever state a page is in.
pub fn render_state<T>(
    state: &ViewState<T>,
    loading: &str,
    empty: &str,
    ready: impl FnOnce(&T) -> String,
) -> String {
    match state {
        ViewState::Loading => format!("{}\n", loading),
        ViewState::Empty => format!("{}\n", empty),
        ViewState::Error(_) => "Something went wrong. Please try again later.\n".into(),
        ViewState::Ready(data) => ready(data),
    }
}

pub fn not_found(path: &str) -> String {
    let mut out = heading("404", "Oops! Page not found");
    out.push_str(&format!("Nothing lives at {}.\n", path));
    out.push_str("Return to Home (/)\n");
    out
}
