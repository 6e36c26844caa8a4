use super::{heading, navigation, render_state, rule};
use crate::models::{Post, ViewState};

/// Posts previewed in the Community Wall section.
pub const PREVIEW_POSTS: usize = 4;

pub fn render(recent: &ViewState<Vec<Post>>) -> String {
    let mut out = heading("For Gauta", "A space built from love, gratitude, and joy");
    out.push_str("Explore Our Story (/story)  ·  View Gallery (/gallery)\n\n");

    out.push_str(rule());
    out.push('\n');
    out.push_str("The Comic: Golden Girl\n");
    out.push_str("A visual journey celebrating friendship and adventure\n\n");
    out.push_str("A Story Worth Telling\n");
    out.push_str("Follow along as our heroine discovers the golden moments that make life\n");
    out.push_str("extraordinary, told page by page.\n");
    out.push_str("Read the Comic (/comic)\n\n");

    out.push_str(rule());
    out.push('\n');
    out.push_str("Community Wall\n");
    out.push_str("Recent messages and memories shared by friends\n\n");
    out.push_str(&render_state(
        recent,
        "Loading messages...",
        "No messages yet. Be the first to share a memory!",
        |posts| posts.iter().take(PREVIEW_POSTS).map(preview).collect(),
    ));
    out.push_str("View All Messages (/messages)\n\n");

    out.push_str(&navigation());
    out.push('\n');
    out
}

fn preview(post: &Post) -> String {
    let mut out = String::new();
    if let Some(url) = &post.image_url {
        out.push_str(&format!("[{}]\n", url));
    }
    out.push_str(&post.content);
    out.push('\n');
    if let Some(author) = post.author_name.as_deref().filter(|a| !a.trim().is_empty()) {
        out.push_str(&format!("— {}\n", author));
    }
    out.push('\n');
    out
}
