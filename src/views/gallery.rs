use super::{heading, render_state, short_date};
use crate::models::{Post, ViewState};

/// Only posts carrying an image appear in the gallery.
pub fn with_images(posts: Vec<Post>) -> ViewState<Vec<Post>> {
    ViewState::from_list(posts.into_iter().filter(|p| p.image_url.is_some()).collect())
}

pub fn render(state: &ViewState<Vec<Post>>) -> String {
    let mut out = heading("Gallery", "A collection of beautiful moments and cherished memories");
    out.push_str(&render_state(
        state,
        "Loading images...",
        "No Images Yet\nBe the first to share a beautiful memory!",
        |posts| {
            let mut body = String::new();
            for post in posts {
                let Some(url) = &post.image_url else { continue };
                body.push_str(&format!("[{}]\n", url));
                if !post.content.is_empty() {
                    body.push_str(&format!("  {}\n", post.content));
                }
                if let Some(author) = &post.author_name {
                    body.push_str(&format!("  — {}\n", author));
                }
                body.push_str(&format!("  {}\n\n", short_date(&post.created_at)));
            }
            body
        },
    ));
    out
}
