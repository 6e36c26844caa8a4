use super::{heading, render_state, short_date};
use crate::models::{Post, ViewState};

/// Posts shown on the tribute wall, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TributeWall {
    state: ViewState<Vec<Post>>,
}

impl Default for TributeWall {
    fn default() -> Self {
        Self::new()
    }
}

impl TributeWall {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
        }
    }

    pub fn loaded(&mut self, state: ViewState<Vec<Post>>) {
        self.state = state;
    }

    /// Puts a live post at the top. A post already on the wall is ignored.
    pub fn prepend(&mut self, post: Post) -> bool {
        match &mut self.state {
            ViewState::Ready(posts) => {
                if posts.iter().any(|p| p.id == post.id) {
                    return false;
                }
                posts.insert(0, post);
            }
            ViewState::Loading | ViewState::Empty | ViewState::Error(_) => {
                self.state = ViewState::Ready(vec![post]);
            }
        }
        true
    }

    pub fn state(&self) -> &ViewState<Vec<Post>> {
        &self.state
    }

    pub fn render(&self) -> String {
        let mut out = heading(
            "Community Wall",
            "Share your thoughts, memories, and love for Gauta",
        );
        out.push_str(&render_state(
            &self.state,
            "Loading messages...",
            "No Messages Yet\nBe the first to share a message on the community wall!",
            |posts| posts.iter().map(render_post).collect(),
        ));
        out
    }
}

pub fn render_post(post: &Post) -> String {
    let mut out = String::new();
    if let Some(url) = &post.image_url {
        out.push_str(&format!("[{}]\n", url));
    }
    out.push_str(&post.content);
    out.push('\n');
    out.push_str(&format!(
        "— {}  {}\n\n",
        post.author(),
        short_date(&post.created_at)
    ));
    out
}
