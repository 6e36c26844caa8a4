use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(clap::Parser)]
#[command(name = "tribute", about = "Browse and contribute to the tribute site")]
pub struct Cli {
    #[arg(short, long, default_value = "tribute")]
    pub config_file: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Landing page
    Home,
    /// The story timeline
    Story,
    /// Posts that carry an image
    Gallery {
        #[arg(long)]
        oldest: bool,
    },
    /// All letters, newest first
    Letters,
    /// One letter in full
    Letter { id: Uuid },
    WriteLetter {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        author: String,
    },
    /// Comic pages, or read them one at a time with --read
    Comic {
        #[arg(long)]
        read: bool,
    },
    /// The tribute wall; --watch keeps listening for new posts
    Wall {
        #[arg(long)]
        watch: bool,
    },
    /// Post a message to the tribute wall, optionally with an image
    Post {
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Render the page at a site path, e.g. `/letters`
    Open { path: String },
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}
