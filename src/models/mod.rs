pub mod cli;
pub mod letter;
pub mod notice;
pub mod post;
pub mod view;

pub use cli::{Cli, Command};
pub use letter::{Letter, NewLetter};
pub use notice::{Notice, NoticeKind, ValidationError};
pub use post::{NewPost, Post, PostOrder};
pub use view::ViewState;
