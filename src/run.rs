use crate::comic::{resolve_pages, DirectoryAssets, ReaderInput, ReaderState};
use crate::configuration::Settings;
use crate::models::{Command, Letter, NewLetter, NewPost, Notice, PostOrder, ViewState};
use crate::realtime::RealtimeFeed;
use crate::routes::Route;
use crate::store::{self, DataStore, ObjectStorage, StoreError};
use crate::supabase_client::SupabaseClient;
use crate::views::{self, comic, gallery, home, letters, story, wall, wall::TributeWall};
use anyhow::Context;
use log::{debug, error, info};
use resolve_path::PathResolveExt;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use uuid::Uuid;

pub async fn run(settings: Settings, command: Command) -> anyhow::Result<()> {
    let asset_directory = settings.comic.asset_directory.resolve().into_owned();
    info!("Comic pages: {}", asset_directory.display());
    let assets = DirectoryAssets::new(asset_directory, &settings.comic.url_prefix);

    info!("Backend: {}", settings.supabase.url);
    let client = SupabaseClient::new(
        &settings.supabase,
        Duration::from_secs(settings.realtime.poll_interval_secs),
    );
    let site = Site::new(client, assets);
    let mut stdout = tokio::io::stdout();

    match command {
        Command::Comic { read: true } => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            site.read_comic(stdin, &mut stdout).await?;
        }
        Command::Wall { watch: true } => {
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Unable to listen for Ctrl-C: {}", e);
                }
            };
            site.watch_wall(&mut stdout, shutdown).await?;
        }
        Command::Post {
            content,
            author,
            image,
        } => {
            let notice = site.post_message(&content, &author, image.as_deref()).await;
            stdout.write_all(format!("{}\n", notice).as_bytes()).await?;
        }
        Command::WriteLetter {
            title,
            content,
            author,
        } => {
            let notice = site.write_letter(&title, &content, &author).await;
            stdout.write_all(format!("{}\n", notice).as_bytes()).await?;
        }
        Command::Gallery { oldest: true } => {
            let page = site.gallery(PostOrder::Oldest).await;
            stdout.write_all(page.as_bytes()).await?;
        }
        other => {
            let route = route_for(other);
            debug!("Rendering {}", route);
            let page = site.page(&route).await;
            stdout.write_all(page.as_bytes()).await?;
        }
    }
    stdout.flush().await?;
    Ok(())
}

fn route_for(command: Command) -> Route {
    match command {
        Command::Home => Route::Home,
        Command::Story => Route::Story,
        Command::Gallery { .. } => Route::Gallery,
        Command::Letters => Route::Letters,
        Command::Letter { id } => Route::Letter(id),
        Command::WriteLetter { .. } => Route::WriteLetter,
        Command::Comic { .. } => Route::Comic,
        Command::Wall { .. } | Command::Post { .. } => Route::Wall,
        Command::Open { path } => Route::parse(&path),
    }
}

/// Logs a failed load; the page only shows a generic message.
fn loaded<T>(result: Result<T, StoreError>, what: &str) -> ViewState<T> {
    if let Err(e) = &result {
        error!("Error fetching {}: {}", what, e);
    }
    ViewState::from_result(result)
}

/// The site's pages and actions on top of a backend.
pub struct Site<B> {
    backend: B,
    assets: DirectoryAssets,
}

impl<B> Site<B>
where
    B: DataStore + ObjectStorage + RealtimeFeed,
{
    pub fn new(backend: B, assets: DirectoryAssets) -> Self {
        Self { backend, assets }
    }

    pub async fn page(&self, route: &Route) -> String {
        match route {
            Route::Home => {
                let recent = self.backend.recent_posts(home::PREVIEW_POSTS).await;
                home::render(&loaded(recent, "recent posts").non_empty())
            }
            Route::Story => story::render(),
            Route::Gallery => self.gallery(PostOrder::Newest).await,
            Route::Letters => {
                let state = loaded(self.backend.list_letters().await, "letters").non_empty();
                letters::render_list(&state)
            }
            Route::Letter(id) => letters::render_detail(&self.letter(*id).await),
            Route::WriteLetter => write_letter_form(),
            Route::Comic => comic::render_grid(&resolve_pages(&self.assets).into_view()),
            Route::Wall => self.wall().await.render(),
            Route::NotFound(path) => views::not_found(path),
        }
    }

    pub async fn gallery(&self, order: PostOrder) -> String {
        let state = match loaded(self.backend.list_posts(order).await, "posts") {
            ViewState::Ready(posts) => gallery::with_images(posts),
            other => other,
        };
        gallery::render(&state)
    }

    async fn letter(&self, id: Uuid) -> ViewState<Letter> {
        match self.backend.get_letter(id).await {
            Ok(Some(letter)) => ViewState::Ready(letter),
            Ok(None) => ViewState::Empty,
            Err(e) => {
                error!("Error fetching letter {}: {}", id, e);
                ViewState::Error(e.to_string())
            }
        }
    }

    pub async fn wall(&self) -> TributeWall {
        let mut wall = TributeWall::new();
        wall.loaded(loaded(self.backend.list_posts(PostOrder::Newest).await, "posts").non_empty());
        wall
    }

    pub async fn post_message(&self, content: &str, author: &str, image: Option<&Path>) -> Notice {
        let post = match NewPost::new(content, author) {
            Ok(post) => post,
            Err(_) if image.is_some() => {
                return Notice::destructive(
                    "Add a Message",
                    "Please write a message to go with your image",
                )
            }
            Err(e) => return e.into(),
        };

        match image {
            None => match self.backend.insert_post(&post).await {
                Ok(row) => {
                    info!("Posted message {}", row.id);
                    Notice::success(
                        "Message Posted!",
                        "Your message has been added to the community wall",
                    )
                }
                Err(e) => {
                    error!("Error posting message: {}", e);
                    Notice::failure("Failed to post message. Please try again.")
                }
            },
            Some(path) => match self.post_with_image(post, path).await {
                Ok(()) => Notice::success("Post Created!", "Your message and image have been shared"),
                Err(e) => {
                    error!("Error uploading {}: {:#}", path.display(), e);
                    Notice::failure("Failed to upload image")
                }
            },
        }
    }

    async fn post_with_image(&self, post: NewPost, path: &Path) -> anyhow::Result<()> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let name = store::object_name(path);
        let url = self
            .backend
            .upload(&name, bytes, store::content_type(path))
            .await?;
        debug!("Uploaded {} to {}", path.display(), url);
        let row = self.backend.insert_post(&post.with_image(url)).await?;
        info!("Posted image message {}", row.id);
        Ok(())
    }

    pub async fn write_letter(&self, title: &str, content: &str, author: &str) -> Notice {
        let letter = match NewLetter::new(title, content, author) {
            Ok(letter) => letter,
            Err(e) => return e.into(),
        };
        match self.backend.insert_letter(&letter).await {
            Ok(row) => {
                info!("Letter {} sent", row.id);
                Notice::success("Letter Sent!", "Your heartfelt letter has been shared with love")
            }
            Err(e) => {
                error!("Error submitting letter: {}", e);
                Notice::failure("Failed to send letter. Please try again.")
            }
        }
    }

    /// Interactive comic reader driven by one command per input line.
    pub async fn read_comic<R, W>(&self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let pages = resolve_pages(&self.assets).pages().to_vec();
        let mut reader = ReaderState::new(pages.len());

        output.write_all(comic::render(&pages, &reader).as_bytes()).await?;
        output.write_all(format!("\n{}\n", comic::READER_HELP).as_bytes()).await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match ReaderInput::parse(&line) {
                Some(input) => {
                    reader.handle(input);
                    output.write_all(comic::render(&pages, &reader).as_bytes()).await?;
                }
                None => {
                    output.write_all(format!("{}\n", comic::READER_HELP).as_bytes()).await?;
                }
            }
            output.flush().await?;
        }
        Ok(())
    }

    /// Shows the wall, then adds new posts as they arrive until `shutdown`.
    pub async fn watch_wall<W, S>(&self, mut output: W, shutdown: S) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        // Subscribe before loading so nothing posted in between is missed.
        let subscription = match self.backend.subscribe_posts().await {
            Ok(sub) => Some(sub),
            Err(e) => {
                error!("Unable to listen for new posts: {}", e);
                None
            }
        };

        let mut wall = self.wall().await;
        output.write_all(wall.render().as_bytes()).await?;
        output.flush().await?;

        let Some(mut subscription) = subscription else {
            return Ok(());
        };
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                post = subscription.recv() => {
                    let Some(post) = post else { break };
                    if wall.prepend(post.clone()) {
                        output.write_all(wall::render_post(&post).as_bytes()).await?;
                        output.flush().await?;
                    }
                }
            }
        }
        info!("Stopped watching the tribute wall");
        Ok(())
    }
}

fn write_letter_form() -> String {
    let mut out = views::heading(
        "Write a Letter",
        "Share your thoughts, memories, and appreciation for Gauta",
    );
    out.push_str("tribute write-letter --author <your name> --title <letter title> --content <your message>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::fs::File;
    use tempfile::TempDir;

    fn site() -> (Site<MemoryStore>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let assets = DirectoryAssets::new(dir.path(), "/comicpages");
        (Site::new(MemoryStore::new(), assets), dir)
    }

    #[tokio::test]
    async fn posting_shows_on_the_wall() {
        let (site, _dir) = site();
        let notice = site.post_message("  We love you ", "", None).await;
        assert_eq!(notice.title, "Message Posted!");

        let page = site.page(&Route::parse("/messages")).await;
        assert!(page.contains("We love you\n— Anonymous"));
    }

    #[tokio::test]
    async fn home_previews_recent_posts() {
        let (site, _dir) = site();
        let page = site.page(&Route::Home).await;
        assert!(page.contains("No messages yet. Be the first to share a memory!"));

        site.post_message("Recent memory", "Ana", None).await;
        let page = site.page(&Route::Home).await;
        assert!(page.contains("Recent memory\n— Ana"));
        assert!(!page.contains("No messages yet"));

        for n in 1..=4 {
            site.post_message(&format!("Later memory {}", n), "", None).await;
        }
        let page = site.page(&Route::Home).await;
        assert!(page.contains("Later memory 4"));
        assert!(!page.contains("Recent memory"));

        site.backend.set_failing(true);
        assert!(site.page(&Route::Home).await.contains("Something went wrong"));
    }

    #[tokio::test]
    async fn blank_message_is_not_sent() {
        let (site, _dir) = site();
        let notice = site.post_message("   ", "Sam", None).await;
        assert_eq!(notice.title, "Missing Message");
        assert!(site.backend.list_posts(PostOrder::Newest).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn image_posts_upload_then_insert() {
        let (site, dir) = site();
        let image = dir.path().join("beach.PNG");
        std::fs::write(&image, [137, 80, 78, 71]).unwrap();

        let notice = site.post_message("Beach day", "Ana", Some(&image)).await;
        assert_eq!(notice.title, "Post Created!");

        let posts = site.backend.list_posts(PostOrder::Newest).await.unwrap();
        let url = posts[0].image_url.clone().unwrap();
        let name = url.strip_prefix("memory://objects/").unwrap();
        assert!(name.ends_with(".png"));
        assert_eq!(site.backend.object(name), Some(vec![137, 80, 78, 71]));

        assert!(site.page(&Route::Gallery).await.contains("Beach day"));
    }

    #[tokio::test]
    async fn image_needs_a_message() {
        let (site, dir) = site();
        let image = dir.path().join("a.png");
        File::create(&image).unwrap();
        let notice = site.post_message("", "", Some(&image)).await;
        assert_eq!(notice.title, "Add a Message");
    }

    #[tokio::test]
    async fn missing_image_file_is_a_failure_notice() {
        let (site, dir) = site();
        let notice = site
            .post_message("hi", "", Some(&dir.path().join("missing.png")))
            .await;
        assert_eq!(notice, Notice::failure("Failed to upload image"));
        assert!(site.backend.list_posts(PostOrder::Newest).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn backend_failures_are_not_fatal() {
        let (site, _dir) = site();
        site.backend.set_failing(true);

        let notice = site.write_letter("Dear", "words", "me").await;
        assert_eq!(notice, Notice::failure("Failed to send letter. Please try again."));

        let page = site.page(&Route::Letters).await;
        assert!(page.contains("Something went wrong"));
    }

    #[tokio::test]
    async fn letters_flow() {
        let (site, _dir) = site();
        assert!(site.page(&Route::Letters).await.contains("No Letters Yet"));

        let notice = site.write_letter("Dear Gauta", "Thank you", "Sam").await;
        assert_eq!(notice.title, "Letter Sent!");

        let letter = site.backend.list_letters().await.unwrap().remove(0);
        let page = site.page(&Route::Letter(letter.id)).await;
        assert!(page.contains("Thank you"));
        assert!(page.contains("With love, Sam"));

        let missing = site.page(&Route::Letter(Uuid::new_v4())).await;
        assert!(missing.contains("Letter Not Found"));
    }

    #[tokio::test]
    async fn letter_needs_every_field() {
        let (site, _dir) = site();
        let notice = site.write_letter("Dear", "", "Sam").await;
        assert_eq!(notice.title, "Missing Message");
        let notice = site.write_letter("", "words", "Sam").await;
        assert_eq!(notice.title, "Missing Information");
    }

    #[tokio::test]
    async fn unknown_route_renders_not_found() {
        let (site, _dir) = site();
        let page = site.page(&Route::parse("/nowhere")).await;
        assert!(page.contains("404"));
        assert!(page.contains("/nowhere"));
    }

    #[tokio::test]
    async fn comic_falls_back_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let assets = DirectoryAssets::new(dir.path().join("gone"), "/comicpages");
        let site = Site::new(MemoryStore::new(), assets);

        let page = site.page(&Route::Comic).await;
        assert!(page.contains("/comicpages/finalchapter.png"));
    }

    #[tokio::test]
    async fn comic_reader_session() {
        let (site, dir) = site();
        for name in ["chapter10.png", "chapter2.png", "coverpage.png"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let input: &[u8] = b"2\nn\nn\nn\nq\n";
        let mut output = Vec::new();
        site.read_comic(input, &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Page 2 of 3"));
        assert!(output.contains("[/comicpages/chapter10.png]"));
        assert!(!output.contains("Page 4 of 3"));
        // back in the grid after q
        assert!(output.trim_end().ends_with("/comicpages/chapter10.png"));
    }

    #[tokio::test]
    async fn watching_the_wall_prints_new_posts() {
        let (site, _dir) = site();
        let site = std::sync::Arc::new(site);
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let (out_tx, mut out_rx) = tokio::io::duplex(4096);

        let watcher = {
            let site = site.clone();
            tokio::spawn(async move {
                let shutdown = async {
                    let _ = stop_rx.await;
                };
                site.watch_wall(out_tx, shutdown).await.unwrap();
            })
        };

        // wait for the listener to register
        while site.backend.subscriber_count() == 0 {
            tokio::task::yield_now().await;
        }
        site.post_message("Live from the wall", "", None).await;

        let mut seen = String::new();
        let mut buf = [0u8; 1024];
        while !seen.contains("Live from the wall") {
            let n = tokio::io::AsyncReadExt::read(&mut out_rx, &mut buf).await.unwrap();
            seen.push_str(&String::from_utf8_lossy(&buf[..n]));
        }

        stop_tx.send(()).unwrap();
        watcher.await.unwrap();
        assert_eq!(site.backend.subscriber_count(), 0);
    }
}
