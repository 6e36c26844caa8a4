use crate::models::{Letter, NewLetter, NewPost, Post, PostOrder};
use crate::realtime::{RealtimeFeed, Subscription};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest_middleware::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Insert and read access to the `posts` and `letters` collections.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_posts(&self, order: PostOrder) -> Result<Vec<Post>, StoreError>;
    /// At most `limit` posts, newest first.
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.list_posts(PostOrder::Newest).await?;
        posts.truncate(limit);
        Ok(posts)
    }
    async fn insert_post(&self, post: &NewPost) -> Result<Post, StoreError>;
    /// Newest first.
    async fn list_letters(&self) -> Result<Vec<Letter>, StoreError>;
    async fn get_letter(&self, id: Uuid) -> Result<Option<Letter>, StoreError>;
    async fn insert_letter(&self, letter: &NewLetter) -> Result<Letter, StoreError>;
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `object_name` and returns its public URL.
    async fn upload(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;
}

/// Unique storage name for an uploaded file: `{unix_millis}-{random}.{ext}`.
pub fn object_name(file_name: &Path) -> String {
    let random = Uuid::new_v4().simple().to_string();
    let stem = format!("{}-{}", Utc::now().timestamp_millis(), &random[..12]);
    match file_name.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", stem, ext.to_ascii_lowercase()),
        None => stem,
    }
}

pub fn content_type(file_name: &Path) -> &'static str {
    let ext = file_name
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[derive(Default)]
struct Tables {
    posts: Vec<Post>,
    letters: Vec<Letter>,
    objects: HashMap<String, Vec<u8>>,
}

/// In-process store used for tests and offline demos.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    inserted: broadcast::Sender<Post>,
    failing: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let (inserted, _) = broadcast::channel(64);
        Self {
            tables: Mutex::new(Tables::default()),
            inserted,
            failing: AtomicBool::new(false),
        }
    }

    /// Makes every following call fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inserted.receiver_count()
    }

    pub fn object(&self, name: &str) -> Option<Vec<u8>> {
        self.tables.lock().ok()?.objects.get(name).cloned()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store is poisoned".into()))
    }
}

// Newest first; later inserts win ties.
fn newest_first<T>(rows: &[T], created: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T>
where
    T: Clone,
{
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| created(b).cmp(&created(a)));
    out
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list_posts(&self, order: PostOrder) -> Result<Vec<Post>, StoreError> {
        let tables = self.tables()?;
        let mut posts = newest_first(&tables.posts, |p| p.created_at);
        if order == PostOrder::Oldest {
            posts.reverse();
        }
        Ok(posts)
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, StoreError> {
        let row = Post {
            id: Uuid::new_v4(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            author_name: post.author_name.clone(),
            created_at: Utc::now(),
        };
        self.tables()?.posts.push(row.clone());
        // No listeners is fine.
        let _ = self.inserted.send(row.clone());
        Ok(row)
    }

    async fn list_letters(&self) -> Result<Vec<Letter>, StoreError> {
        let tables = self.tables()?;
        Ok(newest_first(&tables.letters, |l| l.created_at))
    }

    async fn get_letter(&self, id: Uuid) -> Result<Option<Letter>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.letters.iter().find(|l| l.id == id).cloned())
    }

    async fn insert_letter(&self, letter: &NewLetter) -> Result<Letter, StoreError> {
        let row = Letter {
            id: Uuid::new_v4(),
            title: letter.title.clone(),
            content: letter.content.clone(),
            author_name: letter.author_name.clone(),
            created_at: Utc::now(),
        };
        self.tables()?.letters.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl ObjectStorage for MemoryStore {
    async fn upload(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StoreError> {
        self.tables()?.objects.insert(object_name.to_string(), bytes);
        Ok(format!("memory://objects/{}", object_name))
    }
}

#[async_trait]
impl RealtimeFeed for MemoryStore {
    async fn subscribe_posts(&self) -> Result<Subscription<Post>, StoreError> {
        Ok(Subscription::from_broadcast(self.inserted.subscribe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn posts_are_listed_in_both_orders() {
        let store = MemoryStore::new();
        for text in ["first", "second", "third"] {
            store
                .insert_post(&NewPost::new(text, "").unwrap())
                .await
                .unwrap();
        }

        let newest: Vec<_> = store
            .list_posts(PostOrder::Newest)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.content)
            .collect();
        assert_eq!(newest, vec!["third", "second", "first"]);

        let oldest: Vec<_> = store
            .list_posts(PostOrder::Oldest)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.content)
            .collect();
        assert_eq!(oldest, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn letter_lookup() {
        let store = MemoryStore::new();
        let letter = store
            .insert_letter(&NewLetter::new("Dear", "words", "me").unwrap())
            .await
            .unwrap();

        assert_eq!(store.get_letter(letter.id).await.unwrap(), Some(letter));
        assert_eq!(store.get_letter(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn inserts_reach_subscribers_until_dropped() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe_posts().await.unwrap();
        assert_eq!(store.subscriber_count(), 1);

        let post = store
            .insert_post(&NewPost::new("live", "").unwrap())
            .await
            .unwrap();
        assert_eq!(sub.recv().await, Some(post));

        drop(sub);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn failing_store_reports_unavailable() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(matches!(
            store.list_letters().await,
            Err(StoreError::Unavailable(_))
        ));
        store.set_failing(false);
        assert!(store.list_letters().await.unwrap().is_empty());
    }

    #[test]
    fn object_names_keep_the_extension() {
        let name = object_name(Path::new("/tmp/Photo.JPG"));
        assert!(name.ends_with(".jpg"));
        let (millis, rest) = name.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(rest.len(), "0123456789ab.jpg".len());

        assert_eq!(content_type(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type(Path::new("a")), "application/octet-stream");
    }
}
