use crate::configuration::SupabaseSettings;
use crate::models::{Letter, NewLetter, NewPost, Post, PostOrder};
use crate::realtime::{RealtimeFeed, Subscription};
use crate::store::{DataStore, ObjectStorage, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use url::Url;
use uuid::Uuid;

const POSTS: &str = "posts";
const LETTERS: &str = "letters";

/// Supabase project access with the public anon key: PostgREST tables,
/// storage, and a polled feed of new posts.
#[derive(Clone)]
pub struct SupabaseClient {
    // Reads retry transient failures, writes never do.
    reads: ClientWithMiddleware,
    writes: ClientWithMiddleware,
    base_url: Url,
    anon_key: String,
    media_bucket: String,
    poll_interval: Duration,
}

impl SupabaseClient {
    pub fn new(settings: &SupabaseSettings, poll_interval: Duration) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(settings.retries);
        let reads = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        let writes = ClientBuilder::new(reqwest::Client::new()).build();

        let mut base_url = settings.url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            reads,
            writes,
            base_url,
            anon_key: settings.anon_key.clone(),
            media_bucket: settings.media_bucket.clone(),
            poll_interval,
        }
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        Ok(self.base_url.join(&format!("rest/v1/{}", table))?)
    }

    pub fn public_url(&self, object_name: &str) -> Result<Url, StoreError> {
        Ok(self.base_url.join(&format!(
            "storage/v1/object/public/{}/{}",
            self.media_bucket, object_name
        ))?)
    }

    fn request(&self, client: &ClientWithMiddleware, method: Method, url: Url) -> RequestBuilder {
        client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table)?;
        debug!("GET {} {:?}", url, query);
        let request = self
            .request(&self.reads, Method::GET, url)
            .query(&[("select", "*")])
            .query(query);
        read_json(request).await
    }

    async fn insert<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, StoreError> {
        let url = self.table_url(table)?;
        debug!("POST {}", url);
        let request = self
            .request(&self.writes, Method::POST, url)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .body(serde_json::to_vec(row)?);
        let mut rows: Vec<T> = read_json(request).await?;
        if rows.is_empty() {
            return Err(StoreError::Unavailable(format!(
                "insert into {} returned no row",
                table
            )));
        }
        Ok(rows.swap_remove(0))
    }

    async fn posts_since(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Post>, StoreError> {
        let mut query = vec![("order", "created_at.asc".to_string())];
        if let Some(since) = since {
            query.push((
                "created_at",
                format!("gte.{}", timestamp(&since)),
            ));
        }
        self.select(POSTS, &query).await
    }
}

async fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, StoreError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(StoreError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok(serde_json::from_slice(&body)?)
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn order_param(order: PostOrder) -> String {
    match order {
        PostOrder::Newest => "created_at.desc".into(),
        PostOrder::Oldest => "created_at.asc".into(),
    }
}

#[async_trait]
impl DataStore for SupabaseClient {
    async fn list_posts(&self, order: PostOrder) -> Result<Vec<Post>, StoreError> {
        self.select(POSTS, &[("order", order_param(order))]).await
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        self.select(
            POSTS,
            &[("order", order_param(PostOrder::Newest)), ("limit", limit.to_string())],
        )
        .await
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, StoreError> {
        self.insert(POSTS, post).await
    }

    async fn list_letters(&self) -> Result<Vec<Letter>, StoreError> {
        self.select(LETTERS, &[("order", order_param(PostOrder::Newest))])
            .await
    }

    async fn get_letter(&self, id: Uuid) -> Result<Option<Letter>, StoreError> {
        let mut rows: Vec<Letter> = self
            .select(LETTERS, &[("id", format!("eq.{}", id)), ("limit", "1".into())])
            .await?;
        Ok(rows.pop())
    }

    async fn insert_letter(&self, letter: &NewLetter) -> Result<Letter, StoreError> {
        self.insert(LETTERS, letter).await
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn upload(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let url = self.base_url.join(&format!(
            "storage/v1/object/{}/{}",
            self.media_bucket, object_name
        ))?;
        debug!("Uploading {} bytes to {}", bytes.len(), url);
        let response = self
            .request(&self.writes, Method::POST, url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Unable to read upload error body: {}", e);
                    String::new()
                }
            };
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(self.public_url(object_name)?.to_string())
    }
}

/// Tracks which posts a polling listener has already delivered.
#[derive(Debug, Default)]
struct PollCursor {
    since: Option<DateTime<Utc>>,
    // Ids created exactly at `since`; the next poll sees them again.
    seen: HashSet<Uuid>,
}

impl PollCursor {
    /// Starts after `existing`, every row already stored at the newest timestamp.
    fn starting_after(existing: &[Post]) -> Self {
        let since = existing.iter().map(|p| p.created_at).max();
        let seen = existing
            .iter()
            .filter(|p| Some(p.created_at) == since)
            .map(|p| p.id)
            .collect();
        Self { since, seen }
    }

    /// Keeps the posts not delivered yet, in the order given.
    fn unseen(&mut self, posts: Vec<Post>) -> Vec<Post> {
        let fresh: Vec<Post> = posts
            .into_iter()
            .filter(|p| !self.seen.contains(&p.id))
            .filter(|p| self.since.map_or(true, |since| p.created_at >= since))
            .collect();
        for post in &fresh {
            if self.since.map_or(true, |since| post.created_at > since) {
                self.since = Some(post.created_at);
                self.seen.clear();
            }
            if Some(post.created_at) == self.since {
                self.seen.insert(post.id);
            }
        }
        fresh
    }
}

#[async_trait]
impl RealtimeFeed for SupabaseClient {
    async fn subscribe_posts(&self) -> Result<Subscription<Post>, StoreError> {
        let latest = self.recent_posts(1).await?;
        let existing: Vec<Post> = match latest.first() {
            Some(post) => {
                let at = format!("eq.{}", timestamp(&post.created_at));
                self.select(POSTS, &[("created_at", at)]).await?
            }
            None => Vec::new(),
        };
        let mut cursor = PollCursor::starting_after(&existing);

        let (tx, rx) = mpsc::channel(32);
        let client = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(client.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let posts = match client.posts_since(cursor.since).await {
                    Ok(posts) => posts,
                    Err(e) => {
                        warn!("Polling for new posts failed: {}", e);
                        continue;
                    }
                };
                for post in cursor.unseen(posts) {
                    if tx.send(post).await.is_err() {
                        return;
                    }
                }
            }
        });
        debug!("Listening for new posts every {:?}", self.poll_interval);
        Ok(Subscription::from_task(rx, task))
    }
}
