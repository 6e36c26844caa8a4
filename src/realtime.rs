//! Live notifications for newly inserted records.
//!
//! A [`Subscription`] is the only handle to a listener: dropping it
//! deregisters the listener, so a view that owns one stops receiving
//! updates as soon as it goes away.

use crate::models::Post;
use crate::store::StoreError;
use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

#[async_trait]
pub trait RealtimeFeed: Send + Sync {
    /// Starts listening for inserted posts.
    async fn subscribe_posts(&self) -> Result<Subscription<Post>, StoreError>;
}

enum Source<T> {
    Channel(mpsc::Receiver<T>),
    Broadcast(broadcast::Receiver<T>),
}

pub struct Subscription<T> {
    source: Source<T>,
    // Background producer owned by this subscription.
    task: Option<JoinHandle<()>>,
}

impl<T: Clone> Subscription<T> {
    /// Events produced by `task` and sent over `receiver`. The task is
    /// aborted when the subscription is dropped.
    pub fn from_task(receiver: mpsc::Receiver<T>, task: JoinHandle<()>) -> Self {
        Self {
            source: Source::Channel(receiver),
            task: Some(task),
        }
    }

    pub fn from_broadcast(receiver: broadcast::Receiver<T>) -> Self {
        Self {
            source: Source::Broadcast(receiver),
            task: None,
        }
    }

    /// Waits for the next event. `None` once the feed has closed.
    pub async fn recv(&mut self) -> Option<T> {
        match &mut self.source {
            Source::Channel(rx) => rx.recv().await,
            Source::Broadcast(rx) => loop {
                match rx.recv().await {
                    Ok(event) => return Some(event),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!("Realtime listener fell behind, {} events dropped", missed);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            },
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        debug!("Realtime subscription released");
    }
}
