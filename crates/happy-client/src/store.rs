// ABOUTME: Client state store wrapping the thoughts API
// ABOUTME: Holds feed, liked/sent lists, error and filter; persists liked/sent to session storage

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::ThoughtsApi;
use crate::error::{ApiError, StorageError};
use crate::models::{Filter, LikeAction, Thought};
use crate::storage::SessionStorage;

/// Key of the persisted blob in session storage.
pub const STORAGE_KEY: &str = "thought-storage";

const STORAGE_VERSION: u32 = 0;

/// Everything the view renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    /// `None` until the first successful fetch.
    pub thoughts: Option<Vec<Thought>>,
    /// Thoughts the local user has liked, in the order they were liked.
    pub liked_thoughts: Vec<Thought>,
    /// Thoughts created from this session, newest first.
    pub sent_thoughts: Vec<Thought>,
    pub error: Option<String>,
    pub filter: Filter,
    pub loading: bool,
}

impl ClientState {
    pub fn is_liked(&self, thought_id: &str) -> bool {
        self.liked_thoughts.iter().any(|t| t.id == thought_id)
    }
}

/// The subset of [`ClientState`] that survives a restart within a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub liked_thoughts: Vec<Thought>,
    #[serde(default)]
    pub sent_thoughts: Vec<Thought>,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

impl PersistedState {
    /// Serialize as `{"state": {...}, "version": 0}`.
    pub fn to_blob(&self) -> Result<String, StorageError> {
        let envelope = Envelope {
            state: self.clone(),
            version: STORAGE_VERSION,
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    pub fn from_blob(blob: &str) -> Result<Self, StorageError> {
        let envelope: Envelope = serde_json::from_str(blob)?;
        if envelope.version != STORAGE_VERSION {
            return Err(StorageError::Corrupt(format!(
                "unsupported version {}",
                envelope.version
            )));
        }
        Ok(envelope.state)
    }

    /// Read the blob from `storage`. Missing or unreadable blobs give empty state.
    pub fn load(storage: &dyn SessionStorage) -> Self {
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(blob)) => Self::from_blob(&blob).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring unreadable persisted state");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session storage");
                Self::default()
            }
        }
    }
}

/// Identifies one fetch so that only the latest fetch's result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

/// A request ready to be sent, detached from the store so it can run on
/// another task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Fetch(FetchTicket),
    Post(String),
    Like { id: String, action: LikeAction },
}

impl Request {
    /// Perform the round trip. Never fails: errors travel inside the completion.
    pub async fn send(self, api: &dyn ThoughtsApi) -> Completion {
        match self {
            Request::Fetch(ticket) => Completion::Fetched(ticket, api.list_thoughts().await),
            Request::Post(message) => Completion::Posted(api.create_thought(&message).await),
            Request::Like { id, action } => {
                let result = api.like_thought(&id, action).await;
                Completion::Liked { id, result }
            }
        }
    }
}

/// Outcome of a [`Request`], applied back onto the store with [`ThoughtStore::apply`].
#[derive(Debug)]
pub enum Completion {
    Fetched(FetchTicket, Result<Vec<Thought>, ApiError>),
    Posted(Result<Thought, ApiError>),
    /// Carries the requested id so callers can match failures too.
    Liked {
        id: String,
        result: Result<Thought, ApiError>,
    },
}

/// Client state container. Owns the state and talks to the service through
/// an injected [`ThoughtsApi`].
///
/// Every operation catches its own failures and records them in
/// [`ClientState::error`]; nothing is returned to the caller.
pub struct ThoughtStore {
    api: Arc<dyn ThoughtsApi>,
    storage: Box<dyn SessionStorage>,
    state: ClientState,
    fetch_seq: u64,
}

impl ThoughtStore {
    /// A store with empty state. Nothing is read from `storage`.
    pub fn new(api: Arc<dyn ThoughtsApi>, storage: Box<dyn SessionStorage>) -> Self {
        Self {
            api,
            storage,
            state: ClientState::default(),
            fetch_seq: 0,
        }
    }

    /// A store with liked/sent lists restored from `storage`.
    pub fn restore(api: Arc<dyn ThoughtsApi>, storage: Box<dyn SessionStorage>) -> Self {
        let persisted = PersistedState::load(storage.as_ref());
        tracing::debug!(
            liked = persisted.liked_thoughts.len(),
            sent = persisted.sent_thoughts.len(),
            "Restored session state"
        );
        let mut store = Self::new(api, storage);
        store.state.liked_thoughts = persisted.liked_thoughts;
        store.state.sent_thoughts = persisted.sent_thoughts;
        store
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Shared handle to the API, for running requests on other tasks.
    pub fn api(&self) -> Arc<dyn ThoughtsApi> {
        Arc::clone(&self.api)
    }

    // ------------------------------------------------------------------
    // Fetch
    // ------------------------------------------------------------------

    /// Reload the whole feed.
    pub async fn fetch_thoughts(&mut self) {
        let request = self.begin_fetch();
        let completion = request.send(self.api.as_ref()).await;
        self.apply(completion);
    }

    /// Start a fetch: set loading, clear the error, reset the filter to all.
    /// Supersedes any fetch still in flight.
    pub fn begin_fetch(&mut self) -> Request {
        self.fetch_seq += 1;
        self.state.loading = true;
        self.state.error = None;
        self.state.filter = Filter::All;
        tracing::debug!(seq = self.fetch_seq, "Fetching thoughts");
        Request::Fetch(FetchTicket {
            seq: self.fetch_seq,
        })
    }

    fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Thought>, ApiError>) {
        if ticket.seq != self.fetch_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.fetch_seq,
                "Discarding stale fetch result"
            );
            return;
        }

        match result {
            Ok(thoughts) => {
                tracing::debug!(count = thoughts.len(), "Fetched thoughts");
                self.state.thoughts = Some(thoughts);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Fetch failed");
                self.state.error = Some(format!("Error fetching thoughts: {}", e));
            }
        }
        self.state.loading = false;
    }

    // ------------------------------------------------------------------
    // Post
    // ------------------------------------------------------------------

    /// Create a thought. The message is sent as given; validation is the
    /// caller's job.
    pub async fn post_thought(&mut self, message: &str) {
        let completion = Request::Post(message.to_string())
            .send(self.api.as_ref())
            .await;
        self.apply(completion);
    }

    fn complete_post(&mut self, result: Result<Thought, ApiError>) {
        match result {
            Ok(thought) => {
                tracing::debug!(thought_id = %thought.id, "Posted thought");
                self.state
                    .thoughts
                    .get_or_insert_with(Vec::new)
                    .insert(0, thought.clone());
                self.state.sent_thoughts.insert(0, thought);
                self.persist();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Post failed");
                self.state.error = Some(format!("Error posting thoughts: {}", e));
            }
        }
    }

    // ------------------------------------------------------------------
    // Like
    // ------------------------------------------------------------------

    pub async fn like_thought(&mut self, thought_id: &str, action: LikeAction) {
        let request = Request::Like {
            id: thought_id.to_string(),
            action,
        };
        let completion = request.send(self.api.as_ref()).await;
        self.apply(completion);
    }

    fn complete_like(&mut self, result: Result<Thought, ApiError>) {
        match result {
            Ok(updated) => {
                tracing::debug!(
                    thought_id = %updated.id,
                    hearts = updated.like_count,
                    "Updated likes"
                );
                self.record_liked_thoughts(&updated);
                if let Some(thoughts) = self.state.thoughts.as_mut() {
                    for thought in thoughts.iter_mut().filter(|t| t.id == updated.id) {
                        *thought = updated.clone();
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Like failed");
                self.state.error = Some(format!("Failed to post likes: {}", e));
            }
        }
    }

    /// Toggle `thought` in the liked set, matching on id.
    fn record_liked_thoughts(&mut self, thought: &Thought) {
        let liked = &mut self.state.liked_thoughts;
        if liked.iter().any(|t| t.id == thought.id) {
            liked.retain(|t| t.id != thought.id);
        } else {
            liked.push(thought.clone());
        }
        self.persist();
    }

    // ------------------------------------------------------------------
    // Completions, filter, error
    // ------------------------------------------------------------------

    /// Apply the outcome of a request started with [`begin_fetch`](Self::begin_fetch)
    /// or built by hand.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Fetched(ticket, result) => self.complete_fetch(ticket, result),
            Completion::Posted(result) => self.complete_post(result),
            Completion::Liked { result, .. } => self.complete_like(result),
        }
    }

    /// Set the active filter. Returns true when the caller should refresh
    /// the feed (the filter is `All`).
    pub fn set_filter(&mut self, filter: Filter) -> bool {
        self.state.filter = filter;
        filter == Filter::All
    }

    /// Set the filter and, for `All`, refresh the feed.
    pub async fn select_filter(&mut self, filter: Filter) {
        if self.set_filter(filter) {
            self.fetch_thoughts().await;
        }
    }

    /// Set or clear the error. An empty message clears it.
    pub fn set_error(&mut self, message: Option<String>) {
        self.state.error = message.filter(|m| !m.is_empty());
    }

    fn persist(&self) {
        let persisted = PersistedState {
            liked_thoughts: self.state.liked_thoughts.clone(),
            sent_thoughts: self.state.sent_thoughts.clone(),
        };
        let result = persisted
            .to_blob()
            .and_then(|blob| self.storage.set_item(STORAGE_KEY, &blob));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist session state");
        }
    }
}
