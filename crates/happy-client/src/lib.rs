// ABOUTME: Happy Thoughts client library shared by the TUI and CLI
// ABOUTME: Provides the HTTP API client, session storage and the client state store

mod api;
mod error;
mod models;
mod storage;
mod store;

pub use api::{HttpThoughtsApi, ThoughtsApi, DEFAULT_BASE_URL};
pub use error::{ApiError, StorageError, ValidationError};
pub use models::*;
pub use storage::{
    default_session_dir, default_session_id, sanitize_session_id, FileSessionStorage,
    MemoryStorage, SessionStorage,
};
pub use store::{
    ClientState, Completion, FetchTicket, PersistedState, Request, ThoughtStore, STORAGE_KEY,
};
