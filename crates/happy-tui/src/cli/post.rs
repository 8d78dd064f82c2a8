// ABOUTME: Post command implementation for CLI scripting.
// ABOUTME: Validates locally, posts, and records the thought in the session's sent list.

use std::io::Write;

use happy_client::{validate_message, ThoughtStore};

use super::check_store_error;
use crate::error::Result;

pub async fn run(store: &mut ThoughtStore, message: &str, out: &mut impl Write) -> Result<()> {
    // Nothing is sent for an invalid message
    let message = validate_message(message)?;

    store.post_thought(message).await;
    check_store_error(store)?;

    if let Some(thought) = store.state().sent_thoughts.first() {
        writeln!(out, "Posted {}: {}", thought.id, thought.message)?;
    }
    Ok(())
}
