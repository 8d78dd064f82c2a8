// ABOUTME: List command implementation for CLI scripting.
// ABOUTME: Prints the feed, or the liked/sent thoughts kept in session storage.

use std::io::Write;

use chrono::Utc;
use happy_client::{Filter, Thought, ThoughtStore};

use super::check_store_error;
use crate::error::Result;
use crate::types::format_created;

/// Print thoughts for `filter`. Only `all` touches the network.
pub async fn run(
    store: &mut ThoughtStore,
    filter: Filter,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let thoughts: &[Thought] = match filter {
        Filter::All => {
            store.fetch_thoughts().await;
            check_store_error(store)?;
            store.state().thoughts.as_deref().unwrap_or(&[])
        }
        Filter::Liked => &store.state().liked_thoughts,
        Filter::Sent => &store.state().sent_thoughts,
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(thoughts)?)?;
        return Ok(());
    }

    if thoughts.is_empty() {
        writeln!(out, "No {} thoughts.", filter)?;
        return Ok(());
    }

    let now = Utc::now();
    for thought in thoughts {
        let marker = if store.state().is_liked(&thought.id) {
            "♥"
        } else {
            "♡"
        };
        writeln!(
            out,
            "{} {} x {}  {}",
            thought.id,
            marker,
            thought.like_count,
            format_created(thought.created_at, now)
        )?;
        writeln!(out, "    {}", thought.message)?;
    }
    Ok(())
}
