// ABOUTME: Like command implementation for CLI scripting.
// ABOUTME: Sends a like or unlike and prints the updated heart count.

use std::io::Write;

use happy_client::{Completion, LikeAction, Request, ThoughtStore};

use super::check_store_error;
use crate::error::Result;

pub async fn run(
    store: &mut ThoughtStore,
    id: &str,
    action: LikeAction,
    out: &mut impl Write,
) -> Result<()> {
    let request = Request::Like {
        id: id.to_string(),
        action,
    };
    let completion = request.send(store.api().as_ref()).await;

    // Grab the count before the store takes the completion
    let hearts = match &completion {
        Completion::Liked {
            result: Ok(thought),
            ..
        } => Some(thought.like_count),
        _ => None,
    };

    store.apply(completion);
    check_store_error(store)?;

    if let Some(hearts) = hearts {
        let verb = match action {
            LikeAction::Like => "Liked",
            LikeAction::Unlike => "Unliked",
        };
        writeln!(out, "{} {} (♥ x {})", verb, id, hearts)?;
    }
    Ok(())
}
