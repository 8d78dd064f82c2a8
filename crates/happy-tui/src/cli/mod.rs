// ABOUTME: CLI command definitions using clap.
// ABOUTME: Handles subcommands like list, post, like and session.

pub mod like;
pub mod list;
pub mod post;
pub mod session;

use clap::{Args, Parser, Subcommand};
use happy_client::{Filter, ThoughtStore};

use crate::error::{AppError, Result};

#[derive(Parser)]
#[command(name = "happy-thoughts", about = "Happy Thoughts - share what makes you happy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// API base URL override
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session id override ("none" keeps state in memory)
    #[arg(long, global = true)]
    pub session: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the feed, or this session's liked/sent thoughts
    List(ListArgs),
    /// Post a new thought
    Post {
        /// Message (5 to 140 characters)
        message: String,
    },
    /// Like or unlike a thought
    Like {
        /// Thought id
        id: String,
        /// Remove the like instead
        #[arg(long)]
        unlike: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Manage the session storage file
    Session {
        #[command(subcommand)]
        action: Option<SessionAction>,
    },
    /// Generate shell completions
    Completion {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Show version
    Version,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only thoughts liked in this session
    #[arg(long, conflicts_with = "sent")]
    pub liked: bool,
    /// Only thoughts posted in this session
    #[arg(long)]
    pub sent: bool,
    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn filter(&self) -> Filter {
        if self.liked {
            Filter::Liked
        } else if self.sent {
            Filter::Sent
        } else {
            Filter::All
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show config file path
    Path,
    /// Print the effective config
    Show,
}

#[derive(Subcommand, Debug)]
pub enum SessionAction {
    /// Show session file path
    Path,
    /// Delete the session file
    Clear,
}

/// Turn an error the store recorded into a command failure.
fn check_store_error(store: &ThoughtStore) -> Result<()> {
    match &store.state().error {
        Some(message) => Err(AppError::Request(message.clone())),
        None => Ok(()),
    }
}
