// ABOUTME: Data models for happy-client
// ABOUTME: Thought, LikeAction, Filter and local message validation

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shortest message the service accepts.
pub const MIN_MESSAGE_LEN: usize = 5;
/// Longest message the service accepts.
pub const MAX_MESSAGE_LEN: usize = 140;

/// A single user-submitted message, as returned by the service.
///
/// Field names follow the service's JSON: `_id`, `hearts`, `createdAt`.
/// Unknown fields (e.g. `__v`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thought {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
    #[serde(rename = "hearts", default)]
    pub like_count: u32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Body of the create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewThought<'a> {
    pub message: &'a str,
}

/// Like or unlike, sent as the last path segment of the like endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeAction::Like => "like",
            LikeAction::Unlike => "unlike",
        }
    }

    /// The action that toggles a thought given whether it is currently liked.
    pub fn toggle_for(already_liked: bool) -> Self {
        if already_liked {
            LikeAction::Unlike
        } else {
            LikeAction::Like
        }
    }
}

impl fmt::Display for LikeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which subset of thoughts the view shows.
///
/// Only `All` has store-side behavior (it triggers a refresh).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Liked,
    Sent,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Liked => "liked",
            Filter::Sent => "sent",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "liked" => Ok(Filter::Liked),
            "sent" => Ok(Filter::Sent),
            other => Err(format!("unknown filter '{}'", other)),
        }
    }
}

/// Check a pending message against the length bounds before it is posted.
///
/// Length counts Unicode scalar values, inclusive on both ends
/// (`>= 5 && <= 140`). Whitespace counts; the message is returned as given.
pub fn validate_message(message: &str) -> Result<&str, ValidationError> {
    let len = message.chars().count();
    if (MIN_MESSAGE_LEN..=MAX_MESSAGE_LEN).contains(&len) {
        Ok(message)
    } else {
        Err(ValidationError { len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIRE: &str = r#"{
        "_id": "64b7f3a2c9e77c0012345678",
        "message": "Sunny day at the beach",
        "hearts": 3,
        "createdAt": "2023-07-19T14:30:00.000Z",
        "__v": 0
    }"#;

    #[test]
    fn test_thought_deserializes_wire_format() {
        let thought: Thought = serde_json::from_str(WIRE).unwrap();
        assert_eq!(thought.id, "64b7f3a2c9e77c0012345678");
        assert_eq!(thought.message, "Sunny day at the beach");
        assert_eq!(thought.like_count, 3);
        assert_eq!(thought.created_at.to_rfc3339(), "2023-07-19T14:30:00+00:00");
    }

    #[test]
    fn test_thought_missing_hearts_defaults_to_zero() {
        let json = r#"{"_id":"a1","message":"hello there","createdAt":"2023-07-19T14:30:00Z"}"#;
        let thought: Thought = serde_json::from_str(json).unwrap();
        assert_eq!(thought.like_count, 0);
    }

    #[test]
    fn test_thought_serializes_with_wire_names() {
        let thought: Thought = serde_json::from_str(WIRE).unwrap();
        let value = serde_json::to_value(&thought).unwrap();
        assert_eq!(value["_id"], "64b7f3a2c9e77c0012345678");
        assert_eq!(value["hearts"], 3);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("like_count").is_none());
    }

    #[test]
    fn test_new_thought_body() {
        let body = serde_json::to_string(&NewThought { message: "hello" }).unwrap();
        assert_eq!(body, r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_like_action_segments() {
        assert_eq!(LikeAction::Like.to_string(), "like");
        assert_eq!(LikeAction::Unlike.to_string(), "unlike");
        assert_eq!(LikeAction::toggle_for(false), LikeAction::Like);
        assert_eq!(LikeAction::toggle_for(true), LikeAction::Unlike);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert_eq!(" Liked ".parse::<Filter>(), Ok(Filter::Liked));
        assert_eq!("sent".parse::<Filter>(), Ok(Filter::Sent));
        assert!("popular".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn test_validate_message_bounds() {
        assert!(validate_message("four").is_err());
        assert_eq!(validate_message("hello"), Ok("hello"));
        assert!(validate_message(&"a".repeat(140)).is_ok());
        assert_eq!(
            validate_message(&"a".repeat(141)),
            Err(ValidationError { len: 141 })
        );
    }

    #[test]
    fn test_validate_message_keeps_whitespace() {
        assert_eq!(validate_message("  hey "), Ok("  hey "));
        assert_eq!(validate_message("hello world "), Ok("hello world "));
        assert_eq!(validate_message("  hi"), Err(ValidationError { len: 4 }));
        assert_eq!(validate_message("héllo"), Ok("héllo"));
        // 140 multi-byte characters still fit
        assert!(validate_message(&"é".repeat(140)).is_ok());
    }
}
