use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Pending,
    Publish,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Publish => "publish",
        };
        f.write_str(s)
    }
}

impl FromStr for PostStatus {
    type Err = PostStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "publish" => Ok(Self::Publish),
            other => Err(PostStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PostStatus`] string.
#[derive(Debug, Clone)]
pub struct PostStatusParseError(pub String);

impl fmt::Display for PostStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid post status: {:?}", self.0)
    }
}

impl std::error::Error for PostStatusParseError {}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A row in the `posts` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub post_type: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A row in the `post_meta` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PostMeta {
    pub post_id: Uuid,
    pub meta_key: String,
    pub meta_value: String,
}

/// A row in the `tags` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}
