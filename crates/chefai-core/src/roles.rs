//! Operator roles and the capabilities they grant.
//!
//! Nobody is authenticated here: the operator declares a role in the config
//! file and the generator checks that role before doing any work.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role of the operator issuing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Editor,
    Author,
    Contributor,
    Subscriber,
}

/// A permission checked before an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Change plugin settings.
    ManageOptions,
    /// Create posts that may later be published.
    PublishPosts,
}

impl Role {
    /// Whether this role grants `cap`.
    pub fn can(self, cap: Capability) -> bool {
        match cap {
            Capability::ManageOptions => matches!(self, Self::Administrator),
            Capability::PublishPosts => {
                matches!(self, Self::Administrator | Self::Editor | Self::Author)
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Administrator => "administrator",
            Self::Editor => "editor",
            Self::Author => "author",
            Self::Contributor => "contributor",
            Self::Subscriber => "subscriber",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManageOptions => f.write_str("manage_options"),
            Self::PublishPosts => f.write_str("publish_posts"),
        }
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(Self::Administrator),
            "editor" => Ok(Self::Editor),
            "author" => Ok(Self::Author),
            "contributor" => Ok(Self::Contributor),
            "subscriber" => Ok(Self::Subscriber),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Role`] string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid role: {0:?} (expected administrator, editor, author, contributor, or subscriber)")]
pub struct RoleParseError(pub String);

/// The person (or script) on whose behalf a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    /// Stored as the post author.
    pub user_id: i64,
    pub role: Role,
}

impl Operator {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn can(&self, cap: Capability) -> bool {
        self.role.can(cap)
    }
}
