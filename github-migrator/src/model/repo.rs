//! Repository metadata and membership.

use serde::{Deserialize, Serialize};

/// The parts of a repository needed to rewrite links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Full name in "owner/name" format.
    pub full_name: String,
    /// Web base URL of the repository.
    pub html_url: String,
}

/// An account that may be mentioned or assigned on the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub login: String,
}

impl Member {
    /// Creates a member from a login.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}
