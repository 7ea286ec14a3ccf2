//! Import endpoint wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Issue record of an import payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportIssue {
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// Comment record of an import payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportComment {
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// One issue and its comments, submitted exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPayload {
    pub issue: ImportIssue,
    pub comments: Vec<ImportComment>,
}

/// Status of an import job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    Pending,
    Imported,
    Failed,
    /// Any other transient value.
    Other(String),
}

impl ImportStatus {
    /// Returns the status as reported by the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Imported => "imported",
            Self::Failed => "failed",
            Self::Other(status) => status,
        }
    }
}

impl From<&str> for ImportStatus {
    fn from(status: &str) -> Self {
        match status {
            "pending" => Self::Pending,
            "imported" => Self::Imported,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ImportStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = String::deserialize(deserializer)?;
        Ok(Self::from(status.as_str()))
    }
}

/// Job handle returned when the target accepts an import payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportResult {
    pub id: u64,
    pub status: ImportStatus,
}

impl ImportResult {
    /// Creates a job handle.
    #[must_use]
    pub fn new(id: u64, status: ImportStatus) -> Self {
        Self { id, status }
    }
}
