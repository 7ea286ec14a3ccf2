//! GitHub REST API collaborators.
//!
//! [`GitHubRepo`] implements both [`crate::repo::SourceRepo`] and
//! [`crate::repo::TargetRepo`] on top of an authenticated [`Octocrab`] client.

mod pager;
mod repository;

pub use pager::IssuePager;
pub use repository::GitHubRepo;

use octocrab::Octocrab;
use tracing::debug;

/// Preview media type enabling the issue import endpoint.
const IMPORT_PREVIEW: &str = "golden-comet";

/// Builds an authenticated client for `endpoint`.
///
/// # Errors
///
/// Returns an error if the endpoint is not a valid URI or the client cannot
/// be constructed.
pub fn build_client(token: &str, endpoint: &str) -> Result<Octocrab, octocrab::Error> {
    debug!(endpoint, "Building GitHub client");
    Octocrab::builder()
        .personal_token(token.to_string())
        .add_preview(IMPORT_PREVIEW)
        .base_uri(endpoint)?
        .build()
}

/// Returns the login of the authenticated user.
///
/// # Errors
///
/// Returns an error if the token is rejected or the endpoint is unreachable.
pub async fn current_user(octocrab: &Octocrab) -> Result<String, octocrab::Error> {
    let user = octocrab.current().user().await?;
    Ok(user.login)
}
