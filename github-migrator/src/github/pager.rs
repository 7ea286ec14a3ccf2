//! Lazy page-by-page issue listing.

use crate::migrator::MigrateError;
use crate::model::Issue;
use crate::repo::IssueStream;
use octocrab::{Octocrab, Page};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Results per page for list endpoints.
pub(crate) const PER_PAGE: u8 = 100;

/// Query of the first page of a list endpoint. Later pages follow the
/// `Link` header.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<&'static str>,
    pub per_page: u8,
}

impl ListParams {
    /// Full pages with no filters.
    pub(crate) fn plain() -> Self {
        Self {
            state: None,
            sort: None,
            direction: None,
            per_page: PER_PAGE,
        }
    }

    /// Every issue, oldest first.
    pub(crate) fn issues() -> Self {
        Self {
            state: Some("all"),
            sort: Some("created"),
            direction: Some("asc"),
            ..Self::plain()
        }
    }
}

/// Issues of a repository, fetched one page at a time as they are consumed.
pub struct IssuePager {
    octocrab: Octocrab,
    route: String,
    buffer: VecDeque<Issue>,
    /// Last page read, with its items moved into `buffer`.
    /// `None` until the first page is fetched.
    last_page: Option<Page<Issue>>,
}

impl IssuePager {
    /// Creates a pager for the issues of `full_name`.
    pub(crate) fn new(octocrab: Octocrab, full_name: &str) -> Self {
        Self {
            octocrab,
            route: format!("/repos/{full_name}/issues"),
            buffer: VecDeque::new(),
            last_page: None,
        }
    }

    async fn fetch_page(&self) -> Result<Option<Page<Issue>>, MigrateError> {
        match &self.last_page {
            None => {
                debug!(route = %self.route, "Fetching first issues page");
                let page: Page<Issue> = self
                    .octocrab
                    .get(&self.route, Some(&ListParams::issues()))
                    .await?;
                Ok(Some(page))
            }
            Some(last) => {
                debug!(route = %self.route, "Fetching next issues page");
                Ok(self.octocrab.get_page::<Issue>(&last.next).await?)
            }
        }
    }
}

impl IssueStream for IssuePager {
    async fn next(&mut self) -> Result<Option<Issue>, MigrateError> {
        while self.buffer.is_empty() {
            let Some(mut page) = self.fetch_page().await? else {
                break;
            };
            self.buffer.extend(std::mem::take(&mut page.items));
            let done = page.next.is_none();
            self.last_page = Some(page);
            if done {
                break;
            }
        }
        Ok(self.buffer.pop_front())
    }
}
