//! Text filters applied to migrated bodies and logins.
//!
//! Filters rewrite references that would dangle after migration: links to the
//! source repository and logins that differ on the target.

mod user_mapping;

pub use user_mapping::UserMapping;

use crate::model::RepoInfo;
use regex::Regex;

/// A single text transformation.
#[derive(Debug, Clone)]
pub enum CommentFilter {
    /// Rewrites links and short references to the source repository.
    RepoUrl(RepoUrlFilter),
    /// Rewrites mapped logins.
    UserMapping(UserMapping),
}

impl CommentFilter {
    /// Creates a repository link filter.
    #[must_use]
    pub fn repo_url(source: &RepoInfo, target: &RepoInfo) -> Self {
        Self::RepoUrl(RepoUrlFilter::new(source, target))
    }

    /// Applies this filter to `text`.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::RepoUrl(filter) => filter.apply(text),
            Self::UserMapping(mapping) => mapping.apply(text),
        }
    }
}

/// Rewrites web links and `owner/name#N` references from one repository to
/// another.
#[derive(Debug, Clone)]
pub struct RepoUrlFilter {
    source_url: String,
    target_url: String,
    /// `owner/name#` not preceded by a login or repository name character.
    short_ref: Option<Regex>,
    target_ref: String,
}

impl RepoUrlFilter {
    #[must_use]
    pub fn new(source: &RepoInfo, target: &RepoInfo) -> Self {
        let pattern = format!(r"(?:^|[^A-Za-z0-9._/-])({}#)", regex::escape(&source.full_name));
        Self {
            source_url: source.html_url.clone(),
            target_url: target.html_url.clone(),
            short_ref: Regex::new(&pattern).ok(),
            target_ref: format!("{}#", target.full_name),
        }
    }

    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let text = text.replace(&self.source_url, &self.target_url);
        let Some(short_ref) = &self.short_ref else {
            return text;
        };

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in short_ref.captures_iter(&text) {
            let Some(reference) = caps.get(1) else {
                continue;
            };
            out.push_str(&text[last..reference.start()]);
            out.push_str(&self.target_ref);
            last = reference.end();
        }
        out.push_str(&text[last..]);
        out
    }
}

/// An ordered list of filters run in a single pass.
#[derive(Debug, Clone, Default)]
pub struct CommentFilters {
    filters: Vec<CommentFilter>,
}

impl CommentFilters {
    /// Creates a pipeline running `filters` in order.
    #[must_use]
    pub fn new(filters: Vec<CommentFilter>) -> Self {
        Self { filters }
    }

    /// Applies every filter in order.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        self.filters
            .iter()
            .fold(text.to_string(), |text, filter| filter.apply(&text))
    }
}
