//! Login remapping.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Matches a maximal run of login characters.
static LOGIN_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9-]+").expect("login pattern is valid"));

/// Maps source logins to target logins.
///
/// Whole login tokens are replaced, so `bob` is rewritten in `@bob` and
/// `bob.png` but not inside `bobby`. Unmapped tokens pass through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserMapping {
    mapping: BTreeMap<String, String>,
}

impl UserMapping {
    /// Creates a mapping from source to target logins.
    #[must_use]
    pub fn new(mapping: BTreeMap<String, String>) -> Self {
        Self { mapping }
    }

    /// Parses `src:dst,src2:dst2`. Malformed pairs are ignored.
    #[must_use]
    pub fn parse(pairs: &str) -> Self {
        let mapping = pairs
            .split(',')
            .filter_map(|pair| {
                let (from, to) = pair.trim().split_once(':')?;
                if from.is_empty() || to.is_empty() || to.contains(':') {
                    return None;
                }
                Some((from.to_string(), to.to_string()))
            })
            .collect();
        Self { mapping }
    }

    /// Adds entries from `other`, overriding existing ones.
    pub fn extend(&mut self, other: UserMapping) {
        self.mapping.extend(other.mapping);
    }

    /// Returns the mapped login, or `login` itself when unmapped.
    #[must_use]
    pub fn map<'a>(&'a self, login: &'a str) -> &'a str {
        self.mapping.get(login).map_or(login, String::as_str)
    }

    /// Returns true if no mapping is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Number of configured mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Rewrites every mapped login token in `text`.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        if self.mapping.is_empty() {
            return text.to_string();
        }
        LOGIN_TOKEN
            .replace_all(text, |caps: &Captures| self.map(&caps[0]).to_string())
            .into_owned()
    }
}
