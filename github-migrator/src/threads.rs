//! Review thread reconstruction.
//!
//! Inline review comments are listed flat, with replies pointing at an earlier
//! comment through `in_reply_to_id`. This module folds them back into threads
//! so each thread can be migrated as a single comment.

use crate::model::ReviewComment;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A chain of review comments on one diff location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewThread<'a> {
    /// Comments in the order they were listed; the first one opened the thread.
    pub comments: Vec<&'a ReviewComment>,
}

impl<'a> ReviewThread<'a> {
    /// The comment that opened the thread.
    #[must_use]
    pub fn root(&self) -> &'a ReviewComment {
        self.comments[0]
    }

    /// Timestamp representing the thread.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.root().created_at
    }

    /// File the thread is attached to.
    #[must_use]
    pub fn path(&self) -> &'a str {
        &self.root().path
    }

    /// Line the thread is attached to.
    #[must_use]
    pub fn line(&self) -> u64 {
        self.root().line_number()
    }

    /// Diff hunk shown at the top of the thread.
    #[must_use]
    pub fn diff_hunk(&self) -> &'a str {
        &self.root().diff_hunk
    }
}

/// Groups review comments into reply threads.
///
/// A comment replying to any comment already placed in a thread joins that
/// thread, so chains of replies collapse into one entry. A reply whose parent
/// has not been seen yet starts a thread of its own.
#[must_use]
pub fn reconstruct_threads(review_comments: &[ReviewComment]) -> Vec<ReviewThread<'_>> {
    let mut threads: Vec<ReviewThread<'_>> = Vec::new();
    let mut positions: HashMap<u64, usize> = HashMap::new();

    for comment in review_comments {
        let parent = comment
            .in_reply_to_id
            .and_then(|id| positions.get(&id).copied());

        match parent {
            Some(position) => {
                threads[position].comments.push(comment);
                positions.insert(comment.id, position);
            }
            None => {
                positions.insert(comment.id, threads.len());
                threads.push(ReviewThread {
                    comments: vec![comment],
                });
            }
        }
    }

    threads
}
