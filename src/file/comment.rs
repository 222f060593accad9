//! Comment threads attached to files.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{DriveError, Result};

/// A single comment on a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Username of the author.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// When the comment was added.
    pub timestamp: DateTime<Utc>,
}

/// Append-only comment threads of one group, keyed by disk name.
#[derive(Debug, Default)]
pub struct CommentThreads {
    threads: HashMap<String, Vec<Comment>>,
}

impl CommentThreads {
    /// Create an empty set of threads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment to the thread of `filename`.
    pub fn add(&mut self, filename: &str, author: &str, text: &str) -> Result<Comment> {
        let author = author.trim();
        if author.is_empty() {
            return Err(DriveError::Validation("username is required".to_string()));
        }
        if text.trim().is_empty() {
            return Err(DriveError::Validation("text is required".to_string()));
        }

        let comment = Comment {
            author: author.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        self.threads
            .entry(filename.to_string())
            .or_default()
            .push(comment.clone());

        Ok(comment)
    }

    /// Comments on `filename` in the order they were added.
    pub fn list(&self, filename: &str) -> Vec<Comment> {
        self.threads.get(filename).cloned().unwrap_or_default()
    }

    /// Move the thread of `from` to `to`.
    ///
    /// Anything already filed under `to` is kept ahead of the moved comments.
    pub fn rekey(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        if let Some(mut moved) = self.threads.remove(from) {
            self.threads.entry(to.to_string()).or_default().append(&mut moved);
        }
    }

    #[cfg(test)]
    fn thread_count(&self) -> usize {
        self.threads.len()
    }
}
