//! Crawl frontier: the FIFO queue of pages still to visit
//!
//! The frontier is the crawl's only state. It keeps:
//! - `pending`, the breadth-first queue of discovered pages
//! - `visited`, identifiers already dequeued (never processed twice)
//! - `seen`, the union of both, so discovery-time dedup is a set lookup

use crate::url::normalize_identifier;
use crate::UrlResult;
use std::collections::{HashSet, VecDeque};

/// A page waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedPage {
    /// Normalized page identifier
    pub id: String,

    /// Path as discovered on the site; this is what gets requested
    pub path: String,
}

/// Breadth-first frontier with set-backed duplicate suppression
#[derive(Debug, Default)]
pub struct Frontier {
    pending: VecDeque<QueuedPage>,
    visited: HashSet<String>,
    seen: HashSet<String>,
    rejected: usize,
}

impl Frontier {
    /// Creates a frontier holding only the start path
    pub fn new(start_path: &str) -> UrlResult<Self> {
        let id = normalize_identifier(start_path)?;
        let mut frontier = Self::default();
        frontier.seen.insert(id.clone());
        frontier.pending.push_back(QueuedPage {
            id,
            path: start_path.to_string(),
        });
        Ok(frontier)
    }

    /// Dequeues the next page and marks it visited
    ///
    /// Entries whose identifier is already visited are discarded. Returns
    /// `None` once the queue is exhausted.
    pub fn next(&mut self) -> Option<QueuedPage> {
        while let Some(page) = self.pending.pop_front() {
            if self.visited.insert(page.id.clone()) {
                return Some(page);
            }
            tracing::debug!("Discarding already visited page {}", page.id);
        }
        None
    }

    /// Queues a discovered path unless its identifier is pending or visited
    ///
    /// Paths that cannot be mapped to a safe identifier are dropped and
    /// counted as rejected. Returns true if the path was queued.
    pub fn enqueue(&mut self, path: &str) -> bool {
        let id = match normalize_identifier(path) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!("Rejecting link {}: {}", path, e);
                self.rejected += 1;
                return false;
            }
        };

        if !self.seen.insert(id.clone()) {
            return false;
        }

        self.pending.push_back(QueuedPage {
            id,
            path: path.to_string(),
        });
        true
    }

    /// Queues every new path, preserving order; returns how many were queued
    pub fn enqueue_all<I, S>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .filter(|path| self.enqueue(path.as_ref()))
            .count()
    }

    pub fn is_visited(&self, id: &str) -> bool {
        self.visited.contains(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.seen.contains(id) && !self.visited.contains(id)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Number of discovered paths dropped for unsafe identifiers
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
