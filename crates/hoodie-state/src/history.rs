use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use hoodie_core::TransformOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub transformations: TransformOptions,
    pub timestamp: DateTime<Utc>,
}

/// Append-only transform log. With a limit set, the oldest entry is evicted
/// once the log is full.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: Option<usize>,
}

impl History {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.map(|l| l.max(1)),
        }
    }

    pub fn push(&mut self, transformations: TransformOptions) {
        if let Some(limit) = self.limit {
            while self.entries.len() >= limit {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(HistoryEntry {
            transformations,
            timestamp: Utc::now(),
        });
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(None)
    }
}
