// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::entry::{Entry, EntryKind, Uid};

/// One search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    /// Matching entry.
    pub uid: Uid,
    /// Display label.
    pub label: String,
    /// Type of the entry.
    pub kind: EntryKind,
}

/// Case-insensitive substring search over titles, tags, and text.
///
/// `candidates` are indices into `entries`, searched in the order given. A
/// blank query yields nothing.
pub fn search(entries: &[Entry], candidates: &[usize], query: &str, limit: usize) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .filter_map(|&i| entries.get(i))
        .filter(|e| matches(e, &needle))
        .take(limit)
        .map(|e| SearchHit {
            uid: e.uid(),
            label: e.label(),
            kind: e.kind(),
        })
        .collect()
}

fn matches(entry: &Entry, needle: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(needle);
    entry.title().is_some_and(hit)
        || entry.tags().iter().any(|t| hit(t))
        || entry.content().text().is_some_and(hit)
}
