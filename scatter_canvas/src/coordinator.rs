// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View mode, tag filter, and sort key, and the working set they select.

use core::cmp::Ordering;
use core::fmt;

use hashbrown::HashSet;
use scatter_layout::ViewMode;

use crate::entry::Entry;

/// Ordering applied to the working set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Ingestion order.
    #[default]
    Original,
    /// Title, case-insensitively; untitled entries last.
    Title,
    /// Type name.
    Type,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Original => "original",
            Self::Title => "title",
            Self::Type => "type",
        })
    }
}

/// The coordinator's view state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Current view mode.
    pub mode: ViewMode,
    /// Selected tags; empty means unfiltered.
    pub selected_tags: HashSet<String>,
    /// Current sort key.
    pub sort: SortKey,
}

impl ViewFilter {
    /// Returns `true` if `entry` passes the tag filter.
    pub fn admits(&self, entry: &Entry) -> bool {
        self.selected_tags.is_empty()
            || entry.tags().iter().any(|t| self.selected_tags.contains(t))
    }

    /// Indices into `entries` of the working set, filtered and sorted.
    ///
    /// The sort is stable, so equal keys keep ingestion order.
    pub fn working_set(&self, entries: &[Entry]) -> Vec<usize> {
        let mut set: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| self.admits(e))
            .map(|(i, _)| i)
            .collect();
        match self.sort {
            SortKey::Original => {}
            SortKey::Title => {
                set.sort_by_cached_key(|&i| TitleKey(entries[i].title().map(str::to_lowercase)));
            }
            SortKey::Type => set.sort_by_key(|&i| entries[i].kind().name()),
        }
        set
    }
}

/// Orders present titles before absent ones.
#[derive(PartialEq, Eq)]
struct TitleKey(Option<String>);

impl Ord for TitleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for TitleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Every distinct tag across `entries`, sorted.
pub fn all_tags(entries: &[Entry]) -> Vec<String> {
    let mut tags: Vec<String> = entries
        .iter()
        .flat_map(|e| e.tags().iter().cloned())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    tags.sort_unstable();
    tags
}
