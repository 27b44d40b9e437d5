// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content entries and their ingestion from JSON.

use core::fmt;

use kurbo::Rect;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use crate::error::CanvasError;

/// Engine-assigned identity of an entry.
///
/// Combines the ingestion index with a fingerprint of the supplied id, so it
/// stays unique even when supplied ids collide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid {
    fingerprint: u32,
    index: usize,
}

impl Uid {
    /// Derives the uid for supplied `id` ingested at position `index`.
    #[must_use]
    pub fn new(id: &str, index: usize) -> Self {
        Self {
            fingerprint: fnv1a(id.as_bytes()),
            index,
        }
    }

    /// Ingestion index.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    /// Fingerprint of the supplied id.
    #[must_use]
    pub fn fingerprint(self) -> u32 {
        self.fingerprint
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}-{}", self.fingerprint, self.index)
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5_u32, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(0x0100_0193)
    })
}

/// Type discriminator of an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    /// A picture.
    Image,
    /// A link with optional text.
    Link,
    /// Plain text.
    Text,
    /// Text followed by a link.
    TextLink,
    /// An embedded video.
    Youtube,
}

impl EntryKind {
    /// Wire name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Link => "link",
            Self::Text => "text",
            Self::TextLink => "text_link",
            Self::Youtube => "youtube",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-specific payload of an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryContent {
    /// A picture loaded from `src`.
    Image {
        /// Image URL.
        src: String,
        /// Alternative text.
        #[serde(default)]
        alt: Option<String>,
    },
    /// Plain text.
    Text {
        /// Body text.
        #[serde(default)]
        text: String,
    },
    /// A hyperlink.
    Link {
        /// Target URL.
        url: String,
        /// Visible link text.
        #[serde(default, rename = "linkText")]
        link_text: Option<String>,
    },
    /// Text followed by a hyperlink.
    TextLink {
        /// Body text.
        #[serde(default)]
        text: String,
        /// Target URL.
        url: String,
        /// Visible link text.
        #[serde(default, rename = "linkText")]
        link_text: Option<String>,
    },
    /// An embedded video.
    Youtube {
        /// Video identifier.
        #[serde(rename = "youtubeId")]
        youtube_id: String,
    },
}

const TEXT_LINE_HEIGHT: f64 = 20.0;
const TEXT_CHAR_WIDTH: f64 = 7.5;
const LINK_LINE_HEIGHT: f64 = 22.0;
const TITLE_HEIGHT: f64 = 28.0;
const CARD_PADDING: f64 = 24.0;

impl EntryContent {
    /// Kind of this payload.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Image { .. } => EntryKind::Image,
            Self::Text { .. } => EntryKind::Text,
            Self::Link { .. } => EntryKind::Link,
            Self::TextLink { .. } => EntryKind::TextLink,
            Self::Youtube { .. } => EntryKind::Youtube,
        }
    }

    /// Body text, if the payload has any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text } | Self::TextLink { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Returns `true` if the payload loads visual content after mounting,
    /// which changes its rendered height.
    #[must_use]
    pub fn has_deferred_content(&self) -> bool {
        matches!(self, Self::Image { .. } | Self::Youtube { .. })
    }

    /// Estimated height of the payload body at content width `width`.
    #[must_use]
    pub fn estimated_body_height(&self, width: f64) -> f64 {
        let width = width.max(1.0);
        match self {
            Self::Image { alt, .. } => {
                let caption = if alt.as_deref().is_some_and(|a| !a.is_empty()) {
                    TEXT_LINE_HEIGHT
                } else {
                    0.0
                };
                width * 0.75 + caption
            }
            Self::Youtube { .. } => width * 9.0 / 16.0,
            Self::Text { text } => text_height(text, width),
            Self::Link { .. } => LINK_LINE_HEIGHT,
            Self::TextLink { text, .. } => text_height(text, width) + LINK_LINE_HEIGHT,
        }
    }
}

fn text_height(text: &str, width: f64) -> f64 {
    let per_line = (width / TEXT_CHAR_WIDTH).floor().max(1.0);
    let lines: f64 = text
        .split('\n')
        .map(|line| {
            let chars = line.chars().count() as f64;
            (chars / per_line).ceil().max(1.0)
        })
        .sum();
    lines * TEXT_LINE_HEIGHT
}

/// One record of an entry document, before ingestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Supplied identifier; numbers are accepted and kept as text.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Optional title.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional tags.
    #[serde(default, deserialize_with = "tags_or_null")]
    pub tags: Vec<String>,
    /// Type discriminator and payload.
    #[serde(flatten)]
    pub content: EntryContent,
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match Id::deserialize(d)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

fn tags_or_null<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_default())
}

/// An ingested content card.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    uid: Uid,
    id: String,
    title: Option<String>,
    tags: SmallVec<[String; 4]>,
    content: EntryContent,
    pub(crate) collapsed: bool,
    pub(crate) geometry: Option<Rect>,
}

impl Entry {
    /// Ingests `record` at position `index`.
    #[must_use]
    pub fn from_record(record: EntryRecord, index: usize) -> Self {
        Self {
            uid: Uid::new(&record.id, index),
            id: record.id,
            title: record.title.filter(|t| !t.is_empty()),
            tags: record.tags.into_iter().collect(),
            content: record.content,
            collapsed: false,
            geometry: None,
        }
    }

    /// Engine-assigned uid.
    #[must_use]
    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// Supplied identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Payload.
    #[must_use]
    pub fn content(&self) -> &EntryContent {
        &self.content
    }

    /// Type discriminator.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.content.kind()
    }

    /// Collapsed state used by the compact view.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// World rectangle from the most recent layout of the working set, or
    /// `None` if the entry is not currently placed.
    #[must_use]
    pub fn geometry(&self) -> Option<Rect> {
        self.geometry
    }

    /// Short human-readable label: title, link text, URL, the start of the
    /// text, or the id, whichever is present first.
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(title) = self.title() {
            return title.to_owned();
        }
        match &self.content {
            EntryContent::Link { url, link_text } | EntryContent::TextLink { url, link_text, .. } => {
                if let Some(text) = link_text.as_deref().filter(|t| !t.is_empty()) {
                    return text.to_owned();
                }
                if !url.is_empty() {
                    return url.clone();
                }
            }
            _ => {}
        }
        match self.content.text().filter(|t| !t.is_empty()) {
            Some(text) => text.chars().take(60).collect(),
            None => self.id.clone(),
        }
    }

    /// Estimated rendered card height at card width `width`: padding, an
    /// optional title bar, and the payload body.
    #[must_use]
    pub fn estimated_height(&self, width: f64) -> f64 {
        let title = if self.title.is_some() { TITLE_HEIGHT } else { 0.0 };
        CARD_PADDING + title + self.content.estimated_body_height(width - CARD_PADDING)
    }
}

/// Summary of one ingestion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Records turned into entries.
    pub accepted: usize,
    /// Records skipped because they did not parse.
    pub skipped: usize,
}

/// Parses an entry document into records.
///
/// The document is either an array of records or an object with a `root`
/// array. Records that fail to parse are skipped with a warning.
pub fn parse_records(json: &str) -> Result<(Vec<EntryRecord>, IngestReport), CanvasError> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    let items = match doc {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("root") {
            Some(serde_json::Value::Array(items)) => items,
            _ => return Err(CanvasError::UnexpectedShape),
        },
        _ => return Err(CanvasError::UnexpectedShape),
    };

    let mut report = IngestReport::default();
    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<EntryRecord>(item) {
            Ok(record) => {
                report.accepted += 1;
                records.push(record);
            }
            Err(err) => {
                report.skipped += 1;
                log::warn!("skipping entry record {position}: {err}");
            }
        }
    }
    Ok((records, report))
}

/// Turns records into entries, assigning uids by position.
pub fn ingest(records: impl IntoIterator<Item = EntryRecord>) -> Vec<Entry> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| Entry::from_record(record, index))
        .collect()
}
