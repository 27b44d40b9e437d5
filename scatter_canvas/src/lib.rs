// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Canvas: an infinite canvas of scattered content cards.
//!
//! [`CanvasEngine`] ties the pieces together:
//!
//! - entries are ingested from JSON ([`parse_records`]) and get a stable
//!   [`Uid`] that survives colliding ids;
//! - a [`ViewFilter`] (view mode, tag filter, [`SortKey`]) selects the working
//!   set, which `scatter_layout` packs using heights from a [`Renderer`];
//! - `scatter_motion` pans the view, with pointer and wheel input queued until
//!   the next [`CanvasEngine::frame`];
//! - `scatter_focus` moves the active entry with the arrow keys.
//!
//! Resize and content-load relayouts are coalesced by a [`Debouncer`] over an
//! injectable [`Clock`], so tests can drive time with a [`ManualClock`].
//!
//! Lookups of unknown uids and operations on an empty working set are no-ops;
//! only parsing documents can fail, with a [`CanvasError`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use scatter_canvas::{CanvasConfig, CanvasEngine, Direction, KeyInput, KeyOutcome, ManualClock};
//! use scatter_canvas::EstimatingRenderer;
//!
//! let json = r#"[
//!     {"id": "a", "type": "text", "text": "first"},
//!     {"id": "b", "type": "text", "text": "second"},
//!     {"id": "c", "type": "link", "url": "https://example.com"}
//! ]"#;
//! let mut canvas = CanvasEngine::new(
//!     CanvasConfig::default(),
//!     EstimatingRenderer,
//!     ManualClock::new(),
//!     Size::new(1280.0, 800.0),
//! );
//! let report = canvas.ingest_json(json).unwrap();
//! assert_eq!(report.accepted, 3);
//! assert_eq!(canvas.layout().placements().len(), 3);
//!
//! // The first arrow press picks the entry nearest the view center.
//! let outcome = canvas.handle_key(KeyInput::Arrow(Direction::Right));
//! assert!(matches!(outcome, KeyOutcome::FocusMoved(_)));
//! assert!(canvas.active().is_some());
//! ```

mod clock;
mod config;
mod coordinator;
mod engine;
mod entry;
mod error;
mod keys;
mod render;
mod search;

pub use clock::{Clock, Debouncer, ManualClock, SystemClock};
pub use config::CanvasConfig;
pub use coordinator::{SortKey, ViewFilter, all_tags};
pub use engine::{CanvasEngine, FrameReport};
pub use entry::{
    Entry, EntryContent, EntryKind, EntryRecord, IngestReport, Uid, ingest, parse_records,
};
pub use error::CanvasError;
pub use keys::{KeyInput, KeyOutcome};
pub use render::{EstimatingRenderer, LoadOutcome, Renderer};
pub use search::{SearchHit, search};

pub use scatter_focus::{Direction, FocusMove};
pub use scatter_layout::{Layout, LayoutConfig, Placement, ViewMode};
pub use scatter_motion::{MotionConfig, PointerTarget, StepOutcome};
