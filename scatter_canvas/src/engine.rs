// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Size, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use scatter_focus::{Direction, FocusEntry, FocusMove, FocusNavigator, FocusSpace};
use scatter_layout::{Layout, LayoutEngine, LayoutItem, ViewMode, shuffled_order};
use scatter_motion::{MotionController, MotionInput, PointerTarget, StepOutcome, Viewport};

use crate::clock::{Clock, Debouncer, SystemClock};
use crate::config::CanvasConfig;
use crate::coordinator::{SortKey, ViewFilter, all_tags};
use crate::entry::{Entry, EntryKind, EntryRecord, IngestReport, Uid, ingest, parse_records};
use crate::error::CanvasError;
use crate::keys::{KeyInput, KeyOutcome};
use crate::render::{EstimatingRenderer, LoadOutcome, Renderer};
use crate::search::{SearchHit, search};

/// What one call to [`CanvasEngine::frame`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// A debounced relayout ran this frame.
    pub relayout: bool,
    /// Outcome of the motion step.
    pub motion: StepOutcome,
    /// The host should schedule another frame.
    pub wants_frame: bool,
}

/// The spatial canvas: entries, their layout, panning, and focus.
///
/// All mutation goes through the methods below and runs synchronously on the
/// caller's thread. Pointer and wheel input is queued and applied by
/// [`CanvasEngine::frame`], which the host calls once per display frame while
/// [`FrameReport::wants_frame`] is set.
#[derive(Debug)]
pub struct CanvasEngine<R = EstimatingRenderer, C = SystemClock> {
    config: CanvasConfig,
    renderer: R,
    clock: C,
    packer: LayoutEngine,
    motion: MotionController,
    viewport: Viewport,
    focus: FocusNavigator<Uid>,
    filter: ViewFilter,
    entries: Vec<Entry>,
    /// Indices into `entries`.
    working_set: Vec<usize>,
    layout: Layout<Uid>,
    placements: HashMap<Uid, Rect>,
    /// Focus candidates in working-set order.
    focus_nodes: Vec<FocusEntry<Uid>>,
    /// Packing order kept from the last shuffle, valid for this working set.
    shuffle_order: Option<Vec<usize>>,
    rng: StdRng,
    relayout_debounce: Debouncer,
    lightbox: Option<Uid>,
    text_input_focused: bool,
    relayouts: u64,
}

impl CanvasEngine {
    /// An engine that estimates heights and reads the system clock.
    pub fn with_config(config: CanvasConfig, viewport: Size) -> Self {
        Self::new(config, EstimatingRenderer, SystemClock::default(), viewport)
    }
}

impl<R: Renderer, C: Clock> CanvasEngine<R, C> {
    /// Creates an engine with no entries.
    pub fn new(config: CanvasConfig, renderer: R, clock: C, viewport: Size) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let filter = ViewFilter {
            mode: config.initial_mode,
            ..ViewFilter::default()
        };
        Self {
            packer: LayoutEngine::new(config.layout.clone()),
            motion: MotionController::new(config.motion.clone()),
            relayout_debounce: Debouncer::new(config.relayout_debounce_ms),
            layout: Layout::empty(config.initial_mode),
            config,
            renderer,
            clock,
            viewport: Viewport::new(viewport),
            focus: FocusNavigator::new(),
            filter,
            entries: Vec::new(),
            working_set: Vec::new(),
            placements: HashMap::new(),
            focus_nodes: Vec::new(),
            shuffle_order: None,
            rng,
            lightbox: None,
            text_input_focused: false,
            relayouts: 0,
        }
    }

    // --- ingestion ---

    /// Replaces all entries with `records`.
    ///
    /// Focus, the lightbox, and any shuffle are reset; the pan jumps so the
    /// new layout is centered. Returns the number of entries.
    pub fn ingest(&mut self, records: impl IntoIterator<Item = EntryRecord>) -> usize {
        self.entries = ingest(records);
        self.focus.clear();
        self.lightbox = None;
        self.shuffle_order = None;
        self.relayout_debounce.cancel();
        self.working_set = self.filter.working_set(&self.entries);
        self.relayout_now();
        if let Some(bounds) = self.layout.bounds() {
            self.motion.jump_to(self.viewport.pan_to_center(bounds.center()));
        }
        self.entries.len()
    }

    /// Parses an entry document and ingests it.
    pub fn ingest_json(&mut self, json: &str) -> Result<IngestReport, CanvasError> {
        let (records, report) = parse_records(json)?;
        self.ingest(records);
        log::info!(
            "ingested {} entries ({} skipped)",
            report.accepted,
            report.skipped
        );
        Ok(report)
    }

    // --- coordinator surface ---

    /// Switches the view mode. Returns `false` if it was already active.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if self.filter.mode == mode {
            return false;
        }
        log::debug!("view mode {} -> {mode}", self.filter.mode);
        self.filter.mode = mode;
        self.apply_view_change();
        true
    }

    /// Replaces the tag filter; an empty set shows everything.
    pub fn set_selected_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.selected_tags = tags.into_iter().map(Into::into).collect();
        log::debug!("selected tags: {:?}", self.filter.selected_tags);
        self.apply_view_change();
    }

    /// Adds or removes one tag from the filter. Returns `true` if it is now
    /// selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let selected = if self.filter.selected_tags.remove(tag) {
            false
        } else {
            self.filter.selected_tags.insert(tag.to_owned());
            true
        };
        self.apply_view_change();
        selected
    }

    /// Changes the sort key. Returns `false` if it was already active.
    pub fn set_sort_key(&mut self, sort: SortKey) -> bool {
        if self.filter.sort == sort {
            return false;
        }
        log::debug!("sort {} -> {sort}", self.filter.sort);
        self.filter.sort = sort;
        self.apply_view_change();
        true
    }

    /// Re-packs the working set in a fresh random order.
    ///
    /// The order is kept for later relayouts until the working set changes.
    pub fn request_shuffle(&mut self) {
        self.shuffle_order = Some(shuffled_order(self.working_set.len(), &mut self.rng));
        self.relayout_now();
        self.recenter();
    }

    /// Makes `uid` active and glides it to the view center.
    ///
    /// Returns `false` (doing nothing) if the entry is not placed.
    pub fn center_on_entry(&mut self, uid: Uid) -> bool {
        let Some(rect) = self.placements.get(&uid).copied() else {
            return false;
        };
        self.focus.set_active(Some(uid));
        self.motion.center_on(rect.center(), &self.viewport);
        true
    }

    /// Gives input focus to the search box.
    pub fn focus_search(&mut self) {
        self.text_input_focused = true;
    }

    /// Records whether a text input holds input focus.
    pub fn set_text_input_focused(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    // --- pointer and wheel ---

    /// A pointer press at view-space `position`.
    pub fn pointer_down(&mut self, position: Point, target: PointerTarget) {
        if self.lightbox.is_some() {
            return;
        }
        let time = self.clock.now_ms();
        self.motion.push(MotionInput::PointerDown {
            position,
            time,
            target,
        });
    }

    /// A pointer move to view-space `position`.
    pub fn pointer_move(&mut self, position: Point) {
        let time = self.clock.now_ms();
        self.motion.push(MotionInput::PointerMove { position, time });
    }

    /// A pointer release.
    pub fn pointer_up(&mut self) {
        let time = self.clock.now_ms();
        self.motion.push(MotionInput::PointerUp { time });
    }

    /// A platform pointer cancel; treated like a release.
    pub fn pointer_cancel(&mut self) {
        let time = self.clock.now_ms();
        self.motion.push(MotionInput::PointerCancel { time });
    }

    /// A wheel or trackpad scroll.
    pub fn wheel(&mut self, delta: Vec2) {
        if self.lightbox.is_some() {
            return;
        }
        self.motion.push(MotionInput::Wheel { delta });
    }

    /// A click on entry `uid`.
    ///
    /// Ignored right after a drag. Otherwise the entry becomes active and is
    /// centered; images also open in the lightbox.
    pub fn activate_entry(&mut self, uid: Uid) -> bool {
        self.motion.drain_input();
        if self.motion.is_click_suppressed(self.clock.now_ms()) {
            log::trace!("click on {uid} suppressed after drag");
            return false;
        }
        if !self.center_on_entry(uid) {
            return false;
        }
        if self.entry(uid).is_some_and(|e| e.kind() == EntryKind::Image) {
            self.lightbox = Some(uid);
        }
        true
    }

    /// Closes the lightbox. Returns `false` if it was not open.
    pub fn close_lightbox(&mut self) -> bool {
        self.lightbox.take().is_some()
    }

    // --- relayout triggers ---

    /// The view was resized; relayout is debounced.
    pub fn resize(&mut self, size: Size) {
        if self.viewport.set_size(size) {
            self.relayout_debounce.request(self.clock.now_ms());
        }
    }

    /// Deferred content of `uid` finished loading, successfully or not.
    pub fn notify_content_loaded(&mut self, uid: Uid, outcome: LoadOutcome) {
        if self.entry(uid).is_none() {
            return;
        }
        if outcome == LoadOutcome::Failed {
            log::debug!("content of {uid} failed to load");
        }
        self.relayout_debounce.request(self.clock.now_ms());
    }

    /// Flips the collapsed state of `uid`, returning the new state.
    ///
    /// In compact mode the layout is refreshed immediately.
    pub fn toggle_collapsed(&mut self, uid: Uid) -> Option<bool> {
        let entry = self.entries.get_mut(uid.index()).filter(|e| e.uid() == uid)?;
        entry.collapsed = !entry.collapsed;
        let collapsed = entry.collapsed;
        if self.filter.mode == ViewMode::Compact {
            self.relayout_now();
        }
        Some(collapsed)
    }

    // --- focus and keys ---

    /// Moves focus in `direction` and centers the new active entry.
    ///
    /// Does nothing while the lightbox is open.
    pub fn move_focus(&mut self, direction: Direction) -> Option<FocusMove<Uid>> {
        if self.lightbox.is_some() {
            return None;
        }
        let view_center = self.viewport.world_center(self.motion.pan());
        let space = FocusSpace::new(&self.focus_nodes);
        let moved = self.focus.move_focus(direction, &space, view_center)?;
        if let Some(rect) = self.placements.get(&moved.id()) {
            self.motion.center_on(rect.center(), &self.viewport);
        }
        Some(moved)
    }

    /// Routes a key press.
    pub fn handle_key(&mut self, key: KeyInput) -> KeyOutcome {
        match key {
            KeyInput::SearchHotkey => {
                self.focus_search();
                KeyOutcome::SearchFocused
            }
            KeyInput::Escape if self.text_input_focused => {
                self.text_input_focused = false;
                KeyOutcome::InputBlurred
            }
            KeyInput::Escape => {
                if self.close_lightbox() {
                    KeyOutcome::LightboxClosed
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyInput::Arrow(_) if self.text_input_focused => KeyOutcome::Ignored,
            KeyInput::Arrow(direction) => self
                .move_focus(direction)
                .map_or(KeyOutcome::Ignored, KeyOutcome::FocusMoved),
        }
    }

    // --- search ---

    /// Searches the working set, returning hits in ingestion order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let mut candidates = self.working_set.clone();
        candidates.sort_unstable();
        search(&self.entries, &candidates, query, self.config.search_limit)
    }

    /// Centers on a chosen search hit and leaves the search box.
    pub fn select_search_hit(&mut self, uid: Uid) -> bool {
        let centered = self.center_on_entry(uid);
        if centered {
            self.text_input_focused = false;
        }
        centered
    }

    // --- frame ---

    /// Runs one frame: a due debounced relayout, then queued input and one
    /// motion step.
    pub fn frame(&mut self) -> FrameReport {
        let now = self.clock.now_ms();
        let relayout = self.relayout_debounce.poll(now);
        if relayout {
            self.relayout_now();
        }
        let motion = self.motion.tick(now);
        FrameReport {
            relayout,
            motion,
            wants_frame: self.motion.is_active() || self.relayout_debounce.is_pending(),
        }
    }

    // --- accessors ---

    /// Configuration.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// All entries in ingestion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry with `uid`.
    pub fn entry(&self, uid: Uid) -> Option<&Entry> {
        self.entries.get(uid.index()).filter(|e| e.uid() == uid)
    }

    /// Uids of the working set in sort order.
    pub fn working_set(&self) -> Vec<Uid> {
        self.working_set.iter().map(|&i| self.entries[i].uid()).collect()
    }

    /// Most recent layout.
    pub fn layout(&self) -> &Layout<Uid> {
        &self.layout
    }

    /// World rectangle of `uid` in the current layout.
    pub fn placement(&self, uid: Uid) -> Option<Rect> {
        self.placements.get(&uid).copied()
    }

    /// Active entry.
    pub fn active(&self) -> Option<Uid> {
        self.focus.active()
    }

    /// Entry shown in the lightbox.
    pub fn lightbox(&self) -> Option<Uid> {
        self.lightbox
    }

    /// Returns `true` while a text input holds input focus.
    pub fn text_input_focused(&self) -> bool {
        self.text_input_focused
    }

    /// Current view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.filter.mode
    }

    /// Selected tags.
    pub fn selected_tags(&self) -> &HashSet<String> {
        &self.filter.selected_tags
    }

    /// Current sort key.
    pub fn sort_key(&self) -> SortKey {
        self.filter.sort
    }

    /// Every tag across all entries, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        all_tags(&self.entries)
    }

    /// Current pan.
    pub fn pan(&self) -> Vec2 {
        self.motion.pan()
    }

    /// Motion state.
    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    /// Viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// World point under the view center.
    pub fn view_center(&self) -> Point {
        self.viewport.world_center(self.motion.pan())
    }

    /// Returns `true` while a debounced relayout is waiting.
    pub fn relayout_pending(&self) -> bool {
        self.relayout_debounce.is_pending()
    }

    /// Number of layouts computed so far.
    pub fn relayout_count(&self) -> u64 {
        self.relayouts
    }

    // --- internals ---

    fn apply_view_change(&mut self) {
        let working_set = self.filter.working_set(&self.entries);
        if working_set != self.working_set {
            self.shuffle_order = None;
            self.working_set = working_set;
        }
        self.relayout_now();
        self.recenter();
    }

    fn relayout_now(&mut self) {
        let items: Vec<LayoutItem<Uid>> = self
            .working_set
            .iter()
            .map(|&i| {
                let e = &self.entries[i];
                LayoutItem::new(e.uid()).with_collapsed(e.is_collapsed())
            })
            .collect();

        let entries = &self.entries;
        let renderer = &mut self.renderer;
        let mut measure = |uid: &Uid, width: f64| -> Option<f64> {
            let entry = entries.get(uid.index())?;
            renderer.measure(entry, width)
        };
        let width = self.viewport.size().width;
        let mode = self.filter.mode;
        self.layout = match &self.shuffle_order {
            Some(order) => self
                .packer
                .layout_in_order(&items, order, width, mode, &mut measure),
            None => self.packer.layout(&items, width, mode, &mut measure),
        };
        self.relayout_debounce.cancel();
        self.relayouts += 1;

        for entry in &mut self.entries {
            entry.geometry = None;
        }
        self.placements.clear();
        for p in self.layout.placements() {
            self.placements.insert(p.key, p.rect);
            if let Some(entry) = self.entries.get_mut(p.key.index()) {
                entry.geometry = Some(p.rect);
            }
        }
        let mut nodes: Vec<(usize, FocusEntry<Uid>)> = self
            .layout
            .placements()
            .iter()
            .map(|p| (p.index, FocusEntry::new(p.key, p.rect)))
            .collect();
        nodes.sort_unstable_by_key(|(index, _)| *index);
        self.focus_nodes = nodes.into_iter().map(|(_, node)| node).collect();

        if let Some(active) = self.focus.active() {
            let entries = &self.entries;
            if !self.working_set.iter().any(|&i| entries[i].uid() == active) {
                self.focus.clear();
                log::debug!("active entry {active} left the working set");
            }
        }
        if !self.layout.skipped().is_empty() {
            log::debug!("{} entries not measured yet", self.layout.skipped().len());
        }
        log::debug!(
            "relayout: {} placed in {} column(s), mode {}",
            self.layout.placements().len(),
            self.layout.columns(),
            mode
        );
    }

    fn recenter(&mut self) {
        let target = self
            .focus
            .active()
            .and_then(|uid| self.placements.get(&uid))
            .map(Rect::center)
            .or_else(|| self.layout.bounds().map(|b| b.center()));
        if let Some(point) = target {
            self.motion.center_on(point, &self.viewport);
        }
    }
}
