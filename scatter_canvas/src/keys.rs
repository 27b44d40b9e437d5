// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use scatter_focus::{Direction, FocusMove};

use crate::entry::Uid;

/// Keyboard input the engine understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyInput {
    /// An arrow key.
    Arrow(Direction),
    /// The hot-key that focuses the search box.
    SearchHotkey,
    /// Escape.
    Escape,
}

/// What a key press did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was not consumed.
    Ignored,
    /// Focus moved.
    FocusMoved(FocusMove<Uid>),
    /// The search box took input focus.
    SearchFocused,
    /// The text input gave up focus.
    InputBlurred,
    /// The lightbox closed.
    LightboxClosed,
}

impl KeyOutcome {
    /// Returns `true` if the key was consumed.
    pub fn is_consumed(self) -> bool {
        self != Self::Ignored
    }
}
