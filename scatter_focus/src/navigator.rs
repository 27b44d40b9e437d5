// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::policy::{HalfPlane, best_in_direction, nearest_to};
use crate::{Direction, FocusSpace};

/// How [`FocusNavigator::move_focus`] reached its new active id.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FocusMove<K> {
    /// Nothing usable was active; picked the card nearest the viewport center.
    Initialized(K),
    /// Stepped from the active card to a card on the requested side.
    Moved(K),
    /// Nothing lay on the requested side; picked from the viewport center.
    Wrapped(K),
}

impl<K: Copy> FocusMove<K> {
    /// The newly active id.
    pub fn id(&self) -> K {
        match *self {
            Self::Initialized(id) | Self::Moved(id) | Self::Wrapped(id) => id,
        }
    }
}

/// Tracks the active card and moves it in compass directions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusNavigator<K> {
    active: Option<K>,
}

impl<K> Default for FocusNavigator<K> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<K: Copy + PartialEq> FocusNavigator<K> {
    /// A navigator with nothing active.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active id, if any.
    pub fn active(&self) -> Option<K> {
        self.active
    }

    /// Sets the active id, returning the previous one.
    pub fn set_active(&mut self, id: Option<K>) -> Option<K> {
        core::mem::replace(&mut self.active, id)
    }

    /// Clears the active id.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Drops the active id if it is no longer in `space`.
    ///
    /// Returns `true` if the active id was dropped.
    pub fn retain_in(&mut self, space: &FocusSpace<'_, K>) -> bool {
        match self.active {
            Some(id) if !space.contains(&id) => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Moves focus in `direction`.
    ///
    /// `view_center` is the world-space point under the viewport center.
    /// With no usable active card, the card nearest `view_center` becomes
    /// active. Otherwise the best-scoring card strictly on the requested side
    /// of the active card wins; if there is none, every other card is scored
    /// from `view_center` instead. Returns `None` (leaving focus untouched)
    /// when no card qualifies.
    pub fn move_focus(
        &mut self,
        direction: Direction,
        space: &FocusSpace<'_, K>,
        view_center: Point,
    ) -> Option<FocusMove<K>> {
        self.retain_in(space);
        let Some(current) = self.active.and_then(|id| space.get(&id)) else {
            let id = nearest_to(view_center, space)?;
            self.active = Some(id);
            return Some(FocusMove::Initialized(id));
        };
        let current_id = current.id;

        let step = best_in_direction(
            current.center(),
            Some(&current_id),
            direction,
            space,
            HalfPlane::Strict,
        );
        let outcome = match step {
            Some(id) => FocusMove::Moved(id),
            None => FocusMove::Wrapped(best_in_direction(
                view_center,
                Some(&current_id),
                direction,
                space,
                HalfPlane::Any,
            )?),
        };
        self.active = Some(outcome.id());
        Some(outcome)
    }
}
