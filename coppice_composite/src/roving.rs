// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roving tabindex bookkeeping for one composite.
//!
//! The roving pattern keeps at most one item of a composite in the platform
//! tab order: the current item gets tab index `0`, every sibling gets `-1`,
//! and arrow keys move the assignment instead of the platform's focus walk.
//! This controller owns three pieces of state:
//!
//! - the **capture book**: the author-declared tab index of every item, read
//!   once at first sight so it can be restored verbatim later;
//! - the **current** item: the live roving stop, if one is installed;
//! - the **remembered** item: where a memory-enabled composite re-enters.
//!
//! All writes are emitted into an [`Effects`] buffer for the host to apply;
//! the controller itself never touches a tree. The capture book and the
//! remembered cursor deliberately survive [`reset`](RovingTabindex::reset):
//! re-discovery after a mutation must not re-capture roved values as if an
//! author had declared them, and memory has to outlive deactivation.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::effects::{Effect, Effects};
use crate::types::Item;

/// Tab-index state for the items of one composite.
#[derive(Clone, Debug, Default)]
pub struct RovingTabindex<K> {
    captured: HashMap<K, Option<i16>>,
    current: Option<K>,
    remembered: Option<K>,
}

impl<K: Copy + Eq + Hash> RovingTabindex<K> {
    /// An empty controller with no captured state.
    pub fn new() -> Self {
        Self {
            captured: HashMap::new(),
            current: None,
            remembered: None,
        }
    }

    /// The item currently holding the roving tab stop.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// The item the cursor returns to on the next activation.
    pub fn remembered(&self) -> Option<K> {
        self.remembered
    }

    /// Seed the remembered cursor before the first activation, e.g. from a
    /// host marking one item as current. Has no effect once a cursor has
    /// been remembered.
    pub fn prefer_initial(&mut self, item: K) {
        if self.remembered.is_none() {
            self.remembered = Some(item);
        }
    }

    /// Record the author-declared tab index for `item`. First sight wins;
    /// repeated discovery of the same item never overwrites the capture.
    pub fn capture_initial(&mut self, item: K, declared: Option<i16>) {
        self.captured.entry(item).or_insert(declared);
    }

    /// The captured declaration for `item`: `None` if the item was never
    /// captured, `Some(None)` if it was captured with no declared value.
    pub fn captured(&self, item: K) -> Option<Option<i16>> {
        self.captured.get(&item).copied()
    }

    /// Make `target` the roving stop: tab index `-1` for every other item,
    /// then `0` for the target, so no two items are ever reachable at once.
    /// Records the target as remembered when `memory` is set; without memory
    /// the slot is cleared, so a host seed is consumed by the first
    /// placement.
    pub fn activate_item(
        &mut self,
        items: &[Item<K>],
        target: K,
        memory: bool,
        effects: &mut Effects<K>,
    ) {
        debug_assert!(
            items.iter().any(|it| it.id == target),
            "target must be a tracked item"
        );
        for it in items {
            if it.id != target {
                effects.push(Effect::SetTabIndex(it.id, -1));
            }
        }
        effects.push(Effect::SetTabIndex(target, 0));
        self.current = Some(target);
        self.remembered = memory.then_some(target);
    }

    /// Take every item out of the tab order without touching the capture
    /// book or the remembered cursor. Used when a nested composite closes.
    pub fn park(&mut self, items: &[Item<K>], effects: &mut Effects<K>) {
        for it in items {
            effects.push(Effect::SetTabIndex(it.id, -1));
        }
        self.current = None;
    }

    /// Restore every captured author declaration and clear the live cursor.
    ///
    /// Emits a [`Effect::RestoreTabIndex`] per captured item; a `None`
    /// declaration means the host removes the attribute. Restore order is
    /// unspecified. The capture book and the remembered cursor survive.
    pub fn reset(&mut self, effects: &mut Effects<K>) {
        for (&item, &declared) in &self.captured {
            effects.push(Effect::RestoreTabIndex(item, declared));
        }
        self.current = None;
    }

    /// Forget state for items that no longer exist in the composite.
    pub fn prune(&mut self, mut keep: impl FnMut(K) -> bool) {
        self.captured.retain(|&item, _| keep(item));
        if let Some(cur) = self.current
            && !keep(cur)
        {
            self.current = None;
        }
        if let Some(rem) = self.remembered
            && !keep(rem)
        {
            self.remembered = None;
        }
    }
}
