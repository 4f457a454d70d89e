// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Selection: chosen-item state for composite widgets.
//!
//! Listboxes, grids, and trees layer a set of "chosen" items on top of their
//! focus cursor. This crate tracks that set and enforces the cardinality
//! rules of the widget's selection mode, reporting every change as an
//! explicit delta so the host can update platform state (`aria-selected`,
//! form values, visual marks) without diffing.
//!
//! ## Selection rules
//!
//! 1. **`None` mode**: every mutation is a no-op producing an empty delta.
//! 2. **`Single` mode**: at most one item is selected; choosing a new item
//!    atomically deselects the previous one in the same delta.
//! 3. **`Multiple` mode**: items toggle independently; selecting or
//!    deselecting one never affects another.
//! 4. Insertion order is preserved: [`SelectionState::selected`] yields items
//!    in the order they were chosen, which is the order hosts serialize
//!    form values in.
//!
//! ## Usage
//!
//! ```
//! use coppice_selection::{SelectMode, SelectionState};
//!
//! let mut selection: SelectionState<u32> = SelectionState::new(SelectMode::Single);
//!
//! selection.toggle(2);
//! let change = selection.toggle(3);
//!
//! // Single mode swapped atomically: 2 out, 3 in.
//! assert_eq!(change.selected.as_slice(), &[3]);
//! assert_eq!(change.deselected.as_slice(), &[2]);
//! assert_eq!(selection.selected(), &[3]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use smallvec::SmallVec;

/// How many items a composite allows to be selected at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SelectMode {
    /// The composite has no selection concept; all mutations are no-ops.
    #[default]
    None,
    /// At most one item; choosing a new one replaces the previous.
    Single,
    /// Any number of items, toggled independently.
    Multiple,
}

/// The delta produced by one selection mutation.
///
/// Both lists are empty when the mutation had no effect. In `Single` mode a
/// swap reports the incoming item under `selected` and the outgoing one
/// under `deselected` in the same delta.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionChange<K> {
    /// Items that became selected.
    pub selected: SmallVec<[K; 2]>,
    /// Items that became deselected.
    pub deselected: SmallVec<[K; 2]>,
}

impl<K> SelectionChange<K> {
    /// An empty delta.
    pub fn none() -> Self {
        Self {
            selected: SmallVec::new(),
            deselected: SmallVec::new(),
        }
    }

    /// Whether this delta changes anything.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.deselected.is_empty()
    }
}

/// Insertion-ordered selection set with mode-governed cardinality.
#[derive(Clone, Debug)]
pub struct SelectionState<K> {
    mode: SelectMode,
    selected: SmallVec<[K; 4]>,
}

impl<K: Copy + Eq> SelectionState<K> {
    /// Create an empty selection governed by `mode`.
    pub fn new(mode: SelectMode) -> Self {
        Self {
            mode,
            selected: SmallVec::new(),
        }
    }

    /// The governing mode.
    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    /// Currently selected items, oldest first.
    pub fn selected(&self) -> &[K] {
        &self.selected
    }

    /// Whether `item` is currently selected.
    pub fn is_selected(&self, item: K) -> bool {
        self.selected.contains(&item)
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flip `item` between selected and deselected.
    pub fn toggle(&mut self, item: K) -> SelectionChange<K> {
        if matches!(self.mode, SelectMode::None) {
            return SelectionChange::none();
        }
        if self.is_selected(item) {
            self.deselect(item)
        } else {
            self.select(item)
        }
    }

    /// Select `item`; a no-op if it is already selected.
    ///
    /// In `Single` mode the previous selection is cleared in the same delta.
    pub fn select(&mut self, item: K) -> SelectionChange<K> {
        if matches!(self.mode, SelectMode::None) || self.is_selected(item) {
            return SelectionChange::none();
        }
        let mut change = SelectionChange::none();
        if matches!(self.mode, SelectMode::Single) {
            change.deselected.extend(self.selected.drain(..));
        }
        self.selected.push(item);
        change.selected.push(item);
        change
    }

    /// Deselect `item`; a no-op if it is not selected.
    pub fn deselect(&mut self, item: K) -> SelectionChange<K> {
        let Some(pos) = self.selected.iter().position(|s| *s == item) else {
            return SelectionChange::none();
        };
        self.selected.remove(pos);
        let mut change = SelectionChange::none();
        change.deselected.push(item);
        change
    }

    /// Deselect everything.
    pub fn clear(&mut self) -> SelectionChange<K> {
        let mut change = SelectionChange::none();
        change.deselected.extend(self.selected.drain(..));
        change
    }

    /// Replace the whole selection with `items`, value-setter style.
    ///
    /// Items already selected stay selected without appearing in the delta.
    /// In `Single` mode only the first item is kept; in `None` mode the call
    /// clears nothing and selects nothing.
    pub fn replace_with(&mut self, items: impl IntoIterator<Item = K>) -> SelectionChange<K> {
        if matches!(self.mode, SelectMode::None) {
            return SelectionChange::none();
        }
        let mut incoming: SmallVec<[K; 4]> = SmallVec::new();
        for item in items {
            if !incoming.contains(&item) {
                incoming.push(item);
            }
        }
        if matches!(self.mode, SelectMode::Single) {
            incoming.truncate(1);
        }
        let mut change = SelectionChange::none();
        for old in &self.selected {
            if !incoming.contains(old) {
                change.deselected.push(*old);
            }
        }
        for new in &incoming {
            if !self.selected.contains(new) {
                change.selected.push(*new);
            }
        }
        self.selected = incoming;
        change
    }

    /// Drop items no longer present in the composite, e.g. after a re-index.
    pub fn retain(&mut self, mut keep: impl FnMut(K) -> bool) -> SelectionChange<K> {
        let mut change = SelectionChange::none();
        self.selected.retain(|item| {
            let kept = keep(*item);
            if !kept {
                change.deselected.push(*item);
            }
            kept
        });
        change
    }
}
