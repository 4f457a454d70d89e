// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-major grid movement over a flat, document-ordered cell list.
//!
//! A grid composite lays its cells out in rows of a known column count.
//! Arrows step within the row or within the column; `Home`/`End` jump to the
//! row edges, and with the Control/Command modifier (or `PageUp`/`PageDown`)
//! to the column edges. Row edges never wrap: the enclosing widget decides
//! what an unconsumed arrow at the grid border means.
//!
//! When a jump lands on a disabled cell, the scan continues from the landing
//! point back toward the origin, so the cursor settles on the nearest enabled
//! cell in the travelled direction; running out of candidates leaves the
//! cursor unmoved.

use crate::{NavKey, NavList, NavPolicy, NavRequest};

/// Row-major cursor movement for grid-shaped composites.
#[derive(Copy, Clone, Debug)]
pub struct GridPolicy {
    /// Number of columns per row. The last row may be ragged.
    pub cols: usize,
}

impl<K> NavPolicy<K> for GridPolicy
where
    K: Copy + Eq,
{
    fn request_for(&self, key: NavKey, ctrl: bool) -> Option<NavRequest> {
        match key {
            NavKey::ArrowRight => Some(NavRequest::Advance),
            NavKey::ArrowLeft => Some(NavRequest::Retreat),
            NavKey::ArrowDown => Some(NavRequest::RowAdvance),
            NavKey::ArrowUp => Some(NavRequest::RowRetreat),
            NavKey::Home if ctrl => Some(NavRequest::RowFirst),
            NavKey::Home => Some(NavRequest::First),
            NavKey::End if ctrl => Some(NavRequest::RowLast),
            NavKey::End => Some(NavRequest::Last),
            NavKey::PageUp => Some(NavRequest::RowFirst),
            NavKey::PageDown => Some(NavRequest::RowLast),
            // Grids do not typeahead.
            NavKey::Char(_) => None,
        }
    }

    fn next(&self, origin: Option<K>, request: NavRequest, list: &NavList<'_, K>) -> Option<K> {
        debug_assert!(self.cols > 0, "grid must have at least one column");
        let entries = list.entries;
        if self.cols == 0 || entries.is_empty() {
            return None;
        }
        let Some(pos) = origin.and_then(|o| list.position(o)) else {
            // No current cursor: land on the first enabled cell.
            return list.first_enabled();
        };

        let cols = self.cols;
        let len = entries.len();
        let row_start = pos - pos % cols;
        let row_end = usize::min(row_start + cols - 1, len - 1);
        let col = pos % cols;

        let land = |idx: usize| entries[idx].enabled.then_some(entries[idx].id);

        match request {
            // Within the row, stepping toward the edge.
            NavRequest::Advance => (pos + 1..=row_end).find_map(land),
            NavRequest::Retreat => (row_start..pos).rev().find_map(land),
            // Within the column, one row at a time.
            NavRequest::RowAdvance => {
                let mut idx = pos + cols;
                while idx < len {
                    if let Some(id) = land(idx) {
                        return Some(id);
                    }
                    idx += cols;
                }
                None
            }
            NavRequest::RowRetreat => {
                let mut idx = pos;
                while idx >= cols {
                    idx -= cols;
                    if let Some(id) = land(idx) {
                        return Some(id);
                    }
                }
                None
            }
            // Row edges: jump to the extreme, then settle back toward the
            // origin if the extreme is disabled.
            NavRequest::First => (row_start..pos).find_map(land),
            NavRequest::Last => (pos + 1..=row_end).rev().find_map(land),
            // Column edges, same idea.
            NavRequest::RowFirst => (col..pos).step_by(cols).find_map(land),
            NavRequest::RowLast => {
                let mut idx = col + ((len - 1 - col) / cols) * cols;
                while idx > pos {
                    if let Some(id) = land(idx) {
                        return Some(id);
                    }
                    idx -= cols;
                }
                None
            }
            NavRequest::Typeahead(_) => None,
        }
    }
}
