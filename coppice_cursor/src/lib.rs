// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Cursor: active-cursor navigation primitives for composite widgets.
//!
//! A composite widget (menu, listbox, tree, toolbar, grid) keeps exactly one
//! roving tab stop and moves a logical cursor among its items in response to
//! arrow keys, `Home`/`End`, and typeahead characters. This crate models that
//! movement as pure functions over immutable snapshots:
//!
//! - **Navigation keys** ([`NavKey`]) are the raw key subset a navigator cares
//!   about.
//! - **Requests** ([`NavRequest`]) are the movement intents a key resolves to,
//!   if any. A key that does not resolve (for example `ArrowUp` in an
//!   inline-only group) must be left unconsumed by the caller so an enclosing
//!   widget can react instead.
//! - **Snapshots** ([`NavEntry`] / [`NavList`]) describe the ordered items of
//!   one composite: identifier, typeahead label, and enabled state.
//! - **Policies** ([`NavPolicy`]) map an origin, a request, and a snapshot to
//!   the next cursor position. [`LinearPolicy`] walks a one-dimensional list;
//!   [`GridPolicy`](grid::GridPolicy) walks row-major cells.
//!
//! Disabled entries stay in the snapshot (their positions matter for grid
//! geometry and document order) but are never returned as the landing cursor.
//!
//! ## Minimal example
//!
//! A block-axis list of three items, wrapping at the ends:
//!
//! ```rust
//! use coppice_cursor::{Axis, LinearPolicy, NavEntry, NavKey, NavList, NavPolicy, NavRequest};
//!
//! let entries = vec![
//!     NavEntry { id: 1_u32, label: Some("Apple"), enabled: true },
//!     NavEntry { id: 2_u32, label: Some("Banana"), enabled: true },
//!     NavEntry { id: 3_u32, label: Some("Avocado"), enabled: true },
//! ];
//! let list = NavList { entries: &entries };
//! let policy = LinearPolicy { axis: Axis::Block, wrap: true };
//!
//! // ArrowDown advances along the block axis…
//! let request = NavPolicy::<u32>::request_for(&policy, NavKey::ArrowDown, false).unwrap();
//! assert_eq!(policy.next(Some(1), request, &list), Some(2));
//! // …and wraps past the end.
//! assert_eq!(policy.next(Some(3), request, &list), Some(1));
//!
//! // ArrowRight is not on the block axis: no request, leave the key alone.
//! assert_eq!(NavPolicy::<u32>::request_for(&policy, NavKey::ArrowRight, false), None);
//!
//! // Typeahead lands on the next label matching the typed character.
//! assert_eq!(
//!     policy.next(Some(1), NavRequest::Typeahead('a'), &list),
//!     Some(3),
//! );
//! ```
//!
//! The types are generic over the item identifier `K`, so callers can use any
//! small copyable handle (an arena id, a slot index, an element key).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod grid;

pub use grid::GridPolicy;

/// Direction axes a composite navigates along.
///
/// The axis decides which arrow keys a composite consumes: an inline-only
/// toolbar ignores `ArrowUp`/`ArrowDown`, a block-only menu ignores
/// `ArrowLeft`/`ArrowRight`, and the unclaimed keys propagate to enclosing
/// widgets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Navigate with `ArrowLeft`/`ArrowRight` only.
    Inline,
    /// Navigate with `ArrowUp`/`ArrowDown` only.
    Block,
    /// All four arrows navigate linearly.
    Both,
}

/// The key subset relevant to cursor movement.
///
/// Activation keys (`Enter`, `Escape`, `Tab`, …) are deliberately absent:
/// they belong to the disclosure layer, not the navigator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// The left arrow key.
    ArrowLeft,
    /// The right arrow key.
    ArrowRight,
    /// The up arrow key.
    ArrowUp,
    /// The down arrow key.
    ArrowDown,
    /// The `Home` key.
    Home,
    /// The `End` key.
    End,
    /// The `PageUp` key.
    PageUp,
    /// The `PageDown` key.
    PageDown,
    /// A printable character, candidate for typeahead.
    Char(char),
}

/// A movement intent resolved from a key.
///
/// Linear policies produce the first five variants; grid policies add the
/// row-oriented jumps. `First`/`Last` mean "first/last item" for a linear
/// list and "row start/row end" for a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavRequest {
    /// Step forward by one position.
    Advance,
    /// Step backward by one position.
    Retreat,
    /// Jump to the first position (row start in a grid).
    First,
    /// Jump to the last position (row end in a grid).
    Last,
    /// Step to the next row, same column (grid only).
    RowAdvance,
    /// Step to the previous row, same column (grid only).
    RowRetreat,
    /// Jump to the first row, same column (grid only).
    RowFirst,
    /// Jump to the last row, same column (grid only).
    RowLast,
    /// Move to the next entry whose label starts with this character.
    Typeahead(char),
}

/// One navigable item in a composite's snapshot.
///
/// The label borrows from the owning composite's item records; entries are
/// rebuilt cheaply per keystroke.
#[derive(Copy, Clone, Debug)]
pub struct NavEntry<'a, K> {
    /// Identifier for this item.
    pub id: K,
    /// Text used for typeahead matching, if the item has any.
    pub label: Option<&'a str>,
    /// Whether the cursor may land here. Disabled entries keep their position
    /// in the snapshot but are skipped over.
    pub enabled: bool,
}

/// A read-only, document-ordered snapshot of one composite's items.
#[derive(Copy, Clone, Debug)]
pub struct NavList<'a, K> {
    /// The items, in document order.
    pub entries: &'a [NavEntry<'a, K>],
}

impl<K: Copy + Eq> NavList<'_, K> {
    /// The first enabled entry, if any.
    pub fn first_enabled(&self) -> Option<K> {
        self.entries.iter().find(|e| e.enabled).map(|e| e.id)
    }

    /// The last enabled entry, if any.
    pub fn last_enabled(&self) -> Option<K> {
        self.entries.iter().rev().find(|e| e.enabled).map(|e| e.id)
    }

    /// Position of `id` in document order, enabled or not.
    pub fn position(&self, id: K) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

/// Trait for cursor movement policies.
///
/// A policy first resolves a raw key into a [`NavRequest`] (or declines it,
/// leaving the key for enclosing widgets), then computes the landing entry
/// for a request. Both steps are pure; policies hold only configuration.
pub trait NavPolicy<K>
where
    K: Copy + Eq,
{
    /// Resolve a key into a movement request, or `None` if this policy does
    /// not consume the key (wrong axis, non-typeahead character, …).
    fn request_for(&self, key: NavKey, ctrl: bool) -> Option<NavRequest>;

    /// Compute the landing entry for a request.
    ///
    /// `origin` is the current cursor, if one exists. Returns `None` when the
    /// cursor should not move; the request is still considered consumed.
    fn next(&self, origin: Option<K>, request: NavRequest, list: &NavList<'_, K>) -> Option<K>;
}

/// One-dimensional cursor movement over a document-ordered list.
#[derive(Copy, Clone, Debug)]
pub struct LinearPolicy {
    /// Which arrow keys this composite consumes.
    pub axis: Axis,
    /// Whether stepping past either end wraps around to the other.
    pub wrap: bool,
}

impl Default for LinearPolicy {
    fn default() -> Self {
        Self {
            axis: Axis::Block,
            wrap: false,
        }
    }
}

impl<K> NavPolicy<K> for LinearPolicy
where
    K: Copy + Eq,
{
    fn request_for(&self, key: NavKey, _ctrl: bool) -> Option<NavRequest> {
        let inline = matches!(self.axis, Axis::Inline | Axis::Both);
        let block = matches!(self.axis, Axis::Block | Axis::Both);
        match key {
            NavKey::ArrowRight if inline => Some(NavRequest::Advance),
            NavKey::ArrowLeft if inline => Some(NavRequest::Retreat),
            NavKey::ArrowDown if block => Some(NavRequest::Advance),
            NavKey::ArrowUp if block => Some(NavRequest::Retreat),
            NavKey::Home => Some(NavRequest::First),
            NavKey::End => Some(NavRequest::Last),
            NavKey::Char(c) if is_typeahead_char(c) => Some(NavRequest::Typeahead(c)),
            _ => None,
        }
    }

    fn next(&self, origin: Option<K>, request: NavRequest, list: &NavList<'_, K>) -> Option<K> {
        match request {
            NavRequest::Advance => step_forward(origin, list, self.wrap),
            NavRequest::Retreat => step_backward(origin, list, self.wrap),
            NavRequest::First => list.first_enabled(),
            NavRequest::Last => list.last_enabled(),
            NavRequest::Typeahead(c) => typeahead(origin, c, list),
            // Row-oriented requests are grid vocabulary; a linear list has no
            // columns to hold.
            NavRequest::RowAdvance
            | NavRequest::RowRetreat
            | NavRequest::RowFirst
            | NavRequest::RowLast => None,
        }
    }
}

/// Whether a typed character participates in typeahead.
///
/// Mirrors the word-character class: letters, digits, and underscore.
/// Whitespace never matches; a plain space is an activation key upstream.
pub fn is_typeahead_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn step_forward<K>(origin: Option<K>, list: &NavList<'_, K>, wrap: bool) -> Option<K>
where
    K: Copy + Eq,
{
    let entries = list.entries;
    let pos = origin.and_then(|o| list.position(o));
    let Some(pos) = pos else {
        // No current cursor: land on the first enabled entry.
        return list.first_enabled();
    };
    if let Some(e) = entries[pos + 1..].iter().find(|e| e.enabled) {
        return Some(e.id);
    }
    if wrap {
        // Wrap once; with a single enabled entry this lands back on it.
        return entries[..=pos].iter().find(|e| e.enabled).map(|e| e.id);
    }
    None
}

fn step_backward<K>(origin: Option<K>, list: &NavList<'_, K>, wrap: bool) -> Option<K>
where
    K: Copy + Eq,
{
    let entries = list.entries;
    let pos = origin.and_then(|o| list.position(o));
    let Some(pos) = pos else {
        return list.last_enabled();
    };
    if let Some(e) = entries[..pos].iter().rev().find(|e| e.enabled) {
        return Some(e.id);
    }
    if wrap {
        return entries[pos..].iter().rev().find(|e| e.enabled).map(|e| e.id);
    }
    None
}

/// Scan for the next enabled entry whose label starts with `c`,
/// case-insensitively, beginning just after the origin and wrapping once.
///
/// No match leaves the cursor unchanged (`None`).
fn typeahead<K>(origin: Option<K>, c: char, list: &NavList<'_, K>) -> Option<K>
where
    K: Copy + Eq,
{
    let entries = list.entries;
    if entries.is_empty() {
        return None;
    }
    // With no cursor the scan covers the whole list from the top.
    let start = origin
        .and_then(|o| list.position(o))
        .map_or(0, |pos| pos + 1);
    let n = entries.len();
    for offset in 0..n {
        let e = &entries[(start + offset) % n];
        if !e.enabled {
            continue;
        }
        let Some(first) = e.label.and_then(|l| l.chars().next()) else {
            continue;
        };
        if first.to_lowercase().eq(c.to_lowercase()) {
            return Some(e.id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn entry(id: u32, label: &str) -> NavEntry<'_, u32> {
        NavEntry {
            id,
            label: Some(label),
            enabled: true,
        }
    }

    fn disabled(id: u32, label: &str) -> NavEntry<'_, u32> {
        NavEntry {
            id,
            label: Some(label),
            enabled: false,
        }
    }

    #[test]
    fn advance_and_retreat_with_wrap() {
        let entries = vec![entry(1, "a"), entry(2, "b"), entry(3, "c")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: true,
        };

        assert_eq!(policy.next(Some(1), NavRequest::Advance, &list), Some(2));
        assert_eq!(policy.next(Some(3), NavRequest::Advance, &list), Some(1));
        assert_eq!(policy.next(Some(1), NavRequest::Retreat, &list), Some(3));
    }

    #[test]
    fn no_wrap_stops_at_edges() {
        let entries = vec![entry(1, "a"), entry(2, "b")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };

        assert_eq!(policy.next(Some(2), NavRequest::Advance, &list), None);
        assert_eq!(policy.next(Some(1), NavRequest::Retreat, &list), None);
    }

    #[test]
    fn advancing_at_the_end_without_wrap_is_idempotent() {
        let entries = vec![entry(1, "a"), entry(2, "b")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };

        // Repeated advances at the edge never move the cursor.
        assert_eq!(policy.next(Some(2), NavRequest::Advance, &list), None);
        assert_eq!(policy.next(Some(2), NavRequest::Advance, &list), None);
    }

    #[test]
    fn wrap_returns_to_start_after_full_cycle() {
        let entries = vec![entry(1, "a"), entry(2, "b"), entry(3, "c")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: true,
        };

        let mut cursor = Some(2_u32);
        for _ in 0..entries.len() {
            cursor = policy.next(cursor, NavRequest::Advance, &list);
        }
        assert_eq!(cursor, Some(2));
    }

    #[test]
    fn skips_disabled_entries() {
        let entries = vec![entry(1, "a"), disabled(2, "b"), entry(3, "c")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };

        assert_eq!(policy.next(Some(1), NavRequest::Advance, &list), Some(3));
        assert_eq!(policy.next(Some(3), NavRequest::Retreat, &list), Some(1));
    }

    #[test]
    fn stepping_from_a_disabled_origin_uses_its_position() {
        // The cursor can sit on an entry that was disabled after the fact;
        // movement continues from its slot rather than restarting.
        let entries = vec![entry(1, "a"), disabled(2, "b"), entry(3, "c")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };

        assert_eq!(policy.next(Some(2), NavRequest::Advance, &list), Some(3));
        assert_eq!(policy.next(Some(2), NavRequest::Retreat, &list), Some(1));
    }

    #[test]
    fn no_cursor_lands_on_first_or_last_enabled() {
        let entries = vec![disabled(1, "a"), entry(2, "b"), entry(3, "c")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };

        assert_eq!(policy.next(None, NavRequest::Advance, &list), Some(2));
        assert_eq!(policy.next(None, NavRequest::Retreat, &list), Some(3));
    }

    #[test]
    fn home_and_end_jump_to_enabled_extremes() {
        let entries = vec![disabled(1, "a"), entry(2, "b"), disabled(3, "c")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };

        assert_eq!(policy.next(Some(2), NavRequest::First, &list), Some(2));
        assert_eq!(policy.next(Some(2), NavRequest::Last, &list), Some(2));
    }

    #[test]
    fn empty_or_fully_disabled_list_never_moves() {
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: true,
        };

        let empty: [NavEntry<'_, u32>; 0] = [];
        let list = NavList { entries: &empty };
        assert_eq!(policy.next(None, NavRequest::Advance, &list), None);

        let entries = vec![disabled(1, "a"), disabled(2, "b")];
        let list = NavList { entries: &entries };
        assert_eq!(policy.next(Some(1), NavRequest::Advance, &list), None);
        assert_eq!(policy.next(None, NavRequest::First, &list), None);
    }

    #[test]
    fn axis_gates_which_arrows_resolve() {
        let inline = LinearPolicy {
            axis: Axis::Inline,
            wrap: false,
        };
        let block = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };
        let both = LinearPolicy {
            axis: Axis::Both,
            wrap: false,
        };

        assert_eq!(
            NavPolicy::<u32>::request_for(&inline, NavKey::ArrowRight, false),
            Some(NavRequest::Advance)
        );
        assert_eq!(
            NavPolicy::<u32>::request_for(&inline, NavKey::ArrowDown, false),
            None
        );
        assert_eq!(
            NavPolicy::<u32>::request_for(&block, NavKey::ArrowLeft, false),
            None
        );
        assert_eq!(
            NavPolicy::<u32>::request_for(&block, NavKey::ArrowUp, false),
            Some(NavRequest::Retreat)
        );
        assert_eq!(
            NavPolicy::<u32>::request_for(&both, NavKey::ArrowLeft, false),
            Some(NavRequest::Retreat)
        );
        assert_eq!(
            NavPolicy::<u32>::request_for(&both, NavKey::ArrowDown, false),
            Some(NavRequest::Advance)
        );
    }

    #[test]
    fn typeahead_matches_after_cursor_and_wraps() {
        let entries = vec![
            entry(1, "Apple"),
            entry(2, "Banana"),
            entry(3, "Avocado"),
        ];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };

        // From "Apple", 'a' finds the next match in order: "Avocado".
        assert_eq!(
            policy.next(Some(1), NavRequest::Typeahead('a'), &list),
            Some(3)
        );
        assert_eq!(
            policy.next(Some(1), NavRequest::Typeahead('b'), &list),
            Some(2)
        );
        // From "Avocado", 'a' wraps around to "Apple".
        assert_eq!(
            policy.next(Some(3), NavRequest::Typeahead('a'), &list),
            Some(1)
        );
    }

    #[test]
    fn typeahead_is_case_insensitive_and_skips_disabled() {
        let entries = vec![entry(1, "alpha"), disabled(2, "Beta"), entry(3, "Bravo")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };

        assert_eq!(
            policy.next(Some(1), NavRequest::Typeahead('B'), &list),
            Some(3)
        );
        assert_eq!(
            policy.next(Some(3), NavRequest::Typeahead('A'), &list),
            Some(1)
        );
    }

    #[test]
    fn typeahead_without_match_leaves_cursor_alone() {
        let entries = vec![entry(1, "Apple"), entry(2, "Banana")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Block,
            wrap: false,
        };

        assert_eq!(policy.next(Some(1), NavRequest::Typeahead('z'), &list), None);
    }

    #[test]
    fn typeahead_chars_are_word_characters() {
        assert!(is_typeahead_char('a'));
        assert!(is_typeahead_char('Z'));
        assert!(is_typeahead_char('7'));
        assert!(is_typeahead_char('_'));
        assert!(!is_typeahead_char(' '));
        assert!(!is_typeahead_char('-'));
    }

    #[test]
    fn row_requests_are_not_linear_vocabulary() {
        let entries = vec![entry(1, "a"), entry(2, "b")];
        let list = NavList { entries: &entries };
        let policy = LinearPolicy {
            axis: Axis::Both,
            wrap: true,
        };

        assert_eq!(policy.next(Some(1), NavRequest::RowAdvance, &list), None);
        assert_eq!(policy.next(Some(1), NavRequest::RowFirst, &list), None);
    }
}
