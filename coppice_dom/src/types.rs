// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: identifiers, flags, and authored data.

use alloc::string::String;

/// Identifier for an element in the tree (generational).
///
/// Removing an element frees its slot for reuse. Identifiers handed out
/// earlier for that slot become stale and every query made with them
/// returns `None` (or an empty slice).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling focus participation and composite structure.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element can receive focus.
        const FOCUSABLE = 0b0000_0001;
        /// Element is disabled. Keyboard navigation steps over disabled
        /// elements without landing on them.
        const DISABLED = 0b0000_0010;
        /// Element is hidden. Hidden subtrees do not participate in focus at
        /// all.
        const HIDDEN = 0b0000_0100;
        /// Element is inert. Same exclusion as [`ElementFlags::HIDDEN`], kept
        /// separate so hosts can mirror both host attributes.
        const INERT = 0b0000_1000;
        /// Element is the root of a composite widget and is treated as one
        /// opaque focusable unit by enclosing composites.
        const COMPOSITE_ROOT = 0b0001_0000;
        /// Element forwards focus into a subtree the host cannot enumerate
        /// (for example a shadow root with `delegatesFocus`). The element is
        /// the focusable unit; its children are never walked.
        const DELEGATES_FOCUS = 0b0010_0000;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Authored data for an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Focus participation and structure flags.
    pub flags: ElementFlags,
    /// Explicit author-declared tab index, if any. `Some(-1)` keeps the
    /// element focusable but out of the sequential tab order.
    pub tab_index: Option<i16>,
    /// Accessible label, used for typeahead matching.
    pub label: Option<String>,
}
