// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform writes the engine asks the host to perform.
//!
//! Engine calls return an ordered effect sequence instead of writing to a
//! platform; the host applies each effect through whatever mechanism it has
//! (element attributes, a retained tree, a test log). Two rules keep the
//! application honest:
//!
//! 1. Apply in sequence order. Roving updates rely on it so that no two
//!    items are tab-reachable at once.
//! 2. Skip effects whose key no longer resolves. Keys can go stale between
//!    emission and application; a stale write is a silent no-op, never an
//!    error.
//!
//! The engine describes only focus machinery here. Item actions (what an
//! activated menu entry *does*) stay with the host, which reads the
//! response's `consumed` flag and the composite's current item.

use smallvec::SmallVec;

/// One deferred platform write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect<K> {
    /// Set the element's tab index.
    SetTabIndex(K, i16),
    /// Restore the author-declared tab index; `None` removes the attribute.
    RestoreTabIndex(K, Option<i16>),
    /// Move platform focus to the element.
    Focus(K),
    /// Reveal the composite's disclosed content. Hosts without a disclosure
    /// surface ignore this.
    Open(K),
    /// Hide the composite's disclosed content.
    Close(K),
    /// Mark or unmark the element as selected.
    SetSelected(K, bool),
}

/// Effect buffer with inline room for a typical response.
pub type Effects<K> = SmallVec<[Effect<K>; 8]>;

/// Apply `effects` in order through `apply`.
///
/// `host` is threaded through to every call so appliers can be plain
/// functions over the host state rather than capturing closures.
pub fn run<K, H>(effects: &[Effect<K>], host: &mut H, mut apply: impl FnMut(&Effect<K>, &mut H)) {
    for effect in effects {
        apply(effect, host);
    }
}
