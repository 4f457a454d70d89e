// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only capability view of the host's element tree.
//!
//! The engine never touches a platform tree directly. Every structural and
//! attribute read goes through [`FocusGraph`], which keeps discovery and
//! navigation portable across hosts and testable on synthetic graphs. The
//! graph is borrowed per call; the engine holds no reference to it between
//! events, so hosts are free to rebuild or mutate their tree in between.
//!
//! Implementations answer for stale keys by reporting the element as not
//! focusable; the engine then treats it like any other unreachable item.

/// Capability trait the engine reads the element tree through.
///
/// `K` is a small copyable element key (an arena id, a slot index, a
/// handle); the graph resolves it to whatever the host stores.
pub trait FocusGraph<K: Copy + Eq> {
    /// Parent of `id`, or `None` at a root.
    fn parent_of(&self, id: K) -> Option<K>;

    /// First child of `id` in document order.
    fn first_child(&self, id: K) -> Option<K>;

    /// Next sibling of `id` in document order.
    fn next_sibling(&self, id: K) -> Option<K>;

    /// Whether the element can take focus at all.
    fn is_focusable(&self, id: K) -> bool;

    /// Whether the element itself is disabled. Inherited disabled state is
    /// derived by the engine; see [`effective_disabled`].
    fn is_disabled(&self, id: K) -> bool;

    /// Whether the element is removed from presentation (hidden, inert, or
    /// the host's equivalent).
    fn is_hidden(&self, id: K) -> bool;

    /// Whether the element is the root of a composite of its own.
    fn is_composite_root(&self, id: K) -> bool;

    /// When `id` seals its internals behind a focus-delegation boundary,
    /// the focusable unit standing in for the whole subtree. Discovery never
    /// walks past such an element.
    fn crosses_boundary_at(&self, id: K) -> Option<K>;

    /// The author-declared tab index, if one was declared.
    fn declared_tab_index(&self, id: K) -> Option<i16>;

    /// Text used for typeahead matching.
    fn label(&self, id: K) -> Option<&str>;
}

/// Whether `id` is disabled on its own or through any ancestor.
pub fn effective_disabled<K, G>(graph: &G, id: K) -> bool
where
    K: Copy + Eq,
    G: FocusGraph<K>,
{
    let mut cur = Some(id);
    while let Some(node) = cur {
        if graph.is_disabled(node) {
            return true;
        }
        cur = graph.parent_of(node);
    }
    false
}
