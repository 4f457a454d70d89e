// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabbable discovery: enumerate the focus candidates of one composite.
//!
//! Discovery walks the subtree below a composite root in document order and
//! returns the ordered items that composite navigates among. Three opacity
//! rules shape the result:
//!
//! 1. A descendant that is itself a composite root becomes one opaque
//!    [`NestedComposite`](ItemKind::NestedComposite) item; its internals
//!    belong to the nested composite alone and are never flattened into the
//!    parent's list.
//! 2. An element that delegates focus across an encapsulation boundary is
//!    represented by its stand-in focusable unit; the sealed subtree is
//!    never walked.
//! 3. A hidden or inert element removes its whole subtree from the result.
//!
//! Disabled elements are excluded along with everything below them, since
//! disabled state inherits. A focusable element that is none of the above
//! becomes a [`Leaf`](ItemKind::Leaf) item, and its descendants are still
//! walked: focusable wrappers can legitimately contain further items.
//!
//! The author-declared tab index plays no part here. Items keep their place
//! in the list whatever their declared value; capturing and restoring those
//! values is the roving controller's job.

use alloc::vec::Vec;

use crate::graph::FocusGraph;
use crate::types::{Item, ItemKind};

/// Collect the ordered items of the composite rooted at `root`.
///
/// The root itself is never an item of its own composite. The result is in
/// depth-first document order and may be empty.
pub fn discover<K, G>(graph: &G, root: K) -> Vec<Item<K>>
where
    K: Copy + Eq,
    G: FocusGraph<K>,
{
    let mut items = Vec::new();
    let mut child = graph.first_child(root);
    while let Some(id) = child {
        collect(graph, id, &mut items);
        child = graph.next_sibling(id);
    }
    items
}

fn collect<K, G>(graph: &G, id: K, items: &mut Vec<Item<K>>)
where
    K: Copy + Eq,
    G: FocusGraph<K>,
{
    // Hidden, inert, and disabled subtrees disappear wholesale.
    if graph.is_hidden(id) || graph.is_disabled(id) {
        return;
    }
    if let Some(unit) = graph.crosses_boundary_at(id) {
        items.push(Item {
            id: unit,
            kind: ItemKind::Leaf,
        });
        return;
    }
    if graph.is_composite_root(id) {
        items.push(Item {
            id,
            kind: ItemKind::NestedComposite,
        });
        return;
    }
    if graph.is_focusable(id) {
        items.push(Item {
            id,
            kind: ItemKind::Leaf,
        });
    }
    let mut child = graph.first_child(id);
    while let Some(c) = child {
        collect(graph, c, items);
        child = graph.next_sibling(c);
    }
}
