// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ownership resolution for events inside nested composites.
//!
//! Composites nest to arbitrary depth, and a key or pointer event bubbling
//! out of a descendant must be interpreted by exactly one of them. The rule:
//! the event belongs first to the *nearest* composite containing the target;
//! enclosing composites get a turn only if the nearer one declines. Hosts
//! drive that protocol with [`dispatch_order`]: offer the event to each
//! listed engine in turn and stop at the first response whose `consumed`
//! flag is set, so an outer composite sharing the same key bindings never
//! double-handles.
//!
//! [`item_containing`] answers the complementary question inside one
//! composite: which direct item of this composite does a deep event target
//! belong to.

use alloc::vec::Vec;

use crate::graph::FocusGraph;
use crate::types::Item;

/// The nearest composite root at or above `target`.
pub fn owning_composite<K, G>(graph: &G, target: K) -> Option<K>
where
    K: Copy + Eq,
    G: FocusGraph<K>,
{
    let mut cur = Some(target);
    while let Some(id) = cur {
        if graph.is_composite_root(id) {
            return Some(id);
        }
        cur = graph.parent_of(id);
    }
    None
}

/// Composite roots containing `target`, nearest first.
///
/// This is the order to offer a bubbling event to engines in; stop at the
/// first consumed response. May be empty when the target sits outside any
/// composite.
pub fn dispatch_order<K, G>(graph: &G, target: K) -> Vec<K>
where
    K: Copy + Eq,
    G: FocusGraph<K>,
{
    let mut order = Vec::new();
    let mut cur = Some(target);
    while let Some(id) = cur {
        if graph.is_composite_root(id) {
            order.push(id);
        }
        cur = graph.parent_of(id);
    }
    order
}

/// Whether `id` lies within the subtree rooted at `root`, root included.
pub fn contains<K, G>(graph: &G, root: K, id: K) -> bool
where
    K: Copy + Eq,
    G: FocusGraph<K>,
{
    let mut cur = Some(id);
    while let Some(node) = cur {
        if node == root {
            return true;
        }
        cur = graph.parent_of(node);
    }
    false
}

/// The direct item of `root`'s composite whose subtree contains `target`.
///
/// Walks the parent chain from `target` toward `root`, so a click on a
/// span inside a focusable wrapper resolves to the wrapper item. Returns
/// `None` when the target is the root itself, sits between items, or is
/// outside the composite entirely.
pub fn item_containing<K, G>(graph: &G, root: K, items: &[Item<K>], target: K) -> Option<K>
where
    K: Copy + Eq,
    G: FocusGraph<K>,
{
    let mut cur = Some(target);
    while let Some(id) = cur {
        if id == root {
            return None;
        }
        if items.iter().any(|it| it.id == id) {
            return Some(id);
        }
        cur = graph.parent_of(id);
    }
    None
}
