// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=coppice_dom --heading-base-level=0

//! Coppice DOM: a synthetic, generationally addressed element tree.
//!
//! Coppice DOM is a reusable building block for focus and keyboard-navigation engines.
//!
//! - Represents a hierarchy of elements with the attributes focus logic cares about: focusability, disabled/hidden/inert state, author-declared tab index, and accessible labels.
//! - Marks composite-widget roots and focus-delegating hosts so higher layers can treat them as opaque units.
//! - Supports batched updates with an [`ElementTree::commit`] step that yields the set of disturbed composites.
//!
//! ## Where this fits
//!
//! We're standardizing on a simple separation of concerns for focus stacks.
//! - Host tree: the real UI hierarchy (DOM, widget tree, scene graph).
//! - Element tree: a focus-relevant mirror of that hierarchy (this crate).
//! - Composite engine: roving tabindex and active-cursor state driven from the mirror.
//!
//! The element tree records document order, parentage, and the attributes that decide whether an element participates in the tab order. It batches mutations into per-composite damage so engines re-index each disturbed composite once per flush rather than once per change. This decouples the focus model from any concrete platform tree and makes the navigation layers testable without a browser or toolkit.
//!
//! ## Not an accessibility tree
//!
//! This crate does not compute accessible names, roles, or platform accessibility nodes, and it does not dispatch events.
//! Upstream code is expected to mirror whatever host hierarchy it has into this tree and keep the mirror current; the tree only answers structural and attribute queries over it.
//! Think of this as a focus index, not an accessibility API.
//!
//! ## API overview
//!
//! - [`ElementTree`]: container managing elements and pending damage.
//! - [`Element`]: per-element authored data (flags, tab index, label).
//!   See [`Element::flags`] for focus participation controls.
//! - [`ElementFlags`]: focusability, exclusion, and composite-structure controls.
//! - [`ElementId`]: generational handle of an element.
//! - [`TreeDamage`]: the composites disturbed by a batch of mutations.
//!
//! Key operations:
//! - [`ElementTree::insert`](ElementTree::insert) → [`ElementId`]
//! - [`ElementTree::remove`](ElementTree::remove) / [`ElementTree::reparent`](ElementTree::reparent)
//! - [`ElementTree::set_flags`](ElementTree::set_flags) / [`ElementTree::set_tab_index`](ElementTree::set_tab_index) /
//!   [`ElementTree::set_label`](ElementTree::set_label)
//! - [`ElementTree::commit`](ElementTree::commit) → damage summary; resolves pending mutations to disturbed composites.
//! - [`ElementTree::parent_of`](ElementTree::parent_of) and [`ElementTree::children_of`](ElementTree::children_of) expose structure for live [`ElementId`]s.
//! - [`ElementTree::flags`](ElementTree::flags) / [`ElementTree::tab_index`](ElementTree::tab_index) / [`ElementTree::label`](ElementTree::label) expose authored data for live [`ElementId`]s.
//! - [`ElementTree::next_depth_first`](ElementTree::next_depth_first) and [`ElementTree::prev_depth_first`](ElementTree::prev_depth_first) provide document-order traversal.
//!
//! ## Damage and debugging notes
//!
//! - [`ElementTree::commit`] resolves each touched element to its chain of enclosing composite roots, so a mutation inside a nested composite disturbs both the nested composite and the composites that contain it, matching how subtree observers report in host trees.
//! - Disturbed composites are listed at most once per commit and the pending set is drained, so commit is cheap to call after every flush of writes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod tree;
mod types;

pub use damage::TreeDamage;
pub use tree::ElementTree;
pub use types::{Element, ElementFlags, ElementId};
