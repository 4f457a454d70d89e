// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=coppice_composite --heading-base-level=0

//! Coppice Composite: a deterministic, `no_std` focus and keyboard-navigation engine for composite widgets.
//!
//! ## Overview
//!
//! A composite widget (menu, listbox, tree, toolbar, tab list, grid) presents
//! many focusable items as one tab stop: `Tab` enters the widget, arrow keys
//! move inside it, and exactly one item is tab-reachable at any time. This
//! crate computes that behavior. It owns no platform tree and installs no
//! event listeners; the host forwards its events through a
//! [`Composite`](crate::engine::Composite) and applies the returned effects.
//!
//! ## Items and discovery
//!
//! The engine reads the host's element hierarchy through the
//! [`FocusGraph`](crate::graph::FocusGraph) capability trait and derives the
//! item list itself: focusable, visible, enabled elements in document order,
//! with nested composite roots and focus-delegating hosts kept as single
//! opaque items. Child-list changes are reported with
//! [`notify_mutation`](crate::engine::Composite::notify_mutation); any burst
//! of reports collapses into one re-index at the next event.
//!
//! ## Event protocol
//!
//! Each handler returns a [`Response`](crate::types::Response): a `consumed`
//! verdict for the triggering event plus an ordered effect list. When
//! composites nest, the host offers a bubbling event to each engine named by
//! [`resolver::dispatch_order`](crate::resolver::dispatch_order), innermost
//! first, and stops at the first claimed response. Effects are applied in
//! order with [`effects::run`](crate::effects::run) or a hand-rolled loop.
//!
//! ```
//! use coppice_composite::engine::Composite;
//! use coppice_composite::types::{CompositeOptions, Key, KeyInput};
//! # use coppice_composite::graph::FocusGraph;
//! # struct Menu;
//! # impl FocusGraph<u32> for Menu {
//! #     fn parent_of(&self, id: u32) -> Option<u32> { (id != 0).then_some(0) }
//! #     fn first_child(&self, id: u32) -> Option<u32> { (id == 0).then_some(1) }
//! #     fn next_sibling(&self, id: u32) -> Option<u32> { (1..3).contains(&id).then_some(id + 1) }
//! #     fn is_focusable(&self, id: u32) -> bool { id != 0 }
//! #     fn is_disabled(&self, _id: u32) -> bool { false }
//! #     fn is_hidden(&self, _id: u32) -> bool { false }
//! #     fn is_composite_root(&self, id: u32) -> bool { id == 0 }
//! #     fn crosses_boundary_at(&self, _id: u32) -> Option<u32> { None }
//! #     fn declared_tab_index(&self, _id: u32) -> Option<i16> { None }
//! #     fn label(&self, _id: u32) -> Option<&str> { None }
//! # }
//! # let menu = Menu;
//! // A menu rooted at 0 with items 1, 2, 3.
//! let mut composite = Composite::new(0, CompositeOptions::default());
//! composite.flush(&menu);
//! assert_eq!(composite.current_item(), Some(1));
//!
//! // Focus lands on the roving stop; ArrowDown then moves the cursor.
//! composite.handle_focus_in(&menu, 1);
//! let response = composite.handle_key(&menu, KeyInput::new(Key::ArrowDown));
//! assert!(response.consumed);
//! assert_eq!(composite.current_item(), Some(2));
//! ```
//!
//! ## Movement and policies
//!
//! Cursor movement is computed by the policies in [`coppice_cursor`]: linear
//! composites configure an axis and wrap behavior, grids a column count, and
//! labelled items get first-character typeahead. Selection-capable widgets
//! layer [`coppice_selection`] on top, driven by the same engine.
//!
//! ## Roving tab index
//!
//! The engine emits tab-index writes so the current item carries `0` and all
//! others `-1`, and it captures each item's author-declared value the first
//! time it is seen so teardown ([`release`](crate::engine::Composite::release))
//! can restore the document to its authored state.
//!
//! ## Adapters
//!
//! The [`adapters`] module provides integration with other Coppice crates:
//!
//! - **DOM Adapter** (`dom_adapter` feature): implements the focus graph over
//!   [`coppice_dom`]'s element tree and writes tab-index effects back into it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod disclosure;
pub mod discovery;
pub mod effects;
pub mod engine;
pub mod graph;
pub mod resolver;
pub mod roving;
pub mod types;
