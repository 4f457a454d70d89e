// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Coppice crates.
//!
//! The engine itself only ever sees a [`FocusGraph`](crate::graph::FocusGraph)
//! and emits [`Effect`](crate::effects::Effect) values; these adapters bind
//! those seams to concrete tree implementations. Each adapter is gated behind
//! a feature flag to keep the core engine lightweight and `no_std` by default.
//!
//! ## Available Adapters
//!
//! - [`dom`] (`dom_adapter` feature): Integration with [`coppice_dom`] for
//!   retained element trees. Implements the focus graph over the element tree
//!   and writes tab-index effects back into it.

#[cfg(feature = "dom_adapter")]
pub mod dom;
