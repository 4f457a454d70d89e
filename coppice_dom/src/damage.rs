// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage summary types returned from commit.

use crate::types::ElementId;

/// A batched set of changes derived from [`crate::ElementTree::commit`].
#[derive(Clone, Debug, Default)]
pub struct TreeDamage {
    /// Composite roots whose subtrees changed since the last commit and
    /// should be re-indexed. Each root appears at most once, ordered
    /// innermost first along each mutation's ancestor chain.
    pub disturbed: alloc::vec::Vec<ElementId>,
}

impl TreeDamage {
    /// Returns `true` if no composite was disturbed.
    pub fn is_empty(&self) -> bool {
        self.disturbed.is_empty()
    }
}
