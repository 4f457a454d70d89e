// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, traversal.

use alloc::string::String;
use alloc::vec::Vec;

use crate::damage::TreeDamage;
use crate::types::{Element, ElementFlags, ElementId};

/// Top-level element tree.
///
/// Structural changes and attribute writes do **not** produce damage
/// immediately. They are batched and resolved when [`ElementTree::commit`] is
/// called, which reports the set of composite roots whose subtrees were
/// disturbed since the last commit. A burst of writes inside one composite
/// therefore yields that composite once, not once per write.
///
/// ## Example
///
/// ```rust
/// use coppice_dom::{Element, ElementFlags, ElementTree};
///
/// // Create a tree holding a composite with a single item.
/// let mut tree = ElementTree::new();
/// let menu = tree.insert(
///     None,
///     Element {
///         flags: ElementFlags::FOCUSABLE | ElementFlags::COMPOSITE_ROOT,
///         ..Element::default()
///     },
/// );
/// let item = tree.insert(
///     Some(menu),
///     Element {
///         flags: ElementFlags::FOCUSABLE,
///         ..Element::default()
///     },
/// );
///
/// // Both inserts disturb the same composite; commit reports it once.
/// let damage = tree.commit();
/// assert_eq!(damage.disturbed, vec![menu]);
/// assert_eq!(tree.parent_of(item), Some(menu));
/// ```
pub struct ElementTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// elements touched since the last commit, in mutation order
    pending: Vec<ElementId>,
}

impl core::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("ElementTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    element: Element,
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        }
    }
}

impl ElementTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Insert a new element as a child of `parent` (or as a root if `None`).
    ///
    /// The returned [`ElementId`] becomes live immediately; the composites
    /// the element landed in are reported as disturbed on the next call to
    /// [`ElementTree::commit`].
    pub fn insert(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        self.pending.push(id);
        id
    }

    /// Remove an element (and its subtree) from the tree.
    ///
    /// The identifier becomes stale immediately; the formerly enclosing
    /// composites are reported as disturbed on the next call to
    /// [`ElementTree::commit`].
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.pending.push(parent);
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent`.
    ///
    /// Both the old and the new enclosing composites are reported as
    /// disturbed on the next call to [`ElementTree::commit`].
    pub fn reparent(&mut self, id: ElementId, new_parent: Option<ElementId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.pending.push(parent);
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        self.pending.push(id);
    }

    /// Update element flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(n) = self.node_opt_mut(id)
            && n.element.flags != flags
        {
            n.element.flags = flags;
            self.pending.push(id);
        }
    }

    /// Update the author-declared tab index.
    pub fn set_tab_index(&mut self, id: ElementId, tab_index: Option<i16>) {
        if let Some(n) = self.node_opt_mut(id)
            && n.element.tab_index != tab_index
        {
            n.element.tab_index = tab_index;
            self.pending.push(id);
        }
    }

    /// Update the accessible label.
    pub fn set_label(&mut self, id: ElementId, label: Option<String>) {
        if let Some(n) = self.node_opt_mut(id)
            && n.element.label != label
        {
            n.element.label = label;
            self.pending.push(id);
        }
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: ElementId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    /// Run the batched update and return the disturbed composites.
    ///
    /// Every element touched since the last commit is resolved to its chain
    /// of composite-root ancestors, the element itself included when it is a
    /// composite root. Each disturbed composite is reported once no matter
    /// how many writes landed inside it. Call this after mutating elements or
    /// structure, then re-index the reported composites.
    pub fn commit(&mut self) -> TreeDamage {
        let mut damage = TreeDamage::default();
        let pending = core::mem::take(&mut self.pending);
        for id in pending {
            let mut cursor = Some(id);
            while let Some(el) = cursor {
                if !self.is_alive(el) {
                    break;
                }
                let node = self.node(el);
                if node.element.flags.contains(ElementFlags::COMPOSITE_ROOT)
                    && !damage.disturbed.contains(&el)
                {
                    damage.disturbed.push(el);
                }
                cursor = node.parent;
            }
        }
        damage
    }
}

impl ElementTree {
    // --- accessors and traversal ---

    /// Returns true if `id` refers to a live element.
    ///
    /// An `ElementId` is considered live if its slot exists and its
    /// generation matches the current generation stored in that slot.
    /// See [`ElementId`] docs for the generational semantics.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the flags of an element if the identifier is live.
    pub fn flags(&self, id: ElementId) -> Option<ElementFlags> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .map(|node| node.element.flags)
    }

    /// Returns the author-declared tab index of a live element.
    ///
    /// Returns `None` both for stale identifiers and for live elements with
    /// no declared tab index; the two cases are intentionally not
    /// distinguished.
    pub fn tab_index(&self, id: ElementId) -> Option<i16> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .and_then(|node| node.element.tab_index)
    }

    /// Returns the accessible label of a live element, if any.
    pub fn label(&self, id: ElementId) -> Option<&str> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .and_then(|node| node.element.label.as_deref())
    }

    /// Returns the parent of an element if live, or `None` for roots or
    /// stale ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .and_then(|node| node.parent)
    }

    /// Get the children of an element, or empty slice if the element is stale.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// Get the next element in depth-first (document) order.
    ///
    /// Returns `None` if no next element exists or if the current element is
    /// stale. This is a standard tree traversal that does not wrap around.
    pub fn next_depth_first(&self, current: ElementId) -> Option<ElementId> {
        if !self.is_alive(current) {
            return None;
        }

        self.next_in_order(current)
    }

    /// Get the previous element in reverse depth-first (document) order.
    ///
    /// Returns `None` if no previous element exists or if the current element
    /// is stale. This is a standard tree traversal that does not wrap around.
    pub fn prev_depth_first(&self, current: ElementId) -> Option<ElementId> {
        if !self.is_alive(current) {
            return None;
        }

        self.prev_in_order(current)
    }

    fn next_in_order(&self, current: ElementId) -> Option<ElementId> {
        let children = &self.node(current).children;
        if let Some(&first_child) = children.first()
            && self.is_alive(first_child)
        {
            return Some(first_child);
        }

        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    fn prev_in_order(&self, current: ElementId) -> Option<ElementId> {
        if let Some(prev_sibling) = self.prev_sibling(current) {
            return self.last_in_subtree(&[prev_sibling]);
        }

        self.parent_of(current)
    }

    fn next_sibling(&self, node: ElementId) -> Option<ElementId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn prev_sibling(&self, node: ElementId) -> Option<ElementId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        if pos > 0 {
            siblings.get(pos - 1).copied()
        } else {
            None
        }
    }

    fn last_in_subtree(&self, nodes: &[ElementId]) -> Option<ElementId> {
        if let Some(&node) = nodes.first()
            && self.is_alive(node)
        {
            let children = &self.node(node).children;
            if let Some(last_child) = children.last()
                && self.is_alive(*last_child)
            {
                return self.last_in_subtree(&[*last_child]);
            }
            return Some(node);
        }
        None
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
