// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine facade: one [`Composite`] instance per host composite.
//!
//! A [`Composite`] ties the crate's pieces together over a borrowed
//! [`FocusGraph`]: discovery builds the item list, the roving controller
//! keeps exactly one item tab-reachable, the cursor policies interpret
//! movement keys, the disclosure machine gates open/closed state, and the
//! selection set layers chosen-item bookkeeping on top. Every call returns a
//! [`Response`]: a claim verdict for the triggering event plus the ordered
//! effect sequence the host applies to its platform.
//!
//! ## Host protocol
//!
//! - Forward `keydown` to [`handle_key`](Composite::handle_key), `click` to
//!   [`handle_click`](Composite::handle_click), and focus traffic to
//!   [`handle_focus_in`](Composite::handle_focus_in) /
//!   [`handle_focus_out`](Composite::handle_focus_out).
//! - With nested composites, offer each bubbling event to the engines named
//!   by [`resolver::dispatch_order`] in order and stop at the first response
//!   with `consumed` set.
//! - Report child-list changes with
//!   [`notify_mutation`](Composite::notify_mutation). Notifications only
//!   mark the composite stale; the one re-index runs at the next call that
//!   needs fresh items (or an explicit [`flush`](Composite::flush)), always
//!   before the next key is interpreted.
//! - Apply every response's effects in order; see [`effects::run`].
//!
//! The engine performs no item actions of its own. When `Enter` lands on a
//! plain leaf the response is claimed but carries no effects; the host reads
//! [`current_item`](Composite::current_item) and invokes whatever the item
//! means, then may call [`deactivate`](Composite::deactivate) if its widget
//! closes on activation.
//!
//! [`effects::run`]: crate::effects::run
//! [`resolver::dispatch_order`]: crate::resolver::dispatch_order

use alloc::vec::Vec;
use core::hash::Hash;

use coppice_cursor::{GridPolicy, LinearPolicy, NavEntry, NavList, NavPolicy, NavRequest};
use coppice_selection::{SelectMode, SelectionChange, SelectionState};

use crate::disclosure::{Disclose, Disclosure};
use crate::discovery;
use crate::effects::{Effect, Effects};
use crate::graph::{FocusGraph, effective_disabled};
use crate::resolver;
use crate::roving::RovingTabindex;
use crate::types::{CompositeOptions, Item, ItemKind, Key, KeyInput, Response};

/// Focus and keyboard state for one composite widget.
#[derive(Clone, Debug)]
pub struct Composite<K> {
    root: K,
    options: CompositeOptions,
    items: Vec<Item<K>>,
    roving: RovingTabindex<K>,
    disclosure: Disclosure,
    selection: SelectionState<K>,
    linear: LinearPolicy,
    grid: Option<GridPolicy>,
    dirty: bool,
}

impl<K: Copy + Eq + Hash> Composite<K> {
    /// Create an engine for the composite rooted at `root`.
    ///
    /// The item list is derived lazily: the first call that needs it runs
    /// discovery, so construction itself never touches the graph.
    pub fn new(root: K, options: CompositeOptions) -> Self {
        Self {
            root,
            items: Vec::new(),
            roving: RovingTabindex::new(),
            disclosure: Disclosure::new(),
            selection: SelectionState::new(options.select_mode),
            linear: LinearPolicy {
                axis: options.axis,
                wrap: options.wrap,
            },
            grid: options.columns.map(|cols| GridPolicy { cols }),
            dirty: true,
            options,
        }
    }

    /// The composite's root element key.
    pub fn root(&self) -> K {
        self.root
    }

    /// The configuration this engine was built with.
    pub fn options(&self) -> &CompositeOptions {
        &self.options
    }

    /// The tracked items, in document order, as of the last re-index.
    pub fn items(&self) -> &[Item<K>] {
        &self.items
    }

    /// The item currently holding the roving tab stop.
    pub fn current_item(&self) -> Option<K> {
        self.roving.current()
    }

    /// Whether the composite is open/active.
    pub fn is_active(&self) -> bool {
        self.disclosure.is_active()
    }

    /// The selection set, in insertion order.
    pub fn selection(&self) -> &SelectionState<K> {
        &self.selection
    }

    /// Seed the cursor's starting item before the first activation, e.g.
    /// from a host attribute marking one item current.
    pub fn prefer_initial(&mut self, item: K) {
        self.roving.prefer_initial(item);
    }

    /// Mark the item list stale after a child-list mutation.
    ///
    /// Cheap and idempotent; any burst of notifications collapses into the
    /// single re-index performed at the next flush point.
    pub fn notify_mutation(&mut self) {
        self.dirty = true;
    }

    /// Re-index now if a mutation was reported since the last re-index.
    pub fn flush<G: FocusGraph<K>>(&mut self, graph: &G) -> Response<K> {
        let mut response = Response::unhandled();
        response.consumed = self.reindex_if_dirty(graph, &mut response.effects);
        response
    }

    /// Tear the engine down: close the disclosure and restore every captured
    /// author tab index. The host applies the effects, then drops the
    /// engine.
    pub fn release(&mut self) -> Response<K> {
        let mut response = Response::unhandled();
        if self.disclosure.close() {
            response.effects.push(Effect::Close(self.root));
        }
        self.roving.reset(&mut response.effects);
        response.consumed = !response.effects.is_empty();
        self.items.clear();
        self.dirty = true;
        response
    }

    /// Open programmatically. Focuses the entry item when
    /// `autofocus_on_open` is set.
    pub fn activate<G: FocusGraph<K>>(&mut self, graph: &G) -> Response<K> {
        if self.declined(graph) {
            return Response::unhandled();
        }
        let mut response = Response::unhandled();
        self.reindex_if_dirty(graph, &mut response.effects);
        if self.disclosure.open() {
            self.open_effects(graph, self.options.autofocus_on_open, &mut response.effects);
            response.consumed = true;
        }
        response
    }

    /// Close programmatically. Focus stays where it is.
    pub fn deactivate<G: FocusGraph<K>>(&mut self, graph: &G) -> Response<K> {
        if self.declined(graph) {
            return Response::unhandled();
        }
        let mut response = Response::unhandled();
        self.reindex_if_dirty(graph, &mut response.effects);
        if self.disclosure.close() {
            self.close_effects(false, &mut response.effects);
            response.consumed = true;
        }
        response
    }

    /// Move the cursor by an explicit request, bypassing key mapping.
    pub fn move_to<G: FocusGraph<K>>(&mut self, graph: &G, request: NavRequest) -> Response<K> {
        if self.declined(graph) {
            return Response::unhandled();
        }
        let mut response = Response::unhandled();
        self.reindex_if_dirty(graph, &mut response.effects);
        response.consumed = self.navigate(graph, request, &mut response.effects);
        response
    }

    /// Step the cursor forward by one item.
    pub fn advance<G: FocusGraph<K>>(&mut self, graph: &G) -> Response<K> {
        self.move_to(graph, NavRequest::Advance)
    }

    /// Step the cursor backward by one item.
    pub fn retreat<G: FocusGraph<K>>(&mut self, graph: &G) -> Response<K> {
        self.move_to(graph, NavRequest::Retreat)
    }

    /// Replace the selection wholesale, value-setter style.
    ///
    /// Cardinality rules of the selection mode apply; the response carries
    /// the mark/unmark effects for the delta.
    pub fn set_selection(&mut self, items: impl IntoIterator<Item = K>) -> Response<K> {
        let change = self.selection.replace_with(items);
        let mut response = Response::unhandled();
        response.consumed = !change.is_empty();
        self.emit_selection(&change, &mut response.effects);
        response
    }

    /// Interpret one key press.
    ///
    /// An active composite tries cursor movement first, then disclosure
    /// transitions, then item activation (`Enter`/`Space` on the current
    /// item). An inactive one reacts only to its configured opening keys.
    /// Whatever the key does, a claimed response means the host stops
    /// propagation; an unclaimed one (wrong-axis arrow, unconfigured key)
    /// must keep bubbling so an enclosing composite can interpret it.
    pub fn handle_key<G: FocusGraph<K>>(&mut self, graph: &G, input: KeyInput) -> Response<K> {
        if self.declined(graph) {
            return Response::unhandled();
        }
        let mut response = Response::unhandled();
        self.reindex_if_dirty(graph, &mut response.effects);

        if self.disclosure.is_active() {
            if let Some(nav) = input.key.nav()
                && let Some(request) = self.policy().request_for(nav, input.ctrl)
            {
                self.navigate(graph, request, &mut response.effects);
                // Claimed even without movement (edge without wrap, typeahead
                // without a match); only axis exclusion leaves the key alone.
                response.consumed = true;
                return response;
            }
            match self
                .disclosure
                .on_key(input.key, self.options.activation, self.options.axis)
            {
                Disclose::Closed => {
                    self.close_effects(true, &mut response.effects);
                    response.consumed = true;
                    return response;
                }
                Disclose::Released => {
                    self.close_effects(false, &mut response.effects);
                    return response;
                }
                Disclose::Opened | Disclose::Ignored => {}
            }
            if matches!(input.key, Key::Enter | Key::Space) {
                self.activate_current(graph, &mut response);
            }
            response
        } else {
            if self
                .disclosure
                .on_key(input.key, self.options.activation, self.options.axis)
                == Disclose::Opened
            {
                // Keyboard opening always focuses the entry item, whatever
                // the pointer autofocus policy says.
                self.open_effects(graph, true, &mut response.effects);
                response.consumed = true;
            }
            response
        }
    }

    /// Interpret one pointer press.
    ///
    /// A press on the root toggles the disclosure; a press on an item moves
    /// the cursor there and, for selectable leaves, toggles selection; a
    /// press outside the subtree closes the disclosure without claiming the
    /// event.
    pub fn handle_click<G: FocusGraph<K>>(&mut self, graph: &G, target: K) -> Response<K> {
        if self.declined(graph) {
            return Response::unhandled();
        }
        let mut response = Response::unhandled();
        self.reindex_if_dirty(graph, &mut response.effects);

        if target == self.root {
            if self.disclosure.close() {
                self.close_effects(false, &mut response.effects);
            } else {
                self.disclosure.open();
                self.open_effects(graph, self.options.autofocus_on_open, &mut response.effects);
            }
            response.consumed = true;
            return response;
        }
        if let Some(item) = resolver::item_containing(graph, self.root, &self.items, target) {
            if !self.enabled_in(graph, item) {
                return response;
            }
            response.consumed = true;
            if self.disclosure.open() {
                response.effects.push(Effect::Open(self.root));
            }
            // No focus effect: the press itself already moved focus.
            self.place_cursor(item, &mut response.effects);
            if self.item_kind(item) == Some(ItemKind::Leaf)
                && self.options.select_mode != SelectMode::None
            {
                self.toggle_selection(item, &mut response);
            }
            return response;
        }
        if resolver::contains(graph, self.root, target) {
            // Inside the composite but between items: nothing to claim.
            return response;
        }
        if self.disclosure.close() {
            self.close_effects(false, &mut response.effects);
        }
        response
    }

    /// Track focus arriving somewhere inside the composite.
    ///
    /// Focus reaching an item engages the composite and syncs the cursor,
    /// however focus got there: a pointer press, a script, or a tab landing
    /// on the roving stop. The response is never claimed; focus events
    /// inform every interested ancestor.
    pub fn handle_focus_in<G: FocusGraph<K>>(&mut self, graph: &G, target: K) -> Response<K> {
        if self.declined(graph) {
            return Response::unhandled();
        }
        let mut response = Response::unhandled();
        self.reindex_if_dirty(graph, &mut response.effects);
        let Some(item) = resolver::item_containing(graph, self.root, &self.items, target) else {
            return response;
        };
        if !self.enabled_in(graph, item) {
            return response;
        }
        if self.disclosure.open() {
            response.effects.push(Effect::Open(self.root));
        }
        if self.roving.current() != Some(item) {
            self.place_cursor(item, &mut response.effects);
        }
        response
    }

    /// Track focus leaving for `destination` (`None` when the platform
    /// reports no destination). A destination outside the subtree closes
    /// the disclosure; the cursor memory survives for the next activation.
    pub fn handle_focus_out<G: FocusGraph<K>>(
        &mut self,
        graph: &G,
        destination: Option<K>,
    ) -> Response<K> {
        if self.declined(graph) {
            return Response::unhandled();
        }
        let mut response = Response::unhandled();
        self.reindex_if_dirty(graph, &mut response.effects);
        let stays_inside = destination.is_some_and(|d| resolver::contains(graph, self.root, d));
        if !stays_inside && self.disclosure.close() {
            self.close_effects(false, &mut response.effects);
        }
        response
    }

    fn declined<G: FocusGraph<K>>(&self, graph: &G) -> bool {
        self.options.disabled || effective_disabled(graph, self.root)
    }

    fn policy(&self) -> &dyn NavPolicy<K> {
        match &self.grid {
            Some(grid) => grid,
            None => &self.linear,
        }
    }

    /// Whether the cursor may land on `id` right now. Checked live per
    /// event, so items disabled after discovery are stepped over.
    fn enabled_in<G: FocusGraph<K>>(&self, graph: &G, id: K) -> bool {
        graph.is_focusable(id) && !graph.is_hidden(id) && !effective_disabled(graph, id)
    }

    fn tracked_enabled<G: FocusGraph<K>>(&self, graph: &G, id: K) -> bool {
        self.items.iter().any(|it| it.id == id) && self.enabled_in(graph, id)
    }

    fn first_enabled<G: FocusGraph<K>>(&self, graph: &G) -> Option<K> {
        self.items
            .iter()
            .map(|it| it.id)
            .find(|&id| self.enabled_in(graph, id))
    }

    fn item_kind(&self, id: K) -> Option<ItemKind> {
        self.items.iter().find(|it| it.id == id).map(|it| it.kind)
    }

    /// Where an activation enters: the remembered item while it is still
    /// tracked and enabled, else the first enabled item.
    fn entry_item<G: FocusGraph<K>>(&self, graph: &G) -> Option<K> {
        self.roving
            .remembered()
            .filter(|&id| self.tracked_enabled(graph, id))
            .or_else(|| self.first_enabled(graph))
    }

    fn open_effects<G: FocusGraph<K>>(
        &mut self,
        graph: &G,
        focus_entry: bool,
        effects: &mut Effects<K>,
    ) {
        effects.push(Effect::Open(self.root));
        let Some(entry) = self.entry_item(graph) else {
            // Nothing enabled: the surface opens with no reachable item.
            return;
        };
        self.roving
            .activate_item(&self.items, entry, self.options.memory, effects);
        if focus_entry {
            effects.push(Effect::Focus(entry));
        }
    }

    /// Emit the closing writes. The disclosure state itself is flipped by
    /// the caller or the key machine before this runs.
    fn close_effects(&mut self, refocus_root: bool, effects: &mut Effects<K>) {
        effects.push(Effect::Close(self.root));
        if self.options.nested {
            // A folded nested composite takes its items out of the tab
            // order; a top-level one keeps its stop for the next tab visit.
            self.roving.park(&self.items, effects);
        }
        if refocus_root {
            effects.push(Effect::Focus(self.root));
        }
    }

    fn navigate<G: FocusGraph<K>>(
        &mut self,
        graph: &G,
        request: NavRequest,
        effects: &mut Effects<K>,
    ) -> bool {
        let entries: Vec<NavEntry<'_, K>> = self
            .items
            .iter()
            .map(|it| NavEntry {
                id: it.id,
                label: graph.label(it.id),
                enabled: self.enabled_in(graph, it.id),
            })
            .collect();
        let list = NavList { entries: &entries };
        let Some(target) = self.policy().next(self.roving.current(), request, &list) else {
            return false;
        };
        self.place_cursor(target, effects);
        effects.push(Effect::Focus(target));
        true
    }

    fn place_cursor(&mut self, target: K, effects: &mut Effects<K>) {
        let previous = self.roving.current();
        self.roving
            .activate_item(&self.items, target, self.options.memory, effects);
        if let Some(prev) = previous
            && prev != target
            && self.item_kind(prev) == Some(ItemKind::NestedComposite)
        {
            // Leaving an expanded child folds it shut.
            effects.push(Effect::Close(prev));
        }
    }

    fn activate_current<G: FocusGraph<K>>(&mut self, graph: &G, response: &mut Response<K>) {
        let Some(current) = self.roving.current() else {
            return;
        };
        if !self.enabled_in(graph, current) {
            return;
        }
        match self.item_kind(current) {
            Some(ItemKind::Leaf) => {
                response.consumed = true;
                if self.options.select_mode != SelectMode::None {
                    self.toggle_selection(current, response);
                }
            }
            // A nested item's own engine interprets its activation keys; we
            // leave the event for it.
            Some(ItemKind::NestedComposite) | None => {}
        }
    }

    fn toggle_selection(&mut self, item: K, response: &mut Response<K>) {
        let change = self.selection.toggle(item);
        self.emit_selection(&change, &mut response.effects);
        if self.options.close_on_select
            && self.selection.mode() == SelectMode::Single
            && !change.selected.is_empty()
            && self.disclosure.close()
        {
            // Select-element style: a pick collapses the popup and hands
            // focus back to the entry point.
            self.close_effects(true, &mut response.effects);
        }
    }

    fn emit_selection(&self, change: &SelectionChange<K>, effects: &mut Effects<K>) {
        for &id in &change.deselected {
            effects.push(Effect::SetSelected(id, false));
        }
        for &id in &change.selected {
            effects.push(Effect::SetSelected(id, true));
        }
    }

    /// The one re-index: restore, re-discover, re-capture, reconcile.
    ///
    /// Returns whether a re-index actually ran.
    fn reindex_if_dirty<G: FocusGraph<K>>(&mut self, graph: &G, effects: &mut Effects<K>) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        let previous = self.roving.current();
        self.roving.reset(effects);
        self.items = discovery::discover(graph, self.root);
        for item in &self.items {
            self.roving
                .capture_initial(item.id, graph.declared_tab_index(item.id));
        }
        self.roving
            .prune(|id| self.items.iter().any(|it| it.id == id));
        let dropped = self
            .selection
            .retain(|id| self.items.iter().any(|it| it.id == id));
        self.emit_selection(&dropped, effects);
        let landing = previous
            .filter(|&id| self.tracked_enabled(graph, id))
            .or_else(|| {
                self.roving
                    .remembered()
                    .filter(|&id| self.tracked_enabled(graph, id))
            })
            .or_else(|| self.first_enabled(graph));
        if self.options.nested && !self.disclosure.is_active() {
            self.roving.park(&self.items, effects);
        } else if let Some(target) = landing {
            self.roving
                .activate_item(&self.items, target, self.options.memory, effects);
        }
        true
    }
}
