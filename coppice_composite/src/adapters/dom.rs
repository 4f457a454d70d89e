// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for the Coppice DOM element tree.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.
//!
//! ## Notes
//!
//! [`ElementTree`] implements [`FocusGraph`] directly, so a
//! [`Composite`](crate::engine::Composite) navigates it without glue code.
//! Stale identifiers answer as not focusable, which keeps the engine off
//! removed elements between mutation and re-index.
//!
//! [`apply_effects`] writes the tab-index effects back into the tree. Focus,
//! expansion, and selection marks are left to the host's platform layer,
//! which knows what those mean for its widgets.

use coppice_dom::{ElementFlags, ElementId, ElementTree};

use crate::effects::Effect;
use crate::graph::FocusGraph;

impl FocusGraph<ElementId> for ElementTree {
    fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.parent_of(id)
    }

    fn first_child(&self, id: ElementId) -> Option<ElementId> {
        self.children_of(id).first().copied()
    }

    fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self.parent_of(id)?;
        let siblings = self.children_of(parent);
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings.get(pos + 1).copied()
    }

    fn is_focusable(&self, id: ElementId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(ElementFlags::FOCUSABLE))
    }

    fn is_disabled(&self, id: ElementId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(ElementFlags::DISABLED))
    }

    fn is_hidden(&self, id: ElementId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.intersects(ElementFlags::HIDDEN | ElementFlags::INERT))
    }

    fn is_composite_root(&self, id: ElementId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(ElementFlags::COMPOSITE_ROOT))
    }

    fn crosses_boundary_at(&self, id: ElementId) -> Option<ElementId> {
        self.flags(id)
            .is_some_and(|f| f.contains(ElementFlags::DELEGATES_FOCUS))
            .then_some(id)
    }

    fn declared_tab_index(&self, id: ElementId) -> Option<i16> {
        self.tab_index(id)
    }

    fn label(&self, id: ElementId) -> Option<&str> {
        self.label(id)
    }
}

/// Write a response's tab-index effects into the tree.
///
/// [`Effect::SetTabIndex`] and [`Effect::RestoreTabIndex`] become
/// [`ElementTree::set_tab_index`] calls, with a `None` restore removing the
/// declaration. The remaining effect kinds address platform state the
/// element tree does not model and are skipped. Stale identifiers are
/// ignored by the tree itself.
pub fn apply_effects(tree: &mut ElementTree, effects: &[Effect<ElementId>]) {
    for effect in effects {
        match *effect {
            Effect::SetTabIndex(id, value) => tree.set_tab_index(id, Some(value)),
            Effect::RestoreTabIndex(id, declared) => tree.set_tab_index(id, declared),
            Effect::Focus(_) | Effect::Open(_) | Effect::Close(_) | Effect::SetSelected(..) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Composite;
    use crate::types::{CompositeOptions, ItemKind, Key, KeyInput};
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use coppice_dom::Element;

    fn composite_el() -> Element {
        Element {
            flags: ElementFlags::FOCUSABLE | ElementFlags::COMPOSITE_ROOT,
            ..Element::default()
        }
    }

    fn item_el(label: &str) -> Element {
        Element {
            flags: ElementFlags::FOCUSABLE,
            label: Some(label.to_string()),
            ..Element::default()
        }
    }

    #[test]
    fn tree_backed_composite_navigates_and_applies() {
        let mut tree = ElementTree::new();
        let menu = tree.insert(None, composite_el());
        let cut = tree.insert(Some(menu), item_el("Cut"));
        let copy = tree.insert(Some(menu), item_el("Copy"));
        let _ = tree.commit();

        let mut composite = Composite::new(menu, CompositeOptions::default());
        let response = composite.flush(&tree);
        apply_effects(&mut tree, &response.effects);
        assert_eq!(tree.tab_index(cut), Some(0));
        assert_eq!(tree.tab_index(copy), Some(-1));

        composite.handle_focus_in(&tree, cut);
        let response = composite.handle_key(&tree, KeyInput::new(Key::ArrowDown));
        apply_effects(&mut tree, &response.effects);

        assert!(response.consumed);
        assert_eq!(composite.current_item(), Some(copy));
        assert_eq!(tree.tab_index(cut), Some(-1));
        assert_eq!(tree.tab_index(copy), Some(0));
    }

    #[test]
    fn typeahead_reads_tree_labels() {
        let mut tree = ElementTree::new();
        let menu = tree.insert(None, composite_el());
        let cut = tree.insert(Some(menu), item_el("Cut"));
        tree.insert(Some(menu), item_el("Copy"));
        let paste = tree.insert(Some(menu), item_el("Paste"));
        let _ = tree.commit();

        let mut composite = Composite::new(menu, CompositeOptions::default());
        composite.flush(&tree);
        composite.handle_focus_in(&tree, cut);

        composite.handle_key(&tree, KeyInput::new(Key::Char('p')));
        assert_eq!(composite.current_item(), Some(paste));
        composite.handle_key(&tree, KeyInput::new(Key::Char('c')));
        assert_eq!(composite.current_item(), Some(cut));
    }

    #[test]
    fn damage_drives_reindexing() {
        let mut tree = ElementTree::new();
        let menu = tree.insert(None, composite_el());
        let cut = tree.insert(Some(menu), item_el("Cut"));
        let copy = tree.insert(Some(menu), item_el("Copy"));
        let _ = tree.commit();

        let mut composite = Composite::new(menu, CompositeOptions::default());
        let response = composite.flush(&tree);
        apply_effects(&mut tree, &response.effects);
        assert_eq!(composite.current_item(), Some(cut));

        // Remove the current item; the commit names the disturbed composite.
        tree.remove(cut);
        let damage = tree.commit();
        assert_eq!(damage.disturbed, vec![menu]);
        for _ in &damage.disturbed {
            composite.notify_mutation();
        }

        let response = composite.flush(&tree);
        apply_effects(&mut tree, &response.effects);

        assert_eq!(composite.current_item(), Some(copy));
        assert_eq!(composite.items().len(), 1);
        assert_eq!(tree.tab_index(copy), Some(0));
        // The restore aimed at the removed element lands on a stale id and
        // is ignored.
        assert_eq!(tree.tab_index(cut), None);
    }

    #[test]
    fn hidden_and_inert_subtrees_are_excluded() {
        let mut tree = ElementTree::new();
        let menu = tree.insert(None, composite_el());
        let visible = tree.insert(Some(menu), item_el("Visible"));
        let shroud = tree.insert(
            Some(menu),
            Element {
                flags: ElementFlags::HIDDEN,
                ..Element::default()
            },
        );
        tree.insert(Some(shroud), item_el("Buried"));
        tree.insert(
            Some(menu),
            Element {
                flags: ElementFlags::FOCUSABLE | ElementFlags::INERT,
                ..Element::default()
            },
        );
        let _ = tree.commit();

        let mut composite = Composite::new(menu, CompositeOptions::default());
        composite.flush(&tree);

        let ids: Vec<ElementId> = composite.items().iter().map(|it| it.id).collect();
        assert_eq!(ids, vec![visible]);
    }

    #[test]
    fn delegating_host_is_a_single_sealed_item() {
        let mut tree = ElementTree::new();
        let menu = tree.insert(None, composite_el());
        let plain = tree.insert(Some(menu), item_el("Plain"));
        let host = tree.insert(
            Some(menu),
            Element {
                flags: ElementFlags::FOCUSABLE | ElementFlags::DELEGATES_FOCUS,
                ..Element::default()
            },
        );
        tree.insert(Some(host), item_el("Internal"));
        let _ = tree.commit();

        let mut composite = Composite::new(menu, CompositeOptions::default());
        composite.flush(&tree);

        let items = composite.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, plain);
        assert_eq!(items[1].id, host);
        assert_eq!(items[1].kind, ItemKind::Leaf);
    }

    #[test]
    fn release_restores_author_declarations() {
        let mut tree = ElementTree::new();
        let menu = tree.insert(None, composite_el());
        let declared = tree.insert(
            Some(menu),
            Element {
                tab_index: Some(4),
                ..item_el("Declared")
            },
        );
        let bare = tree.insert(Some(menu), item_el("Bare"));
        let _ = tree.commit();

        let mut composite = Composite::new(menu, CompositeOptions::default());
        let response = composite.flush(&tree);
        apply_effects(&mut tree, &response.effects);
        assert_eq!(tree.tab_index(declared), Some(0));
        assert_eq!(tree.tab_index(bare), Some(-1));

        let response = composite.release();
        apply_effects(&mut tree, &response.effects);

        assert_eq!(tree.tab_index(declared), Some(4));
        assert_eq!(tree.tab_index(bare), None);
    }
}
