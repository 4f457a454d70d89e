// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core vocabulary shared by the engine modules.

use coppice_cursor::{Axis, NavKey};
use coppice_selection::SelectMode;

use crate::disclosure::ActivationKeys;
use crate::effects::Effects;

/// A keyboard key, reduced to the set the engine reacts to.
///
/// Hosts translate their platform's key events into this enum; anything not
/// representable here is of no interest to a composite and should not be
/// forwarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The left arrow key.
    ArrowLeft,
    /// The right arrow key.
    ArrowRight,
    /// The up arrow key.
    ArrowUp,
    /// The down arrow key.
    ArrowDown,
    /// The `Home` key.
    Home,
    /// The `End` key.
    End,
    /// The `PageUp` key.
    PageUp,
    /// The `PageDown` key.
    PageDown,
    /// The `Enter` key.
    Enter,
    /// The space bar.
    Space,
    /// The `Escape` key.
    Escape,
    /// The `Tab` key, with or without `Shift`.
    Tab,
    /// The `F2` key.
    F2,
    /// A printable character.
    Char(char),
}

impl Key {
    /// The cursor-movement view of this key, if it has one.
    ///
    /// Activation and disclosure keys (`Enter`, `Escape`, `Tab`, …) have no
    /// movement meaning and return `None`.
    pub fn nav(self) -> Option<NavKey> {
        match self {
            Self::ArrowLeft => Some(NavKey::ArrowLeft),
            Self::ArrowRight => Some(NavKey::ArrowRight),
            Self::ArrowUp => Some(NavKey::ArrowUp),
            Self::ArrowDown => Some(NavKey::ArrowDown),
            Self::Home => Some(NavKey::Home),
            Self::End => Some(NavKey::End),
            Self::PageUp => Some(NavKey::PageUp),
            Self::PageDown => Some(NavKey::PageDown),
            Self::Char(c) => Some(NavKey::Char(c)),
            Self::Enter | Self::Space | Self::Escape | Self::Tab | Self::F2 => None,
        }
    }
}

/// One keyboard event, reduced to what the engine inspects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    /// The pressed key.
    pub key: Key,
    /// Whether the Control or platform command modifier was held.
    pub ctrl: bool,
}

impl KeyInput {
    /// A plain, unmodified key press.
    pub fn new(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    /// The same press with the Control/Command modifier held.
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

/// How an item participates in its composite.
///
/// Resolved once during discovery and carried on the item record, so the
/// engine never re-derives it while handling events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// An interactive leaf control.
    Leaf,
    /// A nested composite acting as one opaque item; its internals are owned
    /// by its own engine instance.
    NestedComposite,
}

/// One engine-tracked focus candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Item<K> {
    /// The element key the host resolves back to its platform element.
    pub id: K,
    /// Leaf control or opaque nested composite.
    pub kind: ItemKind,
}

/// Configuration of one composite, fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Which arrow keys move the cursor.
    pub axis: Axis,
    /// Whether stepping past either end wraps around.
    pub wrap: bool,
    /// Whether the cursor position is remembered across deactivation.
    /// When `false`, every activation enters at the first enabled item.
    pub memory: bool,
    /// Engine-level kill switch; a disabled composite declines every call.
    pub disabled: bool,
    /// Whether this composite is itself an item inside a parent composite.
    /// Nested composites park their items out of the tab order while closed.
    pub nested: bool,
    /// Whether opening by pointer moves focus to the entry item. Opening by
    /// keyboard always focuses the entry item, regardless of this flag.
    pub autofocus_on_open: bool,
    /// Whether a pick in `Single` selection mode also closes the composite,
    /// select-element style.
    pub close_on_select: bool,
    /// Selection cardinality layered on top of the cursor.
    pub select_mode: SelectMode,
    /// Which keys open or toggle the disclosure.
    pub activation: ActivationKeys,
    /// Column count for grid-shaped composites. `None` navigates linearly.
    pub columns: Option<usize>,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Block,
            wrap: false,
            memory: true,
            disabled: false,
            nested: false,
            autofocus_on_open: true,
            close_on_select: false,
            select_mode: SelectMode::None,
            activation: ActivationKeys::default(),
            columns: None,
        }
    }
}

/// What the engine tells the host after one call.
///
/// `consumed` is the propagation verdict for the triggering event: when set,
/// the host must stop propagation (and prevent the platform default where
/// one exists) and must not offer the event to an enclosing composite. For
/// programmatic calls it reports whether the call changed anything. The
/// effects are applied in order regardless of the verdict; see
/// [`effects::run`](crate::effects::run).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response<K> {
    /// Whether the triggering event was claimed by this composite.
    pub consumed: bool,
    /// Platform writes for the host to apply, in order.
    pub effects: Effects<K>,
}

impl<K> Response<K> {
    /// A response that neither claims the event nor asks for any write.
    pub fn unhandled() -> Self {
        Self {
            consumed: false,
            effects: Effects::new(),
        }
    }
}
