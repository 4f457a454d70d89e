// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/closed state for disclosing composites.
//!
//! A composite that reveals interactive content on demand (a menu popup, a
//! select listbox, a widget entering its interaction mode) runs a two-state
//! machine: inactive until an activation input opens it, active until a
//! closing input or a focus departure shuts it. The machine decides only
//! *whether* a transition happens and whether the triggering key is claimed;
//! turning transitions into focus and disclosure effects is the engine's
//! job.
//!
//! ## Rules
//!
//! 1. From inactive, the keys named by the composite's [`ActivationKeys`]
//!    open it: `Enter`, `Space`, `F2`, the composite's own-axis arrows
//!    ([`ActivationKeys::AXIS_ARROWS`]), or the axis-orthogonal expand arrow
//!    ([`ActivationKeys::EXPAND_ARROW`]).
//! 2. From active, `Escape` always closes and is claimed; `F2` closes when
//!    configured; the orthogonal collapse arrow closes when `EXPAND_ARROW`
//!    is configured.
//! 3. `Tab` from active closes without claiming the key, so the tab press
//!    still moves focus on.
//! 4. Every other key leaves the state alone.
//!
//! Pointer and programmatic transitions bypass the key rules through
//! [`Disclosure::open`] and [`Disclosure::close`].

use coppice_cursor::Axis;

use crate::types::Key;

bitflags::bitflags! {
    /// Which keys open or toggle a composite's disclosure.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ActivationKeys: u8 {
        /// `Enter` opens from inactive.
        const ENTER = 1 << 0;
        /// `Space` opens from inactive.
        const SPACE = 1 << 1;
        /// `F2` toggles between inactive and active.
        const F2 = 1 << 2;
        /// The composite's own-axis arrows open from inactive: a closed
        /// block-axis popup opens on `ArrowDown`/`ArrowUp`.
        const AXIS_ARROWS = 1 << 3;
        /// The axis-orthogonal forward arrow opens from inactive and the
        /// backward one closes from active, submenu style. Composites
        /// navigating both axes have no orthogonal arrow left over, so this
        /// flag is inert for them.
        const EXPAND_ARROW = 1 << 4;
    }
}

impl Default for ActivationKeys {
    fn default() -> Self {
        Self::ENTER | Self::SPACE | Self::F2
    }
}

/// Result of feeding one key to the machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Disclose {
    /// No transition; the key is not a disclosure trigger in this state.
    Ignored,
    /// The composite just became active.
    Opened,
    /// The composite just became inactive; the key is claimed.
    Closed,
    /// The composite just became inactive without claiming the key, so a
    /// `Tab` proceeds to the next stop.
    Released,
}

/// Two-state disclosure machine for one composite.
#[derive(Copy, Clone, Debug, Default)]
pub struct Disclosure {
    active: bool,
}

impl Disclosure {
    /// A machine starting out inactive.
    pub fn new() -> Self {
        Self { active: false }
    }

    /// Whether the composite is currently open/active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed one key press through the transition rules.
    ///
    /// `keys` is the composite's configured activation set and `axis` its
    /// navigation axis, which orients the arrow-based triggers.
    pub fn on_key(&mut self, key: Key, keys: ActivationKeys, axis: Axis) -> Disclose {
        if self.active {
            let closes = match key {
                Key::Escape => true,
                Key::F2 => keys.contains(ActivationKeys::F2),
                k => {
                    keys.contains(ActivationKeys::EXPAND_ARROW) && Some(k) == collapse_arrow(axis)
                }
            };
            if closes {
                self.active = false;
                return Disclose::Closed;
            }
            if key == Key::Tab {
                self.active = false;
                return Disclose::Released;
            }
            Disclose::Ignored
        } else {
            let opens = match key {
                Key::Enter => keys.contains(ActivationKeys::ENTER),
                Key::Space => keys.contains(ActivationKeys::SPACE),
                Key::F2 => keys.contains(ActivationKeys::F2),
                k => {
                    (keys.contains(ActivationKeys::AXIS_ARROWS) && is_axis_arrow(axis, k))
                        || (keys.contains(ActivationKeys::EXPAND_ARROW)
                            && Some(k) == expand_arrow(axis))
                }
            };
            if opens {
                self.active = true;
                Disclose::Opened
            } else {
                Disclose::Ignored
            }
        }
    }

    /// Open unconditionally. Returns whether a transition happened.
    pub fn open(&mut self) -> bool {
        !core::mem::replace(&mut self.active, true)
    }

    /// Close unconditionally. Returns whether a transition happened.
    pub fn close(&mut self) -> bool {
        core::mem::replace(&mut self.active, false)
    }
}

fn is_axis_arrow(axis: Axis, key: Key) -> bool {
    match axis {
        Axis::Inline => matches!(key, Key::ArrowLeft | Key::ArrowRight),
        Axis::Block => matches!(key, Key::ArrowUp | Key::ArrowDown),
        Axis::Both => matches!(
            key,
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown
        ),
    }
}

/// The arrow that expands a collapsed composite: forward on the axis
/// orthogonal to its own navigation axis.
fn expand_arrow(axis: Axis) -> Option<Key> {
    match axis {
        Axis::Block => Some(Key::ArrowRight),
        Axis::Inline => Some(Key::ArrowDown),
        Axis::Both => None,
    }
}

fn collapse_arrow(axis: Axis) -> Option<Key> {
    match axis {
        Axis::Block => Some(Key::ArrowLeft),
        Axis::Inline => Some(Key::ArrowUp),
        Axis::Both => None,
    }
}
