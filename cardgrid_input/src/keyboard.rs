// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Held-key panning and sequential focus traversal.

use alloc::vec::Vec;

use kurbo::Vec2;

use crate::modifiers::Modifiers;

/// Keys the keyboard adapter distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Tab; Shift+Tab moves focus backwards.
    Tab,
    /// Enter/Return.
    Enter,
    /// A printable character, as produced with current modifiers.
    Character(char),
}

/// Kind of element that had focus when a key event was produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyTarget {
    /// The grid surface or any non-editable element.
    #[default]
    Surface,
    /// A single-line text input.
    TextInput,
    /// A multi-line text area.
    TextArea,
    /// A selection list.
    Select,
}

impl KeyTarget {
    /// Returns `true` for controls that consume typed characters themselves.
    #[must_use]
    pub fn is_text_entry(self) -> bool {
        matches!(self, Self::TextInput | Self::TextArea | Self::Select)
    }
}

/// One key press or release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Modifiers held during the event.
    pub modifiers: Modifiers,
    /// Element that had focus.
    pub target: KeyTarget,
}

impl KeyEvent {
    /// Creates an event on the grid surface without modifiers.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            target: KeyTarget::Surface,
        }
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replaces the target.
    #[must_use]
    pub fn with_target(mut self, target: KeyTarget) -> Self {
        self.target = target;
        self
    }
}

bitflags::bitflags! {
    /// Navigation keys currently held down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct HeldKeys: u16 {
        /// Left arrow.
        const ARROW_LEFT  = 1 << 0;
        /// Right arrow.
        const ARROW_RIGHT = 1 << 1;
        /// Up arrow.
        const ARROW_UP    = 1 << 2;
        /// Down arrow.
        const ARROW_DOWN  = 1 << 3;
        /// `W`, either case.
        const W           = 1 << 4;
        /// `A`, either case.
        const A           = 1 << 5;
        /// `S`, either case.
        const S           = 1 << 6;
        /// `D`, either case.
        const D           = 1 << 7;
        /// Page Up.
        const PAGE_UP     = 1 << 8;
        /// Page Down.
        const PAGE_DOWN   = 1 << 9;
        /// Home.
        const HOME        = 1 << 10;
        /// End.
        const END         = 1 << 11;
    }
}

impl HeldKeys {
    /// Flag for a key, or empty for keys that do not pan.
    #[must_use]
    pub fn for_key(key: Key) -> Self {
        match key {
            Key::ArrowLeft => Self::ARROW_LEFT,
            Key::ArrowRight => Self::ARROW_RIGHT,
            Key::ArrowUp => Self::ARROW_UP,
            Key::ArrowDown => Self::ARROW_DOWN,
            Key::PageUp => Self::PAGE_UP,
            Key::PageDown => Self::PAGE_DOWN,
            Key::Home => Self::HOME,
            Key::End => Self::END,
            Key::Character(c) => match c.to_ascii_lowercase() {
                'w' => Self::W,
                'a' => Self::A,
                's' => Self::S,
                'd' => Self::D,
                _ => Self::empty(),
            },
            Key::Tab | Key::Enter => Self::empty(),
        }
    }
}

/// Panning speed for held keys.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyboardConfig {
    /// Pixels per frame for arrows and WASD.
    pub step: f64,
    /// Multiplier on `step` for Page Up/Down and Home/End.
    pub page_multiplier: f64,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            step: 10.0,
            page_multiplier: 3.0,
        }
    }
}

/// Output of [`KeyboardAdapter::key_down`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction<K> {
    /// Keyboard focus moved to this entity.
    Focus(K),
    /// The focused entity was activated.
    Activate(K),
}

/// Picks the next id in a Tab cycle.
///
/// Without a current focus, or when the current focus is not in `ids`, the
/// cycle restarts at the first id (or the last, when `reverse`). Otherwise it
/// steps one position and wraps at both ends. Returns `None` for an empty list.
#[must_use]
pub fn focus_cycle<'a, K: PartialEq>(ids: &'a [K], current: Option<&K>, reverse: bool) -> Option<&'a K> {
    let restart = || if reverse { ids.last() } else { ids.first() };
    let Some(current) = current else {
        return restart();
    };
    let Some(index) = ids.iter().position(|id| id == current) else {
        return restart();
    };
    let len = ids.len();
    let next = if reverse {
        (index + len - 1) % len
    } else {
        (index + 1) % len
    };
    ids.get(next)
}

/// Held-key panning plus Tab/Enter focus traversal over a list of ids.
///
/// Key presses targeted at text-entry controls are ignored so typing in a
/// form never scrolls the grid; releases are always processed so no key stays
/// stuck. [`KeyboardAdapter::poll`] is called once per frame and returns the
/// summed contribution of every held key.
#[derive(Clone, Debug)]
pub struct KeyboardAdapter<K> {
    config: KeyboardConfig,
    held: HeldKeys,
    ids: Vec<K>,
    focused: Option<K>,
    enabled: bool,
}

impl<K> Default for KeyboardAdapter<K> {
    fn default() -> Self {
        Self::new(KeyboardConfig::default())
    }
}

impl<K> KeyboardAdapter<K> {
    /// Creates an enabled adapter with no ids.
    #[must_use]
    pub fn new(config: KeyboardConfig) -> Self {
        Self {
            config,
            held: HeldKeys::empty(),
            ids: Vec::new(),
            focused: None,
            enabled: true,
        }
    }

    /// Navigation keys currently held.
    #[must_use]
    pub fn held(&self) -> HeldKeys {
        self.held
    }

    /// Currently focused id.
    #[must_use]
    pub fn focused(&self) -> Option<&K> {
        self.focused.as_ref()
    }

    /// Ids in traversal order.
    #[must_use]
    pub fn ids(&self) -> &[K] {
        &self.ids
    }

    /// Returns `true` while events are processed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resumes processing events.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops processing key presses and releases every held key.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.held = HeldKeys::empty();
    }

    /// Replaces the traversal order. The current focus is kept even if its id
    /// is no longer listed; the next Tab then restarts the cycle.
    pub fn set_ids<I: IntoIterator<Item = K>>(&mut self, ids: I) {
        self.ids.clear();
        self.ids.extend(ids);
    }

    /// Sets focus directly.
    pub fn focus(&mut self, id: Option<K>) {
        self.focused = id;
    }

    /// Releases every held key, for example when the window loses focus.
    pub fn blur(&mut self) {
        self.held = HeldKeys::empty();
    }

    /// Processes a key release.
    pub fn key_up(&mut self, event: KeyEvent) {
        self.held.remove(HeldKeys::for_key(event.key));
    }

    /// Pan delta for this frame, or `None` when nothing is held.
    #[must_use]
    pub fn poll(&self) -> Option<Vec2> {
        if !self.enabled {
            return None;
        }
        let step = self.config.step;
        let page = step * self.config.page_multiplier;
        let mut delta = Vec2::ZERO;
        for (flag, contribution) in [
            (HeldKeys::ARROW_LEFT, Vec2::new(-step, 0.0)),
            (HeldKeys::ARROW_RIGHT, Vec2::new(step, 0.0)),
            (HeldKeys::ARROW_UP, Vec2::new(0.0, -step)),
            (HeldKeys::ARROW_DOWN, Vec2::new(0.0, step)),
            (HeldKeys::A, Vec2::new(-step, 0.0)),
            (HeldKeys::D, Vec2::new(step, 0.0)),
            (HeldKeys::W, Vec2::new(0.0, -step)),
            (HeldKeys::S, Vec2::new(0.0, step)),
            (HeldKeys::PAGE_UP, Vec2::new(0.0, -page)),
            (HeldKeys::PAGE_DOWN, Vec2::new(0.0, page)),
            (HeldKeys::HOME, Vec2::new(-page, 0.0)),
            (HeldKeys::END, Vec2::new(page, 0.0)),
        ] {
            if self.held.contains(flag) {
                delta += contribution;
            }
        }
        (delta != Vec2::ZERO).then_some(delta)
    }
}

impl<K: Clone + PartialEq> KeyboardAdapter<K> {
    /// Processes a key press.
    ///
    /// Tab and Shift+Tab move focus; Enter activates the focused id.
    pub fn key_down(&mut self, event: KeyEvent) -> Option<KeyAction<K>> {
        if !self.enabled || event.target.is_text_entry() {
            return None;
        }
        self.held.insert(HeldKeys::for_key(event.key));
        match event.key {
            Key::Tab => {
                let reverse = event.modifiers.contains(Modifiers::SHIFT);
                let next = focus_cycle(&self.ids, self.focused.as_ref(), reverse)?.clone();
                self.focused = Some(next.clone());
                Some(KeyAction::Focus(next))
            }
            Key::Enter => self.focused.clone().map(KeyAction::Activate),
            _ => None,
        }
    }
}
