//! Key overrides: a key pressed together with some modifiers sends a different action.
//!
//! The decision is made when the key is pressed and kept until it is released,
//! so releasing the modifiers first doesn't leave the replacement stuck.

use heapless::Vec;

use crate::action::{Action, KeyAction};
use crate::event::KeyEvent;
use crate::keycode::KeyCode;
use crate::layer::LayerState;
use crate::modifier::HidModifiers;

/// Max number of key overrides
pub const KEY_OVERRIDE_MAX_NUM: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyOverride {
    pub(crate) trigger: KeyCode,
    pub(crate) trigger_mods: HidModifiers,
    /// None of these may be held
    pub(crate) negative_mods: HidModifiers,
    /// Removed from the report while the replacement is active
    pub(crate) suppressed_mods: HidModifiers,
    pub(crate) replacement: KeyAction,
    pub(crate) layers: LayerState,
    /// Any one of the trigger modifiers is enough
    pub(crate) one_mod: bool,
    pub(crate) enabled: bool,
}

impl KeyOverride {
    /// Replace `trigger` with `replacement` while `trigger_mods` are held, on every layer.
    /// The trigger modifiers are suppressed.
    pub const fn basic(trigger_mods: HidModifiers, trigger: KeyCode, replacement: KeyAction) -> Self {
        Self {
            trigger,
            trigger_mods,
            negative_mods: HidModifiers::new(),
            suppressed_mods: trigger_mods,
            replacement,
            layers: LayerState::all(32),
            one_mod: false,
            enabled: true,
        }
    }

    pub const fn with_negative_mods(mut self, negative_mods: HidModifiers) -> Self {
        self.negative_mods = negative_mods;
        self
    }

    pub const fn with_suppressed_mods(mut self, suppressed_mods: HidModifiers) -> Self {
        self.suppressed_mods = suppressed_mods;
        self
    }

    pub const fn with_layers(mut self, layers: LayerState) -> Self {
        self.layers = layers;
        self
    }

    pub const fn with_one_mod(mut self, one_mod: bool) -> Self {
        self.one_mod = one_mod;
        self
    }

    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn trigger(&self) -> KeyCode {
        self.trigger
    }

    pub fn trigger_mods(&self) -> HidModifiers {
        self.trigger_mods
    }

    pub fn negative_mods(&self) -> HidModifiers {
        self.negative_mods
    }

    pub fn suppressed_mods(&self) -> HidModifiers {
        self.suppressed_mods
    }

    pub fn replacement(&self) -> KeyAction {
        self.replacement
    }

    pub fn layers(&self) -> LayerState {
        self.layers
    }

    pub fn one_mod(&self) -> bool {
        self.one_mod
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the held modifiers satisfy the trigger modifiers.
    ///
    /// Each modifier kind (ctrl, shift, alt, gui) named in the trigger needs one of its named sides held.
    fn trigger_mods_held(&self, mods: HidModifiers) -> bool {
        if self.trigger_mods.is_empty() {
            return true;
        }
        if self.one_mod {
            return mods.intersects(self.trigger_mods);
        }
        self.trigger_mods
            .kinds()
            .into_iter()
            .all(|kind| kind.is_empty() || mods.intersects(kind))
    }

    /// Whether pressing `action` on `layer` with `mods` held triggers this override
    pub fn matches(&self, action: KeyAction, mods: HidModifiers, layer: u8) -> bool {
        self.enabled
            && action == KeyAction::Single(Action::Key(self.trigger))
            && self.layers.is_on(layer)
            && !mods.intersects(self.negative_mods)
            && self.trigger_mods_held(mods)
    }
}

/// An override decided at press time, kept until the key is released
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveOverride {
    pub row: u8,
    pub col: u8,
    pub replacement: KeyAction,
    pub suppressed_mods: HidModifiers,
}

/// Applies key overrides to resolved key actions
pub struct KeyOverrideProcessor {
    overrides: Vec<KeyOverride, KEY_OVERRIDE_MAX_NUM>,
    active: Vec<ActiveOverride, KEY_OVERRIDE_MAX_NUM>,
}

impl KeyOverrideProcessor {
    /// Overrides beyond [`KEY_OVERRIDE_MAX_NUM`] are dropped
    pub fn new(overrides: &[KeyOverride]) -> Self {
        if overrides.len() > KEY_OVERRIDE_MAX_NUM {
            warn!(
                "{} key overrides configured, only the first {} are used",
                overrides.len(),
                KEY_OVERRIDE_MAX_NUM
            );
        }
        let mut list = Vec::new();
        for o in overrides.iter().take(KEY_OVERRIDE_MAX_NUM) {
            // Capacity is checked by `take`
            let _ = list.push(*o);
        }
        Self {
            overrides: list,
            active: Vec::new(),
        }
    }

    pub fn overrides(&self) -> &[KeyOverride] {
        &self.overrides
    }

    pub fn active(&self) -> &[ActiveOverride] {
        &self.active
    }

    /// Replace the action of a key event if an override applies.
    ///
    /// `action` is what the keymap resolved for the event, `mods` the modifiers currently held
    /// and `layer` the highest active layer.
    pub fn process(&mut self, event: KeyEvent, action: KeyAction, mods: HidModifiers, layer: u8) -> KeyAction {
        let idx = self
            .active
            .iter()
            .position(|a| a.row == event.row && a.col == event.col);

        if !event.pressed {
            // Release the same action that was pressed
            return match idx {
                Some(i) => {
                    let released = self.active.swap_remove(i);
                    debug!("Key override released at ({}, {})", event.row, event.col);
                    released.replacement
                }
                None => action,
            };
        }

        if let Some(i) = idx {
            // A press without a release in between, drop the stale record
            self.active.swap_remove(i);
        }

        let Some(o) = self.overrides.iter().find(|o| o.matches(action, mods, layer)) else {
            return action;
        };

        let record = ActiveOverride {
            row: event.row,
            col: event.col,
            replacement: o.replacement,
            suppressed_mods: o.suppressed_mods,
        };
        if self.active.push(record).is_err() {
            warn!("Too many active key overrides, ignoring ({}, {})", event.row, event.col);
            return action;
        }
        debug!("Key override triggered at ({}, {})", event.row, event.col);
        o.replacement
    }

    /// Modifiers the firmware should remove from the report
    pub fn suppressed_mods(&self) -> HidModifiers {
        self.active
            .iter()
            .fold(HidModifiers::new(), |acc, a| acc | a.suppressed_mods)
    }

    /// Held modifiers with the suppressed ones removed
    pub fn effective_mods(&self, mods: HidModifiers) -> HidModifiers {
        mods & !self.suppressed_mods()
    }
}
