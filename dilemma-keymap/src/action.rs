//! Keyboard actions.
//!
//! Key types:
//! - [`Action`] - Single operations that the keyboard sends or executes
//! - [`KeyAction`] - What a key position does, stored in the keymap
//! - [`EncoderAction`] - Rotary encoder actions, stored in the encoder map
//!
//! `Display` writes the same text the `keyboard.toml` key grammar reads.

use core::fmt;

use crate::keycode::{HidKeyCode, KeyCode};
use crate::modifier::ModifierCombination;

/// EncoderAction is the action at a encoder position, stored in encoder_map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderAction {
    clockwise: KeyAction,
    counter_clockwise: KeyAction,
}

impl Default for EncoderAction {
    fn default() -> Self {
        Self {
            clockwise: KeyAction::No,
            counter_clockwise: KeyAction::No,
        }
    }
}

impl EncoderAction {
    /// Create a new encoder action.
    pub const fn new(clockwise: KeyAction, counter_clockwise: KeyAction) -> Self {
        Self {
            clockwise,
            counter_clockwise,
        }
    }

    /// Both directions transparent, the next active layer is checked.
    pub const fn transparent() -> Self {
        Self::new(KeyAction::Transparent, KeyAction::Transparent)
    }

    /// Get the clockwise action.
    pub fn clockwise(&self) -> KeyAction {
        self.clockwise
    }

    /// Get the counter clockwise action.
    pub fn counter_clockwise(&self) -> KeyAction {
        self.counter_clockwise
    }
}

/// A KeyAction is the action at a keyboard position, stored in keymap.
/// It can be a single action like triggering a key, or a tap/hold pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// No action.
    No,
    /// Transparent action, next layer will be checked.
    Transparent,
    /// A single action, such as triggering a key, or activating a layer. Action is triggered when pressed and cancelled when released.
    Single(Action),
    /// Tap action first, hold action second. The tapping term is decided by the firmware.
    TapHold(Action, Action),
}

impl KeyAction {
    /// Convert `KeyAction` to the internal `Action`.
    /// Only valid for `Single` variant, returns `Action::No` for other variants.
    pub fn to_action(self) -> Action {
        match self {
            KeyAction::Single(a) => a,
            _ => Action::No,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, KeyAction::No)
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, KeyAction::Transparent)
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAction::No => f.write_str("No"),
            KeyAction::Transparent => f.write_str("_"),
            KeyAction::Single(a) => write!(f, "{}", a),
            KeyAction::TapHold(Action::Key(k), Action::LayerOn(layer)) => write!(f, "LT({}, {})", layer, k),
            KeyAction::TapHold(Action::Key(k), Action::Modifier(m)) => write!(f, "MT({}, {})", k, m),
            KeyAction::TapHold(tap, hold) => write!(f, "TH({}, {})", tap, hold),
        }
    }
}

/// A single basic action that a keyboard can execute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Default action, no action.
    No,
    /// A normal key stroke, uses for all keycodes defined in `KeyCode` enum, including mouse key, consumer/system control, etc.
    Key(KeyCode),
    /// Modifier Combination, used as the hold side of mod-tap keys.
    Modifier(ModifierCombination),
    /// Key stroke with modifier combination triggered.
    KeyWithModifier(KeyCode, ModifierCombination),
    /// Activate a layer while held
    LayerOn(u8),
    /// Toggle a layer
    LayerToggle(u8),
    /// Activate a layer and deactivate all other layers(except default layer)
    LayerToggleOnly(u8),
    /// Set default layer
    DefaultLayer(u8),
}

impl Action {
    /// The keycode carried by this action, if any
    pub fn keycode(self) -> Option<KeyCode> {
        match self {
            Action::Key(k) | Action::KeyWithModifier(k, _) => Some(k),
            _ => None,
        }
    }

    /// The layer number carried by this action, if any
    pub fn layer(self) -> Option<u8> {
        match self {
            Action::LayerOn(l) | Action::LayerToggle(l) | Action::LayerToggleOnly(l) | Action::DefaultLayer(l) => {
                Some(l)
            }
            _ => None,
        }
    }
}

impl From<HidKeyCode> for Action {
    fn from(value: HidKeyCode) -> Self {
        Action::Key(KeyCode::Hid(value))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::No => f.write_str("No"),
            Action::Key(k) => write!(f, "{}", k),
            Action::Modifier(m) => write!(f, "MOD({})", m),
            Action::KeyWithModifier(k, m) if *m == ModifierCombination::LSHIFT => write!(f, "SHIFTED({})", k),
            Action::KeyWithModifier(k, m) => write!(f, "WM({}, {})", k, m),
            Action::LayerOn(l) => write!(f, "MO({})", l),
            Action::LayerToggle(l) => write!(f, "TG({})", l),
            Action::LayerToggleOnly(l) => write!(f, "TO({})", l),
            Action::DefaultLayer(l) => write!(f, "DF({})", l),
        }
    }
}
