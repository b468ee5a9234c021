#![allow(dead_code)]

use dilemma_keymap::action::{Action, KeyAction};
use dilemma_keymap::event::KeyEvent;
use dilemma_keymap::key_override::KeyOverrideProcessor;
use dilemma_keymap::keycode::KeyCode;
use dilemma_keymap::keymap::KeyMap;
use dilemma_keymap::keymaps::arulson::{self, NUM_LAYER};
use dilemma_keymap::layout::{COL, MATRIX_MAP, NUM_ENCODER, ROW};
use dilemma_keymap::modifier::HidModifiers;
use dilemma_keymap::pointer::{PointerConfig, PointerState};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Matrix position of physical key `idx`
pub fn pos(idx: usize) -> (u8, u8) {
    MATRIX_MAP[idx]
}

/// A tiny stand-in for the firmware: resolves keys through the keymap and the
/// key overrides, applies hold actions and pointer keys.
///
/// Tap-hold keys are resolved as taps by `tap` and as holds by `hold`.
pub struct TestKeyboard {
    pub keymap: KeyMap<'static, PointerState, ROW, COL, NUM_LAYER, NUM_ENCODER>,
    pub overrides: KeyOverrideProcessor,
    pub held_mods: HidModifiers,
}

impl TestKeyboard {
    pub fn new() -> Self {
        Self::with_pointer_config(arulson::pointer_config())
    }

    pub fn with_pointer_config(config: PointerConfig) -> Self {
        Self {
            keymap: arulson::keymap(PointerState::new(config)),
            overrides: KeyOverrideProcessor::new(&arulson::KEY_OVERRIDES),
            held_mods: HidModifiers::new(),
        }
    }

    pub fn pointer(&self) -> &PointerState {
        self.keymap.hook()
    }

    /// Modifiers in the report, after suppression by active overrides
    pub fn report_mods(&self) -> HidModifiers {
        self.overrides.effective_mods(self.held_mods)
    }

    fn resolve(&mut self, idx: usize, pressed: bool) -> KeyAction {
        let (row, col) = pos(idx);
        let event = KeyEvent::key(row, col, pressed);
        let action = self.keymap.get_action_with_layer_cache(event);
        let layer = self.keymap.get_activated_layer();
        self.overrides.process(event, action, self.held_mods, layer)
    }

    fn apply(&mut self, action: Action, pressed: bool) {
        match action {
            Action::Key(KeyCode::Hid(k)) if k.is_modifier() => {
                if pressed {
                    self.held_mods |= k.to_hid_modifiers();
                } else {
                    self.held_mods &= !k.to_hid_modifiers();
                }
            }
            Action::Key(KeyCode::Pointer(p)) => {
                let mods = self.held_mods;
                self.keymap.hook_mut().process_key(p, pressed, mods);
            }
            Action::Modifier(m) => {
                if pressed {
                    self.held_mods |= m.to_hid_modifiers();
                } else {
                    self.held_mods &= !m.to_hid_modifiers();
                }
            }
            Action::LayerOn(layer) => {
                if pressed {
                    self.keymap.activate_layer(layer);
                } else {
                    self.keymap.deactivate_layer(layer);
                }
            }
            Action::LayerToggle(layer) if pressed => self.keymap.toggle_layer(layer),
            Action::LayerToggleOnly(layer) if pressed => self.keymap.toggle_only_layer(layer),
            Action::DefaultLayer(layer) if pressed => self.keymap.set_default_layer(layer),
            _ => (),
        }
    }

    /// Press physical key `idx`, taking the hold side of tap-hold keys
    pub fn hold(&mut self, idx: usize) -> KeyAction {
        let action = self.resolve(idx, true);
        match action {
            KeyAction::Single(a) | KeyAction::TapHold(_, a) => self.apply(a, true),
            _ => (),
        }
        action
    }

    /// Release physical key `idx` previously pressed with `hold`
    pub fn release_hold(&mut self, idx: usize) -> KeyAction {
        let action = self.resolve(idx, false);
        match action {
            KeyAction::Single(a) | KeyAction::TapHold(_, a) => self.apply(a, false),
            _ => (),
        }
        action
    }

    /// Press and release physical key `idx`, returns the tapped action
    pub fn tap(&mut self, idx: usize) -> Action {
        let pressed = self.resolve(idx, true);
        let action = match pressed {
            KeyAction::Single(a) | KeyAction::TapHold(a, _) => a,
            _ => Action::No,
        };
        self.apply(action, true);
        let released = self.resolve(idx, false);
        assert_eq!(pressed, released, "key {} released a different action", idx);
        self.apply(action, false);
        action
    }
}
