#![cfg(feature = "pointing")]

pub mod common;

use dilemma_keymap::action::Action;
use dilemma_keymap::event::MouseMotion;
use dilemma_keymap::keycode::{FirmwareKey, KeyCode, PointerKey};
use dilemma_keymap::keymaps::arulson::{self, Layer};
use dilemma_keymap::pointer::PointerConfig;

use crate::common::TestKeyboard;

const PT_P: usize = 20;

#[test]
fn test_pointer_layer_keys() {
    let mut keyboard = TestKeyboard::new();
    keyboard.hold(PT_P);
    assert_eq!(keyboard.keymap.get_activated_layer(), Layer::Pointer as u8);
    assert_eq!(keyboard.tap(0), Action::Key(KeyCode::Firmware(FirmwareKey::Bootloader)));
    assert_eq!(keyboard.tap(8), Action::Key(KeyCode::Firmware(FirmwareKey::ClearStorage)));

    assert_eq!(keyboard.tap(3), Action::Key(KeyCode::Pointer(PointerKey::DpiForward)));
    assert_eq!(keyboard.pointer().default_dpi(), 600);
    assert_eq!(keyboard.tap(5), Action::Key(KeyCode::Pointer(PointerKey::SnipingDpiForward)));
    assert_eq!(keyboard.pointer().sniping_dpi(), 300);
}

#[test]
fn test_shift_reverses_dpi() {
    let mut keyboard = TestKeyboard::new();
    keyboard.hold(PT_P);
    // Right hand shift on the pointer layer
    keyboard.hold(16);
    keyboard.tap(3);
    assert_eq!(keyboard.pointer().default_dpi(), 400 + 15 * 200);
}

#[test]
fn test_momentary_modes() {
    let mut keyboard = TestKeyboard::new();
    keyboard.hold(PT_P);
    keyboard.hold(22);
    assert!(keyboard.pointer().is_sniping());
    assert_eq!(keyboard.pointer().current_dpi(), 200);
    keyboard.release_hold(22);
    assert!(!keyboard.pointer().is_sniping());

    keyboard.hold(21);
    assert!(keyboard.pointer().is_drag_scroll());
    let motion = keyboard.keymap.hook_mut().apply_drag_scroll(MouseMotion::motion(0, -7));
    assert_eq!(motion, MouseMotion { x: 0, y: 0, h: 0, v: 1 });
    keyboard.release_hold(21);
    assert!(!keyboard.pointer().is_drag_scroll());
}

#[test]
fn test_auto_sniping_follows_pointer_layer() {
    let config = PointerConfig {
        auto_sniping_layer: Some(Layer::Pointer as u8),
        ..arulson::pointer_config()
    };
    let mut keyboard = TestKeyboard::with_pointer_config(config);
    keyboard.hold(PT_P);
    assert!(keyboard.pointer().is_sniping());
    // Another layer on top keeps the pointer layer active
    keyboard.keymap.activate_layer(Layer::Numeral as u8);
    assert!(keyboard.pointer().is_sniping());
    keyboard.keymap.deactivate_layer(Layer::Numeral as u8);
    keyboard.release_hold(PT_P);
    assert!(!keyboard.pointer().is_sniping());
}

#[test]
fn test_auto_sniping_on_base_layer() {
    let config = PointerConfig {
        auto_sniping_layer: Some(Layer::Base as u8),
        ..arulson::pointer_config()
    };
    let mut keyboard = TestKeyboard::with_pointer_config(config);
    assert!(keyboard.pointer().is_sniping());
    keyboard.keymap.activate_layer(Layer::Function as u8);
    assert!(!keyboard.pointer().is_sniping());
    keyboard.keymap.deactivate_layer(Layer::Function as u8);
    assert_eq!(keyboard.keymap.get_activated_layer(), Layer::Base as u8);
    assert!(keyboard.pointer().is_sniping());
}
