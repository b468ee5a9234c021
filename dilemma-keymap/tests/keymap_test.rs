pub mod common;

use dilemma_keymap::action::{Action, KeyAction};
use dilemma_keymap::event::KeyEvent;
use dilemma_keymap::keycode::{FirmwareKey, HidKeyCode, KeyCode, LightKey};
use dilemma_keymap::keymaps::arulson::{KEYMAP, Layer};
use dilemma_keymap::modifier::ModifierCombination;

use crate::common::{TestKeyboard, pos};

fn key(k: HidKeyCode) -> Action {
    Action::Key(KeyCode::Hid(k))
}

#[test]
fn test_base_layer_taps() {
    let mut keyboard = TestKeyboard::new();
    assert_eq!(keyboard.tap(0), key(HidKeyCode::Q));
    assert_eq!(keyboard.tap(5), key(HidKeyCode::Semicolon));
    assert_eq!(keyboard.tap(9), key(HidKeyCode::Z));
    // Home row mods tap their letter
    assert_eq!(keyboard.tap(10), key(HidKeyCode::N));
    assert_eq!(keyboard.tap(19), key(HidKeyCode::H));
    assert_eq!(keyboard.tap(20), key(HidKeyCode::P));
    assert_eq!(keyboard.tap(30), key(HidKeyCode::F));
    assert_eq!(keyboard.tap(33), Action::Key(KeyCode::Firmware(FirmwareKey::CapsWordToggle)));
    assert_eq!(keyboard.tap(35), key(HidKeyCode::Enter));
    assert_eq!(keyboard.keymap.get_activated_layer(), Layer::Base as u8);
}

#[test]
fn test_home_row_mods() {
    let mut keyboard = TestKeyboard::new();
    let (row, col) = pos(12);
    assert_eq!(
        KEYMAP[Layer::Base as usize][row as usize][col as usize],
        KeyAction::TapHold(key(HidKeyCode::S), Action::Modifier(ModifierCombination::LSHIFT))
    );
    keyboard.hold(12);
    keyboard.hold(16);
    assert!(keyboard.held_mods.left_shift());
    assert!(keyboard.held_mods.left_ctrl());
    keyboard.release_hold(12);
    keyboard.release_hold(16);
    assert!(keyboard.held_mods.is_empty());
}

#[test]
fn test_numeral_layer() {
    let mut keyboard = TestKeyboard::new();
    keyboard.hold(31);
    assert_eq!(keyboard.keymap.get_activated_layer(), Layer::Numeral as u8);
    assert_eq!(
        keyboard.tap(5),
        Action::KeyWithModifier(KeyCode::Hid(HidKeyCode::Equal), ModifierCombination::LSHIFT)
    );
    assert_eq!(keyboard.tap(6), key(HidKeyCode::Kc7));
    assert_eq!(keyboard.tap(19), key(HidKeyCode::Kc0));
    assert_eq!(keyboard.tap(11), key(HidKeyCode::LAlt));
    assert_eq!(keyboard.tap(34), key(HidKeyCode::Space));
    // Left half letters are transparent
    assert_eq!(keyboard.tap(0), key(HidKeyCode::Q));
    keyboard.release_hold(31);
    assert_eq!(keyboard.keymap.get_activated_layer(), Layer::Base as u8);
    assert_eq!(keyboard.tap(6), key(HidKeyCode::Comma));
}

#[test]
fn test_media_layer_is_mirrored() {
    let mut keyboard = TestKeyboard::new();
    keyboard.hold(32);
    assert_eq!(keyboard.tap(1), Action::Key(KeyCode::Light(LightKey::ModeReverse)));
    assert_eq!(keyboard.tap(6), Action::Key(KeyCode::Light(LightKey::ModeReverse)));
    for i in 0..5 {
        assert_eq!(keyboard.tap(10 + i), keyboard.tap(15 + i));
    }
    assert_eq!(keyboard.tap(20), Action::No);
    assert_eq!(keyboard.tap(33), key(HidKeyCode::MediaStop));
    assert_eq!(keyboard.tap(35), key(HidKeyCode::AudioMute));
}

#[test]
fn test_symbols_layer() {
    let mut keyboard = TestKeyboard::new();
    keyboard.hold(35);
    assert_eq!(keyboard.tap(10), key(HidKeyCode::LeftBracket));
    assert_eq!(
        keyboard.tap(22),
        Action::KeyWithModifier(KeyCode::Hid(HidKeyCode::Kc9), ModifierCombination::LSHIFT)
    );
    assert_eq!(
        keyboard.tap(31),
        Action::KeyWithModifier(KeyCode::Hid(HidKeyCode::Minus), ModifierCombination::LSHIFT)
    );
    assert_eq!(keyboard.tap(32), key(HidKeyCode::Backslash));
    // Right half falls through to base
    assert_eq!(keyboard.tap(15), key(HidKeyCode::Dot));
}

#[test]
fn test_release_after_layer_change() {
    let mut keyboard = TestKeyboard::new();
    keyboard.hold(34);
    let (row, col) = pos(11);
    assert_eq!(
        keyboard.keymap.get_action_with_layer_cache(KeyEvent::key(row, col, true)),
        KeyAction::Single(key(HidKeyCode::Up))
    );
    keyboard.release_hold(34);
    // Layer is gone, the release still matches the press
    assert_eq!(
        keyboard.keymap.get_action_with_layer_cache(KeyEvent::key(row, col, false)),
        KeyAction::Single(key(HidKeyCode::Up))
    );
    assert_eq!(keyboard.tap(11), key(HidKeyCode::R));
}

#[test]
fn test_unpopulated_positions() {
    for layer in KEYMAP.iter() {
        for (row, col) in [(3, 0), (3, 1), (7, 0), (7, 1)] {
            assert_eq!(layer[row][col], KeyAction::No);
        }
    }
    // The base layer has no transparent keys
    assert!(KEYMAP[Layer::Base as usize].iter().flatten().all(|a| !a.is_transparent()));
}
