pub mod common;

use dilemma_keymap::action::{Action, KeyAction};
use dilemma_keymap::keycode::{HidKeyCode, KeyCode};
use dilemma_keymap::keymaps::arulson::KEY_OVERRIDES;
use dilemma_keymap::modifier::{HidModifiers, ModifierCombination};

use crate::common::TestKeyboard;

const COMMA: usize = 6;
const DOT: usize = 15;
// Home row shift on either hand
const LEFT_SHIFT: usize = 12;
const RIGHT_SHIFT: usize = 17;

#[test]
fn test_builtin_overrides() {
    assert_eq!(KEY_OVERRIDES[0].trigger(), KeyCode::Hid(HidKeyCode::Comma));
    assert_eq!(KEY_OVERRIDES[0].trigger_mods(), HidModifiers::MASK_SHIFT);
    assert_eq!(KEY_OVERRIDES[1].trigger(), KeyCode::Hid(HidKeyCode::Dot));
    assert_eq!(
        KEY_OVERRIDES[1].replacement(),
        KeyAction::Single(Action::Key(KeyCode::Hid(HidKeyCode::Minus)))
    );
}

#[test]
fn test_shift_comma_sends_question_mark() {
    let mut keyboard = TestKeyboard::new();
    keyboard.hold(LEFT_SHIFT);
    assert_eq!(
        keyboard.tap(COMMA),
        Action::KeyWithModifier(KeyCode::Hid(HidKeyCode::Slash), ModifierCombination::LSHIFT)
    );
    keyboard.release_hold(LEFT_SHIFT);
    assert_eq!(keyboard.tap(COMMA), Action::Key(KeyCode::Hid(HidKeyCode::Comma)));
}

#[test]
fn test_shift_dot_sends_minus_without_shift() {
    let mut keyboard = TestKeyboard::new();
    keyboard.hold(RIGHT_SHIFT);
    assert_eq!(keyboard.hold(DOT), KeyAction::Single(Action::Key(KeyCode::Hid(HidKeyCode::Minus))));
    // Shift is held but not reported while the override is active
    assert!(keyboard.held_mods.left_shift());
    assert!(keyboard.report_mods().is_empty());

    // Releasing shift first still releases the minus
    keyboard.release_hold(RIGHT_SHIFT);
    assert_eq!(
        keyboard.release_hold(DOT),
        KeyAction::Single(Action::Key(KeyCode::Hid(HidKeyCode::Minus)))
    );
    assert!(keyboard.overrides.active().is_empty());
}

#[test]
fn test_other_modifiers_keep_the_key() {
    let mut keyboard = TestKeyboard::new();
    // Home row ctrl
    keyboard.hold(13);
    assert_eq!(keyboard.tap(COMMA), Action::Key(KeyCode::Hid(HidKeyCode::Comma)));
    assert!(keyboard.report_mods().left_ctrl());
}
