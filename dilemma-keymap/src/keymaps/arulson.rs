//! Alternate layout on the base layer with home row mods, and six thumb
//! keys doubling as layer keys. The layers are derived from Miryoku.

use strum::{EnumString, FromRepr, IntoStaticStr};

#[cfg(feature = "encoder_map")]
use crate::action::EncoderAction;
use crate::action::KeyAction;
use crate::key_override::KeyOverride;
use crate::keycode::{HidKeyCode, KeyCode};
use crate::keymap::KeyMap;
use crate::layout::{COL, NUM_ENCODER, ROW};
use crate::layout_split_3x5_3;
use crate::modifier::{HidModifiers, ModifierCombination};
use crate::pointer::{LayerChangeHook, PointerConfig};

pub const NUM_LAYER: usize = 7;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr, EnumString, IntoStaticStr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[strum(serialize_all = "snake_case")]
pub enum Layer {
    Base,
    Function,
    Navigation,
    Media,
    Pointer,
    Numeral,
    Symbols,
}

impl Layer {
    pub const ALL: [Layer; NUM_LAYER] = [
        Layer::Base,
        Layer::Function,
        Layer::Navigation,
        Layer::Media,
        Layer::Pointer,
        Layer::Numeral,
        Layer::Symbols,
    ];

    pub fn name(self) -> &'static str {
        self.into()
    }
}

const _______: KeyAction = a!(Transparent);
const XXXXXXX: KeyAction = a!(No);

const ESC_MED: KeyAction = lt!(Layer::Media as u8, Escape);
const SPC_NAV: KeyAction = lt!(Layer::Navigation as u8, Space);
const F_FUN: KeyAction = lt!(Layer::Function as u8, F);
const ENT_SYM: KeyAction = lt!(Layer::Symbols as u8, Enter);
const BSP_NUM: KeyAction = lt!(Layer::Numeral as u8, Backspace);
const PT_P: KeyAction = lt!(Layer::Pointer as u8, P);
const PT_B: KeyAction = lt!(Layer::Pointer as u8, B);

#[cfg(feature = "pointing")]
mod pointing_keys {
    use crate::action::KeyAction;

    pub(super) const DRGSCRL: KeyAction = ptr!(DragScroll);
    pub(super) const DPI_MOD: KeyAction = ptr!(DpiForward);
    pub(super) const S_D_MOD: KeyAction = ptr!(SnipingDpiForward);
    pub(super) const SNIPING: KeyAction = ptr!(Sniping);
}

// Without a pointing device the pointer keys do nothing
#[cfg(not(feature = "pointing"))]
mod pointing_keys {
    use crate::action::KeyAction;

    pub(super) const DRGSCRL: KeyAction = a!(No);
    pub(super) const DPI_MOD: KeyAction = a!(No);
    pub(super) const S_D_MOD: KeyAction = a!(No);
    pub(super) const SNIPING: KeyAction = a!(No);
}

use pointing_keys::{DPI_MOD, DRGSCRL, S_D_MOD, SNIPING};

#[rustfmt::skip]
pub static KEYMAP: [[[KeyAction; COL]; ROW]; NUM_LAYER] = [
    // Base
    layout_split_3x5_3!(
        k!(Q),                            k!(X),                            k!(G),                              k!(M),                             k!(K),   k!(Semicolon), k!(Comma),                         k!(Quote),                          k!(J),                            k!(Z),
        mt!(N, ModifierCombination::LGUI), mt!(R, ModifierCombination::LALT), mt!(S, ModifierCombination::LSHIFT), mt!(T, ModifierCombination::LCTRL), k!(W),   k!(Dot),       mt!(A, ModifierCombination::LCTRL), mt!(E, ModifierCombination::LSHIFT), mt!(I, ModifierCombination::LALT), mt!(H, ModifierCombination::LGUI),
        PT_P,                             k!(L),                            k!(C),                              k!(D),                             k!(V),   k!(Tab),       k!(U),                             k!(O),                              k!(Y),                            PT_B,
                                                                            F_FUN,                              BSP_NUM,                           ESC_MED, fw!(CapsWordToggle), SPC_NAV,                     ENT_SYM
    ),
    // Function
    layout_split_3x5_3!(
        _______, _______, _______, _______, _______,   k!(AudioMute),      k!(F7),             k!(F8), k!(F9), k!(F12),
        _______, _______, _______, _______, _______,   k!(AudioVolUp),     k!(F4),             k!(F5), k!(F6), k!(F11),
        _______, _______, _______, _______, _______,   k!(AudioVolDown),   k!(F1),             k!(F2), k!(F3), k!(F10),
                          _______, _______, _______,   k!(MediaPrevTrack), k!(MediaNextTrack), _______
    ),
    // Navigation
    layout_split_3x5_3!(
        _______,    _______,      _______,   _______,    k!(Insert),           _______, k!(MouseBtn1), k!(MouseBtn2), k!(MouseBtn3), _______,
        k!(Left),   k!(Up),       k!(Down),  k!(Right),  k!(BrightnessUp),     _______, k!(RCtrl),     k!(RShift),    k!(RAlt),      k!(RGui),
        k!(PageUp), k!(PageDown), k!(Home),  k!(End),    k!(BrightnessDown),   _______, _______,       _______,       _______,       _______,
                                  _______,   k!(Escape), k!(Delete),           _______, _______,       _______
    ),
    // Media, mirrored for either hand
    layout_split_3x5_3!(
        XXXXXXX,            rgb!(ModeReverse), rgb!(Toggle),       rgb!(ModeForward), XXXXXXX,            XXXXXXX,           rgb!(ModeReverse),  rgb!(Toggle),  rgb!(ModeForward), XXXXXXX,
        k!(MediaPrevTrack), k!(AudioVolDown),  k!(AudioMute),      k!(AudioVolUp),    k!(MediaNextTrack), k!(MediaPrevTrack), k!(AudioVolDown),  k!(AudioMute), k!(AudioVolUp),    k!(MediaNextTrack),
        XXXXXXX,            XXXXXXX,           XXXXXXX,            XXXXXXX,           XXXXXXX,            XXXXXXX,            XXXXXXX,           XXXXXXX,       XXXXXXX,           XXXXXXX,
                                               _______,            k!(MediaPlayPause), k!(MediaStop),     k!(MediaStop),      k!(MediaPlayPause), k!(AudioMute)
    ),
    // Pointer
    layout_split_3x5_3!(
        fw!(Bootloader), fw!(ClearStorage), XXXXXXX,       DPI_MOD,       S_D_MOD,       S_D_MOD,       DPI_MOD,       XXXXXXX,       fw!(ClearStorage), fw!(Bootloader),
        k!(LGui),        k!(LAlt),          k!(LCtrl),     k!(LShift),    XXXXXXX,       XXXXXXX,       k!(LShift),    k!(LCtrl),     k!(LAlt),          k!(LGui),
        _______,         DRGSCRL,           SNIPING,       k!(MouseBtn3), XXXXXXX,       XXXXXXX,       k!(MouseBtn3), SNIPING,       DRGSCRL,           _______,
                                            k!(MouseBtn3), k!(MouseBtn2), k!(MouseBtn1), k!(MouseBtn1), k!(MouseBtn2), k!(MouseBtn3)
    ),
    // Numeral
    layout_split_3x5_3!(
        _______,  _______,  _______,   _______,  _______,   shifted!(Equal),    k!(Kc7),   k!(Kc8), k!(Kc9), shifted!(Kc8),
        k!(LGui), k!(LAlt), k!(LShift), k!(LCtrl), _______, k!(Dot),            k!(Kc4),   k!(Kc5), k!(Kc6), k!(Kc0),
        _______,  _______,  _______,   _______,  _______,   k!(Equal),          k!(Kc1),   k!(Kc2), k!(Kc3), k!(Slash),
                            _______,   _______,  _______,   k!(MediaPlayPause), k!(Space), _______
    ),
    // Symbols
    layout_split_3x5_3!(
        _______,            _______,          _______,               _______,                _______,           _______, _______, _______, _______, _______,
        k!(LeftBracket),    k!(RightBracket), shifted!(LeftBracket), shifted!(RightBracket), shifted!(Grave),   _______, _______, _______, _______, _______,
        shifted!(Comma),    shifted!(Dot),    shifted!(Kc9),         shifted!(Kc0),          k!(Grave),         _______, _______, _______, _______, _______,
                                              _______,               shifted!(Minus),        k!(Backslash),     _______, _______, _______
    ),
];

/// Shift + `,` sends `?`, shift + `.` sends `-`
pub static KEY_OVERRIDES: [KeyOverride; 2] = [
    KeyOverride::basic(HidModifiers::MASK_SHIFT, KeyCode::Hid(HidKeyCode::Comma), shifted!(Slash)),
    KeyOverride::basic(HidModifiers::MASK_SHIFT, KeyCode::Hid(HidKeyCode::Dot), k!(Minus)),
];

#[cfg(feature = "encoder_map")]
#[rustfmt::skip]
pub static ENCODER_MAP: [[EncoderAction; NUM_ENCODER]; NUM_LAYER] = [
    [encoder!(k!(MouseWheelUp), k!(MouseWheelDown)), encoder!(k!(AudioVolUp), k!(AudioVolDown))],
    [encoder!(k!(Up), k!(Down)),                     encoder!(k!(Right), k!(Left))],
    [encoder!(k!(PageUp), k!(PageDown)),             encoder!(k!(AudioVolDown), k!(AudioVolUp))],
    [encoder!(k!(PageUp), k!(PageDown)),             encoder!(k!(AudioVolDown), k!(AudioVolUp))],
    [encoder!(rgb!(HueUp), rgb!(HueDown)),           encoder!(rgb!(SatUp), rgb!(SatDown))],
    [encoder!(rgb!(ValUp), rgb!(ValDown)),           encoder!(rgb!(SpeedUp), rgb!(SpeedDown))],
    [encoder!(rgb!(ModeForward), rgb!(ModeReverse)), encoder!(k!(Right), k!(Left))],
];

/// Pointer settings, sniping follows the pointer layer with `auto_sniping`
pub const fn pointer_config() -> PointerConfig {
    let mut config = PointerConfig::new();
    if cfg!(feature = "auto_sniping") {
        config.auto_sniping_layer = Some(Layer::Pointer as u8);
    }
    config
}

/// A keymap over [`KEYMAP`] and, when enabled, [`ENCODER_MAP`]
pub fn keymap<H: LayerChangeHook>(hook: H) -> KeyMap<'static, H, ROW, COL, NUM_LAYER, NUM_ENCODER> {
    #[cfg(feature = "encoder_map")]
    let encoders = Some(&ENCODER_MAP);
    #[cfg(not(feature = "encoder_map"))]
    let encoders = None;
    KeyMap::new(&KEYMAP, encoders, hook)
}

#[cfg(test)]
mod test {
    use core::str::FromStr;

    use super::*;

    #[test]
    fn test_layer_names() {
        assert_eq!(Layer::Navigation.name(), "navigation");
        assert_eq!(Layer::from_str("symbols"), Ok(Layer::Symbols));
        assert_eq!(Layer::from_repr(4), Some(Layer::Pointer));
        for (i, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(*layer as usize, i);
        }
    }

    #[test]
    fn test_layer_taps_target_their_layers() {
        assert_eq!(KEYMAP[Layer::Base as usize][3][2], lt!(Layer::Function as u8, F));
        assert_eq!(KEYMAP[Layer::Base as usize][7][3], lt!(Layer::Navigation as u8, Space));
        assert_eq!(KEYMAP[Layer::Base as usize][6][0], PT_B);
    }

    #[cfg(feature = "pointing")]
    #[test]
    fn test_pointer_keys_mapped() {
        let pointer = &KEYMAP[Layer::Pointer as usize];
        assert_eq!(pointer[0][3], ptr!(DpiForward));
        assert_eq!(pointer[0][4], ptr!(SnipingDpiForward));
        assert_eq!(pointer[2][1], ptr!(DragScroll));
        assert_eq!(pointer[2][2], ptr!(Sniping));
    }

    #[cfg(not(feature = "pointing"))]
    #[test]
    fn test_pointer_keys_without_pointing() {
        let pointer = &KEYMAP[Layer::Pointer as usize];
        // Both halves
        for (row, col) in [(0, 3), (0, 4), (2, 1), (2, 2), (4, 3), (4, 4), (6, 1), (6, 2)] {
            assert_eq!(pointer[row][col], KeyAction::No, "({}, {})", row, col);
        }
        assert_eq!(pointer[2][3], k!(MouseBtn3));
    }
}
