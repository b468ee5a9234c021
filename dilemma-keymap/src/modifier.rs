use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use bitfield_struct::bitfield;

/// To represent all combinations of modifiers, at least 5 bits are needed.
/// 1 bit for Left/Right, 4 bits for modifier type. Represented in LSB format.
///
/// | bit4 | bit3 | bit2 | bit1 | bit0 |
/// | --- | --- | --- | --- | --- |
/// | L/R | GUI | ALT |SHIFT| CTRL|
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq)]
pub struct ModifierCombination {
    #[bits(1)]
    pub ctrl: bool,
    #[bits(1)]
    pub shift: bool,
    #[bits(1)]
    pub alt: bool,
    #[bits(1)]
    pub gui: bool,
    #[bits(1)]
    pub right: bool,
    #[bits(3)]
    _reserved: u8,
}

impl BitOr for ModifierCombination {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}

impl ModifierCombination {
    pub const LCTRL: Self = Self::new().with_ctrl(true);
    pub const LSHIFT: Self = Self::new().with_shift(true);
    pub const LALT: Self = Self::new().with_alt(true);
    pub const LGUI: Self = Self::new().with_gui(true);
    pub const RCTRL: Self = Self::new().with_right(true).with_ctrl(true);
    pub const RSHIFT: Self = Self::new().with_right(true).with_shift(true);
    pub const RALT: Self = Self::new().with_right(true).with_alt(true);
    pub const RGUI: Self = Self::new().with_right(true).with_gui(true);

    pub const fn new_from(right: bool, gui: bool, alt: bool, shift: bool, ctrl: bool) -> Self {
        ModifierCombination::new()
            .with_right(right)
            .with_gui(gui)
            .with_alt(alt)
            .with_shift(shift)
            .with_ctrl(ctrl)
    }

    pub fn is_empty(self) -> bool {
        !(self.ctrl() || self.shift() || self.alt() || self.gui())
    }

    /// Get modifier hid report bits from modifier combination
    pub fn to_hid_modifiers(self) -> HidModifiers {
        if !self.right() {
            HidModifiers::new()
                .with_left_ctrl(self.ctrl())
                .with_left_shift(self.shift())
                .with_left_alt(self.alt())
                .with_left_gui(self.gui())
        } else {
            HidModifiers::new()
                .with_right_ctrl(self.ctrl())
                .with_right_shift(self.shift())
                .with_right_alt(self.alt())
                .with_right_gui(self.gui())
        }
    }
}

/// Displayed as `LShift | LCtrl`, the form accepted by `keyboard.toml`
impl fmt::Display for ModifierCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.right() { "R" } else { "L" };
        let mut first = true;
        for (on, name) in [
            (self.ctrl(), "Ctrl"),
            (self.shift(), "Shift"),
            (self.alt(), "Alt"),
            (self.gui(), "Gui"),
        ] {
            if on {
                if !first {
                    f.write_str(" | ")?;
                }
                write!(f, "{}{}", side, name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Modifier bits of a HID keyboard report
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq)]
pub struct HidModifiers {
    #[bits(1)]
    pub left_ctrl: bool,
    #[bits(1)]
    pub left_shift: bool,
    #[bits(1)]
    pub left_alt: bool,
    #[bits(1)]
    pub left_gui: bool,
    #[bits(1)]
    pub right_ctrl: bool,
    #[bits(1)]
    pub right_shift: bool,
    #[bits(1)]
    pub right_alt: bool,
    #[bits(1)]
    pub right_gui: bool,
}

impl BitOr for HidModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}
impl BitAnd for HidModifiers {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() & rhs.into_bits())
    }
}
impl Not for HidModifiers {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.into_bits())
    }
}
impl BitAndAssign for HidModifiers {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}
impl BitOrAssign for HidModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl HidModifiers {
    /// Either control key
    pub const MASK_CTRL: Self = Self::new().with_left_ctrl(true).with_right_ctrl(true);
    /// Either shift key
    pub const MASK_SHIFT: Self = Self::new().with_left_shift(true).with_right_shift(true);
    /// Either alt key
    pub const MASK_ALT: Self = Self::new().with_left_alt(true).with_right_alt(true);
    /// Either gui key
    pub const MASK_GUI: Self = Self::new().with_left_gui(true).with_right_gui(true);

    pub const fn new_from(
        left_ctrl: bool,
        left_shift: bool,
        left_alt: bool,
        left_gui: bool,
        right_ctrl: bool,
        right_shift: bool,
        right_alt: bool,
        right_gui: bool,
    ) -> Self {
        Self::new()
            .with_left_ctrl(left_ctrl)
            .with_left_shift(left_shift)
            .with_left_alt(left_alt)
            .with_left_gui(left_gui)
            .with_right_ctrl(right_ctrl)
            .with_right_shift(right_shift)
            .with_right_alt(right_alt)
            .with_right_gui(right_gui)
    }

    pub fn is_empty(self) -> bool {
        self.into_bits() == 0
    }

    /// Returns `true` if any bit of `other` is set in `self`
    pub fn intersects(self, other: Self) -> bool {
        !(self & other).is_empty()
    }

    /// Split into the four per-kind masks (ctrl, shift, alt, gui), each keeping both sides
    pub fn kinds(self) -> [Self; 4] {
        [
            self & Self::MASK_CTRL,
            self & Self::MASK_SHIFT,
            self & Self::MASK_ALT,
            self & Self::MASK_GUI,
        ]
    }
}

/// Displayed as `LShift | RShift`, the form accepted by `keyboard.toml`
impl fmt::Display for HidModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (on, name) in [
            (self.left_ctrl(), "LCtrl"),
            (self.left_shift(), "LShift"),
            (self.left_alt(), "LAlt"),
            (self.left_gui(), "LGui"),
            (self.right_ctrl(), "RCtrl"),
            (self.right_shift(), "RShift"),
            (self.right_alt(), "RAlt"),
            (self.right_gui(), "RGui"),
        ] {
            if on {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_modifier_combination_to_report_bits() {
        assert_eq!(ModifierCombination::LGUI.to_hid_modifiers(), HidModifiers::new().with_left_gui(true));
        assert_eq!(
            (ModifierCombination::RSHIFT | ModifierCombination::RCTRL).to_hid_modifiers(),
            HidModifiers::new().with_right_shift(true).with_right_ctrl(true)
        );
        assert!(ModifierCombination::new().is_empty());
        assert!(!ModifierCombination::LALT.is_empty());
    }

    #[test]
    fn test_modifier_display() {
        assert_eq!(ModifierCombination::LSHIFT.to_string(), "LShift");
        assert_eq!((ModifierCombination::RCTRL | ModifierCombination::RALT).to_string(), "RCtrl | RAlt");
        assert_eq!(HidModifiers::MASK_SHIFT.to_string(), "LShift | RShift");
    }

    #[test]
    fn test_modifier_kinds() {
        let mods = HidModifiers::new().with_right_shift(true).with_left_gui(true);
        let [ctrl, shift, alt, gui] = mods.kinds();
        assert!(ctrl.is_empty());
        assert_eq!(shift, HidModifiers::new().with_right_shift(true));
        assert!(alt.is_empty());
        assert_eq!(gui, HidModifiers::new().with_left_gui(true));
        assert!(mods.intersects(HidModifiers::MASK_SHIFT));
        assert!(!mods.intersects(HidModifiers::MASK_ALT));
    }
}
