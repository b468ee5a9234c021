//! Events the keymap lookups consume

/// A key at matrix position `(row, col)` was pressed or released
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn key(row: u8, col: u8, pressed: bool) -> Self {
        Self { row, col, pressed }
    }
}

/// Direction of Rotary Encoder rotation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// A clockwise turn
    Clockwise,
    /// A counterclockwise turn
    CounterClockwise,
    /// No change
    None,
}

/// One detent of encoder `id`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotaryEncoderEvent {
    pub id: u8,
    pub direction: Direction,
}

/// Relative motion of the pointing device, plus scroll on both axes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseMotion {
    pub x: i16,
    pub y: i16,
    /// Horizontal scroll, right is positive
    pub h: i8,
    /// Vertical scroll, up is positive
    pub v: i8,
}

impl MouseMotion {
    pub const fn motion(x: i16, y: i16) -> Self {
        Self { x, y, h: 0, v: 0 }
    }
}
