//! Layer bitmask

use core::fmt;

/// Maximum number of layers a [`LayerState`] can hold
pub const MAX_LAYERS: usize = 32;

/// Bit `n` set means layer `n` is active
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerState(u32);

impl LayerState {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn into_bits(self) -> u32 {
        self.0
    }

    /// Only `layer` is set
    pub const fn only(layer: u8) -> Self {
        if (layer as usize) < MAX_LAYERS { Self(1 << layer) } else { Self(0) }
    }

    /// The first `num_layer` layers are set
    pub const fn all(num_layer: usize) -> Self {
        if num_layer >= MAX_LAYERS {
            Self(u32::MAX)
        } else {
            Self((1u32 << num_layer) - 1)
        }
    }

    pub fn is_on(self, layer: u8) -> bool {
        (layer as usize) < MAX_LAYERS && self.0 & (1 << layer) != 0
    }

    /// Whether `layer` is the one in effect: with no layer set, layer 0 is
    pub fn is_active(self, layer: u8) -> bool {
        if self.is_empty() { layer == 0 } else { self.is_on(layer) }
    }

    pub fn on(&mut self, layer: u8) {
        if (layer as usize) < MAX_LAYERS {
            self.0 |= 1 << layer;
        }
    }

    pub fn off(&mut self, layer: u8) {
        if (layer as usize) < MAX_LAYERS {
            self.0 &= !(1 << layer);
        }
    }

    pub fn toggle(&mut self, layer: u8) {
        if (layer as usize) < MAX_LAYERS {
            self.0 ^= 1 << layer;
        }
    }

    /// The highest set layer, 0 if none is set
    pub fn highest(self) -> u8 {
        if self.0 == 0 { 0 } else { (31 - self.0.leading_zeros()) as u8 }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate set layers, lowest first
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..MAX_LAYERS as u8).filter(move |&l| self.is_on(l))
    }
}

impl fmt::Display for LayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#034b}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_layer_state_ops() {
        let mut state = LayerState::new();
        assert_eq!(state.highest(), 0);
        state.on(3);
        state.on(5);
        assert!(state.is_on(3));
        assert_eq!(state.highest(), 5);
        state.toggle(5);
        assert_eq!(state.highest(), 3);
        state.off(3);
        assert!(state.is_empty());

        // Out of range layers are ignored
        state.on(32);
        assert!(state.is_empty());
        assert!(!state.is_on(40));
    }

    #[test]
    fn test_layer_state_constructors() {
        assert_eq!(LayerState::only(4).into_bits(), 0b1_0000);
        assert_eq!(LayerState::only(32), LayerState::new());
        assert_eq!(LayerState::all(7).into_bits(), 0x7F);
        assert_eq!(LayerState::all(32).into_bits(), u32::MAX);
        assert_eq!(LayerState::from_bits(0b1010).iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_layer_active() {
        assert!(LayerState::new().is_active(0));
        assert!(!LayerState::new().is_active(1));
        assert!(!LayerState::only(2).is_active(0));
        assert!(LayerState::only(2).is_active(2));
        assert!(LayerState::from_bits(0b11).is_active(0));
    }
}
