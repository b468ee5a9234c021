//! Pointer modes of the trackpad: DPI steps, sniping and drag-scroll.
//!
//! The firmware feeds pointer keys and raw motion through [`PointerState`],
//! and registers it as the keymap's [`LayerChangeHook`] so sniping can follow
//! a layer.

use crate::event::MouseMotion;
use crate::keycode::PointerKey;
use crate::layer::LayerState;
use crate::modifier::HidModifiers;

/// Called by the keymap on every layer state change.
///
/// The returned state replaces the new state, so a hook can force layers on or off.
pub trait LayerChangeHook {
    fn on_layer_change(&mut self, state: LayerState) -> LayerState;
}

/// No hook
impl LayerChangeHook for () {
    fn on_layer_change(&mut self, state: LayerState) -> LayerState {
        state
    }
}

impl<T: LayerChangeHook> LayerChangeHook for &mut T {
    fn on_layer_change(&mut self, state: LayerState) -> LayerState {
        (**self).on_layer_change(state)
    }
}

/// Pointer settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerConfig {
    /// Number of default DPI steps, cycling wraps around
    pub default_dpi_steps: u8,
    /// Number of sniping DPI steps, cycling wraps around
    pub sniping_dpi_steps: u8,
    /// Default DPI at step 0
    pub min_default_dpi: u16,
    pub default_dpi_step_size: u16,
    /// Sniping DPI at step 0
    pub min_sniping_dpi: u16,
    pub sniping_dpi_step_size: u16,
    /// Accumulated motion needed for one scroll step in drag-scroll mode
    pub drag_scroll_buffer_size: i16,
    pub drag_scroll_reverse_x: bool,
    pub drag_scroll_reverse_y: bool,
    /// Enable sniping exactly while this layer is active
    pub auto_sniping_layer: Option<u8>,
}

impl PointerConfig {
    pub const fn new() -> Self {
        Self {
            default_dpi_steps: 16,
            sniping_dpi_steps: 4,
            min_default_dpi: 400,
            default_dpi_step_size: 200,
            min_sniping_dpi: 200,
            sniping_dpi_step_size: 100,
            drag_scroll_buffer_size: 6,
            drag_scroll_reverse_x: false,
            drag_scroll_reverse_y: false,
            auto_sniping_layer: None,
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime pointer mode
#[derive(Clone, Debug)]
pub struct PointerState {
    config: PointerConfig,
    default_step: u8,
    sniping_step: u8,
    sniping: bool,
    drag_scroll: bool,
    scroll_buffer_x: i16,
    scroll_buffer_y: i16,
}

impl PointerState {
    /// The keymap starts with no layer set, so auto-sniping on layer 0 starts enabled
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            default_step: 0,
            sniping_step: 0,
            sniping: config.auto_sniping_layer == Some(0),
            drag_scroll: false,
            scroll_buffer_x: 0,
            scroll_buffer_y: 0,
        }
    }

    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    pub fn default_dpi(&self) -> u16 {
        self.config
            .min_default_dpi
            .saturating_add((self.default_step as u16).saturating_mul(self.config.default_dpi_step_size))
    }

    pub fn sniping_dpi(&self) -> u16 {
        self.config
            .min_sniping_dpi
            .saturating_add((self.sniping_step as u16).saturating_mul(self.config.sniping_dpi_step_size))
    }

    /// The DPI the sensor should run at now
    pub fn current_dpi(&self) -> u16 {
        if self.sniping { self.sniping_dpi() } else { self.default_dpi() }
    }

    pub fn is_sniping(&self) -> bool {
        self.sniping
    }

    pub fn is_drag_scroll(&self) -> bool {
        self.drag_scroll
    }

    pub fn set_sniping(&mut self, enabled: bool) {
        if self.sniping != enabled {
            debug!("Sniping: {}", enabled);
        }
        self.sniping = enabled;
    }

    pub fn set_drag_scroll(&mut self, enabled: bool) {
        if self.drag_scroll != enabled {
            debug!("Drag scroll: {}", enabled);
            self.scroll_buffer_x = 0;
            self.scroll_buffer_y = 0;
        }
        self.drag_scroll = enabled;
    }

    /// Step the default DPI, wrapping at both ends
    pub fn cycle_default_dpi(&mut self, forward: bool) {
        self.default_step = Self::step(self.default_step, self.config.default_dpi_steps, forward);
        info!("Default DPI: {}", self.default_dpi());
    }

    /// Step the sniping DPI, wrapping at both ends
    pub fn cycle_sniping_dpi(&mut self, forward: bool) {
        self.sniping_step = Self::step(self.sniping_step, self.config.sniping_dpi_steps, forward);
        info!("Sniping DPI: {}", self.sniping_dpi());
    }

    fn step(current: u8, steps: u8, forward: bool) -> u8 {
        let steps = steps.max(1);
        if forward {
            (current + 1) % steps
        } else if current == 0 {
            steps - 1
        } else {
            current - 1
        }
    }

    /// Process a pointer key. Holding shift reverses the DPI keys.
    ///
    /// Returns `true` when the current DPI changed and should be pushed to the sensor.
    pub fn process_key(&mut self, key: PointerKey, pressed: bool, mods: HidModifiers) -> bool {
        let dpi = self.current_dpi();
        let shifted = mods.intersects(HidModifiers::MASK_SHIFT);
        match key {
            PointerKey::DpiForward if pressed => self.cycle_default_dpi(!shifted),
            PointerKey::DpiReverse if pressed => self.cycle_default_dpi(shifted),
            PointerKey::SnipingDpiForward if pressed => self.cycle_sniping_dpi(!shifted),
            PointerKey::SnipingDpiReverse if pressed => self.cycle_sniping_dpi(shifted),
            PointerKey::Sniping => self.set_sniping(pressed),
            PointerKey::SnipingToggle if pressed => self.set_sniping(!self.sniping),
            PointerKey::DragScroll => self.set_drag_scroll(pressed),
            PointerKey::DragScrollToggle if pressed => self.set_drag_scroll(!self.drag_scroll),
            _ => (),
        }
        dpi != self.current_dpi()
    }

    /// Turn motion into scroll steps while drag-scroll is on, pass it through otherwise
    pub fn apply_drag_scroll(&mut self, mut motion: MouseMotion) -> MouseMotion {
        if !self.drag_scroll {
            return motion;
        }
        if self.config.drag_scroll_reverse_x {
            self.scroll_buffer_x = self.scroll_buffer_x.saturating_add(motion.x);
        } else {
            self.scroll_buffer_x = self.scroll_buffer_x.saturating_sub(motion.x);
        }
        if self.config.drag_scroll_reverse_y {
            self.scroll_buffer_y = self.scroll_buffer_y.saturating_add(motion.y);
        } else {
            self.scroll_buffer_y = self.scroll_buffer_y.saturating_sub(motion.y);
        }
        motion.x = 0;
        motion.y = 0;

        let size = self.config.drag_scroll_buffer_size;
        if self.scroll_buffer_x.saturating_abs() > size {
            motion.h = if self.scroll_buffer_x > 0 { 1 } else { -1 };
            self.scroll_buffer_x = 0;
        }
        if self.scroll_buffer_y.saturating_abs() > size {
            motion.v = if self.scroll_buffer_y > 0 { 1 } else { -1 };
            self.scroll_buffer_y = 0;
        }
        motion
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(PointerConfig::default())
    }
}

impl LayerChangeHook for PointerState {
    fn on_layer_change(&mut self, state: LayerState) -> LayerState {
        if let Some(layer) = self.config.auto_sniping_layer {
            self.set_sniping(state.is_active(layer));
        }
        state
    }
}
