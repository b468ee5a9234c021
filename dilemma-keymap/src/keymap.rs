use crate::action::{EncoderAction, KeyAction};
use crate::event::{Direction, KeyEvent, RotaryEncoderEvent};
use crate::layer::{LayerState, MAX_LAYERS};
use crate::pointer::LayerChangeHook;

/// Keymap represents the stack of layers.
///
/// The conception of Keymap is borrowed from qmk: <https://docs.qmk.fm/#/keymap>.
///
/// Keymap should be binded to the actual pcb matrix definition.
/// The firmware detects hardware key strokes, uses tuple `(row, col, layer)` to retrieve the action from Keymap.
///
/// Every change of the layer state is passed through the layer change hook `H`, which may rewrite it.
pub struct KeyMap<'a, H, const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize = 0>
where
    H: LayerChangeHook,
{
    /// Layers
    layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
    /// Rotary encoders, each rotary encoder is represented as (Clockwise, CounterClockwise)
    encoders: Option<&'a [[EncoderAction; NUM_ENCODER]; NUM_LAYER]>,
    /// Current state of each layer
    layer_state: LayerState,
    /// Default layer number, max: 32
    default_layer: u8,
    /// Layer cache
    layer_cache: [[u8; COL]; ROW],
    hook: H,
}

impl<'a, H, const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize>
    KeyMap<'a, H, ROW, COL, NUM_LAYER, NUM_ENCODER>
where
    H: LayerChangeHook,
{
    pub fn new(
        action_map: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
        encoder_map: Option<&'a [[EncoderAction; NUM_ENCODER]; NUM_LAYER]>,
        hook: H,
    ) -> Self {
        if NUM_LAYER > MAX_LAYERS {
            error!("Keymap has {} layers, only the first {} are reachable", NUM_LAYER, MAX_LAYERS);
        }
        KeyMap {
            layers: action_map,
            encoders: encoder_map,
            layer_state: LayerState::new(),
            default_layer: 0,
            layer_cache: [[0; COL]; ROW],
            hook,
        }
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    /// Get the default layer number
    pub fn get_default_layer(&self) -> u8 {
        self.default_layer
    }

    /// Currently active layers, without the default layer
    pub fn layer_state(&self) -> LayerState {
        self.layer_state
    }

    /// Fetch the action in keymap, out of range positions have no action
    pub fn get_action_at(&self, row: usize, col: usize, layer_num: usize) -> KeyAction {
        self.layers
            .get(layer_num)
            .and_then(|layer| layer.get(row))
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(KeyAction::No)
    }

    fn is_layer_enabled(&self, layer_idx: usize) -> bool {
        self.layer_state.is_on(layer_idx as u8) || layer_idx as u8 == self.default_layer
    }

    /// Fetch the action in keymap, with layer cache
    pub fn get_action_with_layer_cache(&mut self, key_event: KeyEvent) -> KeyAction {
        let row = key_event.row as usize;
        let col = key_event.col as usize;
        if row >= ROW || col >= COL {
            warn!("Key ({}, {}) is out of the matrix", row, col);
            return KeyAction::No;
        }
        if !key_event.pressed {
            // Releasing a pressed key, use cached layer and restore the cache
            let layer = self.pop_layer_from_cache(row, col);
            // A press that fell through a transparent default layer sent nothing
            return match self.get_action_at(row, col, layer as usize) {
                KeyAction::Transparent => KeyAction::No,
                action => action,
            };
        }

        // Iterate from higher layer to lower layer, the lowest checked layer is the default layer
        for (layer_idx, layer) in self.layers.iter().enumerate().rev() {
            if !self.is_layer_enabled(layer_idx) {
                continue;
            }
            let action = layer[row][col];
            if action.is_transparent() {
                if layer_idx as u8 == self.default_layer {
                    break;
                }
                continue;
            }

            // Found a valid action in the layer, cache it
            self.save_layer_cache(row, col, layer_idx as u8);
            return action;
        }

        self.save_layer_cache(row, col, self.default_layer);
        KeyAction::No
    }

    /// Resolve an encoder turn through the layer stack, transparent entries fall through.
    ///
    /// `None` if there's no encoder map, the encoder doesn't exist or the event has no direction.
    pub fn get_encoder_action(&self, encoder_event: RotaryEncoderEvent) -> Option<KeyAction> {
        let encoders = self.encoders?;
        let id = encoder_event.id as usize;
        if id >= NUM_ENCODER {
            warn!("Encoder {} doesn't exist", id);
            return None;
        }
        if encoder_event.direction == Direction::None {
            return None;
        }

        for (layer_idx, layer) in encoders.iter().enumerate().rev() {
            if !self.is_layer_enabled(layer_idx) {
                continue;
            }
            let action = match encoder_event.direction {
                Direction::Clockwise => layer[id].clockwise(),
                _ => layer[id].counter_clockwise(),
            };
            if action.is_transparent() {
                if layer_idx as u8 == self.default_layer {
                    break;
                }
                continue;
            }
            return Some(action);
        }

        Some(KeyAction::No)
    }

    /// The highest active layer, or the default layer
    pub fn get_activated_layer(&self) -> u8 {
        for layer_idx in (0..NUM_LAYER).rev() {
            if self.is_layer_enabled(layer_idx) {
                return layer_idx as u8;
            }
        }

        self.default_layer
    }

    fn pop_layer_from_cache(&mut self, row: usize, col: usize) -> u8 {
        let layer = self.layer_cache[row][col];
        self.layer_cache[row][col] = self.default_layer;

        layer
    }

    fn save_layer_cache(&mut self, row: usize, col: usize, layer_num: u8) {
        self.layer_cache[row][col] = layer_num;
    }

    fn check_layer(layer_num: u8) -> bool {
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return false;
        }
        true
    }

    fn update_layer_state(&mut self, state: LayerState) {
        let state = self.hook.on_layer_change(state);
        if state != self.layer_state {
            debug!("Layer state: {:#x}", state.into_bits());
        }
        self.layer_state = state;
    }

    /// Set the default layer number
    pub fn set_default_layer(&mut self, layer_num: u8) {
        if !Self::check_layer(layer_num) {
            return;
        }
        info!("Default layer: {}", layer_num);
        self.default_layer = layer_num;
        self.update_layer_state(self.layer_state);
    }

    /// Activate given layer
    pub fn activate_layer(&mut self, layer_num: u8) {
        if !Self::check_layer(layer_num) {
            return;
        }
        let mut state = self.layer_state;
        state.on(layer_num);
        self.update_layer_state(state);
    }

    /// Deactivate given layer
    pub fn deactivate_layer(&mut self, layer_num: u8) {
        if !Self::check_layer(layer_num) {
            return;
        }
        let mut state = self.layer_state;
        state.off(layer_num);
        self.update_layer_state(state);
    }

    /// Toggle given layer
    pub fn toggle_layer(&mut self, layer_num: u8) {
        if !Self::check_layer(layer_num) {
            return;
        }
        let mut state = self.layer_state;
        state.toggle(layer_num);
        self.update_layer_state(state);
    }

    /// Activate given layer and deactivate all others, the default layer stays
    pub fn toggle_only_layer(&mut self, layer_num: u8) {
        if !Self::check_layer(layer_num) {
            return;
        }
        self.update_layer_state(LayerState::only(layer_num));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::Action;
    use crate::keycode::{HidKeyCode, KeyCode};

    const LAYERS: [[[KeyAction; 2]; 1]; 3] = [
        [[k!(A), k!(B)]],
        [[k!(C), a!(Transparent)]],
        [[a!(Transparent), a!(Transparent)]],
    ];

    const ENCODERS: [[EncoderAction; 1]; 3] = [
        [encoder!(k!(AudioVolUp), k!(AudioVolDown))],
        [encoder!(k!(Right), a!(Transparent))],
        [EncoderAction::transparent()],
    ];

    struct Recorder {
        calls: usize,
        block: Option<u8>,
    }

    impl LayerChangeHook for Recorder {
        fn on_layer_change(&mut self, mut state: LayerState) -> LayerState {
            self.calls += 1;
            if let Some(layer) = self.block {
                state.off(layer);
            }
            state
        }
    }

    #[test]
    fn test_transparent_falls_through() {
        let mut keymap: KeyMap<'_, (), 1, 2, 3> = KeyMap::new(&LAYERS, None, ());
        keymap.activate_layer(1);
        keymap.activate_layer(2);
        assert_eq!(keymap.get_activated_layer(), 2);
        assert_eq!(keymap.get_action_with_layer_cache(KeyEvent::key(0, 0, true)), k!(C));
        assert_eq!(keymap.get_action_with_layer_cache(KeyEvent::key(0, 1, true)), k!(B));
    }

    #[test]
    fn test_release_uses_layer_cache() {
        let mut keymap: KeyMap<'_, (), 1, 2, 3> = KeyMap::new(&LAYERS, None, ());
        keymap.activate_layer(1);
        assert_eq!(keymap.get_action_with_layer_cache(KeyEvent::key(0, 0, true)), k!(C));
        keymap.deactivate_layer(1);
        assert_eq!(keymap.get_action_with_layer_cache(KeyEvent::key(0, 0, false)), k!(C));
        // The cache is restored after release
        assert_eq!(keymap.get_action_with_layer_cache(KeyEvent::key(0, 0, true)), k!(A));
    }

    #[test]
    fn test_out_of_range() {
        let mut keymap: KeyMap<'_, (), 1, 2, 3> = KeyMap::new(&LAYERS, None, ());
        assert_eq!(keymap.get_action_at(5, 0, 0), KeyAction::No);
        assert_eq!(keymap.get_action_at(0, 0, 9), KeyAction::No);
        assert_eq!(keymap.get_action_with_layer_cache(KeyEvent::key(1, 0, true)), KeyAction::No);

        keymap.activate_layer(3);
        keymap.toggle_layer(200);
        assert_eq!(keymap.layer_state(), LayerState::new());
    }

    #[test]
    fn test_default_layer_is_the_bottom() {
        let mut keymap: KeyMap<'_, (), 1, 2, 3> = KeyMap::new(&LAYERS, None, ());
        keymap.set_default_layer(1);
        // Layer 0 is below the default layer and never checked
        assert_eq!(keymap.get_action_with_layer_cache(KeyEvent::key(0, 1, true)), KeyAction::No);
        assert_eq!(keymap.get_action_with_layer_cache(KeyEvent::key(0, 0, true)), k!(C));
        keymap.set_default_layer(5);
        assert_eq!(keymap.get_default_layer(), 1);
    }

    #[test]
    fn test_transparent_default_layer_press_and_release() {
        let mut keymap: KeyMap<'_, (), 1, 2, 3> = KeyMap::new(&LAYERS, None, ());
        keymap.set_default_layer(1);
        let pressed = keymap.get_action_with_layer_cache(KeyEvent::key(0, 1, true));
        let released = keymap.get_action_with_layer_cache(KeyEvent::key(0, 1, false));
        assert_eq!(pressed, KeyAction::No);
        assert_eq!(released, pressed);

        // Everything transparent down to the default layer
        keymap.activate_layer(2);
        let pressed = keymap.get_action_with_layer_cache(KeyEvent::key(0, 1, true));
        keymap.deactivate_layer(2);
        assert_eq!(pressed, KeyAction::No);
        assert_eq!(keymap.get_action_with_layer_cache(KeyEvent::key(0, 1, false)), KeyAction::No);
    }

    #[test]
    fn test_toggle_only() {
        let mut keymap: KeyMap<'_, (), 1, 2, 3> = KeyMap::new(&LAYERS, None, ());
        keymap.activate_layer(1);
        keymap.toggle_only_layer(2);
        assert_eq!(keymap.layer_state(), LayerState::only(2));
        keymap.toggle_layer(2);
        assert_eq!(keymap.get_activated_layer(), 0);
    }

    #[test]
    fn test_hook_sees_every_change() {
        let hook = Recorder { calls: 0, block: Some(2) };
        let mut keymap: KeyMap<'_, Recorder, 1, 2, 3> = KeyMap::new(&LAYERS, None, hook);
        keymap.activate_layer(1);
        keymap.activate_layer(2);
        keymap.toggle_layer(1);
        keymap.activate_layer(7);
        assert_eq!(keymap.hook().calls, 3);
        // The hook keeps layer 2 off
        assert_eq!(keymap.layer_state(), LayerState::new());
    }

    #[test]
    fn test_encoder_lookup() {
        let mut keymap: KeyMap<'_, (), 1, 2, 3, 1> = KeyMap::new(&LAYERS, Some(&ENCODERS), ());
        let cw = RotaryEncoderEvent {
            id: 0,
            direction: Direction::Clockwise,
        };
        let ccw = RotaryEncoderEvent {
            id: 0,
            direction: Direction::CounterClockwise,
        };
        assert_eq!(keymap.get_encoder_action(cw), Some(k!(AudioVolUp)));
        keymap.activate_layer(2);
        keymap.activate_layer(1);
        assert_eq!(
            keymap.get_encoder_action(cw),
            Some(KeyAction::Single(Action::Key(KeyCode::Hid(HidKeyCode::Right))))
        );
        assert_eq!(keymap.get_encoder_action(ccw), Some(k!(AudioVolDown)));
        assert_eq!(keymap.get_encoder_action(RotaryEncoderEvent { id: 1, ..cw }), None);
        assert_eq!(
            keymap.get_encoder_action(RotaryEncoderEvent {
                id: 0,
                direction: Direction::None
            }),
            None
        );

        let keymap: KeyMap<'_, (), 1, 2, 3, 1> = KeyMap::new(&LAYERS, None, ());
        assert_eq!(keymap.get_encoder_action(cw), None);
    }
}
