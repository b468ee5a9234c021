//! Keymaps for the Dilemma 3x5_3. Each keymap provides the layer table,
//! key overrides, encoder map and pointer settings.

pub mod arulson;
