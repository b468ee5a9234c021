//! # Dilemma keymap
//!
//! Keymap tables and the small lookups around them for the Bastard Keyboards
//! Dilemma 3x5_3: 36 keys on two halves, two rotary encoders and a trackpad.
//!
//! ## Modules
//!
//! - [`keycode`] - HID keycodes plus lighting, pointer and firmware keys
//! - [`modifier`] - Modifier combinations and HID report modifier bits
//! - [`action`] - Key actions and encoder actions stored in the keymap
//! - [`layout`] - Matrix shape and the `layout_split_3x5_3!` positional macro
//! - [`layer`] - Layer bitmask state
//! - [`keymap`] - Layer stack lookup over the static tables
//! - [`key_override`] - Modifier-triggered key substitution
//! - [`pointer`] - Pointer modes driven by keys and layer changes
//! - [`keymaps`] - The actual keymaps
//!
//! The firmware that scans the matrix and sends HID reports is not part of
//! this crate; it consumes these tables.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;
#[macro_use]
mod helper_macro;

pub mod action;
pub mod event;
pub mod key_override;
pub mod keycode;
pub mod keymap;
pub mod keymaps;
pub mod layer;
pub mod layout;
pub mod modifier;
pub mod pointer;
