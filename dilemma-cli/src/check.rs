//! Comparison of a loaded keyboard.toml with the compiled-in keymap

use std::fmt;

use anyhow::Result;
use dilemma_config::KeyboardConfig;
use dilemma_keymap::key_override::KeyOverride;
use dilemma_keymap::keymaps::arulson::{self, ENCODER_MAP, KEY_OVERRIDES, KEYMAP, Layer, NUM_LAYER};
use dilemma_keymap::layout::{COL, MATRIX_MAP, NUM_ENCODER, ROW};
use log::debug;

/// One entry where keyboard.toml and the built-in tables disagree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub position: String,
    pub found: String,
    pub expected: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: keyboard.toml has {}, built-in has {}",
            self.position, self.found, self.expected
        )
    }
}

fn mismatch(position: String, found: impl fmt::Display, expected: impl fmt::Display) -> Mismatch {
    Mismatch {
        position,
        found: found.to_string(),
        expected: expected.to_string(),
    }
}

/// Layer name and number, as used in reports
fn layer_label(layer: usize) -> String {
    match Layer::from_repr(layer as u8) {
        Some(l) => format!("{}({})", l.name(), layer),
        None => layer.to_string(),
    }
}

/// `trigger_mods + trigger -> replacement`, with the optional settings
pub fn describe_override(key_override: &KeyOverride) -> String {
    let mut text = format!(
        "{} + {} -> {}",
        key_override.trigger_mods(),
        key_override.trigger(),
        key_override.replacement()
    );
    if !key_override.negative_mods().is_empty() {
        text.push_str(&format!(", not with {}", key_override.negative_mods()));
    }
    if key_override.suppressed_mods() != key_override.trigger_mods() {
        text.push_str(&format!(", suppressing {}", key_override.suppressed_mods()));
    }
    if key_override.layers().into_bits() != u32::MAX {
        text.push_str(&format!(", layers {}", key_override.layers()));
    }
    if key_override.one_mod() {
        text.push_str(", any one modifier");
    }
    if !key_override.enabled() {
        text.push_str(", disabled");
    }
    text
}

/// Every difference between `config` and the built-in tables
pub fn compare(config: &KeyboardConfig) -> Result<Vec<Mismatch>> {
    let mut mismatches = Vec::new();
    let layout = &config.layout;

    let keymap = layout.to_arrays::<ROW, COL, NUM_LAYER>()?;
    for layer in 0..NUM_LAYER {
        if let Some(Some(name)) = layout.layer_names.get(layer) {
            let expected = Layer::ALL[layer].name();
            if name != expected {
                mismatches.push(mismatch(format!("layer {} name", layer), name, expected));
            }
        }
        for (idx, &(row, col)) in MATRIX_MAP.iter().enumerate() {
            let found = keymap[layer][row as usize][col as usize];
            let expected = KEYMAP[layer][row as usize][col as usize];
            if found != expected {
                mismatches.push(mismatch(
                    format!("layer {} key {} ({},{})", layer_label(layer), idx, row, col),
                    found,
                    expected,
                ));
            }
        }
    }

    match layout.encoder_arrays::<NUM_ENCODER, NUM_LAYER>()? {
        Some(encoders) => {
            for layer in 0..NUM_LAYER {
                for encoder in 0..NUM_ENCODER {
                    let found = encoders[layer][encoder];
                    let expected = ENCODER_MAP[layer][encoder];
                    if found != expected {
                        mismatches.push(mismatch(
                            format!("layer {} encoder {}", layer_label(layer), encoder),
                            format!("{} / {}", found.clockwise(), found.counter_clockwise()),
                            format!("{} / {}", expected.clockwise(), expected.counter_clockwise()),
                        ));
                    }
                }
            }
        }
        None => mismatches.push(mismatch("encoders".to_string(), "none", "an encoder map")),
    }

    if config.key_overrides.len() != KEY_OVERRIDES.len() {
        mismatches.push(mismatch(
            "key overrides".to_string(),
            format!("{} entries", config.key_overrides.len()),
            format!("{} entries", KEY_OVERRIDES.len()),
        ));
    }
    for (i, (found, expected)) in config.key_overrides.iter().zip(KEY_OVERRIDES.iter()).enumerate() {
        if found != expected {
            mismatches.push(mismatch(
                format!("key override {}", i),
                describe_override(found),
                describe_override(expected),
            ));
        }
    }

    let pointer = arulson::pointer_config();
    if config.pointer != pointer {
        mismatches.push(mismatch(
            "pointing".to_string(),
            format!("{:?}", config.pointer),
            format!("{:?}", pointer),
        ));
    }

    debug!("{} mismatches", mismatches.len());
    Ok(mismatches)
}
