use std::collections::HashMap;

use dilemma_keymap::action::{Action, EncoderAction, KeyAction};
use dilemma_keymap::keycode::KeyCode;
use dilemma_keymap::modifier::{HidModifiers, ModifierCombination};
use log::debug;
use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest_derive::Parser;

use crate::error::{ConfigError, ConfigResult};
use crate::{KEYCODE_ALIAS, KeyboardTomlConfig, LayerRef};

// Pest parser using the grammar files
#[derive(Parser)]
#[grammar = "keymap.pest"]
struct ConfigParser;

// Max alias resolution depth to prevent infinite loops
const MAX_ALIAS_RESOLUTION_DEPTH: usize = 10;

/// Layers and encoders of keyboard.toml, converted to actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    pub rows: u8,
    pub cols: u8,
    pub layers: u8,
    /// `(row, col)` of each key, in the order layer keys are written
    pub matrix_map: Vec<(u8, u8)>,
    /// One entry per layer, `None` for unnamed or unconfigured layers
    pub layer_names: Vec<Option<String>>,
    /// `[layer][row][col]`
    pub keymap: Vec<Vec<Vec<KeyAction>>>,
    /// `[layer][encoder]`, `None` when no layer configures encoders
    pub encoders: Option<Vec<Vec<EncoderAction>>>,
}

impl LayoutConfig {
    /// Number of a layer by its name
    pub fn layer_index(&self, name: &str) -> Option<u8> {
        self.layer_names
            .iter()
            .position(|n| n.as_deref() == Some(name))
            .map(|i| i as u8)
    }

    /// Resolve a layer reference from `field`
    pub fn resolve_layer(&self, layer: &LayerRef, field: &str) -> ConfigResult<u8> {
        match layer {
            LayerRef::Number(n) if *n < self.layers => Ok(*n),
            LayerRef::Number(n) => Err(ConfigError::InvalidValue {
                field: field.to_string(),
                value: n.to_string(),
                expected: format!("a layer number below {}", self.layers),
            }),
            LayerRef::Name(name) => self.layer_index(name).ok_or_else(|| ConfigError::UnknownLayer {
                field: field.to_string(),
                layer: name.clone(),
            }),
        }
    }

    /// Keys of a layer in `matrix_map` order
    pub fn layer_keys(&self, layer: u8) -> Option<Vec<KeyAction>> {
        let grid = self.keymap.get(layer as usize)?;
        Some(
            self.matrix_map
                .iter()
                .map(|&(row, col)| grid[row as usize][col as usize])
                .collect(),
        )
    }

    /// The keymap as the fixed-size array `KeyMap` works on
    pub fn to_arrays<const ROW: usize, const COL: usize, const NUM_LAYER: usize>(
        &self,
    ) -> ConfigResult<[[[KeyAction; COL]; ROW]; NUM_LAYER]> {
        if self.rows as usize != ROW || self.cols as usize != COL || self.layers as usize != NUM_LAYER {
            return Err(ConfigError::Validation {
                field: "layout".to_string(),
                message: format!(
                    "expected {} rows, {} cols and {} layers, found {}, {} and {}",
                    ROW, COL, NUM_LAYER, self.rows, self.cols, self.layers
                ),
            });
        }
        let mut keymap = [[[KeyAction::No; COL]; ROW]; NUM_LAYER];
        for (layer, grid) in keymap.iter_mut().zip(self.keymap.iter()) {
            for (row, actions) in layer.iter_mut().zip(grid.iter()) {
                row.copy_from_slice(actions);
            }
        }
        Ok(keymap)
    }

    /// The encoder map as a fixed-size array, `None` when no encoders are configured
    pub fn encoder_arrays<const NUM_ENCODER: usize, const NUM_LAYER: usize>(
        &self,
    ) -> ConfigResult<Option<[[EncoderAction; NUM_ENCODER]; NUM_LAYER]>> {
        let Some(encoders) = &self.encoders else {
            return Ok(None);
        };
        let num_encoder = encoders.first().map(|e| e.len()).unwrap_or_default();
        if encoders.len() != NUM_LAYER || num_encoder != NUM_ENCODER {
            return Err(ConfigError::Validation {
                field: "layer.encoders".to_string(),
                message: format!(
                    "expected {} encoders on {} layers, found {} on {}",
                    NUM_ENCODER,
                    NUM_LAYER,
                    num_encoder,
                    encoders.len()
                ),
            });
        }
        let mut map = [[EncoderAction::default(); NUM_ENCODER]; NUM_LAYER];
        for (layer, actions) in map.iter_mut().zip(encoders.iter()) {
            layer.copy_from_slice(actions);
        }
        Ok(Some(map))
    }
}

impl KeyboardTomlConfig {
    /// Layout is a mandatory field in toml, so we mainly check the sizes
    pub fn get_layout_config(&self) -> ConfigResult<LayoutConfig> {
        let layout = self.layout.as_ref().ok_or_else(|| ConfigError::MissingField {
            field: "layout".to_string(),
        })?;
        let matrix_map = layout.matrix_map.as_deref().ok_or_else(|| ConfigError::MissingField {
            field: "layout.matrix_map".to_string(),
        })?;
        let aliases = self.aliases.clone().unwrap_or_default();
        let layers = self.layer.clone().unwrap_or_default();

        let matrix_map = parse_matrix_map(matrix_map)?;
        let mut seen = vec![vec![false; layout.cols as usize]; layout.rows as usize];
        for &(row, col) in &matrix_map {
            if row >= layout.rows || col >= layout.cols {
                return Err(ConfigError::Validation {
                    field: "layout.matrix_map".to_string(),
                    message: format!(
                        "Coordinate ({},{}) is out of bounds: ([0..{}], [0..{}]) is the expected range",
                        row,
                        col,
                        layout.rows.saturating_sub(1),
                        layout.cols.saturating_sub(1)
                    ),
                });
            }
            if seen[row as usize][col as usize] {
                return Err(ConfigError::Validation {
                    field: "layout.matrix_map".to_string(),
                    message: format!("Duplicate coordinate ({},{})", row, col),
                });
            }
            seen[row as usize][col as usize] = true;
        }

        // collect layer names first, layer keys may reference any of them
        let mut layer_names = HashMap::<String, u8>::new();
        for (layer_number, layer) in layers.iter().enumerate() {
            if let Some(name) = &layer.name {
                if layer_names.insert(name.clone(), layer_number as u8).is_some() {
                    return Err(ConfigError::Validation {
                        field: format!("layer.{}.name", layer_number),
                        message: format!("Duplicate layer name '{}'", name),
                    });
                }
            }
        }

        let parser = KeyParser {
            aliases,
            layer_names,
            num_layers: layout.layers,
        };

        let mut keymap = Vec::with_capacity(layout.layers as usize);
        let mut encoders = Vec::with_capacity(layout.layers as usize);
        for (layer_number, layer) in layers.iter().enumerate() {
            let field = match &layer.name {
                Some(name) => format!("layer.{}.keys", name),
                None => format!("layer.{}.keys", layer_number),
            };
            let actions = parser.parse_layer(&layer.keys, &field)?;
            if actions.len() != matrix_map.len() {
                return Err(ConfigError::Validation {
                    field,
                    message: format!(
                        "{} keys, layout.matrix_map has {}",
                        actions.len(),
                        matrix_map.len()
                    ),
                });
            }
            let mut grid = vec![vec![KeyAction::No; layout.cols as usize]; layout.rows as usize];
            for (&(row, col), action) in matrix_map.iter().zip(actions) {
                grid[row as usize][col as usize] = action;
            }
            keymap.push(grid);

            let encoder_actions = match &layer.encoders {
                Some(list) => {
                    let field = format!("layer.{}.encoders", layer_number);
                    let mut actions = Vec::with_capacity(list.len());
                    for encoder in list {
                        actions.push(EncoderAction::new(
                            parser.parse_single(&encoder.cw, &field)?,
                            parser.parse_single(&encoder.ccw, &field)?,
                        ));
                    }
                    Some(actions)
                }
                None => None,
            };
            encoders.push(encoder_actions);
        }

        let encoders = collect_encoders(encoders, layout.layers as usize)?;

        // The required number of layers is less than what's set in keymap
        // Fill the rest with transparent keys
        for _ in keymap.len()..layout.layers as usize {
            let mut grid = vec![vec![KeyAction::No; layout.cols as usize]; layout.rows as usize];
            for &(row, col) in &matrix_map {
                grid[row as usize][col as usize] = KeyAction::Transparent;
            }
            keymap.push(grid);
        }

        let mut names: Vec<Option<String>> = layers.iter().map(|l| l.name.clone()).collect();
        names.resize(layout.layers as usize, None);

        debug!(
            "Layout {}x{}, {} layers, {} keys",
            layout.rows,
            layout.cols,
            layout.layers,
            matrix_map.len()
        );

        Ok(LayoutConfig {
            rows: layout.rows,
            cols: layout.cols,
            layers: layout.layers,
            matrix_map,
            layer_names: names,
            keymap,
            encoders,
        })
    }

    /// Parser for key text outside `[[layer]]`, with the layer names of `layout`
    pub(crate) fn key_parser(&self, layout: &LayoutConfig) -> KeyParser {
        let layer_names = layout
            .layer_names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| Some((name.clone()?, i as u8)))
            .collect();
        KeyParser {
            aliases: self.aliases.clone().unwrap_or_default(),
            layer_names,
            num_layers: layout.layers,
        }
    }
}

/// Either every configured layer has the same encoders, or none has any.
/// Layers without a `[[layer]]` entry are transparent.
fn collect_encoders(
    encoders: Vec<Option<Vec<EncoderAction>>>,
    num_layers: usize,
) -> ConfigResult<Option<Vec<Vec<EncoderAction>>>> {
    if encoders.iter().all(Option::is_none) {
        return Ok(None);
    }
    let mut num_encoder = None;
    let mut result = Vec::with_capacity(num_layers);
    for (layer_number, actions) in encoders.into_iter().enumerate() {
        let field = format!("layer.{}.encoders", layer_number);
        let actions = actions.ok_or_else(|| ConfigError::MissingField { field: field.clone() })?;
        match num_encoder {
            Some(n) if n != actions.len() => {
                return Err(ConfigError::Validation {
                    field,
                    message: format!("{} encoders, previous layers have {}", actions.len(), n),
                });
            }
            _ => num_encoder = Some(actions.len()),
        }
        result.push(actions);
    }
    let num_encoder = num_encoder.unwrap_or_default();
    result.resize(num_layers, vec![EncoderAction::transparent(); num_encoder]);
    Ok(Some(result))
}

/// Parses and validates a matrix_map string using Pest.
/// Ensures the string contains only valid coordinates and whitespace.
pub(crate) fn parse_matrix_map(matrix_map: &str) -> ConfigResult<Vec<(u8, u8)>> {
    let invalid = |message: String| ConfigError::Validation {
        field: "layout.matrix_map".to_string(),
        message,
    };
    let pairs = ConfigParser::parse(Rule::matrix_map, matrix_map)
        .map_err(|e| invalid(format!("Invalid format: {}", e)))?;
    let mut coordinates = Vec::new();
    for pair in pairs.flat_map(|p| p.into_inner()) {
        if pair.as_rule() == Rule::coordinate {
            let mut parts = pair.into_inner();
            let mut number = || -> ConfigResult<u8> {
                let text = parts
                    .next()
                    .ok_or_else(|| invalid("Missing coordinate".to_string()))?
                    .as_str();
                text.parse::<u8>()
                    .map_err(|e| invalid(format!("Failed to parse '{}': {}", text, e)))
            };
            let row = number()?;
            let col = number()?;
            coordinates.push((row, col));
        }
    }
    Ok(coordinates)
}

/// Resolve every `@alias` in the key text, aliases may reference other aliases
pub(crate) fn alias_resolver(keys: &str, aliases: &HashMap<String, String>) -> ConfigResult<String> {
    let mut current_keys = keys.to_string();

    for _ in 0..MAX_ALIAS_RESOLUTION_DEPTH {
        let mut next_keys = String::with_capacity(current_keys.len());
        let mut made_replacement = false;
        let mut rest = current_keys.as_str();

        while let Some(at_index) = rest.find('@') {
            next_keys.push_str(&rest[..at_index]);
            let after = &rest[at_index + 1..];
            let end = after.find(|c: char| c.is_ascii_whitespace()).unwrap_or(after.len());
            if end == 0 {
                // A lone '@' is kept literally
                next_keys.push('@');
            } else {
                let alias_key = &after[..end];
                let value = aliases.get(alias_key).ok_or_else(|| ConfigError::UndefinedAlias {
                    alias: alias_key.to_string(),
                })?;
                next_keys.push_str(value);
                made_replacement = true;
            }
            rest = &after[end..];
        }
        next_keys.push_str(rest);

        if !made_replacement {
            return Ok(next_keys);
        }
        current_keys = next_keys;
    }

    Err(ConfigError::AliasDepthExceeded {
        keys: keys.to_string(),
        depth: MAX_ALIAS_RESOLUTION_DEPTH,
    })
}

/// A canonical keycode name or one of its aliases in [`KEYCODE_ALIAS`]
pub fn resolve_keycode(name: &str) -> Option<KeyCode> {
    if let Ok(keycode) = name.parse::<KeyCode>() {
        return Some(keycode);
    }
    KEYCODE_ALIAS.get(name).and_then(|canonical| canonical.parse().ok())
}

/// Modifier bits of a modifier name, `Shift` names both sides
fn modifier_bits(name: &str) -> Option<HidModifiers> {
    match name {
        "Ctrl" | "ctrl" => Some(HidModifiers::MASK_CTRL),
        "Shift" | "shift" => Some(HidModifiers::MASK_SHIFT),
        "Alt" | "alt" => Some(HidModifiers::MASK_ALT),
        "Gui" | "gui" => Some(HidModifiers::MASK_GUI),
        _ => match resolve_keycode(name)? {
            KeyCode::Hid(k) if k.is_modifier() => Some(k.to_hid_modifiers()),
            _ => None,
        },
    }
}

/// A modifier combination holds one side only
fn to_combination(mods: HidModifiers) -> Option<ModifierCombination> {
    let left = mods & HidModifiers::from_bits(0x0F);
    let right = mods & HidModifiers::from_bits(0xF0);
    match (left.is_empty(), right.is_empty()) {
        (false, true) => Some(ModifierCombination::new_from(
            false,
            mods.left_gui(),
            mods.left_alt(),
            mods.left_shift(),
            mods.left_ctrl(),
        )),
        (true, false) => Some(ModifierCombination::new_from(
            true,
            mods.right_gui(),
            mods.right_alt(),
            mods.right_shift(),
            mods.right_ctrl(),
        )),
        _ => None,
    }
}

/// Parse modifier list text such as `LShift | RShift`
pub(crate) fn parse_modifier_list(text: &str, field: &str) -> ConfigResult<HidModifiers> {
    let pairs = ConfigParser::parse(Rule::modifier_list, text).map_err(|e| ConfigError::Validation {
        field: field.to_string(),
        message: format!("Invalid modifiers: {}", e),
    })?;
    let mut mods = HidModifiers::new();
    for pair in pairs.flat_map(|p| p.into_inner()) {
        if pair.as_rule() == Rule::modifiers {
            mods |= modifiers(pair, field)?;
        }
    }
    Ok(mods)
}

fn modifiers(pair: Pair<Rule>, field: &str) -> ConfigResult<HidModifiers> {
    let mut mods = HidModifiers::new();
    for modifier in pair.into_inner() {
        let name = modifier.as_str();
        mods |= modifier_bits(name).ok_or_else(|| ConfigError::InvalidValue {
            field: field.to_string(),
            value: name.to_string(),
            expected: "a modifier such as LShift, RCtrl or Shift".to_string(),
        })?;
    }
    Ok(mods)
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, field: &str) -> ConfigResult<Pair<'i, Rule>> {
    pairs.next().ok_or_else(|| ConfigError::Validation {
        field: field.to_string(),
        message: "Malformed key".to_string(),
    })
}

/// Turns key text into actions, resolving aliases and layer names
pub(crate) struct KeyParser {
    aliases: HashMap<String, String>,
    layer_names: HashMap<String, u8>,
    num_layers: u8,
}

impl KeyParser {
    /// All keys of a layer
    pub(crate) fn parse_layer(&self, keys: &str, field: &str) -> ConfigResult<Vec<KeyAction>> {
        //resolve aliases first
        let keys = alias_resolver(keys, &self.aliases)?;
        let pairs = ConfigParser::parse(Rule::key_map, &keys).map_err(|e| ConfigError::Validation {
            field: field.to_string(),
            message: format!("Invalid keys: {}", e),
        })?;
        let mut actions = Vec::new();
        for pair in pairs.flat_map(|p| p.into_inner()) {
            if pair.as_rule() != Rule::EOI {
                actions.push(self.key_action(pair, field)?);
            }
        }
        Ok(actions)
    }

    /// Exactly one key
    pub(crate) fn parse_single(&self, key: &str, field: &str) -> ConfigResult<KeyAction> {
        let key = alias_resolver(key, &self.aliases)?;
        let pairs = ConfigParser::parse(Rule::single_key, &key).map_err(|e| ConfigError::Validation {
            field: field.to_string(),
            message: format!("Invalid key: {}", e),
        })?;
        let mut inner = pairs.flat_map(|p| p.into_inner());
        match inner.next() {
            Some(pair) => self.key_action(pair, field),
            None => Err(ConfigError::MissingField {
                field: field.to_string(),
            }),
        }
    }

    fn key_action(&self, pair: Pair<Rule>, field: &str) -> ConfigResult<KeyAction> {
        match pair.as_rule() {
            Rule::transparent => Ok(KeyAction::Transparent),
            Rule::layer_tap => {
                let mut inner = pair.into_inner();
                let layer = self.layer(next_pair(&mut inner, field)?, field)?;
                let key = self.keycode(next_pair(&mut inner, field)?, field)?;
                Ok(KeyAction::TapHold(Action::Key(key), Action::LayerOn(layer)))
            }
            Rule::mod_tap => {
                let mut inner = pair.into_inner();
                let key = self.keycode(next_pair(&mut inner, field)?, field)?;
                let mods = self.combination(next_pair(&mut inner, field)?, field)?;
                Ok(KeyAction::TapHold(Action::Key(key), Action::Modifier(mods)))
            }
            Rule::tap_hold => {
                let mut inner = pair.into_inner();
                let tap = self.action(next_pair(&mut inner, field)?, field)?;
                let hold = self.action(next_pair(&mut inner, field)?, field)?;
                Ok(KeyAction::TapHold(tap, hold))
            }
            Rule::action => match self.action(pair, field)? {
                Action::No => Ok(KeyAction::No),
                action => Ok(KeyAction::Single(action)),
            },
            rule => Err(ConfigError::Validation {
                field: field.to_string(),
                message: format!("Unexpected rule {:?}", rule),
            }),
        }
    }

    fn action(&self, pair: Pair<Rule>, field: &str) -> ConfigResult<Action> {
        let pair = next_pair(&mut pair.into_inner(), field)?;
        let rule = pair.as_rule();
        match rule {
            Rule::no_action => return Ok(Action::No),
            Rule::keycode => return Ok(Action::Key(self.keycode(pair, field)?)),
            _ => {}
        }
        let mut inner = pair.into_inner();
        let arg = next_pair(&mut inner, field)?;
        match rule {
            Rule::layer_on => Ok(Action::LayerOn(self.layer(arg, field)?)),
            Rule::layer_toggle => Ok(Action::LayerToggle(self.layer(arg, field)?)),
            Rule::layer_toggle_only => Ok(Action::LayerToggleOnly(self.layer(arg, field)?)),
            Rule::default_layer => Ok(Action::DefaultLayer(self.layer(arg, field)?)),
            Rule::modifier_action => Ok(Action::Modifier(self.combination(arg, field)?)),
            Rule::shifted_action => Ok(Action::KeyWithModifier(
                self.keycode(arg, field)?,
                ModifierCombination::LSHIFT,
            )),
            Rule::with_modifier_action => {
                let key = self.keycode(arg, field)?;
                let mods = self.combination(next_pair(&mut inner, field)?, field)?;
                Ok(Action::KeyWithModifier(key, mods))
            }
            rule => Err(ConfigError::Validation {
                field: field.to_string(),
                message: format!("Unexpected rule {:?}", rule),
            }),
        }
    }

    fn keycode(&self, pair: Pair<Rule>, field: &str) -> ConfigResult<KeyCode> {
        let name = pair.as_str();
        resolve_keycode(name).ok_or_else(|| ConfigError::UnknownKeycode {
            field: field.to_string(),
            keycode: name.to_string(),
        })
    }

    fn combination(&self, pair: Pair<Rule>, field: &str) -> ConfigResult<ModifierCombination> {
        let text = pair.as_str().to_string();
        let mods = modifiers(pair, field)?;
        to_combination(mods).ok_or_else(|| ConfigError::InvalidValue {
            field: field.to_string(),
            value: text,
            expected: "modifiers of one side".to_string(),
        })
    }

    fn layer(&self, pair: Pair<Rule>, field: &str) -> ConfigResult<u8> {
        let text = pair.as_str();
        match pair.as_rule() {
            Rule::layer_number => match text.parse::<u8>() {
                Ok(n) if n < self.num_layers => Ok(n),
                _ => Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: text.to_string(),
                    expected: format!("a layer number below {}", self.num_layers),
                }),
            },
            _ => self
                .layer_names
                .get(text)
                .copied()
                .ok_or_else(|| ConfigError::UnknownLayer {
                    field: field.to_string(),
                    layer: text.to_string(),
                }),
        }
    }
}
