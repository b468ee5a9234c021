//! Loader for `keyboard.toml`, the text form of the Dilemma keymap.
//!
//! The file is deserialized into [`KeyboardTomlConfig`] and checked by
//! [`validation::validate_config`]. The getters then turn the key text into
//! the same types `dilemma-keymap` compiles in:
//!
//! - [`KeyboardTomlConfig::get_layout_config`] gives the layers and encoders
//! - [`KeyboardTomlConfig::get_key_overrides`] gives the key overrides
//! - [`KeyboardTomlConfig::get_pointer_config`] gives the pointer settings

use std::collections::HashMap;
use std::path::Path;

use dilemma_keymap::key_override::KeyOverride;
use dilemma_keymap::pointer::PointerConfig;
use log::debug;
use serde_derive::Deserialize;
use serde_inline_default::serde_inline_default;

pub mod behavior;
pub mod error;
pub mod keycode_alias;
pub mod layout;
pub mod pointing;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use keycode_alias::KEYCODE_ALIAS;
pub use layout::LayoutConfig;

/// Configurations of a keyboard.toml file
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyboardTomlConfig {
    /// Basic keyboard info
    keyboard: Option<KeyboardInfo>,
    /// Layout config
    layout: Option<LayoutTomlConfig>,
    // Aliases for key maps
    aliases: Option<HashMap<String, String>>,
    // Layers of key maps
    layer: Option<Vec<LayerTomlConfig>>,
    /// Behavior config
    behavior: Option<BehaviorConfig>,
    /// Pointing device config
    pointing: Option<PointingConfig>,
}

impl KeyboardTomlConfig {
    /// Parse and validate keyboard.toml content
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Self::parse(content, "<string>")
    }

    /// Read, parse and validate a keyboard.toml file
    pub fn new_from_toml_path<P: AsRef<Path>>(config_toml_path: P) -> ConfigResult<Self> {
        let path = config_toml_path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(content: &str, path: &str) -> ConfigResult<Self> {
        let config: KeyboardTomlConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        validation::validate_config(&config)?;
        debug!(
            "Loaded {} with {} layers",
            path,
            config.layer.as_ref().map(|l| l.len()).unwrap_or_default()
        );
        Ok(config)
    }

    pub fn keyboard_info(&self) -> Option<&KeyboardInfo> {
        self.keyboard.as_ref()
    }

    /// Everything in the file, converted
    pub fn get_keyboard_config(&self) -> ConfigResult<KeyboardConfig> {
        let layout = self.get_layout_config()?;
        let key_overrides = self.get_key_overrides(&layout)?;
        let pointer = self.get_pointer_config(&layout)?;
        Ok(KeyboardConfig {
            info: self.keyboard.clone().unwrap_or_default(),
            layout,
            key_overrides,
            pointer,
        })
    }
}

/// A fully converted keyboard.toml
#[derive(Clone, Debug)]
pub struct KeyboardConfig {
    pub info: KeyboardInfo,
    pub layout: LayoutConfig,
    pub key_overrides: Vec<KeyOverride>,
    pub pointer: PointerConfig,
}

/// Configurations for keyboard info
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyboardInfo {
    /// Keyboard name
    pub name: String,
    /// Manufacturer
    pub manufacturer: Option<String>,
    /// Vender id
    pub vendor_id: Option<u16>,
    /// Product id
    pub product_id: Option<u16>,
    /// Name of the keymap, such as the author's handle
    pub keymap: Option<String>,
}

/// Configurations for keyboard layout
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutTomlConfig {
    pub rows: u8,
    pub cols: u8,
    pub layers: u8,
    /// `(row,col)` of each key, in the order the layer keys are written
    pub matrix_map: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerTomlConfig {
    pub name: Option<String>,
    pub keys: String,
    pub encoders: Option<Vec<EncoderTomlConfig>>,
}

/// Both directions of one encoder
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncoderTomlConfig {
    pub cw: String,
    pub ccw: String,
}

/// A layer, referenced by name or by number
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LayerRef {
    Number(u8),
    Name(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorConfig {
    pub key_override: Option<Vec<KeyOverrideConfig>>,
}

/// Configurations for a key override
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyOverrideConfig {
    pub trigger: String,
    pub replacement: String,
    /// Modifiers that must be held, such as `Shift` or `LShift | LCtrl`
    pub mods: String,
    pub negative_mods: Option<String>,
    /// Defaults to `mods`
    pub suppressed_mods: Option<String>,
    /// Defaults to all layers
    pub layers: Option<Vec<LayerRef>>,
    pub one_mod: Option<bool>,
    pub enabled: Option<bool>,
}

/// Configurations for the pointing device
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointingConfig {
    #[serde_inline_default(PointerConfig::new().default_dpi_steps)]
    pub default_dpi_steps: u8,
    #[serde_inline_default(PointerConfig::new().sniping_dpi_steps)]
    pub sniping_dpi_steps: u8,
    #[serde_inline_default(PointerConfig::new().min_default_dpi)]
    pub min_default_dpi: u16,
    #[serde_inline_default(PointerConfig::new().default_dpi_step_size)]
    pub default_dpi_step_size: u16,
    #[serde_inline_default(PointerConfig::new().min_sniping_dpi)]
    pub min_sniping_dpi: u16,
    #[serde_inline_default(PointerConfig::new().sniping_dpi_step_size)]
    pub sniping_dpi_step_size: u16,
    #[serde_inline_default(PointerConfig::new().drag_scroll_buffer_size)]
    pub drag_scroll_buffer_size: i16,
    #[serde(default)]
    pub drag_scroll_reverse_x: bool,
    #[serde(default)]
    pub drag_scroll_reverse_y: bool,
    pub auto_sniping_layer: Option<LayerRef>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_layout() {
        let err = KeyboardTomlConfig::from_toml_str("[keyboard]\nname = \"test\"\n").unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingField {
                field: "layout".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_section() {
        let err = KeyboardTomlConfig::from_toml_str("[light]\nenabled = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }), "{}", err);
    }

    #[test]
    fn test_missing_file() {
        let err = KeyboardTomlConfig::new_from_toml_path("/nonexistent/keyboard.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_layer_ref() {
        #[derive(Deserialize)]
        struct Refs {
            layers: Vec<LayerRef>,
        }
        let refs: Refs = toml::from_str("layers = [\"base\", 3]").unwrap();
        assert_eq!(refs.layers, vec![LayerRef::Name("base".to_string()), LayerRef::Number(3)]);
    }
}
