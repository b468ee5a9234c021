//! Structural checks of keyboard.toml, run before any key text is parsed.
//!
//! Checks that need the parsed keys, such as unknown keycodes or the key
//! count of a layer, happen while converting in `layout.rs`.

use dilemma_keymap::key_override::KEY_OVERRIDE_MAX_NUM;
use dilemma_keymap::layer::MAX_LAYERS;

use crate::error::{ConfigError, ConfigResult};
use crate::KeyboardTomlConfig;

/// Validates the entire keyboard configuration
pub fn validate_config(config: &KeyboardTomlConfig) -> ConfigResult<()> {
    validate_layout_section(config)?;
    validate_keyboard_section(config)?;
    validate_aliases(config)?;
    validate_behavior_section(config)?;
    validate_pointing_section(config)?;
    Ok(())
}

/// Validates the [layout] section
fn validate_layout_section(config: &KeyboardTomlConfig) -> ConfigResult<()> {
    let layout = config.layout.as_ref().ok_or(ConfigError::MissingField {
        field: "layout".to_string(),
    })?;

    if layout.rows == 0 || layout.cols == 0 {
        return Err(ConfigError::Validation {
            field: "layout".to_string(),
            message: "rows and cols must be greater than 0".to_string(),
        });
    }

    if layout.layers == 0 || layout.layers as usize > MAX_LAYERS {
        return Err(ConfigError::InvalidValue {
            field: "layout.layers".to_string(),
            value: layout.layers.to_string(),
            expected: format!("1 to {}", MAX_LAYERS),
        });
    }

    let num_layers = config.layer.as_ref().map(|l| l.len()).unwrap_or_default();
    if num_layers > layout.layers as usize {
        return Err(ConfigError::Validation {
            field: "layer".to_string(),
            message: format!(
                "{} [[layer]] entries, but layout.layers is {}",
                num_layers, layout.layers
            ),
        });
    }

    if num_layers > 0 && layout.matrix_map.is_none() {
        return Err(ConfigError::MissingField {
            field: "layout.matrix_map".to_string(),
        });
    }

    Ok(())
}

/// Validates the [keyboard] section
fn validate_keyboard_section(config: &KeyboardTomlConfig) -> ConfigResult<()> {
    if let Some(keyboard) = &config.keyboard {
        if keyboard.name.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "keyboard.name".to_string(),
                message: "name must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

/// Alias names are referenced as `@name`, which ends at whitespace
fn validate_aliases(config: &KeyboardTomlConfig) -> ConfigResult<()> {
    for key in config.aliases.iter().flat_map(|a| a.keys()) {
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation {
                field: format!("aliases.{}", key),
                message: "Alias names must be non-empty and must not contain whitespace".to_string(),
            });
        }
    }
    Ok(())
}

/// Validates the [behavior] section
fn validate_behavior_section(config: &KeyboardTomlConfig) -> ConfigResult<()> {
    let num_overrides = config
        .behavior
        .as_ref()
        .and_then(|b| b.key_override.as_ref())
        .map(|o| o.len())
        .unwrap_or_default();
    if num_overrides > KEY_OVERRIDE_MAX_NUM {
        return Err(ConfigError::InvalidValue {
            field: "behavior.key_override".to_string(),
            value: format!("{} entries", num_overrides),
            expected: format!("at most {}", KEY_OVERRIDE_MAX_NUM),
        });
    }
    Ok(())
}

/// Validates the [pointing] section
fn validate_pointing_section(config: &KeyboardTomlConfig) -> ConfigResult<()> {
    let Some(pointing) = &config.pointing else {
        return Ok(());
    };

    for (field, steps) in [
        ("pointing.default_dpi_steps", pointing.default_dpi_steps),
        ("pointing.sniping_dpi_steps", pointing.sniping_dpi_steps),
    ] {
        if steps == 0 {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                value: steps.to_string(),
                expected: "at least 1".to_string(),
            });
        }
    }

    if pointing.drag_scroll_buffer_size <= 0 {
        return Err(ConfigError::InvalidValue {
            field: "pointing.drag_scroll_buffer_size".to_string(),
            value: pointing.drag_scroll_buffer_size.to_string(),
            expected: "a positive number".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn validate(content: &str) -> ConfigResult<KeyboardTomlConfig> {
        KeyboardTomlConfig::from_toml_str(content)
    }

    const LAYOUT: &str = "[layout]\nrows = 1\ncols = 2\nlayers = 1\nmatrix_map = \"(0,0) (0,1)\"\n";

    #[test]
    fn test_layer_limits() {
        let too_many = "[layout]\nrows = 1\ncols = 1\nlayers = 33\n";
        assert!(matches!(validate(too_many), Err(ConfigError::InvalidValue { .. })));

        let extra_layer = format!("{}[[layer]]\nkeys = \"A B\"\n[[layer]]\nkeys = \"A B\"\n", LAYOUT);
        assert!(matches!(validate(&extra_layer), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_matrix_map_required_for_layers() {
        let content = "[layout]\nrows = 1\ncols = 1\nlayers = 1\n[[layer]]\nkeys = \"A\"\n";
        assert_eq!(
            validate(content).unwrap_err(),
            ConfigError::MissingField {
                field: "layout.matrix_map".to_string()
            }
        );
    }

    #[test]
    fn test_alias_names() {
        let content = format!("{}[aliases]\n\"home row\" = \"A\"\n", LAYOUT);
        assert!(matches!(validate(&content), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_too_many_overrides() {
        let mut content = LAYOUT.to_string();
        for _ in 0..=KEY_OVERRIDE_MAX_NUM {
            content.push_str("[[behavior.key_override]]\ntrigger = \"A\"\nreplacement = \"B\"\nmods = \"Shift\"\n");
        }
        assert!(matches!(validate(&content), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_pointing_values() {
        let content = format!("{}[pointing]\nsniping_dpi_steps = 0\n", LAYOUT);
        assert!(matches!(validate(&content), Err(ConfigError::InvalidValue { .. })));
        let content = format!("{}[pointing]\ndrag_scroll_buffer_size = -1\n", LAYOUT);
        assert!(matches!(validate(&content), Err(ConfigError::InvalidValue { .. })));
    }
}
