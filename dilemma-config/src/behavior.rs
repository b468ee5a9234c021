use dilemma_keymap::action::{Action, KeyAction};
use dilemma_keymap::key_override::KeyOverride;
use dilemma_keymap::layer::LayerState;
use log::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::layout::parse_modifier_list;
use crate::LayoutConfig;

impl crate::KeyboardTomlConfig {
    /// Key overrides of `[[behavior.key_override]]`, layer names resolved against `layout`
    pub fn get_key_overrides(&self, layout: &LayoutConfig) -> ConfigResult<Vec<KeyOverride>> {
        let Some(overrides) = self.behavior.as_ref().and_then(|b| b.key_override.as_ref()) else {
            return Ok(Vec::new());
        };
        let parser = self.key_parser(layout);
        let mut result = Vec::with_capacity(overrides.len());
        for (i, config) in overrides.iter().enumerate() {
            let field = |name: &str| format!("behavior.key_override.{}.{}", i, name);

            let trigger = match parser.parse_single(&config.trigger, &field("trigger"))? {
                KeyAction::Single(Action::Key(keycode)) => keycode,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: field("trigger"),
                        value: config.trigger.clone(),
                        expected: "a plain keycode".to_string(),
                    });
                }
            };
            let replacement = parser.parse_single(&config.replacement, &field("replacement"))?;
            let mods = parse_modifier_list(&config.mods, &field("mods"))?;

            let mut key_override = KeyOverride::basic(mods, trigger, replacement);
            if let Some(negative_mods) = &config.negative_mods {
                key_override =
                    key_override.with_negative_mods(parse_modifier_list(negative_mods, &field("negative_mods"))?);
            }
            if let Some(suppressed_mods) = &config.suppressed_mods {
                key_override = key_override
                    .with_suppressed_mods(parse_modifier_list(suppressed_mods, &field("suppressed_mods"))?);
            }
            if let Some(layers) = &config.layers {
                let mut state = LayerState::new();
                for layer in layers {
                    state.on(layout.resolve_layer(layer, &field("layers"))?);
                }
                key_override = key_override.with_layers(state);
            }
            if let Some(one_mod) = config.one_mod {
                key_override = key_override.with_one_mod(one_mod);
            }
            if let Some(enabled) = config.enabled {
                key_override = key_override.with_enabled(enabled);
            }
            debug!("Key override #{}: {} + {} -> {}", i, mods, trigger, replacement);
            result.push(key_override);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use dilemma_keymap::keycode::{HidKeyCode, KeyCode};
    use dilemma_keymap::modifier::HidModifiers;

    use crate::{ConfigError, KeyboardTomlConfig};

    const LAYOUT: &str = r#"
[layout]
rows = 1
cols = 3
layers = 2
matrix_map = "(0,0) (0,1) (0,2)"

[[layer]]
name = "base"
keys = "Comma Dot A"

[[layer]]
name = "num"
keys = "_ _ _"
"#;

    fn overrides(behavior: &str) -> Result<Vec<dilemma_keymap::key_override::KeyOverride>, ConfigError> {
        let config = KeyboardTomlConfig::from_toml_str(&format!("{}{}", LAYOUT, behavior))?;
        let layout = config.get_layout_config()?;
        config.get_key_overrides(&layout)
    }

    #[test]
    fn test_no_overrides() {
        assert_eq!(overrides(""), Ok(Vec::new()));
    }

    #[test]
    fn test_full_override() {
        let result = overrides(
            r#"
[[behavior.key_override]]
trigger = "Comma"
replacement = "SHIFTED(Slash)"
mods = "LShift | RShift"
negative_mods = "Ctrl"
suppressed_mods = "LShift"
layers = ["num", 0]
one_mod = true
enabled = false
"#,
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        let o = &result[0];
        assert_eq!(o.trigger(), KeyCode::Hid(HidKeyCode::Comma));
        assert_eq!(o.trigger_mods(), HidModifiers::MASK_SHIFT);
        assert_eq!(o.negative_mods(), HidModifiers::MASK_CTRL);
        assert_eq!(o.suppressed_mods(), HidModifiers::new().with_left_shift(true));
        assert_eq!(o.layers().into_bits(), 0b11);
        assert!(o.one_mod());
        assert!(!o.enabled());
    }

    #[test]
    fn test_override_errors() {
        let bad_trigger = overrides(
            r#"
[[behavior.key_override]]
trigger = "MO(1)"
replacement = "A"
mods = "Shift"
"#,
        );
        assert!(matches!(bad_trigger, Err(ConfigError::InvalidValue { .. })));

        let bad_layer = overrides(
            r#"
[[behavior.key_override]]
trigger = "Dot"
replacement = "Minus"
mods = "Shift"
layers = ["symbols"]
"#,
        );
        assert!(matches!(bad_layer, Err(ConfigError::UnknownLayer { .. })));
    }
}
