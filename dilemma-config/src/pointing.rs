use dilemma_keymap::pointer::PointerConfig;

use crate::error::ConfigResult;
use crate::LayoutConfig;

impl crate::KeyboardTomlConfig {
    /// Pointer settings of `[pointing]`, defaults when the section is missing
    pub fn get_pointer_config(&self, layout: &LayoutConfig) -> ConfigResult<PointerConfig> {
        let Some(pointing) = &self.pointing else {
            return Ok(PointerConfig::new());
        };
        let auto_sniping_layer = match &pointing.auto_sniping_layer {
            Some(layer) => Some(layout.resolve_layer(layer, "pointing.auto_sniping_layer")?),
            None => None,
        };
        Ok(PointerConfig {
            default_dpi_steps: pointing.default_dpi_steps,
            sniping_dpi_steps: pointing.sniping_dpi_steps,
            min_default_dpi: pointing.min_default_dpi,
            default_dpi_step_size: pointing.default_dpi_step_size,
            min_sniping_dpi: pointing.min_sniping_dpi,
            sniping_dpi_step_size: pointing.sniping_dpi_step_size,
            drag_scroll_buffer_size: pointing.drag_scroll_buffer_size,
            drag_scroll_reverse_x: pointing.drag_scroll_reverse_x,
            drag_scroll_reverse_y: pointing.drag_scroll_reverse_y,
            auto_sniping_layer,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ConfigError, KeyboardTomlConfig};

    const LAYOUT: &str = r#"
[layout]
rows = 1
cols = 2
layers = 3
matrix_map = "(0,0) (0,1)"

[[layer]]
name = "base"
keys = "A B"

[[layer]]
name = "pointer"
keys = "Sniping DragScroll"
"#;

    fn pointer_config(pointing: &str) -> ConfigResult<PointerConfig> {
        let config = KeyboardTomlConfig::from_toml_str(&format!("{}{}", LAYOUT, pointing))?;
        let layout = config.get_layout_config()?;
        config.get_pointer_config(&layout)
    }

    #[test]
    fn test_defaults() {
        assert_eq!(pointer_config(""), Ok(PointerConfig::new()));
        assert_eq!(pointer_config("[pointing]\n"), Ok(PointerConfig::new()));
    }

    #[test]
    fn test_partial_section() {
        let config = pointer_config(
            r#"
[pointing]
min_default_dpi = 800
drag_scroll_reverse_y = true
auto_sniping_layer = "pointer"
"#,
        )
        .unwrap();
        assert_eq!(config.min_default_dpi, 800);
        assert_eq!(config.default_dpi_steps, 16);
        assert!(config.drag_scroll_reverse_y);
        assert!(!config.drag_scroll_reverse_x);
        assert_eq!(config.auto_sniping_layer, Some(1));
    }

    #[test]
    fn test_auto_sniping_layer() {
        // Unconfigured layers can still be referenced by number
        assert_eq!(
            pointer_config("[pointing]\nauto_sniping_layer = 2\n").map(|c| c.auto_sniping_layer),
            Ok(Some(2))
        );
        assert!(matches!(
            pointer_config("[pointing]\nauto_sniping_layer = 3\n"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            pointer_config("[pointing]\nauto_sniping_layer = \"media\"\n"),
            Err(ConfigError::UnknownLayer { .. })
        ));
    }
}
