#![allow(dead_code)]

use dilemma_config::KeyboardTomlConfig;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// The keyboard.toml at the workspace root
pub const KEYBOARD_TOML: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../keyboard.toml");

pub fn load_keyboard_toml() -> KeyboardTomlConfig {
    KeyboardTomlConfig::new_from_toml_path(KEYBOARD_TOML).unwrap()
}

/// A one-row board with `n` keys and `num_layers` layers, followed by `rest`
pub fn small_board(n: usize, num_layers: u8, rest: &str) -> String {
    let matrix_map: Vec<String> = (0..n).map(|c| format!("(0,{})", c)).collect();
    format!(
        "[layout]\nrows = 1\ncols = {}\nlayers = {}\nmatrix_map = \"{}\"\n{}",
        n,
        num_layers,
        matrix_map.join(" "),
        rest
    )
}
