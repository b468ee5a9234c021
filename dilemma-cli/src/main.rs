use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use dilemma_config::{KeyboardConfig, KeyboardTomlConfig, LayoutConfig};
use dilemma_keymap::action::KeyAction;
use dilemma_keymap::key_override::KeyOverride;
use dilemma_keymap::layout::NUM_KEYS;
use log::info;

mod check;

#[derive(Parser, Debug)]
#[command(name = "dilemma", about = "Check and print the Dilemma 3x5_3 keyboard.toml")]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "keyboard.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare keyboard.toml with the built-in keymap, encoder map and key overrides
    Check,
    /// Print a layer in physical order
    Layer {
        /// Layer name or number
        layer: String,
    },
    /// Print the encoder map
    Encoders,
    /// Print the key overrides
    Overrides,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = KeyboardTomlConfig::new_from_toml_path(&args.config)
        .and_then(|c| c.get_keyboard_config())
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    info!("Loaded {}", args.config.display());

    match args.command {
        Command::Check => run_check(&config),
        Command::Layer { layer } => {
            let layer = find_layer(&config.layout, &layer)?;
            println!("{}", format_layer(&config.layout, layer)?);
            Ok(())
        }
        Command::Encoders => {
            println!("{}", format_encoders(&config.layout));
            Ok(())
        }
        Command::Overrides => {
            println!("{}", format_overrides(&config.key_overrides));
            Ok(())
        }
    }
}

fn run_check(config: &KeyboardConfig) -> Result<()> {
    let mismatches = check::compare(config)?;
    for m in &mismatches {
        println!("{}", m);
    }
    if !mismatches.is_empty() {
        bail!("{} mismatches with the built-in keymap", mismatches.len());
    }
    println!("keyboard.toml matches the built-in keymap");
    Ok(())
}

fn find_layer(layout: &LayoutConfig, layer: &str) -> Result<u8> {
    if let Some(index) = layout.layer_index(layer) {
        return Ok(index);
    }
    match layer.parse::<u8>() {
        Ok(n) if n < layout.layers => Ok(n),
        _ => Err(anyhow!("No layer named or numbered '{}'", layer)),
    }
}

fn layer_title(layout: &LayoutConfig, layer: u8) -> String {
    match layout.layer_names.get(layer as usize) {
        Some(Some(name)) => format!("Layer {} ({})", layer, name),
        _ => format!("Layer {}", layer),
    }
}

/// Three rows of five keys per half, then three thumb keys per half
fn format_layer(layout: &LayoutConfig, layer: u8) -> Result<String> {
    let keys = layout
        .layer_keys(layer)
        .ok_or_else(|| anyhow!("Layer {} is not defined", layer))?;
    if keys.len() != NUM_KEYS {
        bail!("Expected {} keys in the matrix map, found {}", NUM_KEYS, keys.len());
    }
    let labels: Vec<String> = keys.iter().map(KeyAction::to_string).collect();
    let width = labels.iter().map(String::len).max().unwrap_or_default();
    let cell = |i: usize| format!("{:<width$}", labels[i], width = width);
    let half = |range: std::ops::Range<usize>| range.map(&cell).collect::<Vec<_>>().join(" ");

    let mut lines = vec![layer_title(layout, layer)];
    for row in 0..3 {
        let start = row * 10;
        lines.push(format!("{}  |  {}", half(start..start + 5), half(start + 5..start + 10)));
    }
    let indent = " ".repeat(2 * (width + 1));
    lines.push(format!("{}{}  |  {}", indent, half(30..33), half(33..36)));
    Ok(lines.join("\n"))
}

fn format_encoders(layout: &LayoutConfig) -> String {
    let Some(encoders) = &layout.encoders else {
        return "No encoders configured".to_string();
    };
    encoders
        .iter()
        .enumerate()
        .map(|(layer, actions)| {
            let text: Vec<String> = actions
                .iter()
                .enumerate()
                .map(|(i, e)| format!("#{} cw {} ccw {}", i, e.clockwise(), e.counter_clockwise()))
                .collect();
            format!("{}: {}", layer_title(layout, layer as u8), text.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_overrides(key_overrides: &[KeyOverride]) -> String {
    key_overrides
        .iter()
        .enumerate()
        .map(|(i, key_override)| format!("{}: {}", i, check::describe_override(key_override)))
        .collect::<Vec<_>>()
        .join("\n")
}
