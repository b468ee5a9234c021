//! Error type for keyboard.toml loading

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error
    FileRead { path: String, message: String },
    /// TOML parsing error
    TomlParse { path: String, message: String },
    /// Validation error with context
    Validation { field: String, message: String },
    /// Missing required field
    MissingField { field: String },
    /// Invalid value
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
    /// Key text that doesn't name a keycode
    UnknownKeycode { field: String, keycode: String },
    /// Layer name that isn't defined by any `[[layer]]`
    UnknownLayer { field: String, layer: String },
    /// `@name` without an entry in `[aliases]`
    UndefinedAlias { alias: String },
    /// Aliases still expand after the maximum number of rounds
    AliasDepthExceeded { keys: String, depth: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
            ConfigError::TomlParse { path, message } => {
                write!(f, "Failed to parse '{}': {}", path, message)
            }
            ConfigError::Validation { field, message } => {
                write!(f, "Validation error in '{}': {}", field, message)
            }
            ConfigError::MissingField { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::InvalidValue {
                field,
                value,
                expected,
            } => {
                write!(f, "Invalid value '{}' for '{}', expected: {}", value, field, expected)
            }
            ConfigError::UnknownKeycode { field, keycode } => {
                write!(f, "Unknown keycode '{}' in '{}'", keycode, field)
            }
            ConfigError::UnknownLayer { field, layer } => {
                write!(f, "Unknown layer '{}' in '{}'", layer, field)
            }
            ConfigError::UndefinedAlias { alias } => write!(f, "Undefined alias: {}", alias),
            ConfigError::AliasDepthExceeded { keys, depth } => write!(
                f,
                "Alias resolution exceeded maximum depth ({}), potential infinite loop detected in '{}'",
                depth, keys
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
