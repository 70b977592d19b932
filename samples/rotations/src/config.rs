//! Sample configuration management.
//!
//! Key sequences are read from environment variables so the same binary can
//! replay any insertion/removal order.
//!
//! # Example
//!
//! ```text
//! AVL_DEMO_KEYS=30,10,20 AVL_DEMO_REMOVE=30 RUST_LOG=avltree=trace avl-rotations
//! ```

use std::env;

/// Default insertion order: exercises both single and double rotations.
const DEFAULT_KEYS: &str = "10,20,30,5,4,25,27,1,2,3";

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, message } => {
                write!(formatter, "Invalid value for {key}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Sample configuration.
///
/// - `keys`: keys inserted in order, each with its position as value
/// - `removals`: keys removed afterwards, in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    /// Keys to insert.
    pub keys: Vec<i64>,
    /// Keys to remove after all insertions.
    pub removals: Vec<i64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            keys: parse_keys("AVL_DEMO_KEYS", DEFAULT_KEYS).unwrap_or_default(),
            removals: Vec::new(),
        }
    }
}

impl DemoConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AVL_DEMO_KEYS`: comma-separated keys to insert (optional)
    /// - `AVL_DEMO_REMOVE`: comma-separated keys to remove (optional, default: none)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a list contains something other
    /// than integers.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`DemoConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let keys = lookup("AVL_DEMO_KEYS").unwrap_or_else(|| DEFAULT_KEYS.to_string());
        let removals = lookup("AVL_DEMO_REMOVE").unwrap_or_default();
        Ok(Self {
            keys: parse_keys("AVL_DEMO_KEYS", &keys)?,
            removals: parse_keys("AVL_DEMO_REMOVE", &removals)?,
        })
    }
}

fn parse_keys(name: &str, raw: &str) -> Result<Vec<i64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse().map_err(|error| ConfigError::InvalidValue {
                key: name.to_string(),
                message: format!("'{item}' is not an integer ({error})"),
            })
        })
        .collect()
}
