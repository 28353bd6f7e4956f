//! Window and store configuration, loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default number of tuple slots per storage block.
pub const DEFAULT_TUPLES_PER_BLOCK: usize = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Storage geometry for a record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Tuple slots allocated per block.
    pub tuples_per_block: usize,
    /// Upper bound on allocated blocks. `None` means unbounded.
    pub max_blocks: Option<usize>,
    /// Whether the table streams inserts to an export sink.
    pub export_enabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tuples_per_block: DEFAULT_TUPLES_PER_BLOCK,
            max_blocks: None,
            export_enabled: false,
        }
    }
}

impl StoreConfig {
    /// Maximum number of live records, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.max_blocks
            .map(|blocks| blocks.saturating_mul(self.tuples_per_block))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tuples_per_block == 0 {
            return Err(ConfigError::Invalid(
                "store.tuples_per_block must be positive".to_string(),
            ));
        }
        if self.max_blocks == Some(0) {
            return Err(ConfigError::Invalid(
                "store.max_blocks must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sizing policy for one window table.
///
/// `window_size` bounds the confirmed window members; `slide_size` is the
/// number of staged records that triggers a slide. Both are fixed for the
/// lifetime of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub window_size: usize,
    pub slide_size: usize,
    /// Downstream triggers are attached to this table.
    #[serde(default)]
    pub has_triggers: bool,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            slide_size: 10,
            has_triggers: false,
            store: StoreConfig::default(),
        }
    }
}

impl WindowConfig {
    pub fn new(window_size: usize, slide_size: usize) -> Self {
        Self {
            window_size,
            slide_size,
            ..Self::default()
        }
    }

    /// Builder: mark the table as having downstream triggers
    pub fn with_triggers(mut self, has_triggers: bool) -> Self {
        self.has_triggers = has_triggers;
        self
    }

    /// Builder: replace the store geometry
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Reject sizes the slide algorithm cannot work with.
    ///
    /// A slide larger than the window is accepted: staged records are then
    /// evicted before they are ever confirmed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::Invalid(
                "window_size must be positive".to_string(),
            ));
        }
        if self.slide_size == 0 {
            return Err(ConfigError::Invalid("slide_size must be positive".to_string()));
        }
        if self.slide_size > self.window_size {
            tracing::warn!(
                window_size = self.window_size,
                slide_size = self.slide_size,
                "slide_size exceeds window_size; staged records will be evicted unseen"
            );
        }
        self.store.validate()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: WindowConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
