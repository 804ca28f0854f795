use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Configuration for the in-memory engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of batch resources allocated at once.
    pub max_open_batches: usize,
    /// Largest value a single put may carry, in bytes.
    pub max_value_size: usize,
    /// Whether applied batches are kept in the engine's history log.
    pub record_history: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_open_batches: 1024,
            max_value_size: 64 * 1024 * 1024, // 64 MiB
            record_history: true,
        }
    }
}

impl EngineConfig {
    /// No practical limits and no history.
    pub fn unbounded() -> Self {
        Self {
            max_open_batches: usize::MAX,
            max_value_size: usize::MAX,
            record_history: false,
        }
    }

    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_open_batches == 0 {
            return Err(EngineError::Config(
                "max_open_batches must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
