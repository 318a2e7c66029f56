//! Engine configuration, read from TOML.
//!
//! ```toml
//! gc_frequency = 4096
//! max_call_depth = 64
//! strict_tags = false
//! default_locale = "en-US"
//! default_timezone = "UTC"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::embed::error::{EmbedError, Result};
use crate::runner::ds::heap::DEFAULT_GC_FREQUENCY;
use crate::runner::ds::realm::DEFAULT_MAX_CALL_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Steps between automatic collections. 0 turns automatic collection off.
    pub gc_frequency: usize,
    /// Shared limit for nested script calls and bridged callbacks.
    pub max_call_depth: usize,
    /// Reject malformed locale and timezone tags instead of substituting the defaults.
    pub strict_tags: bool,
    pub default_locale: String,
    pub default_timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            gc_frequency: DEFAULT_GC_FREQUENCY,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            strict_tags: false,
            default_locale: "en-US".to_string(),
            default_timezone: "UTC".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn parse(source: &str) -> Result<EngineConfig> {
        toml::from_str(source).map_err(|e| EmbedError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<EngineConfig> {
        let source = fs::read_to_string(path)
            .map_err(|e| EmbedError::Config(format!("{}: {}", path.display(), e)))?;
        EngineConfig::parse(&source)
    }
}
