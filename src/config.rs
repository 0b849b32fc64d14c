// WHY: every rule table the parser consults lives in one serde struct so a
// caller can tune a document family from a TOML snippet

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagram::DecoderConfig;
use crate::error::ConfigError;
use crate::segmenter::{SectionFocus, SegmenterConfig};

/// Field-description topics containing this text are headings, not fields
pub const DEFAULT_DESCRIPTION_MARKER: &str = "descript";

/// Configuration for a whole parsing pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub segmenter: SegmenterConfig,
    pub decoder: DecoderConfig,
    pub sections: SectionFocus,
    pub description_marker: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::default(),
            decoder: DecoderConfig::default(),
            sections: SectionFocus::default(),
            description_marker: DEFAULT_DESCRIPTION_MARKER.to_string(),
        }
    }
}

impl ParserConfig {
    /// Parse from TOML; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        debug!("Loaded parser config: {:?}", config);
        Ok(config)
    }

    pub fn with_sections(mut self, sections: SectionFocus) -> Self {
        self.sections = sections;
        self
    }
}
