// WHY: packet layouts in RFCs live in ASCII bit diagrams framed by `+-+-`
// rulers; decoding them yields the field schema of a message

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

pub mod layout;
pub mod row;

pub use layout::{render_diagram, FieldLayout, PlacedField};
pub use row::{column_width, normalize_field_name, RowDecoder, CONTINUATION_MARKER};

/// Header length added to "internet header + N bits" fields
pub const IPV4_HEADER_BITS: u32 = 160;

/// One field of a decoded diagram
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// `None` for variable-length tails and undeterminable widths
    pub bit_width: Option<u32>,
}

impl Field {
    pub fn fixed(name: impl Into<String>, bit_width: u32) -> Self {
        Self {
            name: name.into(),
            bit_width: Some(bit_width),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bit_width: None,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.bit_width.is_none()
    }
}

/// Extra bits for fields whose name mentions an implied structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthOverride {
    /// Lower-case phrase searched for in the normalized field name
    pub phrase: String,
    pub extra_bits: u32,
}

/// Configuration for diagram decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub width_overrides: Vec<WidthOverride>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            width_overrides: vec![WidthOverride {
                phrase: "internet header".to_string(),
                extra_bits: IPV4_HEADER_BITS,
            }],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Searching,
    InDiagram,
}

/// Ruler-driven diagram decoder
#[derive(Debug, Clone)]
pub struct DiagramDecoder {
    rows: RowDecoder,
}

impl DiagramDecoder {
    pub fn new(config: DecoderConfig) -> Result<Self> {
        info!(
            "Creating diagram decoder with {} width overrides",
            config.width_overrides.len()
        );
        Ok(Self {
            rows: RowDecoder::new(config.width_overrides)?,
        })
    }

    pub fn row_decoder(&self) -> &RowDecoder {
        &self.rows
    }

    /// Decode every field of the last diagram in `body`
    ///
    /// A ruler reached from the searching state discards fields collected
    /// so far, so only the final diagram of a body survives.
    pub fn decode(&self, body: &str) -> Vec<Field> {
        let mut state = DecoderState::Searching;
        let mut fields = Vec::new();

        for line in body.lines().map(str::trim) {
            match state {
                DecoderState::Searching => {
                    if is_ruler(line) {
                        fields.clear();
                        state = DecoderState::InDiagram;
                    }
                }
                DecoderState::InDiagram => {
                    if line.is_empty() {
                        state = DecoderState::Searching;
                    } else if line.starts_with('|') {
                        fields.extend(self.rows.decode_row(line));
                    }
                }
            }
        }

        debug!("Decoded {} fields", fields.len());
        fields
    }
}

fn default_decoder() -> Option<&'static DiagramDecoder> {
    static DEFAULT: OnceLock<Option<DiagramDecoder>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| match DiagramDecoder::new(DecoderConfig::default()) {
            Ok(decoder) => Some(decoder),
            Err(error) => {
                warn!(%error, "Default diagram decoder unavailable");
                None
            }
        })
        .as_ref()
}

/// Decode a paragraph body with the default width overrides
pub fn decode(body: &str) -> Vec<Field> {
    default_decoder()
        .map(|decoder| decoder.decode(body))
        .unwrap_or_default()
}

/// Check if a line is a bit ruler such as `+-+-+-+`
pub fn is_ruler(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("+-+-") && line.chars().all(|c| matches!(c, '+' | '-'))
}

pub fn contains_diagram(body: &str) -> bool {
    body.lines().any(is_ruler)
}

/// Text following the last ruler of `body`, `None` without a ruler
pub fn strip_diagram(body: &str) -> Option<String> {
    let lines: Vec<&str> = body.lines().collect();
    let last_ruler = lines.iter().rposition(|line| is_ruler(line))?;

    let mut rest = String::new();
    for line in &lines[last_ruler + 1..] {
        rest.push_str(line);
        rest.push('\n');
    }
    Some(rest)
}
