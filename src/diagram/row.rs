// WHY: one `|`-delimited row of a bit diagram maps cell widths to bit widths;
// prose annotations like "64 bits" override what the columns say

use anyhow::Result;
use regex_automata::{meta::Regex, Input};
use tracing::debug;

use super::{Field, WidthOverride};

/// Marks a field that runs past the diagram's fixed columns
pub const CONTINUATION_MARKER: &str = "...";

const BITS_ANNOTATION: &str = r"([0-9]+) bits";

/// Bit width of a cell spanning `columns` character columns (two per bit)
pub fn column_width(columns: usize) -> usize {
    (columns + 1) / 2
}

/// Lower-case a cell and strip edge whitespace and punctuation
pub fn normalize_field_name(cell: &str) -> String {
    cell.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':'))
        .to_lowercase()
}

/// Decodes single diagram rows
#[derive(Debug, Clone)]
pub struct RowDecoder {
    bits_annotation: Regex,
    overrides: Vec<WidthOverride>,
}

impl RowDecoder {
    pub fn new(overrides: Vec<WidthOverride>) -> Result<Self> {
        Ok(Self {
            bits_annotation: Regex::new(BITS_ANNOTATION)?,
            overrides,
        })
    }

    /// Decode a trimmed row starting with `|`
    ///
    /// Text before the first delimiter is ignored. Text after the last one
    /// is a field only when it carries the continuation marker.
    pub fn decode_row(&self, row: &str) -> Vec<Field> {
        let mut fields = Vec::new();
        let mut segments = row.split('|').skip(1).peekable();

        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                if let Some(marker) = segment.find(CONTINUATION_MARKER) {
                    let name = normalize_field_name(&segment[..marker]);
                    if !name.is_empty() {
                        fields.push(Field::variable(name));
                    }
                }
                break;
            }

            let name = normalize_field_name(segment);
            if name.is_empty() {
                continue;
            }
            let bit_width = self.infer_width(&name, segment.chars().count());
            if bit_width.is_none() {
                debug!("Ambiguous width for field {:?}", name);
            }
            fields.push(Field { name, bit_width });
        }

        fields
    }

    /// Bit width for a normalized name spanning `columns` columns
    ///
    /// A `N bits` annotation replaces the column width, and any override
    /// phrase found in the name adds its extra bits on top. Zero is `None`.
    pub fn infer_width(&self, name: &str, columns: usize) -> Option<u32> {
        let mut width = u32::try_from(column_width(columns)).ok()?;

        if name.bytes().any(|b| b.is_ascii_digit()) {
            if let Some(annotated) = self.annotated_bits(name) {
                width = annotated;
                for entry in &self.overrides {
                    if name.contains(entry.phrase.as_str()) {
                        width = width.saturating_add(entry.extra_bits);
                    }
                }
            }
        }

        (width > 0).then_some(width)
    }

    fn annotated_bits(&self, name: &str) -> Option<u32> {
        let mut caps = self.bits_annotation.create_captures();
        self.bits_annotation.captures(Input::new(name), &mut caps);
        let span = caps.get_group(1)?;
        name[span.start..span.end].parse().ok()
    }
}
