// WHY: indentation is the only structure plain-text RFCs reliably carry;
// topics sit on a reference column and their bodies are indented past it

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::error::{Misalignment, StructuralError};

pub mod boilerplate;
pub mod sections;

pub use boilerplate::{BoilerplateFilter, DEFAULT_BOILERPLATE_MARKERS};
pub use sections::{select_sections, SectionFocus};

/// A topic line and the indented body beneath it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Paragraph {
    /// Latest line seen at the reference column, trimmed
    pub topic: String,
    /// Indented lines, verbatim and newline-joined, trailing blank lines trimmed
    pub body: String,
}

impl Paragraph {
    pub fn new(topic: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            body: body.into(),
        }
    }

    /// Check if the topic carries any text
    pub fn has_topic(&self) -> bool {
        !self.topic.trim().is_empty()
    }

    /// Lower-cased topic, the key under which downstream systems file it
    pub fn topic_key(&self) -> String {
        self.topic.trim().to_lowercase()
    }
}

/// Input filtering and error policy of a segmentation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
    /// Whole documents: boilerplate filtered, a line left of the topic column aborts
    Document,
    /// Field-description blocks: no filter, a line left of the topic column re-anchors it
    FieldDescription,
}

/// Configuration for document segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Lines containing any of these substrings are dropped in document mode
    pub boilerplate_markers: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            boilerplate_markers: DEFAULT_BOILERPLATE_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }
}

/// Indentation-driven paragraph segmenter
#[derive(Debug, Clone)]
pub struct Segmenter {
    mode: SegmentMode,
    filter: Option<BoilerplateFilter>,
}

impl Segmenter {
    pub fn new(mode: SegmentMode, config: &SegmenterConfig) -> Self {
        let filter = match mode {
            SegmentMode::Document => Some(BoilerplateFilter::with_markers(
                config.boilerplate_markers.iter().cloned(),
            )),
            SegmentMode::FieldDescription => None,
        };
        Self { mode, filter }
    }

    /// Document-mode segmenter with the default boilerplate markers
    pub fn document() -> Self {
        Self::new(SegmentMode::Document, &SegmenterConfig::default())
    }

    pub fn field_descriptions() -> Self {
        Self::new(SegmentMode::FieldDescription, &SegmenterConfig::default())
    }

    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    /// Split text into paragraphs
    ///
    /// Only document mode can fail; the error carries every paragraph
    /// completed before the misaligned line.
    pub fn segment(&self, text: &str) -> Result<Vec<Paragraph>, StructuralError> {
        debug!("Segmenting {} bytes in {:?} mode", text.len(), self.mode);

        let mut state = IndentState::default();

        for (index, line) in text.lines().enumerate() {
            if let Some(filter) = &self.filter {
                if filter.is_boilerplate(line) {
                    continue;
                }
            }

            state.record_flat(line);

            let Some(indent) = leading_columns(line) else {
                state.blank_line();
                continue;
            };

            let reference = match state.reference {
                Some(reference) => reference,
                None => state.anchor(line, indent),
            };

            match indent.cmp(&reference) {
                Ordering::Equal => state.topic_line(line, reference),
                Ordering::Greater => state.body_line(line),
                Ordering::Less => match self.mode {
                    SegmentMode::Document => {
                        state.shifted = true;
                        let location = Misalignment {
                            line_number: index + 1,
                            indentation: indent,
                            reference_indentation: reference,
                        };
                        warn!(%location, "Aborting segmentation on misaligned line");
                        return Err(StructuralError {
                            location,
                            recovered: state.finish(),
                        });
                    }
                    SegmentMode::FieldDescription => {
                        state.shifted = true;
                        state.flush();
                        state.anchor(line, indent);
                    }
                },
            }

            state.last_indent = indent;
        }

        let paragraphs = state.finish();
        debug!("Segmented {} paragraphs", paragraphs.len());
        Ok(paragraphs)
    }
}

/// Segment a whole document with the default boilerplate markers
pub fn segment(text: &str) -> Result<Vec<Paragraph>, StructuralError> {
    Segmenter::document().segment(text)
}

/// Segment a field-description block; never fails
pub fn segment_field_descriptions(text: &str) -> Vec<Paragraph> {
    Segmenter::field_descriptions()
        .segment(text)
        .unwrap_or_else(StructuralError::into_recovered)
}

/// Leading-whitespace column count, `None` for blank lines
///
/// Spaces and tabs count as one column each.
pub fn leading_columns(line: &str) -> Option<usize> {
    if line.trim().is_empty() {
        return None;
    }
    Some(line.chars().take_while(|c| matches!(c, ' ' | '\t')).count())
}

/// State machine shared by both segmentation modes
#[derive(Debug, Default)]
struct IndentState {
    reference: Option<usize>,
    last_indent: usize,
    topic: String,
    body: String,
    allow_blank: bool,
    last_was_blank: bool,
    seen_body: bool,
    /// A line fell left of the reference column
    shifted: bool,
    /// Lines kept until the first body line proves the text is indented
    flat_lines: Vec<String>,
    paragraphs: Vec<Paragraph>,
}

impl IndentState {
    /// Make this line's column the reference and the line itself the topic
    fn anchor(&mut self, line: &str, indent: usize) -> usize {
        self.reference = Some(indent);
        self.last_indent = indent;
        self.topic = line.trim().to_string();
        indent
    }

    fn topic_line(&mut self, line: &str, reference: usize) {
        // a topic after body lines starts a sibling, consecutive topic lines
        // collapse to the latest one
        if self.last_indent != reference {
            self.flush();
        }
        self.topic = line.trim().to_string();
    }

    fn record_flat(&mut self, line: &str) {
        if self.seen_body || (self.flat_lines.is_empty() && line.trim().is_empty()) {
            return;
        }
        self.flat_lines.push(line.to_string());
    }

    fn body_line(&mut self, line: &str) {
        if !self.seen_body {
            self.seen_body = true;
            self.flat_lines = Vec::new();
        }
        self.body.push_str(line);
        self.body.push('\n');
        self.allow_blank = true;
        self.last_was_blank = false;
    }

    fn blank_line(&mut self) {
        if self.allow_blank && !self.last_was_blank {
            self.body.push('\n');
            self.last_was_blank = true;
        }
    }

    fn flush(&mut self) {
        if !self.body.is_empty() {
            let body = self.body.trim_end_matches('\n').to_string();
            self.paragraphs.push(Paragraph {
                topic: std::mem::take(&mut self.topic),
                body,
            });
        }
        self.body.clear();
        self.allow_blank = false;
        self.last_was_blank = false;
    }

    /// Text without a single indented line: first line is the topic, the rest its body
    fn flat_paragraph(&self) -> Option<Paragraph> {
        let (topic, rest) = self.flat_lines.split_first()?;
        let mut body = String::new();
        let mut last_was_blank = false;
        for line in rest {
            if line.trim().is_empty() {
                if !body.is_empty() && !last_was_blank {
                    body.push('\n');
                    last_was_blank = true;
                }
            } else {
                body.push_str(line);
                body.push('\n');
                last_was_blank = false;
            }
        }
        Some(Paragraph {
            topic: topic.trim().to_string(),
            body: body.trim_end_matches('\n').to_string(),
        })
    }

    fn finish(mut self) -> Vec<Paragraph> {
        self.flush();
        // only text that never left the reference column is flat
        if !self.seen_body && !self.shifted {
            if let Some(paragraph) = self.flat_paragraph() {
                self.paragraphs.push(paragraph);
            }
        }
        self.paragraphs
    }
}
