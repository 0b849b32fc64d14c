use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::segmenter::Paragraph;

/// Where a document stopped lining up with its topic column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misalignment {
    /// 1-based line number in the segmented text
    pub line_number: usize,
    /// Leading-whitespace columns of the offending line
    pub indentation: usize,
    /// Topic column established by the first non-blank line
    pub reference_indentation: usize,
}

impl fmt::Display for Misalignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: indentation {} is left of topic column {}",
            self.line_number, self.indentation, self.reference_indentation
        )
    }
}

/// Document-mode segmentation hit a line indented left of the topic column
///
/// The paragraphs completed before the offending line travel with the error
/// so the caller can keep working with them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("segmentation aborted at {location}")]
pub struct StructuralError {
    pub location: Misalignment,
    pub recovered: Vec<Paragraph>,
}

impl StructuralError {
    pub fn recovered(&self) -> &[Paragraph] {
        &self.recovered
    }

    pub fn into_recovered(self) -> Vec<Paragraph> {
        self.recovered
    }

    pub fn into_parts(self) -> (Misalignment, Vec<Paragraph>) {
        (self.location, self.recovered)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid parser configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
