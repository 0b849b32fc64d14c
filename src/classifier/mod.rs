// WHY: prose bodies carry field semantics in a few surface shapes (`a = b`,
// `a <- b`, a bare value) that can be recognized before any NLP step

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::{is_single_token, normalize};

pub mod relation;

pub use relation::Relation;

/// Marks a pseudocode assignment such as `checksum <- ones complement sum`
pub const PSEUDOCODE_TOKEN: &str = "<-";

const SENTENCE_BREAK: &str = ". ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentenceKind {
    Plain,
    Assignment,
    Pseudocode,
}

/// A sentence of a paragraph body with its surface shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSentence {
    pub text: String,
    pub kind: SentenceKind,
    /// Left and right operands of assignments and pseudocode
    pub parts: Option<(String, String)>,
}

impl ClassifiedSentence {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SentenceKind::Plain,
            parts: None,
        }
    }

    pub fn lhs(&self) -> Option<&str> {
        self.parts.as_ref().map(|(lhs, _)| lhs.as_str())
    }

    pub fn rhs(&self) -> Option<&str> {
        self.parts.as_ref().map(|(_, rhs)| rhs.as_str())
    }
}

/// Classify the sentences of a body that belongs to no particular field
pub fn classify(body: &str) -> Vec<ClassifiedSentence> {
    classify_with(body, None)
}

/// Classify a field description; a bare value becomes `Set {field} to {value}`
pub fn classify_field(body: &str, field_name: &str) -> Vec<ClassifiedSentence> {
    classify_with(body, Some(field_name))
}

fn classify_with(body: &str, field_name: Option<&str>) -> Vec<ClassifiedSentence> {
    let normalized = normalize(body);

    if let Some(field) = field_name {
        if is_single_token(&normalized) {
            debug!("Field {:?} described by single value {:?}", field, normalized);
            return vec![ClassifiedSentence {
                text: format!("Set {field} to {normalized}"),
                kind: SentenceKind::Assignment,
                parts: Some((field.to_string(), normalized)),
            }];
        }
    }

    let sentences: Vec<ClassifiedSentence> = split_sentences(&normalized)
        .into_iter()
        .map(classify_sentence)
        .collect();
    debug!("Classified {} sentences", sentences.len());
    sentences
}

/// Split normalized text into trimmed, non-empty sentences
///
/// Hard breaks separate chunks; inside a chunk every `". "` ends a sentence
/// and its period is dropped. A final period without a following space stays.
pub fn split_sentences(normalized: &str) -> Vec<&str> {
    normalized
        .split('\n')
        .filter(|chunk| !chunk.is_empty())
        .flat_map(|chunk| chunk.split(SENTENCE_BREAK))
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Classify one trimmed sentence by its first `<-` or `=`
pub fn classify_sentence(sentence: &str) -> ClassifiedSentence {
    if let Some((lhs, rhs)) = sentence.split_once(PSEUDOCODE_TOKEN) {
        return ClassifiedSentence {
            text: sentence.to_string(),
            kind: SentenceKind::Pseudocode,
            parts: Some((clean_operand(lhs), clean_operand(rhs))),
        };
    }

    let Some((lhs, rhs)) = sentence.split_once('=') else {
        return ClassifiedSentence::plain(sentence);
    };

    let (lhs_operand, rhs_operand) = (clean_operand(lhs), clean_operand(rhs));
    if is_single_token(&lhs_operand) && is_single_token(&rhs_operand) {
        return ClassifiedSentence {
            text: sentence.to_string(),
            kind: SentenceKind::Assignment,
            parts: Some((lhs_operand, rhs_operand)),
        };
    }

    ClassifiedSentence::plain(spell_out_equals(lhs, rhs))
}

/// Trim whitespace and trailing `. , ;` from an operand
fn clean_operand(operand: &str) -> String {
    operand
        .trim()
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ';'))
        .to_string()
}

/// `a = b` read aloud as `a equals b`
fn spell_out_equals(lhs: &str, rhs: &str) -> String {
    let mut text = String::with_capacity(lhs.len() + rhs.len() + 8);
    let lhs = lhs.trim_end();
    let rhs = rhs.trim_start();

    if !lhs.is_empty() {
        text.push_str(lhs);
        text.push(' ');
    }
    text.push_str("equals");
    if !rhs.is_empty() {
        text.push(' ');
        text.push_str(rhs);
    }
    text
}
