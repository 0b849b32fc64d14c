// WHY: flat records are the only shapes handed across the collaborator
// boundary; they serialize the same way for every consumer

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifiedSentence, Relation, SentenceKind};
use crate::diagram::Field;

/// One decoded field of a message diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub protocol: String,
    pub message_topic: String,
    pub field_name: String,
    pub bit_width: Option<u32>,
}

impl FieldRecord {
    pub fn new(protocol: &str, message_topic: &str, field: &Field) -> Self {
        Self {
            protocol: protocol.to_string(),
            message_topic: message_topic.to_string(),
            field_name: field.name.clone(),
            bit_width: field.bit_width,
        }
    }
}

/// One sentence of a field description or prose paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub protocol: String,
    pub message_topic: String,
    pub field_name: String,
    pub sentence_text: String,
    /// Position within its paragraph, from 0
    pub sentence_index: usize,
}

/// Descriptor telling the semantic parser where a sentence came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub protocol: String,
    pub message: String,
    pub field: String,
}

impl Environment {
    pub fn new(protocol: &str, message: &str, field: &str) -> Self {
        Self {
            protocol: protocol.to_string(),
            message: message.to_string(),
            field: field.to_string(),
        }
    }

    /// Compact JSON form, `{"protocol":..,"message":..,"field":..}`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A classified sentence queued for semantic parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticRequest {
    pub env: Environment,
    pub sentence_index: usize,
    pub sentence: ClassifiedSentence,
    pub relation: Relation,
}

impl SemanticRequest {
    pub fn kind(&self) -> SentenceKind {
        self.sentence.kind
    }

    /// Seed logical form in wire notation when the shape already decides it
    pub fn seed_notation(&self) -> Option<String> {
        self.relation.notation()
    }
}
