// WHY: the semantic parser accepts seed logical forms for sentences whose
// shape already determines the relation

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ClassifiedSentence, SentenceKind};

/// Relation seeded for the semantic parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// The field takes exactly this value
    Is(String, String),
    /// One of several value associations in the same paragraph
    Associate(String, String),
    /// Pseudocode assignment
    Pseudo(String, String),
    /// Left to the semantic parser
    Unresolved,
}

impl Relation {
    /// Wire notation such as `'@Is'('code','0')`, `None` when unresolved
    pub fn notation(&self) -> Option<String> {
        let (tag, lhs, rhs) = match self {
            Self::Is(lhs, rhs) => ("@Is", lhs, rhs),
            Self::Associate(lhs, rhs) => ("@Associate", lhs, rhs),
            Self::Pseudo(lhs, rhs) => ("@Pseudo", lhs, rhs),
            Self::Unresolved => return None,
        };
        Some(format!("'{}'('{}','{}')", tag, quote(lhs), quote(rhs)))
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.notation() {
            Some(notation) => f.write_str(&notation),
            None => f.write_str("unresolved"),
        }
    }
}

fn quote(atom: &str) -> String {
    atom.replace('\'', "\\'")
}

impl ClassifiedSentence {
    /// Relation hint for this sentence in a paragraph of `paragraph_len` sentences
    pub fn relation(&self, paragraph_len: usize) -> Relation {
        let Some((lhs, rhs)) = self.parts.clone() else {
            return Relation::Unresolved;
        };
        match self.kind {
            SentenceKind::Assignment if paragraph_len <= 1 => Relation::Is(lhs, rhs),
            SentenceKind::Assignment => Relation::Associate(lhs, rhs),
            SentenceKind::Pseudocode => Relation::Pseudo(lhs, rhs),
            SentenceKind::Plain => Relation::Unresolved,
        }
    }
}
