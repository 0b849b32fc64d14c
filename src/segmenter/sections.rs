// WHY: RFC front matter and the references tail carry no protocol content;
// callers usually want only the body between them, or one named section

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Paragraph;

/// Which part of a segmented document to keep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionFocus {
    All,
    /// From the last introduction/overview topic through the last references topic
    #[default]
    Body,
    /// The last paragraph whose topic contains this text, case-insensitively
    Named(String),
}

/// Narrow paragraphs to the sections selected by `focus`
///
/// Missing markers leave the corresponding end untouched, and a `Named`
/// focus that matches nothing keeps every paragraph.
pub fn select_sections(mut paragraphs: Vec<Paragraph>, focus: &SectionFocus) -> Vec<Paragraph> {
    let before = paragraphs.len();

    match focus {
        SectionFocus::All => {}
        SectionFocus::Body => {
            let intro = last_topic_position(&paragraphs, |topic| {
                topic.contains("Intro") || topic.contains("Overview")
            });
            let refer = last_topic_position(&paragraphs, |topic| topic.contains("Refer"));

            if let Some(refer) = refer {
                paragraphs.truncate(refer + 1);
            }
            if let Some(intro) = intro.filter(|&intro| intro < paragraphs.len()) {
                paragraphs.drain(..intro);
            }
        }
        SectionFocus::Named(name) => {
            let needle = name.to_lowercase();
            let found = last_topic_position(&paragraphs, |topic| {
                topic.to_lowercase().contains(&needle)
            });
            if let Some(index) = found {
                let kept = paragraphs.swap_remove(index);
                paragraphs = vec![kept];
            }
        }
    }

    debug!("Section focus {:?} kept {} of {} paragraphs", focus, paragraphs.len(), before);
    paragraphs
}

fn last_topic_position(paragraphs: &[Paragraph], matches: impl Fn(&str) -> bool) -> Option<usize> {
    paragraphs.iter().rposition(|paragraph| matches(&paragraph.topic))
}
