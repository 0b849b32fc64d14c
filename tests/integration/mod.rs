// Integration test utilities and common code
// WHY: recording collaborators let tests assert on exactly what a run forwarded

#![allow(dead_code)]

use anyhow::{bail, Result};
use rfcsift::{
    Collaborators, Field, FieldRecord, HeaderSink, MetadataStore, SemanticParser, SemanticRequest,
    SentenceRecord,
};

/// Install a test-writer subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[derive(Debug, Default)]
pub struct RecordingMetadata {
    pub fields: Vec<FieldRecord>,
    pub sentences: Vec<SentenceRecord>,
}

impl MetadataStore for RecordingMetadata {
    fn register_field(&mut self, record: &FieldRecord) -> Result<()> {
        self.fields.push(record.clone());
        Ok(())
    }

    fn register_sentence(&mut self, record: &SentenceRecord) -> Result<()> {
        self.sentences.push(record.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingParser {
    pub requests: Vec<SemanticRequest>,
    /// Reject the request at this position
    pub fail_at: Option<usize>,
}

impl SemanticParser for RecordingParser {
    fn submit(&mut self, request: &SemanticRequest) -> Result<()> {
        if self.fail_at == Some(self.requests.len()) {
            bail!("parser rejected {:?}", request.sentence.text);
        }
        self.requests.push(request.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingHeaders {
    pub emitted: Vec<(String, Vec<Field>)>,
}

impl HeaderSink for RecordingHeaders {
    fn emit(&mut self, message_topic: &str, fields: &[Field]) -> Result<()> {
        self.emitted.push((message_topic.to_string(), fields.to_vec()));
        Ok(())
    }
}

/// All three recording collaborators
#[derive(Debug, Default)]
pub struct Recorder {
    pub metadata: RecordingMetadata,
    pub parser: RecordingParser,
    pub headers: RecordingHeaders,
}

impl Recorder {
    pub fn collaborators(&mut self) -> Collaborators<'_> {
        Collaborators {
            metadata: &mut self.metadata,
            semantic: &mut self.parser,
            headers: &mut self.headers,
        }
    }
}
