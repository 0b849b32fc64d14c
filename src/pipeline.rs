// WHY: one pass wires segmentation, diagram decoding and classification
// together and hands the results to whatever systems sit downstream

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::classifier::{classify_field, ClassifiedSentence};
use crate::config::ParserConfig;
use crate::diagram::{contains_diagram, strip_diagram, DiagramDecoder, Field};
use crate::error::Misalignment;
use crate::records::{Environment, FieldRecord, SemanticRequest, SentenceRecord};
use crate::segmenter::{select_sections, segment_field_descriptions, Paragraph, SegmentMode, Segmenter};

/// Persists decoded fields and sentences
pub trait MetadataStore {
    fn register_field(&mut self, record: &FieldRecord) -> Result<()>;
    fn register_sentence(&mut self, record: &SentenceRecord) -> Result<()>;
}

/// Turns classified sentences into logical forms
pub trait SemanticParser {
    fn submit(&mut self, request: &SemanticRequest) -> Result<()>;
}

/// Renders a message's field schema as a record layout
pub trait HeaderSink {
    fn emit(&mut self, message_topic: &str, fields: &[Field]) -> Result<()>;
}

/// Downstream systems fed by [`Pipeline::run`]
pub struct Collaborators<'a> {
    pub metadata: &'a mut dyn MetadataStore,
    pub semantic: &'a mut dyn SemanticParser,
    pub headers: &'a mut dyn HeaderSink,
}

/// Classified description of one diagram field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescription {
    pub field_name: String,
    pub sentences: Vec<ClassifiedSentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParagraphContent {
    /// Body held a bit diagram; descriptions follow the last ruler
    Diagram {
        fields: Vec<Field>,
        descriptions: Vec<FieldDescription>,
    },
    Prose { sentences: Vec<ClassifiedSentence> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphAnalysis {
    pub paragraph: Paragraph,
    pub content: ParagraphContent,
}

impl ParagraphAnalysis {
    pub fn message_topic(&self) -> String {
        self.paragraph.topic_key()
    }

    pub fn fields(&self) -> &[Field] {
        match &self.content {
            ParagraphContent::Diagram { fields, .. } => fields.as_slice(),
            ParagraphContent::Prose { .. } => &[],
        }
    }

    pub fn field_records(&self, protocol: &str) -> Vec<FieldRecord> {
        let topic = self.message_topic();
        self.fields()
            .iter()
            .map(|field| FieldRecord::new(protocol, &topic, field))
            .collect()
    }

    /// Sentences grouped by the field they describe
    fn sentence_groups(&self) -> Vec<(String, &[ClassifiedSentence])> {
        match &self.content {
            ParagraphContent::Diagram { descriptions, .. } => descriptions
                .iter()
                .map(|d| (d.field_name.clone(), d.sentences.as_slice()))
                .collect(),
            ParagraphContent::Prose { sentences } => {
                vec![(self.message_topic(), sentences.as_slice())]
            }
        }
    }

    pub fn sentence_records(&self, protocol: &str) -> Vec<SentenceRecord> {
        let topic = self.message_topic();
        let mut records = Vec::new();
        for (field_name, sentences) in self.sentence_groups() {
            for (sentence_index, sentence) in sentences.iter().enumerate() {
                records.push(SentenceRecord {
                    protocol: protocol.to_string(),
                    message_topic: topic.clone(),
                    field_name: field_name.clone(),
                    sentence_text: sentence.text.clone(),
                    sentence_index,
                });
            }
        }
        records
    }

    pub fn semantic_requests(&self, protocol: &str) -> Vec<SemanticRequest> {
        let topic = self.message_topic();
        let mut requests = Vec::new();
        for (field_name, sentences) in self.sentence_groups() {
            let env = Environment::new(protocol, &topic, &field_name);
            for (sentence_index, sentence) in sentences.iter().enumerate() {
                requests.push(SemanticRequest {
                    env: env.clone(),
                    sentence_index,
                    sentence: sentence.clone(),
                    relation: sentence.relation(sentences.len()),
                });
            }
        }
        requests
    }
}

/// Everything extracted from one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub protocol: String,
    pub paragraphs: Vec<ParagraphAnalysis>,
    /// Set when segmentation stopped early on a misaligned line
    pub misalignment: Option<Misalignment>,
}

impl DocumentAnalysis {
    pub fn field_records(&self) -> Vec<FieldRecord> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.field_records(&self.protocol))
            .collect()
    }

    pub fn sentence_records(&self) -> Vec<SentenceRecord> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.sentence_records(&self.protocol))
            .collect()
    }

    pub fn semantic_requests(&self) -> Vec<SemanticRequest> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.semantic_requests(&self.protocol))
            .collect()
    }
}

/// Paragraphs selected from a document and where segmentation stopped, if it did
pub type SelectedParagraphs = (Vec<Paragraph>, Option<Misalignment>);

/// Configured parsing pass for one protocol's documents
#[derive(Debug, Clone)]
pub struct Pipeline {
    protocol: String,
    config: ParserConfig,
    segmenter: Segmenter,
    decoder: DiagramDecoder,
}

impl Pipeline {
    pub fn new(protocol: impl Into<String>, config: ParserConfig) -> Result<Self> {
        let protocol = protocol.into();
        info!("Creating pipeline for protocol {}", protocol);

        let segmenter = Segmenter::new(SegmentMode::Document, &config.segmenter);
        let decoder = DiagramDecoder::new(config.decoder.clone())
            .context("Failed to build diagram decoder")?;

        Ok(Self {
            protocol,
            config,
            segmenter,
            decoder,
        })
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Segment a document and narrow it to the configured sections
    ///
    /// A misaligned line does not fail the pass: the paragraphs completed
    /// before it are kept and the location is returned alongside.
    pub fn select_paragraphs(&self, document: &str) -> SelectedParagraphs {
        let (paragraphs, misalignment) = match self.segmenter.segment(document) {
            Ok(paragraphs) => (paragraphs, None),
            Err(error) => {
                warn!(%error, "Continuing with {} recovered paragraphs", error.recovered().len());
                let (location, recovered) = error.into_parts();
                (recovered, Some(location))
            }
        };

        (select_sections(paragraphs, &self.config.sections), misalignment)
    }

    /// Route one paragraph to the diagram decoder or the sentence classifier
    pub fn analyze_paragraph(&self, paragraph: Paragraph) -> ParagraphAnalysis {
        let content = if contains_diagram(&paragraph.body) {
            let fields = self.decoder.decode(&paragraph.body);
            let descriptions = if fields.is_empty() {
                Vec::new()
            } else {
                self.describe_fields(&paragraph.body)
            };
            debug!(
                "Paragraph {:?}: {} fields, {} descriptions",
                paragraph.topic,
                fields.len(),
                descriptions.len()
            );
            ParagraphContent::Diagram { fields, descriptions }
        } else {
            let sentences = classify_field(&paragraph.body, &paragraph.topic_key());
            debug!("Paragraph {:?}: {} sentences", paragraph.topic, sentences.len());
            ParagraphContent::Prose { sentences }
        };

        ParagraphAnalysis { paragraph, content }
    }

    /// Classify the field descriptions that follow a diagram
    fn describe_fields(&self, body: &str) -> Vec<FieldDescription> {
        let Some(rest) = strip_diagram(body) else {
            return Vec::new();
        };
        let marker = self.config.description_marker.to_lowercase();

        segment_field_descriptions(&rest)
            .into_iter()
            .filter(|sub| marker.is_empty() || !sub.topic_key().contains(&marker))
            .map(|sub| {
                let field_name = sub.topic_key();
                let sentences = classify_field(&sub.body, &field_name);
                FieldDescription { field_name, sentences }
            })
            .collect()
    }

    /// Analyze a document without any collaborator
    pub fn analyze(&self, document: &str) -> DocumentAnalysis {
        let (paragraphs, misalignment) = self.select_paragraphs(document);
        let paragraphs = paragraphs
            .into_iter()
            .map(|paragraph| self.analyze_paragraph(paragraph))
            .collect();

        DocumentAnalysis {
            protocol: self.protocol.clone(),
            paragraphs,
            misalignment,
        }
    }

    /// Analyze a document and forward every record to the collaborators
    ///
    /// The first collaborator error aborts the run.
    pub fn run(&self, document: &str, collaborators: &mut Collaborators<'_>) -> Result<DocumentAnalysis> {
        info!("Parsing {} document of {} bytes", self.protocol, document.len());
        let analysis = self.analyze(document);
        forward(&analysis, collaborators)?;

        info!(
            "Parsed {} paragraphs, {} fields, {} sentences",
            analysis.paragraphs.len(),
            analysis.paragraphs.iter().map(|p| p.fields().len()).sum::<usize>(),
            analysis.sentence_records().len()
        );
        Ok(analysis)
    }
}

/// Forward an analysis to the collaborators, paragraph by paragraph
pub fn forward(analysis: &DocumentAnalysis, collaborators: &mut Collaborators<'_>) -> Result<()> {
    let protocol = &analysis.protocol;

    for paragraph in &analysis.paragraphs {
        let topic = paragraph.message_topic();

        if !paragraph.fields().is_empty() {
            collaborators
                .headers
                .emit(&topic, paragraph.fields())
                .with_context(|| format!("Failed to emit header for {topic}"))?;
        }
        for record in paragraph.field_records(protocol) {
            collaborators
                .metadata
                .register_field(&record)
                .with_context(|| format!("Failed to register field {} of {}", record.field_name, topic))?;
        }
        for record in paragraph.sentence_records(protocol) {
            collaborators
                .metadata
                .register_sentence(&record)
                .with_context(|| format!("Failed to register sentence {} of {}", record.sentence_index, topic))?;
        }
        for request in paragraph.semantic_requests(protocol) {
            collaborators
                .semantic
                .submit(&request)
                .with_context(|| format!("Failed to submit sentence {} of {}", request.sentence_index, topic))?;
        }
    }

    Ok(())
}

/// Analyze paragraphs on the blocking pool, at most one per CPU at a time
///
/// Results come back in input order.
pub async fn analyze_concurrently(
    pipeline: Arc<Pipeline>,
    paragraphs: Vec<Paragraph>,
) -> Result<Vec<ParagraphAnalysis>> {
    let permits = Arc::new(Semaphore::new(num_cpus::get().max(1)));
    debug!("Analyzing {} paragraphs concurrently", paragraphs.len());

    let mut handles = Vec::with_capacity(paragraphs.len());
    for paragraph in paragraphs {
        let permit = permits
            .clone()
            .acquire_owned()
            .await
            .context("Paragraph semaphore closed")?;
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            pipeline.analyze_paragraph(paragraph)
        }));
    }

    let mut analyses = Vec::with_capacity(handles.len());
    for handle in handles {
        analyses.push(handle.await.context("Paragraph analysis task failed")?);
    }
    Ok(analyses)
}

/// Concurrent counterpart of [`Pipeline::analyze`]
pub async fn analyze_document_concurrently(
    pipeline: Arc<Pipeline>,
    document: &str,
) -> Result<DocumentAnalysis> {
    let (paragraphs, misalignment) = pipeline.select_paragraphs(document);
    let protocol = pipeline.protocol().to_string();
    let paragraphs = analyze_concurrently(pipeline, paragraphs).await?;

    Ok(DocumentAnalysis {
        protocol,
        paragraphs,
        misalignment,
    })
}
