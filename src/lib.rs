pub mod classifier;
pub mod config;
pub mod diagram;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod records;
pub mod segmenter;

// Re-export the component entry points
pub use classifier::{classify, classify_field, ClassifiedSentence, Relation, SentenceKind};
pub use diagram::{decode, render_diagram, DecoderConfig, DiagramDecoder, Field, FieldLayout};
pub use normalize::{normalize, normalize_into};
pub use segmenter::{
    segment, segment_field_descriptions, select_sections, Paragraph, SectionFocus, Segmenter,
};

// Re-export orchestration and boundary types
pub use config::ParserConfig;
pub use error::{ConfigError, Misalignment, StructuralError};
pub use pipeline::{
    analyze_concurrently, analyze_document_concurrently, Collaborators, DocumentAnalysis,
    HeaderSink, MetadataStore, ParagraphAnalysis, ParagraphContent, Pipeline, SemanticParser,
};
pub use records::{Environment, FieldRecord, SemanticRequest, SentenceRecord};
