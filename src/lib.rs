//! # Lexnom: Dictionary Corpus Flattening
//!
//! Lexnom reads dictionary corpora encoded in a generic attribute/value
//! format and flattens each headword into one tabular record.
//!
//! ## Input shape
//!
//! Every node carries its data as `{"att": ..., "val": ...}` pairs under a
//! `feat` key, either as a list or, when there is only one pair, as a bare
//! object. Nested collections use the same list-or-single encoding:
//!
//! ```json
//! {"LexicalResource": {"Lexicon": {"LexicalEntry": [{
//!     "Lemma": {"feat": {"att": "writtenForm", "val": "설"}},
//!     "feat": [{"att": "partOfSpeech", "val": "명사"}],
//!     "Sense": {
//!         "feat": {"att": "definition", "val": "소문"},
//!         "Equivalent": {"feat": [
//!             {"att": "language", "val": "영어"},
//!             {"att": "definition", "val": "rumor"}
//!         ]},
//!         "SenseExample": {"feat": [
//!             {"att": "type", "val": "문장"},
//!             {"att": "example", "val": "설이 나돌다."}
//!         ]}
//!     }
//! }]}}}
//! ```
//!
//! ## Output
//!
//! One row per entry with the columns `Form, Part of Speech, Korean Definition,
//! English Definition, Usages, Vocabulary Level, Semantic Category`. List
//! columns hold JSON arrays; dialogue usages are nested arrays.
//!
//! ## Example
//!
//! ```ignore
//! use lexnom::runtime::{run, ExtractConfig};
//!
//! let config = ExtractConfig::load_from_file("lexnom.yaml")?;
//! let summary = run(&config)?;
//! println!("{}", summary);
//! ```

// Corpus model and feature lookup
pub mod lexicon;
pub mod extraction;

// Per-sense resolvers
pub mod equivalent;
pub mod usage;

// Records and entry mapping
pub mod entity;
pub mod transform;
pub mod serialization;

// Configuration and file-level driver
pub mod runtime;

// Re-export key types
pub use entity::{Entity, EntityError, OutputRecord};
pub use equivalent::resolve_equivalent;
pub use extraction::{extract, Extractor, FeatureValue, ReturnMode};
pub use lexicon::{Feature, FeatureSet, LexicalEntry, LexiconDocument, OneOrMany, Sense};
pub use transform::{EntryOutcome, EntryTransformer, SenseShapeAnomaly};
pub use usage::{ExampleCollector, Usage};

pub use runtime::{ExtractConfig, OutputFormat, PipelineError, RunSummary};
