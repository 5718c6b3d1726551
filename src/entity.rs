//! Flattened output records and the entity trait used to serialize them.
//!
//! An [`OutputRecord`] is one row of the output table. List-valued columns are
//! encoded as compact JSON arrays so that re-parsing a cell yields the
//! original sequence, nested dialogue usages included.

use crate::usage::Usage;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for entity operations
#[derive(Debug, Clone)]
pub enum EntityError {
    /// A column could not be encoded into a cell.
    CellEncoding {
        column: &'static str,
        reason: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::CellEncoding { column, reason } => {
                write!(f, "Failed to encode column '{}': {}", column, reason)
            }
        }
    }
}

impl std::error::Error for EntityError {}

/// Core trait for tabular entities.
///
/// Implementors name their columns once and project themselves into an
/// ordered `column -> cell` map; writers rely on the order of `COLUMNS`.
pub trait Entity: Serialize + Sized {
    /// The name of this entity type
    const NAME: &'static str;

    /// Column headers, in output order.
    const COLUMNS: &'static [&'static str];

    /// Text cells keyed by column, in `COLUMNS` order.
    fn to_row(&self) -> Result<IndexMap<&'static str, String>, EntityError>;

    /// Convert entity to JSON string
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Convert entity to NDJSON line (newline-delimited JSON)
    fn to_ndjson_line(&self) -> Result<String, serde_json::Error> {
        let json = self.to_json()?;
        Ok(format!("{}\n", json))
    }
}

pub const FORM: &str = "Form";
pub const PART_OF_SPEECH: &str = "Part of Speech";
pub const KOREAN_DEFINITION: &str = "Korean Definition";
pub const ENGLISH_DEFINITION: &str = "English Definition";
pub const USAGES: &str = "Usages";
pub const VOCABULARY_LEVEL: &str = "Vocabulary Level";
pub const SEMANTIC_CATEGORY: &str = "Semantic Category";

/// One flattened lexical entry.
///
/// `korean_definitions` and `english_definitions` hold one slot per emitted
/// sense, index-aligned; a sense lacking a value contributes `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "Form")]
    pub form: Option<String>,

    #[serde(rename = "Part of Speech")]
    pub part_of_speech: Option<String>,

    #[serde(rename = "Korean Definition")]
    pub korean_definitions: Vec<Option<String>>,

    #[serde(rename = "English Definition")]
    pub english_definitions: Vec<Option<String>>,

    #[serde(rename = "Usages")]
    pub usages: Vec<Usage>,

    #[serde(rename = "Vocabulary Level")]
    pub vocabulary_level: Option<String>,

    #[serde(rename = "Semantic Category")]
    pub semantic_category: Option<String>,
}

impl Entity for OutputRecord {
    const NAME: &'static str = "OutputRecord";

    const COLUMNS: &'static [&'static str] = &[
        FORM,
        PART_OF_SPEECH,
        KOREAN_DEFINITION,
        ENGLISH_DEFINITION,
        USAGES,
        VOCABULARY_LEVEL,
        SEMANTIC_CATEGORY,
    ];

    fn to_row(&self) -> Result<IndexMap<&'static str, String>, EntityError> {
        let mut row = IndexMap::with_capacity(Self::COLUMNS.len());
        row.insert(FORM, scalar_cell(&self.form));
        row.insert(PART_OF_SPEECH, scalar_cell(&self.part_of_speech));
        row.insert(KOREAN_DEFINITION, list_cell(KOREAN_DEFINITION, &self.korean_definitions)?);
        row.insert(ENGLISH_DEFINITION, list_cell(ENGLISH_DEFINITION, &self.english_definitions)?);
        row.insert(USAGES, list_cell(USAGES, &self.usages)?);
        row.insert(VOCABULARY_LEVEL, scalar_cell(&self.vocabulary_level));
        row.insert(SEMANTIC_CATEGORY, scalar_cell(&self.semantic_category));
        Ok(row)
    }
}

fn scalar_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn list_cell<T: Serialize>(column: &'static str, items: &[T]) -> Result<String, EntityError> {
    serde_json::to_string(items).map_err(|e| EntityError::CellEncoding {
        column,
        reason: e.to_string(),
    })
}
