//! Usage example collection from a sense.

use crate::extraction::{Extractor, FeatureValue, ReturnMode};
use crate::lexicon::Sense;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TYPE_ATTRIBUTE: &str = "type";
pub const EXAMPLE_ATTRIBUTE: &str = "example";

/// Example types used by the corpus.
pub const PHRASE: &str = "구";
pub const SENTENCE: &str = "문장";
pub const DIALOGUE: &str = "대화";

/// One collected usage: a single example, or the ordered utterances of a dialogue.
///
/// Serializes untagged, so a list of usages reads back as JSON strings mixed
/// with JSON arrays of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Usage {
    Single(String),
    Dialogue(Vec<String>),
}

/// Collects examples of selected types from a sense's `SenseExample` field.
#[derive(Debug, Clone)]
pub struct ExampleCollector {
    target_types: IndexSet<String>,
    dialogue_type: String,
}

impl Default for ExampleCollector {
    fn default() -> Self {
        Self::new([SENTENCE, DIALOGUE], DIALOGUE)
    }
}

impl ExampleCollector {
    pub fn new<I, S>(target_types: I, dialogue_type: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_types: target_types.into_iter().map(Into::into).collect(),
            dialogue_type: dialogue_type.into(),
        }
    }

    pub fn target_types(&self) -> impl Iterator<Item = &str> {
        self.target_types.iter().map(String::as_str)
    }

    /// Usages of the targeted types, one per matching example, in corpus order.
    ///
    /// A dialogue yields all of its `example` values as one nested sequence;
    /// any other type yields its first `example`. Matching examples with no
    /// `example` value contribute nothing.
    pub fn collect(&self, sense: &Sense) -> Vec<Usage> {
        let examples = match &sense.examples {
            Some(examples) => examples,
            None => return Vec::new(),
        };

        let mut usages = Vec::new();
        for example in examples {
            let example_type = match example.feature(TYPE_ATTRIBUTE) {
                Some(example_type) if self.target_types.contains(&example_type) => example_type,
                _ => continue,
            };

            let mode = if example_type == self.dialogue_type {
                ReturnMode::All
            } else {
                ReturnMode::First
            };

            match example.extract(EXAMPLE_ATTRIBUTE, mode) {
                FeatureValue::Scalar(text) => usages.push(Usage::Single(text)),
                FeatureValue::List(utterances) => usages.push(Usage::Dialogue(utterances)),
                FeatureValue::Absent => {
                    debug!(example_type = %example_type, "sense example has no example text");
                }
            }
        }
        usages
    }
}
