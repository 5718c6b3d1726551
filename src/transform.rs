//! Maps one lexical entry to one flattened [`OutputRecord`].

use crate::entity::OutputRecord;
use crate::equivalent::resolve_equivalent;
use crate::extraction::Extractor;
use crate::lexicon::{LexicalEntry, OneOrMany, Sense};
use crate::runtime::config_loader::ExtractConfig;
use crate::usage::ExampleCollector;
use std::fmt;
use tracing::{debug, warn};

pub const WRITTEN_FORM: &str = "writtenForm";
pub const PART_OF_SPEECH: &str = "partOfSpeech";
pub const VOCABULARY_LEVEL: &str = "vocabularyLevel";
pub const SEMANTIC_CATEGORY: &str = "semanticCategory";
pub const DEFINITION: &str = "definition";

/// An entry whose `Sense` field is neither a list nor a single sense.
///
/// Fatal for the rest of the file the entry came from, not for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenseShapeAnomaly {
    pub entry: String,
    pub shape: &'static str,
}

impl fmt::Display for SenseShapeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {}: unexpected Sense shape '{}'",
            self.entry, self.shape
        )
    }
}

impl std::error::Error for SenseShapeAnomaly {}

/// What became of one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Emitted(OutputRecord),
    /// A lone sense without equivalents; the entry is left out.
    Skipped,
    /// Stop processing the current file.
    FatalForFile(SenseShapeAnomaly),
}

/// Builds output records from entries using the configured language,
/// example types and sentinel values.
#[derive(Debug, Clone)]
pub struct EntryTransformer {
    language: String,
    examples: ExampleCollector,
    no_part_of_speech: String,
    no_vocabulary_level: String,
}

impl Default for EntryTransformer {
    fn default() -> Self {
        Self::new(&ExtractConfig::default())
    }
}

impl EntryTransformer {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            language: config.language.clone(),
            examples: ExampleCollector::new(
                config.usage_types.iter().cloned(),
                config.dialogue_type.clone(),
            ),
            no_part_of_speech: config.no_part_of_speech.clone(),
            no_vocabulary_level: config.no_vocabulary_level.clone(),
        }
    }

    pub fn transform(&self, entry: &LexicalEntry) -> EntryOutcome {
        let senses: &[Sense] = match &entry.senses {
            OneOrMany::Many(senses) => senses,
            OneOrMany::One(sense) if sense.equivalents.is_none() => {
                debug!(entry = %entry.label(), "skipping entry whose only sense has no equivalents");
                return EntryOutcome::Skipped;
            }
            OneOrMany::One(sense) => std::slice::from_ref(sense),
            OneOrMany::Malformed(_) => {
                let anomaly = SenseShapeAnomaly {
                    entry: entry.label(),
                    shape: entry.senses.shape(),
                };
                warn!(%anomaly, "abandoning remaining entries of this file");
                return EntryOutcome::FatalForFile(anomaly);
            }
        };

        let mut record = OutputRecord {
            form: entry.lemmas.first().and_then(|lemma| lemma.feature(WRITTEN_FORM)),
            part_of_speech: without_sentinel(entry.feature(PART_OF_SPEECH), &self.no_part_of_speech),
            vocabulary_level: without_sentinel(
                entry.feature(VOCABULARY_LEVEL),
                &self.no_vocabulary_level,
            ),
            semantic_category: entry.feature(SEMANTIC_CATEGORY),
            ..OutputRecord::default()
        };

        for sense in senses {
            record.korean_definitions.push(sense.feature(DEFINITION));
            record
                .english_definitions
                .push(resolve_equivalent(sense, &self.language, DEFINITION));
            record.usages.extend(self.examples.collect(sense));
        }

        EntryOutcome::Emitted(record)
    }
}

/// Domain nulls such as "품사 없음" read as absent.
fn without_sentinel(value: Option<String>, sentinel: &str) -> Option<String> {
    value.filter(|value| value != sentinel)
}
