//! Typed value extraction from attribute/value feature sets.
//!
//! A feature set is a list of `{att, val}` pairs, a single pair, or (in a
//! malformed node) anything else. Lookups never fail: a malformed set is
//! reported through `tracing` and reads as absent.

use crate::lexicon::{json_kind, Feature, FeatureSet, Features, LexicalEntry, OneOrMany, Sense};
use tracing::warn;

/// How many matching pairs a lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnMode {
    /// Value of the first matching pair; later duplicates are ignored.
    #[default]
    First,
    /// Values of every matching pair, in order.
    All,
}

/// Result of a feature lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureValue {
    Absent,
    Scalar(String),
    List(Vec<String>),
}

impl FeatureValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FeatureValue::Absent)
    }

    /// The scalar value, if this is one.
    pub fn into_scalar(self) -> Option<String> {
        match self {
            FeatureValue::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

/// Look up `attribute` in a feature set.
///
/// A list of pairs honors `mode`: `First` yields a scalar or `Absent`, `All`
/// always yields a (possibly empty) list. A single pair yields a scalar when
/// it matches, even under `ReturnMode::All`.
///
/// # Example
///
/// ```
/// use lexnom::extraction::{extract, FeatureValue, ReturnMode};
/// use lexnom::lexicon::{Feature, OneOrMany};
///
/// let features = OneOrMany::Many(vec![
///     Feature::new("partOfSpeech", "명사"),
///     Feature::new("vocabularyLevel", "고급"),
/// ]);
///
/// assert_eq!(
///     extract(&features, "partOfSpeech", ReturnMode::First),
///     FeatureValue::Scalar("명사".to_string())
/// );
/// ```
pub fn extract(features: &Features, attribute: &str, mode: ReturnMode) -> FeatureValue {
    match features {
        OneOrMany::Many(pairs) => {
            let mut matching = pairs.iter().filter(|pair| pair.attribute == attribute);
            match mode {
                ReturnMode::First => matching
                    .next()
                    .map(|pair| FeatureValue::Scalar(pair.value.clone()))
                    .unwrap_or(FeatureValue::Absent),
                ReturnMode::All => {
                    FeatureValue::List(matching.map(|pair| pair.value.clone()).collect())
                }
            }
        }
        OneOrMany::One(pair) => single_pair(pair, attribute),
        OneOrMany::Malformed(raw) => {
            warn!(
                attribute,
                shape = json_kind(raw),
                "feature set is neither a list nor a single pair"
            );
            FeatureValue::Absent
        }
    }
}

fn single_pair(pair: &Feature, attribute: &str) -> FeatureValue {
    if pair.attribute == attribute {
        FeatureValue::Scalar(pair.value.clone())
    } else {
        FeatureValue::Absent
    }
}

/// Nodes that carry a `feat` set.
pub trait Extractor {
    fn features(&self) -> &Features;

    fn extract(&self, attribute: &str, mode: ReturnMode) -> FeatureValue {
        extract(self.features(), attribute, mode)
    }

    /// First value of `attribute`, if any.
    fn feature(&self, attribute: &str) -> Option<String> {
        self.extract(attribute, ReturnMode::First).into_scalar()
    }
}

impl Extractor for FeatureSet {
    fn features(&self) -> &Features {
        &self.features
    }
}

impl Extractor for Sense {
    fn features(&self) -> &Features {
        &self.features
    }
}

impl Extractor for LexicalEntry {
    fn features(&self) -> &Features {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dialogue() -> Features {
        OneOrMany::Many(vec![
            Feature::new("type", "대화"),
            Feature::new("example", "설이 있다던데, 혹시 들은 적 있으세요?"),
            Feature::new("example", "응, 나는 그런 말 들어 본 적이 없는데."),
            Feature::new("example", "그래요?"),
        ])
    }

    #[test]
    fn test_first_match_wins() {
        let value = extract(&dialogue(), "example", ReturnMode::First);
        assert_eq!(
            value,
            FeatureValue::Scalar("설이 있다던데, 혹시 들은 적 있으세요?".to_string())
        );
    }

    #[test]
    fn test_return_all_keeps_order_and_count() {
        let features = dialogue();
        let expected = features
            .iter()
            .filter(|pair| pair.attribute == "example")
            .count();

        match extract(&features, "example", ReturnMode::All) {
            FeatureValue::List(values) => {
                assert_eq!(values.len(), expected);
                assert_eq!(values[0], "설이 있다던데, 혹시 들은 적 있으세요?");
                assert_eq!(values[2], "그래요?");
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_return_all_without_match_is_empty_list() {
        let value = extract(&dialogue(), "origin", ReturnMode::All);
        assert_eq!(value, FeatureValue::List(vec![]));
    }

    #[test]
    fn test_missing_attribute_in_list_is_absent() {
        assert!(extract(&dialogue(), "origin", ReturnMode::First).is_absent());
    }

    #[test]
    fn test_single_pair_never_returns_list() {
        let features = OneOrMany::One(Feature::new("example", "설이 나돌다."));

        for mode in [ReturnMode::First, ReturnMode::All] {
            assert_eq!(
                extract(&features, "example", mode),
                FeatureValue::Scalar("설이 나돌다.".to_string())
            );
        }
        assert!(extract(&features, "type", ReturnMode::All).is_absent());
    }

    #[test]
    fn test_malformed_set_reads_absent() {
        let features: Features = OneOrMany::Malformed(json!("not a feature set"));

        assert!(extract(&features, "definition", ReturnMode::First).is_absent());
        assert!(extract(&features, "definition", ReturnMode::All).is_absent());
    }

    #[test]
    fn test_extractor_trait_on_entry() {
        let entry: LexicalEntry = serde_json::from_value(json!({
            "feat": [
                {"att": "homonym_number", "val": "2"},
                {"att": "partOfSpeech", "val": "명사"},
                {"att": "semanticCategory", "val": "사회 생활 > 언어 행위"}
            ]
        }))
        .unwrap();

        assert_eq!(entry.feature("partOfSpeech").as_deref(), Some("명사"));
        assert_eq!(
            entry.feature("semanticCategory").as_deref(),
            Some("사회 생활 > 언어 행위")
        );
        assert_eq!(entry.feature("vocabularyLevel"), None);
    }
}
