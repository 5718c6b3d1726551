//! Serde model of the attribute/value dictionary corpus.
//!
//! Every node in the corpus carries its scalar data under a `feat` key holding
//! `{"att": ..., "val": ...}` pairs. Nested collections (Lemma, Sense,
//! Equivalent, SenseExample, LexicalEntry) use the same list-or-single
//! encoding, so they all deserialize through [`OneOrMany`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// A field that the corpus encodes as a list when it has several members and
/// as a bare object when it has exactly one.
///
/// Anything else (a string, a number, `null`, a missing key, or a list or
/// object whose contents do not fit `T`) lands in `Malformed`, so one bad node
/// never fails the whole document.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
    Malformed(JsonValue),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Malformed(JsonValue::Null)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The JSON type decides the shape; an untagged enum would let a
        // struct swallow a short array.
        let raw = JsonValue::deserialize(deserializer)?;
        let parsed = match &raw {
            JsonValue::Array(_) => Vec::<T>::deserialize(&raw).map(OneOrMany::Many).ok(),
            JsonValue::Object(_) => T::deserialize(&raw).map(OneOrMany::One).ok(),
            _ => None,
        };
        Ok(parsed.unwrap_or(OneOrMany::Malformed(raw)))
    }
}

impl<T> OneOrMany<T> {
    /// Members in corpus order; a single object is a one-element slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => std::slice::from_ref(item),
            OneOrMany::Malformed(_) => &[],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, OneOrMany::Malformed(_))
    }

    /// Short description of the physical shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            OneOrMany::Many(_) => "list",
            OneOrMany::One(_) => "object",
            OneOrMany::Malformed(raw) => json_kind(raw),
        }
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Name of a JSON value's type, with `null` standing in for a missing field.
pub fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// One `(attribute, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Feature {
    #[serde(rename = "att")]
    pub attribute: String,
    #[serde(rename = "val")]
    pub value: String,
}

impl Feature {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.attribute, self.value)
    }
}

/// The `feat` payload of a node. Stored as pairs, not a map: attributes repeat
/// (a dialogue has one `example` per utterance).
pub type Features = OneOrMany<Feature>;

/// A node that carries nothing but features: Lemma, Equivalent, SenseExample.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureSet {
    #[serde(rename = "feat", default)]
    pub features: Features,
}

impl FeatureSet {
    pub fn new(features: Features) -> Self {
        Self { features }
    }
}

/// One meaning of a headword.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sense {
    #[serde(rename = "feat", default)]
    pub features: Features,

    /// Foreign-language renderings. `None` when the key is absent or null.
    #[serde(rename = "Equivalent", default)]
    pub equivalents: Option<OneOrMany<FeatureSet>>,

    #[serde(rename = "SenseExample", default)]
    pub examples: Option<OneOrMany<FeatureSet>>,
}

/// One dictionary headword.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LexicalEntry {
    /// Corpus identifier of the entry; only used to label diagnostics.
    #[serde(rename = "val", default)]
    pub id: Option<JsonValue>,

    #[serde(rename = "feat", default)]
    pub features: Features,

    #[serde(rename = "Lemma", default)]
    pub lemmas: OneOrMany<FeatureSet>,

    #[serde(rename = "Sense", default)]
    pub senses: OneOrMany<Sense>,
}

impl LexicalEntry {
    /// Identifier rendered for log lines, `?` when the entry has none.
    pub fn label(&self) -> String {
        match &self.id {
            Some(JsonValue::String(id)) => id.clone(),
            Some(JsonValue::Null) | None => "?".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Root of one corpus file: `{LexicalResource: {Lexicon: {LexicalEntry: ...}}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LexiconDocument {
    #[serde(rename = "LexicalResource")]
    pub resource: LexicalResource,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LexicalResource {
    #[serde(rename = "Lexicon")]
    pub lexicon: Lexicon,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lexicon {
    #[serde(rename = "LexicalEntry")]
    pub entries: OneOrMany<LexicalEntry>,
}

impl LexiconDocument {
    pub fn entries(&self) -> &OneOrMany<LexicalEntry> {
        &self.resource.lexicon.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_features_list_shape() {
        let set: FeatureSet = serde_json::from_value(json!({
            "feat": [
                {"att": "type", "val": "문장"},
                {"att": "example", "val": "설이 나돌다."}
            ]
        }))
        .unwrap();

        assert_eq!(set.features.shape(), "list");
        assert_eq!(set.features.as_slice().len(), 2);
        assert_eq!(set.features.as_slice()[1], Feature::new("example", "설이 나돌다."));
    }

    #[test]
    fn test_features_single_pair_shape() {
        let set: FeatureSet =
            serde_json::from_value(json!({"feat": {"att": "writtenForm", "val": "설"}})).unwrap();

        assert_eq!(set.features, OneOrMany::One(Feature::new("writtenForm", "설")));
        assert_eq!(set.features.iter().count(), 1);
    }

    #[test]
    fn test_missing_and_odd_shapes_are_malformed() {
        let missing: FeatureSet = serde_json::from_value(json!({})).unwrap();
        assert!(missing.features.is_malformed());
        assert_eq!(missing.features.shape(), "null");

        let text: FeatureSet = serde_json::from_value(json!({"feat": "oops"})).unwrap();
        assert!(text.features.is_malformed());
        assert_eq!(text.features.shape(), "string");
        assert!(text.features.first().is_none());
    }

    #[test]
    fn test_list_with_bad_member_is_malformed() {
        let set: FeatureSet = serde_json::from_value(json!({
            "feat": [{"att": "type", "val": "문장"}, {"att": "example"}]
        }))
        .unwrap();
        assert_eq!(set.features.shape(), "array");

        let short: FeatureSet = serde_json::from_value(json!({"feat": ["type", "문장"]})).unwrap();
        assert!(short.features.is_malformed());
    }

    #[test]
    fn test_sense_without_equivalent() {
        let sense: Sense = serde_json::from_value(json!({
            "feat": {"att": "definition", "val": "소문"},
            "Equivalent": null
        }))
        .unwrap();

        assert!(sense.equivalents.is_none());
        assert!(sense.examples.is_none());
    }

    #[test]
    fn test_document_single_entry() {
        let doc: LexiconDocument = serde_json::from_value(json!({
            "LexicalResource": {"Lexicon": {"LexicalEntry": {
                "val": "63211",
                "Lemma": {"feat": {"att": "writtenForm", "val": "설"}},
                "Sense": {"feat": {"att": "definition", "val": "소문"}},
                "feat": {"att": "partOfSpeech", "val": "명사"}
            }}}
        }))
        .unwrap();

        let entries = doc.entries();
        assert_eq!(entries.shape(), "object");
        assert_eq!(entries.first().unwrap().label(), "63211");
    }

    #[test]
    fn test_entry_label_falls_back() {
        let entry = LexicalEntry::default();
        assert_eq!(entry.label(), "?");

        let numeric = LexicalEntry {
            id: Some(json!(42)),
            ..LexicalEntry::default()
        };
        assert_eq!(numeric.label(), "42");
    }
}
