//! Foreign-language equivalent lookup within a sense.

use crate::extraction::Extractor;
use crate::lexicon::Sense;
use tracing::debug;

/// Attribute naming the language of an equivalent.
pub const LANGUAGE_ATTRIBUTE: &str = "language";

/// Read `attribute` from the first equivalent of `sense` written in `language`.
///
/// Returns `None` when the sense has no `Equivalent` field, when no equivalent
/// matches, or when the matching equivalent lacks `attribute`. A single
/// equivalent object is matched exactly like a one-element list, and the
/// value is always read from the equivalent whose language matched.
pub fn resolve_equivalent(sense: &Sense, language: &str, attribute: &str) -> Option<String> {
    let equivalents = sense.equivalents.as_ref()?;

    if equivalents.is_malformed() {
        debug!(shape = equivalents.shape(), "ignoring malformed Equivalent field");
        return None;
    }

    equivalents
        .iter()
        .find(|equivalent| equivalent.feature(LANGUAGE_ATTRIBUTE).as_deref() == Some(language))
        .and_then(|equivalent| equivalent.feature(attribute))
}
