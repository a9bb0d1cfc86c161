use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Language used when the caller does not supply one
pub const DEFAULT_LANGUAGE_TAG: &str = "en-US";

/// Prefix of the Mandarin Chinese macrolanguage tags (e.g. "cmn-Hans-CN")
const MANDARIN_PREFIX: &str = "cmn-";

/// Regional tag that local speech engines understand for Mandarin
const MANDARIN_LOCAL_TAG: &str = "zh-CN";

/// Language tag as supplied by the caller, e.g. "fr-FR".
///
/// Kept verbatim: the remote endpoint and the speech engine decide what they
/// accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// An empty tag falls back to "en-US"; anything else is kept as given.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag to hand to the on-device speech engine.
    ///
    /// Mandarin macrolanguage tags are mapped to "zh-CN"; everything else is
    /// passed through unchanged.
    pub fn for_local_synthesis(&self) -> LanguageTag {
        if self.0.starts_with(MANDARIN_PREFIX) {
            LanguageTag(MANDARIN_LOCAL_TAG.to_string())
        } else {
            self.clone()
        }
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE_TAG.to_string())
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LanguageTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for LanguageTag {
    fn from(value: String) -> Self {
        if value.is_empty() {
            return Self::default();
        }
        Self(value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}
