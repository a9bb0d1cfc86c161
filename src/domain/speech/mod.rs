pub mod error;
pub mod language;
pub mod service;

pub use error::SpeechError;
pub use language::{LanguageTag, DEFAULT_LANGUAGE_TAG};
use serde::{Deserialize, Serialize};
pub use service::{PlaybackOrchestrator, PlaybackOrchestratorApi, PlaybackOutcome};

/// A single text snippet to be spoken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    text: String,
    language_tag: LanguageTag,
}

impl SynthesisRequest {
    /// Build a request, rejecting blank text.
    /// A missing or empty tag means "en-US".
    pub fn new(text: impl Into<String>, language_tag: Option<&str>) -> Result<Self, SpeechError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SpeechError::InvalidRequest(
                "Text cannot be empty".to_string(),
            ));
        }

        let language_tag = match language_tag {
            Some(raw) => LanguageTag::parse(raw),
            None => LanguageTag::default(),
        };

        Ok(Self { text, language_tag })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_tag(&self) -> &LanguageTag {
        &self.language_tag
    }
}

/// JSON body sent to the remote synthesis endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoteSynthesisBody {
    pub text: String,
    pub lang: String,
}

impl From<&SynthesisRequest> for RemoteSynthesisBody {
    fn from(request: &SynthesisRequest) -> Self {
        Self {
            text: request.text.clone(),
            lang: request.language_tag.to_string(),
        }
    }
}

/// Raw audio returned by the remote tier.
///
/// Deliberately not `Clone`: the synthesizer hands it to the playback adapter,
/// which becomes its sole owner.
#[derive(Debug)]
pub struct AudioPayload {
    bytes: Vec<u8>,
    content_type: String,
}

impl AudioPayload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// Content type the server declared (always contains "audio/")
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
