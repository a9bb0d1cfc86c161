use crate::domain::speech::{AudioPayload, SpeechError, SynthesisRequest};
use async_trait::async_trait;

/// Remote tier: turns a request into raw audio bytes.
///
/// Implementations own the transport-level error classification. Every
/// failure, whatever its cause, is reported as
/// [`SpeechError::SynthesisFailure`] so callers can treat them uniformly.
#[async_trait]
pub trait RemoteSynthesizer: Send + Sync {
    /// Synthesize the request's text in its language
    ///
    /// Returns the complete response body along with its declared content type
    ///
    /// # Errors
    /// `SynthesisFailure` on transport errors, non-success status, or a
    /// response that is not declared as audio
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioPayload, SpeechError>;
}
