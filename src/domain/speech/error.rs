#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    /// Remote endpoint unreachable, non-2xx, or not audio
    #[error("synthesis failure: {0}")]
    SynthesisFailure(String),
    /// Media engine could not start or finish playing the remote audio
    #[error("playback failure: {0}")]
    PlaybackFailure(String),
    /// No on-device speech engine in this environment
    #[error("unsupported capability: {0}")]
    UnsupportedCapability(String),
    /// On-device engine reported an utterance error
    #[error("local synthesis failure: {0}")]
    LocalSynthesisFailure(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl SpeechError {
    /// Remote-tier failures are absorbed by the orchestrator and switch it to
    /// local synthesis. Everything else is terminal.
    pub fn is_fallback_trigger(&self) -> bool {
        matches!(
            self,
            SpeechError::SynthesisFailure(_) | SpeechError::PlaybackFailure(_)
        )
    }
}
