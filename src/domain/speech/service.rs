use super::error::SpeechError;
use super::SynthesisRequest;
use crate::infrastructure::playback::AudioPlaybackAdapter;
use crate::infrastructure::repositories::RemoteSynthesizer;
use crate::infrastructure::speech::LocalSynthesisAdapter;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Which tier ended up speaking the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Remote,
    Local,
}

impl std::fmt::Display for PlaybackOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackOutcome::Remote => write!(f, "remote"),
            PlaybackOutcome::Local => write!(f, "local"),
        }
    }
}

pub struct PlaybackOrchestrator {
    synthesizer: Arc<dyn RemoteSynthesizer>,
    playback: Arc<AudioPlaybackAdapter>,
    local: Arc<LocalSynthesisAdapter>,
}

impl PlaybackOrchestrator {
    pub fn new(
        synthesizer: Arc<dyn RemoteSynthesizer>,
        playback: Arc<AudioPlaybackAdapter>,
        local: Arc<LocalSynthesisAdapter>,
    ) -> Self {
        Self {
            synthesizer,
            playback,
            local,
        }
    }
}

#[async_trait]
pub trait PlaybackOrchestratorApi: Send + Sync {
    /// Speak `text` in `language_tag` (default "en-US")
    ///
    /// This operation:
    /// - Synthesizes the text remotely and plays the returned audio
    /// - Falls back to local speech if either remote step fails
    ///
    /// Resolves once audio was heard from either tier. On total failure the
    /// error is the local tier's; the remote failure is only logged.
    async fn play_text(&self, text: &str, language_tag: Option<&str>) -> Result<(), SpeechError>;
}

#[async_trait]
impl PlaybackOrchestratorApi for PlaybackOrchestrator {
    async fn play_text(&self, text: &str, language_tag: Option<&str>) -> Result<(), SpeechError> {
        self.play_text_with_outcome(text, language_tag)
            .await
            .map(|_| ())
    }
}

impl PlaybackOrchestrator {
    /// Same as `play_text`, but reports which tier spoke
    pub async fn play_text_with_outcome(
        &self,
        text: &str,
        language_tag: Option<&str>,
    ) -> Result<PlaybackOutcome, SpeechError> {
        let request = SynthesisRequest::new(text, language_tag).map_err(|e| {
            tracing::warn!(error = %e, "Rejecting TTS request");
            e
        })?;
        self.play_request(&request).await
    }

    /// Run the fallback state machine for an already validated request
    pub async fn play_request(
        &self,
        request: &SynthesisRequest,
    ) -> Result<PlaybackOutcome, SpeechError> {
        let span = tracing::info_span!(
            "play_text",
            call_id = %Uuid::new_v4(),
            lang = %request.language_tag(),
        );

        async move {
            tracing::info!(text_length = request.text().len(), "Starting TTS playback");

            let remote_error = match self.remote_attempt(request).await {
                Ok(()) => {
                    tracing::info!(tier = %PlaybackOutcome::Remote, "TTS playback succeeded");
                    return Ok(PlaybackOutcome::Remote);
                }
                Err(err) => err,
            };

            tracing::warn!(
                error = %remote_error,
                "Remote TTS failed, falling back to local speech synthesis"
            );

            match self.local.speak(request.text(), request.language_tag()).await {
                Ok(()) => {
                    tracing::info!(tier = %PlaybackOutcome::Local, "TTS playback succeeded");
                    Ok(PlaybackOutcome::Local)
                }
                Err(local_error) => {
                    tracing::error!(
                        error = %local_error,
                        remote_error = %remote_error,
                        "TTS playback failed on both tiers"
                    );
                    Err(local_error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Synthesize then play; any failure on this path means "fall back"
    async fn remote_attempt(&self, request: &SynthesisRequest) -> Result<(), SpeechError> {
        let payload = self.synthesizer.synthesize(request).await?;
        tracing::debug!(
            audio_size = payload.len(),
            content_type = %payload.content_type(),
            "Remote audio synthesized"
        );
        self.playback.play(payload).await
    }
}
