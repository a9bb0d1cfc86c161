pub mod channel;

pub use channel::{CommandSpeechChannel, SpeechChannel, Utterance, UtteranceCompletion};

use crate::domain::speech::{LanguageTag, SpeechError};
use std::sync::Arc;

/// Drives the on-device speech engine for the local tier
pub struct LocalSynthesisAdapter {
    channel: Option<Arc<dyn SpeechChannel>>,
}

impl LocalSynthesisAdapter {
    /// `None` means this environment has no local speech capability
    pub fn new(channel: Option<Arc<dyn SpeechChannel>>) -> Self {
        Self { channel }
    }

    pub fn is_supported(&self) -> bool {
        self.channel.is_some()
    }

    /// Speak `text`, suspending until the device finishes the utterance.
    ///
    /// Cancels whatever the shared channel is currently speaking first.
    ///
    /// # Errors
    /// `UnsupportedCapability` without a channel (nothing is submitted);
    /// `LocalSynthesisFailure` when the device reports an error.
    pub async fn speak(&self, text: &str, language_tag: &LanguageTag) -> Result<(), SpeechError> {
        let channel = self.channel.as_ref().ok_or_else(|| {
            tracing::error!("Local speech synthesis is not supported in this environment");
            SpeechError::UnsupportedCapability(
                "Local speech synthesis is not supported".to_string(),
            )
        })?;

        channel.cancel_all();

        let utterance = Utterance {
            text: text.to_string(),
            lang: language_tag.for_local_synthesis(),
        };
        tracing::info!(lang = %utterance.lang, "Starting local speech playback");

        match channel.speak(utterance).await {
            Ok(Ok(())) => {
                tracing::info!("Local speech playback completed");
                Ok(())
            }
            Ok(Err(msg)) => {
                tracing::error!(error = %msg, "Local speech error");
                Err(SpeechError::LocalSynthesisFailure(format!(
                    "Local speech playback failed: {}",
                    msg
                )))
            }
            Err(_) => Err(SpeechError::LocalSynthesisFailure(
                "Speech channel dropped the utterance".to_string(),
            )),
        }
    }
}
