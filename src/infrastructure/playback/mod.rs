pub mod handle;
pub mod media_engine;
#[cfg(feature = "rodio")]
pub mod rodio_engine;

pub use handle::{HandleStore, PlayableHandle, TempFileHandleStore, PLAYBACK_MIME_TYPE};
pub use media_engine::{MediaEngine, PlaybackCompletion, ProcessMediaEngine};
#[cfg(feature = "rodio")]
pub use rodio_engine::RodioMediaEngine;

use crate::domain::speech::{AudioPayload, SpeechError};
use std::sync::Arc;

/// State of one playback attempt.
///
/// Owns the transient handle; dropping the session revokes it, so every exit
/// path (end, error, cancelled future) releases it exactly once.
struct PlaybackSession<'a> {
    store: &'a dyn HandleStore,
    handle: PlayableHandle,
}

impl<'a> PlaybackSession<'a> {
    fn open(store: &'a dyn HandleStore, payload: AudioPayload) -> Result<Self, SpeechError> {
        let declared = payload.content_type().to_string();
        let bytes = payload.into_bytes();
        // TODO: derive the blob type from `declared` once non-MP3 servers are supported
        let handle = store.create(&bytes, PLAYBACK_MIME_TYPE)?;
        tracing::debug!(
            handle = %handle.id(),
            declared_content_type = %declared,
            blob_type = PLAYBACK_MIME_TYPE,
            size = bytes.len(),
            "Created audio blob"
        );
        Ok(Self { store, handle })
    }

    fn handle(&self) -> &PlayableHandle {
        &self.handle
    }
}

impl Drop for PlaybackSession<'_> {
    fn drop(&mut self) {
        self.store.revoke(&self.handle);
    }
}

/// Plays synthesized audio to completion on a media engine
pub struct AudioPlaybackAdapter {
    store: Arc<dyn HandleStore>,
    engine: Arc<dyn MediaEngine>,
}

impl AudioPlaybackAdapter {
    pub fn new(store: Arc<dyn HandleStore>, engine: Arc<dyn MediaEngine>) -> Self {
        Self { store, engine }
    }

    /// Play `payload` once, suspending until it finishes.
    ///
    /// # Errors
    /// `PlaybackFailure` if the blob cannot be created, playback cannot start,
    /// or the engine reports an error while playing.
    pub async fn play(&self, payload: AudioPayload) -> Result<(), SpeechError> {
        let session = PlaybackSession::open(self.store.as_ref(), payload)?;

        tracing::info!(handle = %session.handle().id(), "Starting audio playback");
        let completion = self.engine.start(session.handle()).await?;

        match completion.wait().await {
            Ok(()) => {
                tracing::info!(handle = %session.handle().id(), "Audio playback completed");
                Ok(())
            }
            Err(err) => {
                tracing::error!(handle = %session.handle().id(), error = %err, "Audio playback error");
                Err(err)
            }
        }
    }
}
