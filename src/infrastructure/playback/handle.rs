use crate::domain::speech::SpeechError;
use crate::error::AppResult;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// MIME type every blob is played as, whatever the server declared
pub const PLAYBACK_MIME_TYPE: &str = "audio/mp3";

/// Short-lived reference a media engine can play from.
///
/// Must be handed back to the [`HandleStore`] that created it for release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableHandle {
    id: Uuid,
    location: PathBuf,
    mime_type: String,
}

impl PlayableHandle {
    pub fn new(id: Uuid, location: PathBuf, mime_type: impl Into<String>) -> Self {
        Self {
            id,
            location,
            mime_type: mime_type.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Creates and releases transient playable handles for audio blobs.
///
/// Both operations are synchronous so release can run from `Drop`.
pub trait HandleStore: Send + Sync {
    fn create(&self, bytes: &[u8], mime_type: &str) -> Result<PlayableHandle, SpeechError>;

    /// Release a handle. Called exactly once per created handle.
    fn revoke(&self, handle: &PlayableHandle);
}

/// Stores each blob as a uniquely named file in a temp directory
pub struct TempFileHandleStore {
    dir: PathBuf,
}

impl TempFileHandleStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store rooted at `dir`, creating the directory if it does not exist yet
    pub fn open(dir: PathBuf) -> AppResult<Self> {
        std::fs::create_dir_all(&dir)?;
        tracing::debug!(dir = ?dir, "Audio blob directory ready");
        Ok(Self::new(dir))
    }

    fn extension_for(mime_type: &str) -> &'static str {
        match mime_type {
            "audio/mp3" | "audio/mpeg" => "mp3",
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/ogg" => "ogg",
            _ => "bin",
        }
    }
}

impl HandleStore for TempFileHandleStore {
    fn create(&self, bytes: &[u8], mime_type: &str) -> Result<PlayableHandle, SpeechError> {
        let id = Uuid::new_v4();
        let location = self
            .dir
            .join(format!("tts_{}.{}", id, Self::extension_for(mime_type)));

        std::fs::write(&location, bytes).map_err(|e| {
            tracing::error!(error = %e, path = ?location, "Failed to write audio blob");
            SpeechError::PlaybackFailure(format!("Failed to create audio blob: {}", e))
        })?;

        tracing::debug!(handle = %id, path = ?location, size = bytes.len(), "Audio blob created");
        Ok(PlayableHandle::new(id, location, mime_type))
    }

    fn revoke(&self, handle: &PlayableHandle) {
        match std::fs::remove_file(handle.location()) {
            Ok(()) => tracing::debug!(handle = %handle.id(), "Audio blob revoked"),
            Err(e) => tracing::warn!(
                handle = %handle.id(),
                error = %e,
                path = ?handle.location(),
                "Failed to remove audio blob"
            ),
        }
    }
}
