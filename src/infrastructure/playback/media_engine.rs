use super::handle::PlayableHandle;
use crate::domain::speech::SpeechError;
use crate::infrastructure::system::{binary_name, find_first_binary};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::sync::oneshot;

/// Players tried in order when none is configured
const DEFAULT_PLAYERS: &[&str] = &["ffplay", "mpg123", "mpv", "afplay"];

/// One-shot bridge for a playback that has started.
///
/// Settles exactly once: `Ok` when the media reaches its end, `Err` with the
/// engine's message on a load/decode/play error. Dropping it stops playback.
pub struct PlaybackCompletion {
    receiver: oneshot::Receiver<Result<(), String>>,
    on_drop: Option<Box<dyn FnOnce() + Send>>,
}

impl PlaybackCompletion {
    pub fn new(receiver: oneshot::Receiver<Result<(), String>>) -> Self {
        Self {
            receiver,
            on_drop: None,
        }
    }

    /// Hook run when the completion is dropped, used to detach the media
    pub fn on_drop(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_drop = Some(Box::new(hook));
        self
    }

    pub async fn wait(mut self) -> Result<(), SpeechError> {
        match (&mut self.receiver).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(msg)) => Err(SpeechError::PlaybackFailure(format!(
                "Failed to play audio: {}",
                msg
            ))),
            Err(_) => Err(SpeechError::PlaybackFailure(
                "Media engine dropped the playback".to_string(),
            )),
        }
    }
}

impl Drop for PlaybackCompletion {
    fn drop(&mut self) {
        if let Some(hook) = self.on_drop.take() {
            hook();
        }
    }
}

/// Media engine that plays from transient handles
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Start playing `handle`.
    ///
    /// # Errors
    /// `PlaybackFailure` if playback cannot even begin (no player, no output
    /// device). Errors after start are reported through the completion.
    async fn start(&self, handle: &PlayableHandle) -> Result<PlaybackCompletion, SpeechError>;
}

/// Plays audio by running an external player binary on the handle's file
pub struct ProcessMediaEngine {
    player: PathBuf,
    args: Vec<String>,
}

impl ProcessMediaEngine {
    pub fn new(player: PathBuf) -> Self {
        let args = Self::default_args(&binary_name(&player));
        Self { player, args }
    }

    /// Locate a player on this machine, preferring `preferred` when set
    pub fn detect(preferred: Option<&str>) -> Option<Self> {
        let player = find_first_binary(preferred, DEFAULT_PLAYERS)?;
        tracing::info!(player = ?player, "Detected audio player");
        Some(Self::new(player))
    }

    pub fn player(&self) -> &PathBuf {
        &self.player
    }

    fn default_args(name: &str) -> Vec<String> {
        let args: &[&str] = match name {
            "ffplay" => &["-nodisp", "-autoexit", "-loglevel", "error"],
            "mpg123" => &["-q"],
            "mpv" => &["--no-video", "--really-quiet"],
            _ => &[],
        };
        args.iter().map(|s| s.to_string()).collect()
    }
}

#[async_trait]
impl MediaEngine for ProcessMediaEngine {
    async fn start(&self, handle: &PlayableHandle) -> Result<PlaybackCompletion, SpeechError> {
        tracing::debug!(player = ?self.player, handle = %handle.id(), "Starting audio playback");

        let mut child = tokio::process::Command::new(&self.player)
            .args(&self.args)
            .arg(handle.location())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                tracing::error!(error = %e, player = ?self.player, "Audio play error");
                SpeechError::PlaybackFailure(format!("Audio play error: {}", e))
            })?;

        tracing::debug!(handle = %handle.id(), "Audio playback started");

        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let result = match child.wait().await {
                Ok(status) if status.success() => Ok(()),
                Ok(status) => Err(format!("player exited with {}", status)),
                Err(e) => Err(format!("failed to wait for player: {}", e)),
            };
            let _ = tx.send(result);
        });

        // Aborting the task drops the child, which kills the player
        Ok(PlaybackCompletion::new(rx).on_drop(move || task.abort()))
    }
}
