use super::handle::PlayableHandle;
use super::media_engine::{MediaEngine, PlaybackCompletion};
use crate::domain::speech::SpeechError;
use async_trait::async_trait;
use rodio::{Decoder, OutputStreamBuilder, Sink};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Plays audio on the default output device through rodio.
///
/// The output stream is not `Send`, so each playback owns a dedicated thread.
#[derive(Debug, Default)]
pub struct RodioMediaEngine;

impl RodioMediaEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaEngine for RodioMediaEngine {
    async fn start(&self, handle: &PlayableHandle) -> Result<PlaybackCompletion, SpeechError> {
        let bytes = tokio::fs::read(handle.location()).await.map_err(|e| {
            SpeechError::PlaybackFailure(format!("Failed to open audio blob: {}", e))
        })?;
        let mime_type = handle.mime_type().to_string();
        let handle_id = handle.id();

        let (started_tx, started_rx) = oneshot::channel::<Result<(), String>>();
        let (done_tx, done_rx) = oneshot::channel::<Result<(), String>>();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        std::thread::spawn(move || {
            let mut stream = match OutputStreamBuilder::open_default_stream() {
                Ok(stream) => stream,
                Err(e) => {
                    let _ = started_tx.send(Err(format!("no audio output device: {}", e)));
                    return;
                }
            };
            // Keep stderr for tracing output
            stream.log_on_drop(false);
            let _ = started_tx.send(Ok(()));

            let decoder = Decoder::builder()
                .with_data(Cursor::new(bytes))
                .with_mime_type(&mime_type)
                .build();
            let source = match decoder {
                Ok(source) => source,
                Err(e) => {
                    let _ = done_tx.send(Err(format!("decode error: {}", e)));
                    return;
                }
            };

            let sink = Sink::connect_new(stream.mixer());
            sink.append(source);
            tracing::debug!(handle = %handle_id, "Audio ready to play");

            while !sink.empty() {
                if stop_flag.load(Ordering::SeqCst) {
                    sink.stop();
                    let _ = done_tx.send(Err("playback stopped".to_string()));
                    return;
                }
                std::thread::sleep(STOP_POLL_INTERVAL);
            }

            let _ = done_tx.send(Ok(()));
        });

        match started_rx.await {
            Ok(Ok(())) => {}
            Ok(Err(msg)) => {
                tracing::error!(error = %msg, "Audio play error");
                return Err(SpeechError::PlaybackFailure(format!("Audio play error: {}", msg)));
            }
            Err(_) => {
                return Err(SpeechError::PlaybackFailure(
                    "Audio thread exited before playback started".to_string(),
                ))
            }
        }

        tracing::debug!(handle = %handle_id, "Audio playback started");
        Ok(PlaybackCompletion::new(done_rx).on_drop(move || stop.store(true, Ordering::SeqCst)))
    }
}
