use crate::domain::speech::LanguageTag;
use crate::infrastructure::system::{binary_name, find_first_binary};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Speech engines tried in order when none is configured
const DEFAULT_ENGINES: &[&str] = &["espeak-ng", "espeak", "spd-say", "say"];

/// Settles once with the device's verdict on an utterance
pub type UtteranceCompletion = oneshot::Receiver<Result<(), String>>;

/// A single unit of on-device speech
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub lang: LanguageTag,
}

/// The device's single shared speech channel.
///
/// Injected as `Arc<dyn SpeechChannel>` and shared by every caller in the
/// process.
pub trait SpeechChannel: Send + Sync {
    /// Stop whatever is currently speaking. Its waiter receives an error.
    fn cancel_all(&self);

    /// Submit an utterance and return its completion bridge
    fn speak(&self, utterance: Utterance) -> UtteranceCompletion;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineKind {
    Espeak,
    SpeechDispatcher,
    MacSay,
    Generic,
}

impl EngineKind {
    fn from_binary(name: &str) -> Self {
        match name {
            "espeak-ng" | "espeak" => EngineKind::Espeak,
            "spd-say" => EngineKind::SpeechDispatcher,
            "say" => EngineKind::MacSay,
            _ => EngineKind::Generic,
        }
    }

    fn args(&self, utterance: &Utterance) -> Vec<String> {
        let lang = utterance.lang.as_str();
        let mut args = match self {
            EngineKind::Espeak => vec!["-v".to_string(), lang.to_lowercase()],
            EngineKind::SpeechDispatcher => vec!["-w".to_string(), "-l".to_string(), lang.to_string()],
            // `say` selects voices by name, not language
            EngineKind::MacSay | EngineKind::Generic => Vec::new(),
        };
        args.push(utterance.text.clone());
        args
    }
}

/// Speech channel backed by a command-line engine (espeak-ng, spd-say, say).
///
/// Only one utterance runs at a time; the running child is killed on cancel.
pub struct CommandSpeechChannel {
    binary: PathBuf,
    kind: EngineKind,
    current: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl CommandSpeechChannel {
    pub fn new(binary: PathBuf) -> Self {
        let kind = EngineKind::from_binary(&binary_name(&binary));
        Self {
            binary,
            kind,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Locate a speech engine, preferring `preferred` when set.
    /// `None` means the capability is absent.
    pub fn detect(preferred: Option<&str>) -> Option<Self> {
        let binary = find_first_binary(preferred, DEFAULT_ENGINES)?;
        tracing::info!(engine = ?binary, "Detected local speech engine");
        Some(Self::new(binary))
    }

    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }
}

impl SpeechChannel for CommandSpeechChannel {
    fn cancel_all(&self) {
        if let Some(kill) = self.current.lock().take() {
            tracing::debug!("Cancelling current utterance");
            let _ = kill.send(());
        }
    }

    fn speak(&self, utterance: Utterance) -> UtteranceCompletion {
        let (done_tx, done_rx) = oneshot::channel();
        let (kill_tx, kill_rx) = oneshot::channel::<()>();

        // Single channel: a new utterance never queues behind a stale one
        if let Some(previous) = self.current.lock().replace(kill_tx) {
            let _ = previous.send(());
        }

        let mut command = tokio::process::Command::new(&self.binary);
        command
            .args(self.kind.args(&utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(
            engine = ?self.binary,
            lang = %utterance.lang,
            text_length = utterance.text.len(),
            "Submitting utterance"
        );

        tokio::spawn(async move {
            let mut child = match command.spawn() {
                Ok(child) => child,
                Err(e) => {
                    let _ = done_tx.send(Err(format!("failed to start speech engine: {}", e)));
                    return;
                }
            };

            let result = tokio::select! {
                status = child.wait() => match status {
                    Ok(status) if status.success() => Ok(()),
                    Ok(status) => Err(format!("speech engine exited with {}", status)),
                    Err(e) => Err(format!("failed to wait for speech engine: {}", e)),
                },
                _ = kill_rx => {
                    let _ = child.kill().await;
                    Err("interrupted".to_string())
                }
            };
            let _ = done_tx.send(result);
        });

        done_rx
    }
}
