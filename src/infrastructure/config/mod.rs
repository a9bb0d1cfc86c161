use crate::domain::speech::LanguageTag;
use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub synthesis_url: String,
    pub api_key: Option<String>,
    pub default_language: LanguageTag,
    pub temp_dir: PathBuf,
    pub audio_player: Option<String>,
    pub speech_engine: Option<String>,
    pub local_speech_enabled: bool,
    pub playback_engine: PlaybackEngineKind,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackEngineKind {
    Process,
    Rodio,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            synthesis_url: env::var("TTS_SYNTHESIS_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api/tts".to_string()),
            api_key: optional_var("TTS_API_KEY"),
            default_language: env::var("TTS_DEFAULT_LANGUAGE")
                .map(LanguageTag::from)
                .unwrap_or_default(),
            temp_dir: optional_var("TTS_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            audio_player: optional_var("TTS_AUDIO_PLAYER"),
            speech_engine: optional_var("TTS_SPEECH_ENGINE"),
            local_speech_enabled: env::var("TTS_LOCAL_SPEECH_ENABLED")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
            playback_engine: match env::var("TTS_PLAYBACK_ENGINE")
                .unwrap_or_else(|_| "process".to_string())
                .to_lowercase()
                .as_str()
            {
                "process" => PlaybackEngineKind::Process,
                "rodio" => PlaybackEngineKind::Rodio,
                other => {
                    return Err(AppError::Config(format!(
                        "TTS_PLAYBACK_ENGINE must be 'process' or 'rodio', got '{}'",
                        other
                    )))
                }
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        if !config.synthesis_url.starts_with("http://")
            && !config.synthesis_url.starts_with("https://")
        {
            return Err(AppError::Config(format!(
                "TTS_SYNTHESIS_URL must be an http(s) URL, got '{}'",
                config.synthesis_url
            )));
        }

        Ok(config)
    }
}
