use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_fallback::domain::speech::PlaybackOrchestrator;
use tts_fallback::error::{AppError, AppResult};
use tts_fallback::infrastructure::config::{Config, LogFormat, PlaybackEngineKind};
use tts_fallback::infrastructure::playback::{
    AudioPlaybackAdapter, HandleStore, MediaEngine, ProcessMediaEngine, TempFileHandleStore,
};
use tts_fallback::infrastructure::repositories::{HttpRemoteSynthesizer, RemoteSynthesizer};
use tts_fallback::infrastructure::speech::{
    CommandSpeechChannel, LocalSynthesisAdapter, SpeechChannel,
};

#[derive(Parser)]
#[command(name = "tts-fallback")]
#[command(about = "Speak text via a remote TTS service, falling back to local speech", long_about = None)]
struct Cli {
    /// Language tag, e.g. en-US, fr-FR, cmn-Hans-CN
    #[arg(short, long)]
    lang: Option<String>,

    /// Text to speak
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        tracing::error!(error = %err, "TTS playback failed");
        eprintln!("tts-fallback: {}", err);
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting tts-fallback");

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Remote tier
    let synthesizer =
        HttpRemoteSynthesizer::new(config.synthesis_url.clone(), config.api_key.clone());
    tracing::info!(
        endpoint = %synthesizer.endpoint(),
        authenticated = config.api_key.is_some(),
        "Remote synthesis configured"
    );
    let synthesizer: Arc<dyn RemoteSynthesizer> = Arc::new(synthesizer);

    // 2. Playback of remote audio
    let store: Arc<dyn HandleStore> = Arc::new(TempFileHandleStore::open(config.temp_dir.clone())?);
    let engine = build_media_engine(&config)?;
    let playback = Arc::new(AudioPlaybackAdapter::new(store, engine));

    // 3. Local tier
    let channel: Option<Arc<dyn SpeechChannel>> = if config.local_speech_enabled {
        CommandSpeechChannel::detect(config.speech_engine.as_deref()).map(|c| {
            tracing::info!(engine = ?c.binary(), "Local speech fallback enabled");
            Arc::new(c) as Arc<dyn SpeechChannel>
        })
    } else {
        None
    };
    let local = LocalSynthesisAdapter::new(channel);
    if !local.is_supported() {
        tracing::warn!("No local speech engine available; local fallback disabled");
    }
    let local = Arc::new(local);

    // 4. Orchestrator
    let orchestrator = PlaybackOrchestrator::new(synthesizer, playback, local);

    let text = cli.text.join(" ");
    let lang = cli
        .lang
        .unwrap_or_else(|| config.default_language.to_string());

    let outcome = orchestrator
        .play_text_with_outcome(&text, Some(&lang))
        .await
        .map_err(AppError::from)?;

    tracing::info!(tier = %outcome, "Done");
    Ok(())
}

fn build_media_engine(config: &Config) -> AppResult<Arc<dyn MediaEngine>> {
    match config.playback_engine {
        PlaybackEngineKind::Process => {
            let engine = ProcessMediaEngine::detect(config.audio_player.as_deref())
                .unwrap_or_else(|| {
                    // Starting will fail and trigger the local fallback
                    tracing::warn!("No audio player found on PATH");
                    ProcessMediaEngine::new(PathBuf::from(
                        config.audio_player.as_deref().unwrap_or("ffplay"),
                    ))
                });
            tracing::info!(player = ?engine.player(), "Remote audio plays through external player");
            Ok(Arc::new(engine))
        }
        #[cfg(feature = "rodio")]
        PlaybackEngineKind::Rodio => Ok(Arc::new(
            tts_fallback::infrastructure::playback::RodioMediaEngine::new(),
        )),
        #[cfg(not(feature = "rodio"))]
        PlaybackEngineKind::Rodio => Err(AppError::Config(
            "TTS_PLAYBACK_ENGINE=rodio requires building with the `rodio` feature".to_string(),
        )),
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tts_fallback=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tts_fallback=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
