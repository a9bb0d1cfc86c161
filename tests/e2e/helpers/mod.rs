use std::sync::Arc;
use test_context::AsyncTestContext;
use tts_fallback::domain::speech::PlaybackOrchestrator;
use tts_fallback::infrastructure::playback::{AudioPlaybackAdapter, HandleStore};
use tts_fallback::infrastructure::repositories::HttpRemoteSynthesizer;
use tts_fallback::infrastructure::speech::{LocalSynthesisAdapter, SpeechChannel};

pub mod synthesis_server;

pub use fakes::{
    ChannelBehavior, CountingStore, EngineBehavior, FakeMediaEngine, FakeSpeechChannel,
};
pub use synthesis_server::{ScriptedResponse, SynthesisServer, MP3_BYTES};

pub const TEST_API_KEY: &str = "test-api-key";

pub struct TestContext {
    pub server: SynthesisServer,
    pub store: Arc<CountingStore>,
    pub engine: Arc<FakeMediaEngine>,
    pub channel: Arc<FakeSpeechChannel>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let server = SynthesisServer::start().await;

            Self {
                server,
                store: Arc::new(CountingStore::default()),
                engine: Arc::new(FakeMediaEngine::default()),
                channel: Arc::new(FakeSpeechChannel::default()),
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // The server task dies with the test runtime
        }
    }
}

impl TestContext {
    /// Orchestrator wired to the scripted server and the recording fakes
    pub fn orchestrator(&self) -> PlaybackOrchestrator {
        self.build(self.store.clone(), Some(self.channel.clone()))
    }

    /// Same wiring, but the environment has no local speech capability
    pub fn orchestrator_without_local(&self) -> PlaybackOrchestrator {
        self.build(self.store.clone(), None)
    }

    /// Same wiring with a caller-supplied handle store
    pub fn orchestrator_with_store(&self, store: Arc<dyn HandleStore>) -> PlaybackOrchestrator {
        self.build(store, Some(self.channel.clone()))
    }

    fn build(
        &self,
        store: Arc<dyn HandleStore>,
        channel: Option<Arc<FakeSpeechChannel>>,
    ) -> PlaybackOrchestrator {
        let synthesizer = Arc::new(HttpRemoteSynthesizer::new(
            self.server.endpoint.clone(),
            Some(TEST_API_KEY.to_string()),
        ));
        let playback = Arc::new(AudioPlaybackAdapter::new(store, self.engine.clone()));
        let local = Arc::new(LocalSynthesisAdapter::new(
            channel.map(|c| c as Arc<dyn SpeechChannel>),
        ));
        PlaybackOrchestrator::new(synthesizer, playback, local)
    }
}
