use crate::e2e::helpers;

use axum::http::StatusCode;
use helpers::{ChannelBehavior, ScriptedResponse, TestContext};
use std::time::Duration;
use test_context::test_context;
use tts_fallback::domain::speech::{PlaybackOrchestratorApi, SpeechError};

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_let_at_most_one_concurrent_local_utterance_finish(ctx: &TestContext) {
    ctx.server
        .respond_with(ScriptedResponse::status(StatusCode::SERVICE_UNAVAILABLE));
    ctx.channel
        .behave(ChannelBehavior::FinishAfter(Duration::from_secs(1)));

    let orchestrator = ctx.orchestrator();
    let (first, second) = futures::join!(
        orchestrator.play_text("First snippet", Some("en-US")),
        orchestrator.play_text("Second snippet", Some("en-US")),
    );

    let results = [first, second];
    let finished = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(finished, 1, "results: {:?}", results);
    assert_eq!(ctx.channel.completed_count(), 1);
    assert_eq!(ctx.channel.utterances().len(), 2);

    let interrupted = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one call should have been interrupted");
    assert_eq!(
        interrupted,
        &SpeechError::LocalSynthesisFailure("Local speech playback failed: interrupted".to_string())
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_interrupt_remote_playback_of_other_calls(ctx: &TestContext) {
    let orchestrator = ctx.orchestrator();
    let (first, second) = futures::join!(
        orchestrator.play_text("First snippet", None),
        orchestrator.play_text("Second snippet", None),
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(ctx.engine.started().len(), 2);
    assert_eq!(ctx.store.revoked().len(), 2);
    assert_eq!(ctx.channel.cancel_count(), 0);
}
