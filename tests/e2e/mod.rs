// End-to-end tests for the two-tier TTS fallback
//
// Each test gets its own in-process synthesis server (axum on 127.0.0.1:0)
// whose responses are scripted per test. Handle storage, the media engine
// and the speech channel are in-memory fakes that record what they saw.
//
// Architecture:
// - Real HttpRemoteSynthesizer talking to the scripted server over TCP
// - Real AudioPlaybackAdapter and LocalSynthesisAdapter around the fakes
// - Fresh context per test via test-context lifecycle hooks

mod helpers;
mod test_concurrency;
