use super::synthesis_repository::RemoteSynthesizer;
use crate::domain::speech::{AudioPayload, RemoteSynthesisBody, SpeechError, SynthesisRequest};
use async_trait::async_trait;
use reqwest::{header, StatusCode};

/// Substring the declared content type must contain for a response to count as audio
const AUDIO_CONTENT_TYPE_MARKER: &str = "audio/";

/// Remote synthesizer that POSTs `{text, lang}` as JSON to a fixed endpoint
pub struct HttpRemoteSynthesizer {
    endpoint: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl HttpRemoteSynthesizer {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            endpoint,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Read the body of a rejected response for diagnostics only
    async fn drain_error_body(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string())
    }
}

fn check_status(status: StatusCode) -> Result<(), SpeechError> {
    if status.is_success() {
        return Ok(());
    }

    Err(SpeechError::SynthesisFailure(format!(
        "Failed to synthesize speech: {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )))
}

fn check_content_type(content_type: Option<&str>) -> Result<(), SpeechError> {
    match content_type {
        Some(value) if value.contains(AUDIO_CONTENT_TYPE_MARKER) => Ok(()),
        Some(value) => Err(SpeechError::SynthesisFailure(format!(
            "Invalid response from TTS service: content type {}",
            value
        ))),
        None => Err(SpeechError::SynthesisFailure(
            "Invalid response from TTS service: content type none".to_string(),
        )),
    }
}

#[async_trait]
impl RemoteSynthesizer for HttpRemoteSynthesizer {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioPayload, SpeechError> {
        let start_time = std::time::Instant::now();
        let body = RemoteSynthesisBody::from(request);

        tracing::info!(
            endpoint = %self.endpoint,
            lang = %body.lang,
            text_length = body.text.len(),
            text_preview = %body.text.chars().take(80).collect::<String>(),
            "Sending TTS request"
        );

        let mut builder = self
            .http_client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, endpoint = %self.endpoint, "TTS request failed");
            SpeechError::SynthesisFailure(format!("TTS request failed: {}", e))
        })?;

        let status = response.status();
        if let Err(err) = check_status(status) {
            let error_text = Self::drain_error_body(response).await;
            tracing::error!(
                status = status.as_u16(),
                status_text = status.canonical_reason().unwrap_or_default(),
                error_text = %error_text,
                "TTS API error"
            );
            return Err(err);
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        tracing::debug!(content_type = ?content_type, "TTS response received");

        if let Err(err) = check_content_type(content_type.as_deref()) {
            let error_text = Self::drain_error_body(response).await;
            tracing::error!(
                content_type = ?content_type,
                error_text = %error_text,
                "Invalid content type"
            );
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read audio body");
            SpeechError::SynthesisFailure(format!("Failed to read audio body: {}", e))
        })?;

        let duration = start_time.elapsed();
        tracing::info!(
            latency_ms = duration.as_millis(),
            audio_size_bytes = bytes.len(),
            "Audio buffer received"
        );

        Ok(AudioPayload::new(
            bytes.to_vec(),
            content_type.unwrap_or_default(),
        ))
    }
}
