use super::{now_unix, Recognition, RecognitionEngine, RecognitionError};
use crate::config::SpeechConfig;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::warn;

/// Azure Speech-to-Text over the short-audio REST endpoint.
///
/// Recognizes one audio chunk per request against the region's
/// `speech/recognition/conversation` endpoint. The REST surface carries no
/// speaker diarization, so `speaker` is reported from the optional
/// `SpeakerId` field when present and left unattributed otherwise.
pub struct AzureSpeechEngine {
    key: String,
    language: String,
    endpoint: String,
    // Built lazily on the blocking pool: reqwest's blocking client may not
    // be constructed on an async runtime worker thread.
    client: OnceLock<reqwest::blocking::Client>,
}

#[derive(Debug, Deserialize)]
struct AzureResponse {
    #[serde(rename = "RecognitionStatus")]
    status: String,
    #[serde(rename = "DisplayText", default)]
    display_text: String,
    #[serde(rename = "SpeakerId", default)]
    speaker_id: Option<String>,
}

impl AzureResponse {
    fn into_recognition(self) -> Recognition {
        if self.status != "Success" || self.display_text.is_empty() {
            if self.status != "Success" {
                warn!("Recognition status: {}", self.status);
            }
            return Recognition::empty();
        }

        // The service sometimes reports an empty SpeakerId; that is no
        // attribution, not a speaker named "".
        let speaker = self
            .speaker_id
            .filter(|id| !id.is_empty())
            .map(|id| format!("Speaker {}", id));

        Recognition {
            text: self.display_text,
            speaker,
            timestamp: now_unix(),
        }
    }
}

impl AzureSpeechEngine {
    pub fn new(config: &SpeechConfig) -> Self {
        let language = config
            .languages
            .first()
            .cloned()
            .unwrap_or_else(|| "en-US".to_string());

        let endpoint = format!(
            "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1",
            config.region
        );

        Self {
            key: config.key.clone(),
            language,
            endpoint,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&reqwest::blocking::Client, RecognitionError> {
        if self.client.get().is_none() {
            let built = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .map_err(|e| RecognitionError::Engine {
                    message: format!("Failed to build HTTP client: {}", e),
                })?;
            let _ = self.client.set(built);
        }
        self.client.get().ok_or_else(|| RecognitionError::Engine {
            message: "HTTP client unavailable".to_string(),
        })
    }
}

impl RecognitionEngine for AzureSpeechEngine {
    fn recognize(&self, audio: &[u8]) -> Result<Recognition, RecognitionError> {
        let response = self
            .client()?
            .post(&self.endpoint)
            .query(&[("language", self.language.as_str()), ("format", "simple")])
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "audio/wav; codecs=audio/pcm; samplerate=16000")
            .body(audio.to_vec())
            .send()
            .map_err(|e| RecognitionError::Engine {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RecognitionError::Engine {
                message: format!("Engine returned HTTP {}", response.status()),
            });
        }

        let parsed: AzureResponse =
            response
                .json()
                .map_err(|e| RecognitionError::MalformedResponse {
                    message: e.to_string(),
                })?;

        Ok(parsed.into_recognition())
    }

    fn name(&self) -> &str {
        "azure-speech"
    }
}
