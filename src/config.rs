use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Speech-recognition engine settings. The subscription key and region are
/// usually supplied through the environment (`AZURE_SPEECH_KEY`,
/// `AZURE_SPEECH_REGION`) rather than the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    pub key: String,
    pub region: String,
    /// Spoken languages the engine should expect; the first entry is the
    /// primary recognition language.
    pub languages: Vec<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "meeting-relay")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 8000)?
            .set_default("speech.key", "your-azure-speech-key")?
            .set_default("speech.region", "eastus")?
            .set_default("speech.languages", vec!["vi-VN", "en-US"])?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::default()
                    .prefix("AZURE")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
