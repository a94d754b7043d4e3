use std::time::Duration;

use futures_util::StreamExt;
use scribe_logging::scribe_debug;

use crate::EngineError;

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Lifetime requested for presigned URLs.
    pub url_expiry_secs: u32,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 10 * 1024 * 1024,
            url_expiry_secs: 3600,
        }
    }
}

/// Streams the body behind a presigned stage URL, bounded by `max_bytes`.
#[derive(Debug, Clone)]
pub struct PresignedDownloader {
    http: reqwest::Client,
    settings: DownloadSettings,
}

impl PresignedDownloader {
    pub fn new(settings: DownloadSettings) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(EngineError::from_reqwest)?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &DownloadSettings {
        &self.settings
    }

    pub async fn download(&self, url: &str) -> Result<Vec<u8>, EngineError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| EngineError::MalformedResponse(format!("presigned url: {err}")))?;

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(EngineError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Http {
                status: status.as_u16(),
                message: status.to_string(),
            });
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(EngineError::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(EngineError::from_reqwest)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(EngineError::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        scribe_debug!("Downloaded {} bytes from presigned url", bytes.len());
        Ok(bytes)
    }
}
