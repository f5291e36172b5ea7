//! HTTP backend speaking the multipart conversion contract

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, warn};

use super::artifact::Artifact;
use super::decode;
use super::error::{ConvertError, Result};
use super::file::FileHandle;
use super::request::{ConversionRequest, Payload};
use super::traits::ConversionBackend;
use crate::config::ClientConfig;

/// HTTP client configuration
///
/// Timeouts are `None` unless configured, leaving reqwest's defaults in place.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: None,
            request_timeout: None,
            user_agent: format!("convbox/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&ClientConfig> for HttpConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            connect_timeout: config.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: config.request_timeout_secs.map(Duration::from_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Conversion backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: HttpConfig,
}

impl HttpBackend {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);

        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ConvertError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Absolute URL for an endpoint path
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn build_form(request: &ConversionRequest) -> Result<Form> {
        let mut form = Form::new();

        match &request.payload {
            Payload::Files { field, files } => {
                for file in files {
                    form = form.part(*field, file_part(file).await?);
                }
            }
            Payload::Url(url) => {
                form = form.text("url", url.clone());
            }
        }

        if let Some(option) = &request.option {
            form = form.text(option.name.clone(), option.value.clone());
        }

        Ok(form)
    }
}

async fn file_part(file: &FileHandle) -> Result<Part> {
    let bytes = file.read().await.map_err(|e| ConvertError::Io {
        name: file.name().to_string(),
        message: e.to_string(),
    })?;

    let part = Part::bytes(bytes.to_vec()).file_name(file.name().to_string());
    match file.mime() {
        Some(mime) => part
            .mime_str(mime.essence_str())
            .map_err(|e| ConvertError::InvalidRequest(e.to_string())),
        None => Ok(part),
    }
}

fn transport_error(err: reqwest::Error) -> ConvertError {
    if err.is_timeout() {
        ConvertError::Timeout
    } else {
        ConvertError::Transport(err.to_string())
    }
}

#[async_trait]
impl ConversionBackend for HttpBackend {
    async fn submit(&self, request: ConversionRequest) -> Result<Artifact> {
        let url = self.url_for(&request.endpoint);
        let form = Self::build_form(&request).await?;

        debug!(url = %url, "Sending conversion request");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = decode::error_message(&body, request.failure_fallback());
            warn!(url = %url, status = status.as_u16(), error = %message, "Conversion rejected");
            return Err(ConvertError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        let content_disposition = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        debug!(url = %url, size = body.len(), "Conversion response received");

        Ok(Artifact::new(body, content_type, content_disposition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.connect_timeout.is_none());
        assert!(config.request_timeout.is_none());
        assert!(config.user_agent.starts_with("convbox/"));
    }

    #[test]
    fn test_http_config_from_client_config() {
        let client = ClientConfig {
            api_base_url: "https://convert.example.com".to_string(),
            request_timeout_secs: Some(120),
            ..ClientConfig::default()
        };
        let config = HttpConfig::from(&client);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(120)));
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn test_url_for_joins_slashes() {
        let backend = HttpBackend::new(HttpConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..HttpConfig::default()
        })
        .unwrap();

        assert_eq!(
            backend.url_for("/convert/image"),
            "http://localhost:8000/convert/image"
        );
        assert_eq!(
            backend.url_for("convert/image"),
            "http://localhost:8000/convert/image"
        );
    }
}
