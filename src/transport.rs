// HTTP transport used for the feed download and the image downloads

use crate::config::PipelineConfig;
use crate::error::{FeedError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;

// Black-box `fetch(url) -> bytes` collaborator
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FeedError::Fetch {
                url: config.endpoint.clone(),
                reason: format!("cannot build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        let fetch_error = |reason: String| FeedError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_transport() -> HttpTransport {
        let config = PipelineConfig {
            request_timeout_secs: 5,
            ..PipelineConfig::default()
        };
        HttpTransport::new(&config).expect("failed to build test transport")
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<hotels/>"))
            .mount(&server)
            .await;

        let body = test_transport()
            .fetch(&format!("{}/feed", server.uri()))
            .await
            .expect("fetch should succeed");
        assert_eq!(&body[..], b"<hotels/>");
    }

    #[tokio::test]
    async fn test_fetch_maps_non_success_status_to_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = test_transport()
            .fetch(&format!("{}/feed", server.uri()))
            .await;
        match result {
            Err(FeedError::Fetch { reason, .. }) => assert_eq!(reason, "HTTP 503"),
            other => panic!("expected fetch error, got {:?}", other),
        }
    }
}
