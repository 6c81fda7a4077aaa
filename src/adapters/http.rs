use crate::domain::ports::DiagramFetcher;
use crate::utils::error::{GeneratorError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Downloads rendered diagrams from the rendering server.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl DiagramFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Requesting rendered diagram: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Rendering server response status: {}", status);
        if !status.is_success() {
            return Err(GeneratorError::DownloadError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/plantuml/svg/~1ABC");
            then.status(200)
                .header("Content-Type", "image/svg+xml")
                .body("<svg/>");
        });

        let fetcher = HttpFetcher::new();
        let body = fetcher
            .fetch(&server.url("/plantuml/svg/~1ABC"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(body, b"<svg/>");
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/plantuml/svg/~1BAD");
            then.status(400);
        });

        let err = HttpFetcher::new()
            .fetch(&server.url("/plantuml/svg/~1BAD"))
            .await
            .unwrap_err();

        assert!(matches!(err, GeneratorError::DownloadError { status: 400, .. }));
    }
}
