use std::future::Future;

use thiserror::Error;

/// Why a logo could not be retrieved. Callers never see this type from the
/// render boundary; every variant is handled uniformly by falling back to
/// the wordmark.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {0}")]
    Status(u16),
}

/// Injected capability for retrieving the logo image.
///
/// A single bounded attempt, no retry; any rejection is treated the same way.
/// The renderer is testable without network access by injecting a stub.
pub trait LogoFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Production fetcher over reqwest, using the transport's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpLogoFetcher {
    client: reqwest::Client,
}

impl HttpLogoFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogoFetcher for HttpLogoFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
