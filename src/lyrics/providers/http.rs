use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::lyrics::loader::LoaderConfig;
use crate::lyrics::providers::LyricFetcher;
use crate::lyrics::types::{LyricsError, http_client};

/// Fetches `http(s)://` references over the network and anything else from
/// the local filesystem (`file://` prefix optional).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            client: http_client().clone(),
        }
    }
}

impl HttpFetcher {
    /// Build a fetcher with its own client honoring the configured user agent
    /// and optional timeout.
    pub fn with_config(config: &LoaderConfig) -> Result<Self, LyricsError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(ms) = config.fetch_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn fetch_url(&self, url: &str) -> Result<String, LyricsError> {
        tracing::debug!(url, "fetching lyrics over http");
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(LyricsError::Http {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.text().await?)
    }

    async fn fetch_file(&self, path: &str) -> Result<String, LyricsError> {
        tracing::debug!(path, "reading lyrics file");
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

impl LyricFetcher for HttpFetcher {
    fn fetch(&self, source: &str) -> impl Future<Output = Result<String, LyricsError>> + Send {
        async move {
            if is_remote(source) {
                self.fetch_url(source).await
            } else {
                self.fetch_file(source.strip_prefix("file://").unwrap_or(source))
                    .await
            }
        }
    }
}
