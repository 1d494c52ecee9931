use std::future::Future;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use url::Url;
use cms_core::{ArticleSource, CmsConfig, Error, FetchError, NormalizedArticle, Result};
use crate::logging::Logger;
use crate::sequence::FetchSequencer;

/// Fetches the article collection from the CMS.
///
/// Every call is a fresh round-trip: the client keeps no HTTP cache and
/// each request asks intermediaries not to serve a cached copy.
pub struct ArticleFetcher {
    client: Client,
    endpoint: Url,
    sequencer: FetchSequencer,
    logger: Logger,
}

impl ArticleFetcher {
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let client = Client::builder()
            .user_agent(concat!("cms-feed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            sequencer: FetchSequencer::new(),
            logger: Logger::new().with_prefix("📰".to_string()),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn sequencer(&self) -> &FetchSequencer {
        &self.sequencer
    }

    /// Starts a fetch whose result is only published if no newer fetch was
    /// started before it completed.
    ///
    /// The token is taken when this method is called, not when the future
    /// is first polled. A superseded fetch still runs to completion and
    /// resolves to `None`.
    pub fn fetch_latest(
        &self,
    ) -> impl Future<Output = Option<std::result::Result<Vec<NormalizedArticle>, FetchError>>> + Send + '_ {
        let token = self.sequencer.issue();
        async move {
            let result = self.try_fetch_articles().await;
            if self.sequencer.is_current(token) {
                Some(result)
            } else {
                self.logger.debug(&format!(
                    "Discarding stale fetch #{} (latest is #{})",
                    token.value(),
                    self.sequencer.latest()
                ));
                None
            }
        }
    }
}

#[async_trait]
impl ArticleSource for ArticleFetcher {
    fn name(&self) -> &str {
        "cms"
    }

    async fn try_fetch_articles(&self) -> std::result::Result<Vec<NormalizedArticle>, FetchError> {
        self.logger.info(&format!("Fetching articles from {}", self.endpoint));

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        self.logger.info("API response received");

        let articles = cms_core::parse_collection(&body)?;
        self.logger.info(&format!("Successfully processed {} articles", articles.len()));
        Ok(articles)
    }
}
