use async_trait::async_trait;
use crate::error::{FetchError, FetchErrorKind};
use crate::types::NormalizedArticle;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns a short name for the source, used in log lines
    fn name(&self) -> &str;

    /// Fetches the article collection, reporting why it failed
    async fn try_fetch_articles(&self) -> Result<Vec<NormalizedArticle>, FetchError>;

    /// Fetches the article collection, collapsing every failure into an
    /// empty list plus a diagnostic
    async fn fetch_articles(&self) -> Vec<NormalizedArticle> {
        match self.try_fetch_articles().await {
            Ok(articles) => articles,
            Err(e) => {
                log_failure(self.name(), &e);
                Vec::new()
            }
        }
    }
}

pub fn log_failure(source: &str, error: &FetchError) {
    match error.kind() {
        FetchErrorKind::MissingData => {
            tracing::warn!(source = source, kind = %error.kind(), "No data field in response");
        }
        kind => {
            tracing::error!(source = source, kind = %kind, "Error fetching articles: {}", error);
        }
    }
}
