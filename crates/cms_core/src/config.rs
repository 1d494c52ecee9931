use url::Url;
use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://20.169.90.64:1337";
pub const DEFAULT_IMAGE_HOST: &str = "http://20.169.90.119:1337";
pub const ARTICLES_PATH: &str = "/api/articles";
pub const POPULATE_ALL: &str = "*";

/// Where the CMS lives and how the collection is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    pub base_url: String,
    pub collection_path: String,
    pub populate: String,
    pub image_host: String,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection_path: ARTICLES_PATH.to_string(),
            populate: POPULATE_ALL.to_string(),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
        }
    }
}

impl CmsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_image_host(mut self, image_host: impl Into<String>) -> Self {
        self.image_host = image_host.into();
        self
    }

    /// The collection URL including the relation expansion query.
    pub fn endpoint(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        let mut url = base
            .join(&self.collection_path)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.collection_path, e)))?;
        url.query_pairs_mut().append_pair("populate", &self.populate);
        Ok(url)
    }
}
