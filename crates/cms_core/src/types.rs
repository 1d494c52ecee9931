use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;

/// An article as the CMS sends it.
///
/// `id`, `title` and `slug` must be present; everything the CMS adds beyond
/// the fields named here lands in `extra` untouched.
///
/// `cover` is `None` when the key was missing and `Some(None)` when the CMS
/// sent `null`, so both shapes serialize back the way they arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArticleRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub slug: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub cover: Option<Option<RawCover>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawArticleRecord {
    /// The cover relation, if the CMS sent a non-null one.
    pub fn cover(&self) -> Option<&RawCover> {
        self.cover.as_ref().and_then(Option::as_ref)
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The `cover` media relation of a raw article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCover {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "alternativeText", default, skip_serializing_if = "Option::is_none")]
    pub alternative_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverImage {
    pub url: String,
    #[serde(rename = "alternativeText", default, skip_serializing_if = "Option::is_none")]
    pub alternative_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<Map<String, Value>>,
}

impl CoverImage {
    /// Returns `formats.<size>.url` when the CMS generated that size.
    pub fn format_url(&self, size: &str) -> Option<&str> {
        self.formats
            .as_ref()?
            .get(size)?
            .get("url")?
            .as_str()
            .filter(|url| !url.is_empty())
    }

    /// The path to render for `size`, falling back to the original upload.
    pub fn preferred_path(&self, size: &str) -> &str {
        self.format_url(size).unwrap_or(&self.url)
    }
}

/// A raw article plus the derived `coverImage` the listing page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedArticle {
    #[serde(flatten)]
    pub record: RawArticleRecord,
    #[serde(rename = "coverImage", default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<CoverImage>,
}

impl Deref for NormalizedArticle {
    type Target = RawArticleRecord;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}

impl From<RawArticleRecord> for NormalizedArticle {
    fn from(record: RawArticleRecord) -> Self {
        let cover_image = record.cover().and_then(|cover| {
            match cover.url.as_ref() {
                Some(url) => {
                    tracing::debug!("Found cover image for article {}: {}", record.id, url);
                    Some(CoverImage {
                        url: url.clone(),
                        alternative_text: cover.alternative_text.clone(),
                        formats: cover.formats.clone(),
                    })
                }
                None => {
                    tracing::warn!("Cover for article {} has no url, skipping coverImage", record.id);
                    None
                }
            }
        });

        Self { record, cover_image }
    }
}
