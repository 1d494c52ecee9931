pub mod config;
pub mod error;
pub mod normalize;
pub mod source;
pub mod storage;
pub mod theme;
pub mod types;

pub use config::CmsConfig;
pub use error::{Error, FetchError, FetchErrorKind, Result};
pub use normalize::{normalize_collection, parse_collection};
pub use source::ArticleSource;
pub use storage::{PreferenceChange, PreferenceStore};
pub use theme::Theme;
pub use types::{CoverImage, NormalizedArticle, RawArticleRecord, RawCover};
