use std::sync::Arc;
use cms_core::{ArticleSource, PreferenceStore};

pub struct AppState {
    pub source: Arc<dyn ArticleSource>,
    pub prefs: Arc<dyn PreferenceStore>,
    /// Prepended to cover image paths when building `<img src>`
    pub image_host: String,
}
