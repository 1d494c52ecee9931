use std::path::Path;
use std::sync::Arc;
use cms_core::{Error, PreferenceStore, Result};

pub mod backends;

pub use backends::*;

/// Capacity of the change channel each store keeps for subscribers.
pub const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Opens the named preference backend.
///
/// `file` requires a path; `memory` ignores it.
pub async fn create_store(backend: &str, path: Option<&Path>) -> Result<Arc<dyn PreferenceStore>> {
    match backend {
        "memory" => Ok(Arc::new(MemoryPreferenceStore::new())),
        "file" => {
            let path = path.ok_or_else(|| {
                Error::Config("The file preference backend needs a path".to_string())
            })?;
            Ok(Arc::new(FilePreferenceStore::open(path).await?))
        }
        other => Err(Error::Config(format!(
            "Unknown preference backend: {} (expected memory or file)",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_store;
    pub use cms_core::{PreferenceChange, PreferenceStore, Theme};
}
