use async_trait::async_trait;
use tokio::sync::broadcast;
use crate::Result;

/// A preference written through a `PreferenceStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceChange {
    pub key: String,
    pub value: String,
}

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read a preference, `None` when it was never set
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Persist a preference and notify subscribers
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Receive every change made after this call
    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange>;
}
