use std::collections::HashMap;

use async_trait::async_trait;

/// Trait abstraction for contact storage.
/// Implementations decide how the name -> phone mapping is held.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Insert or overwrite the phone number stored for `name`.
    async fn add(&self, name: String, phone: String);
    /// Look up the phone number for `name`; a miss is a normal result.
    async fn get(&self, name: &str) -> Option<String>;
    /// Snapshot of the complete name -> phone mapping.
    async fn all(&self) -> HashMap<String, String>;
}
