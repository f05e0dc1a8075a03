//! Provider lifecycle: an explicit registry keyed by entry id, plus the
//! setup/unload entry points the host platform drives.

use crate::client::OpenAiClient;
use crate::config::ConfigEntry;
use crate::error::TtsError;
use crate::provider::OpenAiTtsProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of live providers, keyed by configuration entry id.
///
/// Passed by reference to whoever needs lookup; never a process-wide
/// global. The host platform owns one per process.
#[derive(Default)]
pub struct ProviderRegistry {
    entries: HashMap<String, Arc<OpenAiTtsProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the provider for an entry id.
    pub fn get(&self, entry_id: &str) -> Option<Arc<OpenAiTtsProvider>> {
        self.entries.get(entry_id).cloned()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no providers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry_id: String, provider: Arc<OpenAiTtsProvider>) {
        self.entries.insert(entry_id, provider);
    }

    fn remove(&mut self, entry_id: &str) -> bool {
        self.entries.remove(entry_id).is_some()
    }
}

/// Sets up a configuration entry: builds the client, validates the API key
/// and registers the provider.
///
/// Auth failures mean the stored key is bad and propagate as
/// [`TtsError::Auth`]; connectivity and rate-limit failures propagate as
/// their own kinds so the host can retry setup later.
pub async fn setup_entry(
    registry: &mut ProviderRegistry,
    entry: ConfigEntry,
    base_url: Option<String>,
) -> Result<Arc<OpenAiTtsProvider>, TtsError> {
    log::debug!("setting up entry: {}", entry.entry_id);

    let client = OpenAiClient::new(entry.data.api_key.clone(), base_url, None)?;
    client.validate_key().await?;

    let entry_id = entry.entry_id.clone();
    let provider = Arc::new(OpenAiTtsProvider::new(entry, client));
    registry.insert(entry_id, provider.clone());
    Ok(provider)
}

/// Unloads a configuration entry, dropping its provider.
///
/// Returns whether an entry with that id was registered.
pub fn unload_entry(registry: &mut ProviderRegistry, entry_id: &str) -> bool {
    log::debug!("unloading entry: {}", entry_id);
    registry.remove(entry_id)
}
