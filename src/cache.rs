use crate::error::NotifyError;
use crate::store::StoreClient;
use crate::translation::TranslationClient;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// One read-modify-write cycle over the remote translation store.
///
/// The session owns the mapping decoded at load time, the version tag
/// observed alongside it, and a dirty flag tracking whether any entry was
/// learned. `commit` is its only externally visible mutation and is meant
/// to be called at most once, after all lookups for the cycle are done.
///
/// Sessions never outlive one webhook invocation: every invocation re-reads
/// the store so that edits made between invocations are picked up.
#[derive(Debug)]
pub struct CacheSession {
    entries: BTreeMap<String, String>,
    sha: Option<String>,
    dirty: bool,
}

impl CacheSession {
    /// Load the cache document from the store.
    ///
    /// An absent file is an empty cache with no version tag, so the later
    /// commit creates the file. Content that is not a JSON string-to-string
    /// object is treated as corrupt: the session starts empty but keeps the
    /// version tag, and the next commit overwrites the corrupt blob. Only a
    /// store transport failure is an error.
    pub async fn load(store: &StoreClient) -> Result<Self, NotifyError> {
        let file = store.get_file().await?;

        let entries = match file.content {
            None => BTreeMap::new(),
            Some(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("discarding unreadable translation cache content: {}", e);
                    BTreeMap::new()
                }
            },
        };

        Ok(Self {
            entries,
            sha: file.sha,
            dirty: false,
        })
    }

    /// Resolve `text` to its translation: a cache hit answers without any
    /// network call, a miss asks the provider and records the result in the
    /// session. A provider failure leaves the session unchanged.
    pub async fn resolve(
        &mut self,
        translator: &TranslationClient,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, NotifyError> {
        if let Some(cached) = self.entries.get(text) {
            return Ok(cached.clone());
        }

        let translated = translator
            .translate(text, source_language, target_language)
            .await?;

        self.entries
            .insert(text.to_string(), translated.clone());
        self.dirty = true;

        Ok(translated)
    }

    /// Whether any entry was learned since load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, text: &str) -> Option<&str> {
        self.entries.get(text).map(String::as_str)
    }

    /// Write the session's mapping back to the store: create when no version
    /// tag was observed at load, otherwise a SHA-checked update. A concurrent
    /// writer since load fails the update; that lost-update race is accepted
    /// and surfaces as a store error rather than a merge.
    pub async fn commit(&self, store: &StoreClient) -> Result<(), NotifyError> {
        let serialized = serde_json::to_string(&self.entries)
            .map_err(|e| NotifyError::Store(anyhow::Error::new(e)))?;

        match &self.sha {
            None => store.create_file(&serialized).await?,
            Some(sha) => store.update_file(&serialized, sha).await?,
        }

        info!(
            "committed translation cache with {} entries",
            self.entries.len()
        );
        Ok(())
    }
}
