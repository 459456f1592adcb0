use std::sync::Arc;

use async_trait::async_trait;
use dictionary::{Dictionary, DictionaryError, WordDefinition};
use tracing::{debug, warn};

use crate::cache::{Cache, CacheError};
use crate::connectivity::ConnectivityProbe;
use crate::error::LookupError;

/// Remote definition source. A successful lookup of an unknown word is an
/// empty list, distinct from a failed request.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_definition(&self, word: &str)
        -> Result<Vec<WordDefinition>, DictionaryError>;
}

#[async_trait]
impl RemoteSource for Dictionary {
    async fn fetch_definition(
        &self,
        word: &str,
    ) -> Result<Vec<WordDefinition>, DictionaryError> {
        Dictionary::fetch_definition(self, word).await
    }
}

/// Local definition store, keyed by word (case-insensitive), most recent
/// first.
#[async_trait]
pub trait LocalCache: Send + Sync {
    async fn get(&self, word: &str) -> Result<Option<WordDefinition>, CacheError>;
    async fn put(&self, definition: &WordDefinition) -> Result<(), CacheError>;
    async fn list_all(&self) -> Result<Vec<WordDefinition>, CacheError>;
}

#[async_trait]
impl LocalCache for Cache {
    async fn get(&self, word: &str) -> Result<Option<WordDefinition>, CacheError> {
        Cache::get(self, word).await
    }

    async fn put(&self, definition: &WordDefinition) -> Result<(), CacheError> {
        Cache::put(self, definition).await
    }

    async fn list_all(&self) -> Result<Vec<WordDefinition>, CacheError> {
        Cache::list_all(self).await
    }
}

/// Orchestrates lookups across the remote dictionary and the local cache:
/// serve from cache when offline, otherwise fetch and write through, and
/// fall back to whatever is cached when the network lets us down.
pub struct WordRepository {
    remote: Arc<dyn RemoteSource>,
    cache: Arc<dyn LocalCache>,
    probe: Arc<dyn ConnectivityProbe>,
}

impl WordRepository {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        cache: Arc<dyn LocalCache>,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            remote,
            cache,
            probe,
        }
    }

    /// Produces a definition for `word`, preferring a fresh one when the
    /// network is reachable.
    ///
    /// The cache is read before the request and written after it completes;
    /// nothing is held across the await, and a fetch that never completes
    /// leaves the cache untouched.
    pub async fn fetch_definition(&self, word: &str) -> Result<WordDefinition, LookupError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(LookupError::InvalidInput);
        }

        // A cache read failure must not cost us the remote path.
        let cached = match self.cache.get(word).await {
            Ok(cached) => cached,
            Err(error) => {
                warn!(word, %error, "cache lookup failed, continuing without it");
                None
            }
        };

        if !self.probe.is_connected() {
            return cached.ok_or(LookupError::NetworkUnavailable);
        }

        match self.remote.fetch_definition(word).await {
            Ok(mut definitions) if !definitions.is_empty() => {
                // First entry is canonical; what we return is exactly what
                // we wrote through.
                let definition = definitions.swap_remove(0);
                if let Err(error) = self.cache.put(&definition).await {
                    warn!(word, %error, "failed to cache fetched definition");
                }
                Ok(definition)
            }
            Ok(_) => cached.ok_or(LookupError::NoDataFound),
            Err(error) => match cached {
                Some(definition) => {
                    debug!(word, %error, "remote fetch failed, serving cached definition");
                    Ok(definition)
                }
                None => Err(LookupError::from_remote(error)),
            },
        }
    }

    /// Cache-only lookup; never touches the network.
    pub async fn get_cached_definition(
        &self,
        word: &str,
    ) -> Result<Option<WordDefinition>, LookupError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(LookupError::InvalidInput);
        }
        Ok(self.cache.get(word).await?)
    }

    /// Stores a definition under its word, replacing any previous entry.
    pub async fn cache_definition(&self, definition: &WordDefinition) -> Result<(), LookupError> {
        Ok(self.cache.put(definition).await?)
    }

    /// Every past search, most recent first.
    pub async fn past_searches(&self) -> Result<Vec<WordDefinition>, LookupError> {
        Ok(self.cache.list_all().await?)
    }
}
