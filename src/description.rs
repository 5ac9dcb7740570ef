use crate::error::Result;
use crate::fetcher::CatalogClient;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Course descriptions keyed by course id. Entries are never evicted.
#[derive(Debug, Default)]
pub struct DescriptionCache {
    entries: HashMap<String, String>,
}

impl DescriptionCache {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, description: String) {
        self.entries.insert(id.into(), description);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct DescriptionLoader {
    client: CatalogClient,
    cache: DescriptionCache,
}

impl DescriptionLoader {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            cache: DescriptionCache::default(),
        }
    }

    /// Fetches the description for `id` unless it is already cached. A failed
    /// fetch leaves the cache untouched so the next call tries again.
    pub async fn load(&mut self, id: &str) -> Result<()> {
        if self.cache.contains(id) {
            debug!("Description for {} already cached", id);
            return Ok(());
        }
        match self.client.fetch_description(id).await {
            Ok(description) => {
                self.cache.insert(id, description);
                Ok(())
            }
            Err(e) => {
                warn!("Could not load description for {}: {}", id, e);
                Err(e)
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.cache.get(id)
    }

    pub fn cache(&self) -> &DescriptionCache {
        &self.cache
    }
}
