use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::search::filter_items;

/// One document reference in the catalog. `key` is unique across the
/// catalog and serves as the row identity, the canonical source URL, and
/// the download target reference at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub key: String,
    pub title: String,
    pub year: String,
    pub url: String,
}

/// Canonical catalog plus the currently filtered view.
pub struct CatalogStore {
    client: Client,
    catalog_url: String,
    items: RwLock<Vec<CatalogItem>>,
    filtered: RwLock<Vec<CatalogItem>>,
}

impl CatalogStore {
    pub fn new(catalog_url: String) -> Self {
        Self {
            client: Client::new(),
            catalog_url,
            items: RwLock::new(Vec::new()),
            filtered: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the catalog and replace both views with the full result,
    /// resetting any active filter.
    ///
    /// A failed load is logged and leaves the previous views untouched.
    /// It is not retried and not surfaced to the user.
    pub async fn load(&self) {
        match self.fetch_catalog().await {
            Ok(items) => {
                info!("catalog loaded: {} items", items.len());
                let mut canonical = self.items.write();
                let mut filtered = self.filtered.write();
                *filtered = items.clone();
                *canonical = items;
            }
            Err(e) => {
                warn!("catalog load failed: {}", e);
            }
        }
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>> {
        let resp = self.client.get(&self.catalog_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("catalog fetch failed: HTTP {}", status.as_u16()));
        }
        let body = resp.bytes().await?;
        let items = serde_json::from_slice::<Vec<CatalogItem>>(&body)?;
        Ok(items)
    }

    /// Re-evaluate `query` against the canonical dataset and store the
    /// result as the active filtered view.
    pub fn apply_filter(&self, query: &str) -> Vec<CatalogItem> {
        let filtered = filter_items(&self.items.read(), query);
        *self.filtered.write() = filtered.clone();
        filtered
    }

    /// Full canonical dataset in original order.
    pub fn items(&self) -> Vec<CatalogItem> {
        self.items.read().clone()
    }

    /// Currently active filtered view.
    pub fn filtered(&self) -> Vec<CatalogItem> {
        self.filtered.read().clone()
    }

    /// Number of items in the filtered view (the list header count).
    pub fn filtered_len(&self) -> usize {
        self.filtered.read().len()
    }

    /// Look up a single item by its unique key.
    pub fn find(&self, key: &str) -> Option<CatalogItem> {
        self.items
            .read()
            .iter()
            .find(|item| item.key == key)
            .cloned()
    }
}
