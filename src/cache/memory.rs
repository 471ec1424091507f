//! In-memory cache store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use color_eyre::{eyre::eyre, Result};

use super::traits::{CacheStore, CachedEntry};
use crate::http::{Request, Response};

/// HashMap-backed store. Nothing survives the process; embedders that need
/// generations to outlive a restart use [`SqliteStore`](super::SqliteStore).
#[derive(Default)]
pub struct MemoryStore {
  caches: Mutex<HashMap<String, HashMap<String, CachedEntry>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of entries in the named cache, or `None` if it does not exist.
  pub fn entry_count(&self, name: &str) -> Option<usize> {
    let caches = self.caches.lock().ok()?;
    caches.get(name).map(|cache| cache.len())
  }
}

#[async_trait]
impl CacheStore for MemoryStore {
  async fn open(&self, name: &str) -> Result<()> {
    let mut caches = self
      .caches
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    caches.entry(name.to_string()).or_default();
    Ok(())
  }

  async fn match_request(&self, name: &str, request: &Request) -> Result<Option<CachedEntry>> {
    let caches = self
      .caches
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    Ok(
      caches
        .get(name)
        .and_then(|cache| cache.get(request.cache_key()))
        .cloned(),
    )
  }

  async fn put(&self, name: &str, request: &Request, response: &Response) -> Result<()> {
    let mut caches = self
      .caches
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let cache = caches
      .get_mut(name)
      .ok_or_else(|| eyre!("No cache named {}", name))?;

    cache.insert(
      request.cache_key().to_string(),
      CachedEntry {
        response: response.clone(),
        cached_at: Utc::now(),
      },
    );

    Ok(())
  }

  async fn cache_names(&self) -> Result<Vec<String>> {
    let caches = self
      .caches
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let mut names: Vec<String> = caches.keys().cloned().collect();
    names.sort();
    Ok(names)
  }

  async fn delete(&self, name: &str) -> Result<bool> {
    let mut caches = self
      .caches
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    Ok(caches.remove(name).is_some())
  }
}
