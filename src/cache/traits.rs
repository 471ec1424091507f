//! Core trait and types for cache storage backends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use color_eyre::Result;

use crate::http::{Request, Response};

/// A stored response together with its storage timestamp.
#[derive(Debug, Clone)]
pub struct CachedEntry {
  /// The stored response
  pub response: Response,
  /// When the entry was stored
  pub cached_at: DateTime<Utc>,
}

/// Host-provided named cache storage.
///
/// One logical cache (a "generation") per name; entries within a
/// generation are keyed by request URL. Writes replace an entry wholesale,
/// so backends only need atomic per-key overwrite, never read-modify-write.
#[async_trait]
pub trait CacheStore: Send + Sync {
  /// Open the named cache, creating it if absent.
  async fn open(&self, name: &str) -> Result<()>;

  /// Look up the stored entry for a request. A miss is `Ok(None)`,
  /// including when the named cache does not exist.
  async fn match_request(&self, name: &str, request: &Request) -> Result<Option<CachedEntry>>;

  /// Store a response under the request's URL, replacing any previous
  /// entry. Fails if the named cache does not exist; a store never
  /// recreates a deleted generation.
  async fn put(&self, name: &str, request: &Request, response: &Response) -> Result<()>;

  /// Names of all existing cache generations.
  async fn cache_names(&self) -> Result<Vec<String>>;

  /// Delete an entire cache generation and all its entries. Returns
  /// `false` if no cache by that name existed.
  async fn delete(&self, name: &str) -> Result<bool>;
}
