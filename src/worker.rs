//! The request interception and cache management component.
//!
//! [`ShellWorker`] exposes the three handlers the host dispatches and
//! awaits: install populates the current cache generation from the
//! manifest, fetch answers GET requests cache-first while refreshing the
//! cache in the background, activate deletes superseded generations.

use std::sync::Arc;

use color_eyre::{eyre::eyre, Result};
use futures::future::{join_all, try_join_all};
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::http::{Method, Request, Response};
use crate::net::NetworkFetch;

/// Request interception and cache manager for the application shell.
///
/// The store and fetcher are shared handles: background refresh tasks
/// keep using them after the originating fetch call has returned.
pub struct ShellWorker<S: CacheStore, N: NetworkFetch> {
  config: Config,
  store: Arc<S>,
  network: Arc<N>,
}

impl<S, N> ShellWorker<S, N>
where
  S: CacheStore + 'static,
  N: NetworkFetch + 'static,
{
  pub fn new(config: Config, store: Arc<S>, network: Arc<N>) -> Self {
    Self {
      config,
      store,
      network,
    }
  }

  /// Name of the cache generation this worker serves from.
  pub fn cache_name(&self) -> &str {
    &self.config.cache_name
  }

  /// Install: populate the current cache generation with every manifest
  /// resource.
  ///
  /// All-or-nothing: the whole manifest is fetched before the first entry
  /// is stored, and any fetch failure (or non-200 resource) fails the
  /// install. The host keeps the previous version active on failure.
  pub async fn handle_install(&self) -> Result<()> {
    let cache_name = &self.config.cache_name;
    self.store.open(cache_name).await?;

    let requests: Vec<Request> = self
      .config
      .manifest_urls()?
      .into_iter()
      .map(Request::get)
      .collect();

    let responses = try_join_all(requests.iter().map(|request| {
      let network = Arc::clone(&self.network);
      async move {
        let response = network.fetch(request).await?;
        if !response.is_persistable() {
          return Err(eyre!(
            "Shell resource {} returned status {}",
            request.url,
            response.status
          ));
        }
        Ok::<Response, color_eyre::eyre::Report>(response)
      }
    }))
    .await?;

    for (request, response) in requests.iter().zip(&responses) {
      self.store.put(cache_name, request, response).await?;
    }

    info!(
      "Cache {} populated with {} shell resources",
      cache_name,
      requests.len()
    );
    Ok(())
  }

  /// Fetch: answer an intercepted request.
  ///
  /// Non-GET requests pass straight through to the network with no cache
  /// involvement. For GET, the cache lookup and the network request are
  /// both in flight at once; a cache hit is returned immediately while
  /// the network response refreshes the entry for the next request. On a
  /// miss the network result is the answer, and a network failure
  /// propagates to the caller.
  pub async fn handle_fetch(&self, request: Request) -> Result<Response> {
    if request.method != Method::Get {
      return self.network.fetch(&request).await;
    }

    let cache_name = self.config.cache_name.clone();
    self.store.open(&cache_name).await?;

    // Revalidation starts before the lookup suspends. A 200 overwrites
    // the stored entry whether or not the caller was served from cache;
    // anything else is returned but never persisted.
    let revalidate = tokio::spawn({
      let store = Arc::clone(&self.store);
      let network = Arc::clone(&self.network);
      let cache_name = cache_name.clone();
      let request = request.clone();
      async move {
        let response = network.fetch(&request).await?;
        if response.is_persistable() {
          if let Err(e) = store.put(&cache_name, &request, &response).await {
            debug!("Failed to refresh cache entry for {}: {}", request.url, e);
          }
        }
        Ok::<Response, color_eyre::eyre::Report>(response)
      }
    });

    // The lookup result is inspected first, so a hit wins even when the
    // network task has already resolved or failed.
    match self.store.match_request(&cache_name, &request).await? {
      Some(entry) => {
        debug!("Cache hit for {}", request.url);
        // The revalidation task keeps running detached; its outcome is
        // not the caller's concern.
        Ok(entry.response)
      }
      None => {
        debug!("Cache miss for {}", request.url);
        revalidate
          .await
          .map_err(|e| eyre!("Network task failed: {}", e))?
      }
    }
  }

  /// Activate: delete every cache generation other than the current one.
  ///
  /// Deletions proceed independently; one failure does not stop the
  /// others, but any failure fails the activation step as a whole.
  pub async fn handle_activate(&self) -> Result<()> {
    let current = &self.config.cache_name;
    let names = self.store.cache_names().await?;

    let stale: Vec<String> = names.into_iter().filter(|name| name != current).collect();

    let results = join_all(stale.iter().map(|name| {
      let store = Arc::clone(&self.store);
      async move {
        match store.delete(name).await {
          Ok(_) => {
            debug!("Deleted stale cache {}", name);
            Ok(())
          }
          Err(e) => Err(eyre!("Failed to delete cache {}: {}", name, e)),
        }
      }
    }))
    .await;

    let failures: Vec<String> = results
      .into_iter()
      .filter_map(|result| result.err())
      .map(|e| e.to_string())
      .collect();

    if !failures.is_empty() {
      return Err(eyre!("Activation cleanup failed: {}", failures.join("; ")));
    }

    info!("Activated cache generation {}", current);
    Ok(())
  }
}
