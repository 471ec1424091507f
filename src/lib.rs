//! Offline-first application shell caching.
//!
//! This crate implements a request-interception layer that serves a small
//! static application shell from a named cache, falling back to and
//! refreshing from the network. The host platform is abstracted behind two
//! traits so the component runs against fakes in tests:
//!
//! - [`cache::CacheStore`] - named cache generations holding URL-keyed
//!   response entries
//! - [`net::NetworkFetch`] - resolve a request to a response or fail
//!
//! The component itself is [`ShellWorker`], which exposes the three
//! handlers the host dispatches:
//!
//! - install: populate the current cache generation from the manifest
//! - fetch: answer GET requests cache-first while refreshing in the
//!   background (stale-while-revalidate); pass everything else through
//! - activate: delete superseded cache generations

pub mod cache;
pub mod config;
pub mod http;
pub mod net;
pub mod worker;

pub use config::Config;
pub use worker::ShellWorker;
