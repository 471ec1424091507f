//! Request and response value types shared by the cache and network seams.

use std::fmt;

use url::Url;

/// Request methods the interception layer distinguishes.
///
/// Only GET participates in caching; every other method passes straight
/// through to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
  Get,
  Head,
  Post,
  Put,
  Delete,
  Options,
  Patch,
}

impl Method {
  pub fn as_str(&self) -> &'static str {
    match self {
      Method::Get => "GET",
      Method::Head => "HEAD",
      Method::Post => "POST",
      Method::Put => "PUT",
      Method::Delete => "DELETE",
      Method::Options => "OPTIONS",
      Method::Patch => "PATCH",
    }
  }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An outgoing request as seen by the interception layer.
#[derive(Debug, Clone)]
pub struct Request {
  pub method: Method,
  pub url: Url,
  pub headers: Vec<(String, String)>,
}

impl Request {
  pub fn new(method: Method, url: Url) -> Self {
    Self {
      method,
      url,
      headers: Vec::new(),
    }
  }

  /// A plain GET request for the given URL.
  pub fn get(url: Url) -> Self {
    Self::new(Method::Get, url)
  }

  /// Cache entries are keyed by the full request URL.
  pub fn cache_key(&self) -> &str {
    self.url.as_str()
  }
}

/// A response, either fresh from the network or replayed from cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
  pub status: u16,
  pub headers: Vec<(String, String)>,
  pub body: Vec<u8>,
}

impl Response {
  pub fn new(status: u16) -> Self {
    Self {
      status,
      headers: Vec::new(),
      body: Vec::new(),
    }
  }

  pub fn with_body(status: u16, body: impl Into<Vec<u8>>) -> Self {
    Self {
      status,
      headers: Vec::new(),
      body: body.into(),
    }
  }

  /// Whether this response may be stored in the cache.
  ///
  /// Only plain 200 responses are persisted; errors, redirects and opaque
  /// statuses never overwrite a cached entry.
  pub fn is_persistable(&self) -> bool {
    self.status == 200
  }
}
