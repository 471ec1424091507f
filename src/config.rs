use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Worker configuration: which cache generation to serve from and which
/// resources make up the application shell.
///
/// The configuration is fixed for the lifetime of a worker. Bumping
/// `cache_name` invalidates every previous generation on the next
/// activation.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  /// Origin that root-relative manifest entries resolve against,
  /// e.g. "https://app.example.com".
  pub origin: String,
  /// Versioned name of the current cache generation, e.g. "app-shell-v1".
  pub cache_name: String,
  /// Resources required for the shell to work offline, in fetch order.
  /// Entries are absolute URLs or paths relative to `origin`.
  pub manifest: Vec<String>,
}

impl Config {
  /// Build a configuration programmatically.
  pub fn new(
    origin: impl Into<String>,
    cache_name: impl Into<String>,
    manifest: impl IntoIterator<Item = impl Into<String>>,
  ) -> Result<Self> {
    let config = Self {
      origin: origin.into(),
      cache_name: cache_name.into(),
      manifest: manifest.into_iter().map(Into::into).collect(),
    };
    config.validate()?;
    Ok(config)
  }

  /// Load configuration from a YAML file.
  pub fn load(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<()> {
    if self.cache_name.is_empty() {
      return Err(eyre!("Cache name must not be empty"));
    }

    Url::parse(&self.origin).map_err(|e| eyre!("Invalid origin {}: {}", self.origin, e))?;

    if self.manifest.iter().any(|entry| entry.is_empty()) {
      return Err(eyre!("Manifest entries must not be empty"));
    }

    // Surface unresolvable entries at load time rather than at install.
    self.manifest_urls()?;

    Ok(())
  }

  /// Manifest entries resolved to absolute URLs, preserving order.
  pub fn manifest_urls(&self) -> Result<Vec<Url>> {
    let origin = Url::parse(&self.origin)
      .map_err(|e| eyre!("Invalid origin {}: {}", self.origin, e))?;

    self
      .manifest
      .iter()
      .map(|entry| match Url::parse(entry) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => origin
          .join(entry)
          .map_err(|e| eyre!("Invalid manifest entry {}: {}", entry, e)),
        Err(e) => Err(eyre!("Invalid manifest entry {}: {}", entry, e)),
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_resolves_relative_entries_against_origin() {
    let config = Config::new(
      "https://app.example.com",
      "app-shell-v1",
      ["/", "index.html", "https://cdn.example.com/lib.js"],
    )
    .unwrap();

    let urls = config.manifest_urls().unwrap();
    assert_eq!(urls[0].as_str(), "https://app.example.com/");
    assert_eq!(urls[1].as_str(), "https://app.example.com/index.html");
    assert_eq!(urls[2].as_str(), "https://cdn.example.com/lib.js");
  }

  #[test]
  fn test_rejects_empty_cache_name() {
    let result = Config::new("https://app.example.com", "", ["/"]);
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_invalid_origin() {
    let result = Config::new("not a url", "app-shell-v1", ["/"]);
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_empty_manifest_entry() {
    let result = Config::new("https://app.example.com", "app-shell-v1", [""]);
    assert!(result.is_err());
  }

  #[test]
  fn test_loads_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shell.yaml");
    std::fs::write(
      &path,
      "origin: \"https://app.example.com\"\n\
       cache_name: \"app-shell-v2\"\n\
       manifest:\n\
       \x20 - \"/\"\n\
       \x20 - \"manifest.json\"\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.cache_name, "app-shell-v2");
    assert_eq!(config.manifest.len(), 2);
  }

  #[test]
  fn test_load_missing_file_fails() {
    let result = Config::load(Path::new("/nonexistent/shell.yaml"));
    assert!(result.is_err());
  }
}
