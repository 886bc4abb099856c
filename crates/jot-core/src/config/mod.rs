//! Runtime configuration for reaching the notes service.
//!
//! Values are looked up through a [`ConfigSource`] on every request instead of
//! being cached, so a changed environment is picked up without a restart.
//! Tests inject a [`StaticConfig`] rather than touching the process env.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use url::Url;

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Keys consulted, in order, for the API base URL.
pub const API_BASE_KEYS: [&str; 2] = ["JOT_NOTES_API_BASE", "NOTES_API_BASE"];
/// Key for the origin that relative API bases are resolved against.
pub const APP_ORIGIN_KEY: &str = "JOT_APP_ORIGIN";
/// Base used when no key is set.
pub const DEFAULT_API_BASE: &str = "/api";
/// Origin used for relative bases when `JOT_APP_ORIGIN` is not set.
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";

const COLLECTION_PATH: &str = "/notes";

/// A key/value configuration lookup.
pub trait ConfigSource: Send + Sync + fmt::Debug {
    /// Raw value for `key`, if the source has one.
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: ConfigSource + ?Sized> ConfigSource for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Reads the process environment at lookup time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory values. Clones share the same map, so `set` on one handle is
/// visible through every other.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl ConfigSource for StaticConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

/// Stack of sources; the first layer with a non-blank value wins.
#[derive(Debug, Default)]
pub struct LayeredConfig {
    layers: Vec<Box<dyn ConfigSource>>,
}

impl LayeredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower priority than the existing ones.
    #[must_use]
    pub fn with_layer(mut self, layer: impl ConfigSource + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }
}

impl ConfigSource for LayeredConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.layers
            .iter()
            .find_map(|layer| normalize_text_option(layer.get(key)))
    }
}

/// Resolve the configured API base, falling back to [`DEFAULT_API_BASE`].
///
/// Blank values are treated as unset.
pub fn resolve_api_base(source: &dyn ConfigSource) -> String {
    API_BASE_KEYS
        .iter()
        .find_map(|key| normalize_text_option(source.get(key)))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Resolve the origin used for relative API bases.
pub fn resolve_app_origin(source: &dyn ConfigSource) -> String {
    normalize_text_option(source.get(APP_ORIGIN_KEY))
        .unwrap_or_else(|| DEFAULT_APP_ORIGIN.to_string())
}

/// Absolute URL of the notes collection endpoint, without a trailing slash.
pub fn notes_collection_url(source: &dyn ConfigSource) -> Result<String> {
    let base = resolve_api_base(source);
    let absolute = if is_http_url(&base) {
        Url::parse(&base)
            .map_err(|error| Error::InvalidConfig(format!("API base '{base}': {error}")))?
    } else {
        let origin = resolve_app_origin(source);
        let origin = Url::parse(&origin)
            .map_err(|error| Error::InvalidConfig(format!("app origin '{origin}': {error}")))?;
        if origin.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "app origin '{origin}' cannot resolve relative API base '{base}'"
            )));
        }
        origin
            .join(&base)
            .map_err(|error| Error::InvalidConfig(format!("API base '{base}': {error}")))?
    };

    Ok(format!(
        "{}{COLLECTION_PATH}",
        absolute.as_str().trim_end_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn api_base_defaults_to_relative_api_path() {
        assert_eq!(resolve_api_base(&StaticConfig::new()), "/api");
    }

    #[test]
    fn prefixed_key_wins_over_plain_key() {
        let config = StaticConfig::new()
            .with("JOT_NOTES_API_BASE", "https://a.example.com")
            .with("NOTES_API_BASE", "https://b.example.com");
        assert_eq!(resolve_api_base(&config), "https://a.example.com");
    }

    #[test]
    fn blank_prefixed_key_falls_through() {
        let config = StaticConfig::new()
            .with("JOT_NOTES_API_BASE", "  ")
            .with("NOTES_API_BASE", "https://b.example.com");
        assert_eq!(resolve_api_base(&config), "https://b.example.com");
    }

    #[test]
    fn relative_base_resolves_against_origin() {
        let url = notes_collection_url(&StaticConfig::new()).unwrap();
        assert_eq!(url, "http://localhost:3000/api/notes");

        let config = StaticConfig::new().with("JOT_APP_ORIGIN", "https://notes.example.com");
        assert_eq!(
            notes_collection_url(&config).unwrap(),
            "https://notes.example.com/api/notes"
        );
    }

    #[test]
    fn absolute_base_is_used_as_is() {
        let config = StaticConfig::new().with("NOTES_API_BASE", "http://127.0.0.1:8080/v1/");
        assert_eq!(
            notes_collection_url(&config).unwrap(),
            "http://127.0.0.1:8080/v1/notes"
        );
    }

    #[test]
    fn invalid_origin_is_a_config_error() {
        let config = StaticConfig::new().with("JOT_APP_ORIGIN", "not a url");
        assert!(matches!(
            notes_collection_url(&config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn static_config_changes_are_visible_through_clones() {
        let config = StaticConfig::new();
        let handle = config.clone();
        handle.set("NOTES_API_BASE", "https://late.example.com");
        assert_eq!(resolve_api_base(&config), "https://late.example.com");
        handle.remove("NOTES_API_BASE");
        assert_eq!(resolve_api_base(&config), "/api");
    }

    #[test]
    fn layered_config_prefers_earlier_layers() {
        let overrides = StaticConfig::new().with("NOTES_API_BASE", "https://cli.example.com");
        let fallback = StaticConfig::new()
            .with("NOTES_API_BASE", "https://env.example.com")
            .with("JOT_APP_ORIGIN", "https://origin.example.com");
        let layered = LayeredConfig::new()
            .with_layer(overrides)
            .with_layer(fallback);

        assert_eq!(resolve_api_base(&layered), "https://cli.example.com");
        assert_eq!(resolve_app_origin(&layered), "https://origin.example.com");
    }
}
