//! Dashboard configuration
//!
//! The serving page can inject the API location via `<meta>` tags or a
//! `window.__PANTRY_CONFIG__` object.

use serde::Deserialize;
use wasm_bindgen::JsCast;

pub const FALLBACK_API_URL: &str = "http://localhost:8000";

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// API base URL (e.g., "http://localhost:8000")
    pub api_url: String,
    /// Server version (injected by server)
    pub version: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: FALLBACK_API_URL.to_string(),
            version: None,
        }
    }
}

/// Raw values found in the page, before precedence is applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSources {
    pub meta_api_url: Option<String>,
    pub meta_version: Option<String>,
    pub injected: InjectedConfig,
    pub origin: Option<String>,
}

/// Shape of `window.__PANTRY_CONFIG__`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InjectedConfig {
    pub api_url: Option<String>,
    pub version: Option<String>,
}

impl DashboardConfig {
    /// Load configuration from the current page
    pub fn load() -> Self {
        Self::resolve(ConfigSources::from_page())
    }

    /// Apply precedence (priority order):
    /// 1. `<meta name="pantry:api-url">` tag (server-injected)
    /// 2. `window.__PANTRY_CONFIG__.api_url`
    /// 3. Current window origin
    /// 4. `http://localhost:8000`
    pub fn resolve(sources: ConfigSources) -> Self {
        let ConfigSources {
            meta_api_url,
            meta_version,
            injected,
            origin,
        } = sources;

        let api_url = non_empty(meta_api_url)
            .or_else(|| non_empty(injected.api_url))
            .or_else(|| non_empty(origin).filter(|origin| origin != "null"))
            .unwrap_or_else(|| FALLBACK_API_URL.to_string());

        Self {
            api_url,
            version: non_empty(meta_version).or_else(|| non_empty(injected.version)),
        }
    }

    /// Get the API base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl ConfigSources {
    fn from_page() -> Self {
        let window = web_sys::window();
        let document = window.as_ref().and_then(|w| w.document());

        Self {
            meta_api_url: document
                .as_ref()
                .and_then(|doc| get_meta_content(doc, "pantry:api-url")),
            meta_version: document
                .as_ref()
                .and_then(|doc| get_meta_content(doc, "pantry:version")),
            injected: window
                .as_ref()
                .and_then(get_injected_config)
                .unwrap_or_default(),
            origin: window.and_then(|w| w.location().origin().ok()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

/// Get content from a <meta name="..."> tag
fn get_meta_content(document: &web_sys::Document, name: &str) -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content())
}

/// Read window.__PANTRY_CONFIG__
fn get_injected_config(window: &web_sys::Window) -> Option<InjectedConfig> {
    let config = js_sys::Reflect::get(window, &"__PANTRY_CONFIG__".into()).ok()?;
    if config.is_undefined() || config.is_null() {
        return None;
    }
    serde_wasm_bindgen::from_value(config).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::resolve(ConfigSources::default());
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.api_url(), "http://localhost:8000");
    }

    #[test]
    fn test_meta_tag_wins() {
        let config = DashboardConfig::resolve(ConfigSources {
            meta_api_url: Some("https://api.pantry.example/".into()),
            meta_version: Some("1.4.0".into()),
            injected: InjectedConfig {
                api_url: Some("http://injected".into()),
                version: None,
            },
            origin: Some("http://origin".into()),
        });
        assert_eq!(config.api_url, "https://api.pantry.example");
        assert_eq!(config.version.as_deref(), Some("1.4.0"));
    }

    #[test]
    fn test_injected_then_origin() {
        let mut sources = ConfigSources {
            meta_api_url: Some("  ".into()),
            injected: InjectedConfig {
                api_url: Some("http://injected:9000".into()),
                version: Some("dev".into()),
            },
            origin: Some("http://origin".into()),
            ..Default::default()
        };
        let config = DashboardConfig::resolve(sources.clone());
        assert_eq!(config.api_url, "http://injected:9000");
        assert_eq!(config.version.as_deref(), Some("dev"));

        sources.injected = InjectedConfig::default();
        assert_eq!(DashboardConfig::resolve(sources).api_url, "http://origin");
    }

    #[test]
    fn test_opaque_origin_is_ignored() {
        let config = DashboardConfig::resolve(ConfigSources {
            origin: Some("null".into()),
            ..Default::default()
        });
        assert_eq!(config.api_url, FALLBACK_API_URL);
    }
}
