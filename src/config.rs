//! Boundary configuration and per-request metadata.
//!
//! [`BoundaryConfig`] is plain data with serde defaults for every field, so an
//! application can embed it in its own configuration file and omit whatever
//! it does not care about:
//!
//! ```rust
//! use apperr::config::BoundaryConfig;
//! use apperr::{Language, ServiceType};
//!
//! let config: BoundaryConfig = serde_json::from_str(r#"{"service": "HTTP"}"#).unwrap();
//! assert_eq!(config.service, ServiceType::Http);
//! assert_eq!(config.default_language, Language::En);
//! assert!(config.honor_debug_header);
//! ```

use crate::messages::Language;
use crate::ServiceType;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Default header selecting the response language.
pub const LANGUAGE_HEADER: &str = "x-app-lang";

/// Default header requesting debug output.
pub const DEBUG_HEADER: &str = "x-app-debug";

/// Content type of cancellation replies.
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Content type of compiled error replies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Settings of a [`Boundary`](crate::Boundary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Domain passed to the classifier.
    pub service: ServiceType,
    /// Language used when the request does not ask for Indonesian.
    pub default_language: Language,
    /// Whether the debug header may enable `debug_error`.
    pub honor_debug_header: bool,
    /// Name of the debug header.
    pub debug_header: String,
    /// Name of the language header.
    pub language_header: String,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            service: ServiceType::Internal,
            default_language: Language::En,
            honor_debug_header: true,
            debug_header: DEBUG_HEADER.to_owned(),
            language_header: LANGUAGE_HEADER.to_owned(),
        }
    }
}

/// Per-request inputs to compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestMeta {
    /// Response language.
    pub language: Language,
    /// Whether the caller is authorized to see `debug_error`.
    pub debug: bool,
}

impl RequestMeta {
    /// Metadata with an explicit language and debug flag.
    #[inline]
    pub const fn new(language: Language, debug: bool) -> Self {
        Self { language, debug }
    }

    /// Read language and debug flag from request headers.
    ///
    /// The language is Indonesian only when the language header is exactly
    /// `id`. Debug is on only when the debug header is exactly `true` and the
    /// config honors it. Unreadable header values count as absent.
    pub fn from_headers(headers: &HeaderMap, config: &BoundaryConfig) -> Self {
        let language = match header_str(headers, &config.language_header) {
            Some(Language::TAG_ID) => Language::Id,
            _ => config.default_language,
        };
        let debug =
            config.honor_debug_header && header_str(headers, &config.debug_header) == Some("true");

        Self { language, debug }
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
