//! Failure → (status, localized message) compilation.
//!
//! # Lookup cascade
//!
//! 1. The catalogs of [`GENERIC_PRECEDENCE`] are searched in order; the first
//!    one listing the code wins, whatever domain the caller named.
//! 2. Otherwise the caller's own domain catalog is consulted.
//! 3. A domain without a catalog compiles to 500 `"service error not defined!"`;
//!    a catalog without the code compiles to 500 `"error message not defined!"`.
//!
//! A failure carrying no code fails every lookup and lands in step 3.
//!
//! # Purity
//!
//! [`Classifier::compile`] reads only its arguments and the immutable
//! catalogs. It renders the failure once, never panics, and returns equal
//! results for equal inputs.

use crate::catalog::{self, Catalog};
use crate::definitions::HTTP_VALIDATOR_ERROR;
use crate::failure::code_of;
use crate::messages::{Formatting, Language, Message, PLACEHOLDER};
use crate::{Code, ServiceType, GENERIC_PRECEDENCE};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Message for a domain that has no catalog.
pub const SERVICE_NOT_DEFINED: &str = "service error not defined!";

/// Message for a code its domain catalog does not list.
pub const MESSAGE_NOT_DEFINED: &str = "error message not defined!";

/// Status used by both fallbacks.
pub const FALLBACK_STATUS: u16 = 500;

/// Start of the location trailer in a failure rendering. Validation failures
/// resolved through the caller's domain show the rendering up to this point
/// instead of the template text.
const VALIDATION_TRAILER: &str = "\n ---";

// ============================================================================
// Classifier
// ============================================================================

/// Immutable set of domain catalogs plus the compile operation.
///
/// Build one at startup and share it (`Arc<Classifier>`); it is `Send + Sync`.
///
/// ```rust
/// use apperr::{Classifier, Failure, Language, ServiceType, definitions};
///
/// let classifier = Classifier::standard();
/// let err = Failure::with_code(definitions::SQL_RECORD_DOES_NOT_EXIST, "user 42");
/// let (status, compiled) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
/// assert_eq!(status, 404);
/// assert_eq!(compiled.code(), Some(definitions::SQL_RECORD_DOES_NOT_EXIST));
/// assert!(compiled.debug_error().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    catalogs: HashMap<ServiceType, Catalog>,
    validation_code: Option<Code>,
}

impl Classifier {
    /// Classifier with the four standard catalogs registered.
    pub fn standard() -> Self {
        Self::builder()
            .register(ServiceType::Common, catalog::general())
            .register(ServiceType::Http, catalog::http())
            .register(ServiceType::Sql, catalog::sql())
            .register(ServiceType::Cache, catalog::cache())
            .build()
    }

    /// Empty builder; the validation code defaults to
    /// [`HTTP_VALIDATOR_ERROR`].
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder {
            catalogs: HashMap::new(),
            validation_code: Some(HTTP_VALIDATOR_ERROR),
        }
    }

    /// Catalog registered for `service`.
    #[inline]
    pub fn catalog(&self, service: ServiceType) -> Option<&Catalog> {
        self.catalogs.get(&service)
    }

    /// Code whose domain-resolved messages show the failure text up to its location trailer.
    #[inline]
    pub const fn validation_code(&self) -> Option<Code> {
        self.validation_code
    }

    /// Compile `err` for a caller in domain `service`.
    ///
    /// `debug_mode` authorizes copying the full failure rendering into
    /// [`AppError::debug_error`].
    pub fn compile(
        &self,
        service: ServiceType,
        err: &(dyn Error + 'static),
        language: Language,
        debug_mode: bool,
    ) -> (u16, AppError) {
        let rendered = err.to_string();
        let debug_error = (debug_mode && !rendered.is_empty()).then(|| rendered.clone());
        let code = code_of(err);

        let (status, message) = match self.lookup(service, code) {
            Lookup::Generic(template) => (template.status(), fill_template(template, language, &rendered)),
            Lookup::Domain(template) => {
                let message = if code.is_some() && code == self.validation_code && !rendered.is_empty() {
                    cut_validation_trailer(&rendered)
                } else {
                    fill_template(template, language, &rendered)
                };
                (template.status(), message)
            }
            Lookup::UnknownService => (FALLBACK_STATUS, SERVICE_NOT_DEFINED.to_owned()),
            Lookup::UnknownCode => (FALLBACK_STATUS, MESSAGE_NOT_DEFINED.to_owned()),
        };

        let compiled = AppError {
            code,
            message,
            debug_error,
            status,
            rendered,
        };
        (status, compiled)
    }

    fn lookup(&self, service: ServiceType, code: Option<Code>) -> Lookup<'_> {
        if let Some(code) = code {
            let generic = GENERIC_PRECEDENCE
                .iter()
                .filter_map(|s| self.catalogs.get(s))
                .find_map(|catalog| catalog.get(code));
            if let Some(template) = generic {
                return Lookup::Generic(template);
            }
        }

        match self.catalogs.get(&service) {
            None => Lookup::UnknownService,
            Some(catalog) => match code.and_then(|c| catalog.get(c)) {
                Some(template) => Lookup::Domain(template),
                None => Lookup::UnknownCode,
            },
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard()
    }
}

enum Lookup<'a> {
    Generic(&'a Message),
    Domain(&'a Message),
    UnknownService,
    UnknownCode,
}

/// Assembles a [`Classifier`].
///
/// Registering a domain twice keeps the last catalog.
#[derive(Debug, Clone)]
#[must_use]
pub struct ClassifierBuilder {
    catalogs: HashMap<ServiceType, Catalog>,
    validation_code: Option<Code>,
}

impl ClassifierBuilder {
    /// Register `catalog` as the catalog of `service`.
    pub fn register(mut self, service: ServiceType, catalog: Catalog) -> Self {
        self.catalogs.insert(service, catalog);
        self
    }

    /// Code whose domain-resolved messages show the failure text up to the location trailer,
    /// or `None` to disable the cut.
    pub fn validation_code(mut self, code: Option<Code>) -> Self {
        self.validation_code = code;
        self
    }

    /// Freeze the registered catalogs into a [`Classifier`].
    pub fn build(self) -> Classifier {
        Classifier {
            catalogs: self.catalogs,
            validation_code: self.validation_code,
        }
    }
}

// ============================================================================
// Formatting
// ============================================================================

fn fill_template(template: &Message, language: Language, rendered: &str) -> String {
    let text = template.text(language);
    match template.formatting() {
        Formatting::Verbatim => text.to_owned(),
        Formatting::Annotated => fill(text, &annotation_token(rendered)),
        Formatting::Custom => fill(text, first_line(rendered)),
    }
}

fn fill(text: &str, value: &str) -> String {
    text.replacen(PLACEHOLDER, value, 1)
}

/// Leading segment of the escaped rendering, up to the first `\n` escape.
///
/// Without an escape the whole quoted rendering is returned, quotes included.
fn annotation_token(rendered: &str) -> String {
    let quoted = format!("{rendered:?}");
    match quoted.find("\\n") {
        Some(idx) if idx > 0 => quoted[1..idx].trim().to_owned(),
        _ => quoted,
    }
}

fn first_line(rendered: &str) -> &str {
    rendered.split_once('\n').map_or(rendered, |(head, _)| head)
}

fn cut_validation_trailer(rendered: &str) -> String {
    match rendered.find(VALIDATION_TRAILER) {
        Some(idx) => rendered[..idx].trim_end().to_owned(),
        None => rendered.to_owned(),
    }
}

// ============================================================================
// Compiled Result
// ============================================================================

/// Outcome of compiling one failure.
///
/// Serializes as `{"code", "message", "debug_error"?}`; an absent code is
/// written as [`Code::UNASSIGNED`]. `Display` shows the full failure
/// rendering, which is for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppError {
    #[serde(serialize_with = "serialize_code")]
    code: Option<Code>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug_error: Option<String>,
    #[serde(skip)]
    status: u16,
    #[serde(skip)]
    rendered: String,
}

impl AppError {
    /// Code found on the failure chain.
    #[inline]
    pub const fn code(&self) -> Option<Code> {
        self.code
    }

    /// Localized user-facing message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Full rendering, present only when debug output was authorized.
    #[inline]
    pub fn debug_error(&self) -> Option<&str> {
        self.debug_error.as_deref()
    }

    /// HTTP status resolved for the failure.
    #[inline]
    pub const fn status(&self) -> u16 {
        self.status
    }
}

fn serialize_code<S: Serializer>(code: &Option<Code>, serializer: S) -> Result<S::Ok, S::Error> {
    code.unwrap_or(Code::UNASSIGNED).serialize(serializer)
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::*;
    use crate::{messages, Failure};
    use std::io;

    fn annotated_catalog() -> Catalog {
        Catalog::new([(
            VALUE_INVALID,
            Message::new(400, "Invalid value: {}", "Nilai tidak valid: {}").annotated(),
        )])
        .unwrap()
    }

    #[test]
    fn annotation_token_stops_at_first_escape() {
        assert_eq!(annotation_token("bad value\nsome trailing debug"), "bad value");
        assert_eq!(annotation_token("  padded  \nrest"), "padded");
    }

    #[test]
    fn annotation_token_without_escape_keeps_quotes() {
        assert_eq!(annotation_token("single line"), "\"single line\"");
    }

    #[test]
    fn annotation_token_of_leading_newline_is_empty() {
        assert_eq!(annotation_token("\nrest"), "");
    }

    #[test]
    fn placeholder_is_replaced_once() {
        assert_eq!(fill("{} and {}", "x"), "x and {}");
        assert_eq!(fill("no slot", "x"), "no slot");
    }

    #[test]
    fn first_line_of_single_line_is_whole() {
        assert_eq!(first_line("one"), "one");
        assert_eq!(first_line("one\ntwo"), "one");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn validation_trailer_is_cut_and_trimmed() {
        assert_eq!(cut_validation_trailer("name: required \n --- at x:1 ---"), "name: required");
        assert_eq!(cut_validation_trailer("name: required\n --- at x:1 ---"), "name: required");
        assert_eq!(cut_validation_trailer("clean"), "clean");
    }

    #[test]
    fn annotated_template_uses_outer_message() {
        let classifier = Classifier::builder().register(ServiceType::Common, annotated_catalog()).build();
        let err = Failure::annotate(io::Error::other("parse int"), VALUE_INVALID, "bad value");

        let (status, en) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
        assert_eq!(status, 400);
        assert_eq!(en.message(), "Invalid value: bad value");

        let (_, id) = classifier.compile(ServiceType::Internal, &err, Language::Id, false);
        assert_eq!(id.message(), "Nilai tidak valid: bad value");
    }

    #[test]
    fn custom_template_uses_first_line() {
        let classifier = Classifier::standard();
        let err = Failure::with_code(HTTP_BAD_REQUEST_CUSTOM, "email is malformed");
        let (status, compiled) = classifier.compile(ServiceType::Http, &err, Language::En, false);
        assert_eq!(status, 400);
        assert_eq!(compiled.message(), "email is malformed");
    }

    #[test]
    fn common_catalog_wins_over_caller_domain() {
        let shadow = Catalog::new([(VALUE_INVALID, Message::new(418, "teapot", "teko"))]).unwrap();
        let classifier = Classifier::builder()
            .register(ServiceType::Common, catalog::general())
            .register(ServiceType::Internal, shadow)
            .build();

        let err = Failure::with_code(VALUE_INVALID, "x");
        let (status, compiled) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
        assert_eq!(status, 400);
        assert_eq!(compiled.message(), messages::BAD_REQUEST.text(Language::En));
    }

    #[test]
    fn domain_catalog_used_when_generic_misses() {
        let own = Catalog::new([(Code::new(4242), Message::new(402, "pay up", "bayar"))]).unwrap();
        let classifier = Classifier::builder().register(ServiceType::Internal, own).build();

        let err = Failure::with_code(Code::new(4242), "quota");
        let (status, compiled) = classifier.compile(ServiceType::Internal, &err, Language::Id, false);
        assert_eq!(status, 402);
        assert_eq!(compiled.message(), "bayar");
    }

    #[test]
    fn unregistered_domain_falls_back() {
        let err = Failure::with_code(Code::new(4242), "nowhere");
        let (status, compiled) = Classifier::standard().compile(ServiceType::Internal, &err, Language::En, false);
        assert_eq!(status, 500);
        assert_eq!(compiled.message(), SERVICE_NOT_DEFINED);
        assert_eq!(compiled.code(), Some(Code::new(4242)));
    }

    #[test]
    fn registered_domain_without_code_falls_back() {
        let err = Failure::with_code(Code::new(4242), "nowhere");
        let (status, compiled) = Classifier::standard().compile(ServiceType::Sql, &err, Language::En, false);
        assert_eq!(status, 500);
        assert_eq!(compiled.message(), MESSAGE_NOT_DEFINED);
    }

    #[test]
    fn uncoded_failures_fail_every_lookup() {
        let err = io::Error::other("raw");
        let classifier = Classifier::standard();
        let (_, registered) = classifier.compile(ServiceType::Http, &err, Language::En, false);
        let (_, unregistered) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
        assert_eq!(registered.message(), MESSAGE_NOT_DEFINED);
        assert_eq!(unregistered.message(), SERVICE_NOT_DEFINED);
        assert_eq!(registered.code(), None);
    }

    #[test]
    fn debug_error_is_gated() {
        let err = Failure::with_code(SQL_READ, "select failed");
        let classifier = Classifier::standard();

        let (_, quiet) = classifier.compile(ServiceType::Sql, &err, Language::En, false);
        assert!(quiet.debug_error().is_none());

        let (_, loud) = classifier.compile(ServiceType::Sql, &err, Language::En, true);
        assert_eq!(loud.debug_error(), Some(err.to_string().as_str()));
    }

    #[test]
    fn empty_rendering_never_becomes_debug_error() {
        let err = io::Error::other("");
        let (_, compiled) = Classifier::standard().compile(ServiceType::Sql, &err, Language::En, true);
        assert!(compiled.debug_error().is_none());
    }

    fn validation_catalog() -> Catalog {
        Catalog::new([(HTTP_VALIDATOR_ERROR, Message::new(400, "Validation failed", "Validasi gagal"))]).unwrap()
    }

    #[test]
    fn validation_failure_shows_its_own_text_via_domain_branch() {
        let classifier = Classifier::builder().register(ServiceType::Internal, validation_catalog()).build();
        let err = Failure::wrap_with_code("field tag mismatch", HTTP_VALIDATOR_ERROR, "name: required");

        let (status, en) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
        assert_eq!(status, 400);
        assert_eq!(en.message(), "name: required");

        let (_, id) = classifier.compile(ServiceType::Internal, &err, Language::Id, false);
        assert_eq!(id.message(), "name: required");
    }

    #[test]
    fn validation_text_keeps_everything_before_the_trailer() {
        let classifier = Classifier::builder().register(ServiceType::Internal, validation_catalog()).build();
        let err = Failure::with_code(HTTP_VALIDATOR_ERROR, "name: required\nemail: invalid  ");
        let (_, compiled) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
        assert_eq!(compiled.message(), "name: required\nemail: invalid");
    }

    #[test]
    fn validation_text_is_not_used_via_generic_branch() {
        let classifier = Classifier::builder().register(ServiceType::Http, validation_catalog()).build();
        let err = Failure::with_code(HTTP_VALIDATOR_ERROR, "name: required");
        let (_, compiled) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
        assert_eq!(compiled.message(), "Validation failed");
    }

    #[test]
    fn validation_text_can_be_disabled() {
        let classifier = Classifier::builder()
            .register(ServiceType::Internal, validation_catalog())
            .validation_code(None)
            .build();
        let err = Failure::with_code(HTTP_VALIDATOR_ERROR, "name: required");
        let (_, compiled) = classifier.compile(ServiceType::Internal, &err, Language::Id, false);
        assert_eq!(compiled.message(), "Validasi gagal");
    }

    #[test]
    fn empty_validation_rendering_keeps_template() {
        #[derive(Debug)]
        struct Silent(Failure);
        impl fmt::Display for Silent {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Ok(())
            }
        }
        impl Error for Silent {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                Some(&self.0)
            }
        }

        let classifier = Classifier::builder().register(ServiceType::Internal, validation_catalog()).build();
        let err = Silent(Failure::with_code(HTTP_VALIDATOR_ERROR, "hidden"));
        let (_, compiled) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
        assert_eq!(compiled.message(), "Validation failed");
    }

    #[test]
    fn compile_is_idempotent() {
        let classifier = Classifier::standard();
        let err = Failure::wrap(Failure::with_code(CACHE_IS_EXPIRED, "ttl"), "load session");
        let first = classifier.compile(ServiceType::Cache, &err, Language::Id, true);
        let second = classifier.compile(ServiceType::Cache, &err, Language::Id, true);
        assert_eq!(first, second);
    }

    #[test]
    fn serialized_shape() {
        let err = Failure::with_code(SQL_UNIQUE_CONSTRAINT, "dup email");
        let (_, compiled) = Classifier::standard().compile(ServiceType::Sql, &err, Language::En, false);
        let json = serde_json::to_value(&compiled).unwrap();
        assert_eq!(json["code"], 215);
        assert_eq!(json["message"], messages::UNIQUE_CONSTRAINT.text(Language::En));
        assert!(json.get("debug_error").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn absent_code_serializes_as_unassigned() {
        let (_, compiled) = Classifier::standard().compile(ServiceType::Sql, &io::Error::other("x"), Language::En, false);
        let json = serde_json::to_value(&compiled).unwrap();
        assert_eq!(json["code"], u64::from(u32::MAX));
    }

    #[test]
    fn display_is_the_failure_rendering() {
        let err = Failure::with_code(SQL_PING, "db down");
        let (_, compiled) = Classifier::standard().compile(ServiceType::Sql, &err, Language::En, false);
        assert_eq!(compiled.to_string(), err.to_string());
    }

    #[test]
    fn classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();
        assert_send_sync::<AppError>();
    }
}
