//! Request boundary: the last stop of a failure before it becomes a response.
//!
//! [`Boundary::respond`] looks at the root cause first:
//!
//! - a deadline is re-attributed to
//!   [`CONTEXT_DEADLINE_EXCEEDED`] and compiled (408)
//! - a cancellation skips compilation entirely: 499, `text/plain`, no body
//! - anything else is compiled as-is under the configured domain
//!
//! The result is a [`Reply`] carrying status, content type and a serializable
//! body. Writing it to the wire belongs to the web framework.

use crate::compiler::{AppError, Classifier};
use crate::config::{BoundaryConfig, RequestMeta, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};
use crate::definitions::CONTEXT_DEADLINE_EXCEEDED;
use crate::failure::{root_cause, BoxError, Failure};
use crate::logging::describe;
use crate::signals::{default_detectors, Signal, SignalDetector};
use crate::Code;
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Status sent when the client cancelled the request.
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Message attached when a deadline is re-attributed.
const DEADLINE_MESSAGE: &str = "context deadline exceeded";

/// Turns failures into replies.
pub struct Boundary {
    classifier: Arc<Classifier>,
    config: BoundaryConfig,
    detectors: Vec<Box<dyn SignalDetector>>,
}

impl Boundary {
    /// Boundary with the detectors of every compiled-in runtime.
    pub fn new(classifier: Arc<Classifier>, config: BoundaryConfig) -> Self {
        Self {
            classifier,
            config,
            detectors: default_detectors(),
        }
    }

    /// Add a detector, consulted after the existing ones.
    pub fn with_detector(mut self, detector: impl SignalDetector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// Configuration this boundary was built with.
    #[inline]
    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    /// Shared classifier used to compile failures.
    #[inline]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Language and debug flag for a request, per this boundary's config.
    pub fn request_meta(&self, headers: &HeaderMap) -> RequestMeta {
        RequestMeta::from_headers(headers, &self.config)
    }

    /// Signal carried by the root cause of `err`, if any.
    pub fn detect(&self, err: &(dyn Error + 'static)) -> Option<Signal> {
        let root = root_cause(err);
        self.detectors.iter().find_map(|detector| detector.detect(root))
    }

    /// Build the reply for `failure`.
    ///
    /// Each entry of `details` becomes one `errors[]` item whose `reason` is
    /// the reason phrase of the compiled status.
    #[track_caller]
    pub fn respond(&self, failure: impl Into<BoxError>, meta: &RequestMeta, details: &[&str]) -> Reply {
        let mut failure: BoxError = failure.into();

        match self.detect(&*failure) {
            Some(Signal::Cancelled) => {
                debug!("request cancelled by client");
                return Reply::Cancelled;
            }
            Some(Signal::DeadlineExceeded) => {
                warn!(code = CONTEXT_DEADLINE_EXCEEDED.value(), "request deadline exceeded");
                failure = Box::new(Failure::wrap_with_code(
                    failure,
                    CONTEXT_DEADLINE_EXCEEDED,
                    DEADLINE_MESSAGE,
                ));
            }
            None => {}
        }

        let (status, compiled) =
            self.classifier
                .compile(self.config.service, &*failure, meta.language, meta.debug);

        error!(
            code = compiled.code().map(Code::value),
            status,
            failure = %describe(&*failure),
            "request failed"
        );

        let reason = reason_phrase(status);
        let errors = details
            .iter()
            .map(|message| ErrorDetail {
                reason: reason.to_owned(),
                message: (*message).to_owned(),
            })
            .collect();

        Reply::Failed {
            status,
            body: ErrorResponse {
                error: ErrorBody { compiled, errors },
            },
        }
    }
}

impl fmt::Debug for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Boundary")
            .field("config", &self.config)
            .field("detectors", &self.detectors.len())
            .finish_non_exhaustive()
    }
}

/// Canonical reason phrase, or `""` for statuses without one (such as 499).
pub fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default()
}

// ============================================================================
// Reply
// ============================================================================

/// What the web layer should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Client went away; 499 with an empty `text/plain` body.
    Cancelled,
    /// Compiled failure; JSON body.
    Failed {
        /// HTTP status.
        status: u16,
        /// Response payload.
        body: ErrorResponse,
    },
}

impl Reply {
    /// HTTP status to send.
    pub const fn status(&self) -> u16 {
        match self {
            Self::Cancelled => CLIENT_CLOSED_REQUEST,
            Self::Failed { status, .. } => *status,
        }
    }

    /// `Content-Type` header value for this reply.
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Cancelled => CONTENT_TYPE_TEXT,
            Self::Failed { .. } => CONTENT_TYPE_JSON,
        }
    }

    /// Payload, absent for cancellations.
    pub fn body(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Cancelled => None,
            Self::Failed { body, .. } => Some(body),
        }
    }

    /// Serialized payload; empty for cancellations.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures from `serde_json`.
    pub fn to_body_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::Cancelled => Ok(Vec::new()),
            Self::Failed { body, .. } => serde_json::to_vec(body),
        }
    }
}

/// `{"error": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Compiled failure and its detail lines.
    pub error: ErrorBody,
}

/// Inner object of [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    #[serde(flatten)]
    compiled: AppError,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ErrorDetail>,
}

impl ErrorBody {
    /// Code, message and optional debug text.
    #[inline]
    pub fn compiled(&self) -> &AppError {
        &self.compiled
    }

    /// Detail lines, in the order they were passed.
    #[inline]
    pub fn errors(&self) -> &[ErrorDetail] {
        &self.errors
    }
}

/// One free-form detail line in a failed reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Reason phrase of the reply status.
    pub reason: String,
    /// Free-form detail text.
    pub message: String,
}

/// Per-field validation problem reported by a collaborator.
///
/// Its `Display` form is what handlers usually pass as a reply detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Problem for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
