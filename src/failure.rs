//! Coded failures with preserved cause chains.
//!
//! # Model
//!
//! A [`Failure`] is one attribution layer: an optional [`Code`], a short
//! contextual message, the call site that created it, optional metadata and
//! an optional cause. Layers nest through [`std::error::Error::source`], so
//! [`root_cause`] always reaches the original leaf no matter how many times
//! a failure was re-wrapped.
//!
//! # Codes
//!
//! - [`Failure::wrap`] keeps the code of the wrapped failure (if any)
//! - [`Failure::wrap_with_code`] and [`Failure::annotate`] replace it
//! - [`code_of`] reads the outermost code in a chain; foreign error types
//!   carry no code
//!
//! # Rendering
//!
//! `Display` renders every layer as
//!
//! ```text
//! <message>
//!  --- at <file>:<line> ---
//! Caused by: <cause rendering>
//! ```
//!
//! The compiler depends on this layout: the first line is the outermost
//! message, and location trailers start with `"\n ---"`.
//!
//! # Security
//!
//! Messages may hold identifiers or query fragments. Owned message text is
//! zeroized on drop, as are owned metadata values.

use crate::logging::{ContextField, FailureLog};
use crate::Code;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use zeroize::Zeroize;

/// Boxed, thread-safe error used for causes.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// One attribution layer around an optional cause.
#[must_use = "failures should be propagated or handed to the boundary"]
pub struct Failure {
    code: Option<Code>,
    message: Cow<'static, str>,
    location: &'static Location<'static>,
    metadata: SmallVec<[(&'static str, ContextField); 2]>,
    cause: Option<BoxError>,
}

impl Failure {
    #[track_caller]
    fn layer(code: Option<Code>, message: Cow<'static, str>, cause: Option<BoxError>) -> Self {
        Self {
            code,
            message,
            location: Location::caller(),
            metadata: SmallVec::new(),
            cause,
        }
    }

    /// New leaf failure without a code.
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self::layer(None, message.into(), None)
    }

    /// New leaf failure with a code.
    #[track_caller]
    pub fn with_code(code: Code, message: impl Into<Cow<'static, str>>) -> Self {
        Self::layer(Some(code), message.into(), None)
    }

    /// Plain wrap: add context, keep the cause's code.
    #[track_caller]
    pub fn wrap(cause: impl Into<BoxError>, message: impl Into<Cow<'static, str>>) -> Self {
        let cause = cause.into();
        let code = code_of(&*cause);
        Self::layer(code, message.into(), Some(cause))
    }

    /// Plain wrap that attributes a new code.
    #[track_caller]
    pub fn wrap_with_code(
        cause: impl Into<BoxError>,
        code: Code,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::layer(Some(code), message.into(), Some(cause.into()))
    }

    /// Annotated wrap: `token` is the text an annotated template will show.
    ///
    /// The token is collapsed to one trimmed line so that it is exactly the
    /// segment the compiler slices out of the rendering.
    ///
    /// ```rust
    /// # use apperr::{Failure, definitions};
    /// let err = Failure::annotate("parse error", definitions::VALUE_INVALID, "  'age'\n must be >= 0 ");
    /// assert_eq!(err.message(), "'age' must be >= 0");
    /// ```
    #[track_caller]
    pub fn annotate(cause: impl Into<BoxError>, code: Code, token: impl AsRef<str>) -> Self {
        let token = single_line(token.as_ref());
        Self::layer(Some(code), Cow::Owned(token), Some(cause.into()))
    }

    /// Attach operator-only metadata (request ids, keys, table names).
    ///
    /// Metadata appears in [`FailureLog`] output, never in the rendering the
    /// compiler sees.
    pub fn with_metadata(mut self, key: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        self.metadata.push((key, ContextField::from(value.into())));
        self
    }

    /// Code of this layer (inherited from the cause for plain wraps).
    #[inline]
    pub const fn code(&self) -> Option<Code> {
        self.code
    }

    /// Contextual message of this layer.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Where this layer was created.
    #[inline]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Directly wrapped cause.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Take the wrapped cause out of this layer.
    pub fn into_cause(mut self) -> Option<BoxError> {
        self.cause.take()
    }

    /// Innermost failure in this chain.
    #[inline]
    pub fn root_cause(&self) -> &(dyn Error + 'static) {
        root_cause(self)
    }

    /// Log view of this layer.
    pub fn internal_log(&self) -> FailureLog<'_> {
        FailureLog::new(
            self.code,
            self.message.as_ref(),
            self.location,
            &self.metadata,
            self.cause.as_deref(),
        )
    }
}

/// Collapse whitespace runs containing line breaks and trim the ends.
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Drop for Failure {
    fn drop(&mut self) {
        if let Cow::Owned(ref mut s) = self.message {
            s.zeroize();
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("location", &format_args!("{}:{}", self.location.file(), self.location.line()))
            .field("metadata", &self.metadata.len())
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n --- at {}:{} ---",
            self.message,
            self.location.file(),
            self.location.line()
        )?;
        if let Some(cause) = &self.cause {
            write!(f, "\nCaused by: {cause}")?;
        }
        Ok(())
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

// ============================================================================
// Chain Inspection
// ============================================================================

/// Innermost error reached by following `source()` links.
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}

/// Outermost code attached anywhere in the chain.
///
/// Foreign error layers are skipped; a chain without any [`Failure`]
/// carrying a code yields `None`.
pub fn code_of(err: &(dyn Error + 'static)) -> Option<Code> {
    let mut current = Some(err);
    while let Some(layer) = current {
        if let Some(code) = layer.downcast_ref::<Failure>().and_then(Failure::code) {
            return Some(code);
        }
        current = layer.source();
    }
    None
}
