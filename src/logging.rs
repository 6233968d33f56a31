//! Structured internal log view of a failure.
//!
//! # Properties
//!
//! - [`FailureLog`] borrows from the [`Failure`] it describes and cannot
//!   outlive it
//! - accessors never allocate
//! - [`FailureLog::write_to`] truncates every field at a UTF-8 boundary so a
//!   hostile or runaway message cannot flood the log sink
//!
//! The log view is for operators only. Nothing here reaches the HTTP
//! response; the boundary emits it through `tracing`.

use crate::{Code, Failure};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use zeroize::Zeroize;

/// Maximum length for any individual field in formatted output.
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Appended to truncated fields.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Metadata value attached to a failure.
///
/// Owned values are zeroized on drop; borrowed values point at static
/// program memory and are left alone.
#[derive(Debug)]
pub struct ContextField {
    value: Cow<'static, str>,
}

impl ContextField {
    /// Stored value.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.value.as_ref()
    }
}

impl From<&'static str> for ContextField {
    fn from(value: &'static str) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }
}

impl From<String> for ContextField {
    fn from(value: String) -> Self {
        Self {
            value: Cow::Owned(value),
        }
    }
}

impl From<Cow<'static, str>> for ContextField {
    fn from(value: Cow<'static, str>) -> Self {
        Self { value }
    }
}

impl Zeroize for ContextField {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.value {
            s.zeroize();
        }
    }
}

impl Drop for ContextField {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Borrowed log entry for one [`Failure`] layer.
///
/// ```rust
/// # use apperr::{Failure, definitions};
/// let err = Failure::with_code(definitions::SQL_READ, "select users")
///     .with_metadata("table", "users");
/// let mut line = String::new();
/// err.internal_log().write_to(&mut line).unwrap();
/// assert!(line.starts_with("[201] select users"));
/// assert!(line.contains("table='users'"));
/// ```
#[derive(Debug)]
pub struct FailureLog<'a> {
    code: Option<Code>,
    message: &'a str,
    location: &'static Location<'static>,
    metadata: &'a [(&'static str, ContextField)],
    cause: Option<&'a (dyn Error + Send + Sync + 'static)>,
}

impl<'a> FailureLog<'a> {
    pub(crate) fn new(
        code: Option<Code>,
        message: &'a str,
        location: &'static Location<'static>,
        metadata: &'a [(&'static str, ContextField)],
        cause: Option<&'a (dyn Error + Send + Sync + 'static)>,
    ) -> Self {
        Self {
            code,
            message,
            location,
            metadata,
            cause,
        }
    }

    /// Write a single log line without materializing the whole chain first.
    ///
    /// Format: `[code] message at file:line key='value' cause='...'`, where
    /// the code is `-` when absent.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "[{code}]")?,
            None => f.write_str("[-]")?,
        }
        write!(
            f,
            " {} at {}:{}",
            truncate_with_indicator(self.message),
            self.location.file(),
            self.location.line()
        )?;

        for (key, value) in self.metadata {
            write!(f, " {}='{}'", key, truncate_with_indicator(value.as_str()))?;
        }

        if let Some(cause) = self.cause {
            let rendered = cause.to_string();
            write!(f, " cause='{}'", truncate_with_indicator(&rendered))?;
        }

        Ok(())
    }

    /// Code of the layer, if any.
    #[inline]
    pub const fn code(&self) -> Option<Code> {
        self.code
    }

    /// Layer message, untruncated.
    #[inline]
    pub const fn message(&self) -> &str {
        self.message
    }

    /// Call site that created the layer.
    #[inline]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Key/value pairs attached to the layer.
    #[inline]
    pub const fn metadata(&self) -> &[(&'static str, ContextField)] {
        self.metadata
    }
}

/// One-line operator description of any failure.
///
/// [`Failure`] values use their structured log; foreign errors fall back to
/// their truncated `Display` output.
pub fn describe(err: &(dyn Error + 'static)) -> String {
    let mut line = String::new();
    match err.downcast_ref::<Failure>() {
        Some(failure) => {
            // Writing into a String cannot fail.
            let _ = failure.internal_log().write_to(&mut line);
        }
        None => line.push_str(&truncate_with_indicator(&err.to_string())),
    }
    line
}

/// Truncate a field for display, keeping UTF-8 boundaries intact.
///
/// Returns the input unchanged (borrowed) when it fits.
pub(crate) fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
