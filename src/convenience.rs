//! Convenience macros for declaring codes and raising coded failures.
//!
//! # Usage
//!
//! ```rust
//! use apperr::{definitions, failure, Failure};
//!
//! fn find_user(id: u64) -> Result<(), Failure> {
//!     if id == 0 {
//!         return Err(failure!(definitions::SQL_RECORD_DOES_NOT_EXIST, "user {} not found", id));
//!     }
//!     Ok(())
//! }
//!
//! let err = find_user(0).unwrap_err();
//! assert_eq!(err.code(), Some(definitions::SQL_RECORD_DOES_NOT_EXIST));
//! ```

/// Declare one code inside a band.
///
/// The value is checked against the band in a const context, so a value
/// outside the band is a compile error.
///
/// ```rust
/// # use apperr::{define_code, bands};
/// define_code!(SQL_VACUUM, bands::SQL, 290);
/// assert_eq!(SQL_VACUUM.value(), 290);
/// ```
#[macro_export]
macro_rules! define_code {
    ($name:ident, $band:expr, $value:expr) => {
        pub const $name: $crate::Code = $crate::Code::banded(&$band, $value);
    };
}

/// Declare a block of codes inside one band, plus a slice listing them.
///
/// The slice (`$all`) pairs every constant's name with its code so tests can
/// iterate the registry without repeating it.
///
/// ```rust
/// # use apperr::{define_codes, bands};
/// define_codes! {
///     bands::HTTP_CLIENT => RETRY_CODES {
///         HTTP_CLIENT_RETRY_EXHAUSTED = 590,
///         HTTP_CLIENT_RETRY_ABORTED = 591,
///     }
/// }
/// assert_eq!(RETRY_CODES.len(), 2);
/// assert_eq!(RETRY_CODES[1].0, "HTTP_CLIENT_RETRY_ABORTED");
/// ```
#[macro_export]
macro_rules! define_codes {
    ($band:expr => $all:ident { $( $(#[$meta:meta])* $name:ident = $value:expr ),+ $(,)? }) => {
        $(
            $(#[$meta])*
            pub const $name: $crate::Code = $crate::Code::banded(&$band, $value);
        )+

        /// Every code declared in this block, paired with its constant name.
        pub const $all: &[(&str, $crate::Code)] = &[ $( (stringify!($name), $name) ),+ ];
    };
}

/// Build a coded [`Failure`](crate::Failure) from a format string.
///
/// The call-site location recorded in the failure is the macro's call site.
#[macro_export]
macro_rules! failure {
    ($code:expr, $($arg:tt)+) => {
        $crate::Failure::with_code($code, ::std::format!($($arg)+))
    };
}

/// Return early with a coded failure built from a format string.
///
/// The failure is converted with `Into`, so the enclosing function may
/// return either `Result<_, Failure>` or `Result<_, BoxError>`.
#[macro_export]
macro_rules! bail {
    ($code:expr, $($arg:tt)+) => {
        return ::std::result::Result::Err($crate::failure!($code, $($arg)+).into())
    };
}

// ============================================================================
// Tests
// ============================================================================
