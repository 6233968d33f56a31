//! # apperr
//!
//! Error classification and localized response compilation for HTTP
//! services.
//!
//! ## Design Philosophy
//!
//! 1. **Codes are attached where failures happen**, never guessed at the edge
//! 2. **Every code lives in a reserved band** owned by one domain
//! 3. **Users see catalog text only**; the failure chain stays internal
//! 4. **Debug output is opt-in** per request
//! 5. **Cancellation and deadlines are recognized by root cause** and handled
//!    before ordinary classification
//!
//! ## Pipeline
//!
//! ```text
//! collaborator ── Failure::wrap_with_code ──▶ Boundary::respond
//!                                               │ root cause = cancelled? ──▶ 499, empty body
//!                                               │ root cause = deadline?  ──▶ re-attribute (408)
//!                                               ▼
//!                                       Classifier::compile
//!                                  COMMON → HTTP → SQL → CACHE → caller domain
//!                                               ▼
//!                                  Reply { status, content type, JSON body }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use apperr::{definitions, Failure, Result};
//!
//! fn load_user(id: u64) -> Result<String> {
//!     let driver = std::io::Error::other("connection reset");
//!     Err(Failure::wrap_with_code(driver, definitions::SQL_READ, format!("load user {id}")))
//! }
//!
//! let err = load_user(7).unwrap_err();
//! assert_eq!(err.code(), Some(definitions::SQL_READ));
//! assert!(err.to_string().starts_with("load user 7\n --- at "));
//! ```
//!
//! ## At the Boundary
//!
//! ```rust
//! use apperr::{Boundary, BoundaryConfig, Classifier, Failure, Language, RequestMeta, definitions};
//! use std::sync::Arc;
//!
//! let boundary = Boundary::new(Arc::new(Classifier::standard()), BoundaryConfig::default());
//! let err = Failure::with_code(definitions::SQL_UNIQUE_CONSTRAINT, "insert user");
//!
//! let reply = boundary.respond(err, &RequestMeta::new(Language::En, false), &[]);
//! assert_eq!(reply.status(), 409);
//! assert_eq!(reply.content_type(), "application/json");
//! ```
//!
//! ## Features
//!
//! - `tokio`: recognize `tokio` timeouts and cancelled joins at the boundary
//! - `async_std`: recognize `async-std` timeouts at the boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod catalog;
pub mod codes;
pub mod compiler;
pub mod config;
pub mod convenience;
pub mod definitions;
pub mod failure;
pub mod logging;
pub mod messages;
pub mod signals;

pub use boundary::{Boundary, ErrorBody, ErrorDetail, ErrorResponse, Reply, ValidationError};
pub use catalog::{Catalog, CatalogError};
pub use codes::*;
pub use compiler::{AppError, Classifier, ClassifierBuilder};
pub use config::{BoundaryConfig, RequestMeta};
pub use failure::{code_of, root_cause, BoxError, Failure};
pub use logging::{describe, ContextField, FailureLog};
pub use messages::{Formatting, Language, Message};
pub use signals::{Signal, SignalDetector};

/// Type alias for Results using [`Failure`].
pub type Result<T> = std::result::Result<T, Failure>;
