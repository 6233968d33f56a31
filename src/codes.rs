//! Code namespace - numeric failure codes partitioned into per-domain bands.
//!
//! A collaborator that detects a failure attaches a [`Code`] to it. The code
//! alone decides which catalog entry (and therefore which HTTP status and
//! which localized message) the caller eventually sees.
//!
//! # Band Structure
//!
//! | Band          | Range     | Owning domain          |
//! |---------------|-----------|------------------------|
//! | `CACHE`       | 100-199   | [`ServiceType::Cache`] |
//! | `SQL`         | 200-299   | [`ServiceType::Sql`]   |
//! | `HTTP_CLIENT` | 500-599   | [`ServiceType::Http`]  |
//! | `HTTP_SERVER` | 800-899   | [`ServiceType::Http`]  |
//! | `GENERAL`     | 1000-1999 | [`ServiceType::Common`]|
//!
//! # Governance
//!
//! Bands are frozen: [`Band`] has no public constructor and the only
//! instances live in [`bands`]. Codes declared with [`define_codes!`] are
//! checked against their band by a const assertion, so a code typed into
//! the wrong block fails the build. Disjointness of the bands themselves is
//! asserted at compile time below and re-checked by the unit tests.
//!
//! A new domain must reserve a fresh band here before declaring codes.
//!
//! # Example
//!
//! ```rust
//! use apperr::{Code, bands, band_of, define_codes};
//!
//! define_codes! {
//!     bands::CACHE => EXTRA_CACHE_CODES {
//!         CACHE_WARMUP_FAILED = 150,
//!     }
//! }
//!
//! assert_eq!(CACHE_WARMUP_FAILED.value(), 150);
//! assert_eq!(band_of(CACHE_WARMUP_FAILED).map(|b| b.name()), Some("CACHE"));
//! ```
//!
//! [`define_codes!`]: crate::define_codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

// ============================================================================
// Code
// ============================================================================

/// Numeric failure code.
///
/// Plain classification data that travels with a failure from its point of
/// origin to the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(u32);

impl Code {
    /// Wire value reported when a failure carries no code.
    pub const UNASSIGNED: Code = Code(u32::MAX);

    /// Create a code without band validation.
    ///
    /// Use for custom catalogs in tests or for codes received over the wire.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Create a code that must fall inside `band`.
    ///
    /// # Panics
    ///
    /// Panics if `value` lies outside the band. In const contexts this is a
    /// compile error, which is how [`define_codes!`](crate::define_codes)
    /// enforces governance.
    #[inline]
    pub const fn banded(band: &Band, value: u32) -> Self {
        assert!(band.contains(value), "code lies outside its band");
        Self(value)
    }

    /// Raw numeric value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Code {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Service Type (Domain)
// ============================================================================

/// Domain whose catalog governs a code.
///
/// Discriminants are stable and start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum ServiceType {
    /// General failures shared by every subsystem.
    Common = 1,
    /// HTTP handlers and outbound HTTP clients.
    Http = 2,
    /// SQL storage.
    Sql = 3,
    /// Application-internal failures; no standard catalog is registered for it.
    Internal = 4,
    /// Cache storage.
    Cache = 5,
}

impl ServiceType {
    /// Every domain, in discriminant order.
    pub const ALL: [ServiceType; 5] = [
        ServiceType::Common,
        ServiceType::Http,
        ServiceType::Sql,
        ServiceType::Internal,
        ServiceType::Cache,
    ];

    /// Upper-case name.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Http => "HTTP",
            Self::Sql => "SQL",
            Self::Internal => "INTERNAL",
            Self::Cache => "CACHE",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalogs consulted before the caller's own domain, in this order.
///
/// Generic causes pre-empt domain-specific ones, even when the caller's
/// domain is itself listed here.
pub const GENERIC_PRECEDENCE: [ServiceType; 4] = [
    ServiceType::Common,
    ServiceType::Http,
    ServiceType::Sql,
    ServiceType::Cache,
];

// ============================================================================
// Band (Frozen Identity)
// ============================================================================

/// Reserved, inclusive numeric range owned by one domain.
///
/// Private fields prevent construction outside this module; the canonical
/// instances are in [`bands`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Band {
    name: &'static str,
    service: ServiceType,
    start: u32,
    end: u32,
}

impl Band {
    const fn reserve(name: &'static str, service: ServiceType, start: u32, end: u32) -> Self {
        assert!(start <= end, "band start must not exceed its end");
        Self {
            name,
            service,
            start,
            end,
        }
    }

    /// Band name, e.g. `"SQL"`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Domain whose catalog lists this band's codes.
    #[inline]
    pub const fn service(&self) -> ServiceType {
        self.service
    }

    /// First reserved value.
    #[inline]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// Last reserved value.
    #[inline]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Reserved values as a range.
    #[inline]
    pub const fn range(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Whether `value` is reserved by this band.
    #[inline]
    pub const fn contains(&self, value: u32) -> bool {
        value >= self.start && value <= self.end
    }

    /// Whether two bands share any value.
    #[inline]
    pub const fn overlaps(&self, other: &Band) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Canonical band instances.
pub mod bands {
    use super::{Band, ServiceType};

    /// Cache storage.
    pub const CACHE: Band = Band::reserve("CACHE", ServiceType::Cache, 100, 199);

    /// SQL storage.
    pub const SQL: Band = Band::reserve("SQL", ServiceType::Sql, 200, 299);

    /// Outbound HTTP clients.
    pub const HTTP_CLIENT: Band = Band::reserve("HTTP_CLIENT", ServiceType::Http, 500, 599);

    /// Inbound HTTP handlers.
    pub const HTTP_SERVER: Band = Band::reserve("HTTP_SERVER", ServiceType::Http, 800, 899);

    /// General failures (file, command, context).
    pub const GENERAL: Band = Band::reserve("GENERAL", ServiceType::Common, 1000, 1999);

    /// Every reserved band, ordered by start.
    pub const ALL: &[Band] = &[CACHE, SQL, HTTP_CLIENT, HTTP_SERVER, GENERAL];
}

/// Check that no two bands in `all` share a value.
pub const fn bands_are_disjoint(all: &[Band]) -> bool {
    let mut i = 0;
    while i < all.len() {
        let mut j = i + 1;
        while j < all.len() {
            if all[i].overlaps(&all[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(bands_are_disjoint(bands::ALL), "code bands overlap");

/// Find the band that reserves `code`.
///
/// Returns `None` for codes outside every band, including
/// [`Code::UNASSIGNED`].
pub fn band_of(code: Code) -> Option<&'static Band> {
    bands::ALL.iter().find(|band| band.contains(code.value()))
}

// ============================================================================
// Tests
// ============================================================================
