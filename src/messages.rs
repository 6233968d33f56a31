//! Bilingual message templates.
//!
//! A [`Message`] pairs an HTTP status with an English and an Indonesian text
//! and says how the failure's own text may be spliced into it. Templates are
//! `const` so catalogs can be assembled from static tables.
//!
//! The shared templates at the bottom of this module are reused by several
//! catalogs; see [`crate::catalog`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder substituted by [`Formatting::Annotated`] and
/// [`Formatting::Custom`] templates. Only the first occurrence is replaced.
pub const PLACEHOLDER: &str = "{}";

// ============================================================================
// Language
// ============================================================================

/// Language of the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Indonesian.
    Id,
}

impl Language {
    /// Tag for English.
    pub const TAG_EN: &'static str = "en";
    /// Tag for Indonesian.
    pub const TAG_ID: &'static str = "id";

    /// Strict parse of a language tag.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            Self::TAG_EN => Some(Self::En),
            Self::TAG_ID => Some(Self::Id),
            _ => None,
        }
    }

    /// Lenient parse used when compiling: anything other than `"en"`
    /// selects Indonesian.
    pub fn from_tag(tag: &str) -> Self {
        if tag == Self::TAG_EN { Self::En } else { Self::Id }
    }

    /// Tag for this language.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => Self::TAG_EN,
            Self::Id => Self::TAG_ID,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Message Template
// ============================================================================

/// How the failure's text is combined with the template text.
///
/// A single enum keeps "annotated" and "custom" mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Formatting {
    /// Template text is used as-is.
    #[default]
    Verbatim,
    /// The leading segment of the failure's quoted rendering fills the placeholder.
    Annotated,
    /// The first line of the failure's rendering fills the placeholder.
    Custom,
}

/// Status code plus localized template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Message {
    status: u16,
    en: &'static str,
    id: &'static str,
    formatting: Formatting,
}

impl Message {
    /// Verbatim template.
    #[inline]
    pub const fn new(status: u16, en: &'static str, id: &'static str) -> Self {
        Self {
            status,
            en,
            id,
            formatting: Formatting::Verbatim,
        }
    }

    /// Same template with annotation formatting.
    #[inline]
    pub const fn annotated(mut self) -> Self {
        self.formatting = Formatting::Annotated;
        self
    }

    /// Same template with custom-message formatting.
    #[inline]
    pub const fn custom(mut self) -> Self {
        self.formatting = Formatting::Custom;
        self
    }

    /// HTTP status returned for this template.
    #[inline]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Template text in `language`.
    #[inline]
    pub const fn text(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Id => self.id,
        }
    }

    /// How the failure text is merged into the template.
    #[inline]
    pub const fn formatting(&self) -> Formatting {
        self.formatting
    }

    /// True for [`Formatting::Annotated`].
    #[inline]
    pub const fn has_annotation(&self) -> bool {
        matches!(self.formatting, Formatting::Annotated)
    }

    /// True for [`Formatting::Custom`].
    #[inline]
    pub const fn is_custom_message(&self) -> bool {
        matches!(self.formatting, Formatting::Custom)
    }
}

// ============================================================================
// Shared Templates
// ============================================================================

/// 500 - generic internal failure.
pub const INTERNAL_SERVER_ERROR: Message = Message::new(
    500,
    "An unexpected error occurred. Please try again later or contact support if the problem persists.",
    "Terjadi kesalahan yang tidak terduga. Silakan coba lagi nanti atau hubungi dukungan jika masalah berlanjut.",
);

/// 404.
pub const NOT_FOUND: Message = Message::new(
    404,
    "The requested resource was not found. Please verify your input and try again.",
    "Data yang diminta tidak ditemukan. Silakan periksa kembali input Anda dan coba lagi.",
);

/// 400.
pub const BAD_REQUEST: Message = Message::new(
    400,
    "Invalid request. Please check your input and try again.",
    "Permintaan tidak valid. Silakan periksa input Anda dan coba lagi.",
);

/// 400 carrying the first line of the failure text.
pub const BAD_REQUEST_CUSTOM: Message = Message::new(400, PLACEHOLDER, PLACEHOLDER).custom();

/// 401.
pub const UNAUTHORIZED: Message = Message::new(
    401,
    "Authentication required. Please log in to access this resource.",
    "Autentikasi diperlukan. Silakan masuk untuk mengakses sumber daya ini.",
);

/// 409 for unique-constraint violations.
pub const UNIQUE_CONSTRAINT: Message = Message::new(
    409,
    "A record with this information already exists. Please use different data or contact support.",
    "Data dengan informasi ini sudah ada. Silakan gunakan data yang berbeda atau hubungi dukungan.",
);

/// 429.
pub const TOO_MANY_REQUESTS: Message = Message::new(
    429,
    "Too many requests. Please wait a moment before trying again.",
    "Terlalu banyak permintaan. Silakan tunggu sebentar sebelum mencoba lagi.",
);

/// 422.
pub const UNPROCESSABLE: Message = Message::new(
    422,
    "Unable to process your request. Please verify your input and try again.",
    "Tidak dapat memproses permintaan Anda. Silakan verifikasi input Anda dan coba lagi.",
);

/// 403.
pub const FORBIDDEN: Message = Message::new(
    403,
    "Access denied. You don't have permission to perform this action.",
    "Akses ditolak. Anda tidak memiliki izin untuk melakukan tindakan ini.",
);

/// 499 - the client went away.
pub const CONTEXT_CANCELLED: Message = Message::new(
    499,
    "Request was cancelled by the client.",
    "Permintaan dibatalkan oleh klien.",
);

/// 408 - the request deadline expired.
pub const CONTEXT_TIMEOUT: Message = Message::new(
    408,
    "Request timed out. Please try again.",
    "Permintaan habis waktu. Silakan coba lagi.",
);

/// 409.
pub const CONFLICT: Message = Message::new(
    409,
    "A record with this information already exists. Please use different data or contact support.",
    "Data dengan informasi ini sudah ada. Silakan gunakan data yang berbeda atau hubungi dukungan.",
);

/// 503.
pub const SERVICE_UNAVAILABLE: Message = Message::new(
    503,
    "Service is temporarily unavailable. Please try again later.",
    "Layanan sedang tidak tersedia sementara. Silakan coba lagi nanti.",
);

/// 422 - client build too old.
pub const VERSION_CONSTRAINT: Message = Message::new(
    422,
    "Your app version is outdated. Please update to the latest version to continue.",
    "Versi aplikasi Anda sudah usang. Silakan perbarui ke versi terbaru untuk melanjutkan.",
);
