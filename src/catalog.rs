//! Code → message catalogs.
//!
//! A [`Catalog`] is immutable once built. The four standard catalogs are
//! assembled from the static tables in this module; custom catalogs (for
//! tests, or for an application's own domain) go through [`Catalog::new`],
//! which rejects duplicate codes.

use crate::definitions::*;
use crate::messages::{self, Message};
use crate::Code;
use std::collections::HashMap;

/// Failure to assemble a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The same code was given two entries.
    #[error("code {code} has more than one catalog entry")]
    DuplicateCode {
        /// Offending code.
        code: Code,
    },
}

/// Immutable mapping from [`Code`] to [`Message`] for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<Code, Message>,
}

impl Catalog {
    /// Build a catalog from entries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCode`] if a code appears twice.
    pub fn new<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (Code, Message)>,
    {
        let entries = entries.into_iter();
        let mut map = HashMap::with_capacity(entries.size_hint().0);
        for (code, message) in entries {
            if map.insert(code, message).is_some() {
                return Err(CatalogError::DuplicateCode { code });
            }
        }
        Ok(Self { entries: map })
    }

    /// Build from a static table. Uniqueness of the standard tables is
    /// covered by tests.
    fn from_table(table: &'static [(Code, Message)]) -> Self {
        Self {
            entries: table.iter().copied().collect(),
        }
    }

    /// Template for `code`, if listed.
    #[inline]
    pub fn get(&self, code: Code) -> Option<&Message> {
        self.entries.get(&code)
    }

    /// Whether `code` has an entry.
    #[inline]
    pub fn contains(&self, code: Code) -> bool {
        self.entries.contains_key(&code)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no code is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Code, &Message)> {
        self.entries.iter().map(|(code, message)| (*code, message))
    }
}

// ============================================================================
// Standard Catalogs
// ============================================================================

/// Catalog for [`ServiceType::Common`](crate::ServiceType::Common).
pub fn general() -> Catalog {
    Catalog::from_table(GENERAL_TABLE)
}

/// Catalog for [`ServiceType::Http`](crate::ServiceType::Http), covering
/// both the server and the client bands.
pub fn http() -> Catalog {
    Catalog::from_table(HTTP_TABLE)
}

/// Catalog for [`ServiceType::Sql`](crate::ServiceType::Sql).
pub fn sql() -> Catalog {
    Catalog::from_table(SQL_TABLE)
}

/// Catalog for [`ServiceType::Cache`](crate::ServiceType::Cache).
pub fn cache() -> Catalog {
    Catalog::from_table(CACHE_TABLE)
}

const fn internal(en: &'static str, id: &'static str) -> Message {
    Message::new(500, en, id)
}

static GENERAL_TABLE: &[(Code, Message)] = &[
    (VALUE_INVALID, messages::BAD_REQUEST),
    (CONTEXT_DEADLINE_EXCEEDED, messages::CONTEXT_TIMEOUT),
    (CONTEXT_CANCELED, messages::CONTEXT_CANCELLED),
    // File operations
    (
        FILE_OPERATION,
        internal(
            "File operation failed. Please try again or contact support if the problem persists.",
            "Operasi file gagal. Silakan coba lagi atau hubungi dukungan jika masalah berlanjut.",
        ),
    ),
    (
        FILE_CREATE,
        internal(
            "Unable to create file. Please check permissions and try again.",
            "Tidak dapat membuat file. Silakan periksa izin dan coba lagi.",
        ),
    ),
    (
        FILE_OPEN,
        internal(
            "Unable to open file. Please ensure the file exists and is accessible.",
            "Tidak dapat membuka file. Silakan pastikan file ada dan dapat diakses.",
        ),
    ),
    (
        FILE_READ,
        internal(
            "Unable to read file. Please check file permissions and try again.",
            "Tidak dapat membaca file. Silakan periksa izin file dan coba lagi.",
        ),
    ),
    (
        FILE_WRITE,
        internal(
            "Unable to write to file. Please check disk space and permissions.",
            "Tidak dapat menulis ke file. Silakan periksa ruang disk dan izin.",
        ),
    ),
    (
        FILE_CLOSE,
        internal(
            "Unable to close file. Please try again or contact support.",
            "Tidak dapat menutup file. Silakan coba lagi atau hubungi dukungan.",
        ),
    ),
    (
        FILE_REMOVE,
        internal(
            "Unable to remove file. Please check permissions and try again.",
            "Tidak dapat menghapus file. Silakan periksa izin dan coba lagi.",
        ),
    ),
    (
        FILE_STAT,
        internal(
            "Unable to get file information. Please check file permissions and try again.",
            "Tidak dapat mendapatkan informasi file. Silakan periksa izin file dan coba lagi.",
        ),
    ),
    (
        FILE_PERMISSION,
        internal(
            "File permission error. Please check file permissions and try again.",
            "Kesalahan izin file. Silakan periksa izin file dan coba lagi.",
        ),
    ),
    // Command execution
    (
        CMD_EXEC,
        internal(
            "Command execution failed. Please try again or contact support.",
            "Eksekusi perintah gagal. Silakan coba lagi atau hubungi dukungan.",
        ),
    ),
    (
        CMD_START,
        internal(
            "Unable to start command. Please check system resources and try again.",
            "Tidak dapat memulai perintah. Silakan periksa sumber daya sistem dan coba lagi.",
        ),
    ),
    (
        CMD_RUN,
        internal(
            "Unable to run command. Please check command parameters and try again.",
            "Tidak dapat menjalankan perintah. Silakan periksa parameter perintah dan coba lagi.",
        ),
    ),
    (
        CMD_WAIT,
        internal(
            "Command execution was interrupted. Please try again.",
            "Eksekusi perintah terganggu. Silakan coba lagi.",
        ),
    ),
    (
        CMD_PIPE,
        internal(
            "Unable to create command pipe. Please try again or contact support.",
            "Tidak dapat membuat pipa perintah. Silakan coba lagi atau hubungi dukungan.",
        ),
    ),
    (
        CMD_TIMEOUT,
        internal(
            "Command execution timed out. Please try again with a simpler operation.",
            "Waktu eksekusi perintah habis. Silakan coba lagi dengan operasi yang lebih sederhana.",
        ),
    ),
];

static HTTP_TABLE: &[(Code, Message)] = &[
    (HTTP_CLIENT_MARSHAL, messages::INTERNAL_SERVER_ERROR),
    (HTTP_CLIENT_UNMARSHAL, messages::INTERNAL_SERVER_ERROR),
    (HTTP_CLIENT_ERROR_ON_REQUEST, messages::INTERNAL_SERVER_ERROR),
    (HTTP_CLIENT_ERROR_ON_READ_BODY, messages::INTERNAL_SERVER_ERROR),
    (HTTP_BAD_REQUEST, messages::BAD_REQUEST),
    (HTTP_BAD_REQUEST_CUSTOM, messages::BAD_REQUEST_CUSTOM),
    (HTTP_NOT_FOUND, messages::NOT_FOUND),
    (HTTP_UNAUTHORIZED, messages::UNAUTHORIZED),
    (HTTP_INTERNAL_SERVER_ERROR, messages::INTERNAL_SERVER_ERROR),
    (HTTP_UNMARSHAL, messages::BAD_REQUEST),
    (HTTP_UNMARSHAL_CUSTOM, messages::BAD_REQUEST_CUSTOM),
    (HTTP_MARSHAL, messages::INTERNAL_SERVER_ERROR),
    (HTTP_CONFLICT, messages::CONFLICT),
    (HTTP_FORBIDDEN, messages::FORBIDDEN),
    (HTTP_TOO_MANY_REQUEST, messages::TOO_MANY_REQUESTS),
    (HTTP_VALIDATOR_ERROR, messages::BAD_REQUEST_CUSTOM),
    (HTTP_SERVICE_UNAVAILABLE, messages::SERVICE_UNAVAILABLE),
    (HTTP_VERSION_CONSTRAINT, messages::VERSION_CONSTRAINT),
    (HTTP_PARAM_DECODE, messages::BAD_REQUEST),
    (HTTP_ERROR_ON_READ_BODY, messages::INTERNAL_SERVER_ERROR),
];

static SQL_TABLE: &[(Code, Message)] = &[
    (SQL_BUILDER, messages::INTERNAL_SERVER_ERROR),
    (SQL_READ, messages::INTERNAL_SERVER_ERROR),
    (SQL_COUNT, messages::INTERNAL_SERVER_ERROR),
    (SQL_ROW_SCAN, messages::INTERNAL_SERVER_ERROR),
    (SQL_CREATE, messages::INTERNAL_SERVER_ERROR),
    (SQL_UPDATE, messages::INTERNAL_SERVER_ERROR),
    (SQL_DELETE, messages::INTERNAL_SERVER_ERROR),
    (SQL_UNLINK, messages::INTERNAL_SERVER_ERROR),
    (SQL_TX_BEGIN, messages::INTERNAL_SERVER_ERROR),
    (SQL_TX_ROLLBACK, messages::INTERNAL_SERVER_ERROR),
    (SQL_TX_COMMIT, messages::INTERNAL_SERVER_ERROR),
    (SQL_PREPARE_STMT, messages::INTERNAL_SERVER_ERROR),
    (SQL_RECORD_MUST_EXIST, messages::NOT_FOUND),
    (SQL_CANNOT_RETRIEVE_LAST_INSERT_ID, messages::INTERNAL_SERVER_ERROR),
    (SQL_CANNOT_RETRIEVE_AFFECTED_ROWS, messages::INTERNAL_SERVER_ERROR),
    (SQL_UNIQUE_CONSTRAINT, messages::UNIQUE_CONSTRAINT),
    (SQL_RECORD_DOES_NOT_MATCH, messages::BAD_REQUEST),
    (SQL_RECORD_IS_EXPIRED, messages::BAD_REQUEST),
    (SQL_RECORD_DOES_NOT_EXIST, messages::NOT_FOUND),
    (SQL_FOREIGN_KEY_MISSING, messages::INTERNAL_SERVER_ERROR),
    (SQL_TRANSACTION_FAILED, messages::INTERNAL_SERVER_ERROR),
    (SQL_PING, messages::BAD_REQUEST_CUSTOM),
    (SQL_TRUNCATE, messages::INTERNAL_SERVER_ERROR),
];

static CACHE_TABLE: &[(Code, Message)] = &[
    (CACHE_READ, messages::INTERNAL_SERVER_ERROR),
    (CACHE_COUNT, messages::INTERNAL_SERVER_ERROR),
    (CACHE_CREATE, messages::INTERNAL_SERVER_ERROR),
    (CACHE_UPDATE, messages::INTERNAL_SERVER_ERROR),
    (CACHE_DELETE, messages::INTERNAL_SERVER_ERROR),
    (CACHE_MUST_EXIST, messages::NOT_FOUND),
    (CACHE_DOES_NOT_MATCH, messages::BAD_REQUEST),
    (CACHE_IS_EXPIRED, messages::BAD_REQUEST),
    (CACHE_DOES_NOT_EXIST, messages::NOT_FOUND),
    (CACHE_DECODE, messages::INTERNAL_SERVER_ERROR),
    (CACHE_MARSHAL, messages::INTERNAL_SERVER_ERROR),
    (CACHE_UNMARSHAL, messages::INTERNAL_SERVER_ERROR),
    (CACHE_DELETE_SIMPLE_KEY, messages::INTERNAL_SERVER_ERROR),
];
