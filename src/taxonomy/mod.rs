//! Error taxonomy for remote API failures
//!
//! The remote service signals application-level failures with an opaque
//! numeric code and a free-form message. This module owns the closed mapping
//! from those codes to typed conditions, each carrying a fixed generic
//! description alongside the raw server message. Classification is total:
//! codes added by the service after this table was written come back as
//! [`ApiErrorKind::Unclassified`] instead of failing the classifier itself.

use crate::version::ApiVersion;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;


/// Kind of a classified API failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Incorrect overall API usage
    WrongApiUsage,
    /// The referenced record does not exist
    NoRecordAvailable,
    /// A mandatory field was left out of the request
    MandatoryFieldMissing,
    /// Rate or request limit hit
    RateLimitExceeded,
    /// The credential has no write access to the module
    NoWritePermission,
    /// The service failed internally
    InternalServerError,
    /// The requested module is not exposed by this API generation
    ModuleNotSupported,
    /// A parameter value was rejected by the service
    InvalidParameterValue,
    /// Too many operations batched into a single call
    BatchLimitExceeded,
    /// Allotted API capacity exhausted
    CapacityExceeded,
    /// The auth reference presented to the service is invalid or expired
    InvalidToken,
    /// Code not present in the classification table
    Unclassified,
}

/// A classified API failure
///
/// Carries the raw server-reported code and message verbatim, plus a fixed
/// generic description that is stable across service releases, so callers
/// can branch on `kind`/`generic_description` instead of parsing raw codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorCondition {
    /// Classified kind
    pub kind: ApiErrorKind,
    /// Raw server-reported code
    pub code: String,
    /// Raw server-reported message
    pub message: String,
    /// Fixed, version-independent description
    pub generic_description: &'static str,
}

/// Generic text for codes missing from the table
pub const UNCLASSIFIED_DESCRIPTION: &str = "Unclassified API error";

type ClassificationTable = HashMap<&'static str, (ApiErrorKind, &'static str)>;

/// Entries shared by both protocol generations
fn common_entries(table: &mut ClassificationTable) {
    use ApiErrorKind::*;

    table.insert("4000", (WrongApiUsage, "Incorrect API usage"));
    table.insert(
        "4103",
        (
            NoRecordAvailable,
            "No record available with the specified record ID",
        ),
    );
    table.insert("4401", (MandatoryFieldMissing, "A mandatory field is missing"));
    table.insert("4420", (RateLimitExceeded, "Rate or request limit exceeded"));
    table.insert("4421", (RateLimitExceeded, "Rate or request limit exceeded"));
    table.insert("4423", (RateLimitExceeded, "Rate or request limit exceeded"));
    table.insert(
        "4487",
        (NoWritePermission, "No permission to write to the module"),
    );
    table.insert(
        "4500",
        (
            InternalServerError,
            "Internal server error while processing the request",
        ),
    );
    table.insert(
        "4502",
        (ModuleNotSupported, "The requested module is not supported"),
    );
    table.insert(
        "4600",
        (InvalidParameterValue, "Incorrect value for an API parameter"),
    );
    table.insert(
        "4632",
        (BatchLimitExceeded, "Too many requests batched into one call"),
    );
    table.insert("4820", (CapacityExceeded, "Allotted API capacity exhausted"));
}

static V1_TABLE: Lazy<ClassificationTable> = Lazy::new(|| {
    let mut table = ClassificationTable::new();
    common_entries(&mut table);
    // The legacy generation authenticates with tickets, and its error text
    // says so.
    table.insert("4834", (ApiErrorKind::InvalidToken, "Invalid or expired ticket"));
    table
});

static V2_TABLE: Lazy<ClassificationTable> = Lazy::new(|| {
    let mut table = ClassificationTable::new();
    common_entries(&mut table);
    table.insert(
        "4834",
        (ApiErrorKind::InvalidToken, "Invalid or expired reference token"),
    );
    table
});

/// Classifier from raw (code, message) pairs to typed conditions
///
/// One table per [`ApiVersion`]; the two generations overlap on every code
/// and differ only in wording.
#[derive(Debug, Clone, Copy)]
pub struct ErrorTaxonomy {
    version: ApiVersion,
    table: &'static Lazy<ClassificationTable>,
}

impl ErrorTaxonomy {
    /// Get the taxonomy for a protocol generation
    pub fn for_version(version: ApiVersion) -> Self {
        let table = match version {
            ApiVersion::V1 => &V1_TABLE,
            ApiVersion::V2 => &V2_TABLE,
        };
        Self { version, table }
    }

    /// The protocol generation this taxonomy classifies for
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Classify a raw (code, message) pair
    ///
    /// Total over any input: unknown codes come back as
    /// [`ApiErrorKind::Unclassified`] rather than failing classification.
    pub fn classify(&self, code: &str, message: &str) -> ApiErrorCondition {
        let (kind, generic_description) = self
            .table
            .get(code)
            .copied()
            .unwrap_or((ApiErrorKind::Unclassified, UNCLASSIFIED_DESCRIPTION));

        debug!(version = %self.version, code, ?kind, "classified API error");

        ApiErrorCondition {
            kind,
            code: code.to_string(),
            message: message.to_string(),
            generic_description,
        }
    }
}
