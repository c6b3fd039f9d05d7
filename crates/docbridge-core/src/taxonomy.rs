// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Error taxonomy for native-reported failures.
//
// Classifies a `NativeError` into the families the capture SDK reports:
// precondition, validation, resource and per-side extraction failures.
// Classification is read-only; callers always get the original payload.

use serde::{Deserialize, Serialize};

use crate::error::NativeError;

/// Families of native errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Invalid or missing identifier, wrong object bound, call out of
    /// sequence, missing or exhausted license.
    Precondition,
    /// Malformed input: missing pages, non-file image representation,
    /// disallowed MIME type, bad file path.
    Validation,
    /// Network unreachable, TLS failure, timeout, authentication failure,
    /// memory exhaustion.
    Resource,
    /// Front and/or back side of an on-device extraction failed.
    PartialExtraction,
    /// The operation was cancelled by the caller or the user.
    Cancelled,
    /// Anything the taxonomy does not recognise.
    Unknown,
}

/// Classify a native error payload.
pub fn classify(err: &NativeError) -> ErrorCategory {
    if err.front_error().is_some() || err.back_error().is_some() {
        return ErrorCategory::PartialExtraction;
    }

    match err.code() {
        Some(code) => classify_code(code, err.description()),
        None => ErrorCategory::Unknown,
    }
}

/// Classify a `KMC_*` code, falling back to the free-text description for
/// network failures that carry no dedicated code.
fn classify_code(code: &str, description: Option<&str>) -> ErrorCategory {
    let upper = code.to_ascii_uppercase();

    if upper.contains("CANCELLED") || upper.contains("USER_ABORT") {
        return ErrorCategory::Cancelled;
    }

    // Licensing and sequencing problems
    if upper.contains("LICENSE")
        || upper.contains("LICENSING")
        || upper.contains("NOIMAGE")
        || upper.contains("CONTEXT")
        || upper.contains("NO_PROFILE")
        || upper.contains("BUSY")
    {
        return ErrorCategory::Precondition;
    }

    // Shape of the submitted data
    if upper.contains("MIMETYPE")
        || upper.contains("REPRESENTATION")
        || upper.contains("REP_BITMAP_MISMATCH")
        || upper.contains("FILEPATH")
        || upper.contains("FILE_EXTENSION")
        || upper.contains("NONEXISTENT_FILE")
        || upper.contains("COLOR_SPACE")
        || upper.contains("PROFILE_EMPTY")
    {
        return ErrorCategory::Validation;
    }

    if upper.contains("NO_MEMORY") || upper.contains("NETWORK") || upper.contains("TIMEOUT") {
        return ErrorCategory::Resource;
    }

    match description.map(str::to_ascii_lowercase) {
        Some(lower)
            if lower.contains("timed out")
                || lower.contains("network")
                || lower.contains("ssl")
                || lower.contains("authenticat")
                || lower.contains("host is not available") =>
        {
            ErrorCategory::Resource
        }
        _ => ErrorCategory::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn err(payload: serde_json::Value) -> NativeError {
        NativeError::new("op", payload)
    }

    #[test]
    fn license_codes_are_preconditions() {
        assert_eq!(classify(&err(json!("KMC_IP_LICENSE_INVALID"))), ErrorCategory::Precondition);
        assert_eq!(classify(&err(json!("KMC_UT_OUT_OF_VOLUME_LICENSE"))), ErrorCategory::Precondition);
        assert_eq!(classify(&err(json!("KMC_EX_NOIMAGE"))), ErrorCategory::Precondition);
    }

    #[test]
    fn submission_shape_codes_are_validation() {
        assert_eq!(classify(&err(json!({"ErrorMsg": "KMC_ED_MIMETYPE"}))), ErrorCategory::Validation);
        assert_eq!(
            classify(&err(json!({"ErrorMsg": "KMC_IP_NO_REPRESENTATION"}))),
            ErrorCategory::Validation
        );
        assert_eq!(classify(&err(json!("KMC_ED_FILEPATH"))), ErrorCategory::Validation);
    }

    #[test]
    fn network_descriptions_are_resource_errors() {
        let payload = json!({
            "ErrorMsg": "KMC_LO_REQUEST_FAILED",
            "ErrorDesc": "The web services request timed out"
        });
        assert_eq!(classify(&err(payload)), ErrorCategory::Resource);
    }

    #[test]
    fn cancellation_is_recognised() {
        assert_eq!(classify(&err(json!("KMC_LO_OPERATION_CANCELLED"))), ErrorCategory::Cancelled);
        assert_eq!(classify(&err(json!("KMC_EV_USER_ABORT"))), ErrorCategory::Cancelled);
    }

    #[test]
    fn per_side_errors_win_over_codes() {
        let payload = json!({"ErrorMsg": "KMC_ED_MIMETYPE", "extractionFrontError": "KMC_EX_NOIMAGE"});
        assert_eq!(classify(&err(payload)), ErrorCategory::PartialExtraction);
    }

    #[test]
    fn unrecognised_payloads_are_unknown() {
        assert_eq!(classify(&err(json!(42))), ErrorCategory::Unknown);
        assert_eq!(classify(&err(json!("SOMETHING_ELSE"))), ErrorCategory::Unknown);
    }
}
