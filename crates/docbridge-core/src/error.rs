// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for docbridge.
//
// Native errors are carried verbatim. The bridge never rewrites, retries or
// swallows what the native layer reported.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::taxonomy::{self, ErrorCategory};

/// Top-level error type for all docbridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Native boundary --
    #[error("{0}")]
    Native(NativeError),

    #[error("native channel for {0} closed before an outcome was delivered")]
    ChannelClosed(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Payload shapes --
    #[error("unexpected payload from {operation}: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("native contract violated by {operation}: {detail}")]
    ContractViolation { operation: String, detail: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(String),

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// The native error payload, if this error came from the native layer.
    pub fn as_native(&self) -> Option<&NativeError> {
        match self {
            Self::Native(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NativeError> for BridgeError {
    fn from(err: NativeError) -> Self {
        Self::Native(err)
    }
}

/// An error reported by the native layer, kept exactly as delivered.
///
/// Native errors arrive either as a bare string (`"KMC_ED_NOIMAGE"`) or as an
/// object with `ErrorMsg`/`ErrorDesc` keys. Extraction listeners may also
/// deliver an object holding `extractionFrontError`/`extractionBackError`.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeError {
    /// Operation identifier whose error channel carried this payload.
    pub operation: String,
    /// Raw payload, untouched.
    pub payload: Value,
}

impl NativeError {
    pub fn new(operation: impl Into<String>, payload: Value) -> Self {
        Self {
            operation: operation.into(),
            payload,
        }
    }

    /// The native error code (`ErrorMsg`, or the payload itself when it is a string).
    pub fn code(&self) -> Option<&str> {
        match &self.payload {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("ErrorMsg").and_then(Value::as_str),
            _ => None,
        }
    }

    /// The human description supplied by native (`ErrorDesc`).
    pub fn description(&self) -> Option<&str> {
        self.payload.get("ErrorDesc").and_then(Value::as_str)
    }

    /// Per-side extraction error for the front image, if present.
    pub fn front_error(&self) -> Option<&Value> {
        self.payload.get("extractionFrontError")
    }

    /// Per-side extraction error for the back image, if present.
    pub fn back_error(&self) -> Option<&Value> {
        self.payload.get("extractionBackError")
    }

    /// Which part of the error taxonomy this payload belongs to.
    pub fn category(&self) -> ErrorCategory {
        taxonomy::classify(self)
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.description()) {
            (Some(code), Some(desc)) => write!(f, "{} failed: {code} ({desc})", self.operation),
            (Some(code), None) => write!(f, "{} failed: {code}", self.operation),
            _ => write!(f, "{} failed: {}", self.operation, self.payload),
        }
    }
}

impl std::error::Error for NativeError {}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
