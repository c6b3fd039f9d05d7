// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SDK license proxy.
//
// The license is process-wide and can be set once. Capture and on-device
// extraction fail natively until it is.

use docbridge_core::{BridgeError, Result};
use docbridge_native::dispatcher::arg;
use docbridge_native::{CommandDispatcher, ops};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

/// Server that meters on-device operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseServerType {
    #[serde(rename = "RTTI")]
    Rtti,
    #[serde(rename = "TotalAgility")]
    TotalAgility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseServerParameters {
    pub server_url: String,
    pub server_type: LicenseServerType,
}

/// Volume-licensed feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseType {
    ImageCapture,
    ImageProcessing,
    BarcodeCapture,
    Logistics,
    IdExtraction,
}

#[derive(Debug, Clone)]
pub struct License {
    dispatcher: CommandDispatcher,
}

impl License {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Install the license string. A second call fails natively with
    /// `KMC_IP_LICENSE_ALREADY_SET`.
    #[instrument(skip_all)]
    pub async fn set_license(&self, license: &str) -> Result<Value> {
        let result = self
            .dispatcher
            .call(ops::license::SET_LICENSE, vec![json!(license)])
            .await;
        match &result {
            Ok(_) => info!("SDK license set"),
            Err(err) => warn!(error = %err, "SDK license rejected"),
        }
        result
    }

    pub async fn days_remaining(&self) -> Result<u64> {
        let payload = self
            .dispatcher
            .call(ops::license::GET_DAYS_REMAINING, Vec::new())
            .await?;
        count(ops::license::GET_DAYS_REMAINING, &payload)
    }

    /// Version strings of the native SDK components, as reported.
    pub async fn sdk_versions(&self) -> Result<Value> {
        self.dispatcher.call(ops::license::GET_SDK_VERSIONS, Vec::new()).await
    }

    /// Point on-device operation licensing at a server. Must precede any
    /// volume-licensed operation.
    #[instrument(skip_all, fields(url = %parameters.server_url))]
    pub async fn set_license_server(&self, parameters: &LicenseServerParameters) -> Result<()> {
        self.dispatcher
            .call_unit(ops::license::SET_LICENSE_SERVER, vec![arg(parameters)?])
            .await
    }

    pub async fn remaining_volume_count(&self, license_type: LicenseType) -> Result<u64> {
        let payload = self
            .dispatcher
            .call(ops::license::GET_REMAINING_VOLUME_COUNT, vec![arg(&license_type)?])
            .await?;
        count(ops::license::GET_REMAINING_VOLUME_COUNT, &payload)
    }
}

// Counts arrive as numbers on one platform and numeric strings on the other.
fn count(operation: &str, payload: &Value) -> Result<u64> {
    payload
        .as_u64()
        .or_else(|| payload.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| BridgeError::ContractViolation {
            operation: operation.to_owned(),
            detail: format!("expected a non-negative count, got {payload}"),
        })
}
