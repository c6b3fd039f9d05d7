// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// How an extraction listener treats a result whose missing side reported
/// an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSidePolicy {
    /// Deliver whatever native sent.
    #[default]
    Passthrough,
    /// Deliver results, but surface the missing side as a `NOIMAGE` error.
    ReportNoImage,
    /// Drop the error for a side that was never supplied.
    Suppress,
}

/// Settings shared by all proxies created against one boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Native service every operation is addressed to.
    pub service_name: String,
    /// Capture-server request timeout in seconds. Pushed to every session
    /// created through a dispatcher with this config when it differs from
    /// the native default of 20.
    pub server_timeout_secs: u32,
    /// Treatment of a missing extraction side.
    pub missing_side_policy: MissingSidePolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            service_name: "kfxPlugin".into(),
            server_timeout_secs: 20,
            missing_side_policy: MissingSidePolicy::default(),
        }
    }
}

impl BridgeConfig {
    /// Parse a configuration document. Missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| BridgeError::Config(format!("invalid bridge config: {e}")))?;
        if config.service_name.trim().is_empty() {
            return Err(BridgeError::Config("service_name must not be empty".into()));
        }
        Ok(config)
    }

    /// Load configuration from a file, or fall back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no bridge config, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
