// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docbridge-core: Message records, error definitions and configuration shared
// across all crates.

pub mod config;
pub mod error;
pub mod taxonomy;
pub mod types;

pub use config::{BridgeConfig, MissingSidePolicy};
pub use error::{BridgeError, NativeError, Result};
pub use taxonomy::ErrorCategory;
pub use types::*;
