// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub boundary for desktop/CI builds where the native capture SDK is absent.
//
// Every call is refused with `PlatformUnavailable`. Real bindings implement
// `NativeBoundary` in the host application.

use docbridge_core::{BridgeError, Result};

use crate::traits::{DeliverySink, NativeBoundary, NativeCall};

/// Boundary returned on hosts without a native SDK.
pub struct StubBoundary;

impl NativeBoundary for StubBoundary {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn exec(&self, call: NativeCall, _sink: DeliverySink) -> Result<()> {
        tracing::warn!(operation = %call.operation, "native call on stub boundary");
        Err(BridgeError::PlatformUnavailable)
    }
}
