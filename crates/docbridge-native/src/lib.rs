// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docbridge-native: Native boundary, command dispatch and listener routing.
//
// Every proxy in the workspace talks to the capture SDK through a
// `CommandDispatcher` wrapping one `NativeBoundary`.

pub mod dispatcher;
pub mod listener;
pub mod ops;
pub mod scripted;
pub mod stub;
pub mod traits;

use std::sync::Arc;

pub use dispatcher::CommandDispatcher;
pub use listener::{EventKind, ListenerRouter, ListenerSpec, Route, Subscription, subscribe};
pub use traits::{Delivery, DeliverySink, DeliveryStream, NativeBoundary, NativeCall};

/// The boundary available on this host without an application-supplied
/// binding: always the stub, which refuses every call.
pub fn platform_boundary() -> Arc<dyn NativeBoundary> {
    Arc::new(stub::StubBoundary)
}
