// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic definition of the native boundary.
//
// A platform binding marshals a `NativeCall` to the capture SDK and pushes
// every outcome the SDK reports back through the `DeliverySink` it was handed.

use docbridge_core::Result;
use serde_json::Value;
use tokio::sync::mpsc;

/// One invocation of a native operation.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCall {
    /// Target service (the plugin class, `kfxPlugin` by default).
    pub service: String,
    /// Native method name, e.g. `kuiDCTakePicture`.
    pub operation: String,
    /// Ordered JSON arguments.
    pub args: Vec<Value>,
}

/// A single outcome pushed by native code.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Success(Value),
    Error(Value),
}

/// Sending half of a call's delivery channel, owned by the boundary.
///
/// Plain calls deliver once. Listener registrations keep the sink and deliver
/// again every time the event fires, until the listener is removed.
#[derive(Debug, Clone)]
pub struct DeliverySink {
    operation: String,
    tx: mpsc::UnboundedSender<Delivery>,
}

impl DeliverySink {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Push an outcome. Returns `false` once the receiving side is gone.
    pub fn deliver(&self, delivery: Delivery) -> bool {
        self.tx.send(delivery).is_ok()
    }

    pub fn success(&self, payload: Value) -> bool {
        self.deliver(Delivery::Success(payload))
    }

    pub fn error(&self, payload: Value) -> bool {
        self.deliver(Delivery::Error(payload))
    }

    /// Whether the caller stopped listening.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half of a call's delivery channel.
#[derive(Debug)]
pub struct DeliveryStream {
    operation: String,
    rx: mpsc::UnboundedReceiver<Delivery>,
}

impl DeliveryStream {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Next outcome, or `None` once every sink clone has been dropped.
    pub async fn next(&mut self) -> Option<Delivery> {
        self.rx.recv().await
    }
}

/// Create a fresh delivery channel for one call.
pub fn delivery_channel(operation: &str) -> (DeliverySink, DeliveryStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        DeliverySink {
            operation: operation.to_owned(),
            tx,
        },
        DeliveryStream {
            operation: operation.to_owned(),
            rx,
        },
    )
}

/// The generic native-invocation primitive every proxy is built on.
///
/// `exec` must not block: it hands the call to native code and returns. An
/// `Err` means the call could not be dispatched at all; outcomes of a
/// dispatched call always travel through the sink.
pub trait NativeBoundary: Send + Sync {
    /// Human-readable platform name (e.g. "iOS 17", "Desktop (stub)").
    fn platform_name(&self) -> &str;

    fn exec(&self, call: NativeCall, sink: DeliverySink) -> Result<()>;
}
