// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Programmable in-process boundary.
//
// Stands in for the native SDK in tests, benches and the demo binary: each
// operation is scripted to succeed, fail, stay silent or run a closure, every
// call is logged, and listener sinks are retained so events can be raised
// after registration.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use docbridge_core::Result;
use serde_json::{Value, json};
use tracing::debug;

use crate::listener::{EVENT_TYPE_KEY, EventKind, ListenerSpec};
use crate::traits::{Delivery, DeliverySink, NativeBoundary, NativeCall};

type Responder = Arc<dyn Fn(&ScriptedBoundary, &NativeCall) -> Delivery + Send + Sync>;

#[derive(Clone)]
enum Script {
    Respond(Value),
    Fail(Value),
    Deliveries(Vec<Delivery>),
    Silent,
    With(Responder),
    Listen,
    Unlisten(&'static str),
}

#[derive(Default)]
struct ScriptState {
    scripts: HashMap<String, Script>,
    calls: Vec<NativeCall>,
    listeners: HashMap<String, DeliverySink>,
}

/// In-process `NativeBoundary` driven by per-operation scripts.
///
/// Operations without a script fail with `KMC_UNSCRIPTED_OPERATION`.
#[derive(Default)]
pub struct ScriptedBoundary {
    state: Mutex<ScriptState>,
}

impl ScriptedBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, operation: &str, script: Script) {
        self.state().scripts.insert(operation.to_owned(), script);
    }

    /// Answer every call to `operation` with `payload`.
    pub fn respond(&self, operation: &str, payload: Value) {
        self.set(operation, Script::Respond(payload));
    }

    /// Fail every call to `operation` with `payload`.
    pub fn fail(&self, operation: &str, payload: Value) {
        self.set(operation, Script::Fail(payload));
    }

    /// Push all `deliveries` in order on every call, then close the channel.
    pub fn script(&self, operation: &str, deliveries: Vec<Delivery>) {
        self.set(operation, Script::Deliveries(deliveries));
    }

    /// Accept the call and close its channel without any outcome.
    pub fn drop_silently(&self, operation: &str) {
        self.set(operation, Script::Silent);
    }

    /// Compute the outcome of each call from its arguments.
    pub fn on<F>(&self, operation: &str, responder: F)
    where
        F: Fn(&ScriptedBoundary, &NativeCall) -> Delivery + Send + Sync + 'static,
    {
        self.set(operation, Script::With(Arc::new(responder)));
    }

    /// Accept registrations on `spec.add` (acknowledging them and keeping the
    /// sink) and removals on `spec.remove` (dropping the sink).
    pub fn listen(&self, spec: ListenerSpec) {
        self.set(spec.add, Script::Listen);
        self.set(spec.remove, Script::Unlisten(spec.add));
    }

    /// Raise an event on a registered listener. `eventType` is stamped onto
    /// object payloads. Returns `false` if nobody is listening.
    pub fn raise(&self, add_operation: &str, mut payload: Value) -> bool {
        if let Value::Object(map) = &mut payload {
            map.insert(EVENT_TYPE_KEY.into(), json!(EventKind::Raised.as_str()));
        }
        self.deliver_to(add_operation, Delivery::Success(payload))
    }

    /// Push an error on a registered listener's channel.
    pub fn raise_error(&self, add_operation: &str, payload: Value) -> bool {
        self.deliver_to(add_operation, Delivery::Error(payload))
    }

    /// Send a second registration acknowledgment.
    pub fn acknowledge_again(&self, add_operation: &str) -> bool {
        let ack = json!({ EVENT_TYPE_KEY: EventKind::Registered.as_str() });
        self.deliver_to(add_operation, Delivery::Success(ack))
    }

    /// Push an arbitrary delivery on a registered listener's channel.
    pub fn deliver_to(&self, add_operation: &str, delivery: Delivery) -> bool {
        let sink = self.state().listeners.get(add_operation).cloned();
        match sink {
            Some(sink) => sink.deliver(delivery),
            None => false,
        }
    }

    /// Whether a listener is currently registered on `add_operation`.
    pub fn is_listening(&self, add_operation: &str) -> bool {
        self.state()
            .listeners
            .get(add_operation)
            .is_some_and(|sink| !sink.is_closed())
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<NativeCall> {
        self.state().calls.clone()
    }

    /// Calls received for one operation.
    pub fn calls_to(&self, operation: &str) -> Vec<NativeCall> {
        self.state()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .cloned()
            .collect()
    }
}

impl NativeBoundary for ScriptedBoundary {
    fn platform_name(&self) -> &str {
        "Scripted"
    }

    fn exec(&self, call: NativeCall, sink: DeliverySink) -> Result<()> {
        let script = {
            let mut state = self.state();
            state.calls.push(call.clone());
            state.scripts.get(&call.operation).cloned()
        };
        debug!(operation = %call.operation, "scripted call");

        match script {
            Some(Script::Respond(payload)) => {
                sink.success(payload);
            }
            Some(Script::Fail(payload)) => {
                sink.error(payload);
            }
            Some(Script::Deliveries(deliveries)) => {
                for delivery in deliveries {
                    sink.deliver(delivery);
                }
            }
            Some(Script::Silent) => {}
            Some(Script::With(responder)) => {
                sink.deliver(responder(self, &call));
            }
            Some(Script::Listen) => {
                sink.success(json!({ EVENT_TYPE_KEY: EventKind::Registered.as_str() }));
                self.state().listeners.insert(call.operation.clone(), sink);
            }
            Some(Script::Unlisten(add_operation)) => {
                self.state().listeners.remove(add_operation);
                sink.success(Value::Null);
            }
            None => {
                sink.error(json!({
                    "ErrorMsg": "KMC_UNSCRIPTED_OPERATION",
                    "ErrorDesc": call.operation,
                }));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::delivery_channel;

    #[tokio::test]
    async fn unscripted_operations_fail() {
        let native = ScriptedBoundary::new();
        let (sink, mut stream) = delivery_channel("kedGetImageSize");
        native
            .exec(
                NativeCall {
                    service: "kfxPlugin".into(),
                    operation: "kedGetImageSize".into(),
                    args: vec![],
                },
                sink,
            )
            .expect("exec");
        match stream.next().await {
            Some(Delivery::Error(payload)) => assert_eq!(payload["ErrorMsg"], "KMC_UNSCRIPTED_OPERATION"),
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[test]
    fn raise_without_listener_reports_false() {
        let native = ScriptedBoundary::new();
        assert!(!native.raise("kuiDCAddImageCapturedListener", json!({})));
        assert!(!native.is_listening("kuiDCAddImageCapturedListener"));
    }
}
