// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Listener routing.
//
// A listener registration is a single native call whose channel stays open.
// The first success carrying `eventType: "eventRegistered"` acknowledges the
// registration; every success carrying `eventType: "eventRaised"` is an event.
// Errors never change the registration state.

use docbridge_core::{BridgeError, NativeError, Result};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::dispatcher::{CommandDispatcher, ListenerClaim};
use crate::traits::{Delivery, DeliveryStream};

/// Name of the discriminator key on listener payloads.
pub const EVENT_TYPE_KEY: &str = "eventType";

/// Discriminator carried by every listener success payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `"eventRegistered"`: the one-time registration acknowledgment.
    Registered,
    /// `"eventRaised"`: one occurrence of the event.
    Raised,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "eventRegistered",
            Self::Raised => "eventRaised",
        }
    }

    /// Read the discriminator of a payload, if it has a recognised one.
    pub fn of(payload: &Value) -> Option<Self> {
        match payload.get(EVENT_TYPE_KEY).and_then(Value::as_str) {
            Some("eventRegistered") => Some(Self::Registered),
            Some("eventRaised") => Some(Self::Raised),
            _ => None,
        }
    }
}

/// Add/remove operation pair of one listener family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerSpec {
    pub add: &'static str,
    pub remove: &'static str,
}

impl ListenerSpec {
    pub const fn new(add: &'static str, remove: &'static str) -> Self {
        Self { add, remove }
    }
}

/// Where one delivery goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// First registration acknowledgment: resolve the registration.
    Acknowledged(Value),
    /// Event occurrence: hand to the event handler.
    Raised(Value),
    /// Native error: hand to the error path.
    Failed(Value),
    /// A second acknowledgment. Ignored.
    Duplicate,
    /// Success payload without a recognised discriminator. Ignored.
    Unrecognised(Value),
}

/// Per-registration routing state: `Unregistered` until the first
/// acknowledgment, `Registered` afterwards.
#[derive(Debug, Clone)]
pub struct ListenerRouter {
    operation: String,
    registered: bool,
}

impl ListenerRouter {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            registered: false,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn route(&mut self, delivery: Delivery) -> Route {
        match delivery {
            Delivery::Error(payload) => Route::Failed(payload),
            Delivery::Success(payload) => match EventKind::of(&payload) {
                Some(EventKind::Registered) if self.registered => {
                    warn!(operation = %self.operation, "duplicate registration acknowledgment");
                    Route::Duplicate
                }
                Some(EventKind::Registered) => {
                    self.registered = true;
                    Route::Acknowledged(payload)
                }
                Some(EventKind::Raised) => Route::Raised(payload),
                None => {
                    warn!(operation = %self.operation, "listener delivery without eventType");
                    Route::Unrecognised(payload)
                }
            },
        }
    }
}

/// Register a listener and wait for its acknowledgment.
///
/// `map` turns each raised payload into the handler's event type (wrapping
/// image metadata into a handle, splitting a combined payload). Errors that
/// arrive after the acknowledgment reach `handler` as `Err`. Raised payloads
/// that overtake the acknowledgment are still delivered.
///
/// Only one subscription per listener family may be live on a dispatcher;
/// another attempt fails with `ContractViolation` until the first is removed
/// or dropped.
pub async fn subscribe<T, M, H>(
    dispatcher: &CommandDispatcher,
    spec: ListenerSpec,
    args: Vec<Value>,
    map: M,
    mut handler: H,
) -> Result<Subscription>
where
    T: Send + 'static,
    M: Fn(Value) -> Result<T> + Send + 'static,
    H: FnMut(Result<T>) + Send + 'static,
{
    let claim = dispatcher.claim_listener(spec.add)?;
    let mut stream = dispatcher.open(spec.add, args)?;
    let mut router = ListenerRouter::new(spec.add);

    let acknowledgement = loop {
        let Some(delivery) = stream.next().await else {
            return Err(BridgeError::ChannelClosed(spec.add.to_owned()));
        };
        match router.route(delivery) {
            Route::Acknowledged(ack) => break ack,
            Route::Raised(payload) => handler(map(payload)),
            Route::Failed(payload) => return Err(NativeError::new(spec.add, payload).into()),
            Route::Duplicate | Route::Unrecognised(_) => {}
        }
    };
    info!(operation = spec.add, "listener registered");

    let pump = tokio::spawn(pump(stream, router, map, handler));

    Ok(Subscription {
        dispatcher: dispatcher.clone(),
        spec,
        acknowledgement,
        pump,
        _claim: claim,
    })
}

async fn pump<T, M, H>(mut stream: DeliveryStream, mut router: ListenerRouter, map: M, mut handler: H)
where
    M: Fn(Value) -> Result<T>,
    H: FnMut(Result<T>),
{
    while let Some(delivery) = stream.next().await {
        match router.route(delivery) {
            Route::Raised(payload) => handler(map(payload)),
            Route::Failed(payload) => {
                handler(Err(NativeError::new(stream.operation(), payload).into()))
            }
            Route::Acknowledged(_) | Route::Duplicate | Route::Unrecognised(_) => {}
        }
    }
}

/// Handle on a registered listener.
///
/// Dropping it stops local delivery only; call [`remove`](Self::remove) to
/// tell native to stop raising the event.
#[derive(Debug)]
pub struct Subscription {
    dispatcher: CommandDispatcher,
    spec: ListenerSpec,
    acknowledgement: Value,
    pump: JoinHandle<()>,
    _claim: ListenerClaim,
}

impl Subscription {
    /// The registration acknowledgment payload.
    pub fn acknowledgement(&self) -> &Value {
        &self.acknowledgement
    }

    pub fn spec(&self) -> ListenerSpec {
        self.spec
    }

    /// Whether deliveries are still being forwarded to the handler.
    pub fn is_active(&self) -> bool {
        !self.pump.is_finished()
    }

    /// Remove the listener natively and stop the local pump.
    pub async fn remove(self) -> Result<()> {
        let outcome = self.dispatcher.call_unit(self.spec.remove, Vec::new()).await;
        self.pump.abort();
        outcome
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.pump.abort();
    }
}
