// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command dispatcher.
//
// Turns a native operation name plus arguments into exactly one outcome. No
// retries, no timeouts and no cancellation happen here; anything of that kind
// is enforced natively and only ever surfaces as an error payload.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use docbridge_core::{BridgeConfig, BridgeError, NativeError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::traits::{Delivery, DeliveryStream, NativeBoundary, NativeCall, delivery_channel};

/// Shared entry point for every proxy. Cheap to clone.
#[derive(Clone)]
pub struct CommandDispatcher {
    boundary: Arc<dyn NativeBoundary>,
    config: Arc<BridgeConfig>,
    listeners: Arc<Mutex<HashSet<&'static str>>>,
}

impl std::fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("platform", &self.boundary.platform_name())
            .field("service", &self.config.service_name)
            .finish()
    }
}

impl CommandDispatcher {
    pub fn new(boundary: Arc<dyn NativeBoundary>) -> Self {
        Self::with_config(boundary, BridgeConfig::default())
    }

    pub fn with_config(boundary: Arc<dyn NativeBoundary>, config: BridgeConfig) -> Self {
        Self {
            boundary,
            config: Arc::new(config),
            listeners: Arc::default(),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn service(&self) -> &str {
        &self.config.service_name
    }

    pub fn platform_name(&self) -> &str {
        self.boundary.platform_name()
    }

    /// Dispatch a call and hand back its raw delivery channel.
    ///
    /// Used directly by listener registrations, which see many deliveries on
    /// one channel.
    pub fn open(&self, operation: &str, args: Vec<Value>) -> Result<DeliveryStream> {
        debug!(operation, service = %self.config.service_name, "native call");
        let (sink, stream) = delivery_channel(operation);
        self.boundary.exec(
            NativeCall {
                service: self.config.service_name.clone(),
                operation: operation.to_owned(),
                args,
            },
            sink,
        )?;
        Ok(stream)
    }

    /// Reserve the listener family registered through `operation`.
    ///
    /// Native keeps one callback per add operation, so a second live
    /// registration would silently replace the first. The claim is released
    /// when the returned guard drops.
    pub(crate) fn claim_listener(&self, operation: &'static str) -> Result<ListenerClaim> {
        let mut live = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        if !live.insert(operation) {
            return Err(BridgeError::ContractViolation {
                operation: operation.to_owned(),
                detail: "listener already registered; remove it first".into(),
            });
        }
        Ok(ListenerClaim {
            listeners: self.listeners.clone(),
            operation,
        })
    }

    /// Dispatch a call and resolve to its first outcome.
    ///
    /// Later deliveries on the same channel are dropped with the stream.
    pub async fn call(&self, operation: &str, args: Vec<Value>) -> Result<Value> {
        let mut stream = self.open(operation, args)?;
        match stream.next().await {
            Some(Delivery::Success(payload)) => Ok(payload),
            Some(Delivery::Error(payload)) => {
                let err = NativeError::new(operation, payload);
                debug!(operation, code = err.code().unwrap_or("-"), "native error");
                Err(err.into())
            }
            None => Err(BridgeError::ChannelClosed(operation.to_owned())),
        }
    }

    /// As [`call`](Self::call), decoding the success payload into `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, operation: &str, args: Vec<Value>) -> Result<T> {
        let payload = self.call(operation, args).await?;
        decode(operation, payload)
    }

    /// As [`call`](Self::call), discarding the success payload.
    pub async fn call_unit(&self, operation: &str, args: Vec<Value>) -> Result<()> {
        self.call(operation, args).await.map(|_| ())
    }
}

/// Live registration of one listener family on a dispatcher.
#[derive(Debug)]
pub(crate) struct ListenerClaim {
    listeners: Arc<Mutex<HashSet<&'static str>>>,
    operation: &'static str,
}

impl Drop for ListenerClaim {
    fn drop(&mut self) {
        if let Ok(mut live) = self.listeners.lock() {
            live.remove(self.operation);
        }
    }
}

/// Decode a native payload, attributing failures to `operation`.
pub fn decode<T: DeserializeOwned>(operation: &str, payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|source| BridgeError::Decode {
        operation: operation.to_owned(),
        source,
    })
}

/// Serialize one call argument.
pub fn arg<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedBoundary;
    use crate::stub::StubBoundary;
    use docbridge_core::ImageSize;
    use serde_json::json;

    #[tokio::test]
    async fn success_resolves_once() {
        let native = Arc::new(ScriptedBoundary::new());
        native.respond("kedGetImageSize", json!({"width": 10, "height": 20}));
        let dispatcher = CommandDispatcher::new(native.clone());

        let size: ImageSize = dispatcher
            .call_as("kedGetImageSize", vec![json!("img1")])
            .await
            .expect("size");
        assert_eq!(size, ImageSize { width: 10, height: 20 });

        let calls = native.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].service, "kfxPlugin");
        assert_eq!(calls[0].args, vec![json!("img1")]);
    }

    #[tokio::test]
    async fn error_payload_is_verbatim() {
        let native = Arc::new(ScriptedBoundary::new());
        let payload = json!({"ErrorMsg": "KMC_ED_NOIMAGE", "ErrorDesc": "no image", "extra": 1});
        native.fail("kedGetImageToBase64", payload.clone());
        let dispatcher = CommandDispatcher::new(native);

        let err = dispatcher
            .call("kedGetImageToBase64", vec![json!("img1")])
            .await
            .expect_err("must fail");
        let native_err = err.as_native().expect("native error");
        assert_eq!(native_err.operation, "kedGetImageToBase64");
        assert_eq!(native_err.payload, payload);
    }

    #[tokio::test]
    async fn decode_failure_names_the_operation() {
        let native = Arc::new(ScriptedBoundary::new());
        native.respond("kedGetImageSize", json!("not a size"));
        let dispatcher = CommandDispatcher::new(native);

        let err = dispatcher
            .call_as::<ImageSize>("kedGetImageSize", vec![])
            .await
            .expect_err("must fail");
        assert!(matches!(err, BridgeError::Decode { ref operation, .. } if operation == "kedGetImageSize"));
    }

    #[tokio::test]
    async fn silent_boundary_closes_channel() {
        let native = Arc::new(ScriptedBoundary::new());
        native.drop_silently("kuiDCStopCapture");
        let dispatcher = CommandDispatcher::new(native);

        let err = dispatcher.call("kuiDCStopCapture", vec![]).await.expect_err("must fail");
        assert!(matches!(err, BridgeError::ChannelClosed(_)));
    }

    #[tokio::test]
    async fn stub_refuses_dispatch() {
        let dispatcher = CommandDispatcher::new(Arc::new(StubBoundary));
        let err = dispatcher.call("kuiDCTakePicture", vec![]).await.expect_err("must fail");
        assert!(matches!(err, BridgeError::PlatformUnavailable));
    }

    #[tokio::test]
    async fn configured_service_name_is_used() {
        let native = Arc::new(ScriptedBoundary::new());
        native.respond("kuiDCStopCapture", Value::Null);
        let config = BridgeConfig {
            service_name: "CustomPlugin".into(),
            ..Default::default()
        };
        let dispatcher = CommandDispatcher::with_config(native.clone(), config);

        dispatcher.call_unit("kuiDCStopCapture", vec![]).await.expect("stop");
        assert_eq!(native.calls()[0].service, "CustomPlugin");
    }
}
