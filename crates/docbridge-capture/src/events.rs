// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image-captured event.
//
// Native raises `{primaryImage, glareFreeImage, errorInfo}`. The primary
// image is always present; at most one of the other two is non-null.

use docbridge_core::{BridgeError, Result};
use docbridge_engine::ImageHandle;
use docbridge_native::CommandDispatcher;
use serde_json::Value;

/// What became of glare removal for one capture.
#[derive(Debug, Clone)]
pub enum GlareOutcome {
    /// No glare handling ran, or it had nothing to report.
    None,
    /// A second, glare-corrected image was produced.
    GlareFree(ImageHandle),
    /// Glare removal failed; the native error info, verbatim.
    Error(Value),
}

impl GlareOutcome {
    pub fn glare_free_image(&self) -> Option<&ImageHandle> {
        match self {
            Self::GlareFree(image) => Some(image),
            _ => None,
        }
    }

    pub fn error_info(&self) -> Option<&Value> {
        match self {
            Self::Error(info) => Some(info),
            _ => None,
        }
    }
}

/// One capture raised by a document or fixed-aspect-ratio experience.
#[derive(Debug, Clone)]
pub struct ImageCapturedEvent {
    pub primary_image: ImageHandle,
    pub glare: GlareOutcome,
}

impl ImageCapturedEvent {
    /// Split a raised payload into its parts.
    pub fn from_payload(dispatcher: &CommandDispatcher, operation: &str, payload: Value) -> Result<Self> {
        let primary = present(&payload, "primaryImage").ok_or_else(|| BridgeError::ContractViolation {
            operation: operation.to_owned(),
            detail: "image-captured event without primaryImage".into(),
        })?;
        let primary_image = ImageHandle::from_payload(dispatcher, operation, primary.clone())?;

        let glare = match (present(&payload, "glareFreeImage"), present(&payload, "errorInfo")) {
            (None, None) => GlareOutcome::None,
            (Some(image), None) => {
                GlareOutcome::GlareFree(ImageHandle::from_payload(dispatcher, operation, image.clone())?)
            }
            (None, Some(info)) => GlareOutcome::Error(info.clone()),
            (Some(_), Some(_)) => {
                return Err(BridgeError::ContractViolation {
                    operation: operation.to_owned(),
                    detail: "glareFreeImage and errorInfo are both set".into(),
                });
            }
        };

        Ok(Self { primary_image, glare })
    }
}

fn present<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use docbridge_native::scripted::ScriptedBoundary;
    use serde_json::json;

    const OP: &str = "kuiDCAddImageCapturedEventListener";

    fn dispatcher() -> CommandDispatcher {
        CommandDispatcher::new(Arc::new(ScriptedBoundary::new()))
    }

    #[test]
    fn primary_only() {
        let event = ImageCapturedEvent::from_payload(
            &dispatcher(),
            OP,
            json!({"eventType": "eventRaised", "primaryImage": {"ID": "img1"}, "glareFreeImage": null, "errorInfo": null}),
        )
        .expect("event");
        assert_eq!(event.primary_image.id().as_str(), "img1");
        assert!(matches!(event.glare, GlareOutcome::None));
    }

    #[test]
    fn glare_free_image() {
        let event = ImageCapturedEvent::from_payload(
            &dispatcher(),
            OP,
            json!({"primaryImage": {"ID": "img1"}, "glareFreeImage": {"ID": "img2"}}),
        )
        .expect("event");
        assert_eq!(event.glare.glare_free_image().map(|i| i.id().as_str()), Some("img2"));
        assert!(event.glare.error_info().is_none());
    }

    #[test]
    fn glare_error() {
        let event = ImageCapturedEvent::from_payload(
            &dispatcher(),
            OP,
            json!({"primaryImage": {"ID": "img1"}, "errorInfo": {"ErrorMsg": "KMC_GR_FAILED"}}),
        )
        .expect("event");
        assert_eq!(event.glare.error_info(), Some(&json!({"ErrorMsg": "KMC_GR_FAILED"})));
    }

    #[test]
    fn both_secondaries_violate_the_contract() {
        let err = ImageCapturedEvent::from_payload(
            &dispatcher(),
            OP,
            json!({"primaryImage": {"ID": "img1"}, "glareFreeImage": {"ID": "img2"}, "errorInfo": "KMC_X"}),
        )
        .expect_err("must fail");
        assert!(matches!(err, BridgeError::ContractViolation { .. }));
    }

    #[test]
    fn missing_primary_violates_the_contract() {
        let err = ImageCapturedEvent::from_payload(&dispatcher(), OP, json!({"primaryImage": null}))
            .expect_err("must fail");
        assert!(matches!(err, BridgeError::ContractViolation { ref operation, .. } if operation == OP));
    }
}
