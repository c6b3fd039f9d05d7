// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// On-device extraction proxy.
//
// Extraction is started with `extract_fields` and its outcome arrives on the
// extraction listener, never on the call itself. Front and back are processed
// independently; one side failing does not withhold the other's fields.

use std::sync::{Arc, Mutex};

use docbridge_core::{
    DataField, ExtractionParameters, ExtractionResults, IdType, MissingSidePolicy, Provider,
    Region, Result,
};
use docbridge_native::dispatcher::{arg, decode};
use docbridge_native::{CommandDispatcher, Subscription, ops, subscribe};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::image::ImageHandle;

/// Code native reports for a side that had no image.
pub const NO_IMAGE_CODE: &str = "KMC_EX_NOIMAGE";

/// Which sides of the last dispatched extraction request carried an image.
/// Barcodes alone do not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequestedSides {
    front: bool,
    back: bool,
}

impl RequestedSides {
    fn of(params: &ExtractionParameters) -> Self {
        Self {
            front: params.front_image_id.is_some(),
            back: params.back_image_id.is_some(),
        }
    }
}

/// Merged outcome of one extraction, as seen by the results listener.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub fields: Vec<DataField>,
    pub face_image: Option<ImageHandle>,
    pub signature_image: Option<ImageHandle>,
    pub front_error: Option<Value>,
    pub back_error: Option<Value>,
    /// Failure not attributed to either side.
    pub error: Option<Value>,
}

impl ExtractionOutcome {
    /// No side and no overall error was reported.
    pub fn is_clean(&self) -> bool {
        self.front_error.is_none() && self.back_error.is_none() && self.error.is_none()
    }

    /// Look up an extracted field by name.
    pub fn field(&self, name: &str) -> Option<&DataField> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    fn from_results(
        dispatcher: &CommandDispatcher,
        results: ExtractionResults,
        policy: MissingSidePolicy,
        requested: Option<RequestedSides>,
    ) -> Self {
        let wrap = |record| ImageHandle::new(dispatcher.clone(), record);
        let mut outcome = Self {
            fields: results.extraction_results.unwrap_or_default(),
            face_image: results.face_image.map(wrap),
            signature_image: results.signature_image.map(wrap),
            front_error: results.extraction_front_error.filter(|v| !v.is_null()),
            back_error: results.extraction_back_error.filter(|v| !v.is_null()),
            error: results.extraction_error.filter(|v| !v.is_null()),
        };
        if let Some(sides) = requested {
            apply_policy(&mut outcome.front_error, sides.front, policy);
            apply_policy(&mut outcome.back_error, sides.back, policy);
        }
        outcome
    }
}

fn apply_policy(side_error: &mut Option<Value>, supplied: bool, policy: MissingSidePolicy) {
    if supplied {
        return;
    }
    match policy {
        MissingSidePolicy::Passthrough => {}
        MissingSidePolicy::ReportNoImage => {
            side_error.get_or_insert_with(|| json!(NO_IMAGE_CODE));
        }
        MissingSidePolicy::Suppress => *side_error = None,
    }
}

/// Proxy for the native on-device ID extractor.
#[derive(Debug, Clone)]
pub struct OnDeviceExtraction {
    dispatcher: CommandDispatcher,
    requested: Arc<Mutex<Option<RequestedSides>>>,
}

impl OnDeviceExtraction {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self {
            dispatcher,
            requested: Arc::new(Mutex::new(None)),
        }
    }

    pub fn regions() -> &'static [Region] {
        &Region::ALL
    }

    pub fn providers() -> &'static [Provider] {
        &[Provider::Local, Provider::Server]
    }

    pub fn id_types() -> &'static [IdType] {
        &[IdType::Id, IdType::Passport]
    }

    /// Choose where models are loaded from. Must precede extraction.
    pub async fn set_provider(&self, provider: Provider) -> Result<()> {
        self.dispatcher
            .call_unit(ops::extraction::SET_PROVIDER, vec![json!({"provider": provider})])
            .await
    }

    /// Name of the model project used for a region and document kind.
    pub async fn project_name(&self, region: Region, id_type: IdType) -> Result<String> {
        self.dispatcher
            .call_as(
                ops::extraction::GET_PROJECT_NAME,
                vec![json!({"region": region, "IDType": id_type})],
            )
            .await
    }

    /// Start extraction. Results arrive on the extraction listener.
    ///
    /// The request becomes the one `MissingSidePolicy` is judged against
    /// when it is dispatched, since native may raise results before the call
    /// itself resolves. A rejected request restores the previous one.
    #[instrument(skip_all, fields(region = ?params.region, front = params.has_front(), back = params.has_back()))]
    pub async fn extract_fields(&self, params: &ExtractionParameters) -> Result<()> {
        let args = vec![arg(params)?];
        let sides = RequestedSides::of(params);
        let previous = self.swap_requested(Some(sides));
        let outcome = self.dispatcher.call_unit(ops::extraction::EXTRACT_DATA, args).await;
        if outcome.is_err() {
            if let Ok(mut requested) = self.requested.lock() {
                // Leave a newer request alone.
                if *requested == Some(sides) {
                    *requested = previous;
                }
            }
        }
        outcome
    }

    fn swap_requested(&self, sides: Option<RequestedSides>) -> Option<RequestedSides> {
        self.requested
            .lock()
            .map(|mut requested| std::mem::replace(&mut *requested, sides))
            .unwrap_or(None)
    }

    /// Best-effort cancellation of the extraction underway.
    pub async fn cancel_extraction(&self) -> Result<()> {
        self.dispatcher
            .call_unit(ops::extraction::CANCEL_EXTRACTION, Vec::new())
            .await
    }

    /// Receive merged extraction results.
    ///
    /// The configured `MissingSidePolicy` decides what a side that was not
    /// supplied to the last `extract_fields` call reports.
    pub async fn add_extraction_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ExtractionOutcome>) + Send + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        let requested = self.requested.clone();
        let policy = self.dispatcher.config().missing_side_policy;
        let map = move |payload: Value| {
            let results: ExtractionResults = decode(ops::extraction::RESULTS.add, payload)?;
            let sides = requested.lock().map(|r| *r).unwrap_or(None);
            debug!(?sides, ?policy, "extraction results");
            Ok(ExtractionOutcome::from_results(&dispatcher, results, policy, sides))
        };
        subscribe(&self.dispatcher, ops::extraction::RESULTS, Vec::new(), map, handler).await
    }

    /// Receive the processed front image.
    pub async fn add_front_processed_image_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ImageHandle>) + Send + 'static,
    {
        self.image_listener(ops::extraction::FRONT_PROCESSED_IMAGE, handler).await
    }

    /// Receive the processed back image.
    pub async fn add_back_processed_image_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ImageHandle>) + Send + 'static,
    {
        self.image_listener(ops::extraction::BACK_PROCESSED_IMAGE, handler).await
    }

    async fn image_listener<H>(&self, spec: docbridge_native::ListenerSpec, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ImageHandle>) + Send + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        let map = move |payload| ImageHandle::from_payload(&dispatcher, spec.add, payload);
        subscribe(&self.dispatcher, spec, Vec::new(), map, handler).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbridge_core::{BridgeConfig, ImageId};
    use docbridge_native::scripted::ScriptedBoundary;

    fn extractor(policy: MissingSidePolicy) -> (Arc<ScriptedBoundary>, OnDeviceExtraction) {
        let native = Arc::new(ScriptedBoundary::new());
        native.respond(ops::extraction::EXTRACT_DATA, json!("KMC_SUCCESS"));
        native.listen(ops::extraction::RESULTS);
        let config = BridgeConfig {
            missing_side_policy: policy,
            ..Default::default()
        };
        let dispatcher = CommandDispatcher::with_config(native.clone(), config);
        (native, OnDeviceExtraction::new(dispatcher))
    }

    fn front_only() -> ExtractionParameters {
        let mut params = ExtractionParameters::new(Region::Us, IdType::Id);
        params.front_image_id = Some(ImageId::new("front"));
        params
    }

    async fn next_outcome(
        rx: &mut tokio::sync::mpsc::UnboundedReceiver<Result<ExtractionOutcome>>,
    ) -> ExtractionOutcome {
        rx.recv().await.expect("delivery").expect("outcome")
    }

    async fn run(policy: MissingSidePolicy, raised: Value) -> ExtractionOutcome {
        let (native, extraction) = extractor(policy);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _sub = extraction
            .add_extraction_listener(move |outcome| {
                let _ = tx.send(outcome);
            })
            .await
            .expect("subscribe");

        extraction.extract_fields(&front_only()).await.expect("extract");
        assert!(native.raise(ops::extraction::RESULTS.add, raised));
        next_outcome(&mut rx).await
    }

    fn back_failed() -> Value {
        json!({
            "extractionResults": [
                {"fieldName": "LastName", "fieldValue": "DOE", "fieldConfidence": 0.97,
                 "fieldLocation": {"x": 10.0, "y": 20.0, "width": 100.0, "height": 18.0}}
            ],
            "extractionBackError": {"ErrorMsg": NO_IMAGE_CODE}
        })
    }

    #[tokio::test]
    async fn passthrough_keeps_native_side_error() {
        let outcome = run(MissingSidePolicy::Passthrough, back_failed()).await;
        assert_eq!(outcome.field("LastName").and_then(|f| f.field_value.as_deref()), Some("DOE"));
        assert!(outcome.front_error.is_none());
        assert_eq!(outcome.back_error, Some(json!({"ErrorMsg": NO_IMAGE_CODE})));
    }

    #[tokio::test]
    async fn suppress_drops_error_for_unsupplied_side() {
        let outcome = run(MissingSidePolicy::Suppress, back_failed()).await;
        assert_eq!(outcome.fields.len(), 1);
        assert!(outcome.back_error.is_none());
        assert!(outcome.is_clean());
    }

    #[tokio::test]
    async fn report_no_image_synthesises_missing_error() {
        let outcome = run(
            MissingSidePolicy::ReportNoImage,
            json!({"extractionResults": []}),
        )
        .await;
        assert_eq!(outcome.back_error, Some(json!(NO_IMAGE_CODE)));
        assert!(outcome.front_error.is_none());
    }

    #[tokio::test]
    async fn rejected_request_keeps_the_previous_sides() {
        let (native, extraction) = extractor(MissingSidePolicy::ReportNoImage);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _sub = extraction
            .add_extraction_listener(move |outcome| {
                let _ = tx.send(outcome);
            })
            .await
            .expect("subscribe");

        extraction.extract_fields(&front_only()).await.expect("extract");
        native.fail(ops::extraction::EXTRACT_DATA, json!("KMC_EX_BUSY"));
        let mut back_only = ExtractionParameters::new(Region::Us, IdType::Id);
        back_only.back_image_id = Some(ImageId::new("back"));
        extraction.extract_fields(&back_only).await.expect_err("rejected");

        native.raise(ops::extraction::RESULTS.add, json!({"extractionResults": []}));
        let outcome = next_outcome(&mut rx).await;
        assert!(outcome.front_error.is_none());
        assert_eq!(outcome.back_error, Some(json!(NO_IMAGE_CODE)));
    }

    #[tokio::test]
    async fn barcodes_alone_are_not_an_image() {
        let (native, extraction) = extractor(MissingSidePolicy::ReportNoImage);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _sub = extraction
            .add_extraction_listener(move |outcome| {
                let _ = tx.send(outcome);
            })
            .await
            .expect("subscribe");

        let mut params = front_only();
        params.back_barcodes = Some(vec![json!({"value": "PDF417"})]);
        extraction.extract_fields(&params).await.expect("extract");
        native.raise(ops::extraction::RESULTS.add, json!({"extractionResults": []}));

        let outcome = next_outcome(&mut rx).await;
        assert!(outcome.front_error.is_none());
        assert_eq!(outcome.back_error, Some(json!(NO_IMAGE_CODE)));
    }

    #[tokio::test]
    async fn supplied_side_error_is_never_rewritten() {
        let outcome = run(
            MissingSidePolicy::Suppress,
            json!({"extractionFrontError": "KMC_EX_LOW_CONFIDENCE"}),
        )
        .await;
        assert_eq!(outcome.front_error, Some(json!("KMC_EX_LOW_CONFIDENCE")));
    }

    #[tokio::test]
    async fn error_delivery_is_verbatim() {
        let (native, extraction) = extractor(MissingSidePolicy::Suppress);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _sub = extraction
            .add_extraction_listener(move |outcome| {
                let _ = tx.send(outcome);
            })
            .await
            .expect("subscribe");

        let payload = json!({"extractionFrontError": "KMC_EX_NOIMAGE", "extractionBackError": "KMC_EX_NOIMAGE"});
        native.raise_error(ops::extraction::RESULTS.add, payload.clone());
        let err = rx.recv().await.expect("delivery").expect_err("error");
        let native_err = err.as_native().expect("native");
        assert_eq!(native_err.payload, payload);
        assert_eq!(native_err.category(), docbridge_core::ErrorCategory::PartialExtraction);
    }

    #[tokio::test]
    async fn face_image_becomes_a_handle() {
        let outcome = run(
            MissingSidePolicy::Passthrough,
            json!({"faceImage": {"ID": "face1", "width": 120, "height": 160}}),
        )
        .await;
        assert_eq!(outcome.face_image.expect("face").id().as_str(), "face1");
        assert!(outcome.signature_image.is_none());
    }

    #[tokio::test]
    async fn processed_image_listeners_are_independent() {
        let native = Arc::new(ScriptedBoundary::new());
        native.listen(ops::extraction::FRONT_PROCESSED_IMAGE);
        let extraction = OnDeviceExtraction::new(CommandDispatcher::new(native.clone()));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let _front = extraction
            .add_front_processed_image_listener(move |image| {
                let _ = tx.send(image);
            })
            .await
            .expect("subscribe");
        let err = extraction
            .add_back_processed_image_listener(|_| {})
            .await
            .expect_err("back listener not scripted");
        assert!(err.as_native().is_some());

        native.raise(ops::extraction::FRONT_PROCESSED_IMAGE.add, json!({"ID": "procFront"}));
        let image = rx.recv().await.expect("delivery").expect("image");
        assert_eq!(image.id().as_str(), "procFront");
    }

    #[tokio::test]
    async fn provider_and_project_arguments() {
        let native = Arc::new(ScriptedBoundary::new());
        native.respond(ops::extraction::SET_PROVIDER, json!("KMC_SUCCESS"));
        native.respond(ops::extraction::GET_PROJECT_NAME, json!("US_ID"));
        let extraction = OnDeviceExtraction::new(CommandDispatcher::new(native.clone()));

        extraction.set_provider(Provider::Server).await.expect("provider");
        let name = extraction.project_name(Region::Us, IdType::Id).await.expect("project");
        assert_eq!(name, "US_ID");

        let calls = native.calls();
        assert_eq!(calls[0].args, vec![json!({"provider": 1})]);
        assert_eq!(calls[1].args, vec![json!({"region": "US", "IDType": 0})]);
        assert_eq!(OnDeviceExtraction::regions().len(), 6);
    }
}
