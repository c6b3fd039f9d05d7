// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture experience proxies.
//
// The three experiences share one proxy type parameterised by an
// `ExperienceKind`, which carries the option schema and the native operation
// names. Nothing here validates options or call order; the capture control
// reports those errors itself.

use std::fmt;
use std::marker::PhantomData;

use docbridge_core::{CaptureControlId, Result};
use docbridge_engine::ImageHandle;
use docbridge_native::dispatcher::arg;
use docbridge_native::{CommandDispatcher, ListenerSpec, Subscription, ops, subscribe};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::events::ImageCapturedEvent;
use crate::options::{DocumentCaptureOptions, FixedAspectRatioCaptureOptions, SelfieCaptureOptions};

/// Operation table and option schema of one capture experience.
pub trait ExperienceKind: Send + Sync + 'static {
    type Options: Serialize + DeserializeOwned + Default + Clone + fmt::Debug + Send + 'static;

    const NAME: &'static str;
    const BIND: &'static str;
    const BIND_WITH_OPTIONS: &'static str;
    const TAKE_PICTURE: &'static str;
    const STOP_CAPTURE: &'static str;
    const SET_OPTIONS: &'static str;
    const GET_OPTIONS: &'static str;
    const DESTROY: &'static str;
}

/// Experiences that run glare detection and report the combined
/// image-captured event.
pub trait GlareAware: ExperienceKind {
    const TAKE_PICTURE_CONTINUALLY: &'static str;
    const DEFAULT_GLARE_THRESHOLD: &'static str;
    const IMAGE_CAPTURED_EVENT: ListenerSpec;
    const IMAGE_ABOUT_TO_CAPTURE: ListenerSpec;
    const IMAGE_JUST_CAPTURED: ListenerSpec;
}

#[derive(Debug, Clone, Copy)]
pub enum DocumentCapture {}

#[derive(Debug, Clone, Copy)]
pub enum FixedAspectRatioCapture {}

#[derive(Debug, Clone, Copy)]
pub enum SelfieCapture {}

impl ExperienceKind for DocumentCapture {
    type Options = DocumentCaptureOptions;

    const NAME: &'static str = "document";
    const BIND: &'static str = ops::document_capture::BIND;
    const BIND_WITH_OPTIONS: &'static str = ops::document_capture::BIND_WITH_OPTIONS;
    const TAKE_PICTURE: &'static str = ops::document_capture::TAKE_PICTURE;
    const STOP_CAPTURE: &'static str = ops::document_capture::STOP_CAPTURE;
    const SET_OPTIONS: &'static str = ops::document_capture::SET_OPTIONS;
    const GET_OPTIONS: &'static str = ops::document_capture::GET_OPTIONS;
    const DESTROY: &'static str = ops::document_capture::DESTROY;
}

impl GlareAware for DocumentCapture {
    const TAKE_PICTURE_CONTINUALLY: &'static str = ops::document_capture::TAKE_PICTURE_CONTINUALLY;
    const DEFAULT_GLARE_THRESHOLD: &'static str = ops::document_capture::DEFAULT_GLARE_THRESHOLD;
    const IMAGE_CAPTURED_EVENT: ListenerSpec = ops::document_capture::IMAGE_CAPTURED_EVENT;
    const IMAGE_ABOUT_TO_CAPTURE: ListenerSpec = ops::document_capture::IMAGE_ABOUT_TO_CAPTURE;
    const IMAGE_JUST_CAPTURED: ListenerSpec = ops::document_capture::IMAGE_JUST_CAPTURED;
}

impl ExperienceKind for FixedAspectRatioCapture {
    type Options = FixedAspectRatioCaptureOptions;

    const NAME: &'static str = "fixed-aspect-ratio";
    const BIND: &'static str = ops::fixed_aspect_capture::BIND;
    const BIND_WITH_OPTIONS: &'static str = ops::fixed_aspect_capture::BIND_WITH_OPTIONS;
    const TAKE_PICTURE: &'static str = ops::fixed_aspect_capture::TAKE_PICTURE;
    const STOP_CAPTURE: &'static str = ops::fixed_aspect_capture::STOP_CAPTURE;
    const SET_OPTIONS: &'static str = ops::fixed_aspect_capture::SET_OPTIONS;
    const GET_OPTIONS: &'static str = ops::fixed_aspect_capture::GET_OPTIONS;
    const DESTROY: &'static str = ops::fixed_aspect_capture::DESTROY;
}

impl GlareAware for FixedAspectRatioCapture {
    const TAKE_PICTURE_CONTINUALLY: &'static str = ops::fixed_aspect_capture::TAKE_PICTURE_CONTINUALLY;
    const DEFAULT_GLARE_THRESHOLD: &'static str = ops::fixed_aspect_capture::DEFAULT_GLARE_THRESHOLD;
    const IMAGE_CAPTURED_EVENT: ListenerSpec = ops::fixed_aspect_capture::IMAGE_CAPTURED_EVENT;
    const IMAGE_ABOUT_TO_CAPTURE: ListenerSpec = ops::fixed_aspect_capture::IMAGE_ABOUT_TO_CAPTURE;
    const IMAGE_JUST_CAPTURED: ListenerSpec = ops::fixed_aspect_capture::IMAGE_JUST_CAPTURED;
}

impl ExperienceKind for SelfieCapture {
    type Options = SelfieCaptureOptions;

    const NAME: &'static str = "selfie";
    const BIND: &'static str = ops::selfie_capture::BIND;
    const BIND_WITH_OPTIONS: &'static str = ops::selfie_capture::BIND_WITH_OPTIONS;
    const TAKE_PICTURE: &'static str = ops::selfie_capture::TAKE_PICTURE;
    const STOP_CAPTURE: &'static str = ops::selfie_capture::STOP_CAPTURE;
    const SET_OPTIONS: &'static str = ops::selfie_capture::SET_OPTIONS;
    const GET_OPTIONS: &'static str = ops::selfie_capture::GET_OPTIONS;
    const DESTROY: &'static str = ops::selfie_capture::DESTROY;
}

pub type DocumentCaptureExperience = CaptureExperience<DocumentCapture>;
pub type FixedAspectRatioCaptureExperience = CaptureExperience<FixedAspectRatioCapture>;
pub type SelfieCaptureExperience = CaptureExperience<SelfieCapture>;

/// Proxy for one native capture experience.
pub struct CaptureExperience<K: ExperienceKind> {
    dispatcher: CommandDispatcher,
    kind: PhantomData<fn() -> K>,
}

impl<K: ExperienceKind> Clone for CaptureExperience<K> {
    fn clone(&self) -> Self {
        Self::new(self.dispatcher.clone())
    }
}

impl<K: ExperienceKind> fmt::Debug for CaptureExperience<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureExperience")
            .field("kind", &K::NAME)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl<K: ExperienceKind> CaptureExperience<K> {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self {
            dispatcher,
            kind: PhantomData,
        }
    }

    /// The option record with the SDK defaults. A fresh value on every call;
    /// no native call is made.
    pub fn capture_options() -> K::Options {
        K::Options::default()
    }

    /// Attach the experience to an image capture control.
    #[instrument(skip_all, fields(kind = K::NAME, control = %control))]
    pub async fn bind_capture_control(&self, control: &CaptureControlId) -> Result<Value> {
        self.dispatcher.call(K::BIND, vec![json!(control)]).await
    }

    /// Bind and apply `options` in one native call.
    #[instrument(skip_all, fields(kind = K::NAME, control = %control))]
    pub async fn bind_capture_control_with_options(
        &self,
        control: &CaptureControlId,
        options: &K::Options,
    ) -> Result<Value> {
        let params = json!({
            "ImageCaptureControlID": control,
            "CaptureExperienceOptions": arg(options)?,
        });
        self.dispatcher.call(K::BIND_WITH_OPTIONS, vec![params]).await
    }

    /// Arm a single capture. The image arrives on a captured listener.
    pub async fn take_picture(&self) -> Result<Value> {
        self.dispatcher.call(K::TAKE_PICTURE, Vec::new()).await
    }

    pub async fn stop_capture(&self) -> Result<Value> {
        self.dispatcher.call(K::STOP_CAPTURE, Vec::new()).await
    }

    pub async fn get_options(&self) -> Result<K::Options> {
        self.dispatcher.call_as(K::GET_OPTIONS, Vec::new()).await
    }

    pub async fn set_options(&self, options: &K::Options) -> Result<()> {
        self.dispatcher.call_unit(K::SET_OPTIONS, vec![arg(options)?]).await
    }

    /// Release the native experience. Further calls on this proxy fail natively.
    pub async fn destroy(self) -> Result<()> {
        self.dispatcher.call_unit(K::DESTROY, Vec::new()).await?;
        info!(kind = K::NAME, "capture experience destroyed");
        Ok(())
    }

    async fn image_listener<H>(&self, spec: ListenerSpec, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ImageHandle>) + Send + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        let map = move |payload| ImageHandle::from_payload(&dispatcher, spec.add, payload);
        subscribe(&self.dispatcher, spec, Vec::new(), map, handler).await
    }
}

impl<K: GlareAware> CaptureExperience<K> {
    /// Keep capturing until `stop_capture`. The device must be tilted
    /// between captures.
    pub async fn take_picture_continually(&self) -> Result<Value> {
        self.dispatcher.call(K::TAKE_PICTURE_CONTINUALLY, Vec::new()).await
    }

    /// Platform default glare threshold.
    pub async fn default_glare_threshold(&self) -> Result<f64> {
        self.dispatcher.call_as(K::DEFAULT_GLARE_THRESHOLD, Vec::new()).await
    }

    /// Receive every capture with its glare outcome.
    pub async fn add_image_captured_event_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ImageCapturedEvent>) + Send + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        let op = K::IMAGE_CAPTURED_EVENT.add;
        let map = move |payload| ImageCapturedEvent::from_payload(&dispatcher, op, payload);
        subscribe(&self.dispatcher, K::IMAGE_CAPTURED_EVENT, Vec::new(), map, handler).await
    }

    /// Receive only the primary image of each capture.
    ///
    /// Shares the native registration of
    /// [`add_image_captured_event_listener`](Self::add_image_captured_event_listener):
    /// only one of the two may be live at a time.
    #[deprecated(note = "use add_image_captured_event_listener")]
    pub async fn add_image_captured_listener<H>(&self, mut handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ImageHandle>) + Send + 'static,
    {
        self.add_image_captured_event_listener(move |event: Result<ImageCapturedEvent>| {
            handler(event.map(|e| e.primary_image))
        })
        .await
    }

    /// Capture criteria are met and the shot is about to be taken. The raw
    /// payload is passed through.
    pub async fn add_image_about_to_capture_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<Value>) + Send + 'static,
    {
        subscribe(&self.dispatcher, K::IMAGE_ABOUT_TO_CAPTURE, Vec::new(), Ok, handler).await
    }

    /// The image was taken; raised before the captured message is shown.
    pub async fn add_image_just_captured_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ImageHandle>) + Send + 'static,
    {
        self.image_listener(K::IMAGE_JUST_CAPTURED, handler).await
    }
}

impl CaptureExperience<SelfieCapture> {
    pub async fn add_image_captured_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ImageHandle>) + Send + 'static,
    {
        self.image_listener(ops::selfie_capture::IMAGE_CAPTURED, handler).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use docbridge_core::BridgeError;
    use docbridge_native::scripted::ScriptedBoundary;

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn setup<K: ExperienceKind>() -> (Arc<ScriptedBoundary>, CaptureExperience<K>) {
        let native = Arc::new(ScriptedBoundary::new());
        let experience = CaptureExperience::new(CommandDispatcher::new(native.clone()));
        (native, experience)
    }

    #[test]
    fn capture_options_are_fresh_values() {
        let mut first = DocumentCaptureExperience::capture_options();
        first.capture_criteria.stability_threshold = 10;
        first.user_instruction_message.message = "changed".into();
        let second = DocumentCaptureExperience::capture_options();
        assert_eq!(second.capture_criteria.stability_threshold, 95);
        assert_eq!(second, DocumentCaptureExperience::capture_options());

        let mut selfie = SelfieCaptureExperience::capture_options();
        selfie.look_and_feel.vibration_enabled = false;
        assert!(SelfieCaptureExperience::capture_options().look_and_feel.vibration_enabled);

        assert_eq!(
            FixedAspectRatioCaptureExperience::capture_options(),
            FixedAspectRatioCaptureExperience::capture_options()
        );
    }

    #[tokio::test]
    async fn bind_passes_the_control_id() {
        let (native, experience) = setup::<DocumentCapture>();
        native.respond(ops::document_capture::BIND, json!("bound"));

        let reply = experience
            .bind_capture_control(&CaptureControlId::new("ctl-1"))
            .await
            .expect("bind");
        assert_eq!(reply, json!("bound"));
        assert_eq!(native.calls()[0].args, vec![json!("ctl-1")]);
    }

    #[tokio::test]
    async fn bind_with_options_wraps_both() {
        let (native, experience) = setup::<FixedAspectRatioCapture>();
        native.respond(ops::fixed_aspect_capture::BIND_WITH_OPTIONS, json!("bound"));

        let mut options = FixedAspectRatioCaptureExperience::capture_options();
        options.capture_criteria.tilt_angle = 5;
        experience
            .bind_capture_control_with_options(&CaptureControlId::new("ctl-2"), &options)
            .await
            .expect("bind");

        let args = &native.calls()[0].args;
        assert_eq!(args[0]["ImageCaptureControlID"], "ctl-2");
        assert_eq!(args[0]["CaptureExperienceOptions"]["CaptureCriteria"]["tiltAngle"], 5);
    }

    #[tokio::test]
    async fn wrong_control_error_is_native() {
        let (native, experience) = setup::<SelfieCapture>();
        native.fail(ops::selfie_capture::BIND, json!({"ErrorMsg": "KMC_UI_INVALID_CONTROL"}));

        let err = experience
            .bind_capture_control(&CaptureControlId::new("ctl-x"))
            .await
            .expect_err("must fail");
        assert_eq!(err.as_native().and_then(|e| e.code()), Some("KMC_UI_INVALID_CONTROL"));
    }

    #[tokio::test]
    async fn options_round_trip_through_native() {
        let (native, experience) = setup::<DocumentCapture>();
        let mut options = DocumentCaptureExperience::capture_options();
        options.look_and_feel.guidance_frame_thickness = 4;
        native.respond(ops::document_capture::GET_OPTIONS, serde_json::to_value(&options).expect("json"));
        native.respond(ops::document_capture::SET_OPTIONS, Value::Null);

        experience.set_options(&options).await.expect("set");
        let read = experience.get_options().await.expect("get");
        assert_eq!(read.look_and_feel.guidance_frame_thickness, 4);
        assert_eq!(native.calls_to(ops::document_capture::SET_OPTIONS)[0].args[0]["LookAndFeel"]["guidanceFrameThickness"], 4);
    }

    #[tokio::test]
    async fn default_glare_threshold_is_a_scalar() {
        let (native, experience) = setup::<FixedAspectRatioCapture>();
        native.respond(ops::fixed_aspect_capture::DEFAULT_GLARE_THRESHOLD, json!(0.03));
        let threshold = experience.default_glare_threshold().await.expect("threshold");
        assert!((threshold - 0.03).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn captured_event_splits_the_payload() {
        let (native, experience) = setup::<DocumentCapture>();
        let spec = ops::document_capture::IMAGE_CAPTURED_EVENT;
        native.listen(spec);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let sub = experience
            .add_image_captured_event_listener(move |event| sink.lock().expect("lock").push(event))
            .await
            .expect("subscribe");
        assert_eq!(sub.acknowledgement()["eventType"], "eventRegistered");

        native.raise(spec.add, json!({"primaryImage": {"ID": "img1"}, "glareFreeImage": {"ID": "img2"}}));
        native.raise(spec.add, json!({"primaryImage": {"ID": "img3"}, "errorInfo": {"ErrorMsg": "KMC_GR_FAILED"}}));
        native.raise(spec.add, json!({"primaryImage": {"ID": "img4"}, "glareFreeImage": {"ID": "img5"}, "errorInfo": "X"}));
        settle().await;

        let seen = seen.lock().expect("lock");
        assert_eq!(seen.len(), 3);
        let first = seen[0].as_ref().expect("event");
        assert_eq!(first.primary_image.id().as_str(), "img1");
        assert_eq!(first.glare.glare_free_image().map(|i| i.id().as_str()), Some("img2"));
        let second = seen[1].as_ref().expect("event");
        assert!(second.glare.glare_free_image().is_none());
        assert!(second.glare.error_info().is_some());
        assert!(matches!(seen[2], Err(BridgeError::ContractViolation { .. })));
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn legacy_listener_narrows_to_primary_image() {
        let (native, experience) = setup::<FixedAspectRatioCapture>();
        let spec = ops::fixed_aspect_capture::IMAGE_CAPTURED_EVENT;
        native.listen(spec);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let _sub = experience
            .add_image_captured_listener(move |image: Result<ImageHandle>| {
                sink.lock().expect("lock").push(image.expect("image").id().to_string())
            })
            .await
            .expect("subscribe");
        native.raise(spec.add, json!({"primaryImage": {"ID": "img1"}, "glareFreeImage": {"ID": "img2"}}));
        settle().await;

        assert_eq!(*seen.lock().expect("lock"), vec!["img1".to_string()]);
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn legacy_listener_cannot_displace_the_event_listener() {
        let (native, experience) = setup::<DocumentCapture>();
        let spec = ops::document_capture::IMAGE_CAPTURED_EVENT;
        native.listen(spec);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let canonical = experience
            .add_image_captured_event_listener(move |event| sink.lock().expect("lock").push(event.is_ok()))
            .await
            .expect("subscribe");
        let err = experience
            .add_image_captured_listener(|_| {})
            .await
            .expect_err("event already registered");
        assert!(matches!(err, BridgeError::ContractViolation { .. }));
        assert_eq!(native.calls_to(spec.add).len(), 1);
        assert!(native.calls_to(spec.remove).is_empty());

        native.raise(spec.add, json!({"primaryImage": {"ID": "img1"}}));
        native.raise(spec.add, json!({"primaryImage": {"ID": "img2"}}));
        settle().await;
        assert_eq!(*seen.lock().expect("lock"), vec![true, true]);
        assert!(canonical.is_active());

        canonical.remove().await.expect("remove");
        let _legacy = experience
            .add_image_captured_listener(|_| {})
            .await
            .expect("free after removal");
    }

    #[tokio::test]
    async fn lifecycle_listeners() {
        let (native, experience) = setup::<DocumentCapture>();
        native.listen(ops::document_capture::IMAGE_ABOUT_TO_CAPTURE);
        native.listen(ops::document_capture::IMAGE_JUST_CAPTURED);
        let about = Arc::new(Mutex::new(0));
        let just = Arc::new(Mutex::new(Vec::new()));
        let (about_sink, just_sink) = (about.clone(), just.clone());

        let _a = experience
            .add_image_about_to_capture_listener(move |_| *about_sink.lock().expect("lock") += 1)
            .await
            .expect("subscribe");
        let _j = experience
            .add_image_just_captured_listener(move |image| {
                just_sink.lock().expect("lock").push(image.expect("image").id().to_string())
            })
            .await
            .expect("subscribe");

        native.raise(ops::document_capture::IMAGE_ABOUT_TO_CAPTURE.add, json!({}));
        native.raise(ops::document_capture::IMAGE_JUST_CAPTURED.add, json!({"ID": "img9", "width": 800}));
        native.acknowledge_again(ops::document_capture::IMAGE_JUST_CAPTURED.add);
        settle().await;

        assert_eq!(*about.lock().expect("lock"), 1);
        assert_eq!(*just.lock().expect("lock"), vec!["img9".to_string()]);
    }

    #[tokio::test]
    async fn selfie_captured_listener_wraps_images() {
        let (native, experience) = setup::<SelfieCapture>();
        let spec = ops::selfie_capture::IMAGE_CAPTURED;
        native.listen(spec);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let sub = experience
            .add_image_captured_listener(move |image| sink.lock().expect("lock").push(image.is_ok()))
            .await
            .expect("subscribe");
        native.raise(spec.add, json!({"ID": "face1"}));
        settle().await;
        sub.remove().await.expect("remove");

        assert_eq!(*seen.lock().expect("lock"), vec![true]);
        assert!(!native.is_listening(spec.add));
    }

    #[tokio::test]
    async fn destroy_calls_native() {
        let (native, experience) = setup::<SelfieCapture>();
        native.respond(ops::selfie_capture::DESTROY, Value::Null);
        experience.destroy().await.expect("destroy");
        assert_eq!(native.calls_to(ops::selfie_capture::DESTROY).len(), 1);
    }
}
