// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image capture control proxy.
//
// The control is the native camera view. It is placed on screen first; its
// id is then what a capture experience binds to.

use docbridge_core::{CaptureControlId, Result};
use docbridge_engine::ImageHandle;
use docbridge_native::dispatcher::arg;
use docbridge_native::{CommandDispatcher, ListenerSpec, Subscription, ops, subscribe};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::options::ImageCaptureViewOptions;

/// Frame of the camera view, in screen points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub visibility: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            visibility: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CameraType {
    FrontCamera,
    BackCamera,
}

/// Requested capture resolution. Each platform reads only its own key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageResolution {
    /// One entry of [`ImageCaptureControl::allowable_resolutions`].
    #[serde(rename = "resolutionAndroid", skip_serializing_if = "Option::is_none")]
    pub android: Option<Value>,
    /// An `AVCaptureSessionPreset*` name.
    #[serde(rename = "resolutioniOS", skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,
}

/// Focus areas. Each platform reads only its own key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusAreas {
    #[serde(rename = "focusAreasAndroid", skip_serializing_if = "Option::is_none")]
    pub android: Option<Vec<Value>>,
    #[serde(rename = "focusAreasiOS", skip_serializing_if = "Option::is_none")]
    pub ios: Option<Value>,
}

/// Proxy for the native image capture control.
#[derive(Debug, Clone)]
pub struct ImageCaptureControl {
    id: CaptureControlId,
    dispatcher: CommandDispatcher,
}

impl ImageCaptureControl {
    /// Place the camera view at `layout` and read back its id.
    #[instrument(skip_all, fields(width = layout.width, height = layout.height))]
    pub async fn create(dispatcher: &CommandDispatcher, layout: &Layout) -> Result<Self> {
        dispatcher
            .call_unit(ops::capture_control::ADD_CAMERA_VIEW, vec![arg(layout)?])
            .await?;
        let id: CaptureControlId = dispatcher.call_as(ops::capture_control::GET_ID, Vec::new()).await?;
        info!(control = %id, "camera view added");
        Ok(Self {
            id,
            dispatcher: dispatcher.clone(),
        })
    }

    pub fn id(&self) -> &CaptureControlId {
        &self.id
    }

    /// Option schema with native defaults. Each call builds a fresh value.
    pub fn view_options() -> ImageCaptureViewOptions {
        ImageCaptureViewOptions::default()
    }

    /// Capture now, ignoring every capture constraint.
    pub async fn force_take_picture(&self) -> Result<Value> {
        self.dispatcher.call(ops::capture_control::FORCE_TAKE_PICTURE, Vec::new()).await
    }

    /// As [`force_take_picture`](Self::force_take_picture), optionally
    /// running one more autofocus cycle first.
    pub async fn force_take_picture_focus_again(&self, focus_again: bool) -> Result<Value> {
        self.dispatcher
            .call(
                ops::capture_control::FORCE_TAKE_PICTURE_FOCUS_AGAIN,
                vec![json!({"focusAgain": focus_again})],
            )
            .await
    }

    pub async fn set_options(&self, options: &ImageCaptureViewOptions) -> Result<()> {
        self.dispatcher
            .call_unit(ops::capture_control::SET_OPTIONS, vec![arg(options)?])
            .await
    }

    pub async fn get_options(&self) -> Result<ImageCaptureViewOptions> {
        self.dispatcher.call_as(ops::capture_control::GET_OPTIONS, Vec::new()).await
    }

    /// Resolutions the camera offers. Empty on iOS; valid only after the
    /// camera initialization event.
    pub async fn allowable_resolutions(&self) -> Result<Vec<Value>> {
        self.dispatcher
            .call_as(ops::capture_control::GET_ALLOWABLE_RESOLUTIONS, Vec::new())
            .await
    }

    pub async fn set_image_resolution(&self, resolution: &ImageResolution) -> Result<()> {
        self.dispatcher
            .call_unit(ops::capture_control::SET_IMAGE_RESOLUTION, vec![arg(resolution)?])
            .await
    }

    pub async fn set_focus_areas(&self, areas: &FocusAreas) -> Result<()> {
        self.dispatcher
            .call_unit(ops::capture_control::SET_FOCUS_AREAS, vec![arg(areas)?])
            .await
    }

    pub async fn max_focus_areas(&self) -> Result<Value> {
        self.dispatcher.call(ops::capture_control::GET_MAX_FOCUS_AREAS, Vec::new()).await
    }

    pub async fn set_camera_type(&self, camera: CameraType) -> Result<()> {
        self.dispatcher
            .call_unit(ops::capture_control::SET_CAMERA_TYPE, vec![arg(&camera)?])
            .await
    }

    /// Take the view off screen. Experiences bound to it stop working.
    pub async fn remove_camera_view(self) -> Result<()> {
        self.dispatcher
            .call_unit(ops::capture_control::REMOVE_CAMERA_VIEW, Vec::new())
            .await?;
        info!(control = %self.id, "camera view removed");
        Ok(())
    }

    /// Receive every image the control itself captures.
    pub async fn add_image_captured_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<ImageHandle>) + Send + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        let spec = ops::capture_control::IMAGE_CAPTURED;
        let map = move |payload| ImageHandle::from_payload(&dispatcher, spec.add, payload);
        subscribe(&self.dispatcher, spec, Vec::new(), map, handler).await
    }

    pub async fn add_stability_delay_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<Value>) + Send + 'static,
    {
        self.raw_listener(ops::capture_control::STABILITY_DELAY, handler).await
    }

    pub async fn add_levelness_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<Value>) + Send + 'static,
    {
        self.raw_listener(ops::capture_control::LEVELNESS, handler).await
    }

    pub async fn add_focus_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<Value>) + Send + 'static,
    {
        self.raw_listener(ops::capture_control::FOCUS, handler).await
    }

    pub async fn add_camera_initialized_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<Value>) + Send + 'static,
    {
        self.raw_listener(ops::capture_control::CAMERA_INITIALIZED, handler).await
    }

    pub async fn add_camera_initialization_failed_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<Value>) + Send + 'static,
    {
        self.raw_listener(ops::capture_control::CAMERA_INITIALIZATION_FAILED, handler)
            .await
    }

    pub async fn add_torch_luminance_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<Value>) + Send + 'static,
    {
        self.raw_listener(ops::capture_control::TORCH_LUMINANCE, handler).await
    }

    async fn raw_listener<H>(&self, spec: ListenerSpec, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<Value>) + Send + 'static,
    {
        subscribe(&self.dispatcher, spec, Vec::new(), Ok, handler).await
    }
}
