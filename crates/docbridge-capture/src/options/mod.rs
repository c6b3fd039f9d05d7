// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture experience option schemas.
//
// Each experience has one options record whose `Default` holds the values the
// SDK ships with. Ranges noted on fields are validated (clamped or reset)
// natively; nothing here enforces them.

pub mod control;
pub mod document;
pub mod fixed_aspect;
pub mod selfie;

use serde::{Deserialize, Serialize};

pub use control::{FlashMode, ImageCaptureViewOptions, LevelingOptions, ViewCaptureOptions};
pub use document::{DocumentCaptureCriteria, DocumentCaptureOptions, DocumentDetectionSettings};
pub use fixed_aspect::{FarDetectionSettings, FixedAspectCaptureCriteria, FixedAspectRatioCaptureOptions};
pub use selfie::{SelfieCaptureCriteria, SelfieCaptureOptions, SelfieDetectionSettings, SelfieLookAndFeel};

/// Semi-transparent black used behind most guidance messages.
pub const TRANSLUCENT_BLACK: &str = "#B2000000";
pub const TRANSPARENT: &str = "#00000000";
pub const WHITE: &str = "#FFFFFFFF";
pub const CAPTURED_GREEN: &str = "#00F900";

/// Screen orientation a guidance message is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageOrientation {
    Portrait,
    Landscape,
    ReversePortrait,
    ReverseLandscape,
}

/// Android font. `-1` lets the SDK size the text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AndroidFont {
    pub text_size: i32,
}

impl Default for AndroidFont {
    fn default() -> Self {
        Self { text_size: -1 }
    }
}

/// iOS font. `-1` lets the SDK pick the size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IosFont {
    pub font_size: i32,
    pub font_name: String,
}

impl Default for IosFont {
    fn default() -> Self {
        Self {
            font_size: -1,
            font_name: "HelveticaNeue".into(),
        }
    }
}

/// Message centre on iOS. `-1` means automatic placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagePosition {
    pub x: f64,
    pub y: f64,
}

impl Default for MessagePosition {
    fn default() -> Self {
        Self { x: -1.0, y: -1.0 }
    }
}

/// Message bounds. `-1` means automatic sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSize {
    pub width: f64,
    pub height: f64,
}

impl Default for MessageSize {
    fn default() -> Self {
        Self {
            width: -1.0,
            height: -1.0,
        }
    }
}

/// One guidance message overlaid on the capture view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceMessage {
    pub background_color: String,
    pub text_color: String,
    pub message: String,
    pub visible: bool,
    pub orientation: MessageOrientation,
    #[serde(default)]
    pub font_android: AndroidFont,
    #[serde(rename = "fontiOS", default, skip_serializing_if = "Option::is_none")]
    pub font_ios: Option<IosFont>,
    #[serde(default)]
    pub position: MessagePosition,
    #[serde(default)]
    pub size: MessageSize,
}

impl GuidanceMessage {
    /// A visible message with automatic font, position and size.
    pub fn new(
        message: &str,
        background_color: &str,
        text_color: &str,
        orientation: MessageOrientation,
    ) -> Self {
        Self {
            background_color: background_color.into(),
            text_color: text_color.into(),
            message: message.into(),
            visible: true,
            orientation,
            font_android: AndroidFont::default(),
            font_ios: Some(IosFont::default()),
            position: MessagePosition::default(),
            size: MessageSize::default(),
        }
    }

    /// Drop the iOS font block.
    pub fn without_ios_font(mut self) -> Self {
        self.font_ios = None;
        self
    }
}

/// Look and feel of the document and fixed-aspect-ratio experiences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LookAndFeel {
    pub enable_animation_tutor: bool,
    pub outer_view_finder_color: String,
    pub vibration_enabled: bool,
    pub diagnostics_view_enabled: bool,
    /// Valid range 1..=100; anything else is read as 8.
    pub guidance_frame_thickness: i32,
    /// Set-only; `get_options` always reports it empty.
    pub tutorial_sample_image_path: String,
    pub guidance_frame_color: String,
}

impl Default for LookAndFeel {
    fn default() -> Self {
        Self {
            enable_animation_tutor: false,
            outer_view_finder_color: TRANSLUCENT_BLACK.into(),
            vibration_enabled: true,
            diagnostics_view_enabled: false,
            guidance_frame_thickness: 8,
            tutorial_sample_image_path: String::new(),
            guidance_frame_color: "#00FF00".into(),
        }
    }
}

/// Target centre within the frame. A null coordinate leaves placement to
/// the SDK.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl CenterPoint {
    pub fn origin() -> Self {
        Self {
            x: Some(0.0),
            y: Some(0.0),
        }
    }
}
