// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Selfie capture experience options.

use serde::{Deserialize, Serialize};

use super::{
    CAPTURED_GREEN, CenterPoint, GuidanceMessage, MessageOrientation, TRANSLUCENT_BLACK,
    TRANSPARENT, WHITE,
};

/// Full option record of the selfie capture experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SelfieCaptureOptions {
    pub look_and_feel: SelfieLookAndFeel,
    pub capture_criteria: SelfieCaptureCriteria,
    pub user_instruction_message: GuidanceMessage,
    pub captured_message: GuidanceMessage,
    /// Ships without an iOS font block.
    pub hold_steady_message: GuidanceMessage,
    pub eyes_blink_instruction_message: GuidanceMessage,
}

impl Default for SelfieCaptureOptions {
    fn default() -> Self {
        let portrait = |text: &str, background: &str, foreground: &str| {
            GuidanceMessage::new(text, background, foreground, MessageOrientation::Portrait)
        };
        Self {
            look_and_feel: SelfieLookAndFeel::default(),
            capture_criteria: SelfieCaptureCriteria::default(),
            user_instruction_message: portrait("Center Face", TRANSPARENT, "#00FF0000"),
            captured_message: portrait("Done!", TRANSLUCENT_BLACK, CAPTURED_GREEN),
            hold_steady_message: portrait("Hold Steady", "#00FFFFFF", WHITE).without_ios_font(),
            eyes_blink_instruction_message: portrait("Blink now", TRANSPARENT, "#FF0000"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelfieLookAndFeel {
    pub outer_view_finder_color: String,
    pub vibration_enabled: bool,
    pub guidance_frame_color: String,
}

impl Default for SelfieLookAndFeel {
    fn default() -> Self {
        Self {
            outer_view_finder_color: "#FFFFFF".into(),
            vibration_enabled: true,
            guidance_frame_color: "#000000".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfieCaptureCriteria {
    #[serde(rename = "SelfieDetectionSettings")]
    pub selfie_detection_settings: SelfieDetectionSettings,
}

/// Face framing requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelfieDetectionSettings {
    pub center_point: CenterPoint,
    pub aspect_ratio: f64,
    pub padding: f64,
    /// Face width as a fraction of the frame.
    pub minimum_face_size: f64,
    /// Degrees of head rotation tolerated.
    pub face_angle_tolerance: f64,
}

impl Default for SelfieDetectionSettings {
    fn default() -> Self {
        Self {
            center_point: CenterPoint::origin(),
            aspect_ratio: 0.0,
            padding: 10.0,
            minimum_face_size: 0.25,
            face_angle_tolerance: 15.0,
        }
    }
}
