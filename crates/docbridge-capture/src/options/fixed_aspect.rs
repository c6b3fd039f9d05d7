// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-aspect-ratio capture experience options.
//
// Tuned for ID cards: portrait messages, level checks off by default and a
// far-detection frame at the ID-1 card ratio.

use serde::{Deserialize, Serialize};

use super::{
    CAPTURED_GREEN, CenterPoint, GuidanceMessage, LookAndFeel, MessageOrientation,
    TRANSLUCENT_BLACK, TRANSPARENT, WHITE,
};

/// Full option record of the fixed-aspect-ratio capture experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FixedAspectRatioCaptureOptions {
    pub look_and_feel: LookAndFeel,
    pub capture_criteria: FixedAspectCaptureCriteria,
    pub user_instruction_message: GuidanceMessage,
    pub hold_steady_message: GuidanceMessage,
    pub captured_message: GuidanceMessage,
    pub hold_parallel_message: GuidanceMessage,
    pub tutorial_dismiss_message: GuidanceMessage,
    pub tilt_forward_message: GuidanceMessage,
    pub tilt_up_message: GuidanceMessage,
}

impl Default for FixedAspectRatioCaptureOptions {
    fn default() -> Self {
        let portrait = |text: &str, background: &str, foreground: &str| {
            GuidanceMessage::new(text, background, foreground, MessageOrientation::Portrait)
        };
        Self {
            look_and_feel: LookAndFeel::default(),
            capture_criteria: FixedAspectCaptureCriteria::default(),
            user_instruction_message: portrait("Fill viewable area with document", TRANSPARENT, WHITE),
            hold_steady_message: portrait("Hold Steady", TRANSLUCENT_BLACK, "#FFFF0000"),
            captured_message: portrait("Done!", TRANSLUCENT_BLACK, CAPTURED_GREEN),
            hold_parallel_message: portrait("Hold Device Level", TRANSLUCENT_BLACK, WHITE),
            tutorial_dismiss_message: portrait("Tap to dismiss", TRANSPARENT, WHITE),
            tilt_forward_message: portrait("Tilt Forward", TRANSLUCENT_BLACK, WHITE),
            tilt_up_message: portrait("Tilt Up", TRANSLUCENT_BLACK, WHITE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixedAspectCaptureCriteria {
    pub stability_threshold_enabled: bool,
    /// 0..=100.
    pub stability_threshold: i32,
    pub focus_enabled: bool,
    pub roll_threshold_enabled: bool,
    /// 0..=45.
    pub roll_threshold: i32,
    /// 0..=45.
    pub pitch_threshold: i32,
    pub pitch_threshold_enabled: bool,
    /// Native key keeps the SDK's spelling.
    pub refoucs_before_capture_enabled: bool,
    /// Seconds the criteria must hold before capture.
    pub hold_steady_delay: f64,
    pub page_detection_enabled: bool,
    pub glare_detection_enabled: bool,
    pub launch_glare_remover_experience: bool,
    /// -20..=20.
    pub tilt_angle: i32,
    #[serde(rename = "glareThresholdiOS")]
    pub glare_threshold_ios: f64,
    pub glare_threshold_android: Option<f64>,
    #[serde(rename = "FarDetectionSettings")]
    pub far_detection_settings: FarDetectionSettings,
}

impl Default for FixedAspectCaptureCriteria {
    fn default() -> Self {
        Self {
            stability_threshold_enabled: true,
            stability_threshold: 95,
            focus_enabled: true,
            roll_threshold_enabled: false,
            roll_threshold: 15,
            pitch_threshold: 15,
            pitch_threshold_enabled: false,
            refoucs_before_capture_enabled: true,
            hold_steady_delay: 1.0,
            page_detection_enabled: true,
            glare_detection_enabled: false,
            launch_glare_remover_experience: false,
            tilt_angle: 12,
            glare_threshold_ios: 0.03,
            glare_threshold_android: None,
            far_detection_settings: FarDetectionSettings::default(),
        }
    }
}

/// Detection frame used while the card is still far from the camera.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarDetectionSettings {
    #[serde(rename = "DetectionSettings")]
    pub detection_settings: TargetFrame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetFrame {
    pub center_point: CenterPoint,
    pub aspect_ratio: f64,
    pub padding: f64,
}

impl Default for TargetFrame {
    fn default() -> Self {
        Self {
            center_point: CenterPoint::default(),
            aspect_ratio: 0.6296296296,
            padding: 8.0,
        }
    }
}
