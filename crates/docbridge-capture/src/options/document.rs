// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document capture experience options.

use serde::{Deserialize, Serialize};

use super::{
    CenterPoint, GuidanceMessage, LookAndFeel, MessageOrientation, TRANSLUCENT_BLACK, TRANSPARENT,
    WHITE, CAPTURED_GREEN,
};

/// Full option record of the document capture experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DocumentCaptureOptions {
    pub look_and_feel: LookAndFeel,
    pub capture_criteria: DocumentCaptureCriteria,
    pub user_instruction_message: GuidanceMessage,
    pub hold_steady_message: GuidanceMessage,
    pub captured_message: GuidanceMessage,
    pub center_message: GuidanceMessage,
    pub zoom_in_message: GuidanceMessage,
    pub zoom_out_message: GuidanceMessage,
    pub rotate_message: GuidanceMessage,
    pub hold_parallel_message: GuidanceMessage,
    pub tutorial_dismiss_message: GuidanceMessage,
    pub tilt_forward_message: GuidanceMessage,
    pub tilt_up_message: GuidanceMessage,
}

impl Default for DocumentCaptureOptions {
    fn default() -> Self {
        let landscape = |text: &str, background: &str, foreground: &str| {
            GuidanceMessage::new(text, background, foreground, MessageOrientation::Landscape)
        };
        Self {
            look_and_feel: LookAndFeel::default(),
            capture_criteria: DocumentCaptureCriteria::default(),
            user_instruction_message: landscape("Fill viewable area with document", TRANSPARENT, WHITE),
            hold_steady_message: landscape("Hold Steady", TRANSLUCENT_BLACK, "#FFFF0000"),
            captured_message: landscape("Done!", TRANSLUCENT_BLACK, CAPTURED_GREEN),
            center_message: landscape("Center Document", TRANSLUCENT_BLACK, WHITE),
            zoom_in_message: landscape("Move Closer", TRANSLUCENT_BLACK, WHITE),
            zoom_out_message: landscape("Move Back", TRANSLUCENT_BLACK, WHITE),
            rotate_message: landscape("Rotate Device", TRANSLUCENT_BLACK, WHITE),
            hold_parallel_message: landscape("Hold Device Level", TRANSLUCENT_BLACK, WHITE),
            tutorial_dismiss_message: landscape("Tap to dismiss", TRANSPARENT, WHITE),
            tilt_forward_message: landscape("Tilt Forward", TRANSLUCENT_BLACK, WHITE),
            tilt_up_message: landscape("Tilt Up", TRANSLUCENT_BLACK, WHITE),
        }
    }
}

/// Conditions that must hold before the document is captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentCaptureCriteria {
    pub stability_threshold_enabled: bool,
    /// 0..=100; 0 turns stability checking off.
    pub stability_threshold: i32,
    pub focus_enabled: bool,
    pub roll_threshold_enabled: bool,
    /// 0..=45; 45 disables roll checking.
    pub roll_threshold: i32,
    /// 0..=45; 45 disables pitch checking.
    pub pitch_threshold: i32,
    pub pitch_threshold_enabled: bool,
    pub glare_detection_enabled: bool,
    pub launch_glare_remover_experience: bool,
    /// Tilt for the second glare capture, -20..=20.
    pub tilt_angle: i32,
    /// 0..=1, iOS only.
    #[serde(rename = "glareThresholdiOS")]
    pub glare_threshold_ios: f64,
    /// 0..=1, Android only. Null leaves the SDK default.
    pub glare_threshold_android: Option<f64>,
    #[serde(rename = "DocumentDetectionSettings")]
    pub document_detection_settings: DocumentDetectionSettings,
}

impl Default for DocumentCaptureCriteria {
    fn default() -> Self {
        Self {
            stability_threshold_enabled: true,
            stability_threshold: 95,
            focus_enabled: true,
            roll_threshold_enabled: true,
            roll_threshold: 15,
            pitch_threshold: 15,
            pitch_threshold_enabled: true,
            glare_detection_enabled: false,
            launch_glare_remover_experience: false,
            tilt_angle: 12,
            glare_threshold_ios: 0.015,
            glare_threshold_android: None,
            document_detection_settings: DocumentDetectionSettings::default(),
        }
    }
}

/// Edge detection of the document outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentDetectionSettings {
    /// 0..=100.
    pub short_edge_threshold: i32,
    /// 0..=100.
    pub long_edge_threshold: i32,
    /// `"GPUBased"` or `"ISG"`.
    pub edge_detection: String,
    #[serde(rename = "DetectionSettings")]
    pub detection_settings: DetectionSettings,
}

impl Default for DocumentDetectionSettings {
    fn default() -> Self {
        Self {
            short_edge_threshold: 85,
            long_edge_threshold: 85,
            edge_detection: "GPUBased".into(),
            detection_settings: DetectionSettings::default(),
        }
    }
}

/// Target frame the document is expected to fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectionSettings {
    pub center_point: CenterPoint,
    /// Long edge over short edge; 0 adopts the image aspect ratio.
    pub aspect_ratio: f64,
    /// Percent, clamped to 0..=50.
    pub padding: f64,
    pub min_fill_fraction: f64,
    pub max_fill_fraction: f64,
    /// Degrees.
    pub max_skew_angle: f64,
    pub tolerance_fraction: f64,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            center_point: CenterPoint::origin(),
            aspect_ratio: 0.0,
            padding: 10.0,
            min_fill_fraction: 0.2,
            max_fill_fraction: 1.5,
            max_skew_angle: 10.0,
            tolerance_fraction: 0.15,
        }
    }
}
