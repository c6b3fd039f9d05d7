// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image capture control view options.

use serde::{Deserialize, Serialize};

/// Options of the camera view itself, shared by every experience bound to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ImageCaptureViewOptions {
    pub leveling_options: LevelingOptions,
    pub capture_options: ViewCaptureOptions,
}

/// Level indicator. Declinations are degrees; `0` means flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LevelingOptions {
    pub enabled: bool,
    pub device_declination_pitch: i32,
    pub device_declination_roll: i32,
}

impl Default for LevelingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            device_declination_pitch: 0,
            device_declination_roll: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewCaptureOptions {
    #[serde(rename = "FlashMode")]
    pub flash_mode: FlashMode,
    /// Return the video frame instead of a full-resolution capture.
    pub video_frame: bool,
    /// Ignored on Android.
    pub gps_usage: bool,
}

impl Default for ViewCaptureOptions {
    fn default() -> Self {
        Self {
            flash_mode: FlashMode::Off,
            video_frame: false,
            gps_usage: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlashMode {
    On,
    #[default]
    Off,
    Auto,
    Torch,
    #[serde(rename = "AUTOTORCH")]
    AutoTorch,
}
