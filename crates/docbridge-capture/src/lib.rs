// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docbridge-capture: Image capture control, the capture experiences bound to it
// (document, fixed aspect ratio, selfie) and their option schemas.

pub mod control;
pub mod events;
pub mod experience;
pub mod options;

pub use control::{CameraType, FocusAreas, ImageCaptureControl, ImageResolution, Layout};
pub use events::{GlareOutcome, ImageCapturedEvent};
pub use experience::{
    CaptureExperience, DocumentCapture, DocumentCaptureExperience, ExperienceKind,
    FixedAspectRatioCapture, FixedAspectRatioCaptureExperience, GlareAware, SelfieCapture,
    SelfieCaptureExperience,
};
pub use options::{
    DocumentCaptureOptions, FixedAspectRatioCaptureOptions, FlashMode, ImageCaptureViewOptions,
    SelfieCaptureOptions,
};
