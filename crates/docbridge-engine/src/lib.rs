// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docbridge-engine: Image handles and post-capture processing, namely glare removal and
// on-device ID extraction.

pub mod extraction;
pub mod glare;
pub mod image;

pub use extraction::{ExtractionOutcome, OnDeviceExtraction};
pub use glare::GlareRemover;
pub use image::{ImageBlob, ImageHandle};
