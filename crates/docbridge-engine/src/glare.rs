// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glare remover proxy.

use docbridge_core::{ImageId, Result};
use docbridge_native::{CommandDispatcher, ops};
use serde_json::json;
use tracing::instrument;

use crate::image::ImageHandle;

/// Measures and removes glare using the native glare remover.
#[derive(Debug, Clone)]
pub struct GlareRemover {
    dispatcher: CommandDispatcher,
}

impl GlareRemover {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Fraction of the image covered by glare, in `[0, 1]`.
    pub async fn glare_fraction(&self, image: &ImageId) -> Result<f64> {
        self.dispatcher
            .call_as(ops::glare::GET_GLARE_FRACTION, vec![json!(image)])
            .await
    }

    /// Combine images taken at different tilt angles into one glare-free
    /// image. The first id is the reference image. The list is passed to
    /// native as given.
    #[instrument(skip_all, fields(images = images.len()))]
    pub async fn remove_glare(&self, images: &[ImageId]) -> Result<ImageHandle> {
        let payload = self
            .dispatcher
            .call(ops::glare::REMOVE_GLARE, vec![json!(images)])
            .await?;
        ImageHandle::from_payload(&self.dispatcher, ops::glare::REMOVE_GLARE, payload)
    }
}
