// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docbridge demo
//
// Entry point. Initialises logging and configuration, then walks one
// document from capture to server submission against a scripted native
// boundary standing in for the SDK.

mod native;

use std::path::Path;
use std::sync::Arc;

use docbridge_capture::{DocumentCaptureExperience, GlareOutcome, ImageCaptureControl, Layout};
use docbridge_core::{BridgeConfig, DocumentId, Result, ServerParameters, ServerType};
use docbridge_engine::ImageHandle;
use docbridge_logistics::{CaptureServer, Document, License, Page, PageSide};
use docbridge_native::CommandDispatcher;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "docbridge.json";
const SDK_LICENSE: &str = "demo-license";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("docbridge demo starting");

    if let Err(e) = run().await {
        error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = BridgeConfig::load(Path::new(CONFIG_PATH))?;
    let boundary = Arc::new(native::simulated_sdk());
    let dispatcher = CommandDispatcher::with_config(boundary, config);
    info!(platform = dispatcher.platform_name(), service = dispatcher.service(), "bridge ready");

    let license = License::new(dispatcher.clone());
    license.set_license(SDK_LICENSE).await?;
    info!(days = license.days_remaining().await?, "license valid");

    let front = capture_front(&dispatcher).await?;
    front.write_to_file("scans/front.jpg").await?;

    let server = CaptureServer::create(
        &dispatcher,
        ServerParameters {
            server_url: "https://capture.example.com/mobilesdk".into(),
            server_type: ServerType::Kfs,
        },
    )
    .await?;
    server.register_device().await?;
    let types = server.login_anonymously().await?;
    info!(available = types.len(), "document types downloaded");

    let invoice = server.document_type("Invoice").await?;
    let document_id = DocumentId::new(uuid::Uuid::new_v4().to_string());
    let mut document =
        Document::create_with_document_type_and_id(&dispatcher, invoice.name(), &document_id).await?;

    let mut page = Page::create(&dispatcher, PageSide::Front).await?;
    page.add_image(&front).await?;
    document.add_page(&page).await?;
    info!(document = %document.id(), pages = document.pages().len(), "document assembled");

    let progress = server
        .add_progress_listener(|report| match report {
            Ok(report) => info!(percent = report.progress_percent, "submission progress"),
            Err(e) => warn!(error = %e, "progress listener error"),
        })
        .await?;
    let outcome = server.submit_document(document.id()).await?;
    info!(%outcome, "document submitted");

    progress.remove().await?;
    front.delete().await?;
    server.logout().await?;
    Ok(())
}

/// Place a camera view, bind a document capture experience to it, take one
/// picture and return the best image it produced.
async fn capture_front(dispatcher: &CommandDispatcher) -> Result<ImageHandle> {
    let layout = Layout {
        width: 375.0,
        height: 667.0,
        ..Default::default()
    };
    let control = ImageCaptureControl::create(dispatcher, &layout).await?;
    let experience = DocumentCaptureExperience::new(dispatcher.clone());
    let mut options = DocumentCaptureExperience::capture_options();
    options.capture_criteria.glare_detection_enabled = true;
    experience
        .bind_capture_control_with_options(control.id(), &options)
        .await?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let captured = experience
        .add_image_captured_event_listener(move |event| {
            let _ = tx.send(event);
        })
        .await?;
    experience.take_picture().await?;

    let event = match rx.recv().await {
        Some(event) => event?,
        None => return Err(docbridge_core::BridgeError::ChannelClosed("image captured".into())),
    };
    captured.remove().await?;
    experience.destroy().await?;
    control.remove_camera_view().await?;

    let image = match event.glare {
        GlareOutcome::GlareFree(clean) => {
            event.primary_image.delete().await?;
            clean
        }
        GlareOutcome::Error(info) => {
            warn!(%info, "glare removal failed; keeping the primary image");
            event.primary_image
        }
        GlareOutcome::None => event.primary_image,
    };
    info!(image = %image.id(), "front captured");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn walkthrough_completes() {
        run().await.expect("walkthrough");
    }

    #[tokio::test]
    async fn capture_keeps_the_glare_free_image() {
        let dispatcher = CommandDispatcher::new(Arc::new(native::simulated_sdk()));
        let image = capture_front(&dispatcher).await.expect("capture");
        assert_eq!(image.id().as_str(), "img-clean");
    }
}
