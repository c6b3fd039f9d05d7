// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image handle proxy.
//
// An `ImageHandle` names one native image slot and carries the metadata
// snapshot native reported for it. Pixels never cross into this crate except
// through explicit exports (`base64`, `blob`).

use std::io::Cursor;

use docbridge_core::{BridgeError, ImageId, ImageProperties, ImageRecord, ImageSize, Result};
use docbridge_native::dispatcher::{arg, decode};
use docbridge_native::{CommandDispatcher, ops};
use serde_json::{Value, json};
use tracing::{debug, instrument};

/// Proxy for one native image.
///
/// Ownership of the native slot belongs to whoever holds the handle; call
/// [`delete`](Self::delete) to release it. Clones name the same slot.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    record: ImageRecord,
    dispatcher: CommandDispatcher,
}

impl ImageHandle {
    pub fn new(dispatcher: CommandDispatcher, record: ImageRecord) -> Self {
        Self { record, dispatcher }
    }

    /// Wrap image metadata delivered by `operation`.
    pub fn from_payload(dispatcher: &CommandDispatcher, operation: &str, payload: Value) -> Result<Self> {
        let record: ImageRecord = decode(operation, payload)?;
        Ok(Self::new(dispatcher.clone(), record))
    }

    /// Create a native image from a base64-encoded file.
    pub async fn from_base64(dispatcher: &CommandDispatcher, base64: &str) -> Result<Self> {
        let payload = dispatcher.call(ops::image::FROM_BASE64, vec![json!(base64)]).await?;
        Self::from_payload(dispatcher, ops::image::FROM_BASE64, payload)
    }

    /// Create a native image from a file already on the device.
    pub async fn from_file_path(dispatcher: &CommandDispatcher, path: &str) -> Result<Self> {
        let payload = dispatcher.call(ops::image::FROM_FILE_PATH, vec![json!(path)]).await?;
        Self::from_payload(dispatcher, ops::image::FROM_FILE_PATH, payload)
    }

    pub fn id(&self) -> &ImageId {
        &self.record.id
    }

    /// Metadata snapshot taken when this handle was created.
    pub fn record(&self) -> &ImageRecord {
        &self.record
    }

    fn id_arg(&self) -> Vec<Value> {
        vec![json!(self.record.id)]
    }

    /// Export the image as a base64 string.
    #[instrument(skip_all, fields(image_id = %self.record.id))]
    pub async fn base64(&self) -> Result<String> {
        self.dispatcher.call_as(ops::image::TO_BASE64, self.id_arg()).await
    }

    /// Export the encoded image bytes.
    #[instrument(skip_all, fields(image_id = %self.record.id))]
    pub async fn blob(&self) -> Result<ImageBlob> {
        let bytes: Vec<u8> = self.dispatcher.call_as(ops::image::AS_BLOB, self.id_arg()).await?;
        debug!(len = bytes.len(), "image exported");
        Ok(ImageBlob(bytes))
    }

    /// Write the bitmap to `path`. Native rejects images that are already
    /// file-backed.
    #[instrument(skip_all, fields(image_id = %self.record.id))]
    pub async fn write_to_file(&self, path: &str) -> Result<()> {
        let params = json!({"imageID": self.record.id, "filePath": path});
        self.dispatcher.call_unit(ops::image::WRITE_TO_FILE, vec![params]).await
    }

    /// Load the bitmap back from the image's file.
    pub async fn read_from_file(&self) -> Result<()> {
        self.dispatcher.call_unit(ops::image::READ_FROM_FILE, self.id_arg()).await
    }

    /// Free the in-memory bitmap, keeping the file reference.
    pub async fn clear_bitmap(&self) -> Result<()> {
        self.dispatcher.call_unit(ops::image::CLEAR_BITMAP, self.id_arg()).await
    }

    pub async fn delete_file_from_disk(&self) -> Result<()> {
        self.dispatcher.call_unit(ops::image::DELETE_FILE_FROM_DISK, self.id_arg()).await
    }

    /// Release the native slot. The handle is consumed; other clones of it
    /// now name a slot that no longer exists.
    #[instrument(skip_all, fields(image_id = %self.record.id))]
    pub async fn delete(self) -> Result<()> {
        self.dispatcher
            .call_unit(ops::image::REMOVE_IMAGES, vec![json!([self.record.id])])
            .await
    }

    /// Set the populated fields of `properties` on the native image.
    pub async fn set_properties(&self, properties: &ImageProperties) -> Result<()> {
        self.dispatcher
            .call_unit(ops::image::SET_PROPERTIES, vec![arg(properties)?])
            .await
    }

    /// Pixel dimensions of the bitmap.
    pub async fn size(&self) -> Result<ImageSize> {
        self.dispatcher.call_as(ops::image::GET_SIZE, self.id_arg()).await
    }
}

/// Encoded image bytes exported from a native image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob(pub Vec<u8>);

impl ImageBlob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Detected encoding, from the magic bytes.
    pub fn format(&self) -> Option<image::ImageFormat> {
        image::guess_format(&self.0).ok()
    }

    /// Pixel dimensions read from the encoded header, without decoding pixels.
    pub fn dimensions(&self) -> Result<ImageSize> {
        let (width, height) = image::ImageReader::new(Cursor::new(&self.0))
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|err| BridgeError::Image(format!("failed to read image header: {err}")))?;
        Ok(ImageSize { width, height })
    }
}
