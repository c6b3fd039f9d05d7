// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document and page proxies.
//
// A document is assembled natively from pages, and a page from images. Each
// proxy keeps the last record native returned for it; calls that change the
// assembly refresh that record.

use docbridge_core::{DocumentId, DocumentRecord, ImageRecord, PageId, PageRecord, Result};
use docbridge_engine::ImageHandle;
use docbridge_native::{CommandDispatcher, ops};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::document_type::DocumentType;

/// Proxy for one native document.
#[derive(Debug, Clone)]
pub struct Document {
    record: DocumentRecord,
    dispatcher: CommandDispatcher,
}

impl Document {
    pub fn new(dispatcher: CommandDispatcher, record: DocumentRecord) -> Self {
        Self { record, dispatcher }
    }

    /// Create an empty document of `document_type`; native assigns the id.
    #[instrument(skip_all, fields(document_type = document_type.name()))]
    pub async fn create_with_document_type(document_type: &DocumentType) -> Result<Self> {
        Self::create_with_type_name(document_type.dispatcher(), document_type.name()).await
    }

    /// As [`create_with_document_type`](Self::create_with_document_type),
    /// addressing the type by name.
    pub async fn create_with_type_name(dispatcher: &CommandDispatcher, type_name: &str) -> Result<Self> {
        let record: DocumentRecord = dispatcher
            .call_as(ops::logistics::CREATE_DOCUMENT_WITH_DOCUMENT_TYPE, vec![json!(type_name)])
            .await?;
        debug!(document = %record.document_id, "document created");
        Ok(Self::new(dispatcher.clone(), record))
    }

    /// Create an empty document with a caller-chosen id.
    pub async fn create_with_document_type_and_id(
        dispatcher: &CommandDispatcher,
        type_name: &str,
        id: &DocumentId,
    ) -> Result<Self> {
        let params = json!({"documentTypeName": type_name, "documentID": id});
        let record: DocumentRecord = dispatcher
            .call_as(ops::logistics::CREATE_DOCUMENT_WITH_DOCUMENT_TYPE_AND_ID, vec![params])
            .await?;
        Ok(Self::new(dispatcher.clone(), record))
    }

    pub fn id(&self) -> &DocumentId {
        &self.record.document_id
    }

    pub fn record(&self) -> &DocumentRecord {
        &self.record
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.record.pages
    }

    pub async fn delete(self) -> Result<()> {
        self.dispatcher
            .call_unit(ops::logistics::DELETE_DOCUMENTS, vec![json!([self.record.document_id])])
            .await
    }

    /// Reload the record from native.
    pub async fn properties(&mut self) -> Result<&DocumentRecord> {
        self.record = self
            .dispatcher
            .call_as(ops::logistics::GET_DOCUMENT_PROPERTIES, vec![json!(self.record.document_id)])
            .await?;
        Ok(&self.record)
    }

    /// Replace the document's field values.
    pub async fn update_fields(&mut self, fields: Vec<Value>) -> Result<()> {
        let params = json!({"documentID": self.record.document_id, "fields": &fields});
        self.dispatcher
            .call_unit(ops::logistics::UPDATE_FIELDS, vec![params])
            .await?;
        self.record.fields = fields;
        Ok(())
    }

    #[instrument(skip_all, fields(document = %self.record.document_id, page = %page.id()))]
    pub async fn add_page(&mut self, page: &Page) -> Result<()> {
        self.page_call(ops::logistics::ADD_PAGE_TO_DOCUMENT, page.id()).await
    }

    pub async fn remove_page(&mut self, page: &Page) -> Result<()> {
        self.page_call(ops::logistics::REMOVE_PAGE_FROM_DOCUMENT, page.id()).await
    }

    async fn page_call(&mut self, operation: &str, page: &PageId) -> Result<()> {
        let params = json!({"documentID": self.record.document_id, "pageID": page});
        self.record = self.dispatcher.call_as(operation, vec![params]).await?;
        Ok(())
    }
}

/// Which side of the physical sheet a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PageSide {
    Front,
    Back,
}

/// Proxy for one native page.
#[derive(Debug, Clone)]
pub struct Page {
    record: PageRecord,
    dispatcher: CommandDispatcher,
}

impl Page {
    pub fn new(dispatcher: CommandDispatcher, record: PageRecord) -> Self {
        Self { record, dispatcher }
    }

    pub async fn create(dispatcher: &CommandDispatcher, side: PageSide) -> Result<Self> {
        let record: PageRecord = dispatcher
            .call_as(ops::logistics::CREATE_PAGE, vec![json!({"side": side})])
            .await?;
        Ok(Self::new(dispatcher.clone(), record))
    }

    pub fn id(&self) -> &PageId {
        &self.record.page_id
    }

    pub fn record(&self) -> &PageRecord {
        &self.record
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.record.images
    }

    pub async fn delete(self) -> Result<()> {
        self.dispatcher
            .call_unit(ops::logistics::DELETE_PAGES, vec![json!([self.record.page_id])])
            .await
    }

    pub async fn properties(&mut self) -> Result<&PageRecord> {
        self.record = self
            .dispatcher
            .call_as(ops::logistics::GET_PAGE_PROPERTIES, vec![json!(self.record.page_id)])
            .await?;
        Ok(&self.record)
    }

    /// Attach a native image to this page. Submission later requires it to
    /// be file-backed.
    pub async fn add_image(&mut self, image: &ImageHandle) -> Result<()> {
        self.image_call(ops::logistics::ADD_IMAGE_TO_PAGE, image).await
    }

    pub async fn remove_image(&mut self, image: &ImageHandle) -> Result<()> {
        self.image_call(ops::logistics::REMOVE_IMAGE_FROM_PAGE, image).await
    }

    async fn image_call(&mut self, operation: &str, image: &ImageHandle) -> Result<()> {
        let params = json!({"pageID": self.record.page_id, "imageID": image.id()});
        self.record = self.dispatcher.call_as(operation, vec![params]).await?;
        Ok(())
    }
}
