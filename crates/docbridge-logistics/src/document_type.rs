// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document type proxies.

use docbridge_core::{DocumentTypeRecord, FieldType, Result};
use docbridge_native::dispatcher::arg;
use docbridge_native::{CommandDispatcher, ops};
use serde_json::json;
use tracing::instrument;

/// Proxy for one native document type, addressed by its type name.
#[derive(Debug, Clone)]
pub struct DocumentType {
    record: DocumentTypeRecord,
    dispatcher: CommandDispatcher,
}

impl DocumentType {
    pub fn new(dispatcher: CommandDispatcher, record: DocumentTypeRecord) -> Self {
        Self { record, dispatcher }
    }

    pub fn name(&self) -> &str {
        &self.record.type_name
    }

    pub fn record(&self) -> &DocumentTypeRecord {
        &self.record
    }

    pub(crate) fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    pub fn field_types(&self) -> &[FieldType] {
        &self.record.field_types
    }

    /// Remove the type from the native store.
    pub async fn delete(self) -> Result<()> {
        self.dispatcher
            .call_unit(ops::logistics::DELETE_DOCUMENT_TYPES, vec![json!([self.record.type_name])])
            .await
    }

    /// Current native view of this type.
    pub async fn properties(&self) -> Result<DocumentTypeRecord> {
        self.dispatcher
            .call_as(ops::logistics::GET_DOCUMENT_TYPE_PROPERTIES, vec![json!(self.record.type_name)])
            .await
    }
}

/// The native store of document types.
#[derive(Debug, Clone)]
pub struct DocumentTypes {
    dispatcher: CommandDispatcher,
}

impl DocumentTypes {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Build a local document type from field descriptors.
    #[instrument(skip_all, fields(fields = field_types.len()))]
    pub async fn create_with_field_types(&self, field_types: &[FieldType]) -> Result<DocumentType> {
        let record: DocumentTypeRecord = self
            .dispatcher
            .call_as(ops::logistics::CREATE_DOCUMENT_TYPE_WITH_FIELD_TYPES, vec![arg(field_types)?])
            .await?;
        Ok(DocumentType::new(self.dispatcher.clone(), record))
    }

    pub async fn list(&self) -> Result<Vec<DocumentTypeRecord>> {
        self.dispatcher
            .call_as(ops::logistics::GET_DOCUMENT_TYPES, Vec::new())
            .await
    }

    pub async fn remove_all(&self) -> Result<()> {
        self.dispatcher
            .call_unit(ops::logistics::REMOVE_ALL_DOCUMENT_TYPES, Vec::new())
            .await
    }

    pub async fn delete(&self, names: &[&str]) -> Result<()> {
        self.dispatcher
            .call_unit(ops::logistics::DELETE_DOCUMENT_TYPES, vec![json!(names)])
            .await
    }

    pub async fn properties_of(&self, name: &str) -> Result<DocumentTypeRecord> {
        self.dispatcher
            .call_as(ops::logistics::GET_DOCUMENT_TYPE_PROPERTIES, vec![json!(name)])
            .await
    }
}
