// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docbridge-logistics: Capture server session, document types, documents and pages.

pub mod document;
pub mod document_type;
pub mod license;
pub mod server;

pub use document::{Document, Page, PageSide};
pub use document_type::{DocumentType, DocumentTypes};
pub use license::{License, LicenseServerParameters, LicenseServerType, LicenseType};
pub use server::CaptureServer;
