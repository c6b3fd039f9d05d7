// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Message records crossing the native boundary.
//
// Field names follow the native JSON keys exactly. The authoritative state
// behind every record lives in the native SDK; these are snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

string_id!(
    /// Opaque native identifier of an image slot.
    ImageId
);
string_id!(
    /// Identifier of a native capture control view.
    CaptureControlId
);
string_id!(
    /// Identifier of a native document object.
    DocumentId
);
string_id!(
    /// Identifier of a native page object.
    PageId
);
string_id!(
    /// Server-side handle of one in-progress document submission.
    SubmissionJobId
);

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Encoding of an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeType {
    #[serde(rename = "MIMETYPE_JPG")]
    Jpeg,
    #[serde(rename = "MIMETYPE_PNG")]
    Png,
    #[serde(rename = "MIMETYPE_TIF")]
    Tiff,
    #[serde(rename = "MIMETYPE_UNKNOWN", other)]
    Unknown,
}

/// How the native layer currently holds an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representation {
    #[serde(rename = "IMAGE_REP_BITMAP")]
    Bitmap,
    #[serde(rename = "IMAGE_REP_FILE")]
    File,
    #[serde(rename = "IMAGE_REP_BOTH")]
    Both,
    #[serde(rename = "IMAGE_REP_NONE", other)]
    None,
}

impl Representation {
    /// Whether the image is backed by a file on disk.
    pub fn is_file_backed(&self) -> bool {
        matches!(self, Self::File | Self::Both)
    }
}

/// Metadata snapshot of a native image, as reported when it was captured or
/// produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(rename = "ID")]
    pub id: ImageId,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bitmap_scaling: Option<f64>,
    pub tag: Option<Value>,
    #[serde(rename = "srcID")]
    pub src_id: Option<String>,
    pub meta_data: Option<Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pitch: Option<f64>,
    pub roll: Option<f64>,
    pub create_date_time: Option<String>,
    pub dpi: Option<u32>,
    pub jpeg_quality: Option<u32>,
    pub file_path: Option<String>,
    pub mime_type: Option<MimeType>,
    pub representation: Option<Representation>,
    pub file_width: Option<u32>,
    pub file_height: Option<u32>,
    pub file_rep: Option<Value>,
    pub perfect_profile_used: Option<Value>,
    pub basic_settings_profile_used: Option<Value>,
    #[serde(rename = "QuickAnalysisFeedback")]
    pub quick_analysis_feedback: Option<Value>,
    pub output_color: Option<Value>,
    pub barcodes: Option<Value>,
    pub classification_results: Option<Value>,
}

/// Subset of image properties that may be set by name.
///
/// Only populated fields are sent; the image is identified by `imageID`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProperties {
    #[serde(rename = "imageID")]
    pub image_id: ImageId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<MimeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Serialized as an ISO 8601 string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jpeg_quality: Option<u32>,
}

impl ImageProperties {
    pub fn for_image(image_id: ImageId) -> Self {
        Self {
            image_id,
            ..Default::default()
        }
    }
}

/// Pixel dimensions of an image bitmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

// ---------------------------------------------------------------------------
// Server metadata
// ---------------------------------------------------------------------------

/// Descriptor of one field a server-side document type expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldType {
    pub data_type: String,
    pub hidden: bool,
    pub options: Option<Value>,
    pub read_only: bool,
    pub required: bool,
    pub force_match: bool,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub label: Option<String>,
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub default_value: Option<Value>,
    pub custom_tag: Option<Value>,
}

impl Default for FieldType {
    fn default() -> Self {
        Self {
            data_type: "KLO_TYPE_STRING".into(),
            hidden: false,
            options: None,
            read_only: false,
            required: false,
            force_match: true,
            name: None,
            display_name: None,
            label: None,
            min: None,
            max: None,
            default_value: None,
            custom_tag: None,
        }
    }
}

/// Server-defined schema of expected fields for a class of documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentTypeRecord {
    pub type_name: String,
    pub display_name: Option<String>,
    pub version: Option<Value>,
    pub field_types: Vec<FieldType>,
    pub doc_orientation: Option<Value>,
    pub doc_width: Option<f64>,
    pub doc_height: Option<f64>,
    #[serde(rename = "ImagePerfectionProfile")]
    pub image_perfection_profile: Option<Value>,
    #[serde(rename = "BasicSettingsProfile")]
    pub basic_settings_profile: Option<Value>,
    pub source_server: Option<Value>,
}

/// A document being assembled for submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentRecord {
    pub document_type: DocumentTypeRecord,
    pub fields: Vec<Value>,
    pub pages: Vec<PageRecord>,
    #[serde(rename = "documentID")]
    pub document_id: DocumentId,
    #[serde(rename = "transactionID")]
    pub transaction_id: Option<String>,
}

/// One page of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageRecord {
    pub images: Vec<ImageRecord>,
    pub side: Option<Value>,
    #[serde(rename = "pageID")]
    pub page_id: PageId,
    #[serde(rename = "sheetID")]
    pub sheet_id: Option<String>,
    pub current_image_index: Option<i64>,
    #[serde(rename = "documentID")]
    pub document_id: Option<DocumentId>,
}

/// Credentials for a capture-server login.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "userEmailAddress")]
    pub user_email_address: String,
}

impl std::fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserProfile")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("domain", &self.domain)
            .field("user_email_address", &self.user_email_address)
            .finish()
    }
}

/// Kind of capture server a session talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerType {
    #[serde(rename = "SERVER_KFS")]
    Kfs,
    #[serde(rename = "SERVER_KTA")]
    Kta,
}

/// Constructor parameters of a capture-server session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerParameters {
    pub server_url: String,
    pub server_type: ServerType,
}

/// Tunable properties of a capture-server session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerProperties {
    /// Request timeout in seconds, enforced natively.
    pub server_timeout: u32,
}

impl Default for ServerProperties {
    fn default() -> Self {
        Self { server_timeout: 20 }
    }
}

/// Arguments for sending one page image of a sequential submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendImageParameters {
    #[serde(rename = "documentID")]
    pub document_id: DocumentId,
    #[serde(rename = "imageID")]
    pub image_id: ImageId,
    #[serde(rename = "submissionJobID")]
    pub submission_job_id: SubmissionJobId,
    pub image_index: u32,
    pub is_last_image: bool,
}

/// Progress report for an ongoing submission.
///
/// `progress_percent` is cumulative submitted bytes over total document
/// bytes, so steps between reports are uneven across pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionProgress {
    #[serde(rename = "submissionJobID", default)]
    pub submission_job_id: Option<SubmissionJobId>,
    pub progress_percent: f64,
}

/// Session states of a capture server, as observed from call outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Unregistered,
    Registered,
    LoggedIn,
    AnonymouslyLoggedIn,
    Submitting,
}

// ---------------------------------------------------------------------------
// On-device extraction
// ---------------------------------------------------------------------------

/// Regions covered by the extraction models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    Us,
    Asia,
    Canada,
    Europe,
    LatinAmerica,
    Australia,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Us,
        Region::Asia,
        Region::Canada,
        Region::Europe,
        Region::LatinAmerica,
        Region::Australia,
    ];
}

/// Kind of identity document. Encoded as a number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum IdType {
    Id,
    Passport,
}

impl From<IdType> for u8 {
    fn from(id_type: IdType) -> Self {
        match id_type {
            IdType::Id => 0,
            IdType::Passport => 1,
        }
    }
}

impl TryFrom<u8> for IdType {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Id),
            1 => Ok(Self::Passport),
            other => Err(format!("unknown IDType {other}")),
        }
    }
}

/// Where extraction models are cached. Encoded as a number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Provider {
    Local,
    Server,
}

impl From<Provider> for u8 {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Local => 0,
            Provider::Server => 1,
        }
    }
}

impl TryFrom<u8> for Provider {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Local),
            1 => Ok(Self::Server),
            other => Err(format!("unknown provider {other}")),
        }
    }
}

/// Input of an on-device extraction.
///
/// Either side may be omitted; when both are present native extracts them
/// concurrently and merges the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionParameters {
    pub region: Region,
    #[serde(rename = "IDType")]
    pub id_type: IdType,
    #[serde(rename = "frontImageId", skip_serializing_if = "Option::is_none", default)]
    pub front_image_id: Option<ImageId>,
    #[serde(rename = "frontBarcodeArray", skip_serializing_if = "Option::is_none", default)]
    pub front_barcodes: Option<Vec<Value>>,
    #[serde(rename = "backImageId", skip_serializing_if = "Option::is_none", default)]
    pub back_image_id: Option<ImageId>,
    #[serde(rename = "backBarcodeArray", skip_serializing_if = "Option::is_none", default)]
    pub back_barcodes: Option<Vec<Value>>,
    #[serde(rename = "isProcessed", default)]
    pub is_processed: bool,
}

impl ExtractionParameters {
    pub fn new(region: Region, id_type: IdType) -> Self {
        Self {
            region,
            id_type,
            front_image_id: None,
            front_barcodes: None,
            back_image_id: None,
            back_barcodes: None,
            is_processed: false,
        }
    }

    /// Whether any input (image or barcodes) was given for the front side.
    pub fn has_front(&self) -> bool {
        self.front_image_id.is_some() || self.front_barcodes.is_some()
    }

    /// Whether any input (image or barcodes) was given for the back side.
    pub fn has_back(&self) -> bool {
        self.back_image_id.is_some() || self.back_barcodes.is_some()
    }
}

/// Bounding box of an extracted field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLocation {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One extracted field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataField {
    pub field_name: String,
    pub field_value: Option<String>,
    pub field_confidence: f64,
    pub field_location: FieldLocation,
}

/// Raw combined extraction results as delivered by native.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionResults {
    pub extraction_results: Option<Vec<DataField>>,
    pub face_image: Option<ImageRecord>,
    pub signature_image: Option<ImageRecord>,
    pub extraction_front_error: Option<Value>,
    pub extraction_back_error: Option<Value>,
    pub extraction_error: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_record_reads_native_keys() {
        let record: ImageRecord = serde_json::from_value(json!({
            "ID": "imgC",
            "width": 800,
            "height": 600,
            "srcID": "imgA",
            "mimeType": "MIMETYPE_JPG",
            "representation": "IMAGE_REP_BOTH",
            "QuickAnalysisFeedback": {"isBlurry": false},
            "pitch": 2.5
        }))
        .expect("decode image record");

        assert_eq!(record.id.as_str(), "imgC");
        assert_eq!(record.width, Some(800));
        assert_eq!(record.src_id.as_deref(), Some("imgA"));
        assert_eq!(record.mime_type, Some(MimeType::Jpeg));
        assert!(record.representation.expect("representation").is_file_backed());
        assert!(record.quick_analysis_feedback.is_some());
        assert_eq!(record.pitch, Some(2.5));
        assert!(record.latitude.is_none());
    }

    #[test]
    fn unknown_enum_values_fall_back() {
        let record: ImageRecord = serde_json::from_value(json!({
            "ID": "x",
            "mimeType": "MIMETYPE_WEBP",
            "representation": "IMAGE_REP_SOMETHING"
        }))
        .expect("decode image record");
        assert_eq!(record.mime_type, Some(MimeType::Unknown));
        assert_eq!(record.representation, Some(Representation::None));

        let none: Representation = serde_json::from_value(json!("IMAGE_REP_NONE")).expect("none");
        assert_eq!(none, Representation::None);
        assert_eq!(serde_json::to_value(Representation::Both).expect("both"), json!("IMAGE_REP_BOTH"));
    }

    #[test]
    fn server_type_accepts_only_capture_servers() {
        assert_eq!(serde_json::to_value(ServerType::Kta).expect("kta"), json!("SERVER_KTA"));
        assert!(serde_json::from_value::<ServerType>(json!("SERVER_RTTI")).is_err());
    }

    #[test]
    fn image_properties_only_send_populated_fields() {
        let mut props = ImageProperties::for_image(ImageId::new("img1"));
        props.mime_type = Some(MimeType::Png);
        props.dpi = Some(300);

        let value = serde_json::to_value(&props).expect("serialize");
        assert_eq!(
            value,
            json!({"imageID": "img1", "mimeType": "MIMETYPE_PNG", "dpi": 300})
        );
    }

    #[test]
    fn create_date_time_is_iso_8601() {
        let mut props = ImageProperties::for_image(ImageId::new("img1"));
        props.create_date_time = Some(
            DateTime::parse_from_rfc3339("2026-03-01T10:00:00Z")
                .expect("parse")
                .with_timezone(&Utc),
        );
        let value = serde_json::to_value(&props).expect("serialize");
        let text = value["createDateTime"].as_str().expect("string");
        assert!(text.starts_with("2026-03-01T10:00:00"));
    }

    #[test]
    fn field_type_defaults_match_native() {
        let field = FieldType::default();
        assert_eq!(field.data_type, "KLO_TYPE_STRING");
        assert!(field.force_match);
        assert!(!field.required);

        let partial: FieldType =
            serde_json::from_value(json!({"name": "Amount", "required": true})).expect("decode");
        assert_eq!(partial.name.as_deref(), Some("Amount"));
        assert!(partial.required);
        assert!(partial.force_match);
    }

    #[test]
    fn document_type_tolerates_sparse_listing() {
        let record: DocumentTypeRecord =
            serde_json::from_value(json!({"typeName": "Invoice"})).expect("decode");
        assert_eq!(record.type_name, "Invoice");
        assert!(record.field_types.is_empty());
    }

    #[test]
    fn user_profile_debug_hides_password() {
        let profile = UserProfile {
            user_name: "clerk".into(),
            password: "hunter2".into(),
            ..Default::default()
        };
        let rendered = format!("{profile:?}");
        assert!(rendered.contains("clerk"));
        assert!(!rendered.contains("hunter2"));

        let wire = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(wire["password"], "hunter2");
        assert!(wire.get("Domain").is_some());
    }

    #[test]
    fn extraction_enums_use_wire_encoding() {
        let mut params = ExtractionParameters::new(Region::LatinAmerica, IdType::Passport);
        params.front_image_id = Some(ImageId::new("front"));
        let value = serde_json::to_value(&params).expect("serialize");

        assert_eq!(value["region"], "LATIN_AMERICA");
        assert_eq!(value["IDType"], 1);
        assert_eq!(value["frontImageId"], "front");
        assert!(value.get("backImageId").is_none());
        assert_eq!(value["isProcessed"], false);
        assert_eq!(serde_json::to_value(Provider::Server).expect("provider"), json!(1));
    }

    #[test]
    fn server_properties_default_timeout() {
        assert_eq!(ServerProperties::default().server_timeout, 20);
        let props: ServerProperties = serde_json::from_value(json!({})).expect("decode");
        assert_eq!(props.server_timeout, 20);
    }
}
