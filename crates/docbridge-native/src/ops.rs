// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Catalogue of native operation names.
//
// These are the method names the capture SDK plugin exposes. Listener pairs
// are grouped as `ListenerSpec`s so registration and removal stay together.

use crate::listener::ListenerSpec;

/// Document capture experience (`kuiDC*`).
pub mod document_capture {
    use super::ListenerSpec;

    pub const BIND: &str = "kuiDCBindCaptureControl";
    pub const BIND_WITH_OPTIONS: &str = "kuiDCBindCaptureControlWithOptions";
    pub const TAKE_PICTURE: &str = "kuiDCTakePicture";
    pub const TAKE_PICTURE_CONTINUALLY: &str = "kuiDCTakePictureContinually";
    pub const STOP_CAPTURE: &str = "kuiDCStopCapture";
    pub const SET_OPTIONS: &str = "kuiDCSetOptions";
    pub const GET_OPTIONS: &str = "kuiDCGetOptions";
    pub const DEFAULT_GLARE_THRESHOLD: &str = "kuiDCGetDefaultGlareThreshold";
    pub const DESTROY: &str = "kuiDCDestroy";

    pub const IMAGE_CAPTURED_EVENT: ListenerSpec = ListenerSpec::new(
        "kuiDCAddImageCapturedEventListener",
        "kuiDCRemoveImageCapturedEventListener",
    );
    pub const IMAGE_ABOUT_TO_CAPTURE: ListenerSpec = ListenerSpec::new(
        "kuiDCAddImageAboutToCaptureListener",
        "kuiDCRemoveImageAboutToCaptureListener",
    );
    pub const IMAGE_JUST_CAPTURED: ListenerSpec = ListenerSpec::new(
        "kuiDCAddImageJustCapturedListener",
        "kuiDCRemoveImageJustCapturedListener",
    );
}

/// Fixed-aspect-ratio capture experience (`kuiFCE*`).
pub mod fixed_aspect_capture {
    use super::ListenerSpec;

    pub const BIND: &str = "kuiFCEBindCaptureControl";
    pub const BIND_WITH_OPTIONS: &str = "kuiFCEBindCaptureControlWithOptions";
    pub const TAKE_PICTURE: &str = "kuiFCETakePicture";
    pub const TAKE_PICTURE_CONTINUALLY: &str = "kuiFCETakePictureContinually";
    pub const STOP_CAPTURE: &str = "kuiFCEStopCapture";
    pub const SET_OPTIONS: &str = "kuiFCESetOptions";
    pub const GET_OPTIONS: &str = "kuiFCEGetOptions";
    pub const DEFAULT_GLARE_THRESHOLD: &str = "kuiFCEGetDefaultGlareThreshold";
    pub const DESTROY: &str = "kuiFCEDestroy";

    pub const IMAGE_CAPTURED_EVENT: ListenerSpec = ListenerSpec::new(
        "kuiFCEAddImageCapturedEventListener",
        "kuiFCERemoveImageCapturedEventListener",
    );
    pub const IMAGE_ABOUT_TO_CAPTURE: ListenerSpec = ListenerSpec::new(
        "kuiFCEAddImageAboutToCaptureListener",
        "kuiFCERemoveImageAboutToCaptureListener",
    );
    pub const IMAGE_JUST_CAPTURED: ListenerSpec = ListenerSpec::new(
        "kuiFCEAddImageJustCapturedListener",
        "kuiFCERemoveImageJustCapturedListener",
    );
}

/// Selfie capture experience (`kuiSC*`).
pub mod selfie_capture {
    use super::ListenerSpec;

    pub const BIND: &str = "kuiSCBindCaptureControl";
    pub const BIND_WITH_OPTIONS: &str = "kuiSCBindCaptureControlWithOptions";
    pub const TAKE_PICTURE: &str = "kuiSCTakePicture";
    pub const STOP_CAPTURE: &str = "kuiSCStopCapture";
    pub const SET_OPTIONS: &str = "kuiSCSetOptions";
    pub const GET_OPTIONS: &str = "kuiSCGetOptions";
    pub const DESTROY: &str = "kuiSCDestroy";

    pub const IMAGE_CAPTURED: ListenerSpec = ListenerSpec::new(
        "kuiSCAddImageCapturedListener",
        "kuiSCRemoveImageCapturedListener",
    );
}

/// Image slots (`ked*`).
pub mod image {
    pub const TO_BASE64: &str = "kedGetImageToBase64";
    pub const AS_BLOB: &str = "kedGetImageAsBlob";
    pub const WRITE_TO_FILE: &str = "kedImageWriteToFile";
    pub const READ_FROM_FILE: &str = "kedImageReadFromFile";
    pub const CLEAR_BITMAP: &str = "kedClearimageBitMap";
    pub const DELETE_FILE_FROM_DISK: &str = "kedDeleteFileFromDisk";
    pub const REMOVE_IMAGES: &str = "kedRemoveImages";
    pub const SET_PROPERTIES: &str = "kedSetImageProperties";
    pub const GET_SIZE: &str = "kedGetImageSize";
    pub const FROM_BASE64: &str = "kedGetImageFromBase64";
    pub const FROM_FILE_PATH: &str = "kedGetImageFromFilePath";
}

/// Glare remover (`kenGR*`).
pub mod glare {
    pub const GET_GLARE_FRACTION: &str = "kenGRGetGlareFraction";
    pub const REMOVE_GLARE: &str = "kenGRRemoveGlare";
}

/// On-device extraction (`kenODE*`).
pub mod extraction {
    use super::ListenerSpec;

    pub const SET_PROVIDER: &str = "kenODESetProvider";
    pub const EXTRACT_DATA: &str = "kenODEExtractData";
    pub const CANCEL_EXTRACTION: &str = "kenODECancelExtraction";
    pub const GET_PROJECT_NAME: &str = "kenODEGetProjectName";

    pub const RESULTS: ListenerSpec = ListenerSpec::new(
        "kenODEAddOnDeviceExtractionListener",
        "kenODERemoveOnDeviceExtractionListener",
    );
    pub const FRONT_PROCESSED_IMAGE: ListenerSpec = ListenerSpec::new(
        "kenODEAddFrontProcessedImageListener",
        "kenODERemoveFrontProcessedImageListener",
    );
    pub const BACK_PROCESSED_IMAGE: ListenerSpec = ListenerSpec::new(
        "kenODEAddBackProcessedImageListener",
        "kenODERemoveBackProcessedImageListener",
    );
}

/// Capture server session (`kloCaptureServer*`).
pub mod capture_server {
    use super::ListenerSpec;

    pub const CREATE: &str = "kloCaptureServerCreate";
    pub const REGISTER_DEVICE: &str = "kloCaptureServerRegisterDevice";
    pub const LOGIN: &str = "kloCaptureServerLogin";
    pub const LOGIN_ANONYMOUSLY: &str = "kloCaptureServerLoginAnonymously";
    pub const LOGOUT: &str = "kloCaptureServerLogout";
    pub const CLEAN: &str = "kloCaptureServerCleanCaptureServer";
    pub const START_JOB: &str = "kloCaptureServerStartJobService";
    pub const SEND_IMAGE: &str = "kloCaptureServerSendImageService";
    pub const SUBMIT_DOCUMENT: &str = "kloCaptureServerSubmitDocument";
    pub const CANCEL_SUBMISSION: &str = "kloCaptureServerCancelSubmission";
    pub const GET_DOCUMENT_TYPE: &str = "kloCaptureServerGetDocumentType";
    pub const SET_PROPERTIES: &str = "kloCaptureServerSetProperties";
    pub const GET_PROPERTIES: &str = "kloCaptureServerGetProperties";

    pub const PROGRESS: ListenerSpec = ListenerSpec::new(
        "kloCaptureServeraddProgressListener",
        "kloCaptureServerremoveProgressListener",
    );
}

/// Document types, documents and pages (`klo*`).
pub mod logistics {
    pub const CREATE_DOCUMENT_TYPE_WITH_FIELD_TYPES: &str = "kloCreateDocumentTypeWithFieldTypes";
    pub const DELETE_DOCUMENT_TYPES: &str = "kloDeleteDocumentTypes";
    pub const REMOVE_ALL_DOCUMENT_TYPES: &str = "kloRemoveAllDocumentTypes";
    pub const GET_DOCUMENT_TYPES: &str = "kloGetDocumentTypes";
    pub const GET_DOCUMENT_TYPE_PROPERTIES: &str = "kloGetDocumentTypeProperties";

    pub const CREATE_DOCUMENT_WITH_DOCUMENT_TYPE: &str = "kloCreateDocumentWithDocumentType";
    pub const CREATE_DOCUMENT_WITH_DOCUMENT_TYPE_AND_ID: &str =
        "kloCreateDocumentWithDocumentTypeAndId";
    pub const DELETE_DOCUMENTS: &str = "kloDeleteDocuments";
    pub const GET_DOCUMENT_PROPERTIES: &str = "kloGetDocumentProperties";
    pub const UPDATE_FIELDS: &str = "kloUpdateFields";
    pub const ADD_PAGE_TO_DOCUMENT: &str = "kloAddPageToDocument";
    pub const REMOVE_PAGE_FROM_DOCUMENT: &str = "kloRemovePageFromDocument";

    pub const CREATE_PAGE: &str = "kloCreatePageObject";
    pub const DELETE_PAGES: &str = "kloDeletePages";
    pub const GET_PAGE_PROPERTIES: &str = "kloGetPageProperties";
    pub const ADD_IMAGE_TO_PAGE: &str = "kloAddImageToPage";
    pub const REMOVE_IMAGE_FROM_PAGE: &str = "kloRemoveImageFromPage";
}

/// Image capture control (`kui*`), the camera view experiences bind to.
pub mod capture_control {
    use super::ListenerSpec;

    pub const ADD_CAMERA_VIEW: &str = "kuiAddCameraView";
    pub const REMOVE_CAMERA_VIEW: &str = "kuiRemoveCameraView";
    pub const GET_ID: &str = "kuiGetImageCaptureControlID";
    pub const FORCE_TAKE_PICTURE: &str = "kuiForceTakePicture";
    pub const FORCE_TAKE_PICTURE_FOCUS_AGAIN: &str = "kuiForceTakePictureFocusAgain";
    pub const SET_OPTIONS: &str = "kuiSetImageCaptureOptions";
    pub const GET_OPTIONS: &str = "kuiGetImageCaptureOptions";
    pub const GET_ALLOWABLE_RESOLUTIONS: &str = "kuiGetAllowableResolutions";
    pub const SET_IMAGE_RESOLUTION: &str = "kuiSetImageResolution";
    pub const SET_FOCUS_AREAS: &str = "kuiSetFocusAreas";
    pub const GET_MAX_FOCUS_AREAS: &str = "kuiGetMaxFocusAreas";
    pub const SET_CAMERA_TYPE: &str = "kuiSetCameraType";

    pub const IMAGE_CAPTURED: ListenerSpec =
        ListenerSpec::new("kuiAddImageCapturedListener", "kuiRemoveImageCapturedListener");
    // Native spelling.
    pub const STABILITY_DELAY: ListenerSpec =
        ListenerSpec::new("kuiAddStablityDelayListener", "kuiRemoveStablityDelayListener");
    pub const LEVELNESS: ListenerSpec =
        ListenerSpec::new("kuiAddLevelnessListener", "kuiRemoveLevelnessListener");
    pub const FOCUS: ListenerSpec = ListenerSpec::new("kuiAddFocusListener", "kuiRemoveFocusListener");
    pub const CAMERA_INITIALIZED: ListenerSpec = ListenerSpec::new(
        "kuiAddCameraInitializationListener",
        "kuiRemoveCameraInitializationListener",
    );
    pub const CAMERA_INITIALIZATION_FAILED: ListenerSpec = ListenerSpec::new(
        "kuiAddCameraInitializationFailedListener",
        "kuiRemoveCameraInitializationFailedListener",
    );
    pub const TORCH_LUMINANCE: ListenerSpec = ListenerSpec::new(
        "kuiAddTorchLuminanceListener",
        "kuiRemoveTorchLuminanceListener",
    );
}

/// SDK licensing utilities (`kut*`).
pub mod license {
    pub const SET_LICENSE: &str = "kutSetMobileSDKLicense";
    pub const GET_DAYS_REMAINING: &str = "kutGetDaysRemaining";
    pub const GET_SDK_VERSIONS: &str = "kutGetSDKVersions";
    // Native spelling.
    pub const SET_LICENSE_SERVER: &str = "kutSetMobileSDKLicenceServer";
    pub const GET_REMAINING_VOLUME_COUNT: &str = "kutGetRemainingVolumeCount";
}
