// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Simulated SDK for the walkthrough.

use docbridge_native::scripted::ScriptedBoundary;
use docbridge_native::{Delivery, NativeCall, ops};
use serde_json::{Value, json};

const CAPTURE_CONTROL: &str = "capture-control-1";

const SUCCESS: &str = "KMC_SUCCESS";

/// A boundary that behaves like a healthy device talking to a reachable
/// capture server.
pub fn simulated_sdk() -> ScriptedBoundary {
    let native = ScriptedBoundary::new();
    script_license(&native);
    script_capture(&native);
    script_images(&native);
    script_server(&native);
    script_assembly(&native);
    native
}

fn script_license(native: &ScriptedBoundary) {
    native.respond(ops::license::SET_LICENSE, json!(SUCCESS));
    native.respond(ops::license::GET_DAYS_REMAINING, json!(90));
}

fn script_capture(native: &ScriptedBoundary) {
    native.respond(ops::capture_control::ADD_CAMERA_VIEW, json!(SUCCESS));
    native.respond(ops::capture_control::GET_ID, json!(CAPTURE_CONTROL));
    native.respond(ops::capture_control::REMOVE_CAMERA_VIEW, json!(SUCCESS));
    let capture = ops::document_capture::IMAGE_CAPTURED_EVENT;
    native.respond(ops::document_capture::BIND_WITH_OPTIONS, json!(SUCCESS));
    native.respond(ops::document_capture::DESTROY, Value::Null);
    native.listen(capture);
    native.on(ops::document_capture::TAKE_PICTURE, move |native: &ScriptedBoundary, _: &NativeCall| {
        native.raise(
            capture.add,
            json!({
                "primaryImage": {"ID": "img-primary", "width": 2448, "height": 3264, "mimeType": "MIMETYPE_JPG"},
                "glareFreeImage": {"ID": "img-clean", "width": 2448, "height": 3264, "mimeType": "MIMETYPE_JPG"},
                "errorInfo": null
            }),
        );
        Delivery::Success(json!(SUCCESS))
    });
}

fn script_images(native: &ScriptedBoundary) {
    native.respond(ops::image::WRITE_TO_FILE, Value::Null);
    native.respond(ops::image::REMOVE_IMAGES, Value::Null);
}

fn script_server(native: &ScriptedBoundary) {
    native.respond(ops::capture_server::CREATE, Value::Null);
    native.respond(ops::capture_server::REGISTER_DEVICE, json!(SUCCESS));
    native.respond(
        ops::capture_server::LOGIN_ANONYMOUSLY,
        json!([{"typeName": "Invoice", "displayName": "Invoice"}, {"typeName": "Receipt"}]),
    );
    native.respond(ops::capture_server::LOGOUT, json!(SUCCESS));
    native.on(ops::capture_server::GET_DOCUMENT_TYPE, |_: &ScriptedBoundary, call: &NativeCall| {
        Delivery::Success(json!({"typeName": call.args[0], "fieldTypes": [{"name": "Total"}]}))
    });

    let progress = ops::capture_server::PROGRESS;
    native.listen(progress);
    native.on(ops::capture_server::SUBMIT_DOCUMENT, move |native: &ScriptedBoundary, _: &NativeCall| {
        for percent in [8.0, 35.5, 72.0, 100.0] {
            native.raise(progress.add, json!({"submissionJobID": "job-1", "progressPercent": percent}));
        }
        Delivery::Success(json!(SUCCESS))
    });
}

fn script_assembly(native: &ScriptedBoundary) {
    native.on(
        ops::logistics::CREATE_DOCUMENT_WITH_DOCUMENT_TYPE_AND_ID,
        |_: &ScriptedBoundary, call: &NativeCall| {
            let params = &call.args[0];
            Delivery::Success(json!({
                "documentID": params["documentID"],
                "documentType": {"typeName": params["documentTypeName"]}
            }))
        },
    );
    native.respond(ops::logistics::CREATE_PAGE, json!({"pageID": "page-1", "side": "FRONT"}));
    native.on(ops::logistics::ADD_IMAGE_TO_PAGE, |_: &ScriptedBoundary, call: &NativeCall| {
        let params = &call.args[0];
        Delivery::Success(json!({"pageID": params["pageID"], "images": [{"ID": params["imageID"]}]}))
    });
    native.on(ops::logistics::ADD_PAGE_TO_DOCUMENT, |_: &ScriptedBoundary, call: &NativeCall| {
        let params = &call.args[0];
        Delivery::Success(json!({"documentID": params["documentID"], "pages": [{"pageID": params["pageID"]}]}))
    });
}
