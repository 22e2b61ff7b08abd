//! Integration tests: a controller action logged on entry and answered with
//! a `JsonResult`.

use std::path::PathBuf;
use std::sync::Arc;

use panel_common::{LogEventBus, LoggerSettings};
use panel_common_web::{ActionContext, HttpResponse, JsonResult, RequestActionLog};
use serde::Serialize;
use uuid::Uuid;

/// Response that records every call made on it.
#[derive(Debug, Default)]
struct RecordingResponse {
    status: Option<u16>,
    content_type: Option<String>,
    content_encoding: Option<String>,
    body: String,
}

impl HttpResponse for RecordingResponse {
    fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn set_content_type(&mut self, content_type: &str) {
        self.content_type = Some(content_type.to_string());
    }

    fn set_content_encoding(&mut self, encoding: &str) {
        self.content_encoding = Some(encoding.to_string());
    }

    fn write(&mut self, body: &str) {
        self.body.push_str(body);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SaveOutcome {
    success: bool,
    message: String,
}

fn temp_root() -> PathBuf {
    std::env::temp_dir().join(format!("panel_common_web_it_{}", Uuid::new_v4()))
}

#[test]
fn test_logged_action_answers_with_json() {
    // Arrange
    let root = temp_root();
    let filter = RequestActionLog::new("MotdWeb", true)
        .with_settings(LoggerSettings {
            console: false,
            ..LoggerSettings::default().with_base_dir(&root)
        })
        .with_event_bus(Arc::new(LogEventBus::new()));
    let context = ActionContext::new("Motd", "Save").with_parameter("serviceId", 12);
    let mut response = RecordingResponse::default();

    // Act
    filter.on_action_executing(&context);
    JsonResult::new(SaveOutcome {
        success: true,
        message: "saved".to_string(),
    })
    .execute(&mut response)
    .expect("execute");

    // Assert: the response
    assert_eq!(response.status, Some(200));
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    assert_eq!(response.content_encoding, None);
    assert_eq!(
        response.body,
        "{\n  \"Success\": true,\n  \"Message\": \"saved\"\n}"
    );

    // Assert: the request block landed in the Misc log tree
    let log_dir = root.join("Components/Misc/Logs/MotdWeb");
    let entry = std::fs::read_dir(&log_dir)
        .expect("log dir")
        .next()
        .expect("one log file")
        .expect("entry");
    let contents = std::fs::read_to_string(entry.path()).unwrap();
    assert!(contents.contains("Request Received"), "got: {contents}");
    assert!(contents.contains("DBG] Controller: Motd"), "got: {contents}");
    assert!(contents.contains("|--- serviceId = 12"), "got: {contents}");

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_error_result_carries_status_and_encoding() {
    let mut response = RecordingResponse::default();

    JsonResult::new("not found")
        .with_status(404)
        .with_content_encoding("utf-8")
        .execute(&mut response)
        .expect("execute");

    assert_eq!(response.status, Some(404));
    assert_eq!(response.content_encoding.as_deref(), Some("utf-8"));
    assert_eq!(response.body, "\"not found\"");
}
