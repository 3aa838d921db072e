//! `/invoke` integration tests
//!
//! Drive the axum router in-process against a `MockBackend`, so no desktop
//! is required.
//!
//! ```bash
//! cargo test -p screenshot-invoke-server --test invoke_integration_tests
//! ```

mod common;

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use common::{InvokeTestContext, saved_path};
use screenshot_core::{
    capture::{MockBackend, MockCall, MockFailure, SettleDelays, mock::MOCK_PNG},
    model::Keystroke,
};
use serde_json::json;
use tokio::{io::AsyncWriteExt, net::TcpStream};

// ============================================================================
// callTool: success paths
// ============================================================================

#[tokio::test]
async fn test_capture_saves_under_todays_directory() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx.capture(json!({"region": "full"})).await;

    assert_eq!(status, StatusCode::OK);
    let path = saved_path(&body);
    assert!(path.is_absolute());
    assert_eq!(path.parent().unwrap(), ctx.today_dir());
    assert!(path.exists());

    let name = path.file_name().unwrap().to_str().unwrap();
    let stamp = name
        .strip_prefix("screenshot-")
        .and_then(|s| s.strip_suffix(".png"))
        .unwrap();
    // 2026-10-16T09-30-05-123Z
    assert_eq!(stamp.len(), 24);
    assert!(stamp.ends_with('Z'));
    assert!(!stamp.contains(':') && !stamp.contains('.'));
}

#[tokio::test]
async fn test_capture_returns_file_contents_as_base64() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx.capture(json!({})).await;

    assert_eq!(status, StatusCode::OK);
    let content = body["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(content[0]["type"], "text");
    assert_eq!(content[1]["type"], "base64_image");

    let data = content[1]["data"].as_str().unwrap();
    assert!(!data.starts_with("data:"));
    let decoded = STANDARD.decode(data).unwrap();
    assert_eq!(decoded, std::fs::read(saved_path(&body)).unwrap());
    assert_eq!(decoded, MOCK_PNG);
}

#[tokio::test]
async fn test_include_base64_false_returns_text_only() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx.capture(json!({"includeBase64": false})).await;

    assert_eq!(status, StatusCode::OK);
    let content = body["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["type"], "text");
    assert!(saved_path(&body).exists());
}

#[tokio::test]
async fn test_missing_arguments_use_defaults() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx
        .post(json!({"method": "callTool", "params": {"name": "capture"}}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"].as_array().unwrap().len(), 2);
    assert_eq!(ctx.backend.captured_paths().len(), 1);
}

#[tokio::test]
async fn test_window_switch_runs_full_sequence() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx
        .capture(json!({
            "windowName": "Google Chrome",
            "switchToWindow": true,
            "switchToSubwindow": true,
            "subwindowKey": "2",
            "includeBase64": false
        }))
        .await;

    assert_eq!(status, StatusCode::OK);
    let path = saved_path(&body);
    assert!(
        path.file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("screenshot-Google_Chrome-")
    );
    assert_eq!(
        ctx.backend.calls(),
        vec![
            MockCall::Activate("Google Chrome".to_string()),
            MockCall::Keystroke(Keystroke::command("2")),
            MockCall::Keystroke(Keystroke::toggle_fullscreen()),
            MockCall::Capture(path),
            MockCall::Keystroke(Keystroke::toggle_fullscreen()),
        ]
    );
}

#[tokio::test]
async fn test_window_segment_is_sanitized() {
    let ctx = InvokeTestContext::new();

    let (_, body) = ctx
        .capture(json!({"windowName": "Mail/Inbox: ünread.app", "includeBase64": false}))
        .await;

    let name = saved_path(&body)
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let segment = name
        .strip_prefix("screenshot-")
        .unwrap()
        .rsplitn(7, '-')
        .last()
        .unwrap()
        .to_string();
    assert_eq!(segment, "Mail_Inbox___nread_app");
    assert!(segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
}

#[tokio::test]
async fn test_empty_subwindow_key_skips_subview_step() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx
        .capture(json!({
            "windowName": "Calendar",
            "switchToWindow": true,
            "switchToSubwindow": true,
            "subwindowKey": "",
            "includeBase64": false
        }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ctx.backend.calls(),
        vec![
            MockCall::Activate("Calendar".to_string()),
            MockCall::Keystroke(Keystroke::toggle_fullscreen()),
            MockCall::Capture(saved_path(&body)),
            MockCall::Keystroke(Keystroke::toggle_fullscreen()),
        ]
    );
}

#[tokio::test]
async fn test_nested_data_shape_is_equivalent() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx
        .post(json!({
            "method": "callTool",
            "params": {
                "data": {
                    "name": "capture",
                    "arguments": {"windowName": "Notes", "includeBase64": false}
                }
            }
        }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"].as_array().unwrap().len(), 1);
    let name = saved_path(&body).file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("screenshot-Notes-"));
}

#[tokio::test]
async fn test_sequential_captures_get_distinct_files() {
    let ctx = InvokeTestContext::new();

    let (_, first) = ctx.capture(json!({"includeBase64": false})).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let (_, second) = ctx.capture(json!({"includeBase64": false})).await;

    assert_ne!(saved_path(&first), saved_path(&second));
    assert_eq!(ctx.saved_files().len(), 2);
}

// ============================================================================
// listTools
// ============================================================================

#[tokio::test]
async fn test_list_tools_describes_capture() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx.post(json!({"method": "listTools"})).await;

    assert_eq!(status, StatusCode::OK);
    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "capture");
    assert!(!tools[0]["description"].as_str().unwrap().is_empty());
    assert!(tools[0]["inputSchema"].is_object());
    assert!(ctx.backend.calls().is_empty());
}

#[tokio::test]
async fn test_list_tools_ignores_params() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx
        .post(json!({"method": "listTools", "params": {"name": "anything"}}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tools"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Rejections (400)
// ============================================================================

#[tokio::test]
async fn test_unsupported_region_is_rejected_without_side_effects() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx.capture(json!({"region": "window"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("region"));
    assert!(ctx.backend.calls().is_empty());
    assert!(ctx.saved_files().is_empty());
}

#[tokio::test]
async fn test_unknown_tool_is_rejected() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx
        .post(json!({"method": "callTool", "params": {"name": "record"}}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unsupported method or tool");
    assert!(ctx.backend.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_or_missing_method_is_rejected() {
    let ctx = InvokeTestContext::new();

    for request in [json!({"method": "tools/call"}), json!({"params": {}}), json!([])] {
        let (status, body) = ctx.post(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unsupported method or tool");
    }
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx.post_raw("{\"method\": \"callTool\",").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert!(ctx.backend.calls().is_empty());
}

#[tokio::test]
async fn test_mistyped_arguments_are_rejected() {
    let ctx = InvokeTestContext::new();

    let (status, body) = ctx.capture(json!({"switchToWindow": "yes"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid arguments"));
    assert!(ctx.saved_files().is_empty());
}

// ============================================================================
// Failures (500)
// ============================================================================

#[tokio::test]
async fn test_capture_failure_is_server_error() {
    let ctx = InvokeTestContext::with_backend(MockBackend::new().fail_on(MockFailure::Capture));

    let (status, body) = ctx.capture(json!({})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Screenshot capture failed"));
    assert!(error.contains("capture"));
}

#[tokio::test]
async fn test_unreadable_image_is_encoding_error() {
    let ctx = InvokeTestContext::with_backend(MockBackend::new().without_image_file());

    let (status, body) = ctx.capture(json!({"includeBase64": true})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to convert image to base64:")
    );
    assert_eq!(ctx.backend.captured_paths().len(), 1);
}

#[tokio::test]
async fn test_unreadable_image_without_base64_still_succeeds() {
    let ctx = InvokeTestContext::with_backend(MockBackend::new().without_image_file());

    let (status, body) = ctx.capture(json!({"includeBase64": false})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_activation_failure_stops_sequence() {
    let ctx = InvokeTestContext::with_backend(MockBackend::new().fail_on(MockFailure::Activate));

    let (status, _) = ctx
        .capture(json!({"windowName": "Calendar", "switchToWindow": true}))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        ctx.backend.calls(),
        vec![MockCall::Activate("Calendar".to_string())]
    );
    assert!(ctx.backend.captured_paths().is_empty());
}

// ============================================================================
// Client disconnects
// ============================================================================

#[tokio::test]
async fn test_client_disconnect_does_not_abort_capture() {
    let delays = SettleDelays {
        fullscreen: Duration::from_millis(400),
        ..SettleDelays::none()
    };
    let ctx = InvokeTestContext::with_delays(MockBackend::new(), delays);
    let (addr, server) = ctx.serve().await;

    let body = json!({
        "method": "callTool",
        "params": {
            "name": "capture",
            "arguments": {"windowName": "Calendar", "switchToWindow": true}
        }
    })
    .to_string();
    let mut client = TcpStream::connect(addr).await.unwrap();
    client
        .write_all(
            format!(
                "POST /invoke HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\n\r\n{body}",
                body.len()
            )
            .as_bytes(),
        )
        .await
        .unwrap();

    // Hang up while the sequence waits for fullscreen to settle
    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(client);

    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    while ctx.backend.calls().len() < 4 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    server.abort();

    let calls = ctx.backend.calls();
    let captured = ctx.backend.captured_paths();
    assert_eq!(captured.len(), 1);
    assert_eq!(
        calls,
        vec![
            MockCall::Activate("Calendar".to_string()),
            MockCall::Keystroke(Keystroke::toggle_fullscreen()),
            MockCall::Capture(captured[0].clone()),
            MockCall::Keystroke(Keystroke::toggle_fullscreen()),
        ]
    );
    assert!(captured[0].exists());
}

// ============================================================================
// Routing defaults
// ============================================================================

#[tokio::test]
async fn test_other_paths_are_not_found() {
    let ctx = InvokeTestContext::new();

    let get = Request::get("/invoke").body(Body::empty()).unwrap();
    assert_eq!(ctx.send(get).await, StatusCode::METHOD_NOT_ALLOWED);

    let post = Request::post("/capture").body(Body::empty()).unwrap();
    assert_eq!(ctx.send(post).await, StatusCode::NOT_FOUND);
}
