use super::create_test_gateway;
use crate::{COMMAND_SUCCESS, ElevationPolicy, GuestKind, ProxmoxError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

#[tokio::test]
async fn test_command_refused_when_restricted() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = gateway
        .execute_guest_command("pve1", "100", Some("uptime"), None)
        .await;
    assert!(matches!(result, Err(ProxmoxError::PermissionDenied(_))));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_command_requires_command_text() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Elevated);

    let result = gateway
        .execute_guest_command("pve1", "100", Some(""), None)
        .await;
    assert!(matches!(result, Err(ProxmoxError::Validation(_))));

    let result = gateway.execute_guest_command("pve1", "100", None, None).await;
    assert!(matches!(result, Err(ProxmoxError::Validation(_))));

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_command_dispatched_when_elevated() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Elevated);

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu/100/agent/exec"))
        .and(body_json(serde_json::json!({"command": "df -h"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"pid": 1234}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway
        .execute_guest_command("pve1", "100", Some("df -h"), None)
        .await
        .unwrap();
    assert_eq!(result.status, COMMAND_SUCCESS);
    assert_eq!(result.command, "df -h");
    assert_eq!(result.node, "pve1");
    assert_eq!(result.vmid, "100");
    assert_eq!(result.kind, GuestKind::Qemu);
    assert_eq!(result.output, r#"{"pid":1234}"#);

    let rendered = serde_json::to_value(&result).unwrap();
    assert_eq!(rendered["type"], "qemu");
    assert_eq!(rendered["status"], "SUCCESS");
}

#[tokio::test]
async fn test_command_null_payload_on_container() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Elevated);

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/lxc/205/agent/exec"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": null })),
        )
        .mount(&mock_server)
        .await;

    let result = gateway
        .execute_guest_command("pve1", "205", Some("hostname"), Some(GuestKind::Lxc))
        .await
        .unwrap();
    assert_eq!(result.kind, GuestKind::Lxc);
    assert_eq!(result.output, "Command executed");
}

#[tokio::test]
async fn test_command_upstream_failure_keeps_message() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Elevated);

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu/100/agent/exec"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "data": null,
            "message": "QEMU guest agent is not running"
        })))
        .mount(&mock_server)
        .await;

    let err = gateway
        .execute_guest_command("pve1", "100", Some("uptime"), None)
        .await
        .unwrap_err();
    match err {
        ProxmoxError::Upstream(upstream) => {
            assert_eq!(upstream.status(), Some(500));
            assert_eq!(upstream.message(), "QEMU guest agent is not running");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_command_rejects_dot_segment_node() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Elevated);

    let result = gateway
        .execute_guest_command("..", "100", Some("uptime"), None)
        .await;
    assert!(matches!(result, Err(ProxmoxError::Validation(_))));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
