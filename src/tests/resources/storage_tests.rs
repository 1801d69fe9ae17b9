use super::create_test_gateway;
use crate::{ElevationPolicy, ProxmoxError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_storage(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api2/json/storage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "storage": "local",
                    "type": "dir",
                    "content": "iso,vztmpl,backup",
                    "path": "/var/lib/vz",
                    "used": 10737418240_u64,
                    "total": 42949672960_u64
                },
                {
                    "storage": "local-lvm",
                    "type": "lvmthin",
                    "content": "images,rootdir",
                    "nodes": "pve1",
                    "thinpool": "data"
                },
                {
                    "storage": "old-nfs",
                    "type": "nfs",
                    "content": "backup",
                    "disable": 1
                },
                {
                    "storage": "scratch",
                    "type": "dir",
                    "content": ""
                }
            ]
        })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_storage_list_excludes_disabled_and_contentless() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);
    mount_storage(&mock_server).await;

    let pools = gateway.storage(None).await.unwrap();
    let names: Vec<&str> = pools.iter().map(|p| p.storage.as_str()).collect();
    assert_eq!(names, vec!["local", "local-lvm"]);

    let local = &pools[0];
    assert_eq!(local.nodes, "all");
    assert_eq!(local.content, "iso,vztmpl,backup");
    assert_eq!(local.usage, "10.00 GB / 40.00 GB (25.0%)");
    assert_eq!(local.usage_percent, Some(25.0));
    assert_eq!(local.status, "enabled");
    assert!(local.available);

    // No usage counters: total is zero, so the percentage is unknown.
    let lvm = &pools[1];
    assert_eq!(lvm.nodes, "pve1");
    assert_eq!(lvm.usage, "0 B / 0 B (N/A)");
    assert_eq!(lvm.usage_percent, None);
    assert!(!lvm.available);
}

#[tokio::test]
async fn test_storage_list_node_filter() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);
    mount_storage(&mock_server).await;

    let on_pve2 = gateway.storage(Some("pve2")).await.unwrap();
    let names: Vec<&str> = on_pve2.iter().map(|p| p.storage.as_str()).collect();
    assert_eq!(names, vec!["local"]);

    let on_pve1 = gateway.storage(Some("pve1")).await.unwrap();
    assert_eq!(on_pve1.len(), 2);
}

#[tokio::test]
async fn test_storage_serializes_type_and_null_percent() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);
    mount_storage(&mock_server).await;

    let pools = gateway.storage(Some("pve1")).await.unwrap();
    let rendered = serde_json::to_value(&pools).unwrap();
    assert_eq!(rendered[1]["type"], "lvmthin");
    assert!(rendered[1]["usagePercent"].is_null());
}

#[tokio::test]
async fn test_storage_detail_success() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    Mock::given(method("GET"))
        .and(path("/api2/json/storage/local"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "type": "dir",
                "content": "images,iso",
                "path": "/var/lib/vz",
                "digest": "0e9c8b1f"
            }
        })))
        .mount(&mock_server)
        .await;

    let pool = gateway.storage_detail("local").await.unwrap();
    assert_eq!(pool.storage, "local");
    assert_eq!(pool.content, "images,iso");
    assert_eq!(pool.status, "enabled");
}

#[tokio::test]
async fn test_storage_detail_disabled_pool_is_not_found() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    Mock::given(method("GET"))
        .and(path("/api2/json/storage/old-nfs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"storage": "old-nfs", "type": "nfs", "content": "backup", "disable": 1}
        })))
        .mount(&mock_server)
        .await;

    let err = gateway.storage_detail("old-nfs").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("old-nfs"));
}

#[tokio::test]
async fn test_storage_detail_unknown_pool() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    Mock::given(method("GET"))
        .and(path("/api2/json/storage/missing"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "data": null,
            "message": "storage 'missing' does not exist"
        })))
        .mount(&mock_server)
        .await;

    let err = gateway.storage_detail("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("storage 'missing' does not exist"));

    let blank = gateway.storage_detail("  ").await;
    assert!(matches!(blank, Err(ProxmoxError::Validation(_))));
}
