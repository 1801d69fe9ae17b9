use super::create_test_gateway;
use crate::{ElevationPolicy, GuestKind, GuestKindFilter, ProxmoxError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_json(mock_server: &MockServer, route: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data })))
        .mount(mock_server)
        .await;
}

async fn mount_cluster(mock_server: &MockServer) {
    mount_json(
        mock_server,
        "/api2/json/nodes",
        serde_json::json!([
            {"node": "pve1", "status": "online"},
            {"node": "pve2", "status": "online"}
        ]),
    )
    .await;
    mount_json(
        mock_server,
        "/api2/json/nodes/pve1/qemu",
        serde_json::json!([
            {
                "vmid": 1000,
                "name": "db",
                "status": "running",
                "cpu": 0.031,
                "cpus": 4,
                "mem": 2147483648_u64,
                "maxmem": 4294967296_u64,
                "diskread": 1536,
                "diskwrite": 0,
                "netin": 1048576,
                "netout": 2048,
                "uptime": 90061
            },
            {"vmid": "100", "name": "web", "status": "stopped", "maxmem": 1073741824_u64}
        ]),
    )
    .await;
    mount_json(
        mock_server,
        "/api2/json/nodes/pve1/lxc",
        serde_json::json!([{"vmid": "205", "name": "dns", "status": "running", "type": "lxc"}]),
    )
    .await;
    mount_json(
        mock_server,
        "/api2/json/nodes/pve2/qemu",
        serde_json::json!([{"vmid": 999, "name": "ci", "status": "running"}]),
    )
    .await;
    mount_json(mock_server, "/api2/json/nodes/pve2/lxc", serde_json::json!([])).await;
}

#[tokio::test]
async fn test_list_guests_merges_and_sorts_across_nodes() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);
    mount_cluster(&mock_server).await;

    let listing = gateway.list_guests(None, GuestKindFilter::All).await.unwrap();
    assert!(!listing.is_partial());

    let ids: Vec<&str> = listing.guests.iter().map(|g| g.vmid.as_str()).collect();
    assert_eq!(ids, vec!["100", "205", "999", "1000"]);

    let dns = &listing.guests[1];
    assert_eq!(dns.kind, GuestKind::Lxc);
    assert_eq!(dns.node, "pve1");
    assert_eq!(dns.memory, "N/A");
    assert_eq!(dns.network_in, "N/A");

    let ci = &listing.guests[2];
    assert_eq!(ci.node, "pve2");
    assert_eq!(ci.kind, GuestKind::Qemu);

    let db = &listing.guests[3];
    assert_eq!(db.name.as_deref(), Some("db"));
    assert_eq!(db.uptime, "1d 1h 1m");
    assert_eq!(db.cpu, "3.1%");
    assert_eq!(db.memory, "2.00 GB / 4.00 GB");
    assert_eq!(db.disk_read, "1.50 KB");
    assert_eq!(db.disk_write, "0 B");
    assert_eq!(db.network_in, "1.00 MB");
    assert_eq!(db.network_out, "2.00 KB");
}

#[tokio::test]
async fn test_list_guests_vmid_is_always_a_string() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);
    mount_cluster(&mock_server).await;

    let listing = gateway
        .list_guests(Some("pve2"), GuestKindFilter::Only(GuestKind::Qemu))
        .await
        .unwrap();
    let rendered = serde_json::to_value(&listing).unwrap();

    assert_eq!(rendered["guests"][0]["vmid"], serde_json::json!("999"));
    assert_eq!(rendered["guests"][0]["type"], serde_json::json!("qemu"));
    assert!(rendered.get("diagnostics").is_none());
}

#[tokio::test]
async fn test_list_guests_tolerates_failing_node() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    mount_json(
        &mock_server,
        "/api2/json/nodes",
        serde_json::json!([{"node": "a"}, {"node": "b"}]),
    )
    .await;
    mount_json(
        &mock_server,
        "/api2/json/nodes/a/qemu",
        serde_json::json!([{"vmid": 101, "status": "running"}]),
    )
    .await;
    mount_json(
        &mock_server,
        "/api2/json/nodes/a/lxc",
        serde_json::json!([{"vmid": 102, "status": "running"}]),
    )
    .await;
    for route in ["/api2/json/nodes/b/qemu", "/api2/json/nodes/b/lxc"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(595).set_body_json(serde_json::json!({
                "data": null,
                "message": "no route to host"
            })))
            .mount(&mock_server)
            .await;
    }

    let listing = gateway.list_guests(None, GuestKindFilter::All).await.unwrap();

    let ids: Vec<&str> = listing.guests.iter().map(|g| g.vmid.as_str()).collect();
    assert_eq!(ids, vec!["101", "102"]);
    assert!(listing.guests.iter().all(|g| g.node == "a"));
    assert!(listing.is_partial());
    assert_eq!(listing.diagnostics.len(), 2);
    assert!(listing.diagnostics.iter().all(|d| d.node == "b"));
    assert!(listing.diagnostics[0].message.contains("no route to host"));
}

#[tokio::test]
async fn test_list_guests_fails_when_nodes_unavailable() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "data": null,
            "message": "invalid token value!"
        })))
        .mount(&mock_server)
        .await;

    let err = gateway
        .list_guests(None, GuestKindFilter::All)
        .await
        .unwrap_err();
    match err {
        ProxmoxError::Upstream(upstream) => {
            assert_eq!(upstream.status(), Some(401));
            assert_eq!(upstream.message(), "invalid token value!");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_list_guests_node_filter_skips_enumeration() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve2/lxc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"vmid": 301, "status": "running"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve2/qemu"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let listing = gateway
        .list_guests(Some("pve2"), GuestKindFilter::Only(GuestKind::Lxc))
        .await
        .unwrap();
    assert_eq!(listing.guests.len(), 1);
    assert_eq!(listing.guests[0].vmid, "301");
    assert_eq!(listing.guests[0].kind, GuestKind::Lxc);
}

#[tokio::test]
async fn test_guest_detail_defaults_to_qemu() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    mount_json(
        &mock_server,
        "/api2/json/nodes/pve1/qemu/100/status/current",
        serde_json::json!({
            "name": "web",
            "status": "running",
            "cpu": 0.5,
            "mem": 536870912,
            "maxmem": 1073741824,
            "diskread": 0,
            "diskwrite": 0,
            "netin": 0,
            "netout": 0,
            "uptime": 59
        }),
    )
    .await;

    let guest = gateway.guest_detail("pve1", "100", None).await.unwrap();
    // The status endpoint omits vmid; the requested id fills it in.
    assert_eq!(guest.vmid, "100");
    assert_eq!(guest.kind, GuestKind::Qemu);
    assert_eq!(guest.node, "pve1");
    assert_eq!(guest.uptime, "0m");
    assert_eq!(guest.memory, "512.00 MB / 1.00 GB");
    assert_eq!(guest.network_out, "0 B");
}

#[tokio::test]
async fn test_guest_detail_container() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    mount_json(
        &mock_server,
        "/api2/json/nodes/pve1/lxc/205/status/current",
        serde_json::json!({"vmid": 205, "name": "dns", "status": "stopped"}),
    )
    .await;

    let guest = gateway
        .guest_detail("pve1", "205", Some(GuestKind::Lxc))
        .await
        .unwrap();
    assert_eq!(guest.vmid, "205");
    assert_eq!(guest.kind, GuestKind::Lxc);
    assert_eq!(guest.status, "stopped");
    assert_eq!(guest.uptime, "N/A");
}

#[tokio::test]
async fn test_guest_detail_missing_guest_is_not_found() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/999/status/current"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "data": null,
            "message": "Configuration file 'nodes/pve1/qemu-server/999.conf' does not exist"
        })))
        .mount(&mock_server)
        .await;

    let err = gateway.guest_detail("pve1", "999", None).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_guest_detail_rejects_non_numeric_id() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    let result = gateway.guest_detail("pve1", "web", None).await;
    assert!(matches!(result, Err(ProxmoxError::Validation(_))));
}

#[tokio::test]
async fn test_list_guests_rejects_dot_segment_node_filter() {
    let mock_server = MockServer::start().await;
    let gateway = create_test_gateway(&mock_server, ElevationPolicy::Restricted);

    for node in [".", ".."] {
        let result = gateway.list_guests(Some(node), GuestKindFilter::All).await;
        assert!(matches!(result, Err(ProxmoxError::Validation(_))));
    }
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
