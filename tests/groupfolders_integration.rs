//! End-to-end coverage for the group-folders client against a mock server.

use std::net::TcpListener;

use nextcloud_groupfolders::{
    Connection, GroupFoldersClient, ListFoldersQuery, OcsError, Permissions, XmlValue,
};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FOLDERS_PATH: &str = "/v2.php/apps/groupfolders/folders";

// base64("admin:secret")
const BASIC_ADMIN_SECRET: &str = "Basic YWRtaW46c2VjcmV0";

const OK_ENVELOPE: &str =
    "<ocs><meta><status>ok</status><statuscode>100</statuscode></meta><data></data></ocs>";

fn client(server: &MockServer) -> GroupFoldersClient {
    GroupFoldersClient::new(Connection::new(server.uri(), "admin", "secret"))
}

#[tokio::test]
async fn test_list_folders_returns_normalized_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FOLDERS_PATH))
        .and(header("OCS-APIRequest", "true"))
        .and(header("authorization", BASIC_ADMIN_SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<ocs><meta><status>ok</status><statuscode>100</statuscode></meta>\
             <data><element><id>1</id><mount_point>Shared</mount_point></element></data></ocs>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .list_folders(&ListFoldersQuery::new())
        .await
        .expect("envelope");

    assert_eq!(response.status(), "ok");
    let data = response.data().expect("data");
    let element = data.get("element").expect("element");
    assert_eq!(element.get("id").and_then(XmlValue::as_str), Some("1"));
    assert_eq!(
        element.get("mount_point").and_then(XmlValue::as_str),
        Some("Shared")
    );

    // An empty query never produces a query string.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_list_folders_passes_filters_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FOLDERS_PATH))
        .and(query_param("search", "team"))
        .and(query_param("limit", "50"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_ENVELOPE))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .list_folders(&ListFoldersQuery::new().search("team").limit(50).offset(100))
        .await
        .expect("envelope");
}

#[tokio::test]
async fn test_add_folder_submits_mountpoint_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FOLDERS_PATH))
        .and(header("OCS-APIRequest", "true"))
        .and(header("authorization", BASIC_ADMIN_SECRET))
        .and(body_string("mountpoint=Docs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_ENVELOPE))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server).add_folder("Docs").await.expect("envelope");
    assert_eq!(response.status_code(), 100);
}

#[tokio::test]
async fn test_get_and_delete_folder_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{FOLDERS_PATH}/7")))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<ocs><meta><status>ok</status><statuscode>100</statuscode></meta>\
             <data><id>7</id><mount_point>Docs</mount_point></data></ocs>",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{FOLDERS_PATH}/7")))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_ENVELOPE))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let response = client.get_folder(7).await.expect("envelope");
    let data = response.data().expect("data");
    assert_eq!(data.get("id").and_then(XmlValue::as_str), Some("7"));

    client.delete_folder(7).await.expect("envelope");
}

#[tokio::test]
async fn test_edit_mountpoint_puts_form() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{FOLDERS_PATH}/3/mountpoint")))
        .and(body_string("mountpoint=Archive"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_ENVELOPE))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .edit_mountpoint(3, "Archive")
        .await
        .expect("envelope");
}

#[tokio::test]
async fn test_group_membership_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{FOLDERS_PATH}/3/groups")))
        .and(body_string("group=designers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_ENVELOPE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{FOLDERS_PATH}/3/groups/designers")))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_ENVELOPE))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client
        .add_group_to_folder(3, "designers")
        .await
        .expect("envelope");
    client
        .remove_group_from_folder(3, "designers")
        .await
        .expect("envelope");
}

#[tokio::test]
async fn test_set_group_permissions_sends_bit_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{FOLDERS_PATH}/3/groups/designers")))
        .and(body_string("permissions=31"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_ENVELOPE))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .set_folder_group_permissions(3, "designers", Permissions::ALL)
        .await
        .expect("envelope");
}

#[tokio::test]
async fn test_set_quota_accepts_unlimited_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{FOLDERS_PATH}/9/quota")))
        .and(body_string("quota=-3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_ENVELOPE))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).set_folder_quota(9, -3).await.expect("envelope");
}

#[tokio::test]
async fn test_business_failure_returns_an_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<ocs><meta><status>failure</status><statuscode>404</statuscode>\
             <message>Folder not found</message></meta><data/></ocs>",
        ))
        .mount(&server)
        .await;

    let response = client(&server).get_folder(999).await.expect("envelope");
    assert_eq!(response.status(), "failure");
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.message(), Some("Folder not found"));
    assert!(response.data().is_none());
}

#[tokio::test]
async fn test_unreachable_server_fails_with_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener); // release the port so the request fails with ECONNREFUSED

    let client = GroupFoldersClient::new(Connection::new(
        format!("http://{addr}"),
        "admin",
        "secret",
    ));
    let err = client
        .list_folders(&ListFoldersQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, OcsError::Transport(_)));
    assert!(err.to_string().starts_with("Transport Error: "));
}
