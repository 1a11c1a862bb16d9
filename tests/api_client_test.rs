mod common;

use std::time::Duration;

use common::StubServer;
use folio_tui::models::{CreateFolderInput, Cursor, FolderUpdate, ImageUpload, SortDirection, SortField};
use folio_tui::{ApiClient, ApiError, SortOptions};

fn client(server: &StubServer) -> ApiClient {
    ApiClient::new(&server.base_url(), 20, None).unwrap()
}

#[tokio::test]
async fn test_first_page_omits_cursor() {
    let server = StubServer::start().await;
    server.on(
        "GET",
        "/api/folders",
        200,
        r#"{"folders":[{"id":"f1","name":"Trips","parentId":"root"}],"lastKey":"k2"}"#,
    );

    let page = client(&server)
        .get_folders("root", None, SortOptions::default())
        .await
        .unwrap();
    assert_eq!(page.folders.len(), 1);
    assert_eq!(page.folders[0].name, "Trips");
    assert_eq!(page.last_key.as_ref().map(Cursor::as_str), Some("k2"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].query(),
        "parentId=root&sortField=name&sortDirection=asc&limit=20"
    );
}

#[tokio::test]
async fn test_next_page_sends_cursor_and_sort() {
    let server = StubServer::start().await;
    server.on("GET", "/api/folders/f1/images", 200, r#"{"images":[],"lastKey":null}"#);

    let sort = SortOptions::new(SortField::CreatedAt, SortDirection::Desc);
    let page = client(&server)
        .get_images("f1", Some(&Cursor::new("abc")), sort)
        .await
        .unwrap();
    assert!(page.images.is_empty());
    assert!(page.last_key.is_none());

    let query = server.requests()[0].query().to_string();
    assert_eq!(query, "sortField=createdAt&sortDirection=desc&page=abc&limit=20");
}

#[tokio::test]
async fn test_error_message_from_body() {
    let server = StubServer::start().await;
    server.on("GET", "/api/folders", 500, r#"{"message":"Database unavailable"}"#);

    let err = client(&server)
        .get_folders("root", None, SortOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Database unavailable");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_error_message_fallback() {
    let server = StubServer::start().await;
    server.on("POST", "/api/folders", 400, "not json");

    let input = CreateFolderInput {
        name: "Trips".into(),
        parent_id: "root".into(),
    };
    let err = client(&server).create_folder(&input).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to create folder");
}

#[tokio::test]
async fn test_create_and_rename_folder_bodies() {
    let server = StubServer::start().await;
    server.on(
        "POST",
        "/api/folders",
        201,
        r#"{"id":"f9","name":"Trips","parentId":"root","createdAt":"2024-05-01T10:00:00Z"}"#,
    );
    server.on("PATCH", "/api/folders/f9", 200, r#"{"id":"f9","name":"Travel","parentId":"root"}"#);

    let api = client(&server);
    let input = CreateFolderInput {
        name: "Trips".into(),
        parent_id: "root".into(),
    };
    let created = api.create_folder(&input).await.unwrap();
    assert_eq!(created.id, "f9");
    assert!(created.created_at.is_some());

    let renamed = api.update_folder("f9", &FolderUpdate::rename("Travel")).await.unwrap();
    assert_eq!(renamed.name, "Travel");

    let requests = server.requests();
    assert_eq!(requests[0].json(), serde_json::json!({"name": "Trips", "parentId": "root"}));
    assert_eq!(requests[1].method, "PATCH");
    assert_eq!(requests[1].json(), serde_json::json!({"name": "Travel"}));
}

#[tokio::test]
async fn test_delete_folder() {
    let server = StubServer::start().await;
    server.on("DELETE", "/api/folders/f1", 204, "");
    server.on("DELETE", "/api/folders/f2", 404, r#"{"message":"Folder not found"}"#);

    let api = client(&server);
    api.delete_folder("f1").await.unwrap();
    let err = api.delete_folder("f2").await.unwrap_err();
    assert_eq!(err.to_string(), "Folder not found");
}

#[tokio::test]
async fn test_delete_image_passes_filename() {
    let server = StubServer::start().await;
    server.on("DELETE", "/api/folders/f1/images/i1", 204, "");

    client(&server).delete_image("f1", "i1", "uploads/k1.png").await.unwrap();
    assert_eq!(server.requests()[0].query(), "filename=uploads%2Fk1.png");
}

#[tokio::test]
async fn test_files_and_single_folder() {
    let server = StubServer::start().await;
    server.on("GET", "/api/files", 200, r#"{"files":[{"id":"a"},{"id":"b"}]}"#);
    server.on("GET", "/api/folders/f1", 200, r#"{"id":"f1","name":"Trips"}"#);

    let api = client(&server);
    let files = api.get_files("f1").await.unwrap();
    assert_eq!(files.files.len(), 2);
    assert_eq!(server.requests()[0].query(), "folderId=f1");

    let folder = api.get_folder("f1").await.unwrap();
    assert_eq!(folder.name, "Trips");
    assert_eq!(folder.parent_id, None);
}

#[tokio::test]
async fn test_upload_runs_three_steps_in_order() {
    let server = StubServer::start().await;
    server.on(
        "GET",
        "/api/folders/f1/images/upload",
        200,
        format!(
            r#"{{"uploadUrl":"{}","filename":"uploads/k1.png"}}"#,
            server.url("/storage/k1")
        ),
    );
    server.on("PUT", "/storage/k1", 200, "");
    server.on(
        "POST",
        "/api/folders/f1/images",
        201,
        r#"{"id":"i1","folderId":"f1","key":"uploads/k1.png","name":"cat.png","contentType":"image/png","size":3}"#,
    );

    let upload = ImageUpload::new("cat.png", "image/png", b"abc".to_vec());
    let image = client(&server).upload_image("f1", &upload).await.unwrap();
    assert_eq!(image.id, "i1");
    assert_eq!(image.key, "uploads/k1.png");

    let requests = server.requests();
    let methods: Vec<&str> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec!["GET", "PUT", "POST"]);

    assert_eq!(requests[0].query(), "filename=cat.png");

    assert_eq!(requests[1].path(), "/storage/k1");
    assert_eq!(requests[1].body, b"abc");
    assert_eq!(requests[1].content_type.as_deref(), Some("image/png"));

    assert_eq!(
        requests[2].json(),
        serde_json::json!({
            "key": "uploads/k1.png",
            "name": "cat.png",
            "contentType": "image/png",
            "size": 3
        })
    );
}

#[tokio::test]
async fn test_upload_stops_when_signed_url_fails() {
    let server = StubServer::start().await;
    server.on("GET", "/api/folders/f1/images/upload", 500, r#"{"message":"Storage offline"}"#);

    let upload = ImageUpload::new("cat.png", "image/png", b"abc".to_vec());
    let err = client(&server).upload_image("f1", &upload).await.unwrap_err();
    assert_eq!(err.to_string(), "Storage offline");
    assert_eq!(server.count("PUT"), 0);
    assert_eq!(server.count("POST"), 0);
}

#[tokio::test]
async fn test_upload_stops_when_storage_rejects() {
    let server = StubServer::start().await;
    server.on(
        "GET",
        "/api/folders/f1/images/upload",
        200,
        format!(r#"{{"uploadUrl":"{}","filename":"k1"}}"#, server.url("/storage/k1")),
    );
    server.on("PUT", "/storage/k1", 403, "<Error>denied</Error>");

    let upload = ImageUpload::new("cat.png", "image/png", b"abc".to_vec());
    let err = client(&server).upload_image("f1", &upload).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 403, .. }));
    assert_eq!(err.to_string(), "Failed to upload image to storage");
    assert_eq!(server.count("PUT"), 1);
    assert_eq!(server.count("POST"), 0);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let api = ApiClient::new("http://127.0.0.1:9/api", 20, Some(Duration::from_secs(2))).unwrap();
    let err = api.get_folders("root", None, SortOptions::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
