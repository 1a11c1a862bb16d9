mod common;

use std::time::Duration;

use common::StubServer;
use tokio::sync::mpsc;

use folio_tui::headless;
use folio_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use folio_tui::{AppActor, ApiClient, NetworkActor, Route, SortOptions};

struct Harness {
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: mpsc::UnboundedReceiver<RenderState>,
}

fn spawn_actors(server: &StubServer) -> Harness {
    let client = ApiClient::new(&server.base_url(), 2, None).unwrap();

    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, render_rx) = mpsc::unbounded_channel::<RenderState>();

    tokio::spawn(NetworkActor::new(client, net_resp_tx).run(net_cmd_rx));
    tokio::spawn(AppActor::new(SortOptions::default(), net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

    Harness { ui_tx, render_rx }
}

async fn wait_until(
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
    done: impl Fn(&RenderState) -> bool,
) -> RenderState {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let state = render_rx.recv().await.unwrap();
            if done(&state) {
                return state;
            }
        }
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_headless_lists_folder_with_fallback_name() {
    let server = StubServer::start().await;
    server.on(
        "GET",
        "/api/folders",
        200,
        r#"{"folders":[{"id":"f2","name":"2024","parentId":"f1"}],"lastKey":null}"#,
    );
    server.on(
        "GET",
        "/api/folders/f1/images",
        200,
        r#"{"images":[{"id":"i1","folderId":"f1","key":"k1","name":"beach.jpg","contentType":"image/jpeg","size":2048}]}"#,
    );
    server.on("GET", "/api/folders/f1", 500, r#"{"message":"boom"}"#);

    let Harness { ui_tx, mut render_rx } = spawn_actors(&server);
    let mut out = Vec::new();
    let ok = headless::run(Route::Folder("f1".into()), ui_tx, &mut render_rx, &mut out)
        .await
        .unwrap();
    assert!(ok);

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("root / root (f1)\n"), "{}", text);
    assert!(text.contains("folders (1):\n  f2  2024\n"));
    assert!(text.contains("images (1):\n  i1  beach.jpg  image/jpeg  2.0 KB\n"));
}

#[tokio::test]
async fn test_headless_reports_listing_failure() {
    let server = StubServer::start().await;
    server.on("GET", "/api/folders", 500, r#"{"message":"Database unavailable"}"#);
    server.on("GET", "/api/folders/root/images", 200, r#"{"images":[]}"#);

    let Harness { ui_tx, mut render_rx } = spawn_actors(&server);
    let mut out = Vec::new();
    let ok = headless::run(Route::Root, ui_tx, &mut render_rx, &mut out).await.unwrap();
    assert!(!ok);
    assert!(String::from_utf8(out).unwrap().contains("error: Database unavailable"));
}

#[tokio::test]
async fn test_create_folder_through_modal() {
    let server = StubServer::start().await;
    server.on("GET", "/api/folders", 200, r#"{"folders":[],"lastKey":null}"#);
    server.on("GET", "/api/folders/root/images", 200, r#"{"images":[]}"#);
    server.on("POST", "/api/folders", 201, r#"{"id":"f9","name":"Trips","parentId":"root"}"#);

    let Harness { ui_tx, mut render_rx } = spawn_actors(&server);
    ui_tx.send(UiEvent::Navigate(Route::Root)).unwrap();
    wait_until(&mut render_rx, RenderState::is_settled).await;

    ui_tx.send(UiEvent::NewFolder).unwrap();
    for c in "Trips".chars() {
        ui_tx.send(UiEvent::PromptChar(c)).unwrap();
    }
    ui_tx.send(UiEvent::Submit).unwrap();

    let state = wait_until(&mut render_rx, |s| !s.folders.items.is_empty()).await;
    assert_eq!(state.folders.items[0].id, "f9");
    assert!(state.modal.is_none());

    let post = server.requests().into_iter().find(|r| r.method == "POST").unwrap();
    assert_eq!(post.json(), serde_json::json!({"name": "Trips", "parentId": "root"}));
}

#[tokio::test]
async fn test_load_more_sends_cursor() {
    let server = StubServer::start().await;
    server.on(
        "GET",
        "/api/folders",
        200,
        r#"{"folders":[{"id":"a","name":"A"},{"id":"b","name":"B"}],"lastKey":"b"}"#,
    );
    server.on("GET", "/api/folders/root/images", 200, r#"{"images":[]}"#);

    let Harness { ui_tx, mut render_rx } = spawn_actors(&server);
    ui_tx.send(UiEvent::Navigate(Route::Root)).unwrap();
    let state = wait_until(&mut render_rx, RenderState::is_settled).await;
    assert!(state.folders.has_more);

    ui_tx.send(UiEvent::LoadMore).unwrap();
    wait_until(&mut render_rx, |s| s.folders.items.len() == 4).await;

    let pages: Vec<String> = server
        .requests()
        .into_iter()
        .filter(|r| r.path() == "/api/folders")
        .map(|r| r.query().to_string())
        .collect();
    assert_eq!(pages.len(), 2);
    assert!(!pages[0].contains("page="));
    assert!(pages[1].contains("page=b"));
    assert!(pages[1].ends_with("limit=2"));
}
