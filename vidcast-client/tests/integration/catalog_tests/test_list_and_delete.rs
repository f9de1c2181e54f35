use vidcast_client::HttpCatalog;
use vidcast_core::catalog::{CatalogApi, CatalogController};
use vidcast_core::{CatalogError, VideoName};

use crate::integration::{RecordingView, init_tracing};
use crate::utils::MockServer;

#[tokio::test]
async fn test_list_keeps_server_order() {
    init_tracing();
    let server = MockServer::start(&["zebra.mp4", "alpha.mp4", "mid.mkv"]).await;
    let controller = CatalogController::new(HttpCatalog::new(&server.url()), RecordingView::default());

    let rows = controller.list_videos().await.expect("Failed to list videos");

    assert_eq!(
        rows.names(),
        &[
            VideoName::from("zebra.mp4"),
            VideoName::from("alpha.mp4"),
            VideoName::from("mid.mkv"),
        ]
    );
    assert_eq!(
        *controller.view().renders.borrow(),
        vec![vec!["zebra.mp4", "alpha.mp4", "mid.mkv"]]
    );
}

#[tokio::test]
async fn test_delete_encodes_name_and_refreshes() {
    init_tracing();
    let server = MockServer::start(&["keep.mp4", "my clip & more.mp4"]).await;
    let controller = CatalogController::new(HttpCatalog::new(&server.url()), RecordingView::default());

    let rows = controller
        .delete_video(&VideoName::from("my clip & more.mp4"))
        .await
        .expect("Failed to delete video");

    assert_eq!(rows.names(), &[VideoName::from("keep.mp4")]);
    assert_eq!(server.videos().await, vec!["keep.mp4"]);
    assert_eq!(server.list_hits(), 1);
}

#[tokio::test]
async fn test_failed_delete_does_not_refresh() {
    init_tracing();
    let server = MockServer::start(&["keep.mp4"]).await;
    let controller = CatalogController::new(HttpCatalog::new(&server.url()), RecordingView::default());

    let err = controller
        .delete_video(&VideoName::from("missing.mp4"))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Status { status: 400 }));
    assert_eq!(server.list_hits(), 0);
    assert!(controller.view().renders.borrow().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    init_tracing();
    let catalog = HttpCatalog::new("http://127.0.0.1:1");

    let err = catalog.list().await.unwrap_err();

    assert!(matches!(err, CatalogError::Transport(_)));
}
