use bytes::Bytes;
use vidcast_client::HttpCatalog;
use vidcast_core::catalog::{CatalogController, UploadFile};

use crate::integration::{RecordingView, init_tracing};
use crate::utils::MockServer;

fn clip() -> UploadFile {
    UploadFile {
        file_name: "clip.mp4".to_string(),
        contents: Bytes::from(vec![7u8; 4096]),
    }
}

#[tokio::test]
async fn test_upload_refreshes_once() {
    init_tracing();
    let server = MockServer::start(&["old.mp4"]).await;
    let controller = CatalogController::new(HttpCatalog::new(&server.url()), RecordingView::default());

    let rows = controller
        .upload_video(Some(clip()))
        .await
        .expect("Failed to upload")
        .expect("Upload was skipped");

    assert_eq!(rows.len(), 2);
    assert_eq!(server.uploads().await, vec![("clip.mp4".to_string(), 4096)]);
    assert_eq!(server.list_hits(), 1);
    assert_eq!(*controller.view().resets.borrow(), 1);
}

#[tokio::test]
async fn test_failed_upload_resets_input_without_refresh() {
    init_tracing();
    let server = MockServer::start(&["old.mp4"]).await;
    server.fail_uploads();
    let controller = CatalogController::new(HttpCatalog::new(&server.url()), RecordingView::default());

    let res = controller.upload_video(Some(clip())).await;

    assert!(res.is_err());
    assert_eq!(server.list_hits(), 0);
    assert!(controller.view().renders.borrow().is_empty());
    assert_eq!(*controller.view().resets.borrow(), 1);
}
