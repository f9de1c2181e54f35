use crate::catalog::catalog_rows::CatalogRows;
use crate::error::CatalogError;
use crate::model::VideoName;
use async_trait::async_trait;
use bytes::Bytes;

/// HTTP side of the catalog. Implemented over reqwest natively and over
/// `fetch` in the browser, hence no `Send` bound.
#[async_trait(?Send)]
pub trait CatalogApi {
    /// Whatever the platform hands over as "the selected file".
    type Upload;

    async fn list(&self) -> Result<Vec<VideoName>, CatalogError>;

    async fn delete(&self, name: &VideoName) -> Result<(), CatalogError>;

    async fn upload(&self, file: Self::Upload) -> Result<(), CatalogError>;
}

/// Where the catalog gets drawn.
pub trait CatalogView {
    fn render(&self, rows: &CatalogRows);

    /// Clear the file selector after an upload attempt.
    fn reset_upload_input(&self);
}

/// In-memory file for native uploads.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub contents: Bytes,
}
