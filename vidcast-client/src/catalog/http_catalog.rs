use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{debug, info};
use vidcast_core::catalog::{CatalogApi, CatalogEndpoints, UPLOAD_FIELD, UploadFile};
use vidcast_core::{CatalogError, VideoName};

/// Catalog endpoints over reqwest.
#[derive(Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    endpoints: CatalogEndpoints,
}

impl HttpCatalog {
    pub fn new(server_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints: CatalogEndpoints::new(server_url),
        }
    }
}

fn check_status(resp: &reqwest::Response) -> Result<(), CatalogError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    Err(CatalogError::Status {
        status: status.as_u16(),
    })
}

#[async_trait(?Send)]
impl CatalogApi for HttpCatalog {
    type Upload = UploadFile;

    async fn list(&self) -> Result<Vec<VideoName>, CatalogError> {
        let resp = self
            .client
            .get(self.endpoints.list_url())
            .send()
            .await
            .map_err(CatalogError::transport)?;
        check_status(&resp)?;

        let names: Vec<VideoName> = resp.json().await.map_err(CatalogError::decode)?;
        debug!("Fetched {} video names", names.len());
        Ok(names)
    }

    async fn delete(&self, name: &VideoName) -> Result<(), CatalogError> {
        let resp = self
            .client
            .delete(self.endpoints.delete_url(name))
            .send()
            .await
            .map_err(CatalogError::transport)?;
        check_status(&resp)?;

        info!("Deleted video: {}", name);
        Ok(())
    }

    async fn upload(&self, file: UploadFile) -> Result<(), CatalogError> {
        let size = file.contents.len();
        let part = Part::bytes(file.contents.to_vec()).file_name(file.file_name.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);

        let resp = self
            .client
            .post(self.endpoints.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(CatalogError::transport)?;
        check_status(&resp)?;

        info!("Uploaded {} ({} bytes)", file.file_name, size);
        Ok(())
    }
}

/// Reads a file from disk into an [`UploadFile`] named after its basename.
pub async fn read_upload(path: &Path) -> Result<UploadFile> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .with_context(|| format!("{} has no usable file name", path.display()))?;

    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(UploadFile {
        file_name,
        contents: Bytes::from(contents),
    })
}
