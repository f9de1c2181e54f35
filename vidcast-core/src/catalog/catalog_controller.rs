use crate::catalog::catalog_api::{CatalogApi, CatalogView};
use crate::catalog::catalog_rows::CatalogRows;
use crate::error::CatalogError;
use crate::model::VideoName;

/// List/delete/upload flow of the catalog panel.
///
/// Errors are returned for the caller to log; the view is only touched
/// after a successful listing, so a failure leaves it as it was.
pub struct CatalogController<A, V> {
    api: A,
    view: V,
}

impl<A, V> CatalogController<A, V>
where
    A: CatalogApi,
    V: CatalogView,
{
    pub fn new(api: A, view: V) -> Self {
        Self { api, view }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub async fn list_videos(&self) -> Result<CatalogRows, CatalogError> {
        let names = self.api.list().await?;
        let rows = CatalogRows::new(names);
        self.view.render(&rows);
        Ok(rows)
    }

    /// A failed refresh after a successful delete is reported as
    /// [`CatalogError::Refresh`].
    pub async fn delete_video(&self, name: &VideoName) -> Result<CatalogRows, CatalogError> {
        self.api.delete(name).await?;
        self.refresh().await
    }

    /// `None` means no file was selected; nothing is sent.
    pub async fn upload_video(
        &self,
        file: Option<A::Upload>,
    ) -> Result<Option<CatalogRows>, CatalogError> {
        let Some(file) = file else {
            return Ok(None);
        };

        let res = self.api.upload(file).await;
        self.view.reset_upload_input();
        res?;

        self.refresh().await.map(Some)
    }

    async fn refresh(&self) -> Result<CatalogRows, CatalogError> {
        self.list_videos()
            .await
            .map_err(|e| CatalogError::Refresh(Box::new(e)))
    }
}
