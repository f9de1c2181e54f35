use async_trait::async_trait;
use vidcast_core::catalog::{CatalogApi, CatalogEndpoints, UPLOAD_FIELD};
use vidcast_core::{CatalogError, VideoName};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

fn js_err(err: JsValue) -> CatalogError {
    CatalogError::Transport(format!("{:?}", err))
}

/// Catalog endpoints over the browser `fetch` API.
pub struct FetchCatalog {
    endpoints: CatalogEndpoints,
}

impl FetchCatalog {
    pub fn new(server_url: &str) -> Self {
        Self {
            endpoints: CatalogEndpoints::new(server_url),
        }
    }

    async fn fetch(
        &self,
        url: &str,
        init: Option<&web_sys::RequestInit>,
    ) -> Result<web_sys::Response, CatalogError> {
        let window = web_sys::window().ok_or_else(|| CatalogError::transport("no window"))?;
        let promise = match init {
            Some(init) => window.fetch_with_str_and_init(url, init),
            None => window.fetch_with_str(url),
        };

        let response: web_sys::Response = JsFuture::from(promise)
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;

        if !response.ok() {
            return Err(CatalogError::Status {
                status: response.status(),
            });
        }
        Ok(response)
    }
}

#[async_trait(?Send)]
impl CatalogApi for FetchCatalog {
    type Upload = web_sys::File;

    async fn list(&self) -> Result<Vec<VideoName>, CatalogError> {
        let response = self.fetch(&self.endpoints.list_url(), None).await?;
        let body = JsFuture::from(response.json().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        serde_wasm_bindgen::from_value(body).map_err(CatalogError::decode)
    }

    async fn delete(&self, name: &VideoName) -> Result<(), CatalogError> {
        let init = web_sys::RequestInit::new();
        init.set_method("DELETE");
        self.fetch(&self.endpoints.delete_url(name), Some(&init))
            .await?;
        Ok(())
    }

    async fn upload(&self, file: web_sys::File) -> Result<(), CatalogError> {
        let form = web_sys::FormData::new().map_err(js_err)?;
        form.append_with_blob(UPLOAD_FIELD, &file).map_err(js_err)?;

        let init = web_sys::RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);
        self.fetch(&self.endpoints.upload_url(), Some(&init))
            .await?;
        Ok(())
    }
}
