use std::cell::RefCell;
use std::rc::{Rc, Weak};
use vidcast_core::catalog::{CatalogAction, CatalogController};
use vidcast_core::config::{DEFAULT_STUN_ADDR, signaling_url_for};
use vidcast_core::{CatalogError, TrackId, VideoName};
use wasm_bindgen::prelude::*;

use crate::catalog::{DomCatalogView, FetchCatalog};
use crate::engine::{Engine, EngineConfig};
use crate::logger::Logger;

type Catalog = CatalogController<FetchCatalog, DomCatalogView>;

/// The control panel: catalog list plus one playback session.
///
/// ```js
/// const page = new VidcastPage("http://localhost:8080");
/// page.init();
/// ```
#[wasm_bindgen]
pub struct VidcastPage {
    config: EngineConfig,
    engine: Rc<RefCell<Option<Engine>>>,
    catalog: Rc<Catalog>,
}

#[wasm_bindgen]
impl VidcastPage {
    /// `signaling_url` defaults to `ws(s)://<server host>/websocket`.
    #[wasm_bindgen(constructor)]
    pub fn new(server_url: String, signaling_url: Option<String>) -> Result<VidcastPage, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let config = EngineConfig {
            signaling_url: signaling_url.unwrap_or_else(|| signaling_url_for(&server_url)),
            ice_servers: vec![DEFAULT_STUN_ADDR.to_string()],
        };
        let engine: Rc<RefCell<Option<Engine>>> = Rc::new(RefCell::new(None));

        let catalog = Rc::new_cyclic(|weak: &Weak<Catalog>| {
            let weak = weak.clone();
            let engine = engine.clone();
            let on_action = Rc::new(move |action: CatalogAction| match action {
                CatalogAction::Play(name) => match engine.borrow().as_ref() {
                    Some(engine) => engine.start_video_stream(name),
                    None => Logger::warn("Page is not initialised"),
                },
                CatalogAction::Delete(name) => {
                    if let Some(catalog) = weak.upgrade() {
                        spawn_delete(catalog, name);
                    }
                }
            });
            CatalogController::new(
                FetchCatalog::new(&server_url),
                DomCatalogView::new(document, on_action),
            )
        });

        Ok(VidcastPage {
            config,
            engine,
            catalog,
        })
    }

    /// Replaces the STUN/TURN URLs used by the next `init`.
    #[wasm_bindgen(js_name = setIceServers)]
    pub fn set_ice_servers(&mut self, urls: Vec<String>) {
        self.config.ice_servers = urls;
    }

    /// Opens the signalling socket and peer connection, then loads the
    /// catalog.
    pub fn init(&self) -> Result<(), JsValue> {
        if self.engine.borrow().is_some() {
            Logger::warn("Page already initialised");
            return Ok(());
        }
        let engine = Engine::new(self.config.clone())?;
        *self.engine.borrow_mut() = Some(engine);
        self.list_videos();
        Ok(())
    }

    pub fn dispose(&self) {
        if let Some(engine) = self.engine.borrow_mut().take() {
            engine.dispose();
        }
    }

    #[wasm_bindgen(js_name = startVideoStream)]
    pub fn start_video_stream(&self, video: String) {
        match self.engine.borrow().as_ref() {
            Some(engine) => engine.start_video_stream(VideoName::from(video)),
            None => Logger::warn("Page is not initialised"),
        }
    }

    #[wasm_bindgen(js_name = removeVideoByTrackID)]
    pub fn remove_video_by_track_id(&self, track_id: String) {
        match self.engine.borrow().as_ref() {
            Some(engine) => engine.remove_video_by_track_id(TrackId::from(track_id)),
            None => Logger::warn("Page is not initialised"),
        }
    }

    #[wasm_bindgen(js_name = listVideos)]
    pub fn list_videos(&self) {
        let catalog = self.catalog.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = catalog.list_videos().await {
                Logger::warn(&format!("Error fetching video list: {}", e));
            }
        });
    }

    #[wasm_bindgen(js_name = deleteVideo)]
    pub fn delete_video(&self, video: String) {
        spawn_delete(self.catalog.clone(), VideoName::from(video));
    }

    /// Uploads the file picked in `#videoFileInput`, if any.
    #[wasm_bindgen(js_name = uploadVideoFile)]
    pub fn upload_video_file(&self) {
        let catalog = self.catalog.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let file = catalog
                .view()
                .file_input()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));

            match catalog.upload_video(file).await {
                Ok(Some(_)) => Logger::info("Upload finished"),
                Ok(None) => {}
                Err(CatalogError::Refresh(e)) => {
                    Logger::info("Upload finished");
                    Logger::warn(&format!("Error fetching video list: {}", e));
                }
                Err(e) => Logger::warn(&format!("Error uploading video: {}", e)),
            }
        });
    }

    #[wasm_bindgen(js_name = openFileSelector)]
    pub fn open_file_selector(&self) {
        match self.catalog.view().file_input() {
            Some(input) => input.click(),
            None => Logger::warn("File input not found"),
        }
    }
}

fn spawn_delete(catalog: Rc<Catalog>, name: VideoName) {
    wasm_bindgen_futures::spawn_local(async move {
        match catalog.delete_video(&name).await {
            Ok(_) => Logger::info(&format!("Deleted video: {}", name)),
            Err(CatalogError::Refresh(e)) => {
                Logger::info(&format!("Deleted video: {}", name));
                Logger::warn(&format!("Error fetching video list: {}", e));
            }
            Err(e) => Logger::warn(&format!("Failed to delete video {}: {}", name, e)),
        }
    });
}
