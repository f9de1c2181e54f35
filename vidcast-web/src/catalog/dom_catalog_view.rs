use std::cell::RefCell;
use std::rc::Rc;
use vidcast_core::catalog::{CatalogAction, CatalogRows, CatalogView, RowTarget};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use crate::logger::Logger;

pub const VIDEO_LIST_ID: &str = "videoList";
pub const FILE_INPUT_ID: &str = "videoFileInput";

pub type ActionHandler = Rc<dyn Fn(CatalogAction)>;

/// Renders the catalog into `#videoList` as one `<li>` per video.
pub struct DomCatalogView {
    document: web_sys::Document,
    on_action: ActionHandler,
    /// Click handlers of the rows currently on screen.
    listeners: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>>,
}

impl DomCatalogView {
    pub fn new(document: web_sys::Document, on_action: ActionHandler) -> Self {
        Self {
            document,
            on_action,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn file_input(&self) -> Option<web_sys::HtmlInputElement> {
        self.document
            .get_element_by_id(FILE_INPUT_ID)?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()
    }

    fn click_handler(
        &self,
        rows: &CatalogRows,
        index: usize,
        target: RowTarget,
    ) -> Closure<dyn FnMut(web_sys::Event)> {
        let rows = rows.clone();
        let on_action = self.on_action.clone();
        Closure::wrap(Box::new(move |e: web_sys::Event| {
            if target.stops_propagation() {
                e.stop_propagation();
            }
            if let Some(action) = rows.on_click(index, target) {
                on_action(action);
            }
        }) as Box<dyn FnMut(web_sys::Event)>)
    }

    fn render_row(
        &self,
        list: &web_sys::Element,
        rows: &CatalogRows,
        index: usize,
    ) -> Result<(), JsValue> {
        let Some(name) = rows.names().get(index) else {
            return Ok(());
        };

        let li: web_sys::HtmlElement = self.document.create_element("li")?.dyn_into()?;

        let title = self.document.create_element("span")?;
        title.set_text_content(Some(name.as_str()));
        title.class_list().add_1("video-title")?;

        let delete_area = self.document.create_element("div")?;
        delete_area.class_list().add_1("delete-area")?;

        let delete_btn: web_sys::HtmlElement = self.document.create_element("button")?.dyn_into()?;
        delete_btn.set_inner_html("&times;");
        delete_btn.class_list().add_1("delete-btn")?;

        let on_row = self.click_handler(rows, index, RowTarget::Row);
        li.set_onclick(Some(on_row.as_ref().unchecked_ref()));
        let on_delete = self.click_handler(rows, index, RowTarget::DeleteControl);
        delete_btn.set_onclick(Some(on_delete.as_ref().unchecked_ref()));

        let mut listeners = self.listeners.borrow_mut();
        listeners.push(on_row);
        listeners.push(on_delete);

        delete_area.append_child(&delete_btn)?;
        li.append_child(&title)?;
        li.append_child(&delete_area)?;
        list.append_child(&li)?;
        Ok(())
    }
}

impl CatalogView for DomCatalogView {
    fn render(&self, rows: &CatalogRows) {
        let Some(list) = self.document.get_element_by_id(VIDEO_LIST_ID) else {
            Logger::warn(&format!("#{} not found", VIDEO_LIST_ID));
            return;
        };

        list.set_inner_html("");
        self.listeners.borrow_mut().clear();

        for index in 0..rows.len() {
            if let Err(e) = self.render_row(&list, rows, index) {
                Logger::error(&e);
            }
        }
    }

    fn reset_upload_input(&self) {
        if let Some(input) = self.file_input() {
            input.set_value("");
        }
    }
}
