use wasm_bindgen::JsValue;
use web_sys::console;

const TAG: &str = "[vidcast]";

/// Tagged console logging, one console level per method.
pub struct Logger;

impl Logger {
    pub fn info(msg: &str) {
        console::log_1(&format!("{} {}", TAG, msg).into());
    }

    pub fn warn(msg: &str) {
        console::warn_1(&format!("{} {}", TAG, msg).into());
    }

    pub fn error(err: &JsValue) {
        console::error_2(&TAG.into(), err);
    }

    pub fn debug(msg: &str) {
        console::debug_1(&format!("{} {}", TAG, msg).into());
    }
}
