use crate::model::VideoName;

pub const VIDEO_LIST_PATH: &str = "/video-list";
pub const DELETE_PATH: &str = "/delete";
pub const UPLOAD_PATH: &str = "/upload";
/// Multipart field the server reads the uploaded file from.
pub const UPLOAD_FIELD: &str = "video";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    base: String,
}

impl CatalogEndpoints {
    pub fn new(server_url: &str) -> Self {
        Self {
            base: server_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn list_url(&self) -> String {
        format!("{}{}", self.base, VIDEO_LIST_PATH)
    }

    pub fn delete_url(&self, name: &VideoName) -> String {
        format!(
            "{}{}?video={}",
            self.base,
            DELETE_PATH,
            urlencoding::encode(name.as_str())
        )
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base, UPLOAD_PATH)
    }
}
