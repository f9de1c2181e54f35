use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a stored video file, unique within the catalog.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct VideoName(pub String);

impl VideoName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VideoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for VideoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for VideoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
