use std::{fmt::Display, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{ContentError, DataExtract, utils::sanitize_entities};

static ERROR_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<Error(?:\s[^>]*)?>.*?</Error\s*>").expect("error document pattern is valid")
});

/// The `<Error>` document an S3 compatible server answers with when it refuses a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorDocument {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub host_id: Option<String>,
}
impl ErrorDocument {
    /// Looks for an `<Error>` document anywhere inside the body.
    ///
    /// Returns `None` if there is none or it has no `Code`.
    pub fn find(body: &str) -> Option<Self> {
        let document = ERROR_DOCUMENT.find(body)?.as_str();
        let document = sanitize_entities(document);
        Self::extract_data(&mut document.as_bytes()).ok()
    }
}
impl DataExtract for ErrorDocument {
    fn extract_data<R: std::io::BufRead>(reader: &mut R) -> Result<Self, ContentError> {
        let error: ErrorDocument = quick_xml::de::from_reader(reader)?;
        Ok(error)
    }
}
impl Display for ErrorDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) if !message.is_empty() => write!(f, "{}: {}", self.code, message),
            _ => write!(f, "{}", self.code),
        }
    }
}
