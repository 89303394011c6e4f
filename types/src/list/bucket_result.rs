use serde::{Deserialize, Deserializer, Serialize};

use crate::list::object::Object;

/// A `<ListBucketResult>` document.
///
/// ListObjects (v1) and ListObjectsV2 share the root element, so both schemas decode
/// into this one type. Which pagination fields are present tells them apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListBucketResult {
    /// Bucket Name
    pub name: Option<String>,
    pub prefix: Option<String>,
    /// v1 only
    pub marker: Option<String>,
    /// v1 only. Only sent when a delimiter was requested, and some servers never send it.
    pub next_marker: Option<String>,
    /// v2 only
    pub continuation_token: Option<String>,
    /// v2 only
    pub next_continuation_token: Option<String>,
    pub start_after: Option<String>,
    /// Number of keys returned in the response (v2 only)
    #[serde(deserialize_with = "lenient_count")]
    pub key_count: Option<u64>,
    /// Maximum number of keys returned in the response
    #[serde(deserialize_with = "lenient_count")]
    pub max_keys: Option<u64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_truncated: bool,
    pub contents: Vec<Object>,
}

/// `<MaxKeys/>` and `<KeyCount></KeyCount>` show up in the wild. Informational only, so they
/// become `None` instead of failing the page.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.trim().parse().ok()))
}

/// Accepts `true`, `1` and `t` in any case. Anything else, including an empty element,
/// is `false` so an odd value ends pagination instead of the whole page.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.is_some_and(|value| {
        matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "t")
    }))
}
