use serde::{Deserialize, Deserializer, Serialize, de::Error};

/// A `<Contents>` element.
///
/// Everything defaults so a server that leaves out `Size` or `LastModified` still decodes.
/// A missing `Key` decodes to an empty string and is rejected by
/// [ListingResult::from_page](super::ListingResult::from_page).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Object {
    pub key: String,
    pub last_modified: String,
    pub e_tag: Option<String>,
    pub storage_class: Option<String>,
    #[serde(deserialize_with = "lenient_size")]
    pub size: u64,
}

/// `<Size></Size>` is 0. A negative size is clamped to 0 rather than failing the page.
fn lenient_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    let value = value.as_deref().map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Ok(0);
    }
    if let Ok(size) = value.parse::<u64>() {
        return Ok(size);
    }
    match value.parse::<i64>() {
        Ok(_) => Ok(0),
        Err(_) => Err(D::Error::custom(format!("invalid object size {value:?}"))),
    }
}
