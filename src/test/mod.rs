use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_test_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            // If no RUST_LOG is set a default for current instance
            unsafe {
                std::env::set_var("RUST_LOG", "info,s3viewer=trace");
            }
        }
        let writer = tracing_subscriber::fmt::layer()
            .without_time()
            .with_thread_ids(false)
            .with_thread_names(false)
            .pretty()
            .with_writer(std::io::stderr);
        let _ = tracing_subscriber::registry()
            .with(writer)
            .with(EnvFilter::from_default_env())
            .try_init();
    });
}
/// `key-0001`, `key-0002`, ...
pub fn numbered_keys(count: usize) -> Vec<String> {
    (1..=count).map(|index| format!("key-{index:04}")).collect()
}
/// Builds `ListBucketResult` bodies the way real servers write them, bare `&` included.
#[derive(Debug, Clone, Default)]
pub struct PageFixture {
    keys: Vec<String>,
    is_truncated: bool,
    next_marker: Option<String>,
    continuation_token: Option<String>,
}
impl PageFixture {
    pub fn keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
    pub fn truncated(mut self) -> Self {
        self.is_truncated = true;
        self
    }
    pub fn next_marker(mut self, marker: impl Into<String>) -> Self {
        self.next_marker = Some(marker.into());
        self
    }
    pub fn continuation_token(mut self, token: impl Into<String>) -> Self {
        self.continuation_token = Some(token.into());
        self
    }
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
<Name>example-bucket</Name><Prefix></Prefix><Marker></Marker>"#,
        );
        if let Some(marker) = &self.next_marker {
            xml.push_str(&format!("<NextMarker>{marker}</NextMarker>"));
        }
        if let Some(token) = &self.continuation_token {
            xml.push_str(&format!("<NextContinuationToken>{token}</NextContinuationToken>"));
        }
        xml.push_str(&format!(
            "<MaxKeys>{}</MaxKeys><IsTruncated>{}</IsTruncated>",
            self.keys.len().max(1),
            self.is_truncated
        ));
        for (index, key) in self.keys.iter().enumerate() {
            xml.push_str(&format!(
                "<Contents><Key>{key}</Key><LastModified>2024-01-01T00:00:00.000Z</LastModified><Size>{index}</Size><StorageClass>STANDARD</StorageClass></Contents>"
            ));
        }
        xml.push_str("</ListBucketResult>");
        xml
    }
}

mod tests {
    use crate::test::init_test_logger;

    #[test]
    fn test_init_logger() {
        init_test_logger();
        tracing::info!("Logger initialized for tests");
    }
}
