use std::sync::LazyLock;

use quick_xml::{Reader, events::Event};
use regex::Regex;

use crate::{
    ContentError, DataExtract, error::ErrorDocument, list::bucket_result::ListBucketResult,
    utils::sanitize_entities,
};

static LISTING_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<ListBucketResult(?:\s[^>]*)?>.*?</ListBucketResult\s*>")
        .expect("listing document pattern is valid")
});

/// Finds the first `<ListBucketResult>` element and everything up to its closing tag.
///
/// The body may be the bare document, or the document pasted into an HTML page.
///
/// # Errors
/// [ContentError::NotFound] when there is no listing. If the body holds an S3 `<Error>`
/// document instead it is attached.
pub fn find_listing_document(body: &str) -> Result<&str, ContentError> {
    match LISTING_DOCUMENT.find(body) {
        Some(document) => Ok(document.as_str()),
        None => Err(ContentError::NotFound {
            error: ErrorDocument::find(body),
        }),
    }
}

/// Extract, sanitize and decode.
///
/// Object keys are taken verbatim from the document. The serde pass trims text and
/// leading or trailing spaces are legal in a key.
pub fn decode_listing(body: &str) -> Result<ListBucketResult, ContentError> {
    let document = find_listing_document(body)?;
    let document = sanitize_entities(document);
    let mut page = ListBucketResult::extract_data(&mut document.as_bytes())?;
    let keys = verbatim_keys(&document)?;
    if keys.len() == page.contents.len() {
        for (object, key) in page.contents.iter_mut().zip(keys) {
            object.key = key;
        }
    }
    Ok(page)
}

/// Text of the `Key` of every `<Contents>` in document order, untrimmed. One value per
/// `<Contents>`, empty if it has no key.
fn verbatim_keys(document: &str) -> Result<Vec<String>, ContentError> {
    let mut reader = Reader::from_str(document);
    let mut depth = 0usize;
    let mut contents_key: Option<String> = None;
    let mut in_key = false;
    let mut keys = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                depth += 1;
                match (depth, start.local_name().as_ref()) {
                    (2, b"Contents") => contents_key = Some(String::new()),
                    (3, b"Key") => in_key = contents_key.is_some(),
                    _ => {}
                }
            }
            Event::Empty(start) => {
                if depth == 1 && start.local_name().as_ref() == b"Contents" {
                    keys.push(String::new());
                }
            }
            Event::Text(text) if in_key => {
                if let Some(key) = contents_key.as_mut() {
                    key.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) if in_key => {
                if let Some(key) = contents_key.as_mut() {
                    key.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                match depth {
                    3 => in_key = false,
                    2 => keys.extend(contents_key.take()),
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(keys)
}

impl DataExtract for ListBucketResult {
    fn extract_data<R: std::io::BufRead>(reader: &mut R) -> Result<Self, ContentError> {
        let result: ListBucketResult = quick_xml::de::from_reader(reader)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListingResult;

    const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
    <Name>example-bucket</Name>
    <Prefix/>
    <Marker/>
    <MaxKeys>1000</MaxKeys>
    <IsTruncated>false</IsTruncated>
    <Contents>
        <Key>test-file1.txt</Key>
        <LastModified>2023-05-22T08:49:07.000Z</LastModified>
        <ETag>"f19cd76cd7fac68d15f0c40a063519c9"</ETag>
        <Size>1234</Size>
        <Owner>
            <DisplayName>owner</DisplayName>
            <ID>owner-id</ID>
        </Owner>
        <StorageClass>STANDARD</StorageClass>
    </Contents>
</ListBucketResult>"#;

    const SPECIAL_XML: &str = r#"<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
    <Name>example-bucket</Name>
    <MaxKeys>1000</MaxKeys>
    <IsTruncated>false</IsTruncated>
    <Contents>
        <Key>test-file1.txt</Key>
        <LastModified>2023-05-22T08:49:07.000Z</LastModified>
        <Size>1234</Size>
    </Contents>
    <Contents>
        <Key>004-快速部署指南&安装手册/网康_日志中心 R4.4_x64_安装手册.docx</Key>
        <LastModified>2023-05-22T08:49:07.000Z</LastModified>
        <Size>4321</Size>
    </Contents>
    <Contents>
        <Key>already&amp;escaped.txt</Key>
        <LastModified>2023-05-22T08:49:07.000Z</LastModified>
        <Size>1</Size>
    </Contents>
</ListBucketResult>"#;

    const V2_XML: &str = r#"<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
    <Name>example-bucket</Name>
    <Prefix>photos/</Prefix>
    <KeyCount>2</KeyCount>
    <MaxKeys>2</MaxKeys>
    <IsTruncated>true</IsTruncated>
    <NextContinuationToken>1ueGcxLPRx1Tr</NextContinuationToken>
    <Contents>
        <Key>photos/a.jpg</Key>
        <LastModified>2023-05-22T08:49:07.000Z</LastModified>
        <Size>10</Size>
    </Contents>
    <Contents>
        <Key>photos/b.jpg</Key>
        <LastModified>2023-05-23T08:49:07.000Z</LastModified>
        <Size>20</Size>
    </Contents>
</ListBucketResult>"#;

    #[test]
    fn finds_bare_document() {
        let document = find_listing_document(SAMPLE_XML).unwrap();
        assert!(document.starts_with("<ListBucketResult xmlns="));
        assert!(document.ends_with("</ListBucketResult>"));
    }

    #[test]
    fn finds_document_inside_html() {
        let body = format!(
            "<html>\n<head><title>Index</title></head>\n<body>\n<pre>{SAMPLE_XML}</pre>\n<footer>ListBucketResult</footer></body>\n</html>"
        );
        let document = find_listing_document(&body).unwrap();
        let start = body.find("<ListBucketResult").unwrap();
        let end = body.find("</ListBucketResult>").unwrap() + "</ListBucketResult>".len();
        assert_eq!(document, &body[start..end]);
    }

    #[test]
    fn other_root_is_not_found() {
        let err = find_listing_document("<html><body>It works!</body></html>").unwrap_err();
        assert!(err.is_not_found());

        let err = find_listing_document("<ListAllMyBucketsResult></ListAllMyBucketsResult>")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn not_found_carries_error_document() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>"#;
        match find_listing_document(body) {
            Err(ContentError::NotFound { error: Some(error) }) => {
                assert_eq!(error.code, "AccessDenied")
            }
            other => panic!("Expected NotFound with an error document, got {other:?}"),
        }
    }

    #[test]
    fn decodes_v1_listing() {
        let page = decode_listing(SAMPLE_XML).unwrap();
        assert_eq!(page.name.as_deref(), Some("example-bucket"));
        assert_eq!(page.max_keys, Some(1000));
        assert!(!page.is_truncated);
        assert_eq!(page.contents.len(), 1);
        let object = &page.contents[0];
        assert_eq!(object.key, "test-file1.txt");
        assert_eq!(object.size, 1234);
        assert_eq!(object.last_modified, "2023-05-22T08:49:07.000Z");
        assert_eq!(object.storage_class.as_deref(), Some("STANDARD"));
    }

    #[test]
    fn decodes_v2_listing() {
        let result = ListingResult::from_body("http://bucket.example.com/", V2_XML).unwrap();
        assert_eq!(result.prefix, "photos/");
        assert_eq!(result.next_continuation_token, "1ueGcxLPRx1Tr");
        assert!(result.next_marker.is_empty());
        assert!(result.is_truncated);
        assert_eq!(result.last_key(), Some("photos/b.jpg"));
    }

    #[test]
    fn decodes_keys_with_bare_ampersands() {
        let result = ListingResult::from_body("http://bucket.example.com/", SPECIAL_XML).unwrap();
        let keys: Vec<_> = result.entries.iter().map(|entry| entry.key.as_str()).collect();
        assert_eq!(
            keys,
            [
                "test-file1.txt",
                "004-快速部署指南&安装手册/网康_日志中心 R4.4_x64_安装手册.docx",
                "already&escaped.txt",
            ]
        );
    }

    #[test]
    fn decoding_is_deterministic() {
        let first = ListingResult::from_body("http://bucket.example.com/", SPECIAL_XML).unwrap();
        let second = ListingResult::from_body("http://bucket.example.com/", SPECIAL_XML).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn structural_damage_is_a_decode_error() {
        let body = "<ListBucketResult><IsTruncated>false</IsTruncated><Contents><Key>a</Contents></ListBucketResult>";
        let err = decode_listing(body).unwrap_err();
        assert!(matches!(err, ContentError::Decode(_)), "{err:?}");
    }

    fn single_object(contents: &str) -> String {
        format!(
            "<ListBucketResult><IsTruncated>false</IsTruncated><Contents>{contents}</Contents></ListBucketResult>"
        )
    }

    #[test]
    fn keys_keep_surrounding_whitespace() {
        let body = r#"<ListBucketResult><IsTruncated>false</IsTruncated>
    <Contents><Key> spaced.txt </Key><Size>1</Size></Contents>
    <Contents><Key>   </Key><Size>2</Size></Contents>
    <Contents><Key>a &amp; b
</Key><Size>3</Size></Contents>
    <Contents><Key>plain.txt</Key><Size>4</Size></Contents>
</ListBucketResult>"#;
        let result = ListingResult::from_body("http://bucket.example.com/", body).unwrap();
        let keys: Vec<_> = result.entries.iter().map(|entry| entry.key.as_str()).collect();
        assert_eq!(keys, [" spaced.txt ", "   ", "a & b\n", "plain.txt"]);
    }

    #[test]
    fn keys_stay_aligned_with_keyless_contents() {
        let body = "<ListBucketResult><Contents><Size>1</Size></Contents>\
<Contents><Key> b </Key></Contents></ListBucketResult>";
        let page = decode_listing(body).unwrap();
        let keys: Vec<_> = page.contents.iter().map(|object| object.key.as_str()).collect();
        assert_eq!(keys, ["", " b "]);
    }

    #[test]
    fn odd_sizes_are_lenient() {
        let cases = [
            ("<Size></Size>", 0),
            ("<Size/>", 0),
            ("<Size>-1</Size>", 0),
            ("<Size> 42 </Size>", 42),
            ("", 0),
        ];
        for (size, expected) in cases {
            let body = single_object(&format!("<Key>a</Key>{size}"));
            let page = decode_listing(&body).unwrap();
            assert_eq!(page.contents[0].size, expected, "size: {size:?}");
        }
    }

    #[test]
    fn non_numeric_size_is_a_decode_error() {
        let body = single_object("<Key>a</Key><Size>big</Size>");
        let err = decode_listing(&body).unwrap_err();
        assert!(matches!(err, ContentError::Decode(_)), "{err:?}");
    }

    #[test]
    fn is_truncated_is_case_insensitive() {
        let cases = [
            ("True", true),
            ("TRUE", true),
            ("1", true),
            ("t", true),
            ("False", false),
            ("0", false),
            ("", false),
        ];
        for (value, expected) in cases {
            let body = format!(
                "<ListBucketResult><IsTruncated>{value}</IsTruncated><Contents><Key>a</Key></Contents></ListBucketResult>"
            );
            let page = decode_listing(&body).unwrap();
            assert_eq!(page.is_truncated, expected, "IsTruncated: {value:?}");
        }
    }

    #[test]
    fn missing_key_is_rejected() {
        let body = "<ListBucketResult><IsTruncated>false</IsTruncated><Contents><Size>1</Size></Contents></ListBucketResult>";
        let err = ListingResult::from_body("http://bucket.example.com/", body).unwrap_err();
        assert!(matches!(err, ContentError::EmptyKey { index: 0 }));
    }
}
