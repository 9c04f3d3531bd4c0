//! Body draining and formatting for recorded calls.
//!
//! The recorder has to look at every body twice: once to write it into the
//! documentation record, and once so the caller (or the transport) still sees
//! an unconsumed body. Response bodies are buffered whole and teed into two
//! independent [`Bytes`] handles. Buffered request bodies can be observed in
//! place without consuming them, so sending the request afterwards still
//! works; streaming request bodies cannot be observed without eating them and
//! are recorded as empty.

use std::fmt::Write;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use indexmap::IndexMap;
use mime::Mime;
use tracing::debug;

/// Upper bound applied when parsing a multipart payload for the record.
const MULTIPART_SIZE_LIMIT: u64 = 32 * 1024 * 1024;

/// Splits a fully buffered body into two independently readable copies
/// yielding identical bytes.
///
/// The empty body is the sentinel fast path: both outputs are the shared
/// empty [`Bytes`] and nothing is copied or allocated. Non-empty bodies are
/// shared by reference counting, so this is cheap either way.
pub(crate) fn tee(body: Bytes) -> (Bytes, Bytes) {
    if body.is_empty() {
        return (Bytes::new(), Bytes::new());
    }
    let copy = body.clone();
    (body, copy)
}

/// Produces the request-body text for the call record.
///
/// Multipart form payloads become a field/file summary; everything else is
/// recorded as text, pretty-printed when it parses as JSON. Bodies that are
/// absent, empty, streaming, or unparseable multipart yield an empty string.
pub(crate) async fn capture_request_body(request: &reqwest::Request) -> String {
    let Some(body) = request.body() else {
        return String::new();
    };
    let Some(data) = body.as_bytes().map(Bytes::copy_from_slice) else {
        debug!("streaming request body cannot be recorded, leaving it untouched");
        return String::new();
    };
    if data.is_empty() {
        return String::new();
    }

    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let is_multipart = content_type
        .and_then(|raw| raw.parse::<Mime>().ok())
        .is_some_and(|mime| {
            mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA
        });

    if is_multipart {
        // content_type is present here, the multipart check needs it
        let raw = content_type.unwrap_or_default();
        match multipart_summary(raw, data).await {
            Some(summary) => summary,
            None => {
                debug!("multipart form could not be parsed, recording an empty request body");
                String::new()
            }
        }
    } else {
        format_text_body(&data)
    }
}

/// Formats a buffered body as text: pretty-printed JSON when the bytes parse
/// as JSON, the raw bytes (lossy UTF-8) otherwise.
pub(crate) fn format_text_body(data: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data)
        && let Ok(pretty) = serde_json::to_string_pretty(&value)
    {
        return pretty;
    }
    String::from_utf8_lossy(data).into_owned()
}

/// Parses a buffered multipart payload and summarizes it: a `Form Values:`
/// section listing each text field with its values space-joined, then a
/// `Files:` section listing each file field with its filenames.
///
/// Returns `None` when the payload does not yield a multipart form; the
/// caller records an empty body text in that case.
async fn multipart_summary(content_type: &str, data: Bytes) -> Option<String> {
    let boundary = multer::parse_boundary(content_type).ok()?;
    let stream = futures_util::stream::once(async move { Ok::<Bytes, std::io::Error>(data) });
    let constraints = multer::Constraints::new()
        .size_limit(multer::SizeLimit::new().whole_stream(MULTIPART_SIZE_LIMIT));
    let mut multipart = multer::Multipart::with_constraints(stream, boundary, constraints);

    let mut values: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut files: IndexMap<String, Vec<String>> = IndexMap::new();

    while let Some(field) = multipart.next_field().await.ok()? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if let Some(file_name) = field.file_name().map(str::to_owned) {
            files.entry(name).or_default().push(file_name);
        } else {
            let text = field.text().await.ok()?;
            values.entry(name).or_default().push(text);
        }
    }

    if values.is_empty() && files.is_empty() {
        return None;
    }

    let mut summary = String::new();
    if !values.is_empty() {
        summary.push_str("Form Values:\n");
        for (name, field_values) in &values {
            let _ = writeln!(summary, "{name}: {}", field_values.join(" "));
        }
    }
    if !files.is_empty() {
        if !summary.is_empty() {
            summary.push('\n');
        }
        summary.push_str("Files:\n");
        for (name, file_names) in &files {
            let _ = writeln!(summary, "{name}: {}", file_names.join(" "));
        }
    }
    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tee_yields_identical_copies() {
        let (first, second) = tee(Bytes::from_static(b"world!"));
        assert_eq!(first, second);
        assert_eq!(first, Bytes::from_static(b"world!"));
    }

    #[test]
    fn test_tee_preserves_the_empty_sentinel() {
        let (first, second) = tee(Bytes::new());
        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn test_format_text_body_pretty_prints_json() {
        let formatted = format_text_body(br#"{"hello":"world"}"#);
        insta::assert_snapshot!(formatted, @r#"
        {
          "hello": "world"
        }
        "#);
    }

    #[test]
    fn test_format_text_body_keeps_non_json_raw() {
        assert_eq!(format_text_body(b"plain text body"), "plain text body");
    }

    fn multipart_payload(boundary: &str) -> Bytes {
        let mut payload = String::new();
        for (name, value) in [("name", "test"), ("type", "type")] {
            let _ = write!(
                payload,
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            );
        }
        let _ = write!(
            payload,
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"test.md\"\r\n\
             Content-Type: text/markdown\r\n\r\n# hello\r\n--{boundary}--\r\n"
        );
        Bytes::from(payload)
    }

    #[tokio::test]
    async fn test_multipart_summary_lists_fields_and_files() {
        let boundary = "----restdoc-test-boundary";
        let content_type = format!("multipart/form-data; boundary={boundary}");

        let summary = multipart_summary(&content_type, multipart_payload(boundary))
            .await
            .expect("should parse the form");

        insta::assert_snapshot!(summary, @r"
        Form Values:
        name: test
        type: type

        Files:
        file: test.md
        ");
    }

    #[tokio::test]
    async fn test_multipart_summary_tolerates_garbage() {
        let summary = multipart_summary(
            "multipart/form-data; boundary=xyz",
            Bytes::from_static(b"not a multipart body"),
        )
        .await;
        assert_eq!(summary, None);
    }

    #[tokio::test]
    async fn test_multipart_summary_rejects_missing_boundary() {
        let summary =
            multipart_summary("multipart/form-data", Bytes::from_static(b"--xyz--\r\n")).await;
        assert_eq!(summary, None);
    }
}
