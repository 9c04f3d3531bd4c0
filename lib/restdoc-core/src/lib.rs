//! # Restdoc Core
//!
//! Generate Markdown API documentation from your HTTP client test code.
//!
//! An [`ApiDoc`] wraps outgoing test requests: every recorded call is
//! executed through a shared [`reqwest`] client, its request and response
//! are captured, and the exchange is filed under a named domain. At the end
//! of the run the document renders as a readable Markdown report, optionally
//! converted to HTML.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use restdoc_core::ApiDoc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = ApiDoc::new("Test", "This is a sample document for a test api");
//! doc.add_domain("Hello", "This is a test domain");
//!
//! let client = reqwest::Client::new();
//! let request = client
//!     .get("http://localhost:8080/hello?queryParam=test")
//!     .build()?;
//!
//! // Execute and record in one step; the returned response body is still
//! // fully readable.
//! let response = doc.record_call("Hello", "Say hello to the world", request).await?;
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.text(), "world!");
//!
//! // Write the report.
//! doc.write_markdown_file()?;
//! doc.write_html_file()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## What gets recorded
//!
//! - Method and URL (path plus the raw query string when present).
//! - The request body as text: a field/file summary for multipart forms,
//!   pretty-printed JSON when the body parses as JSON, the raw text
//!   otherwise. Absent bodies record as empty.
//! - The response status code and body text (JSON pretty-printed the same
//!   way).
//!
//! Transport errors propagate to the caller unmodified and the failed call
//! is not recorded; there is no retry logic anywhere. Formatting problems
//! (unparseable multipart, invalid JSON) are tolerated and fall back to an
//! empty or raw body text.

mod markdown;
mod recorder;
mod render;

pub use self::markdown::MarkdownBuilder;
pub use self::recorder::{ApiDoc, ApiDocError, Call, Domain, RecordedResponse};
