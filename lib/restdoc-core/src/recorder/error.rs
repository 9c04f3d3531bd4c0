/// Errors that can occur while recording calls or exporting documentation.
///
/// Transport and body-read failures are propagated to the caller unmodified;
/// the offending call is not recorded. Export failures are ordinary,
/// recoverable errors — writing documentation must never take down the host
/// test process.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiDocError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when the request itself fails (DNS, connection refused,
    /// timeout) or when draining a body fails mid-stream.
    ReqwestError(reqwest::Error),

    /// File system error while exporting the rendered documentation.
    IoError(std::io::Error),

    /// JSON deserialization failure when reading a recorded response body as
    /// a typed value.
    JsonError(serde_json::Error),
}
