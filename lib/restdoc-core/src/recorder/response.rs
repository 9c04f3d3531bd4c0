use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use super::body;
use super::error::ApiDocError;

/// The response handed back to the caller of
/// [`ApiDoc::record_call`](crate::ApiDoc::record_call).
///
/// The original response body has already been drained for the record, so
/// this type carries its own fully buffered copy: the body can be read any
/// number of times, in any format, independently of what was recorded.
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl RecordedResponse {
    /// Buffers the whole response and splits it into the copy kept here for
    /// the caller and the copy consumed by the recorder.
    pub(crate) async fn drain(
        response: reqwest::Response,
    ) -> Result<(Self, Bytes), ApiDocError> {
        let status = response.status();
        let headers = response.headers().clone();
        let (kept, recorded) = body::tee(response.bytes().await?);

        let result = Self {
            status,
            headers,
            body: kept,
        };
        Ok((result, recorded))
    }

    /// The HTTP status code of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw response body bytes.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// The response body as text (lossy UTF-8).
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiDocError> {
        let value = serde_json::from_slice(&self.body)?;
        Ok(value)
    }
}
