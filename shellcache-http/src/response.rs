//! Stored and served response values.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// A response as observed from the network and stored in the cache.
///
/// Cloning is cheap: the body is [`Bytes`], so a cache hit re-serves the
/// stored response without copying the payload.
#[derive(Clone, Debug)]
pub struct FetchResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl FetchResponse {
    /// Creates a response with the given status and an empty body.
    pub fn new(status: StatusCode) -> Self {
        FetchResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Creates a `200 OK` response with the given body.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        FetchResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Returns a copy of this response with the header appended.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Returns a copy of this response with the given body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}
