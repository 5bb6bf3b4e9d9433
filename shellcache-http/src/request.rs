//! Immutable request descriptors.

use bytes::Bytes;
use http::uri::PathAndQuery;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use shellcache_core::CacheKey;

/// The resource kind a request is fetching.
///
/// Only [`Destination::Document`] requests are subject to route
/// normalization; subresource requests keep their target untouched.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Destination {
    /// A top-level navigation target.
    Document,
    /// A script subresource.
    Script,
    /// A stylesheet subresource.
    Style,
    /// An image subresource.
    Image,
    /// A font subresource.
    Font,
    /// A worker script.
    Worker,
    /// No particular destination (plain `fetch()` calls).
    #[default]
    Empty,
}

/// The cache directive carried by a request.
///
/// The interception layer copies this through normalization unchanged; it
/// does not interpret it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CacheMode {
    /// Honor standard freshness rules.
    #[default]
    Default,
    /// Never read or write the platform HTTP cache.
    NoStore,
    /// Bypass the platform HTTP cache on read, update it on response.
    Reload,
    /// Revalidate with the server before using a cached response.
    NoCache,
    /// Use any cached response regardless of freshness.
    ForceCache,
    /// Fail unless a cached response exists.
    OnlyIfCached,
}

/// The redirect policy carried by a request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RedirectMode {
    /// Follow redirects transparently.
    #[default]
    Follow,
    /// Treat a redirect as a network error.
    Error,
    /// Surface the redirect response to the caller.
    Manual,
}

/// The fetch priority hint carried by a request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Priority {
    /// Let the platform decide.
    #[default]
    Auto,
    /// Fetch at high priority relative to same-type requests.
    High,
    /// Fetch at low priority relative to same-type requests.
    Low,
}

/// An immutable request descriptor.
///
/// Construction goes through [`FetchRequest::builder`]; after that the
/// request is read-only. Rewriting the target (route normalization) builds
/// a *new* request with every other field explicitly carried over.
///
/// # Examples
///
/// ```
/// use http::{Method, Uri};
/// use shellcache_http::{Destination, FetchRequest};
///
/// let request = FetchRequest::builder()
///     .method(Method::GET)
///     .uri(Uri::from_static("https://example.org/event/42"))
///     .destination(Destination::Document)
///     .build();
/// assert_eq!(request.uri().path(), "/event/42");
/// ```
#[derive(Clone, Debug)]
pub struct FetchRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    destination: Destination,
    cache_mode: CacheMode,
    redirect: RedirectMode,
    priority: Priority,
}

impl FetchRequest {
    /// Returns a new [`FetchRequestBuilder`].
    pub fn builder() -> FetchRequestBuilder {
        FetchRequestBuilder::default()
    }

    /// Convenience constructor for a GET request with default directives.
    pub fn get(uri: Uri) -> Self {
        Self::builder().uri(uri).build()
    }

    /// Convenience constructor for a GET document navigation.
    pub fn document(uri: Uri) -> Self {
        Self::builder()
            .uri(uri)
            .destination(Destination::Document)
            .build()
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The target URI (origin, path and query).
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The destination kind.
    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// The cache directive.
    pub fn cache_mode(&self) -> CacheMode {
        self.cache_mode
    }

    /// The redirect policy.
    pub fn redirect(&self) -> RedirectMode {
        self.redirect
    }

    /// The fetch priority hint.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Derives the cache key for this request.
    ///
    /// The key is built from method and full target, so two requests that
    /// normalize to the same target always produce equal keys.
    pub fn cache_key(&self) -> CacheKey {
        let url = self.uri.to_string();
        CacheKey::from_slice(&[
            ("method", Some(self.method.as_str())),
            ("url", Some(url.as_str())),
        ])
    }

    /// Rebuilds this request against a new target path, preserving the
    /// origin and every non-target field. The query is dropped along with
    /// the old path.
    pub(crate) fn with_path(self, path: PathAndQuery) -> FetchRequest {
        let FetchRequest {
            method,
            uri,
            headers,
            body,
            destination,
            cache_mode,
            redirect,
            priority,
        } = self;
        let mut parts = uri.clone().into_parts();
        parts.path_and_query = Some(path);
        // A malformed target (scheme without authority) cannot carry a
        // rewritten path; such a request keeps its original URI.
        let uri = Uri::from_parts(parts).unwrap_or(uri);
        FetchRequest {
            method,
            uri,
            headers,
            body,
            destination,
            cache_mode,
            redirect,
            priority,
        }
    }
}

/// Builder for [`FetchRequest`].
///
/// All fields have defaults: GET, target `/`, empty headers and body,
/// [`Destination::Empty`], default cache/redirect/priority directives.
#[derive(Debug, Default)]
pub struct FetchRequestBuilder {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    destination: Destination,
    cache_mode: CacheMode,
    redirect: RedirectMode,
    priority: Priority,
}

impl FetchRequestBuilder {
    /// Sets the request method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the target URI.
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Appends a header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the destination kind.
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Sets the cache directive.
    pub fn cache_mode(mut self, cache_mode: CacheMode) -> Self {
        self.cache_mode = cache_mode;
        self
    }

    /// Sets the redirect policy.
    pub fn redirect(mut self, redirect: RedirectMode) -> Self {
        self.redirect = redirect;
        self
    }

    /// Sets the fetch priority hint.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builds the request.
    pub fn build(self) -> FetchRequest {
        FetchRequest {
            method: self.method,
            uri: self.uri,
            headers: self.headers,
            body: self.body,
            destination: self.destination,
            cache_mode: self.cache_mode,
            redirect: self.redirect,
            priority: self.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_requests_share_a_cache_key() {
        let a = FetchRequest::document(Uri::from_static("https://example.org/agenda"));
        let b = FetchRequest::document(Uri::from_static("https://example.org/agenda"));
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn cache_key_distinguishes_method_and_target() {
        let get = FetchRequest::get(Uri::from_static("/agenda"));
        let post = FetchRequest::builder()
            .method(Method::POST)
            .uri(Uri::from_static("/agenda"))
            .build();
        let other = FetchRequest::get(Uri::from_static("/settings"));
        assert_ne!(get.cache_key(), post.cache_key());
        assert_ne!(get.cache_key(), other.cache_key());
    }

    #[test]
    fn with_path_preserves_origin_and_drops_query() {
        let request = FetchRequest::document(Uri::from_static(
            "https://example.org/event/42?tab=info",
        ));
        let rewritten = request.with_path(PathAndQuery::from_static("/agenda"));
        assert_eq!(rewritten.uri().path(), "/agenda");
        assert_eq!(rewritten.uri().query(), None);
        assert_eq!(
            rewritten.uri().authority().map(|a| a.as_str()),
            Some("example.org")
        );
        assert_eq!(rewritten.uri().scheme_str(), Some("https"));
    }

    #[test]
    fn with_path_carries_all_non_target_fields() {
        let request = FetchRequest::builder()
            .method(Method::POST)
            .uri(Uri::from_static("/event/42"))
            .header(
                http::header::ACCEPT,
                HeaderValue::from_static("text/html"),
            )
            .body("payload")
            .destination(Destination::Document)
            .cache_mode(CacheMode::NoCache)
            .redirect(RedirectMode::Manual)
            .priority(Priority::High)
            .build();

        let rewritten = request.with_path(PathAndQuery::from_static("/agenda"));
        assert_eq!(rewritten.method(), &Method::POST);
        assert_eq!(
            rewritten.headers().get(http::header::ACCEPT),
            Some(&HeaderValue::from_static("text/html"))
        );
        assert_eq!(rewritten.body().as_ref(), b"payload");
        assert_eq!(rewritten.destination(), Destination::Document);
        assert_eq!(rewritten.cache_mode(), CacheMode::NoCache);
        assert_eq!(rewritten.redirect(), RedirectMode::Manual);
        assert_eq!(rewritten.priority(), Priority::High);
    }
}
