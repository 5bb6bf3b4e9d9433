//! Bypass classification by reserved path markers.

use shellcache_core::{Classify, Flow};
use smol_str::SmolStr;

use crate::FetchRequest;

/// Path substrings reserved for server-authoritative routes.
///
/// Matches the exclusions of the hosted application: API endpoints, the
/// excluded internal namespace, and the authentication login endpoint.
pub const DEFAULT_BYPASS_MARKERS: [&str; 3] = ["/api/", "zebi", "cas-login"];

/// Classifies requests as bypass or intercept by path substring.
///
/// A request whose path contains any configured marker is passed straight
/// to the network, untouched by rewriting or caching. Everything else is
/// intercepted. Classification is pure and always resolves — an unmatched
/// request is simply intercepted.
///
/// # Examples
///
/// ```
/// use http::Uri;
/// use shellcache_core::Classify;
/// use shellcache_http::{FetchRequest, RequestClassifier};
///
/// let classifier = RequestClassifier::default();
/// let api = FetchRequest::get(Uri::from_static("/api/agenda/42"));
/// assert!(classifier.classify(api).is_bypass());
/// ```
#[derive(Clone, Debug)]
pub struct RequestClassifier {
    markers: Vec<SmolStr>,
}

impl RequestClassifier {
    /// Creates a classifier with a custom marker set.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RequestClassifier {
            markers: markers.into_iter().map(|m| SmolStr::new(m)).collect(),
        }
    }

    /// Returns the configured markers.
    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(SmolStr::as_str)
    }
}

impl Default for RequestClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_BYPASS_MARKERS)
    }
}

impl Classify for RequestClassifier {
    type Subject = FetchRequest;

    fn classify(&self, request: FetchRequest) -> Flow<FetchRequest> {
        let path = request.uri().path();
        if self.markers.iter().any(|marker| path.contains(marker.as_str())) {
            Flow::Bypass(request)
        } else {
            Flow::Intercept(request)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;

    fn classify(path: &'static str) -> Flow<FetchRequest> {
        RequestClassifier::default().classify(FetchRequest::get(Uri::from_static(path)))
    }

    #[test]
    fn reserved_markers_bypass() {
        assert!(classify("/api/agenda/42").is_bypass());
        assert!(classify("/cas-login").is_bypass());
        assert!(classify("/zebi/internal").is_bypass());
    }

    #[test]
    fn marker_anywhere_in_path_bypasses() {
        assert!(classify("/nested/api/things").is_bypass());
    }

    #[test]
    fn everything_else_is_intercepted() {
        assert!(!classify("/agenda").is_bypass());
        assert!(!classify("/event/42").is_bypass());
        assert!(!classify("/").is_bypass());
    }

    #[test]
    fn custom_markers() {
        let classifier = RequestClassifier::new(["/private/"]);
        let request = FetchRequest::get(Uri::from_static("/private/data"));
        assert!(classifier.classify(request).is_bypass());
        let request = FetchRequest::get(Uri::from_static("/api/data"));
        assert!(!classifier.classify(request).is_bypass());
    }
}
