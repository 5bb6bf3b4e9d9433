//! Routing table and target normalization.
//!
//! A single-page application serves the same entry document on a family of
//! virtual routes and deep links. The [`RouteTable`] recognizes those
//! routes and rewrites matching document navigations to the one canonical
//! entry path, so every variant shares a single cache entry.

use http::uri::PathAndQuery;
use smol_str::SmolStr;
use thiserror::Error;

use crate::request::{Destination, FetchRequest};

/// Error type for route table construction.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The canonical path is not a valid URI path.
    #[error("invalid canonical path: {0}")]
    InvalidCanonical(#[from] http::uri::InvalidUri),
}

/// One rule of the routing table.
///
/// All rules rewrite to the same canonical target, so order only matters
/// for matching, not for conflicting outcomes.
#[derive(Clone, Debug)]
enum RouteRule {
    /// Recognizes a virtual route together with its `.html` and
    /// trailing-slash variants.
    Exact(SmolStr),
    /// Recognizes a deep-link family: a fixed prefix followed by a
    /// variable identifier.
    Prefix(SmolStr),
}

impl RouteRule {
    fn matches(&self, path: &str) -> bool {
        match self {
            RouteRule::Exact(route) => {
                path == route.as_str()
                    || path.strip_suffix(".html") == Some(route.as_str())
                    || path.strip_suffix('/') == Some(route.as_str())
            }
            RouteRule::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

/// A static, ordered set of rules mapping virtual routes to one canonical
/// entry path.
///
/// # Examples
///
/// ```
/// use http::Uri;
/// use shellcache_http::{FetchRequest, RouteTable};
///
/// let routes = RouteTable::builder("/agenda")
///     .route("/agenda")
///     .route("/settings")
///     .prefix("/event/")
///     .build()
///     .unwrap();
///
/// let request = FetchRequest::document(Uri::from_static("/event/42"));
/// assert_eq!(routes.normalize(request).uri().path(), "/agenda");
/// ```
#[derive(Clone, Debug)]
pub struct RouteTable {
    canonical: PathAndQuery,
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Returns a builder for a table rewriting to `canonical`.
    pub fn builder(canonical: impl Into<String>) -> RouteTableBuilder {
        RouteTableBuilder {
            canonical: canonical.into(),
            rules: Vec::new(),
        }
    }

    /// The canonical entry path all recognized routes rewrite to.
    pub fn canonical_path(&self) -> &str {
        self.canonical.path()
    }

    /// Tests whether `path` is recognized by any rule. First match wins.
    pub fn matches(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }

    /// Rewrites a recognized document navigation to the canonical path.
    ///
    /// Applies only to [`Destination::Document`] requests whose path is
    /// recognized; anything else is returned unchanged. The rewritten
    /// request keeps its origin and every non-target field; the query is
    /// dropped along with the old path.
    ///
    /// Normalization is idempotent as long as the canonical path itself is
    /// registered as a route: rewriting an already-canonical request is
    /// target-equal.
    pub fn normalize(&self, request: FetchRequest) -> FetchRequest {
        if request.destination() != Destination::Document {
            return request;
        }
        if !self.matches(request.uri().path()) {
            return request;
        }
        request.with_path(self.canonical.clone())
    }
}

/// Builder for [`RouteTable`].
#[derive(Debug)]
pub struct RouteTableBuilder {
    canonical: String,
    rules: Vec<RouteRule>,
}

impl RouteTableBuilder {
    /// Registers an exact virtual route.
    ///
    /// The route implicitly covers its `.html` and trailing-slash
    /// variants: registering `/settings` also recognizes `/settings.html`
    /// and `/settings/`.
    pub fn route(mut self, path: impl AsRef<str>) -> Self {
        self.rules.push(RouteRule::Exact(SmolStr::new(path)));
        self
    }

    /// Registers a prefix family for parameterized deep links.
    ///
    /// Any path starting with `prefix` is recognized, regardless of the
    /// variable suffix: registering `/event/` recognizes `/event/42`.
    pub fn prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.rules.push(RouteRule::Prefix(SmolStr::new(prefix)));
        self
    }

    /// Builds the table, validating the canonical path.
    pub fn build(self) -> Result<RouteTable, RouteError> {
        let canonical = PathAndQuery::try_from(self.canonical.as_str())?;
        Ok(RouteTable {
            canonical,
            rules: self.rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;

    fn table() -> RouteTable {
        RouteTable::builder("/agenda")
            .route("/settings")
            .route("/agenda")
            .route("/mastodon")
            .route("/friends")
            .route("/stotra")
            .prefix("/survey/")
            .prefix("/friend-agenda/")
            .prefix("/event/")
            .build()
            .unwrap()
    }

    fn normalize(path: &'static str) -> FetchRequest {
        table().normalize(FetchRequest::document(Uri::from_static(path)))
    }

    #[test]
    fn exact_route_and_variants_normalize() {
        for path in ["/settings", "/settings.html", "/settings/"] {
            let request =
                table().normalize(FetchRequest::document(Uri::try_from(path).unwrap()));
            assert_eq!(request.uri().path(), "/agenda", "path {path}");
        }
    }

    #[test]
    fn prefix_families_normalize_regardless_of_suffix() {
        assert_eq!(normalize("/survey/2026-spring").uri().path(), "/agenda");
        assert_eq!(normalize("/friend-agenda/alice").uri().path(), "/agenda");
        assert_eq!(normalize("/event/42").uri().path(), "/agenda");
    }

    #[test]
    fn unrecognized_path_is_unchanged() {
        assert_eq!(normalize("/unknown").uri().path(), "/unknown");
        // An exact route is not a prefix: no variant game beyond .html and /.
        assert_eq!(normalize("/settingsx").uri().path(), "/settingsx");
    }

    #[test]
    fn non_document_destination_is_unchanged() {
        let request = FetchRequest::get(Uri::from_static("/settings"));
        assert_eq!(table().normalize(request).uri().path(), "/settings");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize("/event/42");
        let twice = table().normalize(once.clone());
        assert_eq!(once.uri(), twice.uri());

        // Normalizing the canonical route itself is a target no-op.
        let canonical = normalize("/agenda");
        assert_eq!(canonical.uri().path(), "/agenda");
    }

    #[test]
    fn normalized_variants_share_a_cache_key() {
        let a = normalize("/event/42").cache_key();
        let b = normalize("/agenda.html").cache_key();
        let c = normalize("/agenda").cache_key();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn invalid_canonical_path_is_rejected() {
        assert!(RouteTable::builder("not a path").build().is_err());
    }
}
