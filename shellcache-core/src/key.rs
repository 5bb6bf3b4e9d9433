//! Cache key types and construction.
//!
//! A [`CacheKey`] identifies a stored response. Keys are derived
//! deterministically from the parts of a request that matter for identity
//! (method and normalized target), so two requests that normalize
//! identically always produce equal keys.
//!
//! ## Format
//!
//! When rendered for diagnostics, keys follow this format:
//! `{prefix}:key1=value1&key2=value2` — the prefix is omitted if empty.
//!
//! ```
//! use shellcache_core::{CacheKey, KeyPart};
//!
//! let key = CacheKey::new("v1", vec![
//!     KeyPart::new("method", Some("GET")),
//!     KeyPart::new("url", Some("/agenda")),
//! ]);
//! assert_eq!(format!("{}", key), "v1:method=GET&url=/agenda");
//!
//! let key = CacheKey::from_slice(&[("method", Some("GET"))]);
//! assert_eq!(format!("{}", key), "method=GET");
//! ```

use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Inner structure containing the actual cache key data.
/// Wrapped in Arc for cheap cloning.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct CacheKeyInner {
    prefix: SmolStr,
    parts: Vec<KeyPart>,
}

/// A cache key identifying a cached entry.
///
/// Cache keys are composed of:
/// - An optional **prefix** for namespacing (e.g., the store generation name)
/// - A list of **parts** (key-value pairs) derived from the request
///
/// # Cheap Cloning
///
/// `CacheKey` wraps its data in [`Arc`], making `clone()` an O(1) operation
/// that only increments a reference count. Keys are cloned on every
/// intercepted request (once for the lookup, once for the refresh task), so
/// this matters.
#[derive(Clone, Debug)]
pub struct CacheKey {
    inner: Arc<CacheKeyInner>,
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.inner.prefix.is_empty() {
            write!(f, "{}:", self.inner.prefix)?;
        }
        for (i, part) in self.inner.parts.iter().enumerate() {
            if i > 0 {
                write!(f, "&")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

impl CacheKey {
    /// Creates a new cache key with the given prefix and parts.
    pub fn new(prefix: impl Into<SmolStr>, parts: Vec<KeyPart>) -> Self {
        CacheKey {
            inner: Arc::new(CacheKeyInner {
                prefix: prefix.into(),
                parts,
            }),
        }
    }

    /// Creates a cache key from a slice of key-value pairs, with no prefix.
    pub fn from_slice(parts: &[(&str, Option<&str>)]) -> Self {
        let parts = parts
            .iter()
            .map(|(key, value)| KeyPart::new(key, *value))
            .collect();
        Self::new(SmolStr::default(), parts)
    }

    /// Returns the cache key prefix.
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// Returns an iterator over the key parts.
    pub fn parts(&self) -> impl Iterator<Item = &KeyPart> {
        self.inner.parts.iter()
    }
}

/// A single component of a cache key.
///
/// Each part is a key-value pair derived from the request. The value is
/// optional — some parts may be key-only flags.
///
/// Both key and value use [`SmolStr`], which stores small strings (≤23
/// bytes) inline without heap allocation; typical parts like `method=GET`
/// never allocate.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyPart {
    key: SmolStr,
    value: Option<SmolStr>,
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if let Some(ref value) = self.value {
            write!(f, "={}", value)?;
        }
        Ok(())
    }
}

impl KeyPart {
    /// Creates a new key part.
    pub fn new<K: AsRef<str>, V: AsRef<str>>(key: K, value: Option<V>) -> Self {
        KeyPart {
            key: SmolStr::new(key),
            value: value.map(SmolStr::new),
        }
    }

    /// Returns the key name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the optional value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_parts_produce_equal_keys() {
        let a = CacheKey::from_slice(&[("method", Some("GET")), ("url", Some("/agenda"))]);
        let b = CacheKey::from_slice(&[("method", Some("GET")), ("url", Some("/agenda"))]);
        assert_eq!(a, b);

        let c = CacheKey::from_slice(&[("method", Some("POST")), ("url", Some("/agenda"))]);
        assert_ne!(a, c);
    }

    #[test]
    fn display_format() {
        let key = CacheKey::new(
            "v1",
            vec![
                KeyPart::new("method", Some("GET")),
                KeyPart::new("offline", None::<&str>),
            ],
        );
        assert_eq!(key.to_string(), "v1:method=GET&offline");

        let bare = CacheKey::from_slice(&[("url", Some("/agenda"))]);
        assert_eq!(bare.to_string(), "url=/agenda");
    }

    #[test]
    fn clone_is_shallow() {
        let key = CacheKey::from_slice(&[("url", Some("/agenda"))]);
        let clone = key.clone();
        assert_eq!(key, clone);
        assert!(Arc::ptr_eq(&key.inner, &clone.inner));
    }
}
