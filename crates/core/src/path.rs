//! Path parsing
//!
//! Handles parsing of store paths in the format: h3://bucket/key
//! Anything without the scheme prefix is a local path and is passed through as-is.

use crate::error::{Error, Result};

/// Scheme prefix marking an argument as living in the store
pub const H3_SCHEME: &str = "h3://";

/// Path separator for both object keys and local paths
pub const SEPARATOR: char = '/';

/// One side of a copy: a store object or a local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Bucket name (empty for local endpoints)
    pub bucket: String,
    /// Object key for store endpoints, filesystem path for local ones
    pub path: String,
}

impl Endpoint {
    /// Create a store-side endpoint
    pub fn store(bucket: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            path: path.into(),
        }
    }

    /// Create a local endpoint
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            bucket: String::new(),
            path: path.into(),
        }
    }

    /// Check if this endpoint refers to the store
    pub fn is_store(&self) -> bool {
        !self.bucket.is_empty()
    }

    /// Check if this endpoint refers to the local filesystem
    pub fn is_local(&self) -> bool {
        self.bucket.is_empty()
    }

    /// Whether the path names a directory or prefix rather than a single object
    pub fn has_trailing_separator(&self) -> bool {
        self.path.ends_with(SEPARATOR)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_store() {
            write!(f, "{H3_SCHEME}{}/{}", self.bucket, self.path)
        } else {
            write!(f, "{}", self.path)
        }
    }
}

/// Parse a path argument into an Endpoint
///
/// `h3://bucket/a/b` becomes bucket `bucket` and path `a/b`; `h3://bucket`
/// has an empty path. Anything else is local.
pub fn parse_endpoint(arg: &str) -> Result<Endpoint> {
    let Some(rest) = arg.strip_prefix(H3_SCHEME) else {
        return Ok(Endpoint::local(arg));
    };

    let (bucket, path) = rest.split_once(SEPARATOR).unwrap_or((rest, ""));
    if bucket.is_empty() {
        return Err(Error::InvalidPath(format!(
            "Missing bucket name in '{arg}'. Use format: {H3_SCHEME}<bucket>/<key>"
        )));
    }

    Ok(Endpoint::store(bucket, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_store_path() {
        let ep = parse_endpoint("h3://photos/img.png").unwrap();
        assert!(ep.is_store());
        assert_eq!(ep.bucket, "photos");
        assert_eq!(ep.path, "img.png");
    }

    #[test]
    fn test_parse_store_path_nested_key() {
        let ep = parse_endpoint("h3://photos/2020/summer/img.png").unwrap();
        assert_eq!(ep.bucket, "photos");
        assert_eq!(ep.path, "2020/summer/img.png");
    }

    #[test]
    fn test_parse_store_path_bucket_only() {
        let ep = parse_endpoint("h3://photos").unwrap();
        assert_eq!(ep.bucket, "photos");
        assert_eq!(ep.path, "");
    }

    #[test]
    fn test_parse_store_path_trailing_slash_is_kept() {
        let ep = parse_endpoint("h3://a/dir/").unwrap();
        assert_eq!(ep.path, "dir/");
        assert!(ep.has_trailing_separator());
    }

    #[test]
    fn test_parse_store_path_empty_bucket() {
        assert!(parse_endpoint("h3:///key").is_err());
        assert!(parse_endpoint("h3://").is_err());
    }

    #[test]
    fn test_parse_local_paths() {
        for arg in ["/tmp/img.png", "local/file", "file.txt", "./x", "H3://a/b"] {
            let ep = parse_endpoint(arg).unwrap();
            assert!(ep.is_local(), "{arg} should be local");
            assert_eq!(ep.path, arg);
        }
    }

    #[test]
    fn test_parse_is_repeatable() {
        let first = parse_endpoint("h3://bucket/a/b/c").unwrap();
        let second = parse_endpoint("h3://bucket/a/b/c").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_endpoint_display() {
        assert_eq!(
            Endpoint::store("photos", "img.png").to_string(),
            "h3://photos/img.png"
        );
        assert_eq!(Endpoint::local("/tmp/x").to_string(), "/tmp/x");
    }
}
