//! Transfer request construction and direction resolution

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::path::{Endpoint, H3_SCHEME, parse_endpoint};

/// A validated (source, destination) pair with exactly one store-side endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    source: Endpoint,
    destination: Endpoint,
}

/// The single store operation a request resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    /// Store object to local file
    Download {
        bucket: String,
        key: String,
        file: PathBuf,
    },
    /// Local file to store object
    Upload {
        bucket: String,
        key: String,
        file: PathBuf,
    },
}

impl Transfer {
    pub fn bucket(&self) -> &str {
        match self {
            Transfer::Download { bucket, .. } | Transfer::Upload { bucket, .. } => bucket,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Transfer::Download { key, .. } | Transfer::Upload { key, .. } => key,
        }
    }

    pub fn file(&self) -> &std::path::Path {
        match self {
            Transfer::Download { file, .. } | Transfer::Upload { file, .. } => file,
        }
    }

    pub fn is_download(&self) -> bool {
        matches!(self, Transfer::Download { .. })
    }
}

impl TransferRequest {
    /// Parse and validate the positional arguments of an invocation
    ///
    /// Exactly two arguments are accepted; any other count is a usage error.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let [src, dst] = args else {
            return Err(Error::Usage(format!(
                "Expected exactly 2 paths (<src> <dst>), got {}",
                args.len()
            )));
        };
        Self::new(parse_endpoint(src.as_ref())?, parse_endpoint(dst.as_ref())?)
    }

    /// Validate a pair of parsed endpoints
    pub fn new(source: Endpoint, destination: Endpoint) -> Result<Self> {
        match (source.is_store(), destination.is_store()) {
            (false, false) => {
                return Err(Error::InvalidPath(format!(
                    "Only one of the arguments must be a path in H3 (starting with \"{H3_SCHEME}\"). \
                     Use the system cp command to copy between local paths."
                )));
            }
            (true, true) => {
                return Err(Error::InvalidPath(format!(
                    "Only one of the arguments must be a path in H3 (starting with \"{H3_SCHEME}\"). \
                     Copying between store objects is not supported."
                )));
            }
            _ => {}
        }

        if source.has_trailing_separator() || destination.has_trailing_separator() {
            return Err(Error::InvalidPath("Please do not end an object with \"/\".".into()));
        }

        let remote = if source.is_store() {
            &source
        } else {
            &destination
        };
        if remote.path.is_empty() {
            return Err(Error::InvalidPath(format!(
                "Missing object key in '{remote}'. Use format: {H3_SCHEME}<bucket>/<key>"
            )));
        }

        let local = if source.is_local() {
            &source
        } else {
            &destination
        };
        if local.path.is_empty() {
            return Err(Error::InvalidPath("Local path cannot be empty".into()));
        }

        Ok(Self {
            source,
            destination,
        })
    }

    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    pub fn destination(&self) -> &Endpoint {
        &self.destination
    }

    /// Resolve the direction: a store-side source downloads, a store-side destination uploads
    pub fn transfer(&self) -> Transfer {
        if self.source.is_store() {
            Transfer::Download {
                bucket: self.source.bucket.clone(),
                key: self.source.path.clone(),
                file: PathBuf::from(&self.destination.path),
            }
        } else {
            Transfer::Upload {
                bucket: self.destination.bucket.clone(),
                key: self.destination.path.clone(),
                file: PathBuf::from(&self.source.path),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(src: &str, dst: &str) -> Result<TransferRequest> {
        TransferRequest::from_args(&[src, dst])
    }

    #[test]
    fn test_download_direction() {
        let transfer = request("h3://photos/img.png", "/tmp/img.png")
            .unwrap()
            .transfer();
        assert_eq!(
            transfer,
            Transfer::Download {
                bucket: "photos".into(),
                key: "img.png".into(),
                file: PathBuf::from("/tmp/img.png"),
            }
        );
    }

    #[test]
    fn test_upload_direction() {
        let transfer = request("/tmp/img.png", "h3://photos/img.png")
            .unwrap()
            .transfer();
        assert_eq!(
            transfer,
            Transfer::Upload {
                bucket: "photos".into(),
                key: "img.png".into(),
                file: PathBuf::from("/tmp/img.png"),
            }
        );
    }

    #[test]
    fn test_relative_local_path() {
        let transfer = request("h3://bucket/key", "local/file").unwrap().transfer();
        assert!(transfer.is_download());
        assert_eq!(transfer.bucket(), "bucket");
        assert_eq!(transfer.key(), "key");
        assert_eq!(transfer.file(), std::path::Path::new("local/file"));
    }

    #[test]
    fn test_both_store_side_rejected() {
        let err = request("h3://a/x", "h3://b/y").unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn test_neither_store_side_rejected() {
        let err = request("local1", "local2").unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[test]
    fn test_trailing_separator_rejected() {
        let err = request("h3://a/dir/", "local").unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));

        let err = request("h3://a/obj", "local/dir/").unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));

        let err = request("/tmp/", "h3://a/obj").unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[test]
    fn test_missing_key_rejected() {
        let err = request("h3://bucket", "local").unwrap_err();
        assert!(err.to_string().contains("Missing object key"));
    }

    #[test]
    fn test_empty_local_path_rejected() {
        assert!(request("", "h3://bucket/key").is_err());
    }

    #[test]
    fn test_wrong_argument_count() {
        let none: [&str; 0] = [];
        assert!(matches!(
            TransferRequest::from_args(&none),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            TransferRequest::from_args(&["h3://a/b"]),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            TransferRequest::from_args(&["h3://a/b", "c", "d"]),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn test_endpoints_are_preserved() {
        let req = request("h3://a/x", "y").unwrap();
        assert_eq!(req.source(), &Endpoint::store("a", "x"));
        assert_eq!(req.destination(), &Endpoint::local("y"));
    }
}
