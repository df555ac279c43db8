//! Storage URI resolution
//!
//! Turns a [`StoreTarget`] into the URI string handed to the store's init
//! call. A URI target passes through exactly as given. A configuration file
//! is read as INI, where `[H3] store` names the driver and the driver's own
//! section carries its parameters.
//!
//! [`StoreDriver::select`] then decides who serves the URI: the built-in
//! `plainfs://` store, or libh3 for every other scheme.

use std::path::{Path, PathBuf};

use ini::Ini;
use url::Url;

use h3cp_core::{Error, Result, StoreTarget};

/// Scheme of the built-in plain-file store
pub const PLAINFS_SCHEME: &str = "plainfs";

const DEFAULT_FS_ROOT: &str = "/tmp/h3";
const DEFAULT_PLAINFS_ROOT: &str = "/tmp/h3cp-plainfs";
const DEFAULT_ROCKSDB_PATH: &str = "/tmp/h3/rocksdb";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_REDIS_PORT: u16 = 6379;
const DEFAULT_KREON_PORT: u16 = 2181;

/// Resolve a target to the URI passed to the store's init call
pub fn init_uri(target: &StoreTarget) -> Result<String> {
    match target {
        StoreTarget::Uri(uri) => Ok(uri.clone()),
        StoreTarget::ConfigFile(path) => from_config_file(path),
    }
}

/// Read an INI configuration file and build the storage URI it describes
///
/// Relative paths in the file are taken relative to the working directory.
pub fn from_config_file(path: &Path) -> Result<String> {
    let ini = Ini::load_from_file(path).map_err(|e| {
        Error::StoreInit(format!(
            "cannot load configuration file '{}': {e}",
            path.display()
        ))
    })?;
    let cwd = std::env::current_dir()
        .map_err(|e| Error::StoreInit(format!("cannot read working directory: {e}")))?;
    from_ini(&ini, &cwd)
}

fn from_ini(ini: &Ini, base: &Path) -> Result<String> {
    let store = ini
        .get_from(Some("H3"), "store")
        .map(str::trim)
        .ok_or_else(|| Error::StoreInit("missing 'store' key in [H3] section".into()))?;

    match store {
        "filesystem" => {
            let root = ini_path(ini, "FILESYSTEM", "root", DEFAULT_FS_ROOT, base);
            Ok(file_url(&root)?.to_string())
        }
        "plainfs" => {
            let root = ini_path(ini, "PLAINFS", "root", DEFAULT_PLAINFS_ROOT, base);
            Ok(format!("{PLAINFS_SCHEME}://{}", file_url(&root)?.path()))
        }
        "rocksdb" => {
            let path = ini_path(ini, "ROCKSDB", "path", DEFAULT_ROCKSDB_PATH, base);
            Ok(format!("rocksdb://{}", file_url(&path)?.path()))
        }
        "redis" => Ok(format!(
            "redis://{}:{}",
            ini_value(ini, "REDIS", "host").unwrap_or(DEFAULT_HOST),
            ini_port(ini, "REDIS")?.unwrap_or(DEFAULT_REDIS_PORT)
        )),
        "kreon" => Ok(format!(
            "kreon://{}:{}",
            ini_value(ini, "KREON", "zookeeper").unwrap_or(DEFAULT_HOST),
            ini_port(ini, "KREON")?.unwrap_or(DEFAULT_KREON_PORT)
        )),
        "ime" => {
            let host = ini_value(ini, "IME", "host").unwrap_or(DEFAULT_HOST);
            Ok(match ini_port(ini, "IME")? {
                Some(port) => format!("ime://{host}:{port}"),
                None => format!("ime://{host}"),
            })
        }
        other => Err(Error::StoreInit(format!("wrong driver name '{other}'"))),
    }
}

/// Which implementation serves a storage URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreDriver {
    /// Built-in store keeping plain files under a root directory
    PlainFs { root: PathBuf },
    /// Any other scheme; the URI goes to libh3 unchanged
    Native { scheme: String },
}

impl StoreDriver {
    /// Pick the driver for a URI without altering it
    pub fn select(uri: &str) -> Result<Self> {
        let scheme = uri_scheme(uri)
            .ok_or_else(|| Error::StoreInit(format!("'{uri}' is not a storage URI")))?;

        if scheme.eq_ignore_ascii_case(PLAINFS_SCHEME) {
            plainfs_root(uri).map(|root| Self::PlainFs { root })
        } else {
            Ok(Self::Native {
                scheme: scheme.to_ascii_lowercase(),
            })
        }
    }

    /// Scheme name for logs and error messages
    pub fn name(&self) -> &str {
        match self {
            StoreDriver::PlainFs { .. } => PLAINFS_SCHEME,
            StoreDriver::Native { scheme } => scheme,
        }
    }
}

fn uri_scheme(uri: &str) -> Option<&str> {
    let (scheme, _) = uri.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

fn plainfs_root(uri: &str) -> Result<PathBuf> {
    let url = Url::parse(uri)
        .map_err(|e| Error::StoreInit(format!("invalid storage URI '{uri}': {e}")))?;
    if url.host_str().is_some_and(|h| !h.is_empty()) {
        return Err(Error::StoreInit(format!(
            "'{uri}' must name an absolute root, e.g. {PLAINFS_SCHEME}:///srv/h3cp"
        )));
    }
    if url.path().is_empty() {
        return Ok(PathBuf::from(DEFAULT_PLAINFS_ROOT));
    }

    // Reuse the file scheme's percent decoding for the path.
    Url::parse(&format!("file://{}", url.path()))
        .ok()
        .and_then(|file| file.to_file_path().ok())
        .ok_or_else(|| Error::StoreInit(format!("'{uri}' does not name a local directory")))
}

fn file_url(path: &Path) -> Result<Url> {
    Url::from_file_path(path).map_err(|()| {
        Error::StoreInit(format!("cannot express '{}' as a URI", path.display()))
    })
}

fn ini_value<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    ini.get_from(Some(section), key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn ini_path(ini: &Ini, section: &str, key: &str, default: &str, base: &Path) -> PathBuf {
    let path = Path::new(ini_value(ini, section, key).unwrap_or(default));
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn ini_port(ini: &Ini, section: &str) -> Result<Option<u16>> {
    ini_value(ini, section, "port")
        .map(|value| {
            value.parse().map_err(|_| {
                Error::StoreInit(format!("invalid port '{value}' in [{section}] section"))
            })
        })
        .transpose()
}
