//! h3cp-store: H3 store adapter for h3cp
//!
//! This crate provides the implementation of the ObjectStore trait. Every
//! target is resolved to a storage URI. `plainfs://` URIs are served by the
//! built-in plain-file driver; every other URI is handed unchanged to the
//! native libh3 library, which requires the `h3lib` feature. It is the only
//! crate that touches the C API.

pub mod fs;
#[cfg(feature = "h3lib")]
pub mod native;
pub mod uri;

use std::path::Path;

use h3cp_core::{ObjectStore, Result, StoreTarget};

pub use fs::FsHandle;
#[cfg(feature = "h3lib")]
pub use native::NativeHandle;
pub use uri::{PLAINFS_SCHEME, StoreDriver, init_uri};

/// Handle to an initialized H3 store
#[derive(Debug)]
pub enum H3Handle {
    PlainFs(FsHandle),
    #[cfg(feature = "h3lib")]
    Native(NativeHandle),
}

#[cfg(feature = "h3lib")]
fn open_native(uri: &str, _scheme: &str) -> Result<H3Handle> {
    NativeHandle::open(uri).map(H3Handle::Native)
}

#[cfg(not(feature = "h3lib"))]
fn open_native(_uri: &str, scheme: &str) -> Result<H3Handle> {
    Err(h3cp_core::Error::StoreInit(format!(
        "'{scheme}' stores need the native H3 library (rebuild with --features h3lib)"
    )))
}

/// The H3 store, dispatching to a driver chosen at init time
#[derive(Debug, Default, Clone, Copy)]
pub struct H3Store;

impl H3Store {
    pub fn new() -> Self {
        Self
    }
}

impl ObjectStore for H3Store {
    type Handle = H3Handle;

    fn init(&self, target: &StoreTarget) -> Result<H3Handle> {
        let uri = init_uri(target)?;
        let driver = StoreDriver::select(&uri)?;
        tracing::debug!(driver = driver.name(), %uri, "initializing store");

        match driver {
            StoreDriver::PlainFs { root } => FsHandle::open(&root).map(H3Handle::PlainFs),
            StoreDriver::Native { scheme } => open_native(&uri, &scheme),
        }
    }

    fn free(&self, handle: H3Handle) {
        drop(handle);
    }

    fn read_object_to_file(
        &self,
        handle: &H3Handle,
        bucket: &str,
        key: &str,
        destination: &Path,
    ) -> Result<u64> {
        match handle {
            H3Handle::PlainFs(fs) => fs.read_object_to_file(bucket, key, destination),
            #[cfg(feature = "h3lib")]
            H3Handle::Native(native) => native.read_object_to_file(bucket, key, destination),
        }
    }

    fn write_object_from_file(
        &self,
        handle: &H3Handle,
        bucket: &str,
        key: &str,
        source: &Path,
    ) -> Result<u64> {
        match handle {
            H3Handle::PlainFs(fs) => fs.write_object_from_file(bucket, key, source),
            #[cfg(feature = "h3lib")]
            H3Handle::Native(native) => native.write_object_from_file(bucket, key, source),
        }
    }
}
