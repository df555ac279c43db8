//! ObjectStore trait definition
//!
//! This trait defines the handle-based interface of the H3 store: initialize
//! against a target, move one object to or from a local file, free the handle.
//! It allows the CLI to be decoupled from the driver that backs the store.

use std::path::Path;

use crate::error::Result;
use crate::target::StoreTarget;

/// Trait for handle-based object store operations
///
/// This trait is implemented by the store adapter and can be mocked for testing.
/// Implementations must tolerate `free` being called exactly once for every
/// handle returned by a successful `init`.
#[cfg_attr(test, mockall::automock(type Handle = u32;))]
pub trait ObjectStore {
    /// Opaque handle owned by the caller between `init` and `free`
    type Handle;

    /// Acquire a handle for the given target
    fn init(&self, target: &StoreTarget) -> Result<Self::Handle>;

    /// Release a handle
    fn free(&self, handle: Self::Handle);

    /// Fetch one object into a local file, returning the number of bytes written
    fn read_object_to_file(
        &self,
        handle: &Self::Handle,
        bucket: &str,
        key: &str,
        destination: &Path,
    ) -> Result<u64>;

    /// Upload one local file as one object, returning the number of bytes read
    fn write_object_from_file(
        &self,
        handle: &Self::Handle,
        bucket: &str,
        key: &str,
        source: &Path,
    ) -> Result<u64>;
}
