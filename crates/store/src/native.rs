//! Native libh3 driver
//!
//! Binds the handle-based C API of libh3. Every C string handed to the
//! library is an owned `CString` scoped to the call that uses it, and the
//! handle is freed when [`NativeHandle`] is dropped.

use std::ffi::{CString, c_char, c_int, c_void};
use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::ptr::NonNull;

use h3cp_core::{Error, Result};

/// `H3_Status` values that mean the call succeeded
const H3_SUCCESS: c_int = 7;
const H3_CONTINUE: c_int = 8;

#[repr(C)]
struct H3Auth {
    user_id: u32,
}

#[link(name = "h3lib")]
unsafe extern "C" {
    fn H3_Init(storage_uri: *const c_char) -> *mut c_void;
    fn H3_Free(handle: *mut c_void);
    fn H3_WriteObjectFromFile(
        handle: *mut c_void,
        token: *const H3Auth,
        bucket_name: *mut c_char,
        object_name: *mut c_char,
        fd: c_int,
        size: usize,
        offset: i64,
    ) -> c_int;
    fn H3_ReadObjectToFile(
        handle: *mut c_void,
        token: *const H3Auth,
        bucket_name: *mut c_char,
        object_name: *mut c_char,
        offset: i64,
        fd: c_int,
        size: *mut usize,
    ) -> c_int;
}

/// Owned libh3 handle
#[derive(Debug)]
pub struct NativeHandle {
    raw: NonNull<c_void>,
}

impl NativeHandle {
    /// Initialize libh3 with a storage URI, passed through unchanged
    pub fn open(uri: &str) -> Result<Self> {
        let uri = CString::new(uri)
            .map_err(|_| Error::StoreInit(format!("storage URI contains a NUL byte: {uri:?}")))?;
        // SAFETY: `uri` is a valid NUL-terminated string that outlives the call.
        let raw = unsafe { H3_Init(uri.as_ptr()) };
        NonNull::new(raw)
            .map(|raw| Self { raw })
            .ok_or_else(|| Error::StoreInit("libh3 returned a null handle".into()))
    }

    pub fn read_object_to_file(&self, bucket: &str, key: &str, destination: &Path) -> Result<u64> {
        let bucket = c_string(bucket)?;
        let key = c_string(key)?;
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o644)
            .open(destination)
            .map_err(|e| Error::Transfer(format!("{}: {e}", destination.display())))?;

        let auth = H3Auth { user_id: 0 };
        let mut size: usize = 0;
        // SAFETY: the handle is live, the strings and the file descriptor
        // outlive the call, and `size` points to a valid usize.
        let status = unsafe {
            H3_ReadObjectToFile(
                self.raw.as_ptr(),
                &auth,
                bucket.as_ptr().cast_mut(),
                key.as_ptr().cast_mut(),
                0,
                file.as_raw_fd(),
                &mut size,
            )
        };
        check_status(status, "read")?;
        Ok(size as u64)
    }

    pub fn write_object_from_file(&self, bucket: &str, key: &str, source: &Path) -> Result<u64> {
        let bucket = c_string(bucket)?;
        let key = c_string(key)?;
        let file =
            File::open(source).map_err(|e| Error::Transfer(format!("{}: {e}", source.display())))?;
        let size = file
            .metadata()
            .map_err(|e| Error::Transfer(format!("{}: {e}", source.display())))?
            .len();

        let auth = H3Auth { user_id: 0 };
        // SAFETY: as in `read_object_to_file`.
        let status = unsafe {
            H3_WriteObjectFromFile(
                self.raw.as_ptr(),
                &auth,
                bucket.as_ptr().cast_mut(),
                key.as_ptr().cast_mut(),
                file.as_raw_fd(),
                size as usize,
                0,
            )
        };
        check_status(status, "write")?;
        Ok(size)
    }
}

impl Drop for NativeHandle {
    fn drop(&mut self) {
        // SAFETY: `raw` came from `H3_Init` and is freed exactly once here.
        unsafe { H3_Free(self.raw.as_ptr()) };
    }
}

fn c_string(value: &str) -> Result<CString> {
    CString::new(value)
        .map_err(|_| Error::Transfer(format!("name contains a NUL byte: {value:?}")))
}

fn check_status(status: c_int, op: &str) -> Result<()> {
    match status {
        H3_SUCCESS | H3_CONTINUE => Ok(()),
        other => Err(Error::Transfer(format!(
            "libh3 {op} failed: {}",
            status_name(other)
        ))),
    }
}

fn status_name(status: c_int) -> &'static str {
    match status {
        0 => "failure",
        1 => "invalid arguments",
        2 => "store error",
        3 => "already exists",
        4 => "does not exist",
        5 => "name too long",
        6 => "not empty",
        _ => "unknown status",
    }
}
