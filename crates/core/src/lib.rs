//! h3cp-core: Core library for the h3cp copy tool
//!
//! This crate provides the core functionality for h3cp, including:
//! - Store target resolution (configuration file or storage URI)
//! - Endpoint parsing for `h3://bucket/key` paths
//! - Transfer direction resolution
//! - ObjectStore trait and the session that drives it
//!
//! This crate is independent of any specific store driver, allowing the
//! session to be tested against a mock store.

pub mod error;
pub mod path;
pub mod session;
pub mod target;
pub mod traits;
pub mod transfer;

pub use error::{Error, Result};
pub use path::{Endpoint, H3_SCHEME, parse_endpoint};
pub use session::{Stage, StoreSession, TransferOutcome, copy};
pub use target::{ConfigLookup, StoreTarget, resolve_config_path};
pub use traits::ObjectStore;
pub use transfer::{Transfer, TransferRequest};
