//! Purpose: Define the public Rust API boundary for roster.
//! Exports: Record and store types plus the error model.
//! Role: Stable surface for the CLI and integration tests.
//! Invariants: Callers reach the backing file only through `Store`.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::record::Record;
pub use crate::core::store::{LISTING_SEPARATOR, Listing, Opened, Removed, SaveStatus, Store};
