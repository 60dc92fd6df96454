// Core modules implementing records, the store, on-disk encoding, and errors.
pub mod error;
pub mod format;
pub mod record;
pub mod store;
