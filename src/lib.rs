//! Purpose: Shared library crate used by the `roster` CLI and tests.
//! Exports: `api` (records, store, errors), `core`, and `notice`.
//! Role: Owns the student roster and its backing file; the CLI only renders results.
//! Invariants: No two records in a store share an id.
//! Invariants: The record count is always derived from the stored records.
pub mod api;
pub mod core;
pub mod notice;
