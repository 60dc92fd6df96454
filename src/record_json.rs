//! Purpose: Shared JSON envelopes for records and listings on stdout.
//! Exports: `record_json`, `listing_json`.
//! Role: Keep `--json` output shape consistent across subcommands.
//! Invariants: Stable key names; listings are in insertion order.
//! Invariants: Listings carry `empty` so callers can tell "nothing to display" apart.

use roster::api::Record;
use serde_json::{Value, json};

pub(crate) fn record_json(record: &Record) -> Value {
    json!({
        "id": record.id(),
        "name": record.name(),
        "age": record.age(),
        "course": record.course(),
    })
}

pub(crate) fn listing_json<'a>(records: impl IntoIterator<Item = &'a Record>) -> Value {
    let students = records.into_iter().map(record_json).collect::<Vec<_>>();
    let total = students.len();
    json!({ "students": students, "total": total, "empty": total == 0 })
}
