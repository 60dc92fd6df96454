//! Purpose: Encode and decode the roster backing file.
//! Exports: `ROSTER_FORMAT_VERSION`, `encode`, `decode`.
//! Role: Single place that knows the on-disk JSON envelope.
//! Invariants: Records are written in insertion order and read back unchanged.
//! Invariants: Decoded documents never contain two records with the same id.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, ErrorKind};
use crate::core::record::Record;

pub const ROSTER_FORMAT_VERSION: u32 = 1;
pub const SUPPORTED_ROSTER_FORMAT_VERSIONS: &[u32] = &[ROSTER_FORMAT_VERSION];

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    students: &'a [Record],
}

#[derive(Deserialize)]
struct Document {
    version: u32,
    students: Vec<Record>,
}

pub fn encode(records: &[Record]) -> Result<Vec<u8>, Error> {
    let doc = DocumentRef {
        version: ROSTER_FORMAT_VERSION,
        students: records,
    };
    let mut bytes = serde_json::to_vec_pretty(&doc).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode roster")
            .with_source(err)
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn decode(bytes: &[u8]) -> Result<Vec<Record>, Error> {
    let doc: Document = serde_json::from_slice(bytes).map_err(|err| {
        Error::new(ErrorKind::Corrupt)
            .with_message("roster file is not valid")
            .with_source(err)
    })?;
    if !SUPPORTED_ROSTER_FORMAT_VERSIONS.contains(&doc.version) {
        return Err(version_error(doc.version));
    }

    let mut seen = HashSet::with_capacity(doc.students.len());
    for record in &doc.students {
        if !seen.insert(record.id()) {
            return Err(Error::new(ErrorKind::Corrupt)
                .with_message("roster file repeats a student id")
                .with_id(record.id()));
        }
    }
    Ok(doc.students)
}

fn version_error(detected: u32) -> Error {
    let supported = SUPPORTED_ROSTER_FORMAT_VERSIONS
        .iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Error::new(ErrorKind::Corrupt)
        .with_message(format!(
            "unsupported roster format version {detected} (supported: {supported})"
        ))
        .with_hint("Upgrade roster, or move the file aside to start a fresh roster.")
}
