// Roster store: ordered records with unique ids, snapshotted to one file per mutation.
// Opening is the only way to get a Store, so every operation runs against a loaded roster.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::slice;

use tempfile::NamedTempFile;

use crate::core::error::{Error, ErrorKind, io_error};
use crate::core::format;
use crate::core::record::Record;

pub const LISTING_SEPARATOR: &str = "---------------";

/// Result of writing the roster after a successful mutation.
#[derive(Debug)]
pub enum SaveStatus {
    Saved,
    /// The in-memory change stands; the backing file may still hold the previous snapshot.
    Failed(Error),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }

    pub fn warning(&self) -> Option<&Error> {
        match self {
            SaveStatus::Saved => None,
            SaveStatus::Failed(err) => Some(err),
        }
    }

    fn from_result(result: Result<(), Error>) -> Self {
        match result {
            Ok(()) => SaveStatus::Saved,
            Err(err) => SaveStatus::Failed(err),
        }
    }
}

#[derive(Debug)]
pub struct Opened {
    pub store: Store,
    /// Set when an existing file could not be read or decoded; the store starts empty.
    pub warning: Option<Error>,
}

#[derive(Debug)]
pub struct Removed {
    pub record: Record,
    pub save: SaveStatus,
}

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    records: Vec<Record>,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Opened {
        let path = path.as_ref().to_path_buf();
        match restore(&path) {
            Ok(records) => {
                tracing::debug!(path = %path.display(), count = records.len(), "loaded roster");
                Opened {
                    store: Self { path, records },
                    warning: None,
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no roster file yet");
                Opened {
                    store: Self::empty(path),
                    warning: None,
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "roster load failed");
                Opened {
                    store: Self::empty(path),
                    warning: Some(err),
                }
            }
        }
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            records: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn add(&mut self, record: Record) -> Result<SaveStatus, Error> {
        if self.records.iter().any(|existing| existing.id() == record.id()) {
            return Err(Error::new(ErrorKind::Duplicate)
                .with_message(format!("student with id {} already exists", record.id()))
                .with_id(record.id()));
        }
        self.records.push(record);
        Ok(SaveStatus::from_result(self.persist()))
    }

    pub fn remove(&mut self, id: i32) -> Result<Removed, Error> {
        let index = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| not_found(id))?;
        let record = self.records.remove(index);
        let save = SaveStatus::from_result(self.persist());
        Ok(Removed { record, save })
    }

    pub fn list_all(&self) -> Result<Listing<'_>, Error> {
        if self.records.is_empty() {
            return Err(Error::new(ErrorKind::Empty).with_message("no students to display"));
        }
        Ok(Listing {
            records: &self.records,
        })
    }

    pub fn find_one(&self, id: i32) -> Result<&Record, Error> {
        self.records
            .iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found(id))
    }

    // Full snapshot into a sibling temp file, rename over the backing file, then
    // sync the directory so the rename itself survives a crash.
    fn persist(&self) -> Result<(), Error> {
        let bytes = format::encode(&self.records)?;
        let dir = parent_dir(&self.path);
        fs::create_dir_all(dir).map_err(|err| io_error(err, dir))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|err| io_error(err, dir))?;
        tmp.write_all(&bytes)
            .map_err(|err| io_error(err, tmp.path()))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| io_error(err, tmp.path()))?;
        tmp.persist(&self.path)
            .map_err(|err| io_error(err.error, &self.path))?;
        sync_dir(dir)?;

        tracing::debug!(path = %self.path.display(), count = self.records.len(), "saved roster");
        Ok(())
    }
}

fn restore(path: &Path) -> Result<Vec<Record>, Error> {
    let bytes = fs::read(path).map_err(|err| io_error(err, path))?;
    format::decode(&bytes).map_err(|err| err.with_path(path))
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<(), Error> {
    let handle = fs::File::open(dir).map_err(|err| io_error(err, dir))?;
    handle.sync_all().map_err(|err| io_error(err, dir))
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<(), Error> {
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn not_found(id: i32) -> Error {
    Error::new(ErrorKind::NotFound)
        .with_message(format!("no student found with id {id}"))
        .with_id(id)
}

/// Non-empty view over the roster in insertion order.
///
/// Iteration can be restarted any number of times; nothing is copied.
#[derive(Clone, Copy, Debug)]
pub struct Listing<'a> {
    records: &'a [Record],
}

impl<'a> Listing<'a> {
    pub fn iter(&self) -> slice::Iter<'a, Record> {
        self.records.iter()
    }

    /// Each record paired with the separator printed above it.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'a Record)> + 'a {
        self.records.iter().map(|record| (LISTING_SEPARATOR, record))
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (separator, record) in self.entries() {
            out.push_str(separator);
            out.push('\n');
            out.push_str(&record.render());
            out.push('\n');
        }
        out.push_str(LISTING_SEPARATOR);
        out.push('\n');
        out.push_str(&format!("Total Students: {}", self.total()));
        out
    }
}

impl<'a> IntoIterator for &Listing<'a> {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
