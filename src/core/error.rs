use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use libc::{EACCES, EPERM};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    NotFound,
    Duplicate,
    Empty,
    Permission,
    Corrupt,
    Io,
}

impl ErrorKind {
    /// True for the kinds raised when the backing file cannot be read or written.
    pub fn is_persistence(self) -> bool {
        matches!(self, ErrorKind::Permission | ErrorKind::Corrupt | ErrorKind::Io)
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    path: Option<PathBuf>,
    id: Option<i32>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            path: None,
            id: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(id) = self.id {
            write!(f, " (id: {id})")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Duplicate => 4,
        ErrorKind::Empty => 5,
        ErrorKind::Permission => 6,
        ErrorKind::Corrupt => 7,
        ErrorKind::Io => 8,
    }
}

pub(crate) fn io_error_kind(err: &io::Error) -> ErrorKind {
    let errno = err.raw_os_error().unwrap_or_default();
    if errno == EACCES || errno == EPERM {
        return ErrorKind::Permission;
    }
    match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::Permission,
        _ => ErrorKind::Io,
    }
}

pub(crate) fn io_error(err: io::Error, path: &Path) -> Error {
    Error::new(io_error_kind(&err)).with_path(path).with_source(err)
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, io_error_kind, to_exit_code};
    use std::error::Error as StdError;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::NotFound, 3),
            (ErrorKind::Duplicate, 4),
            (ErrorKind::Empty, 5),
            (ErrorKind::Permission, 6),
            (ErrorKind::Corrupt, 7),
            (ErrorKind::Io, 8),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn io_errors_map_to_expected_kinds() {
        let err = std::io::Error::from_raw_os_error(libc::EACCES);
        assert_eq!(io_error_kind(&err), ErrorKind::Permission);

        let err = std::io::Error::from_raw_os_error(libc::EPERM);
        assert_eq!(io_error_kind(&err), ErrorKind::Permission);

        let err = std::io::Error::from_raw_os_error(libc::ENOENT);
        assert_eq!(io_error_kind(&err), ErrorKind::NotFound);

        let err = std::io::Error::from_raw_os_error(libc::ENOSPC);
        assert_eq!(io_error_kind(&err), ErrorKind::Io);
    }

    #[test]
    fn display_includes_context() {
        let err = Error::new(ErrorKind::Duplicate)
            .with_message("student already exists")
            .with_id(7);
        assert_eq!(err.to_string(), "Duplicate: student already exists (id: 7)");
        assert!(err.source().is_none());
    }

    #[test]
    fn persistence_kinds_are_flagged() {
        assert!(ErrorKind::Io.is_persistence());
        assert!(ErrorKind::Corrupt.is_persistence());
        assert!(ErrorKind::Permission.is_persistence());
        assert!(!ErrorKind::NotFound.is_persistence());
        assert!(!ErrorKind::Duplicate.is_persistence());
    }
}
