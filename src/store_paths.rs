//! Purpose: Resolve where the roster backing file lives.
//! Exports: `default_data_dir`, `resolve_store_path`.
//! Role: Keep CLI path semantics in one place.
//! Invariants: Default location remains `~/.roster/students.json`.
//! Invariants: An explicit `--file` always wins over `--dir`.

use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_FILE_NAME: &str = "students.json";

pub(crate) fn default_data_dir() -> PathBuf {
    let home = std::env::var_os("HOME").unwrap_or_default();
    PathBuf::from(home).join(".roster")
}

pub(crate) fn resolve_store_path(file: Option<&Path>, dir: Option<&Path>) -> PathBuf {
    if let Some(file) = file {
        return file.to_path_buf();
    }
    match dir {
        Some(dir) => dir.join(DEFAULT_FILE_NAME),
        None => default_data_dir().join(DEFAULT_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILE_NAME, resolve_store_path};
    use std::path::{Path, PathBuf};

    #[test]
    fn explicit_file_wins() {
        let path = resolve_store_path(Some(Path::new("/data/a.json")), Some(Path::new("/other")));
        assert_eq!(path, PathBuf::from("/data/a.json"));
    }

    #[test]
    fn dir_gets_default_file_name() {
        let path = resolve_store_path(None, Some(Path::new("/data")));
        assert_eq!(path, Path::new("/data").join(DEFAULT_FILE_NAME));
    }

    #[test]
    fn default_lives_under_dot_roster() {
        let path = resolve_store_path(None, None);
        assert!(path.ends_with(".roster/students.json"));
    }
}
