//! Contains various `std::fs` wrapper functions that also contain the target path in their errors.

use crate::errors::FsPathError;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    io,
    path::{Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

type Result<T> = std::result::Result<T, FsPathError>;

/// Wrapper for [`std::fs::create_dir_all`].
///
/// Succeeds if the directory already exists.
pub fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|err| FsPathError::create_dir(err, path))
}

/// Wrapper for [`std::fs::read_to_string`].
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|err| FsPathError::read(err, path))
}

/// Reads the JSON file and deserialize it into the provided type.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let s = read_to_string(path)?;
    serde_json::from_str(&s).map_err(|source| FsPathError::read_json(source, path))
}

/// Wrapper for [`std::fs::write`].
pub fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, contents).map_err(|err| FsPathError::write(err, path))
}

/// Writes the object as a pretty JSON object, indented by two spaces.
///
/// No trailing newline is appended.
pub fn write_pretty_json_file<T: Serialize>(path: &Path, obj: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(obj)
        .map_err(|source| FsPathError::write_json(source, path))?;
    write(path, json)
}

/// Lists the immediate children of `dir`, sorted by file name.
///
/// Fails if `dir` or any of its entries cannot be read.
pub fn read_dir_sorted(dir: impl AsRef<Path>) -> Result<Vec<DirEntry>> {
    let dir = dir.as_ref();
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map_err(|err| {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                // Loop errors carry no io error.
                let message = err.to_string();
                let source = err.into_io_error().unwrap_or_else(|| io::Error::other(message));
                FsPathError::read_dir(source, path)
            })
        })
        .collect()
}

/// Returns the immediate subdirectories of `dir` whose name satisfies `filter`.
pub fn subdirs_matching(
    dir: impl AsRef<Path>,
    filter: impl Fn(&str) -> bool,
) -> Result<Vec<PathBuf>> {
    Ok(read_dir_sorted(dir)?
        .into_iter()
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| filter(&entry.file_name().to_string_lossy()))
        .map(DirEntry::into_path)
        .collect())
}

/// Returns the immediate files in `dir` whose name ends with `suffix`.
///
/// Symlinks to files are included.
pub fn files_with_suffix(dir: impl AsRef<Path>, suffix: &str) -> Result<Vec<PathBuf>> {
    Ok(read_dir_sorted(dir)?
        .into_iter()
        .filter(|entry| entry.path().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .map(DirEntry::into_path)
        .collect())
}
