use std::{
    io,
    path::{Path, PathBuf},
};

/// Various error variants for `fs` operations that serve as an addition to the io::Error which
/// does not provide any information about the path.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum FsPathError {
    /// Provides additional path context for [`std::fs::write`].
    #[error("failed to write to {path:?}: {source}")]
    Write { source: io::Error, path: PathBuf },
    /// Provides additional path context for [`std::fs::read_to_string`].
    #[error("failed to read from {path:?}: {source}")]
    Read { source: io::Error, path: PathBuf },
    /// Provides additional path context for [`std::fs::create_dir_all`].
    #[error("failed to create dir {path:?}: {source}")]
    CreateDir { source: io::Error, path: PathBuf },
    /// Provides additional path context for listing a directory.
    #[error("failed to read dir {path:?}: {source}")]
    ReadDir { source: io::Error, path: PathBuf },
    /// Provides additional path context for deserializing a json file.
    #[error("failed to parse json file {path:?}: {source}")]
    ReadJson { source: serde_json::Error, path: PathBuf },
    /// Provides additional path context for serializing a json file.
    #[error("failed to write json file {path:?}: {source}")]
    WriteJson { source: serde_json::Error, path: PathBuf },
}

impl FsPathError {
    /// Returns the complementary error variant for [`std::fs::write`].
    pub fn write(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Write { source, path: path.into() }
    }

    /// Returns the complementary error variant for [`std::fs::read_to_string`].
    pub fn read(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Read { source, path: path.into() }
    }

    /// Returns the complementary error variant for [`std::fs::create_dir_all`].
    pub fn create_dir(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::CreateDir { source, path: path.into() }
    }

    /// Returns the complementary error variant for listing a directory.
    pub fn read_dir(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::ReadDir { source, path: path.into() }
    }

    /// Returns the complementary error variant when reading a json file.
    pub fn read_json(source: serde_json::Error, path: impl Into<PathBuf>) -> Self {
        Self::ReadJson { source, path: path.into() }
    }

    /// Returns the complementary error variant when writing a json file.
    pub fn write_json(source: serde_json::Error, path: impl Into<PathBuf>) -> Self {
        Self::WriteJson { source, path: path.into() }
    }

    /// Returns the path this error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::Write { path, .. } |
            Self::Read { path, .. } |
            Self::CreateDir { path, .. } |
            Self::ReadDir { path, .. } |
            Self::ReadJson { path, .. } |
            Self::WriteJson { path, .. } => path,
        }
    }
}

impl AsRef<Path> for FsPathError {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}
