//! Selection of contract directories and enumeration of their artifacts.

use crate::artifact::ARTIFACT_SUFFIX;
use extract_common::{errors::FsPathError, fs, sh_warn};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Directory name fragments selected when nothing else is configured.
pub const DEFAULT_CONTRACT_DIR_PATTERNS: &[&str] = &["Car", ".sol"];

/// A directory of the build output that holds the artifacts of one source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractDirectory {
    /// The directory name, e.g. `MyCar.sol`.
    pub name: String,
    pub path: PathBuf,
}

impl ContractDirectory {
    /// Returns the `.json` files directly inside this directory.
    pub fn artifacts(&self) -> Result<Vec<PathBuf>, FsPathError> {
        fs::files_with_suffix(&self.path, ARTIFACT_SUFFIX)
    }
}

/// Returns `true` if `name` contains any of `patterns` as a literal substring.
pub fn is_contract_dir(name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| name.contains(pattern.as_str()))
}

/// Lists the immediate subdirectories of `out` selected by `patterns`.
///
/// Entries are sorted by name. Directories whose name is not valid UTF-8 are skipped with a
/// warning. Fails if `out` cannot be listed.
pub fn contract_directories(
    out: &Path,
    patterns: &[String],
) -> Result<Vec<ContractDirectory>, FsPathError> {
    let dirs = fs::subdirs_matching(out, |name| is_contract_dir(name, patterns))?;
    Ok(dirs
        .into_iter()
        .filter_map(|path| {
            let Some(name) = path.file_name().and_then(OsStr::to_str) else {
                let _ = sh_warn!("Skipping {}: name is not valid UTF-8", path.display());
                return None;
            };
            Some(ContractDirectory { name: name.to_string(), path })
        })
        .collect())
}
