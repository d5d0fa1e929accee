//! Layered configuration for an extraction run.

use crate::select::DEFAULT_CONTRACT_DIR_PATTERNS;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional configuration file looked up in the root directory.
pub const CONFIG_FILE_NAME: &str = "extract.toml";

/// Prefix of environment variables that override configuration values, e.g. `EXTRACT_OUT`.
pub const ENV_PREFIX: &str = "EXTRACT_";

/// Where to read artifacts from and where to write the extracted files to.
///
/// Values are merged from, in increasing priority: the defaults, `<root>/extract.toml`,
/// `EXTRACT_*` environment variables and command line flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Directory that relative `out` and `bytecode` paths resolve against.
    pub root: PathBuf,
    /// Build output directory holding one subdirectory per source file.
    pub out: PathBuf,
    /// Destination of the `.bytecode` and `.meta.json` files.
    pub bytecode: PathBuf,
    /// A subdirectory of `out` is scanned if its name contains any of these.
    pub contract_dir_patterns: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            out: PathBuf::from("out"),
            bytecode: PathBuf::from("bytecode"),
            contract_dir_patterns: DEFAULT_CONTRACT_DIR_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl ExtractConfig {
    /// Returns the default configuration rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), ..Default::default() }
    }

    /// Returns the figment of all configuration sources for `root`, without command line flags.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let root = root.as_ref();
        Figment::from(Serialized::defaults(Self::with_root(root)))
            .merge(Toml::file(root.join(CONFIG_FILE_NAME)))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["debug"]))
    }

    /// Loads the configuration for `root` from the defaults, the config file and the environment.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::figment_with_root(root).extract()
    }

    /// The resolved build output directory.
    pub fn out_dir(&self) -> PathBuf {
        self.root.join(&self.out)
    }

    /// The resolved destination directory.
    pub fn bytecode_dir(&self) -> PathBuf {
        self.root.join(&self.bytecode)
    }
}
