//! Command line arguments of `extract-bytecode`.

use crate::{
    config::ExtractConfig,
    extractor::{Extractor, Summary},
};
use clap::{Parser, ValueHint};
use extract_cli::opts::GlobalArgs;
use extract_common::shell::Shell;
use eyre::{Context, Result};
use figment::providers::Serialized;
use serde::Serialize;
use std::path::PathBuf;

/// Extract contract bytecode and metadata from compiled build artifacts.
///
/// Scans the subdirectories of the build output whose name contains `Car` or `.sol` and writes a
/// `<Contract>.bytecode` and a `<Contract>.meta.json` file for every artifact with bytecode.
#[derive(Clone, Debug, Parser, Serialize)]
#[command(name = "extract-bytecode", version)]
pub struct ExtractArgs {
    /// The project's root path.
    ///
    /// Relative `--out` and `--bytecode-dir` paths resolve against it. Defaults to the current
    /// working directory.
    #[arg(long, value_hint = ValueHint::DirPath, value_name = "PATH")]
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// The build output directory to read artifacts from.
    #[arg(long, short, value_hint = ValueHint::DirPath, value_name = "PATH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,

    /// The directory to write the bytecode and metadata files to.
    #[arg(long = "bytecode-dir", short, value_hint = ValueHint::DirPath, value_name = "PATH")]
    #[serde(rename = "bytecode", skip_serializing_if = "Option::is_none")]
    pub bytecode_dir: Option<PathBuf>,

    #[command(flatten)]
    #[serde(skip)]
    pub global: GlobalArgs,
}

impl ExtractArgs {
    /// Resolves the configuration, with these arguments taking precedence over every other
    /// source.
    pub fn load_config(&self) -> Result<ExtractConfig> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().wrap_err("failed to get current directory")?,
        };
        let config = ExtractConfig::figment_with_root(&root)
            .merge(Serialized::defaults(self))
            .extract::<ExtractConfig>()
            .wrap_err("failed to load configuration")?;
        Ok(ExtractConfig { root, ..config })
    }

    pub fn run(self) -> Result<Summary> {
        let config = self.load_config()?;
        debug!(?config, "loaded configuration");
        let summary = Extractor::new(&config).run()?;
        if Shell::is_json() {
            Shell::get().print_json(&summary)?;
        }
        Ok(summary)
    }
}
