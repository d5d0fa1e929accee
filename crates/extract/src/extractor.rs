//! The extraction pass over a build output directory.

use crate::{
    artifact::{self, Artifact},
    config::ExtractConfig,
    metadata::ContractMetadata,
    select::{self, ContractDirectory},
};
use eyre::Result;
use extract_common::{errors::display_chain, fs, sh_eprintln, sh_println, sh_warn};
use serde::Serialize;
use std::{
    collections::HashMap,
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

/// A contract whose bytecode and metadata files were written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContract {
    pub contract_name: String,
    pub bytecode_length: usize,
    pub bytecode_file: PathBuf,
    pub metadata_file: PathBuf,
}

/// What happened to a single artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ArtifactOutcome {
    /// Both output files were written.
    Extracted(ExtractedContract),
    /// `bytecode.object` is the `0x` placeholder or too short.
    SkippedEmpty,
    /// The artifact has no `bytecode.object`, e.g. an interface.
    SkippedNoField,
    /// The artifact could not be read or interpreted.
    Failed { reason: String },
}

/// One processed artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactReport {
    /// Name of the contract directory, e.g. `MyCar.sol`.
    pub source_dir: String,
    /// Artifact file name, e.g. `MyCar.json`.
    pub file: String,
    pub outcome: ArtifactOutcome,
}

/// The result of an extraction run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub extracted: usize,
    pub skipped_empty: usize,
    pub skipped_no_field: usize,
    pub failed: usize,
    pub bytecode_dir: PathBuf,
    pub artifacts: Vec<ArtifactReport>,
}

impl Summary {
    fn new(bytecode_dir: PathBuf) -> Self {
        Self { bytecode_dir, ..Default::default() }
    }

    fn record(&mut self, report: ArtifactReport) {
        match report.outcome {
            ArtifactOutcome::Extracted(_) => self.extracted += 1,
            ArtifactOutcome::SkippedEmpty => self.skipped_empty += 1,
            ArtifactOutcome::SkippedNoField => self.skipped_no_field += 1,
            ArtifactOutcome::Failed { .. } => self.failed += 1,
        }
        self.artifacts.push(report);
    }

    /// Returns the contracts that were extracted, in processing order.
    pub fn extracted_contracts(&self) -> impl Iterator<Item = &ExtractedContract> {
        self.artifacts.iter().filter_map(|report| match &report.outcome {
            ArtifactOutcome::Extracted(contract) => Some(contract),
            _ => None,
        })
    }
}

/// Writes a `.bytecode` and a `.meta.json` file for every artifact with real bytecode.
///
/// Problems with individual artifacts are reported and skipped. Failing to list the build
/// output, to create the destination or to write an output file aborts the run.
#[derive(Debug)]
pub struct Extractor<'a> {
    config: &'a ExtractConfig,
    /// Contract name to the directory it was last extracted from during this run.
    written: HashMap<String, String>,
}

impl<'a> Extractor<'a> {
    pub fn new(config: &'a ExtractConfig) -> Self {
        Self { config, written: HashMap::new() }
    }

    /// Runs a full extraction pass.
    pub fn run(mut self) -> Result<Summary> {
        let bytecode_dir = self.prepare_destination()?;
        let out_dir = self.config.out_dir();
        let dirs = select::contract_directories(&out_dir, &self.config.contract_dir_patterns)?;
        debug!(out = %out_dir.display(), dirs = dirs.len(), "selected contract directories");

        let mut summary = Summary::new(bytecode_dir);
        for dir in &dirs {
            for path in dir.artifacts()? {
                let file = path.file_name().unwrap_or_default().to_string_lossy().into_owned();
                let outcome = self.process_artifact(dir, &path, &file, &summary.bytecode_dir)?;
                trace!(dir = %dir.name, %file, ?outcome, "processed artifact");
                summary.record(ArtifactReport { source_dir: dir.name.clone(), file, outcome });
            }
        }

        narrate(sh_println!());
        narrate(sh_println!("Extraction complete! Processed {} contracts.", summary.extracted));
        narrate(sh_println!("Bytecode files saved to: {}", summary.bytecode_dir.display()));
        Ok(summary)
    }

    /// Creates the destination directory and any missing parents.
    fn prepare_destination(&self) -> Result<PathBuf> {
        let bytecode_dir = self.config.bytecode_dir();
        fs::create_dir_all(&bytecode_dir)?;
        Ok(bytecode_dir)
    }

    /// Handles one artifact file.
    ///
    /// Only output write failures are returned as errors. Both output files are written before
    /// anything is printed about them.
    fn process_artifact(
        &mut self,
        dir: &ContractDirectory,
        path: &Path,
        file: &str,
        bytecode_dir: &Path,
    ) -> Result<ArtifactOutcome> {
        let Some(file_name) = path.file_name().and_then(OsStr::to_str) else {
            return Ok(failed(file, "file name is not valid UTF-8".to_string()));
        };

        let artifact = match Artifact::read(path) {
            Ok(artifact) => artifact,
            Err(err) => return Ok(failed(file, display_chain(&*err))),
        };

        let Some(bytecode) = artifact.bytecode else {
            debug!(%file, "no bytecode object, skipping");
            return Ok(ArtifactOutcome::SkippedNoField);
        };

        if artifact::is_empty_bytecode(&bytecode) {
            narrate(sh_println!("Skipping {file} - empty bytecode"));
            return Ok(ArtifactOutcome::SkippedEmpty);
        }

        let contract_name = artifact::contract_name(file_name).to_string();
        let bytecode_file_name = ContractMetadata::bytecode_file_name(&contract_name);
        let metadata_file_name = ContractMetadata::file_name(&contract_name);

        let bytecode_file = bytecode_dir.join(&bytecode_file_name);
        fs::write(&bytecode_file, &bytecode)?;
        let metadata = ContractMetadata::new(&contract_name, &dir.name, artifact.abi, &bytecode);
        let metadata_file = bytecode_dir.join(&metadata_file_name);
        fs::write_pretty_json_file(&metadata_file, &metadata)?;

        narrate(sh_println!("Extracted bytecode: {contract_name} -> {bytecode_file_name}"));
        narrate(sh_println!("Created metadata: {metadata_file_name}"));

        if let Some(previous) = self.written.insert(contract_name.clone(), dir.name.clone()) {
            narrate(sh_warn!(
                "{contract_name} from {} overwrote the files extracted from {previous}",
                dir.name
            ));
        }

        Ok(ArtifactOutcome::Extracted(ExtractedContract {
            contract_name,
            bytecode_length: metadata.bytecode_length,
            bytecode_file,
            metadata_file,
        }))
    }
}

/// Reports a per-artifact failure on stderr.
fn failed(file: &str, reason: String) -> ArtifactOutcome {
    narrate(sh_eprintln!("Error processing {file}: {reason}"));
    ArtifactOutcome::Failed { reason }
}

/// Printing is best effort: a closed stdout or stderr never aborts the run.
fn narrate(result: io::Result<()>) {
    if let Err(err) = result {
        debug!(%err, "failed to print progress");
    }
}
