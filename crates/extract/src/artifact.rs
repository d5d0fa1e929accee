//! Compiled contract artifacts as read from the build output directory.

use eyre::Result;
use extract_common::fs;
use serde_json::Value;
use std::path::Path;

/// The bytecode string the compiler emits for contracts without deployable code.
pub const EMPTY_BYTECODE: &str = "0x";

/// Bytecode strings shorter than this are treated as empty.
pub const MIN_BYTECODE_LEN: usize = 10;

/// File name suffix of artifact documents.
pub const ARTIFACT_SUFFIX: &str = ".json";

/// Errors for artifact documents that parse as JSON but cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact document is null")]
    NullDocument,
    #[error("`bytecode.object` must be a string, found {0}")]
    NonStringBytecode(&'static str),
}

/// The parts of a compiler artifact this tool cares about.
///
/// Any other field of the document is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    /// The hex string at `bytecode.object`, if it is set.
    pub bytecode: Option<String>,
    /// The ABI, passed through untouched. `[]` when the document has none.
    pub abi: Value,
}

impl Artifact {
    /// Reads and interprets the artifact at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let doc: Value = fs::read_json_file(path)?;
        Ok(Self::from_json(doc)?)
    }

    /// Interprets an already parsed artifact document.
    pub fn from_json(doc: Value) -> Result<Self, ArtifactError> {
        let mut doc = match doc {
            Value::Object(map) => map,
            Value::Null => return Err(ArtifactError::NullDocument),
            // Arrays and scalars carry no artifact fields.
            _ => return Ok(Self { bytecode: None, abi: empty_abi() }),
        };

        let bytecode = match doc.get("bytecode").and_then(|b| b.get("object")) {
            None => None,
            Some(value) if is_unset(value) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => return Err(ArtifactError::NonStringBytecode(json_type(other))),
        };

        let abi = match doc.remove("abi") {
            Some(abi) if !is_unset(&abi) => abi,
            _ => empty_abi(),
        };

        Ok(Self { bytecode, abi })
    }
}

/// Returns `true` if `bytecode` is the empty placeholder or too short to be real code.
pub fn is_empty_bytecode(bytecode: &str) -> bool {
    bytecode == EMPTY_BYTECODE || bytecode.chars().count() < MIN_BYTECODE_LEN
}

/// Returns the contract name for an artifact file name, i.e. the name without its `.json`
/// suffix.
pub fn contract_name(file_name: &str) -> &str {
    match file_name.strip_suffix(ARTIFACT_SUFFIX) {
        Some(name) if !name.is_empty() => name,
        _ => file_name,
    }
}

/// `null`, `false`, zero and the empty string count as an unset field.
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn empty_abi() -> Value {
    Value::Array(Vec::new())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
