//! The metadata record written next to each extracted bytecode file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extension of the raw bytecode output file.
pub const BYTECODE_EXTENSION: &str = "bytecode";

/// Suffix of the metadata output file.
pub const METADATA_SUFFIX: &str = ".meta.json";

/// Summary of one extracted contract, serialized as `<contractName>.meta.json`.
///
/// Field order is part of the output format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractMetadata {
    pub contract_name: String,
    /// Name of the directory the artifact was found in, e.g. `MyCar.sol`.
    pub source_file: String,
    pub abi: Value,
    /// Length of the hex string in characters, not the decoded byte length.
    pub bytecode_length: usize,
    #[serde(with = "timestamp")]
    pub extracted_at: DateTime<Utc>,
}

impl ContractMetadata {
    /// Builds the record for `bytecode`, stamped with the current time.
    pub fn new(
        contract_name: impl Into<String>,
        source_file: impl Into<String>,
        abi: Value,
        bytecode: &str,
    ) -> Self {
        Self {
            contract_name: contract_name.into(),
            source_file: source_file.into(),
            abi,
            bytecode_length: bytecode.chars().count(),
            extracted_at: Utc::now(),
        }
    }

    /// File name of the bytecode output for `contract_name`.
    pub fn bytecode_file_name(contract_name: &str) -> String {
        format!("{contract_name}.{BYTECODE_EXTENSION}")
    }

    /// File name of the metadata output for `contract_name`.
    pub fn file_name(contract_name: &str) -> String {
        format!("{contract_name}{METADATA_SUFFIX}")
    }
}

/// RFC 3339 in UTC with millisecond precision and a `Z` suffix.
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(super) fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&s).map(|ts| ts.with_timezone(&Utc)).map_err(D::Error::custom)
    }
}
