//! # extract-bytecode
//!
//! Walks a build output directory of compiled contract artifacts (`out/<Source>.sol/<Name>.json`)
//! and writes, for every artifact that carries deployable code, the raw bytecode string to
//! `<Name>.bytecode` and a `<Name>.meta.json` record with the contract's ABI.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod args;
pub mod artifact;
pub mod config;
pub mod extractor;
pub mod metadata;
pub mod select;

pub use config::ExtractConfig;
pub use extractor::{ArtifactOutcome, Extractor, Summary};
