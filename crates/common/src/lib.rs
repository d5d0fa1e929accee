//! Common utilities for building and using the bytecode extraction tools.

#![warn(missing_docs)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod errors;
pub mod fs;
pub mod shell;
