//! Error types and helpers to render error chains.

mod fs;
pub use fs::FsPathError;

use std::{error::Error, iter};

/// Returns the messages of `error` and each of its sources, outermost first.
///
/// A source whose message is already contained in the previous one is dropped, so an fs error
/// like `failed to read from "Car.json": not found` caused by `not found` yields one entry.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut messages: Vec<String> = Vec::new();
    for cause in iter::successors(Some(error), |&err| err.source()) {
        let message = cause.to_string();
        let message = message.trim();
        if messages.last().is_some_and(|last| last.contains(message)) {
            continue;
        }
        messages.push(message.to_string());
    }
    messages
}

/// Renders `error` and its distinct sources on a single line, separated by `; `.
pub fn display_chain(error: &(dyn Error + 'static)) -> String {
    dedup_chain(error).join("; ")
}
