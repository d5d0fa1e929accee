//! Error reports printed when `extract-bytecode` fails.

use extract_common::errors::{dedup_chain, display_chain};
use eyre::EyreHandler;
use std::{error::Error, fmt};

/// Environment variable that switches to `color-eyre` reports with backtraces.
pub const DEBUG_ENV: &str = "EXTRACT_DEBUG";

/// Renders a report as its outermost message followed by the distinct causes below it:
///
/// ```text
/// failed to load configuration
///
/// Context:
/// - invalid type: found string "yes", expected a sequence for key "contract_dir_patterns"
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Handler;

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_chain(error))
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let messages = dedup_chain(error);
        let Some((message, causes)) = messages.split_first() else { return Ok(()) };
        f.write_str(message)?;
        if !causes.is_empty() {
            f.write_str("\n\nContext:")?;
            for cause in causes {
                write!(f, "\n- {cause}")?;
            }
        }
        Ok(())
    }
}

/// Installs the [`eyre`] and [`panic`](mod@std::panic) hooks as the global ones.
///
/// Reports use [`Handler`] unless [`DEBUG_ENV`] is set, in which case the `color-eyre` handler
/// with backtraces is installed instead. Panics always go through `color-eyre`.
pub fn install() {
    let panic_section =
        "This is a bug. Consider reporting it along with the artifact that triggered it.";
    let (panic_hook, debug_hook) =
        color_eyre::config::HookBuilder::default().panic_section(panic_section).into_hooks();
    panic_hook.install();

    let installed = if std::env::var_os(DEBUG_ENV).is_some() {
        debug_hook.install()
    } else {
        eyre::set_hook(Box::new(|_| Box::new(Handler)))
    };
    if let Err(err) = installed {
        debug!(%err, "failed to install eyre error hook");
    }
}
