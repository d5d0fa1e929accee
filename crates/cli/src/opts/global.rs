use clap::{ArgAction, Parser};
use extract_common::shell::{ColorChoice, OutputFormat, Shell, Verbosity};

/// Global arguments for the CLI.
#[derive(Clone, Debug, Default, Parser)]
pub struct GlobalArgs {
    /// Do not print progress messages.
    #[arg(long, short, global = true, alias = "silent")]
    pub quiet: bool,

    /// Print the extraction summary as JSON instead of progress messages.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log messages coloring.
    #[arg(long, global = true, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Verbosity level of the diagnostic log.
    ///
    /// Pass multiple times to increase the verbosity (e.g. -v, -vv, -vvv).
    /// `RUST_LOG` overrides this.
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbosity: u8,
}

impl GlobalArgs {
    /// Initialize the global shell and the tracing subscriber.
    pub fn init(&self) -> eyre::Result<()> {
        self.shell().set();
        crate::utils::subscriber(self.verbosity);
        Ok(())
    }

    /// Create a new shell instance from these arguments.
    pub fn shell(&self) -> Shell {
        let verbosity = if self.quiet { Verbosity::Quiet } else { Verbosity::Normal };
        let format = if self.json { OutputFormat::Json } else { OutputFormat::Text };
        Shell::new_with(self.color.unwrap_or_default(), verbosity).with_format(format)
    }
}
