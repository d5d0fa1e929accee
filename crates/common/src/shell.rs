//! Global output shell.
//!
//! All user-facing narration goes through the [`Shell`] installed with [`Shell::set`], usually via
//! the `sh_*` macros.

use anstream::AutoStream;
use anstyle::{AnsiColor, Effects, Style};
use serde::Serialize;
use std::{
    fmt,
    io::{self, Write},
    sync::{Mutex, MutexGuard, PoisonError},
};

const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
const WARN: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);

static GLOBAL_SHELL: Mutex<Shell> = Mutex::new(Shell::new());

/// Prints to stdout through the global shell, unless it is quiet or in JSON mode.
#[macro_export]
macro_rules! sh_print {
    ($($t:tt)*) => {
        $crate::shell::Shell::get().print_out(::core::format_args!($($t)*))
    };
}

/// Prints a line to stdout through the global shell, unless it is quiet or in JSON mode.
#[macro_export]
macro_rules! sh_println {
    () => {
        $crate::sh_print!("\n")
    };
    ($($t:tt)*) => {
        $crate::sh_print!("{}\n", ::core::format_args!($($t)*))
    };
}

/// Prints a line to stderr through the global shell.
#[macro_export]
macro_rules! sh_eprintln {
    ($($t:tt)*) => {
        $crate::shell::Shell::get().print_err(::core::format_args!($($t)*))
    };
}

/// Prints a `Warning:` line to stderr through the global shell.
#[macro_export]
macro_rules! sh_warn {
    ($($t:tt)*) => {
        $crate::shell::Shell::get().warn(::core::format_args!($($t)*))
    };
}

/// Prints an `Error:` line to stderr through the global shell.
#[macro_export]
macro_rules! sh_err {
    ($($t:tt)*) => {
        $crate::shell::Shell::get().error(::core::format_args!($($t)*))
    };
}

/// Whether to color the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color if the stream is a terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl From<ColorChoice> for anstream::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// How much narration to print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Only errors and warnings.
    Quiet,
    /// Progress and summary lines.
    #[default]
    Normal,
}

/// The shape of the final output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// A single JSON document on stdout, narration suppressed.
    Json,
}

/// Writes narration to stdout and diagnostics to stderr.
#[derive(Debug)]
pub struct Shell {
    color: ColorChoice,
    verbosity: Verbosity,
    format: OutputFormat,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Creates a shell with automatic coloring and normal verbosity.
    pub const fn new() -> Self {
        Self { color: ColorChoice::Auto, verbosity: Verbosity::Normal, format: OutputFormat::Text }
    }

    /// Creates a shell with the given color choice and verbosity.
    pub const fn new_with(color: ColorChoice, verbosity: Verbosity) -> Self {
        Self { color, verbosity, format: OutputFormat::Text }
    }

    /// Sets the output format.
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Installs this shell as the global one.
    pub fn set(self) {
        *Self::get() = self;
    }

    /// Locks the global shell.
    pub fn get() -> MutexGuard<'static, Self> {
        GLOBAL_SHELL.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if the global shell is in JSON mode.
    pub fn is_json() -> bool {
        Self::get().format == OutputFormat::Json
    }

    /// Returns `true` if narration is suppressed.
    pub fn is_silent(&self) -> bool {
        self.verbosity == Verbosity::Quiet || self.format == OutputFormat::Json
    }

    /// Prints narration to stdout.
    pub fn print_out(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let mut out = AutoStream::new(io::stdout().lock(), self.color.into());
        out.write_fmt(args)?;
        out.flush()
    }

    /// Prints a line to stderr.
    pub fn print_err(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        let mut err = AutoStream::new(io::stderr().lock(), self.color.into());
        writeln!(err, "{args}")
    }

    /// Prints a warning to stderr.
    pub fn warn(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.print_err(format_args!("{WARN}Warning{WARN:#}: {args}"))
    }

    /// Prints an error to stderr.
    pub fn error(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.print_err(format_args!("{ERROR}Error{ERROR:#}: {args}"))
    }

    /// Prints `value` as a pretty JSON document on stdout, regardless of verbosity.
    pub fn print_json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut out = io::stdout().lock();
        writeln!(out, "{json}")
    }
}
