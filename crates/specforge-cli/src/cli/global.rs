//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`] so `-v`, `-q`, `--no-color` and friends
//! work in any position on any invocation.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Args;

/// Global arguments for all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Raise the log level: `-v` info, `-vv` debug, `-vvv` trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Repeat to raise the log level: -v shows progress (info), \
                     -vv pipeline details (debug), -vvv everything (trace). \
                     Without it only warnings and errors are logged."
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Also honoured via the `NO_COLOR` environment variable
    /// (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// How results are rendered.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Resolve `Auto` against the terminal: an interactive run gets the
    /// human format, a piped or redirected one gets plain text.
    pub fn effective_format(&self) -> OutputFormat {
        match self.output_format {
            OutputFormat::Auto => {
                if io::stdout().is_terminal() {
                    OutputFormat::Human
                } else {
                    OutputFormat::Plain
                }
            }
            other => other,
        }
    }
}

/// How the CLI renders results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pick `Human` or `Plain` based on whether stdout is a terminal.
    #[default]
    Auto,
    /// Indicators and colour for interactive use.
    Human,
    /// The same text without ANSI codes.
    Plain,
    /// A machine-readable JSON summary.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: format,
        }
    }

    #[test]
    fn explicit_formats_resolve_to_themselves() {
        for format in [OutputFormat::Human, OutputFormat::Plain, OutputFormat::Json] {
            assert_eq!(args_with(format).effective_format(), format);
        }
    }

    #[test]
    fn auto_never_stays_auto() {
        assert_ne!(
            args_with(OutputFormat::Auto).effective_format(),
            OutputFormat::Auto
        );
    }
}
