//! Small shared helpers that don't belong to any one subsystem.

use clap::ValueEnum;

/// Controls when console output uses ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Colorize when stdout is a terminal
    Auto,
    /// Always colorize
    Always,
    /// Never colorize
    Never,
}
