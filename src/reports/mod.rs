//! Output surfaces: colorized console tables and CSV exports.

pub mod console;
pub mod csv;
