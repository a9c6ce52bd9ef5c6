//! Record model for the contribution drive.
//!
//! These are passive data types: a [`Contributor`] owns an ordered list of
//! [`Contribution`] events and exposes a handful of derived accessors. All
//! analytics live elsewhere and treat a collection of contributors as a
//! read-only snapshot.

mod contribution;
mod contributor;

pub use contribution::Contribution;
pub use contributor::Contributor;

/// Number of contributions required to complete the drive.
pub const COMPLETION_THRESHOLD: usize = 4;
