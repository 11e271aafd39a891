//! Command-line handlers.

pub mod convert;
