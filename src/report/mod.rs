//! Reporting utilities: terminal tables for projections and postings.

pub mod format;

pub use format::*;
