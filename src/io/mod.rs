//! Output helpers.
//!
//! - per-role projection CSV (`export`)
//! - projection report JSON (`report`)

pub mod export;
pub mod report;

pub use export::*;
pub use report::*;
