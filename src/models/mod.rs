//! Projection models.
//!
//! Models are implemented as small, pure functions so the pipeline code can
//! stay a plain loop over roles and tiers.

pub mod adjustment;
pub mod factors;
pub mod growth;
pub mod regression;

pub use adjustment::*;
pub use factors::*;
pub use growth::*;
pub use regression::*;
