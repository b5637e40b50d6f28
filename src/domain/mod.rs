//! Domain types used throughout both pipelines.
//!
//! This module defines:
//!
//! - salary and factor tables (`RoleSalaryBase`, `FactorTable`, `SkillFactorMap`)
//! - projection inputs/outputs (`GrowthInput`, `ProjectedSalary`, `ProjectionConfig`)
//! - extraction records (`TaggedToken`, `StructuredPosting`)

pub mod types;

pub use types::*;
