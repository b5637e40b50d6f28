//! Input tables: remote retrieval, JSON mapping and static fallbacks.

pub mod fallback;
pub mod remote;
pub mod tables;

pub use remote::{
    HttpTableFetcher, InputTables, Sourced, TableFetcher, load_input_tables, DEFAULT_DEMAND_URL,
    DEFAULT_GEOGRAPHIC_URL, DEFAULT_SALARY_URL, DEFAULT_SKILLS_URL,
};
