//! `salary-forecast` library crate.
//!
//! The binary (`salcast`) is a thin wrapper around this library so that:
//!
//! - the projection and extraction pipelines are testable without spawning processes
//! - remote collaborators (tables, tagger) sit behind traits and can be stubbed
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod models;
pub mod report;
