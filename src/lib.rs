pub mod cli;
pub mod config;
pub mod core;

pub use crate::core::probe::{probe, FetchOutcome, FetchResult, ProbeReport};
