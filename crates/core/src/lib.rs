//! Core types for healthstat
//!
//! The observation record, raw-row validation, lookup filters, aggregate
//! records and configuration shared by every other crate.

mod config;
mod constants;
mod env_config;
mod error;
mod observation;
mod stats;

pub use config::*;
pub use constants::*;
pub use env_config::{env_non_empty, env_parse_with_default};
pub use error::*;
pub use observation::*;
pub use stats::*;
