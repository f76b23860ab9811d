//! Service layer for healthstat
//!
//! The loader, query and statistics services. They depend only on the
//! storage capability traits; the transport adapter and CLI sit on top.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod dataset;
mod error;
mod load_service;
mod query_service;
mod stats_service;
#[cfg(test)]
mod test_support;

pub use error::ServiceError;
pub use load_service::{LoadReport, LoadService};
pub use query_service::QueryService;
pub use stats_service::StatsService;
