//! Storage capability traits
//!
//! The loader and the query/stats services depend only on these, never on
//! a concrete backend.

pub mod aggregate;
pub mod index;
pub mod load_lock;
pub mod observation;

pub use aggregate::AggregateStore;
pub use index::IndexStore;
pub use load_lock::LoadLockStore;
pub use observation::ObservationStore;
