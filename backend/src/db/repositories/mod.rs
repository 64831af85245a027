//! Repository implementations.
//!
//! - `local`: in-memory implementation for development and tests
pub mod local;

pub use local::LocalRepository;
