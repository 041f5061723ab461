//! Storage ports and orchestration services for Tenura.
//!
//! This crate provides:
//! - Repository traits the accounting services depend on
//! - Async services that prefetch reference data, run the pure checks from
//!   `tenura-core`, and hand every multi-row write to one repository call
//! - An in-memory backend with JSON snapshot loading

pub mod error;
pub mod memory;
pub mod repository;
pub mod services;
pub mod snapshot;

pub use error::{ServiceError, SourceError, StoreError};
pub use memory::MemoryStore;
pub use snapshot::StoreSnapshot;
