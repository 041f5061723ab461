//! Lead import staging.
//!
//! Imported leads go through stage -> validate -> commit. Validation derives
//! a status for every row; committing hands the ready rows to the caller and
//! freezes the batch.

pub mod batch;
pub mod error;
pub mod normalize;

pub use batch::{
    BatchStatus, ImportSummary, KnownContacts, LeadImportBatch, LeadImportRow, LeadRowInput,
    RowStatus,
};
pub use error::ImportError;
