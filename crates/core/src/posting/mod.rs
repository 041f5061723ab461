//! Journal drafts and reversals.
//!
//! Everything that reaches the ledger does so as a [`JournalDraft`]: built
//! from a validated voucher or from one installment allocation slice. Posted
//! journals are never edited; they are cancelled by posting a reversal.

pub mod journal;
pub mod reversal;

pub use journal::{JournalDraft, JournalLine};
pub use reversal::reverse;
