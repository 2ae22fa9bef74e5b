//! In-memory record store split across logical submodules.

mod error;
mod records;

pub use error::RecordError;
pub use records::RecordStore;
