//! abvcalc core library
//!
//! Estimates the strength of a mixed drink from its ingredients, and keeps a
//! persisted list of ingredients with known ABV for auto-filling.

pub mod coerce;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod units;

pub use coerce::parse_or_zero;
pub use directory::{Directory, DirectoryEvent, STORAGE_KEY};
pub use error::CalcError;
pub use ledger::{AbvLookup, Ledger, LedgerEvent};
pub use models::{EntryField, IngredientEntry, KnownField, KnownIngredient, Totals};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use units::{convert, VolumeUnit};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
