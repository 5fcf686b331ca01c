//! Flash accounting: the session ledger and its backing stores.

mod ledger;
mod store;

pub use ledger::{SessionLedger, MAX_TOUCHED};
pub use store::{PersistentStore, SlotStore, TransientStore};
