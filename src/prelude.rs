//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use manifold_amm::prelude::*;
//! ```
//!
//! This re-exports the most frequently used domain types, the collaborator
//! traits, hook types, the session ledger, the pool manager, and the error
//! types so that consumers don't need to import from individual submodules.

// Re-export domain types
pub use crate::domain::{Address, BalanceDelta, Delta, Fee, PoolKey, Tick, TokenAddress};

// Re-export collaborator traits
pub use crate::traits::{
    CurvePool, MemoryVault, ModifyParams, PoolFactory, PoolSnapshot, SqrtPrice, SwapParams, Vault,
};

// Re-export hook types
pub use crate::hooks::{
    ExtensionPoint, Hook, HookAck, HookAddress, HookCall, HookDispatcher, HookFlag, HookRevert,
    Permissions,
};

// Re-export the session ledger
pub use crate::session::{PersistentStore, SessionLedger, SlotStore, TransientStore, MAX_TOUCHED};

// Re-export the pool manager
pub use crate::manager::PoolManager;

// Re-export error types
pub use crate::error::{AmmError, Result};
