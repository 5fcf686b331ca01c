//! # Manifold AMM
//!
//! Settlement core for a hook-extensible AMM: flash accounting over a
//! single lock, address-encoded hook permissions, and pool orchestration
//! with curve math held behind a trait.
//!
//! All pools share one [`PoolManager`](manager::PoolManager). A caller
//! acquires the session lock once, performs any number of operations
//! against any number of pools, and the session closes only when the net
//! delta of every touched token is exactly zero — so many operations
//! net into at most one transfer per token, and a debt on one token can
//! be paid with proceeds just received on another.
//!
//! Per-pool behavior is extended through hooks: external collaborators
//! whose capabilities are read out of the top 14 bits of their own
//! 160-bit identifier, so a [`PoolKey`](domain::PoolKey) fully
//! determines which extension points will ever fire for that pool.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! manifold-amm = "0.1"
//! ```
//!
//! ## Run a settlement session
//!
//! ```rust
//! use manifold_amm::prelude::*;
//!
//! let mut ledger = SessionLedger::new();
//! let caller = Address::from_bytes([1u8; 20]);
//! let gold = TokenAddress::from_bytes([2u8; 20]);
//! let silver = TokenAddress::from_bytes([3u8; 20]);
//!
//! let result = ledger.lock(caller, |session| {
//!     // Owe 100 gold, receive 40 silver, then net both out.
//!     session.account_delta(gold, Delta::new(-100))?;
//!     session.account_delta(silver, Delta::new(40))?;
//!     session.account_delta(gold, Delta::new(100))?;
//!     session.account_delta(silver, Delta::new(-40))?;
//!     Ok(())
//! });
//! assert!(result.is_ok());
//! assert!(!ledger.is_locked());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller     │  lock(callback)
//! └──────┬──────┘
//!        │ swap / modify_liquidity / donate / take / settle
//!        ▼
//! ┌─────────────┐
//! │   Manager    │  routes operations, snapshots state for rollback
//! └──┬───────┬──┘
//!    │       │ before/after extension points
//!    │       ▼
//!    │  ┌─────────────┐
//!    │  │  Dispatcher  │  permission bits gate hook invocations
//!    │  └─────────────┘
//!    │ realized BalanceDelta
//!    ▼
//! ┌─────────────┐
//! │   Ledger     │  per-token deltas, zero-delta close check
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Delta`](domain::Delta), [`Fee`](domain::Fee), [`PoolKey`](domain::PoolKey), etc. |
//! | [`traits`] | Collaborator seams: [`CurvePool`](traits::CurvePool), [`PoolFactory`](traits::PoolFactory), [`Vault`](traits::Vault) |
//! | [`session`] | Flash accounting: [`SessionLedger`](session::SessionLedger) and its slot stores |
//! | [`hooks`] | Address-encoded permissions and [`HookDispatcher`](hooks::HookDispatcher) |
//! | [`manager`] | [`PoolManager`](manager::PoolManager) pool orchestration |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod domain;
pub mod error;
pub mod hooks;
pub mod manager;
pub mod prelude;
pub mod session;
pub mod traits;

#[cfg(test)]
mod proptest_properties;
