//! Fundamental domain value types used throughout the settlement core.
//!
//! This module contains the core value types that model the flash
//! accounting domain: token and caller identities, signed deltas, fees,
//! ticks, and the structural pool key. All types use newtypes with
//! validated constructors to enforce invariants.

mod address;
mod balance_delta;
mod delta;
mod fee;
mod pool_key;
mod tick;
mod token_address;

pub use address::Address;
pub use balance_delta::BalanceDelta;
pub use delta::Delta;
pub use fee::Fee;
pub use pool_key::PoolKey;
pub use tick::Tick;
pub use token_address::TokenAddress;
