//! Generic construction trait for pool instantiation from a key.
//!
//! [`PoolFactory`] provides a uniform interface for creating curve-math
//! state for a newly initialized pool. The orchestrator never constructs
//! pools itself — it asks the factory it was configured with, which lets
//! tests substitute scripted curve stubs and lets deployments choose
//! their curve implementation without touching the accounting core.
//!
//! # Validation Contract
//!
//! Implementations **must** validate that they can serve the key's
//! parameters (for example a curve that only supports certain tick
//! spacings). A successfully created pool is guaranteed to be in a valid
//! pre-initialization state: its price is unset until
//! [`CurvePool::initialize`](super::CurvePool::initialize) succeeds.

use crate::domain::PoolKey;
use crate::error::Result;
use crate::traits::CurvePool;

/// Factory seam producing curve-math state for a pool key.
pub trait PoolFactory {
    /// The curve implementation this factory produces.
    type Pool: CurvePool;

    /// Creates fresh, uninitialized curve state for the given key.
    ///
    /// The key is taken by reference because the orchestrator retains it
    /// as the pool map key.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolOperation`](crate::error::AmmError::PoolOperation)
    /// if the factory cannot serve the key's parameters.
    fn create(&self, key: &PoolKey) -> Result<Self::Pool>;
}
