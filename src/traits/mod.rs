//! Collaborator seams: curve math, pool construction, and token custody.

mod curve_pool;
mod pool_factory;
mod vault;

pub use curve_pool::{CurvePool, ModifyParams, PoolSnapshot, SqrtPrice, SwapParams};
pub use pool_factory::PoolFactory;
pub use vault::{MemoryVault, Vault};
