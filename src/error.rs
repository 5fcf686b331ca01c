//! Unified error types for the Manifold AMM settlement core.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for
//! consumers.
//!
//! The taxonomy follows the session model: *protocol violations*
//! (wrong caller, double-lock, touched-token capacity) and *settlement
//! violations* (nonzero deltas at close) are fatal to the enclosing
//! session and never retried; *hook contract violations* propagate the
//! hook's own failure payload verbatim when one was provided, and a
//! generic [`AmmError::HookCallFailed`] otherwise.

use thiserror::Error;

use crate::domain::{Delta, TokenAddress};

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Unified error enum for the settlement core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A session is already active; the lock cannot be acquired again.
    #[error("session lock is already held")]
    AlreadyLocked,

    /// The caller is not the current session holder.
    #[error("caller is not the current lock owner")]
    NotLockOwner,

    /// A touched token still carried a nonzero delta when the session
    /// tried to close.
    #[error("token {token} not settled, outstanding delta {delta}")]
    TokenNotSettled {
        /// The first token found with a nonzero delta, in touch order.
        token: TokenAddress,
        /// The exact outstanding amount for that token.
        delta: Delta,
    },

    /// The per-session bound of 255 distinct touched tokens would be
    /// exceeded.
    #[error("too many distinct tokens touched in one session")]
    TooManyTokensTouched,

    /// A hook acknowledged with a selector other than the one it was
    /// invoked under.
    #[error("hook returned an invalid acknowledgement selector")]
    InvalidHookResponse,

    /// A hook call failed without providing a failure payload, or the
    /// hook was unreachable.
    #[error("hook call failed")]
    HookCallFailed,

    /// A hook call failed and provided its own failure payload, which is
    /// propagated verbatim.
    #[error("hook reverted: {0}")]
    HookRevert(String),

    /// A hook's declared permissions do not match the flags encoded in
    /// its address.
    #[error("hook address does not match declared permissions")]
    HookAddressMismatch,

    /// A hook address is structurally invalid for the pool it was paired
    /// with (returns-delta flag without its base flag, or a flagless
    /// non-sentinel address with a static fee).
    #[error("invalid hook address: {0}")]
    InvalidHookAddress(&'static str),

    /// A token or token pair failed validation.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A tick value is outside the valid range.
    #[error("invalid tick: {0}")]
    InvalidTick(&'static str),

    /// A tick spacing value is outside the valid range.
    #[error("invalid tick spacing: {0}")]
    InvalidTickSpacing(&'static str),

    /// A fee value failed validation.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// The pool identified by the key has already been initialized.
    #[error("pool already initialized")]
    PoolAlreadyInitialized,

    /// The pool identified by the key has not been initialized.
    #[error("pool not initialized")]
    PoolNotInitialized,

    /// Signed delta arithmetic overflowed.
    #[error("delta arithmetic overflow")]
    DeltaOverflow,

    /// A withdrawal exceeded the ledger's cached reserve or the vault's
    /// actual balance.
    #[error("insufficient balance: {0}")]
    InsufficientBalance(&'static str),

    /// The curve-math collaborator rejected an operation.
    #[error("pool operation rejected: {0}")]
    PoolOperation(&'static str),
}
