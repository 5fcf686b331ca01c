//! Hook permission encoding and extension-point dispatch.
//!
//! External logic observes and modifies pool operations through fixed
//! extension points. Which points fire for a pool is encoded in the
//! hook's own 160-bit address ([`address`]); invoking the collaborator
//! and validating its acknowledgement is [`dispatcher`]'s job.

mod address;
mod dispatcher;

pub use address::{HookAddress, HookFlag, Permissions};
pub use dispatcher::{ExtensionPoint, Hook, HookAck, HookCall, HookDispatcher, HookRevert};
