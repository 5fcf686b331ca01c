//! Hook invocation and acknowledgement validation.
//!
//! Every pool operation is bracketed by a pair of extension points. The
//! dispatcher checks the permission bit encoded in the pool's hook
//! address, no-ops when it is absent, and otherwise invokes the
//! registered collaborator. The collaborator must echo back the selector
//! of the point it was invoked under — proving it implements the
//! expected interface rather than silently succeeding through a fallback
//! path — and may append a signed delta when its returns-delta
//! permission allows.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::{HookAddress, HookFlag};
use crate::domain::{Address, BalanceDelta, Delta, PoolKey, Tick};
use crate::error::{AmmError, Result};
use crate::traits::{ModifyParams, SqrtPrice, SwapParams};

/// One of the ten named extension points a hook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Before pool initialization.
    BeforeInitialize,
    /// After pool initialization.
    AfterInitialize,
    /// Before liquidity is added.
    BeforeAddLiquidity,
    /// After liquidity is added.
    AfterAddLiquidity,
    /// Before liquidity is removed.
    BeforeRemoveLiquidity,
    /// After liquidity is removed.
    AfterRemoveLiquidity,
    /// Before a swap.
    BeforeSwap,
    /// After a swap.
    AfterSwap,
    /// Before a donation.
    BeforeDonate,
    /// After a donation.
    AfterDonate,
}

impl ExtensionPoint {
    /// The stable 4-byte selector a hook must echo when acknowledging an
    /// invocation under this point.
    #[must_use]
    pub const fn selector(&self) -> [u8; 4] {
        match self {
            Self::BeforeInitialize => *b"bIni",
            Self::AfterInitialize => *b"aIni",
            Self::BeforeAddLiquidity => *b"bAdd",
            Self::AfterAddLiquidity => *b"aAdd",
            Self::BeforeRemoveLiquidity => *b"bRem",
            Self::AfterRemoveLiquidity => *b"aRem",
            Self::BeforeSwap => *b"bSwp",
            Self::AfterSwap => *b"aSwp",
            Self::BeforeDonate => *b"bDon",
            Self::AfterDonate => *b"aDon",
        }
    }

    /// The subscription flag gating this point.
    #[must_use]
    pub const fn flag(&self) -> HookFlag {
        match self {
            Self::BeforeInitialize => HookFlag::BeforeInitialize,
            Self::AfterInitialize => HookFlag::AfterInitialize,
            Self::BeforeAddLiquidity => HookFlag::BeforeAddLiquidity,
            Self::AfterAddLiquidity => HookFlag::AfterAddLiquidity,
            Self::BeforeRemoveLiquidity => HookFlag::BeforeRemoveLiquidity,
            Self::AfterRemoveLiquidity => HookFlag::AfterRemoveLiquidity,
            Self::BeforeSwap => HookFlag::BeforeSwap,
            Self::AfterSwap => HookFlag::AfterSwap,
            Self::BeforeDonate => HookFlag::BeforeDonate,
            Self::AfterDonate => HookFlag::AfterDonate,
        }
    }

    /// The returns-delta flag for the four delta-capable points.
    #[must_use]
    pub const fn returns_delta_flag(&self) -> Option<HookFlag> {
        match self {
            Self::BeforeSwap => Some(HookFlag::BeforeSwapReturnsDelta),
            Self::AfterSwap => Some(HookFlag::AfterSwapReturnsDelta),
            Self::AfterAddLiquidity => Some(HookFlag::AfterAddLiquidityReturnsDelta),
            Self::AfterRemoveLiquidity => Some(HookFlag::AfterRemoveLiquidityReturnsDelta),
            _ => None,
        }
    }
}

/// The payload delivered to a hook: the caller's identity, the pool, the
/// operation's parameters, and — for "after" points — the operation's
/// realized balance movement.
#[derive(Debug, Clone, Copy)]
#[allow(missing_docs)]
pub enum HookCall<'a> {
    BeforeInitialize {
        sender: Address,
        key: &'a PoolKey,
        price: SqrtPrice,
    },
    AfterInitialize {
        sender: Address,
        key: &'a PoolKey,
        price: SqrtPrice,
        tick: Tick,
    },
    BeforeAddLiquidity {
        sender: Address,
        key: &'a PoolKey,
        params: &'a ModifyParams,
    },
    AfterAddLiquidity {
        sender: Address,
        key: &'a PoolKey,
        params: &'a ModifyParams,
        delta: BalanceDelta,
    },
    BeforeRemoveLiquidity {
        sender: Address,
        key: &'a PoolKey,
        params: &'a ModifyParams,
    },
    AfterRemoveLiquidity {
        sender: Address,
        key: &'a PoolKey,
        params: &'a ModifyParams,
        delta: BalanceDelta,
    },
    BeforeSwap {
        sender: Address,
        key: &'a PoolKey,
        params: &'a SwapParams,
    },
    AfterSwap {
        sender: Address,
        key: &'a PoolKey,
        params: &'a SwapParams,
        delta: BalanceDelta,
    },
    BeforeDonate {
        sender: Address,
        key: &'a PoolKey,
        amount0: u128,
        amount1: u128,
    },
    AfterDonate {
        sender: Address,
        key: &'a PoolKey,
        amount0: u128,
        amount1: u128,
        delta: BalanceDelta,
    },
}

impl HookCall<'_> {
    /// The extension point this payload belongs to.
    #[must_use]
    pub const fn point(&self) -> ExtensionPoint {
        match self {
            Self::BeforeInitialize { .. } => ExtensionPoint::BeforeInitialize,
            Self::AfterInitialize { .. } => ExtensionPoint::AfterInitialize,
            Self::BeforeAddLiquidity { .. } => ExtensionPoint::BeforeAddLiquidity,
            Self::AfterAddLiquidity { .. } => ExtensionPoint::AfterAddLiquidity,
            Self::BeforeRemoveLiquidity { .. } => ExtensionPoint::BeforeRemoveLiquidity,
            Self::AfterRemoveLiquidity { .. } => ExtensionPoint::AfterRemoveLiquidity,
            Self::BeforeSwap { .. } => ExtensionPoint::BeforeSwap,
            Self::AfterSwap { .. } => ExtensionPoint::AfterSwap,
            Self::BeforeDonate { .. } => ExtensionPoint::BeforeDonate,
            Self::AfterDonate { .. } => ExtensionPoint::AfterDonate,
        }
    }

    /// The pool key carried by every payload variant.
    #[must_use]
    pub const fn key(&self) -> &PoolKey {
        match self {
            Self::BeforeInitialize { key, .. }
            | Self::AfterInitialize { key, .. }
            | Self::BeforeAddLiquidity { key, .. }
            | Self::AfterAddLiquidity { key, .. }
            | Self::BeforeRemoveLiquidity { key, .. }
            | Self::AfterRemoveLiquidity { key, .. }
            | Self::BeforeSwap { key, .. }
            | Self::AfterSwap { key, .. }
            | Self::BeforeDonate { key, .. }
            | Self::AfterDonate { key, .. } => key,
        }
    }
}

/// A hook's acknowledgement: the echoed selector, optionally followed by
/// a signed balance adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookAck {
    /// The selector the hook claims it was invoked under.
    pub selector: [u8; 4],
    /// A returned balance adjustment, honored only when the hook's
    /// returns-delta permission is set.
    pub delta: Option<Delta>,
}

impl HookAck {
    /// A well-formed acknowledgement for the given point.
    #[must_use]
    pub const fn ok(point: ExtensionPoint) -> Self {
        Self {
            selector: point.selector(),
            delta: None,
        }
    }

    /// A well-formed acknowledgement carrying a balance adjustment.
    #[must_use]
    pub const fn with_delta(point: ExtensionPoint, delta: Delta) -> Self {
        Self {
            selector: point.selector(),
            delta: Some(delta),
        }
    }
}

/// A hook's failure payload. `None` or an empty string is reported as a
/// generic [`AmmError::HookCallFailed`]; anything else propagates
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HookRevert(pub Option<String>);

impl HookRevert {
    /// A failure with no payload.
    #[must_use]
    pub const fn empty() -> Self {
        Self(None)
    }

    /// A failure carrying a reason.
    #[must_use]
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self(Some(reason.into()))
    }
}

/// The hook collaborator seam.
///
/// A hook receives every extension-point invocation through one method
/// and must acknowledge with the selector it was invoked under. State is
/// the hook's own concern; the dispatcher hands out `&mut self` so hooks
/// can record or act on what they observe.
pub trait Hook {
    /// Handles one extension-point invocation.
    ///
    /// # Errors
    ///
    /// Returns [`HookRevert`] to reject the enclosing operation; a
    /// non-empty reason is surfaced to the caller verbatim.
    fn on_call(
        &mut self,
        point: ExtensionPoint,
        call: &HookCall<'_>,
    ) -> core::result::Result<HookAck, HookRevert>;
}

/// Routes extension-point invocations to registered hook collaborators
/// and validates their acknowledgements.
#[derive(Default)]
pub struct HookDispatcher {
    hooks: HashMap<HookAddress, Box<dyn Hook>>,
}

impl HookDispatcher {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook collaborator under its address.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidHookAddress`] if the address carries a
    /// returns-delta flag without its base flag.
    pub fn register(&mut self, address: HookAddress, hook: Box<dyn Hook>) -> Result<()> {
        address.validate_flags()?;
        debug!(hook = %address, "hook registered");
        self.hooks.insert(address, hook);
        Ok(())
    }

    /// Invokes the hook at `address` with the given payload and
    /// validates the acknowledgement selector.
    ///
    /// # Errors
    ///
    /// - [`AmmError::HookRevert`] when the hook rejected with a payload.
    /// - [`AmmError::HookCallFailed`] when it rejected without one or is
    ///   unreachable.
    /// - [`AmmError::InvalidHookResponse`] when the echoed selector does
    ///   not match the extension point.
    pub fn call(&mut self, address: HookAddress, call: &HookCall<'_>) -> Result<HookAck> {
        let point = call.point();
        trace!(hook = %address, ?point, "dispatching hook call");
        let Some(hook) = self.hooks.get_mut(&address) else {
            return Err(AmmError::HookCallFailed);
        };
        let ack = match hook.on_call(point, call) {
            Ok(ack) => ack,
            Err(HookRevert(Some(reason))) if !reason.is_empty() => {
                return Err(AmmError::HookRevert(reason));
            }
            Err(_) => return Err(AmmError::HookCallFailed),
        };
        if ack.selector != point.selector() {
            return Err(AmmError::InvalidHookResponse);
        }
        Ok(ack)
    }

    /// Invokes the hook and extracts the returned balance adjustment
    /// when `expect_delta` is set; zero otherwise.
    ///
    /// `expect_delta` is derived from the returns-delta permission bit
    /// of the point being dispatched.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub fn call_with_delta(
        &mut self,
        address: HookAddress,
        call: &HookCall<'_>,
        expect_delta: bool,
    ) -> Result<Delta> {
        let ack = self.call(address, call)?;
        if expect_delta {
            Ok(ack.delta.unwrap_or(Delta::ZERO))
        } else {
            Ok(Delta::ZERO)
        }
    }

    fn expects_delta(key: &PoolKey, point: ExtensionPoint) -> bool {
        point
            .returns_delta_flag()
            .is_some_and(|flag| key.hooks().has_permission(flag))
    }

    // -- Lifecycle wrappers ---------------------------------------------------

    /// Before-initialize wrapper; no-op without the permission bit.
    ///
    /// # Errors
    ///
    /// Propagates hook contract violations from [`call`](Self::call).
    pub fn before_initialize(
        &mut self,
        sender: Address,
        key: &PoolKey,
        price: SqrtPrice,
    ) -> Result<()> {
        if !key.hooks().has_permission(HookFlag::BeforeInitialize) {
            return Ok(());
        }
        self.call(
            key.hooks(),
            &HookCall::BeforeInitialize { sender, key, price },
        )
        .map(|_| ())
    }

    /// After-initialize wrapper; no-op without the permission bit.
    ///
    /// # Errors
    ///
    /// Propagates hook contract violations from [`call`](Self::call).
    pub fn after_initialize(
        &mut self,
        sender: Address,
        key: &PoolKey,
        price: SqrtPrice,
        tick: Tick,
    ) -> Result<()> {
        if !key.hooks().has_permission(HookFlag::AfterInitialize) {
            return Ok(());
        }
        self.call(
            key.hooks(),
            &HookCall::AfterInitialize {
                sender,
                key,
                price,
                tick,
            },
        )
        .map(|_| ())
    }

    /// Before-modify wrapper. The extension point is selected by the
    /// sign of the requested liquidity change: positive dispatches
    /// before-add-liquidity, non-positive before-remove-liquidity.
    ///
    /// # Errors
    ///
    /// Propagates hook contract violations from [`call`](Self::call).
    pub fn before_modify_position(
        &mut self,
        sender: Address,
        key: &PoolKey,
        params: &ModifyParams,
    ) -> Result<()> {
        let (flag, call) = if params.is_add() {
            (
                HookFlag::BeforeAddLiquidity,
                HookCall::BeforeAddLiquidity { sender, key, params },
            )
        } else {
            (
                HookFlag::BeforeRemoveLiquidity,
                HookCall::BeforeRemoveLiquidity { sender, key, params },
            )
        };
        if !key.hooks().has_permission(flag) {
            return Ok(());
        }
        self.call(key.hooks(), &call).map(|_| ())
    }

    /// After-modify wrapper. Mutually exclusive with its counterpart by
    /// the same sign rule as
    /// [`before_modify_position`](Self::before_modify_position). A
    /// hook-returned delta is folded into the `amount0` component of the
    /// realized movement.
    ///
    /// # Errors
    ///
    /// Propagates hook contract violations and
    /// [`AmmError::DeltaOverflow`] from folding.
    pub fn after_modify_position(
        &mut self,
        sender: Address,
        key: &PoolKey,
        params: &ModifyParams,
        delta: BalanceDelta,
    ) -> Result<BalanceDelta> {
        let (point, call) = if params.is_add() {
            (
                ExtensionPoint::AfterAddLiquidity,
                HookCall::AfterAddLiquidity {
                    sender,
                    key,
                    params,
                    delta,
                },
            )
        } else {
            (
                ExtensionPoint::AfterRemoveLiquidity,
                HookCall::AfterRemoveLiquidity {
                    sender,
                    key,
                    params,
                    delta,
                },
            )
        };
        if !key.hooks().has_permission(point.flag()) {
            return Ok(delta);
        }
        let expect = Self::expects_delta(key, point);
        let hook_delta = self.call_with_delta(key.hooks(), &call, expect)?;
        delta.fold_amount0(hook_delta)
    }

    /// Before-swap wrapper. Returns the adjustment the hook applies to
    /// the specified amount; zero without the permission or
    /// returns-delta bit.
    ///
    /// # Errors
    ///
    /// Propagates hook contract violations from [`call`](Self::call).
    pub fn before_swap(
        &mut self,
        sender: Address,
        key: &PoolKey,
        params: &SwapParams,
    ) -> Result<Delta> {
        if !key.hooks().has_permission(HookFlag::BeforeSwap) {
            return Ok(Delta::ZERO);
        }
        let expect = Self::expects_delta(key, ExtensionPoint::BeforeSwap);
        self.call_with_delta(
            key.hooks(),
            &HookCall::BeforeSwap { sender, key, params },
            expect,
        )
    }

    /// After-swap wrapper. A hook-returned delta is folded into the
    /// unspecified-side component of the realized movement: `amount1`
    /// when swapping zero-for-one, `amount0` otherwise.
    ///
    /// # Errors
    ///
    /// Propagates hook contract violations and
    /// [`AmmError::DeltaOverflow`] from folding.
    pub fn after_swap(
        &mut self,
        sender: Address,
        key: &PoolKey,
        params: &SwapParams,
        delta: BalanceDelta,
    ) -> Result<BalanceDelta> {
        if !key.hooks().has_permission(HookFlag::AfterSwap) {
            return Ok(delta);
        }
        let expect = Self::expects_delta(key, ExtensionPoint::AfterSwap);
        let hook_delta = self.call_with_delta(
            key.hooks(),
            &HookCall::AfterSwap {
                sender,
                key,
                params,
                delta,
            },
            expect,
        )?;
        if params.zero_for_one {
            delta.fold_amount1(hook_delta)
        } else {
            delta.fold_amount0(hook_delta)
        }
    }

    /// Before-donate wrapper; no-op without the permission bit.
    ///
    /// # Errors
    ///
    /// Propagates hook contract violations from [`call`](Self::call).
    pub fn before_donate(
        &mut self,
        sender: Address,
        key: &PoolKey,
        amount0: u128,
        amount1: u128,
    ) -> Result<()> {
        if !key.hooks().has_permission(HookFlag::BeforeDonate) {
            return Ok(());
        }
        self.call(
            key.hooks(),
            &HookCall::BeforeDonate {
                sender,
                key,
                amount0,
                amount1,
            },
        )
        .map(|_| ())
    }

    /// After-donate wrapper; no-op without the permission bit.
    ///
    /// # Errors
    ///
    /// Propagates hook contract violations from [`call`](Self::call).
    pub fn after_donate(
        &mut self,
        sender: Address,
        key: &PoolKey,
        amount0: u128,
        amount1: u128,
        delta: BalanceDelta,
    ) -> Result<()> {
        if !key.hooks().has_permission(HookFlag::AfterDonate) {
            return Ok(());
        }
        self.call(
            key.hooks(),
            &HookCall::AfterDonate {
                sender,
                key,
                amount0,
                amount1,
                delta,
            },
        )
        .map(|_| ())
    }
}

impl core::fmt::Debug for HookDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HookDispatcher")
            .field("registered", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Fee, TokenAddress};

    use std::cell::RefCell;
    use std::rc::Rc;

    // -- Test hooks -----------------------------------------------------------

    /// Shared invocation log so tests can observe a hook after handing
    /// ownership to the dispatcher.
    type CallLog = Rc<RefCell<Vec<ExtensionPoint>>>;

    /// Records every point it was invoked under and answers as scripted.
    struct RecordingHook {
        log: CallLog,
        delta: Option<Delta>,
        revert: Option<HookRevert>,
        wrong_selector: bool,
    }

    impl RecordingHook {
        fn well_behaved() -> Self {
            Self {
                log: Rc::new(RefCell::new(Vec::new())),
                delta: None,
                revert: None,
                wrong_selector: false,
            }
        }

        fn with_log(log: CallLog) -> Self {
            Self {
                log,
                delta: None,
                revert: None,
                wrong_selector: false,
            }
        }
    }

    impl Hook for RecordingHook {
        fn on_call(
            &mut self,
            point: ExtensionPoint,
            _call: &HookCall<'_>,
        ) -> core::result::Result<HookAck, HookRevert> {
            self.log.borrow_mut().push(point);
            if let Some(revert) = &self.revert {
                return Err(revert.clone());
            }
            if self.wrong_selector {
                return Ok(HookAck {
                    selector: *b"????",
                    delta: None,
                });
            }
            match self.delta {
                Some(delta) => Ok(HookAck::with_delta(point, delta)),
                None => Ok(HookAck::ok(point)),
            }
        }
    }

    fn tok(fill: u8) -> TokenAddress {
        TokenAddress::from_bytes([fill; 20])
    }

    fn key_with(hook: HookAddress) -> PoolKey {
        let Ok(key) = PoolKey::new(tok(1), tok(2), Fee::PIPS_3000, 60, hook) else {
            panic!("valid key");
        };
        key
    }

    fn sender() -> Address {
        Address::from_bytes([9u8; 20])
    }

    fn swap_params() -> SwapParams {
        SwapParams {
            zero_for_one: true,
            amount_specified: Delta::new(-100),
            price_limit: SqrtPrice::new(1),
        }
    }

    fn modify_params(liquidity_delta: i128) -> ModifyParams {
        let Ok(lo) = Tick::new(-60) else {
            panic!("valid tick");
        };
        let Ok(hi) = Tick::new(60) else {
            panic!("valid tick");
        };
        let Ok(params) = ModifyParams::new(lo, hi, liquidity_delta) else {
            panic!("valid params");
        };
        params
    }

    // -- Selector contract ----------------------------------------------------

    #[test]
    fn selectors_are_distinct() {
        let points = [
            ExtensionPoint::BeforeInitialize,
            ExtensionPoint::AfterInitialize,
            ExtensionPoint::BeforeAddLiquidity,
            ExtensionPoint::AfterAddLiquidity,
            ExtensionPoint::BeforeRemoveLiquidity,
            ExtensionPoint::AfterRemoveLiquidity,
            ExtensionPoint::BeforeSwap,
            ExtensionPoint::AfterSwap,
            ExtensionPoint::BeforeDonate,
            ExtensionPoint::AfterDonate,
        ];
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert_ne!(a.selector(), b.selector(), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn wrong_selector_is_invalid_response() {
        let addr = HookAddress::with_flags(&[HookFlag::BeforeSwap], 1);
        let mut dispatcher = HookDispatcher::new();
        let mut hook = RecordingHook::well_behaved();
        hook.wrong_selector = true;
        let Ok(()) = dispatcher.register(addr, Box::new(hook)) else {
            panic!("register");
        };
        let key = key_with(addr);
        let params = swap_params();
        assert_eq!(
            dispatcher.before_swap(sender(), &key, &params),
            Err(AmmError::InvalidHookResponse)
        );
    }

    #[test]
    fn revert_with_reason_propagates_verbatim() {
        let addr = HookAddress::with_flags(&[HookFlag::BeforeDonate], 1);
        let mut dispatcher = HookDispatcher::new();
        let mut hook = RecordingHook::well_behaved();
        hook.revert = Some(HookRevert::with_reason("donations closed"));
        let Ok(()) = dispatcher.register(addr, Box::new(hook)) else {
            panic!("register");
        };
        let key = key_with(addr);
        assert_eq!(
            dispatcher.before_donate(sender(), &key, 1, 1),
            Err(AmmError::HookRevert("donations closed".to_string()))
        );
    }

    #[test]
    fn revert_without_payload_is_generic_failure() {
        let addr = HookAddress::with_flags(&[HookFlag::BeforeDonate], 1);
        let mut dispatcher = HookDispatcher::new();
        let mut hook = RecordingHook::well_behaved();
        hook.revert = Some(HookRevert::empty());
        let Ok(()) = dispatcher.register(addr, Box::new(hook)) else {
            panic!("register");
        };
        let key = key_with(addr);
        assert_eq!(
            dispatcher.before_donate(sender(), &key, 1, 1),
            Err(AmmError::HookCallFailed)
        );
    }

    #[test]
    fn unreachable_hook_is_generic_failure() {
        let addr = HookAddress::with_flags(&[HookFlag::BeforeSwap], 1);
        let mut dispatcher = HookDispatcher::new();
        let key = key_with(addr);
        let params = swap_params();
        assert_eq!(
            dispatcher.before_swap(sender(), &key, &params),
            Err(AmmError::HookCallFailed)
        );
    }

    // -- Permission gating ----------------------------------------------------

    #[test]
    fn no_permission_is_a_noop() {
        let mut dispatcher = HookDispatcher::new();
        // Sentinel hook: nothing registered, nothing dispatched.
        let key = key_with(HookAddress::NONE);
        let params = swap_params();
        assert_eq!(
            dispatcher.before_swap(sender(), &key, &params),
            Ok(Delta::ZERO)
        );
        assert_eq!(
            dispatcher.before_initialize(sender(), &key, SqrtPrice::new(1)),
            Ok(())
        );
    }

    #[test]
    fn modify_selects_point_by_sign() {
        let addr = HookAddress::with_flags(
            &[HookFlag::BeforeAddLiquidity, HookFlag::BeforeRemoveLiquidity],
            1,
        );
        let mut dispatcher = HookDispatcher::new();
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        let Ok(()) = dispatcher.register(addr, Box::new(RecordingHook::with_log(Rc::clone(&log))))
        else {
            panic!("register");
        };
        let key = key_with(addr);
        let add = modify_params(10);
        let remove = modify_params(-10);
        let zero = modify_params(0);
        let Ok(()) = dispatcher.before_modify_position(sender(), &key, &add) else {
            panic!("add dispatch");
        };
        let Ok(()) = dispatcher.before_modify_position(sender(), &key, &remove) else {
            panic!("remove dispatch");
        };
        let Ok(()) = dispatcher.before_modify_position(sender(), &key, &zero) else {
            panic!("zero dispatch");
        };
        assert_eq!(
            *log.borrow(),
            vec![
                ExtensionPoint::BeforeAddLiquidity,
                ExtensionPoint::BeforeRemoveLiquidity,
                ExtensionPoint::BeforeRemoveLiquidity,
            ]
        );
    }

    #[test]
    fn after_modify_points_are_mutually_exclusive() {
        let addr = HookAddress::with_flags(&[HookFlag::AfterAddLiquidity], 1);
        let mut dispatcher = HookDispatcher::new();
        let Ok(()) = dispatcher.register(addr, Box::new(RecordingHook::well_behaved())) else {
            panic!("register");
        };
        let key = key_with(addr);
        let delta = BalanceDelta::new(Delta::new(5), Delta::new(-5));
        // Remove path has no after-remove permission: passes through
        // without touching the (registered) hook.
        let remove = modify_params(-10);
        assert_eq!(
            dispatcher.after_modify_position(sender(), &key, &remove, delta),
            Ok(delta)
        );
    }

    // -- Delta extraction -----------------------------------------------------

    #[test]
    fn delta_ignored_without_returns_delta_bit() {
        let addr = HookAddress::with_flags(&[HookFlag::BeforeSwap], 1);
        let mut dispatcher = HookDispatcher::new();
        let mut hook = RecordingHook::well_behaved();
        hook.delta = Some(Delta::new(40));
        let Ok(()) = dispatcher.register(addr, Box::new(hook)) else {
            panic!("register");
        };
        let key = key_with(addr);
        let params = swap_params();
        assert_eq!(
            dispatcher.before_swap(sender(), &key, &params),
            Ok(Delta::ZERO)
        );
    }

    #[test]
    fn delta_extracted_with_returns_delta_bit() {
        let addr = HookAddress::with_flags(
            &[HookFlag::BeforeSwap, HookFlag::BeforeSwapReturnsDelta],
            1,
        );
        let mut dispatcher = HookDispatcher::new();
        let mut hook = RecordingHook::well_behaved();
        hook.delta = Some(Delta::new(40));
        let Ok(()) = dispatcher.register(addr, Box::new(hook)) else {
            panic!("register");
        };
        let key = key_with(addr);
        let params = swap_params();
        assert_eq!(
            dispatcher.before_swap(sender(), &key, &params),
            Ok(Delta::new(40))
        );
    }

    #[test]
    fn after_swap_folds_into_unspecified_side() {
        let addr = HookAddress::with_flags(
            &[HookFlag::AfterSwap, HookFlag::AfterSwapReturnsDelta],
            1,
        );
        let mut dispatcher = HookDispatcher::new();
        let mut hook = RecordingHook::well_behaved();
        hook.delta = Some(Delta::new(-7));
        let Ok(()) = dispatcher.register(addr, Box::new(hook)) else {
            panic!("register");
        };
        let key = key_with(addr);
        let params = swap_params(); // zero_for_one
        let realized = BalanceDelta::new(Delta::new(-100), Delta::new(50));
        assert_eq!(
            dispatcher.after_swap(sender(), &key, &params, realized),
            Ok(BalanceDelta::new(Delta::new(-100), Delta::new(43)))
        );
    }

    #[test]
    fn after_add_liquidity_folds_into_amount0() {
        let addr = HookAddress::with_flags(
            &[
                HookFlag::AfterAddLiquidity,
                HookFlag::AfterAddLiquidityReturnsDelta,
            ],
            1,
        );
        let mut dispatcher = HookDispatcher::new();
        let mut hook = RecordingHook::well_behaved();
        hook.delta = Some(Delta::new(3));
        let Ok(()) = dispatcher.register(addr, Box::new(hook)) else {
            panic!("register");
        };
        let key = key_with(addr);
        let add = modify_params(10);
        let realized = BalanceDelta::new(Delta::new(-10), Delta::new(-20));
        assert_eq!(
            dispatcher.after_modify_position(sender(), &key, &add, realized),
            Ok(BalanceDelta::new(Delta::new(-7), Delta::new(-20)))
        );
    }

    #[test]
    fn register_rejects_inconsistent_flags() {
        let addr = HookAddress::with_flags(&[HookFlag::AfterSwapReturnsDelta], 1);
        let mut dispatcher = HookDispatcher::new();
        assert!(dispatcher
            .register(addr, Box::new(RecordingHook::well_behaved()))
            .is_err());
    }
}
