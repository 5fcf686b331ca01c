//! Property-based tests using `proptest` for settlement invariants.
//!
//! Covers five properties:
//!
//! 1. **Zero-delta closure** — a session closes iff every touched
//!    token's net delta is exactly zero.
//! 2. **Touch-order reporting** — an unsettled close names the first
//!    touched token whose delta is nonzero.
//! 3. **Store interchangeability** — the persistent and transient slot
//!    stores produce identical session outcomes.
//! 4. **Permission round-trip** — any flag subset encoded into an
//!    address decodes back to the same subset, salt notwithstanding.
//! 5. **Flag consistency** — a returns-delta flag without its base flag
//!    is invalid under every fee.

use proptest::prelude::*;

use crate::domain::{Address, Delta, Fee, TokenAddress};
use crate::error::AmmError;
use crate::hooks::{HookAddress, HookFlag};
use crate::session::{PersistentStore, SessionLedger, SlotStore, TransientStore};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn caller() -> Address {
    Address::from_bytes([0xcc; 20])
}

fn tok(id: u8) -> TokenAddress {
    TokenAddress::from_bytes([id; 20])
}

/// Replays a sequence of (token, amount) accounting events through a
/// fresh ledger and returns the close result together with the expected
/// per-token sums in first-touch order.
fn replay<S: SlotStore>(
    events: &[(u8, i64)],
) -> (
    crate::error::Result<()>,
    Vec<(TokenAddress, i128)>,
) {
    let mut ledger: SessionLedger<S> = SessionLedger::with_store(S::default());
    let result = ledger.lock(caller(), |session| {
        for (id, amount) in events {
            session.account_delta(tok(*id), Delta::new(i128::from(*amount)))?;
        }
        Ok(())
    });

    // Model: first-touch order over nonzero events, with running sums.
    let mut order: Vec<(TokenAddress, i128)> = Vec::new();
    for (id, amount) in events {
        if *amount == 0 {
            continue;
        }
        let token = tok(*id);
        match order.iter_mut().find(|(t, _)| *t == token) {
            Some((_, sum)) => *sum += i128::from(*amount),
            None => order.push((token, i128::from(*amount))),
        }
    }
    (result, order)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Accounting events over a small token universe so collisions and
/// repeat touches actually happen.
fn events_strategy() -> impl Strategy<Value = Vec<(u8, i64)>> {
    prop::collection::vec((1u8..=6u8, -1_000i64..=1_000i64), 0..40)
}

/// An arbitrary subset of the 14 permission flags.
fn flag_subset_strategy() -> impl Strategy<Value = Vec<HookFlag>> {
    prop::collection::vec(prop::bool::ANY, 14).prop_map(|mask| {
        HookFlag::ALL
            .into_iter()
            .zip(mask)
            .filter_map(|(flag, keep)| keep.then_some(flag))
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Property 1 + 2: zero-delta closure and touch-order reporting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_session_closes_iff_all_sums_zero(events in events_strategy()) {
        let (result, order) = replay::<PersistentStore>(&events);
        let first_unsettled = order.iter().find(|(_, sum)| *sum != 0);
        match first_unsettled {
            None => prop_assert_eq!(result, Ok(())),
            Some((token, sum)) => prop_assert_eq!(
                result,
                Err(AmmError::TokenNotSettled {
                    token: *token,
                    delta: Delta::new(*sum),
                })
            ),
        }
    }

    #[test]
    fn prop_stores_agree(events in events_strategy()) {
        let (persistent, _) = replay::<PersistentStore>(&events);
        let (transient, _) = replay::<TransientStore>(&events);
        prop_assert_eq!(persistent, transient);
    }

    #[test]
    fn prop_touched_set_is_first_touch_order(events in events_strategy()) {
        let mut ledger = SessionLedger::new();
        let mut expected: Vec<TokenAddress> = Vec::new();
        for (id, amount) in &events {
            if *amount != 0 && !expected.contains(&tok(*id)) {
                expected.push(tok(*id));
            }
        }
        let result = ledger.lock(caller(), |session| {
            for (id, amount) in &events {
                session.account_delta(tok(*id), Delta::new(i128::from(*amount)))?;
            }
            let observed = session.touched().to_vec();
            // Settle everything so the close never interferes.
            for token in &observed {
                let owed = session.delta_of(*token);
                session.account_delta(*token, Delta::new(-owed.get()))?;
            }
            Ok(observed)
        });
        prop_assert_eq!(result, Ok(expected));
    }
}

// ---------------------------------------------------------------------------
// Property 4 + 5: permission encoding
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_flag_subset_round_trips(flags in flag_subset_strategy(), salt in any::<u8>()) {
        let addr = HookAddress::with_flags(&flags, salt);
        for flag in HookFlag::ALL {
            prop_assert_eq!(addr.has_permission(flag), flags.contains(&flag), "{:?}", flag);
        }
        // Re-encoding the decoded record reproduces the flag bits.
        let rebuilt = HookAddress::from_permissions(&addr.permissions(), salt);
        prop_assert_eq!(rebuilt, addr);
    }

    #[test]
    fn prop_returns_delta_without_base_is_always_invalid(salt in any::<u8>()) {
        for (returns_delta, _) in HookFlag::DELTA_PAIRS {
            let addr = HookAddress::with_flags(&[returns_delta], salt);
            for fee in [Fee::PIPS_500, Fee::PIPS_3000, Fee::PIPS_10000, Fee::dynamic()] {
                prop_assert!(addr.is_valid(fee).is_err());
            }
        }
    }
}
