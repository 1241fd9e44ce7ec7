//! Property-based tests using `proptest` for pool invariant validation.
//!
//! 1. **Swap reversibility**: round-trip A→B→A returns at most the input.
//! 2. **Invariant preservation**: `reserve_a * reserve_b` never decreases
//!    across a swap, in either fee mode.
//! 3. **Fee monotonicity**: larger input, larger or equal fee.
//! 4. **Liquidity round trip**: add then remove never returns more than
//!    was deposited.
//! 5. **Conservation**: after any operation sequence the pool's ledger
//!    balance equals reserve plus fee escrow, and holder shares sum to
//!    the total.
//! 6. **Price direction**: selling A lowers the price of A.

use proptest::prelude::*;

use super::Pool;
use crate::config::{DepositPolicy, FeeMode, PoolConfig};
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, FeeRate, PoolId, PoolKind, Shares,
};
use crate::ledger::InMemoryLedger;
use crate::math::wide;
use crate::traits::{AssetLedger, LiquidityPool, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset_a() -> AssetId {
    AssetId::from_bytes([1u8; 32])
}

fn asset_b() -> AssetId {
    AssetId::from_bytes([2u8; 32])
}

fn alice() -> AccountId {
    AccountId::from_bytes([0xa1; 32])
}

fn bob() -> AccountId {
    AccountId::from_bytes([0xb0; 32])
}

fn make_pair() -> AssetPair {
    let Ok(pair) = AssetPair::new(asset_a(), asset_b()) else {
        panic!("valid pair");
    };
    pair
}

fn make_config(mode: FeeMode) -> PoolConfig {
    let Ok(cfg) = PoolConfig::new(
        FeeRate::UNISWAP_V2,
        PoolConfig::MINIMUM_LIQUIDITY,
        DepositPolicy::WeakestConstraint,
        mode,
    ) else {
        panic!("valid config");
    };
    cfg
}

/// Seeded constant-product pool; alice holds the first deposit, both
/// accounts keep a large balance of each asset.
fn make_cp(ra: u128, rb: u128, mode: FeeMode) -> (Pool, InMemoryLedger) {
    let Ok(mut pool) = Pool::new(PoolId::new(0), make_pair(), PoolKind::ConstantProduct, make_config(mode))
    else {
        panic!("valid pool");
    };
    let mut ledger = InMemoryLedger::new();
    for who in [alice(), bob()] {
        for asset in [asset_a(), asset_b()] {
            let Ok(()) = ledger.mint(who, asset, Amount::new(u128::MAX / 4)) else {
                panic!("mint failed");
            };
            ledger.approve(who, pool.address(), asset, Amount::MAX);
        }
    }
    let Ok(_) = pool.add_liquidity(&mut ledger, alice(), Amount::new(ra), Amount::new(rb)) else {
        panic!("seed deposit failed");
    };
    (pool, ledger)
}

fn k_of(pool: &Pool) -> primitive_types::U256 {
    let (ra, rb) = pool.reserves();
    wide::product(ra.get(), rb.get())
}

fn conserved(pool: &Pool, ledger: &InMemoryLedger) -> bool {
    let (ra, rb) = pool.reserves();
    let (ea, eb) = pool.fee_escrow();
    let held = [AccountId::BURN, alice(), bob()]
        .iter()
        .map(|a| pool.shares_of(*a).get())
        .sum::<u128>();
    ledger.balance_of(pool.address(), asset_a()).get() == ra.get() + ea.get()
        && ledger.balance_of(pool.address(), asset_b()).get() == rb.get() + eb.get()
        && held == pool.total_shares().get()
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000u128..=1_000_000_000_000_000_000_000_000u128
}

fn mode_strategy() -> impl Strategy<Value = FeeMode> {
    prop_oneof![Just(FeeMode::Compound), Just(FeeMode::Distribute)]
}

#[derive(Debug, Clone, Copy)]
enum Op {
    SwapA(u128),
    SwapB(u128),
    Add(u128),
    RemoveBps(u128),
    Claim,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u128..1_000_000_000_000_000_000_000).prop_map(Op::SwapA),
        (1u128..1_000_000_000_000_000_000_000).prop_map(Op::SwapB),
        (1u128..1_000_000_000_000_000_000_000).prop_map(Op::Add),
        (1u128..=10_000).prop_map(Op::RemoveBps),
        Just(Op::Claim),
    ]
}

// ---------------------------------------------------------------------------
// 1-2. Swaps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        mode in mode_strategy(),
    ) {
        let swap_in = (ra / 1_000).max(1);
        let (mut pool, mut ledger) = make_cp(ra, rb, mode);

        let Ok(ab) = pool.swap(&mut ledger, bob(), asset_a(), Amount::new(swap_in)) else {
            return Ok(());
        };
        let Ok(ba) = pool.swap(&mut ledger, bob(), asset_b(), ab.amount_out()) else {
            return Ok(());
        };

        prop_assert!(
            ba.amount_out().get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            ba.amount_out().get(), swap_in
        );
    }

    #[test]
    fn prop_k_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..1_000_000_000_000_000_000_000_000,
        from_a in any::<bool>(),
        mode in mode_strategy(),
    ) {
        let (mut pool, mut ledger) = make_cp(ra, rb, mode);
        let k_before = k_of(&pool);
        let asset = if from_a { asset_a() } else { asset_b() };
        if pool.swap(&mut ledger, bob(), asset, Amount::new(amount)).is_ok() {
            prop_assert!(k_of(&pool) >= k_before);
        }
        prop_assert!(conserved(&pool, &ledger));
    }

    #[test]
    fn prop_exact_out_never_undercharges(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        divisor in 2u128..1_000,
        mode in mode_strategy(),
    ) {
        let (pool, _) = make_cp(ra, rb, mode);
        let want = Amount::new((rb / divisor).max(1));
        let Ok(needed) = pool.quote_amount_in(asset_a(), want) else {
            return Ok(());
        };
        let Ok(got) = pool.quote_amount_out(asset_a(), needed) else {
            return Ok(());
        };
        prop_assert!(got >= want, "paying {} yields {} < {}", needed, got, want);
    }
}

// ---------------------------------------------------------------------------
// 3. Fees
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_fee_monotonic(
        x in 0u128..u128::MAX / 2,
        extra in 0u128..u128::MAX / 2,
        kept in 1u128..=1_000,
    ) {
        let Ok(rate) = FeeRate::new(kept, 1_000) else {
            return Ok(());
        };
        let (Ok(small), Ok(large)) = (rate.fee_of(Amount::new(x)), rate.fee_of(Amount::new(x + extra))) else {
            return Err(TestCaseError::fail("fee_of failed"));
        };
        prop_assert!(small <= large);
    }
}

// ---------------------------------------------------------------------------
// 4-5. Liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_liquidity_round_trip_no_profit(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in reserve_strategy(),
        db in reserve_strategy(),
    ) {
        let (mut pool, mut ledger) = make_cp(ra, rb, FeeMode::Compound);
        let Ok(added) = pool.add_liquidity(&mut ledger, bob(), Amount::new(da), Amount::new(db)) else {
            return Ok(());
        };
        let Ok(removed) = pool.remove_liquidity(&mut ledger, bob(), added.minted) else {
            return Err(TestCaseError::fail("remove of freshly minted shares failed"));
        };
        prop_assert!(removed.amount_a.get() <= da);
        prop_assert!(removed.amount_b.get() <= db);
        prop_assert_eq!(pool.shares_of(bob()), Shares::ZERO);
    }

    #[test]
    fn prop_conservation_under_random_ops(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        mode in mode_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..24),
    ) {
        let (mut pool, mut ledger) = make_cp(ra, rb, mode);
        for (i, op) in ops.into_iter().enumerate() {
            let who = if i % 2 == 0 { alice() } else { bob() };
            // failures are expected for some inputs; they must change nothing
            let _ = match op {
                Op::SwapA(x) => pool.swap(&mut ledger, who, asset_a(), Amount::new(x)).map(|_| ()),
                Op::SwapB(x) => pool.swap(&mut ledger, who, asset_b(), Amount::new(x)).map(|_| ()),
                Op::Add(x) => {
                    let Ok(other) = pool.quote_deposit(asset_a(), Amount::new(x)) else {
                        continue;
                    };
                    pool.add_liquidity(&mut ledger, who, Amount::new(x), other).map(|_| ())
                }
                Op::RemoveBps(bps) => {
                    let held = pool.shares_of(who).get();
                    let shares = Shares::new(held / 10_000 * bps);
                    pool.remove_liquidity(&mut ledger, who, shares).map(|_| ())
                }
                Op::Claim => pool.claim_rewards(&mut ledger, who).map(|_| ()),
            };
            prop_assert!(conserved(&pool, &ledger), "conservation broken after {:?}", op);
        }
    }
}

// ---------------------------------------------------------------------------
// 6. Price direction
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_selling_a_lowers_price_of_a(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        divisor in 10u128..10_000,
    ) {
        let (mut pool, mut ledger) = make_cp(ra, rb, FeeMode::Compound);
        let Ok(before) = pool.spot_price(asset_a()) else {
            return Err(TestCaseError::fail("seeded pool has a price"));
        };
        if pool.swap(&mut ledger, bob(), asset_a(), Amount::new((ra / divisor).max(1))).is_err() {
            return Ok(());
        }
        let Ok(after) = pool.spot_price(asset_a()) else {
            return Err(TestCaseError::fail("pool still seeded"));
        };
        prop_assert!(after <= before);
    }
}
