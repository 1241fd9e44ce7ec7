//! Two-asset pool: reserves, shares, fees and every operation on them.
//!
//! # Execution model
//!
//! Each state-changing operation runs in three phases:
//!
//! 1. **Plan**: validate the request and compute the complete next state
//!    (`Staged`) from the current one, without mutating anything.
//! 2. **Settle**: run the ledger transfers through
//!    [`settlement::execute`], which either completes every transfer or
//!    reverses the completed ones.
//! 3. **Commit**: swap the staged state in. This step cannot fail.
//!
//! An error in phase 1 or 2 therefore leaves both the pool and the ledger
//! as they were.
//!
//! # Balances
//!
//! For each asset the ledger balance of the pool address equals
//! `reserve + fee escrow`. The escrow is always zero for compounding pools.

use std::collections::HashMap;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::fee_distributor::{DistributorUpdate, FeeDistributor};
use super::settlement::{self, Leg};
use crate::config::{DepositPolicy, FeeMode, PoolConfig};
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, EventLog, FeeRate, LiquidityAdded, LiquidityRemoved,
    PendingRewards, PoolEvent, PoolId, PoolKind, Price, Rounding, Shares, Side, SwapResult,
};
use crate::error::AmmError;
use crate::math::{wide, CheckedArithmetic, LiquidityAccountant, SwapEngine};
use crate::traits::{AssetLedger, LiquidityPool, SwapPool};

/// Lifecycle state of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolStatus {
    /// No shares outstanding and both reserves zero.
    Empty,
    /// At least one share outstanding.
    Seeded,
}

/// A constant-product or fixed-ratio pool over one [`AssetPair`].
///
/// The pool owns its accounting state; assets themselves live in an
/// [`AssetLedger`] under [`address`](Self::address) and are moved by the
/// ledger passed to each operation.
///
/// # Example
///
/// ```rust
/// use miniswap::config::PoolConfig;
/// use miniswap::domain::{AccountId, Amount, AssetId, AssetPair, PoolId, PoolKind};
/// use miniswap::ledger::InMemoryLedger;
/// use miniswap::pools::Pool;
/// use miniswap::traits::{AssetLedger, LiquidityPool, SwapPool};
///
/// let (usdc, weth) = (AssetId::from_bytes([1u8; 32]), AssetId::from_bytes([2u8; 32]));
/// let pair = AssetPair::new(usdc, weth).expect("distinct");
/// let mut pool = Pool::new(PoolId::new(0), pair, PoolKind::ConstantProduct, PoolConfig::uniswap_v2())
///     .expect("valid pool");
///
/// let alice = AccountId::from_bytes([7u8; 32]);
/// let mut ledger = InMemoryLedger::new();
/// for asset in [usdc, weth] {
///     ledger.mint(alice, asset, Amount::new(1_000_000)).expect("mint");
///     ledger.approve(alice, pool.address(), asset, Amount::MAX);
/// }
///
/// pool.add_liquidity(&mut ledger, alice, Amount::new(100_000), Amount::new(100_000))
///     .expect("first deposit");
/// let result = pool.swap(&mut ledger, alice, usdc, Amount::new(1_000)).expect("swap");
///
/// assert!(result.amount_out().get() > 0);
/// assert_eq!(ledger.balance_of(pool.address(), usdc), pool.reserves().0);
/// ```
#[derive(Debug, Clone)]
pub struct Pool {
    id: PoolId,
    address: AccountId,
    pair: AssetPair,
    kind: PoolKind,
    config: PoolConfig,
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Shares,
    shares: HashMap<AccountId, Shares>,
    k_last: U256,
    accrued_fee_a: Amount,
    accrued_fee_b: Amount,
    distributor: Option<FeeDistributor>,
    events: EventLog<PoolEvent>,
}

// ---------------------------------------------------------------------------
// Staged state
// ---------------------------------------------------------------------------

/// Share balances touched by one operation: `(account, before, after)`.
#[derive(Debug, Default)]
struct ShareChanges(Vec<(AccountId, Shares, Shares)>);

impl ShareChanges {
    fn entry(&mut self, pool: &Pool, account: AccountId) -> &mut (AccountId, Shares, Shares) {
        let pos = match self.0.iter().position(|(a, _, _)| *a == account) {
            Some(pos) => pos,
            None => {
                let held = pool.shares_of(account);
                self.0.push((account, held, held));
                self.0.len() - 1
            }
        };
        &mut self.0[pos]
    }
}

/// Next state of a pool, computed before any transfer.
#[derive(Debug)]
struct Staged {
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Shares,
    shares: ShareChanges,
    k_last: U256,
    accrued_fee_a: Amount,
    accrued_fee_b: Amount,
    rewards: Option<DistributorUpdate>,
}

impl Staged {
    fn reserve_mut(&mut self, side: Side) -> &mut Amount {
        match side {
            Side::A => &mut self.reserve_a,
            Side::B => &mut self.reserve_b,
        }
    }

    fn credit(&mut self, pool: &Pool, account: AccountId, amount: Shares) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        let entry = self.shares.entry(pool, account);
        entry.2 = entry.2.safe_add(&amount)?;
        self.total_shares = self.total_shares.safe_add(&amount)?;
        Ok(())
    }

    fn debit(&mut self, pool: &Pool, account: AccountId, amount: Shares) -> Result<(), AmmError> {
        let entry = self.shares.entry(pool, account);
        entry.2 = entry
            .2
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientShares)?;
        self.total_shares = self.total_shares.safe_sub(&amount)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Swap plan
// ---------------------------------------------------------------------------

/// Fully priced swap, ready to settle.
#[derive(Debug, Clone, Copy)]
struct SwapPlan {
    side_in: Side,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
    /// Part of `amount_in` added to the input reserve.
    credited_in: Amount,
}

/// Smallest gross input whose priced part `floor(x * kept / den)` is at
/// least `net`.
fn gross_up(net: Amount, fee_rate: FeeRate) -> Result<Amount, AmmError> {
    if fee_rate.kept() == 0 {
        return Err(AmmError::InvalidFee("fee consumes the whole input"));
    }
    wide::mul_div(net.get(), fee_rate.denominator(), fee_rate.kept(), Rounding::Up)
}

impl Pool {
    /// Creates an empty pool.
    ///
    /// `kind` must already be oriented to the canonical order of `pair`
    /// (`ratio_a` belongs to `pair.first()`).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidRatio`] for a fixed ratio with a zero component.
    /// - Any validation error of `config`.
    pub fn new(
        id: PoolId,
        pair: AssetPair,
        kind: PoolKind,
        config: PoolConfig,
    ) -> Result<Self, AmmError> {
        kind.validate()?;
        config.validate()?;
        let distributor = match config.fee_mode() {
            FeeMode::Distribute => Some(FeeDistributor::new()),
            FeeMode::Compound => None,
        };
        Ok(Self {
            id,
            address: id.address(),
            pair,
            kind,
            config,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            total_shares: Shares::ZERO,
            shares: HashMap::new(),
            k_last: U256::zero(),
            accrued_fee_a: Amount::ZERO,
            accrued_fee_b: Amount::ZERO,
            distributor,
            events: EventLog::new(),
        })
    }

    /// Registry index of the pool.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Ledger address holding the pool's assets.
    #[must_use]
    pub const fn address(&self) -> AccountId {
        self.address
    }

    /// Pricing rule, in canonical orientation.
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Immutable configuration.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// [`PoolStatus::Empty`] until the first deposit and after the last
    /// share is burned.
    #[must_use]
    pub fn status(&self) -> PoolStatus {
        if self.total_shares.is_zero() {
            PoolStatus::Empty
        } else {
            PoolStatus::Seeded
        }
    }

    /// `reserve_a * reserve_b` recorded after the last deposit or
    /// withdrawal. Zero unless a protocol fee recipient is configured.
    #[must_use]
    pub const fn k_last(&self) -> U256 {
        self.k_last
    }

    /// Lifetime swap fees charged, per asset.
    #[must_use]
    pub const fn accrued_fees(&self) -> (Amount, Amount) {
        (self.accrued_fee_a, self.accrued_fee_b)
    }

    /// Fees held for holders and not yet paid, per asset. Always zero for
    /// compounding pools.
    #[must_use]
    pub fn fee_escrow(&self) -> (Amount, Amount) {
        self.distributor.as_ref().map_or((Amount::ZERO, Amount::ZERO), |d| {
            (d.escrow(Side::A), d.escrow(Side::B))
        })
    }

    /// Reward accounting of a distributing pool.
    #[must_use]
    pub const fn distributor(&self) -> Option<&FeeDistributor> {
        self.distributor.as_ref()
    }

    /// Events recorded since the last drain, oldest first. The log is
    /// bounded; see [`EventLog`].
    #[must_use]
    pub const fn events(&self) -> &EventLog<PoolEvent> {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn drain_events(&mut self) -> Vec<PoolEvent> {
        self.events.drain()
    }

    // -- internals ----------------------------------------------------------

    const fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::A => self.reserve_a,
            Side::B => self.reserve_b,
        }
    }

    /// `(ratio_in, ratio_out)` of a fixed-ratio pool for a swap from `side_in`.
    const fn oriented_ratio(&self, side_in: Side) -> Option<(u128, u128)> {
        match (self.kind, side_in) {
            (PoolKind::FixedRatio { ratio_a, ratio_b }, Side::A) => Some((ratio_a, ratio_b)),
            (PoolKind::FixedRatio { ratio_a, ratio_b }, Side::B) => Some((ratio_b, ratio_a)),
            (PoolKind::ConstantProduct, _) => None,
        }
    }

    fn stage(&self) -> Staged {
        Staged {
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
            total_shares: self.total_shares,
            shares: ShareChanges::default(),
            k_last: self.k_last,
            accrued_fee_a: self.accrued_fee_a,
            accrued_fee_b: self.accrued_fee_b,
            rewards: self.distributor.as_ref().map(FeeDistributor::begin),
        }
    }

    fn commit(&mut self, staged: Staged) {
        self.reserve_a = staged.reserve_a;
        self.reserve_b = staged.reserve_b;
        self.total_shares = staged.total_shares;
        self.k_last = staged.k_last;
        self.accrued_fee_a = staged.accrued_fee_a;
        self.accrued_fee_b = staged.accrued_fee_b;
        for (account, _, after) in staged.shares.0 {
            if after.is_zero() {
                self.shares.remove(&account);
            } else {
                self.shares.insert(account, after);
            }
        }
        if let (Some(dist), Some(update)) = (self.distributor.as_mut(), staged.rewards) {
            dist.apply(update);
        }
    }

    /// Mints the protocol's share of fee growth since the last deposit or
    /// withdrawal into `staged`.
    fn stage_protocol_fee(&self, staged: &mut Staged) -> Result<Shares, AmmError> {
        let Some(to) = self.config.protocol_fee_to() else {
            return Ok(Shares::ZERO);
        };
        let minted = LiquidityAccountant::protocol_fee_shares(
            self.total_shares,
            self.reserve_a,
            self.reserve_b,
            self.k_last,
        )?;
        staged.credit(self, to, minted)?;
        Ok(minted)
    }

    fn stage_k_last(&self, staged: &mut Staged) {
        if self.config.protocol_fee_to().is_some() {
            staged.k_last = wide::product(staged.reserve_a.get(), staged.reserve_b.get());
        }
    }

    /// Settles rewards of every holder whose balance `staged` changes.
    /// Only `payee` is paid; the others keep their reward as owed.
    fn stage_rewards(
        &self,
        staged: &mut Staged,
        payee: Option<AccountId>,
    ) -> Result<PendingRewards, AmmError> {
        let (Some(dist), Some(update)) = (self.distributor.as_ref(), staged.rewards.as_mut()) else {
            return Ok(PendingRewards::NONE);
        };
        let mut paid = PendingRewards::NONE;
        for (account, before, after) in &staged.shares.0 {
            if account.is_burn() {
                continue;
            }
            let pay = payee == Some(*account);
            let settled = update.settle(dist, *account, *before, *after, pay)?;
            if pay {
                paid = settled;
            }
        }
        Ok(paid)
    }

    /// Shares for a deposit into a seeded pool holding `total` shares.
    fn shares_for_deposit(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        total: Shares,
    ) -> Result<Shares, AmmError> {
        let policy = match self.kind {
            // the configured ratio was already enforced
            PoolKind::FixedRatio { .. } => DepositPolicy::WeakestConstraint,
            PoolKind::ConstantProduct => self.config.deposit_policy(),
        };
        match policy {
            DepositPolicy::WeakestConstraint => LiquidityAccountant::proportional_shares(
                amount_a,
                amount_b,
                self.reserve_a,
                self.reserve_b,
                total,
            ),
            DepositPolicy::ExactRatio => LiquidityAccountant::exact_ratio_shares(
                amount_a,
                amount_b,
                self.reserve_a,
                self.reserve_b,
                total,
            ),
        }
    }

    fn check_swap_request(&self, asset_in: AssetId, amount: Amount) -> Result<Side, AmmError> {
        let side_in = self.pair.side_of(&asset_in)?;
        if amount.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if self.reserve_a.is_zero() || self.reserve_b.is_zero() {
            return Err(AmmError::PoolEmpty);
        }
        Ok(side_in)
    }

    /// Priced input, pricing fee rate and reserve credit for a gross input.
    fn split_input(&self, amount_in: Amount) -> Result<(Amount, FeeRate, Amount, Amount), AmmError> {
        let fee_rate = self.config.fee_rate();
        let fee = fee_rate.fee_of(amount_in)?;
        match self.config.fee_mode() {
            FeeMode::Compound => Ok((amount_in, fee_rate, fee, amount_in)),
            FeeMode::Distribute => {
                let net = amount_in.safe_sub(&fee)?;
                Ok((net, FeeRate::NO_FEE, fee, net))
            }
        }
    }

    fn plan_exact_in(&self, asset_in: AssetId, amount_in: Amount) -> Result<SwapPlan, AmmError> {
        let side_in = self.check_swap_request(asset_in, amount_in)?;
        let (priced_in, rate, fee, credited_in) = self.split_input(amount_in)?;
        if priced_in.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        let (r_in, r_out) = (self.reserve(side_in), self.reserve(side_in.other()));
        let amount_out = match self.oriented_ratio(side_in) {
            None => {
                let out = SwapEngine::get_amount_out(priced_in, r_in, r_out, rate)?;
                SwapEngine::check_k(r_in, r_out, priced_in, out, rate)?;
                out
            }
            Some((ratio_in, ratio_out)) => {
                let out = SwapEngine::fixed_ratio_amount_out(priced_in, ratio_in, ratio_out, rate)?;
                if out >= r_out {
                    return Err(AmmError::InsufficientLiquidity);
                }
                out
            }
        };
        Ok(SwapPlan {
            side_in,
            amount_in,
            amount_out,
            fee,
            credited_in,
        })
    }

    fn plan_exact_out(&self, asset_in: AssetId, amount_out: Amount) -> Result<SwapPlan, AmmError> {
        let side_in = self.check_swap_request(asset_in, amount_out)?;
        let (r_in, r_out) = (self.reserve(side_in), self.reserve(side_in.other()));
        let fee_rate = self.config.fee_rate();
        let compound = self.config.fee_mode() == FeeMode::Compound;
        let amount_in = match self.oriented_ratio(side_in) {
            None if compound => SwapEngine::get_amount_in(amount_out, r_in, r_out, fee_rate)?,
            None => gross_up(
                SwapEngine::get_amount_in(amount_out, r_in, r_out, FeeRate::NO_FEE)?,
                fee_rate,
            )?,
            Some(_) if amount_out >= r_out => return Err(AmmError::InsufficientLiquidity),
            Some((ratio_in, ratio_out)) if compound => {
                SwapEngine::fixed_ratio_amount_in(amount_out, ratio_in, ratio_out, fee_rate)?
            }
            Some((ratio_in, ratio_out)) => gross_up(
                SwapEngine::fixed_ratio_amount_in(amount_out, ratio_in, ratio_out, FeeRate::NO_FEE)?,
                fee_rate,
            )?,
        };
        let (priced_in, rate, fee, credited_in) = self.split_input(amount_in)?;
        if matches!(self.kind, PoolKind::ConstantProduct) {
            SwapEngine::check_k(r_in, r_out, priced_in, amount_out, rate)?;
        }
        Ok(SwapPlan {
            side_in,
            amount_in,
            amount_out,
            fee,
            credited_in,
        })
    }

    fn execute_swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        plan: SwapPlan,
    ) -> Result<SwapResult, AmmError> {
        let side_out = plan.side_in.other();
        let asset_in = self.pair.asset(plan.side_in);
        let asset_out = self.pair.asset(side_out);

        let mut staged = self.stage();
        let reserve_in = staged.reserve_mut(plan.side_in);
        *reserve_in = reserve_in.safe_add(&plan.credited_in)?;
        let reserve_out = staged.reserve_mut(side_out);
        *reserve_out = reserve_out.safe_sub(&plan.amount_out)?;
        match plan.side_in {
            Side::A => staged.accrued_fee_a = staged.accrued_fee_a.safe_add(&plan.fee)?,
            Side::B => staged.accrued_fee_b = staged.accrued_fee_b.safe_add(&plan.fee)?,
        }
        let rewarded = self.total_shares.safe_sub(&self.shares_of(AccountId::BURN))?;
        if staged.rewards.is_some() && rewarded.is_zero() {
            // only locked shares remain: the fee stays in the input reserve
            let reserve_in = staged.reserve_mut(plan.side_in);
            *reserve_in = reserve_in.safe_add(&plan.fee)?;
        } else if let Some(update) = staged.rewards.as_mut() {
            update.accrue(plan.side_in, plan.fee, rewarded)?;
        }

        settlement::execute(
            ledger,
            self.address,
            &[
                Leg::Pull {
                    from: account,
                    asset: asset_in,
                    amount: plan.amount_in,
                },
                Leg::Push {
                    to: account,
                    asset: asset_out,
                    amount: plan.amount_out,
                },
            ],
        )?;
        self.commit(staged);

        tracing::debug!(
            pool = %self.id,
            %account,
            amount_in = %plan.amount_in,
            amount_out = %plan.amount_out,
            fee = %plan.fee,
            "swap executed"
        );
        self.events.record(PoolEvent::Swapped {
            account,
            asset_in,
            amount_in: plan.amount_in,
            amount_out: plan.amount_out,
            fee: plan.fee,
        });
        self.push_sync();
        Ok(SwapResult::new(
            asset_in,
            asset_out,
            plan.amount_in,
            plan.amount_out,
            plan.fee,
        ))
    }

    fn push_sync(&mut self) {
        self.events.record(PoolEvent::Sync {
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
        });
    }

    fn push_protocol_fee(&mut self, minted: Shares) {
        if let (false, Some(to)) = (minted.is_zero(), self.config.protocol_fee_to()) {
            tracing::info!(pool = %self.id, %to, %minted, "protocol fee minted");
            self.events.record(PoolEvent::ProtocolFeeMinted { to, minted });
        }
    }
}

// ---------------------------------------------------------------------------
// SwapPool
// ---------------------------------------------------------------------------

impl SwapPool for Pool {
    fn swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
    ) -> Result<SwapResult, AmmError> {
        let plan = self.plan_exact_in(asset_in, amount_in)?;
        self.execute_swap(ledger, account, plan)
    }

    fn swap_exact_out<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        asset_in: AssetId,
        amount_out: Amount,
    ) -> Result<SwapResult, AmmError> {
        let plan = self.plan_exact_out(asset_in, amount_out)?;
        self.execute_swap(ledger, account, plan)
    }

    fn quote_amount_out(&self, asset_in: AssetId, amount_in: Amount) -> Result<Amount, AmmError> {
        self.plan_exact_in(asset_in, amount_in).map(|p| p.amount_out)
    }

    fn quote_amount_in(&self, asset_in: AssetId, amount_out: Amount) -> Result<Amount, AmmError> {
        self.plan_exact_out(asset_in, amount_out).map(|p| p.amount_in)
    }

    fn spot_price(&self, base: AssetId) -> Result<Price, AmmError> {
        let side = self.pair.side_of(&base)?;
        match self.oriented_ratio(side) {
            Some((ratio_base, ratio_quote)) => Price::new(ratio_quote, ratio_base),
            None => {
                let (r_base, r_quote) = (self.reserve(side), self.reserve(side.other()));
                if r_base.is_zero() || r_quote.is_zero() {
                    return Err(AmmError::PoolEmpty);
                }
                Price::new(r_quote.get(), r_base.get())
            }
        }
    }

    fn asset_pair(&self) -> AssetPair {
        self.pair
    }

    fn fee_rate(&self) -> FeeRate {
        self.config.fee_rate()
    }
}

// ---------------------------------------------------------------------------
// LiquidityPool
// ---------------------------------------------------------------------------

impl LiquidityPool for Pool {
    fn add_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityAdded, AmmError> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InvalidAmount("deposit amounts must be positive"));
        }
        if let PoolKind::FixedRatio { ratio_a, ratio_b } = self.kind {
            if wide::product(amount_a.get(), ratio_b) != wide::product(amount_b.get(), ratio_a) {
                return Err(AmmError::RatioMismatch);
            }
        }

        let mut staged = self.stage();
        let protocol_fee = self.stage_protocol_fee(&mut staged)?;
        let minted = if staged.total_shares.is_zero() {
            let mint = LiquidityAccountant::initial_shares(
                amount_a,
                amount_b,
                self.config.minimum_liquidity(),
            )?;
            staged.credit(self, AccountId::BURN, mint.locked)?;
            mint.depositor
        } else {
            self.shares_for_deposit(amount_a, amount_b, staged.total_shares)?
        };
        if minted.is_zero() {
            return Err(AmmError::InvalidAmount("deposit too small to mint shares"));
        }
        staged.credit(self, account, minted)?;
        staged.reserve_a = staged.reserve_a.safe_add(&amount_a)?;
        staged.reserve_b = staged.reserve_b.safe_add(&amount_b)?;
        self.stage_rewards(&mut staged, None)?;
        self.stage_k_last(&mut staged);

        settlement::execute(
            ledger,
            self.address,
            &[
                Leg::Pull {
                    from: account,
                    asset: self.pair.first(),
                    amount: amount_a,
                },
                Leg::Pull {
                    from: account,
                    asset: self.pair.second(),
                    amount: amount_b,
                },
            ],
        )?;
        self.commit(staged);

        self.push_protocol_fee(protocol_fee);
        tracing::info!(
            pool = %self.id,
            %account,
            %amount_a,
            %amount_b,
            %minted,
            "liquidity added"
        );
        self.events.record(PoolEvent::LiquidityAdded {
            account,
            amount_a,
            amount_b,
            minted,
        });
        self.push_sync();
        Ok(LiquidityAdded {
            amount_a,
            amount_b,
            minted,
        })
    }

    fn remove_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        shares: Shares,
    ) -> Result<LiquidityRemoved, AmmError> {
        let held = self.shares_of(account);
        if shares.is_zero() || shares > held || account.is_burn() {
            return Err(AmmError::InsufficientShares);
        }

        let mut staged = self.stage();
        let protocol_fee = self.stage_protocol_fee(&mut staged)?;
        let (amount_a, amount_b) = LiquidityAccountant::amounts_for_shares(
            shares,
            self.reserve_a,
            self.reserve_b,
            staged.total_shares,
        )?;
        if amount_a.is_zero() && amount_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        staged.debit(self, account, shares)?;
        staged.reserve_a = staged.reserve_a.safe_sub(&amount_a)?;
        staged.reserve_b = staged.reserve_b.safe_sub(&amount_b)?;
        let rewards = self.stage_rewards(&mut staged, Some(account))?;
        self.stage_k_last(&mut staged);

        let removed = LiquidityRemoved {
            amount_a,
            amount_b,
            reward_a: rewards.reward_a,
            reward_b: rewards.reward_b,
            burned: shares,
        };
        let (Some(total_a), Some(total_b)) = (removed.total_a(), removed.total_b()) else {
            return Err(AmmError::Overflow("withdrawal with rewards"));
        };
        settlement::execute(
            ledger,
            self.address,
            &[
                Leg::Push {
                    to: account,
                    asset: self.pair.first(),
                    amount: total_a,
                },
                Leg::Push {
                    to: account,
                    asset: self.pair.second(),
                    amount: total_b,
                },
            ],
        )?;
        self.commit(staged);

        self.push_protocol_fee(protocol_fee);
        tracing::info!(
            pool = %self.id,
            %account,
            %amount_a,
            %amount_b,
            burned = %shares,
            "liquidity removed"
        );
        self.events.record(PoolEvent::LiquidityRemoved {
            account,
            amount_a,
            amount_b,
            burned: shares,
        });
        if !rewards.is_zero() {
            self.events.record(PoolEvent::RewardsClaimed {
                account,
                reward_a: rewards.reward_a,
                reward_b: rewards.reward_b,
            });
        }
        self.push_sync();
        Ok(removed)
    }

    fn pending_rewards(&self, account: AccountId) -> PendingRewards {
        match self.distributor.as_ref() {
            Some(d) if !account.is_burn() => d.pending(account, self.shares_of(account)),
            _ => PendingRewards::NONE,
        }
    }

    fn claim_rewards<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
    ) -> Result<PendingRewards, AmmError> {
        if self.pending_rewards(account).is_zero() {
            return Ok(PendingRewards::NONE);
        }
        let mut staged = self.stage();
        staged.shares.entry(self, account);
        let paid = self.stage_rewards(&mut staged, Some(account))?;

        settlement::execute(
            ledger,
            self.address,
            &[
                Leg::Push {
                    to: account,
                    asset: self.pair.first(),
                    amount: paid.reward_a,
                },
                Leg::Push {
                    to: account,
                    asset: self.pair.second(),
                    amount: paid.reward_b,
                },
            ],
        )?;
        self.commit(staged);

        tracing::info!(
            pool = %self.id,
            %account,
            reward_a = %paid.reward_a,
            reward_b = %paid.reward_b,
            "rewards claimed"
        );
        self.events.record(PoolEvent::RewardsClaimed {
            account,
            reward_a: paid.reward_a,
            reward_b: paid.reward_b,
        });
        Ok(paid)
    }

    fn transfer_shares(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        if from.is_burn() || self.shares_of(from) < amount {
            return Err(AmmError::InsufficientShares);
        }
        if amount.is_zero() || from == to {
            return Ok(());
        }
        let mut staged = self.stage();
        staged.debit(self, from, amount)?;
        staged.credit(self, to, amount)?;
        self.stage_rewards(&mut staged, None)?;
        self.commit(staged);

        tracing::debug!(pool = %self.id, %from, %to, %amount, "shares transferred");
        self.events
            .record(PoolEvent::SharesTransferred { from, to, amount });
        Ok(())
    }

    fn quote_deposit(&self, asset: AssetId, amount: Amount) -> Result<Amount, AmmError> {
        let side = self.pair.side_of(&asset)?;
        if amount.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        match self.oriented_ratio(side) {
            Some((ratio_this, ratio_other)) => {
                wide::mul_div(amount.get(), ratio_other, ratio_this, Rounding::Down)
            }
            None => LiquidityAccountant::quote(amount, self.reserve(side), self.reserve(side.other())),
        }
    }

    fn shares_of(&self, account: AccountId) -> Shares {
        self.shares.get(&account).copied().unwrap_or(Shares::ZERO)
    }

    fn total_shares(&self) -> Shares {
        self.total_shares
    }

    fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::ledger::InMemoryLedger;

    const E18: u128 = 1_000_000_000_000_000_000;

    fn asset_a() -> AssetId {
        AssetId::from_bytes([1u8; 32])
    }

    fn asset_b() -> AssetId {
        AssetId::from_bytes([2u8; 32])
    }

    fn stranger() -> AssetId {
        AssetId::from_bytes([3u8; 32])
    }

    fn alice() -> AccountId {
        AccountId::from_bytes([0xa1; 32])
    }

    fn bob() -> AccountId {
        AccountId::from_bytes([0xb0; 32])
    }

    fn pair() -> AssetPair {
        let Ok(p) = AssetPair::new(asset_a(), asset_b()) else {
            panic!("valid pair");
        };
        p
    }

    fn cp_pool() -> Pool {
        let Ok(p) = Pool::new(PoolId::new(0), pair(), PoolKind::ConstantProduct, PoolConfig::uniswap_v2())
        else {
            panic!("valid pool");
        };
        p
    }

    fn fixed_pool(ratio_a: u128, ratio_b: u128) -> Pool {
        let Ok(kind) = PoolKind::fixed_ratio(ratio_a, ratio_b) else {
            panic!("valid ratio");
        };
        let Ok(p) = Pool::new(PoolId::new(1), pair(), kind, PoolConfig::fixed_ratio_default()) else {
            panic!("valid pool");
        };
        p
    }

    fn fund(ledger: &mut InMemoryLedger, pool: &Pool, who: AccountId, amount: u128) {
        for asset in [asset_a(), asset_b()] {
            let Ok(()) = ledger.mint(who, asset, Amount::new(amount)) else {
                panic!("mint failed");
            };
            ledger.approve(who, pool.address(), asset, Amount::MAX);
        }
    }

    fn add(pool: &mut Pool, ledger: &mut InMemoryLedger, who: AccountId, a: u128, b: u128) -> LiquidityAdded {
        let Ok(r) = pool.add_liquidity(ledger, who, Amount::new(a), Amount::new(b)) else {
            panic!("add_liquidity failed");
        };
        r
    }

    fn assert_conserved(pool: &Pool, ledger: &InMemoryLedger) {
        let (ra, rb) = pool.reserves();
        let (ea, eb) = pool.fee_escrow();
        assert_eq!(ledger.balance_of(pool.address(), asset_a()).get(), ra.get() + ea.get());
        assert_eq!(ledger.balance_of(pool.address(), asset_b()).get(), rb.get() + eb.get());
    }

    // -- construction ---------------------------------------------------------

    #[test]
    fn new_pool_is_empty() {
        let pool = cp_pool();
        assert_eq!(pool.status(), PoolStatus::Empty);
        assert_eq!(pool.reserves(), (Amount::ZERO, Amount::ZERO));
        assert_eq!(pool.total_shares(), Shares::ZERO);
        assert!(pool.distributor().is_none());
        assert_eq!(pool.address(), PoolId::new(0).address());
    }

    #[test]
    fn new_rejects_zero_ratio() {
        let kind = PoolKind::FixedRatio { ratio_a: 0, ratio_b: 1 };
        let r = Pool::new(PoolId::new(0), pair(), kind, PoolConfig::fixed_ratio_default());
        assert_eq!(r.err(), Some(AmmError::InvalidRatio));
    }

    // -- add_liquidity --------------------------------------------------------

    #[test]
    fn first_deposit_locks_minimum() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 10 * E18);
        let r = add(&mut pool, &mut ledger, alice(), E18, 4 * E18);

        assert_eq!(r.minted, Shares::new(2 * E18 - 1_000));
        assert_eq!(pool.total_shares(), Shares::new(2 * E18));
        assert_eq!(pool.shares_of(AccountId::BURN), Shares::new(1_000));
        assert_eq!(pool.status(), PoolStatus::Seeded);
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn zero_amount_deposit_rejected() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        let r = pool.add_liquidity(&mut ledger, alice(), Amount::ZERO, Amount::new(5));
        assert!(matches!(r, Err(AmmError::InvalidAmount(_))));
    }

    #[test]
    fn tiny_first_deposit_rejected() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 10_000);
        let r = pool.add_liquidity(&mut ledger, alice(), Amount::new(1_000), Amount::new(1_000));
        assert_eq!(r, Err(AmmError::InsufficientInitialLiquidity));
        assert_eq!(pool.status(), PoolStatus::Empty);
    }

    #[test]
    fn second_deposit_weakest_constraint_keeps_surplus() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 100 * E18);
        fund(&mut ledger, &pool, bob(), 100 * E18);
        add(&mut pool, &mut ledger, alice(), 10 * E18, 10 * E18);
        let r = add(&mut pool, &mut ledger, bob(), 5 * E18, 8 * E18);

        assert_eq!(r.minted, Shares::new(5 * E18));
        assert_eq!(pool.reserves(), (Amount::new(15 * E18), Amount::new(18 * E18)));
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn exact_ratio_policy_rejects_off_ratio() {
        let Ok(cfg) = PoolConfig::new(
            FeeRate::UNISWAP_V2,
            PoolConfig::MINIMUM_LIQUIDITY,
            DepositPolicy::ExactRatio,
            FeeMode::Compound,
        ) else {
            panic!("valid config");
        };
        let Ok(mut pool) = Pool::new(PoolId::new(0), pair(), PoolKind::ConstantProduct, cfg) else {
            panic!("valid pool");
        };
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 100 * E18);
        add(&mut pool, &mut ledger, alice(), 10 * E18, 20 * E18);
        let r = pool.add_liquidity(&mut ledger, alice(), Amount::new(E18), Amount::new(3 * E18));
        assert_eq!(r, Err(AmmError::RatioMismatch));
        let ok = add(&mut pool, &mut ledger, alice(), E18, 2 * E18);
        assert!(!ok.minted.is_zero());
    }

    #[test]
    fn failed_transfer_leaves_pool_untouched() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        let Ok(()) = ledger.mint(alice(), asset_a(), Amount::new(E18)) else {
            panic!("mint failed");
        };
        let Ok(()) = ledger.mint(alice(), asset_b(), Amount::new(E18)) else {
            panic!("mint failed");
        };
        ledger.approve(alice(), pool.address(), asset_a(), Amount::MAX);

        let r = pool.add_liquidity(&mut ledger, alice(), Amount::new(E18), Amount::new(E18));
        let Err(AmmError::Ledger(LedgerError::InsufficientAllowance { .. })) = r else {
            panic!("expected InsufficientAllowance");
        };
        assert_eq!(pool.status(), PoolStatus::Empty);
        assert!(pool.events().is_empty());
        assert_eq!(ledger.balance_of(alice(), asset_a()), Amount::new(E18));
        assert_eq!(ledger.balance_of(pool.address(), asset_a()), Amount::ZERO);
    }

    #[test]
    fn failed_deposit_keeps_finite_allowance_for_retry() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        for asset in [asset_a(), asset_b()] {
            let Ok(()) = ledger.mint(alice(), asset, Amount::new(E18)) else {
                panic!("mint failed");
            };
        }
        ledger.approve(alice(), pool.address(), asset_a(), Amount::new(E18));

        let r = pool.add_liquidity(&mut ledger, alice(), Amount::new(E18), Amount::new(E18));
        assert!(matches!(r, Err(AmmError::Ledger(LedgerError::InsufficientAllowance { .. }))));
        assert_eq!(ledger.allowance(alice(), pool.address(), asset_a()), Amount::new(E18));

        ledger.approve(alice(), pool.address(), asset_b(), Amount::new(E18));
        let Ok(added) = pool.add_liquidity(&mut ledger, alice(), Amount::new(E18), Amount::new(E18)) else {
            panic!("retry failed");
        };
        assert_eq!(added.minted, Shares::new(E18 - 1_000));
        assert_eq!(ledger.allowance(alice(), pool.address(), asset_a()), Amount::ZERO);
        assert_conserved(&pool, &ledger);
    }

    // -- remove_liquidity -----------------------------------------------------

    #[test]
    fn sole_provider_round_trip() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 3 * E18);
        let added = add(&mut pool, &mut ledger, alice(), 3 * E18, 3 * E18);
        let Ok(removed) = pool.remove_liquidity(&mut ledger, alice(), added.minted) else {
            panic!("remove failed");
        };
        assert_eq!(removed.amount_a, Amount::new(3 * E18 - 1_000));
        assert_eq!(pool.shares_of(alice()), Shares::ZERO);
        assert_eq!(pool.total_shares(), Shares::new(1_000));
        assert_eq!(pool.reserves(), (Amount::new(1_000), Amount::new(1_000)));
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn remove_validation() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 3 * E18);
        let added = add(&mut pool, &mut ledger, alice(), E18, E18);
        let Some(too_many) = added.minted.checked_add(&Shares::new(1)) else {
            panic!("overflow");
        };
        assert_eq!(
            pool.remove_liquidity(&mut ledger, alice(), too_many),
            Err(AmmError::InsufficientShares)
        );
        assert_eq!(
            pool.remove_liquidity(&mut ledger, alice(), Shares::ZERO),
            Err(AmmError::InsufficientShares)
        );
        assert_eq!(
            pool.remove_liquidity(&mut ledger, AccountId::BURN, Shares::new(1)),
            Err(AmmError::InsufficientShares)
        );
    }

    #[test]
    fn emptied_pool_reseeds_as_first_deposit() {
        let mut pool = fixed_pool(1, 1);
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 100);
        let added = add(&mut pool, &mut ledger, alice(), 10, 10);
        let Ok(_) = pool.remove_liquidity(&mut ledger, alice(), added.minted) else {
            panic!("remove failed");
        };
        assert_eq!(pool.status(), PoolStatus::Empty);
        assert_eq!(pool.reserves(), (Amount::ZERO, Amount::ZERO));

        let again = add(&mut pool, &mut ledger, alice(), 4, 4);
        assert_eq!(again.minted, Shares::new(4));
    }

    // -- swap -----------------------------------------------------------------

    #[test]
    fn swap_reference_amount() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 20 * E18);
        add(&mut pool, &mut ledger, alice(), 5 * E18, 10 * E18);
        let Ok(r) = pool.swap(&mut ledger, alice(), asset_a(), Amount::new(E18)) else {
            panic!("swap failed");
        };
        assert_eq!(r.amount_out(), Amount::new(1_662_497_915_624_478_906));
        assert_eq!(r.fee(), Amount::new(3_000_000_000_000_000));
        assert_eq!(r.asset_out(), asset_b());
        assert_eq!(pool.accrued_fees().0, Amount::new(3_000_000_000_000_000));
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn swap_validation_order() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        assert!(matches!(
            pool.swap(&mut ledger, alice(), stranger(), Amount::ZERO),
            Err(AmmError::InvalidToken(_))
        ));
        assert_eq!(
            pool.swap(&mut ledger, alice(), asset_a(), Amount::ZERO),
            Err(AmmError::ZeroAmount)
        );
        assert_eq!(
            pool.swap(&mut ledger, alice(), asset_a(), Amount::new(1)),
            Err(AmmError::PoolEmpty)
        );
    }

    #[test]
    fn swap_grows_k() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 100 * E18);
        add(&mut pool, &mut ledger, alice(), 10 * E18, 10 * E18);
        let (ra, rb) = pool.reserves();
        let k_before = wide::product(ra.get(), rb.get());
        for _ in 0..3 {
            let Ok(_) = pool.swap(&mut ledger, alice(), asset_b(), Amount::new(E18)) else {
                panic!("swap failed");
            };
        }
        let (ra, rb) = pool.reserves();
        assert!(wide::product(ra.get(), rb.get()) > k_before);
    }

    #[test]
    fn swap_exact_out_delivers_exact_amount() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 20 * E18);
        add(&mut pool, &mut ledger, alice(), 5 * E18, 10 * E18);
        let want = Amount::new(1_662_497_915_624_478_906);
        let Ok(quoted) = pool.quote_amount_in(asset_a(), want) else {
            panic!("quote failed");
        };
        assert_eq!(quoted, Amount::new(E18));
        let Ok(r) = pool.swap_exact_out(&mut ledger, alice(), asset_a(), want) else {
            panic!("swap failed");
        };
        assert_eq!(r.amount_out(), want);
        assert_eq!(r.amount_in(), Amount::new(E18));
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn swap_exact_out_whole_reserve_rejected() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 20 * E18);
        add(&mut pool, &mut ledger, alice(), 5 * E18, 10 * E18);
        assert_eq!(
            pool.swap_exact_out(&mut ledger, alice(), asset_a(), Amount::new(10 * E18)),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn swap_without_allowance_is_atomic() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 20 * E18);
        add(&mut pool, &mut ledger, alice(), 5 * E18, 10 * E18);
        let Ok(()) = ledger.mint(bob(), asset_a(), Amount::new(E18)) else {
            panic!("mint failed");
        };
        let before = pool.reserves();
        let r = pool.swap(&mut ledger, bob(), asset_a(), Amount::new(E18));
        assert!(matches!(r, Err(AmmError::Ledger(_))));
        assert_eq!(pool.reserves(), before);
        assert_eq!(ledger.balance_of(bob(), asset_b()), Amount::ZERO);
    }

    #[test]
    fn fixed_ratio_swap_one_to_two() {
        let mut pool = fixed_pool(1, 2);
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 1_000 * E18);
        add(&mut pool, &mut ledger, alice(), 100 * E18, 200 * E18);
        let Ok(r) = pool.swap(&mut ledger, alice(), asset_a(), Amount::new(100 * E18)) else {
            panic!("swap failed");
        };
        assert_eq!(r.amount_out(), Amount::new(199_400_000_000_000_000_000));
        assert_eq!(r.fee(), Amount::new(300_000_000_000_000_000));
        assert_eq!(pool.fee_escrow().0, Amount::new(300_000_000_000_000_000));
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn fixed_ratio_swap_cannot_drain_reserve() {
        let mut pool = fixed_pool(1, 1);
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 1_000 * E18);
        add(&mut pool, &mut ledger, alice(), 10 * E18, 10 * E18);
        assert_eq!(
            pool.swap(&mut ledger, alice(), asset_a(), Amount::new(20 * E18)),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn fixed_ratio_deposit_ratio_enforced() {
        let mut pool = fixed_pool(1, 2);
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 1_000);
        let r = pool.add_liquidity(&mut ledger, alice(), Amount::new(10), Amount::new(10));
        assert_eq!(r, Err(AmmError::RatioMismatch));
    }

    // -- quotes ---------------------------------------------------------------

    #[test]
    fn spot_price_and_deposit_quote() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        assert_eq!(pool.spot_price(asset_a()).err(), Some(AmmError::PoolEmpty));
        fund(&mut ledger, &pool, alice(), 20 * E18);
        add(&mut pool, &mut ledger, alice(), 5 * E18, 10 * E18);

        let Ok(p) = pool.spot_price(asset_a()) else {
            panic!("price failed");
        };
        let Ok(two) = Price::new(2, 1) else {
            panic!("valid price");
        };
        assert_eq!(p, two);
        assert_eq!(
            pool.quote_deposit(asset_b(), Amount::new(4)),
            Ok(Amount::new(2))
        );
        assert!(pool.quote_deposit(stranger(), Amount::new(4)).is_err());
    }

    #[test]
    fn fixed_ratio_price_ignores_reserves() {
        let pool = fixed_pool(1, 2);
        let Ok(p) = pool.spot_price(asset_b()) else {
            panic!("price failed");
        };
        let Ok(half) = Price::new(1, 2) else {
            panic!("valid price");
        };
        assert_eq!(p, half);
        assert_eq!(pool.quote_deposit(asset_a(), Amount::new(5)), Ok(Amount::new(10)));
    }

    // -- rewards and share transfers ------------------------------------------

    #[test]
    fn compounding_pool_has_no_rewards() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        assert!(pool.pending_rewards(alice()).is_zero());
        assert_eq!(pool.claim_rewards(&mut ledger, alice()), Ok(PendingRewards::NONE));
    }

    #[test]
    fn distributed_fees_claimed_pro_rata() {
        let mut pool = fixed_pool(1, 1);
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 2_000 * E18);
        fund(&mut ledger, &pool, bob(), 2_000 * E18);
        add(&mut pool, &mut ledger, alice(), 1_000 * E18, 1_000 * E18);
        add(&mut pool, &mut ledger, bob(), 500 * E18, 500 * E18);
        let Ok(_) = pool.swap(&mut ledger, bob(), asset_a(), Amount::new(150 * E18)) else {
            panic!("swap failed");
        };

        assert_eq!(pool.pending_rewards(alice()).reward_a, Amount::new(300_000_000_000_000_000));
        assert_eq!(pool.pending_rewards(bob()).reward_a, Amount::new(150_000_000_000_000_000));

        let before = ledger.balance_of(alice(), asset_a());
        let Ok(paid) = pool.claim_rewards(&mut ledger, alice()) else {
            panic!("claim failed");
        };
        assert_eq!(paid.reward_a, Amount::new(300_000_000_000_000_000));
        assert_eq!(
            ledger.balance_of(alice(), asset_a()).get(),
            before.get() + 300_000_000_000_000_000
        );
        assert!(pool.pending_rewards(alice()).is_zero());
        assert_eq!(pool.claim_rewards(&mut ledger, alice()), Ok(PendingRewards::NONE));
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn remove_pays_rewards_with_principal() {
        let mut pool = fixed_pool(1, 1);
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 2_000 * E18);
        let added = add(&mut pool, &mut ledger, alice(), 1_000 * E18, 1_000 * E18);
        let Ok(_) = pool.swap(&mut ledger, alice(), asset_b(), Amount::new(100 * E18)) else {
            panic!("swap failed");
        };
        let Ok(r) = pool.remove_liquidity(&mut ledger, alice(), added.minted) else {
            panic!("remove failed");
        };
        assert_eq!(r.reward_b, Amount::new(300_000_000_000_000_000));
        assert!(r.reward_a.is_zero());
        assert_eq!(pool.status(), PoolStatus::Empty);
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn share_transfer_settles_both_sides() {
        let mut pool = fixed_pool(1, 1);
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 2_000 * E18);
        let added = add(&mut pool, &mut ledger, alice(), 1_000 * E18, 1_000 * E18);
        let Ok(_) = pool.swap(&mut ledger, alice(), asset_a(), Amount::new(100 * E18)) else {
            panic!("swap failed");
        };
        let Ok(()) = pool.transfer_shares(alice(), bob(), added.minted) else {
            panic!("transfer failed");
        };
        assert_eq!(pool.shares_of(bob()), added.minted);
        assert!(pool.pending_rewards(bob()).is_zero());
        assert_eq!(pool.pending_rewards(alice()).reward_a, Amount::new(300_000_000_000_000_000));
        assert_eq!(
            pool.transfer_shares(alice(), bob(), Shares::new(1)),
            Err(AmmError::InsufficientShares)
        );
    }

    fn distributing_cp_pool() -> Pool {
        let Ok(config) = PoolConfig::new(
            FeeRate::UNISWAP_V2,
            PoolConfig::MINIMUM_LIQUIDITY,
            DepositPolicy::WeakestConstraint,
            FeeMode::Distribute,
        ) else {
            panic!("valid config");
        };
        let Ok(p) = Pool::new(PoolId::new(2), pair(), PoolKind::ConstantProduct, config) else {
            panic!("valid pool");
        };
        p
    }

    #[test]
    fn locked_shares_earn_no_fees() {
        let mut pool = distributing_cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 10_000);
        let added = add(&mut pool, &mut ledger, alice(), 2_000, 2_000);
        assert_eq!(added.minted, Shares::new(1_000));

        let Ok(r) = pool.swap(&mut ledger, alice(), asset_a(), Amount::new(1_000)) else {
            panic!("swap failed");
        };
        assert_eq!(r.fee(), Amount::new(3));
        assert_eq!(pool.pending_rewards(alice()).reward_a, Amount::new(3));
        assert!(pool.pending_rewards(AccountId::BURN).is_zero());

        let Ok(paid) = pool.claim_rewards(&mut ledger, alice()) else {
            panic!("claim failed");
        };
        assert_eq!(paid.reward_a, Amount::new(3));
        assert_eq!(pool.fee_escrow(), (Amount::ZERO, Amount::ZERO));
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn fee_stays_in_reserve_when_only_locked_shares_remain() {
        let mut pool = distributing_cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 10_000);
        let added = add(&mut pool, &mut ledger, alice(), 2_000, 2_000);
        let Ok(_) = pool.remove_liquidity(&mut ledger, alice(), added.minted) else {
            panic!("remove failed");
        };
        assert_eq!(pool.total_shares(), Shares::new(1_000));

        let (ra, _) = pool.reserves();
        let Ok(r) = pool.swap(&mut ledger, alice(), asset_a(), Amount::new(1_000)) else {
            panic!("swap failed");
        };
        assert_eq!(r.fee(), Amount::new(3));
        assert_eq!(pool.reserves().0.get(), ra.get() + 1_000);
        assert_eq!(pool.fee_escrow(), (Amount::ZERO, Amount::ZERO));
        assert_conserved(&pool, &ledger);
    }

    #[test]
    fn event_log_stays_bounded() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 20 * E18);
        add(&mut pool, &mut ledger, alice(), 5 * E18, 10 * E18);
        for _ in 0..EventLog::<PoolEvent>::CAPACITY {
            let Ok(()) = pool.transfer_shares(alice(), bob(), Shares::new(1)) else {
                panic!("transfer failed");
            };
        }
        assert_eq!(pool.events().len(), EventLog::<PoolEvent>::CAPACITY);
        assert_eq!(pool.events().dropped(), 2);
        assert!(matches!(
            pool.events().iter().next(),
            Some(PoolEvent::SharesTransferred { .. })
        ));
    }

    #[test]
    fn events_recorded_in_order() {
        let mut pool = cp_pool();
        let mut ledger = InMemoryLedger::new();
        fund(&mut ledger, &pool, alice(), 20 * E18);
        add(&mut pool, &mut ledger, alice(), 5 * E18, 10 * E18);
        let Ok(_) = pool.swap(&mut ledger, alice(), asset_a(), Amount::new(E18)) else {
            panic!("swap failed");
        };
        let events = pool.drain_events();
        assert!(matches!(events[0], PoolEvent::LiquidityAdded { .. }));
        assert!(matches!(events[1], PoolEvent::Sync { .. }));
        assert!(matches!(events[2], PoolEvent::Swapped { .. }));
        assert!(pool.events().is_empty());
    }
}
