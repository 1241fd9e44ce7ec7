//! Outcome of an executed swap.

use serde::{Deserialize, Serialize};

use super::{Amount, AssetId};

/// Amounts exchanged by a swap.
///
/// `fee` is the part of `amount_in` withheld for liquidity providers.
/// Under compounding pools it stays in the reserves; under distributing
/// pools it is escrowed for the fee distributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapResult {
    asset_in: AssetId,
    asset_out: AssetId,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Bundles the amounts of a swap.
    pub const fn new(
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Self {
        Self {
            asset_in,
            asset_out,
            amount_in,
            amount_out,
            fee,
        }
    }

    /// Asset paid by the trader.
    #[must_use]
    pub const fn asset_in(&self) -> AssetId {
        self.asset_in
    }

    /// Asset received by the trader.
    #[must_use]
    pub const fn asset_out(&self) -> AssetId {
        self.asset_out
    }

    /// Units paid in.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Units paid out.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Fee withheld from the input.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}
