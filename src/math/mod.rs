//! Integer math for pricing and share accounting.
//!
//! - [`SwapEngine`]: constant-product and fixed-ratio pricing, `k` check.
//! - [`LiquidityAccountant`]: share minting, redemption, deposit quotes and
//!   the protocol-fee mint.
//! - [`wide`]: 256/512-bit `mul_div` and integer square root.
//! - [`CheckedArithmetic`]: `?`-friendly checked ops on amounts and shares.
//!
//! No floating point is used anywhere.

mod checked;
mod liquidity_math;
mod swap_math;
pub mod wide;

pub use checked::CheckedArithmetic;
pub use liquidity_math::{InitialMint, LiquidityAccountant};
pub use swap_math::SwapEngine;
