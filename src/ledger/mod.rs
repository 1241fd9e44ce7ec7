//! Reference [`AssetLedger`](crate::traits::AssetLedger) implementation.

mod in_memory;

pub use in_memory::InMemoryLedger;
