mod account;
mod receipt;
pub mod transaction;

pub use account::*;
pub use receipt::*;
pub use transaction::*;

pub use ethereum_types::{Address, U256};

/// 32-byte hash identifier. An alias rather than a newtype: the codec and hashing
/// crates already operate on `H256` directly.
pub type Hash = ethereum_types::H256;
pub type StorageSlot = ethereum_types::H256;
pub type StorageValue = ethereum_types::U256;
