//! Protocol constants consumed by the intrinsic-gas, fee, and delegation-code checks.
//! Values are wire-level bit-exact (spec §6).

/// Gas charged per transaction before any calldata/access-list/create cost is added.
pub const TX_BASE_COST: u64 = 21_000;

/// EIP-2028: gas per zero byte of calldata, expressed as "tokens".
pub const ZERO_BYTE_TOKENS: u64 = 1;
/// EIP-2028: gas per non-zero byte of calldata, expressed as "tokens".
pub const NON_ZERO_BYTE_TOKENS: u64 = 4;
/// EIP-7623: gas per token charged for the calldata floor.
pub const CALLDATA_FLOOR_GAS_PER_TOKEN: u64 = 10;
/// Per-token data cost folded into intrinsic gas (independent of the floor).
pub const TOKEN_DATA_COST: u64 = 4;

/// Base cost of a contract-creation transaction (EIP-2).
pub const CREATE_TX_COST: u64 = 32_000;
/// EIP-3860: cost per 32-byte word of init code.
pub const INIT_CODE_WORD_COST: u64 = 2;

/// EIP-2930/2929: cost per access-list address entry.
pub const ACCESS_LIST_ADDRESS_COST: u64 = 2_400;
/// EIP-2930/2929: cost per access-list storage slot.
pub const ACCESS_LIST_STORAGE_KEY_COST: u64 = 1_900;

/// EIP-7702: cost per authorization tuple.
pub const PER_AUTHORIZATION_COST: u64 = 25_000;

/// EIP-3529: refund divisor from London onward.
pub const REFUND_QUOTIENT: u64 = 5;
/// Refund divisor before London.
pub const REFUND_QUOTIENT_PRE_LONDON: u64 = 2;

/// EIP-4844: gas represented by a single blob.
pub const GAS_PER_BLOB: u64 = 131_072;
/// EIP-4844: required leading version byte of a blob versioned hash.
pub const BLOB_VERSIONED_HASH_VERSION: u8 = 0x01;

/// EIP-4844 fake-exponential parameter: blob base fee update fraction.
pub const BLOB_BASE_FEE_UPDATE_FRACTION: u64 = 3_338_477;
/// EIP-4844: minimum blob base fee, in wei per blob-gas unit.
pub const MIN_BLOB_BASE_FEE: u64 = 1;

/// EIP-7702: delegation designation prefix (0xef 0x01 0x00), 23 bytes total with the address.
pub const DELEGATION_DESIGNATION_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];
/// Total length of a delegation designation: 3-byte prefix + 20-byte address.
pub const DELEGATION_DESIGNATION_LEN: usize = 23;

/// Widens a byte/entry count into the `u64` gas domain. Saturates instead of casting
/// (`as` casts are denied by this crate's lints); real transactions never approach `u64::MAX`.
pub fn count_as_gas(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}
