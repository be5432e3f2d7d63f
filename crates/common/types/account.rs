use bytes::Bytes;
use ethereum_types::{H256, U256};
use sha3::{Digest as _, Keccak256};

use ethrex_exec_rlp::{
    decode::RLPDecode,
    encode::RLPEncode,
    error::RLPDecodeError,
    structs::{Decoder, Encoder},
};

use lazy_static::lazy_static;

lazy_static! {
    /// keccak256("") — the code hash of an account with no code.
    pub static ref EMPTY_KECCACK_HASH: H256 = H256::from_slice(
        &hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
            .expect("hardcoded hash is valid hex")[..32],
    );
    /// keccak256(RLP_NULL) — the storage root of an account with no storage.
    pub static ref EMPTY_TRIE_HASH: H256 = H256::from_slice(
        Keccak256::new().chain_update([0x80u8]).finalize().as_slice(),
    );
}

/// Account state as tracked by [`crate::WorldState`](super): protocol-level fields only,
/// no code/storage payload (those live in their own maps, keyed by address).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountState {
    pub nonce: u64,
    pub balance: U256,
    pub storage_root: H256,
    pub code_hash: H256,
}

impl Default for AccountState {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: U256::zero(),
            storage_root: *EMPTY_TRIE_HASH,
            code_hash: *EMPTY_KECCACK_HASH,
        }
    }
}

impl AccountState {
    pub fn is_empty(&self) -> bool {
        self.nonce == 0 && self.balance.is_zero() && self.code_hash == *EMPTY_KECCACK_HASH
    }
}

pub fn code_hash(code: &Bytes) -> H256 {
    if code.is_empty() {
        return *EMPTY_KECCACK_HASH;
    }
    keccak_hash::keccak(code.as_ref())
}

impl RLPEncode for AccountState {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        Encoder::new(buf)
            .encode_field(&self.nonce)
            .encode_field(&self.balance)
            .encode_field(&self.storage_root)
            .encode_field(&self.code_hash)
            .finish();
    }
}

impl RLPDecode for AccountState {
    fn decode_unfinished(rlp: &[u8]) -> Result<(AccountState, &[u8]), RLPDecodeError> {
        let decoder = Decoder::new(rlp)?;
        let (nonce, decoder) = decoder.decode_field("nonce")?;
        let (balance, decoder) = decoder.decode_field("balance")?;
        let (storage_root, decoder) = decoder.decode_field("storage_root")?;
        let (code_hash, decoder) = decoder.decode_field("code_hash")?;
        let state = AccountState {
            nonce,
            balance,
            storage_root,
            code_hash,
        };
        Ok((state, decoder.finish()?))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_code_hash_of_empty_code_is_canonical() {
        let empty_code = Bytes::new();
        assert_eq!(code_hash(&empty_code), *EMPTY_KECCACK_HASH);
    }

    #[test]
    fn default_account_state_is_empty() {
        assert!(AccountState::default().is_empty());
    }

    #[test]
    fn account_state_round_trips_through_rlp() {
        let state = AccountState {
            nonce: 7,
            balance: U256::from(1_000_000),
            storage_root: *EMPTY_TRIE_HASH,
            code_hash: *EMPTY_KECCACK_HASH,
        };
        let encoded = state.encode_to_vec();
        let decoded = AccountState::decode(&encoded).unwrap();
        assert_eq!(decoded, state);
    }
}
