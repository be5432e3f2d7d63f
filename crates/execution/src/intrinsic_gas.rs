use ethereum_types::U256;
use ethrex_exec_core::Transaction;

use crate::constants::{
    ACCESS_LIST_ADDRESS_COST, ACCESS_LIST_STORAGE_KEY_COST, CALLDATA_FLOOR_GAS_PER_TOKEN,
    CREATE_TX_COST, INIT_CODE_WORD_COST, NON_ZERO_BYTE_TOKENS, PER_AUTHORIZATION_COST,
    TOKEN_DATA_COST, TX_BASE_COST, ZERO_BYTE_TOKENS,
};

/// `(intrinsic_gas, calldata_floor_gas)`, computed deterministically and without
/// failure for every transaction shape (§4.3). The floor is always computed even on
/// forks that predate EIP-7623; it is the caller's job to ignore it pre-Prague.
/// Arithmetic is saturating throughout per this calculator's "no failure" contract.
pub fn intrinsic_gas(tx: &Transaction) -> (U256, U256) {
    let tokens = calldata_tokens(tx.data());

    let calldata_floor_gas = U256::from(TX_BASE_COST)
        .saturating_add(U256::from(CALLDATA_FLOOR_GAS_PER_TOKEN).saturating_mul(tokens));
    let data_cost = U256::from(TOKEN_DATA_COST).saturating_mul(tokens);

    let create_cost = if tx.is_contract_creation() {
        let words = U256::from(tx.data().len().div_ceil(32));
        U256::from(CREATE_TX_COST).saturating_add(U256::from(INIT_CODE_WORD_COST).saturating_mul(words))
    } else {
        U256::zero()
    };

    let access_list = tx.access_list();
    let slot_count: usize = access_list.iter().map(|entry| entry.storage_keys.len()).sum();
    let access_list_cost = U256::from(ACCESS_LIST_ADDRESS_COST)
        .saturating_mul(U256::from(access_list.len()))
        .saturating_add(U256::from(ACCESS_LIST_STORAGE_KEY_COST).saturating_mul(U256::from(slot_count)));

    let authorization_cost = tx
        .authorization_list()
        .map(|list| U256::from(PER_AUTHORIZATION_COST).saturating_mul(U256::from(list.len())))
        .unwrap_or(U256::zero());

    let intrinsic = U256::from(TX_BASE_COST)
        .saturating_add(data_cost)
        .saturating_add(create_cost)
        .saturating_add(access_list_cost)
        .saturating_add(authorization_cost);

    (intrinsic, calldata_floor_gas)
}

fn calldata_tokens(data: &[u8]) -> U256 {
    let zero_bytes = U256::from(data.iter().filter(|b| **b == 0).count());
    let non_zero_bytes = U256::from(data.len()).saturating_sub(zero_bytes);
    zero_bytes
        .saturating_mul(U256::from(ZERO_BYTE_TOKENS))
        .saturating_add(non_zero_bytes.saturating_mul(U256::from(NON_ZERO_BYTE_TOKENS)))
}
