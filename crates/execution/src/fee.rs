use ethereum_types::U256;
use ethrex_exec_core::Transaction;

use crate::constants::{BLOB_BASE_FEE_UPDATE_FRACTION, MIN_BLOB_BASE_FEE};
use crate::errors::VMError;

/// `(effective_gas_price, priority_fee_per_gas)` per tx type (§4.11.1), shared by the
/// processor and any future caller (e.g. mempool admission), the way the teacher's
/// `levm` backend centralizes `calculate_gas_price` in one module.
pub fn effective_gas_price(tx: &Transaction, base_fee: U256) -> Result<(U256, U256), VMError> {
    match tx {
        Transaction::Legacy(_) | Transaction::EIP2930(_) => {
            let gas_price = U256::from(tx.gas_price());
            if gas_price < base_fee {
                return Err(VMError::GasPriceBelowBaseFee);
            }
            let priority_fee = gas_price.checked_sub(base_fee).ok_or(VMError::InvalidGasPrice)?;
            Ok((gas_price, priority_fee))
        }
        Transaction::EIP1559(_) | Transaction::EIP4844(_) | Transaction::EIP7702(_) => {
            let max_fee = U256::from(tx.max_fee_per_gas().ok_or(VMError::InvalidGasPrice)?);
            let max_priority_fee =
                U256::from(tx.max_priority_fee_per_gas().ok_or(VMError::InvalidGasPrice)?);
            if max_fee < max_priority_fee {
                return Err(VMError::PriorityFeeGreaterThanMaxFee);
            }
            if max_fee < base_fee {
                return Err(VMError::InsufficientMaxFeePerGas);
            }
            let headroom = max_fee.checked_sub(base_fee).ok_or(VMError::InvalidGasPrice)?;
            let priority_fee = max_priority_fee.min(headroom);
            let effective = base_fee.checked_add(priority_fee).ok_or(VMError::InvalidGasPrice)?;
            Ok((effective, priority_fee))
        }
    }
}

/// EIP-4844 fake-exponential blob base fee, as a function of the block's excess blob gas.
pub fn blob_gas_price(excess_blob_gas: U256) -> U256 {
    fake_exponential(
        U256::from(MIN_BLOB_BASE_FEE),
        excess_blob_gas,
        U256::from(BLOB_BASE_FEE_UPDATE_FRACTION),
    )
}

/// `factor * e**(numerator / denominator)`, approximated by the Taylor series the protocol
/// mandates (EIP-4844 `fake_exponential`), using saturating integer arithmetic throughout.
fn fake_exponential(factor: U256, numerator: U256, denominator: U256) -> U256 {
    let mut i = U256::one();
    let mut output = U256::zero();
    let mut numerator_accum = factor.saturating_mul(denominator);

    while !numerator_accum.is_zero() {
        output = output.saturating_add(numerator_accum);
        let divisor = denominator.saturating_mul(i);
        numerator_accum = if divisor.is_zero() {
            U256::zero()
        } else {
            numerator_accum
                .saturating_mul(numerator)
                .checked_div(divisor)
                .unwrap_or(U256::zero())
        };
        i = i.saturating_add(U256::one());
    }

    output.checked_div(denominator).unwrap_or(U256::zero())
}
