use bytes::Bytes;
use ethereum_types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

use ethrex_exec_rlp::{
    decode::RLPDecode,
    encode::RLPEncode,
    error::RLPDecodeError,
    structs::{Decoder, Encoder},
};

/// A validated, decoded transaction. `#[serde(untagged)]` mirrors the wire encoding: each
/// variant serializes exactly as its inner struct, with the type byte recovered from shape
/// (and, on decode, read explicitly rather than inferred).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Transaction {
    Legacy(LegacyTransaction),
    EIP2930(EIP2930Transaction),
    EIP1559(EIP1559Transaction),
    EIP4844(EIP4844Transaction),
    EIP7702(EIP7702Transaction),
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LegacyTransaction {
    pub nonce: u64,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub to: TxKind,
    pub value: U256,
    pub data: Bytes,
    pub v: U256,
    pub r: U256,
    pub s: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EIP2930Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub to: TxKind,
    pub value: U256,
    pub data: Bytes,
    pub access_list: Vec<AccessListEntry>,
    pub signature_y_parity: bool,
    pub signature_r: U256,
    pub signature_s: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EIP1559Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u64,
    pub max_fee_per_gas: u64,
    pub gas_limit: u64,
    pub to: TxKind,
    pub value: U256,
    pub data: Bytes,
    pub access_list: Vec<AccessListEntry>,
    pub signature_y_parity: bool,
    pub signature_r: U256,
    pub signature_s: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EIP4844Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u64,
    pub max_fee_per_gas: u64,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub access_list: Vec<AccessListEntry>,
    pub max_fee_per_blob_gas: U256,
    pub blob_versioned_hashes: Vec<H256>,
    pub signature_y_parity: bool,
    pub signature_r: U256,
    pub signature_s: U256,
}

/// EIP-7702: as [`EIP1559Transaction`], plus a non-empty authorization list that installs
/// delegation code on the signing EOAs.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EIP7702Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u64,
    pub max_fee_per_gas: u64,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub access_list: Vec<AccessListEntry>,
    pub authorization_list: Vec<AuthorizationTuple>,
    pub signature_y_parity: bool,
    pub signature_r: U256,
    pub signature_s: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessListEntry {
    pub address: Address,
    pub storage_keys: Vec<H256>,
}

/// One signed EIP-7702 authorization: "let `address`'s code be a delegation to `address`".
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthorizationTuple {
    pub chain_id: u64,
    pub address: Address,
    pub nonce: u64,
    pub y_parity: bool,
    pub r: U256,
    pub s: U256,
}

/// The transaction's kind: call or create.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum TxKind {
    Call(Address),
    #[default]
    Create,
}

impl TxKind {
    pub fn to(&self) -> Option<Address> {
        match self {
            TxKind::Call(address) => Some(*address),
            TxKind::Create => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TxType {
    #[default]
    Legacy = 0x00,
    EIP2930 = 0x01,
    EIP1559 = 0x02,
    EIP4844 = 0x03,
    EIP7702 = 0x04,
}

impl Transaction {
    pub fn tx_type(&self) -> TxType {
        match self {
            Transaction::Legacy(_) => TxType::Legacy,
            Transaction::EIP2930(_) => TxType::EIP2930,
            Transaction::EIP1559(_) => TxType::EIP1559,
            Transaction::EIP4844(_) => TxType::EIP4844,
            Transaction::EIP7702(_) => TxType::EIP7702,
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            Transaction::Legacy(t) => t.nonce,
            Transaction::EIP2930(t) => t.nonce,
            Transaction::EIP1559(t) => t.nonce,
            Transaction::EIP4844(t) => t.nonce,
            Transaction::EIP7702(t) => t.nonce,
        }
    }

    pub fn gas_limit(&self) -> u64 {
        match self {
            Transaction::Legacy(t) => t.gas_limit,
            Transaction::EIP2930(t) => t.gas_limit,
            Transaction::EIP1559(t) => t.gas_limit,
            Transaction::EIP4844(t) => t.gas_limit,
            Transaction::EIP7702(t) => t.gas_limit,
        }
    }

    pub fn value(&self) -> U256 {
        match self {
            Transaction::Legacy(t) => t.value,
            Transaction::EIP2930(t) => t.value,
            Transaction::EIP1559(t) => t.value,
            Transaction::EIP4844(t) => t.value,
            Transaction::EIP7702(t) => t.value,
        }
    }

    pub fn data(&self) -> &Bytes {
        match self {
            Transaction::Legacy(t) => &t.data,
            Transaction::EIP2930(t) => &t.data,
            Transaction::EIP1559(t) => &t.data,
            Transaction::EIP4844(t) => &t.data,
            Transaction::EIP7702(t) => &t.data,
        }
    }

    /// `None` marks a contract-creation transaction. EIP-4844 and EIP-7702 transactions
    /// always carry a recipient; they are represented with a plain `Address` rather than
    /// `TxKind` precisely so that invariant is encoded in the type.
    pub fn to(&self) -> Option<Address> {
        match self {
            Transaction::Legacy(t) => t.to.to(),
            Transaction::EIP2930(t) => t.to.to(),
            Transaction::EIP1559(t) => t.to.to(),
            Transaction::EIP4844(t) => Some(t.to),
            Transaction::EIP7702(t) => Some(t.to),
        }
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to().is_none()
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Transaction::Legacy(_) => None,
            Transaction::EIP2930(t) => Some(t.chain_id),
            Transaction::EIP1559(t) => Some(t.chain_id),
            Transaction::EIP4844(t) => Some(t.chain_id),
            Transaction::EIP7702(t) => Some(t.chain_id),
        }
    }

    pub fn gas_price(&self) -> u64 {
        match self {
            Transaction::Legacy(t) => t.gas_price,
            Transaction::EIP2930(t) => t.gas_price,
            Transaction::EIP1559(t) => t.max_fee_per_gas,
            Transaction::EIP4844(t) => t.max_fee_per_gas,
            Transaction::EIP7702(t) => t.max_fee_per_gas,
        }
    }

    pub fn max_fee_per_gas(&self) -> Option<u64> {
        match self {
            Transaction::Legacy(_) | Transaction::EIP2930(_) => None,
            Transaction::EIP1559(t) => Some(t.max_fee_per_gas),
            Transaction::EIP4844(t) => Some(t.max_fee_per_gas),
            Transaction::EIP7702(t) => Some(t.max_fee_per_gas),
        }
    }

    pub fn max_priority_fee_per_gas(&self) -> Option<u64> {
        match self {
            Transaction::Legacy(_) | Transaction::EIP2930(_) => None,
            Transaction::EIP1559(t) => Some(t.max_priority_fee_per_gas),
            Transaction::EIP4844(t) => Some(t.max_priority_fee_per_gas),
            Transaction::EIP7702(t) => Some(t.max_priority_fee_per_gas),
        }
    }

    pub fn access_list(&self) -> &[AccessListEntry] {
        match self {
            Transaction::Legacy(_) => &[],
            Transaction::EIP2930(t) => &t.access_list,
            Transaction::EIP1559(t) => &t.access_list,
            Transaction::EIP4844(t) => &t.access_list,
            Transaction::EIP7702(t) => &t.access_list,
        }
    }

    pub fn authorization_list(&self) -> Option<&[AuthorizationTuple]> {
        match self {
            Transaction::EIP7702(t) => Some(&t.authorization_list),
            _ => None,
        }
    }

    pub fn max_fee_per_blob_gas(&self) -> Option<U256> {
        match self {
            Transaction::EIP4844(t) => Some(t.max_fee_per_blob_gas),
            _ => None,
        }
    }

    pub fn blob_versioned_hashes(&self) -> &[H256] {
        match self {
            Transaction::EIP4844(t) => &t.blob_versioned_hashes,
            _ => &[],
        }
    }
}

impl RLPEncode for AccessListEntry {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        Encoder::new(buf)
            .encode_field(&self.address)
            .encode_field(&self.storage_keys)
            .finish();
    }
}

impl RLPDecode for AccessListEntry {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let decoder = Decoder::new(rlp)?;
        let (address, decoder) = decoder.decode_field("address")?;
        let (storage_keys, decoder) = decoder.decode_field("storageKeys")?;
        Ok((
            AccessListEntry {
                address,
                storage_keys,
            },
            decoder.finish()?,
        ))
    }
}

impl RLPEncode for AuthorizationTuple {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        Encoder::new(buf)
            .encode_field(&self.chain_id)
            .encode_field(&self.address)
            .encode_field(&self.nonce)
            .encode_field(&self.y_parity)
            .encode_field(&self.r)
            .encode_field(&self.s)
            .finish();
    }
}

impl RLPDecode for AuthorizationTuple {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let decoder = Decoder::new(rlp)?;
        let (chain_id, decoder) = decoder.decode_field("chainId")?;
        let (address, decoder) = decoder.decode_field("address")?;
        let (nonce, decoder) = decoder.decode_field("nonce")?;
        let (y_parity, decoder) = decoder.decode_field("yParity")?;
        let (r, decoder) = decoder.decode_field("r")?;
        let (s, decoder) = decoder.decode_field("s")?;
        Ok((
            AuthorizationTuple {
                chain_id,
                address,
                nonce,
                y_parity,
                r,
                s,
            },
            decoder.finish()?,
        ))
    }
}

impl RLPEncode for TxKind {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        match self {
            Self::Call(address) => address.encode(buf),
            Self::Create => bytes::Bytes::new().encode(buf),
        }
    }
}

impl RLPDecode for TxKind {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (bytes, rest): (Bytes, &[u8]) = RLPDecode::decode_unfinished(rlp)?;
        let kind = if bytes.is_empty() {
            TxKind::Create
        } else {
            TxKind::Call(Address::from_slice(&bytes))
        };
        Ok((kind, rest))
    }
}

impl RLPEncode for LegacyTransaction {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        Encoder::new(buf)
            .encode_field(&self.nonce)
            .encode_field(&self.gas_price)
            .encode_field(&self.gas_limit)
            .encode_field(&self.to)
            .encode_field(&self.value)
            .encode_field(&self.data)
            .encode_field(&self.v)
            .encode_field(&self.r)
            .encode_field(&self.s)
            .finish();
    }
}

impl RLPDecode for LegacyTransaction {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let decoder = Decoder::new(rlp)?;
        let (nonce, decoder) = decoder.decode_field("nonce")?;
        let (gas_price, decoder) = decoder.decode_field("gasPrice")?;
        let (gas_limit, decoder) = decoder.decode_field("gasLimit")?;
        let (to, decoder) = decoder.decode_field("to")?;
        let (value, decoder) = decoder.decode_field("value")?;
        let (data, decoder) = decoder.decode_field("data")?;
        let (v, decoder) = decoder.decode_field("v")?;
        let (r, decoder) = decoder.decode_field("r")?;
        let (s, decoder) = decoder.decode_field("s")?;
        Ok((
            LegacyTransaction {
                nonce,
                gas_price,
                gas_limit,
                to,
                value,
                data,
                v,
                r,
                s,
            },
            decoder.finish()?,
        ))
    }
}

impl RLPEncode for EIP2930Transaction {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        Encoder::new(buf)
            .encode_field(&self.chain_id)
            .encode_field(&self.nonce)
            .encode_field(&self.gas_price)
            .encode_field(&self.gas_limit)
            .encode_field(&self.to)
            .encode_field(&self.value)
            .encode_field(&self.data)
            .encode_field(&self.access_list)
            .encode_field(&self.signature_y_parity)
            .encode_field(&self.signature_r)
            .encode_field(&self.signature_s)
            .finish();
    }
}

impl RLPDecode for EIP2930Transaction {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let decoder = Decoder::new(rlp)?;
        let (chain_id, decoder) = decoder.decode_field("chainId")?;
        let (nonce, decoder) = decoder.decode_field("nonce")?;
        let (gas_price, decoder) = decoder.decode_field("gasPrice")?;
        let (gas_limit, decoder) = decoder.decode_field("gasLimit")?;
        let (to, decoder) = decoder.decode_field("to")?;
        let (value, decoder) = decoder.decode_field("value")?;
        let (data, decoder) = decoder.decode_field("data")?;
        let (access_list, decoder) = decoder.decode_field("accessList")?;
        let (signature_y_parity, decoder) = decoder.decode_field("yParity")?;
        let (signature_r, decoder) = decoder.decode_field("r")?;
        let (signature_s, decoder) = decoder.decode_field("s")?;
        Ok((
            EIP2930Transaction {
                chain_id,
                nonce,
                gas_price,
                gas_limit,
                to,
                value,
                data,
                access_list,
                signature_y_parity,
                signature_r,
                signature_s,
            },
            decoder.finish()?,
        ))
    }
}

impl RLPEncode for EIP1559Transaction {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        Encoder::new(buf)
            .encode_field(&self.chain_id)
            .encode_field(&self.nonce)
            .encode_field(&self.max_priority_fee_per_gas)
            .encode_field(&self.max_fee_per_gas)
            .encode_field(&self.gas_limit)
            .encode_field(&self.to)
            .encode_field(&self.value)
            .encode_field(&self.data)
            .encode_field(&self.access_list)
            .encode_field(&self.signature_y_parity)
            .encode_field(&self.signature_r)
            .encode_field(&self.signature_s)
            .finish();
    }
}

impl RLPDecode for EIP1559Transaction {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let decoder = Decoder::new(rlp)?;
        let (chain_id, decoder) = decoder.decode_field("chainId")?;
        let (nonce, decoder) = decoder.decode_field("nonce")?;
        let (max_priority_fee_per_gas, decoder) = decoder.decode_field("maxPriorityFeePerGas")?;
        let (max_fee_per_gas, decoder) = decoder.decode_field("maxFeePerGas")?;
        let (gas_limit, decoder) = decoder.decode_field("gasLimit")?;
        let (to, decoder) = decoder.decode_field("to")?;
        let (value, decoder) = decoder.decode_field("value")?;
        let (data, decoder) = decoder.decode_field("data")?;
        let (access_list, decoder) = decoder.decode_field("accessList")?;
        let (signature_y_parity, decoder) = decoder.decode_field("yParity")?;
        let (signature_r, decoder) = decoder.decode_field("r")?;
        let (signature_s, decoder) = decoder.decode_field("s")?;
        Ok((
            EIP1559Transaction {
                chain_id,
                nonce,
                max_priority_fee_per_gas,
                max_fee_per_gas,
                gas_limit,
                to,
                value,
                data,
                access_list,
                signature_y_parity,
                signature_r,
                signature_s,
            },
            decoder.finish()?,
        ))
    }
}

impl RLPEncode for EIP4844Transaction {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        Encoder::new(buf)
            .encode_field(&self.chain_id)
            .encode_field(&self.nonce)
            .encode_field(&self.max_priority_fee_per_gas)
            .encode_field(&self.max_fee_per_gas)
            .encode_field(&self.gas_limit)
            .encode_field(&self.to)
            .encode_field(&self.value)
            .encode_field(&self.data)
            .encode_field(&self.access_list)
            .encode_field(&self.max_fee_per_blob_gas)
            .encode_field(&self.blob_versioned_hashes)
            .encode_field(&self.signature_y_parity)
            .encode_field(&self.signature_r)
            .encode_field(&self.signature_s)
            .finish();
    }
}

impl RLPDecode for EIP4844Transaction {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let decoder = Decoder::new(rlp)?;
        let (chain_id, decoder) = decoder.decode_field("chainId")?;
        let (nonce, decoder) = decoder.decode_field("nonce")?;
        let (max_priority_fee_per_gas, decoder) = decoder.decode_field("maxPriorityFeePerGas")?;
        let (max_fee_per_gas, decoder) = decoder.decode_field("maxFeePerGas")?;
        let (gas_limit, decoder) = decoder.decode_field("gasLimit")?;
        let (to, decoder) = decoder.decode_field("to")?;
        let (value, decoder) = decoder.decode_field("value")?;
        let (data, decoder) = decoder.decode_field("data")?;
        let (access_list, decoder) = decoder.decode_field("accessList")?;
        let (max_fee_per_blob_gas, decoder) = decoder.decode_field("maxFeePerBlobGas")?;
        let (blob_versioned_hashes, decoder) = decoder.decode_field("blobVersionedHashes")?;
        let (signature_y_parity, decoder) = decoder.decode_field("yParity")?;
        let (signature_r, decoder) = decoder.decode_field("r")?;
        let (signature_s, decoder) = decoder.decode_field("s")?;
        Ok((
            EIP4844Transaction {
                chain_id,
                nonce,
                max_priority_fee_per_gas,
                max_fee_per_gas,
                gas_limit,
                to,
                value,
                data,
                access_list,
                max_fee_per_blob_gas,
                blob_versioned_hashes,
                signature_y_parity,
                signature_r,
                signature_s,
            },
            decoder.finish()?,
        ))
    }
}

impl RLPEncode for EIP7702Transaction {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        Encoder::new(buf)
            .encode_field(&self.chain_id)
            .encode_field(&self.nonce)
            .encode_field(&self.max_priority_fee_per_gas)
            .encode_field(&self.max_fee_per_gas)
            .encode_field(&self.gas_limit)
            .encode_field(&self.to)
            .encode_field(&self.value)
            .encode_field(&self.data)
            .encode_field(&self.access_list)
            .encode_field(&self.authorization_list)
            .encode_field(&self.signature_y_parity)
            .encode_field(&self.signature_r)
            .encode_field(&self.signature_s)
            .finish();
    }
}

impl RLPDecode for EIP7702Transaction {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let decoder = Decoder::new(rlp)?;
        let (chain_id, decoder) = decoder.decode_field("chainId")?;
        let (nonce, decoder) = decoder.decode_field("nonce")?;
        let (max_priority_fee_per_gas, decoder) = decoder.decode_field("maxPriorityFeePerGas")?;
        let (max_fee_per_gas, decoder) = decoder.decode_field("maxFeePerGas")?;
        let (gas_limit, decoder) = decoder.decode_field("gasLimit")?;
        let (to, decoder) = decoder.decode_field("to")?;
        let (value, decoder) = decoder.decode_field("value")?;
        let (data, decoder) = decoder.decode_field("data")?;
        let (access_list, decoder) = decoder.decode_field("accessList")?;
        let (authorization_list, decoder) = decoder.decode_field("authorizationList")?;
        let (signature_y_parity, decoder) = decoder.decode_field("yParity")?;
        let (signature_r, decoder) = decoder.decode_field("r")?;
        let (signature_s, decoder) = decoder.decode_field("s")?;
        Ok((
            EIP7702Transaction {
                chain_id,
                nonce,
                max_priority_fee_per_gas,
                max_fee_per_gas,
                gas_limit,
                to,
                value,
                data,
                access_list,
                authorization_list,
                signature_y_parity,
                signature_r,
                signature_s,
            },
            decoder.finish()?,
        ))
    }
}

/// Typed-envelope encoding (EIP-2718): legacy transactions RLP-encode as a bare list;
/// every other type is prefixed with its one-byte type tag.
impl RLPEncode for Transaction {
    fn encode(&self, buf: &mut dyn bytes::BufMut) {
        match self {
            Transaction::Legacy(t) => t.encode(buf),
            Transaction::EIP2930(t) => {
                buf.put_u8(TxType::EIP2930 as u8);
                t.encode(buf);
            }
            Transaction::EIP1559(t) => {
                buf.put_u8(TxType::EIP1559 as u8);
                t.encode(buf);
            }
            Transaction::EIP4844(t) => {
                buf.put_u8(TxType::EIP4844 as u8);
                t.encode(buf);
            }
            Transaction::EIP7702(t) => {
                buf.put_u8(TxType::EIP7702 as u8);
                t.encode(buf);
            }
        }
    }
}

impl RLPDecode for Transaction {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let first = *rlp.first().ok_or(RLPDecodeError::InvalidLength)?;
        match first {
            0x01 => EIP2930Transaction::decode_unfinished(&rlp[1..])
                .map(|(tx, rest)| (Transaction::EIP2930(tx), rest)),
            0x02 => EIP1559Transaction::decode_unfinished(&rlp[1..])
                .map(|(tx, rest)| (Transaction::EIP1559(tx), rest)),
            0x03 => EIP4844Transaction::decode_unfinished(&rlp[1..])
                .map(|(tx, rest)| (Transaction::EIP4844(tx), rest)),
            0x04 => EIP7702Transaction::decode_unfinished(&rlp[1..])
                .map(|(tx, rest)| (Transaction::EIP7702(tx), rest)),
            // Legacy transactions are a bare list; their first byte is always >= 0xc0.
            _ => LegacyTransaction::decode_unfinished(rlp)
                .map(|(tx, rest)| (Transaction::Legacy(tx), rest)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_transaction_round_trips_through_rlp() {
        let tx = Transaction::Legacy(LegacyTransaction {
            nonce: 3,
            gas_price: 10,
            gas_limit: 21000,
            to: TxKind::Call(Address::from_low_u64_be(42)),
            value: U256::from(1000),
            data: Bytes::new(),
            v: U256::from(27),
            r: U256::from(1),
            s: U256::from(2),
        });
        let encoded = tx.encode_to_vec();
        let decoded = Transaction::decode(&encoded).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded.tx_type(), TxType::Legacy);
    }

    #[test]
    fn eip1559_transaction_round_trips_and_reports_type() {
        let tx = Transaction::EIP1559(EIP1559Transaction {
            chain_id: 1,
            nonce: 0,
            max_priority_fee_per_gas: 5,
            max_fee_per_gas: 50,
            gas_limit: 21000,
            to: TxKind::Call(Address::zero()),
            value: U256::zero(),
            data: Bytes::new(),
            access_list: vec![],
            signature_y_parity: false,
            signature_r: U256::one(),
            signature_s: U256::one(),
        });
        let encoded = tx.encode_to_vec();
        assert_eq!(encoded[0], 0x02);
        let decoded = Transaction::decode(&encoded).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn contract_creation_has_no_recipient() {
        let tx = Transaction::Legacy(LegacyTransaction {
            to: TxKind::Create,
            ..Default::default()
        });
        assert!(tx.is_contract_creation());
        assert_eq!(tx.to(), None);
    }
}
