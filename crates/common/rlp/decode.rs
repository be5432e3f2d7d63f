use crate::{
    constants::{RLP_EMPTY_LIST, RLP_NULL},
    error::RLPDecodeError,
};
use bytes::Bytes;
use ethereum_types::{Address, Bloom, Signature, H160, H256, H32, H520, U256};

/// Decodes RLP-encoded data. See the Ethereum RLP spec for details.
/// [`decode_unfinished`](RLPDecode::decode_unfinished) decodes a value and returns the
/// remaining, unconsumed bytes; [`decode`](RLPDecode::decode) requires the input to be
/// fully consumed.
pub trait RLPDecode: Sized {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError>;

    fn decode(rlp: &[u8]) -> Result<Self, RLPDecodeError> {
        let (decoded, remaining) = Self::decode_unfinished(rlp)?;
        if !remaining.is_empty() {
            return Err(RLPDecodeError::InvalidLength);
        }
        Ok(decoded)
    }
}

impl RLPDecode for bool {
    fn decode_unfinished(buf: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let first = *buf.first().ok_or(RLPDecodeError::InvalidLength)?;
        let value = match first {
            RLP_NULL => false,
            0x01 => true,
            _ => return Err(RLPDecodeError::MalformedBoolean),
        };
        Ok((value, buf.get(1..).ok_or(RLPDecodeError::InvalidLength)?))
    }
}

impl RLPDecode for u8 {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (bytes, rest) = decode_bytes(rlp)?;
        let padded: [u8; 1] = static_left_pad(bytes)?;
        Ok((padded[0], rest))
    }
}

macro_rules! impl_decode_for_uint {
    ($t:ty, $n:literal) => {
        impl RLPDecode for $t {
            fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
                let (bytes, rest) = decode_bytes(rlp)?;
                let padded: [u8; $n] = static_left_pad(bytes)?;
                Ok((<$t>::from_be_bytes(padded), rest))
            }
        }
    };
}

impl_decode_for_uint!(u16, 2);
impl_decode_for_uint!(u32, 4);
impl_decode_for_uint!(u64, 8);
impl_decode_for_uint!(usize, 8);
impl_decode_for_uint!(u128, 16);

impl<const N: usize> RLPDecode for [u8; N] {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (decoded_bytes, rest) = decode_bytes(rlp)?;
        let value: [u8; N] = decoded_bytes
            .try_into()
            .map_err(|_| RLPDecodeError::InvalidLength)?;
        Ok((value, rest))
    }
}

impl RLPDecode for Bytes {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (decoded, rest) = decode_bytes(rlp)?;
        Ok((Bytes::copy_from_slice(decoded), rest))
    }
}

impl RLPDecode for H32 {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (value, rest) = RLPDecode::decode_unfinished(rlp)?;
        Ok((H32(value), rest))
    }
}

impl RLPDecode for H256 {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (value, rest) = RLPDecode::decode_unfinished(rlp)?;
        Ok((H256(value), rest))
    }
}

impl RLPDecode for Address {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (value, rest) = RLPDecode::decode_unfinished(rlp)?;
        Ok((H160(value), rest))
    }
}

impl RLPDecode for Signature {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (value, rest) = RLPDecode::decode_unfinished(rlp)?;
        Ok((H520(value), rest))
    }
}

impl RLPDecode for U256 {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (bytes, rest) = decode_bytes(rlp)?;
        let padded: [u8; 32] = static_left_pad(bytes)?;
        Ok((U256::from_big_endian(&padded), rest))
    }
}

impl RLPDecode for Bloom {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (value, rest) = RLPDecode::decode_unfinished(rlp)?;
        Ok((Bloom(value), rest))
    }
}

impl RLPDecode for String {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (str_bytes, rest) = decode_bytes(rlp)?;
        let value =
            String::from_utf8(str_bytes.to_vec()).map_err(|_| RLPDecodeError::MalformedData)?;
        Ok((value, rest))
    }
}

impl<T: RLPDecode> RLPDecode for Vec<T> {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        if rlp.first() == Some(&RLP_EMPTY_LIST) {
            return Ok((Vec::new(), rlp.get(1..).ok_or(RLPDecodeError::InvalidLength)?));
        }
        let (is_list, payload, input_rest) = decode_rlp_item(rlp)?;
        if !is_list {
            return Err(RLPDecodeError::UnexpectedString);
        }
        let mut result = Vec::new();
        let mut current_slice = payload;
        while !current_slice.is_empty() {
            let (item, rest) = T::decode_unfinished(current_slice)?;
            result.push(item);
            current_slice = rest;
        }
        Ok((result, input_rest))
    }
}

impl<T: RLPDecode> RLPDecode for Option<T> {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        if rlp.first() == Some(&RLP_NULL) {
            return Ok((None, rlp.get(1..).ok_or(RLPDecodeError::InvalidLength)?));
        }
        let (value, rest) = T::decode_unfinished(rlp)?;
        Ok((Some(value), rest))
    }
}

impl<T1: RLPDecode, T2: RLPDecode> RLPDecode for (T1, T2) {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (is_list, payload, input_rest) = decode_rlp_item(rlp)?;
        if !is_list {
            return Err(RLPDecodeError::UnexpectedString);
        }
        let (first, first_rest) = T1::decode_unfinished(payload)?;
        let (second, second_rest) = T2::decode_unfinished(first_rest)?;
        if !second_rest.is_empty() {
            return Err(RLPDecodeError::MalformedData);
        }
        Ok(((first, second), input_rest))
    }
}

impl<T1: RLPDecode, T2: RLPDecode, T3: RLPDecode> RLPDecode for (T1, T2, T3) {
    fn decode_unfinished(rlp: &[u8]) -> Result<(Self, &[u8]), RLPDecodeError> {
        let (is_list, payload, input_rest) = decode_rlp_item(rlp)?;
        if !is_list {
            return Err(RLPDecodeError::UnexpectedString);
        }
        let (first, first_rest) = T1::decode_unfinished(payload)?;
        let (second, second_rest) = T2::decode_unfinished(first_rest)?;
        let (third, third_rest) = T3::decode_unfinished(second_rest)?;
        if !third_rest.is_empty() {
            return Err(RLPDecodeError::MalformedData);
        }
        Ok(((first, second, third), input_rest))
    }
}

/// Splits the first RLP item off `data`, returning (is_list, payload, remaining bytes).
pub fn decode_rlp_item(data: &[u8]) -> Result<(bool, &[u8], &[u8]), RLPDecodeError> {
    let first_byte = *data.first().ok_or(RLPDecodeError::InvalidLength)?;

    match first_byte {
        0..=0x7F => Ok((false, data.get(..1).ok_or(RLPDecodeError::InvalidLength)?, &data[1..])),
        0x80..=0xB7 => {
            let length = (first_byte - RLP_NULL) as usize;
            let (payload, rest) = split_checked(data, 1, length)?;
            Ok((false, payload, rest))
        }
        0xB8..=0xBF => {
            let length_of_length = (first_byte - 0xB7) as usize;
            let length_bytes = data
                .get(1..1 + length_of_length)
                .ok_or(RLPDecodeError::InvalidLength)?;
            let length = usize::from_be_bytes(static_left_pad(length_bytes)?);
            let (payload, rest) = split_checked(data, 1 + length_of_length, length)?;
            Ok((false, payload, rest))
        }
        RLP_EMPTY_LIST..=0xF7 => {
            let length = (first_byte - RLP_EMPTY_LIST) as usize;
            let (payload, rest) = split_checked(data, 1, length)?;
            Ok((true, payload, rest))
        }
        0xF8..=0xFF => {
            let list_length = (first_byte - 0xF7) as usize;
            let length_bytes = data
                .get(1..1 + list_length)
                .ok_or(RLPDecodeError::InvalidLength)?;
            let payload_length = usize::from_be_bytes(static_left_pad(length_bytes)?);
            let (payload, rest) = split_checked(data, 1 + list_length, payload_length)?;
            Ok((true, payload, rest))
        }
    }
}

fn split_checked(
    data: &[u8],
    header_len: usize,
    payload_len: usize,
) -> Result<(&[u8], &[u8]), RLPDecodeError> {
    let payload = data
        .get(header_len..header_len + payload_len)
        .ok_or(RLPDecodeError::InvalidLength)?;
    let rest = data
        .get(header_len + payload_len..)
        .ok_or(RLPDecodeError::InvalidLength)?;
    Ok((payload, rest))
}

fn decode_bytes(data: &[u8]) -> Result<(&[u8], &[u8]), RLPDecodeError> {
    let (is_list, payload, rest) = decode_rlp_item(data)?;
    if is_list {
        return Err(RLPDecodeError::UnexpectedList);
    }
    Ok((payload, rest))
}

/// Left-pads `data` with zeros to exactly `N` bytes; fails on oversized or leading-zero input,
/// since canonical RLP integers never carry a redundant leading zero byte.
pub(crate) fn static_left_pad<const N: usize>(data: &[u8]) -> Result<[u8; N], RLPDecodeError> {
    let mut result = [0u8; N];
    if data.is_empty() {
        return Ok(result);
    }
    if data[0] == 0 {
        return Err(RLPDecodeError::MalformedData);
    }
    if data.len() > N {
        return Err(RLPDecodeError::InvalidLength);
    }
    let start = N - data.len();
    result
        .get_mut(start..)
        .ok_or(RLPDecodeError::InvalidLength)?
        .copy_from_slice(data);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bool() {
        assert!(bool::decode(&[0x01]).unwrap());
        assert!(!bool::decode(&[RLP_NULL]).unwrap());
    }

    #[test]
    fn test_decode_u64() {
        let rlp = vec![0x83, 0x01, 0x00, 0x00];
        assert_eq!(u64::decode(&rlp).unwrap(), 65536);
    }

    #[test]
    fn test_decode_u256() {
        let mut rlp = vec![RLP_NULL + 32];
        let number_bytes = [0x01; 32];
        rlp.extend(number_bytes);
        let decoded = U256::decode(&rlp).unwrap();
        assert_eq!(decoded, U256::from_big_endian(&number_bytes));
    }

    #[test]
    fn test_decode_list() {
        let rlp = vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
        let decoded: Vec<String> = Vec::decode(&rlp).unwrap();
        assert_eq!(decoded, vec!["cat".to_string(), "dog".to_string()]);
    }

    #[test]
    fn test_decode_list_as_string_fails() {
        let rlp = vec![RLP_EMPTY_LIST + 2, 0x01, 0x02];
        let decoded: Result<u16, _> = RLPDecode::decode(&rlp);
        assert!(decoded.is_err());
    }
}
