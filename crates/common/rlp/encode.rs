use crate::constants::RLP_NULL;
use bytes::{BufMut, Bytes};
use ethereum_types::U256;
use tinyvec::ArrayVec;

/// Encodes a value to a freshly allocated buffer.
/// For encoding directly into an existing buffer, use [`RLPEncode::encode`].
pub fn encode<T: RLPEncode>(value: T) -> Vec<u8> {
    let mut buf = Vec::new();
    value.encode(&mut buf);
    buf
}

pub trait RLPEncode {
    fn encode(&self, buf: &mut dyn BufMut);

    fn length(&self) -> usize {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf.len()
    }

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }
}

impl RLPEncode for bool {
    fn encode(&self, buf: &mut dyn BufMut) {
        if *self {
            buf.put_u8(0x01);
        } else {
            buf.put_u8(RLP_NULL);
        }
    }

    fn length(&self) -> usize {
        1
    }
}

macro_rules! impl_encode_for_uint {
    ($t:ty, $n:literal) => {
        impl RLPEncode for $t {
            fn encode(&self, buf: &mut dyn BufMut) {
                match *self {
                    0 => buf.put_u8(RLP_NULL),
                    n @ 1..=0x7f => buf.put_u8(n as u8),
                    n => {
                        let mut bytes = ArrayVec::<[u8; $n]>::new();
                        bytes.extend_from_slice(&n.to_be_bytes());
                        let start = bytes.iter().position(|&x| x != 0).unwrap_or(bytes.len());
                        let len = bytes.len() - start;
                        buf.put_u8(RLP_NULL + len as u8);
                        buf.put_slice(&bytes[start..]);
                    }
                }
            }
        }
    };
}

impl_encode_for_uint!(u16, 8);
impl_encode_for_uint!(u32, 8);
impl_encode_for_uint!(u64, 8);
impl_encode_for_uint!(usize, 8);
impl_encode_for_uint!(u128, 16);

impl RLPEncode for u8 {
    fn encode(&self, buf: &mut dyn BufMut) {
        match *self {
            0 => buf.put_u8(RLP_NULL),
            n @ 1..=0x7f => buf.put_u8(n),
            n => {
                buf.put_u8(RLP_NULL + 1);
                buf.put_u8(n);
            }
        }
    }
}

impl RLPEncode for () {
    fn encode(&self, buf: &mut dyn BufMut) {
        buf.put_u8(RLP_NULL);
    }
}

impl RLPEncode for [u8] {
    fn encode(&self, buf: &mut dyn BufMut) {
        if self.len() == 1 && self[0] < RLP_NULL {
            buf.put_u8(self[0]);
        } else {
            let len = self.len();
            if len < 56 {
                buf.put_u8(RLP_NULL + len as u8);
            } else {
                let mut bytes = ArrayVec::<[u8; 8]>::new();
                bytes.extend_from_slice(&len.to_be_bytes());
                let start = bytes.iter().position(|&x| x != 0).unwrap_or(bytes.len());
                let len_of_len = bytes.len() - start;
                buf.put_u8(0xb7 + len_of_len as u8);
                buf.put_slice(&bytes[start..]);
            }
            buf.put_slice(self);
        }
    }
}

impl<const N: usize> RLPEncode for [u8; N] {
    fn encode(&self, buf: &mut dyn BufMut) {
        self.as_ref().encode(buf)
    }
}

impl RLPEncode for str {
    fn encode(&self, buf: &mut dyn BufMut) {
        self.as_bytes().encode(buf)
    }
}

impl RLPEncode for String {
    fn encode(&self, buf: &mut dyn BufMut) {
        self.as_bytes().encode(buf)
    }
}

impl RLPEncode for U256 {
    fn encode(&self, buf: &mut dyn BufMut) {
        let leading_zeros_in_bytes: usize = (self.leading_zeros() / 8) as usize;
        let mut bytes: [u8; 32] = [0; 32];
        self.to_big_endian(&mut bytes);
        bytes[leading_zeros_in_bytes..].encode(buf)
    }
}

impl<T: RLPEncode> RLPEncode for Vec<T> {
    fn encode(&self, buf: &mut dyn BufMut) {
        if self.is_empty() {
            buf.put_u8(0xc0);
        } else {
            let total_len: usize = self.iter().map(|item| item.length()).sum();
            encode_length(total_len, buf);
            for item in self {
                item.encode(buf);
            }
        }
    }
}

impl<T: RLPEncode> RLPEncode for Option<T> {
    fn encode(&self, buf: &mut dyn BufMut) {
        match self {
            Some(value) => value.encode(buf),
            None => buf.put_u8(RLP_NULL),
        }
    }
}

pub(crate) fn encode_length(total_len: usize, buf: &mut dyn BufMut) {
    if total_len < 56 {
        buf.put_u8(0xc0 + total_len as u8);
    } else {
        let mut bytes = ArrayVec::<[u8; 8]>::new();
        bytes.extend_from_slice(&total_len.to_be_bytes());
        let start = bytes.iter().position(|&x| x != 0).unwrap_or(bytes.len());
        let len = bytes.len() - start;
        buf.put_u8(0xf7 + len as u8);
        buf.put_slice(&bytes[start..]);
    }
}

impl<S: RLPEncode, T: RLPEncode> RLPEncode for (S, T) {
    fn encode(&self, buf: &mut dyn BufMut) {
        let total_len = self.0.length() + self.1.length();
        encode_length(total_len, buf);
        self.0.encode(buf);
        self.1.encode(buf);
    }
}

impl<S: RLPEncode, T: RLPEncode, U: RLPEncode> RLPEncode for (S, T, U) {
    fn encode(&self, buf: &mut dyn BufMut) {
        let total_len = self.0.length() + self.1.length() + self.2.length();
        encode_length(total_len, buf);
        self.0.encode(buf);
        self.1.encode(buf);
        self.2.encode(buf);
    }
}

impl RLPEncode for Bytes {
    fn encode(&self, buf: &mut dyn BufMut) {
        self.as_ref().encode(buf)
    }
}

impl RLPEncode for ethereum_types::H32 {
    fn encode(&self, buf: &mut dyn BufMut) {
        self.as_bytes().encode(buf)
    }
}

impl RLPEncode for ethereum_types::Address {
    fn encode(&self, buf: &mut dyn BufMut) {
        self.as_bytes().encode(buf)
    }
}

impl RLPEncode for ethereum_types::H256 {
    fn encode(&self, buf: &mut dyn BufMut) {
        self.as_bytes().encode(buf)
    }
}

impl RLPEncode for ethereum_types::Signature {
    fn encode(&self, buf: &mut dyn BufMut) {
        self.as_bytes().encode(buf)
    }
}

impl RLPEncode for ethereum_types::Bloom {
    fn encode(&self, buf: &mut dyn BufMut) {
        self.0.encode(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::RLPEncode;
    use crate::constants::{RLP_EMPTY_LIST, RLP_NULL};
    use ethereum_types::{Address, U256};
    use hex_literal::hex;

    #[test]
    fn can_encode_booleans() {
        let mut encoded = Vec::new();
        true.encode(&mut encoded);
        assert_eq!(encoded, vec![0x01]);

        let mut encoded = Vec::new();
        false.encode(&mut encoded);
        assert_eq!(encoded, vec![RLP_NULL]);
    }

    #[test]
    fn can_encode_u64() {
        let mut encoded = Vec::new();
        0x90u64.encode(&mut encoded);
        assert_eq!(encoded, vec![RLP_NULL + 1, 0x90]);
    }

    #[test]
    fn can_encode_strings() {
        let encoded = "dog".encode_to_vec();
        assert_eq!(encoded, [RLP_NULL + 3, b'd', b'o', b'g']);

        let encoded = "".encode_to_vec();
        assert_eq!(encoded, [RLP_NULL]);
    }

    #[test]
    fn can_encode_lists() {
        let encoded = vec!["cat", "dog"].encode_to_vec();
        assert_eq!(
            encoded,
            [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );

        let encoded: Vec<u8> = Vec::<u8>::new().encode_to_vec();
        assert_eq!(encoded, [RLP_EMPTY_LIST]);
    }

    #[test]
    fn can_encode_addresses() {
        let address = Address::from(hex!("ef2d6d194084c2de36e0dabfce45d046b37d1106"));
        let encoded = address.encode_to_vec();
        assert_eq!(encoded, hex!("94ef2d6d194084c2de36e0dabfce45d046b37d1106"));
    }

    #[test]
    fn can_encode_u256() {
        let encoded = U256::from(1).encode_to_vec();
        assert_eq!(encoded, vec![1]);

        let encoded = U256::from(128).encode_to_vec();
        assert_eq!(encoded, vec![0x80 + 1, 128]);
    }
}
