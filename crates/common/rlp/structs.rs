use bytes::BufMut;

use crate::decode::{decode_rlp_item, RLPDecode};
use crate::encode::{encode_length, RLPEncode};
use crate::error::RLPDecodeError;

/// Builds the RLP encoding of a struct as a list of its fields, in declaration order.
///
/// ```ignore
/// Encoder::new(buf)
///     .encode_field(&self.nonce)
///     .encode_field(&self.balance)
///     .finish();
/// ```
pub struct Encoder<'a> {
    buf: &'a mut dyn BufMut,
    temp: Vec<u8>,
}

impl<'a> Encoder<'a> {
    pub fn new(buf: &'a mut dyn BufMut) -> Self {
        Self {
            buf,
            temp: Vec::new(),
        }
    }

    pub fn encode_field<T: RLPEncode>(mut self, value: &T) -> Self {
        value.encode(&mut self.temp);
        self
    }

    pub fn encode_optional_field<T: RLPEncode>(mut self, value: &Option<T>) -> Self {
        if let Some(value) = value {
            value.encode(&mut self.temp);
        } else {
            self.temp.put_u8(crate::constants::RLP_NULL);
        }
        self
    }

    pub fn finish(self) {
        encode_length(self.temp.len(), self.buf);
        self.buf.put_slice(&self.temp);
    }
}

/// Consumes the RLP encoding of a struct encoded as a list of its fields, in declaration order.
///
/// ```ignore
/// let decoder = Decoder::new(rlp)?;
/// let (nonce, decoder) = decoder.decode_field("nonce")?;
/// let (balance, decoder) = decoder.decode_field("balance")?;
/// let remaining = decoder.finish()?;
/// ```
pub struct Decoder<'a> {
    payload: &'a [u8],
    remaining_input: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(rlp: &'a [u8]) -> Result<Self, RLPDecodeError> {
        let (is_list, payload, remaining_input) = decode_rlp_item(rlp)?;
        if !is_list {
            return Err(RLPDecodeError::UnexpectedString);
        }
        Ok(Self {
            payload,
            remaining_input,
        })
    }

    pub fn decode_field<T: RLPDecode>(
        self,
        name: &str,
    ) -> Result<(T, Self), RLPDecodeError> {
        let (value, rest) = T::decode_unfinished(self.payload)
            .map_err(|_| RLPDecodeError::MissingField(name.to_string()))?;
        Ok((
            value,
            Decoder {
                payload: rest,
                remaining_input: self.remaining_input,
            },
        ))
    }

    /// Asserts all fields of the encoded struct were consumed, and returns the bytes
    /// that followed the struct's own list encoding.
    pub fn finish(self) -> Result<&'a [u8], RLPDecodeError> {
        if !self.payload.is_empty() {
            return Err(RLPDecodeError::MalformedData);
        }
        Ok(self.remaining_input)
    }
}
