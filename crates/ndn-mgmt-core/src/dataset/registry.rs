use std::collections::BTreeMap;
use std::fmt;

use crate::tlv::layout;
use crate::tlv::{Decodable, DecodeError, TlvReader};

/// Decoder entry point stored in a [`DecoderRegistry`].
pub type DecodeFn<T> = for<'a> fn(&mut TlvReader<'a>) -> Result<T, DecodeError>;

fn decode_into<D, T>(reader: &mut TlvReader<'_>) -> Result<T, DecodeError>
where
    D: Decodable + Into<T>,
{
    D::wire_decode(reader).map(Into::into)
}

/// Maps top-level TLV types to the record decoder that handles them.
///
/// The registry only holds plain function pointers, so a built registry is
/// `Send + Sync` and can be shared between threads without locking.
pub struct DecoderRegistry<T> {
    decoders: BTreeMap<u64, DecodeFn<T>>,
}

impl<T> Default for DecoderRegistry<T> {
    fn default() -> Self {
        Self {
            decoders: BTreeMap::new(),
        }
    }
}

impl<T> fmt::Debug for DecoderRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("types", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> DecoderRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `D` under `D::TLV_TYPE`, replacing any earlier decoder for that type.
    pub fn register<D>(&mut self) -> &mut Self
    where
        D: Decodable + Into<T>,
    {
        self.decoders.insert(D::TLV_TYPE, decode_into::<D, T>);
        self
    }

    pub fn with<D>(mut self) -> Self
    where
        D: Decodable + Into<T>,
    {
        self.register::<D>();
        self
    }

    pub fn contains(&self, tlv_type: u64) -> bool {
        self.decoders.contains_key(&tlv_type)
    }

    /// Decode the next registered element.
    ///
    /// Unregistered non-critical elements are skipped; an unregistered
    /// critical element fails with [`DecodeError::UnexpectedElement`].
    /// Returns `Ok(None)` once the reader is exhausted.
    pub fn decode_next(&self, reader: &mut TlvReader<'_>) -> Result<Option<T>, DecodeError> {
        while !reader.is_at_end() {
            let tlv_type = reader.peek_type()?;
            if let Some(decode) = self.decoders.get(&tlv_type) {
                return decode(reader).map(Some);
            }
            if layout::is_critical(tlv_type) {
                return Err(DecodeError::UnexpectedElement { tlv_type });
            }
            let header = reader.skip_element()?;
            tracing::trace!(
                tlv_type,
                length = header.length,
                "skipping unregistered element"
            );
        }
        Ok(None)
    }

    pub fn decode_all(&self, reader: &mut TlvReader<'_>) -> Result<Vec<T>, DecodeError> {
        let mut records = Vec::new();
        while let Some(record) = self.decode_next(reader)? {
            records.push(record);
        }
        Ok(records)
    }
}
