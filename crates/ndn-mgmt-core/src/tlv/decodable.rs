use super::error::DecodeError;
use super::reader::TlvReader;

/// A value that decodes itself from one TLV element at the cursor.
///
/// On success the cursor sits immediately after the element, so the caller
/// can continue with the next sibling. On failure nothing is returned and the
/// cursor position is unspecified. Implementations check their own leading
/// TLV-TYPE and report [`DecodeError::TypeMismatch`] when it differs from
/// [`Decodable::TLV_TYPE`].
///
/// # Examples
/// ```
/// use ndn_mgmt_core::tlv::{Decodable, DecodeError, TlvReader};
///
/// #[derive(Debug)]
/// struct Counter(u64);
///
/// impl Decodable for Counter {
///     const TLV_TYPE: u64 = 0x01;
///
///     fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
///         let mut value = reader.expect_element(Self::TLV_TYPE)?;
///         Ok(Counter(value.read_nonneg_integer(Self::TLV_TYPE)?))
///     }
/// }
///
/// let bytes = [0x01, 0x02, 0x00, 0x2a, 0x02, 0x00];
/// let mut reader = TlvReader::new(&bytes);
/// let counter = Counter::wire_decode(&mut reader)?;
/// assert_eq!(counter.0, 42);
/// assert_eq!(reader.position(), 4);
/// # Ok::<(), DecodeError>(())
/// ```
pub trait Decodable: Sized {
    /// TLV-TYPE of the outer element.
    const TLV_TYPE: u64;

    fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError>;

    /// Decode a buffer holding exactly one element.
    fn from_wire(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TlvReader::new(bytes);
        let value = Self::wire_decode(&mut reader)?;
        if !reader.is_at_end() {
            return Err(DecodeError::TrailingBytes {
                count: reader.remaining(),
            });
        }
        Ok(value)
    }
}

/// Decode a buffer holding a sequence of `D` elements and nothing else.
pub fn decode_all<D: Decodable>(bytes: &[u8]) -> Result<Vec<D>, DecodeError> {
    let mut reader = TlvReader::new(bytes);
    let mut items = Vec::new();
    while !reader.is_at_end() {
        items.push(D::wire_decode(&mut reader)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::{Decodable, decode_all};
    use crate::tlv::error::DecodeError;
    use crate::tlv::reader::TlvReader;

    #[derive(Debug, PartialEq, Eq)]
    struct Sample {
        field: u64,
    }

    impl Decodable for Sample {
        const TLV_TYPE: u64 = 0x01;

        fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
            let mut value = reader.expect_element(Self::TLV_TYPE)?;
            let field = value.read_nonneg_integer(Self::TLV_TYPE)?;
            Ok(Sample { field })
        }
    }

    #[test]
    fn decode_stops_at_sibling() {
        let bytes = [0x01, 0x02, 0x00, 0x2a, 0x09, 0x01, 0xff];
        let mut reader = TlvReader::new(&bytes);
        let sample = Sample::wire_decode(&mut reader).unwrap();
        assert_eq!(sample.field, 42);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.peek_type().unwrap(), 0x09);
    }

    #[test]
    fn decode_truncated_value() {
        let bytes = [0x01, 0x05, 0x00, 0x00, 0x2a];
        let mut reader = TlvReader::new(&bytes);
        let err = Sample::wire_decode(&mut reader).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedInput { .. }));
    }

    #[test]
    fn independent_cursors_agree() {
        let bytes = [0x01, 0x02, 0x01, 0x00];
        let first = Sample::wire_decode(&mut TlvReader::new(&bytes)).unwrap();
        let second = Sample::wire_decode(&mut TlvReader::new(&bytes)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn from_wire_rejects_trailing_bytes() {
        let bytes = [0x01, 0x01, 0x07, 0x00];
        let err = Sample::from_wire(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::TrailingBytes { count: 1 });
    }

    #[test]
    fn decode_all_reads_sequence() {
        let bytes = [0x01, 0x01, 0x01, 0x01, 0x01, 0x02];
        let samples = decode_all::<Sample>(&bytes).unwrap();
        assert_eq!(samples, vec![Sample { field: 1 }, Sample { field: 2 }]);
    }

    #[test]
    fn decode_all_reports_wrong_type() {
        let bytes = [0x01, 0x01, 0x01, 0x03, 0x00];
        let err = decode_all::<Sample>(&bytes).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                expected: 0x01,
                found: 0x03
            }
        );
    }
}
