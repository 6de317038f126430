use super::decodable::Decodable;
use super::error::DecodeError;
use super::layout;

/// Type and length of the element at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvHeader {
    pub tlv_type: u64,
    pub length: u64,
    /// Octets taken by TLV-TYPE and TLV-LENGTH together.
    pub header_len: usize,
}

/// A complete element borrowed from the underlying buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvElement<'a> {
    pub tlv_type: u64,
    pub value: &'a [u8],
}

impl<'a> TlvElement<'a> {
    /// Cursor over the element's value, scoped to its declared length.
    pub fn reader(&self) -> TlvReader<'a> {
        TlvReader::nested(self.value, self.tlv_type)
    }

    /// Interpret the value as a NonNegativeInteger.
    pub fn nonneg_integer(&self) -> Result<u64, DecodeError> {
        parse_nonneg_integer(self.tlv_type, self.value)
    }

    /// Interpret the value as UTF-8 text.
    pub fn utf8(&self) -> Result<&'a str, DecodeError> {
        std::str::from_utf8(self.value)
            .map_err(|err| DecodeError::malformed(self.tlv_type, format!("invalid UTF-8: {err}")))
    }
}

/// Cursor over an immutable TLV buffer.
///
/// A top-level reader reports [`DecodeError::TruncatedInput`] when an element
/// claims more bytes than the buffer holds. A nested reader (from
/// [`TlvReader::expect_element`] or [`TlvElement::reader`]) is bounded by its
/// parent's declared length and reports [`DecodeError::LengthOverrun`]
/// instead.
#[derive(Debug, Clone)]
pub struct TlvReader<'a> {
    buf: &'a [u8],
    pos: usize,
    parent: Option<u64>,
}

impl<'a> TlvReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            parent: None,
        }
    }

    fn nested(buf: &'a [u8], parent: u64) -> Self {
        Self {
            buf,
            pos: 0,
            parent: Some(parent),
        }
    }

    /// Offset of the cursor from the start of this scope.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left in the current scope.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Type of the enclosing element, if this reader is nested.
    pub fn parent_type(&self) -> Option<u64> {
        self.parent
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::TruncatedInput {
            needed,
            actual: self.remaining(),
        }
    }

    fn var_number_at(&self, offset: usize) -> Result<(u64, usize), DecodeError> {
        let first = *self
            .buf
            .get(offset)
            .ok_or_else(|| self.truncated(offset + 1 - self.pos))?;
        let width = match first {
            layout::VAR_NUMBER_2 => 2,
            layout::VAR_NUMBER_4 => 4,
            layout::VAR_NUMBER_8 => 8,
            _ => return Ok((first as u64, 1)),
        };
        let end = offset + 1 + width;
        let bytes = self
            .buf
            .get(offset + 1..end)
            .ok_or_else(|| self.truncated(end - self.pos))?;
        Ok((be_uint(bytes), 1 + width))
    }

    /// Read one VAR-NUMBER.
    pub fn read_var_number(&mut self) -> Result<u64, DecodeError> {
        let (value, len) = self.var_number_at(self.pos)?;
        self.pos += len;
        Ok(value)
    }

    /// Decode the next header without moving the cursor.
    pub fn peek_header(&self) -> Result<TlvHeader, DecodeError> {
        let (tlv_type, type_len) = self.var_number_at(self.pos)?;
        let (length, length_len) = self.var_number_at(self.pos + type_len)?;
        Ok(TlvHeader {
            tlv_type,
            length,
            header_len: type_len + length_len,
        })
    }

    pub fn peek_type(&self) -> Result<u64, DecodeError> {
        self.var_number_at(self.pos).map(|(tlv_type, _)| tlv_type)
    }

    /// Whether the next element has `tlv_type`. False at the end of scope.
    pub fn next_is(&self, tlv_type: u64) -> Result<bool, DecodeError> {
        if self.is_at_end() {
            return Ok(false);
        }
        Ok(self.peek_type()? == tlv_type)
    }

    /// Consume a header after checking that its value fits in this scope.
    pub fn read_header(&mut self) -> Result<TlvHeader, DecodeError> {
        let header = self.peek_header()?;
        let available = self.remaining() - header.header_len;
        if header.length > available as u64 {
            return Err(match self.parent {
                Some(parent) => DecodeError::LengthOverrun {
                    parent,
                    tlv_type: header.tlv_type,
                    length: header.length,
                    remaining: available,
                },
                None => DecodeError::TruncatedInput {
                    needed: usize::try_from(header.length)
                        .unwrap_or(usize::MAX)
                        .saturating_add(header.header_len),
                    actual: self.remaining(),
                },
            });
        }
        self.pos += header.header_len;
        Ok(header)
    }

    /// Read the next complete element and move past it.
    pub fn read_element(&mut self) -> Result<TlvElement<'a>, DecodeError> {
        let header = self.read_header()?;
        // read_header guarantees the value fits
        let value = self.read_bytes(header.length as usize)?;
        Ok(TlvElement {
            tlv_type: header.tlv_type,
            value,
        })
    }

    /// Read the next element, requiring its type, and return a reader over its value.
    pub fn expect_element(&mut self, tlv_type: u64) -> Result<TlvReader<'a>, DecodeError> {
        let found = self.peek_type()?;
        if found != tlv_type {
            return Err(DecodeError::TypeMismatch {
                expected: tlv_type,
                found,
            });
        }
        self.read_element().map(|element| element.reader())
    }

    pub fn skip_element(&mut self) -> Result<TlvHeader, DecodeError> {
        let header = self.read_header()?;
        self.pos += header.length as usize;
        Ok(header)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        if count > self.remaining() {
            return Err(self.truncated(count));
        }
        let bytes = &self.buf[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_bytes(1).map(|bytes| bytes[0])
    }

    pub fn read_u16_be(&mut self) -> Result<u16, DecodeError> {
        self.read_bytes(2).map(|bytes| be_uint(bytes) as u16)
    }

    pub fn read_u32_be(&mut self) -> Result<u32, DecodeError> {
        self.read_bytes(4).map(|bytes| be_uint(bytes) as u32)
    }

    pub fn read_u64_be(&mut self) -> Result<u64, DecodeError> {
        self.read_bytes(8).map(be_uint)
    }

    /// Consume the rest of this scope as the NonNegativeInteger value of a
    /// `tlv_type` element.
    pub fn read_nonneg_integer(&mut self, tlv_type: u64) -> Result<u64, DecodeError> {
        let bytes = self.read_bytes(self.remaining())?;
        parse_nonneg_integer(tlv_type, bytes)
    }

    /// Read an element of `tlv_type` with `f`, or fail with `MissingElement`.
    pub fn read_field<T>(
        &mut self,
        tlv_type: u64,
        f: impl FnOnce(TlvElement<'a>) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        self.read_optional(tlv_type, f)?
            .ok_or(DecodeError::MissingElement { tlv_type })
    }

    /// Read an element of `tlv_type` with `f` when it is next; otherwise leave
    /// the cursor untouched.
    pub fn read_optional<T>(
        &mut self,
        tlv_type: u64,
        f: impl FnOnce(TlvElement<'a>) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        if !self.next_is(tlv_type)? {
            return Ok(None);
        }
        let element = self.read_element()?;
        f(element).map(Some)
    }

    pub fn read_nonneg_integer_field(&mut self, tlv_type: u64) -> Result<u64, DecodeError> {
        self.read_field(tlv_type, |element| element.nonneg_integer())
    }

    pub fn read_optional_nonneg_integer_field(
        &mut self,
        tlv_type: u64,
    ) -> Result<Option<u64>, DecodeError> {
        self.read_optional(tlv_type, |element| element.nonneg_integer())
    }

    pub fn read_utf8_field(&mut self, tlv_type: u64) -> Result<String, DecodeError> {
        self.read_field(tlv_type, |element| element.utf8().map(str::to_string))
    }

    /// Decode one `D` at the cursor.
    pub fn decode<D: Decodable>(&mut self) -> Result<D, DecodeError> {
        D::wire_decode(self)
    }

    /// Decode a required `D`, reporting `MissingElement` when something else is next.
    pub fn decode_field<D: Decodable>(&mut self) -> Result<D, DecodeError> {
        if !self.next_is(D::TLV_TYPE)? {
            return Err(DecodeError::MissingElement {
                tlv_type: D::TLV_TYPE,
            });
        }
        D::wire_decode(self)
    }

    /// Decode consecutive `D` elements while the next type is `D::TLV_TYPE`.
    pub fn decode_repeated<D: Decodable>(&mut self) -> Result<Vec<D>, DecodeError> {
        let mut items = Vec::new();
        while self.next_is(D::TLV_TYPE)? {
            items.push(D::wire_decode(self)?);
        }
        Ok(items)
    }

    /// Close this scope: trailing non-critical elements are skipped, anything
    /// critical is rejected.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        while !self.is_at_end() {
            let header = self.peek_header()?;
            if layout::is_critical(header.tlv_type) {
                return Err(DecodeError::UnexpectedElement {
                    tlv_type: header.tlv_type,
                });
            }
            tracing::trace!(
                parent = self.parent,
                tlv_type = header.tlv_type,
                length = header.length,
                "skipping non-critical element"
            );
            self.skip_element()?;
        }
        Ok(())
    }
}

/// Parse a NonNegativeInteger value of 1, 2, 4 or 8 octets.
pub fn parse_nonneg_integer(tlv_type: u64, bytes: &[u8]) -> Result<u64, DecodeError> {
    if !layout::NON_NEGATIVE_INTEGER_WIDTHS.contains(&bytes.len()) {
        return Err(DecodeError::malformed(
            tlv_type,
            format!(
                "NonNegativeInteger must be 1, 2, 4 or 8 bytes, got {}",
                bytes.len()
            ),
        ));
    }
    Ok(be_uint(bytes))
}

fn be_uint(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | *byte as u64)
}
