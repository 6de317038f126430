use super::layout;

/// A value that encodes itself as NDN TLV.
pub trait Encodable {
    fn wire_encode(&self, writer: &mut TlvWriter);

    fn to_wire(&self) -> Vec<u8> {
        let mut writer = TlvWriter::new();
        self.wire_encode(&mut writer);
        writer.into_bytes()
    }
}

/// Append-only NDN TLV encoder.
#[derive(Debug, Default, Clone)]
pub struct TlvWriter {
    buf: Vec<u8>,
}

impl TlvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_var_number(&mut self, value: u64) {
        match layout::var_number_len(value) {
            1 => self.buf.push(value as u8),
            3 => {
                self.buf.push(layout::VAR_NUMBER_2);
                self.buf.extend_from_slice(&(value as u16).to_be_bytes());
            }
            5 => {
                self.buf.push(layout::VAR_NUMBER_4);
                self.buf.extend_from_slice(&(value as u32).to_be_bytes());
            }
            _ => {
                self.buf.push(layout::VAR_NUMBER_8);
                self.buf.extend_from_slice(&value.to_be_bytes());
            }
        }
    }

    pub fn write_element(&mut self, tlv_type: u64, value: &[u8]) {
        self.write_var_number(tlv_type);
        self.write_var_number(value.len() as u64);
        self.buf.extend_from_slice(value);
    }

    /// Write a NonNegativeInteger element using the shortest legal width.
    pub fn write_nonneg_integer_field(&mut self, tlv_type: u64, value: u64) {
        if value <= u8::MAX as u64 {
            self.write_element(tlv_type, &[value as u8]);
        } else if value <= u16::MAX as u64 {
            self.write_element(tlv_type, &(value as u16).to_be_bytes());
        } else if value <= u32::MAX as u64 {
            self.write_element(tlv_type, &(value as u32).to_be_bytes());
        } else {
            self.write_element(tlv_type, &value.to_be_bytes());
        }
    }

    pub fn write_optional_nonneg_integer_field(&mut self, tlv_type: u64, value: Option<u64>) {
        if let Some(value) = value {
            self.write_nonneg_integer_field(tlv_type, value);
        }
    }

    pub fn write_utf8_field(&mut self, tlv_type: u64, value: &str) {
        self.write_element(tlv_type, value.as_bytes());
    }

    /// Write an element whose value is produced by `f`.
    pub fn write_nested(&mut self, tlv_type: u64, f: impl FnOnce(&mut TlvWriter)) {
        let mut inner = TlvWriter::new();
        f(&mut inner);
        self.write_element(tlv_type, inner.as_slice());
    }

    pub fn encode<E: Encodable + ?Sized>(&mut self, value: &E) {
        value.wire_encode(self);
    }
}
