use serde::{Deserialize, Serialize};

use crate::tlv::layout;
use crate::tlv::{Decodable, DecodeError, Encodable, TlvReader, TlvWriter};

/// Entry of the `faces/channels` dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatus {
    pub local_uri: String,
}

impl Decodable for ChannelStatus {
    const TLV_TYPE: u64 = layout::CHANNEL_STATUS;

    fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
        let mut inner = reader.expect_element(Self::TLV_TYPE)?;
        let local_uri = inner.read_utf8_field(layout::LOCAL_URI)?;
        inner.finish()?;
        Ok(ChannelStatus { local_uri })
    }
}

impl Encodable for ChannelStatus {
    fn wire_encode(&self, writer: &mut TlvWriter) {
        writer.write_nested(Self::TLV_TYPE, |w| {
            w.write_utf8_field(layout::LOCAL_URI, &self.local_uri);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelStatus;
    use crate::tlv::{Decodable, DecodeError, TlvReader};

    #[test]
    fn decode_channel() {
        let bytes = [
            0x82, 0x0e, 0x81, 0x0c, b'u', b'd', b'p', b'4', b':', b'/', b'/', b'0', b'.', b'0',
            b'.', b'0',
        ];
        let mut reader = TlvReader::new(&bytes);
        let channel = ChannelStatus::wire_decode(&mut reader).unwrap();
        assert_eq!(channel.local_uri, "udp4://0.0.0");
        assert!(reader.is_at_end());
    }

    #[test]
    fn rejects_face_status_type() {
        let bytes = [0x80, 0x00];
        let err = ChannelStatus::wire_decode(&mut TlvReader::new(&bytes)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                expected: 0x82,
                found: 0x80
            }
        );
    }
}
