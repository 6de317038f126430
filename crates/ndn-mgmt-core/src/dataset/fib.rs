use serde::{Deserialize, Serialize};

use crate::name::Name;
use crate::tlv::layout;
use crate::tlv::{Decodable, DecodeError, Encodable, TlvReader, TlvWriter};

/// Entry of the `fib/list` dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FibEntry {
    pub name: Name,
    pub next_hops: Vec<NextHopRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextHopRecord {
    pub face_id: u64,
    pub cost: u64,
}

impl Decodable for NextHopRecord {
    const TLV_TYPE: u64 = layout::NEXT_HOP_RECORD;

    fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
        let mut inner = reader.expect_element(Self::TLV_TYPE)?;
        let face_id = inner.read_nonneg_integer_field(layout::FACE_ID)?;
        let cost = inner.read_nonneg_integer_field(layout::COST)?;
        inner.finish()?;
        Ok(NextHopRecord { face_id, cost })
    }
}

impl Encodable for NextHopRecord {
    fn wire_encode(&self, writer: &mut TlvWriter) {
        writer.write_nested(Self::TLV_TYPE, |w| {
            w.write_nonneg_integer_field(layout::FACE_ID, self.face_id);
            w.write_nonneg_integer_field(layout::COST, self.cost);
        });
    }
}

impl Decodable for FibEntry {
    const TLV_TYPE: u64 = layout::FIB_ENTRY;

    fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
        let mut inner = reader.expect_element(Self::TLV_TYPE)?;
        let name = inner.decode_field::<Name>()?;
        let next_hops = inner.decode_repeated::<NextHopRecord>()?;
        inner.finish()?;
        Ok(FibEntry { name, next_hops })
    }
}

impl Encodable for FibEntry {
    fn wire_encode(&self, writer: &mut TlvWriter) {
        writer.write_nested(Self::TLV_TYPE, |w| {
            w.encode(&self.name);
            for hop in &self.next_hops {
                w.encode(hop);
            }
        });
    }
}
