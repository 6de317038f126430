use serde::{Deserialize, Serialize};

use crate::name::Name;
use crate::tlv::layout;
use crate::tlv::{Decodable, DecodeError, Encodable, TlvReader, TlvWriter};

/// Route `Flags` bits.
pub const ROUTE_FLAG_CHILD_INHERIT: u64 = 1 << 0;
pub const ROUTE_FLAG_CAPTURE: u64 = 1 << 1;

/// Entry of the `rib/list` dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RibEntry {
    pub name: Name,
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub face_id: u64,
    pub origin: u64,
    pub cost: u64,
    pub flags: u64,
    /// Remaining lifetime in milliseconds; absent for routes that never expire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_period: Option<u64>,
}

impl Route {
    pub fn child_inherit(&self) -> bool {
        self.flags & ROUTE_FLAG_CHILD_INHERIT != 0
    }

    pub fn capture(&self) -> bool {
        self.flags & ROUTE_FLAG_CAPTURE != 0
    }
}

impl Decodable for Route {
    const TLV_TYPE: u64 = layout::ROUTE;

    fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
        let mut inner = reader.expect_element(Self::TLV_TYPE)?;
        let face_id = inner.read_nonneg_integer_field(layout::FACE_ID)?;
        let origin = inner.read_nonneg_integer_field(layout::ORIGIN)?;
        let cost = inner.read_nonneg_integer_field(layout::COST)?;
        let flags = inner.read_nonneg_integer_field(layout::FLAGS)?;
        let expiration_period =
            inner.read_optional_nonneg_integer_field(layout::EXPIRATION_PERIOD)?;
        inner.finish()?;
        Ok(Route {
            face_id,
            origin,
            cost,
            flags,
            expiration_period,
        })
    }
}

impl Encodable for Route {
    fn wire_encode(&self, writer: &mut TlvWriter) {
        writer.write_nested(Self::TLV_TYPE, |w| {
            w.write_nonneg_integer_field(layout::FACE_ID, self.face_id);
            w.write_nonneg_integer_field(layout::ORIGIN, self.origin);
            w.write_nonneg_integer_field(layout::COST, self.cost);
            w.write_nonneg_integer_field(layout::FLAGS, self.flags);
            w.write_optional_nonneg_integer_field(
                layout::EXPIRATION_PERIOD,
                self.expiration_period,
            );
        });
    }
}

impl Decodable for RibEntry {
    const TLV_TYPE: u64 = layout::RIB_ENTRY;

    fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
        let mut inner = reader.expect_element(Self::TLV_TYPE)?;
        let name = inner.decode_field::<Name>()?;
        let routes = inner.decode_repeated::<Route>()?;
        inner.finish()?;
        Ok(RibEntry { name, routes })
    }
}

impl Encodable for RibEntry {
    fn wire_encode(&self, writer: &mut TlvWriter) {
        writer.write_nested(Self::TLV_TYPE, |w| {
            w.encode(&self.name);
            for route in &self.routes {
                w.encode(route);
            }
        });
    }
}
