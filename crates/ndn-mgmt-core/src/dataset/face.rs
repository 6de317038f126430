use serde::{Deserialize, Serialize};

use crate::tlv::layout;
use crate::tlv::{Decodable, DecodeError, Encodable, TlvReader, TlvWriter};

/// FaceStatus `Flags` bits.
pub const FLAG_LOCAL_FIELDS_ENABLED: u64 = 1 << 0;
pub const FLAG_LP_RELIABILITY_ENABLED: u64 = 1 << 1;
pub const FLAG_CONGESTION_MARKING_ENABLED: u64 = 1 << 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceScope {
    NonLocal,
    Local,
    Unknown(u64),
}

impl From<u64> for FaceScope {
    fn from(value: u64) -> Self {
        match value {
            0 => FaceScope::NonLocal,
            1 => FaceScope::Local,
            other => FaceScope::Unknown(other),
        }
    }
}

impl From<FaceScope> for u64 {
    fn from(value: FaceScope) -> Self {
        match value {
            FaceScope::NonLocal => 0,
            FaceScope::Local => 1,
            FaceScope::Unknown(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacePersistency {
    Persistent,
    OnDemand,
    Permanent,
    Unknown(u64),
}

impl From<u64> for FacePersistency {
    fn from(value: u64) -> Self {
        match value {
            0 => FacePersistency::Persistent,
            1 => FacePersistency::OnDemand,
            2 => FacePersistency::Permanent,
            other => FacePersistency::Unknown(other),
        }
    }
}

impl From<FacePersistency> for u64 {
    fn from(value: FacePersistency) -> Self {
        match value {
            FacePersistency::Persistent => 0,
            FacePersistency::OnDemand => 1,
            FacePersistency::Permanent => 2,
            FacePersistency::Unknown(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    PointToPoint,
    MultiAccess,
    AdHoc,
    Unknown(u64),
}

impl From<u64> for LinkType {
    fn from(value: u64) -> Self {
        match value {
            0 => LinkType::PointToPoint,
            1 => LinkType::MultiAccess,
            2 => LinkType::AdHoc,
            other => LinkType::Unknown(other),
        }
    }
}

impl From<LinkType> for u64 {
    fn from(value: LinkType) -> Self {
        match value {
            LinkType::PointToPoint => 0,
            LinkType::MultiAccess => 1,
            LinkType::AdHoc => 2,
            LinkType::Unknown(other) => other,
        }
    }
}

/// Entry of the `faces/list` dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceStatus {
    pub face_id: u64,
    pub uri: String,
    pub local_uri: String,
    /// Remaining lifetime in milliseconds, when the face expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_period: Option<u64>,
    pub face_scope: FaceScope,
    pub face_persistency: FacePersistency,
    pub link_type: LinkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_congestion_marking_interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_congestion_threshold: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u64>,
    pub counters: FaceCounters,
    pub flags: u64,
}

/// Packet and byte counters carried by a face.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceCounters {
    pub n_in_interests: u64,
    pub n_in_data: u64,
    pub n_in_nacks: u64,
    pub n_out_interests: u64,
    pub n_out_data: u64,
    pub n_out_nacks: u64,
    pub n_in_bytes: u64,
    pub n_out_bytes: u64,
}

impl FaceStatus {
    pub fn local_fields_enabled(&self) -> bool {
        self.flags & FLAG_LOCAL_FIELDS_ENABLED != 0
    }

    pub fn lp_reliability_enabled(&self) -> bool {
        self.flags & FLAG_LP_RELIABILITY_ENABLED != 0
    }

    pub fn congestion_marking_enabled(&self) -> bool {
        self.flags & FLAG_CONGESTION_MARKING_ENABLED != 0
    }
}

impl Decodable for FaceStatus {
    const TLV_TYPE: u64 = layout::FACE_STATUS;

    fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
        let mut inner = reader.expect_element(Self::TLV_TYPE)?;
        let face_id = inner.read_nonneg_integer_field(layout::FACE_ID)?;
        let uri = inner.read_utf8_field(layout::URI)?;
        let local_uri = inner.read_utf8_field(layout::LOCAL_URI)?;
        let expiration_period =
            inner.read_optional_nonneg_integer_field(layout::EXPIRATION_PERIOD)?;
        let face_scope = inner.read_nonneg_integer_field(layout::FACE_SCOPE)?.into();
        let face_persistency = inner
            .read_nonneg_integer_field(layout::FACE_PERSISTENCY)?
            .into();
        let link_type = inner.read_nonneg_integer_field(layout::LINK_TYPE)?.into();
        let base_congestion_marking_interval =
            inner.read_optional_nonneg_integer_field(layout::BASE_CONGESTION_MARKING_INTERVAL)?;
        let default_congestion_threshold =
            inner.read_optional_nonneg_integer_field(layout::DEFAULT_CONGESTION_THRESHOLD)?;
        let mtu = inner.read_optional_nonneg_integer_field(layout::MTU)?;
        let counters = FaceCounters {
            n_in_interests: inner.read_nonneg_integer_field(layout::N_IN_INTERESTS)?,
            n_in_data: inner.read_nonneg_integer_field(layout::N_IN_DATA)?,
            n_in_nacks: inner.read_nonneg_integer_field(layout::N_IN_NACKS)?,
            n_out_interests: inner.read_nonneg_integer_field(layout::N_OUT_INTERESTS)?,
            n_out_data: inner.read_nonneg_integer_field(layout::N_OUT_DATA)?,
            n_out_nacks: inner.read_nonneg_integer_field(layout::N_OUT_NACKS)?,
            n_in_bytes: inner.read_nonneg_integer_field(layout::N_IN_BYTES)?,
            n_out_bytes: inner.read_nonneg_integer_field(layout::N_OUT_BYTES)?,
        };
        let flags = inner.read_nonneg_integer_field(layout::FLAGS)?;
        inner.finish()?;

        Ok(FaceStatus {
            face_id,
            uri,
            local_uri,
            expiration_period,
            face_scope,
            face_persistency,
            link_type,
            base_congestion_marking_interval,
            default_congestion_threshold,
            mtu,
            counters,
            flags,
        })
    }
}

impl Encodable for FaceStatus {
    fn wire_encode(&self, writer: &mut TlvWriter) {
        writer.write_nested(Self::TLV_TYPE, |w| {
            w.write_nonneg_integer_field(layout::FACE_ID, self.face_id);
            w.write_utf8_field(layout::URI, &self.uri);
            w.write_utf8_field(layout::LOCAL_URI, &self.local_uri);
            w.write_optional_nonneg_integer_field(
                layout::EXPIRATION_PERIOD,
                self.expiration_period,
            );
            w.write_nonneg_integer_field(layout::FACE_SCOPE, self.face_scope.into());
            w.write_nonneg_integer_field(layout::FACE_PERSISTENCY, self.face_persistency.into());
            w.write_nonneg_integer_field(layout::LINK_TYPE, self.link_type.into());
            w.write_optional_nonneg_integer_field(
                layout::BASE_CONGESTION_MARKING_INTERVAL,
                self.base_congestion_marking_interval,
            );
            w.write_optional_nonneg_integer_field(
                layout::DEFAULT_CONGESTION_THRESHOLD,
                self.default_congestion_threshold,
            );
            w.write_optional_nonneg_integer_field(layout::MTU, self.mtu);
            let c = &self.counters;
            w.write_nonneg_integer_field(layout::N_IN_INTERESTS, c.n_in_interests);
            w.write_nonneg_integer_field(layout::N_IN_DATA, c.n_in_data);
            w.write_nonneg_integer_field(layout::N_IN_NACKS, c.n_in_nacks);
            w.write_nonneg_integer_field(layout::N_OUT_INTERESTS, c.n_out_interests);
            w.write_nonneg_integer_field(layout::N_OUT_DATA, c.n_out_data);
            w.write_nonneg_integer_field(layout::N_OUT_NACKS, c.n_out_nacks);
            w.write_nonneg_integer_field(layout::N_IN_BYTES, c.n_in_bytes);
            w.write_nonneg_integer_field(layout::N_OUT_BYTES, c.n_out_bytes);
            w.write_nonneg_integer_field(layout::FLAGS, self.flags);
        });
    }
}
