use serde::{Deserialize, Serialize};

use crate::tlv::layout;
use crate::tlv::{DecodeError, Encodable, TlvReader, TlvWriter};

/// Content of the `status/general` dataset.
///
/// Unlike the other datasets the fields are not wrapped in an outer element:
/// the whole payload is one ForwarderStatus, so it is decoded with
/// [`ForwarderStatus::decode_content`] rather than through `Decodable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwarderStatus {
    pub nfd_version: String,
    #[serde(with = "timestamp")]
    pub start_timestamp: u64,
    #[serde(with = "timestamp")]
    pub current_timestamp: u64,
    pub n_name_tree_entries: u64,
    pub n_fib_entries: u64,
    pub n_pit_entries: u64,
    pub n_measurements_entries: u64,
    pub n_cs_entries: u64,
    pub n_in_interests: u64,
    pub n_in_data: u64,
    pub n_in_nacks: u64,
    pub n_out_interests: u64,
    pub n_out_data: u64,
    pub n_out_nacks: u64,
    pub n_satisfied_interests: u64,
    pub n_unsatisfied_interests: u64,
}

impl ForwarderStatus {
    pub fn decode_content(payload: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TlvReader::new(payload);
        let status = Self::read_fields(&mut reader)?;
        reader.finish()?;
        Ok(status)
    }

    fn read_fields(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
        Ok(ForwarderStatus {
            nfd_version: reader.read_utf8_field(layout::NFD_VERSION)?,
            start_timestamp: read_timestamp_field(reader, layout::START_TIMESTAMP)?,
            current_timestamp: read_timestamp_field(reader, layout::CURRENT_TIMESTAMP)?,
            n_name_tree_entries: reader.read_nonneg_integer_field(layout::N_NAME_TREE_ENTRIES)?,
            n_fib_entries: reader.read_nonneg_integer_field(layout::N_FIB_ENTRIES)?,
            n_pit_entries: reader.read_nonneg_integer_field(layout::N_PIT_ENTRIES)?,
            n_measurements_entries: reader
                .read_nonneg_integer_field(layout::N_MEASUREMENTS_ENTRIES)?,
            n_cs_entries: reader.read_nonneg_integer_field(layout::N_CS_ENTRIES)?,
            n_in_interests: reader.read_nonneg_integer_field(layout::N_IN_INTERESTS)?,
            n_in_data: reader.read_nonneg_integer_field(layout::N_IN_DATA)?,
            n_in_nacks: reader.read_nonneg_integer_field(layout::N_IN_NACKS)?,
            n_out_interests: reader.read_nonneg_integer_field(layout::N_OUT_INTERESTS)?,
            n_out_data: reader.read_nonneg_integer_field(layout::N_OUT_DATA)?,
            n_out_nacks: reader.read_nonneg_integer_field(layout::N_OUT_NACKS)?,
            n_satisfied_interests: reader
                .read_nonneg_integer_field(layout::N_SATISFIED_INTERESTS)?,
            n_unsatisfied_interests: reader
                .read_nonneg_integer_field(layout::N_UNSATISFIED_INTERESTS)?,
        })
    }

    /// Forwarder uptime in milliseconds, as reported by its own clock.
    pub fn uptime_ms(&self) -> u64 {
        self.current_timestamp.saturating_sub(self.start_timestamp)
    }
}

/// Timestamps must map to a calendar date so the report can render them.
fn read_timestamp_field(
    reader: &mut TlvReader<'_>,
    tlv_type: u64,
) -> Result<u64, DecodeError> {
    let millis = reader.read_nonneg_integer_field(tlv_type)?;
    if timestamp::to_datetime(millis).is_err() {
        return Err(DecodeError::MalformedField {
            tlv_type,
            reason: format!("timestamp {millis} ms is out of range"),
        });
    }
    Ok(millis)
}

impl Encodable for ForwarderStatus {
    fn wire_encode(&self, w: &mut TlvWriter) {
        w.write_utf8_field(layout::NFD_VERSION, &self.nfd_version);
        w.write_nonneg_integer_field(layout::START_TIMESTAMP, self.start_timestamp);
        w.write_nonneg_integer_field(layout::CURRENT_TIMESTAMP, self.current_timestamp);
        w.write_nonneg_integer_field(layout::N_NAME_TREE_ENTRIES, self.n_name_tree_entries);
        w.write_nonneg_integer_field(layout::N_FIB_ENTRIES, self.n_fib_entries);
        w.write_nonneg_integer_field(layout::N_PIT_ENTRIES, self.n_pit_entries);
        w.write_nonneg_integer_field(layout::N_MEASUREMENTS_ENTRIES, self.n_measurements_entries);
        w.write_nonneg_integer_field(layout::N_CS_ENTRIES, self.n_cs_entries);
        w.write_nonneg_integer_field(layout::N_IN_INTERESTS, self.n_in_interests);
        w.write_nonneg_integer_field(layout::N_IN_DATA, self.n_in_data);
        w.write_nonneg_integer_field(layout::N_IN_NACKS, self.n_in_nacks);
        w.write_nonneg_integer_field(layout::N_OUT_INTERESTS, self.n_out_interests);
        w.write_nonneg_integer_field(layout::N_OUT_DATA, self.n_out_data);
        w.write_nonneg_integer_field(layout::N_OUT_NACKS, self.n_out_nacks);
        w.write_nonneg_integer_field(layout::N_SATISFIED_INTERESTS, self.n_satisfied_interests);
        w.write_nonneg_integer_field(
            layout::N_UNSATISFIED_INTERESTS,
            self.n_unsatisfied_interests,
        );
    }
}

/// Milliseconds since the Unix epoch, rendered as RFC 3339.
mod timestamp {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    const NANOS_PER_MILLI: i128 = 1_000_000;

    pub(super) fn to_datetime(
        millis: u64,
    ) -> Result<OffsetDateTime, time::error::ComponentRange> {
        OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * NANOS_PER_MILLI)
    }

    pub fn serialize<S: Serializer>(millis: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        let instant = to_datetime(*millis).map_err(<S::Error as ser::Error>::custom)?;
        let text = instant
            .format(&Rfc3339)
            .map_err(<S::Error as ser::Error>::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let text = String::deserialize(deserializer)?;
        let instant =
            OffsetDateTime::parse(&text, &Rfc3339).map_err(<D::Error as de::Error>::custom)?;
        let millis = instant.unix_timestamp_nanos() / NANOS_PER_MILLI;
        u64::try_from(millis).map_err(<D::Error as de::Error>::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::ForwarderStatus;
    use crate::dataset::test_helpers::sample_status;
    use crate::tlv::{DecodeError, Encodable, layout};

    #[test]
    fn decode_content_round_trip() {
        let status = sample_status();
        let decoded = ForwarderStatus::decode_content(&status.to_wire()).unwrap();
        assert_eq!(decoded, status);
        assert_eq!(decoded.uptime_ms(), 3_600_000);
    }

    #[test]
    fn truncated_content() {
        let wire = sample_status().to_wire();
        let err = ForwarderStatus::decode_content(&wire[..wire.len() - 1]).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedInput { .. }));
    }

    #[test]
    fn missing_counter() {
        let mut wire = sample_status().to_wire();
        // drop the final NUnsatisfiedInterests element (type, length, 1-byte value)
        wire.truncate(wire.len() - 3);
        let err = ForwarderStatus::decode_content(&wire).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingElement {
                tlv_type: layout::N_UNSATISFIED_INTERESTS
            }
        );
    }

    #[test]
    fn timestamps_serialize_as_rfc3339() {
        let status = sample_status();
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["start_timestamp"], "2024-01-01T00:00:00Z");
        assert_eq!(value["current_timestamp"], "2024-01-01T01:00:00Z");
        let back: ForwarderStatus = serde_json::from_value(value).unwrap();
        assert_eq!(back, status);
    }

    #[test]
    fn timestamp_beyond_calendar_range_is_malformed() {
        let mut status = sample_status();
        status.start_timestamp = u64::MAX;
        let err = ForwarderStatus::decode_content(&status.to_wire()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedField {
                tlv_type: layout::START_TIMESTAMP,
                ..
            }
        ));

        let mut status = sample_status();
        status.current_timestamp = u64::MAX;
        let err = ForwarderStatus::decode_content(&status.to_wire()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedField {
                tlv_type: layout::CURRENT_TIMESTAMP,
                ..
            }
        ));
    }
}
