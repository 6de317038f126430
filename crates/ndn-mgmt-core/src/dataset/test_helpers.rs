//! Sample records shared by the dataset unit tests.

use super::face::{
    FLAG_LOCAL_FIELDS_ENABLED, FaceCounters, FacePersistency, FaceScope, FaceStatus, LinkType,
};
use super::status::ForwarderStatus;

pub(crate) fn sample_face(face_id: u64) -> FaceStatus {
    FaceStatus {
        face_id,
        uri: format!("udp4://192.0.2.{}:6363", face_id % 256),
        local_uri: "udp4://192.0.2.1:6363".to_string(),
        expiration_period: Some(30_000),
        face_scope: FaceScope::NonLocal,
        face_persistency: FacePersistency::Persistent,
        link_type: LinkType::PointToPoint,
        base_congestion_marking_interval: Some(100_000_000),
        default_congestion_threshold: Some(65_536),
        mtu: Some(8800),
        counters: FaceCounters {
            n_in_interests: 10,
            n_in_data: 20,
            n_in_nacks: 1,
            n_out_interests: 30,
            n_out_data: 40,
            n_out_nacks: 2,
            n_in_bytes: 4_096,
            n_out_bytes: 70_000,
        },
        flags: FLAG_LOCAL_FIELDS_ENABLED,
    }
}

/// 2024-01-01T00:00:00Z, up for one hour.
pub(crate) fn sample_status() -> ForwarderStatus {
    ForwarderStatus {
        nfd_version: "22.12".to_string(),
        start_timestamp: 1_704_067_200_000,
        current_timestamp: 1_704_070_800_000,
        n_name_tree_entries: 12,
        n_fib_entries: 4,
        n_pit_entries: 2,
        n_measurements_entries: 1,
        n_cs_entries: 64,
        n_in_interests: 1_000,
        n_in_data: 900,
        n_in_nacks: 3,
        n_out_interests: 950,
        n_out_data: 880,
        n_out_nacks: 5,
        n_satisfied_interests: 870,
        n_unsatisfied_interests: 7,
    }
}
