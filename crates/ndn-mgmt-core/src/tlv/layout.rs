//! Wire constants for NDN TLV (packet format v0.3) and the NFD management
//! datasets decoded by this crate.

/// First octet values that announce a multi-octet VAR-NUMBER.
pub const VAR_NUMBER_2: u8 = 253;
pub const VAR_NUMBER_4: u8 = 254;
pub const VAR_NUMBER_8: u8 = 255;

/// Permitted NonNegativeInteger encodings.
pub const NON_NEGATIVE_INTEGER_WIDTHS: [usize; 4] = [1, 2, 4, 8];

/// Types up to this value are always critical.
pub const CRITICAL_TYPE_MAX: u64 = 31;

// Packet format
pub const NAME: u64 = 0x07;
pub const GENERIC_NAME_COMPONENT: u64 = 0x08;
pub const IMPLICIT_SHA256_DIGEST_COMPONENT: u64 = 0x01;
pub const PARAMETERS_SHA256_DIGEST_COMPONENT: u64 = 0x02;

// Shared management fields
pub const FACE_ID: u64 = 0x69;
pub const COST: u64 = 0x6a;
pub const STRATEGY: u64 = 0x6b;
pub const FLAGS: u64 = 0x6c;
pub const EXPIRATION_PERIOD: u64 = 0x6d;
pub const ORIGIN: u64 = 0x6f;
pub const URI: u64 = 0x72;
pub const LOCAL_URI: u64 = 0x81;

// Face dataset
pub const FACE_STATUS: u64 = 0x80;
pub const FACE_SCOPE: u64 = 0x84;
pub const FACE_PERSISTENCY: u64 = 0x85;
pub const LINK_TYPE: u64 = 0x86;
pub const BASE_CONGESTION_MARKING_INTERVAL: u64 = 0x87;
pub const DEFAULT_CONGESTION_THRESHOLD: u64 = 0x88;
pub const MTU: u64 = 0x89;

// Packet counters (faces and forwarder status)
pub const N_IN_INTERESTS: u64 = 0x90;
pub const N_IN_DATA: u64 = 0x91;
pub const N_OUT_INTERESTS: u64 = 0x92;
pub const N_OUT_DATA: u64 = 0x93;
pub const N_IN_BYTES: u64 = 0x94;
pub const N_OUT_BYTES: u64 = 0x95;
pub const N_IN_NACKS: u64 = 0x97;
pub const N_OUT_NACKS: u64 = 0x98;
pub const N_SATISFIED_INTERESTS: u64 = 0x99;
pub const N_UNSATISFIED_INTERESTS: u64 = 0x9a;

// Channel dataset
pub const CHANNEL_STATUS: u64 = 0x82;

// FIB dataset
pub const FIB_ENTRY: u64 = 0x80;
pub const NEXT_HOP_RECORD: u64 = 0x81;

// RIB dataset
pub const RIB_ENTRY: u64 = 0x80;
pub const ROUTE: u64 = 0x81;

// Strategy choice dataset
pub const STRATEGY_CHOICE: u64 = 0x80;

// Forwarder general status (content is a bare sequence of these fields)
pub const NFD_VERSION: u64 = 0x80;
pub const START_TIMESTAMP: u64 = 0x81;
pub const CURRENT_TIMESTAMP: u64 = 0x82;
pub const N_NAME_TREE_ENTRIES: u64 = 0x83;
pub const N_FIB_ENTRIES: u64 = 0x84;
pub const N_PIT_ENTRIES: u64 = 0x85;
pub const N_MEASUREMENTS_ENTRIES: u64 = 0x86;
pub const N_CS_ENTRIES: u64 = 0x87;

/// Whether an unrecognized element of this type must fail decoding.
///
/// Types `0..=31` are always critical; above that, odd types are critical and
/// even types may be ignored.
pub fn is_critical(tlv_type: u64) -> bool {
    tlv_type <= CRITICAL_TYPE_MAX || tlv_type & 1 == 1
}

/// Encoded size of a VAR-NUMBER.
pub fn var_number_len(value: u64) -> usize {
    if value < VAR_NUMBER_2 as u64 {
        1
    } else if value <= u16::MAX as u64 {
        3
    } else if value <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

#[cfg(test)]
mod tests {
    use super::{is_critical, var_number_len};

    #[test]
    fn low_types_are_critical() {
        assert!(is_critical(0));
        assert!(is_critical(30));
        assert!(is_critical(31));
    }

    #[test]
    fn high_types_follow_parity() {
        assert!(!is_critical(32));
        assert!(is_critical(33));
        assert!(!is_critical(0x80));
        assert!(is_critical(0x81));
    }

    #[test]
    fn var_number_len_boundaries() {
        assert_eq!(var_number_len(252), 1);
        assert_eq!(var_number_len(253), 3);
        assert_eq!(var_number_len(0xffff), 3);
        assert_eq!(var_number_len(0x1_0000), 5);
        assert_eq!(var_number_len(0x1_0000_0000), 9);
    }
}
