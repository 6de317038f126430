use ndn_mgmt_core::dataset::{ChannelStatus, FibEntry, NextHopRecord, StrategyChoice};
use ndn_mgmt_core::name::Name;
use ndn_mgmt_core::tlv::{Decodable, DecodeError, Encodable, TlvReader, TlvWriter};

fn fib_entry() -> FibEntry {
    FibEntry {
        name: "/ndn/edu/ucla".parse().expect("name"),
        next_hops: vec![
            NextHopRecord {
                face_id: 262,
                cost: 10,
            },
            NextHopRecord {
                face_id: 263,
                cost: 20,
            },
        ],
    }
}

#[test]
fn cursor_stops_exactly_after_record() {
    let mut writer = TlvWriter::new();
    writer.encode(&fib_entry());
    let record_len = writer.as_slice().len();
    writer.encode(&ChannelStatus {
        local_uri: "unix:///run/nfd.sock".to_string(),
    });

    let mut reader = TlvReader::new(writer.as_slice());
    let entry = FibEntry::wire_decode(&mut reader).expect("fib entry");
    assert_eq!(entry, fib_entry());
    assert_eq!(reader.position(), record_len);

    let channel = ChannelStatus::wire_decode(&mut reader).expect("channel");
    assert_eq!(channel.local_uri, "unix:///run/nfd.sock");
    assert!(reader.is_at_end());
}

#[test]
fn every_truncation_fails_without_panicking() {
    let wire = fib_entry().to_wire();
    for cut in 0..wire.len() {
        let result = FibEntry::wire_decode(&mut TlvReader::new(&wire[..cut]));
        assert!(result.is_err(), "prefix of {cut} bytes decoded");
    }
}

#[test]
fn child_longer_than_parent_is_length_overrun() {
    // FibEntry of 4 bytes holding a Name that claims 9
    let bytes = [0x80, 0x04, 0x07, 0x09, 0x08, 0x01];
    let err = FibEntry::wire_decode(&mut TlvReader::new(&bytes)).expect_err("overrun");
    assert_eq!(
        err,
        DecodeError::LengthOverrun {
            parent: 0x80,
            tlv_type: 0x07,
            length: 9,
            remaining: 2,
        }
    );
}

#[test]
fn three_byte_integer_is_malformed() {
    let mut writer = TlvWriter::new();
    writer.write_nested(0x80, |w| {
        w.encode(&Name::new());
        w.write_nested(0x81, |hop| {
            hop.write_element(0x69, &[0x00, 0x01, 0x02]);
            hop.write_nonneg_integer_field(0x6a, 1);
        });
    });
    let err = FibEntry::from_wire(writer.as_slice()).expect_err("bad width");
    assert!(matches!(err, DecodeError::MalformedField { tlv_type: 0x69, .. }));
}

#[test]
fn decoding_is_deterministic() {
    let choice = StrategyChoice {
        name: "/ndn/broadcast".parse().expect("name"),
        strategy: "/localhost/nfd/strategy/multicast/%FD%04".parse().expect("name"),
    };
    let wire = choice.to_wire();
    let first = StrategyChoice::from_wire(&wire).expect("first");
    let second = StrategyChoice::from_wire(&wire).expect("second");
    assert_eq!(first, second);
    assert_eq!(first, choice);
}

#[test]
fn unknown_critical_field_is_rejected() {
    let mut writer = TlvWriter::new();
    writer.write_nested(0x82, |w| {
        w.write_utf8_field(0x81, "udp4://0.0.0.0:6363");
        w.write_element(0x1f, &[]);
    });
    let err = ChannelStatus::from_wire(writer.as_slice()).expect_err("critical");
    assert_eq!(err, DecodeError::UnexpectedElement { tlv_type: 0x1f });
}
