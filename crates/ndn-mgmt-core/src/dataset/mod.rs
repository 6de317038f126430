//! NFD management datasets.
//!
//! A dataset payload is the concatenation of the Content of every segment of
//! a status dataset reply. Each kind lists records of a single shape, except
//! `status/general` which carries one [`ForwarderStatus`] without an outer
//! element.
//!
//! Record decoding is dispatched by TLV type through a [`DecoderRegistry`];
//! failures are reported with the index and byte offset of the record that
//! did not decode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tlv::TlvReader;

pub mod channel;
pub mod error;
pub mod face;
pub mod fib;
pub mod registry;
pub mod rib;
pub mod status;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use channel::ChannelStatus;
pub use error::DatasetError;
pub use face::{FaceCounters, FacePersistency, FaceScope, FaceStatus, LinkType};
pub use fib::{FibEntry, NextHopRecord};
pub use registry::{DecodeFn, DecoderRegistry};
pub use rib::{RibEntry, Route};
pub use status::ForwarderStatus;
pub use strategy::StrategyChoice;

/// Status datasets published by the forwarder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Status,
    Faces,
    Channels,
    Fib,
    Rib,
    StrategyChoice,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 6] = [
        DatasetKind::Status,
        DatasetKind::Faces,
        DatasetKind::Channels,
        DatasetKind::Fib,
        DatasetKind::Rib,
        DatasetKind::StrategyChoice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKind::Status => "status",
            DatasetKind::Faces => "faces",
            DatasetKind::Channels => "channels",
            DatasetKind::Fib => "fib",
            DatasetKind::Rib => "rib",
            DatasetKind::StrategyChoice => "strategy-choice",
        }
    }

    /// Management path the dataset is fetched from, under `/localhost/nfd`.
    pub fn path(self) -> &'static str {
        match self {
            DatasetKind::Status => "status/general",
            DatasetKind::Faces => "faces/list",
            DatasetKind::Channels => "faces/channels",
            DatasetKind::Fib => "fib/list",
            DatasetKind::Rib => "rib/list",
            DatasetKind::StrategyChoice => "strategy-choice/list",
        }
    }

    /// Registry holding the record decoder for this kind.
    ///
    /// `Status` has no wrapped records, so its registry is empty.
    pub fn registry(self) -> DecoderRegistry<DatasetRecord> {
        let registry = DecoderRegistry::new();
        match self {
            DatasetKind::Status => registry,
            DatasetKind::Faces => registry.with::<FaceStatus>(),
            DatasetKind::Channels => registry.with::<ChannelStatus>(),
            DatasetKind::Fib => registry.with::<FibEntry>(),
            DatasetKind::Rib => registry.with::<RibEntry>(),
            DatasetKind::StrategyChoice => registry.with::<StrategyChoice>(),
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.path() == s)
            .ok_or_else(|| DatasetError::UnknownKind {
                name: s.to_string(),
            })
    }
}

/// One decoded dataset record, tagged with its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatasetRecord {
    ForwarderStatus(ForwarderStatus),
    FaceStatus(FaceStatus),
    ChannelStatus(ChannelStatus),
    FibEntry(FibEntry),
    RibEntry(RibEntry),
    StrategyChoice(StrategyChoice),
}

macro_rules! record_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for DatasetRecord {
                fn from(value: $variant) -> Self {
                    DatasetRecord::$variant(value)
                }
            }
        )*
    };
}

record_from!(
    ForwarderStatus,
    FaceStatus,
    ChannelStatus,
    FibEntry,
    RibEntry,
    StrategyChoice,
);

/// Decode a complete dataset payload of `kind`.
///
/// Records are returned in wire order. Unknown non-critical top-level
/// elements are skipped.
///
/// # Examples
/// ```
/// use ndn_mgmt_core::dataset::{DatasetKind, DatasetRecord, decode_dataset};
///
/// let payload = [0x82, 0x03, 0x81, 0x01, b'x'];
/// let records = decode_dataset(DatasetKind::Channels, &payload)?;
/// assert!(matches!(&records[0], DatasetRecord::ChannelStatus(c) if c.local_uri == "x"));
/// # Ok::<(), ndn_mgmt_core::dataset::DatasetError>(())
/// ```
pub fn decode_dataset(
    kind: DatasetKind,
    payload: &[u8],
) -> Result<Vec<DatasetRecord>, DatasetError> {
    let record_error = |index, offset, source| DatasetError::Record {
        kind: kind.as_str(),
        index,
        offset,
        source,
    };

    if kind == DatasetKind::Status {
        let status =
            ForwarderStatus::decode_content(payload).map_err(|err| record_error(0, 0, err))?;
        return Ok(vec![status.into()]);
    }

    let registry = kind.registry();
    let mut reader = TlvReader::new(payload);
    let mut records = Vec::new();
    loop {
        let offset = reader.position();
        match registry.decode_next(&mut reader) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => break,
            Err(err) => return Err(record_error(records.len(), offset, err)),
        }
    }
    tracing::debug!(
        kind = kind.as_str(),
        bytes = payload.len(),
        records = records.len(),
        "decoded dataset"
    );
    Ok(records)
}
