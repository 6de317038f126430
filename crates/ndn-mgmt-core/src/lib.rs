//! NDN management core library: TLV decoding for NFD status datasets.
//!
//! The crate is layered the same way end to end:
//! - `tlv`: wire constants (layout), a bounds-checked cursor (reader), an
//!   encoder (writer) and the [`tlv::Decodable`] capability every record type
//!   implements
//! - `name`: NDN names, decoded from and rendered to URI form
//! - `dataset`: the NFD management records and a registry that dispatches
//!   decoding by TLV type
//!
//! Decoding is pure. All file and terminal I/O lives in the CLI crate; this
//! crate only turns bytes into typed records and records into a report.
//!
//! Invariants:
//! - A successful decode leaves the cursor exactly past the decoded element.
//! - A failed decode returns a typed error and never a partial record.
//! - Report record order is wire order.
//!
//! # Examples
//! ```
//! use ndn_mgmt_core::dataset::DatasetKind;
//! use ndn_mgmt_core::build_report;
//!
//! let payload = [0x82, 0x03, 0x81, 0x01, b'x'];
//! let report = build_report("channels.bin", &payload, DatasetKind::Channels)?;
//! assert_eq!(report.dataset.records, 1);
//! # Ok::<(), ndn_mgmt_core::dataset::DatasetError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod dataset;
pub mod name;
pub mod tlv;

use dataset::{DatasetError, DatasetKind, DatasetRecord, decode_dataset};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used until the caller stamps the report.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";
/// Prefix every management dataset path lives under.
pub const NFD_PREFIX: &str = "/localhost/nfd";

/// Decoded dataset report with records in wire order.
///
/// # Examples
/// ```
/// use ndn_mgmt_core::dataset::DatasetKind;
/// use ndn_mgmt_core::make_stub_report;
///
/// let report = make_stub_report("fib.bin", 0, DatasetKind::Fib);
/// assert_eq!(report.report_version, ndn_mgmt_core::REPORT_VERSION);
/// assert!(report.records.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input payload metadata.
    pub input: InputInfo,
    /// Which dataset the payload was decoded as.
    pub dataset: DatasetInfo,
    /// Decoded records in wire order.
    pub records: Vec<DatasetRecord>,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use ndn_mgmt_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "ndnmgmt".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "ndnmgmt");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "ndnmgmt").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input payload metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Payload size in bytes, after any hex decoding.
    pub bytes: u64,
}

/// Dataset identification embedded in reports.
///
/// # Examples
/// ```
/// use ndn_mgmt_core::DatasetInfo;
/// use ndn_mgmt_core::dataset::DatasetKind;
///
/// let info = DatasetInfo::new(DatasetKind::Rib, 3);
/// assert_eq!(info.name, "/localhost/nfd/rib/list");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Short kind name (e.g., "faces").
    pub kind: String,
    /// Full dataset name the payload is published under.
    pub name: String,
    /// Number of decoded records.
    pub records: usize,
}

impl DatasetInfo {
    pub fn new(kind: DatasetKind, records: usize) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            name: format!("{NFD_PREFIX}/{}", kind.path()),
            records,
        }
    }
}

/// Build a report with base fields filled and no records.
pub fn make_stub_report(input_path: &str, input_bytes: u64, kind: DatasetKind) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "ndnmgmt".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        dataset: DatasetInfo::new(kind, 0),
        records: vec![],
    }
}

/// Decode `payload` as a `kind` dataset and wrap the records in a report.
pub fn build_report(
    input_path: &str,
    payload: &[u8],
    kind: DatasetKind,
) -> Result<Report, DatasetError> {
    let records = decode_dataset(kind, payload)?;
    let mut report = make_stub_report(input_path, payload.len() as u64, kind);
    report.dataset.records = records.len();
    report.records = records;
    Ok(report)
}
