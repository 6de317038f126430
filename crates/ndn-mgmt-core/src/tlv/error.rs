use thiserror::Error;

/// Errors returned while decoding NDN TLV.
///
/// # Examples
/// ```
/// use ndn_mgmt_core::tlv::DecodeError;
///
/// let err = DecodeError::TruncatedInput { needed: 5, actual: 3 };
/// assert!(err.to_string().contains("input truncated"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("input truncated: need {needed} bytes, got {actual}")]
    TruncatedInput { needed: usize, actual: usize },
    #[error(
        "element type {tlv_type:#x} declares {length} bytes but parent {parent:#x} has only {remaining} left"
    )]
    LengthOverrun {
        parent: u64,
        tlv_type: u64,
        length: u64,
        remaining: usize,
    },
    #[error("unexpected element type: expected {expected:#x}, found {found:#x}")]
    TypeMismatch { expected: u64, found: u64 },
    #[error("missing required element {tlv_type:#x}")]
    MissingElement { tlv_type: u64 },
    #[error("malformed element {tlv_type:#x}: {reason}")]
    MalformedField { tlv_type: u64, reason: String },
    #[error("unrecognized critical element {tlv_type:#x}")]
    UnexpectedElement { tlv_type: u64 },
    #[error("{count} trailing bytes after element")]
    TrailingBytes { count: usize },
}

impl DecodeError {
    pub(crate) fn malformed(tlv_type: u64, reason: impl Into<String>) -> Self {
        DecodeError::MalformedField {
            tlv_type,
            reason: reason.into(),
        }
    }
}
