use thiserror::Error;

use crate::tlv::DecodeError;

/// Errors returned when decoding a whole dataset payload.
///
/// # Examples
/// ```
/// use ndn_mgmt_core::dataset::DatasetError;
///
/// let err = DatasetError::UnknownKind {
///     name: "routes".to_string(),
/// };
/// assert!(err.to_string().contains("unknown dataset kind"));
/// ```
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{kind} record #{index} at offset {offset}: {source}")]
    Record {
        kind: &'static str,
        index: usize,
        offset: usize,
        #[source]
        source: DecodeError,
    },
    #[error("unknown dataset kind `{name}`")]
    UnknownKind { name: String },
}

impl DatasetError {
    /// The underlying TLV failure, when there is one.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            DatasetError::Record { source, .. } => Some(source),
            DatasetError::UnknownKind { .. } => None,
        }
    }
}
