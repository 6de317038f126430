//! NDN TLV codec.
//!
//! Follows the same split as the rest of the crate:
//! - `layout`: type numbers and encoding constants (source of truth)
//! - `reader`: bounds-checked cursor over a borrowed buffer
//! - `writer`: encoder used to build payloads
//! - `decodable`: the capability implemented by every decodable record
//! - `error`: structured decoding failures
//!
//! Decoding is pure and allocation-light: elements borrow from the input and
//! records copy only the fields they keep.

pub mod decodable;
pub mod error;
pub mod layout;
pub mod reader;
pub mod writer;

pub use decodable::{Decodable, decode_all};
pub use error::DecodeError;
pub use reader::{TlvElement, TlvHeader, TlvReader, parse_nonneg_integer};
pub use writer::{Encodable, TlvWriter};
