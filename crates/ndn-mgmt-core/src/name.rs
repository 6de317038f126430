//! NDN names and their URI representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::tlv::layout;
use crate::tlv::{Decodable, DecodeError, Encodable, TlvReader, TlvWriter};

const DIGEST_LEN: usize = 32;
const IMPLICIT_DIGEST_PREFIX: &str = "sha256digest";
const PARAMETERS_DIGEST_PREFIX: &str = "params-sha256";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameParseError {
    #[error("name URI must start with '/': {uri}")]
    MissingLeadingSlash { uri: String },
    #[error("invalid percent-escape in component '{component}'")]
    InvalidEscape { component: String },
    #[error("invalid component type in '{component}'")]
    InvalidComponentType { component: String },
    #[error("component '{component}' is not a valid period-only component")]
    InvalidPeriodComponent { component: String },
    #[error("invalid digest in component '{component}'")]
    InvalidDigest { component: String },
}

/// One name component: its TLV-TYPE and raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameComponent {
    pub tlv_type: u64,
    pub value: Vec<u8>,
}

impl NameComponent {
    pub fn generic(value: impl Into<Vec<u8>>) -> Self {
        Self {
            tlv_type: layout::GENERIC_NAME_COMPONENT,
            value: value.into(),
        }
    }

    fn parse(segment: &str) -> Result<Self, NameParseError> {
        let (tlv_type, escaped) = match segment.split_once('=') {
            Some((IMPLICIT_DIGEST_PREFIX, digest)) => {
                return parse_digest(segment, layout::IMPLICIT_SHA256_DIGEST_COMPONENT, digest);
            }
            Some((PARAMETERS_DIGEST_PREFIX, digest)) => {
                return parse_digest(segment, layout::PARAMETERS_SHA256_DIGEST_COMPONENT, digest);
            }
            Some((prefix, rest)) => {
                let tlv_type = prefix
                    .parse::<u64>()
                    .ok()
                    .filter(|t| (1..=u16::MAX as u64).contains(t))
                    .ok_or_else(|| NameParseError::InvalidComponentType {
                        component: segment.to_string(),
                    })?;
                (tlv_type, rest)
            }
            None => (layout::GENERIC_NAME_COMPONENT, segment),
        };

        let mut value = percent_decode(escaped).ok_or_else(|| NameParseError::InvalidEscape {
            component: segment.to_string(),
        })?;
        if !value.is_empty() && value.iter().all(|b| *b == b'.') {
            if value.len() < 3 {
                return Err(NameParseError::InvalidPeriodComponent {
                    component: segment.to_string(),
                });
            }
            value.truncate(value.len() - 3);
        }
        Ok(Self { tlv_type, value })
    }
}

impl fmt::Display for NameComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tlv_type {
            layout::IMPLICIT_SHA256_DIGEST_COMPONENT if self.value.len() == DIGEST_LEN => {
                write!(f, "{IMPLICIT_DIGEST_PREFIX}={}", hex::encode(&self.value))
            }
            layout::PARAMETERS_SHA256_DIGEST_COMPONENT if self.value.len() == DIGEST_LEN => {
                write!(f, "{PARAMETERS_DIGEST_PREFIX}={}", hex::encode(&self.value))
            }
            layout::GENERIC_NAME_COMPONENT => write_escaped(f, &self.value),
            other => {
                write!(f, "{other}=")?;
                write_escaped(f, &self.value)
            }
        }
    }
}

/// An NDN name.
///
/// # Examples
/// ```
/// use ndn_mgmt_core::name::Name;
/// use ndn_mgmt_core::tlv::{Decodable, Encodable};
///
/// let name: Name = "/localhost/nfd".parse()?;
/// assert_eq!(name.len(), 2);
/// let decoded = Name::from_wire(&name.to_wire())?;
/// assert_eq!(decoded.to_string(), "/localhost/nfd");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    components: Vec<NameComponent>,
}

impl Name {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components(components: Vec<NameComponent>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[NameComponent] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn push(&mut self, component: NameComponent) {
        self.components.push(component);
    }

    /// Append a generic component.
    pub fn append(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.components.push(NameComponent::generic(value));
        self
    }

    pub fn is_prefix_of(&self, other: &Name) -> bool {
        other.components.starts_with(&self.components)
    }
}

impl Decodable for Name {
    const TLV_TYPE: u64 = layout::NAME;

    fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
        let mut inner = reader.expect_element(Self::TLV_TYPE)?;
        let mut components = Vec::new();
        while !inner.is_at_end() {
            let element = inner.read_element()?;
            if element.tlv_type == 0 || element.tlv_type > u16::MAX as u64 {
                return Err(DecodeError::MalformedField {
                    tlv_type: Self::TLV_TYPE,
                    reason: format!("invalid name component type {}", element.tlv_type),
                });
            }
            components.push(NameComponent {
                tlv_type: element.tlv_type,
                value: element.value.to_vec(),
            });
        }
        Ok(Self { components })
    }
}

impl Encodable for Name {
    fn wire_encode(&self, writer: &mut TlvWriter) {
        writer.write_nested(Self::TLV_TYPE, |w| {
            for component in &self.components {
                w.write_element(component.tlv_type, &component.value);
            }
        });
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("/");
        }
        for component in &self.components {
            write!(f, "/{component}")?;
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = NameParseError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        let trimmed = uri.trim();
        let path = trimmed.strip_prefix("ndn:").unwrap_or(trimmed);
        let path = path
            .strip_prefix('/')
            .ok_or_else(|| NameParseError::MissingLeadingSlash {
                uri: uri.to_string(),
            })?;
        let components = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(NameComponent::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        uri.parse().map_err(serde::de::Error::custom)
    }
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &[u8]) -> fmt::Result {
    if value.iter().all(|b| *b == b'.') {
        // empty and period-only values gain three periods
        f.write_str("...")?;
        for _ in value {
            f.write_str(".")?;
        }
        return Ok(());
    }
    for byte in value {
        if is_unreserved(*byte) {
            write!(f, "{}", *byte as char)?;
        } else {
            write!(f, "%{byte:02X}")?;
        }
    }
    Ok(())
}

fn percent_decode(escaped: &str) -> Option<Vec<u8>> {
    let bytes = escaped.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let pair = escaped.get(i + 1..i + 3)?;
            if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(pair, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Some(out)
}

fn parse_digest(
    segment: &str,
    tlv_type: u64,
    digest: &str,
) -> Result<NameComponent, NameParseError> {
    let value = hex::decode(digest)
        .ok()
        .filter(|value| value.len() == DIGEST_LEN)
        .ok_or_else(|| NameParseError::InvalidDigest {
            component: segment.to_string(),
        })?;
    Ok(NameComponent { tlv_type, value })
}
