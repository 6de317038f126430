use serde::{Deserialize, Serialize};

use crate::name::Name;
use crate::tlv::layout;
use crate::tlv::{Decodable, DecodeError, Encodable, TlvReader, TlvWriter};

/// Entry of the `strategy-choice/list` dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyChoice {
    pub name: Name,
    pub strategy: Name,
}

impl Decodable for StrategyChoice {
    const TLV_TYPE: u64 = layout::STRATEGY_CHOICE;

    fn wire_decode(reader: &mut TlvReader<'_>) -> Result<Self, DecodeError> {
        let mut inner = reader.expect_element(Self::TLV_TYPE)?;
        let name = inner.decode_field::<Name>()?;
        let strategy = inner.read_field(layout::STRATEGY, |element| {
            let mut strategy = element.reader();
            let name = strategy.decode_field::<Name>()?;
            strategy.finish()?;
            Ok(name)
        })?;
        inner.finish()?;
        Ok(StrategyChoice { name, strategy })
    }
}

impl Encodable for StrategyChoice {
    fn wire_encode(&self, writer: &mut TlvWriter) {
        writer.write_nested(Self::TLV_TYPE, |w| {
            w.encode(&self.name);
            w.write_nested(layout::STRATEGY, |s| s.encode(&self.strategy));
        });
    }
}
