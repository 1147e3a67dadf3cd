use store::serialize::leb128::{Leb128, Leb128Reader};

use crate::types::item::ItemKind;

use super::{ChangeKey, IdError};

impl ChangeKey {
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(10);
        bytes.push(self.kind.to_u8());
        self.change_num.to_leb128_bytes(&mut bytes);
        base64::encode(&bytes)
    }

    pub fn decode(value: &str) -> Result<Self, IdError> {
        let bytes = base64::decode(value.trim()).map_err(|_| IdError::InvalidEncoding)?;
        let mut reader = Leb128Reader::new(&bytes);
        let kind = reader.next_u8().ok_or(IdError::Truncated)?;
        let kind = ItemKind::from_u8(kind).ok_or(IdError::InvalidObjectKind(kind))?;
        let change_num = reader.next_leb128::<u64>().ok_or(IdError::Truncated)?;
        if !reader.is_eof() {
            return Err(IdError::TrailingBytes);
        }

        Ok(ChangeKey { kind, change_num })
    }
}
