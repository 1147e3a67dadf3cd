use store::{
    blake3,
    chrono::{DateTime, TimeZone, Utc},
    serialize::leb128::{zigzag_encode, Leb128, Leb128Reader},
};

use crate::types::id::{FolderId, ItemId};

use super::{
    compression::{compress, decompress, MAX_DECOMPRESSED_LEN},
    Addressing, ChangeKey, FolderIdentifier, IdError, ItemIdentifier, OccurrenceWindow,
    ProcessingInstruction, StorageLocation, StorageType,
};

const COMPRESSION_NONE: u8 = 0;
const COMPRESSION_RLE: u8 = 1;

const OBJECT_KIND_ITEM: u8 = 1;
const OBJECT_KIND_FOLDER: u8 = 2;

const CHECKSUM_LEN: usize = 4;

// Storage type, moniker length, instruction, store id length and checksum.
const ENVELOPE_OVERHEAD: usize = 1 + 2 + 1 + 2 + CHECKSUM_LEN;
// Object kind, leb128 folder id, leb128 object id and an occurrence timestamp.
const MAX_ISSUED_STORE_ID_LEN: usize = 1 + 5 + 10 + 10;

/// Longest moniker for which every item or occurrence id issued by the
/// server decodes within `MAX_DECOMPRESSED_LEN`.
pub const MAX_MONIKER_LEN: usize =
    MAX_DECOMPRESSED_LEN - ENVELOPE_OVERHEAD - MAX_ISSUED_STORE_ID_LEN;

const WINDOW_HAS_START: u8 = 0x01;
const WINDOW_HAS_END: u8 = 0x02;
const WINDOW_HAS_COUNT: u8 = 0x04;
const WINDOW_COMPARE_ORIGINAL: u8 = 0x08;

/// Decoded outer layout shared by item and folder identifiers.
struct Envelope {
    storage_type: StorageType,
    moniker: String,
    instruction: ProcessingInstruction,
    store_id: Vec<u8>,
}

impl Envelope {
    fn encode(&self) -> String {
        let moniker = self.moniker.as_bytes();
        let moniker = &moniker[..moniker.len().min(u16::MAX as usize)];

        let mut body = Vec::with_capacity(moniker.len() + self.store_id.len() + 10);
        body.push(self.storage_type as u8);
        body.extend_from_slice(&(moniker.len() as u16).to_le_bytes());
        body.extend_from_slice(moniker);
        body.push(self.instruction as u8);
        body.extend_from_slice(&(self.store_id.len() as u16).to_le_bytes());
        body.extend_from_slice(&self.store_id);
        let checksum = blake3::hash(&body);
        body.extend_from_slice(&checksum.as_bytes()[..CHECKSUM_LEN]);

        let mut raw = Vec::with_capacity(body.len() + 1);
        if let Some(compressed) = compress(&body) {
            raw.push(COMPRESSION_RLE);
            raw.extend_from_slice(&compressed);
        } else {
            raw.push(COMPRESSION_NONE);
            raw.extend_from_slice(&body);
        }

        base64::encode(&raw)
    }

    fn decode(value: &str) -> Result<Self, IdError> {
        let raw = base64::decode(value.trim()).map_err(|_| IdError::InvalidEncoding)?;
        let (&compression, bytes) = raw.split_first().ok_or(IdError::Truncated)?;
        let body = match compression {
            COMPRESSION_NONE if bytes.len() > MAX_DECOMPRESSED_LEN => {
                return Err(IdError::TooLong);
            }
            COMPRESSION_NONE => bytes.to_vec(),
            COMPRESSION_RLE => decompress(bytes, MAX_DECOMPRESSED_LEN)?,
            _ => return Err(IdError::InvalidCompression(compression)),
        };

        if body.len() <= CHECKSUM_LEN {
            return Err(IdError::Truncated);
        }
        let (body, checksum) = body.split_at(body.len() - CHECKSUM_LEN);
        if &blake3::hash(body).as_bytes()[..CHECKSUM_LEN] != checksum {
            return Err(IdError::ChecksumMismatch);
        }

        let mut reader = Leb128Reader::new(body);
        let storage_type = reader.next_u8().ok_or(IdError::Truncated)?;
        let storage_type =
            StorageType::from_u8(storage_type).ok_or(IdError::UnknownStorageType(storage_type))?;
        if !storage_type.is_mailbox() {
            return Err(IdError::UnsupportedStorageType(storage_type));
        }

        let moniker_len = reader.next_u16_le().ok_or(IdError::Truncated)? as usize;
        let moniker = reader.next_bytes(moniker_len).ok_or(IdError::Truncated)?;
        let moniker = std::str::from_utf8(moniker)
            .map_err(|_| IdError::InvalidMoniker)?
            .to_string();

        let instruction = reader.next_u8().ok_or(IdError::Truncated)?;
        let instruction = ProcessingInstruction::from_u8(instruction)
            .ok_or(IdError::UnknownProcessingInstruction(instruction))?;

        let store_id_len = reader.next_u16_le().ok_or(IdError::Truncated)? as usize;
        let store_id = reader
            .next_bytes(store_id_len)
            .ok_or(IdError::Truncated)?
            .to_vec();

        if !reader.is_eof() {
            return Err(IdError::TrailingBytes);
        }

        Ok(Envelope {
            storage_type,
            moniker,
            instruction,
            store_id,
        })
    }
}

fn write_timestamp(date: &DateTime<Utc>, out: &mut Vec<u8>) {
    zigzag_encode(date.timestamp_millis()).to_leb128_bytes(out);
}

fn read_timestamp(reader: &mut Leb128Reader) -> Result<DateTime<Utc>, IdError> {
    let millis = reader.next_zigzag().ok_or(IdError::Truncated)?;
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(IdError::InvalidTimestamp)
}

/// Drops sub-millisecond precision, matching what the encoder keeps.
pub fn truncate_millis(date: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(date.timestamp_millis())
        .single()
        .unwrap_or(date)
}

impl ItemIdentifier {
    pub fn encode(&self) -> String {
        let mut store_id = Vec::with_capacity(24);
        store_id.push(OBJECT_KIND_ITEM);
        self.location.folder_id.to_leb128_bytes(&mut store_id);
        self.object_id.to_leb128_bytes(&mut store_id);

        match &self.addressing {
            Addressing::Normal | Addressing::Series => (),
            Addressing::Recurrence { original_start } => {
                write_timestamp(original_start, &mut store_id);
            }
            Addressing::Range { windows } => {
                let windows = &windows[..windows.len().min(u8::MAX as usize)];
                store_id.push(windows.len() as u8);
                for window in windows {
                    let mut flags = 0;
                    if window.start.is_some() {
                        flags |= WINDOW_HAS_START;
                    }
                    if window.end.is_some() {
                        flags |= WINDOW_HAS_END;
                    }
                    if window.count.is_some() {
                        flags |= WINDOW_HAS_COUNT;
                    }
                    if window.compare_original_start_time {
                        flags |= WINDOW_COMPARE_ORIGINAL;
                    }
                    store_id.push(flags);
                    if let Some(start) = &window.start {
                        write_timestamp(start, &mut store_id);
                    }
                    if let Some(end) = &window.end {
                        write_timestamp(end, &mut store_id);
                    }
                    if let Some(count) = window.count {
                        count.to_leb128_bytes(&mut store_id);
                    }
                }
            }
        }

        Envelope {
            storage_type: self.location.storage_type,
            moniker: self.location.moniker.clone(),
            instruction: self.addressing.instruction(),
            store_id,
        }
        .encode()
    }

    /// Decodes an identifier. The change key travels separately and is
    /// left unset.
    pub fn decode(value: &str) -> Result<Self, IdError> {
        let envelope = Envelope::decode(value)?;
        let mut reader = Leb128Reader::new(&envelope.store_id);

        match reader.next_u8().ok_or(IdError::Truncated)? {
            OBJECT_KIND_ITEM => (),
            kind => return Err(IdError::InvalidObjectKind(kind)),
        }
        let folder_id = reader.next_leb128::<u32>().ok_or(IdError::Truncated)?;
        let object_id = reader.next_leb128::<u64>().ok_or(IdError::Truncated)?;

        let addressing = match envelope.instruction {
            ProcessingInstruction::Normal => Addressing::Normal,
            ProcessingInstruction::Series => Addressing::Series,
            ProcessingInstruction::Recurrence => Addressing::Recurrence {
                original_start: read_timestamp(&mut reader)?,
            },
            ProcessingInstruction::Range => {
                let num_windows = reader.next_u8().ok_or(IdError::Truncated)?;
                let mut windows = Vec::with_capacity(num_windows as usize);
                for _ in 0..num_windows {
                    let flags = reader.next_u8().ok_or(IdError::Truncated)?;
                    if flags
                        & !(WINDOW_HAS_START
                            | WINDOW_HAS_END
                            | WINDOW_HAS_COUNT
                            | WINDOW_COMPARE_ORIGINAL)
                        != 0
                    {
                        return Err(IdError::InvalidRange);
                    }
                    windows.push(OccurrenceWindow {
                        start: if flags & WINDOW_HAS_START != 0 {
                            Some(read_timestamp(&mut reader)?)
                        } else {
                            None
                        },
                        end: if flags & WINDOW_HAS_END != 0 {
                            Some(read_timestamp(&mut reader)?)
                        } else {
                            None
                        },
                        count: if flags & WINDOW_HAS_COUNT != 0 {
                            Some(reader.next_leb128::<u32>().ok_or(IdError::Truncated)?)
                        } else {
                            None
                        },
                        compare_original_start_time: flags & WINDOW_COMPARE_ORIGINAL != 0,
                    });
                }
                Addressing::Range { windows }
            }
        };

        if !reader.is_eof() {
            return Err(IdError::TrailingBytes);
        }

        Ok(ItemIdentifier {
            location: StorageLocation {
                storage_type: envelope.storage_type,
                moniker: envelope.moniker,
                folder_id,
            },
            object_id,
            change_key: None,
            addressing,
        })
    }

    /// Decodes an identifier together with its change key.
    pub fn parse(item_id: &ItemId) -> Result<Self, IdError> {
        let mut identifier = ItemIdentifier::decode(&item_id.id)?;
        if let Some(change_key) = item_id.change_key.as_deref().filter(|ck| !ck.is_empty()) {
            identifier.change_key = ChangeKey::decode(change_key)?.into();
        }
        Ok(identifier)
    }

    pub fn to_item_id(&self) -> ItemId {
        ItemId {
            id: self.encode(),
            change_key: self.change_key.map(|change_key| change_key.encode()),
        }
    }

    pub fn with_addressing(&self, addressing: Addressing) -> Self {
        ItemIdentifier {
            location: self.location.clone(),
            object_id: self.object_id,
            change_key: self.change_key,
            addressing,
        }
    }
}

impl FolderIdentifier {
    pub fn encode(&self) -> String {
        let mut store_id = Vec::with_capacity(8);
        store_id.push(OBJECT_KIND_FOLDER);
        self.folder_id.to_leb128_bytes(&mut store_id);

        Envelope {
            storage_type: self.storage_type,
            moniker: self.moniker.clone(),
            instruction: ProcessingInstruction::Normal,
            store_id,
        }
        .encode()
    }

    pub fn decode(value: &str) -> Result<Self, IdError> {
        let envelope = Envelope::decode(value)?;
        if envelope.instruction != ProcessingInstruction::Normal {
            return Err(IdError::UnknownProcessingInstruction(
                envelope.instruction as u8,
            ));
        }

        let mut reader = Leb128Reader::new(&envelope.store_id);
        match reader.next_u8().ok_or(IdError::Truncated)? {
            OBJECT_KIND_FOLDER => (),
            kind => return Err(IdError::InvalidObjectKind(kind)),
        }
        let folder_id = reader.next_leb128::<u32>().ok_or(IdError::Truncated)?;
        if !reader.is_eof() {
            return Err(IdError::TrailingBytes);
        }

        Ok(FolderIdentifier {
            storage_type: envelope.storage_type,
            moniker: envelope.moniker,
            folder_id,
        })
    }

    pub fn to_folder_id(&self) -> FolderId {
        FolderId {
            id: self.encode(),
            change_key: None,
        }
    }
}
