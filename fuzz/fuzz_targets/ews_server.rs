#![no_main]
use ews::id::{
    compression::{decompress, MAX_DECOMPRESSED_LEN},
    ChangeKey, FolderIdentifier, ItemIdentifier,
};
use libfuzzer_sys::fuzz_target;
use store::serialize::leb128::Leb128Reader;

static BASE64_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

fuzz_target!(|data: &[u8]| {
    // Leb128 decoding
    let mut reader = Leb128Reader::new(data);
    while reader.next_leb128::<u64>().is_some() {}
    Leb128Reader::new(data).next_zigzag();

    // Run-length decompression
    decompress(data, MAX_DECOMPRESSED_LEN).ok();

    // Identifiers and change keys
    let str_data = String::from_utf8_lossy(data);
    let base64_data = String::from_utf8(into_alphabet(data, BASE64_ALPHABET)).unwrap();
    for value in [str_data.as_ref(), base64_data.as_str()] {
        if let Ok(identifier) = ItemIdentifier::decode(value) {
            assert_eq!(ItemIdentifier::decode(&identifier.encode()).ok(), Some(identifier));
        }
        if let Ok(identifier) = FolderIdentifier::decode(value) {
            assert_eq!(FolderIdentifier::decode(&identifier.encode()).ok(), Some(identifier));
        }
        ChangeKey::decode(value).ok();
    }
});

fn into_alphabet(data: &[u8], alphabet: &[u8]) -> Vec<u8> {
    data.iter()
        .map(|&byte| alphabet[byte as usize % alphabet.len()])
        .collect()
}
