//! Bit-level packing for the persisted payload.
//!
//! The payload section of the compressed format is
//! `[1 pad-count byte][data bits][pad zero bits]`, packed 8 bits per byte,
//! most-significant-bit-first. The pad-count byte is always present, even
//! when the data already ends on a byte boundary.

use bitvec::prelude::*;
use bitvec::view::BitView;

use crate::code_table::CodeTable;
use crate::error::{Error, Result};

/// Bit order of the persisted format. MSB-first matches reading each byte
/// left to right as a binary numeral.
pub type BitString = BitVec<u8, Msb0>;

/// Number of zero bits needed to extend a bit string of length `len` to a
/// byte boundary. Always in `0..=7`.
pub fn pad_amount(len: usize) -> usize {
    (8 - len % 8) % 8
}

/// Encode `input` by concatenating each character's code in input order.
/// Fails with `UnknownSymbol` if a character has no entry in the table.
pub fn encode_text(input: &str, table: &CodeTable) -> Result<BitString> {
    let mut bits = BitString::new();
    for ch in input.chars() {
        let code = table.code(ch).ok_or(Error::UnknownSymbol(ch))?;
        for bit in code.chars() {
            bits.push(bit == '1');
        }
    }
    Ok(bits)
}

/// Pack data bits into bytes: one pad-count byte, the data bits, then the
/// pad's zero bits. The result always has `1 + (len + pad) / 8` bytes.
pub fn pack_with_padding(data: &BitSlice<u8, Msb0>) -> Vec<u8> {
    let pad = pad_amount(data.len());
    let mut full = BitString::with_capacity(8 + data.len() + pad);
    full.extend_from_bitslice((pad as u8).view_bits::<Msb0>());
    full.extend_from_bitslice(data);
    for _ in 0..pad {
        full.push(false);
    }
    full.into_vec()
}

/// Unpack bytes back into the exact data bit string: read the pad count
/// from the first byte and strip that many trailing bits.
pub fn unpack_and_strip(bytes: &[u8]) -> Result<BitString> {
    let Some((&pad_byte, rest)) = bytes.split_first() else {
        return Err(Error::MalformedHeader(
            "missing pad-count byte".to_string(),
        ));
    };
    let pad = pad_byte as usize;
    if pad > 7 {
        return Err(Error::MalformedHeader(format!(
            "pad count {pad} out of range 0..=7"
        )));
    }
    let mut bits = BitString::from_slice(rest);
    if bits.len() < pad {
        return Err(Error::MalformedHeader(format!(
            "{} data bits cannot hold {pad} padding bits",
            bits.len()
        )));
    }
    bits.truncate(bits.len() - pad);
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::build_frequency_table;
    use crate::tree::build_huffman_tree;

    fn table_for(input: &str) -> CodeTable {
        let freq = build_frequency_table(input);
        let tree = build_huffman_tree(&freq).expect("tree should be built");
        CodeTable::from_tree(&tree)
    }

    #[test]
    fn test_pad_amount_byte_aligns_every_length() {
        for len in 0..64 {
            let pad = pad_amount(len);
            assert!(pad <= 7);
            assert_eq!((len + pad) % 8, 0, "len {len} pad {pad}");
        }
    }

    #[test]
    fn test_encode_concatenates_codes_in_order() {
        let table = table_for("abcd");
        let bits = encode_text("dcba", &table).expect("all symbols known");
        // Codes are a=00 b=01 c=10 d=11 under the deterministic tie-break.
        let rendered: String = bits.iter().map(|b| if *b { '1' } else { '0' }).collect();
        assert_eq!(rendered, "11100100");
    }

    #[test]
    fn test_encode_rejects_unknown_symbol() {
        let table = table_for("abc");
        let err = encode_text("abd", &table).unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol('d')));
    }

    #[test]
    fn test_pack_unpack_round_trip() {
        let table = table_for("compression ratio");
        for input in ["c", "co", "compression", "compression ratio"] {
            let bits = encode_text(input, &table).expect("all symbols known");
            let bytes = pack_with_padding(&bits);
            assert_eq!(bytes.len(), 1 + (bits.len() + pad_amount(bits.len())) / 8);
            let restored = unpack_and_strip(&bytes).expect("well-formed payload");
            assert_eq!(restored, bits);
        }
    }

    #[test]
    fn test_pack_zero_pad_still_writes_header_byte() {
        let mut bits = BitString::new();
        for i in 0..16 {
            bits.push(i % 3 == 0);
        }
        let bytes = pack_with_padding(&bits);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes.len(), 3);
    }

    #[test]
    fn test_unpack_rejects_empty_payload() {
        let err = unpack_and_strip(&[]).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
    }

    #[test]
    fn test_unpack_rejects_pad_count_out_of_range() {
        let err = unpack_and_strip(&[8, 0xff]).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
    }

    #[test]
    fn test_unpack_rejects_pad_exceeding_data() {
        // Pad count 4 but no data bits at all after the header byte.
        let err = unpack_and_strip(&[4]).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
    }
}
