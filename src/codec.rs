//! Compression facade and the persisted compressed layout.
//!
//! Byte layout, in order:
//! 1. `u32` big-endian length of the serialized tree, then the tree in its
//!    pre-order form (see [`crate::tree::serialize_tree`]). Embedding the
//!    tree makes the output self-describing: a standalone decoder rebuilds
//!    the reverse code table from it.
//! 2. One pad-count byte, `0..=7`.
//! 3. Data bits followed by that many zero bits, packed MSB-first.
//!
//! Empty input compresses to an empty byte vector, and an empty byte
//! vector decompresses to the empty string.
//!
//! Each call builds its own tree and tables; nothing is shared between
//! calls.

use bitvec::prelude::*;
use log::debug;

use crate::bits::{encode_text, pack_with_padding, unpack_and_strip};
use crate::code_table::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::build_frequency_table;
use crate::tree::{build_huffman_tree, deserialize_tree, serialize_tree};

/// Compress `input` into the self-describing byte layout above.
pub fn compress(input: &str) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let freq = build_frequency_table(input);
    let tree = build_huffman_tree(&freq).ok_or(Error::EmptyInput)?;
    let table = CodeTable::from_tree(&tree);
    let data = encode_text(input, &table)?;

    let tree_bytes = serialize_tree(&tree);
    let payload = pack_with_padding(&data);

    let mut out = Vec::with_capacity(4 + tree_bytes.len() + payload.len());
    out.extend_from_slice(&(tree_bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(&tree_bytes);
    out.extend_from_slice(&payload);

    debug!(
        "compressed {} chars into {} bytes ({} tree, {} payload)",
        input.chars().count(),
        out.len(),
        tree_bytes.len(),
        payload.len()
    );
    Ok(out)
}

/// Decompress bytes produced by [`compress`] back into the original text.
pub fn decompress(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Ok(String::new());
    }
    if bytes.len() < 4 {
        return Err(Error::MalformedHeader(
            "missing tree length prefix".to_string(),
        ));
    }

    let tree_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    let tree_end = 4usize
        .checked_add(tree_len)
        .ok_or_else(|| Error::MalformedHeader("tree length overflows".to_string()))?;
    if bytes.len() < tree_end {
        return Err(Error::MalformedHeader(format!(
            "tree section claims {tree_len} bytes but only {} remain",
            bytes.len() - 4
        )));
    }

    let tree = deserialize_tree(&bytes[4..tree_end])?;
    let table = CodeTable::from_tree(&tree);
    let data = unpack_and_strip(&bytes[tree_end..])?;

    let text = decode_bits(&data, &table)?;
    debug!("decompressed {} bytes into {} chars", bytes.len(), text.chars().count());
    Ok(text)
}

/// Decode a data bit string with a reverse code table: accumulate bits
/// into a candidate code, emit the matched symbol, reset. Fails with
/// `CorruptStream` if the accumulator outgrows the longest code or bits
/// are left over once the stream is exhausted.
pub fn decode_bits(data: &BitSlice<u8, Msb0>, table: &CodeTable) -> Result<String> {
    let mut out = String::new();
    let mut pending = String::new();
    for bit in data {
        pending.push(if *bit { '1' } else { '0' });
        if let Some(symbol) = table.symbol(&pending) {
            out.push(symbol);
            pending.clear();
        } else if pending.len() >= table.max_code_len() {
            return Err(Error::CorruptStream(format!(
                "bit sequence {pending:?} matches no code"
            )));
        }
    }
    if !pending.is_empty() {
        return Err(Error::CorruptStream(format!(
            "{} unmatched bits at end of stream",
            pending.len()
        )));
    }
    Ok(out)
}
