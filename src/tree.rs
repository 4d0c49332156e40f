use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{Error, Result};

/// Pre-order marker for an internal node in the serialized tree.
const INTERNAL_MARKER: u8 = 0x00;
/// Pre-order marker for a leaf node, followed by a 4-byte Unicode scalar.
const LEAF_MARKER: u8 = 0x01;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node holds a symbol and its frequency.
    Leaf { symbol: char, freq: usize },
    /// An internal node owns its two children; its frequency is the sum
    /// of theirs.
    Internal {
        freq: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the frequency of the node.
    pub fn freq(&self) -> usize {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }
}

/// Heap entry wrapping a node for use in a `BinaryHeap`.
///
/// Ordering is reversed so the lowest frequency pops first, with the
/// insertion sequence number as a secondary key. Frequency alone would
/// leave equal-frequency ties to the heap's internal layout, making the
/// tree shape (and thus the exact codes) irreproducible across runs.
#[derive(Debug, Eq, PartialEq)]
struct HeapEntry {
    seq: u64,
    node: Box<HuffmanNode>,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .freq()
            .cmp(&self.node.freq())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the Huffman tree for a frequency table.
/// Returns `None` if the table is empty.
///
/// Leaves are inserted in sorted symbol order and every heap entry carries
/// an insertion sequence number, so construction is fully deterministic
/// regardless of the map's iteration order. A single-symbol table yields a
/// bare leaf; the code table layer assigns it the fixed code `"0"`.
pub fn build_huffman_tree(freq_table: &HashMap<char, usize>) -> Option<Box<HuffmanNode>> {
    if freq_table.is_empty() {
        return None;
    }

    let mut symbols: Vec<char> = freq_table.keys().copied().collect();
    symbols.sort_unstable();

    let mut heap = BinaryHeap::with_capacity(symbols.len());
    let mut seq = 0u64;
    for symbol in symbols {
        heap.push(HeapEntry {
            seq,
            node: Box::new(HuffmanNode::Leaf {
                symbol,
                freq: freq_table[&symbol],
            }),
        });
        seq += 1;
    }

    // Combine the two lowest-frequency nodes until one tree remains.
    while heap.len() > 1 {
        let HeapEntry { node: left, .. } = heap.pop()?;
        let HeapEntry { node: right, .. } = heap.pop()?;
        let internal = Box::new(HuffmanNode::Internal {
            freq: left.freq() + right.freq(),
            left,
            right,
        });
        heap.push(HeapEntry {
            seq,
            node: internal,
        });
        seq += 1;
    }
    heap.pop().map(|entry| entry.node)
}

/// Serialize a tree into its pre-order byte form: `0x01` plus a 4-byte
/// big-endian Unicode scalar for a leaf, `0x00` followed by the left and
/// right subtrees for an internal node. Frequencies are not persisted;
/// decoding does not need them.
pub fn serialize_tree(root: &HuffmanNode) -> Vec<u8> {
    let mut out = Vec::new();
    serialize_into(root, &mut out);
    out
}

fn serialize_into(node: &HuffmanNode, out: &mut Vec<u8>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            out.push(LEAF_MARKER);
            out.extend_from_slice(&u32::from(*symbol).to_be_bytes());
        }
        HuffmanNode::Internal { left, right, .. } => {
            out.push(INTERNAL_MARKER);
            serialize_into(left, out);
            serialize_into(right, out);
        }
    }
}

/// Deserialize a tree from its pre-order byte form. Fails with a
/// `MalformedHeader` error on truncation, unknown markers, invalid scalar
/// values, or trailing bytes after the tree.
pub fn deserialize_tree(bytes: &[u8]) -> Result<Box<HuffmanNode>> {
    let mut pos = 0usize;
    let root = deserialize_at(bytes, &mut pos)?;
    if pos != bytes.len() {
        return Err(Error::MalformedHeader(format!(
            "{} trailing bytes after serialized tree",
            bytes.len() - pos
        )));
    }
    Ok(root)
}

fn deserialize_at(bytes: &[u8], pos: &mut usize) -> Result<Box<HuffmanNode>> {
    let marker = *bytes
        .get(*pos)
        .ok_or_else(|| Error::MalformedHeader("serialized tree truncated".to_string()))?;
    *pos += 1;
    match marker {
        LEAF_MARKER => {
            let end = *pos + 4;
            let raw = bytes
                .get(*pos..end)
                .ok_or_else(|| Error::MalformedHeader("leaf symbol truncated".to_string()))?;
            *pos = end;
            let value = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]);
            let symbol = char::from_u32(value).ok_or_else(|| {
                Error::MalformedHeader(format!("invalid symbol scalar {value:#x}"))
            })?;
            Ok(Box::new(HuffmanNode::Leaf { symbol, freq: 0 }))
        }
        INTERNAL_MARKER => {
            let left = deserialize_at(bytes, pos)?;
            let right = deserialize_at(bytes, pos)?;
            Ok(Box::new(HuffmanNode::Internal {
                freq: 0,
                left,
                right,
            }))
        }
        other => Err(Error::MalformedHeader(format!(
            "unknown tree marker {other:#04x}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::build_frequency_table;

    #[test]
    fn test_empty_table_has_no_tree() {
        assert!(build_huffman_tree(&HashMap::new()).is_none());
    }

    #[test]
    fn test_root_frequency_is_input_length() {
        let input = "this is an example for huffman encoding";
        let freq = build_frequency_table(input);
        let tree = build_huffman_tree(&freq).expect("tree should be built");
        assert_eq!(tree.freq(), input.chars().count());
    }

    #[test]
    fn test_single_symbol_is_bare_leaf() {
        let freq = build_frequency_table("aaaa");
        let tree = build_huffman_tree(&freq).expect("tree should be built");
        assert_eq!(
            *tree,
            HuffmanNode::Leaf {
                symbol: 'a',
                freq: 4
            }
        );
    }

    #[test]
    fn test_equal_frequency_ties_are_deterministic() {
        // Four symbols with identical frequency: the tie-break must fix the
        // shape, so two independent builds serialize identically.
        let freq = build_frequency_table("abcd");
        let a = build_huffman_tree(&freq).expect("tree should be built");
        let b = build_huffman_tree(&freq).expect("tree should be built");
        assert_eq!(serialize_tree(&a), serialize_tree(&b));
    }

    #[test]
    fn test_serialize_round_trip() {
        let freq = build_frequency_table("mississippi river 🌊");
        let tree = build_huffman_tree(&freq).expect("tree should be built");
        let bytes = serialize_tree(&tree);
        let restored = deserialize_tree(&bytes).expect("tree should deserialize");
        // Frequencies are not persisted, so compare shapes via re-serialization.
        assert_eq!(serialize_tree(&restored), bytes);
    }

    #[test]
    fn test_deserialize_rejects_truncation() {
        let freq = build_frequency_table("abracadabra");
        let tree = build_huffman_tree(&freq).expect("tree should be built");
        let bytes = serialize_tree(&tree);
        let err = deserialize_tree(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
    }

    #[test]
    fn test_deserialize_rejects_unknown_marker() {
        let err = deserialize_tree(&[0x7f]).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
    }

    #[test]
    fn test_deserialize_rejects_trailing_bytes() {
        let mut bytes = serialize_tree(&HuffmanNode::Leaf {
            symbol: 'x',
            freq: 1,
        });
        bytes.push(0x01);
        let err = deserialize_tree(&bytes).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
    }
}
