use std::collections::HashMap;

use crate::tree::HuffmanNode;

/// Forward and reverse code mappings derived from a Huffman tree.
///
/// The two maps are exact inverses, built together from root-to-leaf paths
/// ('0' descending left, '1' descending right). The tree structure makes
/// the codes prefix-free. A bare-leaf root (single-symbol alphabet) has an
/// empty root-to-leaf path, which would produce an undecodable empty code;
/// it is assigned the fixed code `"0"` instead.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    forward: HashMap<char, String>,
    reverse: HashMap<String, char>,
    max_code_len: usize,
}

impl CodeTable {
    /// Build the code table for a tree via an explicit-stack depth-first
    /// traversal. A stack rather than recursion keeps pathologically skewed
    /// trees (one long spine) from exhausting the call stack.
    pub fn from_tree(root: &HuffmanNode) -> Self {
        let mut table = CodeTable::default();

        if let HuffmanNode::Leaf { symbol, .. } = root {
            table.insert(*symbol, "0".to_string());
            return table;
        }

        let mut stack: Vec<(&HuffmanNode, String)> = vec![(root, String::new())];
        while let Some((node, prefix)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    table.insert(*symbol, prefix);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut left_prefix = prefix.clone();
                    left_prefix.push('0');
                    let mut right_prefix = prefix;
                    right_prefix.push('1');
                    stack.push((right, right_prefix));
                    stack.push((left, left_prefix));
                }
            }
        }
        table
    }

    fn insert(&mut self, symbol: char, code: String) {
        self.max_code_len = self.max_code_len.max(code.len());
        self.reverse.insert(code.clone(), symbol);
        self.forward.insert(symbol, code);
    }

    /// The code assigned to `symbol`, if any.
    pub fn code(&self, symbol: char) -> Option<&str> {
        self.forward.get(&symbol).map(String::as_str)
    }

    /// The symbol a complete code word maps to, if any.
    pub fn symbol(&self, code: &str) -> Option<char> {
        self.reverse.get(code).copied()
    }

    /// Length in bits of the longest code word. A decoder accumulating more
    /// bits than this without a match is reading a corrupt stream.
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the table holds no codes.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate over (symbol, code) pairs in unspecified order.
    pub fn codes(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.forward.iter().map(|(&sym, code)| (sym, code.as_str()))
    }
}
