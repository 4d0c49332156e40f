use std::collections::HashMap;

/// Build a frequency table mapping each character in `input` to its number
/// of occurrences. A single pass; an empty input yields an empty table.
///
/// The iteration order of the returned map is unspecified. Nothing
/// downstream may rely on it; tree construction sorts the symbols itself.
pub fn build_frequency_table(input: &str) -> HashMap<char, usize> {
    let mut freq = HashMap::new();
    for ch in input.chars() {
        *freq.entry(ch).or_insert(0) += 1;
    }
    freq
}
