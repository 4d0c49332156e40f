use thiserror::Error as ThisError;

/// Errors produced by the Huffman codec and the file driver.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Nothing to compress. `compress` itself maps empty input to empty
    /// output; this variant is reported by lower-level stages that cannot
    /// operate on an empty alphabet.
    #[error("empty input: nothing to compress")]
    EmptyInput,

    /// Encode-time: a symbol has no entry in the code table. Cannot occur
    /// when the table was derived from the same input.
    #[error("symbol {0:?} has no entry in the code table")]
    UnknownSymbol(char),

    /// Decode-time: the serialized tree or the pad-count header is invalid.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// Decode-time: the bit stream does not resolve to a whole number of
    /// code words, or a bit sequence matches no code.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// An underlying file operation failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
