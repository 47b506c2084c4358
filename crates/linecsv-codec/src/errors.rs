use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Un-terminated quoted field opened at column {column}")]
    UnterminatedQuote { column: usize },

    #[error("Malformed byte sequence for encoding {encoding}")]
    MalformedBytes { encoding: &'static str },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Encoding {0} cannot be used for line-oriented text")]
    UnsupportedEncoding(&'static str),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
