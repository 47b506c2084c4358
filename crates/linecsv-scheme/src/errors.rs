use linecsv_codec::CodecError;
use thiserror::Error;

pub type SchemeResult<T> = Result<T, SchemeError>;

#[derive(Error, Debug)]
pub enum SchemeError {
    #[error("Malformed line at position {position}: {source}")]
    MalformedLine {
        position: u64,
        #[source]
        source: CodecError,
    },

    #[error("Field count mismatch at position {position}: expected {expected} but got {actual}")]
    FieldCountMismatch {
        position: u64,
        expected: usize,
        actual: usize,
    },

    #[error("Header resolution failed: {0}")]
    HeaderResolution(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("write called before begin_write")]
    WriterNotStarted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemeError {
    /// Errors that lenient mode downgrades to a counted, skipped record.
    pub fn is_invalid_record(&self) -> bool {
        matches!(
            self,
            SchemeError::MalformedLine { .. } | SchemeError::FieldCountMismatch { .. }
        )
    }
}
