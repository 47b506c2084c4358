use serde::{Deserialize, Serialize};

use crate::errors::{CodecError, CodecResult};

pub const DEFAULT_SEPARATOR: char = ',';
pub const DEFAULT_QUOTE: char = '"';
pub const DEFAULT_ESCAPE: char = '\\';

/// The three characters that define a delimited-text dialect.
///
/// `escape` may equal `quote`, which gives RFC 4180 style doubled quotes on
/// output. `separator` must differ from both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvFormat {
    /// Field delimiter.
    pub separator: char,

    /// Wraps fields that contain the separator, the quote or a line break.
    pub quote: char,

    /// Placed before a quote (or itself) to make it literal.
    pub escape: char,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            quote: DEFAULT_QUOTE,
            escape: DEFAULT_ESCAPE,
        }
    }
}

impl CsvFormat {
    pub fn new(separator: char, quote: char, escape: char) -> Self {
        Self {
            separator,
            quote,
            escape,
        }
    }

    /// Tab separated, otherwise default quoting.
    pub fn tsv() -> Self {
        Self {
            separator: '\t',
            ..Default::default()
        }
    }

    pub fn validate(&self) -> CodecResult<()> {
        for (name, c) in [
            ("separator", self.separator),
            ("quote", self.quote),
            ("escape", self.escape),
        ] {
            if c == '\n' || c == '\r' {
                return Err(CodecError::InvalidFormat(format!(
                    "{} cannot be a line terminator",
                    name
                )));
            }
        }

        if self.separator == self.quote {
            return Err(CodecError::InvalidFormat(format!(
                "separator and quote are both '{}'",
                self.separator
            )));
        }

        if self.separator == self.escape {
            return Err(CodecError::InvalidFormat(format!(
                "separator and escape are both '{}'",
                self.separator
            )));
        }

        Ok(())
    }

    /// True when a field has to be wrapped in quotes to survive a round trip.
    pub(crate) fn needs_quotes(&self, field: &str) -> bool {
        field
            .chars()
            .any(|c| c == self.separator || c == self.quote || c == '\n' || c == '\r')
    }
}
