use linecsv_codec::{Charset, CsvFormat, DEFAULT_ENCODING};
use serde::{Deserialize, Serialize};

use crate::errors::{SchemeError, SchemeResult};

/// Field names of a scheme, or the sentinel for "read them from the header row".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<String>>", into = "Option<Vec<String>>")]
pub enum Fields {
    #[default]
    Unknown,
    Named(Vec<String>),
}

impl Fields {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Fields::Unknown)
    }
}

impl From<Option<Vec<String>>> for Fields {
    fn from(names: Option<Vec<String>>) -> Self {
        names.map_or(Fields::Unknown, Fields::Named)
    }
}

impl From<Fields> for Option<Vec<String>> {
    fn from(fields: Fields) -> Self {
        match fields {
            Fields::Unknown => None,
            Fields::Named(names) => Some(names),
        }
    }
}

/// Options of a CSV scheme.
///
/// Two starting points match the two common input shapes:
/// - [`CsvConfig::with_header`] (also the `Default`): field names come from the
///   first line of the input, and a header row is written on output.
/// - [`CsvConfig::with_fields`]: field names are given, no header row either way.
///
/// Deserializing a partial document fills in the `with_header` defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    #[serde(flatten)]
    pub format: CsvFormat,

    /// The first line of every input file is a header row, and output starts with one.
    pub has_header: bool,

    /// Fail on malformed or mismatched records instead of counting and skipping them.
    pub strict: bool,

    /// Character encoding label of the raw lines.
    pub encoding: String,

    pub fields: Fields,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self::with_header()
    }
}

impl CsvConfig {
    /// Comma separated, quoted, backslash escaped input whose first line names the fields.
    pub fn with_header() -> Self {
        Self {
            format: CsvFormat::default(),
            has_header: true,
            strict: false,
            encoding: DEFAULT_ENCODING.to_string(),
            fields: Fields::Unknown,
        }
    }

    /// Comma separated, quoted, backslash escaped input without a header row.
    pub fn with_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            has_header: false,
            fields: Fields::Named(names.into_iter().map(Into::into).collect()),
            ..Self::with_header()
        }
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.format.separator = separator;
        self
    }

    pub fn quote(mut self, quote: char) -> Self {
        self.format.quote = quote;
        self
    }

    pub fn escape(mut self, escape: char) -> Self {
        self.format.escape = escape;
        self
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Check the options and resolve the encoding label.
    pub fn validate(&self) -> SchemeResult<Charset> {
        self.format.validate()?;
        let charset = Charset::for_label(&self.encoding)?;

        match &self.fields {
            Fields::Unknown if !self.has_header => Err(SchemeError::InvalidConfig(
                "fields are unknown and there is no header row to read them from".to_string(),
            )),
            Fields::Named(names) if names.is_empty() => Err(SchemeError::InvalidConfig(
                "at least one field name is required".to_string(),
            )),
            _ => Ok(charset),
        }
    }
}
