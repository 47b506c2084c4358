use crate::{errors::SchemeResult, schema::FieldSchema};

/// One row of field values. `None` is the null value; the text layer cannot
/// tell it apart from an empty string, so both travel as an empty field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    values: Vec<Option<String>>,
}

impl Record {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Build a record from decoded fields, turning empty strings into nulls.
    pub fn from_decoded(fields: Vec<String>) -> Self {
        Self {
            values: fields
                .into_iter()
                .map(|field| if field.is_empty() { None } else { Some(field) })
                .collect(),
        }
    }

    /// Build a record from anything printable.
    pub fn from_values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
        T: ToString,
    {
        Self {
            values: values
                .into_iter()
                .map(|value| value.map(|v| v.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`; `None` for nulls and out of range indexes.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|value| value.as_deref())
    }

    pub fn get_by_name(&self, schema: &FieldSchema, name: &str) -> Option<&str> {
        schema.index_of(name).and_then(|index| self.get(index))
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<String>> {
        self.values
    }
}

impl From<Vec<Option<String>>> for Record {
    fn from(values: Vec<Option<String>>) -> Self {
        Self::new(values)
    }
}

// ================================================================================================
// Record Source & Sink
// ================================================================================================

/// Something records can be read from.
pub trait RecordSource {
    /// The field names of the records; resolving twice returns the same schema.
    fn resolve_fields(&mut self) -> SchemeResult<FieldSchema>;

    /// The next valid record, or `None` once the input is exhausted.
    fn read_next(&mut self) -> SchemeResult<Option<Record>>;
}

/// Something records can be written to.
pub trait RecordSink {
    fn begin_write(&mut self, schema: &FieldSchema) -> SchemeResult<()>;

    fn write(&mut self, record: &Record) -> SchemeResult<()>;
}
