/*!
# Read path

[`CsvRecordReader`] turns raw lines into [`Record`]s:

```text
Uninitialized ──resolve fields──▶ HeaderResolved ──first line──▶ Streaming ──end of input──▶ Exhausted
```

Per line: skip the header row (position 0), decode the bytes with the
configured charset, split the text with the codec, turn empty values into
nulls, and check the width against the schema. A line that fails any step is
an error in strict mode; otherwise it is logged, counted under
[`INVALID_RECORDS`] and skipped.
*/

use linecsv_codec::decode;
use tracing::{debug, warn};

use crate::{
    diagnostics::{COUNTER_GROUP, INVALID_RECORDS},
    errors::{SchemeError, SchemeResult},
    record::{Record, RecordSource},
    scheme::CsvScheme,
    schema::FieldSchema,
    tap::{LineSource, LineTap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    Uninitialized,
    HeaderResolved,
    Streaming,
    Exhausted,
}

/// Counts kept by one reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub records: u64,
    pub header_lines: u64,
    pub invalid_records: u64,
}

pub struct CsvRecordReader<'a> {
    scheme: &'a CsvScheme,
    tap: &'a dyn LineTap,
    source: Box<dyn LineSource>,
    state: ReadState,
    schema: Option<FieldSchema>,
    line: Vec<u8>,
    stats: ReadStats,
}

impl<'a> CsvRecordReader<'a> {
    pub(crate) fn new(
        scheme: &'a CsvScheme,
        tap: &'a dyn LineTap,
        source: Box<dyn LineSource>,
    ) -> Self {
        Self {
            scheme,
            tap,
            source,
            state: ReadState::Uninitialized,
            schema: None,
            line: Vec::with_capacity(1024),
            stats: ReadStats::default(),
        }
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    pub fn stats(&self) -> ReadStats {
        self.stats
    }

    fn next_record(&mut self) -> SchemeResult<Option<Record>> {
        let has_header = self.scheme.config().has_header;
        let strict = self.scheme.config().strict;

        loop {
            let Some(position) = self.source.read_line(&mut self.line)? else {
                debug!(
                    "Exhausted {} after {} records",
                    self.tap.identifier(),
                    self.stats.records
                );
                self.state = ReadState::Exhausted;
                return Ok(None);
            };

            if has_header && position == 0 {
                self.stats.header_lines += 1;
                continue;
            }

            match self.parse_line(position) {
                Ok(record) => {
                    self.stats.records += 1;
                    return Ok(Some(record));
                }
                Err(err) if strict => return Err(err),
                Err(err) => {
                    warn!(
                        "Skipping invalid record in {}: {} (line: {:?})",
                        self.tap.identifier(),
                        err,
                        String::from_utf8_lossy(&self.line)
                    );
                    self.scheme
                        .diagnostics()
                        .increment(COUNTER_GROUP, INVALID_RECORDS, 1);
                    self.stats.invalid_records += 1;
                }
            }
        }
    }

    fn parse_line(&self, position: u64) -> SchemeResult<Record> {
        let malformed = |source| SchemeError::MalformedLine { position, source };

        let text = self.scheme.charset().decode(&self.line).map_err(malformed)?;
        let fields = decode(&text, self.scheme.format()).map_err(malformed)?;

        let expected = self.schema.as_ref().map_or(0, FieldSchema::len);
        if fields.len() != expected {
            return Err(SchemeError::FieldCountMismatch {
                position,
                expected,
                actual: fields.len(),
            });
        }

        Ok(Record::from_decoded(fields))
    }
}

impl RecordSource for CsvRecordReader<'_> {
    fn resolve_fields(&mut self) -> SchemeResult<FieldSchema> {
        if let Some(schema) = &self.schema {
            return Ok(schema.clone());
        }

        let schema = self.scheme.resolve_fields(self.tap)?;
        self.schema = Some(schema.clone());
        if self.state == ReadState::Uninitialized {
            self.state = ReadState::HeaderResolved;
        }
        Ok(schema)
    }

    fn read_next(&mut self) -> SchemeResult<Option<Record>> {
        loop {
            match self.state {
                ReadState::Uninitialized => {
                    self.resolve_fields()?;
                }
                ReadState::HeaderResolved => {
                    let schema = self.resolve_fields()?;
                    debug!("Reading {} as {}", self.tap.identifier(), schema);
                    self.state = ReadState::Streaming;
                }
                ReadState::Streaming => return self.next_record(),
                ReadState::Exhausted => return Ok(None),
            }
        }
    }
}

impl Iterator for CsvRecordReader<'_> {
    type Item = SchemeResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
