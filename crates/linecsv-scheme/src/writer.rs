use linecsv_codec::encode_into;
use tracing::{debug, warn};

use crate::{
    diagnostics::{COUNTER_GROUP, INVALID_RECORDS},
    errors::{SchemeError, SchemeResult},
    record::{Record, RecordSink},
    scheme::CsvScheme,
    schema::FieldSchema,
    sink::LineSink,
};

/// Buffers reused for every record of a write session.
struct WriteSession {
    schema: FieldSchema,
    line: String,
    row: Vec<String>,
}

/// Encodes records into lines and hands them to a [`LineSink`].
pub struct CsvRecordWriter<'a, S> {
    scheme: &'a CsvScheme,
    sink: S,
    session: Option<WriteSession>,
    written: u64,
    invalid_records: u64,
}

impl<'a, S: LineSink> CsvRecordWriter<'a, S> {
    pub(crate) fn new(scheme: &'a CsvScheme, sink: S) -> Self {
        Self {
            scheme,
            sink,
            session: None,
            written: 0,
            invalid_records: 0,
        }
    }

    /// Records written so far, not counting the header row.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn invalid_records(&self) -> u64 {
        self.invalid_records
    }

    /// Flush the sink and hand it back.
    pub fn finish(mut self) -> SchemeResult<S> {
        self.sink.flush()?;
        debug!("Finished writing {} records", self.written);
        Ok(self.sink)
    }

    fn emit<'v>(&mut self, values: impl Iterator<Item = Option<&'v str>>) -> SchemeResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Err(SchemeError::WriterNotStarted);
        };

        for (slot, value) in session.row.iter_mut().zip(values) {
            slot.clear();
            if let Some(value) = value {
                slot.push_str(value);
            }
        }

        encode_into(&session.row, self.scheme.format(), &mut session.line);
        let bytes = self.scheme.charset().encode(&session.line);
        self.sink.write_line(&bytes)
    }
}

impl<S: LineSink> RecordSink for CsvRecordWriter<'_, S> {
    fn begin_write(&mut self, schema: &FieldSchema) -> SchemeResult<()> {
        debug!("Writing records as {}", schema);
        self.session = Some(WriteSession {
            schema: schema.clone(),
            line: String::with_capacity(4 * 1024),
            row: vec![String::new(); schema.len()],
        });

        if self.scheme.config().has_header {
            self.emit(schema.iter().map(Some))?;
        }
        Ok(())
    }

    fn write(&mut self, record: &Record) -> SchemeResult<()> {
        let expected = match &self.session {
            Some(session) => session.schema.len(),
            None => return Err(SchemeError::WriterNotStarted),
        };

        if record.len() != expected {
            let err = SchemeError::FieldCountMismatch {
                position: self.written,
                expected,
                actual: record.len(),
            };
            if self.scheme.config().strict {
                return Err(err);
            }
            warn!("Skipping invalid record {:?}: {}", record, err);
            self.scheme
                .diagnostics()
                .increment(COUNTER_GROUP, INVALID_RECORDS, 1);
            self.invalid_records += 1;
            return Ok(());
        }

        self.emit(record.values().iter().map(Option::as_deref))?;
        self.written += 1;
        Ok(())
    }
}

// ================================================================================================
// Tests
// ================================================================================================
