use std::sync::{Arc, Mutex, PoisonError};

use linecsv_codec::{decode, Charset, CsvFormat};
use tracing::debug;

use crate::{
    config::{CsvConfig, Fields},
    diagnostics::{Counters, Diagnostics},
    errors::{SchemeError, SchemeResult},
    reader::CsvRecordReader,
    schema::FieldSchema,
    sink::LineSink,
    tap::{LineSource, LineTap},
    writer::CsvRecordWriter,
};

/// A validated CSV configuration plus the field names resolved for it.
///
/// One scheme is shared by every reader and writer of a job. Header
/// resolution happens at most once per scheme, even with concurrent callers;
/// readers and writers are per task and not shared.
pub struct CsvScheme {
    config: CsvConfig,
    charset: Charset,
    fields: Mutex<Option<FieldSchema>>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl CsvScheme {
    /// Build a scheme that reports to its own in-memory [`Counters`].
    pub fn new(config: CsvConfig) -> SchemeResult<Self> {
        Self::with_diagnostics(config, Arc::new(Counters::default()))
    }

    pub fn with_diagnostics(
        config: CsvConfig,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> SchemeResult<Self> {
        let charset = config.validate()?;
        let fields = match &config.fields {
            Fields::Named(names) => Some(FieldSchema::new(names.iter().cloned())),
            Fields::Unknown => None,
        };

        Ok(Self {
            config,
            charset,
            fields: Mutex::new(fields),
            diagnostics,
        })
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    pub fn format(&self) -> &CsvFormat {
        &self.config.format
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// The field names, from the configuration or from the header row of
    /// `tap`'s representative source.
    ///
    /// The first successful call caches the result; later calls return the
    /// same [`FieldSchema`] without touching `tap`.
    pub fn resolve_fields(&self, tap: &dyn LineTap) -> SchemeResult<FieldSchema> {
        let mut fields = self.fields.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(schema) = fields.as_ref() {
            return Ok(schema.clone());
        }

        let schema = self.read_header(tap)?;
        debug!("Resolved fields {} from {}", schema, tap.identifier());
        *fields = Some(schema.clone());
        Ok(schema)
    }

    /// The field names if they are already known.
    pub fn fields(&self) -> Option<FieldSchema> {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn read_header(&self, tap: &dyn LineTap) -> SchemeResult<FieldSchema> {
        let failed = |reason: String| {
            SchemeError::HeaderResolution(format!("{}: {}", tap.identifier(), reason))
        };

        let mut source = tap
            .open_representative()
            .map_err(|e| failed(e.to_string()))?;

        let mut line = Vec::new();
        if source
            .read_line(&mut line)
            .map_err(|e| failed(e.to_string()))?
            .is_none()
        {
            return Err(failed("no header line".to_string()));
        }

        let text = self
            .charset
            .decode(&line)
            .map_err(|e| failed(e.to_string()))?;
        let names = decode(&text, self.format()).map_err(|e| failed(e.to_string()))?;

        Ok(FieldSchema::new(names))
    }

    /// A reader over all of `tap`'s input.
    pub fn reader<'a>(&'a self, tap: &'a dyn LineTap) -> SchemeResult<CsvRecordReader<'a>> {
        Ok(CsvRecordReader::new(self, tap, tap.open_all()?))
    }

    /// A reader over one split of `tap`'s input. `tap` is only consulted for
    /// header resolution.
    pub fn split_reader<'a>(
        &'a self,
        tap: &'a dyn LineTap,
        split: Box<dyn LineSource>,
    ) -> CsvRecordReader<'a> {
        CsvRecordReader::new(self, tap, split)
    }

    pub fn writer<S: LineSink>(&self, sink: S) -> CsvRecordWriter<'_, S> {
        CsvRecordWriter::new(self, sink)
    }
}
