/*!
# linecsv scheme

Reads and writes named CSV records over line-oriented storage.

A [`CsvScheme`] holds the validated [`CsvConfig`] and the resolved
[`FieldSchema`]. Per task it hands out:

- [`CsvRecordReader`]: raw lines → [`Record`]s, with header skipping and the
  strict/lenient policy for malformed or mismatched lines.
- [`CsvRecordWriter`]: [`Record`]s → raw lines, with an optional header row.

Storage stays behind small traits: [`LineTap`] and [`LineSource`] on the read
side, [`LineSink`] on the write side, and [`Diagnostics`] for the count of
dropped records.

## Usage

```rust
use linecsv_scheme::{CsvConfig, CsvScheme, MemoryTap, RecordSink, RecordSource, SchemeResult};

fn example() -> SchemeResult<()> {
    let tap = MemoryTap::from_lines(["id,product,descr", r#"1,"Widget, Deluxe","A fine widget""#]);
    let scheme = CsvScheme::new(CsvConfig::with_header())?;

    let mut reader = scheme.reader(&tap)?;
    let schema = reader.resolve_fields()?;

    let mut writer = scheme.writer(Vec::<Vec<u8>>::new());
    writer.begin_write(&schema)?;
    while let Some(record) = reader.read_next()? {
        writer.write(&record)?;
    }

    let lines = writer.finish()?;
    assert_eq!(lines.len(), 2);
    Ok(())
}
# example().unwrap();
```
*/

pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod reader;
pub mod record;
pub mod schema;
pub mod scheme;
pub mod sink;
pub mod tap;
pub mod writer;

pub use config::{CsvConfig, Fields};
pub use diagnostics::{Counters, Diagnostics, COUNTER_GROUP, INVALID_RECORDS};
pub use errors::{SchemeError, SchemeResult};
pub use reader::{CsvRecordReader, ReadState, ReadStats};
pub use record::{Record, RecordSink, RecordSource};
pub use schema::FieldSchema;
pub use scheme::CsvScheme;
pub use sink::{LineSink, WriterLineSink};
pub use tap::{BufReadLineSource, FileLineSource, FileTap, LineSource, LineTap, MemoryLineSource, MemoryTap};
pub use writer::CsvRecordWriter;

// Re-export the codec for convenience
pub use linecsv_codec::{self as codec, Charset, CodecError, CsvFormat};
