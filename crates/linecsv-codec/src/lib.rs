/*!
# linecsv codec

Stateless translation between **one** line of delimited text and an ordered
list of field values.

The codec knows nothing about files, headers or records. It is parameterized by
a [`CsvFormat`] (separator, quote and escape characters) and is safe to call from
any number of threads at once.

## Dialect

- A field may be unquoted, fully quoted, or contain quotes escaped with the
  escape character (`\"`) or doubled inside a quoted region (`""`).
- An escape character followed by another escape character stands for one
  literal escape character.
- Quotes are stripped from decoded values.
- An unclosed quoted region is an error; a logical record never spans lines.

## Usage

```rust
use linecsv_codec::{decode, encode, CsvFormat};

let format = CsvFormat::default();
let fields = decode(r#"1,"Widget, Deluxe","A fine widget""#, &format).unwrap();
assert_eq!(fields, vec!["1", "Widget, Deluxe", "A fine widget"]);

let line = encode(&fields, &format);
assert_eq!(line, r#"1,"Widget, Deluxe",A fine widget"#);
```
*/

pub mod charset;
pub mod decode;
pub mod encode;
pub mod errors;
pub mod format;

pub use charset::{Charset, DEFAULT_ENCODING};
pub use decode::decode;
pub use encode::{encode, encode_into};
pub use errors::{CodecError, CodecResult};
pub use format::{CsvFormat, DEFAULT_ESCAPE, DEFAULT_QUOTE, DEFAULT_SEPARATOR};
