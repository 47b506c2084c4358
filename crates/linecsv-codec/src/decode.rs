/*!
# Line decoding

A single forward scan over the characters of one line. The scanner is either
inside or outside a quoted region:

| Outside quotes | Inside quotes |
|---|---|
| `escape` + (`quote` or `escape`) → literal char | same |
| `quote` → open region | `quote` + `quote` → literal quote |
| `separator` → end of field | `quote` → close region |
| anything else → literal | anything else, separators included → literal |

When `escape == quote` the escape rule only applies inside quotes, so `""` at
the start of a field is an empty quoted value rather than a literal quote.

A quote that opens or closes a region still toggles it when it sits in the
middle of a field, but it is kept in the value: `ab"c,d"e` is the single value
`ab"c,d"e`. Only quotes next to a separator or a line boundary are stripped.
*/

use crate::{
    errors::{CodecError, CodecResult},
    format::CsvFormat,
};

/// Split one line into its field values.
///
/// Fields with no characters between two separators (or at either end of the
/// line) decode to the empty string, so an empty line is a single empty field.
pub fn decode(line: &str, format: &CsvFormat) -> CodecResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut opened_at = 0;

    let mut chars = line.chars().enumerate().peekable();
    let mut prev: Option<char> = None;

    while let Some((column, c)) = chars.next() {
        let escapes_next = c == format.escape && (in_quotes || format.escape != format.quote);
        if escapes_next {
            if let Some(&(_, next)) = chars.peek() {
                if next == format.quote || next == format.escape {
                    field.push(next);
                    chars.next();
                    prev = Some(next);
                    continue;
                }
            }
        }

        if c == format.quote {
            if in_quotes && matches!(chars.peek(), Some(&(_, next)) if next == format.quote) {
                // doubled quote inside a quoted region
                field.push(c);
                chars.next();
            } else {
                in_quotes = !in_quotes;
                if in_quotes {
                    opened_at = column;
                }

                let mid_field = prev.is_some_and(|p| p != format.separator)
                    && matches!(chars.peek(), Some(&(_, next)) if next != format.separator);
                if mid_field {
                    field.push(c);
                }
            }
        } else if c == format.separator && !in_quotes {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
        prev = Some(c);
    }

    if in_quotes {
        return Err(CodecError::UnterminatedQuote { column: opened_at });
    }

    fields.push(field);
    Ok(fields)
}

// ================================================================================================
// Tests
// ================================================================================================
