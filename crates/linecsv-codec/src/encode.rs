use crate::format::CsvFormat;

/// Join field values into one line.
///
/// The result never ends with a line terminator; framing is up to the caller.
pub fn encode<S: AsRef<str>>(fields: &[S], format: &CsvFormat) -> String {
    let mut line = String::new();
    encode_into(fields, format, &mut line);
    line
}

/// Like [`encode`], but reuses `line` (cleared first) as the output buffer.
pub fn encode_into<S: AsRef<str>>(fields: &[S], format: &CsvFormat, line: &mut String) {
    line.clear();

    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(format.separator);
        }

        let field = field.as_ref();
        let quoted = format.needs_quotes(field);
        if quoted {
            line.push(format.quote);
        }

        for c in field.chars() {
            if c == format.quote || c == format.escape {
                line.push(format.escape);
            }
            line.push(c);
        }

        if quoted {
            line.push(format.quote);
        }
    }
}

// ================================================================================================
// Tests
// ================================================================================================
