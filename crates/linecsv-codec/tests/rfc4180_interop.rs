//! Lines produced by the codec must be readable by a standard CSV reader when
//! the dialect is RFC 4180 compatible, and vice versa.

use linecsv_codec::{decode, encode, CsvFormat};

fn rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["id", "product", "descr"],
        vec!["1", "Widget, Deluxe", "A fine widget"],
        vec!["2", "12\" ruler", "says \"hello\""],
        vec!["3", "", "trailing empty"],
        vec!["4", "semi;colon", "multi\nline"],
    ]
}

#[test]
fn test_encoded_lines_parse_with_csv_crate() {
    let format = CsvFormat::new(',', '"', '"');

    let mut data = String::new();
    for row in rows() {
        data.push_str(&encode(&row, &format));
        data.push('\n');
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(data.as_bytes());

    let parsed: Vec<Vec<String>> = rdr
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect();

    assert_eq!(parsed, rows());
}

#[test]
fn test_backslash_escaped_csv_crate_output_decodes() {
    let mut wtr = csv::WriterBuilder::new()
        .double_quote(false)
        .escape(b'\\')
        .from_writer(vec![]);
    for row in rows() {
        wtr.write_record(&row).unwrap();
    }
    let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

    // the multi-line value is the only one spanning physical lines; skip it
    let format = CsvFormat::default();
    let decoded: Vec<Vec<String>> = data
        .lines()
        .take(4)
        .map(|line| decode(line, &format).unwrap())
        .collect();

    assert_eq!(decoded, rows()[..4].to_vec());
}
