use linecsv_scheme::{CsvScheme, FileTap, RecordSink, RecordSource, WriterLineSink};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{DialectArgs, OutputArgs};
use crate::error::CliResult;

/// What one `convert` run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub records: u64,
    pub invalid_input: u64,
    pub invalid_output: u64,
}

pub fn execute(
    input: PathBuf,
    output: PathBuf,
    dialect: DialectArgs,
    output_args: OutputArgs,
) -> CliResult<()> {
    let summary = convert(&input, &output, &dialect, &output_args)?;

    println!("✅ Converted {} records", summary.records);
    println!("   Input: {}", input.display());
    println!("   Output: {}", output.display());
    if summary.invalid_input + summary.invalid_output > 0 {
        println!(
            "⚠️  Skipped {} invalid input records and {} invalid output records",
            summary.invalid_input, summary.invalid_output
        );
    }
    Ok(())
}

/// Copy every record of `input` into `output`, re-encoding with the output dialect.
pub fn convert(
    input: &Path,
    output: &Path,
    dialect: &DialectArgs,
    output_args: &OutputArgs,
) -> CliResult<ConvertSummary> {
    let input_config = dialect.to_config()?;
    let output_config = output_args.to_config(&input_config)?;

    let source = CsvScheme::new(input_config)?;
    let sink = CsvScheme::new(output_config)?;
    let tap = FileTap::new(input);

    let mut reader = source.reader(&tap)?;
    let fields = reader.resolve_fields()?;
    info!("Converting {} with fields {}", input.display(), fields);

    let mut writer = sink.writer(WriterLineSink::create(output)?);
    writer.begin_write(&fields)?;
    while let Some(record) = reader.read_next()? {
        writer.write(&record)?;
    }

    let summary = ConvertSummary {
        records: writer.written(),
        invalid_input: reader.stats().invalid_records,
        invalid_output: writer.invalid_records(),
    };
    writer.finish()?;

    info!(
        "Wrote {} records to {} ({} input and {} output records skipped)",
        summary.records,
        output.display(),
        summary.invalid_input,
        summary.invalid_output
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use linecsv_scheme::SchemeError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_convert_csv_to_tsv() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.csv");
        let output = tmp.path().join("out.tsv");
        fs::write(
            &input,
            "id,name,note\n1,\"Smith, J\",\n2,Lee,\"says \"\"hi\"\"\"\n",
        )
        .unwrap();

        let output_args = OutputArgs {
            output_separator: Some('\t'),
            ..Default::default()
        };
        let summary = convert(&input, &output, &DialectArgs::default(), &output_args).unwrap();
        assert_eq!(
            summary,
            ConvertSummary {
                records: 2,
                invalid_input: 0,
                invalid_output: 0
            }
        );

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "id\tname\tnote");
        assert_eq!(lines[1], "1\tSmith, J\t");
        assert_eq!(lines[2], "2\tLee\t\"says \\\"hi\\\"\"");
    }

    #[test]
    fn test_convert_skips_bad_rows_when_lenient() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.csv");
        let output = tmp.path().join("out.csv");
        fs::write(&input, "a,b\n1,2\n\"open,3\n4,5,6\n7,8\n").unwrap();

        let summary = convert(
            &input,
            &output,
            &DialectArgs::default(),
            &OutputArgs::default(),
        )
        .unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.invalid_input, 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "a,b\n1,2\n7,8\n");
    }

    #[test]
    fn test_convert_strict_stops_on_bad_row() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.csv");
        let output = tmp.path().join("out.csv");
        fs::write(&input, "a,b\n1,2\n3\n").unwrap();

        let dialect = DialectArgs {
            strict: true,
            ..Default::default()
        };
        let err = convert(&input, &output, &dialect, &OutputArgs::default()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Scheme(SchemeError::FieldCountMismatch {
                position: 2,
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_convert_headerless_with_named_fields() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.psv");
        let output = tmp.path().join("out.csv");
        fs::write(&input, "1|x\n2|y,z\n").unwrap();

        let dialect = DialectArgs {
            separator: Some('|'),
            fields: Some(vec!["id".to_string(), "value".to_string()]),
            ..Default::default()
        };
        let output_args = OutputArgs {
            output_separator: Some(','),
            ..Default::default()
        };
        let summary = convert(&input, &output, &dialect, &output_args).unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "1,x\n2,\"y,z\"\n");
    }

    #[test]
    fn test_convert_missing_input() {
        let tmp = TempDir::new().unwrap();
        let err = convert(
            &tmp.path().join("missing.csv"),
            &tmp.path().join("out.csv"),
            &DialectArgs::default(),
            &OutputArgs::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Scheme(SchemeError::HeaderResolution(_))
        ));
    }
}
