use clap::Args;
use linecsv_scheme::{CsvConfig, Fields};
use std::fs::File;
use std::path::PathBuf;

use crate::error::{CliError, CliResult};

/// Options describing one side (input or output) of a command.
#[derive(Args, Debug, Clone, Default)]
pub struct DialectArgs {
    /// YAML file with scheme options; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field separator (`tab` and `\t` are accepted)
    #[arg(long, value_parser = parse_char)]
    pub separator: Option<char>,

    /// Quote character
    #[arg(long, value_parser = parse_char)]
    pub quote: Option<char>,

    /// Escape character
    #[arg(long, value_parser = parse_char)]
    pub escape: Option<char>,

    /// Comma separated field names; the input then has no header row unless --header is given
    #[arg(long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// The first line of every file is a header row
    #[arg(long)]
    pub header: bool,

    /// Fail on the first malformed record instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Character encoding of the lines
    #[arg(long)]
    pub encoding: Option<String>,
}

impl DialectArgs {
    pub fn to_config(&self) -> CliResult<CsvConfig> {
        let mut config = match &self.config {
            Some(path) => serde_yaml::from_reader(File::open(path)?)?,
            None => CsvConfig::with_header(),
        };

        if let Some(names) = &self.fields {
            config.fields = Fields::Named(names.clone());
            config.has_header = false;
        }
        if self.header {
            config.has_header = true;
        }
        if self.strict {
            config.strict = true;
        }
        if let Some(separator) = self.separator {
            config.format.separator = separator;
        }
        if let Some(quote) = self.quote {
            config.format.quote = quote;
        }
        if let Some(escape) = self.escape {
            config.format.escape = escape;
        }
        if let Some(encoding) = &self.encoding {
            config.encoding = encoding.clone();
        }

        Ok(config)
    }
}

/// Output side overrides for `convert`; anything unset is taken from the input.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// YAML file with output scheme options, used instead of the input's
    #[arg(long)]
    pub output_config: Option<PathBuf>,

    #[arg(long, value_parser = parse_char)]
    pub output_separator: Option<char>,

    #[arg(long, value_parser = parse_char)]
    pub output_quote: Option<char>,

    #[arg(long, value_parser = parse_char)]
    pub output_escape: Option<char>,

    /// Do not write a header row
    #[arg(long)]
    pub output_no_header: bool,

    #[arg(long)]
    pub output_encoding: Option<String>,
}

impl OutputArgs {
    pub fn to_config(&self, input: &CsvConfig) -> CliResult<CsvConfig> {
        let mut config = match &self.output_config {
            Some(path) => serde_yaml::from_reader(File::open(path)?)?,
            None => input.clone(),
        };

        if let Some(separator) = self.output_separator {
            config.format.separator = separator;
        }
        if let Some(quote) = self.output_quote {
            config.format.quote = quote;
        }
        if let Some(escape) = self.output_escape {
            config.format.escape = escape;
        }
        if self.output_no_header {
            config.has_header = false;
        }
        if let Some(encoding) = &self.output_encoding {
            config.encoding = encoding.clone();
        }

        Ok(config)
    }
}

pub fn parse_char(value: &str) -> Result<char, CliError> {
    match value {
        "tab" | "\\t" => return Ok('\t'),
        "space" => return Ok(' '),
        _ => {}
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::InvalidArgument(format!(
            "expected a single character, got {:?}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_char() {
        assert_eq!(parse_char(",").unwrap(), ',');
        assert_eq!(parse_char("tab").unwrap(), '\t');
        assert_eq!(parse_char("\\t").unwrap(), '\t');
        assert_eq!(parse_char("é").unwrap(), 'é');
        assert!(parse_char("").is_err());
        assert!(parse_char("ab").is_err());
    }

    #[test]
    fn test_defaults_read_header() {
        let config = DialectArgs::default().to_config().unwrap();
        assert_eq!(config, CsvConfig::with_header());
    }

    #[test]
    fn test_fields_imply_headerless() {
        let args = DialectArgs {
            fields: Some(vec!["a".to_string(), "b".to_string()]),
            separator: Some(';'),
            strict: true,
            ..Default::default()
        };
        let config = args.to_config().unwrap();
        assert!(!config.has_header);
        assert!(config.strict);
        assert_eq!(config.format.separator, ';');
        assert_eq!(
            config.fields,
            Fields::Named(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_yaml_file_with_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "separator: \"|\"\nencoding: latin1\nstrict: true").unwrap();

        let args = DialectArgs {
            config: Some(file.path().to_path_buf()),
            quote: Some('\''),
            ..Default::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.format.separator, '|');
        assert_eq!(config.format.quote, '\'');
        assert_eq!(config.encoding, "latin1");
        assert!(config.strict);
        assert!(config.has_header);
    }

    #[test]
    fn test_output_inherits_input() {
        let input = CsvConfig::with_fields(["a"]).separator(';');
        let output = OutputArgs {
            output_separator: Some('\t'),
            ..Default::default()
        }
        .to_config(&input)
        .unwrap();
        assert_eq!(output.format.separator, '\t');
        assert_eq!(output.fields, input.fields);
        assert!(!output.has_header);
    }
}
