use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const BYTE_ORDER_MARK: char = '\u{feff}';
const DELIMITER: char = ',';

/// One person and the raw address they were listed with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub name: String,
    pub address: String,
}

impl Record {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Header names the input file is expected to carry, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordColumns {
    pub name: String,
    pub address: String,
}

impl Default for RecordColumns {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            address: "Address".to_string(),
        }
    }
}

impl fmt::Display for RecordColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.name, self.address)
    }
}

/// How data lines are split into name and address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordFormat {
    /// Name up to the first comma, everything after it is the address.
    #[default]
    Delimited,
    /// RFC 4180 style rows with quoted address fields.
    Csv,
}

impl RecordFormat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delimited => "delimited",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for RecordFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "delimited" => Ok(Self::Delimited),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "unknown record format '{other}' (expected 'delimited' or 'csv')"
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unexpected header '{found}', expected '{expected}'")]
    UnexpectedHeader { expected: String, found: String },
}

pub fn load_records_from_path<P: AsRef<Path>>(
    path: P,
    format: RecordFormat,
    columns: &RecordColumns,
) -> Result<Vec<Record>, LoaderError> {
    let file = std::fs::File::open(path)?;
    load_records(file, format, columns)
}

pub fn load_records<R: Read>(
    mut reader: R,
    format: RecordFormat,
    columns: &RecordColumns,
) -> Result<Vec<Record>, LoaderError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&text);
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    match format {
        RecordFormat::Delimited => parse_delimited(text, columns),
        RecordFormat::Csv => parse_csv(text, columns),
    }
}

fn parse_delimited(text: &str, columns: &RecordColumns) -> Result<Vec<Record>, LoaderError> {
    let mut lines = text.lines().map(str::trim_end);
    if let Some(header) = lines.next() {
        check_header(header.split(DELIMITER), columns)?;
    }

    let mut records = Vec::new();
    for line in lines.filter(|line| !line.is_empty()) {
        let (name, address) = line.split_once(DELIMITER).unwrap_or((line, ""));
        records.push(Record::new(name, address.replace('"', "")));
    }

    Ok(records)
}

fn parse_csv(text: &str, columns: &RecordColumns) -> Result<Vec<Record>, LoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    check_header(csv_reader.headers()?.iter(), columns)?;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let record: Record = row?.deserialize(None)?;
        records.push(record);
    }

    Ok(records)
}

fn check_header<'a>(
    fields: impl Iterator<Item = &'a str>,
    columns: &RecordColumns,
) -> Result<(), LoaderError> {
    let found: Vec<&str> = fields.map(str::trim).collect();
    if found == [columns.name.as_str(), columns.address.as_str()] {
        return Ok(());
    }

    Err(LoaderError::UnexpectedHeader {
        expected: columns.to_string(),
        found: found.join(","),
    })
}
