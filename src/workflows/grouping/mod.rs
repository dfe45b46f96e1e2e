mod address;
mod loader;
mod mapping;
mod normalizer;
mod transliteration;

pub use address::{split_address, AddressError, AddressParts};
pub use loader::{
    load_records, load_records_from_path, LoaderError, Record, RecordColumns, RecordFormat,
};
pub use normalizer::{
    compute_key, normalize_city, normalize_country, normalize_street, unify_bulgarian_street,
    Country, NormalizeError,
};
pub use transliteration::{transliterate_char, transliterate_word};

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// What to do with a record whose address cannot be turned into a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRecordPolicy {
    /// Abort the whole batch on the first bad record.
    #[default]
    FailFast,
    /// Log the record and leave it out of the output.
    Skip,
}

impl MalformedRecordPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FailFast => "fail",
            Self::Skip => "skip",
        }
    }
}

impl FromStr for MalformedRecordPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail" | "fail-fast" => Ok(Self::FailFast),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown malformed record policy '{other}' (expected 'fail' or 'skip')"
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GroupingError {
    #[error("input file {} does not exist", .0.display())]
    InputNotFound(PathBuf),
    #[error("output directory {} does not exist", .0.display())]
    OutputDirectoryNotFound(PathBuf),
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("record {record} ({name}) has an unusable address: {source}")]
    Record {
        record: usize,
        name: String,
        source: NormalizeError,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Sorted output lines plus bookkeeping from one grouping pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingReport {
    pub lines: Vec<String>,
    pub grouped: usize,
    pub skipped: usize,
}

/// Groups names by canonical address key. Names within a line and the lines
/// themselves are sorted, so the result does not depend on record order.
pub fn group_records(
    records: &[Record],
    policy: MalformedRecordPolicy,
) -> Result<GroupingReport, GroupingError> {
    let mut people: HashMap<String, Vec<&str>> = HashMap::new();
    let mut skipped = 0;

    for (index, record) in records.iter().enumerate() {
        let key = match compute_key(&record.address) {
            Ok(key) => key,
            Err(source) if policy == MalformedRecordPolicy::Skip => {
                warn!(
                    record = index + 1,
                    name = %record.name,
                    error = %source,
                    "skipping record with unusable address"
                );
                skipped += 1;
                continue;
            }
            Err(source) => {
                return Err(GroupingError::Record {
                    record: index + 1,
                    name: record.name.clone(),
                    source,
                })
            }
        };

        debug!(%key, name = %record.name, "address key derived");
        people.entry(key).or_default().push(record.name.as_str());
    }

    let mut lines: Vec<String> = people
        .into_values()
        .map(|mut names| {
            names.sort_unstable();
            names.join(",")
        })
        .collect();
    lines.sort_unstable();

    Ok(GroupingReport {
        lines,
        grouped: records.len() - skipped,
        skipped,
    })
}

pub fn group_and_sort(records: &[Record]) -> Result<Vec<String>, GroupingError> {
    group_records(records, MalformedRecordPolicy::FailFast).map(|report| report.lines)
}

/// Totals reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub records: usize,
    pub groups: usize,
    pub skipped: usize,
}

/// Reads an input file of people, groups them by address and writes the
/// sorted groups to the output file.
#[derive(Debug, Clone)]
pub struct AddressGrouper {
    input: PathBuf,
    output_file: PathBuf,
    format: RecordFormat,
    columns: RecordColumns,
    policy: MalformedRecordPolicy,
}

impl AddressGrouper {
    pub fn new(
        input: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
    ) -> Result<Self, GroupingError> {
        let input = input.into();
        if !input.exists() {
            return Err(GroupingError::InputNotFound(input));
        }

        let output_file = output_file.into();
        let output_dir = match output_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !output_dir.is_dir() {
            return Err(GroupingError::OutputDirectoryNotFound(output_dir));
        }

        Ok(Self {
            input,
            output_file,
            format: RecordFormat::default(),
            columns: RecordColumns::default(),
            policy: MalformedRecordPolicy::default(),
        })
    }

    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_columns(mut self, columns: RecordColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_policy(mut self, policy: MalformedRecordPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    pub fn run(&self) -> Result<RunSummary, GroupingError> {
        info!(
            input = %self.input.display(),
            format = self.format.label(),
            policy = self.policy.label(),
            "loading records"
        );
        let records = load_records_from_path(&self.input, self.format, &self.columns)?;
        let report = group_records(&records, self.policy)?;
        write_lines(&self.output_file, &report.lines)?;

        let summary = RunSummary {
            output: self.output_file.clone(),
            records: records.len(),
            groups: report.lines.len(),
            skipped: report.skipped,
        };
        info!(
            output = %summary.output.display(),
            records = summary.records,
            groups = summary.groups,
            skipped = summary.skipped,
            "grouped people by address"
        );
        Ok(summary)
    }
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), GroupingError> {
    let to_error = |source| GroupingError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(to_error)?);
    for line in lines {
        writeln!(writer, "{line}").map_err(to_error)?;
    }
    writer.flush().map_err(to_error)
}
