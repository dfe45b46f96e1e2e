use address_grouper::config::{AppConfig, GroupingConfig};
use address_grouper::error::AppError;
use address_grouper::telemetry;
use address_grouper::workflows::grouping::{
    compute_key, AddressGrouper, MalformedRecordPolicy, RecordFormat,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "address-grouper",
    about = "Given a file of people and their addresses, group the people who live at the same address",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the grouped names for an input file
    Group(GroupArgs),
    /// Print the canonical grouping key of each address
    Key(KeyArgs),
}

#[derive(Args, Debug)]
struct GroupArgs {
    /// Input file containing people and their addresses
    #[arg(short, long)]
    input: PathBuf,
    /// Directory to write the output file to (defaults to the executable's directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output file name (defaults to GROUPER_OUTPUT_FILE, then sorted.csv)
    #[arg(short = 'f', long)]
    output_file_name: Option<String>,
    /// Input layout: `delimited` or `csv`
    #[arg(long, value_parser = parse_record_format)]
    format: Option<RecordFormat>,
    /// Leave out records whose address cannot be normalized instead of failing
    #[arg(long)]
    skip_malformed: bool,
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// Raw addresses, e.g. "ul. Shipka 34, 1000 Sofia, Bulgaria"
    #[arg(required = true)]
    addresses: Vec<String>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Group(args) => run_group(args, config.grouping),
        Command::Key(args) => run_key(args),
    }
}

fn parse_record_format(raw: &str) -> Result<RecordFormat, String> {
    raw.parse()
}

fn run_group(args: GroupArgs, mut config: GroupingConfig) -> Result<(), AppError> {
    let GroupArgs {
        input,
        output,
        output_file_name,
        format,
        skip_malformed,
    } = args;

    if let Some(name) = output_file_name {
        config.output_file_name = name;
    }
    if let Some(format) = format {
        config.record_format = format;
    }
    if skip_malformed {
        config.malformed_policy = MalformedRecordPolicy::Skip;
    }

    let output_dir = match output {
        Some(dir) => dir,
        None => executable_dir()?,
    };
    let output_file = output_dir.join(&config.output_file_name);
    info!(output = %output_file.display(), "output file");

    let summary = AddressGrouper::new(input, output_file)?
        .with_format(config.record_format)
        .with_columns(config.columns)
        .with_policy(config.malformed_policy)
        .run()?;

    println!(
        "Wrote {} group(s) from {} record(s) to {}",
        summary.groups,
        summary.records,
        summary.output.display()
    );
    if summary.skipped > 0 {
        println!("Skipped {} record(s) with unusable addresses", summary.skipped);
    }

    Ok(())
}

fn run_key(args: KeyArgs) -> Result<(), AppError> {
    let mut failed = 0;
    for address in &args.addresses {
        match compute_key(address) {
            Ok(key) => println!("{key}\t{address}"),
            Err(err) => {
                warn!(%address, error = %err, "address could not be normalized");
                eprintln!("{address}: {err}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(AppError::InvalidAddresses { failed });
    }
    Ok(())
}

fn executable_dir() -> Result<PathBuf, AppError> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}
