use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use structure_check::report::render_structure;
use structure_check::{ExitStatus, ExpectedStructure, IoErrorPolicy, OutputFormat, ValidationConfig, validate_structure};

/// Check that the expected project directories and files exist.
///
/// Exits 0 when everything is present, 1 when something is missing and 2
/// when the filesystem could not be inspected.
#[derive(Parser, Debug)]
#[command(name = "structure-check", version, about)]
struct Cli {
    /// Directory to validate instead of the current one
    #[arg(short = 'C', long)]
    root: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Count paths that cannot be checked (e.g. permission denied) as missing
    #[arg(long)]
    treat_io_errors_as_missing: bool,

    /// Print the expected structure and exit
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<ExitStatus> {
    if cli.list {
        render_structure(&ExpectedStructure::default(), out)?;
        return Ok(ExitStatus::Passed);
    }

    let config = ValidationConfig {
        root: cli.root.as_deref(),
        format: cli.format,
        io_policy: if cli.treat_io_errors_as_missing {
            IoErrorPolicy::TreatAsMissing
        } else {
            IoErrorPolicy::Abort
        },
    };

    let status = validate_structure(config, out)?;
    out.flush()?;
    Ok(status)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitStatus::EnvironmentError.into()
        }
    }
}
