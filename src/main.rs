use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use nbe2ivil::{
    config::Config,
    model::{Addressee, IvilReport, Sender},
    output,
    parser::NbeParser,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "nbe2ivil")]
#[command(
    author,
    version,
    about = "Convert legacy NBE scanner output into an IVIL XML findings document"
)]
struct Cli {
    /// Input file in NBE format
    #[arg(long)]
    infile: PathBuf,

    /// Output file (defaults to the input file with .nbe replaced by .ivil.xml)
    #[arg(long)]
    outfile: Option<PathBuf>,

    /// Name of the scanner that produced the input (e.g. Nessus, OpenVAS, Nikto)
    #[arg(long)]
    scanner: String,

    /// Version of the scanner that produced the input
    #[arg(long)]
    scannerversion: Option<String>,

    /// Timestamp of the scan (YYYYMMDDhhmm or YYYYMMDDhhmmss)
    #[arg(long)]
    timestamp: String,

    /// Workspace the findings are destined for (enables the addressee block)
    #[arg(long)]
    workspace: Option<String>,

    /// Scan name within the workspace (defaults to the workspace name)
    #[arg(long)]
    scan: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run() -> Result<u8> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().unwrap_or_default();

    if !timestamp_is_valid(&cli.timestamp) {
        warn!(
            timestamp = %cli.timestamp,
            "timestamp does not look like YYYYMMDDhhmm[ss]; passing it through unchanged"
        );
    }

    let outfile = cli
        .outfile
        .unwrap_or_else(|| default_outfile(&cli.infile));

    let infile = File::open(&cli.infile)
        .with_context(|| format!("cannot open input file {}", cli.infile.display()))?;

    let parser = NbeParser::new(&cli.scanner);
    let findings = parser
        .parse(BufReader::new(infile))
        .with_context(|| format!("failed reading {}", cli.infile.display()))?;
    debug!(count = findings.len(), "parsed input");

    let sender = Sender {
        scanner: cli.scanner,
        version: cli.scannerversion.or(config.default_scanner_version),
        timestamp: cli.timestamp,
    };
    let addressee = cli.workspace.map(|workspace| {
        let scan = cli.scan.unwrap_or_else(|| workspace.clone());
        Addressee { workspace, scan }
    });

    let report = IvilReport::new(sender, addressee, findings);
    if cli.verbose {
        debug!(report = %serde_json::to_string(&report)?, "assembled report");
    }

    let xml = output::report_to_string(&report, config.pretty)?;
    std::fs::write(&outfile, xml)
        .with_context(|| format!("cannot write output file {}", outfile.display()))?;

    println!(
        "{} findings written to {}",
        report.findings.len(),
        outfile.display()
    );

    Ok(exit_codes::SUCCESS)
}

/// Derive the output filename: a trailing `.nbe` is replaced by
/// `.ivil.xml`, anything else just gets `.ivil.xml` appended.
fn default_outfile(infile: &Path) -> PathBuf {
    let name = infile.to_string_lossy();
    let stem = name.strip_suffix(".nbe").unwrap_or(&name);
    PathBuf::from(format!("{stem}.ivil.xml"))
}

fn timestamp_is_valid(timestamp: &str) -> bool {
    NaiveDateTime::parse_from_str(timestamp, "%Y%m%d%H%M%S").is_ok()
        || NaiveDateTime::parse_from_str(timestamp, "%Y%m%d%H%M").is_ok()
}
