//! Upload pruner - command-line interface
//!
//! Scans a static site export and deletes unreferenced images under
//! `wp-content/uploads`. With no arguments it works on the current directory.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueEnum};
use tracing::{error, info};
use uprune::{
    utils::init_logging, Pipeline, PruneConfig, ReportConfig, ReportFormat, ReportGenerator,
};

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// JSON report (default)
    Json,
    /// YAML report
    Yaml,
    /// Plain text report
    Text,
}

impl From<&OutputFormat> for ReportFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Yaml => ReportFormat::Yaml,
            OutputFormat::Text => ReportFormat::PlainText,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages (default)
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and all messages
    Debug,
    /// Trace and all messages (most verbose)
    Trace,
}

fn main() {
    let matches = build_cli().get_matches();

    let log_level = if matches.get_flag("quiet") {
        "error"
    } else {
        match matches.get_one::<LogLevel>("verbose").unwrap_or(&LogLevel::Warn) {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    };
    init_logging(log_level);

    let config = match build_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let pipeline = Pipeline::new(config);
    let start_time = std::time::Instant::now();

    let report = match pipeline.execute(&mut io::stdout().lock()) {
        Ok(report) => report,
        Err(e) => {
            error!("Pruning failed: {}", e);
            process::exit(1);
        }
    };
    info!("Pipeline finished in {:.2?}", start_time.elapsed());

    if let Some(report_path) = matches.get_one::<PathBuf>("report") {
        let format = matches.get_one::<OutputFormat>("format").unwrap_or(&OutputFormat::Json);
        let report_config = ReportConfig {
            output_path: report_path.clone(),
            format: format.into(),
        };
        let data = report.report_data(pipeline.config());
        if let Err(e) = ReportGenerator::generate(&data, &report_config) {
            error!("Failed to write report: {}", e);
            process::exit(1);
        }
    }
}

fn build_cli() -> Command {
    Command::new("uprune")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Delete images under wp-content/uploads that no exported page references")
        .long_about("Scans the HTML, CSS, JS and XML files of a static site export for src=, href= \
                    and url(...) references, then deletes every image under wp-content/uploads \
                    that none of them point at and removes directories left empty.")

        .arg(Arg::new("root")
            .short('C')
            .long("root")
            .value_name("DIR")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Root of the static export (default: current directory)"))

        .arg(Arg::new("config")
            .short('c')
            .long("config")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Configuration file (JSON/YAML)"))

        .arg(Arg::new("dry-run")
            .long("dry-run")
            .action(ArgAction::SetTrue)
            .help("Print the report without deleting anything"))

        .arg(Arg::new("keep-empty-dirs")
            .long("keep-empty-dirs")
            .action(ArgAction::SetTrue)
            .help("Do not remove directories left empty"))

        .arg(Arg::new("report")
            .short('r')
            .long("report")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Write a report file"))

        .arg(Arg::new("format")
            .short('f')
            .long("format")
            .value_parser(clap::value_parser!(OutputFormat))
            .requires("report")
            .help("Report file format (default: json)"))

        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .value_parser(clap::value_parser!(LogLevel))
            .default_value("warn")
            .help("Set logging verbosity"))

        .arg(Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .help("Suppress all logging except errors"))
}

fn build_config(matches: &ArgMatches) -> uprune::Result<PruneConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => PruneConfig::from_file(path)?,
        None => PruneConfig::default(),
    };

    if let Some(root) = matches.get_one::<PathBuf>("root") {
        config.root = root.clone();
    }
    if matches.get_flag("dry-run") {
        config.dry_run = true;
    }
    if matches.get_flag("keep-empty-dirs") {
        config.remove_empty_dirs = false;
    }
    Ok(config)
}
