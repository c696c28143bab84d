// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-scanner CLI - audit a page or file for WCAG violations.

use a11y_scanner::fetch::PageFetcher;
use a11y_scanner::report::{generate_report, OutputFormat};
use a11y_scanner::{CheckRegistry, Scanner, Settings};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// WCAG accessibility scanner
#[derive(Parser)]
#[command(name = "a11y-scanner")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a URL and scan it
    Scan {
        /// URL to scan
        url: String,

        /// Settings file (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Check ids to skip (repeatable)
        #[arg(long)]
        ignore: Vec<String>,

        /// Fetch timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Scan a local HTML file
    File {
        /// File to scan
        path: PathBuf,

        /// Check ids to skip (repeatable)
        #[arg(long)]
        ignore: Vec<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the registered checks
    Checks,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("a11y_scanner=debug")
    } else {
        EnvFilter::new("a11y_scanner=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let registry = CheckRegistry::with_builtin_checks();

    match cli.command {
        Commands::Scan {
            url,
            settings,
            ignore,
            timeout,
            format,
            output,
            verbose,
        } => {
            init_logging(verbose);

            let mut settings = match settings {
                Some(path) => Settings::load(&path)?,
                None => Settings::default(),
            };
            settings.ignored_checks.extend(ignore);
            if let Some(secs) = timeout {
                settings.scan_timeout_secs = secs;
            }

            let fetcher = PageFetcher::new(settings.scan_timeout())?;
            let scanner = Scanner::with_settings(&registry, &settings);
            let result = scanner.scan_url(&fetcher, &url)?;

            let report = generate_report(&result, format.into());
            write_output(&report, output.as_deref())?;

            if result.has_critical_issues() {
                std::process::exit(1);
            }
        }

        Commands::File {
            path,
            ignore,
            format,
            output,
            verbose,
        } => {
            init_logging(verbose);

            let html = std::fs::read_to_string(&path)?;
            let scanner = Scanner::new(&registry).ignore_checks(ignore);
            let result = scanner.scan(&path.display().to_string(), &html);

            let report = generate_report(&result, format.into());
            write_output(&report, output.as_deref())?;

            if result.has_critical_issues() {
                std::process::exit(1);
            }
        }

        Commands::Checks => {
            for check in registry.checks_at_level(a11y_scanner::WcagLevel::AAA) {
                println!(
                    "{:<22} {:<10} {:<8} {:<12} {:<10} {}",
                    check.id(),
                    check.wcag(),
                    check.level(),
                    check.severity(),
                    check.category(),
                    check.name()
                );
            }
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&std::path::Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{content}");
        }
    }
    Ok(())
}
