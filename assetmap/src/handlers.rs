use anyhow::{Context, Result, anyhow};
use assetmap_core::corpus::CorpusOptions;
use assetmap_core::report::{ReportFormat, generate_report, save_report};
use assetmap_core::scan::{ScanOptions, ScanOutcome, ScanProgressCallback, execute_scan};
use clap::ArgMatches;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, debug, warn};

/// Report file stem used when no file name is given
pub const DEFAULT_OUTPUT_STEM: &str = "asset-inventory";

/// A scan invocation resolved from the command line
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub source_dir: PathBuf,
    /// Report destination; `None` prints to stdout
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
    pub threads: usize,
    pub corpus: CorpusOptions,
    pub verbose: bool,
}

impl ScanRequest {
    pub fn from_matches(args: &ArgMatches) -> Result<Self> {
        let source_dir = args
            .get_one::<String>("SOURCE_DIR")
            .map(|dir| expand_path(dir))
            .ok_or_else(|| anyhow!("SOURCE_DIR is required"))?;

        let format_name = args
            .get_one::<String>("format")
            .map(String::as_str)
            .unwrap_or("json");
        let format = ReportFormat::from_str(format_name)
            .ok_or_else(|| anyhow!("Unsupported report format '{}'", format_name))?;

        let extensions = parse_extensions(
            args.get_many::<String>("ext")
                .into_iter()
                .flatten()
                .map(String::as_str),
        );

        let mut corpus = CorpusOptions {
            max_depth: args.get_one::<usize>("max-depth").copied(),
            extensions,
            respect_gitignore: !args.get_flag("no-gitignore"),
            ..CorpusOptions::default()
        };
        if let Some(excluded) = args.get_many::<String>("exclude") {
            corpus.excluded_dirs.extend(excluded.cloned());
        }

        let output = resolve_output_path(
            &source_dir,
            args.get_one::<String>("output").map(String::as_str),
            format,
        );

        Ok(Self {
            source_dir,
            output,
            format,
            threads: args.get_one::<usize>("threads").copied().unwrap_or(4),
            corpus,
            verbose: args.get_flag("verbose"),
        })
    }

    pub fn scan_options(&self, show_progress_bars: bool) -> ScanOptions {
        ScanOptions {
            root: self.source_dir.clone(),
            threads: self.threads,
            corpus: self.corpus.clone(),
            show_progress_bars,
        }
    }
}

// Helper functions for the scan handler

/// Expand a leading `~` to the user's home directory
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Flatten `--ext` values: comma separated, leading dots dropped, lowercased,
/// duplicates removed
pub fn parse_extensions<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut extensions: Vec<String> = Vec::new();
    for value in values {
        for ext in value.split(',') {
            let ext = ext.trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
    }
    extensions
}

/// `asset-inventory.<ext>` for the given format
pub fn default_file_name(format: ReportFormat) -> String {
    format!("{}.{}", DEFAULT_OUTPUT_STEM, format.extension())
}

/// Where the report goes: the explicit output (a directory gets the default
/// file name inside it), else the default json file inside the source
/// directory, else stdout (`None`)
pub fn resolve_output_path(
    source_dir: &Path,
    output: Option<&str>,
    format: ReportFormat,
) -> Option<PathBuf> {
    match output {
        Some(path) => {
            let path = expand_path(path);
            if path.is_dir() {
                Some(path.join(default_file_name(format)))
            } else {
                Some(path)
            }
        }
        None if format == ReportFormat::Json => Some(source_dir.join(default_file_name(format))),
        None => None,
    }
}

pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the scan, render the report and deliver it to its destination
pub async fn run_scan(request: &ScanRequest, show_progress: bool) -> Result<ScanOutcome> {
    let progress_callback: Option<ScanProgressCallback> = if show_progress {
        Some(Arc::new(|msg: String| {
            eprintln!("{}", msg.dimmed());
        }))
    } else {
        None
    };

    let outcome = execute_scan(request.scan_options(show_progress), progress_callback)
        .await
        .with_context(|| format!("Failed to scan {}", request.source_dir.display()))?;

    if outcome.inventory.is_empty() {
        warn!(root = %outcome.root.display(), "No endpoints, menus or call sites found");
    }

    let report = generate_report(&outcome, request.format).context("Failed to render report")?;

    match &request.output {
        Some(path) => {
            save_report(&report, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            debug!(path = %path.display(), "Report written");
        }
        None => println!("{}", report.trim_end()),
    }

    Ok(outcome)
}

/// One-line colored summary of a finished scan
pub fn summary_line(outcome: &ScanOutcome, output: Option<&Path>) -> String {
    let summary = outcome.inventory.summary();
    let destination = output
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    format!(
        "{} {} endpoints, {} menus, {} call sites, {} relations ({} high, {} medium) -> {}",
        "✓".green().bold(),
        summary.endpoints.to_string().bright_cyan(),
        summary.menus.to_string().bright_cyan(),
        summary.call_sites.to_string().bright_cyan(),
        summary.relations.to_string().bright_cyan(),
        summary.high_confidence.to_string().green(),
        summary.medium_confidence.to_string().yellow(),
        destination.bold()
    )
}

pub async fn handle_scan(sub_matches: &ArgMatches, quiet: bool) {
    let request = match ScanRequest::from_matches(sub_matches) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(request.verbose);

    // Print scan configuration
    if !quiet {
        eprintln!("\n🔎 Scanning {}", request.source_dir.display());
        eprintln!("Workers: {}", request.threads);
        match request.corpus.max_depth {
            Some(depth) => eprintln!("Max depth: {}", depth),
            None => eprintln!("Max depth: unlimited"),
        }
        if !request.corpus.extensions.is_empty() {
            eprintln!("Extensions: {}", request.corpus.extensions.join(", "));
        }
        eprintln!();
    }

    let outcome = match run_scan(&request, !quiet).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("✗ Scan failed: {:#}", e);
            std::process::exit(1);
        }
    };

    if !quiet {
        eprintln!("\n✓ Scan complete!\n");
    }
    eprintln!("{}", summary_line(&outcome, request.output.as_deref()));
}
