use crate::corpus::{CorpusOptions, SourceFile, SourceKind, collect_sources};
use crate::inventory::Inventory;
use assetmap_scanner::error::Result;
use assetmap_scanner::{
    CallSiteRecord, EndpointRecord, MenuRecord, extract_endpoints, extract_frontend,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Options for configuring a scan operation
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub threads: usize,
    pub corpus: CorpusOptions,
    pub show_progress_bars: bool,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            threads: 4,
            corpus: CorpusOptions::default(),
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting scan progress
pub type ScanProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Records extracted from a single file, before any corpus-wide reduction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileExtraction {
    pub endpoints: Vec<EndpointRecord>,
    pub menus: Vec<MenuRecord>,
    pub call_sites: Vec<CallSiteRecord>,
}

/// Result of a completed scan
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub root: PathBuf,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub inventory: Inventory,
}

/// Run the extractor matching `kind` over one file's text.
pub fn scan_text(relative_path: &str, kind: SourceKind, text: &str) -> FileExtraction {
    match kind {
        SourceKind::Backend => FileExtraction {
            endpoints: extract_endpoints(text, relative_path),
            ..FileExtraction::default()
        },
        SourceKind::Frontend => {
            let frontend = extract_frontend(text, relative_path);
            FileExtraction {
                endpoints: Vec::new(),
                menus: frontend.menus,
                call_sites: frontend.call_sites,
            }
        }
    }
}

/// Read and scan one source file; `None` when it cannot be read as text.
pub fn scan_file(source: &SourceFile) -> Option<FileExtraction> {
    let text = source.read_text()?;
    let extraction = scan_text(&source.relative_path, source.kind, &text);
    debug!(
        file = %source.relative_path,
        endpoints = extraction.endpoints.len(),
        menus = extraction.menus.len(),
        call_sites = extraction.call_sites.len(),
        "Scanned file"
    );
    Some(extraction)
}

/// Pool per-file extractions (already in corpus order) and assemble the inventory.
pub fn assemble_inventory(extractions: impl IntoIterator<Item = FileExtraction>) -> Inventory {
    let mut endpoints = Vec::new();
    let mut menus = Vec::new();
    let mut call_sites = Vec::new();

    for extraction in extractions {
        endpoints.extend(extraction.endpoints);
        menus.extend(extraction.menus);
        call_sites.extend(extraction.call_sites);
    }

    Inventory::assemble(endpoints, menus, call_sites)
}

/// Execute a scan with the given options
///
/// Files are split across `threads` blocking workers. Each worker only
/// produces local extractions; they are merged in corpus order once every
/// worker has finished, so the result does not depend on scheduling.
pub async fn execute_scan(
    options: ScanOptions,
    progress_callback: Option<ScanProgressCallback>,
) -> Result<ScanOutcome> {
    let ScanOptions {
        root,
        threads,
        corpus,
        show_progress_bars,
    } = options;
    let threads = threads.max(1);

    info!(root = %root.display(), threads, "Starting scan");

    let walk_root = root.clone();
    let sources = tokio::task::spawn_blocking(move || collect_sources(&walk_root, &corpus)).await??;
    let total_files = sources.len();

    if let Some(ref callback) = progress_callback {
        callback(format!("Collected {} candidate files", total_files));
    }

    // Single progress bar for overall scan progress (only if enabled)
    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new(total_files as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb.set_message("Scanning...");
        Some(pb)
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));
    let files_per_worker = total_files.div_ceil(threads).max(1);
    let indexed: Vec<(usize, SourceFile)> = sources.into_iter().enumerate().collect();

    let mut worker_tasks = Vec::new();
    for (worker_id, chunk) in indexed.chunks(files_per_worker).enumerate() {
        let worker_files = chunk.to_vec();
        let pb = progress_bar.clone();
        let count = processed_count.clone();

        let task = tokio::task::spawn_blocking(move || {
            debug!(worker_id, files = worker_files.len(), "Worker started");
            let mut local = Vec::with_capacity(worker_files.len());
            for (idx, source) in worker_files {
                local.push((idx, scan_file(&source)));
                count.fetch_add(1, Ordering::Relaxed);
                if let Some(ref pb) = pb {
                    pb.inc(1);
                }
            }
            debug!(worker_id, "Worker finished");
            local
        });
        worker_tasks.push(task);
    }

    // Wait for all workers to complete
    let mut results = Vec::with_capacity(total_files);
    for task in worker_tasks {
        results.extend(task.await?);
    }
    results.sort_by_key(|(idx, _)| *idx);

    let files_skipped = results.iter().filter(|(_, r)| r.is_none()).count();
    let files_scanned = results.len() - files_skipped;
    let inventory = assemble_inventory(results.into_iter().filter_map(|(_, r)| r));

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Scan complete! {} files processed",
            processed_count.load(Ordering::Relaxed)
        ));
    }

    let summary = inventory.summary();
    info!(
        files_scanned,
        files_skipped,
        endpoints = summary.endpoints,
        menus = summary.menus,
        call_sites = summary.call_sites,
        relations = summary.relations,
        "Scan complete"
    );

    Ok(ScanOutcome {
        root,
        files_scanned,
        files_skipped,
        inventory,
    })
}
