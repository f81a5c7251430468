// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    DEFAULT_OUTPUT_STEM, ScanRequest, default_file_name, expand_path, parse_extensions, resolve_output_path,
    run_scan, summary_line,
};

// Re-export scan functionality from assetmap-core
pub use assetmap_core::report::ReportFormat;
pub use assetmap_core::scan::{ScanOptions, ScanOutcome, execute_scan};
