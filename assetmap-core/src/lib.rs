pub mod corpus;
pub mod inventory;
pub mod relation;
pub mod report;
pub mod scan;

pub use corpus::{CorpusOptions, SourceFile, SourceKind, collect_sources};
pub use inventory::{Inventory, InventorySummary};
pub use scan::{ScanOptions, ScanOutcome, execute_scan};

pub fn print_banner() {
    println!(
        r#"
   __ _  ___ ___  ___ | |_ _ __ ___   __ _ _ __
  / _` |/ __/ __|/ _ \| __| '_ ` _ \ / _` | '_ \
 | (_| |\__ \__ \  __/| |_| | | | | | (_| | |_) |
  \__,_||___/___/\___| \__|_| |_| |_|\__,_| .__/
                                          |_|
  web asset inventory  v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
