// Report generation from a completed scan

use crate::scan::ScanOutcome;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
    Csv,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
            ReportFormat::Csv => "csv",
        }
    }
}

const HEAVY_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";
const LIGHT_RULE: &str = "────────────────────────────────────────────────────────────────────────────────\n";

pub fn generate_report(outcome: &ScanOutcome, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(outcome)),
        ReportFormat::Json => generate_json_report(outcome),
        ReportFormat::Markdown => Ok(generate_markdown_report(outcome)),
        ReportFormat::Csv => Ok(generate_csv_report(outcome)),
    }
}

pub fn generate_text_report(outcome: &ScanOutcome) -> String {
    let inventory = &outcome.inventory;
    let summary = inventory.summary();
    let mut report = String::new();

    // Header
    report.push_str(HEAVY_RULE);
    report.push_str("                         WEB ASSET INVENTORY REPORT\n");
    report.push_str(HEAVY_RULE);
    report.push('\n');

    report.push_str(&format!("Source root:    {}\n", outcome.root.display()));
    report.push_str(&format!("Files scanned:  {}\n", outcome.files_scanned));
    if outcome.files_skipped > 0 {
        report.push_str(&format!("Files skipped:  {}\n", outcome.files_skipped));
    }
    report.push('\n');

    report.push_str(&format!("Endpoints:      {}\n", summary.endpoints));
    report.push_str(&format!("Menus:          {}\n", summary.menus));
    report.push_str(&format!("Call sites:     {}\n", summary.call_sites));
    report.push_str(&format!(
        "Relations:      {}  ({} high, {} medium)\n\n",
        summary.relations, summary.high_confidence, summary.medium_confidence
    ));

    section_header(&mut report, "BACKEND ENDPOINTS");
    if inventory.endpoints.is_empty() {
        report.push_str("  (none)\n");
    }
    for endpoint in &inventory.endpoints {
        report.push_str(&format!(
            "  {:<7} {}  -> {}  [{}]  {}:{}\n",
            endpoint.http_method.as_str(),
            endpoint.path,
            endpoint.handler_name,
            endpoint.framework,
            endpoint.source_file,
            endpoint.line_number
        ));
    }
    report.push('\n');

    section_header(&mut report, "FRONTEND MENUS");
    if inventory.menus.is_empty() {
        report.push_str("  (none)\n");
    }
    for menu in &inventory.menus {
        report.push_str(&format!(
            "  {}  ->  {}  {}:{}\n",
            menu.title, menu.route, menu.source_file, menu.line_number
        ));
    }
    report.push('\n');

    section_header(&mut report, "FRONTEND API CALLS");
    if inventory.call_sites.is_empty() {
        report.push_str("  (none)\n");
    }
    for call_site in &inventory.call_sites {
        report.push_str(&format!(
            "  {:<7} {}  {}:{}\n",
            call_site.http_method.as_str(),
            call_site.url,
            call_site.source_file,
            call_site.line_number
        ));
    }
    report.push('\n');

    section_header(&mut report, "MENU TO API RELATIONS");
    if inventory.relations.is_empty() {
        report.push_str("  (none)\n");
    }
    for relation in &inventory.relations {
        report.push_str(&format!(
            "  [{}] {} ({})  ->  {} {}\n",
            relation.confidence,
            relation.menu_route,
            relation.menu_title,
            relation.api_method,
            relation.api_path
        ));
        report.push_str(&format!("         {}\n", relation.reason));
    }
    report.push('\n');

    // Footer
    report.push_str(HEAVY_RULE);
    report.push_str("                               End of Report\n");
    report.push_str(HEAVY_RULE);
    report.push_str("\nRelations are heuristic and ranked by confidence, not verified.\n");

    report
}

fn section_header(report: &mut String, title: &str) {
    report.push_str(title);
    report.push('\n');
    report.push_str(LIGHT_RULE);
}

pub fn generate_json_report(outcome: &ScanOutcome) -> Result<String, serde_json::Error> {
    let summary = outcome.inventory.summary();

    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "assetmap",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json",
                "root": outcome.root.display().to_string()
            },
            "summary": {
                "files_scanned": outcome.files_scanned,
                "files_skipped": outcome.files_skipped,
                "endpoints": summary.endpoints,
                "menus": summary.menus,
                "call_sites": summary.call_sites,
                "relations": summary.relations,
                "confidence_breakdown": {
                    "high": summary.high_confidence,
                    "medium": summary.medium_confidence
                }
            },
            "inventory": outcome.inventory
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_markdown_report(outcome: &ScanOutcome) -> String {
    let inventory = &outcome.inventory;
    let summary = inventory.summary();
    let mut report = String::new();

    report.push_str("# Web Asset Inventory\n\n");
    report.push_str(&format!("- **Source root:** `{}`\n", outcome.root.display()));
    report.push_str(&format!("- **Files scanned:** {}\n", outcome.files_scanned));
    report.push_str(&format!("- **Endpoints:** {}\n", summary.endpoints));
    report.push_str(&format!("- **Menus:** {}\n", summary.menus));
    report.push_str(&format!("- **Call sites:** {}\n", summary.call_sites));
    report.push_str(&format!(
        "- **Relations:** {} ({} high, {} medium)\n\n",
        summary.relations, summary.high_confidence, summary.medium_confidence
    ));

    report.push_str("## Backend Endpoints\n\n");
    report.push_str("| Method | Path | Handler | Framework | Source |\n");
    report.push_str("|--------|------|---------|-----------|--------|\n");
    for endpoint in &inventory.endpoints {
        report.push_str(&format!(
            "| {} | `{}` | `{}` | {} | {}:{} |\n",
            endpoint.http_method,
            md_cell(&endpoint.path),
            md_cell(&endpoint.handler_name),
            endpoint.framework,
            md_cell(&endpoint.source_file),
            endpoint.line_number
        ));
    }

    report.push_str("\n## Frontend Menus\n\n");
    report.push_str("| Title | Route | Source |\n");
    report.push_str("|-------|-------|--------|\n");
    for menu in &inventory.menus {
        report.push_str(&format!(
            "| {} | `{}` | {}:{} |\n",
            md_cell(&menu.title),
            md_cell(&menu.route),
            md_cell(&menu.source_file),
            menu.line_number
        ));
    }

    report.push_str("\n## Frontend API Calls\n\n");
    report.push_str("| Method | URL | Source |\n");
    report.push_str("|--------|-----|--------|\n");
    for call_site in &inventory.call_sites {
        report.push_str(&format!(
            "| {} | `{}` | {}:{} |\n",
            call_site.http_method,
            md_cell(&call_site.url),
            md_cell(&call_site.source_file),
            call_site.line_number
        ));
    }

    report.push_str("\n## Menu to API Relations\n\n");
    report.push_str("| Confidence | Menu | Route | Method | API Path | Reason |\n");
    report.push_str("|------------|------|-------|--------|----------|--------|\n");
    for relation in &inventory.relations {
        report.push_str(&format!(
            "| {} | {} | `{}` | {} | `{}` | {} |\n",
            relation.confidence,
            md_cell(&relation.menu_title),
            md_cell(&relation.menu_route),
            relation.api_method,
            md_cell(&relation.api_path),
            md_cell(&relation.reason)
        ));
    }

    report
}

fn md_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// One CSV block per record set, separated by a blank line.
pub fn generate_csv_report(outcome: &ScanOutcome) -> String {
    let inventory = &outcome.inventory;
    let mut report = String::new();

    report.push_str("record,framework,httpMethod,path,handlerName,sourceFile,lineNumber\n");
    for e in &inventory.endpoints {
        let line_number = e.line_number.to_string();
        push_csv_row(
            &mut report,
            &["endpoint", e.framework.as_str(), e.http_method.as_str(), &e.path, &e.handler_name, &e.source_file, &line_number],
        );
    }

    report.push_str("\nrecord,title,route,sourceFile,lineNumber\n");
    for m in &inventory.menus {
        let line_number = m.line_number.to_string();
        push_csv_row(&mut report, &["menu", &m.title, &m.route, &m.source_file, &line_number]);
    }

    report.push_str("\nrecord,httpMethod,url,sourceFile,lineNumber\n");
    for c in &inventory.call_sites {
        let line_number = c.line_number.to_string();
        push_csv_row(
            &mut report,
            &["callSite", c.http_method.as_str(), &c.url, &c.source_file, &line_number],
        );
    }

    report.push_str("\nrecord,menuRoute,menuTitle,apiPath,apiMethod,confidence,reason\n");
    for r in &inventory.relations {
        push_csv_row(
            &mut report,
            &["relation", &r.menu_route, &r.menu_title, &r.api_path, r.api_method.as_str(), r.confidence.as_str(), &r.reason],
        );
    }

    report
}

fn push_csv_row(report: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    report.push_str(&row.join(","));
    report.push('\n');
}

pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
