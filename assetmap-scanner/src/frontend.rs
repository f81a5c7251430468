// Frontend surface extraction: navigation entries and outbound HTTP calls
//
// Markup patterns are applied per line (first match only). Route tables and
// call expressions are matched over the whole text so they may span lines.

use crate::normalize::line_of_offset;
use crate::record::{CallSiteRecord, HttpMethod, MenuRecord};
use regex::Regex;
use std::sync::LazyLock;

static MENU_ITEM_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<(?:el-menu-item|router-link)[^>]*(?:index|to)="([^"]+)"[^>]*>([^<]+)<"#)
        .expect("valid regex")
});

static ANCHOR_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\b[^>]*href="([^"]+)"[^>]*>([^<]+)<"#).expect("valid regex")
});

static ROUTE_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"path\s*:\s*['"]([^'"]+)['"][\s\S]{0,220}?title\s*:\s*['"]([^'"]+)['"]"#,
    )
    .expect("valid regex")
});

static AXIOS_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)axios\.(get|post|put|delete|patch)\s*\(\s*['"]([^'"]+)['"]"#)
        .expect("valid regex")
});

static HTTP_CLIENT_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:\$http|request|http)\.(get|post|put|delete|patch)\s*\(\s*['"]([^'"]+)['"]"#,
    )
    .expect("valid regex")
});

static FETCH_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)fetch\s*\(\s*['"]([^'"]+)['"]"#).expect("valid regex")
});

/// Everything the frontend extractor found in one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontendExtraction {
    pub menus: Vec<MenuRecord>,
    pub call_sites: Vec<CallSiteRecord>,
}

pub fn extract_frontend(content: &str, source_file: &str) -> FrontendExtraction {
    FrontendExtraction {
        menus: extract_menus(content, source_file),
        call_sites: extract_call_sites(content, source_file),
    }
}

pub fn extract_menus(content: &str, source_file: &str) -> Vec<MenuRecord> {
    let mut menus = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if let Some(caps) = MENU_ITEM_TAG.captures(line) {
            menus.push(menu_record(&caps[2], &caps[1], source_file, idx + 1));
        }

        if let Some(caps) = ANCHOR_TAG.captures(line) {
            let href = caps[1].trim();
            // External links are not navigation entries of this application
            if href.starts_with('/') || href.starts_with('#') {
                menus.push(menu_record(&caps[2], href, source_file, idx + 1));
            }
        }
    }

    for caps in ROUTE_OBJECT.captures_iter(content) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let line = line_of_offset(content, whole.start());
        menus.push(menu_record(&caps[2], &caps[1], source_file, line));
    }

    menus
}

pub fn extract_call_sites(content: &str, source_file: &str) -> Vec<CallSiteRecord> {
    let mut call_sites = Vec::new();

    collect_verb_calls(content, source_file, &AXIOS_CALL, &mut call_sites);
    collect_verb_calls(content, source_file, &HTTP_CLIENT_CALL, &mut call_sites);

    for caps in FETCH_CALL.captures_iter(content) {
        let (Some(whole), Some(url)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        call_sites.push(CallSiteRecord {
            http_method: HttpMethod::Get,
            url: url.as_str().to_string(),
            source_file: source_file.to_string(),
            line_number: line_of_offset(content, whole.start()),
        });
    }

    call_sites
}

fn collect_verb_calls(
    content: &str,
    source_file: &str,
    pattern: &Regex,
    call_sites: &mut Vec<CallSiteRecord>,
) {
    for caps in pattern.captures_iter(content) {
        let (Some(whole), Some(verb), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let Some(http_method) = HttpMethod::from_token(verb.as_str()) else {
            continue;
        };
        call_sites.push(CallSiteRecord {
            http_method,
            url: url.as_str().to_string(),
            source_file: source_file.to_string(),
            line_number: line_of_offset(content, whole.start()),
        });
    }
}

fn menu_record(title: &str, route: &str, source_file: &str, line_number: usize) -> MenuRecord {
    MenuRecord {
        title: title.trim().to_string(),
        route: route.trim().to_string(),
        source_file: source_file.to_string(),
        line_number,
    }
}
