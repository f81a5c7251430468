// Menu-to-endpoint relation inference
//
// Two strategies run for every menu. Co-location links a menu to the endpoints
// called from the same frontend file (HIGH). The prefix heuristic links it to
// every endpoint whose first path segment equals the route's (MEDIUM). The
// prefix heuristic over-reports on corpora whose paths share a generic first
// segment such as `api` or `v1`; this is a known precision limitation.

use assetmap_scanner::normalize::{first_segment, normalize_for_match};
use assetmap_scanner::{CallSiteRecord, Confidence, EndpointRecord, MenuRecord, RelationRecord};
use std::collections::HashSet;
use tracing::debug;

pub const CO_LOCATION_REASON: &str = "menu and API call appear in the same frontend file";
pub const SHARED_PREFIX_REASON: &str = "menu route and API path share the same business prefix";

fn paths_match(endpoint_path: &str, call_url: &str) -> bool {
    endpoint_path == call_url || endpoint_path.ends_with(call_url) || call_url.ends_with(endpoint_path)
}

/// First endpoint (in input order) whose path matches `url` exactly or by suffix.
pub fn match_endpoint<'a>(url: &str, endpoints: &'a [EndpointRecord]) -> Option<&'a EndpointRecord> {
    let normalized = normalize_for_match(url);
    endpoints
        .iter()
        .find(|endpoint| paths_match(&normalize_for_match(&endpoint.path), &normalized))
}

/// True when both first segments are non-empty and equal.
pub fn shares_first_segment(route: &str, api_path: &str) -> bool {
    let route_segment = first_segment(route);
    !route_segment.is_empty() && route_segment == first_segment(api_path)
}

/// Infer relations for the whole corpus. Co-location runs over every menu
/// before the prefix heuristic runs over any, and for a given
/// (route, path, method) the first relation produced wins, so a HIGH relation
/// is never displaced by a MEDIUM one.
pub fn infer_relations(
    menus: &[MenuRecord],
    endpoints: &[EndpointRecord],
    call_sites: &[CallSiteRecord],
) -> Vec<RelationRecord> {
    let mut relations = Vec::new();

    for menu in menus {
        for call_site in call_sites.iter().filter(|c| c.source_file == menu.source_file) {
            if let Some(endpoint) = match_endpoint(&call_site.url, endpoints) {
                relations.push(relation(menu, endpoint, Confidence::High, CO_LOCATION_REASON));
            }
        }
    }

    for menu in menus {
        for endpoint in endpoints {
            if shares_first_segment(&menu.route, &endpoint.path) {
                relations.push(relation(menu, endpoint, Confidence::Medium, SHARED_PREFIX_REASON));
            }
        }
    }

    let candidates = relations.len();
    let relations = dedup_first_seen(relations);
    debug!(candidates, kept = relations.len(), "Relation inference complete");

    relations
}

fn relation(
    menu: &MenuRecord,
    endpoint: &EndpointRecord,
    confidence: Confidence,
    reason: &str,
) -> RelationRecord {
    RelationRecord {
        menu_route: menu.route.clone(),
        menu_title: menu.title.clone(),
        api_path: endpoint.path.clone(),
        api_method: endpoint.http_method,
        confidence,
        reason: reason.to_string(),
    }
}

fn dedup_first_seen(relations: Vec<RelationRecord>) -> Vec<RelationRecord> {
    let mut seen = HashSet::new();
    relations
        .into_iter()
        .filter(|relation| seen.insert(relation.key()))
        .collect()
}
