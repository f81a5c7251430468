// Inventory assembly: corpus-wide deduplication, ordering and relation inference

use crate::relation::infer_relations;
use assetmap_scanner::{
    CallSiteRecord, Confidence, EndpointRecord, MenuRecord, RelationRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four record sets produced by one scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub endpoints: Vec<EndpointRecord>,
    pub menus: Vec<MenuRecord>,
    pub call_sites: Vec<CallSiteRecord>,
    pub relations: Vec<RelationRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub endpoints: usize,
    pub menus: usize,
    pub call_sites: usize,
    pub relations: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
}

/// Reduce `records` to one per key. A later record replaces an earlier one
/// with the same key; the output is ordered by key.
pub fn dedup_by_key<T, K, F>(records: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut unique = BTreeMap::new();
    for record in records {
        unique.insert(key(&record), record);
    }
    unique.into_values().collect()
}

impl Inventory {
    /// Deduplicate and order the extracted records, then infer relations over
    /// the complete sets.
    pub fn assemble(
        endpoints: Vec<EndpointRecord>,
        menus: Vec<MenuRecord>,
        call_sites: Vec<CallSiteRecord>,
    ) -> Self {
        let mut endpoints = dedup_by_key(endpoints, EndpointRecord::key);
        endpoints.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.http_method.as_str().cmp(b.http_method.as_str()))
                .then_with(|| a.handler_name.cmp(&b.handler_name))
                .then_with(|| a.source_file.cmp(&b.source_file))
                .then_with(|| a.framework.cmp(&b.framework))
        });

        let mut menus = dedup_by_key(menus, MenuRecord::key);
        menus.sort_by(|a, b| {
            a.source_file
                .cmp(&b.source_file)
                .then_with(|| a.line_number.cmp(&b.line_number))
                .then_with(|| a.route.cmp(&b.route))
                .then_with(|| a.title.cmp(&b.title))
        });

        let mut call_sites = dedup_by_key(call_sites, CallSiteRecord::key);
        call_sites.sort_by(|a, b| {
            a.source_file
                .cmp(&b.source_file)
                .then_with(|| a.line_number.cmp(&b.line_number))
                .then_with(|| a.url.cmp(&b.url))
                .then_with(|| a.http_method.as_str().cmp(b.http_method.as_str()))
        });

        let relations = infer_relations(&menus, &endpoints, &call_sites);

        Self {
            endpoints,
            menus,
            call_sites,
            relations,
        }
    }

    pub fn summary(&self) -> InventorySummary {
        let high_confidence = self
            .relations
            .iter()
            .filter(|r| r.confidence == Confidence::High)
            .count();

        InventorySummary {
            endpoints: self.endpoints.len(),
            menus: self.menus.len(),
            call_sites: self.call_sites.len(),
            relations: self.relations.len(),
            high_confidence,
            medium_confidence: self.relations.len() - high_confidence,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty() && self.menus.is_empty() && self.call_sites.is_empty()
    }
}
