//! Fold matching records into one result per ASN

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::cidr::range_to_cidrs;
use super::matcher::OrgMatcher;
use crate::database::Record;

/// All prefixes announced under one ASN
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub asn: u32,
    /// Organization as seen on the first matching record
    pub organization: String,
    /// CIDR blocks in source order
    pub prefixes: Vec<String>,
}

/// Incremental match-and-aggregate state for one query
pub struct Aggregator {
    matcher: OrgMatcher,
    include_ipv6: bool,
    results: Vec<MatchResult>,
    /// asn -> index into `results`
    index: HashMap<u32, usize>,
    /// (asn, prefix) pairs already recorded
    seen: HashSet<(u32, String)>,
    rejected: usize,
}

impl Aggregator {
    pub fn new(query: &str, include_ipv6: bool) -> Self {
        Self {
            matcher: OrgMatcher::new(query),
            include_ipv6,
            results: Vec::new(),
            index: HashMap::new(),
            seen: HashSet::new(),
            rejected: 0,
        }
    }

    /// Feed one record; returns whether it contributed to the results
    pub fn ingest(&mut self, record: &Record) -> bool {
        if !record.is_routed() || (record.is_ipv6() && !self.include_ipv6) {
            return false;
        }
        if !self.matcher.is_match(&record.organization) {
            return false;
        }

        let blocks = match range_to_cidrs(record.range_start, record.range_end) {
            Ok(blocks) => blocks,
            Err(e) => {
                self.rejected += 1;
                log::debug!("Dropping AS{} record: {}", record.asn, e);
                return false;
            }
        };

        let slot = match self.index.get(&record.asn) {
            Some(&slot) => slot,
            None => {
                self.results.push(MatchResult {
                    asn: record.asn,
                    organization: record.organization.clone(),
                    prefixes: Vec::new(),
                });
                self.index.insert(record.asn, self.results.len() - 1);
                self.results.len() - 1
            }
        };

        for block in blocks {
            let prefix = block.to_string();
            if self.seen.insert((record.asn, prefix.clone())) {
                self.results[slot].prefixes.push(prefix);
            }
        }

        true
    }

    /// Records that matched but could not be decomposed
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn into_results(self) -> Vec<MatchResult> {
        self.results
    }
}

/// Match `records` against `query` and group the resulting prefixes by ASN
///
/// Results keep the order in which each ASN was first seen.
pub fn match_records<'a, I>(records: I, query: &str, include_ipv6: bool) -> Vec<MatchResult>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut aggregator = Aggregator::new(query, include_ipv6);
    for record in records {
        aggregator.ingest(record);
    }
    aggregator.into_results()
}
