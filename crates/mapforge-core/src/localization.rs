//! Localization merge.
//!
//! Provinces and locations are matched by numeric province id, never by
//! name, because normalization rewrites their names. Grouping levels keep
//! their raw names and are matched by key.

use std::sync::OnceLock;

use ahash::AHashMap;
use regex::Regex;

use crate::hierarchy::{Geography, Level};
use crate::registry::Node;

/// Key prefix of numeric province entries (`PROV123`).
pub const PROVINCE_KEY_PREFIX: &str = "PROV";

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^\s*([A-Za-z0-9_.\-']+):\d*\s*"(.*)"\s*$"#).expect("entry pattern")
    })
}

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^l_([A-Za-z_]+):\s*$").expect("header pattern"))
}

/// External key → text table.
#[derive(Debug, Clone, Default)]
pub struct LocalizationSource {
    language: Option<String>,
    provinces: AHashMap<u32, String>,
    keys: AHashMap<String, String>,
}

impl LocalizationSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `l_<lang>:` followed by ` KEY:N "text"` lines. Lines that match
    /// neither form are ignored.
    pub fn parse(text: &str) -> Self {
        let mut source = Self::new();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(caps) = entry_pattern().captures(line) {
                source.insert(&caps[1], &caps[2]);
            } else if let Some(caps) = header_pattern().captures(trimmed) {
                source.language = Some(caps[1].to_string());
            }
        }
        tracing::debug!(
            provinces = source.provinces.len(),
            keys = source.keys.len(),
            "parsed localization source"
        );
        source
    }

    /// `PROV<n>` goes to the numeric table, anything else to the key table.
    pub fn insert(&mut self, key: &str, text: &str) {
        match key
            .strip_prefix(PROVINCE_KEY_PREFIX)
            .and_then(|digits| digits.parse::<u32>().ok())
        {
            Some(number) => self.insert_province(number, text),
            None => {
                self.keys.insert(key.to_string(), text.to_string());
            }
        }
    }

    pub fn insert_province(&mut self, number: u32, text: &str) {
        self.provinces.insert(number, text.to_string());
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn province(&self, number: u32) -> Option<&str> {
        self.provinces.get(&number).map(String::as_str)
    }

    pub fn key(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.provinces.len() + self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub matched: usize,
    /// Grouping nodes that received an `UNKNOWN <LEVEL>` fallback.
    pub fallbacks: usize,
    /// Provinces/locations left without localization.
    pub unmatched: usize,
}

pub struct LocalizationMerger<'a> {
    source: &'a LocalizationSource,
}

impl<'a> LocalizationMerger<'a> {
    pub fn new(source: &'a LocalizationSource) -> Self {
        Self { source }
    }

    /// Attach text to one node of `level`. Returns whether a match was found.
    pub fn merge_node(&self, level: Level, node: &mut Node) -> bool {
        let text = if level.is_grouping() {
            self.source.key(&node.name)
        } else {
            node.province_number.and_then(|n| self.source.province(n))
        };
        match text {
            Some(text) => {
                node.loc = Some(text.to_string());
                true
            }
            None => {
                if level.is_grouping() {
                    node.loc = Some(level.unknown_loc());
                }
                false
            }
        }
    }

    pub fn merge(&self, geography: &mut Geography) -> MergeReport {
        let mut report = MergeReport::default();
        for level in Level::ALL {
            for node in geography.level_mut(level).iter_mut() {
                if self.merge_node(level, node) {
                    report.matched += 1;
                } else if level.is_grouping() {
                    report.fallbacks += 1;
                } else {
                    report.unmatched += 1;
                }
            }
        }
        tracing::debug!(
            matched = report.matched,
            fallbacks = report.fallbacks,
            unmatched = report.unmatched,
            "merged localization"
        );
        report
    }
}
