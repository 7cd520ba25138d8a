//! Raw tabular records.
//!
//! Every field is a plain string and defaults to blank, so a missing column
//! behaves exactly like an empty cell. Numeric columns are parsed lazily and
//! tolerate garbage (`None`).

use serde::{Deserialize, Serialize};

use crate::table::Keyed;

/// Color used when a row has none.
pub const DEFAULT_COLOR: &str = "255 255 255";

/// `value`, or `placeholder` when `value` is blank.
pub fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// `(12, 34, 56)` → `12 34 56`; blank → [`DEFAULT_COLOR`].
pub fn normalize_color(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return DEFAULT_COLOR.to_string();
    }
    raw.trim_start_matches('(')
        .trim_end_matches(')')
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    pub continent: String,
    pub superregion: String,
    pub region: String,
    pub area: String,
    pub province: String,
    pub location_name: String,
    pub location_type: String,
    pub hexcode: String,
    pub owner: String,
    pub cores: String,
    pub old_province_number: String,
    pub topography: String,
    pub vegetation: String,
    pub climate: String,
    pub religion: String,
    pub culture: String,
    pub raw_material: String,
    pub natural_harbor_suitability: String,
}

impl LocationRecord {
    /// Comma-separated core tags, trimmed, blanks dropped.
    pub fn core_tags(&self) -> Vec<&str> {
        self.cores
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    pub fn province_number(&self) -> Option<u32> {
        self.old_province_number.trim().parse().ok()
    }

    pub fn harbor_suitability(&self) -> Option<f64> {
        self.natural_harbor_suitability.trim().parse().ok()
    }

    pub fn is_sea(&self) -> bool {
        self.location_type.trim() == "sea"
    }

    pub fn is_wasteland(&self) -> bool {
        self.topography.trim().ends_with("_wasteland")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryRecord {
    pub tag: String,
    pub capital: String,
    pub capital_superregion: String,
    pub court_language: String,
    pub culture_definition: String,
    pub religion_definition: String,
    pub color: String,
}

impl Keyed for CountryRecord {
    fn key(&self) -> &str {
        &self.tag
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerRecord {
    pub character_tag: String,
    pub tag: String,
    pub first_name: String,
    pub nickname: String,
    pub culture: String,
    pub religion: String,
    pub female: String,
    pub adm: String,
    pub dip: String,
    pub mil: String,
    pub birth_date: String,
    pub death_date: String,
    pub ruler_term_start: String,
    pub ruler_term_end: String,
    pub regnal_number: String,
    pub birth_place: String,
    pub dynasty: String,
    pub tag_continent: String,
    pub tag_superregion: String,
}

impl Keyed for RulerRecord {
    fn key(&self) -> &str {
        &self.character_tag
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConversionRecord {
    pub old_tag: String,
    pub new_tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CultureRecord {
    pub culture: String,
    pub culture_groups: String,
    #[serde(rename = "language/dialect")]
    pub language: String,
    pub color: String,
}

impl Keyed for CultureRecord {
    fn key(&self) -> &str {
        &self.culture
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReligionRecord {
    pub religion: String,
    pub religious_group: String,
    pub color: String,
    pub enable: String,
}

impl Keyed for ReligionRecord {
    fn key(&self) -> &str {
        &self.religion
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReligiousGroupRecord {
    pub religious_group: String,
    pub color: String,
    pub convert_slaves_at_start: String,
}

impl Keyed for ReligiousGroupRecord {
    fn key(&self) -> &str {
        &self.religious_group
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageRecord {
    pub language: String,
    pub color: String,
}

impl Keyed for LanguageRecord {
    fn key(&self) -> &str {
        &self.language
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectRecord {
    pub dialect: String,
    pub language: String,
}

impl Keyed for DialectRecord {
    fn key(&self) -> &str {
        &self.dialect
    }
}
