//! Record normalization.
//!
//! Runs before any hierarchy is built:
//! - country tags in owner/cores/country/ruler fields go through [`TagResolver`],
//! - repeated province and location display names get an occurrence suffix
//!   ([`dedup_name`]), counted separately per field,
//! - hyphens and apostrophes are cleaned out of those names,
//! - blank grouping fields get a placeholder derived from the nearest
//!   non-blank ancestor.
//!
//! The occurrence suffix depends on record order: the same rows in a
//! different order produce different final names.

use ahash::AHashMap;

use crate::records::{CountryRecord, LocationRecord, RulerRecord};
use crate::tags::TagResolver;

/// Continent name used when a row has none.
pub const UNKNOWN_CONTINENT: &str = "unknown_continent";

/// Final name for the `occurrence`-th (1-based) appearance of `raw`.
///
/// The first appearance keeps its name; the N-th (N ≥ 2) becomes `raw_N`.
pub fn dedup_name(raw: &str, occurrence: usize) -> String {
    if occurrence <= 1 {
        raw.to_string()
    } else {
        format!("{raw}_{occurrence}")
    }
}

/// `-` → `_`, apostrophes removed.
pub fn normalize_name_chars(name: &str) -> String {
    name.replace('-', "_").replace('\'', "")
}

/// Replace the first three characters of a character tag (its country tag).
pub fn convert_character_tag(tags: &TagResolver, character_tag: &str) -> String {
    let split = match character_tag.char_indices().nth(3) {
        Some((i, _)) => i,
        None if character_tag.chars().count() == 3 => character_tag.len(),
        None => return character_tag.to_string(),
    };
    let (prefix, rest) = character_tag.split_at(split);
    format!("{}{rest}", tags.resolve(prefix))
}

/// Fill blank continent/superregion/region/area fields with placeholders.
pub fn fill_grouping_placeholders(record: &mut LocationRecord) {
    if record.continent.trim().is_empty() {
        record.continent = UNKNOWN_CONTINENT.to_string();
    }
    if record.superregion.trim().is_empty() {
        record.superregion = format!("unknown_{}_superregion", record.continent);
    }
    if record.region.trim().is_empty() {
        record.region = format!("unknown_{}_region", record.superregion);
    }
    if record.area.trim().is_empty() {
        record.area = format!("unknown_{}_area", record.region);
    }
}

/// Per-name occurrence counter.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceCounter {
    seen: AHashMap<String, usize>,
}

impl OccurrenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1-based occurrence index of `raw`, counting this call.
    pub fn next(&mut self, raw: &str) -> usize {
        let n = self.seen.entry(raw.to_string()).or_insert(0);
        *n += 1;
        *n
    }
}

/// A location row after normalization, with the names it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLocation {
    pub record: LocationRecord,
    pub raw_province: String,
    pub raw_location: String,
}

impl NormalizedLocation {
    /// Containment path used to order hierarchy construction.
    pub fn sort_key(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.record.continent,
            &self.record.superregion,
            &self.record.region,
            &self.record.area,
            &self.raw_province,
        )
    }
}

pub struct RecordNormalizer<'a> {
    tags: &'a TagResolver,
    provinces: OccurrenceCounter,
    locations: OccurrenceCounter,
}

impl<'a> RecordNormalizer<'a> {
    pub fn new(tags: &'a TagResolver) -> Self {
        Self {
            tags,
            provinces: OccurrenceCounter::new(),
            locations: OccurrenceCounter::new(),
        }
    }

    pub fn normalize_location(&mut self, mut record: LocationRecord) -> NormalizedLocation {
        let owner = self.tags.resolve(record.owner.trim()).to_string();
        let cores = record
            .core_tags()
            .into_iter()
            .map(|tag| self.tags.resolve(tag))
            .collect::<Vec<_>>()
            .join(",");
        record.owner = owner;
        record.cores = cores;

        let raw_province = record.province.clone();
        let raw_location = record.location_name.clone();

        let n = self.provinces.next(&raw_province);
        record.province = normalize_name_chars(&dedup_name(&raw_province, n));
        let n = self.locations.next(&raw_location);
        record.location_name = normalize_name_chars(&dedup_name(&raw_location, n));

        fill_grouping_placeholders(&mut record);

        NormalizedLocation {
            record,
            raw_province,
            raw_location,
        }
    }

    pub fn normalize_locations(
        &mut self,
        records: impl IntoIterator<Item = LocationRecord>,
    ) -> Vec<NormalizedLocation> {
        let out: Vec<NormalizedLocation> = records
            .into_iter()
            .map(|r| self.normalize_location(r))
            .collect();
        let renamed = out
            .iter()
            .filter(|n| n.record.location_name != normalize_name_chars(&n.raw_location))
            .count();
        tracing::debug!(locations = out.len(), renamed, "normalized location records");
        out
    }

    pub fn normalize_country(&self, mut record: CountryRecord) -> CountryRecord {
        let tag = self.tags.resolve(record.tag.trim()).to_string();
        record.tag = tag;
        record
    }

    pub fn normalize_ruler(&self, mut record: RulerRecord) -> RulerRecord {
        let tag = self.tags.resolve(record.tag.trim()).to_string();
        record.tag = tag;
        record.character_tag = convert_character_tag(self.tags, &record.character_tag);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(province: &str, location: &str, owner: &str, cores: &str) -> LocationRecord {
        LocationRecord {
            continent: "A".to_string(),
            province: province.to_string(),
            location_name: location.to_string(),
            owner: owner.to_string(),
            cores: cores.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn dedup_name_keeps_first_and_suffixes_later() {
        assert_eq!(dedup_name("L1", 1), "L1");
        assert_eq!(dedup_name("L1", 2), "L1_2");
        assert_eq!(dedup_name("L1", 7), "L1_7");
    }

    #[test]
    fn repeated_names_are_suffixed_per_field() {
        let tags = TagResolver::new();
        let mut normalizer = RecordNormalizer::new(&tags);
        let out = normalizer.normalize_locations(vec![
            row("P1", "L1", "", ""),
            row("P1", "L2", "", ""),
            row("P2", "L1", "", ""),
            row("P1", "L1", "", ""),
        ]);
        let names: Vec<(&str, &str)> = out
            .iter()
            .map(|n| (n.record.province.as_str(), n.record.location_name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![("P1", "L1"), ("P1_2", "L2"), ("P2", "L1_2"), ("P1_3", "L1_3")]
        );
        assert_eq!(out[3].raw_province, "P1");
    }

    #[test]
    fn character_cleanup_happens_after_suffixing() {
        let tags = TagResolver::new();
        let mut normalizer = RecordNormalizer::new(&tags);
        let out = normalizer.normalize_locations(vec![
            row("Gnomish-Pass", "Ar'tel", "", ""),
            row("Gnomish-Pass", "Ar'tel", "", ""),
        ]);
        assert_eq!(out[0].record.province, "Gnomish_Pass");
        assert_eq!(out[1].record.province, "Gnomish_Pass_2");
        assert_eq!(out[1].record.location_name, "Artel_2");
    }

    #[test]
    fn blank_grouping_fields_chain_from_nearest_ancestor() {
        let mut record = row("P", "L", "", "");
        fill_grouping_placeholders(&mut record);
        assert_eq!(record.superregion, "unknown_A_superregion");
        assert_eq!(record.region, "unknown_unknown_A_superregion_region");
        assert_eq!(
            record.area,
            "unknown_unknown_unknown_A_superregion_region_area"
        );

        let mut record = LocationRecord {
            region: "R".to_string(),
            ..Default::default()
        };
        fill_grouping_placeholders(&mut record);
        assert_eq!(record.continent, UNKNOWN_CONTINENT);
        assert_eq!(record.superregion, "unknown_unknown_continent_superregion");
        assert_eq!(record.region, "R");
        assert_eq!(record.area, "unknown_R_area");
    }

    #[test]
    fn owner_and_cores_are_converted() {
        let mut tags = TagResolver::new();
        tags.insert("A01", "LOR");
        let mut normalizer = RecordNormalizer::new(&tags);
        let out = normalizer.normalize_location(row("P", "L", "A01", " A01 , B02"));
        assert_eq!(out.record.owner, "LOR");
        assert_eq!(out.record.cores, "LOR,B02");
    }

    #[test]
    fn ruler_tags_and_character_prefix_are_converted() {
        let mut tags = TagResolver::new();
        tags.insert("A01", "LOR");
        let normalizer = RecordNormalizer::new(&tags);
        let ruler = normalizer.normalize_ruler(RulerRecord {
            character_tag: "A01_ruler_1".to_string(),
            tag: "A01".to_string(),
            ..Default::default()
        });
        assert_eq!(ruler.tag, "LOR");
        assert_eq!(ruler.character_tag, "LOR_ruler_1");

        assert_eq!(convert_character_tag(&tags, "A01"), "LOR");
        assert_eq!(convert_character_tag(&tags, "A0"), "A0");
        assert_eq!(convert_character_tag(&tags, "B02_x"), "B02_x");
    }

    #[test]
    fn country_tag_is_converted() {
        let mut tags = TagResolver::new();
        tags.insert("A01", "LOR");
        let normalizer = RecordNormalizer::new(&tags);
        let country = normalizer.normalize_country(CountryRecord {
            tag: "A01".to_string(),
            ..Default::default()
        });
        assert_eq!(country.tag, "LOR");
    }
}
