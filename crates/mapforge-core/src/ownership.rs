//! Countries, rulers and location ownership.
//!
//! Relations are resolved once, from tag to [`CountryId`], while the model is
//! built. Unresolvable tags drop the relation; nothing here fails.

use ahash::AHashMap;

use crate::hierarchy::Geography;
use crate::records::{CountryRecord, RulerRecord};
use crate::registry::NodeId;
use crate::table::KeyedTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryId(pub u32);

impl CountryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RulerId(pub u32);

impl RulerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// Countries
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub tag: String,
    pub record: CountryRecord,
    /// Capital superregion, when it names a node of the geography.
    pub superregion: Option<NodeId>,
    pub owned_core: Vec<NodeId>,
    pub owned_non_core: Vec<NodeId>,
    pub unowned_core: Vec<NodeId>,
    /// Sorted by term start.
    pub rulers: Vec<RulerId>,
}

#[derive(Debug, Clone, Default)]
pub struct Countries {
    countries: Vec<Country>,
    index: AHashMap<String, CountryId>,
}

impl Countries {
    /// One country per non-blank tag, in table order.
    pub fn build(records: &KeyedTable<CountryRecord>, geography: &Geography) -> Self {
        let mut countries = Self::default();
        for record in records {
            let tag = record.tag.trim();
            if tag.is_empty() {
                tracing::debug!("skipping country row without a tag");
                continue;
            }
            let id = CountryId(countries.countries.len() as u32);
            countries.index.insert(tag.to_string(), id);
            countries.countries.push(Country {
                tag: tag.to_string(),
                record: record.clone(),
                superregion: geography
                    .superregions
                    .id_of(record.capital_superregion.trim()),
                owned_core: Vec::new(),
                owned_non_core: Vec::new(),
                unowned_core: Vec::new(),
                rulers: Vec::new(),
            });
        }
        countries
    }

    pub fn get(&self, id: CountryId) -> &Country {
        &self.countries[id.index()]
    }

    pub fn get_mut(&mut self, id: CountryId) -> &mut Country {
        &mut self.countries[id.index()]
    }

    pub fn id_of(&self, tag: &str) -> Option<CountryId> {
        self.index.get(tag).copied()
    }

    pub fn by_tag(&self, tag: &str) -> Option<&Country> {
        self.id_of(tag).map(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CountryId, &Country)> {
        self.countries
            .iter()
            .enumerate()
            .map(|(i, c)| (CountryId(i as u32), c))
    }

    /// Countries whose capital lies in `superregion` (`None`: no known one).
    pub fn in_superregion(&self, superregion: Option<NodeId>) -> impl Iterator<Item = &Country> {
        self.countries
            .iter()
            .filter(move |c| c.superregion == superregion)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

// ============================================================================
// Rulers
// ============================================================================

/// Rulers sorted by (tag_continent, tag_superregion, tag, character_tag).
#[derive(Debug, Clone, Default)]
pub struct RulerRoster {
    rulers: Vec<RulerRecord>,
}

impl RulerRoster {
    pub fn new(table: KeyedTable<RulerRecord>) -> Self {
        let mut rulers = table.into_rows();
        rulers.sort_by(|a, b| {
            (
                &a.tag_continent,
                &a.tag_superregion,
                &a.tag,
                &a.character_tag,
            )
                .cmp(&(
                    &b.tag_continent,
                    &b.tag_superregion,
                    &b.tag,
                    &b.character_tag,
                ))
        });
        Self { rulers }
    }

    pub fn get(&self, id: RulerId) -> &RulerRecord {
        &self.rulers[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (RulerId, &RulerRecord)> {
        self.rulers
            .iter()
            .enumerate()
            .map(|(i, r)| (RulerId(i as u32), r))
    }

    pub fn len(&self) -> usize {
        self.rulers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rulers.is_empty()
    }
}

// ============================================================================
// Assignment
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Holding {
    OwnedCore,
    OwnedNonCore,
}

/// A location is an owned core when its owner also holds a core on it.
pub fn classify_holding(owner_tag: &str, core_tags: &[&str]) -> Holding {
    if core_tags.contains(&owner_tag) {
        Holding::OwnedCore
    } else {
        Holding::OwnedNonCore
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnershipReport {
    pub owned_core: usize,
    pub owned_non_core: usize,
    pub unowned_core: usize,
    pub unowned_locations: usize,
    pub unresolved_tags: usize,
    pub unresolved_rulers: usize,
}

pub struct OwnershipAssigner;

impl OwnershipAssigner {
    /// Partition every location into its owner's owned-core / owned-non-core
    /// list and each other claimant's unowned-core list.
    pub fn assign(geography: &mut Geography, countries: &mut Countries) -> OwnershipReport {
        let mut report = OwnershipReport::default();

        for (index, data) in geography.location_data.iter_mut().enumerate() {
            let location = NodeId(index as u32);
            let owner_tag = data.record.owner.trim().to_string();

            let mut core_tags: Vec<String> = Vec::new();
            for tag in data.record.core_tags() {
                if !core_tags.iter().any(|seen| seen == tag) {
                    core_tags.push(tag.to_string());
                }
            }
            let core_refs: Vec<&str> = core_tags.iter().map(String::as_str).collect();

            data.cores.clear();
            for tag in &core_refs {
                match countries.id_of(tag) {
                    Some(id) => data.cores.push(id),
                    None => report.unresolved_tags += 1,
                }
            }

            if owner_tag.is_empty() {
                report.unowned_locations += 1;
            } else {
                match countries.id_of(&owner_tag) {
                    Some(owner) => {
                        data.owner = Some(owner);
                        let country = countries.get_mut(owner);
                        match classify_holding(&owner_tag, &core_refs) {
                            Holding::OwnedCore => {
                                country.owned_core.push(location);
                                report.owned_core += 1;
                            }
                            Holding::OwnedNonCore => {
                                country.owned_non_core.push(location);
                                report.owned_non_core += 1;
                            }
                        }
                    }
                    None => {
                        report.unresolved_tags += 1;
                        report.unowned_locations += 1;
                    }
                }
            }

            for tag in &core_refs {
                if *tag == owner_tag {
                    continue;
                }
                if let Some(claimant) = countries.id_of(tag) {
                    countries.get_mut(claimant).unowned_core.push(location);
                    report.unowned_core += 1;
                }
            }
        }

        tracing::debug!(
            owned_core = report.owned_core,
            owned_non_core = report.owned_non_core,
            unowned_core = report.unowned_core,
            unresolved_tags = report.unresolved_tags,
            "assigned location ownership"
        );
        report
    }

    /// Resolve each ruler's country and attach the ruler to it. Per-country
    /// lists are ordered by term start, ties in roster order.
    pub fn link_rulers(roster: &RulerRoster, countries: &mut Countries) -> usize {
        let mut unresolved = 0;
        for (index, ruler) in roster.rulers.iter().enumerate() {
            match countries.id_of(ruler.tag.trim()) {
                Some(id) => countries.get_mut(id).rulers.push(RulerId(index as u32)),
                None => unresolved += 1,
            }
        }
        for country in &mut countries.countries {
            country
                .rulers
                .sort_by(|a, b| {
                    roster.rulers[a.index()]
                        .ruler_term_start
                        .cmp(&roster.rulers[b.index()].ruler_term_start)
                });
        }
        if unresolved > 0 {
            tracing::debug!(unresolved, "rulers without a known country");
        }
        unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HierarchyBuilder;
    use crate::normalize::RecordNormalizer;
    use crate::records::LocationRecord;
    use crate::tags::TagResolver;

    fn location(name: &str, owner: &str, cores: &str) -> LocationRecord {
        LocationRecord {
            continent: "A".to_string(),
            superregion: "S".to_string(),
            province: format!("P_{name}"),
            location_name: name.to_string(),
            owner: owner.to_string(),
            cores: cores.to_string(),
            ..Default::default()
        }
    }

    fn country(tag: &str, superregion: &str) -> CountryRecord {
        CountryRecord {
            tag: tag.to_string(),
            capital_superregion: superregion.to_string(),
            ..Default::default()
        }
    }

    fn setup(rows: Vec<LocationRecord>) -> (Geography, Countries, OwnershipReport) {
        let tags = TagResolver::new();
        let normalized = RecordNormalizer::new(&tags).normalize_locations(rows);
        let mut geography = HierarchyBuilder::build(&normalized);
        let table: KeyedTable<CountryRecord> =
            [country("AAA", "S"), country("BBB", "nowhere"), country("CCC", "")]
                .into_iter()
                .collect();
        let mut countries = Countries::build(&table, &geography);
        let report = OwnershipAssigner::assign(&mut geography, &mut countries);
        (geography, countries, report)
    }

    fn names(geography: &Geography, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|&id| geography.locations.get(id).name.clone())
            .collect()
    }

    #[test]
    fn owner_with_core_owns_a_core() {
        let (g, countries, report) = setup(vec![
            location("L1", "AAA", "AAA,BBB"),
            location("L2", "AAA", "BBB"),
            location("L3", "", "CCC"),
            location("L4", "ZZZ", "AAA, ZZZ"),
        ]);
        let aaa = countries.by_tag("AAA").unwrap();
        let bbb = countries.by_tag("BBB").unwrap();
        let ccc = countries.by_tag("CCC").unwrap();

        assert_eq!(names(&g, &aaa.owned_core), vec!["L1"]);
        assert_eq!(names(&g, &aaa.owned_non_core), vec!["L2"]);
        assert_eq!(names(&g, &aaa.unowned_core), vec!["L4"]);
        assert_eq!(names(&g, &bbb.unowned_core), vec!["L1", "L2"]);
        assert_eq!(names(&g, &ccc.unowned_core), vec!["L3"]);
        assert_eq!(report.unowned_locations, 2);
        // ZZZ as owner and as core
        assert_eq!(report.unresolved_tags, 2);
    }

    #[test]
    fn location_links_are_recorded() {
        let (g, countries, _) = setup(vec![location("L1", "AAA", "AAA,BBB,AAA")]);
        let data = g.location_data(NodeId(0));
        assert_eq!(data.owner, countries.id_of("AAA"));
        assert_eq!(data.cores.len(), 2);
    }

    #[test]
    fn capital_superregion_links_known_superregions_only() {
        let (g, countries, _) = setup(vec![location("L1", "AAA", "")]);
        let s = g.superregions.id_of("S");
        assert_eq!(countries.by_tag("AAA").unwrap().superregion, s);
        assert_eq!(countries.by_tag("BBB").unwrap().superregion, None);
        let unknown: Vec<&str> = countries
            .in_superregion(None)
            .map(|c| c.tag.as_str())
            .collect();
        assert_eq!(unknown, vec!["BBB", "CCC"]);
    }

    #[test]
    fn rulers_are_sorted_and_linked() {
        let (_, mut countries, _) = setup(vec![location("L1", "AAA", "")]);
        let ruler = |ct: &str, tag: &str, start: &str| RulerRecord {
            character_tag: ct.to_string(),
            tag: tag.to_string(),
            ruler_term_start: start.to_string(),
            ..Default::default()
        };
        let table: KeyedTable<RulerRecord> = [
            ruler("AAA_b", "AAA", "1400.1.1"),
            ruler("AAA_a", "AAA", "1450.1.1"),
            ruler("QQQ_a", "QQQ", ""),
        ]
        .into_iter()
        .collect();
        let roster = RulerRoster::new(table);
        let order: Vec<&str> = roster.iter().map(|(_, r)| r.character_tag.as_str()).collect();
        assert_eq!(order, vec!["AAA_a", "AAA_b", "QQQ_a"]);

        let unresolved = OwnershipAssigner::link_rulers(&roster, &mut countries);
        assert_eq!(unresolved, 1);
        let aaa = countries.by_tag("AAA").unwrap();
        let terms: Vec<&str> = aaa
            .rulers
            .iter()
            .map(|&id| roster.get(id).character_tag.as_str())
            .collect();
        assert_eq!(terms, vec!["AAA_b", "AAA_a"]);
        assert!(countries.iter().all(|(_, c)| c.tag != "QQQ"));
    }

    #[test]
    fn classification() {
        assert_eq!(classify_holding("A", &["A", "B"]), Holding::OwnedCore);
        assert_eq!(classify_holding("A", &["B"]), Holding::OwnedNonCore);
        assert_eq!(classify_holding("A", &[]), Holding::OwnedNonCore);
    }
}
