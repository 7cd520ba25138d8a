//! The assembled model: every stage run once, in dependency order.

use crate::groups::{culture_tree, language_tree, religion_tree, GroupTree};
use crate::hierarchy::{Geography, HierarchyBuilder};
use crate::localization::{LocalizationMerger, LocalizationSource, MergeReport};
use crate::normalize::RecordNormalizer;
use crate::ownership::{Countries, OwnershipAssigner, OwnershipReport, RulerRoster};
use crate::records::{
    CountryRecord, CultureRecord, DialectRecord, LanguageRecord, LocationRecord, ReligionRecord,
    ReligiousGroupRecord, RulerRecord, TagConversionRecord,
};
use crate::table::KeyedTable;
use crate::tags::TagResolver;

/// Raw inputs, in file order.
#[derive(Debug, Clone, Default)]
pub struct ModelInputs {
    pub tag_conversions: Vec<TagConversionRecord>,
    pub locations: Vec<LocationRecord>,
    pub countries: Vec<CountryRecord>,
    pub rulers: Vec<RulerRecord>,
    pub cultures: Vec<CultureRecord>,
    pub religions: Vec<ReligionRecord>,
    pub religious_groups: Vec<ReligiousGroupRecord>,
    pub languages: Vec<LanguageRecord>,
    pub dialects: Vec<DialectRecord>,
    pub localization: Option<LocalizationSource>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelReport {
    pub localization: MergeReport,
    pub ownership: OwnershipReport,
}

#[derive(Debug, Clone)]
pub struct Model {
    pub tags: TagResolver,
    pub geography: Geography,
    pub countries: Countries,
    pub rulers: RulerRoster,
    pub cultures: KeyedTable<CultureRecord>,
    pub religions: KeyedTable<ReligionRecord>,
    pub religious_groups: KeyedTable<ReligiousGroupRecord>,
    pub languages: KeyedTable<LanguageRecord>,
    pub dialects: KeyedTable<DialectRecord>,
    pub culture_tree: GroupTree,
    pub religion_tree: GroupTree,
    pub language_tree: GroupTree,
    pub report: ModelReport,
}

impl Model {
    pub fn build(inputs: ModelInputs) -> Self {
        let ModelInputs {
            tag_conversions,
            locations,
            countries,
            rulers,
            cultures,
            religions,
            religious_groups,
            languages,
            dialects,
            localization,
        } = inputs;

        let tags = TagResolver::from_records(&tag_conversions);

        let mut normalizer = RecordNormalizer::new(&tags);
        let locations = normalizer.normalize_locations(locations);
        let country_table: KeyedTable<CountryRecord> = countries
            .into_iter()
            .map(|r| normalizer.normalize_country(r))
            .collect();
        let ruler_table: KeyedTable<RulerRecord> = rulers
            .into_iter()
            .map(|r| normalizer.normalize_ruler(r))
            .collect();

        let mut geography = HierarchyBuilder::build(&locations);

        let source = localization.unwrap_or_default();
        let localization = LocalizationMerger::new(&source).merge(&mut geography);

        let mut countries = Countries::build(&country_table, &geography);
        let mut ownership = OwnershipAssigner::assign(&mut geography, &mut countries);
        let rulers = RulerRoster::new(ruler_table);
        ownership.unresolved_rulers = OwnershipAssigner::link_rulers(&rulers, &mut countries);

        let cultures: KeyedTable<CultureRecord> = cultures.into_iter().collect();
        let religions: KeyedTable<ReligionRecord> = religions.into_iter().collect();
        let religious_groups: KeyedTable<ReligiousGroupRecord> =
            religious_groups.into_iter().collect();
        let languages: KeyedTable<LanguageRecord> = languages.into_iter().collect();
        let dialects: KeyedTable<DialectRecord> = dialects.into_iter().collect();

        let culture_tree = culture_tree(&cultures);
        let religion_tree = religion_tree(&religions);
        let language_tree = language_tree(&languages, &dialects);

        tracing::info!(
            locations = geography.locations.len(),
            countries = countries.len(),
            rulers = rulers.len(),
            "model built"
        );

        Self {
            tags,
            geography,
            countries,
            rulers,
            cultures,
            religions,
            religious_groups,
            languages,
            dialects,
            culture_tree,
            religion_tree,
            language_tree,
            report: ModelReport {
                localization,
                ownership,
            },
        }
    }
}
