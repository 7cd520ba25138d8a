//! Location queries over raw records.

use crate::records::LocationRecord;

/// Conjunction of exact field matches. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    pub owner: Option<String>,
    /// Tag that must appear in the record's core list.
    pub core: Option<String>,
    pub continent: Option<String>,
    pub superregion: Option<String>,
    pub region: Option<String>,
    pub area: Option<String>,
    pub religion: Option<String>,
    pub culture: Option<String>,
    pub location_type: Option<String>,
}

fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
    wanted.as_deref().map_or(true, |w| w == actual)
}

impl LocationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, record: &LocationRecord) -> bool {
        field_matches(&self.owner, &record.owner)
            && field_matches(&self.continent, &record.continent)
            && field_matches(&self.superregion, &record.superregion)
            && field_matches(&self.region, &record.region)
            && field_matches(&self.area, &record.area)
            && field_matches(&self.religion, &record.religion)
            && field_matches(&self.culture, &record.culture)
            && field_matches(&self.location_type, &record.location_type)
            && self
                .core
                .as_deref()
                .map_or(true, |tag| record.core_tags().contains(&tag))
    }

    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a LocationRecord>
    where
        I: IntoIterator<Item = &'a LocationRecord>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
