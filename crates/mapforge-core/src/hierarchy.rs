//! Geographic containment tree.
//!
//! Continent → Superregion → Region → Area → Province → Location, one
//! [`Registry`] per level. Records are sorted by their containment path
//! (stable, on raw province names) and inserted in that order, so child order
//! everywhere is first-seen order of the sorted input.
//!
//! Grouping levels are get-or-create. Provinces and locations are always
//! created; a name already taken at that level gets a second-order suffix
//! (see [`crate::registry::second_order_suffix`]).

use crate::normalize::NormalizedLocation;
use crate::ownership::CountryId;
use crate::records::{or_placeholder, LocationRecord};
use crate::registry::{Node, NodeId, Registry};

pub const UNKNOWN_HEXCODE: &str = "unknown_hexcode";

// ============================================================================
// Levels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Continent,
    Superregion,
    Region,
    Area,
    Province,
    Location,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Continent,
        Level::Superregion,
        Level::Region,
        Level::Area,
        Level::Province,
        Level::Location,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Level::Continent => "continent",
            Level::Superregion => "superregion",
            Level::Region => "region",
            Level::Area => "area",
            Level::Province => "province",
            Level::Location => "location",
        }
    }

    /// Levels above provinces. These are matched by name during the
    /// localization merge and fall back to an `UNKNOWN <LEVEL>` string.
    pub fn is_grouping(self) -> bool {
        !matches!(self, Level::Province | Level::Location)
    }

    /// Display text for a grouping node with no localization.
    pub fn unknown_loc(self) -> String {
        format!("UNKNOWN {}", self.label().to_uppercase())
    }

    pub fn child(self) -> Option<Level> {
        match self {
            Level::Continent => Some(Level::Superregion),
            Level::Superregion => Some(Level::Region),
            Level::Region => Some(Level::Area),
            Level::Area => Some(Level::Province),
            Level::Province => Some(Level::Location),
            Level::Location => None,
        }
    }
}

// ============================================================================
// Geography
// ============================================================================

/// Per-location payload, indexed in parallel with the location registry.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationData {
    pub hexcode: String,
    pub record: LocationRecord,
    pub owner: Option<CountryId>,
    /// Resolved core claims, deduplicated, in list order.
    pub cores: Vec<CountryId>,
}

#[derive(Debug, Clone, Default)]
pub struct Geography {
    pub continents: Registry,
    pub superregions: Registry,
    pub regions: Registry,
    pub areas: Registry,
    pub provinces: Registry,
    pub locations: Registry,
    pub(crate) location_data: Vec<LocationData>,
}

impl Geography {
    pub fn level(&self, level: Level) -> &Registry {
        match level {
            Level::Continent => &self.continents,
            Level::Superregion => &self.superregions,
            Level::Region => &self.regions,
            Level::Area => &self.areas,
            Level::Province => &self.provinces,
            Level::Location => &self.locations,
        }
    }

    pub fn level_mut(&mut self, level: Level) -> &mut Registry {
        match level {
            Level::Continent => &mut self.continents,
            Level::Superregion => &mut self.superregions,
            Level::Region => &mut self.regions,
            Level::Area => &mut self.areas,
            Level::Province => &mut self.provinces,
            Level::Location => &mut self.locations,
        }
    }

    /// Children of `id` (a node of `level`), resolved in the next level down.
    pub fn children(&self, level: Level, id: NodeId) -> Vec<(NodeId, &Node)> {
        let Some(child_level) = level.child() else {
            return Vec::new();
        };
        let registry = self.level(child_level);
        self.level(level)
            .get(id)
            .children
            .iter()
            .map(|&child| (child, registry.get(child)))
            .collect()
    }

    pub fn location_data(&self, location: NodeId) -> &LocationData {
        &self.location_data[location.index()]
    }

    /// Locations in hierarchy insertion order.
    pub fn locations(&self) -> impl Iterator<Item = (NodeId, &Node, &LocationData)> {
        self.locations
            .iter()
            .zip(self.location_data.iter())
            .map(|((id, node), data)| (id, node, data))
    }

    pub fn counts(&self) -> [(Level, usize); 6] {
        Level::ALL.map(|level| (level, self.level(level).len()))
    }
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    geography: Geography,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort `records` by containment path and insert them in that order.
    pub fn build(records: &[NormalizedLocation]) -> Geography {
        let mut ordered: Vec<&NormalizedLocation> = records.iter().collect();
        ordered.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut builder = Self::new();
        for record in ordered {
            builder.insert(record);
        }
        let geography = builder.finish();
        tracing::debug!(
            continents = geography.continents.len(),
            superregions = geography.superregions.len(),
            regions = geography.regions.len(),
            areas = geography.areas.len(),
            provinces = geography.provinces.len(),
            locations = geography.locations.len(),
            "built geographic hierarchy"
        );
        geography
    }

    /// Insert one record. Callers own the ordering.
    pub fn insert(&mut self, normalized: &NormalizedLocation) -> NodeId {
        let record = &normalized.record;
        let number = record.province_number();
        let g = &mut self.geography;

        let (continent, _) = g.continents.get_or_create(&record.continent, None);
        let superregion = attach(
            &mut g.continents,
            &mut g.superregions,
            continent,
            &record.superregion,
        );
        let region = attach(&mut g.superregions, &mut g.regions, superregion, &record.region);
        let area = attach(&mut g.regions, &mut g.areas, region, &record.area);

        let province = g.provinces.create_unique(&record.province, Some(area));
        g.provinces.get_mut(province).province_number = number;
        g.areas.get_mut(area).children.push(province);

        let location = g.locations.create_unique(&record.location_name, Some(province));
        g.locations.get_mut(location).province_number = number;
        g.provinces.get_mut(province).children.push(location);

        g.location_data.push(LocationData {
            hexcode: or_placeholder(&record.hexcode, UNKNOWN_HEXCODE)
                .trim()
                .to_string(),
            record: record.clone(),
            owner: None,
            cores: Vec::new(),
        });
        location
    }

    pub fn finish(self) -> Geography {
        self.geography
    }
}

fn attach(parents: &mut Registry, children: &mut Registry, parent: NodeId, name: &str) -> NodeId {
    let (id, created) = children.get_or_create(name, Some(parent));
    if created {
        parents.get_mut(parent).children.push(id);
    }
    id
}
