//! Properties of the assembled model over arbitrary location tables.

use std::collections::{HashMap, HashSet};

use mapforge_core::{
    CountryRecord, HierarchyBuilder, Level, LocationRecord, Model, ModelInputs,
    NormalizedLocation, NodeId, RecordNormalizer, TagResolver,
};
use proptest::prelude::*;

const TAGS: [&str; 4] = ["AAA", "BBB", "CCC", "DDD"];

fn maybe_blank(pattern: &'static str) -> impl Strategy<Value = String> {
    prop_oneof![1 => Just(String::new()), 3 => pattern.prop_map(String::from)]
}

fn tag() -> impl Strategy<Value = String> {
    // "EEE" never has a country row
    prop_oneof![
        4 => prop::sample::select(TAGS.to_vec()).prop_map(String::from),
        1 => Just("EEE".to_string()),
        1 => Just(String::new()),
    ]
}

fn location() -> impl Strategy<Value = LocationRecord> {
    (
        maybe_blank("[ab]"),
        maybe_blank("[cd]"),
        maybe_blank("[ef]"),
        maybe_blank("[gh]"),
        "[p-r]{1,2}",
        "[x-z]{1,2}(-[a-b])?",
        tag(),
        prop::collection::vec(tag(), 0..3),
    )
        .prop_map(
            |(continent, superregion, region, area, province, location_name, owner, cores)| {
                LocationRecord {
                    continent,
                    superregion,
                    region,
                    area,
                    province,
                    location_name,
                    owner,
                    cores: cores.join(","),
                    ..Default::default()
                }
            },
        )
}

fn build(locations: Vec<LocationRecord>) -> Model {
    let countries = TAGS
        .iter()
        .map(|tag| CountryRecord {
            tag: tag.to_string(),
            ..Default::default()
        })
        .collect();
    Model::build(ModelInputs {
        locations,
        countries,
        ..Default::default()
    })
}

fn names(model: &Model, level: Level) -> Vec<String> {
    model
        .geography
        .level(level)
        .iter()
        .map(|(_, node)| node.name.clone())
        .collect()
}

/// Grouping children by parent name: a child is attached under the parent
/// of the row where its name is first seen, and never again.
fn expected_children(sorted: &[&NormalizedLocation]) -> HashMap<(Level, String), Vec<String>> {
    let mut seen: HashSet<(Level, String)> = HashSet::new();
    let mut expected: HashMap<(Level, String), Vec<String>> = HashMap::new();
    for row in sorted {
        let r = &row.record;
        let path = [
            (Level::Continent, &r.continent),
            (Level::Superregion, &r.superregion),
            (Level::Region, &r.region),
            (Level::Area, &r.area),
        ];
        for pair in path.windows(2) {
            let (parent_level, parent) = pair[0];
            let (child_level, child) = pair[1];
            if seen.insert((child_level, child.clone())) {
                expected
                    .entry((parent_level, parent.clone()))
                    .or_default()
                    .push(child.clone());
            }
        }
    }
    expected
}

proptest! {
    #[test]
    fn identical_input_yields_identical_names(
        locations in prop::collection::vec(location(), 0..24),
    ) {
        let first = build(locations.clone());
        let second = build(locations);
        for level in Level::ALL {
            prop_assert_eq!(names(&first, level), names(&second, level));
        }
    }

    #[test]
    fn final_names_are_unique_per_level(
        locations in prop::collection::vec(location(), 0..24),
    ) {
        let model = build(locations.clone());
        for level in Level::ALL {
            let all = names(&model, level);
            let distinct: HashSet<&String> = all.iter().collect();
            prop_assert_eq!(distinct.len(), all.len(), "duplicate at {}", level.label());
        }
        prop_assert_eq!(model.geography.locations.len(), locations.len());
        prop_assert_eq!(model.geography.provinces.len(), locations.len());
    }

    #[test]
    fn children_keep_first_occurrence_order(
        locations in prop::collection::vec(location(), 0..24),
    ) {
        let tags = TagResolver::new();
        let normalized = RecordNormalizer::new(&tags).normalize_locations(locations);
        let g = HierarchyBuilder::build(&normalized);

        let mut sorted: Vec<&NormalizedLocation> = normalized.iter().collect();
        sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        let expected = expected_children(&sorted);

        for level in [Level::Continent, Level::Superregion, Level::Region] {
            let child_level = level.child().expect("grouping level has a child");
            for (_, node) in g.level(level).iter() {
                let actual: Vec<String> = node
                    .children
                    .iter()
                    .map(|child| g.level(child_level).get(*child).name.clone())
                    .collect();
                let want = expected.get(&(level, node.name.clone())).cloned().unwrap_or_default();
                prop_assert_eq!(actual, want, "children of {} {}", level.label(), &node.name);
            }
        }

        // one province and one location per sorted row, in row order
        for (_, area) in g.areas.iter() {
            let want: Vec<NodeId> = sorted
                .iter()
                .enumerate()
                .filter(|(_, row)| row.record.area == area.name)
                .map(|(i, _)| NodeId(i as u32))
                .collect();
            prop_assert_eq!(&area.children, &want, "provinces of area {}", &area.name);
        }
        for (id, province) in g.provinces.iter() {
            prop_assert_eq!(&province.children, &vec![id]);
        }
    }

    #[test]
    fn ownership_partitions_each_owned_location(
        locations in prop::collection::vec(location(), 0..24),
    ) {
        let model = build(locations);
        let countries = &model.countries;
        for (location, _, data) in model.geography.locations() {
            let Some(owner) = data.owner else {
                continue;
            };
            let country = countries.get(owner);
            let in_core = country.owned_core.contains(&location);
            let in_non_core = country.owned_non_core.contains(&location);
            prop_assert!(in_core ^ in_non_core);
            prop_assert_eq!(in_core, data.cores.contains(&owner));
            prop_assert!(!country.unowned_core.contains(&location));

            for claimant in data.cores.iter().filter(|c| **c != owner) {
                prop_assert!(countries.get(*claimant).unowned_core.contains(&location));
            }
        }
    }
}

#[test]
fn duplicate_rows_split_into_distinct_owned_cores() {
    let row = |owner: &str| LocationRecord {
        continent: "A".to_string(),
        province: "P1".to_string(),
        location_name: "L1".to_string(),
        owner: owner.to_string(),
        cores: owner.to_string(),
        ..Default::default()
    };
    let model = Model::build(ModelInputs {
        locations: vec![row("TAG1"), row("TAG2")],
        countries: ["TAG1", "TAG2"]
            .into_iter()
            .map(|tag| CountryRecord {
                tag: tag.to_string(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    });
    let g = &model.geography;

    let l1 = g.locations.id_of("L1").expect("L1");
    let l1_2 = g.locations.id_of("L1_2").expect("L1_2");
    let superregion = g
        .superregions
        .id_of("unknown_A_superregion")
        .expect("synthesized superregion");
    assert_eq!(g.superregions.len(), 1);
    assert_eq!(g.continents.get(g.continents.id_of("A").expect("A")).children, vec![superregion]);

    let tag1 = model.countries.by_tag("TAG1").expect("TAG1");
    let tag2 = model.countries.by_tag("TAG2").expect("TAG2");
    assert_eq!(tag1.owned_core, vec![l1]);
    assert_eq!(tag2.owned_core, vec![l1_2]);
    assert!(tag1.unowned_core.is_empty() && tag2.unowned_core.is_empty());
}
