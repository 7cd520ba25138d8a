//! Map-data artifacts: named locations, definitions, location templates and
//! the sea-zone / wasteland lists.

use std::fmt::Write as _;

use mapforge_core::{or_placeholder, Geography, Level, LocationRecord, NodeId};

use crate::artifact::{Artifact, ArtifactName};

const PROVINCE_SUFFIX: &str = "_province";

/// Walk the tree depth first, calling `visit(level, id)` on every node.
fn walk(geography: &Geography, mut visit: impl FnMut(Level, NodeId)) {
    fn descend(
        geography: &Geography,
        level: Level,
        id: NodeId,
        visit: &mut dyn FnMut(Level, NodeId),
    ) {
        visit(level, id);
        for (child, _) in geography.children(level, id) {
            if let Some(child_level) = level.child() {
                descend(geography, child_level, child, visit);
            }
        }
    }
    for (continent, _) in geography.continents.iter() {
        descend(geography, Level::Continent, continent, &mut visit);
    }
}

/// `##### continent` … `# province` headers, then `location = hexcode`.
pub fn named_locations(geography: &Geography) -> Artifact {
    let mut out = String::new();
    walk(geography, |level, id| {
        let name = &geography.level(level).get(id).name;
        match level {
            Level::Location => {
                let _ = writeln!(out, "{name} = {}", geography.location_data(id).hexcode);
            }
            _ => {
                let depth = 5 - level as usize;
                let _ = writeln!(out, "{} {name}", "#".repeat(depth));
            }
        }
    });
    Artifact::new(ArtifactName::NamedLocations, out)
}

/// Nested `name = {` blocks; each province is one line listing its
/// locations.
pub fn definitions(geography: &Geography) -> Artifact {
    let mut out = String::new();
    for (continent, node) in geography.continents.iter() {
        let _ = writeln!(out, "{} = {{", node.name);
        for (superregion, node) in geography.children(Level::Continent, continent) {
            let _ = writeln!(out, "\t{} = {{", node.name);
            for (region, node) in geography.children(Level::Superregion, superregion) {
                let _ = writeln!(out, "\t\t{} = {{", node.name);
                for (area, node) in geography.children(Level::Region, region) {
                    let _ = writeln!(out, "\t\t\t{} = {{", node.name);
                    for (province, node) in geography.children(Level::Area, area) {
                        let mut name = node.name.clone();
                        if !name.ends_with(PROVINCE_SUFFIX) {
                            name.push_str(PROVINCE_SUFFIX);
                        }
                        let _ = write!(out, "\t\t\t\t{name} = {{");
                        for (_, location) in geography.children(Level::Province, province) {
                            let _ = write!(out, " {}", location.name);
                        }
                        out.push_str(" }\n");
                    }
                    out.push_str("\t\t\t}\n");
                }
                out.push_str("\t\t}\n");
            }
            out.push_str("\t}\n");
        }
        out.push_str("}\n");
    }
    Artifact::new(ArtifactName::Definitions, out)
}

/// One attribute line for a location; blank optional attributes are left
/// out.
pub fn location_template_line(name: &str, record: &LocationRecord) -> String {
    let mut line = format!("{name} = {{ ");
    let _ = write!(
        line,
        "topography = {} ",
        or_placeholder(record.topography.trim(), "unknown_topography")
    );
    push_attribute(&mut line, "vegetation", &record.vegetation);
    let _ = write!(
        line,
        "climate = {} ",
        or_placeholder(record.climate.trim(), "unknown_climate")
    );
    push_attribute(&mut line, "religion", &record.religion);
    push_attribute(&mut line, "culture", &record.culture);
    push_attribute(&mut line, "raw_material", &record.raw_material);
    if record.harbor_suitability().is_some() {
        push_attribute(
            &mut line,
            "natural_harbor_suitability",
            &record.natural_harbor_suitability,
        );
    }
    line.push_str("}\n");
    line
}

fn push_attribute(line: &mut String, key: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        let _ = write!(line, "{key} = {value} ");
    }
}

pub fn location_templates(geography: &Geography) -> Artifact {
    let mut out = String::new();
    walk(geography, |level, id| {
        let name = &geography.level(level).get(id).name;
        match level {
            Level::Continent => {
                let _ = writeln!(out, "##### Continent: {name}");
            }
            Level::Superregion => {
                let _ = writeln!(out, "#### Superregion: {name}");
            }
            Level::Region => {
                let _ = writeln!(out, "### Region: {name}");
            }
            Level::Area => {
                let _ = writeln!(out, "## Area: {name}");
            }
            Level::Province => {
                let _ = writeln!(out, "# Province: {name}");
            }
            Level::Location => {
                out.push_str(&location_template_line(
                    name,
                    &geography.location_data(id).record,
                ));
            }
        }
    });
    Artifact::new(ArtifactName::LocationTemplates, out)
}

fn location_list(
    geography: &Geography,
    name: ArtifactName,
    keep: impl Fn(&LocationRecord) -> bool,
) -> Artifact {
    let mut out = String::new();
    for (_, node, data) in geography.locations() {
        if keep(&data.record) {
            let _ = writeln!(out, "\t{}", node.name);
        }
    }
    Artifact::new(name, out)
}

pub fn sea_zones(geography: &Geography) -> Artifact {
    location_list(geography, ArtifactName::SeaZones, LocationRecord::is_sea)
}

pub fn wastelands(geography: &Geography) -> Artifact {
    location_list(geography, ArtifactName::Wastelands, LocationRecord::is_wasteland)
}
