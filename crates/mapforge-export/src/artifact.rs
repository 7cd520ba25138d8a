//! Logical artifacts and the sinks that receive them.
//!
//! Exporters never choose paths. They produce `(ArtifactName, contents)`
//! pairs; a sink decides where (and whether) those end up.

use std::fmt;
use std::io;

use mapforge_core::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocalizationKind {
    ProvinceNames,
    LocationNames,
    AreaNames,
    RegionNames,
}

impl LocalizationKind {
    pub const ALL: [LocalizationKind; 4] = [
        LocalizationKind::ProvinceNames,
        LocalizationKind::LocationNames,
        LocalizationKind::AreaNames,
        LocalizationKind::RegionNames,
    ];

    pub fn stem(self) -> &'static str {
        match self {
            LocalizationKind::ProvinceNames => "province_names",
            LocalizationKind::LocationNames => "location_names",
            LocalizationKind::AreaNames => "area_names",
            LocalizationKind::RegionNames => "region_names",
        }
    }

    pub fn level(self) -> Level {
        match self {
            LocalizationKind::ProvinceNames => Level::Province,
            LocalizationKind::LocationNames => Level::Location,
            LocalizationKind::AreaNames => Level::Area,
            LocalizationKind::RegionNames => Level::Region,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactName {
    NamedLocations,
    Definitions,
    LocationTemplates,
    ReligiousGroups,
    Religions { group: String },
    Cultures { group: String },
    Language { language: String },
    CountrySetup { superregion: String },
    Characters,
    Countries,
    SeaZones,
    Wastelands,
    Localization {
        kind: LocalizationKind,
        language: String,
    },
}

impl ArtifactName {
    /// Game-engine files carry a UTF-8 BOM; the two plain location lists
    /// do not.
    pub fn wants_bom(&self) -> bool {
        !matches!(self, ArtifactName::SeaZones | ArtifactName::Wastelands)
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactName::NamedLocations => write!(f, "named-locations"),
            ArtifactName::Definitions => write!(f, "definitions"),
            ArtifactName::LocationTemplates => write!(f, "location-templates"),
            ArtifactName::ReligiousGroups => write!(f, "religious-groups"),
            ArtifactName::Religions { group } => write!(f, "religions/{group}"),
            ArtifactName::Cultures { group } => write!(f, "cultures/{group}"),
            ArtifactName::Language { language } => write!(f, "languages/{language}"),
            ArtifactName::CountrySetup { superregion } => write!(f, "country-setup/{superregion}"),
            ArtifactName::Characters => write!(f, "characters"),
            ArtifactName::Countries => write!(f, "countries"),
            ArtifactName::SeaZones => write!(f, "sea-zones"),
            ArtifactName::Wastelands => write!(f, "wastelands"),
            ArtifactName::Localization { kind, language } => {
                write!(f, "localization/{language}/{}", kind.stem())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: ArtifactName,
    pub contents: String,
}

impl Artifact {
    pub fn new(name: ArtifactName, contents: impl Into<String>) -> Self {
        Self {
            name,
            contents: contents.into(),
        }
    }
}

/// Destination for rendered artifacts.
pub trait ArtifactSink {
    fn write(&mut self, artifact: &Artifact) -> io::Result<()>;
}

/// Keeps every artifact in memory, in write order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    artifacts: Vec<Artifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &ArtifactName) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|a| &a.name == name)
            .map(|a| a.contents.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &ArtifactName> {
        self.artifacts.iter().map(|a| &a.name)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, artifact: &Artifact) -> io::Result<()> {
        self.artifacts.push(artifact.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plain_lists_skip_the_bom() {
        assert!(ArtifactName::Definitions.wants_bom());
        assert!(ArtifactName::Localization {
            kind: LocalizationKind::AreaNames,
            language: "english".to_string()
        }
        .wants_bom());
        assert!(!ArtifactName::SeaZones.wants_bom());
        assert!(!ArtifactName::Wastelands.wants_bom());
    }

    #[test]
    fn memory_sink_keeps_write_order() {
        let mut sink = MemorySink::new();
        sink.write(&Artifact::new(ArtifactName::Countries, "b")).unwrap();
        sink.write(&Artifact::new(ArtifactName::Characters, "a")).unwrap();
        let names: Vec<String> = sink.names().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["countries", "characters"]);
        assert_eq!(sink.get(&ArtifactName::Characters), Some("a"));
        assert_eq!(sink.get(&ArtifactName::SeaZones), None);
    }
}
