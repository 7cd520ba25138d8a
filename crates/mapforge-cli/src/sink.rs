//! Writes artifacts into the game-pack directory layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mapforge_export::{Artifact, ArtifactName, ArtifactSink};

const BOM: &str = "\u{feff}";

#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    bom: bool,
    written: Vec<PathBuf>,
    overwritten: usize,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>, bom: bool) -> Self {
        Self {
            root: root.into(),
            bom,
            written: Vec::new(),
            overwritten: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Writes that landed on a path an earlier artifact already used, e.g.
    /// groups `a/b` and `a_b` once separators are flattened.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    pub fn path_for(&self, name: &ArtifactName) -> PathBuf {
        self.root.join(relative_path(name))
    }
}

/// Group, language and superregion names become file stems; path
/// separators in them are flattened.
fn file_stem(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

pub fn relative_path(name: &ArtifactName) -> PathBuf {
    let p = |s: &str| PathBuf::from(s);
    match name {
        ArtifactName::NamedLocations => p("in_game/map_data/named_locations/anb_default.txt"),
        ArtifactName::Definitions => p("in_game/map_data/anb_definitions.txt"),
        ArtifactName::LocationTemplates => p("in_game/map_data/anb_location_templates.txt"),
        ArtifactName::ReligiousGroups => p("in_game/common/religion_groups/anb_default.txt"),
        ArtifactName::Religions { group } => {
            p("in_game/common/religions").join(format!("{}.txt", file_stem(group)))
        }
        ArtifactName::Cultures { group } => {
            p("in_game/common/cultures").join(format!("{}.txt", file_stem(group)))
        }
        ArtifactName::Language { language } => {
            p("in_game/common/languages").join(format!("{}.txt", file_stem(language)))
        }
        ArtifactName::CountrySetup { superregion } => {
            p("in_game/setup/countries").join(format!("{}.txt", file_stem(superregion)))
        }
        ArtifactName::Characters => p("main_menu/setup/start/05_anb_characters.txt"),
        ArtifactName::Countries => p("main_menu/setup/start/10_countries.txt"),
        ArtifactName::SeaZones => p("sea_zones.txt"),
        ArtifactName::Wastelands => p("wasteland.txt"),
        ArtifactName::Localization { kind, language } => {
            let language = file_stem(language);
            p("in_game/localization")
                .join(&language)
                .join(format!("anb_{}_l_{}.yml", kind.stem(), language))
        }
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, artifact: &Artifact) -> io::Result<()> {
        let path = self.path_for(&artifact.name);
        if self.written.contains(&path) {
            tracing::warn!(
                path = %path.display(),
                artifact = %artifact.name,
                "artifact path written twice; earlier file replaced"
            );
            self.overwritten += 1;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if self.bom && artifact.name.wants_bom() {
            let mut bytes = Vec::with_capacity(BOM.len() + artifact.contents.len());
            bytes.extend_from_slice(BOM.as_bytes());
            bytes.extend_from_slice(artifact.contents.as_bytes());
            fs::write(&path, bytes)?;
        } else {
            fs::write(&path, artifact.contents.as_bytes())?;
        }
        tracing::trace!(path = %path.display(), "wrote artifact");
        self.written.push(path);
        Ok(())
    }
}
