//! Localization files.
//!
//! Provinces and locations without merged text are skipped. Areas and
//! regions always carry text after the merge (their `UNKNOWN` fallback), so
//! every one of them gets a line.

use std::fmt::Write as _;

use mapforge_core::Geography;

use crate::artifact::{Artifact, ArtifactName, LocalizationKind};

pub fn localization_file(geography: &Geography, kind: LocalizationKind, language: &str) -> Artifact {
    let level = kind.level();
    let mut out = format!("l_{language}:\n");
    for (_, node) in geography.level(level).iter() {
        let text = match &node.loc {
            Some(text) => text.clone(),
            None if level.is_grouping() => level.unknown_loc(),
            None => continue,
        };
        let _ = writeln!(out, " {}: \"{}\"", node.name, text);
    }
    Artifact::new(
        ArtifactName::Localization {
            kind,
            language: language.to_string(),
        },
        out,
    )
}

pub fn localization_files(geography: &Geography, language: &str) -> Vec<Artifact> {
    LocalizationKind::ALL
        .iter()
        .map(|&kind| localization_file(geography, kind, language))
        .collect()
}
