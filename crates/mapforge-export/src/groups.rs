//! Religion, culture and language artifacts.

use std::fmt::Write as _;

use mapforge_core::{normalize_color, or_placeholder, Model};
use mapforge_template::FieldValues;

use crate::artifact::{Artifact, ArtifactName};
use crate::error::Result;
use crate::templates::{TemplateKind, TemplateSet};

/// `(1, 2, 3)` → `rgb { 1 2 3 }`.
pub fn rgb(raw: &str) -> String {
    format!("rgb {{ {} }}", normalize_color(raw))
}

pub fn religious_groups(model: &Model) -> Artifact {
    let mut out = String::new();
    for group in model
        .religious_groups
        .iter()
        .filter(|g| !g.religious_group.trim().is_empty())
    {
        let _ = write!(
            out,
            "{} = {{\n\tcolor = {}\n\tconvert_slaves_at_start = {}\n}}\n\n",
            group.religious_group.trim(),
            rgb(&group.color),
            or_placeholder(group.convert_slaves_at_start.trim(), "no"),
        );
    }
    Artifact::new(ArtifactName::ReligiousGroups, out)
}

/// One artifact per religious group, one rendered block per religion.
pub fn religions(model: &Model, templates: &TemplateSet) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for (id, group) in model.religion_tree.groups() {
        let mut out = String::new();
        for member in model.religion_tree.members_of(id) {
            let record = model.religions.get(&member.name).cloned().unwrap_or_default();
            let enable = record.enable.trim();
            let mut values = FieldValues::new();
            values
                .set("PH_RELIGION_NAME", member.name.as_str())
                .set("PH_RELIGION_GROUP", group.name.as_str())
                .set("PH_RELIGION_COLOR", rgb(&record.color))
                .set_optional(
                    "PH_ENABLE",
                    (!enable.is_empty()).then(|| format!("\n\tenable = {enable}\n")),
                );
            out.push_str(&templates.render(TemplateKind::Religion, &values)?);
        }
        artifacts.push(Artifact::new(
            ArtifactName::Religions {
                group: group.name.clone(),
            },
            out,
        ));
    }
    Ok(artifacts)
}

/// One artifact per culture group.
pub fn cultures(model: &Model, templates: &TemplateSet) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for (id, group) in model.culture_tree.groups() {
        let mut out = String::new();
        for member in model.culture_tree.members_of(id) {
            let record = model.cultures.get(&member.name).cloned().unwrap_or_default();
            let mut values = FieldValues::new();
            values
                .set("PH_CULTURE_NAME", member.name.as_str())
                .set("PH_CULTURE_GROUP", group.name.as_str())
                .set(
                    "PH_LANGUAGE_NAME",
                    or_placeholder(record.language.trim(), "unknown_language"),
                )
                .set("PH_COLOR", rgb(&record.color));
            out.push_str(&templates.render(TemplateKind::Culture, &values)?);
        }
        artifacts.push(Artifact::new(
            ArtifactName::Cultures {
                group: group.name.clone(),
            },
            out,
        ));
    }
    Ok(artifacts)
}

/// One artifact per language, dialect blocks joined by newlines.
pub fn languages(model: &Model, templates: &TemplateSet) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for (id, language) in model.language_tree.groups() {
        let dialects = model
            .language_tree
            .members_of(id)
            .map(|dialect| {
                templates.render(
                    TemplateKind::Dialect,
                    &FieldValues::new().with("PH_DIALECT", dialect.name.as_str()),
                )
            })
            .collect::<Result<Vec<_>>>()?
            .join("\n");

        let color = model
            .languages
            .get(&language.name)
            .map(|l| l.color.as_str())
            .unwrap_or_default();
        let values = FieldValues::new()
            .with("PH_LANGUAGE_NAME", language.name.as_str())
            .with("PH_COLOR", rgb(color))
            .with("PH_DIALECTS", dialects);
        artifacts.push(Artifact::new(
            ArtifactName::Language {
                language: language.name.clone(),
            },
            templates.render(TemplateKind::Language, &values)?,
        ));
    }
    Ok(artifacts)
}
