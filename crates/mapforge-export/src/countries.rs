//! Country setup files and the countries start file.

use std::fmt::Write as _;

use mapforge_core::{or_placeholder, Country, Model, NodeId};
use mapforge_template::FieldValues;

use crate::artifact::{Artifact, ArtifactName};
use crate::error::Result;
use crate::groups::rgb;
use crate::templates::{TemplateKind, TemplateSet};

/// Setup file for countries whose capital superregion is unknown.
pub const UNKNOWN_SUPERREGION: &str = "unknown_superregion";

fn country_setup_block(country: &Country, templates: &TemplateSet) -> Result<String> {
    let record = &country.record;
    let values = FieldValues::new()
        .with("PH_COUNTRY_TAG", country.tag.as_str())
        .with("PH_COLOR", rgb(&record.color))
        .with(
            "PH_CULTURE",
            or_placeholder(record.culture_definition.trim(), "unknown_culture"),
        )
        .with(
            "PH_RELIGION",
            or_placeholder(record.religion_definition.trim(), "unknown_religion"),
        );
    templates.render(TemplateKind::CountrySetup, &values)
}

/// One artifact per superregion of the geography, in geography order, then
/// the `unknown_superregion` file. A geography superregion that is itself
/// called `unknown_superregion` absorbs the unknown countries instead.
pub fn country_setups(model: &Model, templates: &TemplateSet) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    let mut unknown_emitted = false;

    for (id, superregion) in model.geography.superregions.iter() {
        let mut out = String::new();
        for country in model.countries.in_superregion(Some(id)) {
            out.push_str(&country_setup_block(country, templates)?);
        }
        if superregion.name == UNKNOWN_SUPERREGION {
            for country in model.countries.in_superregion(None) {
                out.push_str(&country_setup_block(country, templates)?);
            }
            unknown_emitted = true;
        }
        artifacts.push(Artifact::new(
            ArtifactName::CountrySetup {
                superregion: superregion.name.clone(),
            },
            out,
        ));
    }

    if !unknown_emitted {
        let mut out = String::new();
        for country in model.countries.in_superregion(None) {
            out.push_str(&country_setup_block(country, templates)?);
        }
        artifacts.push(Artifact::new(
            ArtifactName::CountrySetup {
                superregion: UNKNOWN_SUPERREGION.to_string(),
            },
            out,
        ));
    }
    Ok(artifacts)
}

fn province_lines(model: &Model, locations: &[NodeId]) -> Option<String> {
    if locations.is_empty() {
        return None;
    }
    let lines: Vec<String> = locations
        .iter()
        .map(|&id| format!("\t\t{}", model.geography.locations.get(id).name))
        .collect();
    Some(lines.join("\n"))
}

/// `\t\truler_term = { … }\n` for each of the country's rulers.
pub fn ruler_terms(model: &Model, country: &Country) -> String {
    let mut out = String::new();
    for &id in &country.rulers {
        let ruler = model.rulers.get(id);
        let _ = write!(
            out,
            "\t\truler_term = {{ character = {} start_date = {} ",
            ruler.character_tag,
            ruler.ruler_term_start.trim()
        );
        let end = ruler.ruler_term_end.trim();
        if !end.is_empty() {
            let _ = write!(out, "end_date = {end} ");
        }
        if let Some(first) = ruler.regnal_number.trim().chars().next() {
            let _ = write!(out, "regnal_number = {first} ");
        }
        out.push_str("}\n");
    }
    out
}

fn country_entry(model: &Model, country: &Country, templates: &TemplateSet) -> Result<String> {
    let record = &country.record;
    let mut values = FieldValues::new();
    values
        .set("PH_COUNTRY_TAG", country.tag.as_str())
        .set(
            "PH_CAPITAL",
            or_placeholder(record.capital.trim(), "unknown_capital"),
        )
        .set(
            "PH_COURT_LANGUAGE",
            or_placeholder(record.court_language.trim(), "unknown_court_language"),
        )
        .set_optional(
            "PH_OWNED_CORE_PROVINCES",
            province_lines(model, &country.owned_core),
        )
        .set_optional(
            "PH_OWNED_NON_CORE_PROVINCES",
            province_lines(model, &country.owned_non_core),
        )
        .set_optional(
            "PH_UNOWNED_CORE_PROVINCES",
            province_lines(model, &country.unowned_core),
        )
        .set("PH_RULER_TERMS", ruler_terms(model, country));
    templates.render(TemplateKind::CountryEntry, &values)
}

/// Every country entry, newline-terminated, with each newline followed by
/// two tabs, substituted into the file template.
pub fn countries_file(model: &Model, templates: &TemplateSet) -> Result<Artifact> {
    let mut entries = String::new();
    for (_, country) in model.countries.iter() {
        entries.push_str(&country_entry(model, country, templates)?);
        entries.push('\n');
    }
    let entries = entries.replace('\n', "\n\t\t");
    let contents = templates.render(
        TemplateKind::CountriesFile,
        &FieldValues::new().with("PH_COUNTRIES", entries),
    )?;
    Ok(Artifact::new(ArtifactName::Countries, contents))
}
