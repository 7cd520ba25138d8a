//! Ruler character definitions.

use mapforge_core::{or_placeholder, Model, RulerRecord};
use mapforge_template::FieldValues;

use crate::artifact::{Artifact, ArtifactName};
use crate::error::Result;
use crate::templates::{TemplateKind, TemplateSet};

const UNKNOWN: &str = "???";
const DEFAULT_BIRTH_DATE: &str = "1.1.1";

fn stat(raw: &str) -> &str {
    or_placeholder(raw.trim(), "0")
}

fn optional_line(key: &str, raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| format!("\t\t{key} = {value}"))
}

/// Field values for one ruler.
pub fn character_values(ruler: &RulerRecord) -> FieldValues {
    let nickname = ruler.nickname.trim();
    let has_stats = [&ruler.adm, &ruler.dip, &ruler.mil]
        .iter()
        .any(|s| !s.trim().is_empty());

    let mut values = FieldValues::new();
    values
        .set("PH_CHARACTER_TAG", ruler.character_tag.as_str())
        .set("PH_FIRST_NAME", or_placeholder(ruler.first_name.trim(), UNKNOWN))
        .set("PH_CULTURE", or_placeholder(ruler.culture.trim(), UNKNOWN))
        .set("PH_RELIGION", or_placeholder(ruler.religion.trim(), UNKNOWN))
        .set(
            "PH_BIRTH_DATE",
            or_placeholder(ruler.birth_date.trim(), DEFAULT_BIRTH_DATE),
        )
        .set(
            "PH_PLACE_OF_BIRTH",
            or_placeholder(ruler.birth_place.trim(), UNKNOWN),
        )
        .set("PH_DYNASTY", or_placeholder(ruler.dynasty.trim(), UNKNOWN))
        .set("PH_TAG", or_placeholder(ruler.tag.trim(), UNKNOWN))
        .set_optional(
            "PH_NICKNAME",
            (!nickname.is_empty())
                .then(|| format!("\t\tnickname = {{ {} }}", nickname.replace('\'', ""))),
        )
        .set_optional(
            "PH_FEMALE",
            (ruler.female.trim() == "yes").then(|| "\t\tfemale = yes".to_string()),
        )
        .set_optional(
            "PH_STATS",
            has_stats.then(|| {
                format!(
                    "\t\tadm = {} dip = {} mil = {}",
                    stat(&ruler.adm),
                    stat(&ruler.dip),
                    stat(&ruler.mil)
                )
            }),
        )
        .set_optional("PH_DEATH_DATE", optional_line("death_date", &ruler.death_date))
        .set_optional(
            "PH_REIGN_START",
            optional_line("ruler_term_start", &ruler.ruler_term_start),
        )
        .set_optional(
            "PH_REIGN_END",
            optional_line("ruler_term_end", &ruler.ruler_term_end),
        );
    values
}

/// Every ruler in roster order. Hyphens in each rendered block become
/// underscores.
pub fn characters(model: &Model, templates: &TemplateSet) -> Result<Artifact> {
    let mut out = String::new();
    for (_, ruler) in model.rulers.iter() {
        let block = templates.render(TemplateKind::Character, &character_values(ruler))?;
        out.push_str(&block.replace('-', "_"));
    }
    Ok(Artifact::new(ArtifactName::Characters, out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(ruler: &RulerRecord) -> String {
        let templates = TemplateSet::builtin().unwrap();
        templates
            .render(TemplateKind::Character, &character_values(ruler))
            .unwrap()
    }

    #[test]
    fn sparse_ruler_gets_defaults_and_no_optional_lines() {
        let text = render(&RulerRecord {
            character_tag: "LOR_ruler".to_string(),
            ..Default::default()
        });
        assert_eq!(
            text,
            "\tLOR_ruler = {\n\t\tfirst_name = ???\n\t\tculture = ???\n\t\treligion = ???\n\t\tbirth_date = 1.1.1\n\t\tbirth_place = ???\n\t\tdynasty = ???\n\t\tcountry = ???\n\t}\n"
        );
    }

    #[test]
    fn full_ruler_fills_every_optional_line() {
        let text = render(&RulerRecord {
            character_tag: "LOR_ruler".to_string(),
            tag: "LOR".to_string(),
            first_name: "Lorenan".to_string(),
            nickname: "the Lion's Heart".to_string(),
            female: "yes".to_string(),
            adm: "3".to_string(),
            mil: "5".to_string(),
            death_date: "1450.1.1".to_string(),
            ruler_term_start: "1420.1.1".to_string(),
            ruler_term_end: "1450.1.1".to_string(),
            ..Default::default()
        });
        assert!(text.contains("\t\tnickname = { the Lions Heart }\n"));
        assert!(text.contains("\t\tfemale = yes\n"));
        assert!(text.contains("\t\tadm = 3 dip = 0 mil = 5\n"));
        assert!(text.contains("\t\tdeath_date = 1450.1.1\n"));
        assert!(text.contains("\t\truler_term_start = 1420.1.1\n\t\truler_term_end = 1450.1.1\n"));
        assert!(text.contains("\t\tcountry = LOR\n"));
    }

    #[test]
    fn female_requires_literal_yes() {
        let text = render(&RulerRecord {
            female: "no".to_string(),
            ..Default::default()
        });
        assert!(!text.contains("female"));
    }
}
