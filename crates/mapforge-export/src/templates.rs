//! The template set used by the exporters.
//!
//! Every kind has a built-in text compiled into the crate. A caller may
//! override any of them; overrides are parsed against the same schema, so a
//! stray `PH_*` token is rejected before anything is rendered.

use mapforge_template::{FieldValues, Template, TemplateSchema};

use crate::error::{ExportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateKind {
    Religion = 0,
    Culture = 1,
    Language = 2,
    Dialect = 3,
    CountrySetup = 4,
    Character = 5,
    CountriesFile = 6,
    CountryEntry = 7,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 8] = [
        TemplateKind::Religion,
        TemplateKind::Culture,
        TemplateKind::Language,
        TemplateKind::Dialect,
        TemplateKind::CountrySetup,
        TemplateKind::Character,
        TemplateKind::CountriesFile,
        TemplateKind::CountryEntry,
    ];

    /// File name used for overrides in a template directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::Religion => "anb_religion_template.txt",
            TemplateKind::Culture => "anb_culture_template.txt",
            TemplateKind::Language => "anb_language_template.txt",
            TemplateKind::Dialect => "anb_dialect_template.txt",
            TemplateKind::CountrySetup => "anb_country_setup_template.txt",
            TemplateKind::Character => "anb_character_template.txt",
            TemplateKind::CountriesFile => "anb_10_countries_template_file.txt",
            TemplateKind::CountryEntry => "anb_10_countries_template_country.txt",
        }
    }

    pub fn builtin_text(self) -> &'static str {
        match self {
            TemplateKind::Religion => include_str!("../templates/anb_religion_template.txt"),
            TemplateKind::Culture => include_str!("../templates/anb_culture_template.txt"),
            TemplateKind::Language => include_str!("../templates/anb_language_template.txt"),
            TemplateKind::Dialect => include_str!("../templates/anb_dialect_template.txt"),
            TemplateKind::CountrySetup => {
                include_str!("../templates/anb_country_setup_template.txt")
            }
            TemplateKind::Character => include_str!("../templates/anb_character_template.txt"),
            TemplateKind::CountriesFile => {
                include_str!("../templates/anb_10_countries_template_file.txt")
            }
            TemplateKind::CountryEntry => {
                include_str!("../templates/anb_10_countries_template_country.txt")
            }
        }
    }

    pub fn schema(self) -> TemplateSchema {
        let schema = TemplateSchema::new();
        match self {
            TemplateKind::Religion => schema
                .required("PH_RELIGION_NAME")
                .required("PH_RELIGION_GROUP")
                .required("PH_RELIGION_COLOR")
                .optional_inline("PH_ENABLE"),
            TemplateKind::Culture => schema
                .required("PH_CULTURE_NAME")
                .required("PH_CULTURE_GROUP")
                .required("PH_LANGUAGE_NAME")
                .required("PH_COLOR"),
            TemplateKind::Language => schema
                .required("PH_LANGUAGE_NAME")
                .required("PH_COLOR")
                .required("PH_DIALECTS"),
            TemplateKind::Dialect => schema.required("PH_DIALECT"),
            TemplateKind::CountrySetup => schema
                .required("PH_COUNTRY_TAG")
                .required("PH_COLOR")
                .required("PH_CULTURE")
                .required("PH_RELIGION"),
            TemplateKind::Character => schema
                .required("PH_CHARACTER_TAG")
                .required("PH_FIRST_NAME")
                .required("PH_CULTURE")
                .required("PH_RELIGION")
                .required("PH_BIRTH_DATE")
                .required("PH_PLACE_OF_BIRTH")
                .required("PH_DYNASTY")
                .required("PH_TAG")
                .optional_line("PH_NICKNAME")
                .optional_line("PH_FEMALE")
                .optional_line("PH_STATS")
                .optional_line("PH_DEATH_DATE")
                .optional_line("PH_REIGN_START")
                .optional_line("PH_REIGN_END"),
            TemplateKind::CountriesFile => schema.required("PH_COUNTRIES"),
            TemplateKind::CountryEntry => schema
                .required("PH_COUNTRY_TAG")
                .required("PH_CAPITAL")
                .required("PH_COURT_LANGUAGE")
                .required("PH_RULER_TERMS")
                .optional_line("PH_OWNED_CORE_PROVINCES")
                .optional_line("PH_OWNED_NON_CORE_PROVINCES")
                .optional_line("PH_UNOWNED_CORE_PROVINCES"),
        }
    }

    fn parse(self, text: &str) -> Result<Template> {
        Template::parse(text, &self.schema()).map_err(|source| ExportError::Template {
            template: self.file_name(),
            source,
        })
    }
}

/// One parsed template per [`TemplateKind`].
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: Vec<Template>,
}

impl TemplateSet {
    pub fn builtin() -> Result<Self> {
        Self::with_overrides(|_| None)
    }

    /// Parse `lookup(kind)` where it returns text, the built-in otherwise.
    pub fn with_overrides<F>(mut lookup: F) -> Result<Self>
    where
        F: FnMut(TemplateKind) -> Option<String>,
    {
        let mut templates = Vec::with_capacity(TemplateKind::ALL.len());
        for kind in TemplateKind::ALL {
            let template = match lookup(kind) {
                Some(text) => {
                    tracing::debug!(template = kind.file_name(), "using template override");
                    kind.parse(&text)?
                }
                None => kind.parse(kind.builtin_text())?,
            };
            templates.push(template);
        }
        Ok(Self { templates })
    }

    pub fn get(&self, kind: TemplateKind) -> &Template {
        &self.templates[kind as usize]
    }

    pub fn render(&self, kind: TemplateKind, values: &FieldValues) -> Result<String> {
        self.get(kind)
            .render(values)
            .map_err(|source| ExportError::Template {
                template: kind.file_name(),
                source,
            })
    }
}
