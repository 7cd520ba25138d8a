//! `mapforge.toml` manifest.
//!
//! ```toml
//! [inputs]
//! locations = "data/locations.csv"
//! localization = "data/province_names_l_english.yml"
//!
//! [templates]
//! dir = "templates"
//!
//! [output]
//! dir = "output/game"
//! bom = true
//!
//! [localization]
//! language = "english"
//! ```
//!
//! Every key is optional. Relative paths resolve against the manifest's
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG: &str = "mapforge.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inputs: InputPaths,
    pub templates: TemplateConfig,
    pub output: OutputConfig,
    pub localization: LocalizationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPaths {
    pub tag_conversion: PathBuf,
    pub locations: PathBuf,
    pub countries: PathBuf,
    pub rulers: PathBuf,
    pub cultures: PathBuf,
    pub religions: PathBuf,
    pub religious_groups: PathBuf,
    pub languages: PathBuf,
    pub dialects: PathBuf,
    /// Province-id keyed localization source; no file means every grouping
    /// node gets its `UNKNOWN` text and nothing else is localized.
    pub localization: Option<PathBuf>,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            tag_conversion: PathBuf::from("tag_conversion.csv"),
            locations: PathBuf::from("locations.csv"),
            countries: PathBuf::from("countries.csv"),
            rulers: PathBuf::from("rulers.csv"),
            cultures: PathBuf::from("cultures.csv"),
            religions: PathBuf::from("religions.csv"),
            religious_groups: PathBuf::from("religious_groups.csv"),
            languages: PathBuf::from("languages.csv"),
            dialects: PathBuf::from("dialects.csv"),
            localization: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of template overrides. Missing files use the built-ins.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Prefix game-engine files with a UTF-8 BOM.
    pub bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            bom: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Unset: the localization source's `l_<lang>:` header, then `english`.
    pub language: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&text, base)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(text: &str, base: &Path) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.resolve_paths(base);
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let inputs = &mut self.inputs;
        for path in [
            &mut inputs.tag_conversion,
            &mut inputs.locations,
            &mut inputs.countries,
            &mut inputs.rulers,
            &mut inputs.cultures,
            &mut inputs.religions,
            &mut inputs.religious_groups,
            &mut inputs.languages,
            &mut inputs.dialects,
            &mut self.output.dir,
        ] {
            resolve(base, path);
        }
        for path in [&mut inputs.localization, &mut self.templates.dir]
            .into_iter()
            .flatten()
        {
            resolve(base, path);
        }
    }
}

fn resolve(base: &Path, path: &mut PathBuf) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_manifest_uses_defaults() {
        let config = Config::from_toml_str("", Path::new("/data")).unwrap();
        assert_eq!(config.inputs.locations, PathBuf::from("/data/locations.csv"));
        assert_eq!(config.output.dir, PathBuf::from("/data/output"));
        assert!(config.output.bom);
        assert_eq!(config.localization.language, None);
        assert_eq!(config.templates.dir, None);
        assert_eq!(config.inputs.localization, None);
    }

    #[test]
    fn relative_paths_resolve_against_manifest_dir() {
        let text = r#"
            [inputs]
            locations = "csv/locs.csv"
            countries = "/abs/countries.csv"
            localization = "loc/names.yml"

            [templates]
            dir = "tpl"

            [output]
            dir = "out"
            bom = false

            [localization]
            language = "french"
        "#;
        let config = Config::from_toml_str(text, Path::new("/pack")).unwrap();
        assert_eq!(config.inputs.locations, PathBuf::from("/pack/csv/locs.csv"));
        assert_eq!(config.inputs.countries, PathBuf::from("/abs/countries.csv"));
        assert_eq!(
            config.inputs.localization,
            Some(PathBuf::from("/pack/loc/names.yml"))
        );
        assert_eq!(config.templates.dir, Some(PathBuf::from("/pack/tpl")));
        assert!(!config.output.bom);
        assert_eq!(config.localization.language.as_deref(), Some("french"));
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(Config::from_toml_str("[output]\nbom = \"sometimes\"\n", Path::new(".")).is_err());
    }
}
