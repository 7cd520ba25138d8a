//! CSV tables → core records.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mapforge_core::{LocalizationSource, ModelInputs};
use serde::de::DeserializeOwned;

use crate::config::Config;

/// Rows of `text` deserialized by header name. Headers are trimmed, cells
/// are not; short rows leave the missing columns blank.
pub fn parse_records<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        // header is line 1
        rows.push(row.with_context(|| format!("bad row at line {}", i + 2))?);
    }
    Ok(rows)
}

pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows = parse_records(&text).with_context(|| format!("in {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "read table");
    Ok(rows)
}

pub fn load_inputs(config: &Config) -> Result<ModelInputs> {
    let paths = &config.inputs;
    let localization = match &paths.localization {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read localization {}", path.display()))?;
            Some(LocalizationSource::parse(&text))
        }
        None => None,
    };
    Ok(ModelInputs {
        tag_conversions: read_records(&paths.tag_conversion)?,
        locations: read_records(&paths.locations)?,
        countries: read_records(&paths.countries)?,
        rulers: read_records(&paths.rulers)?,
        cultures: read_records(&paths.cultures)?,
        religions: read_records(&paths.religions)?,
        religious_groups: read_records(&paths.religious_groups)?,
        languages: read_records(&paths.languages)?,
        dialects: read_records(&paths.dialects)?,
        localization,
    })
}
