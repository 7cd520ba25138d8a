//! Full export: every artifact of a model, handed to a sink.

use mapforge_core::Model;

use crate::artifact::{Artifact, ArtifactSink};
use crate::error::{ExportError, Result};
use crate::templates::TemplateSet;
use crate::{characters, countries, geography, groups, localization};

pub const DEFAULT_LANGUAGE: &str = "english";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Language used in localization headers and artifact names.
    pub language: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub artifacts: usize,
    pub bytes: usize,
}

/// Render every artifact, in a fixed order.
pub fn emit_all(
    model: &Model,
    templates: &TemplateSet,
    options: &EmitOptions,
) -> Result<Vec<Artifact>> {
    let g = &model.geography;
    let mut artifacts = vec![
        geography::named_locations(g),
        geography::definitions(g),
        geography::location_templates(g),
        groups::religious_groups(model),
    ];
    artifacts.extend(groups::religions(model, templates)?);
    artifacts.extend(groups::cultures(model, templates)?);
    artifacts.extend(groups::languages(model, templates)?);
    artifacts.extend(countries::country_setups(model, templates)?);
    artifacts.push(characters::characters(model, templates)?);
    artifacts.push(countries::countries_file(model, templates)?);
    artifacts.push(geography::sea_zones(g));
    artifacts.push(geography::wastelands(g));
    artifacts.extend(localization::localization_files(g, &options.language));
    tracing::debug!(artifacts = artifacts.len(), "rendered artifacts");
    Ok(artifacts)
}

pub fn write_all<S>(artifacts: &[Artifact], sink: &mut S) -> Result<EmitSummary>
where
    S: ArtifactSink + ?Sized,
{
    let mut summary = EmitSummary::default();
    for artifact in artifacts {
        sink.write(artifact).map_err(|source| ExportError::Sink {
            artifact: artifact.name.to_string(),
            source,
        })?;
        summary.artifacts += 1;
        summary.bytes += artifact.contents.len();
    }
    tracing::info!(
        artifacts = summary.artifacts,
        bytes = summary.bytes,
        "wrote artifacts"
    );
    Ok(summary)
}

/// [`emit_all`] followed by [`write_all`].
pub fn run<S>(
    model: &Model,
    templates: &TemplateSet,
    options: &EmitOptions,
    sink: &mut S,
) -> Result<EmitSummary>
where
    S: ArtifactSink + ?Sized,
{
    let artifacts = emit_all(model, templates, options)?;
    write_all(&artifacts, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactName, MemorySink};
    use std::io;

    struct FailingSink;

    impl ArtifactSink for FailingSink {
        fn write(&mut self, _artifact: &Artifact) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn empty_model_still_emits_fixed_artifacts() {
        let model = Model::build(Default::default());
        let templates = TemplateSet::builtin().unwrap();
        let mut sink = MemorySink::new();
        let summary = run(&model, &templates, &EmitOptions::default(), &mut sink).unwrap();

        // 4 map/group files, unknown_superregion setup, characters, countries,
        // two location lists, four localization files
        assert_eq!(summary.artifacts, 13);
        assert_eq!(
            sink.get(&ArtifactName::Countries),
            Some("countries = {\n\tcountries = {\n\t\t\n\t}\n}\n")
        );
    }

    #[test]
    fn sink_errors_name_the_artifact() {
        let model = Model::build(Default::default());
        let templates = TemplateSet::builtin().unwrap();
        let err = run(&model, &templates, &EmitOptions::default(), &mut FailingSink).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Sink { ref artifact, .. } if artifact == "named-locations"
        ));
    }
}
