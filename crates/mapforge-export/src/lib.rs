//! Mapforge export: model → data-pack artifacts.
//!
//! Each module renders one family of artifacts from a built
//! [`mapforge_core::Model`]:
//!
//! - `geography`: named locations, definitions, location templates, sea
//!   zones, wastelands
//! - `groups`: religious groups, religions, cultures, languages
//! - `countries`: per-superregion country setup, the countries start file
//! - `characters`: ruler definitions
//! - `localization`: province/location/area/region name files
//!
//! Output is a list of [`Artifact`]s named by [`ArtifactName`]. Where they
//! end up is the [`ArtifactSink`]'s business.

pub mod artifact;
pub mod characters;
pub mod countries;
pub mod error;
pub mod geography;
pub mod groups;
pub mod localization;
pub mod pipeline;
pub mod templates;

pub use artifact::{Artifact, ArtifactName, ArtifactSink, LocalizationKind, MemorySink};
pub use error::{ExportError, Result};
pub use pipeline::{emit_all, run, write_all, EmitOptions, EmitSummary, DEFAULT_LANGUAGE};
pub use templates::{TemplateKind, TemplateSet};
