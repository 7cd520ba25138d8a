//! Mapforge core: records → hierarchy → ownership.
//!
//! Turns flat map/country/ruler records into a six-level geographic tree
//! (continent down to location), a country table with ownership lists, a
//! sorted ruler roster and three Group → Member trees.
//!
//! ## Pipeline
//!
//! 1. [`TagResolver`]: old tag → new tag
//! 2. [`RecordNormalizer`]: tag conversion, name dedup, placeholder grouping
//! 3. [`HierarchyBuilder`]: sorted get-or-create per level
//! 4. [`LocalizationMerger`]: numeric-id keyed display text
//! 5. [`OwnershipAssigner`]: owned-core / owned-non-core / unowned-core
//! 6. group trees for cultures, religions and languages
//!
//! [`Model::build`] runs all of them. No stage fails on bad data: blanks
//! become placeholders and unresolvable references are dropped.

pub mod filter;
pub mod groups;
pub mod hierarchy;
pub mod localization;
pub mod model;
pub mod normalize;
pub mod ownership;
pub mod records;
pub mod registry;
pub mod table;
pub mod tags;

pub use filter::LocationFilter;
pub use groups::{culture_tree, language_tree, religion_tree, GroupTree};
pub use hierarchy::{Geography, HierarchyBuilder, Level, LocationData};
pub use localization::{LocalizationMerger, LocalizationSource, MergeReport};
pub use model::{Model, ModelInputs, ModelReport};
pub use normalize::{dedup_name, NormalizedLocation, RecordNormalizer};
pub use ownership::{
    classify_holding, Countries, Country, CountryId, Holding, OwnershipAssigner, OwnershipReport,
    RulerId, RulerRoster,
};
pub use records::{
    normalize_color, or_placeholder, CountryRecord, CultureRecord, DialectRecord, LanguageRecord,
    LocationRecord, ReligionRecord, ReligiousGroupRecord, RulerRecord, TagConversionRecord,
    DEFAULT_COLOR,
};
pub use registry::{second_order_suffix, Node, NodeId, Registry};
pub use table::{Keyed, KeyedTable};
pub use tags::TagResolver;
