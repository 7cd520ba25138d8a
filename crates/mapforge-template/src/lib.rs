//! Mapforge placeholder templates
//!
//! Data-pack artifacts (religions, cultures, characters, country setups, ...)
//! are rendered from plain-text templates that contain uppercase `PH_*`
//! placeholder tokens. This crate parses such a template **once** into a
//! token list and renders it in a single pass per entity:
//!
//! - `Required` placeholders are replaced by the field value verbatim.
//! - `OptionalLine` placeholders are replaced by a fully formed line when the
//!   field is present, and the token *plus its trailing newline* disappears
//!   when the field is absent or blank.
//! - `OptionalInline` placeholders are replaced by their value, or by nothing.
//!
//! Because substitution happens on parsed tokens, a replacement value that
//! happens to contain `PH_...` text is never substituted again.

pub mod template;

pub use template::{
    FieldValues, PlaceholderKind, Template, TemplateError, TemplateSchema, Token,
    PLACEHOLDER_MARKER,
};
