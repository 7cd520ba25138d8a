//! Template parsing and rendering.
//!
//! A template is parsed against a [`TemplateSchema`] that declares every
//! placeholder it may contain and how each behaves when its field is absent.
//! Parsing uses longest-match on the declared names, so `PH_CULTURE_NAME` is
//! never mistaken for `PH_CULTURE` followed by `_NAME`.

use std::collections::HashMap;

use nom::{
    bytes::complete::{tag, take_until, take_while},
    combinator::recognize,
    sequence::pair,
    IResult,
};
use thiserror::Error;

/// Every placeholder token starts with this marker.
pub const PLACEHOLDER_MARKER: &str = "PH_";

// ============================================================================
// Schema
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Always substituted; rendering fails without a value.
    Required,
    /// Substituted when present; otherwise the token and the newline that
    /// follows it are removed.
    OptionalLine,
    /// Substituted when present; otherwise replaced by nothing.
    OptionalInline,
}

/// The set of placeholders a template is allowed to contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSchema {
    /// Sorted longest-name first.
    placeholders: Vec<(String, PlaceholderKind)>,
}

impl TemplateSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, name: &str) -> Self {
        self.declare(name, PlaceholderKind::Required)
    }

    pub fn optional_line(self, name: &str) -> Self {
        self.declare(name, PlaceholderKind::OptionalLine)
    }

    pub fn optional_inline(self, name: &str) -> Self {
        self.declare(name, PlaceholderKind::OptionalInline)
    }

    /// Declare (or redeclare) a placeholder.
    pub fn declare(mut self, name: &str, kind: PlaceholderKind) -> Self {
        self.placeholders.retain(|(existing, _)| existing != name);
        self.placeholders.push((name.to_string(), kind));
        self.placeholders
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        self
    }

    pub fn kind_of(&self, name: &str) -> Option<PlaceholderKind> {
        self.placeholders
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kind)| *kind)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.placeholders.iter().map(|(n, _)| n.as_str())
    }

    fn match_at<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str, PlaceholderKind)> {
        for (name, kind) in &self.placeholders {
            if let Ok((rest, matched)) = tag::<_, _, nom::error::Error<&str>>(name.as_str())(input)
            {
                return Some((rest, matched, *kind));
            }
        }
        None
    }
}

// ============================================================================
// Values
// ============================================================================

/// Field values for one render call, keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Set an optional field; `None` clears any previous value.
    pub fn set_optional(&mut self, name: &str, value: Option<String>) -> &mut Self {
        match value {
            Some(v) => {
                self.values.insert(name.to_string(), v);
            }
            None => {
                self.values.remove(name);
            }
        }
        self
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The value if it is set and not blank.
    pub fn present(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }
}

// ============================================================================
// Template
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("undeclared placeholder `{name}` on line {line}")]
    UndeclaredPlaceholder { name: String, line: usize },
    #[error("no value for required placeholder `{name}`")]
    MissingField { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Placeholder { name: String, kind: PlaceholderKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    tokens: Vec<Token>,
}

fn marker_word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        tag(PLACEHOLDER_MARKER),
        take_while(|c: char| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'),
    ))(input)
}

fn literal(input: &str) -> IResult<&str, &str> {
    take_until(PLACEHOLDER_MARKER)(input)
}

/// `PH_` inside a longer word (`GRAPH_ON`) is plain text unless declared.
fn inside_word(text: &str, rest: &str) -> bool {
    text[..text.len() - rest.len()]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn line_of(text: &str, rest: &str) -> usize {
    text[..text.len() - rest.len()].matches('\n').count() + 1
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Literal(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(Token::Literal(text.to_string()));
    }
}

fn strip_leading_newline(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}

impl Template {
    /// Parse `text`, failing on any standalone `PH_*` word the schema does
    /// not declare. Declared names match anywhere, even mid-word.
    pub fn parse(text: &str, schema: &TemplateSchema) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut input = text;

        while !input.is_empty() {
            if let Some((rest, name, kind)) = schema.match_at(input) {
                tokens.push(Token::Placeholder {
                    name: name.to_string(),
                    kind,
                });
                input = rest;
                continue;
            }

            if let Ok((_, word)) = marker_word(input) {
                if inside_word(text, input) {
                    push_literal(&mut tokens, PLACEHOLDER_MARKER);
                    input = &input[PLACEHOLDER_MARKER.len()..];
                    continue;
                }
                return Err(TemplateError::UndeclaredPlaceholder {
                    name: word.to_string(),
                    line: line_of(text, input),
                });
            }

            match literal(input) {
                Ok((rest, lit)) => {
                    push_literal(&mut tokens, lit);
                    input = rest;
                }
                Err(_) => {
                    push_literal(&mut tokens, input);
                    input = "";
                }
            }
        }

        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Distinct placeholders in order of first appearance.
    pub fn placeholders(&self) -> Vec<(&str, PlaceholderKind)> {
        let mut out: Vec<(&str, PlaceholderKind)> = Vec::new();
        for token in &self.tokens {
            if let Token::Placeholder { name, kind } = token {
                if !out.iter().any(|(n, _)| n == name) {
                    out.push((name.as_str(), *kind));
                }
            }
        }
        out
    }

    /// Render the template in one pass over its tokens.
    pub fn render(&self, values: &FieldValues) -> Result<String, TemplateError> {
        let mut out = String::new();
        let mut drop_newline = false;

        for token in &self.tokens {
            let skip_newline = std::mem::take(&mut drop_newline);
            match token {
                Token::Literal(text) => {
                    let text = if skip_newline {
                        strip_leading_newline(text)
                    } else {
                        text.as_str()
                    };
                    out.push_str(text);
                }
                Token::Placeholder { name, kind } => match kind {
                    PlaceholderKind::Required => {
                        let value = values
                            .get(name)
                            .ok_or_else(|| TemplateError::MissingField { name: name.clone() })?;
                        out.push_str(value);
                    }
                    PlaceholderKind::OptionalLine => match values.present(name) {
                        Some(value) => out.push_str(value),
                        None => drop_newline = true,
                    },
                    PlaceholderKind::OptionalInline => {
                        if let Some(value) = values.present(name) {
                            out.push_str(value);
                        }
                    }
                },
            }
        }

        Ok(out)
    }
}
