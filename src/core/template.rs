/// Story templates: placeholder parsing and substitution.
use rustc_hash::FxHashSet;
use std::collections::HashMap;
use thiserror::Error;

use crate::schema::story::{FillDiagnostic, Story, StoryDef, StoryField};

/// Placeholder name → fill value.
pub type Values = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("missing input for '{key}'")]
    MissingValue { key: String },
}

/// A segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// A named blank: `{name}`.
    Placeholder(String),
}

/// A parsed pattern. Keeps its source text for the fallback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern string into segments.
    ///
    /// Syntax:
    /// - `{name}` → `Placeholder`, name taken verbatim (case and spaces kept)
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    ///
    /// Empty `{}`, nested, unclosed and stray closing braces are errors.
    pub fn parse(input: &str) -> Result<Pattern, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            match chars[i] {
                '{' if i + 1 < len && chars[i + 1] == '{' => {
                    literal_buf.push('{');
                    i += 2;
                }
                '{' => {
                    if !literal_buf.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal_buf)));
                    }

                    let start = i + 1;
                    let mut end = start;
                    while end < len && chars[end] != '}' {
                        if chars[end] == '{' {
                            return Err(TemplateError::Parse(format!(
                                "nested braces are not allowed in '{}'",
                                input
                            )));
                        }
                        end += 1;
                    }
                    if end == len {
                        return Err(TemplateError::Parse(format!(
                            "unclosed brace in '{}'",
                            input
                        )));
                    }
                    if end == start {
                        return Err(TemplateError::Parse(format!(
                            "empty braces in '{}'",
                            input
                        )));
                    }

                    segments.push(Segment::Placeholder(chars[start..end].iter().collect()));
                    i = end + 1;
                }
                '}' if i + 1 < len && chars[i + 1] == '}' => {
                    literal_buf.push('}');
                    i += 2;
                }
                '}' => {
                    return Err(TemplateError::Parse(format!(
                        "unmatched closing brace in '{}'",
                        input
                    )));
                }
                c => {
                    literal_buf.push(c);
                    i += 1;
                }
            }
        }

        if !literal_buf.is_empty() {
            segments.push(Segment::Literal(literal_buf));
        }

        Ok(Pattern {
            source: input.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Replace every placeholder with its value. Fails on the first
    /// placeholder that has no entry in `values`.
    pub fn substitute(&self, values: &Values) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match values.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::MissingValue { key: name.clone() });
                    }
                },
            }
        }
        Ok(out)
    }
}

/// A fill-in-the-blank story: title and body patterns plus the unique
/// placeholder names across both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryTemplate {
    title: Pattern,
    body: Pattern,
    placeholders: Vec<String>,
}

impl StoryTemplate {
    pub fn new(title: &str, body: &str) -> Result<StoryTemplate, TemplateError> {
        let title = Pattern::parse(title)?;
        let body = Pattern::parse(body)?;

        let placeholders = {
            let mut seen = FxHashSet::default();
            title
                .placeholders()
                .chain(body.placeholders())
                .filter(|name| seen.insert(*name))
                .map(str::to_string)
                .collect()
        };

        Ok(StoryTemplate {
            title,
            body,
            placeholders,
        })
    }

    pub fn from_def(def: &StoryDef) -> Result<StoryTemplate, TemplateError> {
        Self::new(&def.title, &def.body)
    }

    pub fn title(&self) -> &Pattern {
        &self.title
    }

    pub fn body(&self) -> &Pattern {
        &self.body
    }

    /// Unique placeholder names, first occurrence order, title before body.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Fill title and body independently. A field with a missing value
    /// comes back as its raw pattern and gets a diagnostic; this never
    /// fails.
    pub fn fill(&self, values: &Values) -> Story {
        let mut diagnostics = Vec::new();
        let title = fill_field(&self.title, StoryField::Title, values, &mut diagnostics);
        let body = fill_field(&self.body, StoryField::Body, values, &mut diagnostics);
        Story {
            title,
            body,
            diagnostics,
        }
    }
}

fn fill_field(
    pattern: &Pattern,
    field: StoryField,
    values: &Values,
    diagnostics: &mut Vec<FillDiagnostic>,
) -> String {
    match pattern.substitute(values) {
        Ok(text) => text,
        Err(TemplateError::MissingValue { key }) => {
            log::warn!("no value for '{}' in {}, keeping raw pattern", key, field);
            diagnostics.push(FillDiagnostic { field, key });
            pattern.source().to_string()
        }
        // substitute only reports missing values
        Err(TemplateError::Parse(_)) => pattern.source().to_string(),
    }
}
