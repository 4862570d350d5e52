use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog row as written in the stories RON file: raw title and body
/// patterns, before placeholder parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDef {
    pub title: String,
    pub body: String,
}

/// Which half of a template a substitution applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoryField {
    Title,
    Body,
}

impl fmt::Display for StoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Body => write!(f, "story"),
        }
    }
}

/// Reported when a field could not be filled and its raw pattern was
/// used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillDiagnostic {
    pub field: StoryField,
    /// The first placeholder name with no value.
    pub key: String,
}

impl fmt::Display for FillDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in {}: Missing input for '{}'", self.field, self.key)
    }
}

/// A completed story: the filled title and body plus any fallbacks that
/// happened on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub title: String,
    pub body: String,
    pub diagnostics: Vec<FillDiagnostic>,
}

impl Story {
    /// Body, a blank line, then the title as an attribution line.
    pub fn composed(&self) -> String {
        format!("{}\n\n\u{2014} {}", self.body, self.title)
    }
}
