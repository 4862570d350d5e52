/// Named colour themes for the terminal frontend.
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_THEMES: &str = include_str!("../../data/themes.ron");

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("theme set is empty")]
    Empty,
}

/// Terminal colours a theme may use. The frontend maps these onto its
/// own colour type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hue {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGreen,
    DarkYellow,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightWhite,
}

/// A colour plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub hue: Hue,
    #[serde(default)]
    pub bold: bool,
}

/// One swatch per kind of output the game prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub title: Swatch,
    pub menu: Swatch,
    pub input: Swatch,
    pub error: Swatch,
    pub info: Swatch,
    pub story: Swatch,
}

/// Themes in file order. The first one is the default.
#[derive(Debug, Clone)]
pub struct ThemeSet {
    themes: Vec<Theme>,
}

impl ThemeSet {
    /// The `default`, `dark` and `light` themes.
    pub fn builtin() -> Result<ThemeSet, ThemeError> {
        Self::parse_ron(BUILTIN_THEMES)
    }

    pub fn parse_ron(input: &str) -> Result<ThemeSet, ThemeError> {
        let themes: Vec<Theme> = ron::from_str(input)?;
        if themes.is_empty() {
            return Err(ThemeError::Empty);
        }
        Ok(ThemeSet { themes })
    }

    /// Look a theme up by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        let wanted = name.trim().to_lowercase();
        self.themes.iter().find(|t| t.name.to_lowercase() == wanted)
    }

    pub fn default_theme(&self) -> &Theme {
        &self.themes[0]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.name.as_str())
    }
}
