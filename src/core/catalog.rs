/// The story catalog: the fixed, ordered list of templates a round picks from.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::Path;
use thiserror::Error;

use crate::core::template::{StoryTemplate, TemplateError};
use crate::schema::story::StoryDef;

const BUILTIN_STORIES: &str = include_str!("../../data/stories.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("story {index}: {source}")]
    Template {
        index: usize,
        #[source]
        source: TemplateError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: Vec<StoryTemplate>,
}

impl Catalog {
    /// The eleven stories shipped with the game.
    pub fn builtin() -> Result<Catalog, CatalogError> {
        Self::parse_ron(BUILTIN_STORIES)
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Catalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON list of `(title: .., body: ..)` rows.
    pub fn parse_ron(input: &str) -> Result<Catalog, CatalogError> {
        let defs: Vec<StoryDef> = ron::from_str(input)?;
        Self::from_defs(&defs)
    }

    pub fn from_defs(defs: &[StoryDef]) -> Result<Catalog, CatalogError> {
        let templates = defs
            .iter()
            .enumerate()
            .map(|(index, def)| {
                StoryTemplate::from_def(def).map_err(|source| CatalogError::Template { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Catalog { templates })
    }

    pub fn templates(&self) -> &[StoryTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Pick a template uniformly at random.
    pub fn choose(&self, rng: &mut StdRng) -> Option<&StoryTemplate> {
        self.templates.choose(rng)
    }
}
