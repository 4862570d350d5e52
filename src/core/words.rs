/// Random word table: example words per placeholder category.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

const BUILTIN_WORDS: &str = include_str!("../../data/words.ron");

/// Returned for categories the table does not know.
pub const FALLBACK_WORD: &str = "amazing";

#[derive(Debug, Error)]
pub enum WordsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Category name → candidate words.
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    categories: FxHashMap<String, Vec<String>>,
}

impl WordTable {
    /// The noun/verb/adjective/adverb/place lists shipped with the game.
    pub fn builtin() -> Result<WordTable, WordsError> {
        Self::parse_ron(BUILTIN_WORDS)
    }

    /// Load a word table from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<WordTable, WordsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a word table from a RON map of category to word list.
    pub fn parse_ron(input: &str) -> Result<WordTable, WordsError> {
        let categories: FxHashMap<String, Vec<String>> = ron::from_str(input)?;
        Ok(WordTable { categories })
    }

    /// Merge another table into this one. Categories from `other`
    /// replace categories with the same name.
    pub fn merge(&mut self, other: WordTable) {
        for (category, words) in other.categories {
            self.categories.insert(category, words);
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Category names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// A uniformly chosen word for `category`, or [`FALLBACK_WORD`] when
    /// the category is unknown or has no words.
    pub fn random_word(&self, category: &str, rng: &mut StdRng) -> &str {
        self.categories
            .get(category)
            .and_then(|words| words.choose(rng))
            .map(String::as_str)
            .unwrap_or(FALLBACK_WORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn builtin_categories() {
        let table = WordTable::builtin().unwrap();
        assert_eq!(
            table.categories(),
            vec!["adjective", "adverb", "noun", "place", "verb"]
        );
    }

    #[test]
    fn noun_comes_from_noun_list() {
        let table = WordTable::builtin().unwrap();
        let nouns = ["dog", "cat", "car", "tree", "mountain", "river"];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(nouns.contains(&table.random_word("noun", &mut rng)));
        }
    }

    #[test]
    fn unknown_category_falls_back() {
        let table = WordTable::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(table.random_word("unknown_x", &mut rng), "amazing");
        }
        // category lookup is exact
        assert_eq!(table.random_word("Noun", &mut rng), "amazing");
    }

    #[test]
    fn empty_category_falls_back() {
        let table = WordTable::parse_ron(r#"{ "food": [] }"#).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(table.contains("food"));
        assert_eq!(table.random_word("food", &mut rng), FALLBACK_WORD);
    }

    #[test]
    fn same_seed_same_words() {
        let table = WordTable::builtin().unwrap();
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                table.random_word("place", &mut rng1),
                table.random_word("place", &mut rng2)
            );
        }
    }

    #[test]
    fn every_builtin_word_is_reachable() {
        let table = WordTable::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = rustc_hash::FxHashSet::default();
        for _ in 0..500 {
            seen.insert(table.random_word("adverb", &mut rng).to_string());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn merge_overrides_category() {
        let mut base = WordTable::builtin().unwrap();
        let extra = WordTable::parse_ron(r#"{ "noun": ["teapot"], "color": ["teal"] }"#).unwrap();
        base.merge(extra);

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(base.random_word("noun", &mut rng), "teapot");
        assert_eq!(base.random_word("color", &mut rng), "teal");
        assert!(base.contains("verb"));
    }
}
