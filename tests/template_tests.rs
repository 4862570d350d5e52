/// Catalog and template integration tests: loading fixtures, placeholder
/// discovery and substitution fallbacks.

use mad_libs::core::catalog::{Catalog, CatalogError};
use mad_libs::core::template::{StoryTemplate, Values};
use mad_libs::core::words::WordTable;
use mad_libs::schema::story::StoryField;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn values(pairs: &[(&str, &str)]) -> Values {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Unique names in first-appearance order, scanning title then body the
/// slow way, for comparison with the parser.
fn naive_placeholders(title: &str, body: &str) -> Vec<String> {
    let text = format!("{} {}", title, body).replace("{{", "").replace("}}", "");
    let mut names: Vec<String> = Vec::new();
    let mut rest = text.as_str();
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after.find('}').unwrap();
        let name = after[..close].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
        rest = &after[close + 1..];
    }
    names
}

#[test]
fn fixture_catalog_loads() {
    let path = std::path::Path::new("tests/fixtures/test_stories.ron");
    let catalog = Catalog::load_from_ron(path).unwrap();
    assert_eq!(catalog.len(), 3);

    let creature = &catalog.templates()[1];
    assert_eq!(creature.placeholders(), &["Creature", "weekday", "food"]);

    let plain = &catalog.templates()[2];
    assert!(plain.placeholders().is_empty());
}

#[test]
fn builtin_placeholders_match_naive_scan() {
    let catalog = Catalog::builtin().unwrap();
    for template in catalog.templates() {
        let expected = naive_placeholders(template.title().source(), template.body().source());
        assert_eq!(template.placeholders(), expected.as_slice());
    }
}

#[test]
fn escaped_braces_survive_fill() {
    let path = std::path::Path::new("tests/fixtures/test_stories.ron");
    let catalog = Catalog::load_from_ron(path).unwrap();
    let story = catalog.templates()[1].fill(&values(&[
        ("Creature", "Yeti"),
        ("weekday", "Monday"),
        ("food", "waffle"),
    ]));
    assert_eq!(story.title, "The Yeti Who Knew {Braces}");
    assert_eq!(story.body, "Every Monday, the Yeti ate a waffle.");
}

#[test]
fn broken_fixture_reports_parse_error() {
    let path = std::path::Path::new("tests/fixtures/broken_stories.ron");
    let err = Catalog::load_from_ron(path).unwrap_err();
    assert!(matches!(err, CatalogError::Template { index: 0, .. }));
    assert!(err.to_string().contains("unclosed brace"));
}

#[test]
fn missing_file_is_io_error() {
    let path = std::path::Path::new("tests/fixtures/no_such_file.ron");
    assert!(matches!(Catalog::load_from_ron(path), Err(CatalogError::Io(_))));
}

#[test]
fn every_builtin_story_fills_completely_from_random_words() {
    let catalog = Catalog::builtin().unwrap();
    let words = WordTable::builtin().unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    for template in catalog.templates() {
        let vals: Values = template
            .placeholders()
            .iter()
            .map(|name| (name.clone(), words.random_word(name, &mut rng).to_string()))
            .collect();
        let story = template.fill(&vals);
        assert!(story.diagnostics.is_empty());
        assert!(!story.title.contains('{'), "unfilled title: {}", story.title);
        assert!(!story.body.contains('{'), "unfilled body: {}", story.body);
        assert_eq!(template.fill(&vals), story);
    }
}

#[test]
fn partial_values_fall_back_independently() {
    let template = StoryTemplate::new(
        "The Mystery of the {noun}",
        "In a {adjective} town, a {noun} was known to {verb} mysteriously at the {place}.",
    )
    .unwrap();

    let story = template.fill(&values(&[("noun", "river")]));
    assert_eq!(story.title, "The Mystery of the river");
    assert_eq!(
        story.body,
        "In a {adjective} town, a {noun} was known to {verb} mysteriously at the {place}."
    );
    assert_eq!(story.diagnostics.len(), 1);
    assert_eq!(story.diagnostics[0].field, StoryField::Body);
    assert_eq!(story.diagnostics[0].key, "adjective");

    let story = template.fill(&Values::new());
    assert_eq!(story.title, "The Mystery of the {noun}");
    assert_eq!(story.diagnostics.len(), 2);
}

#[test]
fn fixture_words_merge_over_builtin() {
    let mut words = WordTable::builtin().unwrap();
    words.merge(WordTable::load_from_ron(std::path::Path::new("tests/fixtures/test_words.ron")).unwrap());
    let mut rng = StdRng::seed_from_u64(5);

    assert_eq!(words.random_word("noun", &mut rng), "teapot");
    assert!(["Tuesday", "Friday"].contains(&words.random_word("weekday", &mut rng)));
    assert_eq!(words.random_word("food", &mut rng), "amazing");
    assert_eq!(words.random_word("Creature", &mut rng), "amazing");
    assert!(words.contains("verb"));
}
