/// Catalog Linter: checks a story catalog against a word table.
///
/// Usage: catalog_linter [--stories <path>] [--words <path>]
///
/// Without arguments the built-in catalog and word table are checked.

use mad_libs::core::catalog::Catalog;
use mad_libs::core::words::{WordTable, FALLBACK_WORD};
use rustc_hash::FxHashSet;
use std::path::Path;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut stories_path = None;
    let mut words_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!("Usage: catalog_linter [--stories <path>] [--words <path>]");
                process::exit(0);
            }
            "--stories" if i + 1 < args.len() => {
                i += 1;
                stories_path = Some(args[i].clone());
            }
            "--words" if i + 1 < args.len() => {
                i += 1;
                words_path = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let catalog = match stories_path {
        Some(ref path) => Catalog::load_from_ron(Path::new(path)),
        None => Catalog::builtin(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to load stories: {}", e);
            process::exit(1);
        }
    };

    let mut words = match WordTable::builtin() {
        Ok(words) => words,
        Err(e) => {
            eprintln!("ERROR: Failed to load built-in words: {}", e);
            process::exit(1);
        }
    };
    if let Some(ref path) = words_path {
        match WordTable::load_from_ron(Path::new(path)) {
            Ok(extra) => words.merge(extra),
            Err(e) => {
                eprintln!("ERROR: Failed to load words file: {}", e);
                process::exit(1);
            }
        }
    }

    println!(
        "Loaded {} stories, {} word categories",
        catalog.len(),
        words.categories().len()
    );

    let (errors, warnings) = lint_catalog(&catalog, &words);

    println!("\n=== Catalog Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_catalog(catalog: &Catalog, words: &WordTable) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if catalog.is_empty() {
        errors.push("Catalog has no stories".to_string());
    }

    let mut titles = FxHashSet::default();
    for (index, template) in catalog.templates().iter().enumerate() {
        let title = template.title().source();
        if !titles.insert(title) {
            warnings.push(format!("Story {} repeats the title '{}'", index, title));
        }

        if template.placeholders().is_empty() {
            warnings.push(format!("Story '{}' has nothing to fill in", title));
        }

        for name in template.placeholders() {
            if name.trim() != name {
                warnings.push(format!(
                    "Story '{}' placeholder '{{{}}}' has surrounding whitespace",
                    title, name
                ));
            }
            if !words.contains(name) {
                warnings.push(format!(
                    "Story '{}' placeholder '{}' has no word list; 'random' fills it with '{}'",
                    title, name, FALLBACK_WORD
                ));
            }
        }
    }

    (errors, warnings)
}
