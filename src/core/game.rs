/// The round driver: picks templates, runs fill sessions against a
/// [`Frontend`], and records finished stories.
///
/// Built via `Game::builder()`.
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::catalog::{Catalog, CatalogError};
use crate::core::history::HistoryBuffer;
use crate::core::session::{FillSession, Transition};
use crate::core::template::StoryTemplate;
use crate::core::words::{WordTable, WordsError};
use crate::schema::command::{Command, Input};
use crate::schema::story::{FillDiagnostic, Story};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("word table error: {0}")]
    Words(#[from] WordsError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("the story catalog is empty")]
    EmptyCatalog,
    #[error("input closed")]
    Closed,
    #[error("interrupted")]
    Interrupted,
}

impl GameError {
    /// Process exit status for this error. Leaving by closing input or
    /// by Ctrl-C is a normal exit.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Closed | Self::Interrupted => 0,
            _ => 1,
        }
    }
}

/// What a prompt got back from the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Line(String),
    /// End of input (Ctrl-D, closed pipe).
    Closed,
    /// The player pressed Ctrl-C.
    Interrupted,
}

/// Something the player should be told that is not a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyInput,
    MissingValue(FillDiagnostic),
}

/// The presentation side of the game. Implementations decide how
/// things look; the game decides what happens.
pub trait Frontend {
    /// Read one line for `prompt`. `default` is what an empty line means.
    fn read_line(&mut self, prompt: &str, default: &str) -> io::Result<Reply>;

    /// Called once per round before the first prompt.
    fn show_round_intro(&mut self) {}

    fn show_notice(&mut self, notice: &Notice);

    fn show_history(&mut self, history: &HistoryBuffer);

    fn show_story(&mut self, story: &Story);
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Completed(Story),
    Restarted,
}

pub struct Game {
    catalog: Catalog,
    words: WordTable,
    history: HistoryBuffer,
    rng: StdRng,
}

/// Builder for constructing a `Game`.
pub struct GameBuilder {
    seed: Option<u64>,
    stories_file: Option<PathBuf>,
    words_file: Option<PathBuf>,
    /// Directly provided catalog (for testing without files).
    catalog: Option<Catalog>,
    /// Directly provided word table (for testing without files).
    words: Option<WordTable>,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder {
            seed: None,
            stories_file: None,
            words_file: None,
            catalog: None,
            words: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn words(&self) -> &WordTable {
        &self.words
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Play rounds until the player types `restart`, either during a
    /// round or at the play-again prompt.
    pub fn play(&mut self, frontend: &mut dyn Frontend) -> Result<(), GameError> {
        loop {
            if let RoundOutcome::Restarted = self.play_round(frontend)? {
                return Ok(());
            }
            let next = read(frontend, "Press Enter to play again or type 'restart' to return to the main menu")?;
            if Command::parse(&next) == Some(Command::Restart) {
                return Ok(());
            }
        }
    }

    /// One round: choose a template, collect values, substitute, record.
    pub fn play_round(&mut self, frontend: &mut dyn Frontend) -> Result<RoundOutcome, GameError> {
        let template = self
            .catalog
            .choose(&mut self.rng)
            .ok_or(GameError::EmptyCatalog)?;
        log::debug!("round template: {}", template.title().source());

        frontend.show_round_intro();
        let outcome = run_session(template, &self.words, &self.history, &mut self.rng, frontend)?;

        if let RoundOutcome::Completed(ref story) = outcome {
            self.history.append(story.composed());
            present_story(frontend, story);
        }
        Ok(outcome)
    }
}

/// The story first, then any fallback notices so they stay on screen.
fn present_story(frontend: &mut dyn Frontend, story: &Story) {
    frontend.show_story(story);
    for diagnostic in &story.diagnostics {
        frontend.show_notice(&Notice::MissingValue(diagnostic.clone()));
    }
}

fn run_session(
    template: &StoryTemplate,
    words: &WordTable,
    history: &HistoryBuffer,
    rng: &mut StdRng,
    frontend: &mut dyn Frontend,
) -> Result<RoundOutcome, GameError> {
    let mut session = FillSession::new(template);

    while let Some(name) = session.current_placeholder() {
        let line = read(frontend, &format!("Enter a {}", name))?;
        match session.step(Input::classify(&line), words, rng) {
            Transition::EmptyInput => frontend.show_notice(&Notice::EmptyInput),
            Transition::ShowHistory => frontend.show_history(history),
            Transition::Aborted => return Ok(RoundOutcome::Restarted),
            Transition::Accepted | Transition::RandomFilled | Transition::Ignored => {}
        }
    }

    Ok(session
        .finish()
        .map_or(RoundOutcome::Restarted, RoundOutcome::Completed))
}

fn read(frontend: &mut dyn Frontend, prompt: &str) -> Result<String, GameError> {
    match frontend.read_line(prompt, "")? {
        Reply::Line(line) => Ok(line),
        Reply::Closed => Err(GameError::Closed),
        Reply::Interrupted => Err(GameError::Interrupted),
    }
}

impl GameBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the built-in catalog with stories from a RON file.
    pub fn stories_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stories_file = Some(path.into());
        self
    }

    /// Merge a RON word table over the built-in one.
    pub fn words_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.words_file = Some(path.into());
        self
    }

    /// Provide a catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Provide a word table directly (for testing without files).
    pub fn with_words(mut self, words: WordTable) -> Self {
        self.words = Some(words);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        let catalog = match (self.catalog, self.stories_file) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => Catalog::load_from_ron(&path)?,
            (None, None) => Catalog::builtin()?,
        };
        if catalog.is_empty() {
            return Err(GameError::EmptyCatalog);
        }

        let mut words = match self.words {
            Some(words) => words,
            None => WordTable::builtin()?,
        };
        if let Some(path) = self.words_file {
            words.merge(WordTable::load_from_ron(&path)?);
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::debug!(
            "game ready: {} stories, {} word categories",
            catalog.len(),
            words.categories().len()
        );

        Ok(Game {
            catalog,
            words,
            history: HistoryBuffer::new(),
            rng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        lines: VecDeque<&'static str>,
        prompts: Vec<String>,
        notices: Vec<Notice>,
        history_shown: Vec<usize>,
        stories: Vec<Story>,
        shown: Vec<&'static str>,
    }

    impl Scripted {
        fn new(lines: &[&'static str]) -> Self {
            Self {
                lines: lines.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Frontend for Scripted {
        fn read_line(&mut self, prompt: &str, _default: &str) -> io::Result<Reply> {
            self.prompts.push(prompt.to_string());
            Ok(match self.lines.pop_front() {
                Some(line) => Reply::Line(line.to_string()),
                None => Reply::Closed,
            })
        }

        fn show_notice(&mut self, notice: &Notice) {
            self.shown.push("notice");
            self.notices.push(notice.clone());
        }

        fn show_history(&mut self, history: &HistoryBuffer) {
            self.history_shown.push(history.len());
        }

        fn show_story(&mut self, story: &Story) {
            self.shown.push("story");
            self.stories.push(story.clone());
        }
    }

    fn one_story_game() -> Game {
        let catalog = Catalog::parse_ron(
            r#"[ (title: "The {noun}", body: "A {adjective} {noun}.") ]"#,
        )
        .unwrap();
        Game::builder().seed(42).with_catalog(catalog).build().unwrap()
    }

    #[test]
    fn round_records_story() {
        let mut game = one_story_game();
        let mut ui = Scripted::new(&["Giant Squid", "", "sleepy"]);
        let outcome = game.play_round(&mut ui).unwrap();

        let story = match outcome {
            RoundOutcome::Completed(story) => story,
            RoundOutcome::Restarted => panic!("round should complete"),
        };
        assert_eq!(story.composed(), "A sleepy Giant Squid.\n\n\u{2014} The Giant Squid");
        assert_eq!(ui.notices, vec![Notice::EmptyInput]);
        assert_eq!(
            ui.prompts,
            vec!["Enter a noun", "Enter a adjective", "Enter a adjective"]
        );
        assert_eq!(game.history().iter().collect::<Vec<_>>(), vec![story.composed().as_str()]);
    }

    #[test]
    fn restart_mid_round_records_nothing() {
        let mut game = one_story_game();
        let mut ui = Scripted::new(&["kite", "RESTART"]);
        assert_eq!(game.play_round(&mut ui).unwrap(), RoundOutcome::Restarted);
        assert!(game.history().is_empty());
        assert!(ui.stories.is_empty());
    }

    #[test]
    fn history_reprompts_same_placeholder() {
        let mut game = one_story_game();
        let mut ui = Scripted::new(&["history", "kite", "red", "", "history", "restart"]);
        game.play(&mut ui).unwrap();

        assert_eq!(ui.history_shown, vec![0, 1]);
        assert_eq!(ui.prompts[0], "Enter a noun");
        assert_eq!(ui.prompts[1], "Enter a noun");
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn play_again_then_restart() {
        let mut game = one_story_game();
        let mut ui = Scripted::new(&["kite", "red", "", "random", "restart"]);
        game.play(&mut ui).unwrap();
        assert_eq!(ui.stories.len(), 2);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn closed_input_ends_the_game() {
        let mut game = one_story_game();
        let mut ui = Scripted::new(&["kite"]);
        assert!(matches!(game.play(&mut ui), Err(GameError::Closed)));
        assert!(game.history().is_empty());
    }

    #[test]
    fn empty_catalog_rejected() {
        let result = Game::builder()
            .with_catalog(Catalog::parse_ron("[]").unwrap())
            .build();
        assert!(matches!(result, Err(GameError::EmptyCatalog)));
    }

    #[test]
    fn builder_defaults_to_builtin_data() {
        let game = Game::builder().seed(1).build().unwrap();
        assert_eq!(game.catalog().len(), 11);
        assert!(game.words().contains("noun"));
        assert!(game.history().is_empty());
    }

    #[test]
    fn missing_value_notices_follow_the_story() {
        let template = StoryTemplate::new("The {noun}", "A {adjective} {noun}.").unwrap();
        let story = template.fill(&crate::core::template::Values::new());
        assert_eq!(story.diagnostics.len(), 2);

        let mut ui = Scripted::new(&[]);
        present_story(&mut ui, &story);
        assert_eq!(ui.shown, vec!["story", "notice", "notice"]);
        assert!(matches!(&ui.notices[0], Notice::MissingValue(d) if d.key == "noun"));
    }

    #[test]
    fn leaving_early_exits_cleanly() {
        assert_eq!(GameError::Interrupted.exit_code(), 0);
        assert_eq!(GameError::Closed.exit_code(), 0);
        assert_eq!(GameError::EmptyCatalog.exit_code(), 1);
    }
}
