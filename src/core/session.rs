/// Fill session: one round's placeholder collection as a state machine.
///
/// The session never reads input itself. The caller asks for the current
/// placeholder, reads a line however it likes, and feeds the classified
/// [`Input`] to [`FillSession::step`]. Every transition is a function of
/// the current state and that input (plus the RNG for `random`), so the
/// whole flow can be tested without a terminal.
use rand::rngs::StdRng;

use crate::core::template::{StoryTemplate, Values};
use crate::core::words::WordTable;
use crate::schema::command::{Command, Input};
use crate::schema::story::Story;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a value for the placeholder at this index.
    Collecting(usize),
    /// Every placeholder has a value; ready to substitute.
    Filled,
    /// The user typed `restart`.
    Aborted,
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Value stored; moved to the next placeholder (or to `Filled`).
    Accepted,
    /// Blank input; the same placeholder is asked again.
    EmptyInput,
    /// The caller should display history, then ask the same placeholder again.
    ShowHistory,
    /// Remaining placeholders were filled from the word table.
    RandomFilled,
    /// Round abandoned.
    Aborted,
    /// The session had already finished collecting; input ignored.
    Ignored,
}

/// Collects values for one template. Dropped when the round ends.
#[derive(Debug, Clone)]
pub struct FillSession<'a> {
    template: &'a StoryTemplate,
    values: Values,
    state: SessionState,
}

impl<'a> FillSession<'a> {
    pub fn new(template: &'a StoryTemplate) -> Self {
        let state = if template.placeholders().is_empty() {
            SessionState::Filled
        } else {
            SessionState::Collecting(0)
        };
        Self {
            template,
            values: Values::new(),
            state,
        }
    }

    pub fn template(&self) -> &'a StoryTemplate {
        self.template
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    /// The placeholder being asked for, if still collecting.
    pub fn current_placeholder(&self) -> Option<&'a str> {
        match self.state {
            SessionState::Collecting(index) => {
                self.template.placeholders().get(index).map(String::as_str)
            }
            SessionState::Filled | SessionState::Aborted => None,
        }
    }

    pub fn step(&mut self, input: Input, words: &WordTable, rng: &mut StdRng) -> Transition {
        let index = match self.state {
            SessionState::Collecting(index) => index,
            SessionState::Filled | SessionState::Aborted => return Transition::Ignored,
        };

        match input {
            Input::Command(Command::Restart) => {
                self.state = SessionState::Aborted;
                Transition::Aborted
            }
            Input::Command(Command::History) => Transition::ShowHistory,
            Input::Command(Command::Random) => {
                for name in self.template.placeholders() {
                    if !self.values.contains_key(name) {
                        let word = words.random_word(name, rng).to_string();
                        log::debug!("random fill: {} = {}", name, word);
                        self.values.insert(name.clone(), word);
                    }
                }
                self.state = SessionState::Filled;
                Transition::RandomFilled
            }
            Input::Empty => Transition::EmptyInput,
            Input::Value(value) => {
                let name = self.template.placeholders()[index].clone();
                self.values.insert(name, value);
                self.state = if index + 1 < self.template.placeholders().len() {
                    SessionState::Collecting(index + 1)
                } else {
                    SessionState::Filled
                };
                Transition::Accepted
            }
        }
    }

    /// Substitute the collected values. Returns `None` for an aborted
    /// round. Called before every value is in, missing fields fall back
    /// to their raw patterns (see [`StoryTemplate::fill`]).
    pub fn finish(self) -> Option<Story> {
        match self.state {
            SessionState::Aborted => None,
            SessionState::Collecting(_) | SessionState::Filled => {
                Some(self.template.fill(&self.values))
            }
        }
    }
}
