/// Reserved command tokens and classification of raw prompt input.

/// A control word typed at a placeholder prompt instead of a value.
///
/// Any input that matches a token exactly (after trimming, ignoring case)
/// is a command. There is no escape: "random" can never be a story word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Fill every remaining blank from the word table and finish the round.
    Random,
    /// Show the stored stories, then ask for the same blank again.
    History,
    /// Abandon the round without producing a story.
    Restart,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Random, Command::History, Command::Restart];

    /// The token the user types, e.g. "random".
    pub fn token(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::History => "history",
            Self::Restart => "restart",
        }
    }

    /// Short help text shown next to the token.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Random => "Auto-fill all remaining blanks",
            Self::History => "Show the last 10 stories",
            Self::Restart => "Return to the main menu",
        }
    }

    pub fn parse(input: &str) -> Option<Command> {
        let normalized = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|command| command.token() == normalized)
    }
}

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// Blank or whitespace-only line.
    Empty,
    /// A literal fill value, trimmed, case preserved.
    Value(String),
}

impl Input {
    pub fn classify(raw: &str) -> Input {
        if let Some(command) = Command::parse(raw) {
            return Input::Command(command);
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Input::Empty
        } else {
            Input::Value(trimmed.to_string())
        }
    }
}
