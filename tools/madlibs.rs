/// Mad Libs: the interactive terminal game.
///
/// Usage: madlibs [--seed <n>] [--stories <path>] [--words <path>] [--theme <name>] [--no-intro]
///
/// Menu: start a game, read the instructions, about, change theme, exit.
/// At any word prompt: `random`, `history`, `restart`.

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{style, Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use indicatif::{ProgressBar, ProgressStyle};
use mad_libs::core::game::{Frontend, Game, GameError, Notice, Reply};
use mad_libs::core::history::{HistoryBuffer, HISTORY_CAPACITY};
use mad_libs::schema::command::Command;
use mad_libs::schema::story::Story;
use mad_libs::schema::theme::{Hue, Swatch, Theme, ThemeSet};
use std::io::{self, BufRead, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const PANEL_WIDTH: usize = 72;

struct Options {
    seed: Option<u64>,
    stories: Option<String>,
    words: Option<String>,
    theme: Option<String>,
    intro: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = parse_args();

    let themes = match ThemeSet::builtin() {
        Ok(themes) => themes,
        Err(e) => {
            eprintln!("ERROR: Failed to load themes: {}", e);
            process::exit(1);
        }
    };
    let theme = match options.theme.as_deref() {
        Some(name) => match themes.get(name) {
            Some(theme) => theme.clone(),
            None => {
                eprintln!("ERROR: Unknown theme '{}'", name);
                process::exit(1);
            }
        },
        None => themes.default_theme().clone(),
    };

    let mut builder = Game::builder();
    if let Some(seed) = options.seed {
        builder = builder.seed(seed);
    }
    if let Some(ref path) = options.stories {
        builder = builder.stories_file(path);
    }
    if let Some(ref path) = options.words {
        builder = builder.words_file(path);
    }
    let mut game = match builder.build() {
        Ok(game) => game,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };
    log::info!("{} stories loaded", game.catalog().len());

    let mut ui = Terminal::new(theme);
    if options.intro {
        ui.welcome();
    }

    match main_menu(&mut game, &mut ui, &themes) {
        Ok(()) => ui.goodbye(),
        Err(e @ (GameError::Interrupted | GameError::Closed)) => {
            log::debug!("leaving early: {}", e);
            println!();
            println!("{}", ui.paint("Game interrupted. Goodbye!", ui.theme.error));
            process::exit(e.exit_code());
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        seed: None,
        stories: None,
        words: None,
        theme: None,
        intro: true,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(seed) => options.seed = Some(seed),
                    Err(_) => {
                        eprintln!("Invalid seed: {}", args[i]);
                        process::exit(1);
                    }
                }
            }
            "--stories" if i + 1 < args.len() => {
                i += 1;
                options.stories = Some(args[i].clone());
            }
            "--words" if i + 1 < args.len() => {
                i += 1;
                options.words = Some(args[i].clone());
            }
            "--theme" if i + 1 < args.len() => {
                i += 1;
                options.theme = Some(args[i].clone());
            }
            "--no-intro" => options.intro = false,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn print_usage() {
    println!("Usage: madlibs [--seed <n>] [--stories <path>] [--words <path>] [--theme <name>] [--no-intro]");
    println!();
    println!("  --seed <n>        seed the random number generator");
    println!("  --stories <path>  RON story catalog to use instead of the built-in one");
    println!("  --words <path>    RON word lists merged over the built-in ones");
    println!("  --theme <name>    start with this colour theme (default, dark, light)");
    println!("  --no-intro        skip the welcome animation");
}

fn main_menu(game: &mut Game, ui: &mut Terminal, themes: &ThemeSet) -> Result<(), GameError> {
    loop {
        ui.clear();
        ui.panel(None, "MAD LIBS GAME", ui.theme.title);
        for (n, label) in ["Start Game", "Instructions", "About", "Change Theme", "Exit"]
            .iter()
            .enumerate()
        {
            println!("{} {}", ui.paint(&format!("{}.", n + 1), ui.theme.menu), label);
        }

        let choice = ui.ask("Enter your choice (1-5)")?;
        match choice.trim() {
            "1" => game.play(ui)?,
            "2" => {
                ui.clear();
                ui.panel(Some("Instructions"), &instructions(), ui.theme.info);
                ui.ask("Press Enter to return to the main menu")?;
            }
            "3" => {
                ui.clear();
                ui.panel(Some("About"), ABOUT, ui.theme.info);
                ui.ask("Press Enter to return to the main menu")?;
            }
            "4" => change_theme(ui, themes)?,
            "5" => return Ok(()),
            _ => {
                println!("{}", ui.paint("Invalid choice. Please select 1-5.", ui.theme.error));
                thread::sleep(Duration::from_secs(1));
            }
        }
    }
}

fn change_theme(ui: &mut Terminal, themes: &ThemeSet) -> Result<(), GameError> {
    ui.clear();
    ui.panel(None, "Available Themes", ui.theme.title);
    for name in themes.names() {
        println!("- {}", name);
    }

    let wanted = ui.ask("Enter theme name")?.trim().to_lowercase();
    match themes.get(&wanted) {
        Some(theme) => {
            ui.theme = theme.clone();
            let message = format!("Theme changed to '{}' successfully.", wanted);
            println!("{}", ui.paint(&message, ui.theme.info));
        }
        None => {
            let message = format!("Theme '{}' not found. Using current theme.", wanted);
            println!("{}", ui.paint(&message, ui.theme.error));
        }
    }
    thread::sleep(Duration::from_secs(1));
    Ok(())
}

fn instructions() -> String {
    let mut text = String::from(
        "How to Play:\n\
         - Choose 'Start Game' to create a new Mad Libs story.\n\
         - When prompted, enter words to fill in the placeholders.\n\n\
         Available Commands (at any prompt):\n",
    );
    for command in Command::ALL {
        let token = format!("'{}'", command.token());
        text.push_str(&format!("  {:<10}: {}\n", token, command.summary()));
    }
    text.push_str(
        "\nExample:\n\
         \x20 Template: 'I saw a {adjective} {noun} {verb} at the {place}.'\n\
         \x20 Inputs : happy, dog, run, park\n\
         \x20 Story  : 'I saw a happy dog run at the park.'\n\
         \x20 (If the title is 'The Mystery of {noun}', it becomes, for example, 'The Mystery of dog')",
    );
    text
}

const ABOUT: &str = "Mad Libs Game is a fun console game that creates hilarious stories from your input.\n\
Story titles can include dynamic words (e.g. 'The Mystery of {noun}').\n\n\
Enjoy and let your creativity shine!";

/// Plain stdin/stdout frontend with crossterm colours.
///
/// Stdin is read on a background thread so a Ctrl-C can wake a pending
/// prompt. Both feed the same channel.
struct Terminal {
    theme: Theme,
    input: Receiver<io::Result<Reply>>,
    interrupted: Arc<AtomicBool>,
    closed: bool,
}

impl Terminal {
    fn new(theme: Theme) -> Self {
        let (tx, input) = mpsc::channel();
        let interrupted = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&interrupted);
        let wake = tx.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
            let _ = wake.send(Ok(Reply::Interrupted));
        }) {
            log::warn!("could not install Ctrl-C handler: {}", e);
        }

        spawn_stdin_reader(tx);

        Self {
            theme,
            input,
            interrupted,
            closed: false,
        }
    }

    fn next_reply(&mut self) -> io::Result<Reply> {
        if self.interrupted.load(Ordering::SeqCst) {
            return Ok(Reply::Interrupted);
        }
        if self.closed {
            return Ok(Reply::Closed);
        }
        let reply = match self.input.recv() {
            Ok(reply) => reply?,
            Err(_) => Reply::Closed,
        };
        // a Ctrl-C wins over lines already queued
        if self.interrupted.load(Ordering::SeqCst) {
            return Ok(Reply::Interrupted);
        }
        if reply == Reply::Closed {
            self.closed = true;
        }
        Ok(reply)
    }

    fn paint(&self, text: &str, swatch: Swatch) -> String {
        let styled = style(text).with(color_of(swatch.hue));
        if swatch.bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }

    fn clear(&self) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)) {
            log::debug!("clear screen failed: {}", e);
        }
    }

    fn panel(&self, title: Option<&str>, text: &str, swatch: Swatch) {
        let inner = PANEL_WIDTH - 4;
        let top = match title {
            Some(title) => {
                let label = format!(" {} ", title);
                let left = (PANEL_WIDTH - 2).saturating_sub(label.chars().count()) / 2;
                let right = (PANEL_WIDTH - 2).saturating_sub(label.chars().count() + left);
                format!("\u{256d}{}{}{}\u{256e}", "\u{2500}".repeat(left), label, "\u{2500}".repeat(right))
            }
            None => format!("\u{256d}{}\u{256e}", "\u{2500}".repeat(PANEL_WIDTH - 2)),
        };
        println!("{}", self.paint(&top, swatch));
        for line in text.lines().flat_map(|line| wrap(line, inner)) {
            let pad = inner.saturating_sub(line.chars().count());
            let row = format!("\u{2502} {}{} \u{2502}", line, " ".repeat(pad));
            println!("{}", self.paint(&row, swatch));
        }
        let bottom = format!("\u{2570}{}\u{256f}", "\u{2500}".repeat(PANEL_WIDTH - 2));
        println!("{}", self.paint(&bottom, swatch));
    }

    fn ask(&mut self, prompt: &str) -> Result<String, GameError> {
        match self.read_line(prompt, "")? {
            Reply::Line(line) => Ok(line),
            Reply::Closed => Err(GameError::Closed),
            Reply::Interrupted => Err(GameError::Interrupted),
        }
    }

    fn welcome(&self) {
        self.clear();
        self.panel(Some("Mad Libs"), "Welcome to Mad Libs Game!", self.theme.title);

        let color = style_spec(self.theme.info);
        let template = format!("{{msg:.{color}}} [{{bar:30.{color}}}]");
        let style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        let bar = ProgressBar::new(10);
        bar.set_style(style);
        bar.set_message("Loading...");
        for _ in 0..10 {
            thread::sleep(Duration::from_millis(100));
            bar.inc(1);
        }
        bar.finish();
    }

    fn goodbye(&self) {
        self.clear();
        self.panel(
            Some("Goodbye"),
            "Thank you for playing Mad Libs Game!\nGoodbye!",
            self.theme.info,
        );
    }
}

impl Frontend for Terminal {
    fn read_line(&mut self, prompt: &str, default: &str) -> io::Result<Reply> {
        let mut stdout = io::stdout();
        print!("{}: ", self.paint(prompt, self.theme.input));
        stdout.flush()?;

        Ok(match self.next_reply()? {
            Reply::Line(line) if line.is_empty() => Reply::Line(default.to_string()),
            reply => reply,
        })
    }

    fn show_round_intro(&mut self) {
        self.clear();
        self.panel(None, "Let's create a new story!", self.theme.title);
        println!("At each prompt, enter a word or use commands:");
        for command in Command::ALL {
            let line = format!(" {:<8}: {}", command.token(), command.summary());
            println!("{}", self.paint(&line, self.theme.info));
        }
        println!();
    }

    fn show_notice(&mut self, notice: &Notice) {
        let message = match notice {
            Notice::EmptyInput => "Input cannot be empty. Please try again.".to_string(),
            Notice::MissingValue(diagnostic) => diagnostic.to_string(),
        };
        println!("{}", self.paint(&message, self.theme.error));
    }

    fn show_history(&mut self, history: &HistoryBuffer) {
        self.clear();
        if history.is_empty() {
            println!("{}", self.paint("No stories in history yet.", self.theme.error));
        } else {
            let title = format!("Story History (last {})", HISTORY_CAPACITY);
            self.panel(Some(&title), &history.render(), self.theme.info);
        }
        // closed or interrupted input surfaces at the next word prompt
        if let Err(e) = self.read_line("Press Enter to continue", "") {
            log::debug!("read failed after history: {}", e);
        }
    }

    fn show_story(&mut self, story: &Story) {
        self.clear();
        self.panel(Some("Your Story"), &story.composed(), self.theme.story);
    }
}

/// Forwards stdin lines until end of input.
fn spawn_stdin_reader(tx: Sender<io::Result<Reply>>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        loop {
            let mut line = String::new();
            let reply = match stdin.lock().read_line(&mut line) {
                Ok(0) => Ok(Reply::Closed),
                Ok(_) => Ok(Reply::Line(line.trim_end_matches(['\r', '\n']).to_string())),
                Err(e) => Err(e),
            };
            let done = !matches!(reply, Ok(Reply::Line(_)));
            if tx.send(reply).is_err() || done {
                break;
            }
        }
    });
}

/// indicatif colour spec for a swatch: a 256-colour index, plus `.bold`.
fn style_spec(swatch: Swatch) -> String {
    let index = hue_index(swatch.hue).unwrap_or(7);
    if swatch.bold {
        format!("{}.bold", index)
    } else {
        index.to_string()
    }
}

fn hue_index(hue: Hue) -> Option<u8> {
    match color_of(hue) {
        Color::Black => Some(0),
        Color::DarkRed => Some(1),
        Color::DarkGreen => Some(2),
        Color::DarkYellow => Some(3),
        Color::DarkBlue => Some(4),
        Color::DarkMagenta => Some(5),
        Color::DarkCyan => Some(6),
        Color::Grey => Some(7),
        Color::Red => Some(9),
        Color::Green => Some(10),
        Color::Yellow => Some(11),
        Color::Blue => Some(12),
        Color::Magenta => Some(13),
        Color::White => Some(15),
        Color::AnsiValue(index) => Some(index),
        _ => None,
    }
}

fn color_of(hue: Hue) -> Color {
    match hue {
        Hue::Black => Color::Black,
        Hue::Red => Color::DarkRed,
        Hue::Green => Color::DarkGreen,
        Hue::Yellow => Color::DarkYellow,
        Hue::Blue => Color::DarkBlue,
        Hue::Magenta => Color::DarkMagenta,
        Hue::Cyan => Color::DarkCyan,
        Hue::White => Color::Grey,
        Hue::DarkGreen => Color::AnsiValue(22),
        Hue::DarkYellow => Color::AnsiValue(220),
        Hue::BrightRed => Color::Red,
        Hue::BrightGreen => Color::Green,
        Hue::BrightYellow => Color::Yellow,
        Hue::BrightBlue => Color::Blue,
        Hue::BrightMagenta => Color::Magenta,
        Hue::BrightWhite => Color::White,
    }
}

/// Greedy word wrap. Lines that fit are kept verbatim, indentation included.
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    rows.push(current);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_bar_styles_parse_for_every_theme() {
        let themes = ThemeSet::builtin().unwrap();
        for name in themes.names() {
            let info = themes.get(name).unwrap().info;
            let color = style_spec(info);
            let template = format!("{{msg:.{color}}} [{{bar:30.{color}}}]");
            assert!(ProgressStyle::with_template(&template).is_ok(), "{}", template);
        }
    }

    #[test]
    fn style_spec_uses_256_colour_index() {
        let swatch = Swatch { hue: Hue::DarkYellow, bold: true };
        assert_eq!(style_spec(swatch), "220.bold");
        let swatch = Swatch { hue: Hue::BrightBlue, bold: false };
        assert_eq!(style_spec(swatch), "12");
    }
}
