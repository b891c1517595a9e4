//! Interactive conversation loop.
//!
//! Uses `rustyline` for readline-style editing with persistent history.
//! The loop itself is written against a small input-source seam so its
//! termination rules can be driven by scripted lines in tests.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use banter_providers::Responder;

use crate::helpers;

/// Inputs that end the conversation (trimmed, case-insensitive match).
const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye", "goodbye"];

// ─────────────────────────────────────────────
// Input source seam
// ─────────────────────────────────────────────

/// One read from the input source.
enum LineEvent {
    Line(String),
    /// End of input (Ctrl-C, Ctrl-D, or closed stdin).
    Closed,
}

/// Where lines of user input come from.
trait LineSource {
    fn read_line(&mut self, prompt: &str) -> LineEvent;
}

/// Production input source backed by rustyline.
struct ReadlineSource {
    editor: Editor<(), DefaultHistory>,
}

impl ReadlineSource {
    fn new() -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        editor.set_max_history_size(1000)?;

        let history_path = banter_core::utils::get_history_path();
        if history_path.exists() {
            let _ = editor.load_history(&history_path);
            debug!("loaded history from {}", history_path.display());
        }

        Ok(Self { editor })
    }

    fn save_history(&mut self) {
        let path = banter_core::utils::get_history_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = self.editor.save_history(&path) {
            debug!("failed to save history: {e}");
        }
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> LineEvent {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(&line);
                }
                LineEvent::Line(line)
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => LineEvent::Closed,
            Err(e) => {
                eprintln!("Input error: {e}");
                LineEvent::Closed
            }
        }
    }
}

// ─────────────────────────────────────────────
// Turn planning
// ─────────────────────────────────────────────

/// What to do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Turn {
    /// Terminating keyword — leave the loop.
    Quit,
    /// Blank input — prompt again without calling the responder.
    Skip,
    /// Pass the text to the responder.
    Ask(String),
}

fn plan_turn(input: &str) -> Turn {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Turn::Skip;
    }
    if EXIT_KEYWORDS.contains(&trimmed.to_lowercase().as_str()) {
        return Turn::Quit;
    }
    Turn::Ask(trimmed.to_string())
}

// ─────────────────────────────────────────────
// Loop
// ─────────────────────────────────────────────

/// Run the interactive conversation loop.
pub async fn run(responder: Box<dyn Responder>, show_spinner: bool) -> Result<()> {
    helpers::print_banner(responder.name());

    let mut source = ReadlineSource::new()?;
    drive(&mut source, responder.as_ref(), show_spinner).await;
    source.save_history();

    Ok(())
}

/// Drive turns until a terminating keyword or end of input.
///
/// A responder failure never ends the loop — responders fold errors into
/// their reply text, so every turn prints something and prompts again.
async fn drive(source: &mut dyn LineSource, responder: &dyn Responder, show_spinner: bool) {
    loop {
        let line = match source.read_line("You: ") {
            LineEvent::Line(line) => line,
            LineEvent::Closed => break,
        };

        match plan_turn(&line) {
            Turn::Quit => {
                println!("\nGoodbye! 👋");
                break;
            }
            Turn::Skip => continue,
            Turn::Ask(text) => {
                debug!(input = %text, "processing input");

                let spinner = show_spinner.then(helpers::Spinner::start);
                let reply = responder.respond(&text).await;
                if let Some(spinner) = spinner {
                    spinner.stop().await;
                }

                helpers::print_reply(&reply);
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
