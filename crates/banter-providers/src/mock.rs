//! Offline responder — canned replies with no network access.
//!
//! Stands in for a real provider when no credential is configured. Simple
//! keyword rules pick a themed reply; anything else gets a pseudo-random
//! filler phrase plus an echo of the input. A short artificial delay keeps
//! the console pacing close to a real provider call.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::time::{sleep, Duration};

use banter_core::utils::wall_clock;

use crate::traits::Responder;

/// Reply for empty or whitespace-only input.
const NO_INPUT_REPLY: &str = "I didn't catch anything there. Type something and I'll reply!";

const GREETING_REPLY: &str = "Hello! How can I help you today?";

const FAREWELL_REPLY: &str = "Goodbye! It was nice chatting with you.";

const HELP_REPLY: &str =
    "I can chat about almost anything. Ask me about the weather, the time, or just say hello.";

const WEATHER_REPLY: &str =
    "I can't check the real weather from here, but I hope it's nice where you are!";

/// Filler phrases used when no keyword rule matches.
const FILLERS: &[&str] = &[
    "That's interesting!",
    "Tell me more about that.",
    "I see what you mean.",
    "Good point!",
    "I hadn't thought of it that way.",
    "That makes sense.",
    "Hmm, let me think about that.",
    "You might be onto something.",
    "Fair enough!",
    "Sounds reasonable to me.",
];

/// Responder that answers from a fixed phrase list.
///
/// Never inspects the model name and never touches the network.
pub struct MockResponder {
    /// Artificial reply delay, to emulate provider latency.
    delay: Duration,
}

impl MockResponder {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(500),
        }
    }

    /// Compose the reply for one input. Pure string work, no delay.
    fn compose(&self, text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return NO_INPUT_REPLY.to_string();
        }

        let lower = trimmed.to_lowercase();

        if contains_any(&lower, &["hello", "hi", "hey"]) {
            return GREETING_REPLY.to_string();
        }
        if contains_any(&lower, &["bye", "goodbye", "exit"]) {
            return FAREWELL_REPLY.to_string();
        }
        if lower.contains("help") {
            return HELP_REPLY.to_string();
        }
        if lower.contains("weather") {
            return WEATHER_REPLY.to_string();
        }
        if contains_any(&lower, &["time", "date"]) {
            return format!("It's currently {}.", wall_clock());
        }

        let filler = FILLERS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FILLERS[0]);
        format!("{} You said: \"{}\"", filler, trimmed)
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, text: &str) -> String {
        sleep(self.delay).await;
        self.compose(text)
    }

    fn name(&self) -> &str {
        "offline"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
