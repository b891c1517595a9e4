//! Shared CLI helpers — banner, reply printing, thinking spinner.

use colored::Colorize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// Print the banner shown at loop start.
pub fn print_banner(responder_name: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "💬 Banter".cyan().bold(), version.dimmed());
    println!(
        "{}",
        format!("Chatting with: {responder_name}").dimmed()
    );
    println!("{}", "Type a message, or \"exit\" to quit.".dimmed());
    println!();
}

/// Print one reply to stdout.
pub fn print_reply(reply: &str) {
    println!();
    println!("{}", "💬 Banter".cyan().bold());
    if reply.is_empty() {
        println!("{}", "(no reply)".dimmed());
    } else {
        println!("{reply}");
    }
    println!();
}

// ─────────────────────────────────────────────
// Thinking spinner
// ─────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Decorative "thinking" indicator drawn on stderr while a responder call
/// is in flight. Purely cosmetic — nothing else observes it.
pub struct Spinner {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Spinner {
    /// Spawn the animation task.
    pub fn start() -> Self {
        let (stop, mut stopped) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut frame = 0usize;
            loop {
                eprint!(
                    "\r{} {}",
                    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()].cyan(),
                    "thinking...".dimmed()
                );
                frame += 1;

                tokio::select! {
                    _ = stopped.changed() => break,
                    _ = sleep(Duration::from_millis(80)) => {}
                }
            }
            // Wipe the spinner line before the reply prints.
            eprint!("\r{}\r", " ".repeat(24));
        });

        Self { stop, task }
    }

    /// Cancel the animation and wait until the line is cleared.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spinner_stop_cancels_task() {
        let spinner = Spinner::start();
        sleep(Duration::from_millis(20)).await;
        // Must return rather than hang on the animation task.
        spinner.stop().await;
    }
}
