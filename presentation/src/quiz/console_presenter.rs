//! Interactive quiz presenter for the terminal.
//!
//! Questions are printed to stdout; answers are read line by line from
//! stdin. A single background thread owns stdin and forwards every line
//! into a channel, so a question that times out never leaves a blocked read
//! behind for the next one.

use crate::output::console::ConsoleFormatter;
use crate::quiz::input::parse_choice;
use async_trait::async_trait;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use trivia_application::{
    PlayerResponse, PresentError, QuestionSlot, QuizPresenter, ResponseStream,
};
use trivia_domain::{AnswerOutcome, Difficulty, PlayerId, Question};

/// Terminal implementation of [`QuizPresenter`].
pub struct ConsoleQuizPresenter {
    lines: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl ConsoleQuizPresenter {
    /// Presenter reading answers from the process's stdin.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self::from_lines(rx)
    }

    /// Presenter reading answers from an arbitrary line source.
    pub fn from_lines(lines: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(lines)),
        }
    }

    fn print(text: &str) {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{}", text);
        let _ = stdout.flush();
    }
}

impl Default for ConsoleQuizPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizPresenter for ConsoleQuizPresenter {
    async fn on_session_start(&self, player: &PlayerId, category: &str, difficulty: Difficulty) {
        Self::print(&ConsoleFormatter::session_banner(
            player.as_str(),
            category,
            difficulty.as_str(),
        ));
        Self::print(&format!("{}\n", "Fetching questions...".dimmed()));
    }

    async fn present(
        &self,
        slot: &QuestionSlot,
        question: &Question,
        choice_labels: &[String],
    ) -> Result<ResponseStream, PresentError> {
        // Waits for the previous question's reader to let go of stdin.
        let mut lines = Arc::clone(&self.lines).lock_owned().await;
        // Anything typed before the question is shown is stale.
        while lines.try_recv().is_ok() {}

        Self::print(&ConsoleFormatter::question(
            slot.number,
            slot.total,
            question,
            choice_labels,
            slot.deadline,
        ));

        let (tx, stream) = ResponseStream::channel(4);
        let choice_count = choice_labels.len();

        // Runs until the stream is dropped or stdin closes; holding the lock
        // keeps the next question from reading until this one is done.
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    line = lines.recv() => {
                        let Some(line) = line else { break };
                        match parse_choice(&line) {
                            Some(index) => {
                                if tx.send(PlayerResponse::now(index)).await.is_err() {
                                    break;
                                }
                            }
                            None => Self::print(&format!(
                                "{} ",
                                format!("Answer with a letter A-{} or a number.", letter(choice_count))
                                    .dimmed()
                            )),
                        }
                    }
                    _ = tx.closed() => break,
                }
            }
        });

        Ok(stream)
    }

    async fn on_resolved(
        &self,
        _slot: &QuestionSlot,
        question: &Question,
        outcome: AnswerOutcome,
        awarded: u64,
    ) {
        if outcome == AnswerOutcome::TimedOut {
            Self::print("\n");
        }
        Self::print(&format!(
            "{}\n",
            ConsoleFormatter::outcome(outcome, awarded, question)
        ));
    }

    async fn on_duplicate_response(&self, _slot: &QuestionSlot) {
        Self::print(&format!("{}\n", ConsoleFormatter::duplicate_notice()));
    }

    async fn on_generation_failure(&self, _player: &PlayerId, reason: &str) {
        Self::print(&format!(
            "{} {}\n",
            "Could not get questions:".red().bold(),
            reason
        ));
    }
}

fn letter(choice_count: usize) -> char {
    u8::try_from(choice_count.clamp(1, 26))
        .map(|n| (b'A' + n - 1) as char)
        .unwrap_or('Z')
}
