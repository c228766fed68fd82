//! Console output formatter for quiz sessions

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use std::time::Duration;
use trivia_domain::{AnswerOutcome, Question, ScoreEntry, SessionReport, SessionStatus};

/// Formats questions, outcomes and results for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner shown when a session starts
    pub fn session_banner(player: &str, category: &str, difficulty: &str) -> String {
        format!(
            "{}\n{} {}  {} {}  {} {}\n",
            Self::header("Trivia Quiz"),
            "Player:".cyan().bold(),
            player,
            "Category:".cyan().bold(),
            category,
            "Difficulty:".cyan().bold(),
            difficulty
        )
    }

    /// A question with its labelled choices
    pub fn question(
        number: usize,
        total: usize,
        question: &Question,
        choice_labels: &[String],
        deadline: Duration,
    ) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n",
            format!("Question {}/{}", number, total).yellow().bold(),
            format!(
                "({}, {} points, {}s)",
                question.difficulty(),
                question.points(),
                deadline.as_secs()
            )
            .dimmed()
        ));
        output.push_str(&format!("{}\n", question.text().bold()));
        for label in choice_labels {
            output.push_str(&format!("  {}\n", label));
        }
        output.push_str(&format!("{}", "Your answer: ".cyan()));

        output
    }

    /// One-line verdict for a resolved question
    pub fn outcome(outcome: AnswerOutcome, awarded: u64, question: &Question) -> String {
        let correct = question
            .choices()
            .get(question.correct_index())
            .map(String::as_str)
            .unwrap_or_default();

        match outcome {
            AnswerOutcome::Correct => format!("{} +{} points", "Correct!".green().bold(), awarded),
            AnswerOutcome::Incorrect => format!(
                "{} The answer was: {}",
                "Wrong.".red().bold(),
                correct.bold()
            ),
            AnswerOutcome::TimedOut => format!(
                "{} The answer was: {}",
                "Time's up!".red().bold(),
                correct.bold()
            ),
            AnswerOutcome::AlreadyResolved => Self::duplicate_notice(),
        }
    }

    /// Notice for an answer that arrived after its question closed
    pub fn duplicate_notice() -> String {
        "(answer ignored: this question is already closed)"
            .dimmed()
            .to_string()
    }

    fn status_line(status: SessionStatus) -> String {
        match status {
            SessionStatus::CompletedAllQuestions => {
                "Answered every question!".green().bold().to_string()
            }
            SessionStatus::TerminatedOnWrongAnswer => "Ended on a wrong answer".yellow().to_string(),
            SessionStatus::TerminatedOnTimeout => "Ended on a missed deadline".yellow().to_string(),
            SessionStatus::AbortedOnGenerationFailure => {
                "No questions could be generated".red().to_string()
            }
            SessionStatus::InProgress => "In progress".dimmed().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(50);
        format!("{}\n{:^50}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(50).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &SessionReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(&Self::header("Session Over"));
        output.push('\n');
        output.push_str(&format!("{}\n", Self::status_line(report.status)));
        output.push_str(&format!(
            "{} {}\n",
            "Player:".cyan().bold(),
            report.player
        ));
        output.push_str(&format!(
            "{} {} ({})\n",
            "Category:".cyan().bold(),
            report.category,
            report.difficulty
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Answered:".cyan().bold(),
            report.answered
        ));
        if report.skipped_malformed > 0 {
            output.push_str(&format!(
                "{} {}\n",
                "Skipped (malformed):".dimmed(),
                report.skipped_malformed
            ));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Score:".cyan().bold(),
            report.running_score.to_string().green().bold()
        ));
        output.push_str(&Self::footer());

        output
    }

    fn format_leaderboard(&self, entries: &[ScoreEntry]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Leaderboard"));
        output.push('\n');
        if entries.is_empty() {
            output.push_str(&format!("{}\n", "No scores yet.".dimmed()));
        }
        for (i, entry) in entries.iter().enumerate() {
            let rank = format!("{:>3}.", i + 1);
            let rank = match i {
                0 => rank.yellow().bold(),
                1 | 2 => rank.bold(),
                _ => rank.normal(),
            };
            output.push_str(&format!(
                "{} {:<30} {:>8}\n",
                rank,
                entry.player.as_str(),
                entry.score
            ));
        }
        output.push_str(&Self::footer());

        output
    }
}
