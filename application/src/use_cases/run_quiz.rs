//! Run Quiz use case: the session controller.
//!
//! Drives one session for one player:
//!
//! 1. Fetch a batch from the [`QuestionGenerator`] and validate every record.
//!    No usable questions (or a generator error) aborts the session with a
//!    zero-score report.
//! 2. For each question: open an [`AnswerCollector`] handle, present the
//!    question, forward the player's responses into the handle, and wait for
//!    the single resolution.
//! 3. `Correct` credits the [`ScoreLedger`] and moves on; `Incorrect` or
//!    `TimedOut` terminates the session.
//! 4. Emit the final [`SessionReport`].
//!
//! Questions run strictly one after another; the wait on the collector is the
//! only suspension point of the loop.
//!
//! # Cancellation
//!
//! With a [`CancellationToken`] attached, cancelling abandons the session in
//! place: points already committed to the ledger stay, the running score of
//! the abandoned session is not reported.

use crate::config::QuizParams;
use crate::ports::event_logger::{NoQuizEventLogger, QuizEvent, QuizEventLogger};
use crate::ports::presenter::{PresentError, QuestionSlot, QuizPresenter};
use crate::ports::question_generator::{GenerationError, GenerationRequest, QuestionGenerator};
use crate::use_cases::answer_collector::AnswerCollector;
use crate::use_cases::score_ledger::{LedgerError, ScoreLedger};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use trivia_domain::core::string::truncate;
use trivia_domain::{
    AnswerOutcome, Difficulty, DomainError, PlayerId, Question, QuestionBatch, RejectedQuestion,
    SessionReport, SessionState,
};

/// Errors that stop a session without a report
#[derive(Error, Debug)]
pub enum RunQuizError {
    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    #[error("Presentation failed: {0}")]
    Presentation(#[from] PresentError),

    #[error("Session cancelled")]
    Cancelled,
}

impl RunQuizError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunQuizError::Cancelled)
    }
}

/// Input for the [`RunQuizUseCase`].
#[derive(Debug, Clone)]
pub struct RunQuizInput {
    pub player: PlayerId,
    pub category: String,
    pub difficulty: Difficulty,
    /// Requested question count; `None` uses [`QuizParams::question_count`].
    pub count: Option<usize>,
}

impl RunQuizInput {
    pub fn new(player: PlayerId, category: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            player,
            category: category.into(),
            difficulty,
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Everything a finished session hands back to its caller.
#[derive(Debug)]
pub struct QuizRun {
    pub report: SessionReport,
    /// Set when the session aborted because no batch could be produced.
    pub generation_error: Option<GenerationError>,
    /// Increments the store rejected. The report's running score still
    /// counts those points.
    pub ledger_errors: Vec<LedgerError>,
    /// Generator records skipped for breaking question invariants.
    pub rejected: Vec<RejectedQuestion>,
}

impl QuizRun {
    /// Whether every point in the report reached the store.
    pub fn is_fully_persisted(&self) -> bool {
        self.ledger_errors.is_empty()
    }
}

/// Use case for running one quiz session.
///
/// Collaborators are injected per invocation; the use case holds no
/// session state between calls.
pub struct RunQuizUseCase {
    generator: Arc<dyn QuestionGenerator>,
    presenter: Arc<dyn QuizPresenter>,
    ledger: Arc<ScoreLedger>,
    event_logger: Arc<dyn QuizEventLogger>,
    params: QuizParams,
    cancellation: Option<CancellationToken>,
}

impl RunQuizUseCase {
    pub fn new(
        generator: Arc<dyn QuestionGenerator>,
        presenter: Arc<dyn QuizPresenter>,
        ledger: Arc<ScoreLedger>,
    ) -> Self {
        Self {
            generator,
            presenter,
            ledger,
            event_logger: Arc::new(NoQuizEventLogger),
            params: QuizParams::default(),
            cancellation: None,
        }
    }

    pub fn with_params(mut self, params: QuizParams) -> Self {
        self.params = params;
        self
    }

    /// Create with an event logger.
    pub fn with_event_logger(mut self, logger: Arc<dyn QuizEventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Set a cancellation token for graceful shutdown.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Run one session to its terminal status.
    pub async fn execute(&self, input: RunQuizInput) -> Result<QuizRun, RunQuizError> {
        let count = self.params.resolve_count(input.count)?;
        let category = input.category.trim();
        if category.is_empty() {
            return Err(DomainError::InvalidCategory(input.category.clone()).into());
        }

        info!(
            "Starting quiz for {}: {} x{} ({})",
            input.player, category, count, input.difficulty
        );

        let mut state = SessionState::new(input.player.clone(), category, input.difficulty);
        self.presenter
            .on_session_start(&input.player, category, input.difficulty)
            .await;

        let request = GenerationRequest::new(category, input.difficulty, count);
        let (generation_error, rejected) = match self.fetch_batch(&request).await? {
            Ok((batch, rejected)) => {
                let empty = batch.is_empty();
                state.load_batch(batch, rejected.len());
                (empty.then_some(GenerationError::EmptyBatch), rejected)
            }
            Err(error) => (Some(error), Vec::new()),
        };

        if let Some(error) = generation_error {
            warn!("Question generation failed for {}: {}", input.player, error);
            state.abort_on_generation_failure();
            self.presenter
                .on_generation_failure(&input.player, &error.to_string())
                .await;
            let report = self.finish(&state).await;
            return Ok(QuizRun {
                report,
                generation_error: Some(error),
                ledger_errors: Vec::new(),
                rejected,
            });
        }

        let total = state.remaining();
        let collector = AnswerCollector::new(self.params.deadline);
        let mut ledger_errors = Vec::new();
        let mut number = 0;

        while let Some(question) = state.next_question() {
            number += 1;
            let slot = QuestionSlot {
                player: input.player.clone(),
                number,
                total,
                deadline: collector.deadline(),
            };

            let outcome = self.ask(&collector, &slot, &question).await?;
            let awarded = state.apply(&question, outcome);

            if awarded > 0 {
                match self.ledger.increment(&input.player, awarded).await {
                    Ok(new_total) => debug!("{} now has {} points", input.player, new_total),
                    Err(e) => {
                        warn!(
                            "Could not persist {} points for {}: {}",
                            awarded,
                            input.player,
                            e.store_error()
                        );
                        ledger_errors.push(e);
                    }
                }
            }

            self.event_logger.log(QuizEvent::new(
                "answer_resolved",
                json!({
                    "player": input.player.as_str(),
                    "number": number,
                    "outcome": outcome.as_str(),
                    "awarded": awarded,
                    "running_score": state.running_score(),
                }),
            ));
            self.presenter
                .on_resolved(&slot, &question, outcome, awarded)
                .await;
        }

        let report = self.finish(&state).await;
        Ok(QuizRun {
            report,
            generation_error: None,
            ledger_errors,
            rejected,
        })
    }

    /// Fetch and validate the batch. The batch may come back empty when
    /// every record was rejected.
    ///
    /// The outer `Result` carries cancellation; the inner one the
    /// generation outcome.
    async fn fetch_batch(
        &self,
        request: &GenerationRequest,
    ) -> Result<Result<(QuestionBatch, Vec<RejectedQuestion>), GenerationError>, RunQuizError>
    {
        let generated = match &self.cancellation {
            Some(token) => tokio::select! {
                records = self.generator.generate(request) => records,
                _ = token.cancelled() => return Err(RunQuizError::Cancelled),
            },
            None => self.generator.generate(request).await,
        };

        let mut records = match generated {
            Ok(records) => records,
            Err(e) => return Ok(Err(e)),
        };
        if records.len() > request.count {
            debug!(
                "Generator returned {} records, keeping the first {}",
                records.len(),
                request.count
            );
            records.truncate(request.count);
        }

        let (batch, rejected) = QuestionBatch::from_raw(records, request.difficulty);
        for r in &rejected {
            warn!("Skipping malformed question #{}: {}", r.position + 1, r.reason);
        }

        Ok(Ok((batch, rejected)))
    }

    /// Present one question and wait for its single resolution.
    async fn ask(
        &self,
        collector: &AnswerCollector,
        slot: &QuestionSlot,
        question: &Question,
    ) -> Result<AnswerOutcome, RunQuizError> {
        let handle = collector.open(question);
        let labels = question.choice_labels();
        let mut responses = self.presenter.present(slot, question, &labels).await?;

        debug!(
            "Presented question {}/{} to {}: {}",
            slot.number,
            slot.total,
            slot.player,
            truncate(question.text(), 80)
        );
        self.event_logger.log(QuizEvent::new(
            "question_presented",
            json!({
                "player": slot.player.as_str(),
                "number": slot.number,
                "total": slot.total,
                "question": question.text(),
                "difficulty": question.difficulty(),
                "deadline_secs": slot.deadline.as_secs_f64(),
            }),
        ));

        // Feed player responses into the collector until the question
        // resolves and the forwarder is aborted.
        let forwarder = {
            let handle = handle.clone();
            let presenter = Arc::clone(&self.presenter);
            let slot = slot.clone();
            tokio::spawn(async move {
                while let Some(response) = responses.recv().await {
                    match handle.submit(response.chosen_index) {
                        AnswerOutcome::AlreadyResolved => {
                            debug!(
                                "Ignoring late response from {} to question {}",
                                slot.player, slot.number
                            );
                            presenter.on_duplicate_response(&slot).await;
                        }
                        outcome => debug!(
                            "{} answered question {} at {}: {}",
                            slot.player, slot.number, response.at, outcome
                        ),
                    }
                }
            })
        };

        let outcome = match &self.cancellation {
            Some(token) => tokio::select! {
                outcome = handle.wait() => outcome,
                _ = token.cancelled() => {
                    forwarder.abort();
                    return Err(RunQuizError::Cancelled);
                }
            },
            None => handle.wait().await,
        };
        // Let responses already queued behind the winner reach the
        // duplicate hook before the forwarder goes away.
        tokio::task::yield_now().await;
        forwarder.abort();

        Ok(outcome)
    }

    async fn finish(&self, state: &SessionState) -> SessionReport {
        let report = state.report();
        info!(
            "Quiz for {} finished: {} with {} points",
            report.player, report.status, report.running_score
        );
        self.event_logger.log(QuizEvent::new(
            "session_finished",
            json!({
                "player": report.player.as_str(),
                "category": report.category,
                "difficulty": report.difficulty,
                "status": report.status,
                "running_score": report.running_score,
                "answered": report.answered,
                "skipped_malformed": report.skipped_malformed,
            }),
        ));
        self.presenter.on_report(&report).await;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::presenter::{PlayerResponse, ResponseStream};
    use crate::ports::score_store::{ScoreStore, StoreError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;
    use trivia_domain::{RawQuestion, ScoreTable, SessionStatus};

    const DEADLINE: Duration = Duration::from_secs(20);

    // ==================== Test Mocks ====================

    struct ScriptedGenerator {
        result: Mutex<Option<Result<Vec<RawQuestion>, GenerationError>>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedGenerator {
        fn new(result: Result<Vec<RawQuestion>, GenerationError>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn batch(records: Vec<RawQuestion>) -> Self {
            Self::new(Ok(records))
        }
    }

    #[async_trait]
    impl QuestionGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<Vec<RawQuestion>, GenerationError> {
            self.requests.lock().unwrap().push(request.clone());
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(GenerationError::RequestFailed("called twice".into())))
        }
    }

    /// What the scripted player does with the next question.
    #[derive(Debug, Clone, Copy)]
    enum Play {
        Right,
        Wrong,
        OutOfRange,
        Silent,
        /// Correct then wrong, both queued before the stream is returned.
        RightTwice,
        RightAfter(Duration),
    }

    #[derive(Default)]
    struct ScriptedPresenter {
        script: Mutex<VecDeque<Play>>,
        resolved: Mutex<Vec<(usize, AnswerOutcome, u64)>>,
        duplicates: Mutex<usize>,
        generation_failures: Mutex<Vec<String>>,
        reports: Mutex<Vec<SessionReport>>,
    }

    impl ScriptedPresenter {
        fn new(script: &[Play]) -> Self {
            Self {
                script: Mutex::new(script.iter().copied().collect()),
                ..Default::default()
            }
        }

        fn outcomes(&self) -> Vec<AnswerOutcome> {
            self.resolved.lock().unwrap().iter().map(|r| r.1).collect()
        }
    }

    #[async_trait]
    impl QuizPresenter for ScriptedPresenter {
        async fn present(
            &self,
            _slot: &QuestionSlot,
            question: &Question,
            choice_labels: &[String],
        ) -> Result<ResponseStream, PresentError> {
            assert_eq!(choice_labels.len(), question.choices().len());
            let play = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(PresentError::ChannelClosed)?;
            let correct = question.correct_index();
            let wrong = (correct + 1) % question.choices().len();

            let (tx, stream) = ResponseStream::channel(4);
            if let Play::RightTwice = play {
                tx.try_send(PlayerResponse::now(correct)).unwrap();
                tx.try_send(PlayerResponse::now(wrong)).unwrap();
                return Ok(stream);
            }
            tokio::spawn(async move {
                let first = match play {
                    Play::Right | Play::RightTwice => correct,
                    Play::Wrong => wrong,
                    Play::OutOfRange => 99,
                    Play::RightAfter(delay) => {
                        tokio::time::sleep(delay).await;
                        correct
                    }
                    Play::Silent => {
                        // Keep the channel open past the deadline.
                        tokio::time::sleep(DEADLINE * 2).await;
                        return;
                    }
                };
                let _ = tx.send(PlayerResponse::now(first)).await;
            });
            Ok(stream)
        }

        async fn on_resolved(
            &self,
            slot: &QuestionSlot,
            _question: &Question,
            outcome: AnswerOutcome,
            awarded: u64,
        ) {
            self.resolved
                .lock()
                .unwrap()
                .push((slot.number, outcome, awarded));
        }

        async fn on_duplicate_response(&self, _slot: &QuestionSlot) {
            *self.duplicates.lock().unwrap() += 1;
        }

        async fn on_generation_failure(&self, _player: &PlayerId, reason: &str) {
            self.generation_failures
                .lock()
                .unwrap()
                .push(reason.to_string());
        }

        async fn on_report(&self, report: &SessionReport) {
            self.reports.lock().unwrap().push(report.clone());
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        table: Mutex<ScoreTable>,
    }

    #[async_trait]
    impl ScoreStore for MemoryStore {
        async fn load(&self) -> Result<ScoreTable, StoreError> {
            Ok(self.table.lock().unwrap().clone())
        }

        async fn save(&self, table: &ScoreTable) -> Result<(), StoreError> {
            *self.table.lock().unwrap() = table.clone();
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ScoreStore for FailingStore {
        async fn load(&self) -> Result<ScoreTable, StoreError> {
            Ok(ScoreTable::new())
        }

        async fn save(&self, _table: &ScoreTable) -> Result<(), StoreError> {
            Err(StoreError::Io("quota exceeded".to_string()))
        }
    }

    // ==================== Helpers ====================

    fn record(difficulty: &str) -> RawQuestion {
        RawQuestion {
            text: format!("A {} question", difficulty),
            choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index: Some(2),
            difficulty: Some(difficulty.to_string()),
            category: None,
        }
    }

    fn malformed() -> RawQuestion {
        RawQuestion {
            text: "Broken".to_string(),
            choices: vec!["only".into()],
            correct_index: Some(0),
            difficulty: None,
            category: None,
        }
    }

    fn player() -> PlayerId {
        "player-1".parse().unwrap()
    }

    fn input(count: usize) -> RunQuizInput {
        RunQuizInput::new(player(), "Gaming", Difficulty::Easy).with_count(count)
    }

    struct Harness {
        presenter: Arc<ScriptedPresenter>,
        ledger: Arc<ScoreLedger>,
        use_case: RunQuizUseCase,
    }

    fn harness(generator: ScriptedGenerator, script: &[Play]) -> Harness {
        harness_with_store(generator, script, Arc::new(MemoryStore::default()))
    }

    fn harness_with_store(
        generator: ScriptedGenerator,
        script: &[Play],
        store: Arc<dyn ScoreStore>,
    ) -> Harness {
        let presenter = Arc::new(ScriptedPresenter::new(script));
        let ledger = Arc::new(ScoreLedger::new(store));
        let use_case = RunQuizUseCase::new(Arc::new(generator), presenter.clone(), ledger.clone())
            .with_params(QuizParams::default().with_deadline(DEADLINE));
        Harness {
            presenter,
            ledger,
            use_case,
        }
    }

    // ==================== Scenarios ====================

    #[tokio::test(start_paused = true)]
    async fn test_wrong_answer_on_third_question() {
        let h = harness(
            ScriptedGenerator::batch(vec![record("easy"), record("medium"), record("hard")]),
            &[Play::Right, Play::Right, Play::Wrong],
        );

        let run = h.use_case.execute(input(3)).await.unwrap();

        assert_eq!(run.report.running_score, 15);
        assert_eq!(run.report.status, SessionStatus::TerminatedOnWrongAnswer);
        assert_eq!(run.report.answered, 3);
        assert_eq!(h.ledger.get(&player()).await, 15);
        assert_eq!(
            h.presenter.outcomes(),
            vec![
                AnswerOutcome::Correct,
                AnswerOutcome::Correct,
                AnswerOutcome::Incorrect
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_correct_completes() {
        let h = harness(
            ScriptedGenerator::batch(vec![record("easy"), record("easy"), record("easy")]),
            &[Play::Right, Play::Right, Play::Right],
        );

        let run = h.use_case.execute(input(3)).await.unwrap();

        assert_eq!(run.report.running_score, 15);
        assert_eq!(run.report.status, SessionStatus::CompletedAllQuestions);
        assert!(run.is_fully_persisted());
        assert_eq!(h.ledger.get(&player()).await, 15);
        assert_eq!(h.presenter.reports.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_first_answer_scores_nothing() {
        let h = harness(
            ScriptedGenerator::batch(vec![record("hard"), record("hard")]),
            &[Play::Wrong],
        );

        let run = h.use_case.execute(input(2)).await.unwrap();

        assert_eq!(run.report.running_score, 0);
        assert_eq!(run.report.status, SessionStatus::TerminatedOnWrongAnswer);
        assert_eq!(h.presenter.outcomes().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_silence_times_out() {
        let h = harness(
            ScriptedGenerator::batch(vec![record("medium"), record("medium"), record("easy")]),
            &[Play::Right, Play::Silent],
        );

        let start = Instant::now();
        let run = h.use_case.execute(input(3)).await.unwrap();

        assert_eq!(run.report.status, SessionStatus::TerminatedOnTimeout);
        assert_eq!(run.report.running_score, 10);
        assert!(start.elapsed() >= DEADLINE);
        assert!(start.elapsed() < DEADLINE * 2);
        assert_eq!(
            h.presenter.outcomes(),
            vec![AnswerOutcome::Correct, AnswerOutcome::TimedOut]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_after_deadline_times_out() {
        let h = harness(
            ScriptedGenerator::batch(vec![record("easy")]),
            &[Play::RightAfter(DEADLINE + Duration::from_secs(1))],
        );

        let run = h.use_case.execute(input(1)).await.unwrap();

        assert_eq!(run.report.status, SessionStatus::TerminatedOnTimeout);
        assert_eq!(run.report.running_score, 0);
        assert_eq!(h.ledger.get(&player()).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_just_before_deadline_counts() {
        let h = harness(
            ScriptedGenerator::batch(vec![record("hard")]),
            &[Play::RightAfter(DEADLINE - Duration::from_secs(1))],
        );

        let run = h.use_case.execute(input(1)).await.unwrap();

        assert_eq!(run.report.status, SessionStatus::CompletedAllQuestions);
        assert_eq!(run.report.running_score, 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_choice_is_incorrect() {
        let h = harness(
            ScriptedGenerator::batch(vec![record("easy")]),
            &[Play::OutOfRange],
        );

        let run = h.use_case.execute(input(1)).await.unwrap();

        assert_eq!(run.report.status, SessionStatus::TerminatedOnWrongAnswer);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_response_scores_once() {
        let h = harness(
            ScriptedGenerator::batch(vec![record("medium"), record("medium")]),
            &[Play::RightTwice, Play::Right],
        );

        let run = h.use_case.execute(input(2)).await.unwrap();

        assert_eq!(run.report.status, SessionStatus::CompletedAllQuestions);
        assert_eq!(run.report.running_score, 20);
        assert_eq!(h.ledger.get(&player()).await, 20);
        assert_eq!(
            h.presenter.outcomes(),
            vec![AnswerOutcome::Correct, AnswerOutcome::Correct]
        );
        // The queued wrong answer is reported back, not judged.
        assert_eq!(*h.presenter.duplicates.lock().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_question_is_skipped() {
        let h = harness(
            ScriptedGenerator::batch(vec![record("easy"), malformed(), record("hard")]),
            &[Play::Right, Play::Right],
        );

        let run = h.use_case.execute(input(3)).await.unwrap();

        assert_eq!(run.report.status, SessionStatus::CompletedAllQuestions);
        assert_eq!(run.report.running_score, 20);
        assert_eq!(run.report.answered, 2);
        assert_eq!(run.report.skipped_malformed, 1);
        assert_eq!(run.rejected.len(), 1);
        assert_eq!(run.rejected[0].position, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_batch_aborts_with_generation_failure() {
        let h = harness(ScriptedGenerator::batch(vec![]), &[]);

        let run = h.use_case.execute(input(5)).await.unwrap();

        assert_eq!(run.report.running_score, 0);
        assert_eq!(run.report.status, SessionStatus::AbortedOnGenerationFailure);
        assert!(matches!(
            run.generation_error,
            Some(GenerationError::EmptyBatch)
        ));
        assert_eq!(h.presenter.generation_failures.lock().unwrap().len(), 1);
        assert!(h.presenter.outcomes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_malformed_batch_aborts() {
        let h = harness(ScriptedGenerator::batch(vec![malformed(), malformed()]), &[]);

        let run = h.use_case.execute(input(2)).await.unwrap();

        assert_eq!(run.report.status, SessionStatus::AbortedOnGenerationFailure);
        assert!(matches!(
            run.generation_error,
            Some(GenerationError::EmptyBatch)
        ));
        assert_eq!(run.report.running_score, 0);
        assert_eq!(run.report.answered, 0);
        assert_eq!(run.report.skipped_malformed, 2);
        assert_eq!(run.rejected.len(), 2);
        assert_eq!(run.rejected[1].position, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generator_error_aborts() {
        let h = harness(
            ScriptedGenerator::new(Err(GenerationError::Unparsable("not json".into()))),
            &[],
        );

        let run = h.use_case.execute(input(5)).await.unwrap();

        assert_eq!(run.report.status, SessionStatus::AbortedOnGenerationFailure);
        assert!(matches!(
            run.generation_error,
            Some(GenerationError::Unparsable(_))
        ));
        let failures = h.presenter.generation_failures.lock().unwrap();
        assert!(failures[0].contains("not json"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_extra_records_are_truncated_to_count() {
        let generator = ScriptedGenerator::batch(vec![record("easy"); 4]);
        let h = harness(generator, &[Play::Right, Play::Right]);

        let run = h.use_case.execute(input(2)).await.unwrap();

        assert_eq!(run.report.answered, 2);
        assert_eq!(run.report.status, SessionStatus::CompletedAllQuestions);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ledger_failure_keeps_running_score() {
        let h = harness_with_store(
            ScriptedGenerator::batch(vec![record("easy"), record("hard")]),
            &[Play::Right, Play::Right],
            Arc::new(FailingStore),
        );

        let run = h.use_case.execute(input(2)).await.unwrap();

        assert_eq!(run.report.status, SessionStatus::CompletedAllQuestions);
        assert_eq!(run.report.running_score, 20);
        assert_eq!(run.ledger_errors.len(), 2);
        assert!(!run.is_fully_persisted());
        assert!(matches!(run.ledger_errors[0], LedgerError::Write(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_count_is_requested() {
        let generator = Arc::new(ScriptedGenerator::batch(vec![record("easy")]));
        let presenter = Arc::new(ScriptedPresenter::new(&[Play::Right]));
        let ledger = Arc::new(ScoreLedger::new(Arc::new(MemoryStore::default())));
        let use_case = RunQuizUseCase::new(generator.clone(), presenter, ledger);

        let input = RunQuizInput::new(player(), "  Anime  ", Difficulty::Medium);
        use_case.execute(input).await.unwrap();

        let requests = generator.requests.lock().unwrap();
        assert_eq!(
            requests[0],
            GenerationRequest::new("Anime", Difficulty::Medium, 5)
        );
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let h = harness(ScriptedGenerator::batch(vec![]), &[]);

        let err = h.use_case.execute(input(0)).await.unwrap_err();
        assert!(matches!(
            err,
            RunQuizError::InvalidInput(DomainError::InvalidQuestionCount { .. })
        ));

        let blank = RunQuizInput::new(player(), "  ", Difficulty::Easy);
        let err = h.use_case.execute(blank).await.unwrap_err();
        assert!(matches!(
            err,
            RunQuizError::InvalidInput(DomainError::InvalidCategory(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_presenter_failure_is_surfaced() {
        // Script runs out after the first question.
        let h = harness(
            ScriptedGenerator::batch(vec![record("easy"), record("easy")]),
            &[Play::Right],
        );

        let err = h.use_case.execute(input(2)).await.unwrap_err();
        assert!(matches!(
            err,
            RunQuizError::Presentation(PresentError::ChannelClosed)
        ));
        // The first question's points were already committed.
        assert_eq!(h.ledger.get(&player()).await, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_abandons_session() {
        let token = CancellationToken::new();
        let h = harness(
            ScriptedGenerator::batch(vec![record("easy"), record("easy")]),
            &[Play::Right, Play::Silent],
        );
        let use_case = h.use_case.with_cancellation(token.clone());

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            canceller.cancel();
        });

        let err = use_case.execute(input(2)).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(h.ledger.get(&player()).await, 5);
        assert!(h.presenter.reports.lock().unwrap().is_empty());
    }
}
