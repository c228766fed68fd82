//! Answer collector: resolves one question exactly once.
//!
//! Two activities race for each question: the player's response (delivered
//! through [`AnswerHandle::submit`]) and the deadline timer (driven by
//! [`AnswerHandle::wait`]). Both write into a single-resolution slot with a
//! compare-and-set, so the first writer decides the outcome and every later
//! write is answered with [`AnswerOutcome::AlreadyResolved`].
//!
//! # Simultaneous events
//!
//! A submission landing in the same scheduler tick as the deadline is
//! resolved in favour of whichever write reaches the slot first. Which one
//! that is depends on task scheduling and is not deterministic; either result
//! is a valid single resolution.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use trivia_domain::{AnswerOutcome, Question};

/// Opens an [`AnswerHandle`] per question with a fixed deadline.
#[derive(Debug, Clone)]
pub struct AnswerCollector {
    deadline: Duration,
}

impl AnswerCollector {
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Start the deadline clock for `question` and begin accepting a
    /// response.
    pub fn open(&self, question: &Question) -> AnswerHandle {
        let (slot, _) = watch::channel(None);
        AnswerHandle {
            inner: Arc::new(HandleInner {
                correct_index: question.correct_index(),
                expires_at: Instant::now() + self.deadline,
                slot,
            }),
        }
    }
}

struct HandleInner {
    correct_index: usize,
    expires_at: Instant,
    slot: watch::Sender<Option<AnswerOutcome>>,
}

/// Shared handle to one open question. Cheap to clone; every clone sees the
/// same resolution.
#[derive(Clone)]
pub struct AnswerHandle {
    inner: Arc<HandleInner>,
}

impl AnswerHandle {
    /// Submit the player's choice.
    ///
    /// The first resolving event wins: returns `Correct` or `Incorrect` when
    /// this call resolved the question (an out-of-range index is
    /// `Incorrect`), `AlreadyResolved` otherwise.
    pub fn submit(&self, chosen_index: usize) -> AnswerOutcome {
        let outcome = AnswerOutcome::judge(chosen_index, self.inner.correct_index);
        if self.resolve(outcome) {
            outcome
        } else {
            AnswerOutcome::AlreadyResolved
        }
    }

    /// Wait for the resolution: whatever `submit` produced, or `TimedOut`
    /// once the deadline passes with no submission.
    pub async fn wait(&self) -> AnswerOutcome {
        let mut rx = self.inner.slot.subscribe();

        tokio::select! {
            resolved = rx.wait_for(Option::is_some) => {
                if let Ok(value) = resolved
                    && let Some(outcome) = *value
                {
                    return outcome;
                }
            }
            _ = tokio::time::sleep_until(self.inner.expires_at) => {
                self.resolve(AnswerOutcome::TimedOut);
            }
        }

        // Either the timer won, or a submission beat it to the slot.
        self.outcome().unwrap_or(AnswerOutcome::TimedOut)
    }

    /// The resolution so far, if any.
    pub fn outcome(&self) -> Option<AnswerOutcome> {
        *self.inner.slot.borrow()
    }

    /// Write `outcome` if the slot is still empty. Returns whether it won.
    fn resolve(&self, outcome: AnswerOutcome) -> bool {
        self.inner.slot.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(outcome);
            true
        })
    }
}
