//! Attempt driver — the async task that owns a running attempt.
//!
//! The driver serializes every mutation of one [`Attempt`] through a single
//! command queue consumed by one task, alongside a one-second countdown
//! interval. Observers read consistent snapshots through a watch channel.
//!
//! Persistence is fire-and-forget: entering `Finished` spawns the result
//! write and never holds up the state machine. Dropping the driver before
//! `Finished` closes the queue, which stops the task, cancels the pending
//! timer, and abandons the attempt with nothing persisted.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot, watch};

use crate::model::{AnswerId, Quiz, StudentInfo};
use crate::storage::ResultStore;

use super::engine;
use super::types::{Attempt, AttemptState};

/// Commands accepted by a running driver, mirroring the engine operations.
#[derive(Debug)]
pub enum AttemptCommand {
    SubmitStudentInfo(StudentInfo),
    SelectAnswer(AnswerId),
    SubmitAnswer,
    NextQuestion,
    Restart,
}

/// One queued command plus the ack channel carrying the post-application
/// snapshot back to the caller.
struct QueuedCommand {
    command: AttemptCommand,
    ack: oneshot::Sender<Attempt>,
}

// ---------------------------------------------------------------------------
// Driver handle
// ---------------------------------------------------------------------------

/// Handle to the task driving one attempt.
///
/// Cloneable; all clones feed the same command queue. The attempt is
/// abandoned once every handle is dropped.
#[derive(Clone)]
pub struct AttemptDriver {
    commands: mpsc::Sender<QueuedCommand>,
    state: watch::Receiver<Attempt>,
}

impl AttemptDriver {
    /// Spawn a driver for a fresh attempt over `quiz`.
    ///
    /// Must be called within a tokio runtime. Shuffles use an
    /// entropy-seeded RNG; tests wanting reproducible orderings use
    /// [`AttemptDriver::spawn_with_rng`].
    pub fn spawn(quiz: Quiz, results: Arc<dyn ResultStore + Send + Sync>) -> Self {
        Self::spawn_with_rng(quiz, results, StdRng::from_entropy())
    }

    /// Spawn a driver whose shuffles draw from the given RNG.
    pub fn spawn_with_rng(
        quiz: Quiz,
        results: Arc<dyn ResultStore + Send + Sync>,
        rng: StdRng,
    ) -> Self {
        let attempt = engine::begin(quiz);
        let (command_tx, command_rx) = mpsc::channel(32);
        let (state_tx, state_rx) = watch::channel(attempt.clone());

        tokio::spawn(run(attempt, rng, command_rx, state_tx, results));

        Self {
            commands: command_tx,
            state: state_rx,
        }
    }

    /// Queue a command and wait for it to be applied.
    ///
    /// Returns the attempt snapshot taken immediately after application.
    /// Illegal commands are applied as no-ops, so the snapshot may be
    /// unchanged.
    pub async fn apply(&self, command: AttemptCommand) -> Attempt {
        let (ack, applied) = oneshot::channel();
        let queued = QueuedCommand { command, ack };

        if self.commands.send(queued).await.is_err() {
            error!("attempt driver is gone, command dropped");
            return self.snapshot();
        }

        match applied.await {
            Ok(attempt) => attempt,
            Err(_) => {
                error!("attempt driver dropped a command ack");
                self.snapshot()
            }
        }
    }

    /// The latest attempt snapshot.
    pub fn snapshot(&self) -> Attempt {
        self.state.borrow().clone()
    }

    /// Wait until the attempt changes (a command was applied or a second
    /// elapsed) and return the new snapshot.
    pub async fn updated(&mut self) -> Attempt {
        // Consume anything already pending so the wait is for a genuinely
        // new update, not one this handle just caused.
        let _ = self.state.borrow_and_update();
        if self.state.changed().await.is_err() {
            debug!("attempt driver is gone, returning last snapshot");
        }
        self.snapshot()
    }
}

// ---------------------------------------------------------------------------
// Driver task
// ---------------------------------------------------------------------------

async fn run(
    mut attempt: Attempt,
    mut rng: StdRng,
    mut commands: mpsc::Receiver<QueuedCommand>,
    state: watch::Sender<Attempt>,
    results: Arc<dyn ResultStore + Send + Sync>,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // Set once the current run's result has been handed off; reset when a
    // restart begins a new run.
    let mut handed_off = false;

    loop {
        tokio::select! {
            queued = commands.recv() => {
                match queued {
                    Some(queued) => {
                        if apply_command(&mut attempt, queued, &mut rng) {
                            interval.reset();
                            handed_off = false;
                        }
                    }
                    None => {
                        debug!(
                            "command queue closed, abandoning attempt in state {}",
                            attempt.state.as_tag()
                        );
                        break;
                    }
                }
            }
            _ = interval.tick(), if attempt.state == AttemptState::InProgress => {
                // Commands already queued this second are applied before the
                // countdown, so a submit racing the final tick still lands
                // in the log before expiry forces the finish.
                let mut restarted = false;
                while let Ok(queued) = commands.try_recv() {
                    restarted |= apply_command(&mut attempt, queued, &mut rng);
                }
                if restarted {
                    interval.reset();
                    handed_off = false;
                } else {
                    engine::tick(&mut attempt);
                }
            }
        }

        if attempt.state == AttemptState::Finished && !handed_off {
            handed_off = true;
            persist_result(&attempt, &results);
        }

        if state.send(attempt.clone()).is_err() {
            // No handles left to observe; recv() will see the closed queue
            // on the next turn of the loop.
            debug!("all attempt observers dropped");
        }
    }
}

/// Apply one queued command and ack it. Returns true when the command
/// (re)entered `InProgress`, which restarts the countdown cadence.
fn apply_command(attempt: &mut Attempt, queued: QueuedCommand, rng: &mut StdRng) -> bool {
    let was_in_progress = attempt.state == AttemptState::InProgress;

    match queued.command {
        AttemptCommand::SubmitStudentInfo(info) => {
            engine::submit_student_info(attempt, info, rng)
        }
        AttemptCommand::SelectAnswer(answer_id) => engine::select_answer(attempt, answer_id),
        AttemptCommand::SubmitAnswer => engine::submit_answer(attempt),
        AttemptCommand::NextQuestion => engine::next_question(attempt),
        AttemptCommand::Restart => engine::restart(attempt, rng),
    }

    if queued.ack.send(attempt.clone()).is_err() {
        debug!("command ack dropped by caller");
    }

    !was_in_progress && attempt.state == AttemptState::InProgress
}

/// Hand the finished run's result off to the store without blocking the
/// state machine. Failures are logged and do not revert `Finished`.
fn persist_result(attempt: &Attempt, results: &Arc<dyn ResultStore + Send + Sync>) {
    let Some(result) = attempt.result.clone() else {
        debug!("finished attempt carries no result, nothing to persist");
        return;
    };

    let results = Arc::clone(results);
    tokio::spawn(async move {
        match results.append(&result) {
            Ok(id) => debug!("quiz result persisted as record {id}"),
            Err(e) => error!("failed to persist quiz result: {e}"),
        }
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
