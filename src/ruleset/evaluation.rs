//! Guard evaluation strategies.
//!
//! `Parallel` gives every guard its own worker thread and resolves on the
//! first failure to arrive, or once every guard has approved. Workers still
//! running after the decision are detached: their outcome lands in a channel
//! nobody reads. `Sequential` runs guards on the calling thread in
//! registration order and stops at the first failure.

use crate::core::{Guard, GuardError, State};
use crossbeam::channel;
use std::io;
use std::sync::Arc;
use std::thread;

/// How the guards of one transition are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Evaluation {
    /// One worker thread per guard; first failure wins.
    #[default]
    Parallel,

    /// Registration order on the calling thread; first failure wins.
    Sequential,
}

/// Guard work handed to a worker thread.
type Job = Box<dyn FnOnce() + Send + 'static>;

const LOST_WORKER: &str = "guard worker exited without a decision";

impl Evaluation {
    /// Run `guards` against `subject`. `snapshot` is only called when the
    /// guards go to worker threads, which need an owned handle on the subject.
    pub(crate) fn run<S, F>(
        self,
        guards: &[Guard<S>],
        subject: &S,
        goal: &State,
        snapshot: F,
    ) -> Result<(), GuardError>
    where
        S: Send + Sync + 'static,
        F: FnOnce() -> Arc<S>,
    {
        match (self, guards) {
            (_, []) => Ok(()),
            // a lone guard gains nothing from a worker thread
            (Evaluation::Sequential, _) | (_, [_]) => sequential(guards, subject, goal),
            (Evaluation::Parallel, _) => parallel(guards, snapshot(), goal, spawn_worker),
        }
    }
}

pub(crate) fn sequential<S>(
    guards: &[Guard<S>],
    subject: &S,
    goal: &State,
) -> Result<(), GuardError> {
    guards.iter().try_for_each(|guard| guard.check(subject, goal))
}

fn spawn_worker(index: usize, job: Job) -> io::Result<()> {
    thread::Builder::new()
        .name(format!("fsm-guard-{index}"))
        .spawn(job)
        .map(drop)
}

/// Fan `guards` out through `spawn` and reduce their outcomes.
///
/// A guard whose job cannot be spawned is checked on the calling thread.
fn parallel<S, P>(
    guards: &[Guard<S>],
    subject: Arc<S>,
    goal: &State,
    mut spawn: P,
) -> Result<(), GuardError>
where
    S: Send + Sync + 'static,
    P: FnMut(usize, Job) -> io::Result<()>,
{
    // Capacity for every outcome: a detached worker never blocks on send.
    let (tx, rx) = channel::bounded(guards.len());

    for (index, guard) in guards.iter().enumerate() {
        let job: Job = {
            let guard = guard.clone();
            // workers outlive this call when a failure short-circuits
            let subject = Arc::clone(&subject);
            let goal = goal.clone();
            let tx = tx.clone();
            Box::new(move || {
                let outcome = guard.check(&subject, &goal);
                tracing::trace!(
                    index,
                    guard = guard.label().unwrap_or("<unnamed>"),
                    ok = outcome.is_ok(),
                    "guard finished"
                );
                // the receiver is gone once a decision was made
                let _ = tx.send(outcome);
            })
        };

        if let Err(err) = spawn(index, job) {
            tracing::warn!(index, error = %err, "could not spawn guard worker, evaluating inline");
            let outcome = guard.check(&subject, goal);
            if outcome.is_err() {
                return outcome;
            }
            let _ = tx.send(outcome);
        }
    }
    drop(tx);

    for _ in 0..guards.len() {
        match rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(denial)) => return Err(denial),
            Err(_) => return Err(GuardError::faulted(LOST_WORKER)),
        }
    }

    Ok(())
}
