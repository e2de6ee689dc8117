//! Worker pool for the parallel phases
//!
//! Every task of a phase runs on its own blocking-pool thread, so Map and
//! Reduce tasks execute truly in parallel. The caller blocks on the join of
//! all tasks (the phase barrier) before anything downstream reads a slot.

use super::{PhaseType, SlotArray};
use crate::mapreduce::errors::{MapReduceError, MapReduceResult};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, trace, warn};

/// Shared stop signal for the tasks of one phase
///
/// Set when a sibling task fails or the phase deadline expires. Tasks check
/// it between units of work and return early; whatever they return is
/// discarded.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

type TaskOutcome<T> = (usize, Result<T, String>);

/// Run one task per slot in parallel and collect their outputs in index order
///
/// Returns only after every task has published, or on the first failure. A
/// panicking task is reported as [`MapReduceError::TaskFailed`] with its
/// index; when `deadline` elapses first, [`MapReduceError::PhaseTimeout`] is
/// returned. In both cases the remaining tasks are cancelled and no partial
/// output escapes.
pub async fn run_parallel_phase<T, F>(
    phase: PhaseType,
    tasks: Vec<F>,
    deadline: Option<Duration>,
) -> MapReduceResult<Vec<T>>
where
    T: Send + 'static,
    F: FnOnce(&CancelFlag) -> T + Send + 'static,
{
    let cancel = CancelFlag::new();
    let slots = SlotArray::new(phase, tasks.len());
    let mut set = JoinSet::new();

    debug!("Spawning {} {} tasks", tasks.len(), phase);
    for (index, task) in tasks.into_iter().enumerate() {
        let cancel = cancel.clone();
        set.spawn_blocking(move || -> TaskOutcome<T> {
            trace!("{} task {} started", phase, index);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| task(&cancel)));
            trace!("{} task {} finished", phase, index);
            (index, outcome.map_err(panic_message))
        });
    }

    let expires_at = deadline.map(|timeout| (Instant::now() + timeout, timeout));
    let result = join_into_slots(phase, &mut set, slots, expires_at).await;

    if result.is_err() {
        cancel.cancel();
        set.abort_all();
    }
    result
}

/// Wait on the barrier, publishing each finished task into its slot
async fn join_into_slots<T>(
    phase: PhaseType,
    set: &mut JoinSet<TaskOutcome<T>>,
    mut slots: SlotArray<T>,
    expires_at: Option<(Instant, Duration)>,
) -> MapReduceResult<Vec<T>>
where
    T: Send + 'static,
{
    loop {
        let next = match expires_at {
            Some((at, timeout)) => match tokio::time::timeout_at(at, set.join_next()).await {
                Ok(next) => next,
                Err(_) => {
                    warn!(
                        "{} phase timed out after {} with {} of {} tasks published",
                        phase,
                        humantime::format_duration(timeout),
                        slots.filled(),
                        slots.len()
                    );
                    return Err(MapReduceError::PhaseTimeout { phase, timeout });
                }
            },
            None => set.join_next().await,
        };

        let Some(joined) = next else {
            break;
        };

        match joined {
            Ok((index, Ok(value))) => slots.publish(index, value)?,
            Ok((index, Err(reason))) => {
                error!("{} task {} failed: {}", phase, index, reason);
                return Err(MapReduceError::TaskFailed {
                    phase,
                    index,
                    reason,
                });
            }
            Err(join_error) => {
                error!("{} task aborted: {}", phase, join_error);
                return Err(MapReduceError::TaskAborted {
                    phase,
                    reason: join_error.to_string(),
                });
            }
        }
    }

    slots.into_complete()
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
