//! Bounded fan-out over scoped threads.
//!
//! At most `limit` scoped worker threads are started. Each worker claims the
//! next unclaimed task from a shared queue and runs it, until the queue is
//! empty. The caller blocks until every worker has been joined. Results come
//! back indexed by task position, whatever order the tasks finished in; a
//! task that panics yields `Err` with the panic payload and its worker moves
//! on to the next task.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use parking_lot::Mutex;

/// Run `work` once per task with at most `limit` running at a time.
///
/// `work` receives the task's position and the task itself. The returned
/// vector has one entry per task, in task order.
pub fn run_bounded<T, R, F>(tasks: Vec<T>, limit: NonZeroUsize, work: F) -> Vec<thread::Result<R>>
where
    T: Send,
    R: Send,
    F: Fn(usize, T) -> R + Sync,
{
    let total = tasks.len();
    let workers = limit.get().min(total);
    let queue = Mutex::new(tasks.into_iter().enumerate());
    let queue = &queue;
    let work = &work;

    let mut finished: Vec<(usize, thread::Result<R>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(move || {
                    let mut done = Vec::new();
                    loop {
                        // The guard is released before the task runs.
                        let next = queue.lock().next();
                        let Some((index, task)) = next else {
                            break;
                        };
                        let outcome =
                            panic::catch_unwind(AssertUnwindSafe(|| work(index, task)));
                        done.push((index, outcome));
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))
            })
            .collect()
    });

    finished.sort_unstable_by_key(|(index, _)| *index);
    debug_assert_eq!(finished.len(), total);
    finished.into_iter().map(|(_, outcome)| outcome).collect()
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
