//! One-shot deferred tasks on a single-threaded cooperative event loop.
//!
//! The flip lock ends with a deferred callback. [`Timer`] abstracts where
//! that callback runs:
//! - [`ManualTimer`] - a virtual clock advanced by the host (native hosts, tests)
//! - `WindowTimer` - the browser's `setTimeout` (feature `web`)
//!
//! No `Send` bounds; tasks run on the thread that drives the loop.

use std::cell::RefCell;
use std::rc::Rc;

/// A task run once by a [`Timer`].
pub type Task = Box<dyn FnOnce()>;

/// Schedules one-shot deferred tasks.
pub trait Timer {
    /// Run `task` once, no sooner than `delay_ms` from now.
    ///
    /// Tasks cannot be cancelled.
    fn schedule(&self, delay_ms: u32, task: Task);
}

struct PendingTask {
    due_ms: u64,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct Queue {
    now_ms: u64,
    next_seq: u64,
    tasks: Vec<PendingTask>,
}

impl Queue {
    /// Remove the earliest task due at or before `deadline`.
    fn pop_due(&mut self, deadline: u64) -> Option<PendingTask> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= deadline)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;
        Some(self.tasks.swap_remove(idx))
    }
}

/// Deterministic timer queue driven by a virtual clock.
///
/// Clones share the same queue. Time only moves when [`advance`](Self::advance)
/// is called, which makes flip timing reproducible in tests.
///
/// ## Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use flipbook_core_view::timer::{ManualTimer, Timer};
///
/// let timer = ManualTimer::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = fired.clone();
/// timer.schedule(400, Box::new(move || flag.set(true)));
///
/// timer.advance(399);
/// assert!(!fired.get());
/// timer.advance(1);
/// assert!(fired.get());
/// ```
#[derive(Clone, Default)]
pub struct ManualTimer {
    queue: Rc<RefCell<Queue>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.queue.borrow().now_ms
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Move the clock forward by `ms`, running every task that comes due.
    ///
    /// Tasks run in due-time order, ties in scheduling order. A task may
    /// schedule further tasks; those run too if they fall inside the window.
    /// Returns the number of tasks run.
    pub fn advance(&self, ms: u64) -> usize {
        let deadline = self.queue.borrow().now_ms.saturating_add(ms);
        let mut ran = 0;

        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let next = queue.pop_due(deadline);
                if let Some(task) = &next {
                    queue.now_ms = queue.now_ms.max(task.due_ms);
                }
                next
            };
            // Queue borrow released so the task can schedule more work
            match next {
                Some(pending) => {
                    (pending.task)();
                    ran += 1;
                }
                None => break,
            }
        }

        self.queue.borrow_mut().now_ms = deadline;
        ran
    }

    /// Run everything currently scheduled, however far in the future.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let furthest = self.queue.borrow().tasks.iter().map(|t| t.due_ms).max();
            match furthest {
                Some(due) => {
                    let now = self.now_ms();
                    ran += self.advance(due.saturating_sub(now));
                }
                None => return ran,
            }
        }
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay_ms: u32, task: Task) {
        let mut queue = self.queue.borrow_mut();
        let due_ms = queue.now_ms + delay_ms as u64;
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.tasks.push(PendingTask { due_ms, seq, task });
    }
}

impl std::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("ManualTimer")
            .field("now_ms", &queue.now_ms)
            .field("pending", &queue.tasks.len())
            .finish()
    }
}

#[cfg(feature = "web")]
pub use web::{sleep_ms, WindowTimer};

#[cfg(feature = "web")]
mod web {
    use super::{Task, Timer};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    /// Timer backed by `window.setTimeout`.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct WindowTimer;

    impl Timer for WindowTimer {
        fn schedule(&self, delay_ms: u32, task: Task) {
            let Some(window) = web_sys::window() else {
                // Nothing will ever fire; run now rather than hold the lock forever
                log::warn!("no window available, running deferred task immediately");
                task();
                return;
            };
            let callback = Closure::once_into_js(move || task());
            let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
                .is_err()
            {
                log::warn!("setTimeout failed for {delay_ms}ms task");
            }
        }
    }

    /// Resolve after `ms` milliseconds on the browser event loop.
    ///
    /// Resolves immediately when no window is available.
    pub async fn sleep_ms(ms: u32) {
        let delay = i32::try_from(ms).unwrap_or(i32::MAX);
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, delay);
            } else {
                let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
            }
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |name: &'static str| -> Task {
            let sink = sink.clone();
            Box::new(move || sink.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_runs_in_due_order() {
        let timer = ManualTimer::new();
        let (log, task) = recorder();

        timer.schedule(300, task("c"));
        timer.schedule(100, task("a"));
        timer.schedule(200, task("b"));

        assert_eq!(timer.pending(), 3);
        assert_eq!(timer.advance(1000), 3);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(timer.now_ms(), 1000);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_ties_run_in_scheduling_order() {
        let timer = ManualTimer::new();
        let (log, task) = recorder();

        timer.schedule(50, task("first"));
        timer.schedule(50, task("second"));
        timer.advance(50);

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_not_due_yet() {
        let timer = ManualTimer::new();
        let (log, task) = recorder();

        timer.schedule(400, task("unlock"));
        assert_eq!(timer.advance(399), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(timer.advance(1), 1);
        assert_eq!(*log.borrow(), vec!["unlock"]);
    }

    #[test]
    fn test_task_can_schedule_more_work() {
        let timer = ManualTimer::new();
        let (log, task) = recorder();

        let inner_timer = timer.clone();
        let follow_up = task("follow-up");
        timer.schedule(
            100,
            Box::new(move || inner_timer.schedule(100, follow_up)),
        );

        assert_eq!(timer.advance(150), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(timer.advance(50), 1);
        assert_eq!(*log.borrow(), vec!["follow-up"]);
    }

    #[test]
    fn test_delay_measured_from_now() {
        let timer = ManualTimer::new();
        let (log, task) = recorder();

        timer.advance(1000);
        timer.schedule(10, task("late"));
        assert_eq!(timer.advance(9), 0);
        assert_eq!(timer.advance(1), 1);
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[test]
    fn test_run_until_idle() {
        let timer = ManualTimer::new();
        let (log, task) = recorder();

        timer.schedule(5000, task("far"));
        timer.schedule(10, task("near"));
        assert_eq!(timer.run_until_idle(), 2);
        assert_eq!(*log.borrow(), vec!["near", "far"]);
        assert_eq!(timer.now_ms(), 5000);
    }
}
