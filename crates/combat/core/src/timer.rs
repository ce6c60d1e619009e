//! Frame-driven timers.
//!
//! Everything here advances only when the owner calls `tick` with the frame's
//! delta time, so timers stay in lockstep with the rest of the simulation.

/// One-shot countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// A countdown that is already finished.
    pub const fn ready() -> Self {
        Self { remaining: 0.0 }
    }

    /// Restarts the countdown with `duration` seconds left.
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Advances the countdown.
    ///
    /// Returns `true` on the tick that brings it to zero. A finished countdown
    /// never fires again until restarted.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= delta_time;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }
}

/// Repeating interval that fires once every `period` seconds of accumulated
/// time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    period: f32,
    accumulated: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulated: 0.0,
        }
    }

    /// Advances the interval and reports whether it fired this tick.
    ///
    /// At most one firing per tick; surplus time carries over.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.accumulated += delta_time;
        if self.accumulated >= self.period {
            self.accumulated -= self.period;
            // a long frame must not queue a burst of firings
            if self.accumulated >= self.period {
                self.accumulated = 0.0;
            }
            true
        } else {
            false
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

/// Handle to a task queued on a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

type Task<O> = Box<dyn FnOnce(&mut O)>;

struct ScheduledTask<O: ?Sized> {
    id: TaskId,
    remaining: f32,
    task: Task<O>,
}

/// Cooperative delayed-callback queue.
///
/// Tasks receive the owner when they run. They run on the first `tick` at
/// which their delay has elapsed, in the order they were scheduled.
pub struct Scheduler<O: ?Sized> {
    tasks: Vec<ScheduledTask<O>>,
    next_id: u64,
}

impl<O: ?Sized> Scheduler<O> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    pub fn schedule(&mut self, delay: f32, task: impl FnOnce(&mut O) + 'static) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            remaining: delay,
            task: Box::new(task),
        });
        id
    }

    /// Drops a pending task. Returns `false` if it already ran or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Advances every pending task and runs the ones that came due.
    ///
    /// Returns how many tasks ran.
    pub fn tick(&mut self, delta_time: f32, owner: &mut O) -> usize {
        if self.tasks.is_empty() {
            return 0;
        }

        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.tasks.len());
        for mut task in self.tasks.drain(..) {
            task.remaining -= delta_time;
            if task.remaining <= 0.0 {
                due.push(task);
            } else {
                pending.push(task);
            }
        }
        self.tasks = pending;

        let ran = due.len();
        for task in due {
            (task.task)(owner);
        }
        ran
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<O: ?Sized> Default for Scheduler<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ?Sized> core::fmt::Debug for Scheduler<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.tasks.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_once() {
        let mut countdown = Countdown::default();
        assert!(countdown.is_ready());

        countdown.start(1.0);
        assert!(!countdown.tick(0.5));
        assert!(countdown.tick(0.5));
        assert!(countdown.is_ready());
        assert!(!countdown.tick(0.5));
    }

    #[test]
    fn interval_fires_every_period() {
        let mut interval = Interval::new(0.2);
        let fired: Vec<bool> = (0..6).map(|_| interval.tick(0.1)).collect();
        assert_eq!(fired, vec![false, true, false, true, false, true]);
    }

    #[test]
    fn interval_does_not_burst_after_long_frame() {
        let mut interval = Interval::new(0.2);
        assert!(interval.tick(1.0));
        assert!(!interval.tick(0.1));
    }

    #[test]
    fn scheduler_runs_due_tasks_in_order() {
        let mut scheduler: Scheduler<Vec<&'static str>> = Scheduler::new();
        let mut log = Vec::new();

        scheduler.schedule(0.5, |log| log.push("first"));
        scheduler.schedule(0.5, |log| log.push("second"));
        scheduler.schedule(2.0, |log| log.push("late"));

        assert_eq!(scheduler.tick(0.25, &mut log), 0);
        assert_eq!(scheduler.tick(0.25, &mut log), 2);
        assert_eq!(log, vec!["first", "second"]);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn cancelled_task_never_runs() {
        let mut scheduler: Scheduler<u32> = Scheduler::new();
        let mut hits = 0;

        let id = scheduler.schedule(0.1, |hits| *hits += 1);
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        scheduler.tick(1.0, &mut hits);
        assert_eq!(hits, 0);
        assert!(scheduler.is_empty());
    }
}
