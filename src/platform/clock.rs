//! Scheduler seam
//!
//! The session never holds callbacks. It schedules plain task values on a
//! [`Clock`] and the driver hands due tasks back to it. Each task carries the
//! session generation it was scheduled under, so a task that outlives a
//! restart can be recognized and dropped.

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_MS;

/// Opaque handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(u64);

/// What a scheduled task asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Run one update tick
    Frame,
    /// One second of countdown elapsed
    TimerSecond,
    /// Milestone overlay display time is over
    MilestoneExpired,
    /// Catch/miss flash is over; redraw the field
    FlashReset,
}

/// A task tagged with the session generation that scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduled {
    pub generation: u64,
    pub kind: TaskKind,
}

impl Scheduled {
    pub fn new(generation: u64, kind: TaskKind) -> Self {
        Self { generation, kind }
    }
}

/// Time source and task scheduler driving a session
pub trait Clock {
    /// Current clock time in milliseconds
    fn now_ms(&self) -> u64;

    /// Run `task` once on the next frame
    fn request_frame(&mut self, task: Scheduled) -> TaskHandle;

    /// Run `task` every `interval_ms` until cancelled
    fn every(&mut self, interval_ms: u64, task: Scheduled) -> TaskHandle;

    /// Run `task` once after `delay_ms`
    fn after(&mut self, delay_ms: u64, task: Scheduled) -> TaskHandle;

    /// Cancel a task. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its deadline. Returns `None` once nothing is due, leaving the clock at
    /// `until_ms`.
    fn pop_due(&mut self, until_ms: u64) -> Option<Scheduled>;
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TaskHandle,
    due_ms: u64,
    repeat_ms: Option<u64>,
    task: Scheduled,
}

/// Virtual-time clock
///
/// Time only moves when the driver asks for tasks, which makes it usable both
/// in tests and behind a real frame loop that feeds it elapsed milliseconds.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: u64,
    frame_ms: u64,
    next_handle: u64,
    entries: Vec<Entry>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::with_frame_ms(FRAME_MS)
    }

    /// Clock whose frame requests fire `frame_ms` after being made
    pub fn with_frame_ms(frame_ms: u64) -> Self {
        Self {
            now_ms: 0,
            frame_ms: frame_ms.max(1),
            next_handle: 1,
            entries: Vec::new(),
        }
    }

    /// Number of tasks still scheduled
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Number of scheduled tasks of one kind
    pub fn pending_of(&self, kind: TaskKind) -> usize {
        self.entries.iter().filter(|e| e.task.kind == kind).count()
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    fn schedule(&mut self, due_ms: u64, repeat_ms: Option<u64>, task: Scheduled) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            due_ms,
            repeat_ms,
            task,
        });
        handle
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn request_frame(&mut self, task: Scheduled) -> TaskHandle {
        self.schedule(self.now_ms + self.frame_ms, None, task)
    }

    fn every(&mut self, interval_ms: u64, task: Scheduled) -> TaskHandle {
        let interval_ms = interval_ms.max(1);
        self.schedule(self.now_ms + interval_ms, Some(interval_ms), task)
    }

    fn after(&mut self, delay_ms: u64, task: Scheduled) -> TaskHandle {
        self.schedule(self.now_ms + delay_ms, None, task)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    fn pop_due(&mut self, until_ms: u64) -> Option<Scheduled> {
        // Earliest deadline first, ties broken by scheduling order
        let next = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.handle.0))
            .map(|(i, _)| i);

        let Some(index) = next else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };

        let entry = &mut self.entries[index];
        self.now_ms = self.now_ms.max(entry.due_ms);
        let task = entry.task;
        match entry.repeat_ms {
            Some(interval) => entry.due_ms += interval,
            None => {
                self.entries.swap_remove(index);
            }
        }
        Some(task)
    }
}
