//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never touches Zellij directly. It returns a
//! `Vec<Action>` and the plugin shim translates each one into host calls
//! (`web_request`, `set_timeout`, opening a pane, hiding itself).
//!
//! Scheduled timers go through a [`TimerQueue`], which hands each fired
//! timer back as the task it was scheduled for.
//!
//! # Example
//!
//! ```rust
//! use bingeshelf::app::{Action, TimerTask};
//!
//! let actions = vec![Action::ScheduleTimer(TimerTask::CloseAutosuggest)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::api::{ApiRequest, MediaSource};
use std::collections::VecDeque;
use std::time::Duration;

/// Work scheduled on the runtime's timer.
///
/// Zellij timer events carry no identity, so the shim queues these in
/// scheduling order and hands them back one per `Timer` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Delayed autosuggest close check after a blur.
    CloseAutosuggest,
}

impl TimerTask {
    /// How long after scheduling the task fires.
    #[must_use]
    pub const fn delay(self) -> Duration {
        match self {
            Self::CloseAutosuggest => super::autosuggest::CLOSE_DELAY,
        }
    }
}

/// Tasks waiting on the runtime's timer, oldest first.
///
/// Zellij's `Timer` event carries no identity. All tasks share one delay, so
/// timers fire in the order they were scheduled and each event belongs to
/// the oldest pending task.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: VecDeque<TimerTask>,
}

impl TimerQueue {
    /// Records `task` and returns the delay to pass to the runtime.
    pub fn schedule(&mut self, task: TimerTask) -> Duration {
        self.pending.push_back(task);
        task.delay()
    }

    /// Pairs a fired timer with its task. `None` if nothing is pending.
    pub fn fire(&mut self) -> Option<TimerTask> {
        self.pending.pop_front()
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Performs an HTTP `GET`; the response comes back as
    /// [`Event::VideosResponse`](super::Event::VideosResponse),
    /// [`Event::VideoResponse`](super::Event::VideoResponse) or
    /// [`Event::TracksResponse`](super::Event::TracksResponse) by request
    /// kind.
    WebRequest(ApiRequest),

    /// Starts a timer; it comes back as
    /// [`Event::TimerElapsed`](super::Event::TimerElapsed).
    ScheduleTimer(TimerTask),

    /// Opens the external player on a stream.
    PlayVideo {
        /// Title used for the player pane.
        title: String,
        /// Stream to play, with its subtitle tracks.
        source: MediaSource,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autosuggest_close_waits_100ms() {
        assert_eq!(TimerTask::CloseAutosuggest.delay(), Duration::from_millis(100));
    }

    #[test]
    fn timers_fire_in_scheduling_order() {
        let mut queue = TimerQueue::default();
        assert_eq!(queue.fire(), None);

        let delay = queue.schedule(TimerTask::CloseAutosuggest);
        queue.schedule(TimerTask::CloseAutosuggest);
        assert_eq!(delay, Duration::from_millis(100));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.fire(), Some(TimerTask::CloseAutosuggest));
        assert_eq!(queue.fire(), Some(TimerTask::CloseAutosuggest));
        assert!(queue.is_empty());
        assert_eq!(queue.fire(), None);
    }
}
