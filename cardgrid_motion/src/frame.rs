// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable per-frame tasks.

/// A repeating per-frame task driven by the host's frame clock.
///
/// The task body runs only while the task is active; the flag is checked at
/// the top of every tick, so a [`FrameTask::cancel`] takes effect before the
/// next frame regardless of where it was issued.
///
/// ```
/// use cardgrid_motion::FrameTask;
///
/// let mut task = FrameTask::started();
/// let mut frames = 0;
/// assert!(task.run_frame(16.0, |_| frames += 1));
/// task.cancel();
/// assert!(!task.run_frame(32.0, |_| frames += 1));
/// assert_eq!(frames, 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameTask {
    active: bool,
    frames: u64,
}

impl FrameTask {
    /// Creates an inactive task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an active task.
    #[must_use]
    pub fn started() -> Self {
        Self {
            active: true,
            frames: 0,
        }
    }

    /// Activates the task. Starting an active task is a no-op.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Deactivates the task.
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Returns `true` while the task is scheduled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of frames the body has run since creation.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs `body` for this frame if the task is active.
    ///
    /// Returns whether the body ran.
    pub fn run_frame<F: FnOnce(f64)>(&mut self, timestamp_ms: f64, body: F) -> bool {
        if !self.active {
            return false;
        }
        self.frames += 1;
        body(timestamp_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::FrameTask;

    #[test]
    fn inactive_task_skips_body() {
        let mut task = FrameTask::new();
        let mut ran = false;
        assert!(!task.run_frame(0.0, |_| ran = true));
        assert!(!ran);
        assert_eq!(task.frames(), 0);
    }

    #[test]
    fn restart_resumes_ticking() {
        let mut task = FrameTask::started();
        let mut seen = 0.0;
        task.run_frame(16.0, |t| seen = t);
        task.cancel();
        task.start();
        task.start();
        task.run_frame(48.0, |t| seen = t);
        assert_eq!(seen, 48.0);
        assert_eq!(task.frames(), 2);
        assert!(task.is_active());
    }
}
