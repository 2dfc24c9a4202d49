//! Auto-play: steps a session on a fixed interval until it finishes or is
//! paused.
//!
//! Only one tick is ever in flight. Pausing just stops the next tick from
//! being scheduled, so there is never a half-finished step to abort.
use crate::session::{Status, Stepper};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Shared pause switch. Clones control the same player.
#[derive(Clone, Debug, Default)]
pub struct PauseHandle {
    paused: Arc<AtomicBool>,
    playing: Arc<AtomicBool>,
}

impl PauseHandle {
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// True while [`AutoPlay::run`] is looping.
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Handles an interrupt: pauses a running player and returns `true`,
    /// or returns `false` without touching the pause flag when idle.
    pub fn interrupt(&self) -> bool {
        if self.is_playing() {
            self.pause();
            true
        } else {
            false
        }
    }
}

/// Why [`AutoPlay::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The session reached a terminal status.
    Finished(Status),
    /// The pause handle was set before the session finished.
    Paused,
    /// The session has taken the allowed number of steps.
    StepLimit,
}

/// A repeating step task.
#[derive(Clone, Debug)]
pub struct AutoPlay {
    interval: Duration,
    max_steps: Option<u32>,
    handle: PauseHandle,
}

impl AutoPlay {
    pub fn new(interval: Duration) -> Self {
        AutoPlay {
            interval,
            max_steps: None,
            handle: PauseHandle::default(),
        }
    }

    /// Stops playing once the session's step count reaches `max_steps`.
    /// The count includes steps taken before `run` was called.
    pub fn with_max_steps(mut self, max_steps: Option<u32>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Handle that pauses this player, usable from another thread.
    pub fn pause_handle(&self) -> PauseHandle {
        self.handle.clone()
    }

    /// Steps `session` until it is terminal or the player is paused,
    /// calling `on_tick` after every step and sleeping `interval` between
    /// steps.
    ///
    /// The pause flag is checked before each tick, so a pause requested
    /// from `on_tick` takes effect before the following step.
    pub fn run<S: Stepper>(&self, session: &mut S, on_tick: impl FnMut(&S)) -> PlayOutcome {
        log::debug!("auto-play started, interval {:?}", self.interval);
        self.handle.playing.store(true, Ordering::SeqCst);
        let outcome = self.play(session, on_tick);
        self.handle.playing.store(false, Ordering::SeqCst);
        outcome
    }

    fn play<S: Stepper>(&self, session: &mut S, mut on_tick: impl FnMut(&S)) -> PlayOutcome {
        loop {
            if session.is_terminal() {
                return PlayOutcome::Finished(session.status());
            }
            if self.handle.is_paused() {
                log::debug!("auto-play paused after step {}", session.steps());
                return PlayOutcome::Paused;
            }
            if self.max_steps.map_or(false, |max| session.steps() >= max) {
                log::debug!("auto-play stopped at step limit {}", session.steps());
                return PlayOutcome::StepLimit;
            }
            let status = session.step();
            on_tick(session);
            if status.is_terminal() {
                return PlayOutcome::Finished(status);
            }
            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfs::DfsSession;
    use crate::graph::sample_graph;

    #[test]
    fn test_runs_to_completion() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        let player = AutoPlay::new(Duration::ZERO);
        let mut ticks = 0;
        let outcome = player.run(&mut session, |_| ticks += 1);
        assert_eq!(outcome, PlayOutcome::Finished(Status::Found));
        assert_eq!(ticks, 5);
    }

    #[test]
    fn test_paused_before_start_takes_no_step() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        let player = AutoPlay::new(Duration::ZERO);
        player.pause_handle().pause();
        assert_eq!(player.run(&mut session, |_| {}), PlayOutcome::Paused);
        assert_eq!(session.steps(), 0);
    }

    #[test]
    fn test_pause_from_tick_then_resume() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        let player = AutoPlay::new(Duration::from_millis(1));
        let handle = player.pause_handle();
        let outcome = player.run(&mut session, |s| {
            if s.steps() == 2 {
                handle.pause();
            }
        });
        assert_eq!(outcome, PlayOutcome::Paused);
        assert_eq!(session.steps(), 2);

        handle.resume();
        assert_eq!(
            player.run(&mut session, |_| {}),
            PlayOutcome::Finished(Status::Found)
        );
        assert_eq!(session.steps(), 5);
    }

    #[test]
    fn test_step_limit_is_checked_before_stepping() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        let none = AutoPlay::new(Duration::ZERO).with_max_steps(Some(0));
        assert_eq!(none.run(&mut session, |_| {}), PlayOutcome::StepLimit);
        assert_eq!(session.steps(), 0);

        let two = AutoPlay::new(Duration::ZERO).with_max_steps(Some(2));
        let mut ticks = 0;
        assert_eq!(two.run(&mut session, |_| ticks += 1), PlayOutcome::StepLimit);
        assert_eq!((session.steps(), ticks), (2, 2));

        let generous = AutoPlay::new(Duration::ZERO).with_max_steps(Some(50));
        assert_eq!(
            generous.run(&mut session, |_| {}),
            PlayOutcome::Finished(Status::Found)
        );
    }

    #[test]
    fn test_interrupt_pauses_only_while_playing() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        let player = AutoPlay::new(Duration::ZERO);
        let handle = player.pause_handle();

        assert!(!handle.interrupt());
        assert!(!handle.is_paused());

        let outcome = player.run(&mut session, |_| {
            assert!(handle.is_playing());
            assert!(handle.interrupt());
        });
        assert_eq!(outcome, PlayOutcome::Paused);
        assert_eq!(session.steps(), 1);
        assert!(!handle.is_playing());
        assert!(!handle.interrupt());
    }

    #[test]
    fn test_terminal_session_is_not_stepped() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        session.run_to_end(None);
        let mut ticks = 0;
        let outcome = AutoPlay::new(Duration::ZERO).run(&mut session, |_| ticks += 1);
        assert_eq!(outcome, PlayOutcome::Finished(Status::Found));
        assert_eq!(ticks, 0);
    }
}
