//! Cooperative, cancellable execution of grid algorithms: [`Stepper`],
//! [`Status`], [`Context`] and the pacing loop [`drive`].
//!
//! A run advances one unit of work per [`Stepper::step`] call. Between
//! steps the caller may render the grid or cancel the run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::GridError;
use crate::grid::Grid;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Where a run stands after a step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status<T> {
    /// More work remains.
    Running,
    /// The run completed and produced its output.
    Succeeded(T),
    /// The frontier ran dry without reaching the goal.
    Exhausted,
    /// The run was cancelled between steps.
    Cancelled,
}

impl<T> Status<T> {
    /// Whether no further step is allowed.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

// ---------------------------------------------------------------------------
// Stepper
// ---------------------------------------------------------------------------

/// An algorithm run that advances one unit of work at a time.
///
/// Implementations hold the exclusive borrow of the [`Grid`] they operate
/// on, so the layout cannot change while a run is in flight.
pub trait Stepper {
    /// Value carried by [`Status::Succeeded`].
    type Output: Clone;

    /// Perform one unit of work and report the resulting status.
    ///
    /// Returns [`GridError::InvalidState`] once the run is terminal.
    fn step(&mut self) -> Result<Status<Self::Output>, GridError>;

    /// Stop the run at the current step boundary. The grid keeps whatever
    /// visit markers it has reached. Has no effect on a finished run.
    fn cancel(&mut self);

    /// The status reported by the last step (`Running` before the first).
    fn status(&self) -> &Status<Self::Output>;

    /// Read-only view of the grid, for rendering between steps.
    fn grid(&self) -> &Grid;

    /// Step until the run is terminal, without pacing.
    fn run_to_end(&mut self) -> Result<Status<Self::Output>, GridError> {
        if self.status().is_terminal() {
            return Err(GridError::InvalidState("run already finished"));
        }
        loop {
            let status = self.step()?;
            if status.is_terminal() {
                return Ok(status);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag, so a run driven on one thread can be stopped
/// from another.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Speed
// ---------------------------------------------------------------------------

/// Animation pace presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Speed {
    #[default]
    Fast,
    Slow,
}

impl Speed {
    /// Wait between two steps.
    pub const fn delay(self) -> Duration {
        match self {
            Speed::Fast => Duration::from_millis(1),
            Speed::Slow => Duration::from_millis(50),
        }
    }
}

// ---------------------------------------------------------------------------
// drive
// ---------------------------------------------------------------------------

/// Step `stepper` until it finishes, sleeping `delay` between steps.
///
/// `observe` sees the stepper and the status after every step, including the
/// final one. If `ctx` is cancelled the stepper is cancelled at the next
/// step boundary and `Status::Cancelled` is returned. The delay only paces
/// the loop; it never changes the outcome.
pub fn drive<S, F>(
    stepper: &mut S,
    delay: Duration,
    ctx: &Context,
    mut observe: F,
) -> Result<Status<S::Output>, GridError>
where
    S: Stepper,
    F: FnMut(&S, &Status<S::Output>),
{
    loop {
        if ctx.is_done() {
            stepper.cancel();
            log::debug!("run cancelled by context");
            return Ok(Status::Cancelled);
        }
        let status = stepper.step()?;
        observe(stepper, &status);
        if status.is_terminal() {
            return Ok(status);
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    /// Counts down to zero, one unit per step.
    struct Countdown {
        grid: Grid,
        left: u32,
        status: Status<u32>,
    }

    impl Countdown {
        fn new(left: u32) -> Self {
            Self {
                grid: Grid::new(2, 2, Point::new(0, 0), Point::new(1, 1)).unwrap(),
                left,
                status: Status::Running,
            }
        }
    }

    impl Stepper for Countdown {
        type Output = u32;

        fn step(&mut self) -> Result<Status<u32>, GridError> {
            if self.status.is_terminal() {
                return Err(GridError::InvalidState("finished"));
            }
            self.left -= 1;
            if self.left == 0 {
                self.status = Status::Succeeded(7);
            }
            Ok(self.status.clone())
        }

        fn cancel(&mut self) {
            if !self.status.is_terminal() {
                self.status = Status::Cancelled;
            }
        }

        fn status(&self) -> &Status<u32> {
            &self.status
        }

        fn grid(&self) -> &Grid {
            &self.grid
        }
    }

    #[test]
    fn context_shares_flag() {
        let a = Context::new();
        let b = a.clone();
        assert!(!a.is_done());
        b.cancel();
        assert!(a.is_done());
    }

    #[test]
    fn speed_presets() {
        assert_eq!(Speed::Fast.delay(), Duration::from_millis(1));
        assert_eq!(Speed::Slow.delay(), Duration::from_millis(50));
    }

    #[test]
    fn drive_observes_every_step() {
        let mut c = Countdown::new(3);
        let mut seen = Vec::new();
        let out = drive(&mut c, Duration::ZERO, &Context::new(), |_, s| {
            seen.push(s.clone())
        })
        .unwrap();
        assert_eq!(out, Status::Succeeded(7));
        assert_eq!(
            seen,
            vec![Status::Running, Status::Running, Status::Succeeded(7)]
        );
    }

    #[test]
    fn drive_outcome_ignores_delay() {
        let fast = drive(&mut Countdown::new(4), Duration::ZERO, &Context::new(), |_, _| {});
        let slow = drive(
            &mut Countdown::new(4),
            Duration::from_millis(2),
            &Context::new(),
            |_, _| {},
        );
        assert_eq!(fast, slow);
    }

    #[test]
    fn drive_stops_on_cancelled_context() {
        let mut c = Countdown::new(10);
        let ctx = Context::new();
        let mut steps = 0;
        let out = drive(&mut c, Duration::ZERO, &ctx, |_, _| {
            steps += 1;
            if steps == 2 {
                ctx.cancel();
            }
        })
        .unwrap();
        assert_eq!(out, Status::Cancelled);
        assert_eq!(steps, 2);
        assert_eq!(c.status(), &Status::Cancelled);
        assert_eq!(c.step(), Err(GridError::InvalidState("finished")));
    }

    #[test]
    fn run_to_end_refuses_finished_runs() {
        let mut c = Countdown::new(2);
        assert_eq!(c.run_to_end(), Ok(Status::Succeeded(7)));
        assert!(matches!(c.run_to_end(), Err(GridError::InvalidState(_))));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn speed_round_trip() {
        let json = serde_json::to_string(&Speed::Slow).unwrap();
        assert_eq!(json, "\"slow\"");
        let back: Speed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Speed::Slow);
    }
}
