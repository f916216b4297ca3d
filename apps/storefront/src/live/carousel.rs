//! # Carousel Controller
//!
//! Hosts a [`Carousel`] state machine on a tokio task that owns its two
//! timers.
//!
//! ## Timers by Phase
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   phase         autoplay interval        resume sleep                   │
//! │   ───────────   ──────────────────────   ─────────────────────────      │
//! │   Idle          none                     none                           │
//! │   AutoPlaying   armed, ticks every 4s    none                           │
//! │   ManualPause   none                     armed, fires once after 5s     │
//! │                                                                         │
//! │                    next / previous / go_to                              │
//! │   ┌─────────────┐ ───────────────────────► ┌─────────────┐              │
//! │   │ AutoPlaying │                          │ ManualPause │──┐ nav again: │
//! │   └─────────────┘ ◄─────────────────────── └─────────────┘◄─┘ re-arm     │
//! │     │   ▲            resume sleep fires       (no stacking)             │
//! │     └───┘ tick                                                          │
//! │                                                                         │
//! │   dispose() / drop: both timers dropped, task ends                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entering `AutoPlaying` creates a fresh interval whose first tick lands
//! one full interval later. Leaving it drops the interval, so a pending tick
//! can never fire in another phase. The same holds for the resume sleep.
//!
//! State is published on a `watch` channel after every visible transition.

use std::future::pending;
use std::pin::Pin;

use crumbs_core::carousel::{Carousel, CarouselPhase, CarouselState, CarouselTimings, Transition};
use crumbs_core::CoreError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, Interval, MissedTickBehavior, Sleep};
use tracing::{debug, trace};

/// Command queue depth per controller.
const COMMAND_BUFFER: usize = 16;

// =============================================================================
// Errors
// =============================================================================

/// Carousel controller errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarouselError {
    #[error("Carousel controller has been disposed")]
    Disposed,

    #[error(transparent)]
    Rejected(#[from] CoreError),
}

pub type CarouselResult<T> = Result<T, CarouselError>;

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug)]
enum Command {
    Next(oneshot::Sender<CarouselState>),
    Previous(oneshot::Sender<CarouselState>),
    GoTo(usize, oneshot::Sender<CarouselResult<CarouselState>>),
    Dispose(oneshot::Sender<()>),
}

// =============================================================================
// Controller Handle
// =============================================================================

/// Handle to a running carousel.
///
/// Dropping the handle aborts the task; [`dispose`](Self::dispose) stops it
/// and waits until both timers are gone.
#[derive(Debug)]
pub struct CarouselController {
    cmd_tx: mpsc::Sender<Command>,
    state_rx: watch::Receiver<CarouselState>,
    task: Option<JoinHandle<()>>,
}

impl CarouselController {
    /// Starts a carousel over `items` and spawns its timer task.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start<T: Send + 'static>(items: Vec<T>, timings: CarouselTimings) -> Self {
        let carousel = Carousel::new(items);
        let initial = carousel.state();
        let (state_tx, state_rx) = watch::channel(initial);
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);

        let mut actor = CarouselActor {
            carousel,
            timings,
            autoplay: None,
            resume: None,
            state_tx,
        };
        actor.sync_timers(true);

        debug!(len = initial.len, phase = ?initial.phase, "Carousel started");
        let task = tokio::spawn(actor.run(cmd_rx));

        CarouselController {
            cmd_tx,
            state_rx,
            task: Some(task),
        }
    }

    /// Latest published state.
    pub fn state(&self) -> CarouselState {
        *self.state_rx.borrow()
    }

    /// Receiver that wakes on every index or phase change.
    pub fn subscribe(&self) -> watch::Receiver<CarouselState> {
        self.state_rx.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.cmd_tx.is_closed()
    }

    /// Manual advance; pauses auto-play for the resume delay.
    pub async fn next(&self) -> CarouselResult<CarouselState> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Next(tx)).await?;
        rx.await.map_err(|_| CarouselError::Disposed)
    }

    /// Manual step back; pauses auto-play for the resume delay.
    pub async fn previous(&self) -> CarouselResult<CarouselState> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Previous(tx)).await?;
        rx.await.map_err(|_| CarouselError::Disposed)
    }

    /// Jumps to `index`; out-of-range is rejected and changes nothing.
    pub async fn go_to(&self, index: usize) -> CarouselResult<CarouselState> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::GoTo(index, tx)).await?;
        rx.await.map_err(|_| CarouselError::Disposed)?
    }

    /// Cancels both timers and stops the task. Idempotent.
    pub async fn dispose(&mut self) {
        let (tx, rx) = oneshot::channel();
        if self.cmd_tx.send(Command::Dispose(tx)).await.is_ok() {
            let _ = rx.await;
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        debug!("Carousel disposed");
    }

    async fn send(&self, cmd: Command) -> CarouselResult<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| CarouselError::Disposed)
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// =============================================================================
// Actor
// =============================================================================

struct CarouselActor<T> {
    carousel: Carousel<T>,
    timings: CarouselTimings,
    /// Present only while `AutoPlaying`.
    autoplay: Option<Interval>,
    /// Present only while `ManualPause`.
    resume: Option<Pin<Box<Sleep>>>,
    state_tx: watch::Sender<CarouselState>,
}

impl<T: Send + 'static> CarouselActor<T> {
    async fn run(mut self, mut cmd_rx: mpsc::Receiver<Command>) {
        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(cmd) => {
                        if !self.handle(cmd) {
                            break;
                        }
                    }
                    // Every handle is gone.
                    None => break,
                },
                _ = next_tick(&mut self.autoplay) => {
                    let transition = self.carousel.tick();
                    trace!(index = ?self.carousel.index(), "Carousel tick");
                    self.apply(transition);
                }
                _ = resume_due(&mut self.resume) => {
                    self.resume = None;
                    let transition = self.carousel.resume();
                    debug!("Carousel auto-play resumed");
                    self.apply(transition);
                }
            }
        }
    }

    /// Returns `false` once the actor should stop.
    fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Next(reply) => {
                let transition = self.carousel.next();
                self.apply(transition);
                let _ = reply.send(self.carousel.state());
            }
            Command::Previous(reply) => {
                let transition = self.carousel.previous();
                self.apply(transition);
                let _ = reply.send(self.carousel.state());
            }
            Command::GoTo(index, reply) => {
                let result = self.carousel.go_to(index).map(|transition| {
                    self.apply(transition);
                    self.carousel.state()
                });
                let _ = reply.send(result.map_err(CarouselError::from));
            }
            Command::Dispose(ack) => {
                self.autoplay = None;
                self.resume = None;
                let _ = ack.send(());
                return false;
            }
        }
        true
    }

    /// Re-arms timers for the new phase and publishes visible changes.
    fn apply(&mut self, transition: Transition) {
        self.sync_timers(transition.phase_changed || transition.rearm_resume);
        if transition.is_visible() {
            self.state_tx.send_replace(self.carousel.state());
        }
    }

    /// Makes the timer set match the current phase. With `rearm`, the timer
    /// for the current phase is replaced even if one already exists.
    fn sync_timers(&mut self, rearm: bool) {
        match self.carousel.phase() {
            CarouselPhase::Idle => {
                self.autoplay = None;
                self.resume = None;
            }
            CarouselPhase::AutoPlaying => {
                self.resume = None;
                if rearm || self.autoplay.is_none() {
                    let period = self.timings.autoplay_interval;
                    let mut ticker = interval_at(Instant::now() + period, period);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    self.autoplay = Some(ticker);
                }
            }
            CarouselPhase::ManualPause => {
                self.autoplay = None;
                if rearm || self.resume.is_none() {
                    self.resume = Some(Box::pin(sleep(self.timings.resume_delay)));
                }
            }
        }
    }
}

async fn next_tick(autoplay: &mut Option<Interval>) {
    match autoplay {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending().await,
    }
}

async fn resume_due(resume: &mut Option<Pin<Box<Sleep>>>) {
    match resume {
        Some(deadline) => deadline.as_mut().await,
        None => pending().await,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn timings() -> CarouselTimings {
        CarouselTimings::new(Duration::from_secs(4), Duration::from_secs(5))
    }

    fn abc() -> CarouselController {
        CarouselController::start(vec!['A', 'B', 'C'], timings())
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_ticks_every_interval() {
        let controller = abc();
        assert_eq!(controller.state().index, Some(0));
        assert!(controller.state().is_auto_playing());

        advance(3_999).await;
        assert_eq!(controller.state().index, Some(0));

        advance(2).await;
        assert_eq!(controller.state().index, Some(1));

        advance(4_000).await;
        assert_eq!(controller.state().index, Some(2));

        advance(4_000).await;
        assert_eq!(controller.state().index, Some(0));
        assert_eq!(controller.state().phase, CarouselPhase::AutoPlaying);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_nav_pauses_for_exactly_the_cooldown() {
        let controller = abc();

        let state = controller.next().await.unwrap();
        assert_eq!(state.index, Some(1));
        assert_eq!(state.phase, CarouselPhase::ManualPause);

        // No tick while paused, even past the old interval boundary.
        advance(4_999).await;
        assert_eq!(controller.state().index, Some(1));
        assert_eq!(controller.state().phase, CarouselPhase::ManualPause);

        advance(2).await;
        assert_eq!(controller.state().phase, CarouselPhase::AutoPlaying);
        assert_eq!(controller.state().index, Some(1));

        // First tick lands a full interval after resuming.
        advance(3_990).await;
        assert_eq!(controller.state().index, Some(1));
        advance(20).await;
        assert_eq!(controller.state().index, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_nav_restarts_cooldown() {
        let controller = abc();

        controller.next().await.unwrap();
        advance(3_000).await;
        let state = controller.next().await.unwrap();
        assert_eq!(state.index, Some(2));

        // The first cooldown would have ended at 5s.
        advance(2_500).await;
        assert_eq!(controller.state().phase, CarouselPhase::ManualPause);

        advance(2_501).await;
        assert_eq!(controller.state().phase, CarouselPhase::AutoPlaying);

        advance(4_000).await;
        assert_eq!(controller.state().index, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scenario_abc() {
        let controller = abc();
        assert_eq!(controller.state().index, Some(0));

        assert_eq!(controller.next().await.unwrap().index, Some(1));
        assert_eq!(controller.next().await.unwrap().index, Some(2));

        advance(5_001).await;
        assert!(controller.state().is_auto_playing());

        advance(4_000).await;
        assert_eq!(controller.state().index, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_previous_and_go_to() {
        let controller = abc();

        assert_eq!(controller.previous().await.unwrap().index, Some(2));
        assert_eq!(controller.go_to(1).await.unwrap().index, Some(1));

        let err = controller.go_to(3).await.unwrap_err();
        assert_eq!(
            err,
            CarouselError::Rejected(CoreError::SlideOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(controller.state().index, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_item_never_moves() {
        let controller = CarouselController::start(vec!["only"], timings());
        assert_eq!(controller.state().phase, CarouselPhase::Idle);

        let state = controller.next().await.unwrap();
        assert_eq!(state.index, Some(0));
        assert_eq!(state.phase, CarouselPhase::Idle);

        advance(60_000).await;
        assert_eq!(controller.state().index, Some(0));
        assert_eq!(controller.state().phase, CarouselPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_carousel() {
        let controller = CarouselController::start(Vec::<u8>::new(), timings());
        assert_eq!(controller.state().index, None);
        assert_eq!(controller.state().len, 0);
        assert_eq!(controller.previous().await.unwrap().index, None);
        assert_eq!(controller.go_to(0).await.unwrap().index, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_each_change() {
        let controller = abc();
        let mut updates = controller.subscribe();

        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().index, Some(1));

        controller.go_to(0).await.unwrap();
        updates.changed().await.unwrap();
        let state = *updates.borrow_and_update();
        assert_eq!(state.index, Some(0));
        assert_eq!(state.phase, CarouselPhase::ManualPause);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_stops_everything() {
        let mut controller = abc();
        controller.dispose().await;
        assert!(controller.is_disposed());

        assert_eq!(controller.next().await, Err(CarouselError::Disposed));
        assert_eq!(controller.go_to(1).await, Err(CarouselError::Disposed));

        advance(20_000).await;
        assert_eq!(controller.state().index, Some(0));

        // Second dispose is a no-op.
        controller.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let controller = abc();
        let mut updates = controller.subscribe();
        drop(controller);

        let closed = tokio::time::timeout(Duration::from_secs(1), async {
            while updates.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
