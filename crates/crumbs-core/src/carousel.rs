//! # Featured Carousel State Machine
//!
//! Position and auto-play bookkeeping for the home page's featured products.
//! This module owns NO timers: every transition returns a [`Transition`]
//! telling the host which timer to arm or cancel. The storefront's live
//! session drives it with a tokio interval and a resume deadline.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   start(len <= 1)          start(len > 1)                               │
//! │        │                        │                                       │
//! │        ▼                        ▼                                       │
//! │   ┌─────────┐         ┌──────────────────┐   tick (every interval)      │
//! │   │  Idle   │         │   AutoPlaying    │◄────────┐ index + 1          │
//! │   │ no timer│         │ interval active  │─────────┘ phase unchanged    │
//! │   └─────────┘         └────────┬─────────┘                              │
//! │   navigation is a             │ ▲                                       │
//! │   no-op forever   next/prev/  │ │ resume (deadline fired)               │
//! │                   go_to       ▼ │                                       │
//! │                       ┌──────────────────┐                              │
//! │                       │   ManualPause    │──┐ next/prev/go_to           │
//! │                       │ resume deadline  │◄─┘ re-arms the deadline      │
//! │                       └──────────────────┘    (never stacks)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `index < len` whenever `len > 0`; there is no index when `len == 0`.
//! - Wraparound is modular in both directions.
//! - `tick` has an effect only in `AutoPlaying`; `resume` only in `ManualPause`.
//! - `go_to` with an index `>= len` is rejected and leaves state untouched.
//!
//! ## Example
//! ```rust
//! use crumbs_core::carousel::{Carousel, CarouselPhase};
//!
//! let mut carousel = Carousel::new(vec!["A", "B", "C"]);
//! assert_eq!(carousel.phase(), CarouselPhase::AutoPlaying);
//!
//! let t = carousel.next();
//! assert!(t.rearm_resume);
//! assert_eq!(carousel.current(), Some(&"B"));
//! assert_eq!(carousel.phase(), CarouselPhase::ManualPause);
//!
//! carousel.resume();
//! carousel.tick();
//! assert_eq!(carousel.current(), Some(&"C"));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::FEATURED_LIMIT;

/// Default period of the unattended advance.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(4000);

/// Default delay after manual navigation before auto-play resumes.
pub const DEFAULT_RESUME_DELAY: Duration = Duration::from_millis(5000);

// =============================================================================
// Phase and Timings
// =============================================================================

/// Where the carousel is in its auto-play cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselPhase {
    /// One item or none; no timer ever runs.
    Idle,
    /// The advance interval is active.
    AutoPlaying,
    /// Manual navigation happened; a one-shot resume is pending.
    ManualPause,
}

/// The two independent timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselTimings {
    pub autoplay_interval: Duration,
    pub resume_delay: Duration,
}

impl CarouselTimings {
    pub const fn new(autoplay_interval: Duration, resume_delay: Duration) -> Self {
        CarouselTimings {
            autoplay_interval,
            resume_delay,
        }
    }
}

impl Default for CarouselTimings {
    fn default() -> Self {
        CarouselTimings::new(DEFAULT_AUTOPLAY_INTERVAL, DEFAULT_RESUME_DELAY)
    }
}

// =============================================================================
// Snapshot and Transition
// =============================================================================

/// Read-only view of the carousel, safe to hand to renderers and sockets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    pub index: Option<usize>,
    pub phase: CarouselPhase,
    pub len: usize,
}

impl CarouselState {
    pub fn is_auto_playing(&self) -> bool {
        self.phase == CarouselPhase::AutoPlaying
    }
}

/// What a transition changed, and which timer work the host must do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    pub index_changed: bool,
    pub phase_changed: bool,
    /// Cancel any pending resume and arm a fresh one.
    pub rearm_resume: bool,
}

impl Transition {
    /// Nothing happened.
    pub const fn none() -> Self {
        Transition {
            index_changed: false,
            phase_changed: false,
            rearm_resume: false,
        }
    }

    /// Whether observers need a new snapshot.
    pub fn is_visible(&self) -> bool {
        self.index_changed || self.phase_changed
    }
}

// =============================================================================
// Carousel
// =============================================================================

/// A fixed sequence of slides with a current position and auto-play phase.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
    phase: CarouselPhase,
}

impl<T> Carousel<T> {
    /// Creates a carousel over `items` and starts it.
    pub fn new(items: Vec<T>) -> Self {
        let mut carousel = Carousel {
            items: Vec::new(),
            index: 0,
            phase: CarouselPhase::Idle,
        };
        carousel.start(items);
        carousel
    }

    /// Creates a carousel over the first [`FEATURED_LIMIT`] items.
    pub fn featured(mut items: Vec<T>) -> Self {
        items.truncate(FEATURED_LIMIT);
        Carousel::new(items)
    }

    /// Replaces the items and resets to slide 0.
    ///
    /// More than one item enters `AutoPlaying`; otherwise `Idle`.
    pub fn start(&mut self, items: Vec<T>) -> Transition {
        let before = self.state();
        self.items = items;
        self.index = 0;
        self.phase = if self.items.len() > 1 {
            CarouselPhase::AutoPlaying
        } else {
            CarouselPhase::Idle
        };
        let after = self.state();
        Transition {
            index_changed: before.index != after.index,
            phase_changed: before.phase != after.phase,
            rearm_resume: false,
        }
    }

    /// Manual advance with wraparound.
    pub fn next(&mut self) -> Transition {
        if !self.is_navigable() {
            return Transition::none();
        }
        let target = (self.index + 1) % self.items.len();
        self.navigate_to(target)
    }

    /// Manual step back with wraparound.
    pub fn previous(&mut self) -> Transition {
        if !self.is_navigable() {
            return Transition::none();
        }
        let len = self.items.len();
        let target = (self.index + len - 1) % len;
        self.navigate_to(target)
    }

    /// Manual jump to `index`.
    ///
    /// ## Errors
    /// `CoreError::SlideOutOfRange` when `index >= len` on a non-empty
    /// carousel. An empty carousel accepts any call as a no-op.
    pub fn go_to(&mut self, index: usize) -> CoreResult<Transition> {
        let len = self.items.len();
        if len == 0 {
            return Ok(Transition::none());
        }
        if index >= len {
            return Err(CoreError::SlideOutOfRange { index, len });
        }
        if !self.is_navigable() {
            return Ok(Transition::none());
        }
        Ok(self.navigate_to(index))
    }

    /// Unattended advance fired by the auto-play interval.
    ///
    /// Only acts in `AutoPlaying` and never touches the phase or the
    /// resume deadline.
    pub fn tick(&mut self) -> Transition {
        if self.phase != CarouselPhase::AutoPlaying {
            return Transition::none();
        }
        self.index = (self.index + 1) % self.items.len();
        Transition {
            index_changed: true,
            ..Transition::none()
        }
    }

    /// Fired by the resume deadline: `ManualPause` back to `AutoPlaying`.
    pub fn resume(&mut self) -> Transition {
        if self.phase != CarouselPhase::ManualPause {
            return Transition::none();
        }
        self.phase = CarouselPhase::AutoPlaying;
        Transition {
            phase_changed: true,
            ..Transition::none()
        }
    }

    fn is_navigable(&self) -> bool {
        self.items.len() > 1
    }

    fn navigate_to(&mut self, target: usize) -> Transition {
        let index_changed = target != self.index;
        let phase_changed = self.phase != CarouselPhase::ManualPause;
        self.index = target;
        self.phase = CarouselPhase::ManualPause;
        Transition {
            index_changed,
            phase_changed,
            rearm_resume: true,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current slide position; `None` when empty.
    pub fn index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.index)
    }

    /// Current slide; `None` when empty.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    pub fn is_auto_playing(&self) -> bool {
        self.phase == CarouselPhase::AutoPlaying
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            index: self.index(),
            phase: self.phase,
            len: self.items.len(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Carousel<char> {
        Carousel::new(vec!['A', 'B', 'C'])
    }

    #[test]
    fn test_start_resets_to_zero_autoplaying() {
        let carousel = abc();
        assert_eq!(carousel.index(), Some(0));
        assert_eq!(carousel.phase(), CarouselPhase::AutoPlaying);
        assert!(carousel.is_auto_playing());
    }

    #[test]
    fn test_restart_resets_state() {
        let mut carousel = abc();
        carousel.next();
        carousel.next();

        let t = carousel.start(vec!['X', 'Y']);
        assert!(t.index_changed);
        assert!(t.phase_changed);
        assert_eq!(carousel.state().index, Some(0));
        assert_eq!(carousel.phase(), CarouselPhase::AutoPlaying);
    }

    #[test]
    fn test_next_n_times_is_cyclic() {
        for n in 2..=6 {
            let mut carousel = Carousel::new((0..n).collect::<Vec<_>>());
            carousel.go_to(1).unwrap();
            for _ in 0..n {
                carousel.next();
            }
            assert_eq!(carousel.index(), Some(1), "n = {n}");
        }
    }

    #[test]
    fn test_previous_inverts_next() {
        let mut carousel = Carousel::new(vec![0, 1, 2, 3]);
        for i in 0..4 {
            carousel.go_to(i).unwrap();
            carousel.next();
            carousel.previous();
            assert_eq!(carousel.index(), Some(i));
        }
    }

    #[test]
    fn test_previous_wraps_from_zero() {
        let mut carousel = abc();
        carousel.previous();
        assert_eq!(carousel.current(), Some(&'C'));
    }

    #[test]
    fn test_go_to_sets_index_exactly() {
        let mut carousel = Carousel::new(vec![0, 1, 2, 3, 4, 5]);
        for k in [5, 0, 3, 3] {
            let t = carousel.go_to(k).unwrap();
            assert!(t.rearm_resume);
            assert_eq!(carousel.index(), Some(k));
        }
    }

    #[test]
    fn test_go_to_out_of_range_rejected() {
        let mut carousel = abc();
        carousel.next();
        let before = carousel.state();

        let err = carousel.go_to(3).unwrap_err();
        assert_eq!(err, CoreError::SlideOutOfRange { index: 3, len: 3 });
        assert_eq!(carousel.state(), before);
    }

    #[test]
    fn test_manual_navigation_pauses_and_rearms() {
        let mut carousel = abc();

        let first = carousel.next();
        assert_eq!(
            first,
            Transition {
                index_changed: true,
                phase_changed: true,
                rearm_resume: true
            }
        );
        assert_eq!(carousel.phase(), CarouselPhase::ManualPause);

        // Second manual call inside the cooldown only re-arms
        let second = carousel.next();
        assert!(second.rearm_resume);
        assert!(!second.phase_changed);
        assert_eq!(carousel.index(), Some(2));
    }

    #[test]
    fn test_tick_only_while_autoplaying() {
        let mut carousel = abc();
        assert!(carousel.tick().index_changed);
        assert_eq!(carousel.index(), Some(1));

        carousel.previous();
        assert_eq!(carousel.tick(), Transition::none());
        assert_eq!(carousel.index(), Some(0));
    }

    #[test]
    fn test_tick_keeps_phase_and_deadline() {
        let mut carousel = abc();
        let t = carousel.tick();
        assert!(!t.phase_changed);
        assert!(!t.rearm_resume);
        assert_eq!(carousel.phase(), CarouselPhase::AutoPlaying);
    }

    #[test]
    fn test_resume_only_from_manual_pause() {
        let mut carousel = abc();
        assert_eq!(carousel.resume(), Transition::none());

        carousel.go_to(2).unwrap();
        assert!(carousel.resume().phase_changed);
        assert_eq!(carousel.phase(), CarouselPhase::AutoPlaying);
    }

    #[test]
    fn test_scenario_next_next_resume_tick() {
        let mut carousel = abc();
        assert_eq!(carousel.index(), Some(0));

        carousel.next();
        assert_eq!(carousel.index(), Some(1));
        assert!(!carousel.is_auto_playing());

        carousel.next();
        assert_eq!(carousel.index(), Some(2));

        carousel.resume();
        assert!(carousel.is_auto_playing());
        carousel.tick();
        assert_eq!(carousel.index(), Some(0));
    }

    #[test]
    fn test_single_item_is_idle_forever() {
        let mut carousel = Carousel::new(vec!['A']);
        assert_eq!(carousel.phase(), CarouselPhase::Idle);

        assert_eq!(carousel.next(), Transition::none());
        assert_eq!(carousel.previous(), Transition::none());
        assert_eq!(carousel.go_to(0).unwrap(), Transition::none());
        assert_eq!(carousel.tick(), Transition::none());
        assert_eq!(carousel.resume(), Transition::none());
        assert!(carousel.go_to(1).is_err());

        assert_eq!(carousel.index(), Some(0));
        assert_eq!(carousel.phase(), CarouselPhase::Idle);
    }

    #[test]
    fn test_empty_exposes_no_current_item() {
        let mut carousel: Carousel<char> = Carousel::new(Vec::new());
        assert_eq!(carousel.phase(), CarouselPhase::Idle);
        assert_eq!(carousel.index(), None);
        assert_eq!(carousel.current(), None);

        assert_eq!(carousel.next(), Transition::none());
        assert_eq!(carousel.previous(), Transition::none());
        assert_eq!(carousel.go_to(4).unwrap(), Transition::none());
        assert_eq!(carousel.tick(), Transition::none());
        assert_eq!(carousel.index(), None);
    }

    #[test]
    fn test_featured_truncates() {
        let carousel = Carousel::featured((0..10).collect::<Vec<_>>());
        assert_eq!(carousel.len(), FEATURED_LIMIT);
    }

    #[test]
    fn test_state_serializes_phase_snake_case() {
        let json = serde_json::to_value(abc().state()).unwrap();
        assert_eq!(json["phase"], "auto_playing");
        assert_eq!(json["index"], 0);
        assert_eq!(json["len"], 3);
    }

    #[test]
    fn test_default_timings_are_independent() {
        let timings = CarouselTimings::default();
        assert_eq!(timings.autoplay_interval, Duration::from_secs(4));
        assert_eq!(timings.resume_delay, Duration::from_secs(5));
    }
}
