//! Time-driven animation primitive.
//!
//! [`Animation`] tracks normalized progress (`alpha`, 0.0 to 1.0) over a
//! `duration` in seconds and invokes user callbacks when a run starts and
//! when it completes. Every effect in the scene (textbox shake, kitten
//! look-direction, mouse walk/jump cycles, music fade) is built by owning a
//! few animations and wiring their callbacks together.
//!
//! # Lifecycle
//!
//! 1. [`Animation::new`] creates an idle animation with a duration of 1.
//! 2. [`Animation::start`] resets progress, marks it active and runs the start
//!    callbacks.
//! 3. [`Animation::update`] is called exactly once per frame with the frame
//!    delta and the running timeline time. When `alpha` goes past 1 the
//!    animation deactivates, clamps `alpha` to 1 and runs the end callbacks.
//! 4. [`Animation::reset`] returns to the idle state without running any
//!    callback.
//!
//! An animation may also be scheduled with [`Animation::set_trigger_at`]: the
//! first `update` whose `now` reaches the trigger time starts it, and the
//! progress of that same frame is applied right away.
//!
//! # Callbacks and re-entrancy
//!
//! Callbacks run synchronously inside `start`/`update` and are allowed to
//! call back into any animation, including the one dispatching them. Links
//! between animations go through [`WeakAnimation`] so that cross-wired pairs
//! (A ends → B starts, B ends → A starts) never keep each other alive.
//!
//! - A callback registered while its list is being dispatched runs from the
//!   next dispatch on.
//! - [`Animation::clear_callbacks`] called from a callback drops the list
//!   being dispatched once the dispatch finishes.
//! - While a list is dispatched it is detached, so a start callback that
//!   starts its own animation does not recurse.
//!
//! # Example
//!
//! ```
//! use lazykittens::components::animation::AnimationF;
//!
//! let left = AnimationF::new().with_duration(8.0);
//! let right = AnimationF::new().with_duration(8.0);
//! left.chain(&right);
//! right.chain(&left);
//!
//! left.start();
//! left.update(9.0, 9.0);
//! assert!(!left.is_active());
//! assert!(right.is_active());
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::rc::{Rc, Weak};

/// Numeric time type an [`Animation`] can be driven with.
pub trait Scalar:
    Copy
    + PartialOrd
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    /// Sentinel stored in `trigger_at` when no trigger is scheduled.
    const NO_TRIGGER: Self;
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const NO_TRIGGER: Self = -1.0;
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const NO_TRIGGER: Self = -1.0;
}

/// Zero-argument side-effecting hook run on start or completion.
pub type Callback = Box<dyn FnMut()>;

struct Inner<T> {
    alpha: Cell<T>,
    duration: Cell<T>,
    trigger_at: Cell<T>,
    triggered: Cell<bool>,
    active: Cell<bool>,
    on_start: RefCell<Vec<Callback>>,
    on_end: RefCell<Vec<Callback>>,
    // Bumped by clear_callbacks so an in-flight dispatch knows not to restore its list.
    epoch: Cell<u64>,
}

/// Progress timer with start/end hooks and an optional scheduled trigger.
///
/// All operations take `&self`; state lives behind `Cell`s so callbacks can
/// mutate the animation that is currently dispatching them. The owner keeps
/// the `Animation`; anything else should hold a [`WeakAnimation`] obtained
/// from [`Animation::downgrade`].
pub struct Animation<T: Scalar = f32> {
    inner: Rc<Inner<T>>,
}

pub type AnimationF = Animation<f32>;
pub type AnimationD = Animation<f64>;

impl<T: Scalar> Default for Animation<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> fmt::Debug for Animation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("alpha", &self.inner.alpha.get())
            .field("duration", &self.inner.duration.get())
            .field("trigger_at", &self.inner.trigger_at.get())
            .field("triggered", &self.inner.triggered.get())
            .field("active", &self.inner.active.get())
            .field("on_start", &self.inner.on_start.borrow().len())
            .field("on_end", &self.inner.on_end.borrow().len())
            .finish()
    }
}

impl<T: Scalar> Animation<T> {
    /// Create an idle animation with a duration of 1 second.
    pub fn new() -> Self {
        let animation = Self {
            inner: Rc::new(Inner {
                alpha: Cell::new(T::ZERO),
                duration: Cell::new(T::ONE),
                trigger_at: Cell::new(T::NO_TRIGGER),
                triggered: Cell::new(false),
                active: Cell::new(false),
                on_start: RefCell::new(Vec::new()),
                on_end: RefCell::new(Vec::new()),
                epoch: Cell::new(0),
            }),
        };
        animation.init();
        animation
    }

    pub fn with_duration(self, duration: T) -> Self {
        self.set_duration(duration);
        self
    }

    /// Restore the default duration of 1 and reset.
    pub fn init(&self) {
        self.inner.duration.set(T::ONE);
        self.reset();
    }

    /// Return to the idle state. Callbacks are kept and none of them runs.
    pub fn reset(&self) {
        let inner = &*self.inner;
        inner.alpha.set(T::ZERO);
        inner.active.set(false);
        inner.trigger_at.set(T::NO_TRIGGER);
        inner.triggered.set(false);
    }

    /// Reset and activate, then run the start callbacks in registration order.
    ///
    /// Starting an active animation discards its progress.
    pub fn start(&self) {
        self.reset();
        self.inner.active.set(true);
        self.dispatch(&self.inner.on_start);
    }

    /// Advance by one frame.
    ///
    /// `dt` is the frame delta and `now` the monotonic timeline time. A
    /// scheduled trigger fires before progress is applied, so the frame that
    /// starts the animation also advances it. Negative `dt` counts as zero.
    /// A non-positive `duration` completes the animation on its next update.
    pub fn update(&self, dt: T, now: T) {
        let inner = &*self.inner;

        let trigger_at = inner.trigger_at.get();
        if trigger_at >= T::ZERO && !inner.triggered.get() && now >= trigger_at {
            self.start();
            inner.triggered.set(true);
        }

        if !inner.active.get() {
            return;
        }

        let dt = if dt > T::ZERO { dt } else { T::ZERO };
        let duration = inner.duration.get();
        let alpha = if duration > T::ZERO {
            inner.alpha.get() + dt / duration
        } else {
            T::ONE + T::ONE
        };
        inner.alpha.set(alpha);

        if alpha > T::ONE {
            inner.active.set(false);
            inner.alpha.set(T::ONE);
            self.dispatch(&inner.on_end);
        }
    }

    /// Seconds elapsed in the current run (`alpha * duration`).
    pub fn elapsed_time(&self) -> T {
        self.inner.alpha.get() * self.inner.duration.get()
    }

    pub fn on_start(&self, f: impl FnMut() + 'static) {
        self.inner.on_start.borrow_mut().push(Box::new(f));
    }

    pub fn on_end(&self, f: impl FnMut() + 'static) {
        self.inner.on_end.borrow_mut().push(Box::new(f));
    }

    /// Remove every start and end callback.
    pub fn clear_callbacks(&self) {
        let inner = &*self.inner;
        inner.epoch.set(inner.epoch.get().wrapping_add(1));
        inner.on_start.borrow_mut().clear();
        inner.on_end.borrow_mut().clear();
    }

    /// Start `next` whenever this animation completes.
    pub fn chain(&self, next: &Animation<T>) {
        let next = next.downgrade();
        self.on_end(move || {
            next.start();
        });
    }

    pub fn downgrade(&self) -> WeakAnimation<T> {
        WeakAnimation {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn alpha(&self) -> T {
        self.inner.alpha.get()
    }

    pub fn duration(&self) -> T {
        self.inner.duration.get()
    }

    pub fn set_duration(&self, duration: T) {
        self.inner.duration.set(duration);
    }

    /// Timeline time of the scheduled start, or a negative value if none.
    pub fn trigger_at(&self) -> T {
        self.inner.trigger_at.get()
    }

    /// Schedule an automatic start once the timeline reaches `at`.
    pub fn set_trigger_at(&self, at: T) {
        self.inner.trigger_at.set(at);
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.get()
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    fn dispatch(&self, list: &RefCell<Vec<Callback>>) {
        let epoch = self.inner.epoch.get();
        let mut running = list.take();
        for f in running.iter_mut() {
            f();
        }
        if self.inner.epoch.get() != epoch {
            return;
        }
        let mut slot = list.borrow_mut();
        let added = std::mem::replace(&mut *slot, running);
        slot.extend(added);
    }
}

/// Non-owning link to an [`Animation`], used inside callbacks.
pub struct WeakAnimation<T: Scalar = f32> {
    inner: Weak<Inner<T>>,
}

impl<T: Scalar> Clone for WeakAnimation<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Scalar> fmt::Debug for WeakAnimation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakAnimation")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<T: Scalar> WeakAnimation<T> {
    pub fn upgrade(&self) -> Option<Animation<T>> {
        self.inner.upgrade().map(|inner| Animation { inner })
    }

    /// Start the animation if its owner is still alive.
    pub fn start(&self) -> bool {
        self.upgrade().map(|a| a.start()).is_some()
    }

    pub fn reset(&self) -> bool {
        self.upgrade().map(|a| a.reset()).is_some()
    }

    /// Current alpha, or `None` if the owner was dropped.
    pub fn alpha(&self) -> Option<T> {
        self.upgrade().map(|a| a.alpha())
    }

    pub fn is_active(&self) -> bool {
        self.upgrade().is_some_and(|a| a.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn counter() -> Rc<Cell<u32>> {
        Rc::new(Cell::new(0))
    }

    fn counting(anim: &AnimationD) -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let starts = counter();
        let ends = counter();
        let s = starts.clone();
        anim.on_start(move || s.set(s.get() + 1));
        let e = ends.clone();
        anim.on_end(move || e.set(e.get() + 1));
        (starts, ends)
    }

    #[test]
    fn test_new_is_idle_with_unit_duration() {
        let a = AnimationD::new();
        assert!(approx_eq(a.alpha(), 0.0));
        assert!(approx_eq(a.duration(), 1.0));
        assert!(a.trigger_at() < 0.0);
        assert!(!a.is_triggered());
        assert!(!a.is_active());
    }

    #[test]
    fn test_update_while_idle_is_noop() {
        let a = AnimationD::new();
        let (_, ends) = counting(&a);
        a.update(0.5, 0.5);
        assert!(approx_eq(a.alpha(), 0.0));
        assert!(!a.is_active());
        assert_eq!(ends.get(), 0);
    }

    #[test]
    fn test_fixed_step_scenario_completes_on_fourth_update() {
        let a = AnimationD::new();
        let (_, ends) = counting(&a);
        a.start();

        a.update(0.3, 0.3);
        assert!(approx_eq(a.alpha(), 0.3));
        a.update(0.3, 0.6);
        assert!(approx_eq(a.alpha(), 0.6));
        a.update(0.3, 0.9);
        assert!(approx_eq(a.alpha(), 0.9));
        assert!(a.is_active());
        assert_eq!(ends.get(), 0);

        a.update(0.3, 1.2);
        assert_eq!(a.alpha(), 1.0);
        assert!(!a.is_active());
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn test_alpha_is_monotonic_and_clamped() {
        let a = AnimationD::new().with_duration(2.0);
        a.start();
        let mut prev = a.alpha();
        let mut t = 0.0;
        while a.is_active() {
            t += 0.07;
            a.update(0.07, t);
            assert!(a.alpha() >= prev);
            assert!(a.alpha() <= 1.0);
            prev = a.alpha();
        }
        assert_eq!(a.alpha(), 1.0);
    }

    #[test]
    fn test_exactly_one_is_still_active() {
        let a = AnimationD::new().with_duration(1.0);
        a.start();
        a.update(0.5, 0.5);
        a.update(0.5, 1.0);
        assert_eq!(a.alpha(), 1.0);
        assert!(a.is_active());
        a.update(0.01, 1.01);
        assert!(!a.is_active());
    }

    #[test]
    fn test_start_discards_progress_and_fires_once() {
        let a = AnimationD::new();
        let (starts, _) = counting(&a);
        a.start();
        a.update(0.7, 0.7);
        assert!(approx_eq(a.alpha(), 0.7));
        starts.set(0);

        a.start();
        assert!(approx_eq(a.alpha(), 0.0));
        assert!(a.is_active());
        assert_eq!(starts.get(), 1);
    }

    #[test]
    fn test_reset_never_fires_callbacks() {
        let a = AnimationD::new();
        let (starts, ends) = counting(&a);
        a.start();
        a.update(0.5, 0.5);
        a.reset();
        assert_eq!(starts.get(), 1);
        assert_eq!(ends.get(), 0);
        assert!(!a.is_active());
        assert!(approx_eq(a.alpha(), 0.0));
    }

    #[test]
    fn test_end_fires_once_per_run() {
        let a = AnimationD::new().with_duration(0.5);
        let (_, ends) = counting(&a);
        a.start();
        for i in 0..20 {
            a.update(0.1, i as f64 * 0.1);
        }
        assert_eq!(ends.get(), 1);
        a.start();
        for i in 0..20 {
            a.update(0.1, 2.0 + i as f64 * 0.1);
        }
        assert_eq!(ends.get(), 2);
    }

    #[test]
    fn test_elapsed_time() {
        let a = AnimationD::new().with_duration(4.0);
        a.start();
        a.update(1.0, 1.0);
        assert!(approx_eq(a.elapsed_time(), 1.0));
        assert!(approx_eq(a.alpha(), 0.25));
    }

    #[test]
    fn test_trigger_fires_once_at_scheduled_time() {
        let a = AnimationD::new();
        let (starts, _) = counting(&a);
        a.set_trigger_at(2.0);

        for now in [0.5, 1.0, 1.5, 1.99] {
            a.update(0.1, now);
            assert!(!a.is_active());
            assert!(!a.is_triggered());
        }
        assert_eq!(starts.get(), 0);

        a.update(0.1, 2.0);
        assert!(a.is_active());
        assert!(a.is_triggered());
        assert_eq!(starts.get(), 1);

        a.update(0.1, 2.1);
        a.update(0.1, 2.2);
        assert_eq!(starts.get(), 1);
    }

    #[test]
    fn test_trigger_frame_also_applies_progress() {
        let a = AnimationD::new();
        a.set_trigger_at(0.5);
        a.update(0.1, 0.2);
        assert!(!a.is_active());
        assert!(approx_eq(a.alpha(), 0.0));

        a.update(0.1, 0.6);
        assert!(a.is_triggered());
        assert!(a.is_active());
        assert!(approx_eq(a.alpha(), 0.1));
    }

    #[test]
    fn test_reset_rearms_trigger() {
        let a = AnimationD::new().with_duration(0.2);
        let (starts, _) = counting(&a);
        a.set_trigger_at(1.0);
        a.update(0.1, 1.0);
        assert_eq!(starts.get(), 1);

        a.reset();
        assert!(!a.is_triggered());
        a.set_trigger_at(3.0);
        a.update(0.1, 2.0);
        assert_eq!(starts.get(), 1);
        a.update(0.1, 3.0);
        assert_eq!(starts.get(), 2);
    }

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let a = AnimationD::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            a.on_start(move || log.borrow_mut().push(i));
        }
        a.start();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_chained_pair_alternates() {
        let a = AnimationD::new().with_duration(1.0);
        let b = AnimationD::new().with_duration(0.5);
        a.chain(&b);
        b.chain(&a);

        let order = Rc::new(RefCell::new(Vec::new()));
        let o = order.clone();
        a.on_start(move || o.borrow_mut().push('A'));
        let o = order.clone();
        b.on_start(move || o.borrow_mut().push('B'));

        a.start();
        let dts = [0.13, 0.4, 0.07, 0.25, 0.31, 0.02, 0.5, 0.11];
        let mut t = 0.0;
        for i in 0..400 {
            let dt = dts[i % dts.len()];
            t += dt;
            a.update(dt, t);
            b.update(dt, t);
            assert!(!(a.is_active() && b.is_active()));
        }

        let order = order.borrow();
        assert!(order.len() > 20);
        for (i, c) in order.iter().enumerate() {
            assert_eq!(*c, if i % 2 == 0 { 'A' } else { 'B' });
        }
    }

    #[test]
    fn test_end_callback_can_restart_self() {
        let a = AnimationD::new().with_duration(0.5);
        let (starts, ends) = counting(&a);
        let weak = a.downgrade();
        a.on_end(move || {
            weak.start();
        });
        a.start();
        a.update(0.6, 0.6);
        assert!(a.is_active());
        assert!(approx_eq(a.alpha(), 0.0));
        assert_eq!(starts.get(), 2);
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn test_start_callback_starting_self_does_not_recurse() {
        let a = AnimationD::new();
        let starts = counter();
        let s = starts.clone();
        let weak = a.downgrade();
        a.on_start(move || {
            s.set(s.get() + 1);
            weak.start();
        });
        a.start();
        assert_eq!(starts.get(), 1);
        assert!(a.is_active());
    }

    #[test]
    fn test_callback_registered_during_dispatch_runs_next_time() {
        let a = AnimationD::new();
        let late = counter();
        let weak = a.downgrade();
        let l = late.clone();
        let mut registered = false;
        a.on_start(move || {
            if !registered {
                registered = true;
                let l = l.clone();
                if let Some(anim) = weak.upgrade() {
                    anim.on_start(move || l.set(l.get() + 1));
                }
            }
        });
        a.start();
        assert_eq!(late.get(), 0);
        a.start();
        assert_eq!(late.get(), 1);
    }

    #[test]
    fn test_clear_callbacks_during_dispatch() {
        let a = AnimationD::new();
        let hits = counter();
        let weak = a.downgrade();
        let h = hits.clone();
        a.on_end(move || {
            h.set(h.get() + 1);
            if let Some(anim) = weak.upgrade() {
                anim.clear_callbacks();
            }
        });
        a.start();
        a.update(2.0, 2.0);
        assert_eq!(hits.get(), 1);
        a.start();
        a.update(2.0, 4.0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_clear_callbacks() {
        let a = AnimationD::new();
        let (starts, ends) = counting(&a);
        a.clear_callbacks();
        a.start();
        a.update(2.0, 2.0);
        assert_eq!(starts.get(), 0);
        assert_eq!(ends.get(), 0);
    }

    #[test]
    fn test_zero_duration_completes_on_next_update() {
        let a = AnimationD::new().with_duration(0.0);
        let (_, ends) = counting(&a);
        a.start();
        a.update(0.0, 0.0);
        assert!(!a.is_active());
        assert_eq!(a.alpha(), 1.0);
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let a = AnimationD::new();
        a.start();
        a.update(0.4, 0.4);
        a.update(-0.3, 0.1);
        assert!(approx_eq(a.alpha(), 0.4));
    }

    #[test]
    fn test_weak_link_does_not_keep_target_alive() {
        let a = AnimationF::new();
        let weak = {
            let b = AnimationF::new();
            a.chain(&b);
            b.downgrade()
        };
        assert!(weak.upgrade().is_none());
        assert!(!weak.start());
        a.start();
        a.update(2.0, 2.0);
        assert!(!a.is_active());
    }

    #[test]
    fn test_init_restores_unit_duration() {
        let a = AnimationF::new().with_duration(8.0);
        a.start();
        a.update(1.0, 1.0);
        a.init();
        assert_eq!(a.duration(), 1.0);
        assert_eq!(a.alpha(), 0.0);
        assert!(!a.is_active());
    }
}
