//! Time-based interpolation of a single scalar or color property.

use crate::color::Color;
use std::time::Instant;

/// Easing function type: takes progress (0.0 to 1.0) and returns eased value (0.0 to 1.0)
pub type EasingFn = fn(f32) -> f32;

/// Scalars closer than this are treated as the same target.
pub const SCALAR_EPSILON: f32 = 0.001;

/// Linear interpolation (no easing)
pub fn linear(t: f32) -> f32 {
    t
}

/// Ease in (quadratic) - slow start, accelerating
pub fn ease_in(t: f32) -> f32 {
    t * t
}

/// Ease out (quadratic) - fast start, decelerating
pub fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

/// Ease in-out (quadratic) - slow start and end, fast middle
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Ease out (cubic), `1 - (1 - t)^3`. Check, radio and toggle progress use this.
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Linearly interpolate between two f32 values
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate two colors channel-wise in gamma space.
///
/// Toggle switches blend their palettes this way.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color {
        r: lerp_f32(a.r, b.r, t),
        g: lerp_f32(a.g, b.g, t),
        b: lerp_f32(a.b, b.b, t),
        a: lerp_f32(a.a, b.a, t),
    }
}

/// Interpolate two colors in linear light, then re-encode.
///
/// Alpha is interpolated directly.
pub fn lerp_color_linear(a: Color, b: Color, t: f32) -> Color {
    let la = a.to_linear();
    let lb = b.to_linear();
    Color::from_linear([
        lerp_f32(la[0], lb[0], t),
        lerp_f32(la[1], lb[1], t),
        lerp_f32(la[2], lb[2], t),
        lerp_f32(la[3], lb[3], t),
    ])
}

/// A value that [`TransitionState`] can animate.
pub trait Animatable: Copy {
    /// Whether `other` counts as a new target.
    fn differs(&self, other: &Self) -> bool;

    fn interpolate(from: Self, to: Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn differs(&self, other: &Self) -> bool {
        (self - other).abs() > SCALAR_EPSILON
    }

    fn interpolate(from: Self, to: Self, t: f32) -> Self {
        lerp_f32(from, to, t)
    }
}

impl Animatable for Color {
    fn differs(&self, other: &Self) -> bool {
        self != other
    }

    fn interpolate(from: Self, to: Self, t: f32) -> Self {
        lerp_color_linear(from, to, t)
    }
}

/// Transition configuration
///
/// Defines how long a transition takes and what easing function to use.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    /// Duration in seconds
    pub duration: f32,

    /// Easing function to apply
    pub easing: EasingFn,
}

impl Transition {
    /// Create a new transition with custom duration and easing
    pub fn new(duration: f32, easing: EasingFn) -> Self {
        Self { duration, easing }
    }

    /// Linear transition over `duration` seconds
    pub fn linear(duration: f32) -> Self {
        Self::new(duration, linear)
    }

    /// Instant transition (no animation, duration = 0)
    pub fn instant() -> Self {
        Self {
            duration: 0.0,
            easing: linear,
        }
    }

    /// Quick transition (150ms, ease-out)
    ///
    /// Good for hover states and quick feedback
    pub fn quick() -> Self {
        Self {
            duration: 0.15,
            easing: ease_out,
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::quick()
    }
}

/// Retargetable transition for one animated property of one widget.
///
/// The first [`update`](Self::update) snaps to its target. After that a new
/// target restarts the transition from whatever value is currently on screen.
#[derive(Debug, Clone)]
pub struct TransitionState<T> {
    current: T,
    from: T,
    to: T,
    last_target: T,
    start: Option<Instant>,
    active: bool,
    initialized: bool,
}

impl<T: Animatable + Default> Default for TransitionState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Animatable> TransitionState<T> {
    /// Uninitialized state; `placeholder` is never observed.
    pub fn new(placeholder: T) -> Self {
        Self {
            current: placeholder,
            from: placeholder,
            to: placeholder,
            last_target: placeholder,
            start: None,
            active: false,
            initialized: false,
        }
    }

    /// Advance towards `target`, returning the value to draw and whether the
    /// transition is still in flight.
    pub fn update(&mut self, target: T, transition: Transition, now: Instant) -> (T, bool) {
        if !self.initialized {
            self.initialized = true;
            self.current = target;
            self.from = target;
            self.to = target;
            self.last_target = target;
            return (target, false);
        }

        // Bring `current` up to `now` first so a retarget starts from what is on screen.
        self.advance(transition, now);

        if target.differs(&self.last_target) {
            self.from = self.current;
            self.to = target;
            self.last_target = target;
            self.start = Some(now);
            self.active = true;
            self.advance(transition, now);
        }

        (self.current, self.active)
    }

    fn advance(&mut self, transition: Transition, now: Instant) {
        if !self.active {
            return;
        }

        let t = match self.start {
            Some(start) if transition.duration > 0.0 => {
                let elapsed = now.saturating_duration_since(start).as_secs_f32();
                (elapsed / transition.duration).clamp(0.0, 1.0)
            }
            _ => 1.0,
        };

        if t >= 1.0 {
            self.current = self.to;
            self.active = false;
        } else {
            self.current = T::interpolate(self.from, self.to, (transition.easing)(t));
        }
    }

    pub fn current(&self) -> T {
        self.current
    }

    /// Start value of the running (or last) transition
    pub fn from(&self) -> T {
        self.from
    }

    pub fn to(&self) -> T {
        self.to
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
