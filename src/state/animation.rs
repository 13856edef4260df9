/// Time-based animation helpers
///
/// Nothing here owns a timer: callers pass the current `Instant` (fed by
/// the app's frame subscription) and get back the value to draw.

use std::time::{Duration, Instant};

/// CSS-style cubic Bézier timing curve through (0,0), (x1,y1), (x2,y2), (1,1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Strong ease-out used by the slide transitions
    pub const EXPO_OUT: CubicBezier = CubicBezier::new(0.16, 1.0, 0.3, 1.0);
    pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);

    fn sample(a1: f32, a2: f32, t: f32) -> f32 {
        // B(t) for one axis with endpoints 0 and 1
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    }

    fn slope(a1: f32, a2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Map linear progress `x` in [0, 1] to eased progress
    pub fn apply(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }

        // Newton-Raphson on x(t) = x, falling back to bisection
        let mut t = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, t) - x;
            if err.abs() < 1e-5 {
                return Self::sample(self.y1, self.y2, t);
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..32 {
            let value = Self::sample(self.x1, self.x2, t);
            if (value - x).abs() < 1e-5 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, t)
    }
}

/// Linear progress of an animation that started at `start`, in [0, 1]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
}

/// Back-and-forth value in [0, 1] with the given half-period ("repeat: reverse")
pub fn ping_pong(start: Instant, now: Instant, half_period: Duration) -> f32 {
    if half_period.is_zero() {
        return 1.0;
    }
    let cycles = now.saturating_duration_since(start).as_secs_f32() / half_period.as_secs_f32();
    let phase = cycles % 2.0;
    if phase <= 1.0 {
        phase
    } else {
        2.0 - phase
    }
}

/// Visual style of the loading indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorStyle {
    /// Rotating logo with a pulsing "Loading..." label
    Spinner,
    /// Logo breathing in and out (detail page)
    Pulse,
}

/// One frame of the loading indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorFrame {
    pub scale: f32,
    pub opacity: f32,
    /// Logo rotation in radians
    pub rotation: f32,
    pub label_opacity: f32,
}

/// Loading indicator: scale 0.8 → 1 with a fade, then loops
#[derive(Debug, Clone, Copy)]
pub struct LoadingIndicator {
    started: Instant,
    style: IndicatorStyle,
}

impl LoadingIndicator {
    const ENTER: Duration = Duration::from_millis(500);
    const ROTATION_PERIOD: Duration = Duration::from_secs(2);

    pub fn new(style: IndicatorStyle, now: Instant) -> Self {
        Self {
            started: now,
            style,
        }
    }

    pub fn style(&self) -> IndicatorStyle {
        self.style
    }

    pub fn frame(&self, now: Instant) -> IndicatorFrame {
        match self.style {
            IndicatorStyle::Spinner => {
                let enter = CubicBezier::EASE_OUT.apply(progress(self.started, now, Self::ENTER));
                let turns = now.saturating_duration_since(self.started).as_secs_f32()
                    / Self::ROTATION_PERIOD.as_secs_f32();
                IndicatorFrame {
                    scale: 0.8 + 0.2 * enter,
                    opacity: enter,
                    rotation: turns.fract() * std::f32::consts::TAU,
                    label_opacity: ping_pong(self.started, now, Self::ENTER),
                }
            }
            IndicatorStyle::Pulse => {
                let t = CubicBezier::EASE_IN_OUT.apply(ping_pong(self.started, now, Self::ENTER));
                IndicatorFrame {
                    scale: 0.8 + 0.2 * t,
                    opacity: t,
                    rotation: 0.0,
                    label_opacity: 0.0,
                }
            }
        }
    }
}

/// Staggered fade-in of a block of lines (landing banner)
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    started: Instant,
    stagger: Duration,
    duration: Duration,
}

impl Reveal {
    pub fn new(now: Instant) -> Self {
        Self {
            started: now,
            stagger: Duration::from_millis(100),
            duration: Duration::from_millis(500),
        }
    }

    /// Opacity and upward offset (20 → 0) of line `index`
    pub fn line(&self, index: usize, now: Instant) -> (f32, f32) {
        let start = self.started + self.stagger * index as u32;
        let t = CubicBezier::EXPO_OUT.apply(progress(start, now, self.duration));
        (t, 20.0 * (1.0 - t))
    }

    /// Whether every one of `lines` lines has finished
    pub fn finished(&self, lines: usize, now: Instant) -> bool {
        let last = self.stagger * lines.saturating_sub(1) as u32 + self.duration;
        now.saturating_duration_since(self.started) >= last
    }
}
