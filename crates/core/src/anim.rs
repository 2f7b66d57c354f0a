//! Interruptible tween utility driving slot offsets.
//!
//! The core never reads a wall clock — every query takes `now` in seconds,
//! supplied by the frontend. A tween can be retargeted mid-flight: the new
//! tween starts from the value the old one had reached.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic ease-out: fast start, gentle landing.
    EaseOut,
    /// Ease-out with a slight overshoot, for the rubber-band snap back.
    SpringOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::SpringOut => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: f64, duration: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    pub fn value_at(&self, now: f64) -> f64 {
        if self.duration <= 0.0 || now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = (now - self.start) / self.duration;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.duration <= 0.0 || now >= self.start + self.duration
    }
}

/// A scalar that is either at rest or mid-tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animated {
    Still(f64),
    Moving(Tween),
}

impl Animated {
    pub fn still(value: f64) -> Self {
        Animated::Still(value)
    }

    pub fn get(&self, now: f64) -> f64 {
        match self {
            Animated::Still(v) => *v,
            Animated::Moving(tween) => tween.value_at(now),
        }
    }

    /// The value this will have once any in-flight tween finishes.
    pub fn target(&self) -> f64 {
        match self {
            Animated::Still(v) => *v,
            Animated::Moving(tween) => tween.to,
        }
    }

    /// Start (or retarget) a tween from the current value toward `to`.
    pub fn animate_to(&mut self, to: f64, now: f64, duration: f64, easing: Easing) {
        let from = self.get(now);
        *self = Animated::Moving(Tween::new(from, to, now, duration, easing));
    }

    pub fn snap_to(&mut self, value: f64) {
        *self = Animated::Still(value);
    }

    /// Collapse a finished tween back to a resting value.
    pub fn settle(&mut self, now: f64) {
        if let Animated::Moving(tween) = self {
            if tween.is_finished(now) {
                *self = Animated::Still(tween.to);
            }
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        match self {
            Animated::Still(_) => false,
            Animated::Moving(tween) => !tween.is_finished(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_both_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::SpringOut] {
            assert!((easing.apply(0.0)).abs() < 1e-9);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn spring_overshoots_near_the_end() {
        assert!(Easing::SpringOut.apply(0.85) > 1.0);
    }

    #[test]
    fn tween_interpolates_and_finishes() {
        let tween = Tween::new(0.0, 100.0, 1.0, 2.0, Easing::Linear);
        assert_eq!(tween.value_at(0.5), 0.0);
        assert_eq!(tween.value_at(2.0), 50.0);
        assert_eq!(tween.value_at(5.0), 100.0);
        assert!(tween.is_finished(3.0));
        assert!(!tween.is_finished(2.9));
    }

    #[test]
    fn retarget_starts_from_the_interrupted_value() {
        let mut offset = Animated::still(0.0);
        offset.animate_to(100.0, 0.0, 2.0, Easing::Linear);
        // Interrupt halfway: the new tween must begin at 50, not 0 or 100.
        offset.animate_to(0.0, 1.0, 1.0, Easing::Linear);
        assert_eq!(offset.get(1.0), 50.0);
        assert_eq!(offset.get(1.5), 25.0);
        assert_eq!(offset.get(2.0), 0.0);
    }

    #[test]
    fn settle_collapses_finished_tweens() {
        let mut offset = Animated::still(0.0);
        offset.animate_to(10.0, 0.0, 1.0, Easing::EaseOut);
        assert!(offset.is_animating(0.5));
        offset.settle(2.0);
        assert_eq!(offset, Animated::Still(10.0));
    }
}
