//! Time-based interpolation sampled once per frame.
//!
//! Timestamps and durations are milliseconds. A tween never owns a clock: the
//! render loop passes `now` in, which keeps every sample deterministic.

use super::scale::Rgb;

/// Durations for the three reconciliation groups.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
	pub enter_ms: f64,
	pub update_ms: f64,
	pub exit_ms: f64,
}

impl Default for Timing {
	fn default() -> Self {
		Self {
			enter_ms: 1000.0,
			update_ms: 1000.0,
			exit_ms: 600.0,
		}
	}
}

/// Cubic ease-in-out, the default curve for chart transitions.
pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0) * 2.0;
	if t <= 1.0 {
		t * t * t / 2.0
	} else {
		let t = t - 2.0;
		(t * t * t + 2.0) / 2.0
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
	from: f64,
	to: f64,
	start: f64,
	duration: f64,
}

impl Tween {
	/// A tween already at rest on `value`.
	pub fn fixed(value: f64) -> Self {
		Self {
			from: value,
			to: value,
			start: 0.0,
			duration: 0.0,
		}
	}

	pub fn new(from: f64, to: f64, start: f64, duration: f64) -> Self {
		Self {
			from,
			to,
			start,
			duration,
		}
	}

	fn progress(&self, now: f64) -> f64 {
		if self.duration <= 0.0 {
			return 1.0;
		}
		ease_cubic_in_out((now - self.start) / self.duration)
	}

	pub fn sample(&self, now: f64) -> f64 {
		self.from + (self.to - self.from) * self.progress(now)
	}

	/// Interrupts the running animation and heads for `to` from wherever it is now.
	pub fn retarget(&mut self, now: f64, to: f64, duration: f64) {
		*self = Self::new(self.sample(now), to, now, duration);
	}

	#[cfg(test)]
	pub fn target(&self) -> f64 {
		self.to
	}

	pub fn is_done(&self, now: f64) -> bool {
		now >= self.start + self.duration
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorTween {
	from: Rgb,
	to: Rgb,
	start: f64,
	duration: f64,
}

impl ColorTween {
	pub fn fixed(color: Rgb) -> Self {
		Self {
			from: color,
			to: color,
			start: 0.0,
			duration: 0.0,
		}
	}

	pub fn sample(&self, now: f64) -> Rgb {
		if self.duration <= 0.0 {
			return self.to;
		}
		let t = ease_cubic_in_out((now - self.start) / self.duration);
		self.from.lerp(self.to, t)
	}

	pub fn retarget(&mut self, now: f64, to: Rgb, duration: f64) {
		*self = Self {
			from: self.sample(now),
			to,
			start: now,
			duration,
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn easing_endpoints_and_midpoint() {
		assert_eq!(ease_cubic_in_out(0.0), 0.0);
		assert_eq!(ease_cubic_in_out(0.5), 0.5);
		assert_eq!(ease_cubic_in_out(1.0), 1.0);
		assert_eq!(ease_cubic_in_out(-3.0), 0.0);
		assert_eq!(ease_cubic_in_out(7.0), 1.0);
	}

	#[test]
	fn tween_samples_between_endpoints() {
		let tween = Tween::new(0.0, 10.0, 100.0, 1000.0);
		assert_eq!(tween.sample(0.0), 0.0);
		assert_eq!(tween.sample(600.0), 5.0);
		assert_eq!(tween.sample(1100.0), 10.0);
		assert!(!tween.is_done(1099.0));
		assert!(tween.is_done(1100.0));
	}

	#[test]
	fn retarget_starts_from_current_value() {
		let mut tween = Tween::new(0.0, 10.0, 0.0, 1000.0);
		tween.retarget(500.0, 0.0, 600.0);
		assert_eq!(tween.sample(500.0), 5.0);
		assert_eq!(tween.sample(1100.0), 0.0);
		assert_eq!(tween.target(), 0.0);
	}

	#[test]
	fn colour_tween_lands_on_target() {
		let red = Rgb::new(255, 0, 0);
		let blue = Rgb::new(0, 0, 255);
		let mut tween = ColorTween::fixed(red);
		tween.retarget(0.0, blue, 1000.0);
		assert_eq!(tween.sample(0.0), red);
		assert_eq!(tween.sample(1000.0), blue);
	}
}
