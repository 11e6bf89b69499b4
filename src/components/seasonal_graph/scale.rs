//! Visual encodings: marker size, edge thickness and colour.

/// Radius every marker gets before connectivity is added.
pub const BASE_RADIUS: f64 = 6.0;
/// Connectivity floor, so unlinked entities stay visible.
pub const MIN_WEIGHT: f64 = 2.0;
/// Edge thickness multiplier applied after the square root.
pub const WIDTH_FACTOR: f64 = 1.5;
/// Fill used when a colour string cannot be parsed.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0xaa, 0xaa, 0xaa);

/// Marker radius for an entity's connectivity (`None` when it has no edges).
pub fn marker_radius(weight: Option<f64>) -> f64 {
	BASE_RADIUS + weight.unwrap_or(0.0).max(MIN_WEIGHT)
}

/// Stroke width for an edge; square root so heavy links don't swamp the view.
pub fn edge_width(weight: f64) -> f64 {
	weight.max(0.0).sqrt() * WIDTH_FACTOR
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Parses `#rgb` or `#rrggbb`.
	pub fn parse(hex: &str) -> Option<Self> {
		let hex = hex.strip_prefix('#')?;
		let channel = |s: &str| u8::from_str_radix(s, 16).ok();
		match hex.len() {
			3 => {
				let mut it = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
				Some(Self::new(it.next()??, it.next()??, it.next()??))
			}
			6 => Some(Self::new(
				channel(hex.get(0..2)?)?,
				channel(hex.get(2..4)?)?,
				channel(hex.get(4..6)?)?,
			)),
			_ => None,
		}
	}

	pub fn parse_or_fallback(hex: &str) -> Self {
		Self::parse(hex).unwrap_or(FALLBACK_COLOR)
	}

	pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
		let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
		Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
	}

	pub fn to_css(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn robin_in_summer() {
		assert_eq!(marker_radius(Some(35.0)), 41.0);
	}

	#[test]
	fn bee_wildflower_thickness() {
		assert_eq!(edge_width(25.0), 7.5);
	}

	#[test]
	fn radius_has_floor_and_is_monotonic() {
		assert_eq!(marker_radius(None), 8.0);
		assert_eq!(marker_radius(Some(1.0)), 8.0);
		let mut last = marker_radius(None);
		for w in 0..200 {
			let r = marker_radius(Some(w as f64 * 0.5));
			assert!(r >= last);
			last = r;
		}
	}

	#[test]
	fn width_is_sublinear() {
		let mut last = 0.0;
		for w in 1..100 {
			let width = edge_width(w as f64);
			assert!(width >= last);
			last = width;
		}
		// doubling the weight grows thickness by sqrt(2), not 2
		let ratio = edge_width(50.0) / edge_width(25.0);
		assert!((ratio - 2f64.sqrt()).abs() < 1e-9);
	}

	#[test]
	fn parses_and_mixes_colours() {
		let bird = Rgb::parse("#4F46E5").unwrap();
		assert_eq!(bird, Rgb::new(0x4f, 0x46, 0xe5));
		assert_eq!(Rgb::parse("#aaa"), Some(FALLBACK_COLOR));
		assert_eq!(Rgb::parse("tomato"), None);
		assert_eq!(Rgb::parse_or_fallback("#12"), FALLBACK_COLOR);

		let black = Rgb::new(0, 0, 0);
		let white = Rgb::new(255, 255, 255);
		assert_eq!(black.lerp(white, 0.0), black);
		assert_eq!(black.lerp(white, 1.0), white);
		assert_eq!(black.lerp(white, 0.5).to_css(), "#808080");
	}
}
