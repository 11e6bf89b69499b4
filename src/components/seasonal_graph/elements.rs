//! The three drawable layers: links, markers and labels.

use super::layer::{Element, PositionLookup};
use super::scale::Rgb;
use super::transition::{ColorTween, Timing, Tween};

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerDatum {
	pub id: String,
	pub color: Rgb,
	pub radius: f64,
}

#[derive(Clone, Debug)]
pub struct Marker {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub radius: Tween,
	pub fill: ColorTween,
}

impl Element for Marker {
	type Datum = MarkerDatum;

	fn key(datum: &MarkerDatum) -> String {
		datum.id.clone()
	}

	fn enter(datum: &MarkerDatum, now: f64, timing: &Timing) -> Self {
		Self {
			id: datum.id.clone(),
			x: 0.0,
			y: 0.0,
			radius: Tween::new(0.0, datum.radius, now, timing.enter_ms),
			fill: ColorTween::fixed(datum.color),
		}
	}

	fn update(&mut self, datum: &MarkerDatum, now: f64, timing: &Timing) {
		self.radius.retarget(now, datum.radius, timing.update_ms);
		self.fill.retarget(now, datum.color, timing.update_ms);
	}

	fn exit(&mut self, now: f64, timing: &Timing) {
		self.radius.retarget(now, 0.0, timing.exit_ms);
	}

	fn faded(&self, now: f64) -> bool {
		self.radius.is_done(now)
	}

	fn project(&mut self, lookup: &dyn PositionLookup) {
		if let Some((x, y)) = lookup.position(&self.id) {
			self.x = x;
			self.y = y;
		}
	}
}

/// Join key for a directed edge. Ids are escaped so `"A-B" -> "C"` and
/// `"A" -> "B-C"` never share a key.
pub fn link_key(source: &str, target: &str) -> String {
	fn escape(id: &str) -> String {
		id.replace('\\', "\\\\").replace('-', "\\-")
	}
	format!("{}-{}", escape(source), escape(target))
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkDatum {
	pub source: String,
	pub target: String,
	pub width: f64,
}

#[derive(Clone, Debug)]
pub struct Link {
	pub source: String,
	pub target: String,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub width: Tween,
	pub opacity: Tween,
}

impl Element for Link {
	type Datum = LinkDatum;

	fn key(datum: &LinkDatum) -> String {
		link_key(&datum.source, &datum.target)
	}

	fn enter(datum: &LinkDatum, now: f64, timing: &Timing) -> Self {
		Self {
			source: datum.source.clone(),
			target: datum.target.clone(),
			x1: 0.0,
			y1: 0.0,
			x2: 0.0,
			y2: 0.0,
			width: Tween::new(0.0, datum.width, now, timing.enter_ms),
			opacity: Tween::fixed(1.0),
		}
	}

	fn update(&mut self, datum: &LinkDatum, now: f64, timing: &Timing) {
		self.source.clone_from(&datum.source);
		self.target.clone_from(&datum.target);
		self.width.retarget(now, datum.width, timing.update_ms);
		self.opacity.retarget(now, 1.0, timing.update_ms);
	}

	fn exit(&mut self, now: f64, timing: &Timing) {
		self.opacity.retarget(now, 0.0, timing.exit_ms);
	}

	fn faded(&self, now: f64) -> bool {
		self.opacity.is_done(now)
	}

	fn project(&mut self, lookup: &dyn PositionLookup) {
		if let Some((x, y)) = lookup.position(&self.source) {
			self.x1 = x;
			self.y1 = y;
		}
		if let Some((x, y)) = lookup.position(&self.target) {
			self.x2 = x;
			self.y2 = y;
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelDatum {
	pub id: String,
	pub text: String,
}

#[derive(Clone, Debug)]
pub struct Label {
	pub id: String,
	pub text: String,
	pub x: f64,
	pub y: f64,
	pub opacity: Tween,
}

impl Element for Label {
	type Datum = LabelDatum;

	fn key(datum: &LabelDatum) -> String {
		datum.id.clone()
	}

	fn enter(datum: &LabelDatum, now: f64, timing: &Timing) -> Self {
		Self {
			id: datum.id.clone(),
			text: datum.text.clone(),
			x: 0.0,
			y: 0.0,
			opacity: Tween::new(0.0, 1.0, now, timing.enter_ms),
		}
	}

	fn update(&mut self, datum: &LabelDatum, now: f64, timing: &Timing) {
		self.text.clone_from(&datum.text);
		self.opacity.retarget(now, 1.0, timing.update_ms);
	}

	fn exit(&mut self, now: f64, timing: &Timing) {
		self.opacity.retarget(now, 0.0, timing.exit_ms);
	}

	fn faded(&self, now: f64) -> bool {
		self.opacity.is_done(now)
	}

	fn project(&mut self, lookup: &dyn PositionLookup) {
		if let Some((x, y)) = lookup.position(&self.id) {
			self.x = x;
			self.y = y;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn timing() -> Timing {
		Timing::default()
	}

	#[test]
	fn marker_grows_from_zero_and_shrinks_on_exit() {
		let datum = MarkerDatum {
			id: "Robin".into(),
			color: Rgb::new(0x4f, 0x46, 0xe5),
			radius: 21.0,
		};
		let mut marker = Marker::enter(&datum, 0.0, &timing());
		assert_eq!(marker.radius.sample(0.0), 0.0);
		assert_eq!(marker.radius.sample(1000.0), 21.0);

		marker.exit(1000.0, &timing());
		assert!(!marker.faded(1500.0));
		assert!(marker.faded(1600.0));
		assert_eq!(marker.radius.sample(1600.0), 0.0);
	}

	#[test]
	fn link_follows_both_endpoints() {
		let datum = LinkDatum {
			source: "Crow".into(),
			target: "Oak Tree".into(),
			width: 4.0,
		};
		assert_eq!(Link::key(&datum), "Crow-Oak Tree");

		let mut link = Link::enter(&datum, 0.0, &timing());
		let lookup = |id: &str| match id {
			"Crow" => Some((10.0, 20.0)),
			"Oak Tree" => Some((30.0, 40.0)),
			_ => None,
		};
		link.project(&lookup);
		assert_eq!((link.x1, link.y1, link.x2, link.y2), (10.0, 20.0, 30.0, 40.0));

		// a vanished endpoint leaves the line where it was
		let lookup = |id: &str| (id == "Crow").then_some((0.0, 0.0));
		link.project(&lookup);
		assert_eq!((link.x1, link.y1, link.x2, link.y2), (0.0, 0.0, 30.0, 40.0));
	}

	#[test]
	fn hyphenated_ids_get_distinct_link_keys() {
		assert_ne!(link_key("A-B", "C"), link_key("A", "B-C"));
		assert_ne!(link_key("A\\", "-B"), link_key("A\\-", "B"));
		assert_eq!(link_key("A-B", "C"), "A\\-B-C");
	}

	#[test]
	fn label_fades_in_and_out() {
		let datum = LabelDatum {
			id: "Bee".into(),
			text: "Bee".into(),
		};
		let mut label = Label::enter(&datum, 0.0, &timing());
		assert_eq!(label.opacity.sample(0.0), 0.0);
		assert_eq!(label.opacity.sample(1000.0), 1.0);

		label.exit(1000.0, &timing());
		assert_eq!(label.opacity.target(), 0.0);
		assert!(label.faded(1600.0));
	}
}
