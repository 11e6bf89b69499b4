//! Keyed render sets with enter/update/exit reconciliation.

use std::collections::HashSet;

use log::debug;

use super::transition::Timing;

/// Keys split by how they relate to the previous render set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
	pub entering: Vec<String>,
	pub persisting: Vec<String>,
	pub exiting: Vec<String>,
}

/// Entering and persisting keep `new` order, exiting keeps `old` order.
pub fn partition<'a, 'b>(
	old: impl IntoIterator<Item = &'a str>,
	new: impl IntoIterator<Item = &'b str>,
) -> Partition {
	let old: Vec<&str> = old.into_iter().collect();
	let new: Vec<&str> = new.into_iter().collect();
	let old_set: HashSet<&str> = old.iter().copied().collect();
	let new_set: HashSet<&str> = new.iter().copied().collect();

	let mut out = Partition::default();
	for key in new {
		if old_set.contains(key) {
			out.persisting.push(key.to_owned());
		} else {
			out.entering.push(key.to_owned());
		}
	}
	out.exiting = old
		.into_iter()
		.filter(|key| !new_set.contains(key))
		.map(str::to_owned)
		.collect();
	out
}

/// Resolves an entity id to its current position.
pub trait PositionLookup {
	fn position(&self, id: &str) -> Option<(f64, f64)>;
}

impl<F> PositionLookup for F
where
	F: Fn(&str) -> Option<(f64, f64)>,
{
	fn position(&self, id: &str) -> Option<(f64, f64)> {
		self(id)
	}
}

/// One drawable kind (marker, link, label) and its transition policy.
pub trait Element {
	type Datum;

	fn key(datum: &Self::Datum) -> String;
	/// Built in the neutral state, already animating toward `datum`.
	fn enter(datum: &Self::Datum, now: f64, timing: &Timing) -> Self;
	fn update(&mut self, datum: &Self::Datum, now: f64, timing: &Timing);
	fn exit(&mut self, now: f64, timing: &Timing);
	/// True once an exiting element has reached its neutral state.
	fn faded(&self, now: f64) -> bool;
	/// Follows the layout; ids missing from `lookup` leave the element where it is.
	fn project(&mut self, lookup: &dyn PositionLookup);
}

#[derive(Clone, Debug)]
pub struct Slot<E> {
	pub key: String,
	pub element: E,
	pub exiting: bool,
}

#[derive(Clone, Debug)]
pub struct Layer<E> {
	name: &'static str,
	slots: Vec<Slot<E>>,
}

impl<E: Element> Layer<E> {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			slots: Vec::new(),
		}
	}

	/// Reconciles the render set against `data`. Elements still fading out
	/// count as present, so a key that comes back is retargeted rather than
	/// removed and re-added.
	pub fn join(&mut self, data: &[E::Datum], now: f64, timing: &Timing) -> Partition {
		let old_keys: Vec<String> = self.slots.iter().map(|s| s.key.clone()).collect();
		let new_keys: Vec<String> = data.iter().map(E::key).collect();
		let split = partition(
			old_keys.iter().map(String::as_str),
			new_keys.iter().map(String::as_str),
		);

		let mut next = Vec::with_capacity(data.len() + split.exiting.len());
		let mut previous = std::mem::take(&mut self.slots);
		for (key, datum) in new_keys.into_iter().zip(data) {
			match previous.iter().position(|s| s.key == key) {
				Some(i) => {
					let mut slot = previous.swap_remove(i);
					slot.element.update(datum, now, timing);
					slot.exiting = false;
					next.push(slot);
				}
				None => next.push(Slot {
					key,
					element: E::enter(datum, now, timing),
					exiting: false,
				}),
			}
		}
		// Whatever is left is exiting; keep it drawn until it has faded.
		for old_key in &split.exiting {
			if let Some(i) = previous.iter().position(|s| &s.key == old_key) {
				let mut slot = previous.swap_remove(i);
				if !slot.exiting {
					slot.element.exit(now, timing);
					slot.exiting = true;
				}
				next.push(slot);
			}
		}
		self.slots = next;

		debug!(
			"{} join: {} entering, {} persisting, {} exiting",
			self.name,
			split.entering.len(),
			split.persisting.len(),
			split.exiting.len()
		);
		split
	}

	pub fn project(&mut self, lookup: &dyn PositionLookup) {
		for slot in &mut self.slots {
			slot.element.project(lookup);
		}
	}

	/// Drops exiting elements whose fade has finished.
	pub fn prune(&mut self, now: f64) -> usize {
		let before = self.slots.len();
		self.slots
			.retain(|slot| !(slot.exiting && slot.element.faded(now)));
		before - self.slots.len()
	}

	#[cfg(test)]
	pub fn get(&self, key: &str) -> Option<&Slot<E>> {
		self.slots.iter().find(|s| s.key == key)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Slot<E>> {
		self.slots.iter()
	}

	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	#[cfg(test)]
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::seasonal_graph::transition::Tween;

	#[test]
	fn spring_to_winter_split() {
		let split = partition(
			["Robin", "Oak Tree", "Caterpillar"],
			["Oak Tree", "Crow"],
		);
		assert_eq!(split.entering, vec!["Crow"]);
		assert_eq!(split.persisting, vec!["Oak Tree"]);
		assert_eq!(split.exiting, vec!["Robin", "Caterpillar"]);
	}

	#[test]
	fn empty_sides() {
		let split = partition([], ["a", "b"]);
		assert_eq!(split.entering, vec!["a", "b"]);
		assert!(split.persisting.is_empty() && split.exiting.is_empty());

		let split = partition(["a"], []);
		assert_eq!(split.exiting, vec!["a"]);
	}

	/// Minimal element: a single scalar that enters from 0 and exits to 0.
	#[derive(Debug)]
	struct Dot {
		size: Tween,
		entered_at: f64,
	}

	impl Element for Dot {
		type Datum = (&'static str, f64);

		fn key(datum: &Self::Datum) -> String {
			datum.0.to_owned()
		}

		fn enter(datum: &Self::Datum, now: f64, timing: &Timing) -> Self {
			Dot {
				size: Tween::new(0.0, datum.1, now, timing.enter_ms),
				entered_at: now,
			}
		}

		fn update(&mut self, datum: &Self::Datum, now: f64, timing: &Timing) {
			self.size.retarget(now, datum.1, timing.update_ms);
		}

		fn exit(&mut self, now: f64, timing: &Timing) {
			self.size.retarget(now, 0.0, timing.exit_ms);
		}

		fn faded(&self, now: f64) -> bool {
			self.size.is_done(now)
		}

		fn project(&mut self, _lookup: &dyn PositionLookup) {}
	}

	#[test]
	fn exiting_elements_stay_until_faded() {
		let timing = Timing::default();
		let mut layer: Layer<Dot> = Layer::new("dots");
		layer.join(&[("a", 4.0), ("b", 6.0)], 0.0, &timing);
		layer.join(&[("b", 8.0)], 2000.0, &timing);

		assert_eq!(layer.len(), 2);
		assert!(layer.get("a").unwrap().exiting);
		assert_eq!(layer.prune(2300.0), 0);
		assert_eq!(layer.prune(2600.0), 1);
		assert!(layer.get("a").is_none());
		assert_eq!(layer.get("b").unwrap().element.size.sample(3000.0), 8.0);
	}

	#[test]
	fn persisting_keeps_identity() {
		let timing = Timing::default();
		let mut layer: Layer<Dot> = Layer::new("dots");
		layer.join(&[("a", 4.0)], 0.0, &timing);
		let split = layer.join(&[("a", 10.0)], 2000.0, &timing);
		assert_eq!(split.persisting, vec!["a"]);

		let dot = &layer.get("a").unwrap().element;
		assert_eq!(dot.entered_at, 0.0);
		assert_eq!(dot.size.sample(2000.0), 4.0);
		assert_eq!(dot.size.sample(3000.0), 10.0);
	}

	#[test]
	fn returning_key_interrupts_exit() {
		let timing = Timing::default();
		let mut layer: Layer<Dot> = Layer::new("dots");
		layer.join(&[("a", 10.0)], 0.0, &timing);
		layer.join(&[], 1000.0, &timing);
		let split = layer.join(&[("a", 10.0)], 1300.0, &timing);

		assert_eq!(split.persisting, vec!["a"]);
		let slot = layer.get("a").unwrap();
		assert!(!slot.exiting);
		assert_eq!(slot.element.entered_at, 0.0);
		// picks up mid-fade instead of jumping back to zero
		let now = slot.element.size.sample(1300.0);
		assert!(now > 0.0 && now < 10.0);
		assert_eq!(layer.prune(5000.0), 0);
	}

	#[test]
	fn repeated_exit_does_not_restart_fade() {
		let timing = Timing::default();
		let mut layer: Layer<Dot> = Layer::new("dots");
		layer.join(&[("a", 10.0)], 0.0, &timing);
		layer.join(&[], 1000.0, &timing);
		layer.join(&[], 1500.0, &timing);
		assert_eq!(layer.prune(1600.0), 1);
		assert!(layer.is_empty());
	}
}
