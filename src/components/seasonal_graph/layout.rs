//! Force-directed layout with alpha cooling and per-body pinning.
//!
//! Each tick applies a spring force along every relationship, pairwise
//! repulsion between all bodies and a centring translation, then integrates
//! velocities. Forces are scaled by `alpha`, which decays toward
//! `alpha_target`; the simulation stops once alpha falls below `alpha_min`
//! and the target is zero.

use std::collections::HashMap;
use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{Entity, Relationship};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	pub link_distance: f64,
	/// Negative repels.
	pub charge_strength: f64,
	pub center: (f64, f64),
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Pairs closer than this are treated as this far apart.
	pub distance_min: f64,
}

impl LayoutParams {
	pub fn centered(width: f64, height: f64) -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			link_distance: 120.0,
			charge_strength: -200.0,
			center: (width / 2.0, height / 2.0),
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			distance_min: 1.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Overrides the simulated position while set.
	pub pin: Option<(f64, f64)>,
}

#[derive(Clone, Copy, Debug)]
struct Spring {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

pub struct Layout {
	params: LayoutParams,
	bodies: Vec<Body>,
	index: HashMap<String, usize>,
	springs: Vec<Spring>,
	alpha: f64,
	alpha_target: f64,
	running: bool,
	rng: SmallRng,
}

const INITIAL_RADIUS: f64 = 10.0;

impl Layout {
	pub fn new(params: LayoutParams) -> Self {
		Self {
			params,
			bodies: Vec::new(),
			index: HashMap::new(),
			springs: Vec::new(),
			alpha: 1.0,
			alpha_target: 0.0,
			running: false,
			rng: SmallRng::seed_from_u64(0x5ea5_0115),
		}
	}

	/// Replaces the body set. Ids that were already laid out keep their
	/// position and velocity; new ones are seeded on a spiral around the
	/// centre. Reheats the simulation.
	pub fn rebuild(&mut self, entities: &[Entity], relationships: &[Relationship]) {
		let previous: HashMap<String, Body> = self
			.bodies
			.drain(..)
			.map(|b| (b.id.clone(), b))
			.collect();
		let golden = PI * (3.0 - 5f64.sqrt());

		self.bodies = entities
			.iter()
			.enumerate()
			.map(|(i, entity)| match previous.get(&entity.id) {
				Some(body) => body.clone(),
				None => {
					let r = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
					let angle = i as f64 * golden;
					Body {
						id: entity.id.clone(),
						x: self.params.center.0 + r * angle.cos(),
						y: self.params.center.1 + r * angle.sin(),
						vx: 0.0,
						vy: 0.0,
						pin: None,
					}
				}
			})
			.collect();
		self.index = self
			.bodies
			.iter()
			.enumerate()
			.map(|(i, b)| (b.id.clone(), i))
			.collect();

		let mut degree = vec![0usize; self.bodies.len()];
		let pairs: Vec<(usize, usize)> = relationships
			.iter()
			.filter_map(|rel| Some((*self.index.get(&rel.source)?, *self.index.get(&rel.target)?)))
			.collect();
		for &(s, t) in &pairs {
			degree[s] += 1;
			degree[t] += 1;
		}
		self.springs = pairs
			.into_iter()
			.map(|(source, target)| Spring {
				source,
				target,
				strength: 1.0 / degree[source].min(degree[target]) as f64,
				bias: degree[source] as f64 / (degree[source] + degree[target]) as f64,
			})
			.collect();

		self.alpha = 1.0;
		self.running = true;
	}

	/// Advances one step. Returns false once the layout has cooled.
	pub fn tick(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;

		self.apply_springs();
		self.apply_charge();
		self.apply_center();

		let keep = 1.0 - self.params.velocity_decay;
		for body in &mut self.bodies {
			match body.pin {
				Some((px, py)) => {
					body.x = px;
					body.y = py;
					body.vx = 0.0;
					body.vy = 0.0;
				}
				None => {
					body.vx *= keep;
					body.vy *= keep;
					body.x += body.vx;
					body.y += body.vy;
				}
			}
		}

		if self.alpha < self.params.alpha_min {
			self.running = false;
		}
		true
	}

	fn jiggle(&mut self) -> f64 {
		(self.rng.r#gen::<f64>() - 0.5) * 1e-6
	}

	fn apply_springs(&mut self) {
		for i in 0..self.springs.len() {
			let Spring {
				source,
				target,
				strength,
				bias,
			} = self.springs[i];
			let (s, t) = (&self.bodies[source], &self.bodies[target]);
			let mut dx = t.x + t.vx - s.x - s.vx;
			let mut dy = t.y + t.vy - s.y - s.vy;
			if dx == 0.0 {
				dx = self.jiggle();
			}
			if dy == 0.0 {
				dy = self.jiggle();
			}
			let len = (dx * dx + dy * dy).sqrt();
			let k = (len - self.params.link_distance) / len * self.alpha * strength;
			let (fx, fy) = (dx * k, dy * k);

			let t = &mut self.bodies[target];
			t.vx -= fx * bias;
			t.vy -= fy * bias;
			let s = &mut self.bodies[source];
			s.vx += fx * (1.0 - bias);
			s.vy += fy * (1.0 - bias);
		}
	}

	fn apply_charge(&mut self) {
		let n = self.bodies.len();
		let min2 = self.params.distance_min * self.params.distance_min;
		let scale = self.params.charge_strength * self.alpha;
		for i in 0..n {
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut dx = self.bodies[j].x - self.bodies[i].x;
				let mut dy = self.bodies[j].y - self.bodies[i].y;
				if dx == 0.0 {
					dx = self.jiggle();
				}
				if dy == 0.0 {
					dy = self.jiggle();
				}
				let mut l2 = dx * dx + dy * dy;
				if l2 < min2 {
					l2 = (min2 * l2).sqrt();
				}
				let w = scale / l2;
				let body = &mut self.bodies[i];
				body.vx += dx * w;
				body.vy += dy * w;
			}
		}
	}

	fn apply_center(&mut self) {
		if self.bodies.is_empty() {
			return;
		}
		let n = self.bodies.len() as f64;
		let (sx, sy) = self
			.bodies
			.iter()
			.fold((0.0, 0.0), |(ax, ay), b| (ax + b.x, ay + b.y));
		let shift_x = sx / n - self.params.center.0;
		let shift_y = sy / n - self.params.center.1;
		for body in &mut self.bodies {
			body.x -= shift_x;
			body.y -= shift_y;
		}
	}

	/// Fixes a body in place; the rest of the graph keeps reacting to it.
	pub fn pin(&mut self, id: &str, x: f64, y: f64) -> bool {
		match self.index.get(id) {
			Some(&i) => {
				self.bodies[i].pin = Some((x, y));
				true
			}
			None => false,
		}
	}

	pub fn unpin(&mut self, id: &str) -> bool {
		match self.index.get(id) {
			Some(&i) => {
				self.bodies[i].pin = None;
				true
			}
			None => false,
		}
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Resumes ticking without resetting alpha.
	pub fn restart(&mut self) {
		self.running = true;
	}

	#[cfg(test)]
	pub fn is_running(&self) -> bool {
		self.running
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	#[cfg(test)]
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Pinned position when pinned, simulated position otherwise.
	pub fn position(&self, id: &str) -> Option<(f64, f64)> {
		let body = &self.bodies[*self.index.get(id)?];
		Some(body.pin.unwrap_or((body.x, body.y)))
	}

	pub fn body(&self, id: &str) -> Option<&Body> {
		self.index.get(id).map(|&i| &self.bodies[i])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::seasonal_graph::types::Category;

	fn entity(id: &str) -> Entity {
		Entity {
			id: id.into(),
			category: Category::Plant,
		}
	}

	fn rel(source: &str, target: &str) -> Relationship {
		Relationship {
			source: source.into(),
			target: target.into(),
			weight: 1.0,
		}
	}

	fn pair() -> Layout {
		let mut layout = Layout::new(LayoutParams::centered(600.0, 500.0));
		layout.rebuild(&[entity("a"), entity("b")], &[rel("a", "b")]);
		layout
	}

	fn distance(layout: &Layout, a: &str, b: &str) -> f64 {
		let (ax, ay) = layout.position(a).unwrap();
		let (bx, by) = layout.position(b).unwrap();
		((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
	}

	#[test]
	fn cools_down_and_stops() {
		let mut layout = pair();
		let mut ticks = 0;
		while layout.tick() {
			ticks += 1;
			assert!(ticks < 1000, "layout never cooled");
		}
		assert!(!layout.is_running());
		assert!(layout.alpha() < 0.001);
		// roughly 300 ticks to go from 1 to alpha_min
		assert!((295..=305).contains(&ticks), "{ticks}");
	}

	#[test]
	fn settles_around_center_and_spreads_linked_pair() {
		let mut layout = pair();
		while layout.tick() {}
		let (ax, ay) = layout.position("a").unwrap();
		let (bx, by) = layout.position("b").unwrap();
		assert!(((ax + bx) / 2.0 - 300.0).abs() < 1e-6);
		assert!(((ay + by) / 2.0 - 250.0).abs() < 1e-6);
		let d = distance(&layout, "a", "b");
		assert!(d > 60.0 && d < 240.0, "{d}");
	}

	#[test]
	fn pinned_body_stays_put_until_released() {
		let mut layout = pair();
		assert!(layout.pin("a", 50.0, 60.0));
		for _ in 0..20 {
			layout.tick();
			let body = layout.body("a").unwrap();
			assert_eq!((body.x, body.y), (50.0, 60.0));
			assert_eq!(layout.position("a"), Some((50.0, 60.0)));
		}

		assert!(layout.unpin("a"));
		assert!(layout.body("a").unwrap().pin.is_none());
		layout.tick();
		assert_ne!(layout.position("a"), Some((50.0, 60.0)));
	}

	#[test]
	fn alpha_target_keeps_layout_warm() {
		let mut layout = pair();
		while layout.tick() {}

		layout.set_alpha_target(0.3);
		layout.restart();
		for _ in 0..2000 {
			assert!(layout.tick());
		}
		assert!((layout.alpha() - 0.3).abs() < 0.01);

		layout.set_alpha_target(0.0);
		while layout.tick() {}
		assert!(!layout.is_running());
	}

	#[test]
	fn rebuild_carries_positions_for_surviving_ids() {
		let mut layout = pair();
		for _ in 0..50 {
			layout.tick();
		}
		let before = layout.position("a").unwrap();

		layout.rebuild(&[entity("a"), entity("c")], &[rel("c", "a")]);
		assert_eq!(layout.position("a"), Some(before));
		assert!(layout.position("b").is_none());
		assert!(layout.position("c").is_some());
		assert_eq!(layout.alpha(), 1.0);
		assert!(layout.is_running());
	}

	#[test]
	fn unknown_ids_are_ignored() {
		let mut layout = pair();
		assert!(!layout.pin("zebra", 0.0, 0.0));
		assert!(!layout.unpin("zebra"));
		assert!(layout.position("zebra").is_none());
	}
}
