use log::{debug, info, warn};

use super::config::GraphConfig;
use super::dataset::Catalog;
use super::elements::{Label, LabelDatum, Link, LinkDatum, Marker, MarkerDatum};
use super::layer::{Layer, Partition};
use super::layout::Layout;
use super::scale::{Rgb, edge_width, marker_radius};
use super::types::{Period, Snapshot};

/// Smallest pointer target, so thin markers remain draggable.
pub const HIT_RADIUS: f64 = 12.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub entity: Option<String>,
	/// Marker centre minus the pointer at grab time.
	pub offset: (f64, f64),
}

/// Per-layer outcome of the last period switch.
#[derive(Clone, Debug, Default)]
pub struct Reconciliation {
	pub links: Partition,
	pub markers: Partition,
	pub labels: Partition,
}

pub struct SeasonalGraphState {
	catalog: Catalog,
	config: GraphConfig,
	period: Option<Period>,
	layout: Layout,
	pub links: Layer<Link>,
	pub markers: Layer<Marker>,
	pub labels: Layer<Label>,
	pub drag: DragState,
	now: f64,
}

impl SeasonalGraphState {
	pub fn new(catalog: Catalog, config: GraphConfig) -> Self {
		Self {
			layout: Layout::new(config.layout_params()),
			catalog,
			config,
			period: None,
			links: Layer::new("links"),
			markers: Layer::new("markers"),
			labels: Layer::new("labels"),
			drag: DragState::default(),
			now: 0.0,
		}
	}

	/// Switches by name; unknown names are logged and ignored.
	pub fn select_period(&mut self, name: &str) -> Option<Reconciliation> {
		match name.parse::<Period>() {
			Ok(period) => self.select(period),
			Err(err) => {
				warn!("Ignoring period selection: {err}");
				None
			}
		}
	}

	/// Replaces the live dataset and reconciles every layer against it.
	/// Selecting the active period again does nothing.
	pub fn select(&mut self, period: Period) -> Option<Reconciliation> {
		if self.period == Some(period) {
			return None;
		}
		self.period = Some(period);
		let snapshot = self.catalog.snapshot(period).clone();
		info!(
			"Period {period}: {} entities, {} relationships",
			snapshot.entities.len(),
			snapshot.relationships.len()
		);

		self.layout.rebuild(&snapshot.entities, &snapshot.relationships);
		if let Some(id) = self.drag.entity.take() {
			if self.layout.body(&id).is_some() {
				self.drag.entity = Some(id);
			} else {
				debug!("Dragged entity {id} left with the period switch");
				self.drag = DragState::default();
				self.layout.set_alpha_target(0.0);
			}
		}

		let (links, markers, labels) = encode(&snapshot);
		let (now, timing) = (self.now, self.config.timing);
		let result = Reconciliation {
			links: self.links.join(&links, now, &timing),
			markers: self.markers.join(&markers, now, &timing),
			labels: self.labels.join(&labels, now, &timing),
		};
		debug!(
			"Period {period}: markers +{} -{}, links +{} -{}",
			result.markers.entering.len(),
			result.markers.exiting.len(),
			result.links.entering.len(),
			result.links.exiting.len()
		);
		self.on_simulation_tick();
		Some(result)
	}

	/// Advances the clock to `now` (ms), steps the layout and drops
	/// elements whose exit has finished.
	pub fn frame(&mut self, now: f64) {
		self.now = now;
		if self.layout.tick() {
			self.on_simulation_tick();
		}
		self.links.prune(now);
		self.markers.prune(now);
		self.labels.prune(now);
	}

	/// Re-projects every layer onto the layout's current positions.
	pub fn on_simulation_tick(&mut self) {
		let layout = &self.layout;
		let lookup = |id: &str| layout.position(id);
		self.links.project(&lookup);
		self.markers.project(&lookup);
		self.labels.project(&lookup);
	}

	/// Grabs `id` with the pointer at (`px`, `py`). The marker keeps its
	/// offset from the pointer for the rest of the drag.
	pub fn drag_start(&mut self, id: &str, px: f64, py: f64) -> bool {
		let Some((x, y)) = self.layout.position(id) else {
			warn!("Drag started on unknown entity {id}");
			return false;
		};
		self.layout.set_alpha_target(self.config.drag_alpha_target);
		self.layout.restart();
		self.layout.pin(id, x, y);
		self.drag = DragState {
			entity: Some(id.to_owned()),
			offset: (x - px, y - py),
		};
		debug!("Drag start {id} at ({x:.1}, {y:.1})");
		true
	}

	pub fn drag_move(&mut self, id: &str, px: f64, py: f64) {
		if self.drag.entity.as_deref() == Some(id) {
			let (dx, dy) = self.drag.offset;
			self.layout.pin(id, px + dx, py + dy);
		}
	}

	pub fn drag_end(&mut self, id: &str) {
		if self.drag.entity.as_deref() != Some(id) {
			return;
		}
		self.layout.set_alpha_target(0.0);
		self.layout.unpin(id);
		self.drag = DragState::default();
		debug!("Drag end {id}");
	}

	/// Topmost live marker under the point.
	pub fn entity_at(&self, x: f64, y: f64) -> Option<String> {
		self.markers
			.iter()
			.filter(|slot| !slot.exiting)
			.filter(|slot| {
				let m = &slot.element;
				let r = m.radius.sample(self.now).max(HIT_RADIUS);
				(m.x - x).powi(2) + (m.y - y).powi(2) < r * r
			})
			.last()
			.map(|slot| slot.key.clone())
	}

	#[cfg(test)]
	pub fn period(&self) -> Option<Period> {
		self.period
	}

	#[cfg(test)]
	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	pub fn config(&self) -> &GraphConfig {
		&self.config
	}

	pub fn now(&self) -> f64 {
		self.now
	}
}

fn encode(snapshot: &Snapshot) -> (Vec<LinkDatum>, Vec<MarkerDatum>, Vec<LabelDatum>) {
	let totals = snapshot.connectivity();
	let links = snapshot
		.relationships
		.iter()
		.map(|rel| LinkDatum {
			source: rel.source.clone(),
			target: rel.target.clone(),
			width: edge_width(rel.weight),
		})
		.collect();
	let markers = snapshot
		.entities
		.iter()
		.map(|e| MarkerDatum {
			id: e.id.clone(),
			color: Rgb::parse_or_fallback(e.category.color()),
			radius: marker_radius(totals.get(&e.id).copied()),
		})
		.collect();
	let labels = snapshot
		.entities
		.iter()
		.map(|e| LabelDatum {
			id: e.id.clone(),
			text: e.id.clone(),
		})
		.collect();
	(links, markers, labels)
}
