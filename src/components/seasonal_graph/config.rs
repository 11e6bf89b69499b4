use super::layout::LayoutParams;
use super::transition::Timing;

/// Canvas size, layout forces and animation timing for the seasonal graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphConfig {
	pub width: f64,
	pub height: f64,
	pub link_distance: f64,
	pub charge_strength: f64,
	/// Alpha target held while a node is being dragged.
	pub drag_alpha_target: f64,
	pub timing: Timing,
	/// Vertical offset of a label from its marker centre.
	pub label_offset: f64,
	pub label_font_px: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			width: 600.0,
			height: 500.0,
			link_distance: 120.0,
			charge_strength: -200.0,
			drag_alpha_target: 0.3,
			timing: Timing::default(),
			label_offset: -18.0,
			label_font_px: 12.0,
		}
	}
}

impl GraphConfig {
	pub fn layout_params(&self) -> LayoutParams {
		LayoutParams {
			link_distance: self.link_distance,
			charge_strength: self.charge_strength,
			..LayoutParams::centered(self.width, self.height)
		}
	}
}
