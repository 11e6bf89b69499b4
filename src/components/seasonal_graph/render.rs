use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::SeasonalGraphState;

const LINK_COLOR: &str = "#999999";
const LINK_ALPHA: f64 = 0.6;
const GLOW_BLUR: f64 = 7.0;

pub fn render(state: &SeasonalGraphState, ctx: &CanvasRenderingContext2d) {
	let config = state.config();
	ctx.clear_rect(0.0, 0.0, config.width, config.height);
	draw_links(state, ctx);
	draw_markers(state, ctx);
	draw_labels(state, ctx);
}

fn draw_links(state: &SeasonalGraphState, ctx: &CanvasRenderingContext2d) {
	let now = state.now();
	ctx.set_stroke_style_str(LINK_COLOR);
	for slot in state.links.iter() {
		let link = &slot.element;
		let (width, opacity) = (link.width.sample(now), link.opacity.sample(now));
		if width <= 0.0 || opacity <= 0.0 {
			continue;
		}
		ctx.set_global_alpha(LINK_ALPHA * opacity);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(link.x1, link.y1);
		ctx.line_to(link.x2, link.y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_markers(state: &SeasonalGraphState, ctx: &CanvasRenderingContext2d) {
	let now = state.now();
	for slot in state.markers.iter() {
		let marker = &slot.element;
		let radius = marker.radius.sample(now);
		if radius <= 0.0 {
			continue;
		}
		let fill = marker.fill.sample(now).to_css();
		// Soft halo in the marker's own colour.
		ctx.set_shadow_color(&fill);
		ctx.set_shadow_blur(GLOW_BLUR);
		ctx.begin_path();
		let _ = ctx.arc(marker.x, marker.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&fill);
		ctx.fill();
	}
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_color("transparent");
}

fn draw_labels(state: &SeasonalGraphState, ctx: &CanvasRenderingContext2d) {
	let (now, config) = (state.now(), state.config());
	ctx.set_font(&format!("{}px sans-serif", config.label_font_px));
	ctx.set_text_align("center");
	ctx.set_fill_style_str("#1f2937");
	for slot in state.labels.iter() {
		let label = &slot.element;
		let opacity = label.opacity.sample(now);
		if opacity <= 0.0 {
			continue;
		}
		ctx.set_global_alpha(opacity);
		let _ = ctx.fill_text(&label.text, label.x, label.y + config.label_offset);
	}
	ctx.set_global_alpha(1.0);
}
