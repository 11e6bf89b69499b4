use web_sys::CanvasRenderingContext2d;

use super::state::{CubeState, Session};

pub fn render(state: &CubeState, ctx: &CanvasRenderingContext2d) {
	// Immersive mode keeps the surface transparent so whatever sits behind
	// the canvas shows through, the way a passthrough camera would.
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	if state.session == Session::Inline {
		ctx.set_fill_style_str("#101018");
		ctx.fill_rect(0.0, 0.0, state.width, state.height);
	}

	for face in state.visible_faces() {
		let (r, g, b) = face.shade;
		let [first, rest @ ..] = face.points;
		ctx.begin_path();
		ctx.move_to(first.0, first.1);
		for (x, y) in rest {
			ctx.line_to(x, y);
		}
		ctx.close_path();
		ctx.set_fill_style_str(&format!("rgb({r}, {g}, {b})"));
		ctx.fill();
	}
}
