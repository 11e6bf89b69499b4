use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::GraphConfig;
use super::dataset::Catalog;
use super::render;
use super::state::SeasonalGraphState;

type SharedState = Rc<RefCell<Option<SeasonalGraphState>>>;

fn request_frame(cb: &Closure<dyn FnMut()>) {
	if let Some(window) = web_sys::window() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

fn canvas_point(canvas: &NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed view of one period's ecosystem, animated across period switches.
/// `period` is a period name such as `"Winter"`; unknown names are ignored.
#[component]
pub fn SeasonalGraphCanvas(
	#[prop(into)] period: Signal<String>,
	catalog: Catalog,
	#[prop(default = GraphConfig::default())] config: GraphConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("Canvas 2d context unavailable");
				return;
			}
		};

		let mut graph = SeasonalGraphState::new(catalog.clone(), config);
		graph.frame(js_sys::Date::now());
		graph.select_period(&period.get_untracked());
		*state_init.borrow_mut() = Some(graph);

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.frame(js_sys::Date::now());
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				request_frame(cb);
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			request_frame(cb);
		}
	});

	let state_period = state.clone();
	Effect::new(move |_| {
		let next = period.get();
		if let Some(ref mut s) = *state_period.borrow_mut() {
			s.select_period(&next);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(&canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(id) = s.entity_at(x, y) {
				s.drag_start(&id, x, y);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(&canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if let Some(id) = s.drag.entity.clone() {
				s.drag_move(&id, x, y);
			}
		}
	};

	let release = move |state: &SharedState| {
		if let Some(ref mut s) = *state.borrow_mut() {
			if let Some(id) = s.drag.entity.clone() {
				s.drag_end(&id);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| release(&state_mu);

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| release(&state_ml);

	view! {
		<canvas
			node_ref=canvas_ref
			class="seasonal-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
