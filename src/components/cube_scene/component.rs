use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::render;
use super::state::{CubeState, Session};

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn window_size() -> Option<(f64, f64)> {
	let window = web_sys::window()?;
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn fit_to_window(canvas: &HtmlCanvasElement, state: &mut CubeState) {
	if let Some((w, h)) = window_size() {
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state.resize(w, h);
	}
}

/// Full-window canvas with a spinning cube and an immersive-session toggle.
#[component]
pub fn CubeSceneCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CubeState>>> = Rc::new(RefCell::new(None));
	let animate: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let fullscreen_cb: Callback = Rc::new(RefCell::new(None));
	let (session, set_session) = signal(Session::Inline);
	let (state_init, animate_init, resize_cb_init, fullscreen_cb_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		fullscreen_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("Canvas 2d context unavailable");
			return;
		};
		let mut cube = CubeState::new(800.0, 600.0);
		fit_to_window(&canvas, &mut cube);
		*state_init.borrow_mut() = Some(cube);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				fit_to_window(&canvas_resize, s);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		// Esc leaves fullscreen without going through the button.
		let state_fs = state_init.clone();
		*fullscreen_cb_init.borrow_mut() = Some(Closure::new(move || {
			let fullscreen = web_sys::window()
				.and_then(|w| w.document())
				.and_then(|d| d.fullscreen_element())
				.is_some();
			if let Some(ref mut s) = *state_fs.borrow_mut() {
				if s.sync_fullscreen(fullscreen) {
					info!("Cube session {:?}", s.session);
					set_session.set(s.session);
				}
			}
		}));
		if let (Some(document), Some(cb)) = (window.document(), fullscreen_cb_init.borrow().as_ref()) {
			let _ = document
				.add_event_listener_with_callback("fullscreenchange", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.advance();
				render::render(s, &ctx);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_toggle = state.clone();
	let on_toggle = move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let mut guard = state_toggle.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		let next = s.toggle_session();
		let result = match next {
			Session::Immersive => canvas.request_fullscreen(),
			Session::Inline => {
				if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
					doc.exit_fullscreen();
				}
				Ok(())
			}
		};
		if let Err(err) = result {
			warn!("Immersive session unavailable: {err:?}");
			s.toggle_session();
			return;
		}
		info!("Cube session {next:?}");
		set_session.set(s.session);
	};

	view! {
		<div class="cube-scene">
			<canvas node_ref=canvas_ref class="cube-scene-canvas" style="display: block;" />
			<button class="session-toggle" on:click=on_toggle>
				{move || session.get().button_label()}
			</button>
		</div>
	}
}
