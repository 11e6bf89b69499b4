use leptos::prelude::*;

use crate::components::cube_scene::CubeSceneCanvas;

/// Spinning cube with an immersive-mode toggle.
#[component]
pub fn Cube() -> impl IntoView {
	view! { <CubeSceneCanvas /> }
}
