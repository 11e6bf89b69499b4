use leptos::prelude::*;
use log::error;

use crate::components::seasonal_graph::{Catalog, Period, SeasonalGraphCanvas};

/// Slider, legend and graph for a loaded catalog.
#[component]
fn SeasonalNetwork(catalog: Catalog) -> impl IntoView {
	let (period, set_period) = signal(Period::Spring);
	let legend_catalog = catalog.clone();
	let categories = move || legend_catalog.snapshot(period.get()).categories();

	let period_name = Signal::derive(move || period.get().name().to_owned());

	let on_input = move |ev: leptos::ev::Event| {
		let selected = event_target_value(&ev)
			.parse::<usize>()
			.ok()
			.and_then(Period::from_index);
		if let Some(p) = selected {
			set_period.set(p);
		}
	};

	view! {
		<div class="seasonal-network">
			<h1>"Seasonal Ecosystem Network"</h1>
			<input
				type="range"
				min="0"
				max={(Period::ALL.len() - 1).to_string()}
				step="1"
				class="period-slider"
				prop:value=move || period.get().index().to_string()
				on:input=on_input
			/>
			<p class="period-name">{move || period.get().name()}</p>
			<div class="legend">
				<For
					each=categories
					key=|category| *category
					children=|category| {
						view! {
							<div class="legend-item">
								<span
									class="swatch"
									style:background-color=category.color()
								></span>
								<span>{category.label()}</span>
							</div>
						}
					}
				/>
				<div class="legend-item">
					<span class="swatch edge"></span>
					<span>"Edge width = correlation strength"</span>
				</div>
				<div class="legend-item">
					<svg width="20" height="20">
						<circle cx="10" cy="10" r="8" fill="#ccc" />
					</svg>
					<span>"Node size = connectivity"</span>
				</div>
			</div>
			<SeasonalGraphCanvas period=period_name catalog=catalog />
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let catalog = Catalog::builtin().inspect_err(|err| error!("Dataset rejected: {err}"));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{catalog.map(|catalog| view! { <SeasonalNetwork catalog=catalog /> })}
		</ErrorBoundary>
	}
}
