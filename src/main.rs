use leptos::prelude::*;
use seasonal_network::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
