mod component;
mod config;
mod dataset;
mod elements;
mod layer;
mod layout;
mod render;
mod scale;
mod state;
mod transition;
mod types;

pub use component::SeasonalGraphCanvas;
pub use dataset::Catalog;
pub use types::Period;
