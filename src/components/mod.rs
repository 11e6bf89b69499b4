pub mod cube_scene;
pub mod seasonal_graph;
