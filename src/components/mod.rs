pub mod heatmap;
pub mod pitch;
pub mod shot_map;
