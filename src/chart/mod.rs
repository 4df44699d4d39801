pub mod format;
pub mod geometry;
pub mod overlay;
pub mod sparkline;
pub mod stacked;
