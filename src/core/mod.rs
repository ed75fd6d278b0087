pub mod classifier;
pub mod placement;
pub mod resolver;
