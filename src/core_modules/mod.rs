pub mod aggregator;
pub mod classifier;
pub mod overlay;
pub mod pixel;
pub mod stabilizer;
