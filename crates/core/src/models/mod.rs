pub mod analysis;
pub mod cache;
pub mod config;
pub mod metrics;
pub mod price;
pub mod returns;
pub mod weights;
