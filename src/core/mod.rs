pub mod annotation;
pub mod classifier;
pub mod config;
pub mod session;
pub mod statistics;
