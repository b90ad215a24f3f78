// Hand landmark estimation integration
// Provides the provider bridge and its backends

pub mod provider;

pub use provider::{DummyProvider, LandmarkProvider, ReplayProvider};
