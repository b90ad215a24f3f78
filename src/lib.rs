pub mod core;
pub mod models;
pub mod platform;

pub use crate::core::classifier::classify;
pub use crate::core::config::Config;
pub use crate::core::session::GestureSession;
pub use crate::models::gesture::{AnnotatedFrame, GestureLabel, GestureStatistics};
pub use crate::models::hand::{GestureError, GestureResult, Hand, HandLandmark, Landmark};
