// Data models for hand landmarks, video frames, and gesture results

pub mod frame;
pub mod gesture;
pub mod hand;
