// Data models for classified gestures, annotated frames, and session statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::frame::{BoundingBox, RawFrame};
use crate::models::hand::Handedness;

/// Headline shown when a frame contains no hand at all
pub const NO_HAND_TEXT: &str = "No Gesture Detected";

// ==============================================================================
// Gesture Label
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    ThumbsUp,
    PeaceSign,
    HelloWave,
    NoGesture,
}

impl GestureLabel {
    /// Every label, in rule priority order with the fallback last
    pub const ALL: [GestureLabel; 4] = [
        GestureLabel::ThumbsUp,
        GestureLabel::PeaceSign,
        GestureLabel::HelloWave,
        GestureLabel::NoGesture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::ThumbsUp => "thumbs_up",
            GestureLabel::PeaceSign => "peace_sign",
            GestureLabel::HelloWave => "hello_wave",
            GestureLabel::NoGesture => "no_gesture",
        }
    }

    /// Text rendered on screen
    pub fn display_text(&self) -> &'static str {
        match self {
            GestureLabel::ThumbsUp => "Thumbs Up",
            GestureLabel::PeaceSign => "Peace Sign",
            GestureLabel::HelloWave => "Hello Wave",
            GestureLabel::NoGesture => "No Gesture",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

// ==============================================================================
// Annotated Frame
// ==============================================================================

/// Classification result for one hand in a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandAnnotation {
    pub handedness: Handedness,
    pub label: GestureLabel,
    pub bounding_box: BoundingBox,
}

/// A frame after detection, classification, and overlay drawing
#[derive(Debug, Clone)]
pub struct AnnotatedFrame {
    pub timestamp: i64,
    pub frame: RawFrame,
    pub hands: Vec<HandAnnotation>,
    pub processing_time_ms: u64,
}

impl AnnotatedFrame {
    pub fn has_hands(&self) -> bool {
        !self.hands.is_empty()
    }

    /// Label of the last hand reported, or `None` when the frame has no hand
    pub fn gesture(&self) -> Option<GestureLabel> {
        self.hands.last().map(|hand| hand.label)
    }

    /// Text shown after "Gesture:" in the overlay
    pub fn headline(&self) -> &'static str {
        self.gesture()
            .map(|label| label.display_text())
            .unwrap_or(NO_HAND_TEXT)
    }
}

// ==============================================================================
// Statistics
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureStatistics {
    pub session_id: String,
    pub total_frames: u64,
    pub frames_with_hands: u64,
    pub label_counts: BTreeMap<String, u64>, // Keyed by `GestureLabel::as_str`
    pub average_processing_time_ms: f32,
    pub dominant_gesture: Option<GestureLabel>,
}
