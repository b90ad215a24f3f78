// Data models for hand landmarks as produced by a 21-point hand pose estimator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::path::PathBuf;

use crate::models::frame::CaptureError;

/// Number of landmarks in every hand
pub const HAND_LANDMARK_COUNT: usize = 21;

// ==============================================================================
// Landmark
// ==============================================================================

/// A single landmark, normalized to the frame dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32, // Normalized [0, 1], grows to the right
    pub y: f32, // Normalized [0, 1], grows downward
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>, // Depth relative to the wrist, when the provider reports it
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z: Some(z) }
    }
}

// ==============================================================================
// Anatomical roles (21 total)
// ==============================================================================

/// Hand landmark roles in the fixed order the provider emits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    pub const ALL: [HandLandmark; HAND_LANDMARK_COUNT] = [
        HandLandmark::Wrist,
        HandLandmark::ThumbCmc,
        HandLandmark::ThumbMcp,
        HandLandmark::ThumbIp,
        HandLandmark::ThumbTip,
        HandLandmark::IndexFingerMcp,
        HandLandmark::IndexFingerPip,
        HandLandmark::IndexFingerDip,
        HandLandmark::IndexFingerTip,
        HandLandmark::MiddleFingerMcp,
        HandLandmark::MiddleFingerPip,
        HandLandmark::MiddleFingerDip,
        HandLandmark::MiddleFingerTip,
        HandLandmark::RingFingerMcp,
        HandLandmark::RingFingerPip,
        HandLandmark::RingFingerDip,
        HandLandmark::RingFingerTip,
        HandLandmark::PinkyMcp,
        HandLandmark::PinkyPip,
        HandLandmark::PinkyDip,
        HandLandmark::PinkyTip,
    ];

    /// Position of this role in a hand's landmark array
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HandLandmark::Wrist => "wrist",
            HandLandmark::ThumbCmc => "thumb_cmc",
            HandLandmark::ThumbMcp => "thumb_mcp",
            HandLandmark::ThumbIp => "thumb_ip",
            HandLandmark::ThumbTip => "thumb_tip",
            HandLandmark::IndexFingerMcp => "index_finger_mcp",
            HandLandmark::IndexFingerPip => "index_finger_pip",
            HandLandmark::IndexFingerDip => "index_finger_dip",
            HandLandmark::IndexFingerTip => "index_finger_tip",
            HandLandmark::MiddleFingerMcp => "middle_finger_mcp",
            HandLandmark::MiddleFingerPip => "middle_finger_pip",
            HandLandmark::MiddleFingerDip => "middle_finger_dip",
            HandLandmark::MiddleFingerTip => "middle_finger_tip",
            HandLandmark::RingFingerMcp => "ring_finger_mcp",
            HandLandmark::RingFingerPip => "ring_finger_pip",
            HandLandmark::RingFingerDip => "ring_finger_dip",
            HandLandmark::RingFingerTip => "ring_finger_tip",
            HandLandmark::PinkyMcp => "pinky_mcp",
            HandLandmark::PinkyPip => "pinky_pip",
            HandLandmark::PinkyDip => "pinky_dip",
            HandLandmark::PinkyTip => "pinky_tip",
        }
    }
}

// ==============================================================================
// Hand
// ==============================================================================

/// One detected hand: exactly 21 landmarks in `HandLandmark` order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hand {
    landmarks: [Landmark; HAND_LANDMARK_COUNT],
}

impl Hand {
    pub fn new(landmarks: [Landmark; HAND_LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Build a hand from a provider slice, rejecting anything that is not 21 points long
    pub fn from_landmarks(landmarks: &[Landmark]) -> GestureResult<Self> {
        let landmarks: [Landmark; HAND_LANDMARK_COUNT] =
            landmarks
                .try_into()
                .map_err(|_| GestureError::InvalidLandmarkCount {
                    expected: HAND_LANDMARK_COUNT,
                    actual: landmarks.len(),
                })?;
        Ok(Self { landmarks })
    }

    pub fn landmark(&self, role: HandLandmark) -> &Landmark {
        &self.landmarks[role.index()]
    }

    pub fn landmarks(&self) -> &[Landmark; HAND_LANDMARK_COUNT] {
        &self.landmarks
    }
}

impl Index<HandLandmark> for Hand {
    type Output = Landmark;

    fn index(&self, role: HandLandmark) -> &Landmark {
        self.landmark(role)
    }
}

impl TryFrom<Vec<Landmark>> for Hand {
    type Error = GestureError;

    fn try_from(landmarks: Vec<Landmark>) -> GestureResult<Self> {
        Self::from_landmarks(&landmarks)
    }
}

// ==============================================================================
// Detected hand (provider output)
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hand reported by the landmark provider for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    pub handedness: Handedness,
    pub confidence: f32, // Detection confidence [0, 1]
    pub hand: Hand,
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    #[error("Invalid hand: expected {expected} landmarks, got {actual}")]
    InvalidLandmarkCount { expected: usize, actual: usize },

    #[error("Landmark provider not initialized")]
    ProviderNotInitialized,

    #[error("Failed to open landmark recording {path:?}: {source}")]
    ReplayOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed replay record on line {line}: {message}")]
    ReplayParse { line: usize, message: String },

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),
}

pub type GestureResult<T> = Result<T, GestureError>;
