// Landmark provider bridge
// Abstracts the hand pose estimator that turns frames into 21-point hands

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::core::config::Config;
use crate::models::frame::RawFrame;
use crate::models::hand::{GestureError, GestureResult, Hand, HandPose, Handedness, Landmark};

/// Landmark provider trait
/// Implement this for each hand pose estimation backend
pub trait LandmarkProvider {
    /// Detect hands in a frame; an empty result means no hand is visible
    fn process_frame(&mut self, frame: &RawFrame) -> GestureResult<Vec<HandPose>>;

    /// Check if the backend is ready to produce landmarks
    fn is_initialized(&self) -> bool;

    /// Get backend info
    fn model_info(&self) -> String;
}

/// Hand filtering shared by all backends
///
/// A hand seen in the previous frame only has to clear the tracking threshold;
/// a newly appearing hand has to clear the detection threshold.
#[derive(Debug, Clone, Copy)]
struct DetectionLimits {
    max_num_hands: usize,
    min_detection_confidence: f32,
    min_tracking_confidence: f32,
}

impl DetectionLimits {
    fn from_config(config: &Config) -> Self {
        Self {
            max_num_hands: config.max_num_hands,
            min_detection_confidence: config.min_detection_confidence,
            min_tracking_confidence: config.min_tracking_confidence,
        }
    }

    fn apply(&self, hands: Vec<HandPose>, tracking: bool) -> Vec<HandPose> {
        let threshold = if tracking {
            self.min_tracking_confidence
        } else {
            self.min_detection_confidence
        };

        hands
            .into_iter()
            .filter(|pose| pose.confidence >= threshold)
            .take(self.max_num_hands)
            .collect()
    }
}

// ==============================================================================
// Replay Implementation (recorded landmarks)
// ==============================================================================

/// One line of a landmark recording
#[derive(Debug, Deserialize)]
struct RecordedFrame {
    #[serde(default)]
    hands: Vec<RecordedHand>,
}

#[derive(Debug, Deserialize)]
struct RecordedHand {
    #[serde(default)]
    handedness: Handedness,
    #[serde(default = "full_confidence")]
    confidence: f32,
    landmarks: Vec<Landmark>,
}

fn full_confidence() -> f32 {
    1.0
}

/// Replays hands from a JSON Lines recording, one recorded frame per call
pub struct ReplayProvider {
    frames: Vec<Vec<HandPose>>,
    cursor: usize,
    limits: DetectionLimits,
    tracking: bool,
}

impl ReplayProvider {
    pub fn open(path: &Path, config: &Config) -> GestureResult<Self> {
        let file = File::open(path).map_err(|source| GestureError::ReplayOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let provider = Self::from_reader(BufReader::new(file), config)?;

        info!(path = %path.display(), frames = provider.len(), "loaded landmark recording");
        Ok(provider)
    }

    /// Parse every recorded frame up front; blank lines are skipped
    pub fn from_reader<R: BufRead>(reader: R, config: &Config) -> GestureResult<Self> {
        let mut frames = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| GestureError::ReplayParse {
                line: line_number,
                message: e.to_string(),
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let recorded: RecordedFrame =
                serde_json::from_str(&line).map_err(|e| GestureError::ReplayParse {
                    line: line_number,
                    message: e.to_string(),
                })?;

            let hands = recorded
                .hands
                .into_iter()
                .map(|hand| -> GestureResult<HandPose> {
                    Ok(HandPose {
                        handedness: hand.handedness,
                        confidence: hand.confidence,
                        hand: Hand::try_from(hand.landmarks)?,
                    })
                })
                .collect::<GestureResult<Vec<_>>>()?;

            frames.push(hands);
        }

        Ok(Self {
            frames,
            cursor: 0,
            limits: DetectionLimits::from_config(config),
            tracking: false,
        })
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

impl LandmarkProvider for ReplayProvider {
    fn process_frame(&mut self, frame: &RawFrame) -> GestureResult<Vec<HandPose>> {
        let Some(hands) = self.frames.get(self.cursor) else {
            return Ok(vec![]);
        };
        self.cursor += 1;

        let hands = self.limits.apply(hands.clone(), self.tracking);
        self.tracking = !hands.is_empty();
        debug!(
            frame = self.cursor,
            tracking = self.tracking,
            timestamp = frame.timestamp,
            hands = hands.len(),
            "replayed landmarks"
        );
        Ok(hands)
    }

    fn is_initialized(&self) -> bool {
        true
    }

    fn model_info(&self) -> String {
        format!(
            "Landmark replay ({} frames, max {} hands, detection {:.2}, tracking {:.2})",
            self.frames.len(),
            self.limits.max_num_hands,
            self.limits.min_detection_confidence,
            self.limits.min_tracking_confidence
        )
    }
}

// ==============================================================================
// Dummy Implementation (no estimator available)
// ==============================================================================

pub struct DummyProvider;

impl DummyProvider {
    pub fn new(_config: &Config) -> Self {
        info!("Using dummy landmark provider (no hand detection)");
        Self
    }
}

impl LandmarkProvider for DummyProvider {
    fn process_frame(&mut self, _frame: &RawFrame) -> GestureResult<Vec<HandPose>> {
        Ok(vec![])
    }

    fn is_initialized(&self) -> bool {
        false
    }

    fn model_info(&self) -> String {
        "Dummy landmark provider (no hand detection)".to_string()
    }
}
