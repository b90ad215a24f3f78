// Per-session gesture statistics

use std::collections::BTreeMap;

use crate::models::gesture::{AnnotatedFrame, GestureLabel, GestureStatistics};

/// Accumulates counts over the frames of one session
#[derive(Debug, Clone)]
pub struct StatisticsRecorder {
    session_id: String,
    total_frames: u64,
    frames_with_hands: u64,
    label_counts: [u64; 4],
    total_processing_time_ms: u64,
}

impl StatisticsRecorder {
    pub fn new(session_id: String) -> Self {
        Self {
            session_id,
            total_frames: 0,
            frames_with_hands: 0,
            label_counts: [0; 4],
            total_processing_time_ms: 0,
        }
    }

    pub fn record(&mut self, frame: &AnnotatedFrame) {
        self.total_frames += 1;
        self.total_processing_time_ms += frame.processing_time_ms;

        if frame.has_hands() {
            self.frames_with_hands += 1;
        }

        for hand in &frame.hands {
            self.label_counts[Self::slot(hand.label)] += 1;
        }
    }

    pub fn count(&self, label: GestureLabel) -> u64 {
        self.label_counts[Self::slot(label)]
    }

    /// Most frequent real gesture; ties go to the higher-priority rule
    pub fn dominant_gesture(&self) -> Option<GestureLabel> {
        let mut dominant: Option<(GestureLabel, u64)> = None;

        for label in GestureLabel::ALL {
            if label == GestureLabel::NoGesture {
                continue;
            }
            let count = self.count(label);
            if count > dominant.map_or(0, |(_, best)| best) {
                dominant = Some((label, count));
            }
        }

        dominant.map(|(label, _)| label)
    }

    pub fn snapshot(&self) -> GestureStatistics {
        let label_counts: BTreeMap<String, u64> = GestureLabel::ALL
            .iter()
            .map(|label| (label.as_str().to_string(), self.count(*label)))
            .collect();

        let average_processing_time_ms = if self.total_frames == 0 {
            0.0
        } else {
            self.total_processing_time_ms as f32 / self.total_frames as f32
        };

        GestureStatistics {
            session_id: self.session_id.clone(),
            total_frames: self.total_frames,
            frames_with_hands: self.frames_with_hands,
            label_counts,
            average_processing_time_ms,
            dominant_gesture: self.dominant_gesture(),
        }
    }

    fn slot(label: GestureLabel) -> usize {
        match label {
            GestureLabel::ThumbsUp => 0,
            GestureLabel::PeaceSign => 1,
            GestureLabel::HelloWave => 2,
            GestureLabel::NoGesture => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::{BoundingBox, RawFrame};
    use crate::models::gesture::HandAnnotation;
    use crate::models::hand::Handedness;

    fn frame(labels: &[GestureLabel], processing_time_ms: u64) -> AnnotatedFrame {
        AnnotatedFrame {
            timestamp: 0,
            frame: RawFrame::blank(1, 1, 0),
            hands: labels
                .iter()
                .map(|label| HandAnnotation {
                    handedness: Handedness::Right,
                    label: *label,
                    bounding_box: BoundingBox {
                        x_min: 0.0,
                        y_min: 0.0,
                        x_max: 1.0,
                        y_max: 1.0,
                    },
                })
                .collect(),
            processing_time_ms,
        }
    }

    #[test]
    fn test_empty_session() {
        let recorder = StatisticsRecorder::new("s".to_string());
        let stats = recorder.snapshot();
        assert_eq!(stats.total_frames, 0);
        assert_eq!(stats.average_processing_time_ms, 0.0);
        assert_eq!(stats.dominant_gesture, None);
        assert_eq!(stats.label_counts.len(), 4);
    }

    #[test]
    fn test_counts_and_average() {
        let mut recorder = StatisticsRecorder::new("s".to_string());
        recorder.record(&frame(&[GestureLabel::HelloWave], 4));
        recorder.record(&frame(&[], 2));
        recorder.record(&frame(&[GestureLabel::HelloWave, GestureLabel::NoGesture], 6));

        let stats = recorder.snapshot();
        assert_eq!(stats.session_id, "s");
        assert_eq!(stats.total_frames, 3);
        assert_eq!(stats.frames_with_hands, 2);
        assert_eq!(stats.label_counts["hello_wave"], 2);
        assert_eq!(stats.label_counts["no_gesture"], 1);
        assert_eq!(stats.label_counts["thumbs_up"], 0);
        assert_eq!(stats.average_processing_time_ms, 4.0);
        assert_eq!(stats.dominant_gesture, Some(GestureLabel::HelloWave));
    }

    #[test]
    fn test_no_gesture_never_dominates() {
        let mut recorder = StatisticsRecorder::new("s".to_string());
        for _ in 0..5 {
            recorder.record(&frame(&[GestureLabel::NoGesture], 0));
        }
        assert_eq!(recorder.dominant_gesture(), None);

        recorder.record(&frame(&[GestureLabel::PeaceSign], 0));
        assert_eq!(recorder.dominant_gesture(), Some(GestureLabel::PeaceSign));
    }

    #[test]
    fn test_dominant_tie_prefers_rule_priority() {
        let mut recorder = StatisticsRecorder::new("s".to_string());
        recorder.record(&frame(&[GestureLabel::HelloWave], 0));
        recorder.record(&frame(&[GestureLabel::PeaceSign], 0));
        assert_eq!(recorder.dominant_gesture(), Some(GestureLabel::PeaceSign));

        recorder.record(&frame(&[GestureLabel::ThumbsUp], 0));
        assert_eq!(recorder.dominant_gesture(), Some(GestureLabel::ThumbsUp));
    }
}
