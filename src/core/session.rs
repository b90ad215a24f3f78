// Gesture session - the per-frame capture, detect, classify, annotate loop

use std::ops::ControlFlow;
use std::time::Instant;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::core::annotation;
use crate::core::classifier::classify;
use crate::core::config::Config;
use crate::core::statistics::StatisticsRecorder;
use crate::models::gesture::{AnnotatedFrame, GestureStatistics, HandAnnotation};
use crate::models::hand::{GestureError, GestureResult};
use crate::models::frame::RawFrame;
use crate::platform::capture::{CaptureGuard, FrameSource};
use crate::platform::landmarks::LandmarkProvider;

pub struct GestureSession<P: LandmarkProvider> {
    session_id: String,
    config: Config,
    provider: P,
    statistics: StatisticsRecorder,
}

impl<P: LandmarkProvider> GestureSession<P> {
    pub fn new(provider: P, config: Config) -> GestureResult<Self> {
        config.validate()?;

        if !provider.is_initialized() {
            error!(provider = %provider.model_info(), "landmark provider is not ready");
            return Err(GestureError::ProviderNotInitialized);
        }

        let session_id = Uuid::new_v4().to_string();
        info!(
            session_id = %session_id,
            provider = %provider.model_info(),
            "started gesture session"
        );

        Ok(Self {
            statistics: StatisticsRecorder::new(session_id.clone()),
            session_id,
            config,
            provider,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Detect, classify and outline every hand in one frame
    pub fn process_frame(&mut self, mut frame: RawFrame) -> GestureResult<AnnotatedFrame> {
        let start_time = Instant::now();
        frame.validate()?;

        if self.config.mirror_frames {
            annotation::mirror_frame(&mut frame)?;
        }

        let poses = self.provider.process_frame(&frame)?;

        let hands: Vec<HandAnnotation> = poses
            .iter()
            .map(|pose| HandAnnotation {
                handedness: pose.handedness,
                label: classify(&pose.hand),
                bounding_box: annotation::bounding_box(&pose.hand, frame.width, frame.height),
            })
            .collect();

        annotation::draw_annotations(
            &mut frame,
            &hands,
            self.config.box_color,
            self.config.box_thickness,
        )?;

        let annotated = AnnotatedFrame {
            timestamp: frame.timestamp,
            frame,
            hands,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };
        self.statistics.record(&annotated);

        debug!(
            timestamp = annotated.timestamp,
            hands = annotated.hands.len(),
            headline = annotated.headline(),
            "processed frame"
        );
        Ok(annotated)
    }

    /// Text lines for the overlay of an annotated frame
    pub fn overlay_lines(&self, frame: &AnnotatedFrame) -> Vec<String> {
        annotation::overlay_lines(frame.headline(), self.config.show_instructions)
    }

    /// Process frames from `source` until it ends, fails, or `on_frame` breaks.
    /// The source is released on every exit path.
    pub fn run<S, F>(&mut self, source: &mut S, mut on_frame: F) -> GestureResult<GestureStatistics>
    where
        S: FrameSource,
        F: FnMut(&AnnotatedFrame) -> ControlFlow<()>,
    {
        let mut capture = CaptureGuard::acquire(source)?;

        loop {
            let frame = match capture.read_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    info!(session_id = %self.session_id, "frame stream ended");
                    break;
                }
                Err(e) => {
                    error!(session_id = %self.session_id, error = %e, "could not read frame");
                    return Err(e.into());
                }
            };

            let annotated = match self.process_frame(frame) {
                Ok(annotated) => annotated,
                Err(e) => {
                    error!(session_id = %self.session_id, error = %e, "could not process frame");
                    return Err(e);
                }
            };
            if on_frame(&annotated).is_break() {
                info!(session_id = %self.session_id, "quit requested");
                break;
            }
        }

        Ok(self.statistics())
    }

    pub fn statistics(&self) -> GestureStatistics {
        self.statistics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::{CaptureError, CaptureResult};
    use crate::models::gesture::{GestureLabel, NO_HAND_TEXT};
    use crate::models::hand::{HandLandmark, Landmark, HAND_LANDMARK_COUNT};
    use crate::platform::capture::BlankFrameSource;
    use crate::platform::landmarks::{DummyProvider, ReplayProvider};
    use std::io::Cursor;

    const GREEN: [u8; 4] = [0, 255, 0, 255];

    fn thumbs_up_landmarks() -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::new(0.5, 0.5); HAND_LANDMARK_COUNT];
        landmarks[HandLandmark::ThumbTip.index()] = Landmark::new(0.3, 0.2);
        landmarks[HandLandmark::ThumbMcp.index()] = Landmark::new(0.35, 0.4);
        for (tip, base) in [
            (HandLandmark::IndexFingerTip, HandLandmark::IndexFingerMcp),
            (HandLandmark::MiddleFingerTip, HandLandmark::MiddleFingerMcp),
            (HandLandmark::RingFingerTip, HandLandmark::RingFingerMcp),
            (HandLandmark::PinkyTip, HandLandmark::PinkyMcp),
        ] {
            landmarks[tip.index()] = Landmark::new(0.5, 0.6);
            landmarks[base.index()] = Landmark::new(0.5, 0.45);
        }
        landmarks
    }

    fn recording(frames: &[Vec<Vec<Landmark>>]) -> String {
        frames
            .iter()
            .map(|hands| {
                let hands: Vec<serde_json::Value> = hands
                    .iter()
                    .map(|landmarks| serde_json::json!({ "landmarks": landmarks }))
                    .collect();
                serde_json::json!({ "hands": hands }).to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session(frames: &[Vec<Vec<Landmark>>], config: Config) -> GestureSession<ReplayProvider> {
        let provider =
            ReplayProvider::from_reader(Cursor::new(recording(frames)), &config).unwrap();
        GestureSession::new(provider, config).unwrap()
    }

    fn pixel(frame: &RawFrame, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * frame.width + x) * 4) as usize;
        [frame.data[i], frame.data[i + 1], frame.data[i + 2], frame.data[i + 3]]
    }

    /// Yields `good_frames` frames, then fails every read or, with `corrupt`,
    /// returns frames whose buffer is too short
    struct FailingSource {
        good_frames: usize,
        corrupt: bool,
        open: bool,
        releases: usize,
    }

    impl FrameSource for FailingSource {
        fn open(&mut self) -> CaptureResult<()> {
            self.open = true;
            Ok(())
        }

        fn read_frame(&mut self) -> CaptureResult<Option<RawFrame>> {
            if self.good_frames == 0 {
                if self.corrupt {
                    let mut frame = RawFrame::blank(10, 10, 0);
                    frame.data.truncate(5);
                    return Ok(Some(frame));
                }
                return Err(CaptureError::ReadFailed("camera unplugged".to_string()));
            }
            self.good_frames -= 1;
            Ok(Some(RawFrame::blank(10, 10, 0)))
        }

        fn release(&mut self) {
            self.open = false;
            self.releases += 1;
        }

        fn is_open(&self) -> bool {
            self.open
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn test_frame_without_hands() {
        let mut session = session(&[vec![]], Config::default());
        let annotated = session.process_frame(RawFrame::blank(10, 10, 7)).unwrap();

        assert_eq!(annotated.timestamp, 7);
        assert!(annotated.hands.is_empty());
        assert_eq!(annotated.headline(), NO_HAND_TEXT);
        assert_eq!(
            session.overlay_lines(&annotated)[0],
            format!("Gesture: {}", NO_HAND_TEXT)
        );
    }

    #[test]
    fn test_frame_with_thumbs_up() {
        let mut session = session(&[vec![thumbs_up_landmarks()]], Config::default());
        let annotated = session.process_frame(RawFrame::blank(100, 100, 0)).unwrap();

        assert_eq!(annotated.hands.len(), 1);
        assert_eq!(annotated.hands[0].label, GestureLabel::ThumbsUp);
        assert_eq!(annotated.headline(), "Thumbs Up");

        let rect = annotated.hands[0].bounding_box.to_pixel_rect();
        assert_eq!((rect.x_min, rect.y_min, rect.x_max, rect.y_max), (30, 20, 50, 60));
        assert_eq!(pixel(&annotated.frame, 30, 20), GREEN);
        assert_eq!(pixel(&annotated.frame, 50, 60), GREEN);
        assert_eq!(pixel(&annotated.frame, 40, 40), [0, 0, 0, 255]);
    }

    #[test]
    fn test_mirroring_follows_config() {
        let mut marked = RawFrame::blank(4, 1, 0);
        marked.data[0..4].copy_from_slice(&[255, 0, 0, 255]);

        let mut mirrored = session(&[vec![]], Config::default());
        let annotated = mirrored.process_frame(marked.clone()).unwrap();
        assert_eq!(pixel(&annotated.frame, 3, 0), [255, 0, 0, 255]);

        let config = Config {
            mirror_frames: false,
            ..Config::default()
        };
        let mut plain = session(&[vec![]], config);
        let annotated = plain.process_frame(marked).unwrap();
        assert_eq!(pixel(&annotated.frame, 0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_invalid_frame_is_rejected() {
        let mut session = session(&[vec![]], Config::default());
        let mut frame = RawFrame::blank(10, 10, 0);
        frame.data.truncate(5);
        assert!(matches!(
            session.process_frame(frame),
            Err(GestureError::Capture(CaptureError::InvalidFrame(_)))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = Config {
            max_num_hands: 0,
            ..Config::default()
        };
        let result = GestureSession::new(DummyProvider::new(&Config::default()), config);
        assert!(matches!(result, Err(GestureError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_until_stream_ends() {
        let mut session = session(
            &[vec![thumbs_up_landmarks()], vec![], vec![thumbs_up_landmarks()]],
            Config::default(),
        );
        let mut source = BlankFrameSource::new(64, 48, 3);
        let mut headlines = Vec::new();

        let stats = session
            .run(&mut source, |frame| {
                headlines.push(frame.headline());
                ControlFlow::Continue(())
            })
            .unwrap();

        assert_eq!(headlines, vec!["Thumbs Up", NO_HAND_TEXT, "Thumbs Up"]);
        assert_eq!(stats.total_frames, 3);
        assert_eq!(stats.frames_with_hands, 2);
        assert_eq!(stats.dominant_gesture, Some(GestureLabel::ThumbsUp));
        assert_eq!(stats.session_id, session.session_id());
        assert!(session.provider().is_exhausted());
        assert_eq!(source.release_count(), 1);
        assert!(!source.is_open());
    }

    #[test]
    fn test_run_stops_on_quit() {
        let mut session = session(&[vec![], vec![], vec![]], Config::default());
        let mut source = BlankFrameSource::new(8, 8, 3);

        let stats = session
            .run(&mut source, |_| ControlFlow::Break(()))
            .unwrap();

        assert_eq!(stats.total_frames, 1);
        assert_eq!(source.release_count(), 1);
    }

    #[test]
    fn test_run_releases_source_on_read_failure() {
        let mut session = session(&[vec![], vec![], vec![]], Config::default());
        let mut source = FailingSource {
            good_frames: 2,
            corrupt: false,
            open: false,
            releases: 0,
        };

        let result = session.run(&mut source, |_| ControlFlow::Continue(()));

        assert!(matches!(
            result,
            Err(GestureError::Capture(CaptureError::ReadFailed(_)))
        ));
        assert_eq!(session.statistics().total_frames, 2);
        assert_eq!(source.releases, 1);
        assert!(!source.open);
    }

    #[test]
    fn test_provider_not_ready_is_rejected() {
        let result = GestureSession::new(DummyProvider::new(&Config::default()), Config::default());
        assert!(matches!(result, Err(GestureError::ProviderNotInitialized)));
    }

    #[test]
    fn test_run_stops_on_processing_failure() {
        let mut session = session(&[vec![], vec![], vec![]], Config::default());
        let mut source = FailingSource {
            good_frames: 1,
            corrupt: true,
            open: false,
            releases: 0,
        };

        let result = session.run(&mut source, |_| ControlFlow::Continue(()));

        assert!(matches!(
            result,
            Err(GestureError::Capture(CaptureError::InvalidFrame(_)))
        ));
        assert_eq!(session.statistics().total_frames, 1);
        assert_eq!(source.releases, 1);
        assert!(!source.open);
    }
}
