// Replay the bundled landmark recording through a full gesture session

use gesture_lib::core::session::GestureSession;
use gesture_lib::platform::capture::BlankFrameSource;
use gesture_lib::platform::landmarks::{LandmarkProvider, ReplayProvider};
use gesture_lib::Config;
use std::ops::ControlFlow;
use std::path::Path;

fn main() {
    println!("=== Gesture Replay Test ===\n");

    let recording = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("sample_landmarks.jsonl");

    let config = Config::default();

    println!("Test 1: Loading recording {}...", recording.display());
    let provider = match ReplayProvider::open(&recording, &config) {
        Ok(provider) => {
            println!("✓ {}", provider.model_info());
            provider
        }
        Err(e) => {
            println!("✗ Failed to load recording: {}", e);
            return;
        }
    };

    println!("\nTest 2: Running session...");
    let mut source =
        BlankFrameSource::new(640, 480, provider.len()).with_device_index(config.camera_index);
    println!("✓ Standing in for camera {}", source.device_index());
    let mut session = match GestureSession::new(provider, config) {
        Ok(session) => session,
        Err(e) => {
            println!("✗ Failed to start session: {}", e);
            return;
        }
    };

    let result = session.run(&mut source, |frame| {
        println!("    {}", frame.headline());
        for hand in &frame.hands {
            let rect = hand.bounding_box.to_pixel_rect();
            println!(
                "      {} hand at ({}, {}) - ({}, {})",
                hand.handedness, rect.x_min, rect.y_min, rect.x_max, rect.y_max
            );
        }
        ControlFlow::Continue(())
    });

    match result {
        Ok(stats) => {
            println!("✓ Processed {} frames ({} with hands)", stats.total_frames, stats.frames_with_hands);
            println!("    Dominant gesture: {:?}", stats.dominant_gesture);
            println!("    Capture released: {}", source.release_count() == 1);
        }
        Err(e) => println!("✗ Session failed: {}", e),
    }

    println!("\n=== Test Complete ===");
}
