// Walk the gesture classifier through one pose per label

use gesture_lib::core::annotation::bounding_box;
use gesture_lib::{classify, GestureLabel, Hand, HandLandmark, Landmark};

fn pose(thumb: (f32, f32), thumb_x: (f32, f32), extended: [bool; 4]) -> Hand {
    let mut landmarks = [Landmark::new(0.5, 0.5); 21];
    landmarks[HandLandmark::Wrist.index()] = Landmark::new(0.5, 0.8);
    landmarks[HandLandmark::ThumbTip.index()] = Landmark::new(thumb_x.0, thumb.0);
    landmarks[HandLandmark::ThumbMcp.index()] = Landmark::new(thumb_x.1, thumb.1);

    let fingers = [
        (HandLandmark::IndexFingerTip, HandLandmark::IndexFingerMcp, 0.42),
        (HandLandmark::MiddleFingerTip, HandLandmark::MiddleFingerMcp, 0.48),
        (HandLandmark::RingFingerTip, HandLandmark::RingFingerMcp, 0.54),
        (HandLandmark::PinkyTip, HandLandmark::PinkyMcp, 0.60),
    ];
    for ((tip, base, x), up) in fingers.into_iter().zip(extended) {
        landmarks[base.index()] = Landmark::new(x, 0.55);
        landmarks[tip.index()] = Landmark::new(x, if up { 0.35 } else { 0.70 });
    }

    Hand::new(landmarks)
}

fn main() {
    println!("=== Gesture Classifier Test ===\n");

    let cases = [
        ("Thumb raised, fist closed", pose((0.30, 0.50), (0.35, 0.40), [false; 4]), GestureLabel::ThumbsUp),
        ("Index and middle raised", pose((0.60, 0.50), (0.38, 0.30), [true, true, false, false]), GestureLabel::PeaceSign),
        ("Open hand", pose((0.40, 0.50), (0.32, 0.38), [true; 4]), GestureLabel::HelloWave),
        ("Closed fist", pose((0.70, 0.50), (0.45, 0.40), [false; 4]), GestureLabel::NoGesture),
    ];

    let mut failures = 0;
    for (name, hand, expected) in cases {
        let label = classify(&hand);
        let bbox = bounding_box(&hand, 640, 480);

        if label == expected {
            println!("✓ {}: {}", name, label);
        } else {
            println!("✗ {}: expected {}, got {}", name, expected, label);
            failures += 1;
        }
        println!(
            "    Extent: ({:.0}, {:.0}) - ({:.0}, {:.0})",
            bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max
        );
    }

    println!("\n=== Test Complete ({} failures) ===", failures);
}
