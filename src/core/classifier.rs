// Rule-based gesture classification over a single hand's landmarks
//
// Image coordinates: y grows downward, so a digit is extended when its tip
// sits strictly above its base joint.

use tracing::debug;

use crate::models::gesture::GestureLabel;
use crate::models::hand::{Hand, HandLandmark};

/// A digit described by its tip and the base joint the tip is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digit {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Digit {
    /// The four digits counted by the wave rule
    pub const FINGERS: [Digit; 4] = [Digit::Index, Digit::Middle, Digit::Ring, Digit::Pinky];

    pub fn tip(self) -> HandLandmark {
        match self {
            Digit::Thumb => HandLandmark::ThumbTip,
            Digit::Index => HandLandmark::IndexFingerTip,
            Digit::Middle => HandLandmark::MiddleFingerTip,
            Digit::Ring => HandLandmark::RingFingerTip,
            Digit::Pinky => HandLandmark::PinkyTip,
        }
    }

    pub fn base(self) -> HandLandmark {
        match self {
            Digit::Thumb => HandLandmark::ThumbMcp,
            Digit::Index => HandLandmark::IndexFingerMcp,
            Digit::Middle => HandLandmark::MiddleFingerMcp,
            Digit::Ring => HandLandmark::RingFingerMcp,
            Digit::Pinky => HandLandmark::PinkyMcp,
        }
    }
}

/// Tip strictly above its base joint
pub fn is_extended(hand: &Hand, digit: Digit) -> bool {
    hand[digit.tip()].y < hand[digit.base()].y
}

/// Tip strictly below its base joint. A tip level with its base is neither.
pub fn is_curled(hand: &Hand, digit: Digit) -> bool {
    hand[digit.tip()].y > hand[digit.base()].y
}

/// How many of index, middle, ring and pinky are extended
pub fn extended_finger_count(hand: &Hand) -> usize {
    Digit::FINGERS
        .iter()
        .filter(|digit| is_extended(hand, **digit))
        .count()
}

fn is_thumbs_up(hand: &Hand) -> bool {
    is_extended(hand, Digit::Thumb)
        && Digit::FINGERS.iter().all(|digit| is_curled(hand, *digit))
}

fn is_peace_sign(hand: &Hand) -> bool {
    // Thumb pushed out sideways separates the sign from a fist with the thumb tucked
    let thumb_out = hand[HandLandmark::ThumbTip].x > hand[HandLandmark::ThumbMcp].x;

    is_extended(hand, Digit::Index)
        && is_extended(hand, Digit::Middle)
        && is_curled(hand, Digit::Ring)
        && is_curled(hand, Digit::Pinky)
        && thumb_out
}

fn is_hello_wave(hand: &Hand) -> bool {
    extended_finger_count(hand) >= 3
}

type Rule = fn(&Hand) -> bool;

/// Evaluated top to bottom; the first matching rule decides the label
const RULES: [(GestureLabel, Rule); 3] = [
    (GestureLabel::ThumbsUp, is_thumbs_up),
    (GestureLabel::PeaceSign, is_peace_sign),
    (GestureLabel::HelloWave, is_hello_wave),
];

/// Classify one hand. Total over every 21-landmark hand.
pub fn classify(hand: &Hand) -> GestureLabel {
    let label = RULES
        .iter()
        .find(|(_, rule)| rule(hand))
        .map(|(label, _)| *label)
        .unwrap_or(GestureLabel::NoGesture);

    debug!(
        gesture = label.as_str(),
        extended = extended_finger_count(hand),
        "classified hand"
    );
    label
}
