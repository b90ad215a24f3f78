// Frame annotation - hand extents, overlay drawing, and overlay text

use image::{imageops, Rgba, RgbaImage};

use crate::models::frame::{BoundingBox, CaptureError, CaptureResult, PixelFormat, PixelRect, RawFrame};
use crate::models::gesture::HandAnnotation;
use crate::models::hand::Hand;

/// Instruction lines shown under the gesture headline
pub const INSTRUCTIONS: [&str; 4] = [
    "Show one of these gestures:",
    "- Open hand (Wave)",
    "- Peace sign",
    "- Thumbs up",
];

pub const VISIBILITY_HINT: &str = "Make sure your entire hand is visible";
pub const QUIT_HINT: &str = "Press 'Q' to quit";

/// Extent of all 21 landmarks scaled to frame pixels
pub fn bounding_box(hand: &Hand, width: u32, height: u32) -> BoundingBox {
    let (w, h) = (width as f32, height as f32);

    let mut bbox = BoundingBox {
        x_min: f32::INFINITY,
        y_min: f32::INFINITY,
        x_max: f32::NEG_INFINITY,
        y_max: f32::NEG_INFINITY,
    };

    for landmark in hand.landmarks() {
        let (x, y) = (landmark.x * w, landmark.y * h);
        bbox.x_min = bbox.x_min.min(x);
        bbox.y_min = bbox.y_min.min(y);
        bbox.x_max = bbox.x_max.max(x);
        bbox.y_max = bbox.y_max.max(y);
    }

    bbox
}

/// Text lines drawn over the frame, top to bottom
pub fn overlay_lines(headline: &str, show_instructions: bool) -> Vec<String> {
    let mut lines = vec![format!("Gesture: {}", headline), VISIBILITY_HINT.to_string()];
    if show_instructions {
        lines.extend(INSTRUCTIONS.iter().map(|line| line.to_string()));
    }
    lines.push(QUIT_HINT.to_string());
    lines
}

/// Flip the frame left-to-right so it reads like a mirror
pub fn mirror_frame(frame: &mut RawFrame) -> CaptureResult<()> {
    with_image(frame, |image| imageops::flip_horizontal_in_place(image))
}

/// Outline every annotated hand on the frame
pub fn draw_annotations(
    frame: &mut RawFrame,
    hands: &[HandAnnotation],
    color: [u8; 4],
    thickness: u32,
) -> CaptureResult<()> {
    if hands.is_empty() {
        return Ok(());
    }

    let color = match frame.format {
        PixelFormat::RGBA8 => Rgba(color),
        PixelFormat::BGRA8 => Rgba([color[2], color[1], color[0], color[3]]),
    };

    with_image(frame, |image| {
        for hand in hands {
            draw_bounding_box(image, &hand.bounding_box.to_pixel_rect(), color, thickness);
        }
    })
}

/// Draw a rectangle outline, clipped to the image
pub fn draw_bounding_box(image: &mut RgbaImage, rect: &PixelRect, color: Rgba<u8>, thickness: u32) {
    let (width, height) = (image.width() as i64, image.height() as i64);
    if width == 0 || height == 0 {
        return;
    }

    let x_min = rect.x_min as i64;
    let x_max = rect.x_max as i64;
    let y_min = rect.y_min as i64;
    let y_max = rect.y_max as i64;
    let span_x = x_min.max(0)..=x_max.min(width - 1);
    let span_y = y_min.max(0)..=y_max.min(height - 1);

    let mut put = |x: i64, y: i64| {
        if (0..width).contains(&x) && (0..height).contains(&y) {
            image.put_pixel(x as u32, y as u32, color);
        }
    };

    for offset in 0..thickness.max(1) as i64 {
        for x in span_x.clone() {
            put(x, y_min + offset);
            put(x, y_max - offset);
        }
        for y in span_y.clone() {
            put(x_min + offset, y);
            put(x_max - offset, y);
        }
    }
}

/// Run `f` over the frame's pixels as an RGBA image buffer
fn with_image<F>(frame: &mut RawFrame, f: F) -> CaptureResult<()>
where
    F: FnOnce(&mut RgbaImage),
{
    frame.validate()?;

    let data = std::mem::take(&mut frame.data);
    let mut image = RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| CaptureError::InvalidFrame("buffer does not fit frame size".to_string()))?;

    f(&mut image);
    frame.data = image.into_raw();
    Ok(())
}
