// Data structures for captured video frames and the geometry drawn onto them

use serde::{Deserialize, Serialize};

/// A captured video frame
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub timestamp: i64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

/// Pixel format of captured frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGBA8,
    BGRA8,
}

impl RawFrame {
    /// Opaque black frame of the given size
    pub fn blank(width: u32, height: u32, timestamp: i64) -> Self {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        for alpha in data.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }

        Self {
            timestamp,
            width,
            height,
            data,
            format: PixelFormat::RGBA8,
        }
    }

    /// Check that the buffer holds exactly `width * height` four-byte pixels
    pub fn validate(&self) -> CaptureResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::InvalidFrame(format!(
                "empty frame {}x{}",
                self.width, self.height
            )));
        }

        let expected = self.width as usize * self.height as usize * 4;
        if self.data.len() != expected {
            return Err(CaptureError::InvalidFrame(format!(
                "expected {} bytes for {}x{}, got {}",
                expected,
                self.width,
                self.height,
                self.data.len()
            )));
        }

        Ok(())
    }
}

/// Axis-aligned extent of a hand in frame pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    /// Integer rectangle for drawing; coordinates are truncated toward zero
    pub fn to_pixel_rect(&self) -> PixelRect {
        PixelRect {
            x_min: self.x_min as i32,
            y_min: self.y_min as i32,
            x_max: self.x_max as i32,
            y_max: self.y_max as i32,
        }
    }
}

/// Rectangle corners in whole pixels, may extend past the frame edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

/// Error types for frame capture operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Could not read frame: {0}")]
    ReadFailed(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Capture source is not open")]
    NotOpen,
}

pub type CaptureResult<T> = Result<T, CaptureError>;
