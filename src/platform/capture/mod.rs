// Video capture abstraction
// A frame source is opened once, read until it ends or fails, then released once

use tracing::{info, warn};

use crate::models::frame::{CaptureError, CaptureResult, RawFrame};

/// A camera or other stream of frames
pub trait FrameSource {
    /// Acquire the underlying device
    fn open(&mut self) -> CaptureResult<()>;

    /// Next frame, or `None` once the stream has ended
    fn read_frame(&mut self) -> CaptureResult<Option<RawFrame>>;

    /// Release the underlying device
    fn release(&mut self);

    fn is_open(&self) -> bool;

    fn describe(&self) -> String;
}

/// Keeps a source open for its lifetime and releases it on drop
pub struct CaptureGuard<'a, S: FrameSource> {
    source: &'a mut S,
}

impl<'a, S: FrameSource> CaptureGuard<'a, S> {
    pub fn acquire(source: &'a mut S) -> CaptureResult<Self> {
        source.open()?;
        info!(source = %source.describe(), "capture opened");
        Ok(Self { source })
    }

    pub fn read_frame(&mut self) -> CaptureResult<Option<RawFrame>> {
        self.source.read_frame()
    }
}

impl<S: FrameSource> Drop for CaptureGuard<'_, S> {
    fn drop(&mut self) {
        if self.source.is_open() {
            self.source.release();
            info!(source = %self.source.describe(), "capture released");
        } else {
            warn!(source = %self.source.describe(), "capture already released");
        }
    }
}

// ==============================================================================
// Blank source (synthetic frames)
// ==============================================================================

/// Yields a fixed number of black frames, for replaying recorded landmarks
/// in place of the configured camera
pub struct BlankFrameSource {
    device_index: u32,
    width: u32,
    height: u32,
    remaining: usize,
    open: bool,
    release_count: usize,
}

impl BlankFrameSource {
    pub fn new(width: u32, height: u32, frame_count: usize) -> Self {
        Self {
            device_index: 0,
            width,
            height,
            remaining: frame_count,
            open: false,
            release_count: 0,
        }
    }

    /// Camera slot this source stands in for
    pub fn with_device_index(mut self, device_index: u32) -> Self {
        self.device_index = device_index;
        self
    }

    pub fn device_index(&self) -> u32 {
        self.device_index
    }

    /// How many times the source has been released
    pub fn release_count(&self) -> usize {
        self.release_count
    }
}

impl FrameSource for BlankFrameSource {
    fn open(&mut self) -> CaptureResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::DeviceUnavailable(format!(
                "cannot produce {}x{} frames",
                self.width, self.height
            )));
        }
        self.open = true;
        Ok(())
    }

    fn read_frame(&mut self) -> CaptureResult<Option<RawFrame>> {
        if !self.open {
            return Err(CaptureError::NotOpen);
        }
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let timestamp = chrono::Utc::now().timestamp_millis();
        Ok(Some(RawFrame::blank(self.width, self.height, timestamp)))
    }

    fn release(&mut self) {
        self.open = false;
        self.release_count += 1;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn describe(&self) -> String {
        format!(
            "blank {}x{} (camera {})",
            self.width, self.height, self.device_index
        )
    }
}
