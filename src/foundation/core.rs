use crate::foundation::error::{TvgError, TvgResult};

/// Frame changes smaller than this are treated as no change.
pub const FRAME_EPSILON: f32 = 1e-6;

/// Largest accepted canvas edge, in pixels.
pub const MAX_CANVAS_DIM: u32 = 16_384;

/// Wrap a playback position into `[0, total_frames)` with floor-modulo semantics.
///
/// Negative positions wrap from the end, so reverse playback works with plain subtraction.
/// `total_frames` must be positive.
pub fn wrap_frame(value: f32, total_frames: f32) -> f32 {
    // `rem_euclid` may round up to `total_frames` for tiny negative inputs; two truncating
    // remainders cannot.
    ((value % total_frames) + total_frames) % total_frames
}

/// Playback rate derived from the engine's metadata. Zero for static content.
pub fn frames_per_second(duration_secs: f32, total_frames: f32) -> f32 {
    if duration_secs > 0.0 {
        total_frames / duration_secs
    } else {
        0.0
    }
}

/// Read-only animation metadata, fetched once when a session is created.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameInfo {
    pub duration_secs: f32,
    pub total_frames: f32,
    pub fps: f32,
}

impl FrameInfo {
    pub fn new(duration_secs: f32, total_frames: f32) -> Self {
        Self {
            duration_secs,
            total_frames,
            fps: frames_per_second(duration_secs, total_frames),
        }
    }

    /// Static or single-frame content is never wrapped or seeked.
    pub fn is_static(self) -> bool {
        self.total_frames <= 1.0
    }
}

/// Pixel dimensions of a canvas or texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> TvgResult<Self> {
        if width == 0 || height == 0 {
            return Err(TvgError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        if width > MAX_CANVAS_DIM || height > MAX_CANVAS_DIM {
            return Err(TvgError::validation(format!(
                "canvas too large: {width}x{height} (max {MAX_CANVAS_DIM}x{MAX_CANVAS_DIM})"
            )));
        }
        Ok(Self { width, height })
    }

    /// Canvas from the engine's intrinsic float size, truncated like a pixel cast.
    pub fn from_intrinsic(width: f32, height: f32) -> TvgResult<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(TvgError::validation("intrinsic size is not finite"));
        }
        Self::new(width.max(0.0) as u32, height.max(0.0) as u32)
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}
